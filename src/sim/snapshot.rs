//! Observable per-tick state handed to the presentation layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fighter::Fighter;
use super::projectile::Projectile;
use super::state::Winner;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    pub pos: Vec2,
    pub extent: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Health as a fraction of max, for health bars
    pub health_fraction: f32,
    pub airborne: bool,
}

impl From<&Fighter> for FighterView {
    fn from(f: &Fighter) -> Self {
        Self {
            pos: f.pos,
            extent: f.extent(),
            health: f.health(),
            max_health: f.max_health(),
            health_fraction: f.health_fraction(),
            airborne: f.is_airborne(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
}

impl From<&Projectile> for ProjectileView {
    fn from(p: &Projectile) -> Self {
        Self {
            pos: p.pos,
            radius: p.radius(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub human: FighterView,
    pub ai: FighterView,
    pub human_projectiles: Vec<ProjectileView>,
    pub ai_projectiles: Vec<ProjectileView>,
    pub winner: Option<Winner>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
