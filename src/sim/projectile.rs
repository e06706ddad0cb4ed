//! Straight-line projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{PROJECTILE_RADIUS, PROJECTILE_SPEED};

/// Which fighter a projectile or outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Ai,
}

/// Horizontal travel direction, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Toward increasing x
    Right,
    /// Toward decreasing x
    Left,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Right => 1.0,
            Heading::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: Side,
    pub pos: Vec2,
    radius: f32,
    heading: Heading,
    speed: f32,
}

impl Projectile {
    pub fn new(id: u32, owner: Side, pos: Vec2, heading: Heading) -> Self {
        Self::with_speed(id, owner, pos, heading, PROJECTILE_SPEED)
    }

    pub fn with_speed(id: u32, owner: Side, pos: Vec2, heading: Heading, speed: f32) -> Self {
        Self {
            id,
            owner,
            pos,
            radius: PROJECTILE_RADIUS,
            heading,
            speed,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Move one tick along the heading
    pub fn advance(&mut self) {
        self.pos.x += self.heading.sign() * self.speed;
    }

    /// True once the centre has left the arena on any side
    pub fn is_out_of_bounds(&self) -> bool {
        !Rect::arena().contains_point(self.pos)
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}
