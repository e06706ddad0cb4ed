//! Arena Duel - a two-fighter arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, projectiles, collisions, AI)
//! - `scene`: Menu / difficulty / combat / outcome state machine
//! - `tuning`: Difficulty table and fixed fighter parameters
//! - `settings`: Player preferences and session options
//! - `clock`: Fixed-step pacing for the 35 Hz simulation

pub mod clock;
pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ArenaError;
pub use scene::{Director, Scene, SceneEvent};
pub use settings::Settings;
pub use sim::{Session, Snapshot, TickInput, Winner, create_session};
pub use tuning::Difficulty;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical updates per second
    pub const TICKS_PER_SECOND: u32 = 35;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Vertical split between the two halves
    pub const MIDLINE_X: f32 = ARENA_WIDTH / 2.0;
    /// Inset kept clear on every edge and on both sides of the midline
    pub const EDGE_MARGIN: f32 = 50.0;

    /// Fighter defaults
    pub const FIGHTER_WIDTH: f32 = 200.0;
    pub const FIGHTER_HEIGHT: f32 = 200.0;
    /// Y coordinate a grounded fighter's bottom edge rests on
    pub const GROUND_LINE: f32 = ARENA_HEIGHT - EDGE_MARGIN;

    /// Jump arc (units/tick and units/tick²; y grows downward)
    pub const JUMP_VELOCITY: f32 = 18.0;
    pub const GRAVITY: f32 = 1.2;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Health removed per confirmed hit
    pub const HIT_DAMAGE: u32 = 10;

    /// Per-tick probability that the AI tries to fire
    pub const AI_FIRE_CHANCE: f32 = 0.02;
    /// Pursuit strategy backs off inside this distance
    pub const PURSUIT_MIN_DISTANCE: f32 = 20.0;
}

/// Milliseconds covered by `ticks` simulation steps
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICKS_PER_SECOND as u64
}

/// Straight-line distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
