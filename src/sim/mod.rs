//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only, time comes in from the caller
//! - Seeded session RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or input-device dependencies

pub mod ai;
pub mod collision;
pub mod fighter;
pub mod mask;
pub mod pathfind;
pub mod projectile;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ai::{AiAction, AiController, AiStrategy, Policy};
pub use collision::{Precision, coarse_hit, fine_hit};
pub use fighter::{Fighter, JumpPhysics, MoveIntent, MovementModel, Role};
pub use mask::OccupancyMask;
pub use pathfind::{Lattice, Step, find_path};
pub use projectile::{Heading, Projectile, Side};
pub use rect::{Lane, Rect};
pub use snapshot::{FighterView, ProjectileView, Snapshot};
pub use state::{DEFAULT_SEED, Session, SessionConfig, SimRng, Winner, create_session};
pub use tick::{TickInput, advance, tick};
