//! Combat session state
//!
//! A session owns both fighters, both projectile collections and the only
//! random source used during the round, so a given seed and input sequence
//! always replays identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{AiController, AiStrategy};
use super::collision::Precision;
use super::fighter::{Fighter, JumpPhysics, MovementModel};
use super::mask::OccupancyMask;
use super::projectile::{Projectile, Side};
use super::snapshot::{FighterView, ProjectileView, Snapshot};
use crate::consts::*;
use crate::error::ArenaError;
use crate::settings::Settings;
use crate::tuning::Difficulty;

/// Session-scoped random generator
pub type SimRng = Pcg32;

/// Seed used when the caller does not pick one
pub const DEFAULT_SEED: u64 = 0x5EED_2D_F1;

/// Round outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Human,
    Ai,
}

impl Winner {
    /// Banner text for the outcome screen
    pub fn label(self, player_name: &str) -> String {
        match self {
            Winner::Human if player_name.trim().is_empty() => "Player Wins!".to_string(),
            Winner::Human => format!("{} Wins!", player_name.trim()),
            Winner::Ai => "AI Wins!".to_string(),
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Winner::Human,
            Side::Ai => Winner::Ai,
        }
    }
}

/// Everything needed to start a round
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub precision: Precision,
    pub strategy: AiStrategy,
    pub movement: MovementModel,
    pub ai_fire_chance: f32,
    pub physics: JumpPhysics,
    pub fighter_extent: Vec2,
    pub human_mask: Option<OccupancyMask>,
    pub ai_mask: Option<OccupancyMask>,
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            seed: DEFAULT_SEED,
            precision: Precision::default(),
            strategy: AiStrategy::default(),
            movement: MovementModel::default(),
            ai_fire_chance: AI_FIRE_CHANCE,
            physics: JumpPhysics::default(),
            fighter_extent: Vec2::new(FIGHTER_WIDTH, FIGHTER_HEIGHT),
            human_mask: None,
            ai_mask: None,
        }
    }

    /// Round options taken from the player's settings
    pub fn from_settings(difficulty: Difficulty, settings: &Settings) -> Self {
        Self {
            seed: settings.seed.unwrap_or(DEFAULT_SEED),
            precision: settings.collision,
            strategy: settings.ai_strategy,
            movement: settings.movement,
            ai_fire_chance: settings.ai_fire_chance,
            ..Self::new(difficulty)
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations that cannot produce a playable round
    pub fn validate(&self) -> Result<(), ArenaError> {
        let extent = self.fighter_extent;
        let lane_width = MIDLINE_X - 2.0 * EDGE_MARGIN;
        if !(extent.x > 0.0 && extent.y > 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "fighter extent must be positive, got {extent}"
            )));
        }
        if extent.x > lane_width || extent.y > GROUND_LINE - EDGE_MARGIN {
            return Err(ArenaError::InvalidConfig(format!(
                "fighter extent {extent} does not fit in a {lane_width}-wide half"
            )));
        }
        if !(self.physics.gravity.is_finite() && self.physics.gravity > 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "gravity must be positive, got {}",
                self.physics.gravity
            )));
        }
        if !(self.physics.jump_velocity.is_finite() && self.physics.jump_velocity >= 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "jump velocity must be non-negative, got {}",
                self.physics.jump_velocity
            )));
        }
        if !(0.0..=1.0).contains(&self.ai_fire_chance) {
            return Err(ArenaError::InvalidConfig(format!(
                "AI fire chance must be within [0, 1], got {}",
                self.ai_fire_chance
            )));
        }
        Ok(())
    }
}

/// One round between the human and the AI
pub struct Session {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub precision: Precision,
    pub movement: MovementModel,
    /// Ticks simulated so far
    pub tick: u64,
    pub human: Fighter,
    pub ai: Fighter,
    /// Projectiles fired by the human (ascending id)
    pub human_projectiles: Vec<Projectile>,
    /// Projectiles fired by the AI (ascending id)
    pub ai_projectiles: Vec<Projectile>,
    pub(crate) winner: Option<Winner>,
    pub(crate) quit_requested: bool,
    pub(crate) aborted: bool,
    pub(crate) rng: SimRng,
    pub(crate) ai_controller: AiController,
    next_id: u32,
}

impl Session {
    /// Validate `config` and set up a fresh round
    pub fn new(config: SessionConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let human = Fighter::human()
            .with_extent(config.fighter_extent)
            .with_physics(config.physics)
            .with_mask(config.human_mask);
        let ai = Fighter::ai(config.difficulty)
            .with_extent(config.fighter_extent)
            .with_physics(config.physics)
            .with_mask(config.ai_mask);
        let ai_controller = AiController::new(config.strategy, config.ai_fire_chance);

        log::info!(
            "Session start: difficulty={} seed={} strategy={} precision={:?}",
            config.difficulty,
            config.seed,
            ai_controller.policy_name(),
            config.precision
        );

        Ok(Self {
            seed: config.seed,
            difficulty: config.difficulty,
            precision: config.precision,
            movement: config.movement,
            tick: 0,
            human,
            ai,
            human_projectiles: Vec::new(),
            ai_projectiles: Vec::new(),
            winner: None,
            quit_requested: false,
            aborted: false,
            rng: SimRng::seed_from_u64(config.seed),
            ai_controller,
            next_id: 1,
        })
    }

    /// Swap the AI controller (custom policies, tests)
    pub fn with_ai_controller(mut self, controller: AiController) -> Self {
        self.ai_controller = controller;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Winner, once the round has been decided
    pub fn is_over(&self) -> Option<Winner> {
        self.winner
    }

    /// Whether the round was abandoned through [`Session::request_quit`]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// True while ticks still mutate state
    pub fn is_running(&self) -> bool {
        self.winner.is_none() && !self.aborted
    }

    /// Ask the round to stop; honored at the next tick boundary
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            human: FighterView::from(&self.human),
            ai: FighterView::from(&self.ai),
            human_projectiles: self.human_projectiles.iter().map(ProjectileView::from).collect(),
            ai_projectiles: self.ai_projectiles.iter().map(ProjectileView::from).collect(),
            winner: self.winner,
        }
    }
}

/// Start a round at `difficulty` with default options
pub fn create_session(difficulty: Difficulty) -> Result<Session, ArenaError> {
    Session::new(SessionConfig::new(difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_wires_tier() {
        for (difficulty, health, speed, cooldown) in [
            (Difficulty::Easy, 100, 2.0, 800),
            (Difficulty::Medium, 125, 4.0, 600),
            (Difficulty::Hard, 150, 6.0, 400),
        ] {
            let session = create_session(difficulty).unwrap();
            assert_eq!(session.ai.max_health(), health);
            assert_eq!(session.ai.health(), health);
            assert_eq!(session.ai.speed(), speed);
            assert_eq!(session.ai.shoot_cooldown_ms(), cooldown);
            // Human is tier-independent
            assert_eq!(session.human.max_health(), 100);
            assert_eq!(session.human.speed(), 5.0);
            assert_eq!(session.human.shoot_cooldown_ms(), 500);
        }
    }

    #[test]
    fn test_new_session_is_running() {
        let session = create_session(Difficulty::Medium).unwrap();
        assert!(session.is_running());
        assert_eq!(session.is_over(), None);
        assert!(session.human_projectiles.is_empty());
        assert!(session.ai_projectiles.is_empty());
        assert!(session.human.pos.x < session.ai.pos.x);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = SessionConfig::new(Difficulty::Easy);
        config.fighter_extent = Vec2::new(400.0, 100.0);
        assert!(matches!(Session::new(config), Err(ArenaError::InvalidConfig(_))));

        let mut config = SessionConfig::new(Difficulty::Easy);
        config.physics.gravity = 0.0;
        assert!(matches!(Session::new(config), Err(ArenaError::InvalidConfig(_))));

        let mut config = SessionConfig::new(Difficulty::Easy);
        config.ai_fire_chance = 1.5;
        assert!(matches!(Session::new(config), Err(ArenaError::InvalidConfig(_))));
    }

    #[test]
    fn test_winner_label() {
        assert_eq!(Winner::Human.label("Ada"), "Ada Wins!");
        assert_eq!(Winner::Human.label("  "), "Player Wins!");
        assert_eq!(Winner::Ai.label("Ada"), "AI Wins!");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let session = create_session(Difficulty::Hard).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.ai.max_health, 150);
        assert_eq!(snap.human.health_fraction, 1.0);
        assert_eq!(snap.winner, None);
        assert!(snap.to_json().unwrap().contains("\"max_health\":150"));
    }
}
