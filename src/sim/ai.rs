//! AI decision making
//!
//! A [`Policy`] picks one [`AiAction`] per tick. The default policy draws
//! uniformly from the tier's action set; pursuit and lattice path search are
//! opt-in alternatives selected through [`AiStrategy`]. Fire gating is shared
//! by all policies and lives on [`AiController`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::fighter::{Fighter, Role};
use super::pathfind::{Lattice, Step, find_path};
use super::state::SimRng;
use crate::consts::{AI_FIRE_CHANCE, ARENA_HEIGHT, ARENA_WIDTH, PURSUIT_MIN_DISTANCE};
use crate::distance;
use crate::tuning::Difficulty;

/// Vertical hop used by the path search lattice
pub const LATTICE_JUMP: i32 = 20;
/// Expansion budget for one path search
pub const LATTICE_MAX_EXPANSIONS: usize = 2048;

/// One tick's movement decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiAction {
    MoveLeft,
    MoveRight,
    /// Ignored while airborne
    Jump,
    Idle,
}

/// Which policy drives the AI fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AiStrategy {
    /// Uniform draw from the tier's action set
    #[default]
    Random,
    /// Close in on the opponent, backing off when too near
    Pursuit,
    /// Follow a lattice path toward the opponent
    PathSearch,
}

impl AiStrategy {
    pub fn build(self) -> Box<dyn Policy> {
        match self {
            AiStrategy::Random => Box::new(RandomPolicy),
            AiStrategy::Pursuit => Box::new(PursuitPolicy::default()),
            AiStrategy::PathSearch => Box::new(PathPolicy::default()),
        }
    }
}

pub trait Policy: Send {
    fn name(&self) -> &str;
    fn decide(&mut self, me: &Fighter, opponent: &Fighter, rng: &mut SimRng) -> AiAction;
}

/// Tier-dependent uniform choice
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, me: &Fighter, _opponent: &Fighter, rng: &mut SimRng) -> AiAction {
        let difficulty = match me.role() {
            Role::Ai { difficulty } => difficulty,
            Role::Human => Difficulty::Easy,
        };
        random_action(difficulty, rng)
    }
}

/// Easy picks from {left, right, idle}; Medium and Hard add jump
pub fn random_action(difficulty: Difficulty, rng: &mut SimRng) -> AiAction {
    const GROUND_ONLY: [AiAction; 3] = [AiAction::MoveLeft, AiAction::MoveRight, AiAction::Idle];
    const WITH_JUMP: [AiAction; 4] = [
        AiAction::MoveLeft,
        AiAction::MoveRight,
        AiAction::Jump,
        AiAction::Idle,
    ];

    if difficulty.can_jump() {
        WITH_JUMP[rng.random_range(0..WITH_JUMP.len())]
    } else {
        GROUND_ONLY[rng.random_range(0..GROUND_ONLY.len())]
    }
}

/// Steer toward the opponent horizontally and jump when it is higher
#[derive(Debug, Clone)]
pub struct PursuitPolicy {
    pub min_distance: f32,
}

impl Default for PursuitPolicy {
    fn default() -> Self {
        Self {
            min_distance: PURSUIT_MIN_DISTANCE,
        }
    }
}

impl Policy for PursuitPolicy {
    fn name(&self) -> &str {
        "pursuit"
    }

    fn decide(&mut self, me: &Fighter, opponent: &Fighter, _rng: &mut SimRng) -> AiAction {
        let mine = me.center();
        let theirs = opponent.center();

        if !me.is_airborne() && theirs.y < mine.y - me.extent().y / 4.0 {
            return AiAction::Jump;
        }

        let dx = theirs.x - mine.x;
        let toward = if distance(mine, theirs) < self.min_distance {
            -dx
        } else {
            dx
        };
        if toward < 0.0 {
            AiAction::MoveLeft
        } else if toward > 0.0 {
            AiAction::MoveRight
        } else {
            AiAction::Idle
        }
    }
}

/// Re-plans a lattice path every tick and takes its first step
#[derive(Debug, Clone)]
pub struct PathPolicy {
    pub jump: i32,
    pub max_expansions: usize,
    /// Most recent plan, kept for inspection
    pub last_plan: Vec<Step>,
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self {
            jump: LATTICE_JUMP,
            max_expansions: LATTICE_MAX_EXPANSIONS,
            last_plan: Vec::new(),
        }
    }
}

impl PathPolicy {
    /// Opponent position snapped onto the lattice anchored at `start`
    fn snap_goal(start: (i32, i32), target: Vec2, step: i32, jump: i32) -> (i32, i32) {
        let dx = ((target.x - start.0 as f32) / step as f32).round() as i32;
        let dy = ((target.y - start.1 as f32) / jump as f32).round() as i32;
        (start.0 + dx * step, start.1 + dy * jump)
    }
}

impl Policy for PathPolicy {
    fn name(&self) -> &str {
        "path_search"
    }

    fn decide(&mut self, me: &Fighter, opponent: &Fighter, _rng: &mut SimRng) -> AiAction {
        let step = (me.speed().round() as i32).max(1);
        let lattice = Lattice {
            step,
            jump: self.jump,
            bounds: (0, 0, ARENA_WIDTH as i32, ARENA_HEIGHT as i32),
            max_expansions: self.max_expansions,
        };
        let start = (me.pos.x.round() as i32, me.pos.y.round() as i32);
        let goal = Self::snap_goal(start, opponent.pos, step, self.jump);

        self.last_plan = find_path(&lattice, start, goal);
        match self.last_plan.first() {
            Some(Step::Left) => AiAction::MoveLeft,
            Some(Step::Right) => AiAction::MoveRight,
            Some(Step::Up) => AiAction::Jump,
            None => AiAction::Idle,
        }
    }
}

/// Carry out `action`, then integrate gravity
pub fn apply_action(fighter: &mut Fighter, action: AiAction) {
    match action {
        AiAction::MoveLeft => fighter.step_horizontal(-1.0),
        AiAction::MoveRight => fighter.step_horizontal(1.0),
        AiAction::Jump => {
            fighter.jump();
        }
        AiAction::Idle => {}
    }
    fighter.apply_gravity();
}

/// Movement policy plus the random fire gate
pub struct AiController {
    policy: Box<dyn Policy>,
    fire_chance: f32,
}

impl AiController {
    pub fn new(strategy: AiStrategy, fire_chance: f32) -> Self {
        Self {
            policy: strategy.build(),
            fire_chance: fire_chance.clamp(0.0, 1.0),
        }
    }

    pub fn with_policy(policy: Box<dyn Policy>, fire_chance: f32) -> Self {
        Self {
            policy,
            fire_chance: fire_chance.clamp(0.0, 1.0),
        }
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn decide(&mut self, me: &Fighter, opponent: &Fighter, rng: &mut SimRng) -> AiAction {
        self.policy.decide(me, opponent, rng)
    }

    /// Per-tick draw; the cooldown is checked separately by the fighter
    pub fn wants_to_fire(&self, rng: &mut SimRng) -> bool {
        rng.random::<f32>() < self.fire_chance
    }
}

impl Default for AiController {
    fn default() -> Self {
        Self::new(AiStrategy::default(), AI_FIRE_CHANCE)
    }
}
