//! Fighters: kinematics, health and firing
//!
//! Both the human and the AI fighter share this type; only the source of
//! movement decisions differs (input intents vs. [`super::ai`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::OccupancyMask;
use super::projectile::{Heading, Projectile, Side};
use super::rect::{Lane, Rect};
use crate::consts::*;
use crate::tuning::{Difficulty, FighterParams, HUMAN_PARAMS};

/// Who drives the fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Human,
    Ai { difficulty: Difficulty },
}

impl Role {
    pub fn side(&self) -> Side {
        match self {
            Role::Human => Side::Human,
            Role::Ai { .. } => Side::Ai,
        }
    }
}

/// How the up/down intents move a human fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementModel {
    /// Up starts a jump arc under gravity; down is ignored
    #[default]
    Jump,
    /// Up/down translate directly by `speed`, no gravity
    Direct,
}

/// Directional intents for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Jump arc constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpPhysics {
    /// Added to vertical velocity every airborne tick (> 0)
    pub gravity: f32,
    /// Initial upward speed of a jump
    pub jump_velocity: f32,
}

impl Default for JumpPhysics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    /// Top-left corner
    pub pos: Vec2,
    extent: Vec2,
    role: Role,
    health: u32,
    max_health: u32,
    speed: f32,
    shoot_cooldown_ms: u64,
    last_shot_ms: Option<u64>,
    vertical_velocity: f32,
    airborne: bool,
    physics: JumpPhysics,
    lane: Lane,
    #[serde(skip)]
    mask: Option<OccupancyMask>,
}

impl Fighter {
    /// Human fighter at its left-half spawn point
    pub fn human() -> Self {
        Self::new(Role::Human, HUMAN_PARAMS, Lane::left_half())
    }

    /// AI fighter at its right-half spawn point
    pub fn ai(difficulty: Difficulty) -> Self {
        Self::new(Role::Ai { difficulty }, difficulty.params(), Lane::right_half())
    }

    fn new(role: Role, params: FighterParams, lane: Lane) -> Self {
        let extent = Vec2::new(FIGHTER_WIDTH, FIGHTER_HEIGHT);
        let spawn_x = lane.min_x + (lane.width() - extent.x) / 2.0;
        let mut fighter = Self {
            pos: Vec2::ZERO,
            extent,
            role,
            health: params.max_health,
            max_health: params.max_health,
            speed: params.speed as f32,
            shoot_cooldown_ms: params.shoot_cooldown_ms,
            last_shot_ms: None,
            vertical_velocity: 0.0,
            airborne: false,
            physics: JumpPhysics::default(),
            lane,
            mask: None,
        };
        fighter.pos = Vec2::new(lane.clamp_x(spawn_x, extent.x), fighter.ground_y());
        fighter
    }

    /// Replace the extent, re-seating the fighter on the ground inside its lane
    pub fn with_extent(mut self, extent: Vec2) -> Self {
        self.extent = extent;
        let spawn_x = self.lane.min_x + (self.lane.width() - extent.x) / 2.0;
        self.pos = Vec2::new(self.lane.clamp_x(spawn_x, extent.x), self.ground_y());
        self
    }

    pub fn with_mask(mut self, mask: Option<OccupancyMask>) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_physics(mut self, physics: JumpPhysics) -> Self {
        self.physics = physics;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn side(&self) -> Side {
        self.role.side()
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Health in [0, 1] for health bars
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn shoot_cooldown_ms(&self) -> u64 {
        self.shoot_cooldown_ms
    }

    pub fn last_shot_ms(&self) -> Option<u64> {
        self.last_shot_ms
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn mask(&self) -> Option<&OccupancyMask> {
        self.mask.as_ref()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.extent)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Top-left y when standing on the ground line
    pub fn ground_y(&self) -> f32 {
        GROUND_LINE - self.extent.y
    }

    /// Highest allowed top-left y
    fn ceiling_y(&self) -> f32 {
        EDGE_MARGIN
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Step horizontally by `direction * speed`, staying in the lane
    pub fn step_horizontal(&mut self, direction: f32) {
        let x = self.pos.x + direction * self.speed;
        self.pos.x = self.lane.clamp_x(x, self.extent.x);
    }

    /// Step vertically by `direction * speed` without a jump arc
    pub fn step_vertical(&mut self, direction: f32) {
        let y = self.pos.y + direction * self.speed;
        self.pos.y = y.clamp(self.ceiling_y(), self.ground_y().max(self.ceiling_y()));
    }

    /// Start a jump; refused while already airborne
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.vertical_velocity = -self.physics.jump_velocity;
        self.airborne = true;
        true
    }

    /// Integrate one tick of the jump arc
    pub fn apply_gravity(&mut self) {
        if !self.airborne {
            return;
        }
        self.pos.y += self.vertical_velocity;
        self.vertical_velocity += self.physics.gravity;

        if self.pos.y < self.ceiling_y() {
            self.pos.y = self.ceiling_y();
            self.vertical_velocity = self.vertical_velocity.max(0.0);
        }
        if self.pos.y >= self.ground_y() {
            self.pos.y = self.ground_y();
            self.vertical_velocity = 0.0;
            self.airborne = false;
        }
    }

    /// Human movement policy for one tick (gravity included)
    pub fn apply_intent(&mut self, intent: MoveIntent, model: MovementModel) {
        match model {
            MovementModel::Jump => {
                if intent.up {
                    self.jump();
                }
            }
            MovementModel::Direct => {
                if intent.up {
                    self.step_vertical(-1.0);
                }
                if intent.down {
                    self.step_vertical(1.0);
                }
            }
        }
        if intent.left {
            self.step_horizontal(-1.0);
        }
        if intent.right {
            self.step_horizontal(1.0);
        }
        self.apply_gravity();
    }

    /// Whether the cooldown window has elapsed at `now_ms`
    pub fn can_fire(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms >= last && now_ms - last >= self.shoot_cooldown_ms,
        }
    }

    /// Fire from the fighter's centre, away from its own side
    pub fn try_fire(&mut self, now_ms: u64, id: u32) -> Option<Projectile> {
        if !self.can_fire(now_ms) {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        let heading = match self.side() {
            Side::Human => Heading::Right,
            Side::Ai => Heading::Left,
        };
        Some(Projectile::new(id, self.side(), self.center(), heading))
    }

    /// Remove health, clamping at zero. Returns true if this defeated the fighter.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        debug_assert!(self.health <= self.max_health);
        self.health == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawns_grounded_in_own_half() {
        let human = Fighter::human();
        let ai = Fighter::ai(Difficulty::Hard);
        assert_eq!(human.pos, Vec2::new(100.0, 350.0));
        assert_eq!(ai.pos, Vec2::new(500.0, 350.0));
        assert!(!human.is_airborne());
        assert_eq!(ai.max_health(), 150);
        assert_eq!(ai.speed(), 6.0);
        assert_eq!(ai.shoot_cooldown_ms(), 400);
    }

    #[test]
    fn test_horizontal_clamped_to_lane() {
        let mut human = Fighter::human();
        for _ in 0..100 {
            human.step_horizontal(1.0);
        }
        assert_eq!(human.rect().max().x, MIDLINE_X - EDGE_MARGIN);
        for _ in 0..100 {
            human.step_horizontal(-1.0);
        }
        assert_eq!(human.pos.x, EDGE_MARGIN);

        let mut ai = Fighter::ai(Difficulty::Easy);
        for _ in 0..100 {
            ai.step_horizontal(-1.0);
        }
        assert_eq!(ai.pos.x, MIDLINE_X + EDGE_MARGIN);
    }

    #[test]
    fn test_jump_round_trip() {
        let mut f = Fighter::human();
        let ground = f.pos.y;
        assert!(f.jump());
        assert!(!f.jump(), "no double jump");

        let mut ticks = 0;
        let mut apex = ground;
        while f.is_airborne() {
            f.apply_gravity();
            apex = apex.min(f.pos.y);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(apex < ground);
        assert_eq!(f.pos.y, ground);
        assert_eq!(f.vertical_velocity(), 0.0);
    }

    #[test]
    fn test_jump_hits_ceiling_then_lands() {
        let mut f = Fighter::human().with_physics(JumpPhysics {
            gravity: 0.5,
            jump_velocity: 400.0,
        });
        f.jump();
        f.apply_gravity();
        assert_eq!(f.pos.y, EDGE_MARGIN);
        while f.is_airborne() {
            f.apply_gravity();
        }
        assert_eq!(f.pos.y, f.ground_y());
    }

    #[test]
    fn test_direct_model_moves_vertically() {
        let mut f = Fighter::human();
        let start = f.pos.y;
        f.apply_intent(
            MoveIntent {
                up: true,
                ..Default::default()
            },
            MovementModel::Direct,
        );
        assert_eq!(f.pos.y, start - 5.0);
        assert!(!f.is_airborne());

        // Cannot go below the ground line
        for _ in 0..10 {
            f.apply_intent(
                MoveIntent {
                    down: true,
                    ..Default::default()
                },
                MovementModel::Direct,
            );
        }
        assert_eq!(f.pos.y, f.ground_y());
    }

    #[test]
    fn test_horizontal_allowed_while_airborne() {
        let mut f = Fighter::human();
        let x = f.pos.x;
        f.apply_intent(
            MoveIntent {
                up: true,
                right: true,
                ..Default::default()
            },
            MovementModel::Jump,
        );
        assert!(f.is_airborne());
        assert_eq!(f.pos.x, x + 5.0);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut f = Fighter::human();
        assert!(f.try_fire(1000, 1).is_some());
        assert!(f.try_fire(1200, 2).is_none());
        assert!(f.try_fire(1499, 3).is_none());
        let p = f.try_fire(1500, 4).unwrap();
        assert_eq!(p.heading(), Heading::Right);
        assert_eq!(p.pos, f.center());
        assert_eq!(f.last_shot_ms(), Some(1500));
    }

    #[test]
    fn test_ai_fires_left() {
        let mut ai = Fighter::ai(Difficulty::Medium);
        let p = ai.try_fire(0, 1).unwrap();
        assert_eq!(p.heading(), Heading::Left);
        assert_eq!(p.owner, Side::Ai);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut f = Fighter::human();
        assert!(!f.apply_damage(10));
        assert_eq!(f.health(), 90);
        assert!(f.apply_damage(500));
        assert_eq!(f.health(), 0);
        assert!(!f.apply_damage(10), "already defeated");
        assert_eq!(f.health(), 0);
    }
}
