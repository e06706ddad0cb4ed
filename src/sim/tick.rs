//! Fixed timestep simulation tick
//!
//! Core round loop that advances a session deterministically.

use serde::{Deserialize, Serialize};

use super::ai::apply_action;
use super::collision::Precision;
use super::fighter::{Fighter, MoveIntent};
use super::projectile::{Projectile, Side};
use super::snapshot::Snapshot;
use super::state::{Session, Winner};
use crate::consts::HIT_DAMAGE;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Directional intents for the human fighter
    pub movement: MoveIntent,
    /// Fire request (space)
    pub fire: bool,
}

/// Advance the session by one tick at monotonic time `now_ms`
pub fn tick(session: &mut Session, input: &TickInput, now_ms: u64) {
    if session.quit_requested && session.is_running() {
        session.aborted = true;
        log::info!("Round abandoned at tick {}", session.tick);
    }
    // Don't tick once decided or abandoned
    if !session.is_running() {
        return;
    }

    session.tick += 1;

    // 1. Movement: human first, then AI
    session.human.apply_intent(input.movement, session.movement);
    let action = session
        .ai_controller
        .decide(&session.ai, &session.human, &mut session.rng);
    apply_action(&mut session.ai, action);
    log::trace!("tick {} ai action {:?}", session.tick, action);

    // 2. Fire requests: human first, then AI
    if input.fire {
        let id = session.next_entity_id();
        if let Some(projectile) = session.human.try_fire(now_ms, id) {
            session.human_projectiles.push(projectile);
        }
    }
    if session.ai_controller.wants_to_fire(&mut session.rng) {
        let id = session.next_entity_id();
        if let Some(projectile) = session.ai.try_fire(now_ms, id) {
            session.ai_projectiles.push(projectile);
        }
    }

    // 3. Move projectiles and drop the ones that left the arena
    for projectile in session
        .human_projectiles
        .iter_mut()
        .chain(session.ai_projectiles.iter_mut())
    {
        projectile.advance();
    }
    session.human_projectiles.retain(|p| !p.is_out_of_bounds());
    session.ai_projectiles.retain(|p| !p.is_out_of_bounds());

    // 4. Hits against the opposing fighter: human shots first
    let precision = session.precision;
    for shooter in [Side::Human, Side::Ai] {
        let (projectiles, target) = match shooter {
            Side::Human => (&mut session.human_projectiles, &mut session.ai),
            Side::Ai => (&mut session.ai_projectiles, &mut session.human),
        };
        if resolve_hits(projectiles, target, precision) {
            finish(session, Winner::from(shooter));
            return;
        }
    }
}

/// Apply hits from `projectiles` to `target`, removing every projectile that
/// landed. Stops at the hit that defeats the target. Returns true on defeat.
pub fn resolve_hits(projectiles: &mut Vec<Projectile>, target: &mut Fighter, precision: Precision) -> bool {
    if target.is_defeated() {
        return false;
    }

    let mut landed = Vec::new();
    let mut defeated = false;
    for projectile in projectiles.iter() {
        if !projectile.overlaps(target, precision) {
            continue;
        }
        landed.push(projectile.id);
        defeated = target.apply_damage(HIT_DAMAGE);
        log::debug!(
            "{:?} hit by projectile {} ({} hp left)",
            target.side(),
            projectile.id,
            target.health()
        );
        if defeated {
            break;
        }
    }

    if !landed.is_empty() {
        projectiles.retain(|p| !landed.contains(&p.id));
    }
    defeated
}

fn finish(session: &mut Session, winner: Winner) {
    session.winner = Some(winner);
    log::info!(
        "Round over at tick {}: {:?} wins (human {} hp, ai {} hp)",
        session.tick,
        winner,
        session.human.health(),
        session.ai.health()
    );
}

impl Session {
    /// One tick of the round loop, returning the resulting observable state
    pub fn advance(&mut self, input: &TickInput, now_ms: u64) -> Snapshot {
        tick(self, input, now_ms);
        self.snapshot()
    }
}

/// Free-function form of [`Session::advance`]
pub fn advance(session: &mut Session, input: &TickInput, now_ms: u64) -> Snapshot {
    session.advance(input, now_ms)
}
