use arena_duel::sim::{
    AiAction, AiController, Fighter, MoveIntent, OccupancyMask, Policy, Precision, SessionConfig, SimRng, Snapshot,
    TickInput,
};
use arena_duel::{Difficulty, Director, Scene, SceneEvent, Session, Settings, Winner, create_session, ticks_to_ms};

/// AI that never moves
struct Statue;

impl Policy for Statue {
    fn name(&self) -> &str {
        "statue"
    }

    fn decide(&mut self, _me: &Fighter, _opponent: &Fighter, _rng: &mut SimRng) -> AiAction {
        AiAction::Idle
    }
}

fn fire() -> TickInput {
    TickInput {
        fire: true,
        ..Default::default()
    }
}

fn run_until_decided(director: &mut Director, input: TickInput, max_ticks: u64) -> Option<Snapshot> {
    for t in 1..=max_ticks {
        let snapshot = director.advance(&input, ticks_to_ms(t))?;
        if snapshot.winner.is_some() {
            return Some(snapshot);
        }
    }
    None
}

#[test]
fn test_first_shot_lands_when_it_reaches_the_ai() {
    let mut session = Session::new(SessionConfig::new(Difficulty::Easy).with_seed(3))
        .unwrap()
        .with_ai_controller(AiController::with_policy(Box::new(Statue), 0.0));

    // Fired from x=200 at 10/tick; the AI's left edge sits at 500
    for t in 1..=29 {
        session.advance(&fire(), ticks_to_ms(t));
    }
    assert_eq!(session.ai.health(), 100);
    assert_eq!(session.human_projectiles.first().map(|p| p.pos.x), Some(490.0));

    session.advance(&fire(), ticks_to_ms(30));
    assert_eq!(session.ai.health(), 90);
    assert!(session.human_projectiles.iter().all(|p| p.pos.x < 490.0));
}

/// Statue AI whose sprite only fills the right half of its box
fn masked_session(precision: Precision) -> Session {
    let config = SessionConfig {
        precision,
        ai_mask: Some(OccupancyMask::from_fn(10, 10, |x, _| x >= 5).unwrap()),
        ..SessionConfig::new(Difficulty::Easy)
    };
    Session::new(config)
        .unwrap()
        .with_ai_controller(AiController::with_policy(Box::new(Statue), 0.0))
}

/// Fire once on the first tick, then run through tick `until`
fn single_shot(session: &mut Session, from: u64, until: u64) {
    for t in from..=until {
        let input = if t == 1 { fire() } else { TickInput::default() };
        session.advance(&input, ticks_to_ms(t));
    }
}

#[test]
fn test_fine_collision_passes_through_transparent_pixels() {
    let mut session = masked_session(Precision::Fine);

    // Box reached at x=500 (tick 30) but the left 100 units are transparent
    single_shot(&mut session, 1, 38);
    assert_eq!(session.ai.health(), 100);
    assert_eq!(session.human_projectiles.len(), 1);
    assert_eq!(session.human_projectiles[0].pos.x, 580.0);

    // Leading edge touches the opaque half at x=600
    single_shot(&mut session, 39, 39);
    assert_eq!(session.ai.health(), 90);
    assert!(session.human_projectiles.is_empty());
}

#[test]
fn test_coarse_collision_ignores_the_mask() {
    let mut session = masked_session(Precision::Coarse);
    single_shot(&mut session, 1, 29);
    assert_eq!(session.ai.health(), 100);
    single_shot(&mut session, 30, 30);
    assert_eq!(session.ai.health(), 90);
    assert!(session.human_projectiles.is_empty());
}

#[test]
fn test_statue_ai_loses_after_ten_hits() {
    let mut session = Session::new(SessionConfig::new(Difficulty::Easy))
        .unwrap()
        .with_ai_controller(AiController::with_policy(Box::new(Statue), 0.0));

    let mut hits = 0;
    let mut last_health = session.ai.health();
    for t in 1..=2_000 {
        let snapshot = session.advance(&fire(), ticks_to_ms(t));
        if snapshot.ai.health < last_health {
            assert_eq!(last_health - snapshot.ai.health, 10);
            hits += 1;
            last_health = snapshot.ai.health;
        }
        if snapshot.winner.is_some() {
            break;
        }
    }

    assert_eq!(hits, 10);
    assert_eq!(session.is_over(), Some(Winner::Human));
    assert_eq!(session.ai.health(), 0);
    assert_eq!(session.human.health(), 100);

    // Frozen once decided
    let tick = session.tick;
    let projectiles = session.human_projectiles.len();
    session.advance(&fire(), ticks_to_ms(5_000));
    assert_eq!(session.tick, tick);
    assert_eq!(session.human_projectiles.len(), projectiles);
}

#[test]
fn test_full_round_through_director() {
    let settings = Settings {
        player_name: "Ada".into(),
        ai_fire_chance: 0.0,
        seed: Some(11),
        ..Default::default()
    };
    let mut director = Director::new(settings, 0);

    assert_eq!(director.handle(SceneEvent::Start).unwrap(), Scene::DifficultySelect);
    director
        .handle(SceneEvent::ChooseDifficulty(Difficulty::Easy))
        .unwrap();

    let snapshot = run_until_decided(&mut director, fire(), 3_000).expect("round decided");
    assert_eq!(snapshot.winner, Some(Winner::Human));
    assert_eq!(snapshot.ai.health, 0);
    assert_eq!(
        director.scene(),
        Scene::Outcome {
            difficulty: Difficulty::Easy,
            winner: Winner::Human
        }
    );
    assert_eq!(director.outcome_banner().as_deref(), Some("Ada Wins!"));
    assert!(director.session().is_none());
    assert_eq!(director.last_snapshot().map(|s| s.winner), Some(Some(Winner::Human)));

    // Play again at a harder tier
    assert_eq!(director.handle(SceneEvent::PlayAgain).unwrap(), Scene::DifficultySelect);
    director
        .handle(SceneEvent::ChooseDifficulty(Difficulty::Hard))
        .unwrap();
    let session = director.session().unwrap();
    assert_eq!(session.ai.max_health(), 150);
    assert_eq!(session.ai.health(), 150);
    assert_eq!(session.human.health(), 100);
    assert_eq!(session.tick, 0);

    // Abandon it and leave
    director.handle(SceneEvent::Quit).unwrap();
    director.advance(&TickInput::default(), ticks_to_ms(1));
    assert_eq!(director.scene(), Scene::Menu);
    assert_eq!(director.handle(SceneEvent::Quit).unwrap(), Scene::Exit);
    assert!(director.scene().is_terminal());
}

#[test]
fn test_idle_human_eventually_loses_to_hard_ai() {
    let mut session = create_session(Difficulty::Hard)
        .unwrap()
        .with_ai_controller(AiController::with_policy(Box::new(Statue), 1.0));

    let mut winner = None;
    for t in 1..=5_000 {
        let snapshot = session.advance(&TickInput::default(), ticks_to_ms(t));
        assert!(snapshot.human_projectiles.is_empty());
        if let Some(w) = snapshot.winner {
            winner = Some(w);
            break;
        }
    }
    assert_eq!(winner, Some(Winner::Ai));
    assert_eq!(session.human.health(), 0);
    assert_eq!(session.ai.health(), 150);
}

#[test]
fn test_same_seed_same_round() {
    let script = |t: u64| TickInput {
        movement: MoveIntent {
            up: t % 30 == 0,
            left: t % 50 < 25,
            right: t % 50 >= 25,
            ..Default::default()
        },
        fire: t % 3 == 0,
    };

    let play = |difficulty: Difficulty| {
        let mut session = Session::new(SessionConfig::new(difficulty).with_seed(99)).unwrap();
        let mut frames = Vec::new();
        for t in 1..=400 {
            frames.push(session.advance(&script(t), ticks_to_ms(t)));
        }
        frames
    };

    for difficulty in Difficulty::ALL {
        assert_eq!(play(difficulty), play(difficulty));
    }
}

#[test]
fn test_unknown_difficulty_is_rejected() {
    let err = "impossible".parse::<Difficulty>().unwrap_err();
    assert!(err.to_string().contains("impossible"));
}
