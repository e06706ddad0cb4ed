//! Scene flow: Menu -> DifficultySelect -> Combat -> Outcome
//!
//! [`Scene::transition`] is a pure function from (scene, event) to the next
//! scene. [`Director`] drives it, owns the round in progress and carries the
//! player's settings between rounds.

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::settings::Settings;
use crate::sim::{Session, SessionConfig, Snapshot, TickInput, Winner};
use crate::tuning::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    Menu,
    DifficultySelect,
    Combat { difficulty: Difficulty },
    Outcome { difficulty: Difficulty, winner: Winner },
    /// Terminal: the player quit from the menu
    Exit,
}

/// Discrete selections coming from the menu collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// "Start Game"
    Start,
    /// "Quit Game" in the menu, or abandoning a round
    Quit,
    ChooseDifficulty(Difficulty),
    /// Raised when the session reports a winner
    RoundOver(Winner),
    PlayAgain,
    MainMenu,
}

impl Scene {
    /// Next scene for `event`; events that do not apply leave the scene unchanged
    pub fn transition(self, event: SceneEvent) -> Scene {
        use Scene::*;
        use SceneEvent::*;

        match (self, event) {
            (Menu, Start) => DifficultySelect,
            (Menu, Quit) => Exit,
            (DifficultySelect, ChooseDifficulty(difficulty)) => Combat { difficulty },
            (Combat { difficulty }, RoundOver(winner)) => Outcome { difficulty, winner },
            (Combat { .. }, Quit) => Menu,
            (Outcome { .. }, PlayAgain) => DifficultySelect,
            (Outcome { .. }, MainMenu) => Menu,
            (scene, _) => scene,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Scene::Exit)
    }
}

/// Owns the scene machine, the active round and the player's settings
pub struct Director {
    scene: Scene,
    settings: Settings,
    base_seed: u64,
    rounds_started: u64,
    session: Option<Session>,
    last_snapshot: Option<Snapshot>,
}

impl Director {
    /// `base_seed` seeds rounds when the settings do not pin a seed
    pub fn new(settings: Settings, base_seed: u64) -> Self {
        Self {
            scene: Scene::Menu,
            settings,
            base_seed,
            rounds_started: 0,
            session: None,
            last_snapshot: None,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Final state of the most recent round
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Outcome banner text while in the Outcome scene
    pub fn outcome_banner(&self) -> Option<String> {
        match self.scene {
            Scene::Outcome { winner, .. } => Some(winner.label(self.settings.display_name())),
            _ => None,
        }
    }

    /// Apply a selection event. Entering Combat builds the round; if that
    /// fails the scene is left unchanged and the error returned.
    pub fn handle(&mut self, event: SceneEvent) -> Result<Scene, ArenaError> {
        let current = self.scene;

        match (current, event) {
            // Quit mid-round is applied at the next tick boundary
            (Scene::Combat { .. }, SceneEvent::Quit) => {
                if let Some(session) = self.session.as_mut() {
                    session.request_quit();
                    return Ok(current);
                }
            }
            // Only the session decides when a round is over
            (Scene::Combat { .. }, SceneEvent::RoundOver(winner)) => {
                let decided = self.session.as_ref().and_then(Session::is_over);
                if decided != Some(winner) {
                    log::debug!("Ignoring {event:?}: session reports {decided:?}");
                    return Ok(current);
                }
            }
            _ => {}
        }

        let next = current.transition(event);
        if next == current {
            log::debug!("Event {event:?} has no effect in {current:?}");
            return Ok(current);
        }

        if let Scene::Combat { difficulty } = next {
            self.session = Some(self.start_round(difficulty)?);
        } else if matches!(current, Scene::Combat { .. }) {
            if let Some(session) = self.session.take() {
                self.last_snapshot = Some(session.snapshot());
            }
        }

        log::info!("Scene {current:?} -> {next:?}");
        self.scene = next;
        Ok(next)
    }

    fn start_round(&mut self, difficulty: Difficulty) -> Result<Session, ArenaError> {
        let seed = self
            .settings
            .seed
            .unwrap_or_else(|| self.base_seed.wrapping_add(self.rounds_started));
        let config = SessionConfig::from_settings(difficulty, &self.settings).with_seed(seed);
        let session = Session::new(config)?;
        self.rounds_started += 1;
        Ok(session)
    }

    /// Run one combat tick. Returns `None` outside of Combat. Moves to the
    /// Outcome scene when the round is decided, or back to the Menu when a
    /// requested quit took effect.
    pub fn advance(&mut self, input: &TickInput, now_ms: u64) -> Option<Snapshot> {
        let Scene::Combat { difficulty } = self.scene else {
            return None;
        };
        let session = self.session.as_mut()?;
        let snapshot = session.advance(input, now_ms);

        if session.is_aborted() {
            self.last_snapshot = Some(snapshot.clone());
            self.session = None;
            self.scene = Scene::Menu;
            log::info!("Scene {:?} -> {:?}", Scene::Combat { difficulty }, self.scene);
        } else if let Some(winner) = snapshot.winner {
            if let Err(e) = self.handle(SceneEvent::RoundOver(winner)) {
                log::warn!("Could not enter the outcome scene: {e}");
            }
        }
        Some(snapshot)
    }
}
