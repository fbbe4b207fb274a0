//! A playable session: the core game state plus its high-score file.

use std::collections::VecDeque;

use crate::controller;
use crate::core::{GameEvent, GameSnapshot, GameState, EVENT_CAPACITY};
use crate::highscore::HighScoreStore;
use crate::types::{GameAction, GameConfig};

#[derive(Debug)]
pub struct Session {
    state: GameState,
    store: HighScoreStore,
    /// Events taken from the core, kept until the front-end drains them.
    /// Bounded like the core queue.
    events: VecDeque<GameEvent>,
}

impl Session {
    /// Start a session in the menu with the stored high score as prior best.
    pub fn new(config: GameConfig, seed: u32, store: HighScoreStore) -> Self {
        Self::from_state(GameState::new(config, seed), store)
    }

    /// Wrap an existing game state. The stored high score replaces the
    /// state's prior best if it is higher.
    pub fn from_state(state: GameState, store: HighScoreStore) -> Self {
        let prior = store.load().max(state.high_score());
        Self {
            state: state.with_high_score(prior),
            store,
            events: VecDeque::with_capacity(EVENT_CAPACITY),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &HighScoreStore {
        &self.store
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    /// Dispatch a player action with cooldown gating.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let applied = controller::apply_action(&mut self.state, action);
        self.collect_events();
        applied
    }

    /// Advance the simulation. Returns true if a piece locked.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        let locked = self.state.tick(dt_ms);
        self.collect_events();
        locked
    }

    /// Forward externally computed points to the core.
    pub fn award_points(&mut self, points: u32) {
        self.state.award_points(points);
    }

    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn collect_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::GameOver { high_score, .. } = event {
                // Failure only costs the persisted record; the game goes on.
                if let Err(err) = self.store.save(high_score) {
                    eprintln!("[highscore] {err:#}");
                }
            }
            if self.events.len() == EVENT_CAPACITY {
                self.events.pop_front();
            }
            self.events.push_back(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bag, Board};
    use crate::types::{Color, GamePhase, PieceKind};
    use std::fs;

    fn store(name: &str) -> HighScoreStore {
        let path = std::env::temp_dir().join(format!(
            "blockfall-session-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    fn doomed_state() -> GameState {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 1, Some(Color::GREEN));
        }
        GameState::with_bag(GameConfig::default(), Bag::with_upcoming(5, &[PieceKind::O]))
            .with_board(board)
    }

    #[test]
    fn loads_prior_high_score() {
        let store = store("prior");
        store.save(55).unwrap();
        let session = Session::new(GameConfig::default(), 1, store.clone());
        assert_eq!(session.state().high_score(), 55);
        assert_eq!(session.state().phase(), GamePhase::Menu);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn game_over_persists_best_score() {
        let store = store("game-over");
        store.save(10).unwrap();
        let mut session = Session::from_state(doomed_state(), store.clone());
        session.apply_action(GameAction::Start);
        session.award_points(25);
        session.apply_action(GameAction::HardDrop);
        assert!(session.tick(16));

        assert_eq!(session.state().phase(), GamePhase::GameOver);
        assert_eq!(store.load(), 25);
        let overs = session
            .drain_events()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn lower_score_keeps_prior_record() {
        let store = store("lower");
        store.save(900).unwrap();
        let mut session = Session::from_state(doomed_state(), store.clone());
        session.apply_action(GameAction::Start);
        session.award_points(40);
        session.apply_action(GameAction::HardDrop);
        session.tick(16);

        assert_eq!(store.load(), 900);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn unwritable_store_does_not_stop_the_game() {
        // A directory cannot be overwritten as a file.
        let dir = std::env::temp_dir().join(format!("blockfall-session-dir-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut session = Session::from_state(doomed_state(), HighScoreStore::new(&dir));
        session.apply_action(GameAction::Start);
        session.apply_action(GameAction::HardDrop);
        session.tick(16);
        assert_eq!(session.state().phase(), GamePhase::GameOver);

        assert!(session.apply_action(GameAction::Start));
        assert_eq!(session.state().phase(), GamePhase::Playing);
        fs::remove_dir_all(dir).unwrap();
    }
}
