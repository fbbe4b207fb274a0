//! Action dispatch with caller-side cooldown gating.

use crate::core::GameState;
use crate::types::GameAction;

/// Whether `action` may run now. Moves and soft drops share the move
/// cooldown, rotation has its own; everything else is never rate limited.
pub fn action_ready(state: &GameState, action: GameAction) -> bool {
    let now = state.clock_ms();
    let active = state.active();
    match action {
        GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop => {
            active.move_ready(now)
        }
        GameAction::Rotate => active.rotate_ready(now),
        GameAction::HardDrop
        | GameAction::Hold
        | GameAction::Pause
        | GameAction::Start
        | GameAction::ExitToMenu => true,
    }
}

/// Apply a player action to the session. Returns true if it changed anything.
pub fn apply_action(state: &mut GameState, action: GameAction) -> bool {
    if !action_ready(state, action) {
        return false;
    }
    match action {
        GameAction::MoveLeft => state.apply_move(-1, 0),
        GameAction::MoveRight => state.apply_move(1, 0),
        GameAction::SoftDrop => state.apply_move(0, 1),
        GameAction::Rotate => state.apply_rotate(),
        GameAction::HardDrop => state.apply_hard_drop(),
        GameAction::Hold => state.apply_hold(),
        GameAction::Pause => state.toggle_pause(),
        GameAction::Start => state.start(),
        GameAction::ExitToMenu => state.exit_to_menu(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bag;
    use crate::types::{GameConfig, GamePhase, PieceKind};

    fn playing() -> GameState {
        let mut state = GameState::with_bag(GameConfig::default(), Bag::with_upcoming(3, &[PieceKind::T]));
        assert!(apply_action(&mut state, GameAction::Start));
        state
    }

    #[test]
    fn repeated_moves_wait_for_cooldown() {
        let mut state = playing();
        assert!(apply_action(&mut state, GameAction::MoveRight));
        assert!(!apply_action(&mut state, GameAction::MoveRight));
        assert_eq!(state.active().x(), 5);

        state.tick(100);
        assert!(!apply_action(&mut state, GameAction::MoveRight));
        state.tick(1);
        assert!(apply_action(&mut state, GameAction::MoveRight));
        assert_eq!(state.active().x(), 6);
    }

    #[test]
    fn rotation_has_its_own_cooldown() {
        let mut state = playing();
        assert!(apply_action(&mut state, GameAction::Rotate));
        assert!(apply_action(&mut state, GameAction::MoveLeft));
        assert!(!apply_action(&mut state, GameAction::Rotate));
        state.tick(201);
        assert!(apply_action(&mut state, GameAction::Rotate));
    }

    #[test]
    fn hard_drop_and_hold_are_not_rate_limited() {
        let mut state = playing();
        assert!(apply_action(&mut state, GameAction::Hold));
        assert!(apply_action(&mut state, GameAction::HardDrop));
        assert!(apply_action(&mut state, GameAction::HardDrop));
    }

    #[test]
    fn phase_actions_dispatch() {
        let mut state = playing();
        assert!(apply_action(&mut state, GameAction::Pause));
        assert_eq!(state.phase(), GamePhase::Paused);
        assert!(!apply_action(&mut state, GameAction::MoveLeft));
        assert!(apply_action(&mut state, GameAction::ExitToMenu));
        assert_eq!(state.phase(), GamePhase::Menu);
        assert!(apply_action(&mut state, GameAction::Start));
        assert_eq!(state.phase(), GamePhase::Playing);
    }
}
