//! Hold slot - a one-piece swap buffer gated once per piece lifetime.

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlot {
    held: Option<PieceKind>,
    available: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            held: None,
            available: true,
        }
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Put `kind` into the slot and close the gate. Returns the variant that
    /// was stored before, if any. `None` while the gate is closed.
    pub fn swap(&mut self, kind: PieceKind) -> Option<Option<PieceKind>> {
        if !self.available {
            return None;
        }
        self.available = false;
        Some(self.held.replace(kind))
    }

    /// Reopen the gate; called when a piece locks.
    pub fn rearm(&mut self) {
        self.available = true;
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_allows_one_swap_per_piece() {
        let mut slot = HoldSlot::new();
        assert_eq!(slot.swap(PieceKind::T), Some(None));
        assert_eq!(slot.swap(PieceKind::S), None);
        assert_eq!(slot.held(), Some(PieceKind::T));

        slot.rearm();
        assert_eq!(slot.swap(PieceKind::S), Some(Some(PieceKind::T)));
        assert_eq!(slot.held(), Some(PieceKind::S));
        assert!(!slot.is_available());
    }
}
