//! Next-piece preview queue.

use arrayvec::ArrayVec;

use crate::rng::Bag;
use crate::types::{PieceKind, NEXT_QUEUE_LEN};

/// Fixed-length FIFO of upcoming variants, topped up from the bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextQueue {
    pieces: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
}

impl NextQueue {
    /// Fill a fresh queue with `NEXT_QUEUE_LEN` draws.
    pub fn filled_from(bag: &mut Bag) -> Self {
        let mut pieces = ArrayVec::new();
        while !pieces.is_full() {
            pieces.push(bag.draw());
        }
        Self { pieces }
    }

    /// Take the head and append a fresh draw at the tail.
    pub fn advance(&mut self, bag: &mut Bag) -> PieceKind {
        let head = if self.pieces.is_empty() {
            bag.draw()
        } else {
            self.pieces.remove(0)
        };
        self.pieces.push(bag.draw());
        head
    }

    pub fn peek(&self) -> Option<PieceKind> {
        self.pieces.first().copied()
    }

    pub fn as_slice(&self) -> &[PieceKind] {
        &self.pieces
    }

    /// Preview copy for snapshots.
    pub fn to_array(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        let mut out = [PieceKind::I; NEXT_QUEUE_LEN];
        for (slot, kind) in out.iter_mut().zip(self.pieces.iter()) {
            *slot = *kind;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_fifo_and_keeps_length() {
        let mut bag = Bag::with_upcoming(
            5,
            &[
                PieceKind::I,
                PieceKind::O,
                PieceKind::T,
                PieceKind::J,
                PieceKind::L,
                PieceKind::S,
                PieceKind::Z,
            ],
        );
        let mut queue = NextQueue::filled_from(&mut bag);
        assert_eq!(
            queue.as_slice(),
            &[PieceKind::I, PieceKind::O, PieceKind::T, PieceKind::J, PieceKind::L]
        );

        assert_eq!(queue.advance(&mut bag), PieceKind::I);
        assert_eq!(queue.len(), NEXT_QUEUE_LEN);
        assert_eq!(queue.as_slice()[4], PieceKind::S);
        assert_eq!(queue.peek(), Some(PieceKind::O));
    }
}
