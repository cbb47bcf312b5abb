//! Append-only move history for the current match

use serde::{Deserialize, Serialize};

use crate::catalog::Move;
use crate::Side;

/// Moves played by both sides in one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub move_a: Move,
    pub move_b: Move,
}

impl RoundRecord {
    pub fn move_of(&self, side: Side) -> Move {
        match side {
            Side::A => self.move_a,
            Side::B => self.move_b,
        }
    }
}

/// Ordered round records for one match
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    records: Vec<RoundRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one round
    pub fn record(&mut self, move_a: Move, move_b: Move) {
        self.records.push(RoundRecord { move_a, move_b });
    }

    /// All records in play order
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// One side's moves in play order; each call starts from the first round
    pub fn moves_for(&self, side: Side) -> impl Iterator<Item = Move> + '_ {
        self.records.iter().map(move |r| r.move_of(side))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record; only used when the match is reset
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_play_order() {
        let mut history = History::new();
        history.record(Move::Rock, Move::Paper);
        history.record(Move::Spock, Move::Lizard);
        history.record(Move::Scissors, Move::Scissors);

        let a: Vec<_> = history.moves_for(Side::A).collect();
        let b: Vec<_> = history.moves_for(Side::B).collect();
        assert_eq!(a, vec![Move::Rock, Move::Spock, Move::Scissors]);
        assert_eq!(b, vec![Move::Paper, Move::Lizard, Move::Scissors]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_reads_are_repeatable() {
        let mut history = History::new();
        history.record(Move::Lizard, Move::Rock);
        history.record(Move::Paper, Move::Rock);

        let first: Vec<_> = history.moves_for(Side::A).collect();
        let second: Vec<_> = history.moves_for(Side::A).collect();
        assert_eq!(first, second);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut history = History::new();
        history.record(Move::Rock, Move::Rock);
        history.reset();

        assert!(history.is_empty());
        assert_eq!(history.moves_for(Side::B).count(), 0);
    }
}
