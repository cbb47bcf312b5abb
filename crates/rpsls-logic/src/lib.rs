//! Match Logic for Rock, Paper, Scissors, Spock, Lizard
//!
//! Core game logic for first-to-N duels between a human and a scripted persona.
//! This crate is compiled to:
//! - Native (for the terminal program)
//! - WASM (for browser match replay)

mod catalog;
mod console;
mod error;
mod game;
mod history;
mod participant;
mod random;
mod session;
mod strategy;

#[cfg(feature = "wasm")]
mod wasm;

use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, Move, Outcome, Variant, FIVE_MOVE_TABLE, THREE_MOVE_TABLE};
pub use console::{Console, Event};
pub use error::{ConfigurationError, GameError};
pub use game::{
    simulate_match, Match, MatchConfig, MatchStatus, MatchSummary, RoundResult,
    MAX_SIMULATED_ROUNDS,
};
pub use history::{History, RoundRecord};
pub use participant::{points, MoveSource, Participant};
pub use random::SeededRng;
pub use session::{Session, MAX_NAME_LEN, RANDOM_PERSONA};
pub use strategy::{Persona, Roster, Strategy, PERSONAS};

/// One of the two participants in a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Verdict for one round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    /// `None` on a tie
    pub winner: Option<Side>,
}

impl Verdict {
    /// Points gained this round as (score_a, score_b)
    pub fn score_delta(&self) -> (u32, u32) {
        match self.winner {
            Some(Side::A) => (1, 0),
            Some(Side::B) => (0, 1),
            None => (0, 0),
        }
    }
}

/// Resolve a round. Pure: the caller applies the score delta.
pub fn resolve(catalog: &Catalog, move_a: Move, move_b: Move) -> Verdict {
    let outcome = catalog.compare(move_a, move_b);
    let winner = match outcome {
        Outcome::AWins => Some(Side::A),
        Outcome::BWins => Some(Side::B),
        Outcome::Tie => None,
    };
    Verdict { outcome, winner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn five() -> Catalog {
        Catalog::for_variant(Variant::FiveMove).unwrap()
    }

    #[test]
    fn test_resolve_matrix() {
        let catalog = five();
        assert_eq!(resolve(&catalog, Move::Spock, Move::Rock).winner, Some(Side::A));
        assert_eq!(resolve(&catalog, Move::Lizard, Move::Paper).winner, Some(Side::A));
        assert_eq!(resolve(&catalog, Move::Rock, Move::Paper).winner, Some(Side::B));
        assert_eq!(resolve(&catalog, Move::Scissors, Move::Scissors).winner, None);
    }

    #[test]
    fn test_score_delta() {
        let catalog = five();
        assert_eq!(resolve(&catalog, Move::Rock, Move::Scissors).score_delta(), (1, 0));
        assert_eq!(resolve(&catalog, Move::Rock, Move::Spock).score_delta(), (0, 1));
        assert_eq!(resolve(&catalog, Move::Lizard, Move::Lizard).score_delta(), (0, 0));
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
        assert_eq!(Side::B.index(), 1);
    }

    proptest! {
        #[test]
        fn prop_score_delta_law(
            a in prop::sample::select(Move::ALL.to_vec()),
            b in prop::sample::select(Move::ALL.to_vec()),
        ) {
            let verdict = resolve(&five(), a, b);
            let (da, db) = verdict.score_delta();
            prop_assert!(da + db <= 1);
            match verdict.outcome {
                Outcome::Tie => prop_assert_eq!((da, db), (0, 0)),
                Outcome::AWins => prop_assert_eq!((da, db), (1, 0)),
                Outcome::BWins => prop_assert_eq!((da, db), (0, 1)),
            }
        }
    }
}
