//! Move catalog and its win relation
//!
//! A catalog is plain data: each move lists the moves it beats. The relation is
//! checked once when the catalog is built, so comparisons never re-validate it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A move token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Spock,
    Lizard,
}

impl Move {
    /// Number of distinct move tokens.
    pub const COUNT: usize = 5;

    /// Every move, in canonical order.
    pub const ALL: [Move; Move::COUNT] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Spock,
        Move::Lizard,
    ];

    /// Lowercase display name, also the primary input token
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Spock => "spock",
            Move::Lizard => "lizard",
        }
    }

    /// Short input token accepted alongside the full name
    pub fn abbreviation(self) -> &'static str {
        match self {
            Move::Rock => "r",
            Move::Paper => "p",
            Move::Scissors => "sc",
            Move::Spock => "sp",
            Move::Lizard => "l",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of comparing move A against move B
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    AWins,
    BWins,
    Tie,
}

/// Which catalog a match is played with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Rock, paper, scissors
    ThreeMove,
    /// Rock, paper, scissors, spock, lizard
    #[default]
    FiveMove,
}

impl FromStr for Variant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three-move" | "three" | "3" | "classic" => Ok(Variant::ThreeMove),
            "five-move" | "five" | "5" | "rpsls" => Ok(Variant::FiveMove),
            other => Err(ConfigurationError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::ThreeMove => f.write_str("three-move"),
            Variant::FiveMove => f.write_str("five-move"),
        }
    }
}

/// Each move beats exactly two others.
pub const FIVE_MOVE_TABLE: &[(Move, &[Move])] = &[
    (Move::Rock, &[Move::Scissors, Move::Lizard]),
    (Move::Paper, &[Move::Rock, Move::Spock]),
    (Move::Scissors, &[Move::Paper, Move::Lizard]),
    (Move::Spock, &[Move::Rock, Move::Scissors]),
    (Move::Lizard, &[Move::Paper, Move::Spock]),
];

/// Each move beats exactly one other.
pub const THREE_MOVE_TABLE: &[(Move, &[Move])] = &[
    (Move::Rock, &[Move::Scissors]),
    (Move::Paper, &[Move::Rock]),
    (Move::Scissors, &[Move::Paper]),
];

/// Validated set of moves plus the beats relation between them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    moves: Vec<Move>,
    /// Bitmask of beaten moves, indexed by `Move::index`
    beats: [u8; Move::COUNT],
}

impl Catalog {
    /// Build a catalog from `(move, beats-set)` entries.
    ///
    /// Entry order fixes the catalog order, which strategy weight vectors
    /// must follow. Fails unless every pair of distinct moves has exactly one
    /// winner.
    pub fn new(table: &[(Move, &[Move])]) -> Result<Self, ConfigurationError> {
        if table.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let mut moves = Vec::with_capacity(table.len());
        let mut members = 0u8;
        for &(mv, _) in table {
            if members & mv.bit() != 0 {
                return Err(ConfigurationError::DuplicateMove(mv));
            }
            members |= mv.bit();
            moves.push(mv);
        }

        let mut beats = [0u8; Move::COUNT];
        for &(mv, targets) in table {
            for &target in targets {
                if target == mv {
                    return Err(ConfigurationError::BeatsItself(mv));
                }
                if members & target.bit() == 0 {
                    return Err(ConfigurationError::UnknownTarget { mv, target });
                }
                beats[mv.index()] |= target.bit();
            }
        }

        for (i, &a) in moves.iter().enumerate() {
            for &b in &moves[i + 1..] {
                let a_beats_b = beats[a.index()] & b.bit() != 0;
                let b_beats_a = beats[b.index()] & a.bit() != 0;
                match (a_beats_b, b_beats_a) {
                    (true, true) => return Err(ConfigurationError::NotAntisymmetric { a, b }),
                    (false, false) => return Err(ConfigurationError::NotTotal { a, b }),
                    _ => {}
                }
            }
        }

        Ok(Self { moves, beats })
    }

    /// The catalog for a game variant
    pub fn for_variant(variant: Variant) -> Result<Self, ConfigurationError> {
        match variant {
            Variant::ThreeMove => Self::new(THREE_MOVE_TABLE),
            Variant::FiveMove => Self::new(FIVE_MOVE_TABLE),
        }
    }

    /// Moves in catalog order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// Position of `mv` in catalog order
    pub fn index_of(&self, mv: Move) -> Option<usize> {
        self.moves.iter().position(|m| *m == mv)
    }

    /// True iff `a` defeats `b`
    pub fn beats(&self, a: Move, b: Move) -> bool {
        self.beats[a.index()] & b.bit() != 0
    }

    /// The moves `mv` defeats, in catalog order
    pub fn beaten_by(&self, mv: Move) -> Vec<Move> {
        self.moves
            .iter()
            .copied()
            .filter(|other| self.beats(mv, *other))
            .collect()
    }

    /// Compare two catalog moves.
    ///
    /// Both moves must belong to the catalog; construction guarantees that one
    /// of any two distinct members beats the other.
    pub fn compare(&self, a: Move, b: Move) -> Outcome {
        debug_assert!(self.contains(a) && self.contains(b));
        if a == b {
            Outcome::Tie
        } else if self.beats(a, b) {
            Outcome::AWins
        } else {
            Outcome::BWins
        }
    }

    /// Map a full name or abbreviation (any case) to a catalog move
    pub fn parse(&self, token: &str) -> Option<Move> {
        let token = token.trim().to_ascii_lowercase();
        self.moves
            .iter()
            .copied()
            .find(|mv| mv.name() == token || mv.abbreviation() == token)
    }

    /// Every token `parse` accepts: full names first, then abbreviations
    pub fn tokens(&self) -> Vec<&'static str> {
        self.moves
            .iter()
            .map(|mv| mv.name())
            .chain(self.moves.iter().map(|mv| mv.abbreviation()))
            .collect()
    }

    /// "rock, paper, scissors, spock or lizard"
    pub fn describe_moves(&self) -> String {
        match self.moves.split_last() {
            None => String::new(),
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => {
                let head: Vec<&str> = rest.iter().map(|mv| mv.name()).collect();
                format!("{} or {}", head.join(", "), last)
            }
        }
    }
}
