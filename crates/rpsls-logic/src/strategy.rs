//! Persona definitions and weighted move selection

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::trace;

use crate::catalog::{Catalog, Move};
use crate::error::ConfigurationError;

/// Weighted move distribution for one persona
///
/// Weights follow the catalog order. Drawing is sampling with replacement
/// proportional to weight, the same as drawing uniformly from a pool where
/// each move appears `weight` times.
#[derive(Clone, Debug)]
pub struct Strategy {
    moves: Vec<Move>,
    weights: Vec<u32>,
    index: WeightedIndex<u32>,
}

impl Strategy {
    /// Build a strategy from a weight vector aligned with `catalog.moves()`
    pub fn new(catalog: &Catalog, weights: Vec<u32>) -> Result<Self, ConfigurationError> {
        if weights.len() != catalog.len() {
            return Err(ConfigurationError::WeightCountMismatch {
                expected: catalog.len(),
                got: weights.len(),
            });
        }
        if weights.iter().all(|w| *w == 0) {
            return Err(ConfigurationError::AllWeightsZero);
        }

        let index = WeightedIndex::new(weights.iter().copied())
            .map_err(|_| ConfigurationError::AllWeightsZero)?;

        Ok(Self {
            moves: catalog.moves().to_vec(),
            weights,
            index,
        })
    }

    /// Draw a move
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Move {
        let mv = self.moves[self.index.sample(rng)];
        trace!(%mv, "persona draw");
        mv
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Number of catalog moves this strategy was built for
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The move always returned, if only one weight is non-zero
    pub fn deterministic_move(&self) -> Option<Move> {
        let mut live = self
            .moves
            .iter()
            .zip(&self.weights)
            .filter(|(_, w)| **w > 0)
            .map(|(mv, _)| *mv);
        match (live.next(), live.next()) {
            (Some(mv), None) => Some(mv),
            _ => None,
        }
    }
}

/// A named scripted opponent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    /// Flavor text shown when the persona is introduced
    pub description: &'static str,
    /// Moves absent from this table weigh zero
    pub weights: &'static [(Move, u32)],
}

impl Persona {
    /// Weight vector restricted to, and aligned with, `catalog`
    pub fn weights_for(&self, catalog: &Catalog) -> Vec<u32> {
        catalog
            .moves()
            .iter()
            .map(|mv| {
                self.weights
                    .iter()
                    .filter(|(m, _)| m == mv)
                    .map(|(_, w)| *w)
                    .sum()
            })
            .collect()
    }

    /// Build this persona's strategy for `catalog`
    ///
    /// Fails if none of the persona's moves exist in the catalog.
    pub fn strategy(&self, catalog: &Catalog) -> Result<Strategy, ConfigurationError> {
        Strategy::new(catalog, self.weights_for(catalog))
    }

    /// Whether the persona can play with `catalog`
    pub fn plays(&self, catalog: &Catalog) -> bool {
        self.weights_for(catalog).iter().any(|w| *w > 0)
    }
}

/// Registry of every built-in persona
pub const PERSONAS: &[Persona] = &[
    Persona {
        name: "R2D2",
        description: "Trusts rock. Only rock.",
        weights: &[(Move::Rock, 1)],
    },
    Persona {
        name: "Hal",
        description: "Has a soft spot for scissors.",
        weights: &[
            (Move::Paper, 1),
            (Move::Scissors, 4),
            (Move::Spock, 1),
            (Move::Lizard, 1),
        ],
    },
    Persona {
        name: "Chappie",
        description: "Picks anything, with no favorites.",
        weights: &[
            (Move::Rock, 1),
            (Move::Paper, 1),
            (Move::Scissors, 1),
            (Move::Spock, 1),
            (Move::Lizard, 1),
        ],
    },
    Persona {
        name: "Sonny",
        description: "Old school. Sticks to rock, paper and scissors.",
        weights: &[(Move::Rock, 1), (Move::Paper, 1), (Move::Scissors, 1)],
    },
    Persona {
        name: "Number 5",
        description: "Alive, and only ever plays spock or lizard.",
        weights: &[(Move::Spock, 1), (Move::Lizard, 1)],
    },
];

/// Lookup over the persona registry
pub struct Roster;

impl Roster {
    pub fn all() -> &'static [Persona] {
        PERSONAS
    }

    /// Case-insensitive lookup by name
    pub fn get(name: &str) -> Result<&'static Persona, ConfigurationError> {
        let name = name.trim();
        PERSONAS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigurationError::UnknownPersona(name.to_string()))
    }

    /// Personas that can play with `catalog`
    pub fn available(catalog: &Catalog) -> Vec<&'static Persona> {
        PERSONAS.iter().filter(|p| p.plays(catalog)).collect()
    }

    /// Pick a random persona that can play with `catalog`
    pub fn pick<R: Rng + ?Sized>(
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<&'static Persona, ConfigurationError> {
        Self::available(catalog)
            .choose(rng)
            .copied()
            .ok_or(ConfigurationError::AllWeightsZero)
    }
}
