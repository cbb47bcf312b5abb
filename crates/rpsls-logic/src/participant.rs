//! Match participants

use rand::Rng;

use crate::catalog::{Catalog, Move};
use crate::error::ConfigurationError;
use crate::strategy::{Persona, Strategy};

/// Where a participant's moves come from
#[derive(Clone, Debug)]
pub enum MoveSource {
    /// Supplied by the input adapter, already validated
    External,
    /// Sampled from a weighted distribution
    Persona(Strategy),
}

/// One side of a match
#[derive(Clone, Debug)]
pub struct Participant {
    name: String,
    score: u32,
    source: MoveSource,
    current_move: Option<Move>,
}

impl Participant {
    /// A participant whose moves arrive through the input adapter
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            source: MoveSource::External,
            current_move: None,
        }
    }

    /// A scripted participant playing `strategy`
    pub fn scripted(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            score: 0,
            source: MoveSource::Persona(strategy),
            current_move: None,
        }
    }

    /// A registry persona prepared for `catalog`
    pub fn persona(persona: &Persona, catalog: &Catalog) -> Result<Self, ConfigurationError> {
        Ok(Self::scripted(persona.name, persona.strategy(catalog)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn source(&self) -> &MoveSource {
        &self.source
    }

    pub fn is_human(&self) -> bool {
        matches!(self.source, MoveSource::External)
    }

    /// The move played in the latest round, if any
    pub fn current_move(&self) -> Option<Move> {
        self.current_move
    }

    /// Accept a move already validated by the input adapter
    pub fn set_move(&mut self, mv: Move) {
        self.current_move = Some(mv);
    }

    /// Let the strategy pick this round's move.
    ///
    /// Returns `None` for externally driven participants.
    pub fn choose<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Move> {
        match &self.source {
            MoveSource::External => None,
            MoveSource::Persona(strategy) => {
                let mv = strategy.choose(rng);
                self.current_move = Some(mv);
                Some(mv)
            }
        }
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    /// Clear score and last move for a new round-set
    pub fn reset(&mut self) {
        self.score = 0;
        self.current_move = None;
    }

    /// "1 point", "2 points"
    pub fn points(&self) -> String {
        points(self.score)
    }
}

/// Pluralized point count
pub fn points(score: u32) -> String {
    if score == 1 {
        "1 point".to_string()
    } else {
        format!("{} points", score)
    }
}
