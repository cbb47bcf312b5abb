//! Error types for catalog construction and match execution

use thiserror::Error;

use crate::catalog::Move;

/// Raised while building a catalog, strategy, or match configuration.
///
/// Always fatal: a match never starts with an inconsistent catalog or persona.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("catalog has no moves")]
    EmptyCatalog,

    #[error("{0} is listed more than once in the catalog")]
    DuplicateMove(Move),

    #[error("{0} cannot beat itself")]
    BeatsItself(Move),

    #[error("{mv} beats {target}, which is not in the catalog")]
    UnknownTarget { mv: Move, target: Move },

    #[error("{a} and {b} beat each other")]
    NotAntisymmetric { a: Move, b: Move },

    #[error("neither {a} nor {b} beats the other")]
    NotTotal { a: Move, b: Move },

    #[error("expected {expected} weights, got {got}")]
    WeightCountMismatch { expected: usize, got: usize },

    #[error("at least one weight must be non-zero")]
    AllWeightsZero,

    #[error("win limit must be at least 1")]
    ZeroWinsLimit,

    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

/// Errors surfaced while a match or session is running
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("match is already finished")]
    MatchFinished,

    #[error("{0} is not part of this catalog")]
    MoveNotInCatalog(Move),

    #[error("input adapter returned an unmapped move token: {0:?}")]
    UnknownMove(String),

    #[error("no champion after {0} rounds")]
    RoundCapReached(u32),

    #[error("console input failed")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize match record")]
    Serialization(#[from] serde_json::Error),
}
