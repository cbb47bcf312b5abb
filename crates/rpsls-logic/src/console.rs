//! Collaborator interface for prompting and display
//!
//! The match controller and session talk to the outside world only through
//! [`Console`]. Implementations own input validation and retry loops; the core
//! only ever sees tokens from the allowed set.

use std::io;

use crate::catalog::{Catalog, Move};
use crate::game::MatchSummary;
use crate::participant::Participant;
use crate::strategy::Persona;

/// Something the display side may want to render
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    Welcome {
        catalog: &'a Catalog,
        wins_limit: u32,
    },
    Opponent {
        persona: &'a Persona,
    },
    Moves {
        a: &'a Participant,
        move_a: Move,
        b: &'a Participant,
        move_b: Move,
    },
    /// `None` on a tie
    RoundWinner {
        winner: Option<&'a Participant>,
    },
    Scores {
        a: &'a Participant,
        b: &'a Participant,
        wins_limit: u32,
    },
    Champion {
        champion: &'a Participant,
        wins_limit: u32,
    },
    History {
        matches: &'a [MatchSummary],
    },
    Goodbye,
}

/// Input and output adapter
pub trait Console {
    /// Ask until a yes/no answer is given
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool>;

    /// Ask until a non-empty answer (at most `max_len` chars, if set) is given
    fn ask_open(&mut self, prompt: &str, max_len: Option<usize>) -> io::Result<String>;

    /// Ask until the answer matches one of `allowed`; returns the matched token
    fn ask_closed(&mut self, prompt: &str, allowed: &[&str]) -> io::Result<String>;

    /// One-way notification
    fn display(&mut self, event: &Event<'_>);
}
