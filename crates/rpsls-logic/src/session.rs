//! Repeated matches between one human and a chosen persona

use rand::Rng;
use tracing::info;

use crate::catalog::Catalog;
use crate::console::{Console, Event};
use crate::error::GameError;
use crate::game::{Match, MatchConfig, MatchSummary};
use crate::participant::Participant;
use crate::strategy::{Persona, Roster};

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 20;

/// Menu token that picks an opponent at random
pub const RANDOM_PERSONA: &str = "random";

/// A human's sitting: the current match plus every finished one
pub struct Session {
    config: MatchConfig,
    game: Match,
    opponent: &'static Persona,
    archive: Vec<MatchSummary>,
}

impl Session {
    pub fn new(
        config: MatchConfig,
        human_name: impl Into<String>,
        opponent: &'static Persona,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let catalog = config.catalog()?;
        let rival = Participant::persona(opponent, &catalog)?;
        let game = Match::new(catalog, config.wins_limit, Participant::human(human_name), rival)?;

        Ok(Self {
            config,
            game,
            opponent,
            archive: Vec::new(),
        })
    }

    /// Full interactive flow: greet, pick an opponent, play until the human
    /// stops, then list every match's moves.
    pub fn run<C, R>(config: MatchConfig, console: &mut C, rng: &mut R) -> Result<Self, GameError>
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let catalog = config.catalog()?;
        console.display(&Event::Welcome {
            catalog: &catalog,
            wins_limit: config.wins_limit,
        });

        let name = console.ask_open("What's your name?", Some(MAX_NAME_LEN))?;
        let persona = Self::choose_persona(console, &catalog, rng)?;
        let mut session = Self::new(config, name.trim(), persona)?;
        console.display(&Event::Opponent { persona });

        loop {
            session.play_match(console, rng)?;
            if !console.ask_yes_no("Would you like to play again?")? {
                break;
            }

            if console.ask_yes_no("Would you like a new opponent?")? {
                let persona = Self::choose_persona(console, session.game.catalog(), rng)?;
                session.change_opponent(persona)?;
                console.display(&Event::Opponent { persona });
            } else {
                session.rematch();
            }
        }

        console.display(&Event::History {
            matches: &session.archive,
        });
        console.display(&Event::Goodbye);
        info!(matches = session.archive.len(), "session ended");

        Ok(session)
    }

    /// Menu over the personas that can play `catalog`, plus a random pick
    pub fn choose_persona<C, R>(
        console: &mut C,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<&'static Persona, GameError>
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        let available = Roster::available(catalog);
        let names: Vec<&str> = available.iter().map(|p| p.name).collect();
        let mut tokens: Vec<String> = available.iter().map(|p| p.name.to_ascii_lowercase()).collect();
        tokens.push(RANDOM_PERSONA.to_string());
        let allowed: Vec<&str> = tokens.iter().map(String::as_str).collect();

        let prompt = format!("Choose your opponent: {} (or {})", names.join(", "), RANDOM_PERSONA);
        let token = console.ask_closed(&prompt, &allowed)?;

        if token.trim().eq_ignore_ascii_case(RANDOM_PERSONA) {
            Ok(Roster::pick(catalog, rng)?)
        } else {
            Ok(Roster::get(&token)?)
        }
    }

    /// Play the current match to completion and archive it
    pub fn play_match<C, R>(&mut self, console: &mut C, rng: &mut R) -> Result<MatchSummary, GameError>
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        if self.game.is_finished() {
            return Err(GameError::MatchFinished);
        }
        while !self.game.is_finished() {
            self.game.play_round(console, rng)?;
        }

        let summary = self.game.summary();
        self.archive.push(summary.clone());
        Ok(summary)
    }

    /// New round-set against the same opponent
    pub fn rematch(&mut self) {
        self.game.reset();
        info!(opponent = self.opponent.name, "rematch");
    }

    /// New round-set against `persona`; the human is kept
    pub fn change_opponent(&mut self, persona: &'static Persona) -> Result<(), GameError> {
        let rival = Participant::persona(persona, self.game.catalog())?;
        self.game.replace_opponent(rival)?;
        self.opponent = persona;
        Ok(())
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn opponent(&self) -> &'static Persona {
        self.opponent
    }

    /// Every finished match, oldest first
    pub fn archive(&self) -> &[MatchSummary] {
        &self.archive
    }
}
