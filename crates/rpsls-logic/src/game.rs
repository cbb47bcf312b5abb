//! Match execution engine

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Move, Variant};
use crate::console::{Console, Event};
use crate::error::{ConfigurationError, GameError};
use crate::history::History;
use crate::participant::{MoveSource, Participant};
use crate::random::SeededRng;
use crate::strategy::Persona;
use crate::{resolve, Side};

/// Rounds a persona-vs-persona simulation may run before giving up
pub const MAX_SIMULATED_ROUNDS: u32 = 1_000;

/// Configuration for one first-to-N contest
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub variant: Variant,
    /// Wins needed to become champion
    pub wins_limit: u32,
}

impl MatchConfig {
    /// Three moves, first to 3
    pub fn classic() -> Self {
        Self { variant: Variant::ThreeMove, wins_limit: 3 }
    }

    /// Five moves, first to 3
    pub fn standard() -> Self {
        Self { variant: Variant::FiveMove, wins_limit: 3 }
    }

    /// Five moves, first to 10
    pub fn extended() -> Self {
        Self { variant: Variant::FiveMove, wins_limit: 10 }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.wins_limit == 0 {
            return Err(ConfigurationError::ZeroWinsLimit);
        }
        Ok(())
    }

    /// Catalog for the configured variant
    pub fn catalog(&self) -> Result<Catalog, ConfigurationError> {
        Catalog::for_variant(self.variant)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Match state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Finished,
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub winner: Option<Side>,
    pub cumulative_a: u32,
    pub cumulative_b: u32,
}

/// Read-only record of a match, kept for post-match review
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub name_a: String,
    pub name_b: String,
    pub score_a: u32,
    pub score_b: u32,
    pub wins_limit: u32,
    pub champion: Option<Side>,
    pub rounds: Vec<RoundResult>,
}

impl MatchSummary {
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.name_a,
            Side::B => &self.name_b,
        }
    }

    pub fn champion_name(&self) -> Option<&str> {
        self.champion.map(|side| self.name(side))
    }

    /// One side's moves in play order
    pub fn moves_for(&self, side: Side) -> impl Iterator<Item = Move> + '_ {
        self.rounds.iter().map(move |r| match side {
            Side::A => r.move_a,
            Side::B => r.move_b,
        })
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// First-to-N match between two participants
///
/// Owns every score and history mutation; callers only get read-only views.
#[derive(Clone, Debug)]
pub struct Match {
    catalog: Catalog,
    wins_limit: u32,
    participants: [Participant; 2],
    history: History,
    results: Vec<RoundResult>,
    status: MatchStatus,
}

impl Match {
    /// Start a match in `InProgress` with both scores at 0
    pub fn new(
        catalog: Catalog,
        wins_limit: u32,
        a: Participant,
        b: Participant,
    ) -> Result<Self, ConfigurationError> {
        if wins_limit == 0 {
            return Err(ConfigurationError::ZeroWinsLimit);
        }
        check_participant(&catalog, &a)?;
        check_participant(&catalog, &b)?;

        let mut game = Self {
            catalog,
            wins_limit,
            participants: [a, b],
            history: History::new(),
            results: Vec::new(),
            status: MatchStatus::InProgress,
        };
        game.reset();
        Ok(game)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn wins_limit(&self) -> u32 {
        self.wins_limit
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn participant(&self, side: Side) -> &Participant {
        &self.participants[side.index()]
    }

    pub fn score(&self, side: Side) -> u32 {
        self.participant(side).score()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn rounds_played(&self) -> u32 {
        self.results.len() as u32
    }

    /// Play one round, asking `console` for any human move.
    ///
    /// Announces moves, the round winner, and either the scores or the
    /// champion.
    pub fn play_round<C, R>(&mut self, console: &mut C, rng: &mut R) -> Result<RoundResult, GameError>
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        if self.is_finished() {
            return Err(GameError::MatchFinished);
        }

        let move_a = self.obtain_move(Side::A, console, rng)?;
        let move_b = self.obtain_move(Side::B, console, rng)?;
        let result = self.play_moves(move_a, move_b)?;
        self.announce(console, &result);

        Ok(result)
    }

    /// Play one round with both moves already known.
    ///
    /// Records the pair, applies the verdict, then checks the win limit.
    pub fn play_moves(&mut self, move_a: Move, move_b: Move) -> Result<RoundResult, GameError> {
        if self.is_finished() {
            return Err(GameError::MatchFinished);
        }
        for mv in [move_a, move_b] {
            if !self.catalog.contains(mv) {
                return Err(GameError::MoveNotInCatalog(mv));
            }
        }

        self.participants[0].set_move(move_a);
        self.participants[1].set_move(move_b);
        self.history.record(move_a, move_b);

        let verdict = resolve(&self.catalog, move_a, move_b);
        if let Some(side) = verdict.winner {
            self.participants[side.index()].increment_score();
        }

        let score_a = self.score(Side::A);
        let score_b = self.score(Side::B);
        let result = RoundResult {
            round: self.rounds_played() + 1,
            move_a,
            move_b,
            winner: verdict.winner,
            cumulative_a: score_a,
            cumulative_b: score_b,
        };
        self.results.push(result.clone());

        debug!(
            round = result.round,
            %move_a,
            %move_b,
            winner = ?verdict.winner,
            score_a,
            score_b,
            "round resolved"
        );

        if score_a >= self.wins_limit || score_b >= self.wins_limit {
            // Scores move by one per round, so the limit is never reached twice at once
            assert_ne!(score_a, score_b, "tied scores at the win limit");
            self.status = MatchStatus::Finished;
            info!(
                champion = self.champion().map(|p| p.name()).unwrap_or_default(),
                score_a,
                score_b,
                rounds = result.round,
                "match finished"
            );
        }

        Ok(result)
    }

    /// The side with the strictly higher score, once finished
    pub fn champion_side(&self) -> Option<Side> {
        if !self.is_finished() {
            return None;
        }
        match self.score(Side::A).cmp(&self.score(Side::B)) {
            Ordering::Greater => Some(Side::A),
            Ordering::Less => Some(Side::B),
            Ordering::Equal => None,
        }
    }

    pub fn champion(&self) -> Option<&Participant> {
        self.champion_side().map(|side| self.participant(side))
    }

    /// Snapshot of the match so far
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            name_a: self.participants[0].name().to_string(),
            name_b: self.participants[1].name().to_string(),
            score_a: self.score(Side::A),
            score_b: self.score(Side::B),
            wins_limit: self.wins_limit,
            champion: self.champion_side(),
            rounds: self.results.clone(),
        }
    }

    /// Start a new round-set with the same participants
    pub fn reset(&mut self) {
        for participant in &mut self.participants {
            participant.reset();
        }
        self.history.reset();
        self.results.clear();
        self.status = MatchStatus::InProgress;
    }

    /// Swap in a new side-B participant and reset
    pub fn replace_opponent(&mut self, opponent: Participant) -> Result<(), ConfigurationError> {
        check_participant(&self.catalog, &opponent)?;
        info!(opponent = opponent.name(), "opponent replaced");
        self.participants[1] = opponent;
        self.reset();
        Ok(())
    }

    fn obtain_move<C, R>(&mut self, side: Side, console: &mut C, rng: &mut R) -> Result<Move, GameError>
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        if let Some(mv) = self.participants[side.index()].choose(rng) {
            return Ok(mv);
        }

        let prompt = format!("Please choose {}:", self.catalog.describe_moves());
        let tokens = self.catalog.tokens();
        let token = console.ask_closed(&prompt, &tokens)?;
        match self.catalog.parse(&token) {
            Some(mv) => Ok(mv),
            None => {
                warn!(token = %token, "input adapter returned a token outside the catalog");
                Err(GameError::UnknownMove(token))
            }
        }
    }

    fn announce<C: Console + ?Sized>(&self, console: &mut C, result: &RoundResult) {
        let a = self.participant(Side::A);
        let b = self.participant(Side::B);

        console.display(&Event::Moves {
            a,
            move_a: result.move_a,
            b,
            move_b: result.move_b,
        });
        console.display(&Event::RoundWinner {
            winner: result.winner.map(|side| self.participant(side)),
        });

        match self.champion() {
            Some(champion) => console.display(&Event::Champion {
                champion,
                wins_limit: self.wins_limit,
            }),
            None => console.display(&Event::Scores {
                a,
                b,
                wins_limit: self.wins_limit,
            }),
        }
    }
}

fn check_participant(catalog: &Catalog, participant: &Participant) -> Result<(), ConfigurationError> {
    match participant.source() {
        MoveSource::Persona(strategy) if strategy.len() != catalog.len() => {
            Err(ConfigurationError::WeightCountMismatch {
                expected: catalog.len(),
                got: strategy.len(),
            })
        }
        _ => Ok(()),
    }
}

/// Run a persona-vs-persona match to completion
///
/// # Arguments
/// * `catalog` - Moves both personas play with
/// * `persona_a` - Side A
/// * `persona_b` - Side B
/// * `seed` - Randomness seed
/// * `match_index` - Selects an independent stream for this match
/// * `wins_limit` - Wins needed to become champion
///
/// # Returns
/// Complete match summary with round-by-round details
pub fn simulate_match(
    catalog: &Catalog,
    persona_a: &Persona,
    persona_b: &Persona,
    seed: &[u8; 32],
    match_index: u32,
    wins_limit: u32,
) -> Result<MatchSummary, GameError> {
    let strategy_a = persona_a.strategy(catalog)?;
    let strategy_b = persona_b.strategy(catalog)?;
    let mut game = Match::new(
        catalog.clone(),
        wins_limit,
        Participant::scripted(persona_a.name, strategy_a.clone()),
        Participant::scripted(persona_b.name, strategy_b.clone()),
    )?;

    let rng = SeededRng::new(seed, match_index);
    let mut round = 0u32;
    while !game.is_finished() {
        if round >= MAX_SIMULATED_ROUNDS {
            return Err(GameError::RoundCapReached(round));
        }

        // Per-round RNG for each side so draws don't affect each other
        let mut rng_a = rng.for_round(round * 2);
        let mut rng_b = rng.for_round(round * 2 + 1);

        let move_a = strategy_a.choose(&mut rng_a);
        let move_b = strategy_b.choose(&mut rng_b);
        game.play_moves(move_a, move_b)?;

        round += 1;
    }

    Ok(game.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Roster, Strategy};
    use std::collections::VecDeque;
    use std::io;

    /// Feeds canned tokens and counts display events
    #[derive(Default)]
    struct Scripted {
        tokens: VecDeque<String>,
        champions: usize,
        scores: usize,
    }

    impl Scripted {
        fn with(tokens: &[&str]) -> Self {
            Self {
                tokens: tokens.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Console for Scripted {
        fn ask_yes_no(&mut self, _prompt: &str) -> io::Result<bool> {
            Ok(false)
        }

        fn ask_open(&mut self, _prompt: &str, _max_len: Option<usize>) -> io::Result<String> {
            Ok("Ada".to_string())
        }

        fn ask_closed(&mut self, _prompt: &str, _allowed: &[&str]) -> io::Result<String> {
            self.tokens
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }

        fn display(&mut self, event: &Event<'_>) {
            match event {
                Event::Champion { .. } => self.champions += 1,
                Event::Scores { .. } => self.scores += 1,
                _ => {}
            }
        }
    }

    fn human_vs(persona: &str, config: &MatchConfig) -> Match {
        let catalog = config.catalog().unwrap();
        let opponent = Participant::persona(Roster::get(persona).unwrap(), &catalog).unwrap();
        Match::new(catalog, config.wins_limit, Participant::human("Ada"), opponent).unwrap()
    }

    fn rng() -> SeededRng {
        SeededRng::new(&[42u8; 32], 0)
    }

    #[test]
    fn test_initial_state() {
        let game = human_vs("Chappie", &MatchConfig::standard());
        assert_eq!(game.status(), MatchStatus::InProgress);
        assert_eq!(game.score(Side::A), 0);
        assert_eq!(game.score(Side::B), 0);
        assert!(game.history().is_empty());
        assert!(game.champion().is_none());
    }

    #[test]
    fn test_scenario_three_straight_wins() {
        let mut game = human_vs("R2D2", &MatchConfig::classic());

        for round in 1..=3 {
            let result = game.play_moves(Move::Rock, Move::Scissors).unwrap();
            assert_eq!(result.round, round);
            assert_eq!(result.winner, Some(Side::A));
        }

        assert_eq!(game.score(Side::A), 3);
        assert_eq!(game.score(Side::B), 0);
        assert_eq!(game.status(), MatchStatus::Finished);
        assert_eq!(game.champion().map(|p| p.name()), Some("Ada"));
    }

    #[test]
    fn test_scenario_tie_leaves_scores() {
        let mut game = human_vs("Chappie", &MatchConfig::standard());

        game.play_moves(Move::Spock, Move::Rock).unwrap();
        assert_eq!((game.score(Side::A), game.score(Side::B)), (1, 0));

        game.play_moves(Move::Lizard, Move::Paper).unwrap();
        assert_eq!((game.score(Side::A), game.score(Side::B)), (2, 0));

        let tie = game.play_moves(Move::Scissors, Move::Scissors).unwrap();
        assert_eq!(tie.winner, None);
        assert_eq!((game.score(Side::A), game.score(Side::B)), (2, 0));
        assert_eq!(game.status(), MatchStatus::InProgress);
    }

    #[test]
    fn test_no_round_after_finish() {
        let mut game = human_vs("R2D2", &MatchConfig::classic());
        for _ in 0..3 {
            game.play_moves(Move::Paper, Move::Rock).unwrap();
        }

        let err = game.play_moves(Move::Paper, Move::Rock).unwrap_err();
        assert!(matches!(err, GameError::MatchFinished));
        assert_eq!(game.rounds_played(), 3);
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.score(Side::A), 3);
    }

    #[test]
    fn test_finishes_exactly_at_limit() {
        let mut game = human_vs("R2D2", &MatchConfig::extended());
        for _ in 0..9 {
            game.play_moves(Move::Rock, Move::Paper).unwrap();
            assert!(!game.is_finished());
        }
        game.play_moves(Move::Rock, Move::Paper).unwrap();
        assert!(game.is_finished());
        assert_eq!(game.champion_side(), Some(Side::B));
        assert_eq!(game.champion().map(|p| p.name()), Some("R2D2"));
    }

    #[test]
    fn test_rejects_move_outside_catalog() {
        let mut game = human_vs("Sonny", &MatchConfig::classic());
        let err = game.play_moves(Move::Spock, Move::Rock).unwrap_err();
        assert!(matches!(err, GameError::MoveNotInCatalog(Move::Spock)));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_history_tracks_rounds() {
        let mut game = human_vs("Chappie", &MatchConfig::standard());
        game.play_moves(Move::Rock, Move::Rock).unwrap();
        game.play_moves(Move::Paper, Move::Lizard).unwrap();

        let a: Vec<_> = game.history().moves_for(Side::A).collect();
        let b: Vec<_> = game.history().moves_for(Side::B).collect();
        assert_eq!(a, vec![Move::Rock, Move::Paper]);
        assert_eq!(b, vec![Move::Rock, Move::Lizard]);
        assert_eq!(game.history().moves_for(Side::A).count(), game.rounds_played() as usize);
    }

    #[test]
    fn test_play_round_reads_human_token() {
        let mut game = human_vs("R2D2", &MatchConfig::standard());
        let mut console = Scripted::with(&["p", "paper", "PAPER"]);
        let mut rng = rng();

        for _ in 0..3 {
            let result = game.play_round(&mut console, &mut rng).unwrap();
            assert_eq!(result.move_a, Move::Paper);
            assert_eq!(result.move_b, Move::Rock);
        }

        assert!(game.is_finished());
        assert_eq!(console.scores, 2);
        assert_eq!(console.champions, 1);
    }

    #[test]
    fn test_play_round_rejects_unmapped_token() {
        let mut game = human_vs("R2D2", &MatchConfig::classic());
        let mut console = Scripted::with(&["spock"]);

        let err = game.play_round(&mut console, &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::UnknownMove(ref t) if t == "spock"));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_play_round_propagates_closed_input() {
        let mut game = human_vs("R2D2", &MatchConfig::classic());
        let mut console = Scripted::with(&[]);

        let err = game.play_round(&mut console, &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }

    #[test]
    fn test_reset_keeps_participants() {
        let mut game = human_vs("R2D2", &MatchConfig::classic());
        for _ in 0..3 {
            game.play_moves(Move::Scissors, Move::Rock).unwrap();
        }
        assert!(game.is_finished());

        game.reset();
        assert_eq!(game.status(), MatchStatus::InProgress);
        assert_eq!(game.score(Side::B), 0);
        assert!(game.history().is_empty());
        assert!(game.results().is_empty());
        assert_eq!(game.participant(Side::A).name(), "Ada");
        assert_eq!(game.participant(Side::B).name(), "R2D2");
    }

    #[test]
    fn test_replace_opponent_resets() {
        let config = MatchConfig::standard();
        let mut game = human_vs("R2D2", &config);
        game.play_moves(Move::Paper, Move::Rock).unwrap();

        let hal = Participant::persona(Roster::get("Hal").unwrap(), game.catalog()).unwrap();
        game.replace_opponent(hal).unwrap();

        assert_eq!(game.participant(Side::B).name(), "Hal");
        assert_eq!(game.score(Side::A), 0);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_rejects_strategy_for_other_catalog() {
        let five = Catalog::for_variant(Variant::FiveMove).unwrap();
        let three = Catalog::for_variant(Variant::ThreeMove).unwrap();
        let strategy = Strategy::new(&five, vec![1, 1, 1, 1, 1]).unwrap();

        let err = Match::new(three, 3, Participant::human("Ada"), Participant::scripted("X", strategy))
            .unwrap_err();
        assert_eq!(err, ConfigurationError::WeightCountMismatch { expected: 3, got: 5 });
    }

    #[test]
    fn test_rejects_zero_wins_limit() {
        let catalog = Catalog::for_variant(Variant::FiveMove).unwrap();
        let err = Match::new(catalog, 0, Participant::human("A"), Participant::human("B")).unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroWinsLimit);
        assert_eq!(
            MatchConfig { wins_limit: 0, ..MatchConfig::default() }.validate(),
            Err(ConfigurationError::ZeroWinsLimit)
        );
    }

    #[test]
    fn test_summary_cumulative_scores() {
        let mut game = human_vs("Chappie", &MatchConfig::classic());
        game.play_moves(Move::Rock, Move::Scissors).unwrap();
        game.play_moves(Move::Rock, Move::Paper).unwrap();
        game.play_moves(Move::Rock, Move::Rock).unwrap();

        let summary = game.summary();
        let mut expected = (0, 0);
        for round in &summary.rounds {
            match round.winner {
                Some(Side::A) => expected.0 += 1,
                Some(Side::B) => expected.1 += 1,
                None => {}
            }
            assert_eq!((round.cumulative_a, round.cumulative_b), expected);
        }
        assert_eq!(summary.champion, None);
    }

    #[test]
    fn test_summary_json_roundtrip() {
        let mut game = human_vs("R2D2", &MatchConfig::classic());
        for _ in 0..3 {
            game.play_moves(Move::Paper, Move::Rock).unwrap();
        }
        let summary = game.summary();
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"paper\""));

        let back: MatchSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
        assert_eq!(back.champion_name(), Some("Ada"));
    }

    #[test]
    fn test_simulation_determinism() {
        let catalog = Catalog::for_variant(Variant::FiveMove).unwrap();
        let hal = Roster::get("Hal").unwrap();
        let chappie = Roster::get("Chappie").unwrap();
        let seed = [42u8; 32];

        let first = simulate_match(&catalog, hal, chappie, &seed, 0, 5).unwrap();
        let second = simulate_match(&catalog, hal, chappie, &seed, 0, 5).unwrap();
        assert_eq!(first, second);
        assert!(first.champion.is_some());
        assert_eq!(first.score_a.max(first.score_b), 5);
    }

    #[test]
    fn test_different_matches_differ() {
        let catalog = Catalog::for_variant(Variant::FiveMove).unwrap();
        let chappie = Roster::get("Chappie").unwrap();
        let seed = [42u8; 32];

        let first = simulate_match(&catalog, chappie, chappie, &seed, 0, 10).unwrap();
        let second = simulate_match(&catalog, chappie, chappie, &seed, 1, 10).unwrap();

        let moves1: Vec<_> = first.rounds.iter().map(|r| (r.move_a, r.move_b)).collect();
        let moves2: Vec<_> = second.rounds.iter().map(|r| (r.move_a, r.move_b)).collect();
        assert_ne!(moves1, moves2);
    }

    #[test]
    fn test_rock_mirror_hits_round_cap() {
        let catalog = Catalog::for_variant(Variant::FiveMove).unwrap();
        let r2d2 = Roster::get("R2D2").unwrap();

        let err = simulate_match(&catalog, r2d2, r2d2, &[1u8; 32], 0, 3).unwrap_err();
        assert!(matches!(err, GameError::RoundCapReached(MAX_SIMULATED_ROUNDS)));
    }

    #[test]
    fn test_number_5_beats_r2d2() {
        // spock beats rock, lizard loses to rock
        let catalog = Catalog::for_variant(Variant::FiveMove).unwrap();
        let summary = simulate_match(
            &catalog,
            Roster::get("Number 5").unwrap(),
            Roster::get("R2D2").unwrap(),
            &[3u8; 32],
            0,
            3,
        )
        .unwrap();

        for round in &summary.rounds {
            let expected = if round.move_a == Move::Spock { Side::A } else { Side::B };
            assert_eq!(round.winner, Some(expected));
        }
        assert_eq!(summary.rounds.len() as u32, summary.score_a + summary.score_b);
    }
}
