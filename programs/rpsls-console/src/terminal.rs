//! Terminal console backed by dialoguer prompts

use std::io;

use dialoguer::Input;
use rpsls_logic::{Catalog, Console, Event, Move, Side};

/// Prompts on stdin, prints events to stdout
pub struct Terminal;

impl Console for Terminal {
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = Input::<String>::new()
            .with_prompt(format!("{} (y/n)", prompt))
            .validate_with(|input: &String| -> Result<(), &str> {
                match parse_yes_no(input) {
                    Some(_) => Ok(()),
                    None => Err("Sorry, must be y or n."),
                }
            })
            .interact_text()
            .map_err(io::Error::other)?;

        parse_yes_no(&answer).ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, answer))
    }

    fn ask_open(&mut self, prompt: &str, max_len: Option<usize>) -> io::Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(move |input: &String| -> Result<(), String> {
                let len = input.trim().chars().count();
                if len == 0 {
                    return Err("Sorry, must enter a value.".to_string());
                }
                match max_len {
                    Some(max) if len > max => Err(format!("Sorry, at most {} characters.", max)),
                    _ => Ok(()),
                }
            })
            .interact_text()
            .map_err(io::Error::other)?;

        Ok(answer.trim().to_string())
    }

    fn ask_closed(&mut self, prompt: &str, allowed: &[&str]) -> io::Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), &str> {
                match match_token(input, allowed) {
                    Some(_) => Ok(()),
                    None => Err("Sorry, invalid choice."),
                }
            })
            .interact_text()
            .map_err(io::Error::other)?;

        match_token(&answer, allowed)
            .map(str::to_string)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, answer))
    }

    fn display(&mut self, event: &Event<'_>) {
        println!("{}", render(event));
    }
}

/// Accepts y/yes/n/no in any case
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// The allowed token `input` names, ignoring case and surrounding space
pub fn match_token<'a>(input: &str, allowed: &[&'a str]) -> Option<&'a str> {
    let input = input.trim();
    allowed.iter().copied().find(|token| token.eq_ignore_ascii_case(input))
}

fn join_moves(moves: &[Move]) -> String {
    match moves.split_last() {
        None => "nothing".to_string(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => {
            let head: Vec<&str> = rest.iter().map(|mv| mv.name()).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}

fn rules(catalog: &Catalog) -> String {
    catalog
        .moves()
        .iter()
        .map(|mv| format!("  {} beats {}", mv, join_moves(&catalog.beaten_by(*mv))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text for one event
pub fn render(event: &Event<'_>) -> String {
    match event {
        Event::Welcome { catalog, wins_limit } => format!(
            "Welcome to Rock, Paper, Scissors, Spock, Lizard!\n\
             The first to win {} games is the champion of the round.\n{}",
            wins_limit,
            rules(catalog)
        ),
        Event::Opponent { persona } => {
            format!("Your opponent is {}. {}", persona.name, persona.description)
        }
        Event::Moves { a, move_a, b, move_b } => format!(
            "{} chose {}\n{} chose {}",
            a.name(),
            move_a,
            b.name(),
            move_b
        ),
        Event::RoundWinner { winner: Some(winner) } => format!("{} won!", winner.name()),
        Event::RoundWinner { winner: None } => "It's a tie!".to_string(),
        Event::Scores { a, b, wins_limit } => format!(
            "{} has {}.\n{} has {}.\nRemember, the first to {} is the champion of the round.",
            a.name(),
            a.points(),
            b.name(),
            b.points(),
            wins_limit
        ),
        Event::Champion { champion, wins_limit } => format!(
            "{} won {} games and is the CHAMPION of the round!",
            champion.name(),
            wins_limit
        ),
        Event::History { matches } => {
            let mut lines = Vec::new();
            for (i, summary) in matches.iter().enumerate() {
                lines.push(format!(
                    "Match {}: {} {} - {} {}",
                    i + 1,
                    summary.name_a,
                    summary.score_a,
                    summary.score_b,
                    summary.name_b
                ));
                for side in [Side::A, Side::B] {
                    let moves: Vec<Move> = summary.moves_for(side).collect();
                    lines.push(format!(
                        "  These were {}'s moves: {}.",
                        summary.name(side),
                        join_moves(&moves)
                    ));
                }
            }
            lines.join("\n")
        }
        Event::Goodbye => {
            "Thanks for playing Rock, Paper, Scissors, Spock, Lizard. Good bye!".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsls_logic::{MatchConfig, Participant, Roster, Variant};

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" no "), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_match_token_returns_allowed_spelling() {
        let allowed = ["rock", "paper", "number 5"];
        assert_eq!(match_token(" ROCK", &allowed), Some("rock"));
        assert_eq!(match_token("Number 5", &allowed), Some("number 5"));
        assert_eq!(match_token("lizard", &allowed), None);
    }

    #[test]
    fn test_render_welcome_lists_rules() {
        let catalog = Catalog::for_variant(Variant::FiveMove).unwrap();
        let text = render(&Event::Welcome { catalog: &catalog, wins_limit: 3 });
        assert!(text.contains("first to win 3 games"));
        assert!(text.contains("rock beats scissors and lizard"));
        assert!(text.contains("spock beats rock and scissors"));
    }

    #[test]
    fn test_render_scores_pluralizes() {
        let mut ada = Participant::human("Ada");
        ada.increment_score();
        let hal = Participant::human("Hal");

        let text = render(&Event::Scores { a: &ada, b: &hal, wins_limit: 3 });
        assert!(text.contains("Ada has 1 point."));
        assert!(text.contains("Hal has 0 points."));
    }

    #[test]
    fn test_render_tie_and_persona() {
        assert_eq!(render(&Event::RoundWinner { winner: None }), "It's a tie!");

        let hal = Roster::get("Hal").unwrap();
        assert!(render(&Event::Opponent { persona: hal }).starts_with("Your opponent is Hal."));
    }

    #[test]
    fn test_render_history() {
        let config = MatchConfig::classic();
        let catalog = config.catalog().unwrap();
        let r2d2 = Participant::persona(Roster::get("R2D2").unwrap(), &catalog).unwrap();
        let mut game =
            rpsls_logic::Match::new(catalog, 3, Participant::human("Ada"), r2d2).unwrap();
        for _ in 0..3 {
            game.play_moves(Move::Paper, Move::Rock).unwrap();
        }

        let matches = [game.summary()];
        let text = render(&Event::History { matches: &matches });
        assert!(text.contains("Match 1: Ada 3 - 0 R2D2"));
        assert!(text.contains("These were Ada's moves: paper, paper and paper."));
        assert!(text.contains("These were R2D2's moves: rock, rock and rock."));
    }
}
