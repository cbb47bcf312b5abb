//! Command-line flags

use clap::{Parser, ValueEnum};
use rpsls_logic::{MatchConfig, Variant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Rock, paper, scissors; first to 3
    Classic,
    /// All five moves; first to 3
    Standard,
    /// All five moves; first to 10
    Extended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Three,
    Five,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Three => Variant::ThreeMove,
            VariantArg::Five => Variant::FiveMove,
        }
    }
}

/// Duel a scripted persona at Rock, Paper, Scissors, Spock, Lizard
#[derive(Debug, Parser)]
#[command(name = "rpsls", version, about)]
pub struct Cli {
    /// Starting configuration
    #[arg(long, value_enum, default_value = "standard")]
    pub preset: Preset,

    /// Override the move set
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Override the wins needed to become champion
    #[arg(long)]
    pub wins_limit: Option<u32>,

    /// Seed persona draws for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print every finished match as JSON on exit
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Preset with any flag overrides applied
    pub fn config(&self) -> MatchConfig {
        let mut config = match self.preset {
            Preset::Classic => MatchConfig::classic(),
            Preset::Standard => MatchConfig::standard(),
            Preset::Extended => MatchConfig::extended(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        if let Some(limit) = self.wins_limit {
            config.wins_limit = limit;
        }
        config
    }
}
