//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::models::session::SessionKind;

/// Pitwall - read-only Formula 1 dashboards in the terminal
#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upcoming race with a live countdown to the selected session
    Next {
        /// Session to count down to (defaults to the race itself)
        #[arg(short, long, value_enum)]
        session: Option<SessionArg>,
    },
    /// Most recent completed race: classification and highlights
    Last,
    /// Season calendar with aggregate insights
    Season {
        /// Championship year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Print the detail card for one round
        #[arg(short, long)]
        round: Option<String>,
    },
    /// Championship standings with interactive detail lookups
    Standings {
        /// Start on the constructors table
        #[arg(short, long)]
        constructors: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SessionArg {
    Race,
    Qualy,
    Fp1,
    Fp2,
    Fp3,
    SprintQualy,
    SprintRace,
}

impl SessionArg {
    pub fn kind(self) -> SessionKind {
        match self {
            SessionArg::Race => SessionKind::Race,
            SessionArg::Qualy => SessionKind::Qualifying,
            SessionArg::Fp1 => SessionKind::Practice1,
            SessionArg::Fp2 => SessionKind::Practice2,
            SessionArg::Fp3 => SessionKind::Practice3,
            SessionArg::SprintQualy => SessionKind::SprintQualifying,
            SessionArg::SprintRace => SessionKind::SprintRace,
        }
    }
}
