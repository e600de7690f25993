//! Banzuke CLI
//!
//! Roster JSON in, allocation / daily card / simulated period out.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "banzuke")]
#[command(about = "Allocate rankings, schedule tournament days and simulate periods", long_about = None)]
struct Cli {
    /// Rule set file (YAML or JSON); the standard format when omitted
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate the next period's banzuke from a closed period's roster
    Allocate {
        /// Roster JSON file (array of competitors)
        #[arg(long)]
        roster: PathBuf,

        /// Identifier stamped on the history snapshot of the closing period
        #[arg(long)]
        period_id: String,

        /// Champion of the closing period
        #[arg(long)]
        current_champion: Option<String>,

        /// Champion of the period before
        #[arg(long)]
        previous_champion: Option<String>,

        /// Output roster JSON file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build one tournament day's card
    Schedule {
        #[arg(long)]
        roster: PathBuf,

        /// Tournament day (1-based)
        #[arg(long)]
        day: u8,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run a full period (schedule, resolve, record) and allocate the next banzuke
    Simulate {
        #[arg(long)]
        roster: PathBuf,

        #[arg(long)]
        period_id: String,

        /// RNG seed; the same seed reproduces the same period
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Champion of the previous period, for the back-to-back rule
        #[arg(long)]
        previous_champion: Option<String>,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the rule set in effect as YAML
    Rules {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rules = commands::load_rules(cli.rules.as_deref())?;

    match cli.command {
        Commands::Allocate { roster, period_id, current_champion, previous_champion, out } => {
            let roster = commands::read_roster(&roster)?;
            let allocation =
                commands::allocate(&roster, &period_id, &rules, current_champion, previous_champion);
            for movement in &allocation.movements {
                eprintln!(
                    "{:<12} {:>6} -> {:<6} {:?}",
                    movement.competitor,
                    movement.from.label(),
                    movement.to.label(),
                    movement.kind
                );
            }
            commands::write_json(out.as_deref(), &allocation.roster)?;
        }

        Commands::Schedule { roster, day, out } => {
            let roster = commands::read_roster(&roster)?;
            let schedule = commands::schedule(&roster, day, &rules)?;
            eprintln!("day {}: {} bouts, {} byes", day, schedule.pairings.len(), schedule.byes.len());
            commands::write_json(out.as_deref(), &schedule)?;
        }

        Commands::Simulate { roster, period_id, seed, previous_champion, out } => {
            let roster = commands::read_roster(&roster)?;
            let summary = commands::simulate(roster, &period_id, seed, previous_champion, &rules)?;
            eprintln!(
                "period {}: {} bouts, champion {}",
                period_id,
                summary.bouts,
                summary.champion.as_deref().unwrap_or("-")
            );
            commands::write_json(out.as_deref(), &summary)?;
        }

        Commands::Rules { out } => {
            let yaml = serde_yaml::to_string(&rules)?;
            commands::write_text(out.as_deref(), &yaml)?;
        }
    }

    Ok(())
}
