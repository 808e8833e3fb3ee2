//! `oven` - bake cookie batches from the terminal

mod app;
mod logging;

use anyhow::{Context, Result};
use app::{Console, Outcome};
use clap::{Parser, ValueEnum};
use oven_core::{CookieVariant, OvenConfig};
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Bake batches of cookies on a sheet
#[derive(Parser, Debug)]
#[command(name = "oven", version)]
#[command(about = "Fill a baking sheet with cookies and bake them minute by minute", long_about = None)]
struct Cli {
    /// JSON config file (sheet_length, sheet_width, variant)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Sheet length in inches [default: 26]
    #[arg(long)]
    length: Option<f64>,

    /// Sheet width in inches [default: 18]
    #[arg(long)]
    width: Option<f64>,

    /// Cookie variant [default: peanut]
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Peanuts per peanut cookie
    #[arg(long)]
    peanuts: Option<u32>,

    /// Chips per chocolate chip cookie
    #[arg(long)]
    chips: Option<u32>,

    /// Bake one batch for this many minutes without prompting
    #[arg(short = 'm', long, allow_negative_numbers = true)]
    minutes: Option<i64>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Peanut,
    ChocolateChip,
}

impl Cli {
    /// Layer flags over the config file over defaults
    fn oven_config(&self) -> Result<OvenConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                OvenConfig::from_json_str(&json)
                    .with_context(|| format!("Failed to load config {}", path.display()))?
            }
            None => OvenConfig::default(),
        };

        if let Some(length) = self.length {
            config.sheet_length = length;
        }
        if let Some(width) = self.width {
            config.sheet_width = width;
        }
        if let Some(variant) = self.variant {
            config.variant = match variant {
                VariantArg::Peanut => CookieVariant::peanut(),
                VariantArg::ChocolateChip => CookieVariant::chocolate_chip(),
            };
        }
        match &mut config.variant {
            CookieVariant::Peanut { num_peanuts } => {
                if let Some(peanuts) = self.peanuts {
                    *num_peanuts = peanuts;
                }
            }
            CookieVariant::ChocolateChip { num_chips } => {
                if let Some(chips) = self.chips {
                    *num_chips = chips;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.oven_config()?;
    debug!(?config, "resolved oven config");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match cli.minutes {
        Some(minutes) => {
            let outcome = app::bake_batch(&config, &mut console, Some(minutes), cli.json)?;
            debug!(?outcome, "single batch complete");
            if outcome == Outcome::NothingFit {
                std::process::exit(2);
            }
        }
        None => {
            let baked = app::run_loop(&config, &mut console, cli.json)?;
            debug!(baked, "session loop complete");
        }
    }

    Ok(())
}
