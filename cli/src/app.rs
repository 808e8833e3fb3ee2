//! Interactive bake loop
//!
//! Each batch gets a fresh [`Session`]: fill the sheet, ask for a bake time,
//! print a notice on every almost-ready minute, then report. The loop repeats
//! while the user answers `y`.

use anyhow::{Context, Result};
use oven_core::{BakeReport, OvenConfig, Session};
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub const MINUTES_PROMPT: &str = "How many minutes will you bake?";
pub const REPEAT_PROMPT: &str = "Cook another batch? (y/n)";
pub const ALMOST_READY_NOTICE: &str = "Cookies are almost ready.";

/// How a single batch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Baked(BakeReport),
    /// The sheet was too small for even one cookie
    NothingFit,
    /// Input closed before a bake time was given
    InputClosed,
}

/// Line-oriented prompt/answer channel
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to output")?;
        Ok(())
    }

    /// Print `question` and read one trimmed line; `None` on end of input
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.say(question)?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for a bake time until a non-negative integer is given
    pub fn ask_minutes(&mut self) -> Result<Option<i64>> {
        loop {
            let Some(answer) = self.ask(MINUTES_PROMPT)? else {
                return Ok(None);
            };
            match answer.parse::<i64>() {
                Ok(minutes) if minutes >= 0 => return Ok(Some(minutes)),
                _ => {
                    warn!(%answer, "rejected bake time");
                    self.say("Please enter a whole number of minutes (0 or more).")?;
                }
            }
        }
    }

    /// Only a case-insensitive `y` means yes; end of input means no
    pub fn ask_repeat(&mut self) -> Result<bool> {
        Ok(self
            .ask(REPEAT_PROMPT)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Fill, bake and report one batch
///
/// `minutes` skips the prompt when given; a negative value is an error.
pub fn bake_batch<R: BufRead, W: Write>(
    config: &OvenConfig,
    console: &mut Console<R, W>,
    minutes: Option<i64>,
    json: bool,
) -> Result<Outcome> {
    let mut session = Session::from_config(config)?;
    let filled = session.fill()?;

    if filled.batch_size == 0 {
        session.discard()?;
        console.say(format!(
            "No {} cookies fit on a {} x {} sheet. Try a larger sheet or a smaller cookie.",
            config.variant.type_name(),
            config.sheet_length,
            config.sheet_width
        ))?;
        return Ok(Outcome::NothingFit);
    }

    let minutes = match minutes {
        Some(minutes) => minutes,
        None => match console.ask_minutes()? {
            Some(minutes) => minutes,
            None => {
                session.discard()?;
                return Ok(Outcome::InputClosed);
            }
        },
    };

    for tick in session.run(minutes)? {
        if tick?.is_almost_ready {
            console.say(ALMOST_READY_NOTICE)?;
        }
    }

    let report = session.finish()?;
    if json {
        console.say(serde_json::to_string(&report).context("Failed to encode report")?)?;
    } else {
        console.say(&report)?;
    }
    Ok(Outcome::Baked(report))
}

/// Bake batches until the user declines another; returns how many were baked
pub fn run_loop<R: BufRead, W: Write>(
    config: &OvenConfig,
    console: &mut Console<R, W>,
    json: bool,
) -> Result<usize> {
    let mut baked = 0;
    loop {
        match bake_batch(config, console, None, json)? {
            Outcome::Baked(_) => baked += 1,
            Outcome::NothingFit => {}
            Outcome::InputClosed => break,
        }
        if !console.ask_repeat()? {
            break;
        }
    }
    info!(baked, "done baking");
    Ok(baked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oven_core::{BakeStatus, CookieVariant};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_single_batch_prints_notices_and_report() {
        let mut console = console("10\n");
        let outcome = bake_batch(&OvenConfig::default(), &mut console, None, false).unwrap();

        let Outcome::Baked(report) = outcome else {
            panic!("expected a baked batch");
        };
        assert_eq!(report.final_status, BakeStatus::AlmostReady);

        let text = output(console);
        assert_eq!(text.matches(ALMOST_READY_NOTICE).count(), 2);
        assert!(text.ends_with("You have baked 117 almost_ready peanut cookies.\n"));
    }

    #[test]
    fn test_invalid_minutes_are_reprompted() {
        let mut console = console("soon\n-5\n12\n");
        bake_batch(&OvenConfig::default(), &mut console, None, false).unwrap();

        let text = output(console);
        assert_eq!(text.matches(MINUTES_PROMPT).count(), 3);
        assert!(text.contains("You have baked 117 ready peanut cookies."));
    }

    #[test]
    fn test_fixed_minutes_skip_prompt() {
        let config = OvenConfig {
            variant: CookieVariant::chocolate_chip(),
            ..OvenConfig::default()
        };
        let mut console = console("");
        bake_batch(&config, &mut console, Some(30), false).unwrap();

        let text = output(console);
        assert!(!text.contains(MINUTES_PROMPT));
        assert!(text.contains("You have baked 48 burned chocolate chip cookies."));
    }

    #[test]
    fn test_negative_fixed_minutes_is_an_error() {
        let mut console = console("");
        assert!(bake_batch(&OvenConfig::default(), &mut console, Some(-1), false).is_err());
    }

    #[test]
    fn test_json_report() {
        let mut console = console("");
        bake_batch(&OvenConfig::default(), &mut console, Some(0), true).unwrap();

        let text = output(console);
        let report: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(report["final_size"], 117);
        assert_eq!(report["final_status"], "doughy");
        assert_eq!(report["variant_type_name"], "peanut");
    }

    #[test]
    fn test_tiny_sheet_reports_nothing_fit() {
        let config = OvenConfig {
            sheet_length: 1.0,
            sheet_width: 1.0,
            ..OvenConfig::default()
        };
        let mut console = console("");
        let outcome = bake_batch(&config, &mut console, None, false).unwrap();

        assert_eq!(outcome, Outcome::NothingFit);
        assert!(output(console).starts_with("No peanut cookies fit"));
    }

    #[test]
    fn test_loop_repeats_on_yes() {
        let mut console = console("3\nY\n16\nn\n");
        let baked = run_loop(&OvenConfig::default(), &mut console, false).unwrap();

        assert_eq!(baked, 2);
        let text = output(console);
        assert!(text.contains("You have baked 117 doughy peanut cookies."));
        assert!(text.contains("You have baked 117 burned peanut cookies."));
        assert_eq!(text.matches(REPEAT_PROMPT).count(), 2);
    }

    #[test]
    fn test_loop_stops_at_end_of_input() {
        let mut console = console("5\n");
        let baked = run_loop(&OvenConfig::default(), &mut console, false).unwrap();
        assert_eq!(baked, 1);
    }

    #[test]
    fn test_anything_but_y_stops() {
        let mut console = console("1\nyes\n");
        assert_eq!(run_loop(&OvenConfig::default(), &mut console, false).unwrap(), 1);
    }
}
