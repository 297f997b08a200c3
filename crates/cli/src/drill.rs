//! Interactive drill session.
//!
//! Runs quiz rounds against any line-based input and output, so the same loop
//! serves the terminal and tests. Each round generates a question, walks the
//! steps of the selected mode with a single attempt per step, and records
//! every graded step in the session score.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use rvtutor_core::isa::encode::GroundTruth;
use rvtutor_core::quiz::{
    Verdict, check_format_answer, check_hex_answer, generate_question, validate_field_binaries,
    validate_field_bit_widths, validate_field_names,
};
use rvtutor_core::{
    ConfigError, DrillConfig, InstructionDescriptor, InstructionRegistry, Question, QuizStats,
};

/// ANSI sequence moving the cursor home and clearing the screen.
const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";

/// Separator line under headers.
const RULE: &str = "--------------------";

/// Drill modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Format, then field names in order.
    Recall,
    /// Format, then field bit widths in order.
    Bits,
    /// Format, field names, per-field binary, then the final hex word.
    Encode,
}

impl Mode {
    const fn title(self) -> &'static str {
        match self {
            Self::Recall => "Recall",
            Self::Bits => "Bits",
            Self::Encode => "Encoding",
        }
    }
}

/// Whether the user wants to keep going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Splits raw format selections on commas and whitespace.
///
/// An empty selection or the word `all` selects every format.
pub fn parse_types<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let tokens: Vec<String> = raw
        .iter()
        .flat_map(|s| {
            s.as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(str::to_uppercase)
                .collect::<Vec<_>>()
        })
        .collect();
    if tokens.is_empty() || tokens.iter().any(|t| t == "ALL") {
        DrillConfig::default().formats
    } else {
        tokens
    }
}

/// Renders per-position feedback for a failed verdict.
fn feedback<T: Display>(answers: &[&str], verdict: &Verdict<T>, labelled: bool) -> String {
    let mut parts = Vec::with_capacity(answers.len().max(verdict.expected.len()));
    for (i, answer) in answers.iter().enumerate() {
        let mark = match (verdict.mask.get(i), verdict.expected.get(i)) {
            (Some(true), _) => "✓".to_owned(),
            (_, Some(want)) => format!("✗ (Expected: {want})"),
            _ => "✗ (Extra)".to_owned(),
        };
        parts.push(if labelled {
            format!("{answer}: {mark}")
        } else {
            mark
        });
    }
    for want in verdict.expected.iter().skip(answers.len()) {
        parts.push(format!("Missing (Expected: {want})"));
    }
    parts.join(" | ")
}

/// A drill session over line-based input and output.
#[derive(Debug)]
pub struct Session<R, W> {
    input: R,
    out: W,
    config: DrillConfig,
    registry: InstructionRegistry,
    pool: Vec<InstructionDescriptor>,
    stats: QuizStats,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session; the PRNG is seeded from the config when it names a seed.
    pub fn new(input: R, out: W, config: DrillConfig, registry: InstructionRegistry) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            input,
            out,
            config,
            registry,
            pool: Vec::new(),
            stats: QuizStats::new(),
            rng,
        }
    }

    /// Accumulated score.
    pub const fn stats(&self) -> &QuizStats {
        &self.stats
    }

    /// Reads one trimmed reply, blank lines included. `None` means end of
    /// input or a quit command.
    fn reply(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if matches!(line.to_lowercase().as_str(), "q" | "quit") {
            return Ok(None);
        }
        Ok(Some(line.to_owned()))
    }

    /// Reads one non-blank trimmed line, asking again on blank input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        loop {
            match self.reply(message)? {
                Some(line) if line.is_empty() => {}
                other => return Ok(other),
            }
        }
    }

    /// Resolves the instruction pool, asking again while the selection is empty.
    fn select_pool(&mut self) -> io::Result<Flow> {
        let mut formats = self.config.formats.clone();
        loop {
            match self.registry.filter(&formats) {
                Ok(pool) => {
                    self.pool = pool;
                    return Ok(Flow::Continue);
                }
                Err(err @ ConfigError::EmptySelection { .. }) => {
                    writeln!(self.out, "Error: {err}. Please try again.")?;
                }
                Err(err) => return Err(io::Error::other(err)),
            }
            let Some(raw) =
                self.prompt("Enter instruction types (R I S B U J, 'all' for every type): ")?
            else {
                return Ok(Flow::Quit);
            };
            formats = parse_types(&[raw]);
        }
    }

    /// Runs rounds in `mode` until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading or writing fails, or if the core
    /// reports an internal encoding error.
    pub fn run(&mut self, mode: Mode) -> io::Result<()> {
        if self.select_pool()? == Flow::Quit {
            return Ok(());
        }
        info!(instructions = self.pool.len(), mode = mode.title(), "drill started");

        loop {
            let question =
                generate_question(&self.pool, &mut self.rng).map_err(io::Error::other)?;
            let truth = question.ground_truth().map_err(io::Error::other)?;
            debug!(asm = %question.assembly(), hex = %truth.hex, "round");

            self.header(mode, &question, false)?;
            let flow = match mode {
                Mode::Recall => self.recall_round(&question)?,
                Mode::Bits => self.bits_round(&question)?,
                Mode::Encode => self.encode_round(&question, &truth)?,
            };
            if flow == Flow::Quit {
                break;
            }

            writeln!(self.out, "\nAccuracy: {}", self.stats)?;
            // A blank reply takes the default.
            match self.reply("\nContinue? [Y/n]: ")? {
                Some(answer) if answer.eq_ignore_ascii_case("n") => break,
                Some(_) => {}
                None => break,
            }
        }

        writeln!(self.out, "\nFinal accuracy: {}", self.stats)?;
        Ok(())
    }

    fn header(&mut self, mode: Mode, question: &Question, givens: bool) -> io::Result<()> {
        if self.config.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        writeln!(self.out, "Mode: {}", mode.title())?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Type 'q' to return.\n")?;
        if mode == Mode::Encode {
            writeln!(self.out, "{}\n", question.assembly())?;
        }
        if givens && self.config.show_givens {
            let desc = &question.instruction;
            writeln!(self.out, "Givens:")?;
            writeln!(self.out, "  Opcode: {}", desc.opcode())?;
            if let Some(f3) = desc.funct3() {
                writeln!(self.out, "  Funct3: {f3}")?;
            }
            if let Some(f7) = desc.funct7() {
                writeln!(self.out, "  Funct7: {f7}")?;
            }
            writeln!(self.out, "{RULE}")?;
        }
        Ok(())
    }

    fn ask_format(&mut self, question: &Question) -> io::Result<Flow> {
        let name = question.instruction.mnemonic().to_owned();
        let Some(answer) = self.prompt(&format!("What instruction type is `{name}`? "))? else {
            return Ok(Flow::Quit);
        };
        let correct = check_format_answer(question, &answer);
        self.stats.record_check(correct);
        if correct {
            writeln!(self.out, "Correct. (1/1) (Type: {})", question.format())?;
        } else {
            writeln!(self.out, "Incorrect. (0/1) Expected: {}", question.format())?;
        }
        Ok(Flow::Continue)
    }

    fn report<T: Display>(
        &mut self,
        answer: &str,
        verdict: &Verdict<T>,
        labelled: bool,
    ) -> io::Result<()> {
        self.stats.record_verdict(verdict);
        let (points, total) = (verdict.points(), verdict.total());
        if verdict.passed {
            writeln!(self.out, "Correct. ({points}/{total})")
        } else {
            let answers: Vec<&str> = answer.split_whitespace().collect();
            writeln!(self.out, "Incorrect. ({points}/{total})")?;
            writeln!(self.out, "{}", feedback(&answers, verdict, labelled))
        }
    }

    fn ask_names(&mut self, question: &Question) -> io::Result<Flow> {
        let name = question.instruction.mnemonic().to_owned();
        writeln!(self.out, "\nInstruction: {name} ({}-Type)", question.format())?;
        let Some(answer) = self.prompt("Fields in order (space separated): ")? else {
            return Ok(Flow::Quit);
        };
        let tokens: Vec<&str> = answer.split_whitespace().collect();
        let verdict = validate_field_names(question, &tokens);
        self.report(&answer, &verdict, true)?;
        Ok(Flow::Continue)
    }

    fn recall_round(&mut self, question: &Question) -> io::Result<Flow> {
        if self.ask_format(question)? == Flow::Quit {
            return Ok(Flow::Quit);
        }
        self.ask_names(question)
    }

    fn bits_round(&mut self, question: &Question) -> io::Result<Flow> {
        if self.ask_format(question)? == Flow::Quit {
            return Ok(Flow::Quit);
        }
        let name = question.instruction.mnemonic().to_owned();
        writeln!(self.out, "\nInstruction: {name} ({}-Type)", question.format())?;
        let Some(answer) = self.prompt("Bit widths in order (space separated): ")? else {
            return Ok(Flow::Quit);
        };
        let tokens: Vec<&str> = answer.split_whitespace().collect();
        let verdict = validate_field_bit_widths(question, &tokens);
        self.report(&answer, &verdict, false)?;
        Ok(Flow::Continue)
    }

    fn encode_round(&mut self, question: &Question, truth: &GroundTruth) -> io::Result<Flow> {
        if self.ask_format(question)? == Flow::Quit || self.ask_names(question)? == Flow::Quit {
            return Ok(Flow::Quit);
        }

        self.header(Mode::Encode, question, true)?;
        let name = question.instruction.mnemonic().to_owned();
        writeln!(self.out, "What are the binary values for each field in `{name}`?")?;
        let Some(answer) = self.prompt("Binary (space separated): ")? else {
            return Ok(Flow::Quit);
        };
        let tokens: Vec<&str> = answer.split_whitespace().collect();
        let verdict = validate_field_binaries(truth, &tokens);
        self.report(&answer, &verdict, true)?;

        writeln!(self.out, "\nWhat is the final 32-bit hex encoding for `{name}`?")?;
        let Some(answer) = self.prompt("Hex: ")? else {
            return Ok(Flow::Quit);
        };
        let correct = check_hex_answer(truth, &answer);
        self.stats.record_check(correct);
        if correct {
            writeln!(self.out, "Correct! (1/1)")?;
        } else {
            writeln!(self.out, "Incorrect. (0/1) Expected: {}", truth.hex)?;
        }
        Ok(Flow::Continue)
    }
}
