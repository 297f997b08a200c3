//! RISC-V instruction encoding drill CLI.
//!
//! This binary provides a single entry point for all drill tools. It performs:
//! 1. **Drill:** Interactive recall, bit-width, and full encoding rounds (default).
//! 2. **Encode:** One-shot ground truth for a given instruction and operands.
//! 3. **Decode:** Identification and field breakdown of a 32-bit hex word.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rvtutor_core::isa::instruction::Operands;
use rvtutor_core::{DrillConfig, InstructionRegistry, Question};

mod drill;

use drill::{Mode, Session, parse_types};

#[derive(Parser, Debug)]
#[command(
    name = "rvtutor",
    author,
    version,
    about = "RISC-V instruction encoding drills",
    long_about = "Practice RISC-V base instruction formats: field order, bit widths, and full 32-bit encodings.\n\nExamples:\n  rvtutor drill --types R,I --mode encode\n  rvtutor encode addi --rd 2 --rs1 1 --imm 10\n  rvtutor decode 0x002081b3"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run interactive drill rounds.
    Drill {
        /// Instruction formats to drill (e.g. "R,I" or "all").
        #[arg(short, long, num_args = 0..)]
        types: Vec<String>,

        /// Drill mode.
        #[arg(short, long, value_enum, default_value_t = Mode::Encode)]
        mode: Mode,

        /// Fixed PRNG seed for a reproducible session.
        #[arg(long)]
        seed: Option<u64>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep previous rounds on screen.
        #[arg(long)]
        no_clear: bool,
    },

    /// Print the ground-truth encoding of one instruction.
    Encode {
        /// Instruction mnemonic (e.g. `addi`).
        mnemonic: String,

        /// Destination register index.
        #[arg(long, default_value_t = 0)]
        rd: u8,

        /// First source register index.
        #[arg(long, default_value_t = 0)]
        rs1: u8,

        /// Second source register index.
        #[arg(long, default_value_t = 0)]
        rs2: u8,

        /// Immediate (raw 20-bit field for U-type).
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        imm: i32,
    },

    /// Identify a 32-bit instruction word given in hex.
    Decode {
        /// Instruction word, with or without `0x`.
        word: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = InstructionRegistry::base().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    match cli.command {
        Some(Commands::Drill {
            types,
            mode,
            seed,
            config,
            no_clear,
        }) => cmd_drill(registry, &types, mode, seed, config, no_clear),
        Some(Commands::Encode {
            mnemonic,
            rd,
            rs1,
            rs2,
            imm,
        }) => cmd_encode(&registry, &mnemonic, Operands { rd, rs1, rs2, imm }),
        Some(Commands::Decode { word }) => cmd_decode(&registry, &word),
        None => cmd_drill(registry, &[], Mode::Encode, None, None, false),
    }
}

/// Runs an interactive session on stdin/stdout.
///
/// Command-line flags override values from the configuration file.
fn cmd_drill(
    registry: InstructionRegistry,
    types: &[String],
    mode: Mode,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    no_clear: bool,
) {
    let mut config = match config_path {
        Some(path) => DrillConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => DrillConfig::default(),
    };
    if !types.is_empty() {
        config.formats = parse_types(types);
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if no_clear {
        config.clear_screen = false;
    }

    println!("Welcome to rvtutor");
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), config, registry);
    if let Err(e) = session.run(mode) {
        eprintln!("\n[!] {e}");
        process::exit(1);
    }
    tracing::info!(score = %session.stats(), "session finished");
}

/// Prints the assembly rendering, field breakdown, binary, and hex of one instruction.
fn cmd_encode(registry: &InstructionRegistry, mnemonic: &str, operands: Operands) {
    let Some(desc) = registry.find(mnemonic) else {
        eprintln!("Error: unknown instruction `{mnemonic}`");
        process::exit(1);
    };
    let question = Question::new(desc.clone(), operands);
    match question.ground_truth() {
        Ok(truth) => {
            println!("{}  ({}-Type)", question.assembly(), question.format());
            for field in &truth.fields {
                println!("  {:<12} {}", field.name, field.bits);
            }
            println!("binary: {}", truth.binary);
            println!("hex:    {}", truth.hex);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Identifies a hex word and prints the instruction it encodes.
fn cmd_decode(registry: &InstructionRegistry, word: &str) {
    let digits = word.trim().trim_start_matches("0x").trim_start_matches("0X");
    let Ok(word) = u32::from_str_radix(digits, 16) else {
        eprintln!("Error: `{word}` is not a 32-bit hex word");
        process::exit(1);
    };
    match Question::decode(registry, word).and_then(|q| q.ground_truth().map(|t| (q, t))) {
        Ok((question, truth)) => {
            println!("{}  ({}-Type)", question.assembly(), question.format());
            for field in &truth.fields {
                println!("  {:<12} {:>2} bits  {}", field.name, field.bits.len(), field.bits);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
