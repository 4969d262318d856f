// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — tokenizes and encodes the whole dataset
//   2. `inspect` — encodes one sample and prints the tensors
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PrepareArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "vqa-prep",
    version = "0.1.0",
    about = "Prepare VQA (question, image, answer) samples as model-ready tensors."
)]
pub struct Cli {
    /// The subcommand to run (prepare or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => self.run_prepare(args),
            Commands::Inspect(args) => self.run_inspect(args),
        }
    }

    /// Handles the `prepare` subcommand.
    /// Converts CLI args into a PrepareConfig and hands off to Layer 2.
    fn run_prepare(&self, args: PrepareArgs) -> Result<()> {
        use crate::application::prepare_use_case::PrepareUseCase;

        tracing::info!("Starting preparation of '{}'", args.annotations);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = PrepareUseCase::new(args.into());
        use_case.execute()?;

        println!("Preparation complete. Tokenizer and manifest saved.");
        Ok(())
    }

    /// Handles the `inspect` subcommand.
    /// Encodes one sample and prints the report.
    fn run_inspect(&self, args: InspectArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        let question_id = args.question_id;
        let use_case    = InspectUseCase::new(args.into());
        let report      = use_case.inspect(question_id)?;

        println!("{report}");
        Ok(())
    }
}
