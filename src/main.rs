//! RISC-V Test Suite Runner CLI.
//!
//! Runs a host simulator executable over a built-in test suite or a single
//! ELF file.
//!
//! # Usage
//!
//! The runner works in two modes:
//! 1. **Suite Mode** (`--test`): runs every test of `assembly`, `assembly_fp`
//!    or `benchmarks` found under `$RISCY_TOOLS_FESVR`.
//! 2. **ELF Mode** (`--elf`): runs one externally supplied executable.

use clap::Parser;
use std::path::PathBuf;
use std::{env, process};

extern crate riscv_test_runner;

use riscv_test_runner::common::{HarnessError, TestCategory};
use riscv_test_runner::config::{FileConfig, Overrides, RunConfig, Selection};
use riscv_test_runner::sim::{ProcessLauncher, Runner};

/// Command-line arguments for the test runner.
#[derive(Parser, Debug)]
#[command(author, version, about = "RISC-V test suite runner")]
struct Args {
    /// Host runner executable.
    #[arg(long, value_name = "UBUNTU_EXE")]
    exe: Option<String>,

    /// ROM image passed to the host runner.
    #[arg(long, value_name = "ROM")]
    rom: Option<String>,

    /// Core count passed to the host runner.
    #[arg(long, value_name = "CORE_NUM", value_parser = clap::value_parser!(u32).range(1..))]
    cores: Option<u32>,

    /// Base output directory [default: out].
    #[arg(long, value_name = "OUT_DIR")]
    outdir: Option<PathBuf>,

    /// Keep the host runner output in log.txt.
    #[arg(long)]
    log: bool,

    /// Run one of the built-in tests.
    #[arg(long, value_name = "TEST_TYPE", value_enum, conflicts_with = "elf")]
    test: Option<TestCategory>,

    /// Run the given elf executable.
    #[arg(long, value_name = "ELF")]
    elf: Option<PathBuf>,

    /// TOML file with default settings.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the commands without running them.
    #[arg(long)]
    dry_run: bool,
}

/// Main entry point for the test runner.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments, loads the optional config file.
/// 2. **Selection**: Once `--exe`, `--rom` and `--cores` are known, a run
///    without `--test` or `--elf` prints a hint and exits 0.
/// 3. **Run**: Resolves targets and runs them until one fails.
/// 4. **Exit**: Exits with the failing test's code, or 0.
fn main() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        if e.is_config() {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("\n[!] {}", e);
        }
        process::exit(e.exit_code());
    }
}

fn run(args: Args) -> Result<(), HarnessError> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        exe: args.exe,
        rom: args.rom,
        cores: args.cores,
        outdir: args.outdir,
        log: args.log,
        dry_run: args.dry_run,
    };
    RunConfig::check_required(&file, &overrides)?;

    let selection = match (args.test, args.elf) {
        (Some(category), _) => Selection::Category(category),
        (None, Some(elf)) => Selection::Elf(elf),
        (None, None) => {
            println!("choose one of built-in tests (TEST) or provide an elf executable (ELF)");
            return Ok(());
        }
    };

    let cwd = env::current_dir().map_err(HarnessError::CurrentDir)?;
    let config = RunConfig::resolve(file, overrides, selection, &cwd)?;
    tracing::debug!(?config, "configuration loaded");

    let mut runner = Runner::new(config, ProcessLauncher);
    runner.run()?;
    Ok(())
}
