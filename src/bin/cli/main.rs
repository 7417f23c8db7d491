//! CLI tool for interactively stripping large members from tar archives.

mod exit_codes;
mod menu;

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

use exit_codes::ExitCode;

/// Interactive tar archive trimming tool
#[derive(Parser)]
#[command(name = "tartrim")]
#[command(author, version, about = "Strip oversized members from tar archives", long_about = None)]
pub struct Cli {
    /// Archive file to inspect, or a directory containing archive files
    archive: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut menu = menu::Menu::new();

    let exit_code = match tartrim::session::run(&cli.archive, &mut menu) {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            eprintln!("Error: {error}");
            exit_codes::error_to_exit_code(&error)
        }
    };

    std::process::exit(exit_code.code());
}

/// Logs to stderr so log lines never collide with an active dialog.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();
}
