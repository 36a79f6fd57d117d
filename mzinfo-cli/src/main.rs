use anyhow::Result;
use clap::Parser;
use mzinfo_core::{decode_and_report, Outcome};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Print the MZ header of a DOS executable
#[derive(Parser)]
#[command(
    name = "mzinfo",
    about = "Dump the MZ header and relocation table of a DOS executable",
    version,
    author
)]
struct Cli {
    /// Path to the executable
    #[arg(allow_hyphen_values = true)]
    path: Option<PathBuf>,

    /// Anything after the path is ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<OsString>,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let Some(path) = cli.path else {
        let program = std::env::args_os()
            .next()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mzinfo".to_string());
        println!("Usage: {program} file.exe");
        return Ok(ExitCode::SUCCESS);
    };

    let mut stdout = std::io::stdout().lock();
    let outcome = decode_and_report(&path, &mut stdout)?;
    stdout.flush()?;

    match outcome {
        Outcome::Reported => Ok(ExitCode::SUCCESS),
        Outcome::NotAnExe => {
            log::info!("{}: wrong signature, exiting with status 1", path.display());
            Ok(ExitCode::from(1))
        }
    }
}
