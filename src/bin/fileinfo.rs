// fileinfo - Reports which known jump tables an executable contains

use clap::Parser;
use neomap::inspector::is_path_list;
use neomap::{Inspector, NeomapError, OutputFormat};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

const NOTES: &str = "File modification dates are shown as MM/DD/YYYY in UTC.";

/// Reports the known button jump tables found in DotEmu Neo Geo executables.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = NOTES, arg_required_else_help = true)]
struct Cli {
    /// An exe file, or a .txt file with one exe path per line
    path: PathBuf,

    /// Output format
    #[arg(value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    neomap::logging::init(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = Inspector::new(cli.format).run(&mut out, &cli.path);
    let _ = out.flush();

    match result {
        Ok(summary) => match summary.failures.first() {
            // A list run succeeds once the list itself was read
            Some(failure) if !is_path_list(&cli.path) => ExitCode::from(failure.exit_code),
            _ => ExitCode::SUCCESS,
        },
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<NeomapError>()
                .map(NeomapError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
