// neomap - Button remapper entry point

use clap::Parser;
use neomap::patcher::SignatureAttempt;
use neomap::types::NEOGEO_BUTTONS;
use neomap::{validate_buttons, ButtonMapping, NeomapError, Patcher};
use std::path::PathBuf;
use std::process::ExitCode;

const EXAMPLE: &str = "\
For example, to update King of Fighters 2002 as follows:
  - Xbox X button is mapped to NeoGeo A button
  - Xbox A button is mapped to NeoGeo B button
  - Xbox Y button is mapped to NeoGeo C button
  - Xbox B button is mapped to NeoGeo D button
run the tool like so:
  neomap X A Y B c:\\path\\KingOfFighters2002.exe

A new, patched exe is written to the same folder as the original game.
Your original exe file won't be modified.";

/// neomap remaps controller buttons in DotEmu's Neo Geo games for Windows.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = EXAMPLE, arg_required_else_help = true)]
struct Cli {
    /// Xbox button (A, B, X or Y) mapped to NeoGeo button A
    a: String,

    /// Xbox button mapped to NeoGeo button B
    b: String,

    /// Xbox button mapped to NeoGeo button C
    c: String,

    /// Xbox button mapped to NeoGeo button D
    d: String,

    /// Full path to the DotEmu NeoGeo executable to patch
    exe_path: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    neomap::logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), NeomapError> {
    let letters = [&cli.a, &cli.b, &cli.c, &cli.d];

    println!("Checking inputs...");
    println!("\"{}\" is the exe to patch", cli.exe_path.display());
    for (letter, neogeo) in letters.iter().zip(NEOGEO_BUTTONS) {
        println!("Xbox button {} will be mapped to NeoGeo button {}", letter, neogeo);
    }

    let buttons = validate_buttons(&letters)?;
    let mapping = ButtonMapping::from_letters(&buttons);
    tracing::debug!("Mapping: {:?}", mapping.values());

    let outcome = match Patcher::new().patch_file(&cli.exe_path, &mapping) {
        Ok(outcome) => outcome,
        Err(err) => {
            print_rejected(err.rejected());
            return Err(err);
        }
    };

    print_rejected(&outcome.rejected);
    println!();
    println!("Trying patch for {}...", outcome.signature);
    for write in &outcome.writes {
        println!("byte at 0x{:08x} updated to 0x{:02x}", write.offset, write.value);
    }
    println!("Patched file written to \"{}\"", outcome.output.display());

    Ok(())
}

fn print_rejected(rejected: &[SignatureAttempt]) {
    for attempt in rejected {
        println!();
        println!("Trying patch for {}...", attempt.label);
        println!("{}", attempt.rejection);
    }
}
