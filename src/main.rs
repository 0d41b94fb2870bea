//! `navicfg`: view and edit a Navidrome configuration file from the terminal.
//!
//! ```sh
//! navicfg                          # grouped view of ./navidrome.toml
//! navicfg set Port=4600 AutoScan=false
//! navicfg edit                     # walk through every setting
//! navicfg --file /etc/navidrome/navidrome.toml raw
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use navicfg::{Cli, Command, ConfigResult, NavicfgError, Session, prompt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("NAVICFG_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), NavicfgError> {
    let mut session = cli.open()?;
    let json = cli.json;

    match cli.command.unwrap_or(Command::Show).into_action() {
        Some(action) => {
            let result = session.handle(&action)?;
            print_result(&result, json);
            Ok(())
        }
        None => edit(&mut session),
    }
}

fn print_result(result: &ConfigResult, json: bool) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                tracing::warn!("could not encode result as JSON: {e}");
                print!("{result}");
            }
        }
    } else {
        print!("{result}");
    }
}

fn edit(session: &mut Session) -> Result<(), NavicfgError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    writeln!(output, "Editing {}", session.path().display()).map_err(NavicfgError::Prompt)?;
    writeln!(output, "Press Enter to keep a value.").map_err(NavicfgError::Prompt)?;

    let mut form = session.form();
    prompt::edit_form(&mut form, &mut input, &mut output)?;

    let question = format!("\nSave to {}?", session.path().display());
    if prompt::confirm(&question, true, &mut input, &mut output)? {
        session.commit(&form)?;
        writeln!(output, "Configuration saved to {}", session.path().display())
            .map_err(NavicfgError::Prompt)?;
    } else {
        writeln!(output, "Nothing written.").map_err(NavicfgError::Prompt)?;
    }
    Ok(())
}
