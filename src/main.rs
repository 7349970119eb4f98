// Entrypoint for the CLI application.
// - Sets up logging, builds the session and runs one subcommand.
// - Every failure comes back here as an error; this is the only place
//   that decides what gets printed and which exit code is used.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hvz_cli::api::ApiClient;
use hvz_cli::cli::{self, Cli};
use hvz_cli::commands::Session;
use hvz_cli::credentials::CredentialStore;
use hvz_cli::render::Renderer;
use hvz_cli::ui::{NoPrompt, Prompt, TerminalPrompt};
use hvz_cli::HvzError;

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match try_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: Cli) -> anyhow::Result<()> {
    let api = ApiClient::new(&args.api_url).context("Failed to set up the HvZ client")?;
    let credentials = CredentialStore::new(args.key_file.unwrap_or_else(CredentialStore::default_path));
    let interactive = !args.no_input && io::stdin().is_terminal();
    let session = Session {
        api,
        credentials,
        renderer: Renderer::local(),
        progress: io::stderr().is_terminal(),
    };

    let mut prompt: Box<dyn Prompt> = if interactive {
        Box::new(TerminalPrompt)
    } else {
        Box::new(NoPrompt)
    };
    let mut stdout = io::stdout().lock();
    cli::run(args.command, &session, prompt.as_mut(), &mut stdout)?;
    Ok(())
}

// Service messages (400 errors, 404) go to stdout as-is, the same stream
// as command output; client-side failures go to stderr with an `error:`
// prefix. `HvzError` messages already name their cause, other errors
// print their context chain.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<HvzError>() {
        Some(hvz) if hvz.is_service_message() => println!("{hvz}"),
        Some(hvz) => eprintln!("error: {hvz}"),
        None => eprintln!("error: {err:#}"),
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "hvz_cli=debug",
            _ => "hvz_cli=trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
