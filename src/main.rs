//! Terminal chat with DeepSeek.
//!
//! ## Usage
//!
//! ```shell
//! $ DEEPSEEK_API_KEY=sk-... redraft
//! ```
//!
//! The key may also be placed in a `.env` file. Type `quit` to exit.
//!
//! ## Key Bindings
//!
//! After each reply:
//! - Enter: keep the reply
//! - Backspace: edit the reply
//!
//! While editing:
//! - `-`: delete the 15 characters before the cursor
//! - `=`: insert a newline
//! - Enter: submit the edited reply

use std::process::ExitCode;

use redraft::{
    Client, Error,
    chat::Chat,
    config::Config,
    terminal::{self, Terminal},
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let client = Client::new(config.api())?;

    println!("{}", terminal::STARTUP_MARKER);

    Chat::new(client, Terminal::new()).run()
}

/// Logs to stderr, filtered by `RUST_LOG` (errors only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
