//! Envi - capture, restore and share .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envi::cli::output;
use envi::cli::{execute, Cli};
use envi::error::{CipherError, Error, RepoError, StoreError};

fn main() {
    let cli = Cli::parse();

    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("ENVI_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envi=debug")
        } else {
            EnvFilter::new("envi=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.yes) {
        if matches!(e, Error::Repo(RepoError::Cancelled)) {
            output::info("cancelled");
            std::process::exit(1);
        }

        let suggestion = match &e {
            Error::Cipher(CipherError::Authentication) => Some("try again with --secret"),
            Error::Store(StoreError::NotFound(_)) => Some("run: envi capture"),
            Error::Repo(RepoError::NoEnvFiles(_)) => Some("add a .env file first"),
            Error::NoSecret => Some("pass --secret or set ENVI_SECRET"),
            Error::InvalidBlob => Some("paste everything from __envi_start__ to __envi_end__"),
            Error::EnvFile { .. } => Some("check the file is readable UTF-8 text"),
            Error::Clipboard(_) => Some("pass the blob as an argument, with --file or on stdin"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
