//! Command-line interface.

pub mod capture;
pub mod clear;
pub mod clipboard;
pub mod completions;
pub mod config;
pub mod output;
pub mod pack;
pub mod project;
pub mod prompt;
pub mod restore;
pub mod unpack;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Envi - capture, restore and share .env files.
#[derive(Parser)]
#[command(
    name = "envi",
    about = "Capture, restore and share .env files as encrypted blobs",
    version,
    after_help = "Paste-safe secrets for your whole team."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Save this repository's .env files to the local store
    Capture,

    /// Write stored .env files back into this repository
    Restore {
        /// Overwrite changed files without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt this repository's .env files into a shareable blob
    Pack {
        /// Encryption secret (defaults to one derived from the manifest file)
        #[arg(short, long, env = "ENVI_SECRET", hide_env_values = true)]
        secret: Option<String>,

        /// Write the blob to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Copy the blob to the clipboard (default when stdout is a terminal)
        #[arg(short, long, conflicts_with = "output")]
        clipboard: bool,
    },

    /// Decrypt a blob and restore its .env files
    Unpack {
        /// The blob text (read from the clipboard, --file or stdin if omitted)
        blob: Option<String>,

        /// Read the blob from a file
        #[arg(long, value_name = "FILE", conflicts_with = "blob")]
        file: Option<PathBuf>,

        /// Read the blob from the clipboard
        #[arg(short, long, conflicts_with_all = ["blob", "file"])]
        clipboard: bool,

        /// Decryption secret, tried after the manifest-derived one
        #[arg(short, long, env = "ENVI_SECRET", hide_env_values = true)]
        secret: Option<String>,

        /// Overwrite changed files without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Delete this repository's stored configuration
    Clear {
        /// Delete without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Manage global configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Elvish,
    PowerShell,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Variables whose values are never stored or shared
    Redact {
        #[command(subcommand)]
        action: RedactAction,
    },

    /// Manifest files used for the project name and encryption secret
    ManifestFiles {
        #[command(subcommand)]
        action: ManifestAction,
    },
}

/// Redaction list subcommands.
#[derive(Subcommand)]
pub enum RedactAction {
    /// Redact a variable
    Add {
        /// Variable name (case-sensitive)
        name: String,
    },

    /// Stop redacting a variable
    #[command(alias = "rm")]
    Remove {
        /// Variable name
        name: String,
    },

    /// List redacted variables
    #[command(alias = "ls")]
    List,
}

/// Manifest file list subcommands.
#[derive(Subcommand)]
pub enum ManifestAction {
    /// Append a manifest file to the search order
    Add {
        /// File name relative to the repository root
        filename: String,
    },

    /// Remove a manifest file from the search order
    #[command(alias = "rm")]
    Remove {
        /// File name
        filename: String,
    },

    /// List manifest files in search order
    #[command(alias = "ls")]
    List,
}

/// Execute a command.
pub fn execute(command: Command, yes: bool) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Capture => capture::execute(yes),
        Restore { force } => restore::execute(yes, force),
        Pack {
            secret,
            output,
            clipboard,
        } => pack::execute(yes, secret, output.as_deref(), clipboard),
        Unpack {
            blob,
            file,
            clipboard,
            secret,
            force,
        } => unpack::execute(unpack::Options {
            blob,
            file: file.as_deref(),
            clipboard,
            secret,
            yes,
            force,
        }),
        Clear { force } => clear::execute(yes, force),
        Config { action } => match action {
            ConfigAction::Redact { action } => config::redact(action),
            ConfigAction::ManifestFiles { action } => config::manifest_files(action),
        },
        Completions { shell } => completions::execute(shell),
    }
}
