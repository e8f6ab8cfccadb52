//! Envi - capture, restore and share .env files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── capture       # Save .env files to the local store
//! │   ├── restore       # Write stored files back
//! │   ├── pack          # Encrypt files into a blob
//! │   ├── unpack        # Decrypt a blob and restore it
//! │   ├── clear         # Delete the stored document
//! │   ├── config        # Redaction list and manifest files
//! │   ├── completions   # Shell completions
//! │   └── clipboard     # Blob transport over the system clipboard
//! └── core/             # Core library components
//!     ├── domain/       # Env (parsed .env file) and StoreDocument
//!     ├── redact        # Placeholder substitution and merge
//!     ├── cipher/       # Key derivation, AES-GCM envelope, blob framing
//!     ├── manifest      # Project names and manifest secrets
//!     ├── repo          # Repository root and .env discovery
//!     ├── store/        # ~/.envi/store documents
//!     └── config        # ~/.envi/config.toml
//! ```
//!
//! # Example
//!
//! ```
//! use envi::core::cipher::{self, format_blob, parse_blob};
//! use envi::core::domain::Env;
//!
//! let env = Env::parse("API_URL=https://example.com # prod\n");
//! assert_eq!(env.get("API_URL"), Some("https://example.com"));
//!
//! let blob = format_blob(&cipher::encrypt(&env.to_env_string(), "a shared secret").unwrap());
//! let envelope = parse_blob(&blob.replace('\n', "\r\n    ")).unwrap();
//! let text = cipher::decrypt(&envelope, "a shared secret").unwrap();
//! assert_eq!(Env::parse(&text), env);
//! ```

pub mod cli;
pub mod core;
pub mod error;
