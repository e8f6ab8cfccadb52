//! Project manifests.
//!
//! A repository's manifest file (package.json, Cargo.toml, go.mod, ...)
//! names the project's store document and doubles as the shared secret for
//! blobs: anyone with an identical manifest can open them.

use std::path::Path;

use regex::Regex;
use tracing::{debug, trace};

use crate::core::cipher::derive_secret;
use crate::core::config::Config;
use crate::error::Result;

/// `module github.com/acme/api` in go.mod.
const GO_MODULE_REGEX: &str = r"(?m)^module\s+(\S+)\s*$";

/// `rootProject.name = "app"` in Gradle settings.
const GRADLE_NAME_REGEX: &str = r#"rootProject\.name\s*=\s*["']([^"']+)["']"#;

/// Blocks whose `artifactId` is not the project's own.
const POM_NESTED_REGEX: &str = r"(?s)<!--.*?-->|<parent>.*?</parent>";

const POM_ARTIFACT_REGEX: &str = r"<artifactId>\s*([^<\s]+)\s*</artifactId>";

/// Secret derived from a manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSecret {
    /// Manifest filename the secret came from.
    pub file: String,
    /// Derived secret passed to the cipher.
    pub secret: String,
}

/// Extract a package name from a manifest's contents.
///
/// Returns `None` for unknown manifests, unparseable contents or a missing
/// or empty name.
pub fn extract_name(filename: &str, contents: &str) -> Option<String> {
    let name = match filename {
        "package.json" | "composer.json" => from_json(contents),
        "go.mod" => from_go_mod(contents),
        "Cargo.toml" => from_toml(contents, "package"),
        "pyproject.toml" => from_toml(contents, "project"),
        "pubspec.yaml" => from_yaml(contents),
        "settings.gradle.kts" | "settings.gradle" => from_gradle(contents),
        "pom.xml" => from_pom(contents),
        _ => None,
    }?;

    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn from_json(contents: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(contents).ok()?;
    value.get("name")?.as_str().map(str::to_string)
}

fn from_go_mod(contents: &str) -> Option<String> {
    let re = Regex::new(GO_MODULE_REGEX).ok()?;
    let module = re.captures(contents)?.get(1)?.as_str();
    module.rsplit('/').next().map(str::to_string)
}

fn from_toml(contents: &str, table: &str) -> Option<String> {
    let value: toml::Value = toml::from_str(contents).ok()?;
    value.get(table)?.get("name")?.as_str().map(str::to_string)
}

fn from_yaml(contents: &str) -> Option<String> {
    let value: serde_yaml::Value = serde_yaml::from_str(contents).ok()?;
    value.get("name")?.as_str().map(str::to_string)
}

fn from_gradle(contents: &str) -> Option<String> {
    let re = Regex::new(GRADLE_NAME_REGEX).ok()?;
    Some(re.captures(contents)?.get(1)?.as_str().to_string())
}

fn from_pom(contents: &str) -> Option<String> {
    let nested = Regex::new(POM_NESTED_REGEX).ok()?;
    let artifact = Regex::new(POM_ARTIFACT_REGEX).ok()?;

    let stripped = nested.replace_all(contents, "");
    Some(artifact.captures(&stripped)?.get(1)?.as_str().to_string())
}

/// Package name from the first manifest in `config` that yields one.
pub fn package_name(root: &Path, config: &Config) -> Option<String> {
    for filename in &config.manifest_files {
        let Ok(contents) = std::fs::read_to_string(root.join(filename)) else {
            continue;
        };

        if let Some(name) = extract_name(filename, &contents) {
            debug!(manifest = %filename, name = %name, "package name found");
            return Some(name);
        }
        trace!(manifest = %filename, "no package name in manifest");
    }

    None
}

/// Store document name: the package name, else the repository folder name.
pub fn storage_name(root: &Path, package: Option<&str>) -> String {
    match package {
        Some(name) => name.to_string(),
        None => folder_name(root),
    }
}

fn folder_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Secret derived from the first manifest in `config` present in `root`.
///
/// The whole file is hashed, so any edit to the manifest changes the
/// secret.
///
/// # Errors
///
/// Returns an I/O error if an existing manifest cannot be read.
pub fn manifest_secret(root: &Path, config: &Config) -> Result<Option<ManifestSecret>> {
    for filename in &config.manifest_files {
        let path = root.join(filename);
        if !path.is_file() {
            continue;
        }

        let bytes = std::fs::read(&path)?;
        debug!(manifest = %filename, bytes = bytes.len(), "deriving manifest secret");

        return Ok(Some(ManifestSecret {
            file: filename.clone(),
            secret: derive_secret(&bytes),
        }));
    }

    Ok(None)
}
