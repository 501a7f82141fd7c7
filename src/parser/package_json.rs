//! Parser for npm package.json files.
//!
//! This module locates and loads package.json files and extracts their
//! dependency categories into normalized [`Dependency`] records.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::types::{Dependency, DependencyMap, DependencyType, PackageJson};
use crate::config::InclusionMask;

/// The conventional manifest filename inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Errors that can occur while loading a package.json.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Nothing exists at the manifest path.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The manifest exists but cannot be opened.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other failure reading the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Returns true if a regular file exists at `path`.
///
/// Symlinks are followed. The file is not opened.
pub fn locate(path: &Path) -> bool {
    path.is_file()
}

/// Parses a package.json file from a file path.
///
/// I/O errors are classified so callers can tell a missing manifest apart
/// from one that exists but cannot be read.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use lsdeps::parser::package_json::parse_file;
///
/// let pkg = parse_file(Path::new("package.json")).unwrap();
/// println!("Package: {:?}", pkg.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path).map_err(|err| classify_io_error(path, err))?;
    trace!(path = %path.display(), bytes = content.len(), "read manifest");
    parse_str(&content)
}

/// Maps a filesystem error on `path` to a [`ParseError`].
///
/// Only a missing entry is [`ParseError::NotFound`]; a missing parent
/// component or a regular file used as a directory is an I/O error.
pub fn classify_io_error(path: &Path, err: io::Error) -> ParseError {
    match err.kind() {
        io::ErrorKind::NotFound => ParseError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ParseError::PermissionDenied(path.to_path_buf()),
        _ => ParseError::IoError(err),
    }
}

/// Parses a package.json from a string.
///
/// A leading byte-order mark is skipped.
///
/// # Example
///
/// ```
/// use lsdeps::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Returns the name → version mapping for one category.
///
/// Absent fields yield an empty map. Bundled dependencies are read from
/// `bundledDependencies` and then `bundleDependencies`; when a name is in
/// both, the first entry wins.
pub fn extract_category(pkg: &PackageJson, category: DependencyType) -> DependencyMap {
    match category {
        DependencyType::Production => pkg.dependencies.clone().unwrap_or_default(),
        DependencyType::Development => pkg.dev_dependencies.clone().unwrap_or_default(),
        DependencyType::Peer => pkg.peer_dependencies.clone().unwrap_or_default(),
        DependencyType::Optional => pkg.optional_dependencies.clone().unwrap_or_default(),
        DependencyType::Bundled => {
            let mut merged = DependencyMap::new();
            for alias in [&pkg.bundled_dependencies, &pkg.bundle_dependencies]
                .into_iter()
                .flatten()
            {
                for (name, version) in alias.resolve(pkg) {
                    merged.entry(name).or_insert(version);
                }
            }
            merged
        }
    }
}

/// Collects the dependencies of every category selected by `mask`.
///
/// Categories are visited production, dev, peer, bundled, optional. Names
/// are not de-duplicated across categories.
///
/// # Example
///
/// ```
/// use lsdeps::config::InclusionMask;
/// use lsdeps::parser::package_json::{collect, parse_str};
/// use lsdeps::parser::types::DependencyType;
///
/// let json = r#"{
///     "dependencies": {"react": "^18.0.0"},
///     "devDependencies": {"typescript": "^5.0.0"}
/// }"#;
///
/// let pkg = parse_str(json).unwrap();
/// let deps = collect(&pkg, InclusionMask::all());
///
/// assert_eq!(deps.len(), 2);
/// assert!(deps.iter().any(|d| d.name == "typescript" && d.dep_type == DependencyType::Development));
/// ```
pub fn collect(pkg: &PackageJson, mask: InclusionMask) -> Vec<Dependency> {
    let mut deps = Vec::new();

    for category in DependencyType::COLLECTION_ORDER {
        if !mask.contains(category) {
            continue;
        }

        let entries = extract_category(pkg, category);
        if entries.is_empty() {
            continue;
        }

        debug!(
            count = entries.len(),
            fields = ?category.field_names(),
            "loading {} dependencies",
            category
        );
        deps.extend(
            entries
                .into_iter()
                .map(|(name, version)| Dependency::new(name, version, category)),
        );
    }

    deps
}
