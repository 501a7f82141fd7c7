//! The listing pipeline: locate, load, collect, render.
//!
//! [`list`] runs the whole pipeline against a [`ListerConfig`]. Nothing is
//! written to the output unless the manifest loads successfully.

use std::fs;
use std::io::{self, IsTerminal, Write};

use crossterm::style::Stylize;
use tracing::{debug, info};

use crate::config::{ListerConfig, Verbosity};
use crate::parser::package_json::{self, ParseError, MANIFEST_FILE};
use crate::parser::{Dependency, PackageJson};
use crate::render::render;

/// Errors that stop a listing run.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The manifest could not be read or parsed.
    #[error(transparent)]
    Manifest(#[from] ParseError),

    /// Something other than a regular file sits at the manifest path.
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(std::path::PathBuf),

    /// Writing the listing failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl ListError {
    /// Returns true if the manifest does not exist at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ListError::Manifest(ParseError::NotFound(_)))
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Locates and loads the manifest named by `config`.
pub fn load_manifest(config: &ListerConfig) -> Result<PackageJson, ListError> {
    let path = config.manifest_path();
    debug!(dir = %config.package_dir().display(), "looking for {}", MANIFEST_FILE);

    if !package_json::locate(&path) {
        return Err(match fs::metadata(&path) {
            Ok(_) => ListError::NotAFile(path),
            Err(err) => package_json::classify_io_error(&path, err).into(),
        });
    }

    let pkg = package_json::parse_file(&path)?;
    info!(
        name = pkg.name.as_deref().unwrap_or("<unnamed>"),
        version = pkg.version.as_deref().unwrap_or("<none>"),
        declared = pkg.dependency_count(),
        "loaded manifest"
    );
    Ok(pkg)
}

/// Runs the pipeline and returns the records that were written.
pub fn list<W: Write>(config: &ListerConfig, out: &mut W) -> Result<Vec<Dependency>, ListError> {
    let pkg = load_manifest(config)?;

    debug!(categories = ?config.include, "selected categories");
    let mut records = package_json::collect(&pkg, config.include);
    debug!(count = records.len(), "collected dependencies");

    render(&mut records, out).map_err(ListError::Output)?;
    Ok(records)
}

/// Writes the two-line failure report to `writer`.
///
/// The first line is always the same; the second names the missing manifest
/// or describes the failure. Extra error detail is added at
/// [`Verbosity::Debug`]. Nothing is written when silent.
pub fn report_failure<W: Write>(
    err: &ListError,
    verbosity: Verbosity,
    styled: bool,
    writer: &mut W,
) -> io::Result<()> {
    if verbosity == Verbosity::Silent {
        return Ok(());
    }

    let headline = "Must be called from within a node package directory.";
    let detail = if err.is_not_found() {
        format!("Failed to find `{}`.", MANIFEST_FILE)
    } else {
        format!("Failed to read `{}`: {}", MANIFEST_FILE, err)
    };

    if styled {
        writeln!(writer, "{}", headline.red())?;
        if err.is_not_found() {
            writeln!(writer, "{}", detail.bold().blue())?;
        } else {
            writeln!(writer, "{}", detail)?;
        }
    } else {
        writeln!(writer, "{}", headline)?;
        writeln!(writer, "{}", detail)?;
    }

    if verbosity == Verbosity::Debug {
        writeln!(writer, "{:?}", err)?;
    }
    Ok(())
}

/// Reports `err` on stderr, styled when stderr is a terminal.
pub fn report_to_stderr(err: &ListError, verbosity: Verbosity) {
    let stderr = io::stderr();
    let styled = stderr.is_terminal();
    // Nothing useful can be done if stderr itself is gone.
    let _ = report_failure(err, verbosity, styled, &mut stderr.lock());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InclusionMask;
    use crate::parser::DependencyType;
    use std::path::PathBuf;

    fn package_dir(manifest: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), manifest).unwrap();
        dir
    }

    fn run(config: &ListerConfig) -> (Result<Vec<Dependency>, ListError>, String) {
        let mut out = Vec::new();
        let result = list(config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn report(err: &ListError, verbosity: Verbosity) -> String {
        let mut buf = Vec::new();
        report_failure(err, verbosity, false, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_production_and_dev() {
        let dir = package_dir(r#"{"dependencies":{"a":"1.0.0"},"devDependencies":{"b":"2.0.0"}}"#);
        let (result, out) = run(&ListerConfig::new(dir.path()));

        assert_eq!(result.unwrap().len(), 2);
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_list_merges_and_sorts_categories() {
        let dir = package_dir(r#"{"peerDependencies":{"z":"*"},"dependencies":{"a":"1.0.0"}}"#);
        let (_, out) = run(&ListerConfig::new(dir.path()));

        assert_eq!(out, "a\nz\n");
    }

    #[test]
    fn test_list_empty_manifest() {
        let dir = package_dir("{}");
        let (result, out) = run(&ListerConfig::new(dir.path()));

        assert!(result.unwrap().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_bundled_alias_appears_once() {
        let dir = package_dir(
            r#"{"bundledDependencies":{"x":"1.0.0"},"bundleDependencies":{"x":"1.0.0","y":"1.0.0"}}"#,
        );
        let (_, out) = run(&ListerConfig::new(dir.path()));

        assert_eq!(out, "x\ny\n");
    }

    #[test]
    fn test_list_with_mask() {
        let dir = package_dir(r#"{"dependencies":{"a":"1"},"peerDependencies":{"p":"2"}}"#);
        let config = ListerConfig {
            include: InclusionMask::none().with(DependencyType::Peer),
            ..ListerConfig::new(dir.path())
        };
        let (_, out) = run(&config);

        assert_eq!(out, "p\n");
    }

    #[test]
    fn test_list_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run(&ListerConfig::new(dir.path()));

        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.exit_code(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_invalid_manifest() {
        let dir = package_dir("{ not json");
        let (result, out) = run(&ListerConfig::new(dir.path()));

        let err = result.unwrap_err();
        assert!(matches!(err, ListError::Manifest(ParseError::JsonError(_))));
        assert!(!err.is_not_found());
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_manifest_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(MANIFEST_FILE)).unwrap();
        let (result, _) = run(&ListerConfig::new(dir.path()));

        assert!(matches!(result.unwrap_err(), ListError::NotAFile(_)));
    }

    #[test]
    fn test_list_path_is_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        fs::write(&plain, "not a directory").unwrap();

        let (result, out) = run(&ListerConfig::new(&plain));
        let err = result.unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(err, ListError::Manifest(ParseError::IoError(_))));
        assert!(report(&err, Verbosity::Normal).contains("Failed to read `package.json`"));
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_unreadable_package_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = package_dir("{}");
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores directory modes.
        let blocked = fs::metadata(dir.path().join(MANIFEST_FILE)).is_err();
        let result = load_manifest(&ListerConfig::new(dir.path()));
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
        if !blocked {
            return;
        }

        let err = result.unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, ListError::Manifest(ParseError::PermissionDenied(_))));
    }

    #[test]
    fn test_report_not_found() {
        let err = ListError::from(ParseError::NotFound(PathBuf::from("package.json")));
        let text = report(&err, Verbosity::Normal);

        assert_eq!(
            text,
            "Must be called from within a node package directory.\nFailed to find `package.json`.\n"
        );
    }

    #[test]
    fn test_report_generic_failure() {
        let err = ListError::NotAFile(PathBuf::from("package.json"));
        let text = report(&err, Verbosity::Normal);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Must be called from within a node package directory.");
        assert!(lines[1].starts_with("Failed to read `package.json`: Not a regular file"));
    }

    #[test]
    fn test_report_silent_and_debug() {
        let err = ListError::from(ParseError::NotFound(PathBuf::from("package.json")));

        assert!(report(&err, Verbosity::Silent).is_empty());
        assert_eq!(report(&err, Verbosity::Debug).lines().count(), 3);
    }
}
