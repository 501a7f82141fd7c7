//! Parser module for lsdeps.
//!
//! This module reads npm `package.json` manifests and turns their
//! dependency fields into [`Dependency`] records.
//!
//! # Example
//!
//! ```
//! use lsdeps::config::InclusionMask;
//! use lsdeps::parser::{collect, parse_str, DependencyType};
//!
//! let pkg = parse_str(r#"{"dependencies": {"react": "^18.0.0"}}"#).unwrap();
//!
//! // Production dependencies only
//! let mask = InclusionMask::none().with(DependencyType::Production);
//! let deps = collect(&pkg, mask);
//!
//! assert_eq!(deps[0].name, "react");
//! ```

pub mod package_json;
pub mod types;

// Re-export commonly used types for convenience
pub use package_json::{
    collect, extract_category, locate, parse_file, parse_str, ParseError, ParseResult,
    MANIFEST_FILE,
};

pub use types::{BundledDependencies, Dependency, DependencyMap, DependencyType, PackageJson};
