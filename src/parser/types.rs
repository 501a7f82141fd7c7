//! Shared types for dependency parsing.
//!
//! This module defines the manifest shape read from `package.json` and the
//! normalized dependency records produced from it.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Name → version specifier mapping as it appears in a manifest field.
pub type DependencyMap = BTreeMap<String, String>;

/// Represents the structure of a package.json file.
///
/// Only the fields needed to list dependencies are captured; everything
/// else in the document is ignored.
///
/// # Example
///
/// ```
/// use lsdeps::parser::types::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package.
    pub version: Option<String>,

    /// A brief description of the package.
    pub description: Option<String>,

    /// Production dependencies required at runtime.
    pub dependencies: Option<DependencyMap>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<DependencyMap>,

    /// Peer dependencies that the host package must provide.
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<DependencyMap>,

    /// Optional dependencies that enhance functionality if available.
    #[serde(rename = "optionalDependencies")]
    pub optional_dependencies: Option<DependencyMap>,

    /// Dependencies shipped inside the package tarball.
    #[serde(rename = "bundledDependencies")]
    pub bundled_dependencies: Option<BundledDependencies>,

    /// Legacy spelling of `bundledDependencies`.
    #[serde(rename = "bundleDependencies")]
    pub bundle_dependencies: Option<BundledDependencies>,
}

impl PackageJson {
    /// Returns the total count of declared dependency entries.
    ///
    /// Bundled entries are counted per alias, so a name listed under both
    /// spellings counts twice here.
    pub fn dependency_count(&self) -> usize {
        let map_len = |m: &Option<DependencyMap>| m.as_ref().map_or(0, BTreeMap::len);
        let bundled_len = |b: &Option<BundledDependencies>| {
            b.as_ref().map_or(0, |b| b.resolve(self).len())
        };

        map_len(&self.dependencies)
            + map_len(&self.dev_dependencies)
            + map_len(&self.peer_dependencies)
            + map_len(&self.optional_dependencies)
            + bundled_len(&self.bundled_dependencies)
            + bundled_len(&self.bundle_dependencies)
    }
}

/// The accepted shapes of a bundled-dependencies field.
///
/// npm documents an array of names, with `true` meaning "bundle every
/// production dependency". Some manifests use a name → version object
/// like the other dependency fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BundledDependencies {
    Map(DependencyMap),
    List(Vec<String>),
    All(bool),
}

impl BundledDependencies {
    /// Resolves this field into a name → version mapping.
    ///
    /// Names given as a list take their version from `dependencies`, then
    /// `optionalDependencies`, falling back to an empty specifier.
    pub fn resolve(&self, pkg: &PackageJson) -> DependencyMap {
        match self {
            BundledDependencies::Map(map) => map.clone(),
            BundledDependencies::List(names) => names
                .iter()
                .map(|name| {
                    let version = [&pkg.dependencies, &pkg.optional_dependencies]
                        .into_iter()
                        .flatten()
                        .find_map(|m| m.get(name))
                        .cloned()
                        .unwrap_or_default();
                    (name.clone(), version)
                })
                .collect(),
            BundledDependencies::All(true) => pkg.dependencies.clone().unwrap_or_default(),
            BundledDependencies::All(false) => DependencyMap::new(),
        }
    }
}

/// Categorizes the type of dependency relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyType {
    /// Production dependencies - required at runtime.
    Production,

    /// Development dependencies - only needed during development.
    Development,

    /// Peer dependencies - expected to be provided by the consumer.
    Peer,

    /// Optional dependencies - installation continues if they fail.
    Optional,

    /// Bundled dependencies - shipped inside the package tarball.
    Bundled,
}

impl DependencyType {
    /// Every category, in the order they are collected.
    pub const COLLECTION_ORDER: [DependencyType; 5] = [
        DependencyType::Production,
        DependencyType::Development,
        DependencyType::Peer,
        DependencyType::Bundled,
        DependencyType::Optional,
    ];

    /// The manifest field(s) this category is read from.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            DependencyType::Production => &["dependencies"],
            DependencyType::Development => &["devDependencies"],
            DependencyType::Peer => &["peerDependencies"],
            DependencyType::Optional => &["optionalDependencies"],
            DependencyType::Bundled => &["bundledDependencies", "bundleDependencies"],
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
            DependencyType::Peer => "peer",
            DependencyType::Optional => "optional",
            DependencyType::Bundled => "bundled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for DependencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Ok(DependencyType::Production),
            "dev" | "development" => Ok(DependencyType::Development),
            "peer" => Ok(DependencyType::Peer),
            "optional" => Ok(DependencyType::Optional),
            "bundled" | "bundle" => Ok(DependencyType::Bundled),
            _ => Err(format!(
                "Unknown dependency category: '{}'. Valid categories: prod, dev, peer, optional, bundled",
                s
            )),
        }
    }
}

/// A single dependency with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// The package name (e.g., "react", "lodash").
    pub name: String,

    /// The version specifier (e.g., "^18.0.0", "~1.2.3"), kept opaque.
    pub version: String,

    /// The category of this dependency.
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dep_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.dep_type)
    }
}
