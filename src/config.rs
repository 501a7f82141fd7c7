//! Runtime configuration for a listing run.
//!
//! Everything the pipeline needs to know is carried in a [`ListerConfig`]
//! built once at startup and passed down explicitly.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::parser::package_json::MANIFEST_FILE;
use crate::parser::types::DependencyType;

/// The set of dependency categories selected for listing.
///
/// Stored as a bitmask with one bit per [`DependencyType`]. The default
/// mask selects every category.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InclusionMask(u8);

impl InclusionMask {
    const fn bit(category: DependencyType) -> u8 {
        match category {
            DependencyType::Production => 1 << 0,
            DependencyType::Development => 1 << 1,
            DependencyType::Peer => 1 << 2,
            DependencyType::Optional => 1 << 3,
            DependencyType::Bundled => 1 << 4,
        }
    }

    /// A mask selecting no categories.
    pub const fn none() -> Self {
        Self(0)
    }

    /// A mask selecting every category.
    pub fn all() -> Self {
        DependencyType::COLLECTION_ORDER.into_iter().collect()
    }

    /// Returns a copy of this mask with `category` added.
    pub fn with(self, category: DependencyType) -> Self {
        Self(self.0 | Self::bit(category))
    }

    /// Returns a copy of this mask with `category` removed.
    pub fn without(self, category: DependencyType) -> Self {
        Self(self.0 & !Self::bit(category))
    }

    /// Returns true if `category` is selected.
    pub fn contains(&self, category: DependencyType) -> bool {
        self.0 & Self::bit(category) != 0
    }

    /// Returns true if no category is selected.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Builds a mask from `--include` and `--omit` style selections.
    ///
    /// An empty `include` list means every category. Omissions are applied
    /// afterwards, so omitting a category always wins.
    pub fn from_selection(include: &[DependencyType], omit: &[DependencyType]) -> Self {
        let base = if include.is_empty() {
            Self::all()
        } else {
            include.iter().copied().collect()
        };
        omit.iter().fold(base, |mask, &category| mask.without(category))
    }

    /// The selected categories, in collection order.
    pub fn categories(&self) -> impl Iterator<Item = DependencyType> + '_ {
        DependencyType::COLLECTION_ORDER
            .into_iter()
            .filter(move |c| self.contains(*c))
    }
}

impl fmt::Debug for InclusionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.categories().map(|c| c.field_names()[0]))
            .finish()
    }
}

impl Default for InclusionMask {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<DependencyType> for InclusionMask {
    fn from_iter<I: IntoIterator<Item = DependencyType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

/// How much diagnostic output to emit on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// No logging and no failure report.
    Silent,
    /// Warnings and the failure report only.
    #[default]
    Normal,
    /// Progress messages for each loaded category.
    Verbose,
    /// Everything, including error detail and trace events.
    Debug,
}

impl Verbosity {
    /// Resolves the command-line flags into a single level.
    ///
    /// `silent` overrides the other two; `debug` implies `verbose`.
    pub fn from_flags(verbose: bool, silent: bool, debug: bool) -> Self {
        if silent {
            Verbosity::Silent
        } else if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// The default `tracing` filter directive for this level.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
            Verbosity::Debug => "trace",
        }
    }
}

/// Configuration for one invocation of the lister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListerConfig {
    /// Directory expected to contain the manifest.
    pub package_dir: PathBuf,
    /// Categories to list.
    pub include: InclusionMask,
    /// Diagnostic level.
    pub verbosity: Verbosity,
}

impl ListerConfig {
    /// Creates a config for `package_dir` with every category selected.
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
            include: InclusionMask::all(),
            verbosity: Verbosity::default(),
        }
    }

    /// Path of the manifest inside the package directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.package_dir.join(MANIFEST_FILE)
    }

    /// The package directory as given.
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
