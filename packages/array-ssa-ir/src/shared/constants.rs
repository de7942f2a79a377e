//! Centralized textual sentinels and defaults
//!
//! Every string the analysis synthesises (index placeholders, phi statement
//! text, versioned names) is built from these.

/// Naming of versioned arrays and synthesised statements
pub mod naming {
    /// Index text carried by nodes that define an array without indexing it
    /// (creation, rename)
    pub const NEW_ARRAY_INDEX: &str = "NEW_ARRAY";

    /// Separator between base name and version number (`a_3`)
    pub const VERSION_SEPARATOR: &str = "_";

    /// Function name used in synthesised phi statements
    pub const PHI_FUNCTION: &str = "phi";

    /// Suffix of def node identifiers
    pub const DEF_SUFFIX: &str = "DEF";

    /// Suffix of use node identifiers
    pub const USE_SUFFIX: &str = "USE";
}

/// Loop worklist defaults
pub mod worklist {
    /// Default cap on worklist pops for a single loop
    pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

    /// Smallest accepted cap
    pub const MIN_MAX_ITERATIONS: usize = 1;

    /// Largest accepted cap
    pub const MAX_MAX_ITERATIONS: usize = 10_000_000;
}

/// Configuration file schema
pub mod schema {
    /// Supported YAML schema versions
    pub const SUPPORTED_VERSIONS: &[u32] = &[1];
}
