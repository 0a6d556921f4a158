//! Global Constants
//!
//! Centralized constants for discovery, rendering, and configuration.

/// Stem of a package's initializer module
pub const INIT_MODULE: &str = "__init__";

/// Package discovery constants
pub mod discovery {
    /// Source root used when none is configured
    pub const DEFAULT_SOURCE_ROOT: &str = ".";

    /// Output directory used when none is configured
    pub const DEFAULT_OUTPUT_DIR: &str = "docs";
}

/// Rendering constants
pub mod render {
    /// Page file written for the TSX format
    pub const TSX_PAGE_FILE: &str = "page.tsx";

    /// Page file written for the Markdown format
    pub const MARKDOWN_PAGE_FILE: &str = "page.md";

    /// Module the generated TSX page imports its components from
    pub const DEFAULT_COMPONENTS_IMPORT: &str = "@/components/DocComponents";

    /// JSON indentation inside generated TSX pages
    pub const JSON_INDENT: &[u8] = b"  ";
}

/// Configuration file constants
pub mod config {
    /// Project configuration file looked up in the working directory
    pub const CONFIG_FILE: &str = "docpages.toml";

    /// Prefix for environment variable overrides
    pub const ENV_PREFIX: &str = "DOCPAGES_";

    /// Environment variable overriding the configuration file path
    pub const CONFIG_PATH_ENV: &str = "DOCPAGES_CONFIG";
}
