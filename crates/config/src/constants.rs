//! Default values shared across the funnel crates

/// Defaults for the turn orchestrator
pub mod agent {
    /// Turns kept in the rolling history passed to the reply generator
    pub const HISTORY_WINDOW: usize = 10;

    /// Directive key for the persona-level instructions
    pub const SYSTEM_DIRECTIVE_KEY: &str = "system";
}

/// Default file locations, relative to the working directory
pub mod paths {
    pub const CONFIG_DIR: &str = "config";
    pub const DIRECTIVES_DIR: &str = "config/directives";
    pub const CATALOG_PATH: &str = "config/catalog.yaml";
}

/// Offer defaults
pub mod offers {
    pub const DISCOUNT_CODE: &str = "JDate10";
    pub const COURSE_LIBRARY_LINK: &str = "https://www.jamiedatecoaching.com/courses";
}

/// Prefix for environment overrides (`SETTER_AGENT__AGENT__HISTORY_WINDOW=20`)
pub const ENV_PREFIX: &str = "SETTER_AGENT";
