use std::path::PathBuf;

/// Options that apply to every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub config: PathBuf,
    /// Overrides `logging.level` from the config file when set.
    pub log_level: Option<String>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            log_level: None,
        }
    }
}
