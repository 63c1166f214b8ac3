use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::actions::{perform, Action};
use crate::cli::globals::GlobalArgs;
use crate::config::load_config;
use crate::startup::build_state;
use crate::utils::logger::init_logging;

/// Execute the provided action.
///
/// Loads config, sets up logging and builds the shared state, then hands
/// the action to [`perform`] and prints what it returns.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let mut config = load_config(&globals.config)
        .with_context(|| format!("failed to load config from {}", globals.config.display()))?;
    if let Some(level) = &globals.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging)?;

    let state = build_state(Arc::new(config))?;
    let output = perform(action, &state).await?;
    print!("{}", output);
    Ok(())
}
