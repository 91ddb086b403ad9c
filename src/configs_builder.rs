// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Configuration Builder
//!
//! This module provides the `ConfigBuilder`, the single entry point that turns the ambient
//! configuration of a process into a [`ValidatedEnv`].
//!
//! ## Architecture
//!
//! The builder works in three phases:
//!
//! 1. **Initialization**: callers create a builder and optionally point it at a directory
//!    of `.env` files, hand it an explicit source, or state whether secrets are reachable.
//!
//! 2. **Environment Loading**: unless an explicit source was given, the builder parses the
//!    `.env` files that apply to the current tier and layers them beneath the process
//!    environment. The process environment itself is never modified.
//!
//! 3. **Validation**: the public group is validated, then the secret group (only where
//!    secrets are reachable), and the results are merged into one immutable value.
//!
//! A failure in any phase is returned as a [`ConfigurationError`] and no partial
//! configuration is produced.

use crate::{
    env_keys::{BASE_ENV_FILE_NAME, LOCAL_ENV_FILE_NAME},
    environment::{AppEnvironment, ExecutionContext},
    errors::ConfigurationError,
    source::{EnvSource, LayeredSource, MapSource, ProcessEnv},
    validated::ValidatedEnv,
    validation::validate_env,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Builds the validated environment.
///
/// # Example
///
/// ```no_run
/// use tax_portal_env::ConfigBuilder;
///
/// let env = ConfigBuilder::new().env_dir("./web").build()?;
///
/// if env.is_production() {
///     // ...
/// }
/// # Ok::<(), tax_portal_env::errors::ConfigurationError>(())
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    source: Option<Box<dyn EnvSource>>,
    env_dir: Option<PathBuf>,
    context: Option<ExecutionContext>,
}

impl ConfigBuilder {
    /// Creates a builder that reads `.env` files from the working directory and detects the
    /// execution context from the compilation target.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates against `source` instead of the process environment and `.env` files.
    pub fn with_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Directory holding the `.env` files. Defaults to the working directory.
    pub fn env_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.env_dir = Some(dir.into());
        self
    }

    /// States whether secret values are reachable where this configuration is used.
    ///
    /// Overrides the target-based detection of [`ExecutionContext::detect`].
    pub fn secrets_reachable(mut self, reachable: bool) -> Self {
        self.context = Some(ExecutionContext::from_secrets_reachable(reachable));
        self
    }

    /// Loads the process environment layered over the `.env` files for the current tier.
    ///
    /// The tier is the first `NEXT_PUBLIC_APP_ENV` found in the process environment,
    /// `.env.local` or `.env`, falling back to development. Precedence, highest first:
    /// - the process environment
    /// - `.env.{tier}.local`
    /// - `.env.local`
    /// - `.env.{tier}`
    /// - `.env`
    ///
    /// Files that do not exist are skipped.
    pub fn load_envs(&self) -> Result<LayeredSource, ConfigurationError> {
        self.load_env_layers().map(|(layered, _)| layered)
    }

    /// Loads the sources and validates them.
    ///
    /// When the sources come from `.env` files, the validated tier must be the one the
    /// tier-specific files were chosen for; a tier file that declares a different tier
    /// fails with [`ConfigurationError::TierMismatch`].
    pub fn build(mut self) -> Result<ValidatedEnv, ConfigurationError> {
        let context = self.context.unwrap_or_else(ExecutionContext::detect);

        let (source, selected): (Box<dyn EnvSource>, Option<AppEnvironment>) =
            match self.source.take() {
                Some(source) => (source, None),
                None => {
                    let (layered, tier) = self.load_env_layers()?;
                    (Box::new(layered), Some(tier))
                }
            };

        let env = validate_env(&*source, context)?;

        match selected {
            Some(selected) if selected != env.tier() => {
                error!(
                    selected = selected.as_str(),
                    declared = env.tier().as_str(),
                    "env files were loaded for another tier"
                );
                Err(ConfigurationError::TierMismatch {
                    selected: selected.as_str(),
                    declared: env.tier().as_str(),
                })
            }
            _ => Ok(env),
        }
    }
}

// Env file loading
impl ConfigBuilder {
    fn load_env_layers(&self) -> Result<(LayeredSource, AppEnvironment), ConfigurationError> {
        let dir = self.env_dir.as_deref().unwrap_or(Path::new("."));

        let local = MapSource::from_env_file(dir.join(LOCAL_ENV_FILE_NAME))?;
        let base = MapSource::from_env_file(dir.join(BASE_ENV_FILE_NAME))?;

        let mut shared = LayeredSource::new().then(ProcessEnv);
        for file in [&local, &base].into_iter().flatten() {
            shared.push(file.clone());
        }
        let tier = AppEnvironment::for_env_files(&shared);

        let tier_local = MapSource::from_env_file(dir.join(tier.local_env_file_name()))?;
        let tier_base = MapSource::from_env_file(dir.join(tier.env_file_name()))?;

        let mut layered = LayeredSource::new().then(ProcessEnv);
        for file in [tier_local, local, tier_base, base].into_iter().flatten() {
            layered.push(file);
        }

        debug!(
            dir = %dir.display(),
            tier = tier.as_str(),
            layers = layered.depth(),
            "environment sources loaded"
        );

        Ok((layered, tier))
    }
}
