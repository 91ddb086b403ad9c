// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Errors
//!
//! Error types for environment validation.
//!
//! Every variant is fatal to initialization: nothing in this crate substitutes defaults or
//! continues with a partial configuration. The rendered message of every variant contains
//! [`CONFIG_ERROR_MARKER`], which is the only part of the text a display layer should rely
//! on to tell configuration failures apart from unrelated errors.

use crate::env_keys::{ENV_TEMPLATE_FILE_NAME, LOCAL_ENV_FILE_NAME, PUBLIC_PREFIX, VarGroup};
use std::fmt;
use thiserror::Error;

/// Stable substring present in every configuration error message.
pub const CONFIG_ERROR_MARKER: &str = "Environment Configuration Error";

/// Returns true when `message` was produced by a [`ConfigurationError`].
pub fn is_configuration_error(message: &str) -> bool {
    message.contains(CONFIG_ERROR_MARKER)
}

/// Errors that can occur while building the validated environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// One or more required variables of a group are missing or blank.
    #[error("{0}")]
    Validation(ValidationFailure),

    /// The tier variable holds something other than `development`, `staging` or `production`.
    #[error(
        "{marker}: `{key}` must be one of `development`, `staging` or `production`, got `{value}`",
        marker = CONFIG_ERROR_MARKER
    )]
    InvalidTier { key: &'static str, value: String },

    /// An env file exists but could not be read or parsed.
    ///
    /// # Arguments
    ///
    /// * `path` - The file that failed to load
    /// * `reason` - The parser's description of the failure
    #[error("{marker}: failed to load env file `{path}` - `{reason}`", marker = CONFIG_ERROR_MARKER)]
    EnvFile { path: String, reason: String },

    /// A variable is defined but its value is not valid UTF-8.
    #[error("{marker}: `{key}` is set but its value is not valid UTF-8", marker = CONFIG_ERROR_MARKER)]
    NotUnicode { key: String },

    /// The env files were chosen for one tier but the merged values declare another.
    ///
    /// # Arguments
    ///
    /// * `selected` - The tier whose `.env.{tier}` files were loaded
    /// * `declared` - The tier the merged `NEXT_PUBLIC_APP_ENV` ended up holding
    #[error(
        "{marker}: env files were loaded for `{selected}` but `NEXT_PUBLIC_APP_ENV` is `{declared}`",
        marker = CONFIG_ERROR_MARKER
    )]
    TierMismatch {
        selected: &'static str,
        declared: &'static str,
    },
}

impl ConfigurationError {
    /// The structured validation report, when this is a missing/empty failure.
    pub fn validation(&self) -> Option<&ValidationFailure> {
        match self {
            ConfigurationError::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for ConfigurationError {
    fn from(failure: ValidationFailure) -> Self {
        ConfigurationError::Validation(failure)
    }
}

/// Missing and blank variables found while validating one group.
///
/// Both lists keep the declaration order of the group's keys. A key appears in at most
/// one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub group: VarGroup,
    pub missing: Vec<&'static str>,
    pub empty: Vec<&'static str>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{CONFIG_ERROR_MARKER}: required {} environment variables are missing or empty",
            self.group
        )?;

        if !self.missing.is_empty() {
            writeln!(f)?;
            writeln!(f, "Missing variables:")?;
            for name in &self.missing {
                writeln!(f, "  - {name}")?;
            }
        }

        if !self.empty.is_empty() {
            writeln!(f)?;
            writeln!(f, "Empty variables (defined but blank):")?;
            for name in &self.empty {
                writeln!(f, "  - {name}")?;
            }
        }

        if self.group == VarGroup::Secret {
            writeln!(f)?;
            writeln!(
                f,
                "WARNING: secret variables must NEVER use the {PUBLIC_PREFIX} prefix."
            )?;
            writeln!(
                f,
                "They are only readable on the server and must not be shipped to the browser."
            )?;
        }

        writeln!(f)?;
        writeln!(f, "To fix this:")?;
        writeln!(
            f,
            "  1. Copy {ENV_TEMPLATE_FILE_NAME} to {LOCAL_ENV_FILE_NAME} if you have not already"
        )?;
        writeln!(f, "  2. Fill in a value for every variable listed above")?;
        if self.group == VarGroup::Secret {
            writeln!(
                f,
                "  3. Do not add the {PUBLIC_PREFIX} prefix to these variables"
            )?;
            write!(f, "  4. Restart the server")
        } else {
            write!(f, "  3. Restart the server")
        }
    }
}
