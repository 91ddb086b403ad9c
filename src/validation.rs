// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Validation
//!
//! All-or-nothing checks of the required variable groups. Each key is classified as
//! present, empty (defined but blank) or missing; any empty or missing key fails the
//! whole group. Present values are kept exactly as read, without trimming.

use crate::{
    env_keys::{PublicVar, RequiredVar, SecretVar, VarGroup},
    environment::ExecutionContext,
    errors::{ConfigurationError, ValidationFailure},
    source::EnvSource,
    validated::{PublicEnv, SecretEnv, ValidatedEnv, VarMap},
};
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Classification of a single key at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarStatus {
    Present(String),
    /// Defined, but blank or whitespace-only.
    Empty,
    Missing,
}

impl VarStatus {
    pub fn classify(value: Option<String>) -> Self {
        match value {
            None => VarStatus::Missing,
            Some(v) if v.trim().is_empty() => VarStatus::Empty,
            Some(v) => VarStatus::Present(v),
        }
    }
}

fn validate_group<K, S>(source: &S) -> Result<VarMap<K>, ConfigurationError>
where
    K: RequiredVar,
    S: EnvSource + ?Sized,
{
    let mut values = BTreeMap::new();
    let mut missing = Vec::new();
    let mut empty = Vec::new();

    for key in K::ALL {
        match VarStatus::classify(source.try_get(key.name())?) {
            VarStatus::Present(value) => {
                values.insert(*key, value);
            }
            VarStatus::Empty => empty.push(key.name()),
            VarStatus::Missing => missing.push(key.name()),
        }
    }

    if missing.is_empty() && empty.is_empty() {
        return Ok(VarMap::new(values));
    }

    error!(
        group = K::GROUP.as_str(),
        missing = ?missing,
        empty = ?empty,
        "environment validation failed"
    );

    Err(ValidationFailure {
        group: K::GROUP,
        missing,
        empty,
    }
    .into())
}

/// Validates every public key against `source`.
pub fn validate_public<S>(source: &S) -> Result<PublicEnv, ConfigurationError>
where
    S: EnvSource + ?Sized,
{
    validate_group::<PublicVar, S>(source)
}

/// Validates every secret key against `source`.
///
/// When `secrets_reachable` is false nothing is read and an empty map is returned:
/// secrets are not required in a context that must never hold them.
pub fn validate_secret<S>(source: &S, secrets_reachable: bool) -> Result<SecretEnv, ConfigurationError>
where
    S: EnvSource + ?Sized,
{
    if !secrets_reachable {
        debug!(group = VarGroup::Secret.as_str(), "secrets unreachable, skipping validation");
        return Ok(SecretEnv::skipped());
    }

    validate_group::<SecretVar, S>(source)
}

/// Runs public then secret validation and merges the results.
///
/// The public group is checked first, so when both groups are broken the public
/// failure is the one reported.
pub fn validate_env<S>(source: &S, context: ExecutionContext) -> Result<ValidatedEnv, ConfigurationError>
where
    S: EnvSource + ?Sized,
{
    let public = validate_public(source)?;
    let secret = validate_secret(source, context.secrets_reachable())?;
    let env = ValidatedEnv::new(public, secret, context)?;

    info!(
        public_count = env.public_vars().len(),
        secret_count = env.secret_vars().len(),
        tier = env.tier().as_str(),
        secrets_reachable = env.secrets_reachable(),
        "environment variables validated"
    );

    Ok(env)
}
