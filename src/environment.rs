// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! Deployment tier and execution context.

use crate::{
    env_keys::{PublicVar, RequiredVar},
    errors::ConfigurationError,
    source::EnvSource,
};
use std::{fmt, str::FromStr};

/// The deployment tier carried by `NEXT_PUBLIC_APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppEnvironment {
    Development,
    Staging,
    Production,
}

impl AppEnvironment {
    /// The literal carried by `NEXT_PUBLIC_APP_ENV` for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Staging => "staging",
            AppEnvironment::Production => "production",
        }
    }

    /// Tier-specific env file, e.g. `.env.production`.
    pub fn env_file_name(&self) -> &'static str {
        match self {
            AppEnvironment::Development => ".env.development",
            AppEnvironment::Staging => ".env.staging",
            AppEnvironment::Production => ".env.production",
        }
    }

    /// Tier-specific local override file, e.g. `.env.production.local`.
    pub fn local_env_file_name(&self) -> &'static str {
        match self {
            AppEnvironment::Development => ".env.development.local",
            AppEnvironment::Staging => ".env.staging.local",
            AppEnvironment::Production => ".env.production.local",
        }
    }

    /// Picks the tier used to choose which env files to load.
    ///
    /// Unlike validation this never fails: an absent or unknown value falls back to
    /// development, and the real check happens once the files are merged.
    pub fn for_env_files<S: EnvSource + ?Sized>(source: &S) -> Self {
        source
            .get(PublicVar::AppEnv.name())
            .and_then(|v| v.parse().ok())
            .unwrap_or(AppEnvironment::Development)
    }
}

impl FromStr for AppEnvironment {
    type Err = ConfigurationError;

    /// Exact, case-sensitive match against the three tier literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(AppEnvironment::Development),
            "staging" => Ok(AppEnvironment::Staging),
            "production" => Ok(AppEnvironment::Production),
            other => Err(ConfigurationError::InvalidTier {
                key: PublicVar::AppEnv.name(),
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the code is running, which decides whether secret values are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    /// Trusted server process; secrets are readable.
    Server,
    /// Client-delivered code; secrets must not be requested.
    Client,
}

impl ExecutionContext {
    /// `wasm32` builds are shipped to the browser; everything else runs on the server.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            ExecutionContext::Client
        } else {
            ExecutionContext::Server
        }
    }

    /// Maps an explicit capability flag to a context: reachable means server.
    pub fn from_secrets_reachable(reachable: bool) -> Self {
        if reachable {
            ExecutionContext::Server
        } else {
            ExecutionContext::Client
        }
    }

    /// Whether secret-classified values may be read in this context.
    pub fn secrets_reachable(&self) -> bool {
        matches!(self, ExecutionContext::Server)
    }
}
