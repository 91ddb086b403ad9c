// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Validated Environment
//!
//! Immutable results of a successful validation pass. A [`ValidatedEnv`] can only be
//! obtained from validation, so holding one means every required public key (and, where
//! secrets are reachable, every secret key) has a non-blank value.

use crate::{
    env_keys::{EnvVar, PublicVar, RequiredVar, SecretVar, VarGroup},
    environment::{AppEnvironment, ExecutionContext},
    errors::ConfigurationError,
};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt};
use tracing::error;

/// Validated values for one group of keys.
#[derive(Clone, PartialEq, Eq)]
pub struct VarMap<K: RequiredVar> {
    values: BTreeMap<K, String>,
}

/// Validated public values.
pub type PublicEnv = VarMap<PublicVar>;

/// Validated secret values; empty when validated in a context without secret access.
pub type SecretEnv = VarMap<SecretVar>;

impl<K: RequiredVar> VarMap<K> {
    pub(crate) fn new(values: BTreeMap<K, String>) -> Self {
        VarMap { values }
    }

    /// A map with no values, for groups that were deliberately not validated.
    pub(crate) fn skipped() -> Self {
        VarMap {
            values: BTreeMap::new(),
        }
    }

    /// The validated value of `key`, or `None` when the group was skipped.
    pub fn get(&self, key: K) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Number of validated keys: the whole group, or zero when it was skipped.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the group was skipped.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validated keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.values.keys().copied()
    }

    /// Validated keys and their values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<K: RequiredVar> fmt::Debug for VarMap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            match K::GROUP {
                VarGroup::Public => map.entry(&key.name(), value),
                VarGroup::Secret => map.entry(&key.name(), &"<redacted>"),
            };
        }
        map.finish()
    }
}

/// The process-wide validated configuration.
///
/// Built once at startup by [`crate::ConfigBuilder`] and shared by reference. The tier
/// flags are computed when the value is built and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEnv {
    public: PublicEnv,
    secret: SecretEnv,
    tier: AppEnvironment,
    context: ExecutionContext,
    is_development: bool,
    is_staging: bool,
    is_production: bool,
}

impl ValidatedEnv {
    /// Merges two validated groups and derives the tier flags.
    ///
    /// Fails when the tier variable is not one of the three known literals.
    pub(crate) fn new(
        public: PublicEnv,
        secret: SecretEnv,
        context: ExecutionContext,
    ) -> Result<Self, ConfigurationError> {
        let raw_tier = public.get(PublicVar::AppEnv).unwrap_or_default();
        let tier = raw_tier.parse::<AppEnvironment>().inspect_err(|_| {
            error!(
                key = PublicVar::AppEnv.name(),
                value = raw_tier,
                "invalid environment tier"
            );
        })?;

        Ok(ValidatedEnv {
            public,
            secret,
            tier,
            context,
            is_development: tier == AppEnvironment::Development,
            is_staging: tier == AppEnvironment::Staging,
            is_production: tier == AppEnvironment::Production,
        })
    }

    /// The value of a public key. Always non-blank.
    pub fn public(&self, key: PublicVar) -> &str {
        self.public.get(key).unwrap_or_default()
    }

    /// The value of a secret key, or `None` when secrets were not reachable at validation.
    pub fn secret(&self, key: SecretVar) -> Option<&str> {
        self.secret.get(key)
    }

    /// Looks up any required key, public or secret.
    ///
    /// # Returns
    ///
    /// `None` only for secret keys when secrets were not reachable at validation.
    pub fn get(&self, key: impl Into<EnvVar>) -> Option<&str> {
        match key.into() {
            EnvVar::Public(key) => self.public.get(key),
            EnvVar::Secret(key) => self.secret.get(key),
        }
    }

    /// The public group on its own.
    pub fn public_vars(&self) -> &PublicEnv {
        &self.public
    }

    /// The secret group on its own; empty when secrets were not reachable.
    pub fn secret_vars(&self) -> &SecretEnv {
        &self.secret
    }

    /// Number of validated keys: 12 without secret access, 17 with it.
    pub fn len(&self) -> usize {
        self.public.len() + self.secret.len()
    }

    /// Always false for a validated environment; provided alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every validated key, public first, each group in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = EnvVar> + '_ {
        self.public
            .keys()
            .map(EnvVar::Public)
            .chain(self.secret.keys().map(EnvVar::Secret))
    }

    /// The deployment tier parsed from `NEXT_PUBLIC_APP_ENV`.
    pub fn tier(&self) -> AppEnvironment {
        self.tier
    }

    /// True when the tier is `development`.
    pub fn is_development(&self) -> bool {
        self.is_development
    }

    /// True when the tier is `staging`.
    pub fn is_staging(&self) -> bool {
        self.is_staging
    }

    /// True when the tier is `production`.
    pub fn is_production(&self) -> bool {
        self.is_production
    }

    /// Whether secret values can be read where this environment was validated.
    ///
    /// Check this before touching a secret key outside code that only ever runs on the
    /// server.
    pub fn secrets_reachable(&self) -> bool {
        self.context.secrets_reachable()
    }

    /// The public values as a JSON object, for embedding into client-delivered pages.
    ///
    /// Secret values are never included.
    pub fn public_json(&self) -> Value {
        let mut obj = Map::new();
        for (key, value) in self.public.iter() {
            obj.insert(key.name().to_owned(), Value::String(value.to_owned()));
        }
        Value::Object(obj)
    }
}
