// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Configuration Sources
//!
//! Read-only key-value lookups the validator runs against. Validation never talks to
//! `std::env` directly; it is handed an [`EnvSource`], so the same code runs against the
//! process environment, parsed `.env` files, or a fixed map in tests.

use crate::errors::ConfigurationError;
use std::{collections::HashMap, ffi::OsString, io::ErrorKind, path::Path};
use tracing::{debug, error};

/// A read-only lookup of configuration values by name.
pub trait EnvSource {
    /// Returns the raw value for `key`, or `None` when the key is not defined at all.
    ///
    /// A defined-but-blank value must be returned as `Some`, not `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Like [`EnvSource::get`], but fails when the value exists and cannot be returned
    /// exactly as stored.
    ///
    /// Validation reads through this method. Sources holding only `String`s never fail.
    fn try_get(&self, key: &str) -> Result<Option<String>, ConfigurationError> {
        Ok(self.get(key))
    }
}

/// The variables of the running process.
///
/// Values that are not valid UTF-8 are never converted lossily: `try_get` reports them
/// as [`ConfigurationError::NotUnicode`] and `get` treats them as undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.try_get(key).ok().flatten()
    }

    fn try_get(&self, key: &str) -> Result<Option<String>, ConfigurationError> {
        decode_os_value(key, std::env::var_os(key))
    }
}

fn decode_os_value(
    key: &str,
    value: Option<OsString>,
) -> Result<Option<String>, ConfigurationError> {
    match value.map(OsString::into_string) {
        None => Ok(None),
        Some(Ok(value)) => Ok(Some(value)),
        Some(Err(_)) => {
            error!(key = key, "environment variable is not valid UTF-8");
            Err(ConfigurationError::NotUnicode {
                key: key.to_owned(),
            })
        }
    }
}

/// An in-memory set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        MapSource::default()
    }

    /// Adds `key` with `value`, replacing any previous value, and returns the source for
    /// chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, replacing any previous value. Blank values are kept as-is.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Number of defined keys, blank ones included.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true when no key is defined.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parses a dotenv file without touching the process environment.
    ///
    /// A file that does not exist yields `Ok(None)`; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Option<MapSource>, ConfigurationError> {
        let path = path.as_ref();

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "env file not found, skipping");
                return Ok(None);
            }
            Err(err) => return Err(env_file_error(path, err)),
        };

        let mut source = MapSource::new();
        for item in iter {
            let (key, value) = item.map_err(|err| env_file_error(path, err))?;
            source.insert(key, value);
        }

        debug!(path = %path.display(), vars = source.len(), "env file loaded");
        Ok(Some(source))
    }
}

fn env_file_error(path: &Path, err: dotenvy::Error) -> ConfigurationError {
    error!(path = %path.display(), error = err.to_string(), "failed to load env file");
    ConfigurationError::EnvFile {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

impl EnvSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MapSource::new();
        for (key, value) in iter {
            source.insert(key, value);
        }
        source
    }
}

/// Wraps a lookup closure, see [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnSource<F>(F);

/// Builds a source from a lookup closure.
pub fn from_fn<F>(lookup: F) -> FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnSource(lookup)
}

impl<F> EnvSource for FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Several sources consulted in order; the first one that defines a key wins.
///
/// A key defined as blank in an earlier layer still shadows later layers, matching how
/// dotenv files never override a variable that is already set.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn EnvSource>>,
}

impl LayeredSource {
    /// Creates a source with no layers; every lookup returns `None`.
    pub fn new() -> Self {
        LayeredSource::default()
    }

    /// Adds a layer with lower precedence than every layer added before it.
    pub fn push(&mut self, layer: impl EnvSource + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Chaining form of [`LayeredSource::push`].
    pub fn then(mut self, layer: impl EnvSource + 'static) -> Self {
        self.push(layer);
        self
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl EnvSource for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    fn try_get(&self, key: &str) -> Result<Option<String>, ConfigurationError> {
        for layer in &self.layers {
            if let Some(value) = layer.try_get(key)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
