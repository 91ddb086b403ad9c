// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Tax Portal Env
//!
//! `tax_portal_env` validates the runtime configuration of the tax portal before anything
//! that depends on it starts.
//!
//! Required variables come in two groups: public values that may be shipped to the browser
//! (they carry the `NEXT_PUBLIC_` prefix) and secret credentials that are only ever read
//! on the server. Validation is all-or-nothing: a missing or blank variable stops startup
//! with a multi-line diagnostic instead of degrading silently.
//!
//! ## Features
//!
//! - Typed keys for both groups, so only validated keys can be looked up
//! - `.env` file loading by tier without mutating the process environment
//! - Secret validation gated on whether secrets are reachable in the current context
//! - Development, staging and production flags computed once at startup
//!
//! ## Example
//!
//! ```no_run
//! use tax_portal_env::{ConfigBuilder, PublicVar};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let env = ConfigBuilder::new().build()?;
//!
//!     println!("serving {}", env.public(PublicVar::AppUrl));
//!     Ok(())
//! }
//! ```

mod configs_builder;
pub mod env_keys;
pub mod environment;
pub mod errors;
pub mod source;
pub mod validated;
pub mod validation;

pub use configs_builder::ConfigBuilder;
pub use env_keys::{EnvVar, PublicVar, RequiredVar, SecretVar, VarGroup};
pub use environment::{AppEnvironment, ExecutionContext};
pub use errors::{CONFIG_ERROR_MARKER, ConfigurationError, ValidationFailure, is_configuration_error};
pub use validated::{PublicEnv, SecretEnv, ValidatedEnv};
