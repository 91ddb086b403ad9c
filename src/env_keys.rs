// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment Keys
//!
//! This module contains the fixed set of environment variable keys the tax portal requires
//! at startup, split into the public group (values that may be embedded in code delivered
//! to the browser) and the secret group (values that must only ever be read on the server).
//!
//! The key sets are closed enums rather than loose string constants, so a validated
//! environment can only be queried for keys that were actually validated.

use std::fmt;

/// Prefix that marks a variable as safe to ship to the browser.
pub const PUBLIC_PREFIX: &str = "NEXT_PUBLIC_";

/// Environment file names shared by every tier.
pub const BASE_ENV_FILE_NAME: &str = ".env";
pub const LOCAL_ENV_FILE_NAME: &str = ".env.local";

/// Template file developers copy when setting up a new checkout.
pub const ENV_TEMPLATE_FILE_NAME: &str = ".env.example";

/// Which of the two validation groups a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarGroup {
    Public,
    Secret,
}

impl VarGroup {
    /// Lowercase group name used in diagnostics and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            VarGroup::Public => "public",
            VarGroup::Secret => "secret",
        }
    }
}

impl fmt::Display for VarGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed set of required variables validated together.
///
/// `ALL` lists the keys in declaration order; diagnostics report missing and empty
/// keys in that same order.
pub trait RequiredVar: Copy + Ord + fmt::Debug + 'static {
    const GROUP: VarGroup;
    const ALL: &'static [Self];

    /// The exact environment variable name.
    fn name(self) -> &'static str;
}

/// Variables that are safe to embed in client-delivered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublicVar {
    SupabaseUrl,
    SupabaseAnonKey,
    PlasmicProjectId,
    PlasmicToken,
    RecaptchaSiteKey,
    PaystackPublicKey,
    RemitaMerchantId,
    RemitaServiceTypeId,
    OpayMerchantId,
    OpayPublicKey,
    /// Deployment tier: `development`, `staging` or `production`.
    AppEnv,
    AppUrl,
}

impl RequiredVar for PublicVar {
    const GROUP: VarGroup = VarGroup::Public;
    const ALL: &'static [Self] = &[
        PublicVar::SupabaseUrl,
        PublicVar::SupabaseAnonKey,
        PublicVar::PlasmicProjectId,
        PublicVar::PlasmicToken,
        PublicVar::RecaptchaSiteKey,
        PublicVar::PaystackPublicKey,
        PublicVar::RemitaMerchantId,
        PublicVar::RemitaServiceTypeId,
        PublicVar::OpayMerchantId,
        PublicVar::OpayPublicKey,
        PublicVar::AppEnv,
        PublicVar::AppUrl,
    ];

    fn name(self) -> &'static str {
        match self {
            PublicVar::SupabaseUrl => "NEXT_PUBLIC_SUPABASE_URL",
            PublicVar::SupabaseAnonKey => "NEXT_PUBLIC_SUPABASE_ANON_KEY",
            PublicVar::PlasmicProjectId => "NEXT_PUBLIC_PLASMIC_PROJECT_ID",
            PublicVar::PlasmicToken => "NEXT_PUBLIC_PLASMIC_TOKEN",
            PublicVar::RecaptchaSiteKey => "NEXT_PUBLIC_RECAPTCHA_SITE_KEY",
            PublicVar::PaystackPublicKey => "NEXT_PUBLIC_PAYSTACK_PUBLIC_KEY",
            PublicVar::RemitaMerchantId => "NEXT_PUBLIC_REMITA_MERCHANT_ID",
            PublicVar::RemitaServiceTypeId => "NEXT_PUBLIC_REMITA_SERVICE_TYPE_ID",
            PublicVar::OpayMerchantId => "NEXT_PUBLIC_OPAY_MERCHANT_ID",
            PublicVar::OpayPublicKey => "NEXT_PUBLIC_OPAY_PUBLIC_KEY",
            PublicVar::AppEnv => "NEXT_PUBLIC_APP_ENV",
            PublicVar::AppUrl => "NEXT_PUBLIC_APP_URL",
        }
    }
}

/// Server-only credentials. These names must never carry [`PUBLIC_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecretVar {
    SupabaseServiceRoleKey,
    RecaptchaSecretKey,
    PaystackSecretKey,
    RemitaApiKey,
    OpaySecretKey,
}

impl RequiredVar for SecretVar {
    const GROUP: VarGroup = VarGroup::Secret;
    const ALL: &'static [Self] = &[
        SecretVar::SupabaseServiceRoleKey,
        SecretVar::RecaptchaSecretKey,
        SecretVar::PaystackSecretKey,
        SecretVar::RemitaApiKey,
        SecretVar::OpaySecretKey,
    ];

    fn name(self) -> &'static str {
        match self {
            SecretVar::SupabaseServiceRoleKey => "SUPABASE_SERVICE_ROLE_KEY",
            SecretVar::RecaptchaSecretKey => "RECAPTCHA_SECRET_KEY",
            SecretVar::PaystackSecretKey => "PAYSTACK_SECRET_KEY",
            SecretVar::RemitaApiKey => "REMITA_API_KEY",
            SecretVar::OpaySecretKey => "OPAY_SECRET_KEY",
        }
    }
}

/// Any required variable, public or secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnvVar {
    Public(PublicVar),
    Secret(SecretVar),
}

impl EnvVar {
    /// The exact environment variable name.
    pub fn name(self) -> &'static str {
        match self {
            EnvVar::Public(key) => key.name(),
            EnvVar::Secret(key) => key.name(),
        }
    }

    /// Which validation group the key belongs to.
    pub fn group(self) -> VarGroup {
        match self {
            EnvVar::Public(_) => VarGroup::Public,
            EnvVar::Secret(_) => VarGroup::Secret,
        }
    }

    /// Every required key, public first, each group in declaration order.
    pub fn all() -> impl Iterator<Item = EnvVar> {
        PublicVar::ALL
            .iter()
            .copied()
            .map(EnvVar::Public)
            .chain(SecretVar::ALL.iter().copied().map(EnvVar::Secret))
    }
}

impl From<PublicVar> for EnvVar {
    fn from(key: PublicVar) -> Self {
        EnvVar::Public(key)
    }
}

impl From<SecretVar> for EnvVar {
    fn from(key: SecretVar) -> Self {
        EnvVar::Secret(key)
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
