// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

use std::{fs, path::Path};
use tax_portal_env::{
    AppEnvironment, CONFIG_ERROR_MARKER, ConfigBuilder, ConfigurationError, EnvVar, PublicVar,
    RequiredVar, SecretVar, VarGroup, is_configuration_error, source::MapSource,
};

fn public_vars(tier: &str) -> MapSource {
    PublicVar::ALL
        .iter()
        .map(|key| match key {
            PublicVar::AppEnv => (key.name().to_owned(), tier.to_owned()),
            _ => (key.name().to_owned(), format!("{}=value", key.name())),
        })
        .collect()
}

fn all_vars(tier: &str) -> MapSource {
    let mut source = public_vars(tier);
    for key in SecretVar::ALL {
        source.insert(key.name(), format!("sk_{}", key.name().to_lowercase()));
    }
    source
}

fn write_public_base(dir: &Path, tier: &str) {
    let mut base = String::new();
    for key in PublicVar::ALL {
        let value = match key {
            PublicVar::AppEnv => tier.to_owned(),
            PublicVar::SupabaseUrl => "https://base.supabase.co".to_owned(),
            _ => "from-base".to_owned(),
        };
        base.push_str(&format!("{}={}\n", key.name(), value));
    }
    fs::write(dir.join(".env"), base).unwrap();
}

#[test]
fn production_client_without_secrets() {
    let env = ConfigBuilder::new()
        .with_source(public_vars("production"))
        .secrets_reachable(false)
        .build()
        .unwrap();

    assert_eq!(env.len(), 12);
    assert!(env.is_production());
    assert!(!env.is_development());
    assert!(!env.is_staging());
    assert!(!env.secrets_reachable());
    assert_eq!(env.secret(SecretVar::OpaySecretKey), None);
}

#[test]
fn missing_url_and_blank_token_are_both_reported() {
    let mut source = MapSource::new();
    for key in PublicVar::ALL {
        match key {
            PublicVar::SupabaseUrl => {}
            PublicVar::PlasmicToken => source.insert(key.name(), ""),
            PublicVar::AppEnv => source.insert(key.name(), "development"),
            _ => source.insert(key.name(), "ok"),
        }
    }

    let err = ConfigBuilder::new()
        .with_source(source)
        .secrets_reachable(false)
        .build()
        .unwrap_err();

    let failure = err.validation().unwrap();
    assert_eq!(failure.group, VarGroup::Public);
    assert_eq!(failure.missing, vec!["NEXT_PUBLIC_SUPABASE_URL"]);
    assert_eq!(failure.empty, vec!["NEXT_PUBLIC_PLASMIC_TOKEN"]);

    let msg = err.to_string();
    assert!(is_configuration_error(&msg));
    let (missing_section, empty_section) = msg.split_once("Empty variables").unwrap();
    assert!(missing_section.contains("Missing variables:"));
    assert!(missing_section.contains("NEXT_PUBLIC_SUPABASE_URL"));
    assert!(!missing_section.contains("NEXT_PUBLIC_PLASMIC_TOKEN"));
    assert!(empty_section.contains("NEXT_PUBLIC_PLASMIC_TOKEN"));
    assert!(!empty_section.contains("NEXT_PUBLIC_SUPABASE_URL"));
}

#[test]
fn client_validation_ignores_secret_values_entirely() {
    let mut source = public_vars("staging");
    source.insert("PAYSTACK_SECRET_KEY", "   ");

    let env = ConfigBuilder::new()
        .with_source(source)
        .secrets_reachable(false)
        .build()
        .unwrap();

    assert!(env.is_staging());
    assert!(env.secret_vars().is_empty());
}

#[test]
fn server_validation_returns_every_key_verbatim() {
    let source = all_vars("development").with("REMITA_API_KEY", " padded ");

    let env = ConfigBuilder::new()
        .with_source(source)
        .secrets_reachable(true)
        .build()
        .unwrap();

    assert!(env.keys().eq(EnvVar::all()));
    assert_eq!(env.secret(SecretVar::RemitaApiKey), Some(" padded "));
    assert_eq!(
        env.public(PublicVar::RemitaServiceTypeId),
        "NEXT_PUBLIC_REMITA_SERVICE_TYPE_ID=value"
    );
    assert!(env.is_development());
    assert!(env.secrets_reachable());
}

#[test]
fn blank_secret_fails_with_prefix_warning() {
    let source = all_vars("production").with("SUPABASE_SERVICE_ROLE_KEY", "\t");

    let err = ConfigBuilder::new()
        .with_source(source)
        .secrets_reachable(true)
        .build()
        .unwrap_err();

    let failure = err.validation().unwrap();
    assert_eq!(failure.group, VarGroup::Secret);
    assert!(failure.missing.is_empty());
    assert_eq!(failure.empty, vec!["SUPABASE_SERVICE_ROLE_KEY"]);
    assert!(err.to_string().contains("Do not add the NEXT_PUBLIC_ prefix"));
}

#[test]
fn unknown_tier_fails_initialization() {
    let err = ConfigBuilder::new()
        .with_source(public_vars("prod"))
        .secrets_reachable(false)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::InvalidTier {
            key: "NEXT_PUBLIC_APP_ENV",
            value: "prod".into(),
        }
    );
    assert!(err.to_string().contains(CONFIG_ERROR_MARKER));
}

#[test]
fn env_files_are_layered_by_precedence() {
    let dir = tempfile::tempdir().unwrap();

    write_public_base(dir.path(), "development");
    fs::write(
        dir.path().join(".env.local"),
        "NEXT_PUBLIC_APP_URL=http://localhost:3000\nNEXT_PUBLIC_SUPABASE_URL=from-local\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".env.development.local"),
        "NEXT_PUBLIC_SUPABASE_URL=from-tier-local\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".env.production"),
        "NEXT_PUBLIC_OPAY_MERCHANT_ID=from-production\n",
    )
    .unwrap();

    let env = ConfigBuilder::new()
        .env_dir(dir.path())
        .secrets_reachable(false)
        .build()
        .unwrap();

    assert_eq!(env.tier(), AppEnvironment::Development);
    assert_eq!(env.public(PublicVar::SupabaseUrl), "from-tier-local");
    assert_eq!(env.public(PublicVar::AppUrl), "http://localhost:3000");
    assert_eq!(env.public(PublicVar::OpayMerchantId), "from-base");
}

#[test]
fn empty_env_dir_reports_every_public_key_missing() {
    let dir = tempfile::tempdir().unwrap();

    let err = ConfigBuilder::new()
        .env_dir(dir.path())
        .secrets_reachable(false)
        .build()
        .unwrap_err();

    let failure = err.validation().unwrap();
    assert_eq!(failure.missing.len(), 12);
    assert!(failure.empty.is_empty());
}

#[test]
fn malformed_env_file_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env.local"), "NOT A VALID LINE\n").unwrap();

    let err = ConfigBuilder::new()
        .env_dir(dir.path())
        .secrets_reachable(false)
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::EnvFile { .. }));
    assert!(is_configuration_error(&err.to_string()));
}

#[test]
fn tier_declared_in_base_file_selects_tier_files() {
    let dir = tempfile::tempdir().unwrap();
    write_public_base(dir.path(), "production");
    fs::write(
        dir.path().join(".env.production"),
        "NEXT_PUBLIC_SUPABASE_URL=https://prod.supabase.co\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".env.development.local"),
        "NEXT_PUBLIC_SUPABASE_URL=http://localhost:54321\n",
    )
    .unwrap();

    let env = ConfigBuilder::new()
        .env_dir(dir.path())
        .secrets_reachable(false)
        .build()
        .unwrap();

    assert!(env.is_production());
    assert_eq!(
        env.public(PublicVar::SupabaseUrl),
        "https://prod.supabase.co"
    );
}

#[test]
fn tier_declared_in_local_file_overrides_base_file() {
    let dir = tempfile::tempdir().unwrap();
    write_public_base(dir.path(), "production");
    fs::write(dir.path().join(".env.local"), "NEXT_PUBLIC_APP_ENV=staging\n").unwrap();
    fs::write(
        dir.path().join(".env.staging"),
        "NEXT_PUBLIC_OPAY_MERCHANT_ID=from-staging\n",
    )
    .unwrap();

    let env = ConfigBuilder::new()
        .env_dir(dir.path())
        .secrets_reachable(false)
        .build()
        .unwrap();

    assert!(env.is_staging());
    assert_eq!(env.public(PublicVar::OpayMerchantId), "from-staging");
}

#[test]
fn tier_file_declaring_another_tier_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    write_public_base(dir.path(), "production");
    fs::write(
        dir.path().join(".env.production.local"),
        "NEXT_PUBLIC_APP_ENV=development\n",
    )
    .unwrap();

    let err = ConfigBuilder::new()
        .env_dir(dir.path())
        .secrets_reachable(false)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::TierMismatch {
            selected: "production",
            declared: "development",
        }
    );
    assert!(is_configuration_error(&err.to_string()));
}
