// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lumen.toml` > `~/.config/lumen/lumen.toml` > `/etc/lumen/lumen.toml`
//! with environment variable overrides via `LUMEN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LumenConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lumen/lumen.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "lumen.toml";

/// The user config file under the XDG config directory, if one can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lumen").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lumen/lumen.toml` (system-wide)
/// 3. `~/.config/lumen/lumen.toml` (user XDG config)
/// 4. `./lumen.toml` (local directory)
/// 5. `LUMEN_*` environment variables
pub fn load_config() -> Result<LumenConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LumenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LumenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(LumenConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Top-level sections addressable from `LUMEN_*` variables.
const ENV_SECTIONS: &[&str] = &["app", "database", "client"];

/// Environment provider mapping `LUMEN_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `LUMEN_DATABASE_AUTH_TOKEN` must become `database.auth_token`.
fn env_provider() -> Env {
    Env::prefixed("LUMEN_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        for &section in ENV_SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}
