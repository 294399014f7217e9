//! 🔧 App Configuration: the sacred env-and-TOML-to-struct pipeline.
//!
//! 📡 "Config not found: We looked everywhere. Under the couch. Behind the fridge.
//! In the junk drawer. Nothing." - every developer at 3am 🦆
//!
//! 🏗️ Powered by Figment. Layers, lowest to highest:
//! 1. serde defaults (the original cluster URL, user `openshift`, 30s timeout)
//! 2. `OPU_*` environment variables, `__` for nesting (`OPU_SINK_CONFIG__URL`)
//! 3. `OPENSEARCH_PASS` → `sink_config.password`, taken verbatim (never parsed as TOML-ish data)
//! 4. the optional TOML file
//!
//! The index name and chunk size are not in here on purpose. They are constants.

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::backends::OpenSearchSinkConfig;

/// 🔒 The one environment variable the uploader has always read.
pub const PASSWORD_ENV_VAR: &str = "OPENSEARCH_PASS";

/// 📦 Everything a run needs to know that is not in the input file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sink_config: OpenSearchSinkConfig,
}

/// 🏗️ The layered Figment, before extraction. Split out so tests can feed it a TOML string.
fn figment(config_file_name: Option<&Path>) -> Figment {
    let mut config = Figment::new().merge(Env::prefixed("OPU_").split("__"));

    // -- 🔒 `Env` would turn `12345` into a number and `"x"` into `x`. A password is just bytes.
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR) {
        config = config.merge(Serialized::default("sink_config.password", password));
    }

    match config_file_name {
        Some(file_name) => config.merge(Toml::file(file_name)),
        None => config,
    }
}

/// 🚀 Load the config from the environment, plus a TOML file if one was given.
///
/// 💀 Returns an error if anything present fails to parse. Absent things get defaults.
pub fn load_config(config_file_name: Option<&Path>) -> anyhow::Result<AppConfig> {
    match config_file_name {
        Some(path) => info!("🔧 Loading configuration: '{}' plus environment", path.display()),
        None => info!("🔧 Loading configuration: environment only"),
    }

    let context_msg = match config_file_name {
        Some(path) => format!(
            "💀 Failed to parse configuration from file '{}' and environment variables (OPU_*, {PASSWORD_ENV_VAR}).",
            path.display()
        ),
        None => format!(
            "💀 Failed to parse configuration from environment variables (OPU_*, {PASSWORD_ENV_VAR}). \
             No file was provided, so this one's all on the environment."
        ),
    };

    let app_config: AppConfig = figment(config_file_name).extract().context(context_msg)?;

    if app_config.sink_config.password.is_none() {
        // -- ⚠️ not fatal: the cluster will say 401 for every chunk and we will log each one.
        warn!("🔒 {PASSWORD_ENV_VAR} is not set; bulk requests will go out without a password");
    }

    Ok(app_config)
}
