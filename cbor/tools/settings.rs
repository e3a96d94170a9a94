use anyhow::Context;
use cbor_header::decode::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// One of off, error, warn, info, debug or trace
    pub log_level: String,

    /// Default decoder options, overridden by command line flags
    pub decoder: Options,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            decoder: Options::default(),
        }
    }
}

pub fn load(path: Option<PathBuf>) -> anyhow::Result<Settings> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    } else {
        // Optional default config file in current directory
        builder = builder
            .add_source(config::File::from(Path::new("cbor-header.toml")).required(false));
    }

    // Allow environment variables to override, e.g. CBOR_HEADER_DECODER__MAX_TAG_DEPTH
    builder = builder.add_source(
        config::Environment::with_prefix("CBOR_HEADER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize().map_err(Into::into)
}

pub fn init_logger(settings: &Settings) -> anyhow::Result<()> {
    let log_level = settings
        .log_level
        .parse::<LevelFilter>()
        .with_context(|| format!("Invalid 'log_level' value '{}'", settings.log_level))?;

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(log_level > LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
