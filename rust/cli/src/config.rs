use serde::{Deserialize, Serialize};
use std::fs;

use pachisim_engine::config as engine_config;

/// CLI-facing knobs over the engine's demo parameter set. The probability
/// triples and the continuation decay stay at their demo values; the ball
/// economy and the start-hole odds are adjustable per run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub init_balls: u32,
    pub incremental_balls: u32,
    pub incremental_rush: u32,
    pub start_hole_probability: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub init_balls: ValueSource,
    pub incremental_balls: ValueSource,
    pub incremental_rush: ValueSource,
    pub start_hole_probability: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            init_balls: ValueSource::Default,
            incremental_balls: ValueSource::Default,
            incremental_rush: ValueSource::Default,
            start_hole_probability: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let demo = engine_config::Config::demo();
        Self {
            init_balls: demo.balls.init_balls,
            incremental_balls: demo.balls.incremental_balls,
            incremental_rush: demo.balls.incremental_rush,
            start_hole_probability: demo.start_hole_probability,
            seed: None,
        }
    }
}

impl Config {
    /// Merge these knobs into a full engine config.
    pub fn to_engine_config(&self) -> engine_config::Config {
        let mut cfg = engine_config::Config::demo();
        cfg.balls.init_balls = self.init_balls;
        cfg.balls.incremental_balls = self.incremental_balls;
        cfg.balls.incremental_rush = self.incremental_rush;
        cfg.start_hole_probability = self.start_hole_probability;
        cfg
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "{}", e),
            ConfigError::Parse(e) => write!(f, "{}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("PACHISIM_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.init_balls {
            cfg.init_balls = v;
            sources.init_balls = ValueSource::File;
        }
        if let Some(v) = f.incremental_balls {
            cfg.incremental_balls = v;
            sources.incremental_balls = ValueSource::File;
        }
        if let Some(v) = f.incremental_rush {
            cfg.incremental_rush = v;
            sources.incremental_rush = ValueSource::File;
        }
        if let Some(v) = f.start_hole_probability {
            cfg.start_hole_probability = v;
            sources.start_hole_probability = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("PACHISIM_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(hole) = std::env::var("PACHISIM_START_HOLE")
        && !hole.is_empty()
    {
        cfg.start_hole_probability = hole
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid start hole probability".into()))?;
        sources.start_hole_probability = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    init_balls: Option<u32>,
    #[serde(default)]
    incremental_balls: Option<u32>,
    #[serde(default)]
    incremental_rush: Option<u32>,
    #[serde(default)]
    start_hole_probability: Option<f64>,
    #[serde(default)]
    seed: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    // the engine's batch validator owns the actual rules
    cfg.to_engine_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}
