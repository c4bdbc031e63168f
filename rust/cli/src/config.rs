//! Table configuration for the CLI.
//!
//! Values are resolved in three layers: built-in defaults, then the TOML file
//! named by `BLOODGAMBLE_CONFIG`, then the `BLOODGAMBLE_SEED` and
//! `BLOODGAMBLE_COLOR` environment variables. Command-line flags are applied
//! by the commands themselves on top of the result.

use bloodgamble_engine::seat::{AI_STARTING_HP, HUMAN_STARTING_HP};
use bloodgamble_engine::table::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "BLOODGAMBLE_CONFIG";
pub const SEED_ENV: &str = "BLOODGAMBLE_SEED";
pub const COLOR_ENV: &str = "BLOODGAMBLE_COLOR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub human_hp: u32,
    pub ai_hp: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub max_bet: u32,
    pub action_cap: u32,
    pub seed: Option<u64>,
    pub color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub human_hp: ValueSource,
    pub ai_hp: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub max_bet: ValueSource,
    pub action_cap: ValueSource,
    pub seed: ValueSource,
    pub color: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            human_hp: ValueSource::Default,
            ai_hp: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            max_bet: ValueSource::Default,
            action_cap: ValueSource::Default,
            seed: ValueSource::Default,
            color: ValueSource::Default,
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
        let table = TableConfig::default();
        Self {
            human_hp: HUMAN_STARTING_HP,
            ai_hp: AI_STARTING_HP,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            max_bet: table.max_bet,
            action_cap: table.action_cap,
            seed: None,
            color: true,
        }
    }
}

impl Config {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            human_hp: self.human_hp,
            ai_hp: self.ai_hp,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            max_bet: self.max_bet,
            action_cap: self.action_cap,
        }
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
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        macro_rules! layer {
            ($($field:ident),*) => {
                $(
                    if let Some(v) = f.$field {
                        cfg.$field = v;
                        sources.$field = ValueSource::File;
                    }
                )*
            };
        }
        layer!(human_hp, ai_hp, small_blind, big_blind, max_bet, action_cap, color);
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(color) = std::env::var(COLOR_ENV)
        && !color.is_empty()
    {
        cfg.color = parse_bool(&color)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid color: {}", color)))?;
        sources.color = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    human_hp: Option<u32>,
    #[serde(default)]
    ai_hp: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    max_bet: Option<u32>,
    #[serde(default)]
    action_cap: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    color: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.human_hp == 0 || cfg.ai_hp == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting HP must be >0".into(),
        ));
    }
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >=1".into(),
        ));
    }
    if cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >= small_blind".into(),
        ));
    }
    if cfg.max_bet < cfg.big_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_bet must be >= big_blind".into(),
        ));
    }
    if cfg.action_cap < 4 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: action_cap must be >=4".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        unsafe {
            std::env::remove_var(CONFIG_ENV);
            std::env::remove_var(SEED_ENV);
            std::env::remove_var(COLOR_ENV);
        }
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    #[serial]
    fn defaults_match_the_engine_table() {
        clear_env();
        let resolved = load_with_sources().expect("defaults are valid");
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.config.table_config(), TableConfig::default());
        assert_eq!(resolved.sources.seed, ValueSource::Default);
        assert!(resolved.config.color);
    }

    #[test]
    #[serial]
    fn file_values_override_defaults() {
        clear_env();
        let file = config_file("human_hp = 150\nbig_blind = 4\nseed = 9\n");
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
        }
        let resolved = load_with_sources().expect("valid file");
        clear_env();

        assert_eq!(resolved.config.human_hp, 150);
        assert_eq!(resolved.config.big_blind, 4);
        assert_eq!(resolved.config.seed, Some(9));
        assert_eq!(resolved.sources.human_hp, ValueSource::File);
        assert_eq!(resolved.sources.ai_hp, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let file = config_file("seed = 9\ncolor = true\n");
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
            std::env::set_var(SEED_ENV, "77");
            std::env::set_var(COLOR_ENV, "off");
        }
        let resolved = load_with_sources().expect("valid");
        clear_env();

        assert_eq!(resolved.config.seed, Some(77));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert!(!resolved.config.color);
        assert_eq!(resolved.sources.color, ValueSource::Env);
    }

    #[test]
    #[serial]
    fn bad_seed_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var(SEED_ENV, "lots");
        }
        let result = load();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn inconsistent_blinds_are_rejected() {
        clear_env();
        let file = config_file("small_blind = 5\nbig_blind = 2\n");
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
        }
        let result = load();
        clear_env();
        match result {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("big_blind")),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn unknown_keys_fail_to_parse() {
        clear_env();
        let file = config_file("seats = 6\n");
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
        }
        let result = load();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
