//! Session configuration.
//!
//! Front-ends usually receive options as processor-style `key=value` pairs;
//! [`GenConfig::from_options`] turns those into a validated config.

use std::fmt;

use apigen_diagnostic::DiagnosticConfig;
use apigen_model::{BuildOptions, WellKnownTypes, DEFAULT_REGISTRY_CAPACITY};

/// Configuration for a generation session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenConfig {
    /// Target language tags, one registry each.
    pub languages: Vec<String>,
    /// Upper bound on models per language registry.
    pub registry_capacity: usize,
    /// Skip generator-facing types living in `impl` packages.
    pub skip_impl_packages: bool,
    /// Build independent interfaces on the rayon pool.
    pub parallel: bool,
    pub diagnostics: DiagnosticConfig,
    pub well_known: WellKnownTypes,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            languages: vec!["java".to_owned()],
            registry_capacity: DEFAULT_REGISTRY_CAPACITY,
            skip_impl_packages: true,
            parallel: false,
            diagnostics: DiagnosticConfig::default(),
            well_known: WellKnownTypes::default(),
        }
    }
}

impl GenConfig {
    /// Parse processor-style options on top of the defaults.
    ///
    /// Recognized keys: `codeGenerators`, `registryCapacity`, `errorLimit`,
    /// `skipImplPackages`, `parallel`.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = GenConfig::default();
        for (key, value) in options {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                "codeGenerators" => {
                    let languages: Vec<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|lang| !lang.is_empty())
                        .map(str::to_owned)
                        .collect();
                    if languages.is_empty() {
                        return Err(ConfigError::NoLanguages);
                    }
                    config.languages = languages;
                }
                "registryCapacity" => {
                    config.registry_capacity = match parse_count(key, value)? {
                        0 => return Err(ConfigError::invalid(key, value, "a positive integer")),
                        n => n,
                    };
                }
                "errorLimit" => config.diagnostics.error_limit = parse_count(key, value)?,
                "skipImplPackages" => config.skip_impl_packages = parse_flag(key, value)?,
                "parallel" => config.parallel = parse_flag(key, value)?,
                _ => return Err(ConfigError::UnknownKey(key.to_owned())),
            }
        }
        Ok(config)
    }

    /// Parse `key=value` strings, as handed over on a command line.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pairs = Vec::new();
        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                return Err(ConfigError::Malformed(arg.to_owned()));
            };
            pairs.push((key.trim().to_owned(), value.to_owned()));
        }
        Self::from_options(pairs)
    }

    /// Build options for one target language.
    pub fn build_options(&self, lang: &str) -> BuildOptions {
        BuildOptions::new(lang).with_well_known(self.well_known.clone())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid(key, value, "a non-negative integer"))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "`true` or `false`")),
    }
}

/// A rejected session option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnknownKey(String),
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    /// An argument without `=`.
    Malformed(String),
    /// `codeGenerators` named no language.
    NoLanguages,
}

impl ConfigError {
    fn invalid(key: &str, value: &str, expected: &'static str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
            expected,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownKey(key) => write!(f, "unknown option `{key}`"),
            ConfigError::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "option `{key}` expects {expected}, found `{value}`"),
            ConfigError::Malformed(arg) => write!(f, "expected `key=value`, found `{arg}`"),
            ConfigError::NoLanguages => write!(f, "`codeGenerators` names no target language"),
        }
    }
}

impl std::error::Error for ConfigError {}
