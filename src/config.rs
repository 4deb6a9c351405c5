//! Optional user configuration.
//!
//! Settings are layered: built-in defaults, then the config file
//! (`~/.config/calgen/config.toml` or the one given with `--config`), then
//! `CALGEN_*` environment variables. Command line flags win over all of them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calgen_core::Options;
use calgen_core::calendar::{CalendarMetadata, DEFAULT_PRODID};
use calgen_core::dialect::{DEFAULT_DELIMITERS, DEFAULT_SAMPLE_SIZE};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

fn default_delimiters() -> Vec<String> {
    DEFAULT_DELIMITERS
        .iter()
        .map(|&b| char::from(b).to_string())
        .collect()
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Product identifier written to the calendar
    #[serde(default = "default_prodid")]
    pub prodid: String,

    /// Candidate delimiters for dialect sniffing, one character each
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<String>,

    /// Characters of input to sample before sniffing
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            prodid: default_prodid(),
            delimiters: default_delimiters(),
            sample_size: default_sample_size(),
        }
    }
}

impl Settings {
    /// ~/.config/calgen/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("calgen");

        Ok(config_dir.join("config.toml"))
    }

    /// `CALGEN_*` variables; `CALGEN_DELIMITERS` is a space separated list.
    fn environment() -> Environment {
        Environment::with_prefix("CALGEN")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("delimiters")
    }

    /// Load settings. An explicit path must exist; the default one may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_env(explicit, Self::environment())
    }

    fn load_with_env(explicit: Option<&Path>, env: Environment) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::config_path() {
                Ok(path) => (path, false),
                Err(err) => {
                    tracing::debug!(%err, "no config directory, using defaults");
                    return Self::from_sources(None, env);
                }
            },
        };

        tracing::debug!(path = %path.display(), required, "loading config");
        let file = File::from(path).format(FileFormat::Toml).required(required);
        Self::from_sources(Some(file), env)
    }

    fn from_sources(
        file: Option<File<config::FileSourceFile, FileFormat>>,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        builder
            .add_source(env)
            .build()
            .context("Could not load configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate the settings and turn them into pipeline options. `prodid`
    /// overrides the configured product identifier.
    pub fn into_options(self, prodid: Option<String>) -> Result<Options> {
        if self.sample_size == 0 {
            anyhow::bail!("Invalid configuration: sample_size must be greater than zero");
        }

        if self.delimiters.is_empty() {
            anyhow::bail!("Invalid configuration: delimiters must not be empty");
        }

        let delimiters = self
            .delimiters
            .iter()
            .map(|d| parse_delimiter(d))
            .collect::<Result<Vec<u8>>>()?;

        let prodid = prodid.unwrap_or(self.prodid);
        if prodid.is_empty() || prodid.chars().any(char::is_control) {
            anyhow::bail!(
                "Invalid product identifier {prodid:?}: must be non-empty \
                 without control characters"
            );
        }

        Ok(Options {
            sample_size: self.sample_size,
            delimiters,
            metadata: CalendarMetadata::with_prodid(prodid),
        })
    }
}

/// A delimiter is exactly one ASCII punctuation or whitespace character.
fn parse_delimiter(value: &str) -> Result<u8> {
    match value.as_bytes() {
        [b] if b.is_ascii_punctuation() || *b == b' ' || *b == b'\t' => Ok(*b),
        _ => anyhow::bail!(
            "Invalid configuration: delimiter {value:?} must be a single ASCII punctuation \
             or whitespace character"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        Settings::environment().source(Some(source))
    }

    fn load_from(contents: &str, vars: &[(&str, &str)]) -> Result<Settings> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        Settings::load_with_env(Some(&path), env_from(vars))
    }

    #[test]
    fn test_defaults() {
        let options = Settings::default().into_options(None).unwrap();
        assert_eq!(options.sample_size, 1024);
        assert_eq!(options.delimiters, b";".to_vec());
        assert_eq!(options.metadata.prodid, DEFAULT_PRODID);
        assert_eq!(options.metadata.version, "2.0");
        assert_eq!(options.metadata.calscale, "GREGORIAN");
    }

    #[test]
    fn test_load_file() {
        let settings = load_from(
            "prodid = \"-//Home//Plans//EN\"\ndelimiters = [\";\", \"|\"]\n",
            &[],
        )
        .unwrap();
        assert_eq!(settings.prodid, "-//Home//Plans//EN");
        assert_eq!(settings.delimiters, vec![";", "|"]);
        assert_eq!(settings.sample_size, 1024);

        let options = settings.into_options(None).unwrap();
        assert_eq!(options.delimiters, b";|".to_vec());
    }

    #[test]
    fn test_environment_overrides_file() {
        let settings = load_from(
            "prodid = \"-//Home//Plans//EN\"\nsample_size = 64\n",
            &[("CALGEN_PRODID", "-//Env//EN"), ("CALGEN_SAMPLE_SIZE", "2048")],
        )
        .unwrap();
        assert_eq!(settings.prodid, "-//Env//EN");
        assert_eq!(settings.sample_size, 2048);
    }

    #[test]
    fn test_environment_delimiter_list() {
        let settings = load_from("", &[("CALGEN_DELIMITERS", "; |")]).unwrap();
        assert_eq!(settings.delimiters, vec![";", "|"]);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(Settings::load_with_env(Some(&missing), env_from(&[])).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        assert!(load_from("sample_size = [", &[]).is_err());
    }

    #[test]
    fn test_cli_prodid_wins() {
        let options = Settings::default()
            .into_options(Some("-//Flag//EN".to_string()))
            .unwrap();
        assert_eq!(options.metadata.prodid, "-//Flag//EN");
    }

    #[test]
    fn test_rejects_control_characters_in_prodid() {
        for prodid in ["", "-//Evil//EN\r\nX-INJECTED:1", "tab\there"] {
            let result = Settings::default().into_options(Some(prodid.to_string()));
            assert!(result.is_err(), "{prodid:?}");
        }
    }

    #[test]
    fn test_rejects_zero_sample_size() {
        let settings = Settings {
            sample_size: 0,
            ..Settings::default()
        };
        assert!(settings.into_options(None).is_err());
    }

    #[test]
    fn test_rejects_bad_delimiters() {
        for delimiters in [vec![], vec![";;"], vec!["a"], vec!["é"], vec![";", ""]] {
            let settings = Settings {
                delimiters: delimiters.iter().map(|d| d.to_string()).collect(),
                ..Settings::default()
            };
            assert!(settings.into_options(None).is_err(), "{delimiters:?}");
        }
    }
}
