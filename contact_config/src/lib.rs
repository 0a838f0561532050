use std::path::Path;

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Loads the default configuration and layers the files at `paths` over it.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_overrides(paths, &[])
}

/// Like [`load`], additionally applying the TOML snippets in `overrides` last.
pub fn load_with_overrides(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
    })?;

    overrides
        .iter()
        .fold(builder, |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub validation: ValidationConfig,
    pub submission: SubmissionConfig,
    pub form: FormConfig,
}

#[derive(Debug, Deserialize)]
pub struct ValidationConfig {
    pub latency: Duration,
    #[serde(default)]
    pub jitter: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionConfig {
    pub latency: Duration,
    #[serde(default)]
    pub jitter: Duration,
    #[serde(default)]
    pub reject_probability: f64,
}

#[derive(Debug, Deserialize)]
pub struct FormConfig {
    pub success_message: String,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const NO_PATHS: &[&str] = &[];

    #[test]
    fn load_default_config() {
        let config = load(NO_PATHS).unwrap();

        assert_eq!(*config.validation.latency, Duration::from_millis(300));
        assert_eq!(*config.validation.jitter, Duration::from_millis(200));
        assert_eq!(*config.submission.latency, Duration::from_secs(1));
        assert_eq!(config.submission.reject_probability, 0.0);
        assert_eq!(config.form.success_message, "Message sent successfully!");
    }

    #[test]
    fn overrides() {
        let config = load_with_overrides(
            NO_PATHS,
            &["submission.latency = \"0s\"\nsubmission.reject_probability = 1.0"],
        )
        .unwrap();

        assert!(config.submission.latency.is_zero());
        assert_eq!(config.submission.reject_probability, 1.0);
        assert_eq!(*config.validation.latency, Duration::from_millis(300));
    }

    #[test]
    fn missing_file() {
        let err = load(&["/nonexistent/contact.toml"]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/contact.toml"));
    }
}
