use std::path::PathBuf;

use anyhow::{Context, Result};

use candymap_api::moderation::{DEFAULT_MODERATOR, Moderators};

/// Runtime settings, read once from the environment at startup.
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub moderators: Moderators,
    pub moderator_password: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("CANDYMAP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .context("PORT must be a port number")?;
        let data_dir: PathBuf = std::env::var("CANDYMAP_DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();
        let public_dir: PathBuf = std::env::var("CANDYMAP_PUBLIC_DIR")
            .unwrap_or_else(|_| "./public".into())
            .into();
        let moderators = parse_moderators(
            &std::env::var("CANDYMAP_MODERATORS").unwrap_or_else(|_| DEFAULT_MODERATOR.into()),
        );
        let moderator_password = std::env::var("CANDYMAP_MODERATOR_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());
        let max_upload_bytes = parse_upload_limit(
            &std::env::var("CANDYMAP_MAX_UPLOAD_MB").unwrap_or_else(|_| "10".into()),
        )?;

        Ok(Self {
            host,
            port,
            data_dir,
            public_dir,
            moderators,
            moderator_password,
            max_upload_bytes,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("db.sqlite")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

/// Megabytes to bytes.
fn parse_upload_limit(raw: &str) -> Result<usize> {
    let mb: usize = raw
        .trim()
        .parse()
        .context("CANDYMAP_MAX_UPLOAD_MB must be a whole number of megabytes")?;
    mb.checked_mul(1024 * 1024)
        .context("CANDYMAP_MAX_UPLOAD_MB is too large")
}

/// Comma-separated usernames; blanks are skipped. An empty list falls back
/// to the default moderator.
fn parse_moderators(raw: &str) -> Moderators {
    let names: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if names.is_empty() {
        Moderators::default()
    } else {
        Moderators::new(names)
    }
}
