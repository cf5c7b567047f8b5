use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::FixedOffset;

/// Offset used for server-assigned timestamps when none is configured
/// (Asia/Kolkata, which observes no DST).
pub const DEFAULT_UTC_OFFSET: &str = "+05:30";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Where the spreadsheet export is written before being streamed back.
    pub export_path: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    /// Fixed offset applied to every reading's `timestamp`.
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: optional("DATABASE_URL", "sqlite:sensor_data.db"),
            export_path: optional("EXPORT_PATH", "sensor_data_export.xlsx").into(),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "5000")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            utc_offset: parse_utc_offset(&optional("TIMESTAMP_UTC_OFFSET", DEFAULT_UTC_OFFSET))?,
        })
    }
}

/// Parse an offset such as `"+05:30"` or `"-03:00"`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    raw.trim().parse::<FixedOffset>().with_context(|| {
        format!("TIMESTAMP_UTC_OFFSET must look like '+HH:MM', got: {raw:?}")
    })
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
