use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use chrono::{FixedOffset, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{
    export,
    payload::{NewReading, ValidationError},
};
use crate::db::models::Reading;

/// Format of `Reading::timestamp`. Lexicographic order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller sent something unusable.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Storage or file generation failed.
    #[error(transparent)]
    Operational(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Every stored reading, newest first, plus the newest one on its own.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub latest: Option<Reading>,
    pub records: Vec<Reading>,
}

/// A freshly written export, ready to be sent as an attachment.
#[derive(Debug)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReadingService {
    pool: SqlitePool,
    export_path: PathBuf,
    export_lock: Arc<Mutex<()>>,
    utc_offset: FixedOffset,
}

impl ReadingService {
    pub fn new(pool: SqlitePool, export_path: impl Into<PathBuf>, utc_offset: FixedOffset) -> Self {
        Self {
            pool,
            export_path: export_path.into(),
            export_lock: Arc::default(),
            utc_offset,
        }
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Validates `body`, stamps it with the current server time and appends
    /// it as a new row.
    pub async fn ingest(&self, body: &Value) -> ServiceResult<Reading> {
        let new = NewReading::try_from(body)?;
        let timestamp = self.now();
        debug!(timestamp = %timestamp, "Saving reading");

        let reading = sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO readings
                (timestamp, ldr, pir, current, battery_voltage, battery_level, solar_voltage)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, timestamp, ldr, pir, current,
                      battery_voltage, battery_level, solar_voltage
            "#,
        )
        .bind(&timestamp)
        .bind(new.ldr)
        .bind(new.pir)
        .bind(new.current)
        .bind(new.battery_voltage)
        .bind(new.battery_level)
        .bind(new.solar_voltage)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert reading")?;

        info!(id = reading.id, "Reading persisted");
        Ok(reading)
    }

    /// All readings ordered by `timestamp` descending. Readings stamped in the
    /// same second fall back to insertion order, newest first.
    pub async fn list_all(&self) -> ServiceResult<Snapshot> {
        let records = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, timestamp, ldr, pir, current,
                   battery_voltage, battery_level, solar_voltage
            FROM readings
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to load readings")?;

        Ok(Snapshot {
            latest: records.first().cloned(),
            records,
        })
    }

    /// Renders the whole table as a spreadsheet, stores a copy at the
    /// configured export path and returns the rendered bytes.
    pub async fn export(&self) -> ServiceResult<ExportFile> {
        let readings = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, timestamp, ldr, pir, current,
                   battery_voltage, battery_level, solar_voltage
            FROM readings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to load readings for export")?;

        let count = readings.len();
        let path = self.export_path.clone();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create export directory {}", dir.display()))?;
        }

        let bytes = tokio::task::spawn_blocking(move || export::render_workbook(&readings))
            .await
            .context("export task panicked")?
            .context("failed to render spreadsheet")?;

        // Callers get their own buffer; the lock serialises the on-disk copy.
        {
            let _guard = self.export_lock.lock().await;
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("failed to write export file {}", path.display()))?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sensor_data_export.xlsx".to_owned());

        info!(rows = count, path = %path.display(), "Readings exported");
        Ok(ExportFile { file_name, bytes })
    }

    /// Irreversibly deletes every reading. Identifiers are not reused
    /// afterwards.
    pub async fn reset_all(&self) -> ServiceResult<u64> {
        let deleted = sqlx::query("DELETE FROM readings")
            .execute(&self.pool)
            .await
            .context("failed to clear readings")?
            .rows_affected();

        info!(deleted, "Readings cleared");
        Ok(deleted)
    }

    fn now(&self) -> String {
        Utc::now()
            .with_timezone(&self.utc_offset)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}
