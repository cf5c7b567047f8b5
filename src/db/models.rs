use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row of the `readings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    pub id: i64,
    /// Server receipt time, `YYYY-MM-DD HH:MM:SS` in the configured offset.
    pub timestamp: String,
    /// Light-dependent resistor reading
    pub ldr: f64,
    /// Motion detected (non-zero) or not (0)
    pub pir: i64,
    /// Amperes
    pub current: f64,
    /// Volts
    pub battery_voltage: f64,
    /// Percent
    pub battery_level: f64,
    /// Volts
    pub solar_voltage: f64,
}

impl Reading {
    /// Column names in table order; also the export header row.
    pub const COLUMNS: [&'static str; 8] = [
        "id",
        "timestamp",
        "ldr",
        "pir",
        "current",
        "battery_voltage",
        "battery_level",
        "solar_voltage",
    ];
}
