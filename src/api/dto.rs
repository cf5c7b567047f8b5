use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db::models::Reading, readings::service::Snapshot};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Acknowledgement returned by `POST /data` and `POST /reset`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Always `"success"`.
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_owned(),
            message: message.into(),
        }
    }
}

/// Response for `GET /get_data`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingsResponse {
    /// Always `"success"`.
    pub status: String,
    /// Most recent reading, `null` when nothing is stored.
    pub latest: Option<Reading>,
    /// Every stored reading, newest first.
    pub records: Vec<Reading>,
}

impl From<Snapshot> for ReadingsResponse {
    fn from(s: Snapshot) -> Self {
        Self {
            status: STATUS_SUCCESS.to_owned(),
            latest: s.latest,
            records: s.records,
        }
    }
}

/// Body of every 4xx/5xx response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_owned(),
            message: message.into(),
        }
    }
}
