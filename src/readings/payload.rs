use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

/// Keys every ingest payload must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "ldr",
    "pir",
    "current",
    "battery_voltage",
    "battery_level",
    "solar_voltage",
];

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Request body must be JSON: {0}")]
    MalformedBody(String),
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),
}

/// The six device-supplied measurements of a reading. `id` and `timestamp`
/// are assigned by the server on insert.
///
/// `pir` may also be sent as a JSON boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewReading {
    pub ldr: f64,
    pub pir: i64,
    pub current: f64,
    pub battery_voltage: f64,
    pub battery_level: f64,
    pub solar_voltage: f64,
}

impl TryFrom<&Value> for NewReading {
    type Error = ValidationError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;

        // Report the first absent key before looking at any value.
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|k| !obj.contains_key(**k)) {
            return Err(ValidationError::MissingField(*missing));
        }

        Ok(Self {
            ldr: real(obj, "ldr")?,
            pir: flag(obj, "pir")?,
            current: real(obj, "current")?,
            battery_voltage: real(obj, "battery_voltage")?,
            battery_level: real(obj, "battery_level")?,
            solar_voltage: real(obj, "solar_voltage")?,
        })
    }
}

fn real(obj: &Map<String, Value>, key: &'static str) -> Result<f64, ValidationError> {
    obj.get(key)
        .and_then(Value::as_f64)
        .ok_or(ValidationError::InvalidField(key))
}

/// Integers pass through; booleans map to 0/1.
fn flag(obj: &Map<String, Value>, key: &'static str) -> Result<i64, ValidationError> {
    match obj.get(key) {
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(v) => v.as_i64().ok_or(ValidationError::InvalidField(key)),
        None => Err(ValidationError::MissingField(key)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_payload() -> Value {
        json!({
            "ldr": 512,
            "pir": 0,
            "current": 0.45,
            "battery_voltage": 3.9,
            "battery_level": 80,
            "solar_voltage": 5.1
        })
    }

    #[test]
    fn full_payload_is_accepted() {
        let r = NewReading::try_from(&full_payload()).unwrap();
        assert_eq!(r.ldr, 512.0);
        assert_eq!(r.pir, 0);
        assert_eq!(r.current, 0.45);
        assert_eq!(r.battery_voltage, 3.9);
        assert_eq!(r.battery_level, 80.0);
        assert_eq!(r.solar_voltage, 5.1);
    }

    #[test]
    fn each_missing_field_is_named() {
        for field in REQUIRED_FIELDS {
            let mut body = full_payload();
            body.as_object_mut().unwrap().remove(field);
            let err = NewReading::try_from(&body).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
            assert_eq!(err.to_string(), format!("Missing required field: {field}"));
        }
    }

    #[test]
    fn first_missing_field_wins() {
        let body = json!({ "ldr": 1.0, "pir": 1 });
        let err = NewReading::try_from(&body).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("current"));
    }

    #[test]
    fn missing_field_reported_before_bad_value() {
        let body = json!({ "ldr": "bright", "pir": 1 });
        let err = NewReading::try_from(&body).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("current"));
    }

    #[test]
    fn boolean_pir_maps_to_flag() {
        let mut body = full_payload();
        body["pir"] = json!(true);
        assert_eq!(NewReading::try_from(&body).unwrap().pir, 1);

        body["pir"] = json!(false);
        assert_eq!(NewReading::try_from(&body).unwrap().pir, 0);
    }

    #[test]
    fn fractional_pir_is_invalid() {
        let mut body = full_payload();
        body["pir"] = json!(0.5);
        let err = NewReading::try_from(&body).unwrap_err();
        assert_eq!(err, ValidationError::InvalidField("pir"));
    }

    #[test]
    fn string_measurement_is_invalid() {
        let mut body = full_payload();
        body["solar_voltage"] = json!("5.1");
        let err = NewReading::try_from(&body).unwrap_err();
        assert_eq!(err, ValidationError::InvalidField("solar_voltage"));
    }

    #[test]
    fn null_measurement_is_invalid() {
        let mut body = full_payload();
        body["current"] = Value::Null;
        let err = NewReading::try_from(&body).unwrap_err();
        assert_eq!(err, ValidationError::InvalidField("current"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = NewReading::try_from(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let mut body = full_payload();
        body["device_time"] = json!("2024-01-01 00:00:00");
        assert!(NewReading::try_from(&body).is_ok());
    }
}
