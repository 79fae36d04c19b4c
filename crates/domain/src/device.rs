//! Device configuration records and the device form that edits them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Modal title shown when adding a device.
pub const NEW_DEVICE_TITLE: &str = "새 장치 추가";

/// Modal title shown when editing a device.
pub const EDIT_DEVICE_TITLE: &str = "장치 정보 수정";

/// Server-assigned identifier of a configured device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(i64);

impl DeviceId {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeviceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A configured device as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
    pub ip: String,
    pub port: u16,
    pub controller_id: String,
    #[serde(default)]
    pub alarm_threshold: Option<f64>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl DeviceRecord {
    /// Address used when testing the connection to this device.
    #[must_use]
    pub fn target(&self) -> ConnectionTarget {
        ConnectionTarget {
            ip: self.ip.clone(),
            port: self.port,
            controller_id: self.controller_id.clone(),
        }
    }
}

/// Raw contents of the device modal.
///
/// Every field except `id` is the untouched input value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceForm {
    pub id: Option<DeviceId>,
    pub name: String,
    pub ip: String,
    pub port: String,
    pub controller_id: String,
    pub alarm_threshold: String,
    pub memo: String,
}

impl DeviceForm {
    /// Fill the form from an existing record.
    #[must_use]
    pub fn from_record(record: &DeviceRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            ip: record.ip.clone(),
            port: record.port.to_string(),
            controller_id: record.controller_id.clone(),
            alarm_threshold: record
                .alarm_threshold
                .map(|t| t.to_string())
                .unwrap_or_default(),
            memo: record.memo.clone().unwrap_or_default(),
        }
    }

    /// Whether submitting this form creates a new device.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Check the fields the client is responsible for and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPort`] when the port is not an integer,
    /// [`ValidationError::InvalidControllerId`] when the controller id is not
    /// exactly two characters, and [`ValidationError::InvalidAlarmThreshold`]
    /// when a non-blank threshold is not a number. Checked in that order.
    pub fn validate(&self) -> Result<DevicePayload, ValidationError> {
        let port = self
            .port
            .trim()
            .parse::<u16>()
            .map_err(|_| ValidationError::InvalidPort(self.port.clone()))?;

        if self.controller_id.chars().count() != 2 {
            return Err(ValidationError::InvalidControllerId(
                self.controller_id.clone(),
            ));
        }

        let threshold = self.alarm_threshold.trim();
        let alarm_threshold = if threshold.is_empty() {
            None
        } else {
            let value = threshold
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::InvalidAlarmThreshold(threshold.to_string()))?;
            Some(value)
        };

        Ok(DevicePayload {
            name: self.name.clone(),
            ip: self.ip.clone(),
            port,
            controller_id: self.controller_id.clone(),
            alarm_threshold,
            memo: Some(self.memo.clone()).filter(|m| !m.is_empty()),
        })
    }
}

/// Request body of `POST /api/devices` and `PUT /api/devices/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePayload {
    pub name: String,
    pub ip: String,
    pub port: u16,
    pub controller_id: String,
    pub alarm_threshold: Option<f64>,
    pub memo: Option<String>,
}

impl DevicePayload {
    #[must_use]
    pub fn target(&self) -> ConnectionTarget {
        ConnectionTarget {
            ip: self.ip.clone(),
            port: self.port,
            controller_id: self.controller_id.clone(),
        }
    }
}

/// Request body of `POST /api/test_connection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub ip: String,
    pub port: u16,
    pub controller_id: String,
}

/// Result of a connection test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DeviceForm {
        DeviceForm {
            id: None,
            name: "냉동고 A".to_string(),
            ip: "192.168.0.10".to_string(),
            port: "4001".to_string(),
            controller_id: "01".to_string(),
            alarm_threshold: String::new(),
            memo: String::new(),
        }
    }

    #[test]
    fn should_build_payload_when_form_is_valid() {
        let payload = form().validate().unwrap();
        assert_eq!(payload.port, 4001);
        assert_eq!(payload.controller_id, "01");
        assert!(payload.alarm_threshold.is_none());
        assert!(payload.memo.is_none());
    }

    #[test]
    fn should_reject_non_numeric_port() {
        let mut f = form();
        f.port = "abc".to_string();
        assert!(matches!(f.validate(), Err(ValidationError::InvalidPort(_))));
    }

    #[test]
    fn should_reject_empty_port() {
        let mut f = form();
        f.port = String::new();
        assert!(matches!(f.validate(), Err(ValidationError::InvalidPort(_))));
    }

    #[test]
    fn should_reject_single_character_controller_id() {
        let mut f = form();
        f.controller_id = "1".to_string();
        assert!(matches!(
            f.validate(),
            Err(ValidationError::InvalidControllerId(_))
        ));
    }

    #[test]
    fn should_check_port_before_controller_id() {
        let mut f = form();
        f.port = "x".to_string();
        f.controller_id = "123".to_string();
        assert!(matches!(f.validate(), Err(ValidationError::InvalidPort(_))));
    }

    #[test]
    fn should_parse_alarm_threshold_and_memo() {
        let mut f = form();
        f.alarm_threshold = " -15.5 ".to_string();
        f.memo = "back room".to_string();
        let payload = f.validate().unwrap();
        assert_eq!(payload.alarm_threshold, Some(-15.5));
        assert_eq!(payload.memo.as_deref(), Some("back room"));
    }

    #[test]
    fn should_reject_non_numeric_alarm_threshold() {
        let mut f = form();
        f.alarm_threshold = "cold".to_string();
        assert!(matches!(
            f.validate(),
            Err(ValidationError::InvalidAlarmThreshold(_))
        ));
    }

    #[test]
    fn should_fill_form_from_record() {
        let record = DeviceRecord {
            id: DeviceId::new(7),
            name: "Walk-in".to_string(),
            ip: "10.0.0.2".to_string(),
            port: 502,
            controller_id: "07".to_string(),
            alarm_threshold: Some(-15.0),
            memo: None,
        };
        let f = DeviceForm::from_record(&record);
        assert!(!f.is_new());
        assert_eq!(f.port, "502");
        assert_eq!(f.alarm_threshold, "-15");
        assert_eq!(f.memo, "");
        assert_eq!(f.validate().unwrap().alarm_threshold, Some(-15.0));
    }

    #[test]
    fn should_parse_record_from_server_json() {
        let json = r#"{"id":3,"name":"a","ip":"1.2.3.4","port":4001,"controller_id":"15","alarm_threshold":null,"memo":null}"#;
        let record: DeviceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, DeviceId::new(3));
        assert_eq!(record.target().port, 4001);
    }

    #[test]
    fn should_parse_device_id_from_str() {
        assert_eq!(" 12 ".parse::<DeviceId>().unwrap(), DeviceId::new(12));
        assert!("x".parse::<DeviceId>().is_err());
    }
}
