//! Dashboard snapshots and the card state derived from them.

use serde::{Deserialize, Serialize};

use crate::detail::OpStatus;

/// Status string the server uses for a device that is online and not alarming.
pub const NORMAL_STATUS: &str = "정상";

/// Point-in-time reading of one device, as returned by `GET /api/latest_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub device_name: String,
    pub temperature: Option<f64>,
    pub set_temp: Option<f64>,
    pub status: String,
    pub is_alarm: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub alarm_threshold: Option<f64>,
    #[serde(default)]
    pub op_status: Option<OpStatus>,
}

impl DeviceSnapshot {
    /// Classify this snapshot into the visual state of its card.
    #[must_use]
    pub fn card_state(&self) -> CardState {
        CardState::classify(self.is_alarm, &self.status)
    }

    /// Compute everything a card needs to display this snapshot.
    #[must_use]
    pub fn paint(&self) -> CardPaint {
        CardPaint {
            temperature: format_temperature(self.temperature),
            set_temp: format_set_temp(self.set_temp),
            state: self.card_state(),
        }
    }
}

/// Visual state of a dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardState {
    Alarm,
    Normal,
    Offline,
}

impl CardState {
    /// Alarm wins over everything, then an exact match on [`NORMAL_STATUS`].
    /// Any other status is treated as offline.
    #[must_use]
    pub fn classify(is_alarm: bool, status: &str) -> Self {
        if is_alarm {
            Self::Alarm
        } else if status == NORMAL_STATUS {
            Self::Normal
        } else {
            Self::Offline
        }
    }

    /// Short text shown in the status badge.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Alarm => "WAR",
            Self::Normal => "GO",
            Self::Offline => "OFF",
        }
    }

    /// Colour tone applied to the temperature block and the status badge.
    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::Alarm => Tone::Warn,
            Self::Normal | Self::Offline => Tone::Good,
        }
    }

    /// Whether the card header carries the offline style.
    #[must_use]
    pub fn is_offline(self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// Colour tone of a card; each maps to one CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Good,
    Warn,
}

impl Tone {
    /// All tones, used to clear previous classes before applying a new one.
    pub const ALL: [Self; 2] = [Self::Good, Self::Warn];

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warn => "warn",
        }
    }
}

/// CSS class put on a card header while the device is offline.
pub const OFFLINE_HEADER_CLASS: &str = "offline-header";

/// Rendered content of one card for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPaint {
    pub temperature: String,
    pub set_temp: String,
    pub state: CardState,
}

/// One decimal, or `--` when the reading is missing.
#[must_use]
pub fn format_temperature(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |t| format!("{t:.1}"))
}

/// One decimal with the unit, or `--°C` when the set-point is unknown.
#[must_use]
pub fn format_set_temp(value: Option<f64>) -> String {
    value.map_or_else(|| "--°C".to_string(), |t| format!("{t:.1}°C"))
}
