//! Detail-view snapshot: operational flags and the live history row.

use serde::{Deserialize, Serialize};

use crate::snapshot::format_temperature;

/// Latest reading of a single device, as returned by `GET /api/device_data/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetailSnapshot {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub op_status: Option<OpStatus>,
}

impl DeviceDetailSnapshot {
    /// The row to prepend to the live history table, if both fields are present.
    #[must_use]
    pub fn history_row(&self) -> Option<HistoryRow> {
        let timestamp = self.timestamp.as_ref().filter(|ts| !ts.is_empty())?;
        let temperature = self.temperature?;
        Some(HistoryRow {
            timestamp: timestamp.clone(),
            temperature: format_temperature(Some(temperature)),
        })
    }
}

/// Equipment mode flags reported by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpStatus {
    #[serde(default)]
    pub run: bool,
    #[serde(default)]
    pub comp: bool,
    #[serde(default)]
    pub defrost: bool,
    #[serde(default)]
    pub fan: bool,
}

impl OpStatus {
    #[must_use]
    pub fn is_active(&self, flag: OpFlag) -> bool {
        match flag {
            OpFlag::Run => self.run,
            OpFlag::Comp => self.comp,
            OpFlag::Defrost => self.defrost,
            OpFlag::Fan => self.fan,
        }
    }

    /// Badges for the status strip, always in [`OpFlag::ORDER`].
    #[must_use]
    pub fn badges(&self) -> [Badge; 4] {
        OpFlag::ORDER.map(|flag| Badge {
            flag,
            active: self.is_active(flag),
        })
    }
}

/// One operational mode shown in the status strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpFlag {
    Run,
    Comp,
    Defrost,
    Fan,
}

impl OpFlag {
    /// Display order of the status strip.
    pub const ORDER: [Self; 4] = [Self::Run, Self::Comp, Self::Defrost, Self::Fan];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Run => "운전",
            Self::Comp => "압축",
            Self::Defrost => "제상",
            Self::Fan => "팬",
        }
    }

    /// Font Awesome icon class.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Run => "fa-power-off",
            Self::Comp => "fa-snowflake",
            Self::Defrost => "fa-water",
            Self::Fan => "fa-fan",
        }
    }

    /// Badge classes used while the mode is active.
    #[must_use]
    pub fn active_class(self) -> &'static str {
        match self {
            Self::Run => "bg-primary",
            Self::Comp => "bg-success",
            Self::Defrost => "bg-info text-dark",
            Self::Fan => "bg-secondary",
        }
    }
}

/// Badge classes used while a mode is inactive.
pub const INACTIVE_BADGE_CLASS: &str = "bg-light text-dark";

/// A single badge in the status strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub flag: OpFlag,
    pub active: bool,
}

impl Badge {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.active {
            self.flag.active_class()
        } else {
            INACTIVE_BADGE_CLASS
        }
    }
}

/// A row of the live history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub timestamp: String,
    pub temperature: String,
}
