//! User-facing alerts raised by settings actions.

/// Category of an alert; decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Success,
    Info,
    Danger,
}

impl AlertKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Info => "alert-info",
            Self::Danger => "alert-danger",
        }
    }
}

/// A dismissible message shown above the settings forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
        }
    }
}
