//! Validation errors raised before any request leaves the client.
//!
//! The `Display` output of every variant is the message shown to the user.

/// A device form field failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Port is missing or not an integer.
    #[error("포트 번호는 필수이며, 숫자만 입력해야 합니다.")]
    InvalidPort(String),

    /// Controller id is missing or not exactly two characters.
    #[error("컨트롤러 ID는 필수이며, 두 자리로 입력해야 합니다. (예: 01, 07, 15)")]
    InvalidControllerId(String),

    /// Alarm threshold was given but is not a number.
    #[error("알람 온도는 숫자로 입력해야 합니다.")]
    InvalidAlarmThreshold(String),
}
