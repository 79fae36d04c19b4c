//! Monitoring server port: the REST API consumed by every page.

use std::future::Future;
use std::rc::Rc;

use frostwatch_domain::detail::DeviceDetailSnapshot;
use frostwatch_domain::device::{ConnectionReport, ConnectionTarget, DeviceId, DevicePayload};
use frostwatch_domain::notification::NotificationSettings;
use frostwatch_domain::snapshot::DeviceSnapshot;
use serde::Deserialize;

/// Error returned by [`MonitorApi`] methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is shown verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a [`ApiError::Rejected`] from a status and an optional server message.
    #[must_use]
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Rejected { status, message }
    }
}

/// Body returned by every write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Client side of the monitoring server's REST API.
///
/// Implementations live in adapter crates (`gloo-net` in the browser,
/// `reqwest` natively).
pub trait MonitorApi {
    /// `GET /api/latest_data`
    fn latest_data(&self) -> impl Future<Output = Result<Vec<DeviceSnapshot>, ApiError>>;

    /// `GET /api/device_data/{device_name}`, with the name escaped as one path segment.
    fn device_data(
        &self,
        device_name: &str,
    ) -> impl Future<Output = Result<DeviceDetailSnapshot, ApiError>>;

    /// `POST /api/devices`
    fn create_device(
        &self,
        payload: &DevicePayload,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>>;

    /// `PUT /api/devices/{id}`, replacing the full record.
    fn update_device(
        &self,
        id: DeviceId,
        payload: &DevicePayload,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>>;

    /// `DELETE /api/devices/{id}`
    fn delete_device(&self, id: DeviceId) -> impl Future<Output = Result<ApiMessage, ApiError>>;

    /// `POST /api/test_connection`
    ///
    /// A failed test is a successful call: the server answers 4xx/5xx with a
    /// report body, which implementations return as `Ok` with `success: false`.
    fn test_connection(
        &self,
        target: &ConnectionTarget,
    ) -> impl Future<Output = Result<ConnectionReport, ApiError>>;

    /// `POST /api/settings/pushover`
    fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>>;
}

impl<T: MonitorApi> MonitorApi for Rc<T> {
    fn latest_data(&self) -> impl Future<Output = Result<Vec<DeviceSnapshot>, ApiError>> {
        (**self).latest_data()
    }

    fn device_data(
        &self,
        device_name: &str,
    ) -> impl Future<Output = Result<DeviceDetailSnapshot, ApiError>> {
        (**self).device_data(device_name)
    }

    fn create_device(
        &self,
        payload: &DevicePayload,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>> {
        (**self).create_device(payload)
    }

    fn update_device(
        &self,
        id: DeviceId,
        payload: &DevicePayload,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>> {
        (**self).update_device(id, payload)
    }

    fn delete_device(&self, id: DeviceId) -> impl Future<Output = Result<ApiMessage, ApiError>> {
        (**self).delete_device(id)
    }

    fn test_connection(
        &self,
        target: &ConnectionTarget,
    ) -> impl Future<Output = Result<ConnectionReport, ApiError>> {
        (**self).test_connection(target)
    }

    fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>> {
        (**self).save_notification_settings(settings)
    }
}
