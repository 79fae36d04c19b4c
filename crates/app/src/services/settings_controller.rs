//! Settings controller: device CRUD, connection tests and notification settings.
//!
//! Every outcome is reported to the user through [`SettingsView::show_alert`].
//! Successful changes close the modal (where one is open) and schedule a page
//! reload; failures leave the form as it is.

use std::time::Duration;

use frostwatch_domain::alert::Alert;
use frostwatch_domain::device::{
    DeviceForm, DeviceId, DevicePayload, DeviceRecord, EDIT_DEVICE_TITLE, NEW_DEVICE_TITLE,
};
use frostwatch_domain::error::ValidationError;
use frostwatch_domain::notification::NotificationSettings;
use frostwatch_domain::snapshot::format_temperature;

use crate::ports::{ApiError, MonitorApi, SettingsView};

/// Reason shown when a failed connection test carries no message.
const UNREACHABLE_DEVICE: &str = "장치와 통신할 수 없습니다. IP, 포트, ID를 확인해주세요.";

/// Reason shown when an ad-hoc connection test fails without a message.
const UNKNOWN_FAILURE: &str = "알 수 없는 오류";

/// Why a settings action did not go through.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    /// The form was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The device did not answer the connection test.
    #[error("{0}")]
    ConnectionFailed(String),

    /// The server rejected or never answered a request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A button clicked in a row of the device table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    Edit(DeviceRecord),
    Delete { id: DeviceId, name: String },
    Test(DeviceRecord),
}

/// Drives the settings page.
pub struct SettingsController<A, V> {
    api: A,
    view: V,
    reload_delay: Duration,
}

impl<A: MonitorApi, V: SettingsView> SettingsController<A, V> {
    pub fn new(api: A, view: V, reload_delay: Duration) -> Self {
        Self {
            api,
            view,
            reload_delay,
        }
    }

    /// Open an empty device modal.
    pub fn prepare_new(&self) {
        self.view
            .open_device_modal(NEW_DEVICE_TITLE, &DeviceForm::default());
    }

    /// Open the device modal filled from `record`.
    pub fn prepare_edit(&self, record: &DeviceRecord) {
        self.view
            .open_device_modal(EDIT_DEVICE_TITLE, &DeviceForm::from_record(record));
    }

    /// Submit the device modal: update when the form has an id, create otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Validation`] without any request when the form is
    /// invalid. Creation additionally fails with
    /// [`SaveError::ConnectionFailed`] when the connection test does not
    /// succeed, in which case the device is not created.
    #[tracing::instrument(skip(self, form), fields(device_name = %form.name))]
    pub async fn save_device(&self, form: &DeviceForm) -> Result<(), SaveError> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.view.show_alert(Alert::danger(err.to_string()));
                return Err(err.into());
            }
        };

        match form.id {
            Some(id) => self.update(id, &payload).await,
            None => self.create(&payload).await,
        }
    }

    async fn update(&self, id: DeviceId, payload: &DevicePayload) -> Result<(), SaveError> {
        match self.api.update_device(id, payload).await {
            Ok(response) => {
                self.view.close_device_modal();
                self.view.show_alert(Alert::success(response.message));
                self.view.schedule_reload(self.reload_delay);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "device update failed");
                self.view
                    .show_alert(Alert::danger(format!("수정 실패: {err}")));
                Err(err.into())
            }
        }
    }

    async fn create(&self, payload: &DevicePayload) -> Result<(), SaveError> {
        self.view.show_alert(Alert::info(format!(
            "[{}] 장치 연결을 테스트 중입니다...",
            payload.name
        )));

        match self.create_after_test(payload).await {
            Ok(message) => {
                self.view.close_device_modal();
                self.view.show_alert(Alert::success(format!(
                    "✅ [{}] 연결 성공! {message}",
                    payload.name
                )));
                self.view.schedule_reload(self.reload_delay);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "device creation failed");
                self.view
                    .show_alert(Alert::danger(format!("🚨 저장 실패: {err}")));
                Err(err)
            }
        }
    }

    async fn create_after_test(&self, payload: &DevicePayload) -> Result<String, SaveError> {
        let report = self.api.test_connection(&payload.target()).await?;
        if !report.success {
            let reason = report
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNREACHABLE_DEVICE.to_string());
            return Err(SaveError::ConnectionFailed(reason));
        }
        let created = self.api.create_device(payload).await?;
        Ok(created.message)
    }

    /// Delete a device after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines; nothing is sent then.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the delete request.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId, name: &str) -> Result<bool, ApiError> {
        if !self
            .view
            .confirm(&format!("정말로 '{name}' 장치를 삭제하시겠습니까?"))
        {
            return Ok(false);
        }

        match self.api.delete_device(id).await {
            Ok(response) => {
                self.view.show_alert(Alert::success(response.message));
                self.view.schedule_reload(self.reload_delay);
                Ok(true)
            }
            Err(err) => {
                self.view.show_alert(Alert::danger(format!("오류: {err}")));
                Err(err)
            }
        }
    }

    /// Test the connection to an existing device and report the measured temperature.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::ConnectionFailed`] when the device does not
    /// answer, or [`SaveError::Api`] when the request itself fails.
    #[tracing::instrument(skip(self, record), fields(device_name = %record.name))]
    pub async fn test_connection(&self, record: &DeviceRecord) -> Result<Option<f64>, SaveError> {
        self.view.show_alert(Alert::info(format!(
            "'{}' 장치와 연결을 테스트하는 중입니다...",
            record.name
        )));

        let outcome = match self.api.test_connection(&record.target()).await {
            Ok(report) if report.success => Ok(report.temperature),
            Ok(report) => Err(SaveError::ConnectionFailed(
                report
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
            )),
            Err(err) => Err(err.into()),
        };

        match &outcome {
            Ok(temperature) => self.view.show_alert(Alert::success(format!(
                "✅ [{}] 연결 성공! 현재 온도는 {}°C 입니다.",
                record.name,
                format_temperature(*temperature)
            ))),
            Err(err) => self.view.show_alert(Alert::danger(format!(
                "🚨 [{}] 연결 실패: {err}. IP, 포트, ID 및 네트워크 연결을 확인하세요.",
                record.name
            ))),
        }
        outcome
    }

    /// Save the push notification settings.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the request.
    #[tracing::instrument(skip_all)]
    pub async fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<(), ApiError> {
        match self.api.save_notification_settings(settings).await {
            Ok(response) => {
                self.view.show_alert(Alert::success(response.message));
                self.view.schedule_reload(self.reload_delay);
                Ok(())
            }
            Err(err) => {
                self.view.show_alert(Alert::danger(format!("오류: {err}")));
                Err(err)
            }
        }
    }

    /// Run the action of a device table button.
    ///
    /// Failures are already reported through alerts, so they are only logged here.
    pub async fn handle_table_action(&self, action: TableAction) {
        match action {
            TableAction::Edit(record) => self.prepare_edit(&record),
            TableAction::Delete { id, name } => {
                if let Err(err) = self.delete_device(id, &name).await {
                    tracing::debug!(error = %err, "delete failed");
                }
            }
            TableAction::Test(record) => {
                if let Err(err) = self.test_connection(&record).await {
                    tracing::debug!(error = %err, "connection test failed");
                }
            }
        }
    }
}
