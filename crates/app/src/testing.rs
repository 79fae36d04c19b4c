//! In-memory port implementations shared by the service tests.

use std::cell::RefCell;

use frostwatch_domain::detail::DeviceDetailSnapshot;
use frostwatch_domain::device::{ConnectionReport, ConnectionTarget, DeviceId, DevicePayload};
use frostwatch_domain::notification::NotificationSettings;
use frostwatch_domain::snapshot::DeviceSnapshot;

use crate::ports::{ApiError, ApiMessage, MonitorApi};

/// A request observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LatestData,
    DeviceData(String),
    CreateDevice(DevicePayload),
    UpdateDevice(DeviceId, DevicePayload),
    DeleteDevice(DeviceId),
    TestConnection(ConnectionTarget),
    SaveNotificationSettings(NotificationSettings),
}

/// Records every call and answers with canned responses.
pub struct FakeApi {
    pub calls: RefCell<Vec<Call>>,
    pub latest: RefCell<Result<Vec<DeviceSnapshot>, ApiError>>,
    pub detail: RefCell<Result<DeviceDetailSnapshot, ApiError>>,
    pub connection: RefCell<Result<ConnectionReport, ApiError>>,
    pub write: RefCell<Result<ApiMessage, ApiError>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: RefCell::default(),
            latest: RefCell::new(Ok(Vec::new())),
            detail: RefCell::new(Ok(DeviceDetailSnapshot {
                timestamp: None,
                temperature: None,
                op_status: None,
            })),
            connection: RefCell::new(Ok(ConnectionReport {
                success: true,
                message: Some("연결 성공!".to_string()),
                temperature: Some(-18.5),
            })),
            write: RefCell::new(Ok(ApiMessage {
                message: "ok".to_string(),
            })),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl MonitorApi for FakeApi {
    async fn latest_data(&self) -> Result<Vec<DeviceSnapshot>, ApiError> {
        self.record(Call::LatestData);
        self.latest.borrow().clone()
    }

    async fn device_data(&self, device_name: &str) -> Result<DeviceDetailSnapshot, ApiError> {
        self.record(Call::DeviceData(device_name.to_string()));
        self.detail.borrow().clone()
    }

    async fn create_device(&self, payload: &DevicePayload) -> Result<ApiMessage, ApiError> {
        self.record(Call::CreateDevice(payload.clone()));
        self.write.borrow().clone()
    }

    async fn update_device(
        &self,
        id: DeviceId,
        payload: &DevicePayload,
    ) -> Result<ApiMessage, ApiError> {
        self.record(Call::UpdateDevice(id, payload.clone()));
        self.write.borrow().clone()
    }

    async fn delete_device(&self, id: DeviceId) -> Result<ApiMessage, ApiError> {
        self.record(Call::DeleteDevice(id));
        self.write.borrow().clone()
    }

    async fn test_connection(&self, target: &ConnectionTarget) -> Result<ConnectionReport, ApiError> {
        self.record(Call::TestConnection(target.clone()));
        self.connection.borrow().clone()
    }

    async fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<ApiMessage, ApiError> {
        self.record(Call::SaveNotificationSettings(settings.clone()));
        self.write.borrow().clone()
    }
}
