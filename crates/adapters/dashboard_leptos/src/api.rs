//! HTTP API client wrapping `gloo-net` for calls to `/api/*`.

use frostwatch_app::ports::{ApiError, ApiMessage, MonitorApi};
use frostwatch_domain::detail::DeviceDetailSnapshot;
use frostwatch_domain::device::{ConnectionReport, ConnectionTarget, DeviceId, DevicePayload};
use frostwatch_domain::notification::NotificationSettings;
use frostwatch_domain::snapshot::DeviceSnapshot;
use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// JSON error body returned by the server on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

fn map_err(err: gloo_net::Error) -> ApiError {
    match err {
        gloo_net::Error::SerdeError(err) => ApiError::Decode(err.to_string()),
        other => ApiError::Transport(other.to_string()),
    }
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let message = resp.json::<ErrorBody>().await.ok().and_then(|b| b.message);
    Err(ApiError::rejected(resp.status(), message))
}

async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    check_response(resp).await?.json().await.map_err(map_err)
}

/// Escape a device name as a single path segment.
fn encode_segment(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

/// [`MonitorApi`] for pages served by the monitoring server itself.
///
/// Paths are requested relative to the page origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooApi;

impl MonitorApi for GlooApi {
    async fn latest_data(&self) -> Result<Vec<DeviceSnapshot>, ApiError> {
        let resp = Request::get("/api/latest_data").send().await.map_err(map_err)?;
        read(resp).await
    }

    async fn device_data(&self, device_name: &str) -> Result<DeviceDetailSnapshot, ApiError> {
        let url = format!("/api/device_data/{}", encode_segment(device_name));
        let resp = Request::get(&url).send().await.map_err(map_err)?;
        read(resp).await
    }

    async fn create_device(&self, payload: &DevicePayload) -> Result<ApiMessage, ApiError> {
        let resp = Request::post("/api/devices")
            .json(payload)
            .map_err(map_err)?
            .send()
            .await
            .map_err(map_err)?;
        read(resp).await
    }

    async fn update_device(
        &self,
        id: DeviceId,
        payload: &DevicePayload,
    ) -> Result<ApiMessage, ApiError> {
        let url = format!("/api/devices/{id}");
        let resp = Request::put(&url)
            .json(payload)
            .map_err(map_err)?
            .send()
            .await
            .map_err(map_err)?;
        read(resp).await
    }

    async fn delete_device(&self, id: DeviceId) -> Result<ApiMessage, ApiError> {
        let url = format!("/api/devices/{id}");
        let resp = Request::delete(&url).send().await.map_err(map_err)?;
        read(resp).await
    }

    async fn test_connection(&self, target: &ConnectionTarget) -> Result<ConnectionReport, ApiError> {
        let resp = Request::post("/api/test_connection")
            .json(target)
            .map_err(map_err)?
            .send()
            .await
            .map_err(map_err)?;
        let ok = resp.ok();
        let status = resp.status();
        let body = resp.text().await.map_err(map_err)?;

        match serde_json::from_str::<ConnectionReport>(&body) {
            Ok(mut report) => {
                report.success &= ok;
                Ok(report)
            }
            Err(err) if ok => Err(ApiError::Decode(err.to_string())),
            Err(_) => {
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.message);
                Err(ApiError::rejected(status, message))
            }
        }
    }

    async fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<ApiMessage, ApiError> {
        let resp = Request::post("/api/settings/pushover")
            .json(settings)
            .map_err(map_err)?
            .send()
            .await
            .map_err(map_err)?;
        read(resp).await
    }
}
