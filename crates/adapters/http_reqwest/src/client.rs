//! reqwest-backed client for the monitoring server.

use frostwatch_app::ports::{ApiError, ApiMessage, MonitorApi};
use frostwatch_domain::detail::DeviceDetailSnapshot;
use frostwatch_domain::device::{ConnectionReport, ConnectionTarget, DeviceId, DevicePayload};
use frostwatch_domain::notification::NotificationSettings;
use frostwatch_domain::snapshot::DeviceSnapshot;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The configured base URL cannot be used to build endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid server URL {url:?}: {reason}")]
pub struct InvalidBaseUrl {
    pub url: String,
    pub reason: String,
}

/// Error body of a rejected request. Lookups answer `{"error": ...}` instead.
#[derive(Deserialize)]
struct MessageBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

/// [`MonitorApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestMonitorApi {
    client: Client,
    base_url: Url,
}

impl ReqwestMonitorApi {
    /// Wrap an existing client. Endpoint paths are appended to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBaseUrl`] for URLs that cannot carry a path, such as `mailto:`.
    pub fn new(client: Client, base_url: Url) -> Result<Self, InvalidBaseUrl> {
        if base_url.cannot_be_a_base() {
            return Err(InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        Ok(Self { client, base_url })
    }

    /// Parse `base_url` and use a default client.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBaseUrl`] when the string is not a usable URL.
    pub fn from_base_url(base_url: &str) -> Result<Self, InvalidBaseUrl> {
        let parsed = Url::parse(base_url).map_err(|err| InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        Self::new(Client::new(), parsed)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base URL, escaping each one.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build().map_err(transport)?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        self.client.execute(request).await.map_err(transport)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()));
        }

        let message = response
            .json::<MessageBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        tracing::debug!(status = status.as_u16(), ?message, "request rejected");
        Err(ApiError::rejected(status.as_u16(), message))
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

impl MonitorApi for ReqwestMonitorApi {
    async fn latest_data(&self) -> Result<Vec<DeviceSnapshot>, ApiError> {
        let url = self.endpoint(["api", "latest_data"]);
        self.fetch(self.client.get(url)).await
    }

    async fn device_data(&self, device_name: &str) -> Result<DeviceDetailSnapshot, ApiError> {
        let url = self.endpoint(["api", "device_data", device_name]);
        self.fetch(self.client.get(url)).await
    }

    async fn create_device(&self, payload: &DevicePayload) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(["api", "devices"]);
        self.fetch(self.client.post(url).json(payload)).await
    }

    async fn update_device(
        &self,
        id: DeviceId,
        payload: &DevicePayload,
    ) -> Result<ApiMessage, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(["api", "devices", id.as_str()]);
        self.fetch(self.client.put(url).json(payload)).await
    }

    async fn delete_device(&self, id: DeviceId) -> Result<ApiMessage, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(["api", "devices", id.as_str()]);
        self.fetch(self.client.delete(url)).await
    }

    async fn test_connection(&self, target: &ConnectionTarget) -> Result<ConnectionReport, ApiError> {
        let url = self.endpoint(["api", "test_connection"]);
        let response = self.send(self.client.post(url).json(target)).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        match serde_json::from_slice::<ConnectionReport>(&body) {
            Ok(mut report) => {
                if !status.is_success() {
                    report.success = false;
                }
                Ok(report)
            }
            Err(err) if status.is_success() => Err(ApiError::Decode(err.to_string())),
            Err(_) => {
                let message = serde_json::from_slice::<MessageBody>(&body)
                    .ok()
                    .and_then(|body| body.message);
                Err(ApiError::rejected(status.as_u16(), message))
            }
        }
    }

    async fn save_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(["api", "settings", "pushover"]);
        self.fetch(self.client.post(url).json(settings)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn api_for(server: &mockito::Server) -> ReqwestMonitorApi {
        ReqwestMonitorApi::from_base_url(&server.url()).unwrap()
    }

    fn payload() -> DevicePayload {
        DevicePayload {
            name: "Freezer A".to_string(),
            ip: "192.168.0.10".to_string(),
            port: 4001,
            controller_id: "01".to_string(),
            alarm_threshold: Some(-15.0),
            memo: None,
        }
    }

    #[tokio::test]
    async fn should_decode_latest_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/latest_data")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"device_name": "A", "temperature": -18.4, "set_temp": -20.0, "status": "정상", "is_alarm": false},
                    {"device_name": "B", "temperature": null, "set_temp": null, "status": "통신 두절", "is_alarm": false}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let snapshots = api_for(&server).latest_data().await.unwrap();

        mock.assert();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].temperature, Some(-18.4));
        assert_eq!(snapshots[1].temperature, None);
    }

    #[tokio::test]
    async fn should_escape_device_name_as_single_segment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/device_data/Walk-in%201%2FB")
            .with_status(200)
            .with_body(r#"{"timestamp": "2024-05-01 12:00:00", "temperature": -3.2}"#)
            .create_async()
            .await;

        let detail = api_for(&server).device_data("Walk-in 1/B").await.unwrap();

        mock.assert();
        assert_eq!(detail.temperature, Some(-3.2));
        assert_eq!(detail.op_status, None);
    }

    #[tokio::test]
    async fn should_keep_base_path_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/monitor/api/latest_data")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let api = ReqwestMonitorApi::from_base_url(&format!("{}/monitor/", server.url())).unwrap();

        api.latest_data().await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn should_post_device_payload_as_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/devices")
            .match_body(Matcher::Json(json!({
                "name": "Freezer A",
                "ip": "192.168.0.10",
                "port": 4001,
                "controller_id": "01",
                "alarm_threshold": -15.0,
                "memo": null
            })))
            .with_status(201)
            .with_body(r#"{"message": "장치가 추가되었습니다."}"#)
            .create_async()
            .await;

        let response = api_for(&server).create_device(&payload()).await.unwrap();

        mock.assert();
        assert_eq!(response.message, "장치가 추가되었습니다.");
    }

    #[tokio::test]
    async fn should_put_and_delete_by_id() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/api/devices/7")
            .with_status(200)
            .with_body(r#"{"message": "updated"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/devices/7")
            .with_status(200)
            .with_body(r#"{"message": "deleted"}"#)
            .create_async()
            .await;
        let api = api_for(&server);

        let updated = api.update_device(DeviceId::new(7), &payload()).await.unwrap();
        let deleted = api.delete_device(DeviceId::new(7)).await.unwrap();

        put.assert();
        delete.assert();
        assert_eq!(updated.message, "updated");
        assert_eq!(deleted.message, "deleted");
    }

    #[tokio::test]
    async fn should_surface_server_message_on_rejection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/devices")
            .with_status(400)
            .with_body(r#"{"message": "이미 존재하는 장치 이름입니다."}"#)
            .create_async()
            .await;

        let err = api_for(&server).create_device(&payload()).await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: "이미 존재하는 장치 이름입니다.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_fall_back_to_status_when_body_has_no_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/devices/3")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = api_for(&server)
            .delete_device(DeviceId::new(3))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn should_read_error_key_of_missing_device() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/device_data/ghost")
            .with_status(404)
            .with_body(r#"{"error": "device not found or no data"}"#)
            .create_async()
            .await;

        let err = api_for(&server).device_data("ghost").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 404,
                message: "device not found or no data".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_report_decode_error_for_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/latest_data")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = api_for(&server).latest_data().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn should_return_failed_connection_report_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/test_connection")
            .match_body(Matcher::Json(json!({
                "ip": "192.168.0.10",
                "port": 4001,
                "controller_id": "01"
            })))
            .with_status(500)
            .with_body(r#"{"success": false, "message": "응답 시간 초과"}"#)
            .create_async()
            .await;

        let report = api_for(&server)
            .test_connection(&payload().target())
            .await
            .unwrap();

        mock.assert();
        assert!(!report.success);
        assert_eq!(report.message.as_deref(), Some("응답 시간 초과"));
    }

    #[tokio::test]
    async fn should_force_failure_when_status_disagrees_with_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/test_connection")
            .with_status(400)
            .with_body(r#"{"success": true, "temperature": -18.0}"#)
            .create_async()
            .await;

        let report = api_for(&server)
            .test_connection(&payload().target())
            .await
            .unwrap();

        assert!(!report.success);
    }

    #[tokio::test]
    async fn should_decode_successful_connection_report() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/test_connection")
            .with_status(200)
            .with_body(r#"{"success": true, "message": "연결 성공!", "temperature": -18.5}"#)
            .create_async()
            .await;

        let report = api_for(&server)
            .test_connection(&payload().target())
            .await
            .unwrap();

        assert!(report.success);
        assert_eq!(report.temperature, Some(-18.5));
    }

    #[tokio::test]
    async fn should_reject_connection_test_without_report_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/test_connection")
            .with_status(503)
            .create_async()
            .await;

        let err = api_for(&server)
            .test_connection(&payload().target())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn should_post_notification_settings() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/settings/pushover")
            .match_body(Matcher::Json(json!({"api_token": "tok", "user_keys": "u1, u2"})))
            .with_status(200)
            .with_body(r#"{"message": "저장되었습니다."}"#)
            .create_async()
            .await;
        let settings = NotificationSettings {
            api_token: "tok".to_string(),
            user_keys: "u1, u2".to_string(),
        };

        let response = api_for(&server)
            .save_notification_settings(&settings)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.message, "저장되었습니다.");
    }

    #[tokio::test]
    async fn should_map_unreachable_server_to_transport_error() {
        let api = ReqwestMonitorApi::from_base_url("http://127.0.0.1:1").unwrap();

        let err = api.latest_data().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn should_reject_unusable_base_url() {
        assert!(ReqwestMonitorApi::from_base_url("not a url").is_err());
        assert!(ReqwestMonitorApi::from_base_url("mailto:ops@example.com").is_err());
    }
}
