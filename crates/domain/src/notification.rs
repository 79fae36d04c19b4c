//! Push notification settings.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/settings/pushover`.
///
/// `user_keys` is the raw comma-separated input; the server splits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub api_token: String,
    pub user_keys: String,
}
