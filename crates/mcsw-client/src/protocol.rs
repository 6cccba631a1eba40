//! Wire types and endpoint paths of the MC Server Web REST API

use mcsw_core::{ServerSummary, Session};
use serde::{Deserialize, Serialize};

use crate::transport::ApiResponse;

/// Endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const AUTH_INFO: &str = "/auth/info";
    pub const AUTH_LOGOUT: &str = "/auth/logout";
    pub const LIST: &str = "/api/list";
    pub const MANAGE: &str = "/api/manage";
    pub const RUN_COMMAND: &str = "/api/run_command";
    pub const REFRESH_SERVERS: &str = "/api/refresh_servers";
    pub const DOWNLOAD_MODPACK: &str = "/api/download_modpack";
}

/// `GET /auth/info` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

impl From<AuthInfo> for Session {
    fn from(info: AuthInfo) -> Self {
        Session::new(info.name, info.admin)
    }
}

/// `POST /api/list` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Vec<ServerSummary>,
}

/// Lifecycle action for `POST /api/manage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManageAction {
    Start,
    Stop,
}

impl ManageAction {
    /// The toggle action for a server in the given running state
    pub fn toggle_for(running: bool) -> Self {
        if running {
            ManageAction::Stop
        } else {
            ManageAction::Start
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ManageAction::Start => "start",
            ManageAction::Stop => "stop",
        }
    }
}

impl std::fmt::Display for ManageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /api/manage` body
#[derive(Debug, Serialize)]
pub struct ManageRequest<'a> {
    pub name: &'a str,
    pub action: ManageAction,
}

/// `POST /api/run_command` body
#[derive(Debug, Serialize)]
pub struct RunCommandRequest<'a> {
    pub name: &'a str,
    pub command: &'a str,
}

/// When a reply's message should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertMode {
    /// Surface the message of every reply
    Always,
    /// Surface only non-2xx replies
    OnError,
    /// Never surface anything (polling)
    #[default]
    Never,
}

/// A reply plus the message to surface, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub response: ApiResponse,
    pub alert: Option<String>,
}

impl Reply {
    pub fn new(response: ApiResponse, mode: AlertMode) -> Self {
        let alert = alert_for(&response, mode);
        Self { response, alert }
    }

    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }
}

/// Compute the alert text for a reply under `mode`.
///
/// Failed replies without a `message` field still produce a generic alert so
/// a user-initiated action never fails silently.
pub fn alert_for(response: &ApiResponse, mode: AlertMode) -> Option<String> {
    let wanted = match mode {
        AlertMode::Always => true,
        AlertMode::OnError => !response.is_success(),
        AlertMode::Never => false,
    };
    if !wanted {
        return None;
    }
    match response.message() {
        Some(msg) => Some(msg.to_string()),
        None if response.is_unreachable() => Some("Server unreachable".to_string()),
        None if !response.is_success() => {
            Some(format!("Request failed (HTTP {})", response.status))
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manage_request_shape() {
        let body = serde_json::to_value(ManageRequest {
            name: "survival",
            action: ManageAction::Stop,
        })
        .unwrap();
        assert_eq!(body, json!({"name": "survival", "action": "stop"}));
    }

    #[test]
    fn test_toggle_for() {
        assert_eq!(ManageAction::toggle_for(true), ManageAction::Stop);
        assert_eq!(ManageAction::toggle_for(false), ManageAction::Start);
    }

    #[test]
    fn test_auth_info_logged_out() {
        let info: AuthInfo = serde_json::from_value(json!({"name": null, "admin": false})).unwrap();
        assert_eq!(Session::from(info), Session::default());
    }

    #[test]
    fn test_auth_info_admin() {
        let info: AuthInfo =
            serde_json::from_value(json!({"name": "MeTheAdmin", "admin": true})).unwrap();
        let session = Session::from(info);
        assert_eq!(session.name.as_deref(), Some("MeTheAdmin"));
        assert!(session.is_global_admin);
    }

    #[test]
    fn test_list_response_decodes_servers() {
        let resp: ListResponse = serde_json::from_value(json!({
            "message": "Got servers!",
            "data": [
                {"name": "A", "running": true, "log": "hi", "is_admin": true},
                {"name": "B", "running": false}
            ]
        }))
        .unwrap();
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[0].log.as_deref(), Some("hi"));
    }

    #[test]
    fn test_alert_modes() {
        let ok = ApiResponse::new(200, json!({"message": "Server started!"}));
        let bad = ApiResponse::new(400, json!({"message": "Server B not running!"}));

        assert_eq!(alert_for(&ok, AlertMode::Always).as_deref(), Some("Server started!"));
        assert_eq!(alert_for(&ok, AlertMode::OnError), None);
        assert_eq!(alert_for(&ok, AlertMode::Never), None);
        assert_eq!(
            alert_for(&bad, AlertMode::OnError).as_deref(),
            Some("Server B not running!")
        );
        assert_eq!(alert_for(&bad, AlertMode::Never), None);
    }

    #[test]
    fn test_alert_without_message() {
        let bad = ApiResponse::new(500, serde_json::Value::Null);
        assert_eq!(
            alert_for(&bad, AlertMode::OnError).as_deref(),
            Some("Request failed (HTTP 500)")
        );
        assert_eq!(
            alert_for(&ApiResponse::unreachable(), AlertMode::Always).as_deref(),
            Some("Server unreachable")
        );
        let ok = ApiResponse::new(200, serde_json::Value::Null);
        assert_eq!(alert_for(&ok, AlertMode::Always), None);
    }
}
