//! Typed endpoint wrappers over a [`Transport`]

use mcsw_core::prelude::*;
use mcsw_core::{ServerSummary, Session};
use serde::Serialize;
use serde_json::Value;

use crate::protocol::{
    endpoints, AlertMode, AuthInfo, ListResponse, ManageAction, ManageRequest, Reply,
    RunCommandRequest,
};
use crate::transport::{ApiResponse, Transport};

/// Result of one registry fetch.
///
/// `servers` is the full payload on HTTP 200 and empty otherwise, so callers
/// can apply it unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOutcome {
    pub status: u16,
    pub servers: Vec<ServerSummary>,
}

/// Client for the backend REST API
#[derive(Debug, Clone)]
pub struct ServerApi<T> {
    transport: T,
}

impl<T: Transport> ServerApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST to an endpoint. `None` sends an empty JSON object.
    pub async fn post(&self, path: &str, body: Option<Value>, mode: AlertMode) -> Reply {
        let body = body.unwrap_or_else(|| Value::Object(Default::default()));
        let response = self.transport.post(path, body).await;
        if !response.is_success() {
            debug!(
                "POST {} -> HTTP {} ({})",
                path,
                response.status,
                response.message().unwrap_or("no message")
            );
        }
        Reply::new(response, mode)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B, mode: AlertMode) -> Reply {
        match serde_json::to_value(body) {
            Ok(value) => self.post(path, Some(value), mode).await,
            Err(e) => {
                error!("Failed to encode body for {}: {}", path, e);
                Reply::new(ApiResponse::new(400, Value::Null), mode)
            }
        }
    }

    /// Fetch the signed-in identity. Any failure means "signed out".
    pub async fn auth_info(&self) -> Session {
        let response = self.transport.get(endpoints::AUTH_INFO, &[]).await;
        if response.status != 200 {
            warn!("Identity fetch returned HTTP {}", response.status);
            return Session::default();
        }
        match serde_json::from_value::<AuthInfo>(response.body) {
            Ok(info) => info.into(),
            Err(e) => {
                warn!("Malformed identity reply: {}", e);
                Session::default()
            }
        }
    }

    /// Fetch the server registry
    pub async fn list(&self) -> ListOutcome {
        let reply = self.post(endpoints::LIST, None, AlertMode::Never).await;
        let status = reply.status();
        if status != 200 {
            return ListOutcome {
                status,
                servers: Vec::new(),
            };
        }
        let servers = match serde_json::from_value::<ListResponse>(reply.response.body) {
            Ok(list) => list.data,
            Err(e) => {
                warn!("Malformed server list: {}", e);
                Vec::new()
            }
        };
        ListOutcome { status, servers }
    }

    /// Start or stop a server
    pub async fn manage(&self, name: &str, action: ManageAction) -> Reply {
        info!("Requesting {} of server '{}'", action, name);
        self.post_json(
            endpoints::MANAGE,
            &ManageRequest { name, action },
            AlertMode::Always,
        )
        .await
    }

    /// Send one console command to a running server
    pub async fn run_command(&self, name: &str, command: &str) -> Reply {
        debug!("Running command on '{}': {}", name, command);
        self.post_json(
            endpoints::RUN_COMMAND,
            &RunCommandRequest { name, command },
            AlertMode::OnError,
        )
        .await
    }

    /// Ask the backend to rescan its servers directory (global admins only)
    pub async fn refresh_servers(&self) -> Reply {
        self.post(endpoints::REFRESH_SERVERS, None, AlertMode::Always)
            .await
    }

    /// End the backend session
    pub async fn logout(&self) -> Reply {
        self.post(endpoints::AUTH_LOGOUT, None, AlertMode::OnError)
            .await
    }

    /// Download a server's modpack archive
    pub async fn download_modpack(&self, name: &str) -> Result<Vec<u8>> {
        self.transport
            .download(endpoints::DOWNLOAD_MODPACK, &[("name", name)])
            .await
    }
}
