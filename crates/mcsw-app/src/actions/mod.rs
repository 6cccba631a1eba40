//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every request runs in its own tokio task and reports back through the
//! message channel. Nothing here touches `AppState`.

use std::path::{Path, PathBuf};

use mcsw_client::{ServerApi, Transport};
use mcsw_core::prelude::*;
use tokio::sync::mpsc;

use crate::handler::{Task, UpdateAction};
use crate::message::Message;
use crate::poll::PollScheduler;

/// Execute an action, spawning background work where needed
pub fn handle_action<T>(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    api: &ServerApi<T>,
    poller: &mut PollScheduler,
) where
    T: Transport + Clone + Send + Sync + 'static,
{
    match action {
        UpdateAction::FetchIdentity => {
            let api = api.clone();
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                let session = api.auth_info().await;
                let _ = tx.send(Message::IdentityLoaded { session }).await;
            });
        }

        UpdateAction::StartPolling => {
            poller.start(msg_tx.clone());
        }

        UpdateAction::StopPolling => {
            poller.stop();
        }

        UpdateAction::FetchRegistry { generation } => {
            let api = api.clone();
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                let outcome = api.list().await;
                let _ = tx
                    .send(Message::RegistryFetched {
                        generation,
                        outcome,
                    })
                    .await;
            });
        }

        UpdateAction::SpawnTask(task) => {
            let api = api.clone();
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                execute_task(task, &api, tx).await;
            });
        }
    }
}

/// Run one user-triggered request to completion
pub async fn execute_task<T>(task: Task, api: &ServerApi<T>, msg_tx: mpsc::Sender<Message>)
where
    T: Transport + Sync,
{
    let msg = match task {
        Task::Manage { name, action } => {
            let reply = api.manage(&name, action).await;
            Message::ManageCompleted { name, reply }
        }
        Task::RunCommand { name, command } => {
            let reply = api.run_command(&name, &command).await;
            Message::CommandCompleted { reply }
        }
        Task::RescanServers => {
            let reply = api.refresh_servers().await;
            Message::RescanCompleted { reply }
        }
        Task::DownloadModpack { name, dir } => {
            let result = match api.download_modpack(&name).await {
                Ok(bytes) => save_modpack(&dir, &name, &bytes)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = &result {
                warn!("Modpack download for {} failed: {}", name, e);
            }
            Message::DownloadCompleted { name, result }
        }
        Task::Logout => {
            let reply = api.logout().await;
            Message::LogoutCompleted { reply }
        }
    };

    if msg_tx.send(msg).await.is_err() {
        debug!("Message channel closed before task result was delivered");
    }
}

/// Write a modpack archive as `<dir>/<name>.zip`
pub async fn save_modpack(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{}.zip", sanitize_file_name(name)));
    tokio::fs::write(&path, bytes).await?;
    info!("Saved {} bytes to {:?}", bytes.len(), path);
    Ok(path)
}

/// Make a server name safe to use as a file name
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.');
    if cleaned.is_empty() {
        "modpack".to_string()
    } else {
        cleaned.to_string()
    }
}
