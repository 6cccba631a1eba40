//! Message processing
//!
//! Runs the TEA update loop for one incoming message and dispatches every
//! action it produces.

use mcsw_client::{ServerApi, Transport};
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::poll::PollScheduler;
use crate::state::AppState;

/// Process a message through the TEA update function, following any
/// chained messages until the update settles
pub fn process_message<T>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    api: &ServerApi<T>,
    poller: &mut PollScheduler,
) where
    T: Transport + Clone + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx, api, poller);
        }

        msg = result.message;
    }
}
