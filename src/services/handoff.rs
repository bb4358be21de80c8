//! Import handoff
//!
//! When the user leaves the compose view to import data, the map (with
//! its hidden layers stashed) travels to the import view through a
//! once-only channel carried by the route itself.

use tokio::sync::oneshot;

use crate::api::Map;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportHandoff {
    pub map: Map,
    pub workspace: String,
}

#[derive(Debug)]
pub struct HandoffSender(oneshot::Sender<ImportHandoff>);

#[derive(Debug)]
pub struct HandoffReceiver(oneshot::Receiver<ImportHandoff>);

pub fn channel() -> (HandoffSender, HandoffReceiver) {
    let (tx, rx) = oneshot::channel();
    (HandoffSender(tx), HandoffReceiver(rx))
}

impl HandoffSender {
    /// Deliver the handoff. Consumes the sender, so it can only happen once.
    /// Gives the payload back if the receiving side is already gone.
    pub fn send(self, handoff: ImportHandoff) -> Result<(), ImportHandoff> {
        self.0.send(handoff)
    }
}

impl HandoffReceiver {
    /// Take the handoff if it has been sent. Returns None afterwards.
    pub fn try_take(&mut self) -> Option<ImportHandoff> {
        self.0.try_recv().ok()
    }

    /// Wait for the handoff; None if the sender was dropped without sending
    pub async fn receive(self) -> Option<ImportHandoff> {
        self.0.await.ok()
    }
}
