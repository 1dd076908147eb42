//! Forced-logout notifications
//!
//! [`ChannelLogoutSignal`] forwards each forced logout to an unbounded
//! channel so a UI or CLI loop can redirect to its sign-in flow without the
//! session client knowing about it.

use storefront_core::{LogoutSignal, RefreshFailure};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Logout signal backed by a tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelLogoutSignal {
    sender: mpsc::UnboundedSender<RefreshFailure>,
}

impl ChannelLogoutSignal {
    /// Create a signal plus the receiver that observes forced logouts.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RefreshFailure>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl LogoutSignal for ChannelLogoutSignal {
    fn forced_logout(&self, reason: &RefreshFailure) {
        debug!(reason = %reason, "Publishing forced logout");
        if self.sender.send(reason.clone()).is_err() {
            warn!("Forced logout dropped, no receiver is listening");
        }
    }
}

/// Signal that only logs; used when nobody subscribes to logouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingLogoutSignal;

impl LogoutSignal for LoggingLogoutSignal {
    fn forced_logout(&self, reason: &RefreshFailure) {
        warn!(reason = %reason, "Session ended, sign-in required");
    }
}
