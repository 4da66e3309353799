//! Capability through which a session talks to its host shell.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::model::Transcript;
use crate::settings::HostTheme;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("failed to serialize transcript: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Host lifecycle and data-exit calls.
///
/// Startup hooks are fire-and-forget. `send_result` is followed by `close`
/// once per session.
pub trait HostBridge: Send + Sync {
    /// Whether a real host receives the transcript. When false the session
    /// stays on screen after completion.
    fn is_embedded(&self) -> bool;

    fn expand(&self);
    fn ready(&self);
    fn set_colors(&self, theme: &HostTheme);

    /// # Errors
    ///
    /// Returns `BridgeError` when the transcript cannot be handed over.
    fn send_result(&self, transcript: &Transcript) -> Result<(), BridgeError>;

    fn close(&self);
}

//
// ─── STANDALONE ───────────────────────────────────────────────────────────────
//

/// Bridge used when no host is present: the transcript goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridge;

impl HostBridge for LogBridge {
    fn is_embedded(&self) -> bool {
        false
    }

    fn expand(&self) {}

    fn ready(&self) {
        tracing::debug!("no host bridge; running standalone");
    }

    fn set_colors(&self, _theme: &HostTheme) {}

    fn send_result(&self, transcript: &Transcript) -> Result<(), BridgeError> {
        let payload = transcript.to_json()?;
        tracing::info!(entries = transcript.len(), %payload, "survey finished");
        Ok(())
    }

    fn close(&self) {}
}

//
// ─── RECORDING ────────────────────────────────────────────────────────────────
//

/// A call observed by [`RecordingBridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Expand,
    Ready,
    SetColors { header: String, background: String },
    SendResult(String),
    Close,
}

/// In-memory bridge that records every call, for tests and previews.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    embedded: bool,
    calls: Mutex<Vec<BridgeCall>>,
}

impl RecordingBridge {
    /// Reports itself as a real host.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            embedded: true,
            calls: Mutex::default(),
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.lock().clone()
    }

    /// JSON payloads passed to `send_result`, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                BridgeCall::SendResult(payload) => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BridgeCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BridgeCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostBridge for RecordingBridge {
    fn is_embedded(&self) -> bool {
        self.embedded
    }

    fn expand(&self) {
        self.record(BridgeCall::Expand);
    }

    fn ready(&self) {
        self.record(BridgeCall::Ready);
    }

    fn set_colors(&self, theme: &HostTheme) {
        self.record(BridgeCall::SetColors {
            header: theme.header_color.clone(),
            background: theme.background_color.clone(),
        });
    }

    fn send_result(&self, transcript: &Transcript) -> Result<(), BridgeError> {
        let payload = transcript.to_json()?;
        self.record(BridgeCall::SendResult(payload));
        Ok(())
    }

    fn close(&self) {
        self.record(BridgeCall::Close);
    }
}
