//! Error taxonomy surfaced to `rpc_call` callers.
//!
//! Every outcome of a call reaches the caller through `ErrorKind`; `None`
//! marks success and is the only variant that can accompany a populated
//! `CallResult::response`. Spurious or malformed inbound datagrams never
//! reach here — they are logged and dropped by the demultiplexer because
//! they don't belong to any outstanding request (see `client::dispatch`).

use thiserror::Error;

/// Outcome of a single `AdminClient::rpc_call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("success")]
    None,
    #[error("response payload exceeded the maximum message size")]
    OverlongResponse,
    #[error("error reading from socket")]
    ErrorReadingFromSocket,
    #[error("socket not ready")]
    SocketNotReady,
    #[error("failed to deserialize response")]
    DeserializationFailed,
    #[error("failed to serialize request")]
    SerializationFailed,
    #[error("timed out waiting for a response")]
    Timeout,
    #[error("cookie request returned with no cookie")]
    NoCookie,
    #[error("internal invariant violation")]
    Internal,
}

impl ErrorKind {
    pub fn is_success(self) -> bool {
        matches!(self, ErrorKind::None)
    }
}
