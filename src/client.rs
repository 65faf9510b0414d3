//! Admin RPC client (C6): the handshake/dispatch hub tying the codec,
//! crypto, transport, and request table into a single `rpc_call` entry
//! point.
//!
//! `AdminClient` is a cheaply-`Clone`-able `Rc` handle rather than a
//! value type: the dispatch loop and every pending timeout each need
//! their own reference back into the same event-loop-confined state,
//! and the spec rules out a lock as the way to share it — the same
//! shape the announce scheduler elsewhere in this codebase uses for a
//! `self: Rc<Self>` background task.

use std::cell::RefCell;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::rc::Rc;

use tokio::sync::{mpsc, oneshot};
use zeroize::Zeroizing;

use crate::codec::{Value, MAX_MESSAGE_SIZE};
use crate::crypto;
use crate::error::ErrorKind;
use crate::requests::{RequestRecord, RequestTable};
use crate::timeout;
use crate::transport::{DatagramTransport, InboundFrame};

/// Handshake phase of an in-flight call. A cookie-phase reply without a
/// `cookie` field ends the call with `NoCookie`; one with it starts the
/// authenticated leg.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    AwaitingCookie,
    AwaitingResult,
}

/// Outcome of one `AdminClient::rpc_call`: an `ErrorKind` (success is
/// `ErrorKind::None`), the decoded response dict when there is one, and
/// a zero-padded, size-capped copy of the raw reply bytes.
pub struct CallResult {
    pub error: ErrorKind,
    pub response: Option<Value>,
    pub raw: Box<[u8; MAX_MESSAGE_SIZE]>,
}

impl CallResult {
    fn failed(error: ErrorKind) -> Self {
        Self { error, response: None, raw: Box::new([0u8; MAX_MESSAGE_SIZE]) }
    }
}

struct Inner {
    transport: Box<dyn DatagramTransport>,
    target_addr: SocketAddr,
    password: Zeroizing<Vec<u8>>,
    millis_to_wait: u64,
    table: RefCell<RequestTable>,
}

/// Handle onto one admin connection's state. Cloning is a cheap `Rc`
/// bump; every clone shares the same request table, so the dispatch
/// loop, every pending timeout, and every caller's `rpc_call` see the
/// same view without a lock.
#[derive(Clone)]
pub struct AdminClient {
    inner: Rc<Inner>,
}

include!("client/init.rs");
include!("client/handshake.rs");
include!("client/dispatch.rs");
