//! Admin RPC client for a cjdns-family mesh daemon: the cookie
//! handshake, request multiplexing, and bencode-like wire codec a
//! single-threaded event loop needs to drive calls against the admin
//! socket.

pub mod client;
pub mod codec;
pub mod crypto;
pub mod error;
mod requests;
mod timeout;
pub mod transport;

pub use client::{AdminClient, CallResult};
pub use codec::Value;
pub use error::ErrorKind;
