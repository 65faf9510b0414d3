//! Datagram transport adapter (C1): bidirectional exchange of opaque
//! frames with a single peer address.
//!
//! The core only needs two things from a transport: a way to fire a
//! frame at a peer, and a stream of `(peer, frame)` events to demux.
//! Real traffic goes over `UdpTransport` (a thin wrapper around
//! `tokio::net::UdpSocket`); tests substitute `TestTransport`, an
//! in-process channel pair that lets a test hand-deliver frames without
//! touching the network — mirroring how the ambient RPC surface this
//! crate was adapted from substitutes a `thread_local` delivery bridge
//! in place of real I/O for its own tests.

use std::io;
use std::net::SocketAddr;
use std::rc::Rc;

use tokio::sync::mpsc;

/// A single inbound datagram: the peer it arrived from and its payload.
pub type InboundFrame = (SocketAddr, Vec<u8>);

/// Outbound half of the transport contract: send an already-framed
/// message to a peer. Receiving is modeled separately as a channel of
/// `InboundFrame`s so the client doesn't need to know whether frames
/// are arriving from a real socket or a test harness.
pub trait DatagramTransport {
    fn send(&self, frame: &[u8], peer: SocketAddr) -> io::Result<()>;
}

/// A `tokio::net::UdpSocket`-backed transport. `spawn_recv_loop` drives
/// a background task (on the caller's `LocalSet`) that forwards every
/// received datagram into `sink`.
pub struct UdpTransport {
    socket: Rc<tokio::net::UdpSocket>,
}

impl UdpTransport {
    pub async fn bind(local: SocketAddr) -> io::Result<Self> {
        let socket = tokio::net::UdpSocket::bind(local).await?;
        Ok(Self { socket: Rc::new(socket) })
    }

    /// Spawns the receive loop on the current `LocalSet` and returns its
    /// handle. The loop runs until the socket is dropped or recv errors.
    pub fn spawn_recv_loop(&self, sink: mpsc::UnboundedSender<InboundFrame>) -> tokio::task::JoinHandle<()> {
        let socket = Rc::clone(&self.socket);
        tokio::task::spawn_local(async move {
            let mut buf = vec![0u8; crate::codec::MAX_MESSAGE_SIZE + 256];
            loop {
                match socket.recv_from(&mut buf).await {
                    Ok((len, peer)) => {
                        if sink.send((peer, buf[..len].to_vec())).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        log::warn!("admin transport recv error: {err}");
                        return;
                    }
                }
            }
        })
    }
}

impl DatagramTransport for UdpTransport {
    fn send(&self, frame: &[u8], peer: SocketAddr) -> io::Result<()> {
        self.socket.try_send_to(frame, peer).map(|_| ())
    }
}

/// A deterministic, in-process transport for tests: `send` records the
/// frame instead of touching the network, and inbound frames are
/// injected directly through the same channel the client reads from.
pub struct TestTransport {
    sent: Rc<std::cell::RefCell<Vec<(Vec<u8>, SocketAddr)>>>,
    inbound: mpsc::UnboundedSender<InboundFrame>,
}

impl TestTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<InboundFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { sent: Rc::new(std::cell::RefCell::new(Vec::new())), inbound: tx }, rx)
    }

    /// Injects an inbound frame as if it had arrived from `peer`.
    pub fn deliver(&self, peer: SocketAddr, frame: Vec<u8>) {
        let _ = self.inbound.send((peer, frame));
    }

    /// A cloneable handle to this transport's inbound side, for callers
    /// that need to inject frames after the transport itself has been
    /// moved behind a `Box<dyn DatagramTransport>`.
    pub fn inbound_sender(&self) -> mpsc::UnboundedSender<InboundFrame> {
        self.inbound.clone()
    }

    /// A shared handle onto the outbound log, for callers that need to
    /// inspect what was sent after the transport itself has been moved
    /// behind a `Box<dyn DatagramTransport>`.
    pub fn sent_log(&self) -> Rc<std::cell::RefCell<Vec<(Vec<u8>, SocketAddr)>>> {
        Rc::clone(&self.sent)
    }

    pub fn last_sent(&self) -> Option<(Vec<u8>, SocketAddr)> {
        self.sent.borrow().last().cloned()
    }
}

impl DatagramTransport for TestTransport {
    fn send(&self, frame: &[u8], peer: SocketAddr) -> io::Result<()> {
        self.sent.borrow_mut().push((frame.to_vec(), peer));
        Ok(())
    }
}
