impl AdminClient {
    /// Fallback wait, matching the original constructor's hardcoded
    /// default when the caller doesn't override it.
    pub const DEFAULT_MILLIS_TO_WAIT: u64 = 5000;

    /// Builds a client for `target_addr`, rewriting an IPv4 all-zeros
    /// address to loopback the way the original's constructor does.
    /// IPv6 addresses are left exactly as given.
    pub fn new(
        transport: Box<dyn DatagramTransport>,
        target_addr: SocketAddr,
        password: impl Into<Vec<u8>>,
        millis_to_wait: Option<u64>,
    ) -> Self {
        let inner = Inner {
            transport,
            target_addr: rewrite_ipv4_zero_address(target_addr),
            password: Zeroizing::new(password.into()),
            millis_to_wait: millis_to_wait.unwrap_or(Self::DEFAULT_MILLIS_TO_WAIT),
            table: RefCell::new(RequestTable::default()),
        };
        Self { inner: Rc::new(inner) }
    }

    /// Spawns the inbound-frame dispatch loop on the current `LocalSet`,
    /// reading from `inbound` — typically fed by a transport's own recv
    /// loop (`UdpTransport::spawn_recv_loop`) or a test harness
    /// (`TestTransport::deliver`/`inbound_sender`).
    pub fn spawn_dispatch_loop(
        &self,
        inbound: mpsc::UnboundedReceiver<InboundFrame>,
    ) -> tokio::task::JoinHandle<()> {
        let client = self.clone();
        tokio::task::spawn_local(async move { client.dispatch_loop(inbound).await })
    }

    pub fn target_addr(&self) -> SocketAddr {
        self.inner.target_addr
    }

    pub fn outstanding_calls(&self) -> usize {
        self.inner.table.borrow().len()
    }
}

fn rewrite_ipv4_zero_address(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip == Ipv4Addr::UNSPECIFIED => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}
