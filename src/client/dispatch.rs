impl AdminClient {
    async fn dispatch_loop(&self, mut inbound: mpsc::UnboundedReceiver<InboundFrame>) {
        while let Some((peer, bytes)) = inbound.recv().await {
            self.handle_inbound(peer, bytes);
        }
    }

    /// Demultiplexes one inbound datagram onto its request, per the
    /// current handshake phase. Anything that doesn't match an
    /// outstanding call — wrong peer, undecodable bytes, an unknown or
    /// malformed `txid` — is logged and dropped; the call it would have
    /// belonged to (if any) is left to its own timeout.
    fn handle_inbound(&self, peer: SocketAddr, bytes: Vec<u8>) {
        if peer != self.inner.target_addr {
            log::warn!("admin client dropped datagram from unexpected peer {peer}");
            return;
        }

        let overlong = bytes.len() > MAX_MESSAGE_SIZE;
        let mut raw = Box::new([0u8; MAX_MESSAGE_SIZE]);
        let copy_len = bytes.len().min(MAX_MESSAGE_SIZE);
        raw[..copy_len].copy_from_slice(&bytes[..copy_len]);

        let decoded = match crate::codec::decode(&bytes) {
            Ok(value) => value,
            Err(_) => {
                log::warn!("admin client dropped undecodable datagram from {peer}");
                return;
            }
        };

        let Some(txid) = decoded.get("txid").and_then(Value::as_str) else {
            log::warn!("admin client dropped datagram with no txid from {peer}");
            return;
        };
        let Some(handle) = crypto::decode_handle(txid) else {
            log::warn!("admin client dropped datagram with a malformed txid from {peer}");
            return;
        };

        let Some(phase) = self.inner.table.borrow_mut().get_mut(handle).map(|r| r.phase) else {
            log::warn!("admin client dropped a reply for an unknown handle from {peer}");
            return;
        };

        match phase {
            Phase::AwaitingCookie => {
                let cookie_bytes = decoded.get("cookie").and_then(Value::as_str).map(|bytes| bytes.to_vec());
                match cookie_bytes {
                    None => self.finish(
                        handle,
                        CallResult { error: ErrorKind::NoCookie, response: Some(decoded), raw },
                    ),
                    Some(bytes) => {
                        let cookie = crypto::parse_cookie(Some(&bytes));
                        self.begin_auth_phase(handle, cookie);
                    }
                }
            }
            Phase::AwaitingResult => {
                let error = if overlong { ErrorKind::OverlongResponse } else { ErrorKind::None };
                self.finish(handle, CallResult { error, response: Some(decoded), raw });
            }
        }
    }
}
