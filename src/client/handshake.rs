impl AdminClient {
    /// Issues one authenticated call: `function` with `args`, driven
    /// through the cookie handshake automatically. Resolves once the
    /// daemon replies, the call times out, or the cookie leg comes back
    /// with no cookie.
    pub async fn rpc_call(&self, function: impl Into<String>, args: Value) -> CallResult {
        let mut auth_payload = Value::dict();
        auth_payload.insert("q", Value::str(b"auth".to_vec()));
        auth_payload.insert("aq", Value::str(function.into().into_bytes()));
        auth_payload.insert("args", args);

        let (reply_tx, reply_rx) = oneshot::channel();
        self.start_cookie_phase(auth_payload, reply_tx);

        match reply_rx.await {
            Ok(result) => result,
            // The sender was dropped without sending, which only
            // happens if a handle left the table by some path other
            // than `finish` below — an invariant violation in this
            // crate, not an outcome the daemon can cause.
            Err(_) => CallResult::failed(ErrorKind::Internal),
        }
    }

    fn start_cookie_phase(&self, auth_payload: Value, reply: oneshot::Sender<CallResult>) {
        let record = RequestRecord {
            phase: Phase::AwaitingCookie,
            payload: auth_payload,
            timeout: None,
            reply: Some(reply),
        };
        let handle = self.inner.table.borrow_mut().insert(record);

        let mut cookie_request = Value::dict();
        cookie_request.insert("q", Value::str(b"cookie".to_vec()));
        self.send(handle, cookie_request);
    }

    pub(crate) fn begin_auth_phase(&self, handle: u32, cookie: u64) {
        let payload = {
            let mut table = self.inner.table.borrow_mut();
            let Some(record) = table.get_mut(handle) else { return };
            record.phase = Phase::AwaitingResult;
            record.payload.clone()
        };

        let hash = crypto::password_cookie_hash(&self.inner.password, cookie);
        let mut auth_request = payload;
        auth_request.insert("cookie", Value::str(cookie.to_string().into_bytes()));
        auth_request.insert("hash", Value::str(hash.into_bytes()));
        self.send(handle, auth_request);
    }

    /// Stamps `payload` with this handle's `txid`, arms its timeout,
    /// encodes, and sends — finishing the call with
    /// `ErrorKind::SerializationFailed` if the frame can't be built, or
    /// a socket-related error if the transport rejects the send.
    ///
    /// Auth frames (the ones carrying a `hash` field) get the second
    /// commitment pass here: the first-pass `hash` covers only
    /// `password ++ cookie` so the daemon has something to check before
    /// the frame exists; once `txid` is stamped and the frame is
    /// serialized, `hash` is overwritten with the hash of that
    /// serialized frame and the frame is re-serialized before sending —
    /// the re-serialize option the commitment scheme explicitly allows
    /// in place of patching the already-serialized bytes in place.
    fn send(&self, handle: u32, mut payload: Value) {
        payload.insert("txid", Value::str(crypto::encode_handle(handle).into_bytes()));
        self.rearm_timeout(handle);

        let is_auth_frame = payload.get("hash").is_some();

        let mut bytes = match crate::codec::encode_to_vec(&payload) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.finish(handle, CallResult::failed(err));
                return;
            }
        };

        if is_auth_frame {
            let frame_hash = crypto::sha256_hex(&bytes);
            payload.insert("hash", Value::str(frame_hash.into_bytes()));
            bytes = match crate::codec::encode_to_vec(&payload) {
                Ok(bytes) => bytes,
                Err(err) => {
                    self.finish(handle, CallResult::failed(err));
                    return;
                }
            };
        }

        if let Err(err) = self.inner.transport.send(&bytes, self.inner.target_addr) {
            let kind = if err.kind() == std::io::ErrorKind::WouldBlock {
                ErrorKind::SocketNotReady
            } else {
                log::warn!("admin client send to {} failed: {err}", self.inner.target_addr);
                ErrorKind::ErrorReadingFromSocket
            };
            self.finish(handle, CallResult::failed(kind));
        }
    }

    fn arm_timeout(&self, handle: u32) {
        let client = self.clone();
        let timeout = timeout::set_timeout(self.inner.millis_to_wait, move || {
            client.finish(handle, CallResult::failed(ErrorKind::Timeout));
        });
        if let Some(record) = self.inner.table.borrow_mut().get_mut(handle) {
            record.timeout = Some(timeout);
        }
    }

    /// Replaces the handle's timeout with a fresh one for the leg about
    /// to go out, so the previous leg's deadline can't fire after this
    /// leg has already superseded it.
    fn rearm_timeout(&self, handle: u32) {
        if let Some(record) = self.inner.table.borrow_mut().get_mut(handle) {
            record.timeout = None;
        }
        self.arm_timeout(handle);
    }

    /// Removes `handle`'s record, cancels its timeout, and fulfills its
    /// promise with `result`. The only place a call's lifecycle ends.
    pub(crate) fn finish(&self, handle: u32, result: CallResult) {
        let Some(mut record) = self.inner.table.borrow_mut().remove(handle) else {
            return;
        };
        record.timeout.take();
        if let Some(reply) = record.reply.take() {
            let _ = reply.send(result);
        }
    }
}
