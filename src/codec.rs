//! Structured-data codec: a bencode-family encoder/decoder for the
//! recursive `Int`/`String`/`List`/`Dict` value grammar carried on the
//! wire, bit-exact with the daemon this client talks to.
//!
//! Wire format:
//! - `Int`: `i<decimal>e` (no leading zeros, optional leading `-`).
//! - `String`: `<len>:<bytes>` where `bytes` is opaque, not UTF-8.
//! - `List`: `l<values>e`.
//! - `Dict`: `d<key-value pairs>e`, keys ascending byte-lexicographic.
//!
//! `Dict` is a `BTreeMap<Vec<u8>, Value>`: ordering the wire requires is
//! exactly the ordering `BTreeMap` already gives a `Vec<u8>` key, so
//! there is no separate sort step and no way to construct an
//! out-of-order dict.

use crate::error::ErrorKind;
use std::collections::BTreeMap;

/// Upper bound on a single encoded frame. `encode` fails with
/// `ErrorKind::SerializationFailed` past this size; `decode` has no
/// size opinion of its own; oversize inbound datagrams are the
/// client's concern; see `client::dispatch`.
pub const MAX_MESSAGE_SIZE: usize = 8192;

/// A structured-data value: the bencode-family `Int`/`String`/`List`/`Dict`
/// grammar this crate's wire protocol is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(Vec<u8>),
    List(Vec<Value>),
    Dict(BTreeMap<Vec<u8>, Value>),
}

impl Value {
    pub fn str(bytes: impl Into<Vec<u8>>) -> Value {
        Value::Str(bytes.into())
    }

    pub fn dict() -> Value {
        Value::Dict(BTreeMap::new())
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut BTreeMap<Vec<u8>, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&[u8]> {
        match self {
            Value::Str(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Dict lookup by string key; a convenience over the raw byte keys
    /// `Dict` stores, since every key used by this protocol is ASCII.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dict()?.get(key.as_bytes())
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        if let Some(map) = self.as_dict_mut() {
            map.insert(key.as_bytes().to_vec(), value);
        }
    }
}

/// Appends the encoded form of `value` to `out`, failing if the result
/// would exceed `MAX_MESSAGE_SIZE`.
pub fn encode(value: &Value, out: &mut Vec<u8>) -> Result<usize, ErrorKind> {
    let start = out.len();
    encode_value(value, out)?;
    if out.len() > MAX_MESSAGE_SIZE {
        out.truncate(start);
        return Err(ErrorKind::SerializationFailed);
    }
    Ok(out.len() - start)
}

/// Encodes `value` into a fresh buffer.
pub fn encode_to_vec(value: &Value) -> Result<Vec<u8>, ErrorKind> {
    let mut out = Vec::new();
    encode(value, &mut out)?;
    Ok(out)
}

fn encode_value(value: &Value, out: &mut Vec<u8>) -> Result<(), ErrorKind> {
    if out.len() > MAX_MESSAGE_SIZE {
        return Err(ErrorKind::SerializationFailed);
    }
    match value {
        Value::Int(n) => {
            out.push(b'i');
            out.extend_from_slice(n.to_string().as_bytes());
            out.push(b'e');
        }
        Value::Str(bytes) => {
            out.extend_from_slice(bytes.len().to_string().as_bytes());
            out.push(b':');
            out.extend_from_slice(bytes);
        }
        Value::List(items) => {
            out.push(b'l');
            for item in items {
                encode_value(item, out)?;
            }
            out.push(b'e');
        }
        Value::Dict(map) => {
            out.push(b'd');
            // BTreeMap iterates in ascending key order already.
            for (key, item) in map {
                encode_value(&Value::Str(key.clone()), out)?;
                encode_value(item, out)?;
            }
            out.push(b'e');
        }
    }
    Ok(())
}

/// Decodes the single top-level `Dict` in `buf`, rejecting trailing
/// garbage. Per the wire protocol every frame's top level is a dict.
pub fn decode(buf: &[u8]) -> Result<Value, ErrorKind> {
    let mut cursor = Cursor { buf, pos: 0 };
    let value = cursor.parse_value()?;
    if !matches!(value, Value::Dict(_)) {
        return Err(ErrorKind::DeserializationFailed);
    }
    if cursor.pos != buf.len() {
        return Err(ErrorKind::DeserializationFailed);
    }
    Ok(value)
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn take(&mut self) -> Result<u8, ErrorKind> {
        let byte = self.peek().ok_or(ErrorKind::DeserializationFailed)?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, byte: u8) -> Result<(), ErrorKind> {
        if self.take()? == byte {
            Ok(())
        } else {
            Err(ErrorKind::DeserializationFailed)
        }
    }

    fn parse_value(&mut self) -> Result<Value, ErrorKind> {
        match self.peek().ok_or(ErrorKind::DeserializationFailed)? {
            b'i' => self.parse_int(),
            b'l' => self.parse_list(),
            b'd' => self.parse_dict(),
            b'0'..=b'9' => self.parse_string().map(Value::Str),
            _ => Err(ErrorKind::DeserializationFailed),
        }
    }

    fn parse_int(&mut self) -> Result<Value, ErrorKind> {
        self.expect(b'i')?;
        let digits = self.take_until(b'e')?;
        let text = std::str::from_utf8(digits).map_err(|_| ErrorKind::DeserializationFailed)?;
        if text.is_empty()
            || text == "-"
            || (text.starts_with('0') && text != "0")
            || (text.starts_with("-0"))
        {
            return Err(ErrorKind::DeserializationFailed);
        }
        let n = text.parse::<i64>().map_err(|_| ErrorKind::DeserializationFailed)?;
        Ok(Value::Int(n))
    }

    fn parse_string(&mut self) -> Result<Vec<u8>, ErrorKind> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() || (digits.len() > 1 && digits[0] == b'0') {
            return Err(ErrorKind::DeserializationFailed);
        }
        let len: usize = std::str::from_utf8(digits)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(ErrorKind::DeserializationFailed)?;
        self.expect(b':')?;
        if self.pos + len > self.buf.len() {
            return Err(ErrorKind::DeserializationFailed);
        }
        let bytes = self.buf[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    fn parse_list(&mut self) -> Result<Value, ErrorKind> {
        self.expect(b'l')?;
        let mut items = Vec::new();
        loop {
            match self.peek().ok_or(ErrorKind::DeserializationFailed)? {
                b'e' => {
                    self.pos += 1;
                    break;
                }
                _ => items.push(self.parse_value()?),
            }
        }
        Ok(Value::List(items))
    }

    fn parse_dict(&mut self) -> Result<Value, ErrorKind> {
        self.expect(b'd')?;
        let mut map = BTreeMap::new();
        let mut last_key: Option<Vec<u8>> = None;
        loop {
            match self.peek().ok_or(ErrorKind::DeserializationFailed)? {
                b'e' => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    let key = self.parse_string()?;
                    if let Some(prev) = &last_key {
                        if key <= *prev {
                            return Err(ErrorKind::DeserializationFailed);
                        }
                    }
                    let value = self.parse_value()?;
                    last_key = Some(key.clone());
                    if map.insert(key, value).is_some() {
                        return Err(ErrorKind::DeserializationFailed);
                    }
                }
            }
        }
        Ok(Value::Dict(map))
    }

    fn take_until(&mut self, terminator: u8) -> Result<&'a [u8], ErrorKind> {
        let start = self.pos;
        while self.peek().ok_or(ErrorKind::DeserializationFailed)? != terminator {
            self.pos += 1;
        }
        let slice = &self.buf[start..self.pos];
        self.pos += 1; // consume terminator
        Ok(slice)
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.buf[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict_of(pairs: &[(&str, Value)]) -> Value {
        let mut value = Value::dict();
        for (key, v) in pairs {
            value.insert(key, v.clone());
        }
        value
    }

    #[test]
    fn encodes_int() {
        let mut out = Vec::new();
        encode(&Value::Int(-42), &mut out).unwrap();
        assert_eq!(out, b"i-42e");
    }

    #[test]
    fn encodes_string() {
        let mut out = Vec::new();
        encode(&Value::str(b"spam".to_vec()), &mut out).unwrap();
        assert_eq!(out, b"4:spam");
    }

    #[test]
    fn dict_keys_serialize_in_lexicographic_order() {
        let value = dict_of(&[("zeta", Value::Int(1)), ("alpha", Value::Int(2))]);
        let out = encode_to_vec(&value).unwrap();
        assert_eq!(out, b"d5:alphai2e4:zetai1ee");
    }

    #[test]
    fn round_trips_nested_values() {
        let value = dict_of(&[
            ("q", Value::str(b"auth".to_vec())),
            ("args", dict_of(&[("a", Value::List(vec![Value::Int(1), Value::Int(2)]))])),
        ]);
        let encoded = encode_to_vec(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let mut encoded = encode_to_vec(&Value::dict()).unwrap();
        encoded.extend_from_slice(b"garbage");
        assert_eq!(decode(&encoded), Err(ErrorKind::DeserializationFailed));
    }

    #[test]
    fn rejects_non_dict_top_level() {
        let encoded = encode_to_vec(&Value::Int(5)).unwrap();
        assert!(decode(b"i5e").is_err());
        let _ = encoded;
    }

    #[test]
    fn rejects_leading_zero_int() {
        assert_eq!(decode(b"d1:ai01ee"), Err(ErrorKind::DeserializationFailed));
    }

    #[test]
    fn rejects_duplicate_dict_keys() {
        assert_eq!(decode(b"d1:ai1e1:ai2ee"), Err(ErrorKind::DeserializationFailed));
    }

    #[test]
    fn encode_fails_over_max_message_size() {
        let big = Value::Str(vec![0u8; MAX_MESSAGE_SIZE + 1]);
        assert_eq!(encode_to_vec(&big), Err(ErrorKind::SerializationFailed));
    }
}
