use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rns_admin::codec::{self, Value};
use rns_admin::crypto;

fn sample_cookie_reply() -> Value {
    let mut value = Value::dict();
    value.insert("txid", Value::str(crypto::encode_handle(0x1234_5678).into_bytes()));
    value.insert("cookie", Value::str(b"1234567890".to_vec()));
    value
}

fn sample_auth_request() -> Value {
    let mut args = Value::dict();
    args.insert("page", Value::Int(0));

    let mut value = Value::dict();
    value.insert("q", Value::str(b"auth".to_vec()));
    value.insert("aq", Value::str(b"RouterModule_getPeers".to_vec()));
    value.insert("args", args);
    value.insert("txid", Value::str(crypto::encode_handle(1).into_bytes()));
    value.insert("cookie", Value::str(b"1234567890".to_vec()));
    value.insert("hash", Value::str(crypto::password_cookie_hash(b"bench-pw", 1234567890).into_bytes()));
    value
}

fn bench_encode(c: &mut Criterion) {
    let request = sample_auth_request();
    c.bench_function("admin_codec/encode", |b| {
        b.iter(|| {
            let bytes = codec::encode_to_vec(black_box(&request)).expect("encode should succeed");
            black_box(bytes);
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let encoded = codec::encode_to_vec(&sample_cookie_reply()).unwrap();
    c.bench_function("admin_codec/decode", |b| {
        b.iter(|| {
            let value = codec::decode(black_box(&encoded)).expect("decode should succeed");
            black_box(value);
        });
    });
}

fn bench_password_cookie_hash(c: &mut Criterion) {
    c.bench_function("admin_crypto/password_cookie_hash", |b| {
        b.iter(|| {
            let hash = crypto::password_cookie_hash(black_box(b"bench-pw"), black_box(1234567890));
            black_box(hash);
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_password_cookie_hash);
criterion_main!(benches);
