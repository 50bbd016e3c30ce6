use criterion::{black_box, criterion_group, criterion_main, Criterion};
use totp_engine::{hotp, Algorithm, Totp};

const KEY: &[u8] = b"12345678901234567890";

fn derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    for algorithm in [Algorithm::SHA1, Algorithm::SHA256, Algorithm::SHA512] {
        group.bench_function(algorithm.to_string(), |b| {
            b.iter(|| hotp::derive(algorithm, black_box(KEY), black_box(56_666_666), 6))
        });
    }
    group.finish();
}

fn check(c: &mut Criterion) {
    let totp = Totp::new("JBSWY3DPEHPK3PXP", 30).unwrap();
    let time = 1_700_000_000;

    c.bench_function("check_window_1_miss", |b| {
        b.iter(|| totp.check(black_box("000000"), 1, black_box(time)))
    });
    c.bench_function("check_window_10_miss", |b| {
        b.iter(|| totp.check(black_box("000000"), 10, black_box(time)))
    });
}

fn decode(c: &mut Criterion) {
    c.bench_function("decode_lenient", |b| {
        b.iter(|| totp_engine::codec::decode(black_box("jbsw y3dp ehpk 3pxp jbsw y3dp ehpk 3pxp")))
    });
}

criterion_group!(benches, derive, check, decode);
criterion_main!(benches);
