use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chessmint::market::{build_matching_order, build_sell_order};
use chessmint::protocol::{decode_fingerprint, encode_fen, encode_piece_codes, parse_fen};

use alloy_primitives::{address, U256};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
const MIDDLEGAME_FEN: &str = "r1bq1rk1/pp2bppp/2n1pn2/3p4/2PP4/2N1PN2/PP3PPP/R2QKB1R";

fn bench_parse_fen(c: &mut Criterion) {
    c.bench_function("parse_fen_start", |b| {
        b.iter(|| parse_fen(black_box(START_FEN)).unwrap())
    });
}

fn bench_fingerprint(c: &mut Criterion) {
    let position = parse_fen(MIDDLEGAME_FEN).unwrap();
    c.bench_function("fingerprint_middlegame", |b| {
        b.iter(|| black_box(&position).fingerprint())
    });
}

fn bench_piece_codes(c: &mut Criterion) {
    let codes = [
        ("e1", "wK"),
        ("d1", "wQ"),
        ("a1", "wR"),
        ("h1", "wR"),
        ("e8", "bK"),
        ("d8", "bQ"),
        ("e4", "wP"),
        ("e5", "bP"),
    ];
    c.bench_function("encode_piece_codes_8", |b| {
        b.iter(|| encode_piece_codes(black_box(codes)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let fp = parse_fen(START_FEN).unwrap().fingerprint();
    c.bench_function("decode_to_fen_start", |b| {
        b.iter(|| encode_fen(&decode_fingerprint(black_box(fp)).unwrap()))
    });
}

fn bench_build_orders(c: &mut Criterion) {
    let maker = address!("0x1111111111111111111111111111111111111111");
    let taker = address!("0x2222222222222222222222222222222222222222");
    let nft = address!("0x0FAa54C764F125F9799a0062b7df062C502875F2");
    c.bench_function("build_sell_and_match", |b| {
        b.iter(|| {
            let (token, price) = (U256::from(7u8), U256::from(10u64.pow(18)));
            let sell = build_sell_order(maker, nft, token, price, U256::from(1u8)).unwrap();
            build_matching_order(black_box(&sell), taker, U256::ZERO).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_parse_fen,
    bench_fingerprint,
    bench_piece_codes,
    bench_decode,
    bench_build_orders,
);
criterion_main!(benches);
