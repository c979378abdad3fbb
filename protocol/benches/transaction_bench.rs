// Transaction hot-path benchmarks for the Keel protocol.
//
// Covers decoding, first-time hashing versus the cached read path, sender
// recovery, and sealing selection over a pool.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use keel_protocol::crypto::{Ed25519Suite, KeyPair};
use keel_protocol::ledger::LedgerConfig;
use keel_protocol::transaction::{
    release_sealed, select_for_sealing, sign_transaction, Transaction, TransactionFactory,
};
use keel_protocol::types::{Address, Nonce};

fn signed_tx(factory: &TransactionFactory, keypair: &KeyPair, nonce: u64) -> Arc<Transaction> {
    let mut fields = factory
        .builder()
        .nonce(Nonce::from(nonce))
        .block_limit(1_000)
        .to(Address::repeat_byte(0xAA))
        .input(vec![0xAB; 128])
        .build_fields();
    sign_transaction(
        &mut fields,
        factory.codec().as_ref(),
        &Ed25519Suite::default(),
        keypair,
    );
    factory.create(fields)
}

fn bench_decode(c: &mut Criterion) {
    let factory = TransactionFactory::default();
    let wire = signed_tx(&factory, &KeyPair::generate(), 1).encode();

    c.bench_function("transaction/decode", |b| {
        b.iter(|| factory.decode(&wire, true));
    });
}

fn bench_hash(c: &mut Criterion) {
    let factory = TransactionFactory::default();
    let wire = signed_tx(&factory, &KeyPair::generate(), 1).encode();

    c.bench_function("transaction/hash_first", |b| {
        b.iter_batched(
            || factory.decode(&wire, true),
            |tx| tx.map(|tx| tx.hash()),
            criterion::BatchSize::SmallInput,
        );
    });

    let cached = signed_tx(&factory, &KeyPair::generate(), 2);
    cached.hash();
    c.bench_function("transaction/hash_cached", |b| {
        b.iter(|| cached.hash());
    });
}

fn bench_verify(c: &mut Criterion) {
    let factory = TransactionFactory::default();
    let wire = signed_tx(&factory, &KeyPair::generate(), 1).encode();

    c.bench_function("transaction/verify_first", |b| {
        b.iter_batched(
            || factory.decode(&wire, true),
            |tx| tx.map(|tx| tx.verify().is_ok()),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_select_for_sealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/select_for_sealing");
    let factory = TransactionFactory::default();
    let keypair = KeyPair::generate();

    for size in [100usize, 1_000, 5_000] {
        let pool: Vec<_> = (0..size as u64)
            .map(|n| signed_tx(&factory, &keypair, n))
            .collect();
        let config = LedgerConfig::new();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            b.iter(|| {
                let picked = select_for_sealing(pool, &config);
                release_sealed(&picked);
                picked.len()
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_hash,
    bench_verify,
    bench_select_for_sealing
);
criterion_main!(benches);
