//! Snapshot reduction benchmark suite.
//!
//! Benchmarks `reduce` and frame decoding at different snapshot sizes:
//! - Player counts: 10, 50, 200
//! - Loot items: 10x the player count
//!
//! Run with: cargo bench --bench reduce_snapshot
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use radar_client::dispatch::decode;
use radar_client::protocol::{Position, RawEntity, RawLoot};
use radar_client::radar::reduce;
use radar_client::{RawMessage, Snapshot, Thresholds, ViewModel};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const PLAYER_COUNTS: &[usize] = &[10, 50, 200];
const LOOT_PER_PLAYER: usize = 10;

// ============================================================================
// Fixtures
// ============================================================================

fn build_snapshot(players: usize, obscured_self: bool) -> Snapshot {
    let me = RawEntity {
        id: Some("me".into()),
        name: Some("me".into()),
        is_alive: Some(true),
        group: Some("g0".into()),
        is_obscured: Some(obscured_self),
        ..RawEntity::default()
    };

    let players = (0..players)
        .map(|i| RawEntity {
            id: Some(format!("p{i}")),
            name: Some(format!("player {i}")),
            position: Some(Position {
                x: i as f64,
                y: 0.0,
                z: -(i as f64),
            }),
            distance: Some(((i * 37) % 400) as f64),
            is_alive: Some(i % 4 != 0),
            is_npc: Some(i % 3 == 0),
            is_scavenger: Some(i % 5 == 0),
            wanted: Some(i % 7 == 0),
            group: Some(format!("g{}", i % 6)),
            seconds_since_update: Some((i % 90) as f64),
            loot_value: Some(((i * 7919) % 90_000) as f64),
            ..RawEntity::default()
        })
        .collect::<Vec<_>>();

    let loot = (0..players.len() * LOOT_PER_PLAYER)
        .map(|i| RawLoot {
            id: Some(format!("l{i}")),
            name: Some(format!("item {i}")),
            distance: Some(((i * 13) % 500) as f64),
            total_price: Some(((i * 104_729) % 150_000) as f64),
            wanted: Some(i % 50 == 0),
            ..RawLoot::default()
        })
        .collect();

    Snapshot {
        me: Some(me),
        players: Some(players),
        loot: Some(loot),
        exits: None,
    }
}

// ============================================================================
// Benchmark: Reduce
// ============================================================================

fn bench_reduce(c: &mut Criterion) {
    let thresholds = Thresholds::new();
    let previous = ViewModel::default();

    let mut group = c.benchmark_group("reduce");

    for &count in PLAYER_COUNTS {
        group.throughput(Throughput::Elements(count as u64));

        for obscured in [false, true] {
            let snapshot = build_snapshot(count, obscured);
            let id = if obscured { "by_staleness" } else { "by_distance" };

            group.bench_with_input(BenchmarkId::new(id, count), &snapshot, |b, snapshot| {
                b.iter(|| reduce(black_box(&previous), black_box(snapshot), &thresholds));
            });
        }
    }

    group.finish();
}

// ============================================================================
// Benchmark: Decode
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &count in PLAYER_COUNTS {
        let mut frame = serde_json::to_value(build_snapshot(count, false))
            .expect("snapshot serializes");
        frame["type"] = "SNAPSHOT".into();
        let message = RawMessage::new(frame.to_string());

        group.throughput(Throughput::Bytes(message.as_str().len() as u64));
        group.bench_with_input(BenchmarkId::new("snapshot", count), &message, |b, message| {
            b.iter(|| decode(black_box(message)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduce, bench_decode);
criterion_main!(benches);
