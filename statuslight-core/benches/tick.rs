use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use statuslight_core::{BuzzerConfig, BuzzerNode, ChannelTable, LedConfig, LedNode};
use statuslight_types::{Reading, Timestamp};

/// Benchmark the update path (hot path, called from transport callbacks)
fn bench_record(c: &mut Criterion) {
    let table = ChannelTable::new(Timestamp::ZERO);
    let now = Timestamp::from_secs(1);

    c.bench_function("record_update", |b| {
        b.iter(|| {
            table.record(black_box(Reading::Battery(1)), now);
        });
    });
}

/// Benchmark one LED tick with fresh data
fn bench_led_tick(c: &mut Criterion) {
    let table = ChannelTable::new(Timestamp::ZERO);
    let mut leds = LedNode::new(&table, LedConfig::default());
    let mut now = Timestamp::ZERO;

    c.bench_function("led_tick", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(200);
            table.record(Reading::Battery(1), now);
            table.record(Reading::Armed(true), now);
            black_box(leds.tick(now));
        });
    });
}

/// Benchmark one LED tick while both channels are stale
fn bench_led_tick_stale(c: &mut Criterion) {
    let table = ChannelTable::new(Timestamp::ZERO);
    let mut leds = LedNode::new(&table, LedConfig::default());
    let mut now = Timestamp::from_secs(10);

    c.bench_function("led_tick_stale", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(200);
            black_box(leds.tick(now));
        });
    });
}

/// Benchmark one buzzer tick with an active alarm
fn bench_buzzer_tick(c: &mut Criterion) {
    let table = ChannelTable::new(Timestamp::ZERO);
    let mut buzzer = BuzzerNode::new(&table, BuzzerConfig::default(), Timestamp::ZERO);
    let mut now = Timestamp::ZERO;

    c.bench_function("buzzer_tick", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(100);
            table.record(Reading::CellVoltage(3.1), now);
            black_box(buzzer.tick(now));
        });
    });
}

criterion_group!(
    benches,
    bench_record,
    bench_led_tick,
    bench_led_tick_stale,
    bench_buzzer_tick,
);

criterion_main!(benches);
