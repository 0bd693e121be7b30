use blackboard_table::{Blackboard, Mode};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_pin(c: &mut Criterion) {
    c.bench_function("blackboard_pin_10k", |b| {
        b.iter_batched(
            || Blackboard::<String, u64>::new(Mode::Fifo),
            |mut board| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    board.pin(key(x), i as u64);
                }
                black_box(board)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_peek_hit(c: &mut Criterion) {
    c.bench_function("blackboard_peek_hit", |b| {
        let mut board = Blackboard::new(Mode::Fifo);
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            board.pin(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(board.peek(k.as_str()));
        })
    });
}

fn bench_peek_miss(c: &mut Criterion) {
    c.bench_function("blackboard_peek_miss", |b| {
        let mut board = Blackboard::new(Mode::Fifo);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            board.pin(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the board
            let k = key(miss.next().unwrap());
            black_box(board.peek(k.as_str()));
        })
    });
}

fn bench_pin_detach_churn(c: &mut Criterion) {
    c.bench_function("blackboard_pin_detach_churn", |b| {
        let mut board = Blackboard::new(Mode::Lifo);
        board.pin("hot".to_string(), 0u64);
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            board.pin("hot".to_string(), i);
            black_box(board.detach("hot"));
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_pin, bench_peek_hit, bench_peek_miss, bench_pin_detach_churn
}
criterion_main!(benches);
