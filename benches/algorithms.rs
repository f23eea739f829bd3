use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use cyclic_queue::{Order, QueueArena, QueueId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn random_texts(len: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let mut text = String::new();
            for _ in 0..rng.random_range(1..=8usize) {
                text.push((b'a' + rng.random_range(0..26u8)) as char);
            }
            text
        })
        .collect()
}

fn filled(texts: &[String]) -> (QueueArena, QueueId) {
    let mut arena = QueueArena::new();
    let queue = arena.new_queue().unwrap();
    for text in texts {
        arena.push_back(queue, text).unwrap();
    }
    (arena, queue)
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for &len in &[64usize, 512, 4096] {
        let texts = random_texts(len, 11);

        group.bench_with_input(BenchmarkId::new("queue", len), &texts, |b, texts| {
            b.iter_batched(
                || filled(texts),
                |(mut arena, queue)| {
                    arena.sort(queue, Order::Ascending);
                    arena
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("vec", len), &texts, |b, texts| {
            b.iter_batched(
                || texts.to_vec(),
                |mut values| {
                    values.sort();
                    values
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &len in &[64usize, 512, 4096] {
        let mut left = random_texts(len, 5);
        let mut right = random_texts(len, 6);
        left.sort();
        right.sort();

        group.bench_with_input(
            BenchmarkId::from_parameter(len),
            &(left, right),
            |b, (left, right)| {
                b.iter_batched(
                    || {
                        let (mut arena, dst) = filled(left);
                        let src = arena.new_queue().unwrap();
                        for text in right {
                            arena.push_back(src, text).unwrap();
                        }
                        (arena, dst, src)
                    },
                    |(mut arena, dst, src)| {
                        arena.merge(dst, src, Order::Ascending);
                        arena
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");
    for &len in &[64usize, 256] {
        let texts = random_texts(len, 3);

        group.bench_with_input(BenchmarkId::new("queue", len), &texts, |b, texts| {
            let mut rng = StdRng::seed_from_u64(17);
            b.iter_batched(
                || filled(texts),
                |(mut arena, queue)| {
                    arena.shuffle(queue, &mut rng);
                    arena
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("vec", len), &texts, |b, texts| {
            let mut rng = StdRng::seed_from_u64(17);
            b.iter_batched(
                || texts.to_vec(),
                |mut values| {
                    values.shuffle(&mut rng);
                    values
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_merge, bench_shuffle);
criterion_main!(benches);
