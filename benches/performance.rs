//! Performance benchmarks for the history engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rewind::{HistoryConfig, HistoryManager, Result, Versioned};

/// Fixed-size buffer entity so capture cost is constant per iteration.
struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }
}

impl Versioned for Buffer {
    type State = Vec<u8>;

    fn capture(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn restore(&mut self, state: &Vec<u8>) -> Result<()> {
        self.data.clone_from(state);
        Ok(())
    }
}

/// Benchmark checkpoint throughput at steady state (history full, every
/// push evicts).
fn bench_checkpoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkpoint");

    for capacity in [16, 256, 4096] {
        group.bench_with_input(
            BenchmarkId::new("capacity", capacity),
            &capacity,
            |b, &capacity| {
                let mut mgr = HistoryManager::new(
                    Buffer::new(1024),
                    HistoryConfig::with_capacity(capacity),
                )
                .unwrap();

                // Fill to capacity so each checkpoint evicts.
                for _ in 0..capacity {
                    mgr.checkpoint();
                }

                b.iter(|| {
                    let next = mgr.entity().data[0].wrapping_add(1);
                    mgr.entity_mut().data[0] = next;
                    black_box(mgr.checkpoint());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark an undo/redo cycle at varying history depths.
fn bench_undo_redo_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_redo_cycle");

    for depth in [8, 64, 512] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            let mut mgr =
                HistoryManager::new(Buffer::new(1024), HistoryConfig::with_capacity(depth))
                    .unwrap();
            for _ in 0..depth {
                mgr.checkpoint();
            }

            b.iter(|| {
                mgr.undo().unwrap();
                mgr.redo().unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark notification fan-out across observer counts.
fn bench_notify_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify_fanout");

    for observers in [1, 16, 128] {
        group.bench_with_input(
            BenchmarkId::new("observers", observers),
            &observers,
            |b, &observers| {
                let mut mgr =
                    HistoryManager::new(Buffer::new(64), HistoryConfig::with_capacity(16))
                        .unwrap();
                for _ in 0..observers {
                    mgr.notifier().subscribe_fn(|event| {
                        black_box(event.undo_len);
                        Ok(())
                    });
                }

                b.iter(|| {
                    black_box(mgr.checkpoint());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_checkpoint,
    bench_undo_redo_cycle,
    bench_notify_fanout
);
criterion_main!(benches);
