use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

use twenty48::engine::{movable, resolve, spawn_random_tile, Grid, Move};
use twenty48::session::Session;

fn corpus() -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = Session::new(4, 2, &mut rng);
    let mut grids = vec![session.grid().clone()];
    // Deterministic mid-game boards at a variety of densities
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..40 {
        let snapshot = session.apply_move(seq[i % seq.len()], &mut rng);
        if snapshot.over || snapshot.won {
            session.restart(&mut rng);
        }
        grids.push(session.grid().clone());
    }
    grids
}

fn bench_resolve(c: &mut Criterion) {
    for direction in Move::ALL {
        c.bench_function(&format!("resolve/{direction}"), |bch| {
            let grids = corpus();
            bch.iter_batched(
                || grids.clone(),
                |mut grids| {
                    let mut acc = 0u64;
                    for grid in &mut grids {
                        acc = acc.wrapping_add(resolve(grid, direction).score_delta);
                    }
                    black_box(acc)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_queries(c: &mut Criterion) {
    c.bench_function("query/movable", |bch| {
        let grids = corpus();
        bch.iter(|| {
            let mut acc = 0usize;
            for grid in &grids {
                acc += usize::from(movable(grid));
            }
            black_box(acc)
        })
    });
    c.bench_function("grid/spawn_random_tile", |bch| {
        bch.iter_batched(
            || (Grid::new(4), StdRng::seed_from_u64(7)),
            |(mut grid, mut rng)| {
                for _ in 0..16 {
                    spawn_random_tile(&mut grid, &mut rng);
                }
                black_box(grid)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(engine_ops, bench_resolve, bench_queries);
criterion_main!(engine_ops);
