use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use uttt::eval::evaluate;
use uttt::search::{search_parallel, Searcher};
use uttt::{Action, SuperBoard};

/// A position with no required sub-board, so the root has many candidates
fn open_position() -> SuperBoard {
    let mut board = SuperBoard::new();
    for (a, b, c, d) in [
        (1, 2, 0, 2),
        (0, 2, 1, 2),
        (1, 2, 2, 2),
        (2, 2, 1, 2),
        (1, 2, 1, 2),
    ] {
        board
            .play_move(Action::new(a, b, c, d))
            .expect("opening moves are legal");
    }
    board
}

fn bench_evaluate(c: &mut Criterion) {
    let board = open_position();
    c.bench_function("evaluate", |b| b.iter(|| evaluate(black_box(&board))));
}

fn bench_legal_actions(c: &mut Criterion) {
    let board = open_position();
    c.bench_function("legal_actions", |b| b.iter(|| black_box(&board).legal_actions()));
}

fn bench_search_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    for depth in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::new("sequential", depth), &depth, |b, &depth| {
            let mut board = open_position();
            b.iter(|| Searcher::new().search_root(&mut board, depth))
        });
        group.bench_with_input(BenchmarkId::new("parallel_4", depth), &depth, |b, &depth| {
            let board = open_position();
            b.iter(|| search_parallel(&board, depth, 4))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_legal_actions, bench_search_depth);
criterion_main!(benches);
