//! `ai::alphabeta` の性能計測（深さ別の1手選択、置換表の有無）。

use core::hint::black_box;
use core::time::Duration;
use criterion::BenchmarkId;
use criterion::Criterion;
use gomoku_core::{ai, engine};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args().sample_size(10)
}

/// 中盤を想定した代表局面（白番）を返す。
fn midgame_board() -> engine::Board {
    let rows = [
        "..........",
        "..........",
        "...XO.....",
        "...OXX....",
        "....XO....",
        "...O.X....",
        "......O...",
        "..........",
        "..........",
        "..........",
    ];
    engine::Board::from_rows(&rows, 5).unwrap_or_default()
}

/// 持ち時間で打ち切られない設定を返す。
fn config(depth: u8, transposition: bool) -> ai::SearchConfig {
    ai::SearchConfig::new(depth, Duration::from_secs(3600), engine::Stone::White)
        .unwrap_or_default()
        .with_transposition(transposition)
}

/// `alphabeta::Agent::choose_move` を深さ・置換表の有無ごとに計測する。
fn bench_choose_move(criterion: &mut Criterion) {
    let mut board = midgame_board();
    let mut group = criterion.benchmark_group("ai/alphabeta/choose_move");

    for depth in [1_u8, 2, 3] {
        for (label, transposition) in [("tt", true), ("no_tt", false)] {
            let agent = ai::Agent::new(config(depth, transposition));
            let bench_id = BenchmarkId::new(label, depth);
            group.bench_function(bench_id, |bench| {
                bench.iter(|| black_box(agent.choose_move(&mut board)));
            });
        }
    }

    group.finish();
}

/// 静的評価を計測する。
fn bench_evaluate(criterion: &mut Criterion) {
    let board = midgame_board();
    criterion.bench_function("ai/alphabeta/evaluate_midgame", |bench| {
        bench.iter(|| ai::alphabeta::eval::evaluate(black_box(&board), engine::Stone::White));
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();

    bench_choose_move(&mut criterion);
    bench_evaluate(&mut criterion);

    criterion.final_summary();
}
