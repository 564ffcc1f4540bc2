//! `ai::random` の性能計測（1手選択）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use gomoku_core::ai::types::Ai;
use gomoku_core::{ai, engine};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 指定手数だけ進めた盤面を返す（途中で終局した場合はその時点で止める）。
fn board_after_plies(plies: u16) -> engine::Board {
    let mut black_agent = ai::random::Agent::new(u64::MIN);
    let mut game = engine::Game::standard();
    let mut white_agent = ai::random::Agent::new(u64::MIN.wrapping_add(1));

    for _turn in u16::MIN..plies {
        let request = match game.side_to_move() {
            engine::Stone::Black => game.request_move(&mut black_agent),
            engine::Stone::White => game.request_move(&mut white_agent),
            _ => None,
        };
        let square = match request {
            Some(value) => value,
            None => break,
        };
        match game.play(square) {
            Ok(engine::GameStatus::InProgress) => {}
            _ => break,
        }
    }

    game.board().clone()
}

/// ベンチ用に代表局面をいくつか用意する。
fn board_samples() -> [engine::Board; 3] {
    [
        engine::Board::standard(),
        board_after_plies(16),
        board_after_plies(48),
    ]
}

/// `random::Agent::select_move` を計測する。
fn bench_select_move(criterion: &mut Criterion) {
    let samples = board_samples();
    let mut group = criterion.benchmark_group("ai/random/select_move");

    for (index, board) in samples.iter().enumerate() {
        let bench_id = BenchmarkId::new("board", index);
        group.bench_with_input(bench_id, board, |bench, input| {
            bench.iter_batched(
                || (ai::random::Agent::new(u64::MIN), input.clone()),
                |(mut agent, mut board)| black_box(agent.select_move(&mut board)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_select_move(&mut criterion);
    criterion.final_summary();
}
