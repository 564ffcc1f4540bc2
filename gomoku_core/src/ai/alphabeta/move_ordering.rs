use crate::engine::board::Board;
use crate::engine::types::{Square, Stone};

use super::eval::position_score;

/// 候補手とみなす範囲（既存の石からのチェビシェフ距離）。
const CANDIDATE_RADIUS: i16 = 2;

/// これ未満の石数なら全空きマスを候補にする。
const SPARSE_STONES: usize = 2;

/// 攻めの重み（10 倍スケール）。
const ATTACK_WEIGHT: u64 = 10;

/// 守りの重み（10 倍スケール、攻めより 1 割高い）。
const DEFENSE_WEIGHT: u64 = 11;

/// 候補手を生成し、簡易評価の降順に並べて返す。
///
/// - 既存の石から距離 2 以内の空きマスのみ（石が 2 個未満なら全空きマス）
/// - 候補がなく盤に石があれば全空きマス
/// - 同点は行優先の順序を保つ
///
/// 評価のための仮置きはすべて戻してから返る。
#[inline]
#[must_use]
pub fn order_moves(board: &mut Board, ai_side: Stone) -> Vec<Square> {
    let sparse = board.occupied_count() < SPARSE_STONES;

    let mut scored: Vec<(u64, Square)> = board
        .empty_squares()
        .into_iter()
        .filter(|&square| sparse || has_neighbor(board, square))
        .map(|square| (0_u64, square))
        .collect();

    if scored.is_empty() {
        return if board.occupied_count() > 0 {
            board.empty_squares()
        } else {
            Vec::new()
        };
    }

    for entry in &mut scored {
        entry.0 = pre_score(board, entry.1, ai_side);
    }

    // 安定ソートなので同点は走査順のまま。
    scored.sort_by(|&(score_a, _), &(score_b, _)| score_b.cmp(&score_a));
    scored.into_iter().map(|(_, square)| square).collect()
}

/// 距離 `CANDIDATE_RADIUS` 以内に石があるかを返す。
fn has_neighbor(board: &Board, square: Square) -> bool {
    let radius = CANDIDATE_RADIUS;
    (radius.wrapping_neg()..=radius).any(|d_row| {
        (radius.wrapping_neg()..=radius).any(|d_col| {
            square
                .offset(d_row, d_col)
                .is_some_and(|near| board.stone_at(near).is_some())
        })
    })
}

/// 攻め（AI が置く）と守り（相手が置く）の評価を合成する。
///
/// `max(攻め, 守り × 1.1)` を 10 倍した整数値。
fn pre_score(board: &mut Board, square: Square, ai_side: Stone) -> u64 {
    let attack = trial_score(board, square, ai_side);
    let defense = trial_score(board, square, ai_side.opponent());
    attack
        .wrapping_mul(ATTACK_WEIGHT)
        .max(defense.wrapping_mul(DEFENSE_WEIGHT))
}

/// `side` の石を仮置きしたときの `position_score`。
fn trial_score(board: &mut Board, square: Square, side: Stone) -> u64 {
    match board.place_scoped(square, side) {
        Ok(placed) => u64::from(position_score(placed.board(), placed.square(), side)),
        Err(_err) => 0,
    }
}
