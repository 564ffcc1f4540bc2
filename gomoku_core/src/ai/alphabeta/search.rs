use core::time::Duration;

use tracing::{debug, trace};

use crate::engine::board::Board;
use crate::engine::types::{Square, Stone};

use super::config::SearchConfig;
use super::eval::evaluate;
use super::limits::{Clock, SearchAbort, SearchContext, SearchStats};
use super::move_ordering::order_moves;
use super::tt::Bound;
use super::{INF, WIN_SCORE};

/// 2手目で相手の石の隣を調べる順序（北西、北、北東、西、東、南西、南、南東）。
pub(super) const OPENING_OFFSETS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 探索結果。
#[derive(Clone, Copy, Debug)]
pub(super) struct SearchResult {
    /// ルートで選択した最善手。
    best_move: Option<Square>,
    /// `best_move` の評価値（AI 視点）。
    best_score: i32,
    /// 探索を完了した深さ（定跡・フォールバックなら 0）。
    completed_depth: u8,
    /// 探索にかかった時間。
    elapsed: Duration,
    /// 探索統計。
    stats: SearchStats,
}

impl SearchResult {
    /// ルートで選択した最善手を返す。
    pub(super) const fn best_move(&self) -> Option<Square> {
        self.best_move
    }

    #[cfg(test)]
    /// `best_move` の評価値を返す（テスト用）。
    pub(super) const fn best_score(&self) -> i32 {
        self.best_score
    }

    #[cfg(test)]
    /// 探索を完了した深さを返す（テスト用）。
    pub(super) const fn completed_depth(&self) -> u8 {
        self.completed_depth
    }

    /// 現在のコンテキストから結果をまとめる。
    fn new(best_move: Option<Square>, best_score: i32, completed_depth: u8, ctx: &SearchContext<'_>) -> Self {
        Self {
            best_move,
            best_score,
            completed_depth,
            elapsed: ctx.elapsed(),
            stats: ctx.stats(),
        }
    }

    #[cfg(test)]
    /// 探索統計を返す（テスト用）。
    pub(super) const fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// 探索ノード（再帰呼び出し1回分の状態）。
#[derive(Clone, Copy, Debug)]
pub(super) struct Node {
    /// 残り探索深さ。
    depth: u8,
    /// 局面キー（手番込み）。
    key: u64,
    /// 直前に置かれた石のマス。
    last_move: Option<Square>,
    /// AI の手番（最大化ノード）か。
    maximizing: bool,
}

impl Node {
    /// `square` に `stone` を置いた後の子ノードを返す。
    fn child(self, square: Square, stone: Stone, ctx: &SearchContext<'_>) -> Self {
        Self {
            depth: self.depth.saturating_sub(1),
            key: ctx.zobrist().play(self.key, square, stone),
            last_move: Some(square),
            maximizing: !self.maximizing,
        }
    }

    /// AI の手番であるルートノードを返す。
    fn root(board: &Board, depth: u8, ctx: &SearchContext<'_>) -> Self {
        Self {
            depth,
            key: ctx.zobrist().hash(board, true),
            last_move: None,
            maximizing: true,
        }
    }
}

/// 着手決定のエントリポイント。
///
/// 盤が埋まっていれば `None`。序盤2手は定跡で即答し、それ以外は
/// 反復深化で探索する。盤面は呼び出し前と同一の状態で返る。
pub(super) fn search_root(board: &mut Board, config: SearchConfig, clock: &dyn Clock) -> SearchResult {
    let mut ctx = SearchContext::new(config, board.side_len(), clock);

    if board.is_full() {
        return SearchResult::new(None, 0, 0, &ctx);
    }

    if let Some(square) = opening_move(board) {
        debug!(row = square.row(), col = square.col(), "opening move");
        return SearchResult::new(Some(square), 0, 0, &ctx);
    }

    let candidates = order_moves(board, config.ai_side());
    let result = iterative_deepening(board, &candidates, config.max_depth(), &mut ctx);

    let stats = result.stats;
    debug!(
        best_move = ?result.best_move,
        score = result.best_score,
        depth = result.completed_depth,
        nodes = stats.nodes(),
        cutoffs = stats.cutoffs(),
        tt_hits = stats.tt_hits(),
        elapsed_ms = u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
        "move chosen"
    );
    result
}

/// 序盤の定跡手。
///
/// - 石がなければ中央
/// - 石が1つならその周囲8マスを `OPENING_OFFSETS` の順に調べ、最初の空きマス
fn opening_move(board: &Board) -> Option<Square> {
    match board.occupied_count() {
        0 => {
            let center = board.side_len().checked_div(2).unwrap_or(u8::MIN);
            Some(Square::new(center, center))
        }
        1 => board.occupied_squares().first().and_then(|&stone| {
            OPENING_OFFSETS
                .iter()
                .filter_map(|&(d_row, d_col)| stone.offset(d_row, d_col))
                .find(|&square| board.is_legal(square))
        }),
        _ => None,
    }
}

/// 反復深化によるルート探索。
///
/// 深さを最後まで探索し終えたときだけ最善手を更新する。持ち時間切れで
/// 途中になった深さの結果は捨て、直前に完了した深さの手を返す
/// （1つも完了していなければ候補手の先頭）。
fn iterative_deepening(
    board: &mut Board,
    candidates: &[Square],
    max_depth: u8,
    ctx: &mut SearchContext<'_>,
) -> SearchResult {
    let mut best_move = candidates.first().copied();
    let mut best_score: i32 = 0;
    let mut completed_depth: u8 = 0;

    for depth in 1..=max_depth {
        if ctx.expired() {
            break;
        }
        match root_search(board, candidates, depth, ctx) {
            Ok((square, score)) => {
                best_move = Some(square);
                best_score = score;
                completed_depth = depth;
                trace!(depth, score, nodes = ctx.stats().nodes(), "depth completed");
            }
            Err(SearchAbort) => {
                debug!(depth, "time budget expired before the depth completed");
                break;
            }
        }
    }

    SearchResult::new(best_move, best_score, completed_depth, ctx)
}

/// ルート探索（指定深さの探索）。
///
/// 各候補手の前に時計を確認し、時間切れなら `SearchAbort` を返す。
fn root_search(
    board: &mut Board,
    candidates: &[Square],
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> Result<(Square, i32), SearchAbort> {
    let root = Node::root(board, depth, ctx);
    let ai_side = ctx.ai_side();
    let mut alpha = INF.wrapping_neg();
    let beta = INF;
    let mut best: Option<(Square, i32)> = None;

    for &square in candidates {
        if ctx.expired() {
            return Err(SearchAbort);
        }
        let child = root.child(square, ai_side, ctx);
        let score = match board.place_scoped(square, ai_side) {
            Ok(mut placed) => minimax(placed.board_mut(), child, alpha, beta, ctx),
            Err(_err) => continue,
        };
        // 時間切れ後の値は静的評価で打ち切られているので採用しない。
        if ctx.timed_out() {
            return Err(SearchAbort);
        }

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((square, score));
        }
        if score > alpha {
            alpha = score;
        }
    }

    best.ok_or(SearchAbort)
}

/// 置換表を参照し、探索窓（`alpha`/`beta`）を狭める。
///
/// - `Exact` の場合はその値を即座に返す。
/// - `Lower`/`Upper` の場合は `alpha`/`beta` を更新し、カットできるなら値を返す。
/// - 更新後に `alpha >= beta` となった場合も値を返す（カット）。
fn tt_probe_adjust_window(
    key: u64,
    depth: u8,
    alpha: &mut i32,
    beta: &mut i32,
    ctx: &SearchContext<'_>,
) -> Option<i32> {
    let entry = match ctx.tt_probe(key, depth) {
        Some(value) => value,
        None => return None,
    };
    let value = entry.value();

    match entry.bound() {
        Bound::Exact => return Some(value),
        Bound::Lower => {
            if value >= *beta {
                return Some(value);
            }
            if value > *alpha {
                *alpha = value;
            }
        }
        Bound::Upper => {
            if value <= *alpha {
                return Some(value);
            }
            if value < *beta {
                *beta = value;
            }
        }
    }
    (*alpha >= *beta).then_some(value)
}

/// 置換表で打ち切れるなら値を返し、ヒットとして数える。
fn tt_cutoff(
    key: u64,
    depth: u8,
    alpha: &mut i32,
    beta: &mut i32,
    ctx: &mut SearchContext<'_>,
) -> Option<i32> {
    let cutoff = tt_probe_adjust_window(key, depth, alpha, beta, ctx);
    if cutoff.is_some() {
        ctx.stats_mut().inc_tt_hits();
    }
    cutoff
}

/// 直前の手で勝負がついた、または盤が埋まった場合の評価値。
pub(super) fn terminal_score(board: &Board, last_move: Option<Square>, ai_side: Stone) -> Option<i32> {
    let winner = match last_move {
        Some(square) if board.completes_line(square) => board.stone_at(square),
        _ => None,
    };
    match winner {
        Some(stone) if stone == ai_side => Some(WIN_SCORE),
        Some(_) => Some(WIN_SCORE.wrapping_neg()),
        None => board.is_full().then_some(0),
    }
}

/// ミニマックス（αβ付き、fail-soft）。
///
/// 盤面は各候補手について「置く → 再帰 → 空に戻す」を1回ずつ行い、
/// 戻り値を返す時点では呼び出し前と同じ状態になっている。
pub(super) fn minimax(
    board: &mut Board,
    node: Node,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.stats_mut().inc_nodes();
    let ai_side = ctx.ai_side();

    if ctx.expired() {
        return evaluate(board, ai_side);
    }

    if let Some(value) = tt_cutoff(node.key, node.depth, &mut alpha, &mut beta, ctx) {
        return value;
    }

    if let Some(value) = terminal_score(board, node.last_move, ai_side) {
        return value;
    }

    if node.depth == 0 {
        let score = evaluate(board, ai_side);
        ctx.tt_store(node.key, node.depth, score, Bound::Exact);
        return score;
    }

    let alpha_orig = alpha;
    let beta_orig = beta;
    let mover = if node.maximizing {
        ai_side
    } else {
        ai_side.opponent()
    };
    let mut best = if node.maximizing {
        INF.wrapping_neg()
    } else {
        INF
    };

    for square in order_moves(board, ai_side) {
        let child = node.child(square, mover, ctx);
        let score = match board.place_scoped(square, mover) {
            Ok(mut placed) => minimax(placed.board_mut(), child, alpha, beta, ctx),
            Err(_err) => continue,
        };

        if node.maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            ctx.stats_mut().inc_cutoffs();
            break;
        }
    }

    if !ctx.timed_out() {
        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        ctx.tt_store(node.key, node.depth, best, bound);
    }

    best
}
