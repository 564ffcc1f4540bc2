use core::time::Duration;
use std::time::Instant;

use crate::engine::types::Stone;

use super::TT_SIZE;
use super::config::SearchConfig;
use super::tt::{Bound, TranspositionTable, TtEntry, Zobrist};

/// 探索開始からの経過時間を返す時計。
pub(super) trait Clock {
    /// 探索開始からの経過時間。
    fn elapsed(&self) -> Duration;
}

/// 単調増加時計（`Instant`）による実装。
#[derive(Debug)]
pub(super) struct MonotonicClock {
    /// 探索開始時刻。
    started: Instant,
}

impl MonotonicClock {
    /// 現在時刻を開始時刻として時計を作る。
    pub(super) fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// 探索統計（診断用）。
#[derive(Default, Clone, Copy, Debug)]
pub(super) struct SearchStats {
    /// ベータカット等で枝刈りした回数。
    cutoffs: u64,
    /// 探索したノード数。
    nodes: u64,
    /// 置換表の値でノードを打ち切った回数。
    tt_hits: u64,
    /// 置換表へ保存した回数。
    tt_stores: u64,
}

impl SearchStats {
    /// 枝刈りの回数を返す。
    pub(super) const fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// 枝刈り（ベータカット等）の回数を加算する。
    pub(super) const fn inc_cutoffs(&mut self) {
        self.cutoffs = self.cutoffs.wrapping_add(1);
    }

    /// 探索ノード数を加算する。
    pub(super) const fn inc_nodes(&mut self) {
        self.nodes = self.nodes.wrapping_add(1);
    }

    /// 置換表の値でノードを打ち切った回数を加算する。
    pub(super) const fn inc_tt_hits(&mut self) {
        self.tt_hits = self.tt_hits.wrapping_add(1);
    }

    /// 置換表保存回数を加算する。
    pub(super) const fn inc_tt_stores(&mut self) {
        self.tt_stores = self.tt_stores.wrapping_add(1);
    }

    /// 探索ノード数を返す。
    pub(super) const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 置換表ヒット回数を返す。
    pub(super) const fn tt_hits(&self) -> u64 {
        self.tt_hits
    }

    #[cfg(test)]
    /// 置換表保存回数を返す（テスト用）。
    pub(super) const fn tt_stores(&self) -> u64 {
        self.tt_stores
    }
}

/// 持ち時間切れで途中の深さを打ち切る。
#[derive(Debug, Clone, Copy)]
pub(super) struct SearchAbort;

/// 1回の着手決定の間だけ使う探索コンテキスト。
///
/// 開始時刻（時計）、持ち時間、統計、置換表をまとめて持ち、
/// すべての探索呼び出しに明示的に渡す。
pub(super) struct SearchContext<'ctx> {
    /// AI の石。
    ai_side: Stone,
    /// 持ち時間。
    budget: Duration,
    /// 経過時間を測る時計。
    clock: &'ctx dyn Clock,
    /// 探索統計。
    stats: SearchStats,
    /// 一度でも持ち時間を超えたか。
    timed_out: bool,
    /// 置換表（無効化されていれば `None`）。
    tt: Option<TranspositionTable>,
    /// Zobrist ハッシュ用の乱数表。
    zobrist: Zobrist,
}

impl<'ctx> SearchContext<'ctx> {
    /// AI の石を返す。
    pub(super) const fn ai_side(&self) -> Stone {
        self.ai_side
    }

    /// 探索開始からの経過時間を返す。
    pub(super) fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// 時計を確認し、持ち時間を超えていれば真を返す。
    ///
    /// 一度超えたら以後は常に真。
    pub(super) fn expired(&mut self) -> bool {
        if !self.timed_out && self.clock.elapsed() > self.budget {
            self.timed_out = true;
        }
        self.timed_out
    }

    /// 探索コンテキストを生成する。
    pub(super) fn new(config: SearchConfig, side_len: u8, clock: &'ctx dyn Clock) -> Self {
        Self {
            ai_side: config.ai_side(),
            budget: config.time_budget(),
            clock,
            stats: SearchStats::default(),
            timed_out: false,
            tt: config
                .transposition()
                .then(|| TranspositionTable::new(TT_SIZE)),
            zobrist: Zobrist::new(side_len),
        }
    }

    /// 探索統計を返す。
    pub(super) const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 探索統計への可変参照を返す。
    pub(super) const fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    /// 持ち時間切れを検出済みかを返す（時計は見ない）。
    pub(super) const fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// 置換表を参照する（無効なら常に `None`）。
    ///
    /// ヒット数は数えない。値を実際に使ったときに呼び出し側が数える。
    pub(super) fn tt_probe(&self, key: u64, depth: u8) -> Option<TtEntry> {
        match self.tt.as_ref() {
            Some(tt) => tt.probe(key, depth),
            None => None,
        }
    }

    /// 置換表へ保存する（無効なら何もしない）。
    pub(super) fn tt_store(&mut self, key: u64, depth: u8, value: i32, bound: Bound) {
        if let Some(tt) = self.tt.as_mut() {
            tt.store(key, depth, value, bound);
            self.stats.inc_tt_stores();
        }
    }

    /// Zobrist ハッシュ用の乱数表を返す。
    pub(super) const fn zobrist(&self) -> &Zobrist {
        &self.zobrist
    }
}
