//! 反復深化つきアルファベータ探索による着手選択。
//!
//! - `move_ordering`: 候補手の生成と簡易評価による並べ替え
//! - `eval`: 連のパターンによる静的評価
//! - `tt`: 置換表と Zobrist キー
//! - `search`: ミニマックス（αβ）と反復深化

/// 探索設定。
pub mod config;
/// 連のパターンによる静的評価。
pub mod eval;
/// 探索の制限（時計・統計・コンテキスト）。
mod limits;
/// 候補手の生成と並べ替え。
pub mod move_ordering;
/// ルート探索とミニマックス本体。
mod search;
/// 置換表と Zobrist ハッシュ。
mod tt;

use crate::ai::types::Ai;
use crate::engine::board::Board;
use crate::engine::types::Square;

use self::limits::MonotonicClock;
use self::search::search_root;

pub type ConfigError = config::ConfigError;
pub type SearchConfig = config::SearchConfig;

/// AI が勝つ局面の評価値（相手が勝つ局面はその符号反転）。
pub const WIN_SCORE: i32 = 1_000_000;

/// 探索窓の無限大。
const INF: i32 = i32::MAX;

/// 置換表のエントリ数。
const TT_SIZE: usize = 1 << 16;

/// アルファベータ探索を行うAI。
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Agent {
    /// 探索設定。
    config: SearchConfig,
}

impl Agent {
    /// 現局面で AI が打つ手を選ぶ。
    ///
    /// 空きマスがなければ `None`。探索中に盤面を書き換えるが、
    /// 戻るときには呼び出し前と同一の状態に戻っている。
    /// 勝敗のついた盤面で呼んではならない。
    #[inline]
    pub fn choose_move(&self, board: &mut Board) -> Option<Square> {
        let clock = MonotonicClock::start();
        search_root(board, self.config, &clock).best_move()
    }

    /// 探索設定を返す。
    #[inline]
    #[must_use]
    pub const fn config(&self) -> SearchConfig {
        self.config
    }

    /// 探索設定を指定して初期化する。
    #[inline]
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl Ai for Agent {
    #[inline]
    fn select_move(&mut self, board: &mut Board) -> Option<Square> {
        self.choose_move(board)
    }
}
