use crate::ai::types::Ai;
use crate::engine::board::Board;
use crate::engine::types::{Square, Stone};

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 盤が埋まり、勝者なしで終局。
    Draw,
    /// 進行中。
    InProgress,
    /// 指定の色が連を完成させて終局。
    Won(Stone),
}

/// 着手に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PlayError {
    /// すでに終局している。
    GameOver,
    /// 指定マスが盤外、またはすでに石がある。
    IllegalMove,
}

impl core::fmt::Display for PlayError {
    #[inline]
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::GameOver => formatter.write_str("game is already over"),
            Self::IllegalMove => formatter.write_str("move is not on an empty cell"),
        }
    }
}

impl core::error::Error for PlayError {}

/// 1ゲームの進行を管理する構造体。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// 現在の盤面。
    board: Board,
    /// 直前の着手。
    last_move: Option<Square>,
    /// 現手番。
    side_to_move: Stone,
    /// 現在の状態。
    status: Status,
}

impl Game {
    /// 現在の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        !matches!(self.status, Status::InProgress)
    }

    /// 直前の着手を返す。
    #[inline]
    #[must_use]
    pub const fn last_move(&self) -> Option<Square> {
        self.last_move
    }

    /// 指定盤面からゲームを開始する（先手は黒）。
    #[inline]
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            last_move: None,
            side_to_move: Stone::Black,
            status: Status::InProgress,
        }
    }

    /// 現手番の石を置く。
    ///
    /// 勝ち・引き分けでなければ手番を交代する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::IllegalMove`: 指定されたマスが盤外、または空いていない場合
    ///
    #[inline]
    pub fn play(&mut self, square: Square) -> Result<Status, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        if self.board.place(square, self.side_to_move).is_err() {
            return Err(PlayError::IllegalMove);
        }
        self.last_move = Some(square);

        if self.board.completes_line(square) {
            self.status = Status::Won(self.side_to_move);
        } else if self.board.is_full() {
            self.status = Status::Draw;
        } else {
            self.side_to_move = self.side_to_move.opponent();
        }

        Ok(self.status)
    }

    /// AI に現局面の手を選ばせる（盤面には反映しない）。
    ///
    /// 終局後、または空きマスがない場合は `None`。
    #[inline]
    pub fn request_move<A: Ai + ?Sized>(&mut self, agent: &mut A) -> Option<Square> {
        if self.is_over() {
            return None;
        }
        agent.select_move(&mut self.board)
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Stone {
        self.side_to_move
    }

    /// 標準盤面（10×10、五目）から開始する。
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Board::standard())
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::standard()
    }
}
