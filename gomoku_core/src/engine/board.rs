use core::fmt;

use crate::engine::types::{LINE_DIRECTIONS, Square, Stone};

/// 標準の盤の一辺の長さ。
pub const STANDARD_SIDE_LEN: u8 = 10;

/// 標準の勝利条件（何個並べば勝ちか）。
pub const STANDARD_WIN_LENGTH: u8 = 5;

/// 盤面操作に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum BoardError {
    /// テキスト表現に未知の文字が含まれている。
    InvalidCell,
    /// テキスト表現が正方形になっていない。
    InvalidShape,
    /// 盤の一辺が 0、または `u8` に収まらない。
    InvalidSideLen,
    /// 勝利条件が 0、または盤の一辺より長い。
    InvalidWinLength,
    /// 指定マスにすでに石がある。
    Occupied,
    /// 指定マスが盤外。
    OutOfBounds,
}

impl fmt::Display for BoardError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match *self {
            Self::InvalidCell => "unknown cell symbol",
            Self::InvalidShape => "rows do not form a square grid",
            Self::InvalidSideLen => "side length must be between 1 and 255",
            Self::InvalidWinLength => "win length must be between 1 and the side length",
            Self::Occupied => "cell is already occupied",
            Self::OutOfBounds => "cell is outside the board",
        };
        formatter.write_str(message)
    }
}

impl core::error::Error for BoardError {}

/// N×N の盤面。
///
/// 各マスは空（`None`）か、いずれかの石を持つ。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// 行優先で並べたマス。
    cells: Vec<Option<Stone>>,
    /// 石の置かれたマスの数。
    occupied: usize,
    /// 盤の一辺の長さ。
    side_len: u8,
    /// 勝利に必要な連の長さ。
    win_length: u8,
}

impl Board {
    /// `square` の石が `win_length` 以上の連の一部かを返す。
    ///
    /// 直前に打った手で勝ったかの判定に使う（長連も勝ちとみなす）。
    #[inline]
    #[must_use]
    pub fn completes_line(&self, square: Square) -> bool {
        let Some(stone) = self.stone_at(square) else {
            return false;
        };

        let need = usize::from(self.win_length);
        LINE_DIRECTIONS.iter().any(|&(d_row, d_col)| {
            let forward = self.run_length(square, d_row, d_col, stone);
            let backward = self.run_length(square, d_row.wrapping_neg(), d_col.wrapping_neg(), stone);
            forward.saturating_add(backward).saturating_add(1) >= need
        })
    }

    /// 盤内のマスかを返す。
    #[inline]
    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        square.row() < self.side_len && square.col() < self.side_len
    }

    /// 空きマスを行優先で返す。
    #[inline]
    #[must_use]
    pub fn empty_squares(&self) -> Vec<Square> {
        self.squares()
            .filter(|&square| self.stone_at(square).is_none())
            .collect()
    }

    /// テキスト表現（`.` = 空、`X` = 黒、`O` = 白）から盤面を生成する。
    ///
    /// # Errors
    ///
    /// 行数と各行の文字数が一致しない場合は `BoardError::InvalidShape`、
    /// 未知の文字がある場合は `BoardError::InvalidCell` を返す。
    /// 盤の大きさ・勝利条件の検証は `Board::new` と同じ。
    #[inline]
    pub fn from_rows(rows: &[&str], win_length: u8) -> Result<Self, BoardError> {
        let side_len = match u8::try_from(rows.len()) {
            Ok(value) => value,
            Err(_conversion_error) => return Err(BoardError::InvalidSideLen),
        };
        let mut board = match Self::new(side_len, win_length) {
            Ok(value) => value,
            Err(err) => return Err(err),
        };

        for (row, line) in (u8::MIN..side_len).zip(rows.iter()) {
            if line.chars().count() != rows.len() {
                return Err(BoardError::InvalidShape);
            }
            for (col, symbol) in (u8::MIN..side_len).zip(line.chars()) {
                let cell = match symbol {
                    '.' => None,
                    'X' => Some(Stone::Black),
                    'O' => Some(Stone::White),
                    _ => return Err(BoardError::InvalidCell),
                };
                if let Err(err) = board.set(Square::new(row, col), cell) {
                    return Err(err);
                }
            }
        }

        Ok(board)
    }

    /// マスの配列上のインデックスを返す（盤外なら `None`）。
    fn index(&self, square: Square) -> Option<usize> {
        if !self.contains(square) {
            return None;
        }
        let row = usize::from(square.row());
        let len = usize::from(self.side_len);
        Some(row.wrapping_mul(len).wrapping_add(usize::from(square.col())))
    }

    /// 空きマスが残っていないかを返す。
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied >= self.cells.len()
    }

    /// 盤内かつ空きマスかを返す。
    #[inline]
    #[must_use]
    pub fn is_legal(&self, square: Square) -> bool {
        self.contains(square) && self.stone_at(square).is_none()
    }

    /// 空の盤面を生成する。
    ///
    /// # Errors
    ///
    /// `side_len` が 0 の場合は `BoardError::InvalidSideLen`、
    /// `win_length` が 0 または `side_len` より大きい場合は
    /// `BoardError::InvalidWinLength` を返す。
    #[inline]
    pub fn new(side_len: u8, win_length: u8) -> Result<Self, BoardError> {
        if side_len == u8::MIN {
            return Err(BoardError::InvalidSideLen);
        }
        if win_length == u8::MIN || win_length > side_len {
            return Err(BoardError::InvalidWinLength);
        }

        let len = usize::from(side_len);
        Ok(Self {
            cells: vec![None; len.wrapping_mul(len)],
            occupied: 0,
            side_len,
            win_length,
        })
    }

    /// 石の置かれたマス数を返す。
    #[inline]
    #[must_use]
    pub const fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// 石の置かれたマスを行優先で返す。
    #[inline]
    #[must_use]
    pub fn occupied_squares(&self) -> Vec<Square> {
        self.squares()
            .filter(|&square| self.stone_at(square).is_some())
            .collect()
    }

    /// 空きマスに石を置く。
    ///
    /// # Errors
    ///
    /// 盤外なら `BoardError::OutOfBounds`、石があれば `BoardError::Occupied`。
    #[inline]
    pub fn place(&mut self, square: Square, stone: Stone) -> Result<(), BoardError> {
        if !self.contains(square) {
            return Err(BoardError::OutOfBounds);
        }
        if self.stone_at(square).is_some() {
            return Err(BoardError::Occupied);
        }
        self.set(square, Some(stone))
    }

    /// 空きマスに石を仮置きし、ガードが破棄されたときに空へ戻す。
    ///
    /// パニックによる巻き戻しでも復元される。
    ///
    /// # Errors
    ///
    /// `Board::place` と同じ。
    #[inline]
    pub fn place_scoped(
        &mut self,
        square: Square,
        stone: Stone,
    ) -> Result<Placement<'_>, BoardError> {
        match self.place(square, stone) {
            Ok(()) => Ok(Placement {
                board: self,
                square,
            }),
            Err(err) => Err(err),
        }
    }

    /// `square` から (`d_row`, `d_col`) 方向に続く `stone` の数を返す（起点は含まない）。
    fn run_length(&self, square: Square, d_row: i16, d_col: i16, stone: Stone) -> usize {
        let limit = usize::from(self.win_length);
        let mut count: usize = 0;
        let mut cursor = square;
        while count < limit {
            let next = match cursor.offset(d_row, d_col) {
                Some(value) => value,
                None => break,
            };
            if self.stone_at(next) != Some(stone) {
                break;
            }
            count = count.wrapping_add(1);
            cursor = next;
        }
        count
    }

    /// マスの状態を書き換える（`None` で空にする）。
    ///
    /// # Errors
    ///
    /// 盤外なら `BoardError::OutOfBounds`。
    #[inline]
    pub fn set(&mut self, square: Square, cell: Option<Stone>) -> Result<(), BoardError> {
        let index = match self.index(square) {
            Some(value) => value,
            None => return Err(BoardError::OutOfBounds),
        };
        let slot = match self.cells.get_mut(index) {
            Some(value) => value,
            None => return Err(BoardError::OutOfBounds),
        };

        match (slot.is_some(), cell.is_some()) {
            (false, true) => self.occupied = self.occupied.wrapping_add(1),
            (true, false) => self.occupied = self.occupied.wrapping_sub(1),
            _ => {}
        }
        *slot = cell;
        Ok(())
    }

    /// 盤の一辺の長さを返す。
    #[inline]
    #[must_use]
    pub const fn side_len(&self) -> u8 {
        self.side_len
    }

    /// 全マスを行優先で列挙する。
    #[inline]
    pub fn squares(&self) -> impl Iterator<Item = Square> + use<> {
        let len = self.side_len;
        (u8::MIN..len).flat_map(move |row| (u8::MIN..len).map(move |col| Square::new(row, col)))
    }

    /// 標準盤面（10×10、五目）を返す。
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        let len = usize::from(STANDARD_SIDE_LEN);
        Self {
            cells: vec![None; len.wrapping_mul(len)],
            occupied: 0,
            side_len: STANDARD_SIDE_LEN,
            win_length: STANDARD_WIN_LENGTH,
        }
    }

    /// 指定マスの石を返す（空・盤外なら `None`）。
    #[inline]
    #[must_use]
    pub fn stone_at(&self, square: Square) -> Option<Stone> {
        match self.index(square) {
            Some(index) => self.cells.get(index).copied().flatten(),
            None => None,
        }
    }

    /// 勝利に必要な連の長さを返す。
    #[inline]
    #[must_use]
    pub const fn win_length(&self) -> u8 {
        self.win_length
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, " ")?;
        for col in u8::MIN..self.side_len {
            write!(formatter, " {col}")?;
        }
        writeln!(formatter)?;
        for row in u8::MIN..self.side_len {
            write!(formatter, "{row}")?;
            for col in u8::MIN..self.side_len {
                let symbol = self
                    .stone_at(Square::new(row, col))
                    .map_or('.', Stone::symbol);
                write!(formatter, " {symbol}")?;
            }
            writeln!(formatter)?;
        }
        Ok(())
    }
}

/// 仮置きした石のガード。
///
/// 破棄時にマスを空へ戻す。保持中に `board_mut` で行った変更は、
/// 呼び出し側が自分で元に戻す必要がある。
#[derive(Debug)]
pub struct Placement<'board> {
    /// 仮置き先の盤面。
    board: &'board mut Board,
    /// 仮置きしたマス。
    square: Square,
}

impl Placement<'_> {
    /// 仮置き後の盤面を返す。
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// 仮置き後の盤面への可変参照を返す。
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        self.board
    }

    /// 仮置きしたマスを返す。
    #[inline]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }
}

impl Drop for Placement<'_> {
    #[inline]
    fn drop(&mut self) {
        let _: Result<(), BoardError> = self.board.set(self.square, None);
    }
}
