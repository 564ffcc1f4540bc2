/// 石の色（手番）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Stone {
    /// 先手。
    Black,
    /// 後手。
    White,
}

impl Stone {
    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// 文字表現（`X` = 黒、`O` = 白）を返す。
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Black => 'X',
            Self::White => 'O',
        }
    }
}

/// 盤面上のマス（行、列）。
///
/// 盤の範囲チェックは `Board` 側で行う。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Square {
    /// 行（0 始まり）。
    row: u8,
    /// 列（0 始まり）。
    col: u8,
}

impl Square {
    /// 列を返す。
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// 行・列から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// (`d_row`, `d_col`) だけずらしたマスを返す。
    ///
    /// 座標が負になる、または `u8` に収まらない場合は `None`。
    #[inline]
    #[must_use]
    pub fn offset(self, d_row: i16, d_col: i16) -> Option<Self> {
        let row = i16::from(self.row).wrapping_add(d_row);
        let col = i16::from(self.col).wrapping_add(d_col);
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(next_row), Ok(next_col)) => Some(Self::new(next_row, next_col)),
            _ => None,
        }
    }

    /// 行を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }
}

/// 連を数える4方向（横、縦、右下がり斜め、右上がり斜め）。
pub(crate) const LINE_DIRECTIONS: [(i16, i16); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
