use crate::engine::board::Board;
use crate::engine::types::{Square, Stone};

/// 置換表の bound 種別。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum Bound {
    /// 正確な値。
    Exact,
    /// 下限（この値以上）。
    Lower,
    /// 上限（この値以下）。
    Upper,
}

/// 置換表エントリ。
#[derive(Copy, Clone, Debug)]
pub(super) struct TtEntry {
    /// `value` の意味（exact/lower/upper）。
    bound: Bound,
    /// この値が保証される残り探索深さ。
    depth: u8,
    /// 局面キー（手番込み）。
    key: u64,
    /// 評価値（AI 視点）。
    value: i32,
}

impl TtEntry {
    /// このエントリの bound 種別を返す。
    pub(super) const fn bound(&self) -> Bound {
        self.bound
    }

    /// このエントリに保存されている評価値を返す。
    pub(super) const fn value(&self) -> i32 {
        self.value
    }
}

/// 置換表（固定長、常に上書き）。
///
/// 1回の着手決定の間だけ使い、次の決定では新しく作り直す。
/// キーの衝突は 64bit Zobrist キーの一致で判定し、それ以上の検証はしない。
#[derive(Debug)]
pub(super) struct TranspositionTable {
    /// ハッシュ表本体。
    entries: Vec<Option<TtEntry>>,
}

impl TranspositionTable {
    /// キーからインデックスを求める。
    fn index(&self, key: u64) -> usize {
        let mask = self.entries.len().wrapping_sub(1);
        // 32-bit 環境でも安定するよう、下位 32bit に折り畳む。
        let folded = key ^ key.wrapping_shr(32);
        let low_u32 = u32::try_from(folded & u64::from(u32::MAX)).unwrap_or(u32::MAX);
        usize::try_from(low_u32).unwrap_or(usize::MAX) & mask
    }

    /// 置換表を初期化する。
    pub(super) fn new(size: usize) -> Self {
        let size_pow2 = size.next_power_of_two().max(1);
        Self {
            entries: vec![None; size_pow2],
        }
    }

    /// 指定深さ以上で保存されたエントリを取得する。
    pub(super) fn probe(&self, key: u64, depth: u8) -> Option<TtEntry> {
        let idx = self.index(key);
        let entry = match self.entries.get(idx) {
            Some(&Some(value)) => value,
            _ => return None,
        };
        (entry.key == key && entry.depth >= depth).then_some(entry)
    }

    /// エントリを保存する（同じスロットの既存エントリは上書き）。
    pub(super) fn store(&mut self, key: u64, depth: u8, stored_value: i32, bound: Bound) {
        let idx = self.index(key);
        if let Some(slot) = self.entries.get_mut(idx) {
            *slot = Some(TtEntry {
                bound,
                depth,
                key,
                value: stored_value,
            });
        }
    }
}

/// Zobrist ハッシュ。
///
/// 1手ごとに石と手番の乱数を XOR するだけでキーを更新できる。
#[derive(Debug, Clone)]
pub(super) struct Zobrist {
    /// 盤の一辺の長さ。
    side_len: u8,
    /// AI 手番（最大化ノード）用乱数。
    side_to_move: u64,
    /// マスごとの乱数（黒、白）。
    stones: Vec<[u64; 2]>,
}

impl Zobrist {
    /// 盤面全体からキーを計算する。
    ///
    /// `maximizing` が真（AI の手番）のときだけ手番用乱数を XOR する。
    pub(super) fn hash(&self, board: &Board, maximizing: bool) -> u64 {
        let mut key: u64 = 0;
        for square in board.occupied_squares() {
            if let Some(stone) = board.stone_at(square) {
                key ^= self.stone_key(square, stone);
            }
        }
        if maximizing {
            key ^= self.side_to_move;
        }
        key
    }

    /// `side_len` × `side_len` の盤用の Zobrist テーブルを生成する。
    pub(super) fn new(side_len: u8) -> Self {
        let len = usize::from(side_len);
        let mut seed: u64 = 0xDEAD_BEEF_CAFE_BABE;
        let stones = (0..len.wrapping_mul(len))
            .map(|_| [splitmix64(&mut seed), splitmix64(&mut seed)])
            .collect();
        let side_to_move = splitmix64(&mut seed);
        Self {
            side_len,
            side_to_move,
            stones,
        }
    }

    /// `square` に `stone` を置き、手番を交代した後のキーを返す。
    pub(super) fn play(&self, key: u64, square: Square, stone: Stone) -> u64 {
        key ^ self.stone_key(square, stone) ^ self.side_to_move
    }

    /// マスと石の組に対応する乱数を返す（盤外なら 0）。
    fn stone_key(&self, square: Square, stone: Stone) -> u64 {
        if square.row() >= self.side_len || square.col() >= self.side_len {
            return 0;
        }
        let idx = usize::from(square.row())
            .wrapping_mul(usize::from(self.side_len))
            .wrapping_add(usize::from(square.col()));
        let [black, white] = match self.stones.get(idx) {
            Some(value) => *value,
            None => return 0,
        };
        match stone {
            Stone::Black => black,
            Stone::White => white,
        }
    }
}

/// `SplitMix64` による擬似乱数生成。
///
/// Zobrist テーブル初期化用の乱数列を得るために利用する。
const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut mixed = *state;
    mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
