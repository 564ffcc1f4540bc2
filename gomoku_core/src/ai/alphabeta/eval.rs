//! 連のパターンによる静的評価。
//!
//! あるマスを中心に4方向それぞれ 11 マスの窓を切り出し、
//! 自分の石 `X`・空き `.`・相手の石または盤外 `B` の並びとして
//! 連の形（五、活四、死四、…）を検出する。1つの窓が複数の形に
//! 一致した場合はすべて加算する。

use crate::engine::board::Board;
use crate::engine::types::{LINE_DIRECTIONS, Square, Stone};

/// 窓の片側の長さ。
const WINDOW_RADIUS: i16 = 5;

/// 窓の長さ（中心を含む）。
const WINDOW_LEN: usize = 11;

/// 自分の石。
const OWN: u8 = b'X';

/// 空きマス。
const EMPTY: u8 = b'.';

/// 相手の石または盤外。
const BLOCKED: u8 = b'B';

/// 連の形。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Pattern {
    /// 片側が塞がれた四。
    ClosedFour,
    /// 片側が塞がれた三。
    ClosedThree,
    /// 片側が塞がれた二。
    ClosedTwo,
    /// 五連。
    Five,
    /// 両側が空いた四。
    OpenFour,
    /// 両側が空いた三。
    OpenThree,
    /// 両側が空いた二。
    OpenTwo,
}

impl Pattern {
    /// 評価で使う全パターン（重い順）。
    pub const ALL: [Self; 7] = [
        Self::Five,
        Self::OpenFour,
        Self::ClosedFour,
        Self::OpenThree,
        Self::ClosedThree,
        Self::OpenTwo,
        Self::ClosedTwo,
    ];

    /// この形と判定する窓内の並び。
    const fn shapes(self) -> &'static [&'static [u8]] {
        match self {
            Self::Five => &[b"XXXXX"],
            Self::OpenFour => &[b".XXXX."],
            Self::ClosedFour => &[b"BXXXX.", b".XXXXB"],
            Self::OpenThree => &[b".XXX..", b"..XXX."],
            Self::ClosedThree => &[b"BXXX..", b"..XXXB"],
            Self::OpenTwo => &[b".XX...", b"...XX."],
            Self::ClosedTwo => &[b"BXX...", b"...XXB"],
        }
    }

    /// 形の重み。
    #[inline]
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Five => 100_000,
            Self::OpenFour => 10_000,
            Self::ClosedFour => 1_000,
            Self::OpenThree => 500,
            Self::ClosedThree => 100,
            Self::OpenTwo => 50,
            Self::ClosedTwo => 10,
        }
    }
}

/// 盤面全体の評価（常に AI 視点）。
///
/// 石のある各マスについて、その石の持ち主から見た `position_score` を合計し、
/// AI 側の合計から相手側の合計を引いた値を返す。
#[inline]
#[must_use]
pub fn evaluate(board: &Board, ai_side: Stone) -> i32 {
    let mut ai_total: u64 = 0;
    let mut opponent_total: u64 = 0;

    for square in board.occupied_squares() {
        let Some(stone) = board.stone_at(square) else {
            continue;
        };
        let score = u64::from(position_score(board, square, stone));
        if stone == ai_side {
            ai_total = ai_total.saturating_add(score);
        } else {
            opponent_total = opponent_total.saturating_add(score);
        }
    }

    diff_i32(ai_total, opponent_total)
}

/// `square` から `direction` 方向に切り出した窓を返す。
fn line_window(board: &Board, square: Square, side: Stone, direction: (i16, i16)) -> [u8; WINDOW_LEN] {
    let (d_row, d_col) = direction;
    let mut window = [BLOCKED; WINDOW_LEN];

    for (slot, step) in window.iter_mut().zip(WINDOW_RADIUS.wrapping_neg()..=WINDOW_RADIUS) {
        let target = square.offset(d_row.wrapping_mul(step), d_col.wrapping_mul(step));
        *slot = match target {
            Some(cell) if board.contains(cell) => match board.stone_at(cell) {
                Some(stone) if stone == side => OWN,
                Some(_) => BLOCKED,
                None => EMPTY,
            },
            _ => BLOCKED,
        };
    }

    window
}

/// 窓に含まれる形を列挙する。
fn matched_patterns(window: &[u8]) -> impl Iterator<Item = Pattern> + '_ {
    Pattern::ALL.into_iter().filter(move |pattern| {
        pattern
            .shapes()
            .iter()
            .any(|shape| window.windows(shape.len()).any(|part| part == *shape))
    })
}

/// `square` に置かれた（と仮定した）`side` の石の強さを返す。
///
/// 4方向の窓で一致した形の重みの合計。盤外は相手の石と同じく扱うため、
/// 全石の色を入れ替えた盤面で相手側を評価しても同じ値になる。
#[inline]
#[must_use]
pub fn position_score(board: &Board, square: Square, side: Stone) -> u32 {
    LINE_DIRECTIONS
        .iter()
        .map(|&direction| {
            let window = line_window(board, square, side, direction);
            matched_patterns(&window).fold(0_u32, |acc, pattern| acc.saturating_add(pattern.weight()))
        })
        .fold(0_u32, u32::saturating_add)
}

/// `u64` 同士の差を `i32` に飽和させて返す。
fn diff_i32(lhs: u64, rhs: u64) -> i32 {
    if lhs >= rhs {
        i32::try_from(lhs.wrapping_sub(rhs)).unwrap_or(i32::MAX)
    } else {
        i32::try_from(rhs.wrapping_sub(lhs)).map_or(i32::MIN, i32::wrapping_neg)
    }
}

#[cfg(test)]
mod tests {
    use super::{EMPTY, OWN, Pattern, evaluate, line_window, matched_patterns, position_score};
    use crate::engine::board::Board;
    use crate::engine::types::{Square, Stone};

    fn board_from(rows: &[&str]) -> Board {
        let board_result = Board::from_rows(rows, 5);
        assert!(board_result.is_ok(), "invalid test board: {board_result:?}");
        board_result.unwrap_or_default()
    }

    fn patterns_of(line: &[u8]) -> Vec<Pattern> {
        matched_patterns(line).collect()
    }

    #[test]
    fn weights_are_strictly_ordered() {
        let weights: Vec<u32> = Pattern::ALL.iter().map(|pattern| pattern.weight()).collect();
        assert_eq!(weights, vec![100_000, 10_000, 1_000, 500, 100, 50, 10]);
    }

    #[test]
    fn window_patterns_are_classified() {
        assert_eq!(patterns_of(b"B..XXXXX..B"), vec![Pattern::Five]);
        assert_eq!(patterns_of(b"B..XXXX...B"), vec![Pattern::OpenFour]);
        assert_eq!(patterns_of(b"BBBXXXX...."), vec![Pattern::ClosedFour]);
        assert_eq!(patterns_of(b"...XXX....."), vec![Pattern::OpenThree]);
        assert_eq!(patterns_of(b"..BXXX....."), vec![Pattern::ClosedThree]);
        assert_eq!(patterns_of(b"....XX....."), vec![Pattern::OpenTwo]);
        assert_eq!(patterns_of(b"...BXX....."), vec![Pattern::ClosedTwo]);
        assert!(patterns_of(b"....BXB....").is_empty());
        // 両側を塞がれた四はどの形にも当たらない。
        assert!(patterns_of(b"..BXXXXB...").is_empty());
    }

    #[test]
    fn overlapping_patterns_are_summed() {
        let found = patterns_of(b"...XXX.....");
        assert_eq!(found, vec![Pattern::OpenThree]);
        // 三と二が同じ窓に並ぶ。
        let both = patterns_of(b".XX...XXX..");
        assert_eq!(both, vec![Pattern::OpenThree, Pattern::OpenTwo]);
    }

    #[test]
    fn boundary_counts_as_blocked() {
        let board = board_from(&[
            "XXXX......",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ]);
        let window = line_window(&board, Square::new(0, 0), Stone::Black, (0, 1));
        assert_eq!(&window, b"BBBBBXXXX..");
        assert_eq!(window.get(5), Some(&OWN));
        assert_eq!(window.get(10), Some(&EMPTY));

        // 横: 死四、縦・斜めは単独の石で形なし。
        assert_eq!(
            position_score(&board, Square::new(0, 0), Stone::Black),
            Pattern::ClosedFour.weight()
        );
    }

    #[test]
    fn open_four_scores_higher_than_closed_four() {
        let board = board_from(&[
            "..........",
            ".XXXX.....",
            "..........",
            "OXXXX.....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ]);
        let open = position_score(&board, Square::new(1, 2), Stone::Black);
        let closed = position_score(&board, Square::new(3, 2), Stone::Black);
        assert!(open > closed, "open={open}, closed={closed}");
        assert!(open >= Pattern::OpenFour.weight());
    }

    #[test]
    fn color_swap_preserves_positional_scores() {
        let rows = [
            "..........",
            "..X.O.....",
            "..XXO.....",
            "...XO.O...",
            "....X.....",
            "..O..X....",
            ".......O..",
            "..........",
            "XX.X......",
            ".........O",
        ];
        let swapped_rows: Vec<String> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|symbol| match symbol {
                        'X' => 'O',
                        'O' => 'X',
                        other => other,
                    })
                    .collect()
            })
            .collect();
        let swapped_refs: Vec<&str> = swapped_rows.iter().map(String::as_str).collect();

        let board = board_from(&rows);
        let swapped = board_from(&swapped_refs);

        for square in board.squares() {
            assert_eq!(
                position_score(&board, square, Stone::Black),
                position_score(&swapped, square, Stone::White),
                "square={square:?}"
            );
            assert_eq!(
                position_score(&board, square, Stone::White),
                position_score(&swapped, square, Stone::Black),
                "square={square:?}"
            );
        }
        assert_eq!(evaluate(&board, Stone::White), evaluate(&swapped, Stone::Black));
    }

    #[test]
    fn evaluate_is_antisymmetric_in_ai_side() {
        let board = board_from(&[
            "..........",
            "...XXX....",
            "....O.....",
            "....O.....",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ]);
        let for_white = evaluate(&board, Stone::White);
        assert!(for_white < 0, "black has the stronger shape, got={for_white}");
        assert_eq!(for_white, evaluate(&board, Stone::Black).wrapping_neg());
        assert_eq!(evaluate(&Board::standard(), Stone::White), 0);
    }
}
