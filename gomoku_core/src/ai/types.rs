use crate::engine::board::Board;
use crate::engine::types::Square;

/// 手を選択するAI。
pub trait Ai {
    /// 現在局面から次の手を選択する。
    ///
    /// 探索のために盤面を一時的に書き換えてもよいが、戻るときには
    /// 呼び出し前と同一の状態に戻すこと。空きマスがなければ `None`。
    fn select_move(&mut self, board: &mut Board) -> Option<Square>;
}
