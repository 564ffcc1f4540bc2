/// 盤面（マスの状態、合法性、勝利判定）の実装。
pub mod board;
/// ゲーム進行（手番、勝敗判定など）の実装。
pub mod game;
pub mod types;

pub type Board = board::Board;
pub type BoardError = board::BoardError;
pub type Game = game::Game;
pub type GameStatus = game::Status;
pub type PlayError = game::PlayError;
pub type Square = types::Square;
pub type Stone = types::Stone;
