//! Gomoku (five-in-a-row) core logic.
//!
//! このクレートは盤面と対局進行を管理する `engine` と、手を選択する `ai` を提供します。
//! `ai::alphabeta` は反復深化つきアルファベータ探索、パターン評価、置換表からなる探索エンジンです。

#![forbid(unsafe_code)]

/// 盤面・ルール・対局進行を提供するモジュール。
pub mod engine;

/// AI（手選択アルゴリズム）を提供するモジュール。
pub mod ai;

/// ログ出力（`tracing`）の初期化。
pub mod telemetry;
