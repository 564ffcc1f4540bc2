/// アルファベータ探索AI。
pub mod alphabeta;
/// 空きマスからランダムに1手選ぶAI。
pub mod random;
pub mod types;

pub type Agent = alphabeta::Agent;
pub type SearchConfig = alphabeta::SearchConfig;
