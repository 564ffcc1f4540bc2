use core::fmt;
use core::time::Duration;

use crate::engine::types::Stone;

/// 既定の最大探索深さ（ply）。
pub const DEFAULT_MAX_DEPTH: u8 = 5;

/// 既定の持ち時間（1手あたり）。
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(2);

/// 探索設定の検証エラー。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// 持ち時間が 0、負、非有限、または表現できない。
    InvalidTimeBudget,
    /// 最大探索深さが 0。
    ZeroDepth,
}

impl fmt::Display for ConfigError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidTimeBudget => formatter.write_str("time budget must be positive and finite"),
            Self::ZeroDepth => formatter.write_str("max depth must be at least 1"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// アルファベータ探索の設定。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct SearchConfig {
    /// AI の石。
    ai_side: Stone,
    /// 反復深化の最大深さ（ply）。
    max_depth: u8,
    /// 1手あたりの持ち時間。
    time_budget: Duration,
    /// 置換表を使うかどうか。
    transposition: bool,
}

impl SearchConfig {
    /// AI の石を返す。
    #[inline]
    #[must_use]
    pub const fn ai_side(&self) -> Stone {
        self.ai_side
    }

    /// 持ち時間を秒（実数）で指定して生成する。
    ///
    /// # Errors
    ///
    /// `seconds` が 0 以下・非有限・`Duration` で表現できない場合は
    /// `ConfigError::InvalidTimeBudget`、`max_depth` が 0 なら `ConfigError::ZeroDepth`。
    #[inline]
    pub fn from_secs(max_depth: u8, seconds: f64, ai_side: Stone) -> Result<Self, ConfigError> {
        match Duration::try_from_secs_f64(seconds) {
            Ok(time_budget) => Self::new(max_depth, time_budget, ai_side),
            Err(_conversion_error) => Err(ConfigError::InvalidTimeBudget),
        }
    }

    /// 最大探索深さを返す。
    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// 設定を検証して生成する（置換表は有効）。
    ///
    /// # Errors
    ///
    /// `max_depth` が 0 なら `ConfigError::ZeroDepth`、
    /// `time_budget` が 0 なら `ConfigError::InvalidTimeBudget`。
    #[inline]
    pub const fn new(
        max_depth: u8,
        time_budget: Duration,
        ai_side: Stone,
    ) -> Result<Self, ConfigError> {
        if max_depth == u8::MIN {
            return Err(ConfigError::ZeroDepth);
        }
        if time_budget.is_zero() {
            return Err(ConfigError::InvalidTimeBudget);
        }
        Ok(Self {
            ai_side,
            max_depth,
            time_budget,
            transposition: true,
        })
    }

    /// 相手（AI ではない側）の石を返す。
    #[inline]
    #[must_use]
    pub const fn opponent_side(&self) -> Stone {
        self.ai_side.opponent()
    }

    /// 持ち時間を返す。
    #[inline]
    #[must_use]
    pub const fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// 置換表を使うかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn transposition(&self) -> bool {
        self.transposition
    }

    /// 置換表の有効・無効を切り替えた設定を返す。
    #[inline]
    #[must_use]
    pub const fn with_transposition(self, enabled: bool) -> Self {
        Self {
            ai_side: self.ai_side,
            max_depth: self.max_depth,
            time_budget: self.time_budget,
            transposition: enabled,
        }
    }
}

impl Default for SearchConfig {
    #[inline]
    fn default() -> Self {
        Self {
            ai_side: Stone::White,
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: DEFAULT_TIME_BUDGET,
            transposition: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SearchConfig};
    use crate::engine::types::Stone;
    use core::time::Duration;

    #[test]
    fn defaults_match_documented_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth(), 5);
        assert_eq!(config.time_budget(), Duration::from_secs(2));
        assert_eq!(config.ai_side(), Stone::White);
        assert_eq!(config.opponent_side(), Stone::Black);
        assert!(config.transposition());
    }

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            SearchConfig::new(0, Duration::from_secs(1), Stone::White),
            Err(ConfigError::ZeroDepth)
        );
        assert_eq!(
            SearchConfig::new(3, Duration::ZERO, Stone::White),
            Err(ConfigError::InvalidTimeBudget)
        );
        assert_eq!(
            SearchConfig::from_secs(3, -1.0, Stone::Black),
            Err(ConfigError::InvalidTimeBudget)
        );
        assert_eq!(
            SearchConfig::from_secs(3, f64::NAN, Stone::Black),
            Err(ConfigError::InvalidTimeBudget)
        );
        assert_eq!(
            SearchConfig::from_secs(3, 0.0, Stone::Black),
            Err(ConfigError::InvalidTimeBudget)
        );
    }

    #[test]
    fn from_secs_accepts_fractional_budget() {
        let config = SearchConfig::from_secs(2, 0.25, Stone::Black);
        assert_eq!(
            config.map(|value| value.time_budget()),
            Ok(Duration::from_millis(250))
        );
        let disabled = config.map(|value| value.with_transposition(false).transposition());
        assert_eq!(disabled, Ok(false));
    }
}
