use tracing::Level;

/// ログ出力の初期化に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TelemetryError {
    /// すでにグローバルな subscriber が設定されている。
    AlreadyInitialized,
}

impl core::fmt::Display for TelemetryError {
    #[inline]
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::AlreadyInitialized => formatter.write_str("a global tracing subscriber is already set"),
        }
    }
}

impl core::error::Error for TelemetryError {}

/// 探索ログを JSON 行で標準出力へ書き出す subscriber を設定する。
///
/// `level` より詳細なイベントは捨てる。探索の要約は `DEBUG`、
/// 深さごとの進捗は `TRACE` で出る。
///
/// # Errors
///
/// プロセス内で一度でも subscriber が設定済みなら
/// `TelemetryError::AlreadyInitialized` を返す。
#[inline]
pub fn init_json(level: Level) -> Result<(), TelemetryError> {
    match tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .try_init()
    {
        Ok(()) => Ok(()),
        Err(_err) => Err(TelemetryError::AlreadyInitialized),
    }
}

/// `init_json` と同じ形式で、テストハーネスの出力捕捉を通して書き出す。
///
/// `cargo test` では失敗したテストのログだけが表示される。
///
/// # Errors
///
/// `init_json` と同じ。
#[inline]
pub fn init_json_captured(level: Level) -> Result<(), TelemetryError> {
    match tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .with_test_writer()
        .try_init()
    {
        Ok(()) => Ok(()),
        Err(_err) => Err(TelemetryError::AlreadyInitialized),
    }
}
