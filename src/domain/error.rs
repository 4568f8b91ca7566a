//! Domain error types.

/// Top-level error type for aurum.
#[derive(Debug, thiserror::Error)]
pub enum AurumError {
    #[error("failed to read {path}: {reason}")]
    DataRead { path: String, reason: String },

    #[error("malformed price data in {path}: {reason}")]
    DataParse { path: String, reason: String },

    #[error("asset {asset}: invalid period {value:?} (expected YYYY or YYYY-MM-DD)")]
    InvalidPeriod { asset: String, value: String },

    #[error("asset {asset}: invalid price {value:?} for {period}")]
    InvalidPrice {
        asset: String,
        period: String,
        value: String,
    },

    #[error("asset {asset} mixes yearly and daily quotes")]
    MixedGranularity { asset: String },

    #[error("asset {key} not found in price data")]
    MissingAsset { key: String },

    #[error("insufficient data for {asset}: have {points} points, need {minimum}")]
    InsufficientData {
        asset: String,
        points: usize,
        minimum: usize,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AurumError> for std::process::ExitCode {
    fn from(err: &AurumError) -> Self {
        let code: u8 = match err {
            AurumError::Io(_) | AurumError::InsufficientData { .. } => 1,
            AurumError::ConfigParse { .. } | AurumError::ConfigInvalid { .. } => 2,
            AurumError::DataRead { .. }
            | AurumError::DataParse { .. }
            | AurumError::InvalidPeriod { .. }
            | AurumError::InvalidPrice { .. }
            | AurumError::MixedGranularity { .. } => 3,
            AurumError::MissingAsset { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
