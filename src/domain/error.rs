//! Domain error types.

/// Top-level error type for gemtrader.
#[derive(Debug, thiserror::Error)]
pub enum GemError {
    #[error("insufficient data for {instrument}: have {observations} observations, need {minimum}")]
    InsufficientData {
        instrument: String,
        observations: usize,
        minimum: usize,
    },

    #[error("undefined momentum for {instrument} over {lookback} periods")]
    UndefinedResult { instrument: String, lookback: usize },

    #[error("invalid period '{period}': {reason}")]
    InvalidPeriod { period: String, reason: String },

    #[error("invalid role set: {reason}")]
    InvalidRoleSet { reason: String },

    #[error("invalid series for {instrument}: {reason}")]
    InvalidSeries { instrument: String, reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GemError {
    /// Process exit status for this error family.
    pub fn exit_status(&self) -> u8 {
        match self {
            GemError::Io(_) => 1,
            GemError::ConfigParse { .. }
            | GemError::ConfigMissing { .. }
            | GemError::ConfigInvalid { .. } => 2,
            GemError::Data { .. } => 3,
            GemError::InvalidPeriod { .. }
            | GemError::InvalidRoleSet { .. }
            | GemError::InvalidSeries { .. } => 4,
            GemError::InsufficientData { .. } | GemError::UndefinedResult { .. } => 5,
        }
    }
}

impl From<&GemError> for std::process::ExitCode {
    fn from(err: &GemError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message() {
        let err = GemError::InsufficientData {
            instrument: "SPY".into(),
            observations: 4,
            minimum: 13,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for SPY: have 4 observations, need 13"
        );
    }

    #[test]
    fn invalid_period_message() {
        let err = GemError::InvalidPeriod {
            period: "9m".into(),
            reason: "not a configured horizon".into(),
        };
        assert_eq!(err.to_string(), "invalid period '9m': not a configured horizon");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GemError = io.into();
        assert!(matches!(err, GemError::Io(_)));
    }

    #[test]
    fn exit_codes_by_family() {
        let config = GemError::ConfigMissing {
            section: "momentum".into(),
            key: "horizons".into(),
        };
        assert_eq!(config.exit_status(), 2);

        let data = GemError::Data {
            reason: "bad row".into(),
        };
        assert_eq!(data.exit_status(), 3);

        let roles = GemError::InvalidRoleSet {
            reason: "missing defensive".into(),
        };
        assert_eq!(roles.exit_status(), 4);

        let undefined = GemError::UndefinedResult {
            instrument: "VEU".into(),
            lookback: 3,
        };
        assert_eq!(undefined.exit_status(), 5);
    }
}
