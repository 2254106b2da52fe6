use thiserror::Error;

/// Errors reported by the engine.
///
/// Nothing in the steady-state scroll loop is fatal: configuration problems are rejected when
/// options are applied, and measurement failures degrade to `min_row_height`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },

    #[error("measurement unavailable for item {index} after {attempts} attempts")]
    MeasurementUnavailable { index: usize, attempts: u32 },
}

pub type Result<T> = core::result::Result<T, Error>;
