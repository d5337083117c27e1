use num_bigint::BigInt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("Invalid number: cannot represent {0} as JSON number")]
    InvalidNumber(f64),

    #[error("Integer {0} does not fit in a JSON number")]
    IntegerOutOfRange(BigInt),

    #[error("Invalid where clause `{0}`: expected SUB.PATH=VALUE")]
    InvalidWhere(String),

    #[error("Invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}
