use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown location {0:?}")]
    UnknownLocation(String),

    #[error("no distance between {from:?} and {to:?} in either direction")]
    NoRoute { from: String, to: String },

    #[error("unknown car model code {0:?}")]
    UnknownCar(String),

    #[error("unknown recharge behavior code {0:?}")]
    UnknownBehavior(String),

    #[error("invalid charge percentage {0}: must be within [0, 100]")]
    InvalidCharge(f64),

    #[error("invalid car spec: {field} = {value} must be a non-negative number")]
    InvalidCarSpec { field: &'static str, value: f64 },

    #[error("no start-time distribution for route {from:?} -> {to:?}")]
    UnknownStartTimeRoute { from: String, to: String },

    #[error("start-time distribution {from:?} -> {to:?} has no bucket covering draw {draw:.3} %")]
    InvalidStartTimeDistribution { from: String, to: String, draw: f64 },

    #[error("{file}:{line}: {column} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        file:   &'static str,
        line:   usize,
        column: &'static str,
        value:  f64,
        min:    f64,
        max:    f64,
    },

    #[error("{file}:{line}: duplicate key {key:?}")]
    DuplicateKey { file: &'static str, line: usize, key: String },

    #[error("{file}:{line}: {message}")]
    Parse { file: &'static str, line: usize, message: String },

    #[error("{0}: no rows loaded")]
    Empty(&'static str),

    #[error("{file}: {source}")]
    Csv {
        file:   &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("model option error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DataResult<T> = Result<T, DataError>;
