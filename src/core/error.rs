use thiserror::Error;

#[derive(Error, Debug)]
pub enum AoiError {
    #[error("object pool exhausted: all {0} slots are active")]
    PoolExhausted(usize),
}

pub type Result<T> = std::result::Result<T, AoiError>;
