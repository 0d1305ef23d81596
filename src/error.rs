use thiserror::Error;

/// 核心分析操作的错误类型。
///
/// "无重复子串"、"无公共子串" 等结果不是错误，见各结果枚举。
#[derive(Debug, Error)]
pub enum DnaError {
    #[error("empty sequence")]
    EmptySequence,
    #[error("invalid symbol {symbol:?} at offset {pos}")]
    InvalidSymbol { pos: usize, symbol: char },
    #[error("k-mer length {k} outside configured range [{min}, {max}]")]
    KmerOutOfRange { k: usize, min: usize, max: usize },
    #[error("invalid window size {0}")]
    InvalidWindow(usize),
    #[error("empty motif")]
    EmptyMotif,
    #[error("text must end with a symbol that occurs nowhere else")]
    MissingTerminator,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DnaError>;
