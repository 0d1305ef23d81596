use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{DnaError, Result};
use crate::util::dna;

/// 经过校验的 DNA 序列，仅包含大写 `A/C/G/T`，构造后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sequence(String);

impl Sequence {
    /// 校验并构造序列。空序列或含非 ACGT 字符均返回错误，不做任何替换。
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Err(DnaError::EmptySequence);
        }
        if let Some(pos) = bytes.iter().position(|&b| dna::to_alphabet(b).is_none()) {
            return Err(DnaError::InvalidSymbol { pos, symbol: bytes[pos] as char });
        }
        // 全部为 ASCII，转换不会失败
        Ok(Self(bytes.iter().map(|&b| b as char).collect()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 数值化文本，不含哨兵。
    pub fn encode(&self) -> Vec<u8> {
        self.0.bytes().filter_map(dna::to_alphabet).collect()
    }

    /// 数值化文本并追加结束哨兵 `$`，用于后缀树构建。
    pub fn terminated(&self) -> Vec<u8> {
        let mut text = Vec::with_capacity(self.len() + 1);
        text.extend(self.0.bytes().filter_map(dna::to_alphabet));
        text.push(dna::TERMINATOR);
        text
    }
}

impl FromStr for Sequence {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(matches!(Sequence::new(""), Err(DnaError::EmptySequence)));
    }

    #[test]
    fn rejects_unnormalized_symbols() {
        match Sequence::new("ACgT") {
            Err(DnaError::InvalidSymbol { pos, symbol }) => {
                assert_eq!(pos, 2);
                assert_eq!(symbol, 'g');
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(Sequence::new("ACNT").is_err());
    }

    #[test]
    fn terminated_appends_sentinel() {
        let s: Sequence = "GAT".parse().unwrap();
        assert_eq!(s.encode(), vec![4, 2, 5]);
        assert_eq!(s.terminated(), vec![4, 2, 5, dna::TERMINATOR]);
        assert_eq!(s.to_string(), "GAT");
    }
}
