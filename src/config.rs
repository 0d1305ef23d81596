use serde::{Deserialize, Serialize};

use crate::error::{DnaError, Result};

pub const DEFAULT_KMER_MIN: usize = 3;
pub const DEFAULT_KMER_MAX: usize = 6;
pub const DEFAULT_FAMILY_WINDOW: usize = 6;

/// 分析参数：k-mer 长度允许范围与基因家族窗口长度。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub kmer_min: usize,
    pub kmer_max: usize,
    pub family_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            kmer_min: DEFAULT_KMER_MIN,
            kmer_max: DEFAULT_KMER_MAX,
            family_window: DEFAULT_FAMILY_WINDOW,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kmer_min == 0 {
            return Err(DnaError::InvalidConfig("kmer_min must be at least 1".to_string()));
        }
        if self.kmer_min > self.kmer_max {
            return Err(DnaError::InvalidConfig(format!(
                "kmer_min ({}) exceeds kmer_max ({})",
                self.kmer_min, self.kmer_max
            )));
        }
        if self.family_window == 0 {
            return Err(DnaError::InvalidConfig("family_window must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn check_k(&self, k: usize) -> Result<()> {
        if k < self.kmer_min || k > self.kmer_max {
            return Err(DnaError::KmerOutOfRange { k, min: self.kmer_min, max: self.kmer_max });
        }
        Ok(())
    }
}
