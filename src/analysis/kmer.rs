use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{DnaError, Result};
use crate::sequence::Sequence;

/// k-mer → 出现位置（1-based 起点，升序）
pub type KmerPositions = BTreeMap<String, Vec<usize>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KmerResult {
    pub k: usize,
    pub kmers: KmerPositions,
    pub motif: Option<String>,
    /// 包含 motif 的 k-mer 子集，仅在给出 motif 时存在
    pub matches: Option<KmerPositions>,
}

impl KmerResult {
    pub fn count(&self, kmer: &str) -> usize {
        self.kmers.get(kmer).map_or(0, Vec::len)
    }
}

/// 滑动窗口统计长度为 k 的子串位置，可选地筛出包含 motif 的 k-mer。
/// k 超出配置范围报错；k 大于序列长度时返回空结果。
pub fn kmer_frequency(
    seq: &Sequence,
    k: usize,
    motif: Option<&str>,
    cfg: &AnalysisConfig,
) -> Result<KmerResult> {
    cfg.check_k(k)?;
    let motif = match motif {
        Some(m) => Some(Sequence::new(m).map_err(|e| match e {
            DnaError::EmptySequence => DnaError::EmptyMotif,
            other => other,
        })?),
        None => None,
    };

    let bytes = seq.as_bytes();
    let mut table: HashMap<&[u8], Vec<usize>> = HashMap::new();
    if k <= bytes.len() {
        for (i, window) in bytes.windows(k).enumerate() {
            table.entry(window).or_default().push(i + 1);
        }
    }
    let kmers: KmerPositions = table
        .into_iter()
        .map(|(w, pos)| (String::from_utf8_lossy(w).into_owned(), pos))
        .collect();

    let matches = motif.as_ref().map(|m| {
        kmers
            .iter()
            .filter(|(key, _)| key.contains(m.as_str()))
            .map(|(key, pos)| (key.clone(), pos.clone()))
            .collect::<KmerPositions>()
    });

    Ok(KmerResult { k, kmers, motif: motif.map(|m| m.to_string()), matches })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Sequence {
        Sequence::new(s).unwrap()
    }

    #[test]
    fn positions_are_one_based() {
        let res = kmer_frequency(&seq("ATGATG"), 3, None, &AnalysisConfig::default()).unwrap();
        let mut expected = KmerPositions::new();
        expected.insert("ATG".to_string(), vec![1, 4]);
        expected.insert("GAT".to_string(), vec![3]);
        expected.insert("TGA".to_string(), vec![2]);
        assert_eq!(res.kmers, expected);
        assert_eq!(res.count("ATG"), 2);
        assert!(res.matches.is_none());
    }

    #[test]
    fn motif_filters_subset() {
        let res = kmer_frequency(&seq("ATGATGCC"), 4, Some("GA"), &AnalysisConfig::default()).unwrap();
        let matches = res.matches.unwrap();
        assert_eq!(matches.keys().cloned().collect::<Vec<_>>(), vec!["ATGA", "GATG", "TGAT"]);
        assert_eq!(res.motif.as_deref(), Some("GA"));
    }

    #[test]
    fn k_longer_than_sequence_is_empty() {
        let res = kmer_frequency(&seq("ACG"), 5, None, &AnalysisConfig::default()).unwrap();
        assert!(res.kmers.is_empty());
    }

    #[test]
    fn k_equal_to_length_gives_one_kmer() {
        let res = kmer_frequency(&seq("ACGTA"), 5, None, &AnalysisConfig::default()).unwrap();
        assert_eq!(res.kmers.len(), 1);
        assert_eq!(res.kmers["ACGTA"], vec![1]);
    }

    #[test]
    fn invalid_arguments() {
        let cfg = AnalysisConfig::default();
        assert!(matches!(
            kmer_frequency(&seq("ACGT"), 2, None, &cfg),
            Err(DnaError::KmerOutOfRange { .. })
        ));
        assert!(matches!(kmer_frequency(&seq("ACGT"), 3, Some(""), &cfg), Err(DnaError::EmptyMotif)));
        assert!(matches!(
            kmer_frequency(&seq("ACGT"), 3, Some("AXG"), &cfg),
            Err(DnaError::InvalidSymbol { pos: 1, .. })
        ));
    }
}
