use serde::Serialize;

use crate::sequence::Sequence;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationRecord {
    /// 同一位置（1-based）的碱基替换
    Substitution { position: usize, base1: char, base2: char },
    LengthMismatch { len1: usize, len2: usize },
    NoMutations,
}

/// 逐位比较两条序列，只报告替换；不做比对，因此不识别插入或缺失。
/// 长度不同时在末尾追加一条 `LengthMismatch`。
pub fn detect_mutations(seq1: &Sequence, seq2: &Sequence) -> Vec<MutationRecord> {
    if seq1 == seq2 {
        return vec![MutationRecord::NoMutations];
    }
    let mut out: Vec<MutationRecord> = seq1
        .as_bytes()
        .iter()
        .zip(seq2.as_bytes())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, (&a, &b))| MutationRecord::Substitution {
            position: i + 1,
            base1: a as char,
            base2: b as char,
        })
        .collect();
    if seq1.len() != seq2.len() {
        out.push(MutationRecord::LengthMismatch { len1: seq1.len(), len2: seq2.len() });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(a: &str, b: &str) -> Vec<MutationRecord> {
        detect_mutations(&Sequence::new(a).unwrap(), &Sequence::new(b).unwrap())
    }

    #[test]
    fn single_substitution() {
        assert_eq!(
            diff("ATGC", "ATCC"),
            vec![MutationRecord::Substitution { position: 3, base1: 'G', base2: 'C' }]
        );
    }

    #[test]
    fn identical_sequences() {
        assert_eq!(diff("ACGT", "ACGT"), vec![MutationRecord::NoMutations]);
    }

    #[test]
    fn shorter_prefix_only_reports_length() {
        assert_eq!(diff("ACGT", "AC"), vec![MutationRecord::LengthMismatch { len1: 4, len2: 2 }]);
    }

    #[test]
    fn insertion_is_seen_as_substitutions() {
        let recs = diff("ACGT", "AACGT");
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0], MutationRecord::Substitution { position: 2, base1: 'C', base2: 'A' });
        assert_eq!(recs[3], MutationRecord::LengthMismatch { len1: 4, len2: 5 });
    }
}
