use serde::Serialize;

use crate::error::Result;
use crate::index::build_suffix_tree;
use crate::sequence::Sequence;
use crate::util::dna;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepeatResult {
    Found {
        substring: String,
        length: usize,
        /// 所有出现位置（1-based，升序）
        positions: Vec<usize>,
    },
    NoRepeat,
}

/// 最长重复子串：后缀树中字符串深度最大的内部节点。
///
/// 内部节点至少两个分支，因此其下至少两个叶子。深度相同时取先序遍历中
/// 最先遇到者（孩子按 $ < A < C < G < T 访问）。
pub fn longest_repeated_substring(seq: &Sequence) -> Result<RepeatResult> {
    let tree = build_suffix_tree(seq)?;

    let mut best: Option<(usize, usize)> = None;
    for (id, depth) in tree.internal_nodes() {
        if best.map_or(true, |(_, d)| depth > d) {
            best = Some((id, depth));
        }
    }

    let Some((id, depth)) = best else {
        return Ok(RepeatResult::NoRepeat);
    };
    let positions: Vec<usize> = tree.collect_leaves(id).into_iter().map(|p| p + 1).collect();
    debug_assert!(positions.len() >= 2);
    Ok(RepeatResult::Found {
        substring: dna::decode(tree.path_label(id, depth)),
        length: depth,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lrs(s: &str) -> RepeatResult {
        longest_repeated_substring(&Sequence::new(s).unwrap()).unwrap()
    }

    /// O(n²) 参考实现：相邻两后缀的最长公共前缀中的最大者。
    fn naive_lrs_len(s: &[u8]) -> usize {
        let n = s.len();
        let mut best = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let l = s[i..].iter().zip(&s[j..]).take_while(|(a, b)| a == b).count();
                best = best.max(l);
            }
        }
        best
    }

    #[test]
    fn alternating_repeat_prefers_smaller_symbol() {
        assert_eq!(
            lrs("ATATAT"),
            RepeatResult::Found { substring: "ATAT".to_string(), length: 4, positions: vec![1, 3] }
        );
    }

    #[test]
    fn no_repeat_in_distinct_symbols() {
        assert_eq!(lrs("ACGT"), RepeatResult::NoRepeat);
        assert_eq!(lrs("G"), RepeatResult::NoRepeat);
    }

    #[test]
    fn homopolymer() {
        match lrs("AAAAA") {
            RepeatResult::Found { substring, length, positions } => {
                assert_eq!(substring, "AAAA");
                assert_eq!(length, 4);
                assert_eq!(positions, vec![1, 2]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn matches_naive_on_random_sequences() {
        let bases = [b'A', b'C', b'G', b'T'];
        let mut x: u32 = 2_024;
        for len in 1..=50 {
            let s: Vec<u8> = (0..len)
                .map(|_| {
                    x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    bases[((x >> 16) % 4) as usize]
                })
                .collect();
            let expected = naive_lrs_len(&s);
            match longest_repeated_substring(&Sequence::new(&s).unwrap()).unwrap() {
                RepeatResult::Found { substring, length, positions } => {
                    assert_eq!(length, expected, "len={}", len);
                    assert!(positions.len() >= 2);
                    for p in positions {
                        assert_eq!(&s[p - 1..p - 1 + length], substring.as_bytes());
                    }
                }
                RepeatResult::NoRepeat => assert_eq!(expected, 0, "len={}", len),
            }
        }
    }
}
