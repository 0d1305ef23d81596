use log::debug;
use serde::Serialize;

use crate::index::{lcp, sa};
use crate::sequence::Sequence;
use crate::util::dna;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommonResult {
    Found {
        substring: String,
        length: usize,
        /// 在第一条序列中的位置（1-based）
        pos1: usize,
        /// 在第二条序列中的位置（1-based）
        pos2: usize,
    },
    NoCommonSubstring,
}

/// 最长公共子串：在 `seq1 # seq2` 上构建后缀数组与 LCP，
/// 只考虑相邻两后缀分别来自两条序列的边界，取严格最大的 LCP；
/// 并列时取后缀数组顺序中最先出现的边界。报告的位置是该子串在各自序列中的首次出现。
pub fn longest_common_substring(seq1: &Sequence, seq2: &Sequence) -> CommonResult {
    let n1 = seq1.len();
    let mut text = seq1.encode();
    text.push(dna::SEPARATOR);
    text.extend(seq2.encode());

    let sa = sa::build_sa(&text);
    let lcp = lcp::build_lcp(&text, &sa);

    let mut best: Option<(usize, usize)> = None; // (lcp 下标, 长度)
    for (i, &l) in lcp.iter().enumerate() {
        let l = l as usize;
        let in_first = (sa[i] as usize) < n1;
        let next_in_first = (sa[i + 1] as usize) < n1;
        if in_first != next_in_first && l > best.map_or(0, |(_, b)| b) {
            best = Some((i, l));
        }
    }

    let Some((i, length)) = best else {
        return CommonResult::NoCommonSubstring;
    };
    let (a, b) = (sa[i] as usize, sa[i + 1] as usize);
    let (p1, p2) = if a < n1 { (a, b) } else { (b, a) };
    let sub = &text[p1..p1 + length];
    let p1 = first_occurrence(&text[..n1], sub).unwrap_or(p1);
    let p2 = first_occurrence(&text[n1 + 1..], sub).map_or(p2, |p| p + n1 + 1);
    debug!("lcs boundary={} length={} p1={} p2={}", i, length, p1, p2);

    CommonResult::Found {
        substring: dna::decode(sub),
        length,
        pos1: p1 + 1,
        pos2: p2 - n1,
    }
}

fn first_occurrence(hay: &[u8], needle: &[u8]) -> Option<usize> {
    hay.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcs(a: &str, b: &str) -> CommonResult {
        longest_common_substring(&Sequence::new(a).unwrap(), &Sequence::new(b).unwrap())
    }

    #[test]
    fn finds_shared_core() {
        assert_eq!(
            lcs("ACGTACGT", "TACGTTT"),
            CommonResult::Found { substring: "TACGT".to_string(), length: 5, pos1: 4, pos2: 1 }
        );
    }

    #[test]
    fn disjoint_alphabets_have_no_common_substring() {
        assert_eq!(lcs("AAAA", "CCGG"), CommonResult::NoCommonSubstring);
    }

    #[test]
    fn identical_sequences() {
        assert_eq!(
            lcs("GATTACA", "GATTACA"),
            CommonResult::Found { substring: "GATTACA".to_string(), length: 7, pos1: 1, pos2: 1 }
        );
    }

    #[test]
    fn positions_are_first_occurrences() {
        assert_eq!(
            lcs("ACTGACC", "ACA"),
            CommonResult::Found { substring: "AC".to_string(), length: 2, pos1: 1, pos2: 1 }
        );
    }

    #[test]
    fn tie_goes_to_first_boundary_in_suffix_order() {
        // AA 与 GG 都长 2；AA 的边界在后缀数组中先出现
        assert_eq!(
            lcs("GGTTAA", "AACGG"),
            CommonResult::Found { substring: "AA".to_string(), length: 2, pos1: 5, pos2: 1 }
        );
    }

    fn make_dna(len: usize, seed: u32) -> String {
        let bases = ['A', 'C', 'G', 'T'];
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                bases[((x >> 16) % 4) as usize]
            })
            .collect()
    }

    fn naive_lcs_len(a: &[u8], b: &[u8]) -> usize {
        let mut best = 0;
        for i in 0..a.len() {
            for j in 0..b.len() {
                let l = a[i..].iter().zip(&b[j..]).take_while(|(x, y)| x == y).count();
                best = best.max(l);
            }
        }
        best
    }

    #[test]
    fn matches_naive_on_random_pairs() {
        for round in 0..60u32 {
            let a = make_dna(1 + (round as usize * 7) % 60, 3 * round + 1);
            let b = make_dna(1 + (round as usize * 11) % 45, 5 * round + 2);
            let expected = naive_lcs_len(a.as_bytes(), b.as_bytes());
            match lcs(&a, &b) {
                CommonResult::Found { substring, length, pos1, pos2 } => {
                    assert_eq!(length, expected, "a={} b={}", a, b);
                    assert_eq!(a.find(&substring), Some(pos1 - 1));
                    assert_eq!(b.find(&substring), Some(pos2 - 1));
                }
                CommonResult::NoCommonSubstring => assert_eq!(expected, 0, "a={} b={}", a, b),
            }
        }
    }

    #[test]
    fn positions_point_at_substring() {
        let (a, b) = ("CCCCGATTC", "TTGATTAA");
        match lcs(a, b) {
            CommonResult::Found { substring, length, pos1, pos2 } => {
                assert_eq!(substring, "GATT");
                assert_eq!(&a[pos1 - 1..pos1 - 1 + length], substring);
                assert_eq!(&b[pos2 - 1..pos2 - 1 + length], substring);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
