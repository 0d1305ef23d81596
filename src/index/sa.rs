use std::cmp::Ordering;

use log::{debug, trace};

/// 构建后缀数组（倍增法，每轮一次比较排序，共 O(log n) 轮）。
/// 输入为数值化的文本（0:$,1:#,2:A,3:C,4:G,5:T），哨兵可出现多次，
/// 只要求其编码小于所有碱基。
pub fn build_sa(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = text.iter().map(|&b| i64::from(b)).collect();
    let mut next_rank: Vec<i64> = vec![0; n];

    // 越界时第二关键字为 -1，排在所有真实 rank 之前
    let key = |rank: &[i64], i: usize, k: usize| (rank[i], if i + k < n { rank[i + k] } else { -1 });

    let mut k = 1usize;
    let mut rounds = 0usize;
    while k < n {
        sa.sort_unstable_by_key(|&i| key(&rank, i, k));

        next_rank[sa[0]] = 0;
        for w in 1..n {
            let (prev, curr) = (sa[w - 1], sa[w]);
            let bump = i64::from(key(&rank, prev, k) != key(&rank, curr, k));
            next_rank[curr] = next_rank[prev] + bump;
        }
        std::mem::swap(&mut rank, &mut next_rank);
        rounds += 1;
        trace!("sa round k={} max_rank={}", k, rank[sa[n - 1]]);

        if rank[sa[n - 1]] as usize == n - 1 {
            break;
        }
        k <<= 1;
    }
    debug!("suffix array built: n={} rounds={}", n, rounds);

    sa.into_iter().map(|x| x as u32).collect()
}

/// 后缀数组的逆置换：`rank[sa[i]] = i`。
pub fn inverse(sa: &[u32]) -> Vec<u32> {
    let mut rank = vec![0u32; sa.len()];
    for (i, &p) in sa.iter().enumerate() {
        rank[p as usize] = i as u32;
    }
    rank
}

/// 后缀数组：文本所有后缀起点按字典序排列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixArray {
    sa: Vec<u32>,
}

impl SuffixArray {
    pub fn build(text: &[u8]) -> Self {
        Self { sa: build_sa(text) }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.sa
    }

    pub fn rank(&self) -> Vec<u32> {
        inverse(&self.sa)
    }

    pub fn len(&self) -> usize {
        self.sa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    /// 精确查找：返回 pattern 在 text 中所有出现的起点（升序）。
    /// text 必须是构建该后缀数组时使用的同一文本。
    pub fn find(&self, text: &[u8], pattern: &[u8]) -> Vec<u32> {
        if pattern.is_empty() || pattern.len() > text.len() {
            return Vec::new();
        }
        let cmp = |p: u32| {
            let suffix = &text[p as usize..];
            let m = suffix.len().min(pattern.len());
            match suffix[..m].cmp(&pattern[..m]) {
                Ordering::Equal if suffix.len() < pattern.len() => Ordering::Less,
                other => other,
            }
        };
        let lo = self.sa.partition_point(|&p| cmp(p) == Ordering::Less);
        let hi = lo + self.sa[lo..].partition_point(|&p| cmp(p) == Ordering::Equal);
        let mut hits = self.sa[lo..hi].to_vec();
        hits.sort_unstable();
        hits
    }
}

impl AsRef<[u32]> for SuffixArray {
    fn as_ref(&self) -> &[u32] {
        &self.sa
    }
}
