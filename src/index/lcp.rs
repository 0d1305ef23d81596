use log::debug;

use super::sa::inverse;

/// Kasai 算法构建 LCP 数组，长度为 n-1：
/// `lcp[i]` 为后缀 `sa[i]` 与 `sa[i+1]` 的最长公共前缀长度。
///
/// 按文本顺序遍历，匹配长度 h 每步至多减 1，因此总体 O(n)。
pub fn build_lcp(text: &[u8], sa: &[u32]) -> Vec<u32> {
    let n = text.len();
    debug_assert_eq!(n, sa.len());
    if n <= 1 {
        return Vec::new();
    }
    let rank = inverse(sa);
    let mut lcp = vec![0u32; n - 1];
    let mut h = 0usize;

    for i in 0..n {
        let r = rank[i] as usize;
        if r == 0 {
            // 字典序第一个后缀没有前驱
            h = 0;
            continue;
        }
        let j = sa[r - 1] as usize;
        while i + h < n && j + h < n && text[i + h] == text[j + h] {
            h += 1;
        }
        lcp[r - 1] = h as u32;
        h = h.saturating_sub(1);
    }
    debug!("lcp array built: n={}", n);
    lcp
}
