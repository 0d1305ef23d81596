//! 索引结构：后缀数组、LCP 数组、后缀树及其遍历。
//!
//! 底层构建函数均作用于数值化文本（见 [`crate::util::dna`]），
//! 下面三个函数是面向 [`Sequence`] 的入口。

pub mod lcp;
pub mod sa;
pub mod suffix_tree;
pub mod traverse;

use crate::error::Result;
use crate::sequence::Sequence;

pub use sa::SuffixArray;
pub use suffix_tree::{NodeId, SuffixTree, ROOT};
pub use traverse::DepthHit;

/// 序列（不含哨兵）的后缀数组。
pub fn build_suffix_array(seq: &Sequence) -> SuffixArray {
    SuffixArray::build(&seq.encode())
}

/// 与 [`build_suffix_array`] 配套的 LCP 数组，长度 n-1。
pub fn build_lcp_array(seq: &Sequence, sa: &SuffixArray) -> Vec<u32> {
    lcp::build_lcp(&seq.encode(), sa.as_slice())
}

/// 序列追加 `$` 后的后缀树。
pub fn build_suffix_tree(seq: &Sequence) -> Result<SuffixTree> {
    SuffixTree::build(&seq.terminated())
}
