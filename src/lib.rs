//! # dnascope
//!
//! DNA 序列索引与结构分析。
//!
//! 本 crate 在 {A,C,G,T} 字母表上构建索引结构，并回答基于它们的结构查询：
//!
//! - **索引构建**：倍增法后缀数组、Kasai LCP 数组、Ukkonen 在线后缀树
//! - **重复分析**：最长重复子串、固定窗口重复基序（基因家族）
//! - **双序列比较**：最长公共子串、逐位替换检测
//! - **统计**：碱基组成、k-mer 频率与 motif 筛选
//!
//! ## 快速示例
//!
//! ```rust
//! use dnascope::analysis::{longest_repeated_substring, RepeatResult};
//! use dnascope::Sequence;
//!
//! let seq: Sequence = "ATATAT".parse().unwrap();
//! match longest_repeated_substring(&seq).unwrap() {
//!     RepeatResult::Found { substring, positions, .. } => {
//!         assert_eq!(substring, "ATAT");
//!         assert_eq!(positions, vec![1, 3]);
//!     }
//!     RepeatResult::NoRepeat => unreachable!(),
//! }
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 后缀数组、LCP 数组、后缀树与树遍历
//! - [`analysis`] — 六种分析操作及其结果类型
//! - [`io`] — FASTA / 纯文本序列读取
//! - [`util`] — 字母表编码与外部清洗函数
//!
//! 所有结构按调用构建、用后即弃；调用之间不共享任何可变状态。

pub mod analysis;
pub mod config;
pub mod error;
pub mod index;
pub mod io;
pub mod sequence;
pub mod util;

pub use config::AnalysisConfig;
pub use error::{DnaError, Result};
pub use sequence::Sequence;
