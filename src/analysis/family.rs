use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{DnaError, Result};
use crate::index::{build_suffix_tree, ROOT};
use crate::sequence::Sequence;
use crate::util::dna;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FamilyResult {
    Found {
        window: usize,
        /// 长度为 window 的子串 → 出现次数（仅保留次数 > 1）
        families: BTreeMap<String, usize>,
    },
    NoFamilies {
        window: usize,
    },
}

/// 重复基序（基因家族）检测：从根沿每个分支向下截取恰好 window 个符号，
/// 截断点所在边下的叶子数即该子串的出现次数。
pub fn detect_gene_families(seq: &Sequence, window: usize) -> Result<FamilyResult> {
    if window == 0 {
        return Err(DnaError::InvalidWindow(window));
    }
    if window > seq.len() {
        return Ok(FamilyResult::NoFamilies { window });
    }
    let tree = build_suffix_tree(seq)?;
    let text = tree.text();

    let mut families = BTreeMap::new();
    for hit in tree.path_search(ROOT, window) {
        let label = &text[hit.label_start..hit.label_start + window];
        // 经过 $ 的路径只能以叶子结束，出现一次
        if label.iter().any(|&a| dna::is_sentinel(a)) {
            continue;
        }
        let count = tree.collect_leaves(hit.node).len();
        if count > 1 {
            *families.entry(dna::decode(label)).or_insert(0) += count;
        }
    }

    if families.is_empty() {
        Ok(FamilyResult::NoFamilies { window })
    } else {
        Ok(FamilyResult::Found { window, families })
    }
}
