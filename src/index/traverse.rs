//! 后缀树上的只读深度优先遍历。全部使用显式栈，避免长序列递归过深；
//! 孩子按符号编码升序访问，结果顺序确定。

use super::suffix_tree::{NodeId, SuffixTree, ROOT};

/// `path_search` 的一次命中：从根出发、截断到目标深度的路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthHit {
    /// 路径截断处所在边的下端节点，其下叶子即该路径的全部出现
    pub node: NodeId,
    /// 路径标签在文本中的起点，标签为 `text[label_start..label_start + depth]`
    pub label_start: usize,
}

impl SuffixTree {
    /// 收集 node 子树下所有叶子的后缀起点（0-based，升序）。
    pub fn collect_leaves(&self, node: NodeId) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if self.is_leaf(id) {
                out.extend(self.node(id).suffix_index());
                continue;
            }
            stack.extend(self.children(id));
        }
        out.sort_unstable();
        out
    }

    /// 自 from 向下搜索长度恰好达到 target_depth 的所有路径（深度从 from 起算），
    /// 每条边只取到目标深度为止。达不到目标深度的分支被忽略。
    pub fn path_search(&self, from: NodeId, target_depth: usize) -> Vec<DepthHit> {
        let mut hits = Vec::new();
        if target_depth == 0 {
            return hits;
        }
        // (节点, 进入该节点之前已累积的路径长度)
        let mut stack: Vec<(NodeId, usize)> = self.children(from).rev().map(|c| (c, 0)).collect();
        while let Some((id, before)) = stack.pop() {
            let len = self.edge_len(id);
            let start = self.edge_start(id);
            if before + len >= target_depth {
                hits.push(DepthHit { node: id, label_start: start - before });
                continue;
            }
            stack.extend(self.children(id).rev().map(|c| (c, before + len)));
        }
        hits
    }

    /// 全部非根内部节点及其字符串深度，先序、孩子编码升序。
    pub fn internal_nodes(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            if self.is_leaf(id) {
                continue;
            }
            if id != ROOT {
                out.push((id, depth));
            }
            stack.extend(self.children(id).rev().map(|c| (c, depth + self.edge_len(c))));
        }
        out
    }

    /// 节点标签结束处往回 depth 个符号即为整条路径标签的起点。
    pub fn path_label(&self, id: NodeId, depth: usize) -> &[u8] {
        if id == ROOT || depth == 0 {
            return &[];
        }
        let end = self.edge_start(id) + self.edge_len(id);
        &self.text()[end - depth..end]
    }
}
