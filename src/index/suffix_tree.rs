//! Ukkonen 在线后缀树构建。
//!
//! 节点保存在 `Vec<Node>` 中，孩子与后缀链接都以下标引用，
//! 根节点的后缀链接指向自身也不会造成所有权环。
//! 叶子的边终点在构建期间为 [`EdgeEnd::Open`]，统一解析为全局 `leaf_end`，
//! 每读入一个字符所有叶子即隐式延长一位；构建结束后冻结为固定值。

use log::debug;

use crate::error::{DnaError, Result};
use crate::util::dna::SIGMA;

pub type NodeId = usize;

/// 根节点固定位于 arena 下标 0
pub const ROOT: NodeId = 0;

/// 边的终点（闭区间）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Fixed(usize),
    /// 随全局 leaf_end 延伸，仅在构建期间出现
    Open,
}

#[derive(Debug, Clone)]
pub struct Node {
    start: usize,
    end: EdgeEnd,
    children: [Option<NodeId>; SIGMA],
    suffix_link: Option<NodeId>,
    suffix_index: Option<usize>,
}

impl Node {
    fn new(start: usize, end: EdgeEnd) -> Self {
        Self { start, end, children: [None; SIGMA], suffix_link: None, suffix_index: None }
    }

    /// 叶子对应后缀的起点（0-based）；内部节点为 None。
    pub fn suffix_index(&self) -> Option<usize> {
        self.suffix_index
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// 已完成构建的后缀树。所有边终点均已冻结，可只读遍历。
#[derive(Debug, Clone)]
pub struct SuffixTree {
    text: Vec<u8>,
    nodes: Vec<Node>,
    leaf_end: usize,
}

impl SuffixTree {
    /// 构建后缀树。text 为数值化文本，末尾符号必须在文本其余位置不出现
    /// （通常为 `$`），否则部分后缀会隐式停留在内部而没有叶子。
    pub fn build(text: &[u8]) -> Result<Self> {
        let n = text.len();
        let Some(&last) = text.last() else {
            return Err(DnaError::EmptySequence);
        };
        if let Some(pos) = text.iter().position(|&a| a as usize >= SIGMA) {
            return Err(DnaError::InvalidSymbol { pos, symbol: char::from(text[pos]) });
        }
        if text[..n - 1].contains(&last) {
            return Err(DnaError::MissingTerminator);
        }

        let mut root = Node::new(0, EdgeEnd::Fixed(0));
        root.suffix_link = Some(ROOT);
        let mut tree = Self {
            text: text.to_vec(),
            nodes: Vec::with_capacity(2 * n),
            leaf_end: 0,
        };
        tree.nodes.push(root);
        tree.extend_all();
        tree.finalize();
        debug!(
            "suffix tree built: n={} nodes={} leaves={}",
            n,
            tree.nodes.len(),
            tree.leaf_count()
        );
        Ok(tree)
    }

    fn new_node(&mut self, start: usize, end: EdgeEnd) -> NodeId {
        self.nodes.push(Node::new(start, end));
        self.nodes.len() - 1
    }

    fn extend_all(&mut self) {
        let n = self.text.len();
        let mut active_node = ROOT;
        let mut active_edge = 0usize;
        let mut active_len = 0usize;
        let mut remaining = 0usize;

        for i in 0..n {
            // 所有 Open 叶子隐式延长到 i
            self.leaf_end = i;
            remaining += 1;
            let mut pending_link: Option<NodeId> = None;

            while remaining > 0 {
                if active_len == 0 {
                    active_edge = i;
                }
                let edge_sym = self.text[active_edge] as usize;

                let existing = self.nodes[active_node].children[edge_sym];
                match existing {
                    None => {
                        // 规则 2：直接在 active_node 下挂新叶子
                        let leaf = self.new_node(i, EdgeEnd::Open);
                        self.nodes[active_node].children[edge_sym] = Some(leaf);
                        if let Some(p) = pending_link.take() {
                            self.nodes[p].suffix_link = Some(active_node);
                        }
                    }
                    Some(next) => {
                        let len = self.edge_len(next);
                        if active_len >= len {
                            // 下行：不消耗扩展
                            active_edge += len;
                            active_len -= len;
                            active_node = next;
                            continue;
                        }
                        let next_start = self.nodes[next].start;
                        if self.text[next_start + active_len] == self.text[i] {
                            // 规则 3：后缀已隐式存在，本轮剩余扩展全部跳过
                            if let Some(p) = pending_link.take() {
                                if active_node != ROOT {
                                    self.nodes[p].suffix_link = Some(active_node);
                                }
                            }
                            active_len += 1;
                            break;
                        }

                        // 在 active_len 处分裂边
                        let split = self.new_node(next_start, EdgeEnd::Fixed(next_start + active_len - 1));
                        self.nodes[split].suffix_link = Some(ROOT);
                        self.nodes[active_node].children[edge_sym] = Some(split);

                        let leaf = self.new_node(i, EdgeEnd::Open);
                        self.nodes[split].children[self.text[i] as usize] = Some(leaf);

                        self.nodes[next].start += active_len;
                        let rest_sym = self.text[self.nodes[next].start] as usize;
                        self.nodes[split].children[rest_sym] = Some(next);

                        if let Some(p) = pending_link {
                            self.nodes[p].suffix_link = Some(split);
                        }
                        pending_link = Some(split);
                    }
                }

                remaining -= 1;
                if active_node == ROOT && active_len > 0 {
                    active_len -= 1;
                    active_edge = i + 1 - remaining;
                } else if active_node != ROOT {
                    active_node = self.nodes[active_node].suffix_link.unwrap_or(ROOT);
                }
            }
        }
    }

    /// 冻结 Open 终点，并按根到叶的深度回填后缀起点：index = n - depth。
    fn finalize(&mut self) {
        let n = self.text.len();
        let last = n - 1;
        for node in self.nodes.iter_mut().skip(1) {
            if node.end == EdgeEnd::Open {
                node.end = EdgeEnd::Fixed(last);
            }
        }
        self.leaf_end = last;

        let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            if id != ROOT && self.nodes[id].is_leaf() {
                self.nodes[id].suffix_index = Some(n - depth);
                continue;
            }
            for child in self.nodes[id].children.iter().flatten() {
                stack.push((*child, depth + self.edge_len(*child)));
            }
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().skip(1).filter(|n| n.is_leaf()).count()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        id != ROOT && self.nodes[id].is_leaf()
    }

    pub fn suffix_link(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].suffix_link
    }

    /// 以符号编码升序返回孩子。
    pub fn children(&self, id: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes[id].children.iter().flatten().copied()
    }

    pub fn child(&self, id: NodeId, sym: u8) -> Option<NodeId> {
        self.nodes[id].children.get(sym as usize).copied().flatten()
    }

    fn edge_end(&self, id: NodeId) -> usize {
        match self.nodes[id].end {
            EdgeEnd::Fixed(e) => e,
            EdgeEnd::Open => self.leaf_end,
        }
    }

    /// 指向 id 的边长度；根节点为 0。
    pub fn edge_len(&self, id: NodeId) -> usize {
        if id == ROOT {
            return 0;
        }
        self.edge_end(id) + 1 - self.nodes[id].start
    }

    /// 指向 id 的边标签在文本中的起点。
    pub fn edge_start(&self, id: NodeId) -> usize {
        self.nodes[id].start
    }

    /// 指向 id 的边的标签（数值化）。
    pub fn edge_label(&self, id: NodeId) -> &[u8] {
        if id == ROOT {
            return &[];
        }
        &self.text[self.nodes[id].start..=self.edge_end(id)]
    }

    /// 精确查找 pattern 的所有出现位置（0-based，升序）。
    pub fn find_occurrences(&self, pattern: &[u8]) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let mut node = ROOT;
        let mut matched = 0usize;
        while matched < pattern.len() {
            let Some(child) = self.child(node, pattern[matched]) else {
                return Vec::new();
            };
            let label = self.edge_label(child);
            let m = label.len().min(pattern.len() - matched);
            if label[..m] != pattern[matched..matched + m] {
                return Vec::new();
            }
            matched += m;
            node = child;
        }
        self.collect_leaves(node)
    }
}
