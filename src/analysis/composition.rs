use std::fmt;

use serde::Serialize;

use crate::sequence::Sequence;

/// 按 AT / GC 含量对序列分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GcClass {
    #[serde(rename = "AT-rich")]
    AtRich,
    #[serde(rename = "GC-rich")]
    GcRich,
    Balanced,
}

impl fmt::Display for GcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GcClass::AtRich => "AT-rich",
            GcClass::GcRich => "GC-rich",
            GcClass::Balanced => "Balanced",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub length: usize,
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    /// 保留两位小数
    pub at_percent: f64,
    pub gc_percent: f64,
    pub class: GcClass,
}

fn percent(part: usize, total: usize) -> f64 {
    let raw = part as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

/// 线性扫描统计碱基组成。分类按整数计数比较，AT 与 GC 相等时为 Balanced。
pub fn nucleotide_composition(seq: &Sequence) -> Composition {
    let mut counts = [0usize; 4];
    for &b in seq.as_bytes() {
        match b {
            b'A' => counts[0] += 1,
            b'C' => counts[1] += 1,
            b'G' => counts[2] += 1,
            _ => counts[3] += 1,
        }
    }
    let [a, c, g, t] = counts;
    let length = seq.len();
    let (at, gc) = (a + t, g + c);
    let class = match at.cmp(&gc) {
        std::cmp::Ordering::Greater => GcClass::AtRich,
        std::cmp::Ordering::Less => GcClass::GcRich,
        std::cmp::Ordering::Equal => GcClass::Balanced,
    };
    Composition {
        length,
        a,
        c,
        g,
        t,
        at_percent: percent(at, length),
        gc_percent: percent(gc, length),
        class,
    }
}
