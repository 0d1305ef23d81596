pub const SIGMA: usize = 6; // {0:$, 1:#, 2:A, 3:C, 4:G, 5:T}

/// 文本结束哨兵，字典序最小
pub const TERMINATOR: u8 = 0;
/// 拼接两条序列时使用的分隔哨兵，小于任意碱基且不同于 TERMINATOR
pub const SEPARATOR: u8 = 1;

#[inline]
pub fn to_alphabet(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(2),
        b'C' => Some(3),
        b'G' => Some(4),
        b'T' => Some(5),
        _ => None,
    }
}

#[inline]
pub fn from_alphabet(a: u8) -> u8 {
    match a {
        0 => b'$',
        1 => b'#',
        2 => b'A',
        3 => b'C',
        4 => b'G',
        5 => b'T',
        _ => b'?',
    }
}

#[inline]
pub fn is_sentinel(a: u8) -> bool {
    a == TERMINATOR || a == SEPARATOR
}

/// 外部清洗：转大写并丢弃所有非 ACGT 字符（包括空白、换行、N）。
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        let up = b.to_ascii_uppercase();
        if matches!(up, b'A' | b'C' | b'G' | b'T') {
            out.push(up);
        }
    }
    out
}

/// 将编码后的片段还原为 ASCII 字符串（哨兵显示为 `$` / `#`）。
pub fn decode(codes: &[u8]) -> String {
    codes.iter().map(|&a| from_alphabet(a) as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_round_trip_keeps_order() {
        let codes: Vec<u8> = b"ACGT".iter().filter_map(|&b| to_alphabet(b)).collect();
        assert_eq!(codes, vec![2, 3, 4, 5]);
        assert!(TERMINATOR < SEPARATOR && SEPARATOR < codes[0]);
        assert_eq!(decode(&codes), "ACGT");
    }

    #[test]
    fn lowercase_and_n_are_not_alphabet() {
        assert_eq!(to_alphabet(b'a'), None);
        assert_eq!(to_alphabet(b'N'), None);
    }

    #[test]
    fn normalize_strips_noise() {
        assert_eq!(normalize_seq(b"ac g\r\ntN nx"), b"ACGT");
        assert!(normalize_seq(b">>> 123").is_empty());
    }
}
