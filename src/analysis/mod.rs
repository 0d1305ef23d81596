//! 六种分析操作。每次调用独立构建所需索引，返回不引用索引的结果快照。

pub mod common;
pub mod composition;
pub mod family;
pub mod kmer;
pub mod mutation;
pub mod repeat;

pub use common::{longest_common_substring, CommonResult};
pub use composition::{nucleotide_composition, Composition, GcClass};
pub use family::{detect_gene_families, FamilyResult};
pub use kmer::{kmer_frequency, KmerPositions, KmerResult};
pub use mutation::{detect_mutations, MutationRecord};
pub use repeat::{longest_repeated_substring, RepeatResult};
