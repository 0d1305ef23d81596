use std::fs::File;
use std::io::BufReader;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use dnascope::analysis::{self, CommonResult, Composition, FamilyResult, KmerResult, MutationRecord, RepeatResult};
use dnascope::config::{AnalysisConfig, DEFAULT_FAMILY_WINDOW, DEFAULT_KMER_MAX, DEFAULT_KMER_MIN};
use dnascope::index;
use dnascope::io::fasta::FastaReader;
use dnascope::util::dna;
use dnascope::Sequence;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "dnascope", author, version, about = "DNA sequence indexing and structural analysis", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print a JSON report instead of plain text
    #[arg(long, global = true)]
    json: bool,
    /// Worker threads; each input record is analysed independently
    #[arg(short = 't', long = "threads", default_value_t = 1, global = true)]
    threads: usize,
    /// Info-level logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
    /// Debug-level logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Args, Debug)]
struct SingleInput {
    /// FASTA or plain-text sequence file (every record is analysed)
    input: Option<String>,
    /// Sequence given inline
    #[arg(short = 's', long = "seq", conflicts_with = "input")]
    seq: Option<String>,
}

#[derive(Args, Debug)]
struct PairInput {
    /// First (reference) sequence given inline
    #[arg(long = "seq1", conflicts_with = "file1")]
    seq1: Option<String>,
    /// Second (sample) sequence given inline
    #[arg(long = "seq2", conflicts_with = "file2")]
    seq2: Option<String>,
    /// First sequence file; its first record is used
    #[arg(long = "file1")]
    file1: Option<String>,
    /// Second sequence file; its first record is used
    #[arg(long = "file2")]
    file2: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Base counts, AT/GC percentages and richness class
    Composition {
        #[command(flatten)]
        input: SingleInput,
    },
    /// k-mer positions, optionally filtered by a motif
    Kmer {
        #[command(flatten)]
        input: SingleInput,
        #[arg(short = 'k', long = "k", default_value_t = DEFAULT_KMER_MIN)]
        k: usize,
        #[arg(short = 'm', long)]
        motif: Option<String>,
        #[arg(long = "kmer-min", default_value_t = DEFAULT_KMER_MIN)]
        kmer_min: usize,
        #[arg(long = "kmer-max", default_value_t = DEFAULT_KMER_MAX)]
        kmer_max: usize,
    },
    /// Longest repeated substring (suffix tree)
    Repeat {
        #[command(flatten)]
        input: SingleInput,
    },
    /// Longest common substring of two sequences (suffix array + LCP)
    Common {
        #[command(flatten)]
        pair: PairInput,
    },
    /// Positional substitutions between two sequences
    Mutations {
        #[command(flatten)]
        pair: PairInput,
    },
    /// Repeated fixed-length motifs (suffix tree)
    Families {
        #[command(flatten)]
        input: SingleInput,
        #[arg(short = 'w', long = "window", default_value_t = DEFAULT_FAMILY_WINDOW)]
        window: usize,
    },
    /// Dump suffix array, rank and LCP arrays
    Index {
        #[command(flatten)]
        input: SingleInput,
    },
}

#[derive(Serialize, Debug)]
struct IndexDump {
    sa: Vec<u32>,
    rank: Vec<u32>,
    lcp: Vec<u32>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Outcome {
    Composition(Composition),
    Kmer(KmerResult),
    Repeat(RepeatResult),
    Common(CommonResult),
    Mutations(Vec<MutationRecord>),
    Families(FamilyResult),
    Index(IndexDump),
}

#[derive(Serialize, Debug)]
struct RecordReport {
    id: String,
    result: Outcome,
}

#[derive(Serialize, Debug)]
struct Report {
    tool: &'static str,
    version: &'static str,
    generated_at: String,
    command: String,
    records: Vec<RecordReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let (name, records) = match &cli.command {
        Commands::Composition { input } => (
            "composition",
            run_single(input, cli.threads, |s| Ok(Outcome::Composition(analysis::nucleotide_composition(s))))?,
        ),
        Commands::Kmer { input, k, motif, kmer_min, kmer_max } => {
            let cfg = AnalysisConfig { kmer_min: *kmer_min, kmer_max: *kmer_max, ..AnalysisConfig::default() };
            cfg.validate()?;
            let motif = motif.as_deref().map(motif_arg);
            let motif = motif.as_deref();
            (
                "kmer",
                run_single(input, cli.threads, |s| {
                    Ok(Outcome::Kmer(analysis::kmer_frequency(s, *k, motif, &cfg)?))
                })?,
            )
        }
        Commands::Repeat { input } => (
            "repeat",
            run_single(input, cli.threads, |s| Ok(Outcome::Repeat(analysis::longest_repeated_substring(s)?)))?,
        ),
        Commands::Common { pair } => {
            let (id, a, b) = load_pair(pair)?;
            let res = analysis::longest_common_substring(&a, &b);
            ("common", vec![RecordReport { id, result: Outcome::Common(res) }])
        }
        Commands::Mutations { pair } => {
            let (id, a, b) = load_pair(pair)?;
            let res = analysis::detect_mutations(&a, &b);
            ("mutations", vec![RecordReport { id, result: Outcome::Mutations(res) }])
        }
        Commands::Families { input, window } => {
            let cfg = AnalysisConfig { family_window: *window, ..AnalysisConfig::default() };
            cfg.validate()?;
            (
                "families",
                run_single(input, cli.threads, |s| {
                    Ok(Outcome::Families(analysis::detect_gene_families(s, cfg.family_window)?))
                })?,
            )
        }
        Commands::Index { input } => (
            "index",
            run_single(input, cli.threads, |s| {
                let sa = index::build_suffix_array(s);
                let lcp = index::build_lcp_array(s, &sa);
                Ok(Outcome::Index(IndexDump { rank: sa.rank(), sa: sa.as_slice().to_vec(), lcp }))
            })?,
        ),
    };

    if cli.json {
        let report = Report {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
            command: name.to_string(),
            records,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for rec in &records {
            print_text(rec);
        }
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Analyse every record of a single-sequence input on a dedicated pool.
/// Each worker builds its own index; nothing is shared between records.
fn run_single<F>(input: &SingleInput, threads: usize, op: F) -> Result<Vec<RecordReport>>
where
    F: Fn(&Sequence) -> dnascope::Result<Outcome> + Sync,
{
    let seqs = load_single(input)?;
    info!("records: {}", seqs.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| anyhow!("cannot start worker pool: {}", e))?;
    pool.install(|| {
        seqs.par_iter()
            .map(|(id, seq)| -> Result<RecordReport> {
                debug!("analysing '{}' ({} bp)", id, seq.len());
                let result = op(seq).with_context(|| format!("record '{}'", id))?;
                Ok(RecordReport { id: id.clone(), result })
            })
            .collect()
    })
}

fn inline_sequence(raw: &str, flag: &str) -> Result<Sequence> {
    Sequence::new(dna::normalize_seq(raw.as_bytes())).with_context(|| format!("invalid sequence in --{}", flag))
}

/// motif 与序列一样在 CLI 边界统一大写。
fn motif_arg(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

fn read_file(path: &str) -> Result<Vec<(String, Sequence)>> {
    let fh = File::open(path).map_err(|e| anyhow!("cannot open input '{}': {}", path, e))?;
    let recs = FastaReader::with_anonymous_id(BufReader::new(fh), path).records()?;
    if recs.is_empty() {
        bail!("input '{}' contains no sequences", path);
    }
    recs.iter()
        .map(|r| {
            let seq = r.to_sequence().with_context(|| format!("invalid sequence in record '{}'", r.id))?;
            Ok((r.id.clone(), seq))
        })
        .collect()
}

fn load_single(input: &SingleInput) -> Result<Vec<(String, Sequence)>> {
    match (&input.seq, &input.input) {
        (Some(s), _) => Ok(vec![("seq".to_string(), inline_sequence(s, "seq")?)]),
        (None, Some(path)) => read_file(path),
        (None, None) => bail!("provide a sequence with --seq or an input file"),
    }
}

fn load_one(inline: &Option<String>, file: &Option<String>, flag: &str) -> Result<(String, Sequence)> {
    match (inline, file) {
        (Some(s), _) => Ok((flag.to_string(), inline_sequence(s, flag)?)),
        (None, Some(path)) => Ok(read_file(path)?.swap_remove(0)),
        (None, None) => bail!("missing --{0} or --file{1}", flag, &flag[3..]),
    }
}

fn load_pair(pair: &PairInput) -> Result<(String, Sequence, Sequence)> {
    let (id1, a) = load_one(&pair.seq1, &pair.file1, "seq1")?;
    let (id2, b) = load_one(&pair.seq2, &pair.file2, "seq2")?;
    Ok((format!("{}|{}", id1, id2), a, b))
}

fn join_positions(p: &[usize]) -> String {
    p.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")
}

fn print_text(rec: &RecordReport) {
    println!(">{}", rec.id);
    match &rec.result {
        Outcome::Composition(c) => {
            println!("length: {}", c.length);
            println!("A: {}\nC: {}\nG: {}\nT: {}", c.a, c.c, c.g, c.t);
            println!("AT%: {:.2}\nGC%: {:.2}", c.at_percent, c.gc_percent);
            println!("richness: {}", c.class);
        }
        Outcome::Kmer(r) => {
            let shown = r.matches.as_ref().unwrap_or(&r.kmers);
            if let Some(m) = &r.motif {
                println!("motif: {} ({} of {} {}-mers)", m, shown.len(), r.kmers.len(), r.k);
            }
            if shown.is_empty() {
                println!("no k-mers found");
            }
            for (kmer, pos) in shown {
                println!("{}\tcount: {}\tpositions: {}", kmer, pos.len(), join_positions(pos));
            }
        }
        Outcome::Repeat(RepeatResult::Found { substring, length, positions }) => {
            println!("substring: {}\nlength: {}\npositions: {}", substring, length, join_positions(positions));
        }
        Outcome::Repeat(RepeatResult::NoRepeat) => println!("no repeated substring found"),
        Outcome::Common(CommonResult::Found { substring, length, pos1, pos2 }) => {
            println!("substring: {}\nlength: {}", substring, length);
            println!("position in sequence 1: {}\nposition in sequence 2: {}", pos1, pos2);
        }
        Outcome::Common(CommonResult::NoCommonSubstring) => println!("no common substring found"),
        Outcome::Mutations(list) => {
            for m in list {
                match m {
                    MutationRecord::Substitution { position, base1, base2 } => {
                        println!("position {}: {} -> {}", position, base1, base2);
                    }
                    MutationRecord::LengthMismatch { len1, len2 } => {
                        println!("length mismatch: {} vs {}", len1, len2);
                    }
                    MutationRecord::NoMutations => println!("no mutations detected"),
                }
            }
        }
        Outcome::Families(FamilyResult::Found { window, families }) => {
            println!("window: {}", window);
            for (motif, count) in families {
                println!("{}\t{}", motif, count);
            }
        }
        Outcome::Families(FamilyResult::NoFamilies { window }) => {
            println!("window: {}\nno gene families detected", window);
        }
        Outcome::Index(d) => {
            println!("i\tsa\trank\tlcp");
            for i in 0..d.sa.len() {
                let l = d.lcp.get(i).map_or_else(|| "-".to_string(), u32::to_string);
                println!("{}\t{}\t{}\t{}", i, d.sa[i], d.rank[i], l);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_motif_filters_like_uppercase() {
        let seq = inline_sequence("atgatgcga", "seq").unwrap();
        let cfg = AnalysisConfig::default();
        let motif = motif_arg("ga");
        let res = analysis::kmer_frequency(&seq, 3, Some(&motif), &cfg).unwrap();
        let matched = res.matches.unwrap();
        assert!(matched.contains_key("TGA"));
        assert!(matched.contains_key("GAT"));
        assert!(matched.contains_key("CGA"));
    }

    #[test]
    fn inline_sequence_is_normalized() {
        assert_eq!(inline_sequence("ac gt\n", "seq").unwrap().as_str(), "ACGT");
        assert!(inline_sequence("nnn", "seq1").is_err());
    }
}
