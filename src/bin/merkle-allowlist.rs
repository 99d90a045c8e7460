use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use merkle_allowlist::{
    parse_allowlist, Allowlist, HashFunction, MerkleProofTrait, OddNodePolicy, TreeOptions,
};
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HashArg {
    Keccak256,
    Sha256,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OddArg {
    Duplicate,
    PromoteLone,
}

/// Commit an allowlist to a Merkle root and print membership proofs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Allowlist file: JSON array or one address per line
    #[arg(short = 'l', long)]
    allowlist: PathBuf,

    /// Print the proof for this address
    #[arg(short, long)]
    address: Option<String>,

    /// Print every proof record as JSON
    #[arg(long, conflicts_with = "address")]
    all: bool,

    #[arg(long, value_enum, default_value = "keccak256")]
    hash: HashArg,

    /// Keep child order when hashing pairs
    #[arg(long)]
    no_sort_pairs: bool,

    #[arg(long)]
    sort_leaves: bool,

    #[arg(long, value_enum, default_value = "promote-lone")]
    odd: OddArg,

    /// Fail when an address appears twice
    #[arg(long)]
    reject_duplicates: bool,
}

impl Args {
    fn options(&self) -> TreeOptions {
        TreeOptions::default()
            .with_hash_function(match self.hash {
                HashArg::Keccak256 => HashFunction::Keccak256,
                HashArg::Sha256 => HashFunction::Sha256,
            })
            .with_sort_pairs(!self.no_sort_pairs)
            .with_sort_leaves(self.sort_leaves)
            .with_odd_node_policy(match self.odd {
                OddArg::Duplicate => OddNodePolicy::Duplicate,
                OddArg::PromoteLone => OddNodePolicy::PromoteLone,
            })
            .with_allow_duplicate_leaves(!self.reject_duplicates)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = args.options();
    debug!("Tree options: {options:?}");

    let text = fs::read_to_string(&args.allowlist)
        .with_context(|| format!("Failed to read allowlist {}", args.allowlist.display()))?;
    let addresses = parse_allowlist(&text).context("Failed to parse allowlist")?;
    if addresses.is_empty() {
        bail!("Allowlist {} contains no addresses", args.allowlist.display());
    }
    info!("Loaded {} addresses", addresses.len());

    let allowlist = Allowlist::new(&addresses, options).context("Failed to build Merkle tree")?;

    if args.all {
        let records = allowlist.records().context("Failed to generate proofs")?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("Root {}", allowlist.root_hex());

    if let Some(address) = &args.address {
        let proof = allowlist
            .proof(address)
            .with_context(|| format!("No proof for {address}"))?;
        println!("Proof: {:?}", proof.proof_hashes_hex());
        if let Some(sides) = proof.sides() {
            println!("Positions: {sides:?}");
        }
    }

    Ok(())
}
