use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use type_identity::{canonical_name, NameNormalizer, NormalizerKind, RegistryConfig};

/// Print the canonical form of raw type names
#[derive(Parser, Debug)]
#[command(name = "canonicalize", version)]
struct Args {
    /// Raw names to canonicalize; read one per line from stdin when omitted
    names: Vec<String>,

    /// Normalizer to use: `demangle` or `strip` (defaults to TYPE_IDENTITY_NORMALIZER)
    #[arg(short, long)]
    normalizer: Option<NormalizerKind>,
}

fn print_name(out: &mut impl Write, raw: &str, normalizer: &dyn NameNormalizer) -> io::Result<()> {
    writeln!(out, "{} -> {}", raw, canonical_name(raw, normalizer))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let kind = match args.normalizer {
        Some(kind) => kind,
        None => RegistryConfig::from_env()?.normalizer,
    };
    let normalizer = kind.build();
    tracing::debug!(normalizer = %normalizer.kind(), "canonicalizing");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.names.is_empty() {
        for raw in &args.names {
            print_name(&mut out, raw, normalizer.as_ref())?;
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        print_name(&mut out, raw, normalizer.as_ref())?;
    }

    Ok(())
}
