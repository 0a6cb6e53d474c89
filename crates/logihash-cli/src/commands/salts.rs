//! Salts command
//!
//! Usage: logihash salts [--count <N>] [--output <FILE>]
//!
//! Emits an engine config pinning the drawn salts, so digests computed with
//! it can be reproduced in another process.

use clap::Args;
use logihash_core::{EngineConfig, SaltRegistry, DEFAULT_SALT_CAPACITY};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SaltsArgs {
    /// Number of salts to draw
    #[arg(short, long, default_value_t = DEFAULT_SALT_CAPACITY)]
    pub count: usize,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute salts command
pub fn execute(args: SaltsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = SaltRegistry::new(args.count)?;
    let config = EngineConfig::pinned(registry.snapshot().as_slice().to_vec());
    let rendered = config.to_toml_string()?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Wrote {} salts to {}", args.count, output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
