//! Normalize command implementation

use anyhow::Result;
use qs_sql::normalize_shard_suffix;

use crate::cli::{GlobalArgs, NormalizeArgs};

/// Execute the normalize command
pub(crate) fn execute(args: &NormalizeArgs, global: &GlobalArgs) -> Result<()> {
    for name in &args.names {
        let normalized = normalize_shard_suffix(name);
        if global.verbose {
            println!("{} -> {}", name, normalized);
        } else {
            println!("{}", normalized);
        }
    }
    Ok(())
}
