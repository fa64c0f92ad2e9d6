use crate::cli::WatchArgs;
use anyhow::Result;

/// Print the resolved configuration as JSON.
pub fn dump(args: &WatchArgs) -> Result<()> {
    let cfg = args.resolve()?;
    let s = serde_json::to_string_pretty(&cfg)?;
    println!("{s}");
    Ok(())
}
