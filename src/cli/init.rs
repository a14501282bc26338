//! Init command implementation

use anyhow::Result;
use std::path::Path;

use ecotrace::Config;

/// Write a default config file at the given path (or the global default)
pub fn init_command(path: Option<&Path>, force: bool) -> Result<()> {
    let target = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    Config::write_default(&target, force)?;
    println!("Created config file: {}", target.display());
    Ok(())
}
