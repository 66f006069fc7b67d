//! `init` command: write a default `lazyload.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::LazyLoadConfig;
use crate::log;

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    let toml = LazyLoadConfig::default().to_toml()?;
    fs::write(path, toml)
        .with_context(|| format!("failed to write '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}
