use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>, content_dir: Option<PathBuf>) -> Result<Config> {
    if let Some(content_dir) = content_dir {
        return Ok(Config::for_content_dir(content_dir));
    }

    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find {} (use --config-path or --content-dir)", CFG_FILE_NAME)),
    };

    let mut config = read_config(&config_path)
        .with_context(|| format!("Reading config from {}", config_path.display()))?;

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir()
                .map(|dir| dir.join("Folio").join("log").join("folio.log"));
        }
    }

    Ok(config)
}
