use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content_list::{ContentSource, DEFAULT_INDEX_BASE_NAME};
use crate::paginator::DEFAULT_PAGE_SIZE;

const EXE_DIR_VAR: &str = "${exe_dir}";

#[derive(Deserialize, Debug)]
pub struct Paths {
    pub content_dir: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
pub struct Defaults {
    pub index_base_name: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            address: "127.0.0.1".to_string(),
            port: 8001,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub server: Server,
    pub log: Option<Log>,
}

impl Config {
    /// Configuration used when only a content directory is given.
    pub fn for_content_dir(content_dir: PathBuf) -> Config {
        Config {
            paths: Paths { content_dir },
            defaults: Defaults::default(),
            server: Server::default(),
            log: None,
        }
    }

    pub fn content_source(&self) -> ContentSource {
        let index_base_name = self.defaults.index_base_name.as_deref().unwrap_or(DEFAULT_INDEX_BASE_NAME);
        ContentSource::new(&self.paths.content_dir).with_index_base_name(index_base_name)
    }

    pub fn page_size(&self) -> u32 {
        self.defaults.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with(EXE_DIR_VAR) {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match exe_dir {
        Some(exe_dir) => PathBuf::from(str_path.replace(EXE_DIR_VAR, &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let cfg = parse_config(r##"
[paths]
content_dir = "content"

[defaults]
index_base_name = "article"
page_size = 5

[server]
address = "0.0.0.0"
port = 9000

[log]
level = "Debug"
log_to_console = true
"##).unwrap();

        assert_eq!(cfg.paths.content_dir, PathBuf::from("content"));
        assert_eq!(cfg.page_size(), 5);
        assert_eq!(cfg.content_source().index_base_name, "article");
        assert_eq!(cfg.server.port, 9000);
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_minimal_config() {
        let cfg = parse_config("[paths]\ncontent_dir = \"posts\"\n").unwrap();
        assert_eq!(cfg.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.content_source().index_base_name, DEFAULT_INDEX_BASE_NAME);
        assert_eq!(cfg.server.address, "127.0.0.1");
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_exe_dir_prefix() {
        let cfg = parse_config("[paths]\ncontent_dir = \"${exe_dir}/content\"\n").unwrap();
        let content_dir = cfg.paths.content_dir.to_string_lossy().to_string();
        assert!(!content_dir.contains("${exe_dir}"));
        assert!(content_dir.ends_with("/content"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[paths]\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = read_config(Path::new("/definitely/not/here/folio.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
