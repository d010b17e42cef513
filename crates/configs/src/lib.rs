use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Which key-value backend holds the draft collections.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(anyhow!("unknown storage backend `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Snapshot file, only used by the `file` backend.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::Memory, path: default_storage_path() }
    }
}

fn default_storage_path() -> String { "data/drafts.json".into() }

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults filled from environment variables.
    ///
    /// A config file that exists but cannot be read or parsed is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_at(&config_path())
    }

    fn load_or_env_at(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(backend) = std::env::var("STORAGE_BACKEND").ok().and_then(|v| v.parse().ok()) {
            cfg.storage.backend = backend;
        }
        if let Ok(path) = std::env::var("STORAGE_PATH") {
            cfg.storage.path = path;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            if format.eq_ignore_ascii_case("json") {
                cfg.logging.format = LogFormat::Json;
            }
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::File && self.path.trim().is_empty() {
            return Err(anyhow!("storage.path 为空；file 存储需要快照文件路径"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.storage.path, "data/drafts.json");
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn parses_all_sections() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            backend = "file"
            path = "/tmp/drafts.json"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.path, "/tmp/drafts.json");
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(parse("[storage]\nbackend = \"redis\"\n").is_err());
        assert!("redis".parse::<StorageBackend>().is_err());
        assert_eq!(" File ".parse::<StorageBackend>().unwrap(), StorageBackend::File);
    }

    #[test]
    fn normalize_fills_blank_host_and_zero_workers() {
        let mut cfg = parse("[server]\nhost = \" \"\nport = 1\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    fn scratch_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("drafts_cfg_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = scratch_file("malformed");
        std::fs::write(&path, "[storage]\nbackend = \"file\"\npath = \"d.json\"\n[server\n").unwrap();
        let res = AppConfig::load_or_env_at(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);

        let err = res.unwrap_err();
        assert!(!is_missing_file(&err));
        assert!(err.to_string().contains("config file"));
    }

    #[test]
    fn missing_config_file_falls_back_to_env() {
        let path = scratch_file("absent");
        let _ = std::fs::remove_file(&path);
        assert!(AppConfig::load_or_env_at(path.to_str().unwrap()).is_ok());
    }

    #[test]
    fn present_config_file_is_used() {
        let path = scratch_file("valid");
        std::fs::write(&path, "[storage]\nbackend = \"file\"\npath = \"d.json\"\n").unwrap();
        let cfg = AppConfig::load_or_env_at(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);

        let cfg = cfg.unwrap();
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.path, "d.json");
    }

    #[test]
    fn validate_rejects_port_zero_and_blank_file_path() {
        let mut cfg = parse("[server]\nhost = \"h\"\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[storage]\nbackend = \"file\"\npath = \"\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        // memory backend ignores the path
        let mut cfg = parse("[storage]\nbackend = \"memory\"\npath = \"\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_ok());
    }
}
