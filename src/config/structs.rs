use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{Environment, LogFormat};
use crate::errors::{Result, VenueError};

/// 环境变量前缀，例如 `VT__SERVER__PORT=9999`
pub const ENV_PREFIX: &str = "VT";

/// 以逗号分隔解析的列表型键
const LIST_KEYS: [&str; 3] = [
    "cors.allowed_origins",
    "cors.allowed_methods",
    "cors.allowed_headers",
];

/// 启动期配置，来源优先级 ENV > TOML > 内置默认值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StaticConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub app: AppConfig,
}

impl StaticConfig {
    /// 读取 TOML 与 `VT__*` 环境变量；文件不存在时只用环境变量和默认值
    pub fn load_from(path: &str) -> std::result::Result<Self, config::ConfigError> {
        let env = LIST_KEYS.iter().fold(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
            |env, key| env.with_list_parse_key(key),
        );

        let mut loaded: StaticConfig = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        loaded.normalize();
        Ok(loaded)
    }

    /// 加载失败时回落到默认配置，并把原因写到 stderr（此时日志系统尚未初始化）
    pub fn load_or_default(path: &str) -> Self {
        let config = match Self::load_from(path) {
            Ok(config) => {
                if Path::new(path).exists() {
                    eprintln!("[config] using {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[config] {} is invalid ({}), falling back to defaults", path, e);
                Self::default()
            }
        };

        for warning in config.warnings() {
            eprintln!("[config] warning: {}", warning);
        }
        config
    }

    /// 把可以自动修正的值修正掉
    fn normalize(&mut self) {
        self.server.api_prefix = normalize_prefix(&self.server.api_prefix);
        self.database.pool_size = self.database.pool_size.max(1);
        if self.server.cpu_count == 0 {
            self.server.cpu_count = num_cpus::get();
        }
    }

    /// 不致命但值得提示的配置问题
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.server.port == 0 {
            out.push("server.port is 0, the OS will pick a random port".to_string());
        }
        if self.database.database_url.trim().is_empty() {
            out.push("database.database_url is empty".to_string());
        }
        if self.cors.enabled && self.cors.allowed_origins.is_empty() {
            out.push("cors is enabled but cors.allowed_origins is empty".to_string());
        }
        out
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VenueError::serialization(e.to_string()))
    }

    /// 写入 TOML，必要时创建父目录
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let body = self.to_toml()?;

        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)?,
            _ => {}
        }
        std::fs::write(path, body).map_err(|e| {
            VenueError::file_operation(format!("{}: {}", path.display(), e))
        })
    }
}

/// `api` / `/api/` / ` /api ` 统一为 `/api`；空串表示挂在根路径
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// worker 数量；0 表示按 CPU 核数
    pub cpu_count: usize,
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            cpu_count: num_cpus::get(),
            api_prefix: "/api".into(),
        }
    }
}

/// `database_url` 可以是 sqlite 文件路径，也可以是 mysql:// / postgres:// URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub pool_size: u32,
    /// 秒
    pub timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "venues.db".into(),
            pool_size: 10,
            timeout: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter 语法，如 `info` 或 `venuetrack=debug,sea_orm=warn`
    pub level: String,
    pub format: LogFormat,
    pub file: Option<String>,
    pub max_backups: u32,
    pub enable_rotation: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
            file: None,
            max_backups: 5,
            enable_rotation: true,
        }
    }
}

/// 默认放行本地 Vite dev server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: u64,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: owned(&[
                "http://localhost:5173",
                "http://127.0.0.1:5173",
                "http://localhost:5174",
                "http://127.0.0.1:5174",
            ]),
            allowed_methods: owned(&["GET", "POST", "PUT", "DELETE", "OPTIONS"]),
            allowed_headers: owned(&["Content-Type", "Authorization", "Origin", "Accept"]),
            allow_credentials: true,
            max_age: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
}
