use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use crate::gif_analyzer::DEFAULT_ZERO_DELAY_FALLBACK_MS;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
/// 上传文件大小上限（16MB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const CONFIG_FILE_NAME: &str = "gif-timecount.ini";

/// 服务配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 监听地址
    pub bind: String,
    /// 上传文件保存目录
    pub upload_dir: PathBuf,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// 解析完成后是否保留上传的文件
    pub keep_uploads: bool,
    /// 帧时长为 0 时替换成的值（毫秒）
    pub zero_delay_fallback_ms: u32,
    /// 日志级别（trace, debug, info, warn, error）
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            keep_uploads: false,
            zero_delay_fallback_ms: DEFAULT_ZERO_DELAY_FALLBACK_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// 某一个配置来源中读到的值，未设置的项为 None
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialConfig {
    pub bind: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<usize>,
    pub keep_uploads: Option<bool>,
    pub zero_delay_fallback_ms: Option<u32>,
    pub log_level: Option<String>,
}

impl PartialConfig {
    /// 用 self 的值覆盖 lower 中的值
    pub fn or(self, lower: PartialConfig) -> PartialConfig {
        PartialConfig {
            bind: self.bind.or(lower.bind),
            upload_dir: self.upload_dir.or(lower.upload_dir),
            max_upload_bytes: self.max_upload_bytes.or(lower.max_upload_bytes),
            keep_uploads: self.keep_uploads.or(lower.keep_uploads),
            zero_delay_fallback_ms: self.zero_delay_fallback_ms.or(lower.zero_delay_fallback_ms),
            log_level: self.log_level.or(lower.log_level),
        }
    }

    /// 缺失的项用默认值补齐
    pub fn resolve(self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            bind: self.bind.unwrap_or(defaults.bind),
            upload_dir: self.upload_dir.unwrap_or(defaults.upload_dir),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
            keep_uploads: self.keep_uploads.unwrap_or(defaults.keep_uploads),
            zero_delay_fallback_ms: self
                .zero_delay_fallback_ms
                .unwrap_or(defaults.zero_delay_fallback_ms),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从多个源加载配置，优先级：命令行参数 > 环境变量 > 配置文件 > 默认值
    pub fn load_config(config_file: Option<&Path>, cli: PartialConfig) -> Result<AppConfig> {
        let file_config = match config_file {
            // 显式指定的配置文件读取失败时直接报错
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_from_default_locations().unwrap_or_default(),
        };

        Ok(cli.or(Self::load_from_env()).or(file_config).resolve())
    }

    /// 从环境变量加载配置
    fn load_from_env() -> PartialConfig {
        PartialConfig {
            bind: env::var("GIF_TIMECOUNT_BIND").ok(),
            upload_dir: env::var("GIF_TIMECOUNT_UPLOAD_DIR").ok().map(PathBuf::from),
            max_upload_bytes: env::var("GIF_TIMECOUNT_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok()),
            keep_uploads: env::var("GIF_TIMECOUNT_KEEP_UPLOADS")
                .ok()
                .and_then(|v| parse_bool(&v)),
            zero_delay_fallback_ms: env::var("GIF_TIMECOUNT_ZERO_DELAY_FALLBACK_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            log_level: env::var("LOG_LEVEL").ok(),
        }
    }

    /// 从INI配置文件加载配置
    pub fn load_from_file(config_path: &Path) -> Result<PartialConfig> {
        if !config_path.exists() {
            return Err(anyhow::anyhow!("配置文件不存在: {}", config_path.display()));
        }

        let mut config_parser = configparser::ini::Ini::new();
        config_parser
            .load(config_path)
            .map_err(|e| anyhow::anyhow!("读取配置文件失败: {}: {}", config_path.display(), e))?;

        // 先读指定节，没有则使用 [DEFAULT] 节
        let get = |section: &str, key: &str| {
            config_parser
                .get(section, key)
                .or_else(|| config_parser.get("DEFAULT", key))
                .filter(|v| !v.is_empty())
        };

        Ok(PartialConfig {
            bind: get("server", "bind"),
            upload_dir: get("server", "upload_dir").map(PathBuf::from),
            max_upload_bytes: get("server", "max_upload_bytes").and_then(|v| v.parse().ok()),
            keep_uploads: get("server", "keep_uploads").and_then(|v| parse_bool(&v)),
            zero_delay_fallback_ms: get("analysis", "zero_delay_fallback_ms")
                .and_then(|v| v.parse().ok()),
            log_level: get("logging", "level"),
        })
    }

    /// 从默认位置加载配置文件
    fn load_from_default_locations() -> Result<PartialConfig> {
        // 1. 当前目录的 gif-timecount.ini
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Self::load_from_file(&current_dir_config);
        }

        // 2. 当前目录的 .gif-timecount.ini
        let hidden_config = PathBuf::from(format!(".{}", CONFIG_FILE_NAME));
        if hidden_config.exists() {
            return Self::load_from_file(&hidden_config);
        }

        // 3. 用户主目录的 .gif-timecount.ini
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home).join(format!(".{}", CONFIG_FILE_NAME));
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        // 4. /etc/gif-timecount.ini (Linux/macOS)
        let etc_config = Path::new("/etc").join(CONFIG_FILE_NAME);
        if etc_config.exists() {
            return Self::load_from_file(&etc_config);
        }

        Err(anyhow::anyhow!("未找到配置文件"))
    }

    /// 创建默认配置文件
    pub fn create_default_config(config_path: &Path) -> Result<()> {
        let defaults = AppConfig::default();
        let mut config_parser = configparser::ini::Ini::new();
        config_parser.set("server", "bind", Some(defaults.bind));
        config_parser.set(
            "server",
            "upload_dir",
            Some(defaults.upload_dir.to_string_lossy().to_string()),
        );
        config_parser.set(
            "server",
            "max_upload_bytes",
            Some(defaults.max_upload_bytes.to_string()),
        );
        config_parser.set("server", "keep_uploads", Some(defaults.keep_uploads.to_string()));
        config_parser.set(
            "analysis",
            "zero_delay_fallback_ms",
            Some(defaults.zero_delay_fallback_ms.to_string()),
        );
        config_parser.set("logging", "level", Some(defaults.log_level));

        config_parser
            .write(config_path)
            .map_err(|e| anyhow::anyhow!("写入配置文件失败: {}: {}", config_path.display(), e))?;

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
