use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 常用的独立环境变量，优先级高于 QUIZROOM__ 前缀变量
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("app.environment", "APP_ENV"),
    ("app.log_level", "RUST_LOG"),
    ("server.host", "SERVER_HOST"),
    ("server.port", "SERVER_PORT"),
    ("server.unix_socket_path", "UNIX_SOCKET"),
    ("server.workers", "CPU_COUNT"),
    ("jwt.secret", "JWT_SECRET"),
    ("database.url", "DATABASE_URL"),
    ("cache.redis.url", "REDIS_URL"),
    ("upload.dir", "UPLOAD_DIR"),
    ("upload.public_base_url", "PUBLIC_BASE_URL"),
    ("identity.mode", "IDENTITY_MODE"),
];

// 以逗号分隔的列表字段
const LIST_KEYS: &[&str] = &[
    "cors.allowed_origins",
    "identity.fixture_teachers",
    "identity.seed_teachers",
];

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

impl AppConfig {
    /// 加载配置：config.toml → config.{APP_ENV}.toml → 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut environment = Environment::with_prefix("QUIZROOM")
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{env_name}")).required(false))
            .add_source(environment);

        for (key, var) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        // 0 表示按 CPU 核数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 检查取值范围，生产环境拒绝默认密钥和固定教师名单
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.is_production() && self.jwt.secret == DEFAULT_JWT_SECRET {
            problems.push("jwt.secret must be changed in production".to_string());
        }
        // 固定名单只用于开发和测试
        if self.is_production() && self.identity.mode == "fixture" {
            problems.push("identity.mode \"fixture\" is not allowed in production".to_string());
        }
        if !(0.0..=1.0).contains(&self.image.quality) {
            problems.push(format!(
                "image.quality must be within 0.0..=1.0, got {}",
                self.image.quality
            ));
        }
        if self.image.max_width == 0 || self.image.max_height == 0 {
            problems.push("image.max_width and image.max_height must be positive".to_string());
        }
        if self.upload.max_size == 0 {
            problems.push("upload.max_size must be positive".to_string());
        }
        if self.identity.magic_link_ttl == 0 {
            problems.push("identity.magic_link_ttl must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(problems.join("; ")))
        }
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Unix 套接字路径，未配置时为 None
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        Config::builder()
            .add_source(File::from_str(
                include_str!("../../config.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = sample();
        assert!(config.validate().is_ok());
        assert_eq!(config.identity.mode, "backend");
    }

    #[test]
    fn test_rejects_default_secret_in_production() {
        let mut config = sample();
        config.app.environment = "production".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("jwt.secret"));
    }

    #[test]
    fn test_rejects_fixture_identity_in_production() {
        let mut config = sample();
        config.identity.mode = "fixture".into();
        assert!(config.validate().is_ok());

        config.app.environment = "production".into();
        config.jwt.secret = "a-production-secret".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("identity.mode"));
        assert!(!err.contains("jwt.secret"));

        config.identity.mode = "backend".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_quality() {
        let mut config = sample();
        config.image.quality = 1.5;
        assert!(config.validate().is_err());
    }
}
