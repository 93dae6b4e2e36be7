use serde::Deserialize;
use std::env;
use thiserror::Error;
use validator::Validate;

// Префикс переменных окружения: CINEMA__APP__LOG_FORMAT=json
const ENV_PREFIX: &str = "CINEMA";
const ENV_SEPARATOR: &str = "__";

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    pub app: AppConfig,
    #[validate(nested)]
    pub cinema: CinemaConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Ограничения зала: букв в алфавите 26, колонок не больше 50
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CinemaConfig {
    #[validate(range(min = 1, max = 26))]
    pub max_rows: usize,
    #[validate(range(min = 1, max = 50))]
    pub max_columns: usize,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                rust_log: "cinema_booking=warn".to_string(),
                log_format: LogFormat::Pretty,
            },
            cinema: CinemaConfig {
                max_rows: 26,
                max_columns: 50,
            },
        }
    }
}

impl Config {
    /// Значения по умолчанию, поверх них переменные окружения `CINEMA__*`.
    /// `RUST_LOG`, если задан, перекрывает фильтр логов.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let defaults = Config::default();

        let settings = config::Config::builder()
            .set_default("app.rust_log", defaults.app.rust_log)?
            .set_default("app.log_format", "pretty")?
            .set_default("cinema.max_rows", defaults.cinema.max_rows as i64)?
            .set_default("cinema.max_columns", defaults.cinema.max_columns as i64)?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        if let Ok(filter) = env::var("RUST_LOG") {
            config.app.rust_log = filter;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cinema.max_rows, 26);
        assert_eq!(config.cinema.max_columns, 50);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
    }

    #[test]
    fn limits_beyond_alphabet_are_rejected() {
        let mut config = Config::default();
        config.cinema.max_rows = 27;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cinema.max_columns = 0;
        assert!(config.validate().is_err());
    }
}
