//! 配置类型定义模块

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// TypeScript 类型导出路径（dashboard 前端）
pub const TS_EXPORT_PATH: &str = "../frontend/src/types/api.generated.ts";

/// 运行环境
///
/// development 下错误响应会带上原始信息和 `stack`。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// 日志输出格式
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            Environment::from_str("Development").ok(),
            Some(Environment::Development)
        );
        assert_eq!(
            Environment::from_str("production").ok(),
            Some(Environment::Production)
        );
        assert!(Environment::from_str("staging").is_err());
    }

    #[test]
    fn test_environment_display_matches_serde() {
        for env in Environment::iter() {
            let json = serde_json::to_string(&env).unwrap();
            assert_eq!(json, format!("\"{}\"", env));
        }
    }

    #[test]
    fn test_log_format_from_toml_value() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: LogFormat,
        }
        let w: Wrapper = toml::from_str(r#"format = "json""#).unwrap();
        assert_eq!(w.format, LogFormat::Json);
        assert_eq!(LogFormat::from_str("TEXT").ok(), Some(LogFormat::Text));
    }
}
