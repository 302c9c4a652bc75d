//! 配置管理模块
//!
//! 提供TOML配置文件的读取、写入和自动发现功能。

use crate::error::Result;
use crate::types::TranslatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// 翻译库配置结构
///
/// 包含所有翻译相关的配置选项，支持从TOML文件加载和保存。
///
/// # 示例
///
/// ```rust,no_run
/// use batch_translator::{TranslationLibConfig, TranslatorBuilder};
///
/// // 从默认位置加载配置
/// let config = TranslationLibConfig::load_from_default_locations();
/// let builder = TranslatorBuilder::from_config(&config.translator).unwrap();
///
/// // 保存配置到文件
/// config.save_to_file("output.toml").unwrap();
/// ```
///
/// 配置文件格式：
///
/// ```toml
/// [translator]
/// base_url = "https://api.cognitive.microsofttranslator.com"
/// from_lang = "en"
/// to_langs = ["fr", "it"]
/// message_limit = 1000
/// character_limit = 50000
/// subscription_key = "..."
/// subscription_region = "westeurope"
/// profanity_action = "Marked"
/// request_timeout_secs = 30
///
/// [translator.placeholders]
/// start = "{"
/// end = "}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationLibConfig {
    /// 翻译器配置
    #[serde(default)]
    pub translator: TranslatorConfig,
}

impl TranslationLibConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from multiple possible locations
    pub fn load_from_default_locations() -> Self {
        let possible_paths = [
            "translator-config.toml",
            "config.toml",
            ".translator-config.toml",
        ];

        for path in &possible_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        info!("Loaded configuration from: {}", path);
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", path, e);
                    }
                }
            }
        }

        info!("No configuration file found, using defaults");
        Self::default()
    }

    /// Generate example configuration file
    pub fn generate_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let example_config = Self::default();
        example_config.save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profanity::ProfanityAction;
    use crate::types::PlaceholderMarkers;

    #[test]
    fn test_parse_partial_config() {
        let config = TranslationLibConfig::from_toml(
            r#"
            [translator]
            to_langs = ["fr", "it"]
            message_limit = 10
            subscription_key = "secret"
            profanity_action = "Deleted"

            [translator.placeholders]
            start = "["
            end = "]"
            "#,
        )
        .unwrap();

        let translator = &config.translator;
        assert_eq!(translator.to_langs, vec!["fr", "it"]);
        assert_eq!(translator.message_limit, 10);
        assert_eq!(translator.character_limit, 50_000);
        assert_eq!(translator.from_lang, "en");
        assert_eq!(translator.subscription_key.as_deref(), Some("secret"));
        assert_eq!(translator.profanity_action, ProfanityAction::Deleted);
        assert_eq!(
            translator.placeholders,
            Some(PlaceholderMarkers {
                start: "[".to_string(),
                end: "]".to_string()
            })
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TranslationLibConfig::from_toml("").unwrap();
        assert_eq!(config.translator.message_limit, 1000);
        assert_eq!(config.translator.request_timeout_secs, 30);
        assert!(config.translator.to_langs.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let result = TranslationLibConfig::from_toml("[translator]\nmessage_limit = \"many\"");
        assert!(matches!(result, Err(crate::TranslationError::ConfigParse(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("batch-translator-{}.toml", std::process::id()));
        let mut config = TranslationLibConfig::default();
        config.translator.to_langs = vec!["de".to_string()];
        config.translator.subscription_region = Some("westeurope".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = TranslationLibConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.translator.to_langs, vec!["de"]);
        assert_eq!(loaded.translator.subscription_region.as_deref(), Some("westeurope"));
    }
}
