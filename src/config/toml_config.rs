use crate::core::date::DEFAULT_DATE_PATTERN;
use crate::core::number::DEFAULT_CURRENCY;
use crate::core::text::DEFAULT_TRUNCATE_LENGTH;
use crate::utils::error::{HelperError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    pub format: FormatConfig,
    pub storage: StorageConfig,
    pub downloads: DownloadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub date_pattern: Option<String>,
    pub currency: Option<String>,
    pub truncate_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: String,
    pub origin: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: "./.front-helpers/storage".to_string(),
            origin: "http://localhost".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: "./downloads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "compact" 或 "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl HelperConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HelperError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HelperError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 有指定路徑就讀檔，否則使用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${STORAGE_DIR})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_date_pattern("format.date_pattern", self.date_pattern())?;
        validation::validate_currency_code("format.currency", self.currency())?;
        validation::validate_range("format.truncate_length", self.truncate_length(), 1, 10_000)?;

        validation::validate_path("storage.dir", &self.storage.dir)?;
        validation::validate_non_empty_string("storage.origin", &self.storage.origin)?;
        url::Url::parse(&self.storage.origin).map_err(|e| HelperError::InvalidConfigValueError {
            field: "storage.origin".to_string(),
            value: self.storage.origin.clone(),
            reason: format!("Invalid origin URL: {}", e),
        })?;

        validation::validate_path("downloads.dir", &self.downloads.dir)?;

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(HelperError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    valid_formats.join(", ")
                ),
            });
        }

        Ok(())
    }

    pub fn date_pattern(&self) -> &str {
        self.format.date_pattern.as_deref().unwrap_or(DEFAULT_DATE_PATTERN)
    }

    pub fn currency(&self) -> &str {
        self.format.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn truncate_length(&self) -> usize {
        self.format.truncate_length.unwrap_or(DEFAULT_TRUNCATE_LENGTH)
    }

    pub fn origin(&self) -> &str {
        &self.storage.origin
    }
}

impl Validate for HelperConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
