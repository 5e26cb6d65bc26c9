use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::domain::DEFAULT_CATEGORIES;
use crate::errors::FormError;

const DEFAULT_DIR_NAME: &str = ".expense_form";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const HOME_ENV: &str = "EXPENSE_FORM_HOME";

/// User-tunable presentation and choice settings for the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub categories: Vec<String>,
    /// Text shown in the amount label, e.g. `Amount ($)`. Amounts themselves
    /// are plain numbers; no currency formatting or conversion is applied.
    pub currency_symbol: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            currency_symbol: "$".into(),
        }
    }
}

impl FormConfig {
    /// Rejects configurations that would make the category field unusable.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.categories.is_empty() {
            return Err(FormError::Config("at least one category is required".into()));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            let trimmed = category.trim();
            if trimmed.is_empty() {
                return Err(FormError::Config("category names cannot be blank".into()));
            }
            if !seen.insert(trimmed.to_lowercase()) {
                return Err(FormError::Config(format!(
                    "duplicate category `{}`",
                    trimmed
                )));
            }
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(FormError::Config("currency symbol cannot be blank".into()));
        }
        Ok(())
    }
}

/// Returns the application directory, defaulting to `~/.expense_form`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            path: base.into().join(CONFIG_FILE),
        }
    }

    /// Loads the stored configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<FormConfig, FormError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(FormConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: FormConfig = serde_json::from_str(&data)?;
        config.validate()?;
        tracing::debug!(path = %self.path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, config: &FormConfig) -> Result<(), FormError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "saved config");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), FormError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
