use crate::config::toml_config::{substitute_env_vars, CostTableConfig};
use crate::domain::model::CalculatorRequest;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A batch of named requests priced side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub batch: BatchInfo,
    pub scenarios: Vec<Scenario>,
    #[serde(skip)]
    source_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
    pub cost_tables: Option<String>, // 成本表 TOML，相對路徑以此檔案所在目錄為準
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub request: CalculatorRequest,
}

impl Scenario {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境批次
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.source_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EstimatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("Scenario TOML parsing error: {}", e),
        })
    }

    pub fn enabled_scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(|s| s.is_enabled())
    }

    /// 成本表路徑 (若有設定)
    pub fn cost_tables_path(&self) -> Option<PathBuf> {
        let raw = self.batch.cost_tables.as_deref()?;
        let path = PathBuf::from(raw);
        match &self.source_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path),
        }
    }

    /// 載入批次指定的成本表，未指定時使用內建價格
    pub fn load_cost_tables(&self) -> Result<CostTableConfig> {
        match self.cost_tables_path() {
            Some(path) => {
                let tables = CostTableConfig::from_file(&path)?;
                tables.validate()?;
                Ok(tables)
            }
            None => Ok(CostTableConfig::builtin()),
        }
    }

    /// 驗證批次設定
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;

        if let Some(tables) = &self.batch.cost_tables {
            validate_path("batch.cost_tables", tables)?;
            validate_file_extension("batch.cost_tables", tables, &["toml"])?;
        }

        if self.scenarios.is_empty() {
            return Err(EstimatorError::MissingConfigError {
                field: "scenarios".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            validate_non_empty_string("scenarios.name", &scenario.name)?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(EstimatorError::ConfigValidationError {
                    field: "scenarios.name".to_string(),
                    message: format!("Scenario '{}' is defined more than once", scenario.name),
                });
            }
        }

        if self.enabled_scenarios().next().is_none() {
            return Err(EstimatorError::ConfigValidationError {
                field: "scenarios.enabled".to_string(),
                message: "Every scenario is disabled".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
