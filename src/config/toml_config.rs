use crate::core::tables::{CostTables, HvacTables, RainwaterTables};
use crate::domain::ports::TableSource;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingInfo {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl Default for PricingInfo {
    fn default() -> Self {
        Self {
            name: "built-in".to_string(),
            version: None,
            description: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCostTableFile {
    #[serde(default)]
    pricing: PricingInfo,
    #[serde(default)]
    rainwater: RainwaterTables,
    #[serde(default)]
    hvac: HvacTables,
}

/// 成本表設定：可由 TOML 覆寫內建價格
#[derive(Debug, Clone, PartialEq)]
pub struct CostTableConfig {
    pub pricing: PricingInfo,
    pub tables: CostTables,
}

impl CostTableConfig {
    /// 使用內建價格
    pub fn builtin() -> Self {
        Self {
            pricing: PricingInfo::default(),
            tables: CostTables::builtin().clone(),
        }
    }

    /// 從 TOML 檔案載入成本表
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        tracing::debug!("Loaded cost tables from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析，未列出的價格沿用內建值
    ///
    /// The file is merged key by key over the built-in tables, so a leaf such
    /// as `[rainwater.pressure_tank]` may set only `min`. A leaf whose keys
    /// share nothing with the built-in record replaces it whole, which is how
    /// an HVAC tank switches between fixed and per-gallon pricing.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        let overrides: toml::Table = toml::from_str(&processed_content).map_err(parse_error)?;

        let mut merged = match toml::Value::try_from(CostTables::builtin()) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => {
                return Err(EstimatorError::ConfigError {
                    message: "Built-in cost tables did not serialize to a TOML table".to_string(),
                })
            }
            Err(e) => {
                return Err(EstimatorError::ConfigError {
                    message: format!("Could not serialize built-in cost tables: {}", e),
                })
            }
        };
        merge_tables(&mut merged, overrides);

        let raw: RawCostTableFile = toml::Value::Table(merged)
            .try_into()
            .map_err(parse_error)?;

        Ok(Self {
            pricing: raw.pricing,
            tables: CostTables {
                rainwater: raw.rainwater,
                hvac: raw.hvac,
            },
        })
    }

    /// 驗證價格的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("pricing.name", &self.pricing.name)?;
        self.tables.validate()
    }
}

impl Default for CostTableConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TableSource for CostTableConfig {
    fn tables(&self) -> &CostTables {
        &self.tables
    }

    fn label(&self) -> &str {
        &self.pricing.name
    }
}

impl Validate for CostTableConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

fn parse_error(e: impl std::fmt::Display) -> EstimatorError {
    EstimatorError::ConfigValidationError {
        field: "toml_parsing".to_string(),
        message: format!("TOML parsing error: {}", e),
    }
}

/// 遞迴合併覆寫值
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(incoming) => {
                let descend = matches!(
                    base.get(&key),
                    Some(toml::Value::Table(existing)) if shares_keys(existing, &incoming)
                );
                if descend {
                    if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                        merge_tables(existing, incoming);
                    }
                } else {
                    base.insert(key, toml::Value::Table(incoming));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

fn shares_keys(existing: &toml::Table, incoming: &toml::Table) -> bool {
    incoming.is_empty() || incoming.keys().any(|key| existing.contains_key(key))
}

/// 替換環境變數 (例如 ${PRICE_REGION})，未設定的變數保留原樣
pub(crate) fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
