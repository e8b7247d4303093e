use crate::domain::model::{CalculatorResponse, SystemKind};
use crate::utils::error::{EstimatorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            other => Err(format!(
                "Unsupported format '{}'. Valid formats: json, csv, tsv",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}

/// A response plus the context it was produced in.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub system: SystemKind,
    pub pricing: String,
    pub generated_at: DateTime<Utc>,
    pub response: CalculatorResponse,
}

impl EstimateReport {
    pub fn new(system: SystemKind, pricing: &str, response: CalculatorResponse) -> Self {
        Self {
            scenario: None,
            system,
            pricing: pricing.to_string(),
            generated_at: Utc::now(),
            response,
        }
    }

    pub fn for_scenario(mut self, name: &str) -> Self {
        self.scenario = Some(name.to_string());
        self
    }

    /// Breakdown items followed by the headline figures.
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        let mut rows = self.response.breakdown.line_items();
        rows.push(("cost_range_min", self.response.cost_range_min));
        rows.push(("cost_range_max", self.response.cost_range_max));
        rows.push(("annual_water_collection", self.response.annual_water_collection));
        rows.push(("tank_size", self.response.tank_size));
        rows
    }
}

pub fn render(reports: &[EstimateReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(reports),
        OutputFormat::Csv => render_delimited(reports, b','),
        OutputFormat::Tsv => render_delimited(reports, b'\t'),
    }
}

fn render_json(reports: &[EstimateReport]) -> Result<String> {
    let json = match reports {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(reports)?,
    };
    Ok(json)
}

fn render_delimited(reports: &[EstimateReport], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["scenario", "system", "item", "amount"])?;
    for report in reports {
        let scenario = report.scenario.as_deref().unwrap_or("");
        let system = report.system.to_string();
        for (item, amount) in report.rows() {
            writer.write_record([scenario, system.as_str(), item, amount.to_string().as_str()])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EstimatorError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        EstimatorError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
