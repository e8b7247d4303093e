use harvest_estimator::app::report::{self, EstimateReport, OutputFormat};
use harvest_estimator::utils::error::ErrorCategory;
use harvest_estimator::utils::validation::Validate;
use harvest_estimator::{
    CostTableConfig, EstimatorEngine, EstimatorError, ScenarioConfig, SystemKind,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PRICES: &str = r#"
[pricing]
name = "regional-2025"

[hvac]
unit_connection_cost = 100

[rainwater.pressure_tank]
min = 300
max = 600
"#;

const SCENARIOS: &str = r#"
[batch]
name = "office-park"
cost_tables = "prices.toml"

[[scenarios]]
name = "roof"

[scenarios.request]
system = "rainwater"
roof_area_sqft = 2000
annual_rainfall_inches = 32
piping_length_feet = 100

[[scenarios]]
name = "chillers"

[scenarios.request]
system = "hvac"
num_units = 2
tons_per_unit = 3
days_per_year = 200
piping_length_feet = 80

[[scenarios]]
name = "half-unit"

[scenarios.request]
system = "hvac"
num_units = 1.5
tons_per_unit = 3
days_per_year = 400
piping_length_feet = 80

[[scenarios]]
name = "parked"
enabled = false

[scenarios.request]
system = "rainwater"
annual_rainfall_inches = 32
piping_length_feet = 100
"#;

fn write_batch(dir: &TempDir) -> anyhow::Result<PathBuf> {
    fs::write(dir.path().join("prices.toml"), PRICES)?;
    let path = dir.path().join("scenarios.toml");
    fs::write(&path, SCENARIOS)?;
    Ok(path)
}

#[test]
fn test_batch_with_relative_cost_tables() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_batch(&temp_dir)?;

    let config = ScenarioConfig::from_file(&path)?;
    assert!(config.validate().is_ok());
    assert_eq!(
        config.cost_tables_path().unwrap(),
        temp_dir.path().join("prices.toml")
    );

    let tables = config.load_cost_tables()?;
    assert_eq!(tables.pricing.name, "regional-2025");

    let engine = EstimatorEngine::new(tables);
    assert_eq!(engine.source_label(), "regional-2025");

    let outcomes = engine.run_scenarios(&config);
    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["roof", "chillers", "half-unit"]);

    // pressure tank 300..600 instead of 200..500
    let roof = outcomes[0].result.as_ref().unwrap();
    assert_eq!(outcomes[0].system, SystemKind::Rainwater);
    assert_eq!(roof.cost_range_min, 7235.0 + 100.0);
    assert_eq!(roof.cost_range_max, 13416.0 + 100.0);

    // two units at 100 instead of 75
    let chillers = outcomes[1].result.as_ref().unwrap();
    assert_eq!(chillers.cost_range_min, 1330.0 + 50.0);
    assert_eq!(chillers.cost_range_max, 3240.0 + 50.0);

    let violations = outcomes[2].result.as_ref().unwrap_err();
    let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
    assert_eq!(fields, vec!["num_units", "days_per_year"]);

    Ok(())
}

#[test]
fn test_batch_report_as_csv() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ScenarioConfig::from_file(write_batch(&temp_dir)?)?;
    let engine = EstimatorEngine::new(config.load_cost_tables()?);

    let reports: Vec<EstimateReport> = engine
        .run_scenarios(&config)
        .into_iter()
        .filter_map(|outcome| {
            let response = outcome.result.ok()?;
            Some(
                EstimateReport::new(outcome.system, engine.source_label(), response)
                    .for_scenario(&outcome.name),
            )
        })
        .collect();
    assert_eq!(reports.len(), 2);

    let csv = report::render(&reports, OutputFormat::Csv)?;
    assert!(csv.starts_with("scenario,system,item,amount\n"));
    assert!(csv.contains("roof,rainwater,pressure_tank_cost,450\n"));
    assert!(csv.contains("chillers,hvac,hvac_unit_cost,200\n"));
    assert!(!csv.contains("half-unit"));

    Ok(())
}

#[test]
fn test_missing_cost_tables_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("scenarios.toml");
    fs::write(&path, SCENARIOS)?;

    let config = ScenarioConfig::from_file(&path)?;
    let err = config.load_cost_tables().unwrap_err();
    assert!(matches!(err, EstimatorError::IoError(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(err.user_friendly_message().starts_with("Could not read or write a file"));

    Ok(())
}

#[test]
fn test_invalid_cost_table_values_are_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_batch(&temp_dir)?;
    fs::write(
        temp_dir.path().join("prices.toml"),
        "[rainwater.pressure_tank]\nmin = 600\nmax = 300\n",
    )?;

    let config = ScenarioConfig::from_file(&path)?;
    let err = config.load_cost_tables().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(err.exit_code(), 1);
    assert!(err.user_friendly_message().contains("rainwater.pressure_tank"));

    Ok(())
}

#[test]
fn test_cost_tables_from_env_placeholder() -> anyhow::Result<()> {
    std::env::set_var("HARVEST_TEST_PRICING_NAME", "from-env");
    let content = "[pricing]\nname = \"${HARVEST_TEST_PRICING_NAME}\"\n";
    let config = CostTableConfig::from_toml_str(content)?;
    assert_eq!(config.pricing.name, "from-env");

    Ok(())
}
