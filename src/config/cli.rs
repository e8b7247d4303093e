use crate::app::report::OutputFormat;
use crate::config::toml_config::CostTableConfig;
use crate::domain::model::{CalculatorRequest, HvacRequest, RainwaterRequest};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "harvest-estimator")]
#[command(about = "Estimate installation costs for rainwater and HVAC condensate harvesting")]
pub struct CliConfig {
    #[arg(long, global = true, default_value = "json", help = "Output format: json, csv or tsv")]
    pub format: OutputFormat,

    #[arg(long, global = true, help = "TOML file overriding the built-in cost tables")]
    pub tables: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub system: SystemCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SystemCommand {
    /// Rooftop rainwater collection
    Rainwater(RainwaterArgs),
    /// HVAC condensate recovery
    Hvac(HvacArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RainwaterArgs {
    #[arg(long)]
    pub roof_area_sqft: f64,

    #[arg(long)]
    pub annual_rainfall_inches: f64,

    #[arg(long)]
    pub piping_length_feet: f64,

    #[arg(long, help = "Add potable treatment (UV and carbon)")]
    pub potable: bool,

    #[arg(long, help = "Explicit tank size, skips the computed size")]
    pub storage_gallons: Option<f64>,

    #[arg(long, help = "asphalt_shingles, metal or tile")]
    pub roof_type: Option<String>,

    #[arg(long, help = "vinyl, aluminum or galvanized_steel")]
    pub gutter_material: Option<String>,

    #[arg(long, help = "pvc, hdpe or copper")]
    pub piping_material: Option<String>,

    #[arg(long, help = "polyethylene_above_ground, fiberglass or concrete_underground")]
    pub tank_material: Option<String>,

    #[arg(long, help = "small_booster or mid_sized_whole_house")]
    pub pump_size: Option<String>,

    #[arg(long)]
    pub include_excavation: bool,

    #[arg(long)]
    pub no_pressure_tank: bool,
}

#[derive(Debug, Clone, Args)]
pub struct HvacArgs {
    #[arg(long)]
    pub num_units: f64,

    #[arg(long)]
    pub tons_per_unit: f64,

    #[arg(long)]
    pub days_per_year: f64,

    #[arg(long)]
    pub piping_length_feet: f64,

    #[arg(long, help = "Add potable treatment (carbon and UV)")]
    pub potable: bool,

    #[arg(long, help = "Explicit tank size, skips the computed size")]
    pub storage_gallons: Option<f64>,

    #[arg(long, help = "pvc_tubing, flexible_condensate or copper_rare")]
    pub piping_material: Option<String>,

    #[arg(long, help = "small_poly_100_500, large_poly_1000_plus or indoor_sump")]
    pub tank_type: Option<String>,

    #[arg(long, help = "small_condensate or sump_transfer")]
    pub pump_type: Option<String>,
}

impl From<&RainwaterArgs> for RainwaterRequest {
    fn from(args: &RainwaterArgs) -> Self {
        RainwaterRequest {
            roof_area_sqft: args.roof_area_sqft,
            annual_rainfall_inches: args.annual_rainfall_inches,
            piping_length_feet: args.piping_length_feet,
            potable: args.potable,
            storage_gallons: args.storage_gallons,
            roof_type: args.roof_type.clone(),
            gutter_material: args.gutter_material.clone(),
            piping_material: args.piping_material.clone(),
            tank_material: args.tank_material.clone(),
            pump_size: args.pump_size.clone(),
            include_excavation: args.include_excavation,
            include_pressure_tank: !args.no_pressure_tank,
        }
    }
}

impl From<&HvacArgs> for HvacRequest {
    fn from(args: &HvacArgs) -> Self {
        HvacRequest {
            num_units: args.num_units,
            tons_per_unit: args.tons_per_unit,
            days_per_year: args.days_per_year,
            piping_length_feet: args.piping_length_feet,
            potable: args.potable,
            storage_gallons: args.storage_gallons,
            piping_material: args.piping_material.clone(),
            tank_type: args.tank_type.clone(),
            pump_type: args.pump_type.clone(),
        }
    }
}

impl CliConfig {
    pub fn request(&self) -> CalculatorRequest {
        match &self.system {
            SystemCommand::Rainwater(args) => RainwaterRequest::from(args).into(),
            SystemCommand::Hvac(args) => HvacRequest::from(args).into(),
        }
    }

    /// 載入 --tables 指定的成本表，未指定時使用內建價格
    pub fn load_tables(&self) -> Result<CostTableConfig> {
        match &self.tables {
            Some(path) => {
                let config = CostTableConfig::from_file(path)?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(CostTableConfig::builtin()),
        }
    }
}
