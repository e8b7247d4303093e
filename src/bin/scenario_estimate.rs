use clap::Parser;
use harvest_estimator::app::report::{self, EstimateReport, OutputFormat};
use harvest_estimator::domain::ports::TableSource;
use harvest_estimator::utils::{logger, validation::Validate};
use harvest_estimator::utils::error::EstimatorError;
use harvest_estimator::{EstimatorEngine, ScenarioConfig};

#[derive(Parser)]
#[command(name = "scenario-estimate")]
#[command(about = "Price a batch of harvesting scenarios from a TOML file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "scenarios.toml")]
    config: String,

    /// Output format: json, csv or tsv
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Dry run - show what would be priced without estimating
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting scenario estimator");
    tracing::info!("📁 Loading scenarios from: {}", args.config);

    let config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let tables = match config.load_cost_tables() {
        Ok(tables) => tables,
        Err(e) => exit_with(&e),
    };

    tracing::info!("✅ Scenarios loaded and validated successfully");

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No estimates will be produced");
        perform_dry_run(&config, tables.label(), args.format);
        return Ok(());
    }

    let engine = EstimatorEngine::new(tables);
    let outcomes = engine.run_scenarios(&config);

    let mut reports = Vec::new();
    let mut rejected = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(response) => reports.push(
                EstimateReport::new(outcome.system, engine.source_label(), response)
                    .for_scenario(&outcome.name),
            ),
            Err(violations) => {
                rejected += 1;
                eprintln!("⚠️ Scenario '{}' was not estimated:", outcome.name);
                for violation in &violations {
                    eprintln!("  - {}", violation);
                }
            }
        }
    }

    if !reports.is_empty() {
        let output = match report::render(&reports, args.format) {
            Ok(output) => output,
            Err(e) => exit_with(&e),
        };
        println!("{}", output);
    }

    tracing::info!(
        "✅ Estimated {} scenario(s), rejected {}",
        reports.len(),
        rejected
    );

    if rejected > 0 {
        std::process::exit(2);
    }

    Ok(())
}

fn exit_with(e: &EstimatorError) -> ! {
    tracing::error!(
        "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn perform_dry_run(config: &ScenarioConfig, pricing: &str, format: OutputFormat) {
    println!("📋 Batch Summary:");
    println!("  Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  Description: {}", description);
    }
    println!("  Pricing: {}", pricing);
    println!("  Format: {}", format);
    println!();

    println!("🔍 Scenarios:");
    for scenario in &config.scenarios {
        let status = if scenario.is_enabled() { "✅" } else { "⏸️" };
        println!(
            "  {} {} ({})",
            status,
            scenario.name,
            scenario.request.system()
        );
    }

    println!();
    println!("✅ Dry run analysis complete. Remove --dry-run to produce estimates.");
}
