use clap::Parser;
use harvest_estimator::app::report::{self, EstimateReport};
use harvest_estimator::utils::error::EstimatorError;
use harvest_estimator::utils::logger;
use harvest_estimator::{CliConfig, EstimatorEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting harvest-estimator CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let tables = match config.load_tables() {
        Ok(tables) => tables,
        Err(e) => exit_with(&e),
    };

    let engine = EstimatorEngine::new(tables);
    let request = config.request();

    // 先驗證輸入，再進行估算
    let response = match engine.run(&request) {
        Ok(response) => response,
        Err(EstimatorError::ValidationError { violations }) => {
            tracing::error!("❌ Request rejected with {} violation(s)", violations.len());
            eprintln!("❌ The request could not be estimated:");
            for violation in &violations {
                eprintln!("  - {}", violation);
            }
            std::process::exit(2);
        }
        Err(e) => exit_with(&e),
    };

    let estimate = EstimateReport::new(request.system(), engine.source_label(), response);
    let output = match report::render(std::slice::from_ref(&estimate), config.format) {
        Ok(output) => output,
        Err(e) => exit_with(&e),
    };

    tracing::info!(
        "✅ {} estimate: {} - {}",
        estimate.system,
        estimate.response.cost_range_min,
        estimate.response.cost_range_max
    );
    println!("{}", output);

    Ok(())
}

fn exit_with(e: &EstimatorError) -> ! {
    tracing::error!(
        "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.exit_code());
}
