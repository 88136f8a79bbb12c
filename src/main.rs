use clap::Parser;
use flight_aggregator::utils::error::ErrorSeverity;
use flight_aggregator::utils::{logger, validation::Validate};
use flight_aggregator::{CliConfig, FlightSearchError, SearchResponse, SupplierConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting flight-search CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Flight search failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // 輸入錯誤
            ErrorSeverity::High => 1,   // 配置錯誤
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), FlightSearchError> {
    let config = SupplierConfig::from_file(&cli.config)?.with_timeout_override(cli.timeout_ms);
    config.validate()?;

    let criteria = cli.to_criteria();
    criteria.validate()?;

    let service = config.build_service()?;
    tracing::info!(
        "🔍 Searching {} -> {} with suppliers {:?}",
        criteria.origin,
        criteria.destination,
        service.supplier_names()
    );

    let flights = service.search_flights(&criteria).await;
    tracing::info!("✅ Found {} flights", flights.len());

    let response = SearchResponse { flights };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
