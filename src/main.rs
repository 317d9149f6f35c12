use clap::Parser;
use img_stacker::utils::{logger, validation::Validate};
use img_stacker::{CliConfig, LocalStorage, StackEngine, StackPipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting img-stacker CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StackPipeline::new(storage, config);

    // 創建引擎並運行
    let engine = StackEngine::new(pipeline);

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ Stacking completed successfully!");
            tracing::info!("📁 Wrote {} combined images", report.outputs.len());
            println!("✅ Stacking completed successfully!");
            println!("📁 Wrote {} combined images", report.outputs.len());
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Stacking failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                img_stacker::utils::error::ErrorSeverity::Low => 0,
                img_stacker::utils::error::ErrorSeverity::Medium => 2,
                img_stacker::utils::error::ErrorSeverity::High => 1,
                img_stacker::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
