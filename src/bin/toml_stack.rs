use anyhow::Context;
use clap::Parser;
use img_stacker::config::toml_config::TomlConfig;
use img_stacker::core::{ConfigProvider, Pipeline};
use img_stacker::utils::{logger, validation::Validate};
use img_stacker::LocalStorage;
use img_stacker::{StackEngine, StackPipeline};

#[derive(Parser)]
#[command(name = "toml-stack")]
#[command(about = "Image stacker with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "stack-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override target width from config
    #[arg(long)]
    target_width: Option<u32>,

    /// Override group size from config
    #[arg(long)]
    group_size: Option<usize>,

    /// Dry run - show what would be processed without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based stacker");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(width) = args.target_width {
        config.compose.get_or_insert_with(Default::default).target_width = Some(width);
        tracing::info!("🔧 Target width overridden to: {}", width);
    }
    if let Some(size) = args.group_size {
        config.compose.get_or_insert_with(Default::default).group_size = Some(size);
        tracing::info!("🔧 Group size overridden to: {}", size);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output_path().to_string());
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
            tracing::error!(
                "❌ Stacking failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("0")
    );
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Target Width: {}", config.target_width());
    println!("  Group Size: {}", config.group_size());
    println!("  Missing Key Policy: {:?}", config.missing_key_policy());
    println!("  Filename Prefix: {}", config.filename_prefix());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = StackPipeline::new(storage, config.clone());

    let entries = pipeline.scan()?;
    let batches = pipeline.group(entries)?;

    println!("🔍 Dry Run Analysis:");
    println!();
    println!("📡 Input Analysis:");
    println!("  Images found: {}", batches.iter().map(|b| b.entries.len()).sum::<usize>());
    println!("  Batches to compose: {}", batches.len());
    println!();
    println!("💾 Planned Outputs:");
    for batch in &batches {
        println!(
            "  {}/{}_{}.jpg <- {} images",
            config.output_path(),
            config.filename_prefix(),
            batch.index,
            batch.entries.len()
        );
    }
    println!();
    println!("✅ Dry run analysis complete. No files were written.");

    Ok(())
}
