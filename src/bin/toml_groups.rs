use anyhow::Context;
use clap::Parser;
use group_forge::core::ConfigProvider;
use group_forge::domain::model::RosterSource;
use group_forge::utils::{logger, validation::Validate};
use group_forge::{GroupingEngine, LocalStorage, RosterPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-groups")]
#[command(about = "Group generation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "groups.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the shuffle seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - show what would be generated without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("🚀 Starting TOML-based group generation");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.grouping.seed = Some(seed);
        tracing::info!("🔧 Shuffle seed overridden to: {}", seed);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No groups will be written");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = RosterPipeline::new(storage, config);
    let engine = GroupingEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Groups generated successfully!");
            println!("✅ Groups generated successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Group generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    match config.roster_source() {
        RosterSource::File(path) => tracing::info!("📋 Roster file: {}", path),
        RosterSource::Catalog { class_id, seed } => {
            tracing::info!("📋 Catalog class: {} (seed {})", class_id, seed)
        }
    }
    tracing::info!("🔀 Remainder policy: {:?}", config.remainder_policy());
    match config.seed() {
        Some(seed) => tracing::info!("🎲 Shuffle seed: {}", seed),
        None => tracing::info!("🎲 Shuffle seed: random"),
    }
    for project in config.projects() {
        tracing::info!("📌 Project '{}' - groups of {}", project.title, project.group_size);
    }
    tracing::info!(
        "💾 Output: {} ({}{})",
        config.output_path(),
        config.output_formats().join(", "),
        if config.archive() { ", zipped" } else { "" }
    );
}
