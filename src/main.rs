use clap::Parser;
use group_forge::utils::{logger, validation::Validate};
use group_forge::{CliConfig, ClassCatalog, GroupingEngine, LocalStorage, RosterPipeline};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting group-forge CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.list_classes {
        let catalog = ClassCatalog::mock(&mut StdRng::seed_from_u64(config.catalog_seed));
        for class in catalog.classes() {
            println!(
                "{:<8} {:<10} {:<10} {:<24} {} students",
                class.id,
                class.name,
                class.grade,
                class.major,
                class.students.len()
            );
        }
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = RosterPipeline::new(storage, config);
    let engine = GroupingEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Groups generated successfully!");
            println!("✅ Groups generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Group generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
