use anyhow::Context;
use clap::Parser;
use jane_digest::core::ConfigProvider;
use jane_digest::utils::{logger, validation::Validate};
use jane_digest::{ChatBot, CliConfig, EngineSettings, JaneHttpSource, QueryEngine, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting jane-digest");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let file_config = match &config.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
        ),
        None => None,
    };
    let provider: &dyn ConfigProvider = match &file_config {
        Some(file_config) => file_config,
        None => &config,
    };

    // The CLI checks also cover the mode/message requirement.
    let validation = match &file_config {
        Some(file_config) => config.validate().and_then(|_| file_config.validate()),
        None => config.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let source = JaneHttpSource::from_config(provider)?;
    let engine = QueryEngine::new(source, EngineSettings::from_provider(provider));

    let output = match (&config.message, config.mode) {
        (Some(message), _) => {
            let bot = ChatBot::new(engine)?;
            match bot.reply(message).await {
                Some(reply) => reply,
                None => {
                    eprintln!("No (janey:<command>) token found; try (janey:help)");
                    std::process::exit(2);
                }
            }
        }
        (None, Some(mode)) => engine.answer(mode, &config.query).await,
        (None, None) => anyhow::bail!("either --mode or --message is required"),
    };

    println!("{}", output);
    Ok(())
}
