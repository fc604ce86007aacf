use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use onelast::domain::{ImageRef, MessageSegment};
use onelast::infrastructure::{CliArgs, ConfigStore, PluginConfig};
use onelast::presentation::{CommandEvent, ConsoleSink, OneLastPlugin};

fn init_logging(config: &PluginConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<PluginConfig> {
    let store = match &args.config {
        Some(path) => ConfigStore::with_path(path.clone()),
        None => ConfigStore::new()?,
    };

    let mut config = store
        .load()
        .wrap_err_with(|| format!("failed to load {}", store.path().display()))?;
    config.merge_with_args(args);
    Ok(config)
}

fn image_ref(reference: &str) -> ImageRef {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        ImageRef::from_url(reference)
    } else {
        ImageRef::from_file(reference)
    }
}

fn build_event(args: &CliArgs) -> CommandEvent {
    let mut segments: Vec<MessageSegment> = args
        .images
        .iter()
        .map(|r| MessageSegment::Image(image_ref(r)))
        .collect();

    if !args.replies.is_empty() {
        let chain = args
            .replies
            .iter()
            .map(|r| MessageSegment::Image(image_ref(r)))
            .collect();
        segments.insert(0, MessageSegment::reply(chain));
    }

    CommandEvent::new(segments, args.options.clone())
}

async fn run(args: &CliArgs, config: &PluginConfig) -> Result<()> {
    let plugin = OneLastPlugin::init(config).wrap_err("failed to start plugin")?;

    let mut event = build_event(args);
    let sink = ConsoleSink::new(&args.output);

    let outcomes = plugin.handle_command(&mut event, &sink).await;
    plugin.terminate().await;

    info!(
        total = outcomes.len(),
        converted = outcomes.iter().filter(|o| o.is_success()).count(),
        stopped = event.is_stopped(),
        "Invocation finished"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = onelast::VERSION, "Starting {}", onelast::NAME);

    run(&args, &config).await
}
