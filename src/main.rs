use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use futures_util::future::join_all;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use teleview::application::{ImageCache, Resolution, ui_channel};
use teleview::domain::ResolvedImage;
use teleview::infrastructure::{
    AppConfig, AssetCatalog, CliArgs, HttpImageFetcher, ImageCrateDecoder, MemoryImageCache,
    StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
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

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn report(link: &str, pass: &str, resolved: &ResolvedImage) {
    let (width, height) = resolved.dimensions();
    println!("{link}\t{pass}\t{}\t{width}x{height}", resolved.origin);
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = teleview::VERSION, "Starting teleview");

    // The main task owns the UI context: cache hits deliver inline here and
    // worker results are drained here after each pass.
    let (ui, mut ui_context) = ui_channel();

    let assets = AssetCatalog::new(config.assets.dir.clone());
    let cache = ImageCache::new(
        Arc::new(MemoryImageCache::with_capacity(config.cache.max_entries)),
        Arc::new(HttpImageFetcher::new(&config.fetcher_config())?),
        Arc::new(ImageCrateDecoder),
        &assets,
        ui,
        &config.image_cache_config(),
    );

    for pass in ["first", "second"] {
        let resolutions: Vec<Resolution> = args
            .urls
            .iter()
            .map(|link| {
                let link_for_sink = link.clone();
                let resolution = cache.resolve_link(link, move |resolved| {
                    report(&link_for_sink, pass, &resolved);
                });
                if matches!(resolution, Resolution::InvalidLocator) {
                    println!("{link}\t{pass}\tinvalid\t-");
                }
                resolution
            })
            .collect();

        join_all(resolutions.into_iter().map(Resolution::completed)).await;
        ui_context.run_pending();
    }

    println!("{}", cache.stats());

    Ok(())
}
