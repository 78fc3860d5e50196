pub mod config;       // Configuration management
pub mod error;        // Decode error types
pub mod frame_source; // Raw frame input
pub mod options;      // Command line options parsing
pub mod prelude;      // Common imports and types
pub mod record_writer; // JSON line output
pub mod vedirect;     // Field decoding and frame normalization

// Get the package version from Cargo.toml
const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

use crate::prelude::*;
use std::io::Write;
use tokio::sync::broadcast;

/// Initialise env_logger with `level` as the default filter (RUST_LOG wins)
pub fn init_logging(level: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .write_style(env_logger::WriteStyle::Never)
        .try_init();

    if let Err(e) = result {
        debug!("Logger already initialised: {}", e);
    }
}

/// Reads frames from `source`, normalizes each one and writes the record.
///
/// Stops at end of input, after `limit` frames, or when `shutdown_rx`
/// fires. Returns the number of frames processed.
pub async fn pump<S: FrameSource + Send>(
    source: &mut S,
    normalizer: &FrameNormalizer,
    writer: &RecordWriter,
    limit: Option<u64>,
    shutdown_rx: &mut broadcast::Receiver<()>,
) -> Result<u64> {
    let mut frames = 0;

    loop {
        if limit.is_some_and(|limit| frames >= limit) {
            debug!("Frame limit {} reached", frames);
            break;
        }

        let next = tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Shutdown signal received");
                break;
            }
            next = source.next_frame() => next?,
        };

        let Some(frame) = next else {
            debug!("End of input");
            break;
        };

        let record = normalizer.normalize(&frame);
        writer.write_record(&record)?;
        frames += 1;
    }

    Ok(frames)
}

/// Main application entry point
pub async fn app(mut shutdown_rx: broadcast::Receiver<()>, options: Options) -> Result<()> {
    let mut config = Config::load(options.config_file.as_deref()).unwrap_or_else(|err| {
        init_logging("info");
        error!("Failed to load config: {:?}", err);
        std::process::exit(255);
    });
    if let Some(profile) = options.profile {
        config.set_profile(profile);
    }

    init_logging(config.loglevel());
    info!("vedirect-dump {} starting", CARGO_PKG_VERSION);
    config.log_summary();

    let normalizer = FrameNormalizer::with_profile(config.scale_profile());
    let writer = RecordWriter::stdout();
    let mut source = JsonLinesSource::open(&options.input).await?;

    let frames = pump(&mut source, &normalizer, &writer, options.frames, &mut shutdown_rx).await?;

    info!(
        "Processed {} frames, {} malformed lines skipped",
        frames,
        source.skipped()
    );
    Ok(())
}

/// Runs `app` until it completes or Ctrl+C is received.
pub async fn run(options: Options) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    // Set up signal handlers for graceful shutdown
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
        }
        let _ = shutdown_tx.send(());
    });

    app(shutdown_rx, options).await
}
