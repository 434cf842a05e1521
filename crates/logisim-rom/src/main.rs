use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;

mod cli;
mod convert;
mod input;
mod output;
mod serve;

fn main() -> Result<()> {
    init_tracing()?;
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Convert {
            input,
            output,
            stdout,
        } => {
            let hex_words = if input == Path::new("-") {
                input::read_mem_dump_from(std::io::stdin().lock())?
            } else {
                input::read_mem_dump(&input)?
            };
            tracing::info!("Converting {} words", hex_words.len());
            let lines = convert::convert(&hex_words)
                .with_context(|| format!("failed to convert {}", input.display()))?;
            if stdout {
                std::io::stdout()
                    .lock()
                    .write_all(output::render_listing(&lines).as_bytes())
                    .context("failed to write listing to stdout")?;
            } else {
                output::write_listing(&output, &lines)?;
            }
        }
        cli::Commands::Serve {
            host,
            port,
            upload_dir,
            processed_dir,
        } => {
            let config = serve::ServeConfig {
                addr: SocketAddr::new(host, port),
                upload_dir,
                processed_dir,
            };
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(serve::run(config))?;
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_log::LogTracer::init()
        .map_err(|e| anyhow::anyhow!("Can't initialize log bridge: {e}"))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Can't initialize tracing subscriber: {e}"))?;
    Ok(())
}
