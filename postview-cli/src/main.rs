use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use postview_api::{API, DEFAULT_BASE_URL};
use postview_cli::{
    ctx::{Args, Context},
    screen::ScreenController,
    stdio::{self, TerminalPresenter, HELP},
    DONE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse posts and their comments")]
struct Cli {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout in seconds
    #[arg(long, short = 't', default_value_t = 10)]
    timeout: u64,
    #[arg(long, short = 'n', default_value_t = 10)]
    page_size: usize,
    #[arg(long)]
    no_spinner: bool,
    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        base_url,
        timeout,
        page_size,
        no_spinner,
        log_level,
    } = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(log_level.into())
                        .from_env_lossy(),
                ),
        )
        .init();

    info!("Started against {base_url}");

    ctrlc::set_handler(move || {
        info!("Signal handler called");
        DONE.store(true, Ordering::Relaxed);
    })?;

    let args = Args::builder()
        .api_base_url(base_url)
        .request_timeout(Duration::from_secs(timeout))
        .page_size(page_size)
        .spinner(!no_spinner)
        .build()?;
    browse(&args).await?;

    info!("Exit");

    Ok(())
}

async fn browse(ctx: impl Context<'_>) -> Result<()> {
    let api = API::try_with_base_url(ctx.api_base_url())?.with_timeout(ctx.request_timeout());
    let presenter = TerminalPresenter::stdout(ctx.page_size(), ctx.spinner());

    let mut screen = ScreenController::new(api, presenter);
    screen.activate().await;
    screen.presenter_mut().print(HELP);

    stdio::run(&mut screen, stdio::stdin_lines()).await;
    Ok(())
}
