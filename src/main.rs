use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use panelkit::layout::{draw_plan, SvgCanvas};
use panelkit::{qrcode, Calculation, SpacingCalculator, ToolkitConfig};

#[derive(Parser)]
#[command(name = "panelkit", version, about = "Slat spacing, QR links and news from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the even gap between slats and optionally sketch it
    Spacing {
        /// Span between the inside edges of the end slats (cm)
        #[arg(long)]
        span: String,
        /// Number of spaces
        #[arg(long)]
        gaps: String,
        /// Slat width (cm)
        #[arg(long)]
        width: String,
        /// Available width used to bound the sketch (px)
        #[arg(long)]
        available: Option<f64>,
        /// Write the sketch as SVG to this file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Build a QR code image link for text or a URL
    Qr {
        text: String,
        /// Download the PNG to this file
        #[arg(long)]
        download: Option<PathBuf>,
        /// Print the downloaded image as a data: URI
        #[arg(long)]
        data_uri: bool,
    },
    /// List articles from the news API (needs GUARDIAN_API_KEY)
    News {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        /// Read search terms from stdin, one per line, debounced
        #[arg(long, conflicts_with_all = ["query", "page"])]
        interactive: bool,
    },
    /// Serve the JSON proxy endpoints
    #[cfg(feature = "server")]
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ToolkitConfig::from_env();

    match cli.command {
        Command::Spacing {
            span,
            gaps,
            width,
            available,
            svg,
        } => run_spacing(&config, &span, &gaps, &width, available, svg),
        Command::Qr {
            text,
            download,
            data_uri,
        } => run_qr(&config, &text, download, data_uri),
        Command::News {
            query,
            page,
            interactive,
        } => run_news(&config, query, page, interactive),
        #[cfg(feature = "server")]
        Command::Serve { addr } => {
            let server = panelkit::server::ProxyServer::bind(&addr, config)?;
            server.serve();
            Ok(())
        }
    }
}

fn run_spacing(
    config: &ToolkitConfig,
    span: &str,
    gaps: &str,
    width: &str,
    available: Option<f64>,
    svg: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut calc = SpacingCalculator::new(config.canvas);
    calc.set_inputs(span, gaps, width);
    let Some(outcome) = calc.calculate(available.unwrap_or(config.available_width)).cloned() else {
        anyhow::bail!("all three of --span, --gaps and --width are required");
    };

    println!("{}", outcome.message());
    if let Calculation::Solved { plan, .. } = &outcome {
        for line in calc.legend() {
            println!("  {}", line);
        }
        if let Some(path) = svg {
            let mut canvas = SvgCanvas::new();
            draw_plan(plan, &mut canvas);
            canvas
                .save(&path)
                .with_context(|| format!("writing sketch to {}", path.display()))?;
            println!("Sketch written to {}", path.display());
        }
    }
    Ok(())
}

fn run_qr(
    config: &ToolkitConfig,
    text: &str,
    download: Option<PathBuf>,
    data_uri: bool,
) -> anyhow::Result<()> {
    let url = qrcode::qr_code_url(&config.qr, text)?;
    println!("QR image: {}", url);
    println!("Opens:    {}", qrcode::link_target(&config.qr, text));

    if download.is_none() && !data_uri {
        return Ok(());
    }

    #[cfg(feature = "net")]
    {
        let png = qrcode::QrClient::new(config)?.download(&url)?;
        if let Some(path) = download {
            qrcode::save_png(&png, &path)?;
            println!("Saved {}", path.display());
        }
        if data_uri {
            println!("{}", qrcode::to_data_uri(&png));
        }
        Ok(())
    }
    #[cfg(not(feature = "net"))]
    {
        anyhow::bail!("downloading requires the `net` feature")
    }
}

#[cfg(feature = "net")]
fn print_feed(feed: &panelkit::news::NewsFeed) {
    if feed.results.is_empty() {
        println!("No articles.");
    }
    for article in &feed.results {
        println!("{}", article.web_title);
        if let Some(trail) = article.trail_text() {
            println!("  {}", trail);
        }
        println!("  {} | {}", article.byline_or_default(), article.web_url);
    }
}

#[cfg(feature = "net")]
fn run_news(
    config: &ToolkitConfig,
    query: Option<String>,
    page: Option<u32>,
    interactive: bool,
) -> anyhow::Result<()> {
    use panelkit::news::{NewsClient, NewsQuery};
    use std::sync::Arc;

    // The blocking client is created and finally dropped outside the runtime.
    let client = Arc::new(NewsClient::new(config)?);

    if !interactive {
        let feed = client.fetch(&NewsQuery { q: query, page })?;
        print_feed(&feed);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let quiet = config.debounce();

    runtime.block_on(async {
        use tokio::io::{AsyncBufReadExt, BufReader};

        let mut debouncer = panelkit::Debouncer::new(quiet);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let client = client.clone();
            debouncer.trigger(move || async move {
                let q = NewsQuery::search(line);
                match tokio::task::spawn_blocking(move || client.fetch(&q)).await {
                    Ok(Ok(feed)) => print_feed(&feed),
                    Ok(Err(e)) => eprintln!("{}", e),
                    Err(e) => log::warn!("search task failed: {}", e),
                }
            });
        }
        debouncer.flush().await;
        Ok::<_, anyhow::Error>(())
    })?;
    drop(runtime);
    Ok(())
}

#[cfg(not(feature = "net"))]
fn run_news(
    _config: &ToolkitConfig,
    _query: Option<String>,
    _page: Option<u32>,
    _interactive: bool,
) -> anyhow::Result<()> {
    anyhow::bail!("news requires the `net` feature")
}
