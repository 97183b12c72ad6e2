use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gitapath::app::AppContext;
use gitapath::cli::{commands, Cli, Commands};
use gitapath::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(workers) = cli.workers {
        config.api.max_concurrency = workers;
    }

    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::Chapters => commands::list_chapters(&ctx).await?,
        Commands::Chapter { number } => commands::show_chapter(&ctx, number).await?,
        Commands::Verses { chapter } => commands::list_verses(&ctx, chapter).await?,
        Commands::Verse {
            chapter,
            verse,
            format,
        } => commands::show_verse(&ctx, chapter, verse, format).await?,
        Commands::Random => commands::random_verse(&ctx).await?,
        Commands::Daily { format } => commands::daily_verse(&ctx, format).await?,
        Commands::Bookmark { chapter, verse } => commands::toggle_bookmark(&ctx, chapter, verse)?,
        Commands::Bookmarks { resolve } => commands::list_bookmarks(&ctx, resolve).await?,
        Commands::Search { query, chapters } => commands::search(&ctx, &query, &chapters).await?,
    }

    Ok(())
}
