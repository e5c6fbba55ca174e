use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use feedsearch::config::CONFIG;
use feedsearch::data_models::SearchResult;
use feedsearch::detail::PhotoDetail;
use feedsearch::fetch_client::{FeedClient, PhotoFetcher};
use feedsearch::pipeline::SearchPipeline;
use feedsearch::view_state::{ViewState, Viewport, project};

#[derive(Parser)]
#[command(name = "feedsearch", about = "Search the public photo feed by tag")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch once and print the matching photos
    Search { query: String },
    /// Treat each stdin line as the current query text and print every view state
    Watch {
        #[arg(long, default_value_t = 400)]
        width: u32,
        #[arg(long, default_value_t = 800)]
        height: u32,
    },
    /// Fetch and show the detail view of one photo
    Detail {
        query: String,
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_new(&CONFIG.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Config is read before a subscriber exists, so problems are reported here.
    for warning in &CONFIG.warnings {
        tracing::warn!("{warning}");
    }

    let cli = Cli::parse();
    let client = FeedClient::new()?;

    match cli.command {
        Command::Search { query } => {
            let result = client.fetch(&query).await?;
            print_result(&result);
        }
        Command::Watch { width, height } => watch(client, Viewport::new(width, height)).await?,
        Command::Detail { query, index } => {
            let result = client.fetch(&query).await?;
            let item = result
                .get(index)
                .cloned()
                .with_context(|| format!("no photo at index {index} ({} results)", result.len()))?;
            print_detail(&PhotoDetail::from_item(item))?;
        }
    }
    Ok(())
}

async fn watch(client: FeedClient, viewport: Viewport) -> Result<()> {
    let pipeline = SearchPipeline::new(client);
    let mut states = pipeline.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    pipeline.set_focused(true);

    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("Failed to read stdin")? {
                Some(line) => pipeline.submit_query(line),
                None => break,
            },
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                println!("[{}] {:?}", state.name(), project(&state, viewport));
                if let ViewState::Content(result) = &state {
                    print_result(result);
                }
            }
        }
    }

    pipeline.shutdown();
    Ok(())
}

fn print_result(result: &SearchResult) {
    if result.is_empty() {
        println!("no photos");
    }
    for (idx, item) in result.items().iter().enumerate() {
        println!("{idx:>3}  {}  {}", item.title, item.image_url);
    }
}

fn print_detail(detail: &PhotoDetail) -> Result<()> {
    let item = detail.item();
    println!("{}", item.title);
    println!("by {}", detail.author_name());
    println!("{}", item.image_url);
    if let Some((width, height)) = detail.dimensions() {
        println!("{width}x{height}");
    }
    println!("tags: {}", detail.tag_list().join(", "));
    println!();
    println!("{}", detail.description_text()?);
    Ok(())
}
