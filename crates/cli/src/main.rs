use advisor_dialogue::AskOrder;
use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod bootstrap;
mod chat;

#[derive(Parser)]
#[command(name = "laptop-advisor")]
#[command(about = "Conversational laptop recommendations over a local catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive advisor conversation
    Chat(ChatArgs),

    /// Build (or rebuild) the index snapshot for a catalog
    Index(IndexArgs),

    /// Run a one-shot retrieval query against the catalog
    Search(SearchArgs),
}

#[derive(Args)]
struct ChatArgs {
    /// Catalog CSV path (';'-separated, columns title/description/features)
    #[arg(long, default_value = "metadata_cleaned.csv")]
    catalog: PathBuf,

    /// Index snapshot path (built on first run, reused afterwards)
    #[arg(long, default_value = "tfidf_index.bin")]
    snapshot: PathBuf,

    /// Number of recommendations to show
    #[arg(long, short = 'n', default_value_t = 5)]
    top_n: usize,

    /// Preference extraction backend
    #[arg(long, value_enum, default_value_t = ExtractorKind::Rule)]
    extractor: ExtractorKind,

    /// How the next follow-up question is chosen among missing slots
    #[arg(long, value_enum, default_value_t = AskOrderFlag::Canonical)]
    ask_order: AskOrderFlag,

    /// Re-rank and explain results with the text-generation service
    #[arg(long)]
    rerank: bool,
}

#[derive(Args)]
struct IndexArgs {
    /// Catalog CSV path
    #[arg(long, default_value = "metadata_cleaned.csv")]
    catalog: PathBuf,

    /// Index snapshot path to write
    #[arg(long, default_value = "tfidf_index.bin")]
    snapshot: PathBuf,
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text retrieval query
    query: String,

    /// Catalog CSV path
    #[arg(long, default_value = "metadata_cleaned.csv")]
    catalog: PathBuf,

    /// Index snapshot path (built on first run, reused afterwards)
    #[arg(long, default_value = "tfidf_index.bin")]
    snapshot: PathBuf,

    /// Maximum number of results
    #[arg(long, short = 'n', default_value_t = 5)]
    limit: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum ExtractorKind {
    /// Local keyword heuristics, no network
    Rule,
    /// Hosted text-generation service (needs ADVISOR_API_KEY)
    Service,
}

#[derive(Copy, Clone, ValueEnum)]
enum AskOrderFlag {
    Canonical,
    Random,
}

impl AskOrderFlag {
    const fn as_domain(self) -> AskOrder {
        match self {
            AskOrderFlag::Canonical => AskOrder::Canonical,
            AskOrderFlag::Random => AskOrder::Random,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Chat(args) => run_chat(args).await?,
        Commands::Index(args) => run_index(args).await?,
        Commands::Search(args) => run_search(args).await?,
    }

    Ok(())
}

async fn run_chat(args: ChatArgs) -> Result<()> {
    let service = bootstrap::open_retrieval(&args.catalog, &args.snapshot).await?;

    let session = chat::ChatSession::configure(
        &service,
        args.extractor,
        args.ask_order.as_domain(),
        args.rerank,
        args.top_n,
    )?;
    session.run().await
}

async fn run_index(args: IndexArgs) -> Result<()> {
    let catalog = bootstrap::load_catalog(&args.catalog)?;
    let index = bootstrap::build_index(&catalog)?;
    index
        .persist(&args.snapshot)
        .await
        .with_context(|| format!("Failed to write snapshot to {}", args.snapshot.display()))?;
    eprintln!(
        "Indexed {} items ({} terms) into {}",
        index.len(),
        index.dimensions(),
        args.snapshot.display()
    );
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let service = bootstrap::open_retrieval(&args.catalog, &args.snapshot).await?;

    let set = service
        .recommend(
            &args.query,
            args.limit,
            advisor_recommend::DEFAULT_OVER_FETCH,
        )
        .context("Search failed")?;

    if set.items.is_empty() {
        eprintln!("No matches for '{}'", args.query);
        return Ok(());
    }
    if set.is_partial() {
        eprintln!(
            "Only {} of {} requested results survived filtering",
            set.items.len(),
            set.requested
        );
    }
    for (i, rec) in set.items.iter().enumerate() {
        println!("{}. {} (distance: {:.3})", i + 1, rec.title, rec.distance);
        if let Some((_, body)) = rec.display_block().split_once('\n') {
            println!("   {body}");
        }
        println!();
    }
    Ok(())
}
