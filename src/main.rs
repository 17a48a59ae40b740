use clap::Parser;
use semsearch::application::corpus::{load_documents, sample_documents, sample_queries};
use semsearch::application::ensure_index::EnsureOutcome;
use semsearch::cli::commands::Cli;
use semsearch::cli::output::{format_match, separator};
use semsearch::config::Config;
use semsearch::domain::error::DomainError;
use semsearch::SemanticSearch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), DomainError> {
    let documents = match &cli.documents {
        Some(path) => load_documents(path)?,
        None => sample_documents(),
    };
    let queries = if cli.queries.is_empty() {
        sample_queries()
    } else {
        cli.queries
    };

    println!("🧠 Loading model (this might take a few seconds)...");
    let app = SemanticSearch::new(&config)?;
    let index_name = &config.index.name;

    let ensured = app.ensure_index(cli.recreate).await?;
    match ensured.outcome {
        EnsureOutcome::Created => println!("📂 Created index: {index_name}"),
        EnsureOutcome::Recreated => println!("📂 Recreated index: {index_name}"),
        EnsureOutcome::Reused => {}
    }
    println!("✅ Connected to {} index: {index_name} ({})", app.backend(), app.model_name());
    let index = ensured.index.as_ref();

    println!("\n📤 Upserting data...");
    let written = app.ingest(index, &documents).await?;
    println!("✨ Uploaded {written} vectors.");

    println!("\n🔍 Starting Semantic Search...\n");
    for query in &queries {
        println!("❓ Question: '{query}'");
        for m in app.search(index, query, cli.top_k).await? {
            println!("{}", format_match(&m));
        }
        println!("{}", separator());
    }

    if cli.teardown {
        app.delete_index().await?;
        println!("\n🧹 Deleted index: {index_name}");
    }

    println!("\n🎉 Done! You just built a Semantic Search Engine.");
    Ok(())
}
