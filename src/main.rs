// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use kb_rag::utils::logging::{format_success, format_warning};
use kb_rag::{
    AskOutcome, ChatCompletionClient, ChromaClient, ChromaCollection, Config, KnowledgeBase,
    VectorCollection, load_documents, mcp::KnowledgeBaseMcp, search_knowledge_base,
};
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "kb_rag")]
#[command(version = "0.1.0")]
#[command(about = "RAG pipeline for personal document knowledge bases", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load documents and index them into the vector store
    Index {
        /// Delete and recreate the collection before indexing
        #[arg(long)]
        force: bool,
    },

    /// Search the knowledge base and print ranked chunks
    Search {
        /// Search query text
        query: String,

        #[arg(short = 'n', long, default_value_t = 3)]
        limit: usize,
    },

    /// Ask a question answered from retrieved context
    Ask {
        /// The question to answer
        question: String,

        #[arg(short = 'n', long, default_value_t = 3)]
        limit: usize,
    },

    /// Show collection statistics
    Stats,

    /// Print the raw text of a stored chunk by its ID
    Get {
        /// Chunk or document ID
        id: String,
    },

    /// Delete the collection
    Reset {
        #[arg(long)]
        confirm: bool,
    },

    /// Start MCP (Model Context Protocol) server for agentic tool integration
    Mcp {
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    kb_rag::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Personal Knowledge Base RAG");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Index { force } => {
            cmd_index(&config, force).await?;
        }
        Commands::Search { query, limit } => {
            cmd_search(&config, &query, limit).await?;
        }
        Commands::Ask { question, limit } => {
            cmd_ask(&config, &question, limit).await?;
        }
        Commands::Stats => {
            cmd_stats(&config).await?;
        }
        Commands::Get { id } => {
            cmd_get(&config, &id).await?;
        }
        Commands::Reset { confirm } => {
            cmd_reset(&config, confirm).await?;
        }
        Commands::Mcp { transport } => {
            cmd_mcp(&config, &transport).await?;
        }
    }

    Ok(())
}

async fn open_collection(config: &Config) -> Result<ChromaCollection> {
    let client = ChromaClient::new(&config.store.url);
    client
        .create_or_get_collection(&config.store.collection)
        .await
        .context("Failed to open vector store collection")
}

fn knowledge_base(config: &Config, collection: ChromaCollection) -> Result<KnowledgeBase> {
    let completions =
        ChatCompletionClient::new(&config.completion).context("Failed to build completion client")?;

    KnowledgeBase::new(Arc::new(collection), Arc::new(completions), &config.chunking)
        .context("Failed to build knowledge base")
}

async fn cmd_index(config: &Config, force: bool) -> Result<()> {
    info!("Loading documents from: {}", config.documents.folder.display());
    let documents =
        load_documents(&config.documents.folder).context("Failed to load documents")?;

    if documents.is_empty() {
        println!(
            "{}",
            format_warning(&format!(
                "No documents found. Add .txt or .md files to {}",
                config.documents.folder.display()
            ))
        );
        return Ok(());
    }

    let client = ChromaClient::new(&config.store.url);
    let mut collection = client
        .create_or_get_collection(&config.store.collection)
        .await
        .context("Failed to open vector store collection")?;

    let existing = collection.count().await?;
    if existing > 0 {
        if !force {
            println!(
                "Collection already has {existing} chunks indexed. Use --force to re-index."
            );
            return Ok(());
        }

        warn!("Re-indexing: deleting collection {}", config.store.collection);
        client.delete_collection(&config.store.collection).await?;
        collection = client
            .create_or_get_collection(&config.store.collection)
            .await?;
    }

    let kb = knowledge_base(config, collection)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    spinner.set_message(format!("Indexing {} documents", documents.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let chunks = kb.index(&documents).await?;

    spinner.finish_and_clear();
    println!(
        "{}",
        format_success(&format!(
            "Indexed {} chunks from {} documents",
            chunks,
            documents.len()
        ))
    );

    Ok(())
}

async fn cmd_search(config: &Config, query: &str, limit: usize) -> Result<()> {
    let collection = open_collection(config).await?;

    info!("Searching for: {}", query);
    let chunks = search_knowledge_base(query, &collection, limit).await?;

    if chunks.is_empty() {
        println!("\nNo results found for query: \"{query}\"\n");
        println!("Try different search terms, or check that documents have been indexed.");
        return Ok(());
    }

    println!("\nSearch Results for: \"{query}\"\n");
    println!("{}", "=".repeat(80));

    for (idx, chunk) in chunks.iter().enumerate() {
        println!("\n{}. {}", idx + 1, chunk.format_summary(300));
    }

    println!("{}", "=".repeat(80));
    Ok(())
}

async fn cmd_ask(config: &Config, question: &str, limit: usize) -> Result<()> {
    let collection = open_collection(config).await?;
    let kb = knowledge_base(config, collection)?;

    info!("Answering: {}", question);

    match kb.ask(question, limit).await? {
        AskOutcome::NoRelevantInformation => {
            println!("No relevant information found.");
        }
        AskOutcome::Answer { text, sources } => {
            println!("\nFound relevant information in:");
            let mut seen = Vec::new();
            for source in sources {
                if !seen.contains(&source) {
                    println!("  - {source}");
                    seen.push(source);
                }
            }
            println!("\n{text}");
        }
    }

    Ok(())
}

async fn cmd_stats(config: &Config) -> Result<()> {
    let collection = open_collection(config).await?;
    let count = collection.count().await?;

    println!("Collection: {}", collection.name());
    println!("Indexed chunks: {count}");
    match collection.metadata() {
        Some(metadata) => println!("Metadata: {}", serde_json::to_string_pretty(metadata)?),
        None => println!("Metadata: none"),
    }

    Ok(())
}

async fn cmd_get(config: &Config, id: &str) -> Result<()> {
    let collection = open_collection(config).await?;
    let ids = [id.to_string()];
    let response = collection.get(&ids).await?;

    match response.documents.into_iter().next() {
        Some(document) => println!("{document}"),
        None => println!("Document {id} not found"),
    }

    Ok(())
}

async fn cmd_reset(config: &Config, confirm: bool) -> Result<()> {
    if !confirm {
        println!("This deletes the whole collection. Use --confirm to proceed.");
        return Ok(());
    }

    warn!("Deleting collection {}", config.store.collection);

    let client = ChromaClient::new(&config.store.url);
    client
        .delete_collection(&config.store.collection)
        .await
        .context("Failed to delete collection")?;

    println!("{}", format_success("Collection deleted"));
    Ok(())
}

async fn cmd_mcp(config: &Config, transport: &str) -> Result<()> {
    info!("Starting MCP server (transport: {})", transport);

    if transport != "stdio" {
        anyhow::bail!("Unsupported transport: {transport}");
    }

    let collection = open_collection(config).await?;
    let server = KnowledgeBaseMcp::new(Arc::new(collection));

    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    Ok(())
}
