use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{mask_secret, Config, Credentials};
use crate::evaluation::evaluate_keyword_set;
use crate::export::{export_article_csv, render_text_report, write_evaluation_report, write_json};
use crate::generation::{extract_keywords, generate_article, GenerationRequest, DEFAULT_MAX_KEYWORDS};
use crate::llm_client::{CompletionGateway, LlmClient};
use crate::models::{Article, KeywordSet};
use crate::pipeline::run_pipeline;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "seo")]
#[command(about = "SEO content pipeline: keyword extraction, article generation, scoring and CSV export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract SEO keywords from a website description
    Keywords {
        description: String,
        /// Maximum number of keywords to return
        #[arg(long, default_value_t = DEFAULT_MAX_KEYWORDS)]
        max: usize,
    },
    /// Generate an article for comma-separated keywords
    Generate {
        keywords: String,
        /// Topic or site context for the article
        #[arg(long)]
        context: Option<String>,
        #[arg(long, default_value = "Professional")]
        tone: String,
        #[arg(long, default_value = "Medium")]
        length: String,
        /// Write the article JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Score an article JSON file against comma-separated keywords
    Evaluate {
        article: PathBuf,
        keywords: String,
        /// Primary keyword (defaults to the first keyword)
        #[arg(long)]
        primary: Option<String>,
        /// Also save the evaluation as a JSON report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Export an article JSON file to a CMS import CSV
    Export {
        article: PathBuf,
        keywords: String,
        output: PathBuf,
        #[arg(long)]
        category: Option<String>,
    },
    /// Run the steps of a pipeline command file
    Run {
        #[arg(default_value = "database/commands.json")]
        commands: PathBuf,
    },
    /// Serve the HTTP API
    Serve {
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Loads credentials and builds the model client.
pub fn connect(config: &Config) -> Result<Arc<dyn CompletionGateway>> {
    let credentials = Credentials::load(&config.env_path).context("Failed to load LLM credentials")?;
    let masked_key = mask_secret(&credentials.api_key, 4);
    let client = LlmClient::new(config, credentials)?;
    info!("LLM client initialized (model: {}, key: {masked_key})", client.model());
    Ok(Arc::new(client))
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Keywords { description, max } => {
            let gateway = connect(&config)?;
            let keywords = extract_keywords(gateway.as_ref(), &description, max).await?;
            for keyword in keywords {
                println!("{keyword}");
            }
        }

        Commands::Generate {
            keywords,
            context,
            tone,
            length,
            out,
        } => {
            let gateway = connect(&config)?;
            let request = GenerationRequest {
                keywords: KeywordSet::parse_list(&keywords).keywords().to_vec(),
                description: None,
                topic_context: context,
                tone,
                length,
            };
            let article = generate_article(gateway.as_ref(), &request).await?;
            match out {
                Some(path) => {
                    let written = write_json(&path, &article)?;
                    println!("Saved article to {}", written.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&article)?),
            }
        }

        Commands::Evaluate {
            article,
            keywords,
            primary,
            report,
        } => {
            let article = Article::from_json_file(&article)?;
            let keywords = KeywordSet::parse_list(&keywords).with_primary(primary.as_deref());
            let evaluation = evaluate_keyword_set(&article, &keywords)?;

            print!("{}", render_text_report(&evaluation));
            if let Some(path) = report {
                let written = write_evaluation_report(&path, &evaluation, keywords.keywords())?;
                println!("Saved evaluation report to {}", written.display());
            }
        }

        Commands::Export {
            article,
            keywords,
            output,
            category,
        } => {
            let article = Article::from_json_file(&article)?;
            let keywords = KeywordSet::parse_list(&keywords);
            let written = export_article_csv(&article, &keywords, &output, category.as_deref())?;
            println!("Exported CSV to {}", written.display());
        }

        Commands::Run { commands } => run_commands(&commands, &config).await?,

        Commands::Serve { port } => serve(config, port).await?,
    }
    Ok(())
}

async fn run_commands(commands: &Path, config: &Config) -> Result<()> {
    let connect_gateway = || connect(config);
    let summary = run_pipeline(commands, &connect_gateway).await?;

    println!("Completed {} pipeline steps.", summary.steps_run);
    if let Some(score) = summary.total_score {
        println!("  SEO score: {score}/100");
    }
    for (label, path) in [
        ("CSV output", &summary.csv_path),
        ("Content JSON", &summary.content_path),
        ("Evaluation report", &summary.report_path),
    ] {
        if let Some(path) = path {
            println!("  {label}: {}", path.display());
        }
    }
    Ok(())
}

async fn serve(config: Config, port: Option<u16>) -> Result<()> {
    // Scoring and export do not need the model, so missing credentials are
    // not fatal here.
    let llm = match connect(&config) {
        Ok(gateway) => Some(gateway),
        Err(e) => {
            warn!("Generation endpoints disabled: {e:#}");
            None
        }
    };

    let port = port.unwrap_or(config.port);
    let state = AppState { llm, config };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate_with_options() {
        let cli = Cli::try_parse_from([
            "seo",
            "evaluate",
            "content.json",
            "rust, web",
            "--primary",
            "web",
            "--report",
            "out/report.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Evaluate {
                article,
                keywords,
                primary,
                report,
            } => {
                assert_eq!(article, PathBuf::from("content.json"));
                assert_eq!(keywords, "rust, web");
                assert_eq!(primary.as_deref(), Some("web"));
                assert_eq!(report, Some(PathBuf::from("out/report.json")));
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_run_defaults_commands_path() {
        let cli = Cli::try_parse_from(["seo", "run"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run { commands } if commands == Path::new("database/commands.json")
        ));
    }

    #[test]
    fn test_keywords_default_max() {
        let cli = Cli::try_parse_from(["seo", "keywords", "A bakery"]).unwrap();
        assert!(matches!(cli.command, Commands::Keywords { max: 12, .. }));
    }
}
