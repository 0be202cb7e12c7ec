//! wordcrawl CLI
//!
//! Runs a crawl described by a TOML config file and writes the ranked words.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use wordcrawl::{
    error::Result,
    models::CrawlConfig,
    pipeline::WebCrawler,
    profiler::{ProfiledParser, Profiler},
    services::HtmlPageParser,
    storage::ResultWriter,
    utils::clock::{Clock, SystemClock},
};

/// wordcrawl - find the most popular words on a set of linked pages
#[derive(Parser, Debug)]
#[command(name = "wordcrawl", version, about = "Concurrent popular-word web crawler")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the configured start pages
    Crawl {
        /// Path to the crawl config (TOML)
        config: PathBuf,

        /// Write the JSON result here instead of `output.result_path`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append profiling data here instead of `output.profile_output_path`
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Validate a crawl config without crawling
    Validate {
        /// Path to the crawl config (TOML)
        config: PathBuf,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn load_config(path: &Path) -> Result<CrawlConfig> {
    let config = CrawlConfig::load(path)?;
    config.validate()?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Crawl {
            config,
            output,
            profile,
        } => {
            let config = load_config(&config)?;
            let request = config.to_request()?;

            let clock: Arc<dyn Clock> = Arc::new(SystemClock);
            let profiler = Arc::new(Profiler::new(Arc::clone(&clock)));
            let parser = ProfiledParser::new(
                HtmlPageParser::from_config(&config)?,
                Arc::clone(&profiler),
            );
            let crawler = WebCrawler::new(config.parallelism, Arc::new(parser), clock)?;
            log::info!("Worker pool ready with {} threads", crawler.max_parallelism());

            let result = profiler.profile("WebCrawler::crawl", || crawler.crawl(&request))?;

            let writer = ResultWriter::new(&result);
            let result_path =
                output.or_else(|| config.output.result_path.as_ref().map(PathBuf::from));
            match result_path {
                Some(path) => writer.write_path(&path)?,
                None => writer.write_to(&mut io::stdout().lock())?,
            }

            let profile_path = profile.or_else(|| {
                config
                    .output
                    .profile_output_path
                    .as_ref()
                    .map(PathBuf::from)
            });
            match profile_path {
                Some(path) => {
                    profiler.write_data(&path)?;
                    log::info!("Profile data appended to {}", path.display());
                }
                None => profiler.write_to(&mut io::stdout().lock())?,
            }

            log::info!(
                "Done: {} page(s) visited, {} popular word(s)",
                result.urls_visited(),
                result.word_counts().len()
            );
        }

        Command::Validate { config } => {
            log::info!("Validating configuration...");
            let config = load_config(&config)?;
            log::info!(
                "✓ Config OK ({} start page(s), {} ignored URL(s), {} ignored word(s))",
                config.start_pages.len(),
                config.ignored_urls.len(),
                config.ignored_words.len()
            );
        }
    }

    Ok(())
}
