use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use spdlog::{info, warn};

use folio::article_collection::ArticleCollection;
use folio::filter::CategorySelection;
use folio::logger::configure_logger;
use folio::query_string::ListingQuery;
use folio::server::server_run;
use folio::view::article_view::ArticleRenderer;
use folio::view::list_view::ListRenderer;

use crate::config::open_config;
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Content directory. Skips the configuration file and uses defaults
    #[arg(long)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample configuration file
    Init {
        #[arg(short, long, default_value = CFG_FILE_NAME)]
        out: PathBuf,
    },

    #[command(flatten)]
    Content(ContentCommand),
}

/// Commands that work on a loaded article collection.
#[derive(Subcommand, Debug)]
enum ContentCommand {
    /// Serve the article index as JSON over HTTP
    Serve,
    /// List articles, newest first
    List {
        /// Free text matched against titles and descriptions
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only articles in this category ("all" for every category)
        #[arg(short = 'g', long)]
        category: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one article with its previous and next links
    Show {
        slug: String,
    },
    /// Categories with their article counts
    Categories,
    /// Every slug, newest first
    Slugs,
    /// Load all articles and report problems
    Check,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: ContentCommand, config_path: Option<PathBuf>, content_dir: Option<PathBuf>) -> Result<()> {
    let config = open_config(config_path, content_dir)?;
    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let collection = ArticleCollection::load(&config.content_source())?;

    match command {
        ContentCommand::Serve => {
            info!("Starting Folio =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            server_run(config, collection).await?;
        }
        ContentCommand::List { query, category, page } => {
            let query = ListingQuery {
                search: query,
                category: CategorySelection::from_param(category.as_deref()),
                page,
            };
            print_json(&ListRenderer::new(config.page_size()).render(&collection, &query))?;
        }
        ContentCommand::Show { slug } => {
            print_json(&ArticleRenderer::render(&collection, &slug)?)?;
        }
        ContentCommand::Categories => print_json(&collection.categories())?,
        ContentCommand::Slugs => print_json(&collection.slugs())?,
        ContentCommand::Check => {
            println!("{} articles in {} categories, no problems found",
                     collection.len(), collection.categories().len());
        }
    }

    Ok(())
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Init { out } => {
            write_sample_cfg(&out)?;
            println!("Sample configuration written to {}", out.display());
            Ok(())
        }
        Command::Content(command) => run(command, args.config_path, args.content_dir).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_init_does_not_need_content() {
        let args = Args::try_parse_from(["folio", "init", "--out", "sample.toml"]).unwrap();
        assert!(matches!(args.command, Command::Init { ref out } if out == &PathBuf::from("sample.toml")));

        let args = Args::try_parse_from(["folio", "init"]).unwrap();
        assert!(matches!(args.command, Command::Init { ref out } if out == &PathBuf::from(CFG_FILE_NAME)));
    }

    #[test]
    fn test_content_commands() {
        let args = Args::try_parse_from(["folio", "--content-dir", "posts", "list", "-g", "tech", "-p", "2"]).unwrap();
        assert_eq!(args.content_dir, Some(PathBuf::from("posts")));
        match args.command {
            Command::Content(ContentCommand::List { query, category, page }) => {
                assert_eq!(query, "");
                assert_eq!(category.as_deref(), Some("tech"));
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let args = Args::try_parse_from(["folio", "show", "hello-world"]).unwrap();
        assert!(matches!(args.command, Command::Content(ContentCommand::Show { ref slug }) if slug == "hello-world"));
    }
}
