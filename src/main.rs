use clap::{Parser, Subcommand};
use sadaqa_site::loader::ContentLoader;
use sadaqa_site::store::FsStore;
use sadaqa_site::{config, generate, index, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sadaqa-site")]
#[command(about = "Static site generator for a bilingual charity website")]
#[command(long_about = "\
Static site generator for a bilingual charity website

Content is a directory of JSON collections. Each document is one record;
index.json in each collection lists the ids to publish.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── works/
  │   ├── index.json               # [\"well-tidjikja\", ...]
  │   └── well-tidjikja.json       # titleAr, titleFr, images, date, featured
  ├── advertisements/
  │   └── winter-campaign.json     # shown only when active is true
  ├── announcements/
  │   └── general-assembly.json    # shown only when published is true
  └── pages/
      ├── home.json
      ├── about.json
      └── legal.json

Output is written per locale: dist/ar/ (right-to-left) and dist/fr/.

Run 'sadaqa-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log loading decisions at info level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite each collection's index.json from the documents on disk
    Index,
    /// Validate config and report what each collection would show
    Check,
    /// Produce the HTML site from the content directory
    Generate,
    /// Run the full pipeline: index → generate
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Index => {
            let summaries = index::write_manifests(&cli.source)?;
            output::print_index_output(&summaries);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let loader = ContentLoader::new(FsStore::new(&cli.source));
            let inventory = loader.inventory();
            output::print_check_output(&inventory, &cli.source);
            if inventory.dropped_count() == 0 {
                println!("==> Content is valid");
            } else {
                println!(
                    "==> {} item(s) will be skipped",
                    inventory.dropped_count()
                );
            }
        }
        Command::Generate => {
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Indexing {}", cli.source.display());
            let summaries = index::write_manifests(&cli.source)?;
            output::print_index_output(&summaries);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` enables INFO, otherwise `RUST_LOG`, otherwise WARN.
///
/// Skipped content is only reported through WARN events, so they must be on
/// by default.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
