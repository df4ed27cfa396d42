use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use godoc_index::config::AppConfig;
use godoc_index::docgen::{importables, DocGenerator};
use godoc_index::hosting::{load_repositories, ClientPool, ManifestClient};
use godoc_index::output::JsonSink;

#[derive(Parser)]
#[command(name = "godoc-index")]
#[command(about = "Versioned Go package documentation generator")]
struct Cli {
    /// Repository manifest listing each repository's tags and branches.
    #[arg(long, env, default_value = "repositories.json")]
    manifest: PathBuf,

    /// Directory holding `<base-import>/<package>.<tag>` checkouts.
    #[arg(long, env, default_value = ".")]
    source_root: PathBuf,

    #[arg(long, env, default_value_os_t = default_out_dir())]
    out_dir: PathBuf,

    #[arg(long, env, default_value = "azul3d.org")]
    base_import: String,

    #[arg(long, env, default_value = "https://github.com/azul3d")]
    view_url_base: String,

    /// Repositories that never hold importable packages.
    #[arg(long, env, value_delimiter = ',', default_value = "azul3d.github.io,issues")]
    ignore: Vec<String>,

    /// Concurrent host clients.
    #[arg(long, env, default_value = "16")]
    pool_size: usize,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Only write the package index.
    #[arg(long)]
    skip_docs: bool,
}

fn default_out_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("godoc-index")
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        AppConfig {
            manifest: cli.manifest,
            source_root: cli.source_root,
            out_dir: cli.out_dir,
            base_import: cli.base_import,
            view_url_base: cli.view_url_base,
            ignored_repos: cli.ignore,
            pool_size: cli.pool_size,
            log_level: cli.log_level,
            skip_docs: cli.skip_docs,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(AppConfig::from(cli));
    if config.pool_size == 0 {
        anyhow::bail!("--pool-size must be at least 1");
    }

    let client = ManifestClient::from_path(&config.manifest)?;
    let pool = ClientPool::new(vec![client; config.pool_size]);

    let repos = tokio::select! {
        res = load_repositories(&pool, &config) => res?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted while fetching repositories");
            return Ok(());
        }
    };

    let importables = importables(&repos);
    tracing::info!(
        repositories = repos.len(),
        packages = importables.len(),
        "Resolved importable packages"
    );

    let generator = DocGenerator::new(config.clone());
    let sink = JsonSink::new(config.out_dir.clone());

    let report = tokio::task::spawn_blocking(move || generator.run(&importables, &sink)).await??;

    for failure in &report.failures {
        tracing::warn!(import_path = %failure.import_path, error = %failure.error, "Not documented");
    }
    tracing::info!(
        generated = report.generated,
        failed = report.failed(),
        out_dir = %config.out_dir.display(),
        "Done"
    );
    Ok(())
}
