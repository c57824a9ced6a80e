use std::path::PathBuf;

use clap::Parser;
use param_scan_cli::adapters::document_store::FileDocumentStore;
use param_scan_cli::handlers::plan::{
    build_document, handle_plan_file, load_plan, DEFAULT_DOCUMENT_NAME,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "param-scan",
    about = "Expand a parameter scan plan into a composite state document"
)]
struct Cli {
    /// Path to the JSON scan plan
    plan: PathBuf,

    /// Directory the document is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// File name of the written document
    #[arg(long, default_value = DEFAULT_DOCUMENT_NAME)]
    output_name: String,

    /// Reject any scan expanding to more combinations than this
    #[arg(long, env = "PARAM_SCAN_MAX_COMBINATIONS")]
    max_combinations: Option<usize>,

    /// Expand the plan and report counts without writing a document
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "param_scan_cli=info,param_scan_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    info!("Loading scan plan from: {}", cli.plan.display());

    if cli.dry_run {
        let outcome = build_document(load_plan(&cli.plan, cli.max_combinations)?)?;
        println!(
            "{} entries ({} scan instances), fingerprint {}",
            outcome.document.state.len(),
            outcome.scan_instances,
            outcome.fingerprint
        );
        return Ok(());
    }

    let store = FileDocumentStore::new(cli.output_dir.clone());
    handle_plan_file(&cli.plan, &cli.output_name, cli.max_combinations, &store)?;
    Ok(())
}
