//! # study-notes
//!
//! Extracts the text of a PDF, sends it to the notes gateway and prints the
//! reply as sanitized HTML study notes.
//!
//! ```bash
//! study-notes lecture.pdf --gateway-url http://127.0.0.1:3000 --out notes.html
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notes_client::extract::PdfExtractor;
use notes_client::flow::{FlowState, Session};
use notes_client::gateway::GatewayClient;

/// Turn a PDF into concise study notes using a locally running model.
#[derive(Parser)]
#[command(name = "study-notes", version)]
struct Cli {
    /// PDF file to summarize.
    file: PathBuf,

    /// Base URL of the notes gateway.
    #[arg(long, env = "STUDY_NOTES_GATEWAY_URL", default_value = "http://127.0.0.1:3000")]
    gateway_url: String,

    /// Write the notes to this file instead of stdout.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Emit the model's reply as-is instead of rendered HTML.
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let gateway = GatewayClient::new(&cli.gateway_url)?;
    info!(gateway_url = %cli.gateway_url, "gateway configured");

    let mut session = Session::new();
    session.select_file(&cli.file);

    match session.submit(&PdfExtractor, &gateway).await {
        FlowState::Rendered { summary, notes } => {
            let output = if cli.raw { summary.as_str() } else { notes.as_str() };
            write_output(cli.out.as_deref(), output)?;
            Ok(())
        }
        FlowState::Failed(err) => anyhow::bail!("{err}"),
        other => anyhow::bail!("submission ended in unexpected state: {other:?}"),
    }
}

fn write_output(out: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content)?;
            info!(path = %path.display(), "notes written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}")?;
        }
    }
    Ok(())
}
