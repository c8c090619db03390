//! investor-report CLI - render a report model JSON file to PDF

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use investor_report_pdf::{assemble, ReportConfig, ReportError, ReportModel, ReportResult};

#[derive(Parser)]
#[command(name = "investor-report")]
#[command(version)]
#[command(about = "Render an investability report model to PDF", long_about = None)]
struct Cli {
    /// Report model JSON
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output PDF; defaults to the suggested filename in the current directory
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report configuration JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Logo image (PNG or JPEG) for the cover
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> ReportResult<()> {
    let config = match &cli.config {
        Some(path) => ReportConfig::from_path(path)?,
        None => ReportConfig::default(),
    };

    let json = fs::read_to_string(&cli.input)?;
    let mut model = ReportModel::from_json_str(&json)?;
    if let Some(logo) = &cli.logo {
        model.logo = Some(fs::read(logo)?);
    }

    let report = assemble(&model, &config)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&report.filename));
    write_output(&output, &report.bytes)?;
    info!("PDF saved to: {}", output.display());
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> ReportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ReportError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create output directory {}: {}", parent.display(), e),
            ))
        })?;
    }
    fs::write(path, bytes)?;
    Ok(())
}
