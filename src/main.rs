// attendance-extract - turn a downloaded attendance PDF into data.json
use anyhow::{Context, Result};
use attendance_extract::{pipeline, Config};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract a student attendance report PDF to JSON")]
struct Args {
    /// PDF to parse; defaults to the newest PDF in the downloads directory
    pdf_file: Option<PathBuf>,
    /// TOML config file (default: ./attendance.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory searched for the newest PDF
    #[arg(short, long)]
    downloads: Option<PathBuf>,
    /// Where to write the JSON artifact
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// OCR.space API key
    #[arg(long)]
    api_key: Option<String>,
    /// OCR request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Also print the JSON to stdout
    #[arg(long)]
    print: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.downloads {
            config.download_dir = dir.clone();
        }
        if let Some(out) = &self.output {
            config.output_path = out.clone();
        }
        if let Some(key) = &self.api_key {
            config.ocr_api_key = key.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    args.apply(&mut config);

    let report = match &args.pdf_file {
        Some(pdf) => pipeline::run_file(&config, pdf)
            .await
            .with_context(|| format!("processing {}", pdf.display()))?,
        None => pipeline::run_latest(&config)
            .await
            .context("processing latest download")?,
    };

    info!(
        "{}: {} rows, overall {:?}",
        report.source_file(),
        report.rows().len(),
        report.overall_attendance_percent()
    );

    if args.print {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
