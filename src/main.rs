use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use clausewise::{
    ColorDepth, Config, ExportFormat, FileType, ModelConfig, ModelSource,
    analysis::{self, AnalysisResult},
    ansi::{AnsiOptions, export_to_ansi_with_options},
    export::{export_entities_to_csv, export_to_json, export_to_text},
    extract,
};

#[derive(Parser)]
#[command(name = "clausewise")]
#[command(about = "Analyze legal documents: clauses, plain-language rewrites, entities and document type")]
#[command(version)]
struct Cli {
    /// Input file (.pdf, .docx or .txt)
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Treat the input as this type instead of using its extension
    #[arg(long = "type", value_enum)]
    file_type: Option<FileType>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Entity recognizer model file (JSON)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Directory for cached model copies
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Color depth for ANSI output
    #[arg(long, value_enum)]
    color_depth: Option<ColorDepth>,

    /// Report width in columns
    #[arg(long)]
    width: Option<usize>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.init_config {
        let path = Config::init_default()?;
        match path {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => println!("No config directory available on this platform"),
        }
        return Ok(());
    }

    let config = Config::load()?;
    let Some(file) = cli.file.as_deref() else {
        return Err(anyhow!("no input file given"));
    };

    let text = match cli.file_type {
        Some(file_type) => extract::extract_text(file, file_type).await,
        None => extract::extract_file(file).await,
    }
    .map_err(|e| anyhow!("Could not extract text from the document: {e}"))?;

    let model_config = model_config(&cli, config.model.clone());
    let analyzer = analysis::init(&model_config)
        .map_err(|e| anyhow!("An error occurred during analysis: {e}"))?;
    let result = analyzer.analyze(&text);

    let format = cli.format.unwrap_or(config.output.format);
    let width = cli
        .width
        .or(config.output.width)
        .unwrap_or_else(|| AnsiOptions::default().terminal_width);
    let color_depth = cli.color_depth.unwrap_or(config.output.color_depth);

    let Some(rendered) = render(&result, format, width, color_depth)? else {
        eprintln!("No entities found; nothing to export");
        return Ok(());
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote analysis");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("clausewise={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Command-line flags override the config file
fn model_config(cli: &Cli, mut model: ModelConfig) -> ModelConfig {
    if let Some(path) = &cli.model {
        model.source = ModelSource::File(path.clone());
    }
    if let Some(dir) = &cli.cache_dir {
        model.cache_path = Some(dir.clone());
    }
    model
}

fn render(
    result: &AnalysisResult,
    format: ExportFormat,
    width: usize,
    color_depth: ColorDepth,
) -> Result<Option<String>> {
    let rendered = match format {
        ExportFormat::Json => {
            let mut json = export_to_json(result)?;
            json.push('\n');
            json
        }
        ExportFormat::Csv => match export_entities_to_csv(result) {
            Some(csv) => csv,
            None => return Ok(None),
        },
        ExportFormat::Text => export_to_text(result, width)?,
        ExportFormat::Ansi => {
            let options = AnsiOptions {
                terminal_width: width,
                color_depth,
            };
            export_to_ansi_with_options(result, &options)?
        }
    };
    Ok(Some(rendered))
}
