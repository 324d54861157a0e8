use clap::{Parser, ValueEnum};
use galley::{LineNumberConfig, PipelineBuilder, PipelineConfig, PipelineError, TypesetterConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Tagged JSON export of the document.
    Json,
    /// Positioned rows of text, one block per page.
    Outline,
}

/// Typesets plain text or an exported item list into pages.
#[derive(Parser, Debug)]
#[command(version, about = "Greedy box/glue/penalty typesetter")]
struct Args {
    /// Input file: plain text with blank-line separated paragraphs, or a `.json` item list.
    input: PathBuf,

    /// JSON pipeline configuration (typesetter, text and lineNumbers sections).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Outline)]
    format: OutputFormat,

    /// Page width when no configuration file is given.
    #[arg(long, default_value_t = 595.0)]
    page_width: f32,

    /// Page height when no configuration file is given.
    #[arg(long, default_value_t = 842.0)]
    page_height: f32,

    /// Number every fifth line, unless the configuration sets line numbering up.
    #[arg(short = 'n', long)]
    line_numbers: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PipelineError> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::new(TypesetterConfig::new(args.page_width, args.page_height)),
    };
    if args.line_numbers && config.line_numbers.is_none() {
        config.line_numbers = Some(LineNumberConfig::default());
    }

    let pipeline = PipelineBuilder::new().with_config(config).build()?;
    log::info!("Typesetting {}", args.input.display());
    let document = pipeline.typeset_file(&args.input)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = match args.format {
        OutputFormat::Json => pipeline.export(&document, writer)?,
        OutputFormat::Outline => pipeline.render_outline(&document, writer)?,
    };
    writer.flush()?;
    Ok(())
}
