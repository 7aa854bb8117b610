//! textgrab CLI - print PDF page text or OCR output

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use textgrab::{
    ExtractedText, OcrEngine, OcrExtractor, PdfBackend, PdfTextExtractor, TesseractConfig,
    TesseractEngine,
};

#[derive(Parser)]
#[command(name = "textgrab")]
#[command(version)]
#[command(about = "Print the text of a PDF page, or OCR text from an image", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text layer of one PDF page
    Pdf {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number, 1-based
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Collapse whitespace and apply Unicode NFC before printing
        #[arg(long)]
        normalize: bool,
    },

    /// Print text recognized in an image by Tesseract
    Ocr {
        /// Input image file (PNG, JPEG, BMP, ...)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Tesseract executable
        #[arg(long, value_name = "PATH", env = "TESSERACT_CMD")]
        tesseract: Option<PathBuf>,

        /// Recognition language
        #[arg(short, long, env = "TESSERACT_LANG", default_value = "eng")]
        lang: String,

        /// Page segmentation mode
        #[arg(long, env = "TESSERACT_PSM")]
        psm: Option<u8>,

        /// Collapse whitespace and apply Unicode NFC before printing
        #[arg(long)]
        normalize: bool,
    },

    /// Show PDF document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pdf {
            input,
            page,
            normalize,
        } => cmd_pdf(&input, page, normalize),
        Commands::Ocr {
            input,
            tesseract,
            lang,
            psm,
            normalize,
        } => cmd_ocr(&input, tesseract_config(tesseract, lang, psm), normalize),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn tesseract_config(command: Option<PathBuf>, lang: String, psm: Option<u8>) -> TesseractConfig {
    let mut config = TesseractConfig::new().with_language(lang);
    if let Some(command) = command {
        config = config.with_command(command);
    }
    if let Some(psm) = psm {
        config = config.with_psm(psm);
    }
    config
}

fn print_text(text: ExtractedText, normalize: bool) {
    if normalize {
        println!("{}", text.normalized());
    } else {
        println!("{}", text);
    }
}

fn cmd_pdf(input: &Path, page: u32, normalize: bool) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = PdfTextExtractor::new().with_page(page as usize - 1);
    let text = extractor.extract(input)?;
    print_text(text, normalize);
    Ok(())
}

fn cmd_ocr(
    input: &Path,
    config: TesseractConfig,
    normalize: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve and probe the engine before touching the image.
    let engine = TesseractEngine::new(config)?;
    let version = engine.version()?;
    log::info!("Using {} ({})", engine.name(), version);

    let text = OcrExtractor::new(engine).extract(input)?;
    print_text(text, normalize);
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let backend = textgrab::LopdfBackend::load_file(input)?;
    let info = backend.info();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), info.version);
    println!("{}: {}", "Pages".bold(), info.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if info.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = info.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref producer) = info.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "textgrab".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF page text and image OCR extraction");
    println!("License: MIT");
}
