//! pdfbook CLI - extract PDF pages into a book and import it

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfbook::extract::{DEFAULT_IMAGE_DIR, DEFAULT_TEXT_FILE};
use pdfbook::{
    render, Book, ExtractOptions, Extractor, ImportEvent, ImportProgress, Importer, JsonFormat,
    SimulatedImporter,
};

#[derive(Parser)]
#[command(name = "pdfbook")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF pages and images into a book and import it", long_about = None)]
struct Cli {
    /// Input PDF file (extract and import with default settings)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a PDF and run the simulated import
    Import {
        #[command(flatten)]
        extract: ExtractArgs,

        /// Book title (defaults to the file name without .pdf)
        #[arg(long)]
        title: Option<String>,

        /// External company id the book belongs to
        #[arg(long, env = "PDFBOOK_COMPANY_ID")]
        company_id: Option<String>,
    },

    /// Extract page text and images without importing
    Extract {
        #[command(flatten)]
        extract: ExtractArgs,

        /// Write a JSON manifest of the extracted book
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Args)]
struct ExtractArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Directory for extracted images
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_IMAGE_DIR)]
    output: PathBuf,

    /// Also write all page text to a flat file
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_TEXT_FILE)]
    text_file: Option<PathBuf>,

    /// Number images from 1 instead of 0 in file names
    #[arg(long)]
    one_based: bool,

    /// Keep going past unreadable text and undecodable images
    #[arg(long)]
    lenient: bool,
}

impl ExtractArgs {
    fn options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new().with_output_dir(&self.output);
        if let Some(ref path) = self.text_file {
            options = options.with_text_dump(path);
        }
        if self.one_based {
            options = options.one_based_images();
        }
        if self.lenient {
            options = options.lenient();
        }
        options
    }
}

/// Prints import progress above a progress bar.
///
/// Lines go to `out` whether or not the bar is drawn; the bar is hidden when
/// stderr is not a terminal.
struct ConsoleProgress<W: Write = io::Stdout> {
    bar: ProgressBar,
    out: W,
}

impl ConsoleProgress {
    fn new(book: &Book) -> Self {
        let bar = ProgressBar::new((book.texts.len() + book.figures.len()) as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self::with_output(bar, io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    fn with_output(bar: ProgressBar, out: W) -> Self {
        Self { bar, out }
    }

    fn line(&mut self, line: String) {
        let out = &mut self.out;
        self.bar.suspend(|| {
            if let Err(e) = writeln!(out, "{}", line) {
                log::warn!("Failed to print progress: {}", e);
            }
        });
    }
}

impl<W: Write> ImportProgress for ConsoleProgress<W> {
    fn report(&mut self, event: ImportEvent) {
        match event {
            ImportEvent::Started { .. } => {
                self.line(format!("{}", event.to_string().cyan().bold()));
            }
            ImportEvent::Text { page, ref text } => {
                self.bar.set_message(format!("page {}", page + 1));
                self.line(format!("{} {}:\n{}", "Text from page".green(), page + 1, text));
                self.bar.inc(1);
            }
            ImportEvent::Image { ref path, .. } => {
                self.bar.set_message("images");
                self.line(format!("{} {}", "Image saved:".green(), path.display()));
                self.bar.inc(1);
            }
            ImportEvent::Finished { .. } => {
                self.bar.finish_with_message("Done!");
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Import {
            extract,
            title,
            company_id,
        }) => cmd_import(&extract, title, company_id),
        Some(Commands::Extract { extract, json }) => cmd_extract(&extract, json.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => {
            if let Some(input) = cli.input {
                let args = ExtractArgs {
                    input,
                    output: PathBuf::from(DEFAULT_IMAGE_DIR),
                    text_file: None,
                    one_based: false,
                    lenient: false,
                };
                cmd_import(&args, None, None)
            } else {
                println!("{}", "Usage: pdfbook <FILE>".yellow());
                println!("       pdfbook --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn extract_book(args: &ExtractArgs, options: ExtractOptions) -> pdfbook::Result<Book> {
    let extractor = Extractor::open_with_options(&args.input, options)?;
    let book = extractor.extract()?;

    for figure in &book.figures {
        println!("{} {}", "Uploaded image:".green(), figure.path.display());
    }
    if let Some(ref path) = args.text_file {
        println!("{} {}", "Saved text to".green(), path.display());
    }

    Ok(book)
}

fn cmd_import(
    args: &ExtractArgs,
    title: Option<String>,
    company_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = args.options();
    if let Some(title) = title {
        options = options.with_title(title);
    }
    if let Some(company_id) = company_id {
        options = options.with_external_company_id(company_id);
    }

    let mut book = extract_book(args, options)?;

    let importer = SimulatedImporter::new();
    log::debug!("Importing with the {} importer", importer.name());
    let mut progress = ConsoleProgress::new(&book);
    let id = importer.import(&mut book, &mut progress)?;

    println!("\n{} {}", "Document id:".green().bold(), id);
    Ok(())
}

fn cmd_extract(args: &ExtractArgs, json: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let book = extract_book(args, args.options())?;

    if let Some(path) = json {
        render::write_json(&book, path, JsonFormat::Pretty)?;
        println!("{} {}", "Saved manifest to".green(), path.display());
    }

    println!(
        "\n{} {} pages, {} images",
        "Done!".green().bold(),
        book.page_count(),
        book.figures.len()
    );
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = Extractor::open(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), extractor.version());
    println!("{}: {}", "Pages".bold(), extractor.page_count());
    println!("{}: {}", "Title".bold(), extractor.title());
    if let Some(created) = extractor.created() {
        println!("{}: {}", "Created".bold(), created);
    }

    Ok(())
}
