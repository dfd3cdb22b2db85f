use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use resume_builder::paginate::PageGeometry;
use resume_builder::theme::{FontChoice, FontSize, Palette};
use resume_builder::{ExportSettings, ExportedDocument, Exporter, ResumeRecord, Session, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds resume PDFs from the command line.
///
/// Fonts are looked up under `assets/fonts` next to the binary or in the
/// library crate, or in the directory named by `RESUME_BUILDER_FONTS_DIR`.
/// Use `--draft` to export without any font files.
#[derive(Parser)]
#[command(author, version, about = "Resume builder with PDF export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a resume to `<full name>.pdf`.
    ///
    /// The name is used verbatim, so separators in it (`Jane/Doe`) become
    /// subdirectories of the output directory.
    Export(ExportArgs),

    /// Print the bundled sample resume as JSON.
    Sample,

    /// List the available palettes, fonts and sizes.
    Themes,
}

#[derive(Args)]
struct ExportArgs {
    /// Resume JSON file; the bundled sample is used when omitted.
    #[arg(long, short, conflicts_with = "empty")]
    input: Option<PathBuf>,

    /// Export an empty resume.
    #[arg(long)]
    empty: bool,

    #[arg(long, default_value_t = Palette::default())]
    palette: Palette,

    #[arg(long, default_value_t = FontChoice::default())]
    font: FontChoice,

    #[arg(long, default_value_t = FontSize::default())]
    size: FontSize,

    #[arg(long, value_enum, default_value_t = PageArg::A4)]
    page: PageArg,

    /// Device pixels per CSS pixel.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    oversample: u32,

    /// Render text as placeholder bars instead of loading fonts.
    #[arg(long)]
    draft: bool,

    /// Directory the PDF is written to.
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageArg {
    A4,
    Letter,
}

impl From<PageArg> for PageGeometry {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::A4 => PageGeometry::A4,
            PageArg::Letter => PageGeometry::LETTER,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export(args) => export(args),
        Commands::Sample => print_sample(),
        Commands::Themes => {
            print_themes();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn export(args: ExportArgs) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new();
    if args.empty {
        session.clear();
    } else if let Some(path) = &args.input {
        let json = fs::read_to_string(path)?;
        let record: ResumeRecord = serde_json::from_str(&json)?;
        session.replace(record);
    }
    session.set_theme(Theme::new(args.palette, args.font, args.size));

    let settings = ExportSettings::default()
        .with_page(args.page.into())
        .with_oversample(args.oversample)
        .with_draft(args.draft);
    let mut exporter = Exporter::new(settings);

    let document = session.export(&mut exporter).map_err(|err| {
        if let Some(message) = err.user_message() {
            eprintln!("{message}");
        }
        err
    })?;

    let path = write_document(&args.out_dir, &document)?;
    info!(
        "Wrote {} ({} pages)",
        path.display(),
        document.page_count
    );
    Ok(())
}

/// Writes `document` under `out_dir`, creating any directories its name implies.
fn write_document(out_dir: &Path, document: &ExportedDocument) -> io::Result<PathBuf> {
    let path = out_dir.join(&document.file_name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &document.bytes)?;
    Ok(path)
}

fn print_sample() -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(&ResumeRecord::sample())?);
    Ok(())
}

fn print_themes() {
    println!("Palettes:");
    for palette in Palette::ALL {
        println!("  {:<14}{}", palette.key(), palette.name());
    }
    println!("Fonts:");
    for font in FontChoice::ALL {
        println!("  {:<14}{}", font.key(), font.name());
    }
    println!("Sizes:");
    for size in FontSize::ALL {
        println!("  {:<14}{} px", size.key(), size.base_px());
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_with_separators_land_in_subdirectories() {
        let out_dir = std::env::temp_dir().join(format!("resume-builder-out-{}", std::process::id()));
        let document = ExportedDocument {
            file_name: "Jane/Doe.pdf".to_owned(),
            bytes: b"%PDF-1.3".to_vec(),
            page_count: 1,
        };

        let path = write_document(&out_dir, &document).expect("write nested document");
        assert_eq!(path, out_dir.join("Jane").join("Doe.pdf"));
        assert_eq!(fs::read(&path).expect("read back"), document.bytes);

        fs::remove_dir_all(&out_dir).expect("clean up");
    }
}
