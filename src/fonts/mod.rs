//! Text measurement and glyph painting for the preview renderer.
//!
//! Two [`Typeface`] implementations are provided.  [`FontSet`] loads TrueType
//! files from disk and rasterizes real glyphs through `rusttype`.
//! [`GreekedFace`] needs no font files: it measures every character with a
//! fixed em fraction and paints words as solid bars, which is enough for draft
//! exports and for checking pagination without fonts installed.
//!
//! Font directories are searched in this order:
//!
//! 1. `$RESUME_BUILDER_FONTS_DIR`
//! 2. `assets/fonts` next to the running executable
//! 3. `assets/fonts` inside this crate
//!
//! When the bundled files are missing the Windows font directory is tried as
//! a last resort (`$RESUME_BUILDER_WINDOWS_FONTS_DIR`, then `%WINDIR%\Fonts`).

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, warn};
use rusttype::{point, Font, Scale};

use crate::theme::{Color, FontChoice};

/// Measures and paints single lines of text.
///
/// Sizes and coordinates are in pixels of whatever surface the caller works
/// on; `y` arguments are baselines.
pub trait Typeface {
    /// Advance width of `text` at `px`.
    fn text_width(&self, text: &str, px: f32, bold: bool) -> f32;

    /// Distance from the baseline to the top of the tallest glyphs at `px`.
    fn ascent(&self, px: f32) -> f32;

    /// Distance from the baseline to the bottom of descenders at `px` (positive).
    fn descent(&self, px: f32) -> f32;

    /// Height from the bottom of descenders to the top of the tallest glyphs.
    fn line_height(&self, px: f32) -> f32 {
        self.ascent(px) + self.descent(px)
    }

    /// Paints `text` with its baseline starting at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    fn draw(
        &self,
        canvas: &mut RgbImage,
        x: f32,
        y: f32,
        text: &str,
        px: f32,
        bold: bool,
        color: Color,
    );
}

/// Errors raised while locating or parsing font files.
#[derive(Debug)]
pub enum FontError {
    /// No search location held the required files.
    NotFound {
        family: &'static str,
        /// One entry per location that was checked, with the reason it was rejected.
        attempts: Vec<String>,
    },
    /// A font file exists but could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A font file was read but does not contain a usable TrueType font.
    InvalidData { path: PathBuf },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { family, attempts } => {
                let summary = if attempts.is_empty() {
                    "no search paths were available".to_owned()
                } else {
                    attempts.join(", ")
                };
                write!(
                    f,
                    "Unable to locate font files for '{family}'. Checked: {summary}. \
                     See assets/fonts/README.md or set RESUME_BUILDER_FONTS_DIR."
                )
            }
            Self::Io { path, .. } => write!(f, "Failed to read font file {}", path.display()),
            Self::InvalidData { path } => {
                write!(f, "Font file {} is not a valid TrueType font", path.display())
            }
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } | Self::InvalidData { .. } => None,
        }
    }
}

impl FontError {
    fn is_missing(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ),
            Self::InvalidData { .. } => false,
        }
    }
}

struct FaceFiles {
    regular: &'static str,
    bold: &'static str,
}

fn bundled_files(choice: FontChoice) -> FaceFiles {
    match choice {
        FontChoice::Sans => FaceFiles {
            regular: "Roboto-Regular.ttf",
            bold: "Roboto-Bold.ttf",
        },
        FontChoice::Serif => FaceFiles {
            regular: "NotoSerif-Regular.ttf",
            bold: "NotoSerif-Bold.ttf",
        },
        FontChoice::Mono => FaceFiles {
            regular: "RobotoMono-Regular.ttf",
            bold: "RobotoMono-Bold.ttf",
        },
    }
}

fn windows_files(choice: FontChoice) -> FaceFiles {
    match choice {
        FontChoice::Sans => FaceFiles {
            regular: "arial.ttf",
            bold: "arialbd.ttf",
        },
        FontChoice::Serif => FaceFiles {
            regular: "times.ttf",
            bold: "timesbd.ttf",
        },
        FontChoice::Mono => FaceFiles {
            regular: "consola.ttf",
            bold: "consolab.ttf",
        },
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

/// Directory holding the fonts shipped with the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path("RESUME_BUILDER_FONTS_DIR") {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = bundled_fonts_source_dir();
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path("RESUME_BUILDER_WINDOWS_FONTS_DIR") {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn resolve_font_directory(choice: FontChoice) -> Result<PathBuf, FontError> {
    let files = bundled_files(choice);
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing: Vec<&str> = [files.regular, files.bold]
            .into_iter()
            .filter(|name| !candidate.join(name).is_file())
            .collect();
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(FontError::NotFound {
        family: choice.name(),
        attempts,
    })
}

fn load_font(path: &Path) -> Result<Font<'static>, FontError> {
    let bytes = fs::read(path).map_err(|source| FontError::Io {
        path: path.to_owned(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| FontError::InvalidData {
        path: path.to_owned(),
    })
}

/// Regular and bold faces of one family.
pub struct FontSet {
    choice: FontChoice,
    regular: Font<'static>,
    bold: Font<'static>,
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("choice", &self.choice)
            .finish_non_exhaustive()
    }
}

impl FontSet {
    /// Loads the regular and bold files for `choice` from `directory`.
    pub fn from_directory(choice: FontChoice, directory: &Path) -> Result<Self, FontError> {
        Self::from_files(choice, directory, &bundled_files(choice))
    }

    fn from_files(choice: FontChoice, directory: &Path, files: &FaceFiles) -> Result<Self, FontError> {
        Ok(Self {
            choice,
            regular: load_font(&directory.join(files.regular))?,
            bold: load_font(&directory.join(files.bold))?,
        })
    }

    fn load_bundled(choice: FontChoice) -> Result<Self, FontError> {
        let directory = resolve_font_directory(choice)?;
        debug!("loading {} fonts from {}", choice.name(), directory.display());
        Self::from_directory(choice, &directory)
    }

    fn load_windows(choice: FontChoice) -> Result<Self, FontError> {
        let directory = windows_font_directory().ok_or_else(|| FontError::NotFound {
            family: choice.name(),
            attempts: vec!["Windows font directory not found".to_owned()],
        })?;
        Self::from_files(choice, &directory, &windows_files(choice))
    }

    /// Loads the family for `choice`.
    ///
    /// Missing serif or mono files fall back to the sans family, and missing
    /// bundled files fall back to the Windows system fonts, each with a warning.
    pub fn load(choice: FontChoice) -> Result<Self, FontError> {
        let err = match Self::load_bundled(choice) {
            Ok(set) => return Ok(set),
            Err(err) if err.is_missing() => err,
            Err(err) => return Err(err),
        };

        match Self::load_windows(choice) {
            Ok(set) => {
                warn!(
                    "Bundled fonts unavailable ({}); falling back to Windows fonts for '{}'.",
                    err,
                    choice.name()
                );
                return Ok(set);
            }
            Err(fallback_err) => {
                debug!("Windows font fallback failed: {}", fallback_err);
            }
        }

        if choice != FontChoice::Sans {
            warn!(
                "Fonts for '{}' unavailable ({}); using '{}' instead.",
                choice.name(),
                err,
                FontChoice::Sans.name()
            );
            return Self::load(FontChoice::Sans);
        }

        Err(err)
    }

    /// Returns the family this set was loaded for.
    pub fn choice(&self) -> FontChoice {
        self.choice
    }

    fn face(&self, bold: bool) -> &Font<'static> {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}

/// Indicates whether the bundled files for `choice` can be found.
pub fn fonts_available(choice: FontChoice) -> bool {
    resolve_font_directory(choice).is_ok()
}

fn blend(canvas: &mut RgbImage, x: i64, y: i64, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let under = f32::from(pixel.0[channel]);
        let over = f32::from(color.0[channel]);
        pixel.0[channel] = (under + (over - under) * coverage).round() as u8;
    }
}

impl Typeface for FontSet {
    fn text_width(&self, text: &str, px: f32, bold: bool) -> f32 {
        let scale = Scale::uniform(px);
        self.face(bold)
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn ascent(&self, px: f32) -> f32 {
        self.regular.v_metrics(Scale::uniform(px)).ascent
    }

    fn descent(&self, px: f32) -> f32 {
        -self.regular.v_metrics(Scale::uniform(px)).descent
    }

    fn draw(
        &self,
        canvas: &mut RgbImage,
        x: f32,
        y: f32,
        text: &str,
        px: f32,
        bold: bool,
        color: Color,
    ) {
        let scale = Scale::uniform(px);
        for glyph in self.face(bold).layout(text, scale, point(x, y)) {
            if let Some(bounds) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    blend(
                        canvas,
                        i64::from(bounds.min.x) + i64::from(gx),
                        i64::from(bounds.min.y) + i64::from(gy),
                        color,
                        coverage,
                    );
                });
            }
        }
    }
}

/// Font-free typeface that approximates glyph widths with fixed em fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GreekedFace {
    advance_em: f32,
    bold_advance_em: f32,
}

impl GreekedFace {
    /// Creates a face whose proportions resemble `choice`.
    pub fn new(choice: FontChoice) -> Self {
        match choice {
            FontChoice::Mono => Self {
                advance_em: 0.6,
                bold_advance_em: 0.6,
            },
            FontChoice::Sans | FontChoice::Serif => Self {
                advance_em: 0.5,
                bold_advance_em: 0.55,
            },
        }
    }

    fn advance(&self, px: f32, bold: bool) -> f32 {
        px * if bold {
            self.bold_advance_em
        } else {
            self.advance_em
        }
    }
}

impl Default for GreekedFace {
    fn default() -> Self {
        Self::new(FontChoice::Sans)
    }
}

impl Typeface for GreekedFace {
    fn text_width(&self, text: &str, px: f32, bold: bool) -> f32 {
        text.chars().count() as f32 * self.advance(px, bold)
    }

    fn ascent(&self, px: f32) -> f32 {
        px * 0.8
    }

    fn descent(&self, px: f32) -> f32 {
        px * 0.2
    }

    fn draw(
        &self,
        canvas: &mut RgbImage,
        x: f32,
        y: f32,
        text: &str,
        px: f32,
        bold: bool,
        color: Color,
    ) {
        let advance = self.advance(px, bold);
        let top = (y - px * 0.5).round() as i64;
        let bottom = y.round() as i64;
        let mut cursor = x;
        for word in text.split(' ') {
            let width = word.chars().count() as f32 * advance;
            let left = cursor.round() as i64;
            let right = (cursor + width - advance * 0.15).round() as i64;
            for row in top..bottom {
                for column in left..right {
                    blend(canvas, column, row, color, 1.0);
                }
            }
            cursor += width + advance;
        }
    }
}
