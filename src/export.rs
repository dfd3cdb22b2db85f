//! The export pipeline: layout, rasterize, paginate, compose.

use std::collections::hash_map::{Entry as MapEntry, HashMap};
use std::fmt;
use std::thread;
use std::time::Duration;

use image::imageops;
use image::RgbImage;
use log::{debug, info};

use crate::compose::{Composer, PdfComposer};
use crate::fonts::{FontError, FontSet, GreekedFace, Typeface};
use crate::layout::{layout_preview, SURFACE_WIDTH};
use crate::model::{ContactInfo, ResumeRecord, SAMPLE_FULL_NAME};
use crate::paginate::{plan_pages, PageGeometry, PagePlan};
use crate::raster::{Rasterizer, SurfaceRasterizer};
use crate::theme::{FontChoice, Theme};

/// Message shown to users whenever an export fails, whatever the cause.
pub const EXPORT_FAILURE_MESSAGE: &str = "Error generating PDF. Please try again.";

/// Errors raised by an export.
#[derive(Debug)]
pub enum ExportError {
    /// Another export is already running.
    Busy,
    /// The rendering facilities (typefaces) could not be initialised.
    Facilities(FontError),
    /// The surface has no area to render.
    EmptySurface,
    /// Rasterization failed.
    Render(String),
    /// Document composition or serialization failed.
    Compose(String),
}

impl ExportError {
    /// The alert text surfaced to users.
    ///
    /// `None` for [`ExportError::Busy`]: a trigger during a running export is
    /// ignored without an alert.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Busy => None,
            _ => Some(EXPORT_FAILURE_MESSAGE),
        }
    }
}

impl From<FontError> for ExportError {
    fn from(err: FontError) -> Self {
        Self::Facilities(err)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "An export is already in progress"),
            Self::Facilities(_) => write!(f, "Failed to initialise rendering facilities"),
            Self::EmptySurface => write!(f, "The preview surface is empty"),
            Self::Render(reason) => write!(f, "Failed to rasterize the preview: {reason}"),
            Self::Compose(reason) => write!(f, "Failed to compose the PDF: {reason}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Facilities(err) => Some(err),
            Self::Busy | Self::EmptySurface | Self::Render(_) | Self::Compose(_) => None,
        }
    }
}

/// A finished export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Tunables of the export pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSettings {
    pub page: PageGeometry,
    /// Device pixels per CSS pixel.
    pub oversample: u32,
    /// Surface width in CSS pixels.
    pub surface_width: u32,
    /// Pause between layout and rasterization.
    ///
    /// The browser-based builder waited a fixed 500 ms for the DOM to settle;
    /// layout here is synchronous, so the default is zero.
    pub settle_delay: Duration,
    /// Render with [`GreekedFace`] instead of loading fonts.
    pub draft: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            page: PageGeometry::A4,
            oversample: 2,
            surface_width: SURFACE_WIDTH,
            settle_delay: Duration::ZERO,
            draft: false,
        }
    }
}

impl ExportSettings {
    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    pub fn with_oversample(mut self, oversample: u32) -> Self {
        self.oversample = oversample;
        self
    }

    pub fn with_surface_width(mut self, width: u32) -> Self {
        self.surface_width = width;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }
}

/// `<full name>.pdf`, falling back to the sample name when the name is empty.
pub fn export_file_name(contact: &ContactInfo) -> String {
    let stem = if contact.full_name.is_empty() {
        SAMPLE_FULL_NAME
    } else {
        contact.full_name.as_str()
    };
    format!("{stem}.pdf")
}

/// Places the bands of `plan` on consecutive pages of `composer`.
///
/// The first band goes on the composer's initial page.
pub fn write_pages<C: Composer>(
    composer: &mut C,
    bitmap: &RgbImage,
    plan: &PagePlan,
    page: PageGeometry,
) -> Result<usize, ExportError> {
    if plan.bands.len() == 1 && plan.bands[0].source_height == bitmap.height() {
        composer.add_image(bitmap, 0.0, 0.0, page.width_mm, plan.bands[0].content_height_mm)?;
        return Ok(1);
    }

    for (index, band) in plan.bands.iter().enumerate() {
        if index > 0 {
            composer.new_page()?;
        }
        let slice = imageops::crop_imm(bitmap, 0, band.source_y, bitmap.width(), band.source_height)
            .to_image();
        composer.add_image(&slice, 0.0, 0.0, page.width_mm, band.content_height_mm)?;
    }
    Ok(plan.bands.len())
}

fn load_face(choice: FontChoice, draft: bool) -> Result<Box<dyn Typeface>, ExportError> {
    if draft {
        debug!("Using greeked {} face for draft export", choice);
        return Ok(Box::new(GreekedFace::new(choice)));
    }
    Ok(Box::new(FontSet::load(choice)?))
}

/// Runs exports, caching typefaces between runs.
pub struct Exporter<R = SurfaceRasterizer> {
    settings: ExportSettings,
    rasterizer: R,
    faces: HashMap<FontChoice, Box<dyn Typeface>>,
}

impl Exporter<SurfaceRasterizer> {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_rasterizer(settings, SurfaceRasterizer)
    }
}

impl Default for Exporter<SurfaceRasterizer> {
    fn default() -> Self {
        Self::new(ExportSettings::default())
    }
}

impl<R: Rasterizer> Exporter<R> {
    pub fn with_rasterizer(settings: ExportSettings, rasterizer: R) -> Self {
        Self {
            settings,
            rasterizer,
            faces: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Whether the typeface for `choice` has been loaded already.
    pub fn is_initialized(&self, choice: FontChoice) -> bool {
        self.faces.contains_key(&choice)
    }

    /// Exports `record` to a PDF composed with [`PdfComposer`].
    pub fn export(
        &mut self,
        record: &ResumeRecord,
        theme: &Theme,
    ) -> Result<ExportedDocument, ExportError> {
        let file_name = export_file_name(record.contact());
        let stem = file_name.trim_end_matches(".pdf").to_owned();
        let composer = PdfComposer::new(&stem, self.settings.page);
        self.export_with(record, theme, composer)
    }

    /// Exports `record` through `composer`.
    pub fn export_with<C: Composer>(
        &mut self,
        record: &ResumeRecord,
        theme: &Theme,
        mut composer: C,
    ) -> Result<ExportedDocument, ExportError> {
        let draft = self.settings.draft;
        let face: &dyn Typeface = match self.faces.entry(theme.font) {
            MapEntry::Occupied(entry) => &**entry.into_mut(),
            MapEntry::Vacant(entry) => {
                info!("Initialising {} typeface", theme.font);
                &**entry.insert(load_face(theme.font, draft)?)
            }
        };

        let surface = layout_preview(record, theme, face, self.settings.surface_width as f32);
        if !self.settings.settle_delay.is_zero() {
            thread::sleep(self.settings.settle_delay);
        }

        let bitmap = self
            .rasterizer
            .rasterize(&surface, face, self.settings.oversample)?;
        let plan = plan_pages(
            bitmap.width(),
            bitmap.height(),
            self.settings.oversample,
            self.settings.page,
        )?;
        debug!(
            "Bitmap {}x{} px scales to {:.1} mm over {} page(s)",
            bitmap.width(),
            bitmap.height(),
            plan.scaled_height_mm,
            plan.page_count()
        );

        write_pages(&mut composer, &bitmap, &plan, self.settings.page)?;
        let document = composer.save(&export_file_name(record.contact()))?;
        info!(
            "Exported {} with {} page(s)",
            document.file_name, document.page_count
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::paginate::PageBand;

    #[derive(Default)]
    struct RecordingComposer {
        pages: usize,
        images: Vec<(usize, u32, u32, f64)>,
    }

    impl Composer for RecordingComposer {
        fn new_page(&mut self) -> Result<(), ExportError> {
            self.pages += 1;
            Ok(())
        }

        fn add_image(
            &mut self,
            image: &RgbImage,
            _x_mm: f64,
            _y_mm: f64,
            _width_mm: f64,
            height_mm: f64,
        ) -> Result<(), ExportError> {
            self.images
                .push((self.pages, image.width(), image.height(), height_mm));
            Ok(())
        }

        fn save(self, file_name: &str) -> Result<ExportedDocument, ExportError> {
            Ok(ExportedDocument {
                file_name: file_name.to_owned(),
                bytes: Vec::new(),
                page_count: self.pages + 1,
            })
        }
    }

    #[test]
    fn file_name_uses_the_name_verbatim() {
        let mut contact = ContactInfo::default();
        assert_eq!(export_file_name(&contact), "Amit Gupta.pdf");
        contact.full_name = "Jane  Doe/Smith".into();
        assert_eq!(export_file_name(&contact), "Jane  Doe/Smith.pdf");
    }

    #[test]
    fn every_failure_maps_to_the_generic_message() {
        for err in [
            ExportError::EmptySurface,
            ExportError::Render("boom".into()),
            ExportError::Compose("boom".into()),
        ] {
            assert_eq!(err.user_message(), Some(EXPORT_FAILURE_MESSAGE));
        }
    }

    #[test]
    fn busy_triggers_are_ignored_without_an_alert() {
        assert_eq!(ExportError::Busy.user_message(), None);
    }

    #[test]
    fn bands_land_on_consecutive_pages() {
        let bitmap = RgbImage::from_fn(4, 10, |_, y| Rgb([y as u8, 0, 0]));
        let plan = PagePlan {
            ratio: 1.0,
            scaled_height_mm: 5.0,
            bands: vec![
                PageBand {
                    source_y: 0,
                    source_height: 6,
                    content_height_mm: 3.0,
                },
                PageBand {
                    source_y: 6,
                    source_height: 4,
                    content_height_mm: 2.0,
                },
            ],
        };
        let mut composer = RecordingComposer::default();
        let pages = write_pages(&mut composer, &bitmap, &plan, PageGeometry::A4).expect("write");
        assert_eq!(pages, 2);
        assert_eq!(composer.images, [(0, 4, 6, 3.0), (1, 4, 4, 2.0)]);
    }

    #[test]
    fn draft_exports_initialise_facilities_once() {
        let mut exporter = Exporter::new(ExportSettings::default().with_draft(true));
        assert!(!exporter.is_initialized(FontChoice::Sans));

        let record = ResumeRecord::sample();
        let document = exporter
            .export_with(&record, &Theme::default(), RecordingComposer::default())
            .expect("draft export");
        assert!(exporter.is_initialized(FontChoice::Sans));
        assert!(!exporter.is_initialized(FontChoice::Mono));
        assert!(document.page_count > 1);
        assert_eq!(document.file_name, "Amit Gupta.pdf");

        // The second run reuses the cached face.
        let again = exporter
            .export_with(&record, &Theme::default(), RecordingComposer::default())
            .expect("cached draft export");
        assert_eq!(again, document);
    }
}
