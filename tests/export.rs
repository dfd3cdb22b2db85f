use std::cell::RefCell;
use std::rc::Rc;

use image::RgbImage;
use lopdf::Document;
use resume_builder::compose::{Composer, PdfComposer};
use resume_builder::export::{ExportError, ExportSettings, ExportedDocument, Exporter};
use resume_builder::fonts::{self, Typeface};
use resume_builder::layout::PreviewLayout;
use resume_builder::paginate::PageGeometry;
use resume_builder::raster::{Rasterizer, SurfaceRasterizer};
use resume_builder::session::{ExportFlag, Session};
use resume_builder::store::ContactField;
use resume_builder::theme::{FontChoice, Palette, Theme};
use sha2::{Digest, Sha256};

fn draft_exporter() -> Exporter {
    Exporter::new(ExportSettings::default().with_draft(true))
}

fn pdf_page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes)
        .expect("exported bytes parse as PDF")
        .get_pages()
        .len()
}

/// Replaces the content of every `open ... close` span with zeros, keeping delimiters.
fn zero_between(data: &mut [u8], open: &[u8], close: &[u8]) {
    let mut offset = 0;
    while let Some(start) = find(&data[offset..], open) {
        let begin = offset + start + open.len();
        let Some(length) = find(&data[begin..], close) else {
            break;
        };
        for byte in &mut data[begin..begin + length] {
            if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                *byte = b'0';
            }
        }
        offset = begin + length + close.len();
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Metadata spans that change between runs.
const VOLATILE: &[(&[u8], &[u8])] = &[
    (b"/CreationDate(", b")"),
    (b"/ModDate(", b")"),
    (b"/ID[", b"]"),
    (b"/Producer(", b")"),
    (b"<xmp:CreateDate>", b"</xmp:CreateDate>"),
    (b"<xmp:ModifyDate>", b"</xmp:ModifyDate>"),
    (b"<xmp:MetadataDate>", b"</xmp:MetadataDate>"),
    (b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>"),
    (b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>"),
    (b"<xmpMM:VersionID>", b"</xmpMM:VersionID>"),
];

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let mut normalized = bytes.to_vec();
    for (open, close) in VOLATILE {
        zero_between(&mut normalized, open, close);
    }
    Sha256::digest(&normalized).into()
}

/// Records the export flag seen at rasterization time, then delegates.
struct ObservingRasterizer<R> {
    flag: ExportFlag,
    seen: Rc<RefCell<Vec<bool>>>,
    inner: R,
}

impl<R: Rasterizer> Rasterizer for ObservingRasterizer<R> {
    fn rasterize(
        &mut self,
        surface: &PreviewLayout,
        face: &dyn Typeface,
        oversample: u32,
    ) -> Result<RgbImage, ExportError> {
        self.seen.borrow_mut().push(self.flag.is_set());
        self.inner.rasterize(surface, face, oversample)
    }
}

#[test]
fn sample_exports_to_multiple_a4_pages() {
    let mut session = Session::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut exporter = Exporter::with_rasterizer(
        ExportSettings::default().with_draft(true),
        ObservingRasterizer {
            flag: session.export_flag(),
            seen: Rc::clone(&seen),
            inner: SurfaceRasterizer,
        },
    );

    assert!(!session.is_exporting());
    let document = session.export(&mut exporter).expect("export sample");
    assert_eq!(*seen.borrow(), [true]);
    assert!(!session.is_exporting());

    assert_eq!(document.file_name, "Amit Gupta.pdf");
    assert!(document.page_count > 1);
    assert_eq!(pdf_page_count(&document.bytes), document.page_count);
}

#[test]
fn empty_record_fits_on_one_page_under_the_default_name() {
    let mut session = Session::new();
    session.clear();
    let document = session
        .export(&mut draft_exporter())
        .expect("export empty record");

    assert_eq!(document.file_name, "Amit Gupta.pdf");
    assert_eq!(document.page_count, 1);
    assert_eq!(pdf_page_count(&document.bytes), 1);
}

#[test]
fn file_name_follows_the_contact_name() {
    let mut session = Session::new();
    session.apply(|record| record.with_contact(ContactField::FullName("Grace Hopper".into())));
    let document = session
        .export(&mut draft_exporter())
        .expect("export renamed record");
    assert_eq!(document.file_name, "Grace Hopper.pdf");
}

#[test]
fn letter_pages_need_at_least_as_many_pages_as_a4() {
    let record = Session::new().record().clone();
    let theme = Theme::default();
    let a4 = draft_exporter().export(&record, &theme).expect("a4");
    let letter = Exporter::new(
        ExportSettings::default()
            .with_draft(true)
            .with_page(PageGeometry::LETTER),
    )
    .export(&record, &theme)
    .expect("letter");
    assert!(letter.page_count >= a4.page_count);
}

#[test]
fn draft_export_is_deterministic() {
    let record = Session::new().record().clone();
    let theme = Theme::new(Palette::Creative, FontChoice::Mono, Default::default());
    let mut exporter = draft_exporter();
    let first = exporter.export(&record, &theme).expect("first export");
    let second = exporter.export(&record, &theme).expect("second export");

    assert_eq!(first.bytes.len(), second.bytes.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first.bytes),
        normalized_hash(&second.bytes),
        "PDF exports must be deterministic after metadata normalization"
    );
}

/// Rasterizer that records the export flag it sees and then fails.
struct FailingRasterizer {
    flag: ExportFlag,
    seen: Rc<RefCell<Vec<bool>>>,
}

impl Rasterizer for FailingRasterizer {
    fn rasterize(
        &mut self,
        _surface: &PreviewLayout,
        _face: &dyn Typeface,
        _oversample: u32,
    ) -> Result<RgbImage, ExportError> {
        self.seen.borrow_mut().push(self.flag.is_set());
        Err(ExportError::Render("canvas unavailable".into()))
    }
}

#[test]
fn failed_export_clears_the_flag_and_yields_no_document() {
    let mut session = Session::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut exporter = Exporter::with_rasterizer(
        ExportSettings::default().with_draft(true),
        FailingRasterizer {
            flag: session.export_flag(),
            seen: Rc::clone(&seen),
        },
    );

    let err = session.export(&mut exporter).unwrap_err();
    assert!(matches!(err, ExportError::Render(_)));
    assert_eq!(err.user_message(), Some("Error generating PDF. Please try again."));
    assert_eq!(*seen.borrow(), [true]);
    assert!(!session.is_exporting());

    // The session recovers for the next trigger.
    let err = session.export(&mut exporter).unwrap_err();
    assert!(matches!(err, ExportError::Render(_)));
    assert_eq!(*seen.borrow(), [true, true]);
}

/// Composer limited to a single page.
struct SinglePageComposer(PdfComposer);

impl Composer for SinglePageComposer {
    fn new_page(&mut self) -> Result<(), ExportError> {
        Err(ExportError::Compose("out of paper".into()))
    }

    fn add_image(
        &mut self,
        image: &RgbImage,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<(), ExportError> {
        self.0.add_image(image, x_mm, y_mm, width_mm, height_mm)
    }

    fn save(self, file_name: &str) -> Result<ExportedDocument, ExportError> {
        self.0.save(file_name)
    }
}

#[test]
fn composition_failures_abort_the_export() {
    let mut session = Session::new();
    let composer = SinglePageComposer(PdfComposer::new("short", PageGeometry::A4));
    let err = session
        .export_with(&mut draft_exporter(), composer)
        .unwrap_err();
    assert!(matches!(err, ExportError::Compose(_)));
    assert!(!session.is_exporting());
}

#[test]
fn exports_with_bundled_fonts() {
    if !fonts::fonts_available(FontChoice::Sans) {
        eprintln!(
            "Skipping exports_with_bundled_fonts: bundled fonts missing. Set RESUME_BUILDER_FONTS_DIR or copy assets/fonts next to the binary."
        );
        return;
    }

    let mut exporter = Exporter::default();
    let document = Session::new()
        .export(&mut exporter)
        .expect("export with real fonts");
    assert!(exporter.is_initialized(FontChoice::Sans));
    assert_eq!(pdf_page_count(&document.bytes), document.page_count);
}
