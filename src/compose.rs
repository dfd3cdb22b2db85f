//! Paged document composition.

use std::io::{BufWriter, Cursor};

use image::{DynamicImage, RgbImage};
use log::debug;
use printpdf::{Image, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::export::{ExportError, ExportedDocument};
use crate::paginate::PageGeometry;

const LAYER_NAME: &str = "Layer 1";
const IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Builds a paged document out of bitmaps.
///
/// Positions and sizes are in millimetres measured from the top-left corner of
/// the current page.  A fresh composer already has one page.
pub trait Composer {
    /// Starts a new page of the composer's geometry and makes it current.
    fn new_page(&mut self) -> Result<(), ExportError>;

    /// Draws `image` stretched to the given box on the current page.
    fn add_image(
        &mut self,
        image: &RgbImage,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<(), ExportError>;

    /// Serializes the document.
    fn save(self, file_name: &str) -> Result<ExportedDocument, ExportError>;
}

/// [`Composer`] writing PDF through `printpdf`.
pub struct PdfComposer {
    document: PdfDocumentReference,
    page: PageGeometry,
    layer: PdfLayerReference,
    page_count: usize,
}

impl PdfComposer {
    pub fn new(title: &str, page: PageGeometry) -> Self {
        let (document, page_index, layer_index) = PdfDocument::new(
            title,
            Mm(page.width_mm),
            Mm(page.height_mm),
            LAYER_NAME,
        );
        let layer = document.get_page(page_index).get_layer(layer_index);
        Self {
            document,
            page,
            layer,
            page_count: 1,
        }
    }
}

impl Composer for PdfComposer {
    fn new_page(&mut self) -> Result<(), ExportError> {
        let (page_index, layer_index) = self.document.add_page(
            Mm(self.page.width_mm),
            Mm(self.page.height_mm),
            LAYER_NAME,
        );
        self.layer = self.document.get_page(page_index).get_layer(layer_index);
        self.page_count += 1;
        Ok(())
    }

    fn add_image(
        &mut self,
        image: &RgbImage,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<(), ExportError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ExportError::Compose("cannot embed an empty image".into()));
        }

        let natural_width_mm = f64::from(image.width()) / IMAGE_DPI * MM_PER_INCH;
        let natural_height_mm = f64::from(image.height()) / IMAGE_DPI * MM_PER_INCH;
        // PDF space has its origin at the bottom-left corner.
        let bottom_mm = self.page.height_mm - y_mm - height_mm;

        let pdf_image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(image.clone()));
        pdf_image.add_to_layer(
            self.layer.clone(),
            Some(Mm(x_mm)),
            Some(Mm(bottom_mm)),
            None,
            Some(width_mm / natural_width_mm),
            Some(height_mm / natural_height_mm),
            Some(IMAGE_DPI),
        );
        Ok(())
    }

    fn save(self, file_name: &str) -> Result<ExportedDocument, ExportError> {
        let mut writer = BufWriter::new(Cursor::new(Vec::new()));
        self.document
            .save(&mut writer)
            .map_err(|err| ExportError::Compose(format!("{err:?}")))?;
        let bytes = writer
            .into_inner()
            .map_err(|err| ExportError::Compose(err.to_string()))?
            .into_inner();

        debug!(
            "Composed {} ({} pages, {} bytes)",
            file_name,
            self.page_count,
            bytes.len()
        );
        Ok(ExportedDocument {
            file_name: file_name.to_owned(),
            bytes,
            page_count: self.page_count,
        })
    }
}
