//! Splits a tall bitmap into page-sized bands.
//!
//! The bitmap is scaled so its width matches the page width.  When the scaled
//! height fits on one page the whole bitmap goes on a single page; otherwise
//! it is cut into consecutive bands of one page height each, the last band
//! holding the remainder.

use crate::export::ExportError;

/// Page dimensions in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub const LETTER: PageGeometry = PageGeometry {
        width_mm: 215.9,
        height_mm: 279.4,
    };
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// One page worth of bitmap rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageBand {
    /// First bitmap row of the band.
    pub source_y: u32,
    /// Number of bitmap rows in the band.
    pub source_height: u32,
    /// Height the band occupies on the page, in millimetres.
    pub content_height_mm: f64,
}

/// Page layout of a bitmap.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    /// Millimetres per CSS pixel.
    pub ratio: f64,
    /// Height of the whole bitmap once scaled to the page width, in millimetres.
    pub scaled_height_mm: f64,
    pub bands: Vec<PageBand>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.bands.len()
    }
}

const EPSILON_MM: f64 = 1e-6;

/// Plans the pages for a `width` by `height` bitmap rendered at `oversample`.
pub fn plan_pages(
    width: u32,
    height: u32,
    oversample: u32,
    page: PageGeometry,
) -> Result<PagePlan, ExportError> {
    if width == 0 || height == 0 || oversample == 0 {
        return Err(ExportError::EmptySurface);
    }

    let scale = f64::from(oversample);
    let ratio = page.width_mm / (f64::from(width) / scale);
    let scaled_height_mm = (f64::from(height) / scale) * ratio;

    if scaled_height_mm <= page.height_mm + EPSILON_MM {
        return Ok(PagePlan {
            ratio,
            scaled_height_mm,
            bands: vec![PageBand {
                source_y: 0,
                source_height: height,
                content_height_mm: scaled_height_mm,
            }],
        });
    }

    // Boundaries are rounded once so adjacent bands share them.
    let boundary = |y_mm: f64| ((y_mm / ratio * scale).round() as u32).min(height);

    let mut bands = Vec::new();
    let mut y_mm = 0.0;
    while y_mm < scaled_height_mm - EPSILON_MM {
        let content_height_mm = page.height_mm.min(scaled_height_mm - y_mm);
        let start = boundary(y_mm);
        let end = if y_mm + page.height_mm >= scaled_height_mm - EPSILON_MM {
            height
        } else {
            boundary(y_mm + page.height_mm)
        };
        if end > start {
            bands.push(PageBand {
                source_y: start,
                source_height: end - start,
                content_height_mm,
            });
        }
        y_mm += page.height_mm;
    }

    Ok(PagePlan {
        ratio,
        scaled_height_mm,
        bands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(plan: &PagePlan, height: u32) {
        let total: u32 = plan.bands.iter().map(|band| band.source_height).sum();
        assert_eq!(total, height);
        assert_eq!(plan.bands[0].source_y, 0);
        for pair in plan.bands.windows(2) {
            assert_eq!(pair[0].source_y + pair[0].source_height, pair[1].source_y);
        }
    }

    #[test]
    fn short_bitmap_fits_on_one_page() {
        let plan = plan_pages(1588, 2000, 2, PageGeometry::A4).expect("plan");
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.bands[0].source_height, 2000);
        assert!((plan.bands[0].content_height_mm - 1000.0 * 210.0 / 794.0).abs() < 1e-9);
    }

    #[test]
    fn page_count_is_the_ceiling_of_scaled_height() {
        for height in [2300, 5000, 7777, 12_001] {
            let plan = plan_pages(1588, height, 2, PageGeometry::A4).expect("plan");
            let expected = (plan.scaled_height_mm / 297.0).ceil() as usize;
            assert_eq!(plan.page_count(), expected, "height {height}");
            assert_partition(&plan, height);
        }
    }

    #[test]
    fn last_band_holds_the_remainder() {
        let plan = plan_pages(1588, 5000, 2, PageGeometry::A4).expect("plan");
        assert_eq!(plan.page_count(), 3);
        let full: Vec<_> = plan.bands[..2].iter().map(|b| b.content_height_mm).collect();
        assert_eq!(full, [297.0, 297.0]);
        let last = plan.bands[2].content_height_mm;
        assert!((last - (plan.scaled_height_mm - 594.0)).abs() < 1e-9);
    }

    #[test]
    fn trailing_band_under_one_row_is_dropped() {
        // 1123 CSS px scale to 297.015 mm: the overflow past one A4 page
        // rounds to zero bitmap rows.
        let plan = plan_pages(1588, 2246, 2, PageGeometry::A4).expect("plan");
        assert!(plan.scaled_height_mm > 297.0);
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.bands[0].source_height, 2246);
        assert_eq!(plan.bands[0].content_height_mm, 297.0);
        assert_partition(&plan, 2246);
    }

    #[test]
    fn letter_pages_are_shorter_and_narrower() {
        let a4 = plan_pages(1588, 9000, 2, PageGeometry::A4).expect("a4");
        let letter = plan_pages(1588, 9000, 2, PageGeometry::LETTER).expect("letter");
        assert!(letter.page_count() >= a4.page_count());
        assert_partition(&letter, 9000);
    }

    #[test]
    fn empty_bitmaps_are_rejected() {
        assert!(matches!(
            plan_pages(0, 10, 2, PageGeometry::A4),
            Err(ExportError::EmptySurface)
        ));
    }
}
