//! Resume record store with a rasterize-and-paginate PDF export.
//!
//! The record lives in [`model`] and is edited through the replace-on-write
//! operations of [`store`].  [`export::Exporter`] lays the record out
//! ([`layout`]), paints it into a bitmap ([`raster`]), cuts the bitmap into
//! page bands ([`paginate`]) and composes the PDF ([`compose`]).

pub mod compose;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod paginate;
pub mod raster;
mod sample;
pub mod session;
pub mod store;
pub mod theme;

pub use export::{ExportError, ExportSettings, ExportedDocument, Exporter};
pub use model::ResumeRecord;
pub use session::Session;
pub use theme::Theme;
