//! Application state for one editing session.

use std::cell::Cell;
use std::rc::Rc;

use log::error;

use crate::compose::{Composer, PdfComposer};
use crate::export::{export_file_name, ExportError, ExportedDocument, Exporter};
use crate::model::ResumeRecord;
use crate::raster::Rasterizer;
use crate::theme::Theme;

/// Shared handle on the "export in progress" flag.
#[derive(Clone, Debug, Default)]
pub struct ExportFlag(Rc<Cell<bool>>);

impl ExportFlag {
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Raises the flag unless it is already raised.
    ///
    /// The flag drops again when the returned guard goes out of scope.
    pub fn try_begin(&self) -> Option<ExportGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(ExportGuard(self.clone()))
    }
}

/// Keeps an [`ExportFlag`] raised while alive.
#[derive(Debug)]
pub struct ExportGuard(ExportFlag);

impl Drop for ExportGuard {
    fn drop(&mut self) {
        (self.0).0.set(false);
    }
}

/// The record being edited, its styling and the export state.
#[derive(Debug)]
pub struct Session {
    record: ResumeRecord,
    theme: Theme,
    showing_sample: bool,
    exporting: ExportFlag,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts with the bundled sample record.
    pub fn new() -> Self {
        Self {
            record: ResumeRecord::sample(),
            theme: Theme::default(),
            showing_sample: true,
            exporting: ExportFlag::default(),
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn is_showing_sample(&self) -> bool {
        self.showing_sample
    }

    /// Replaces the whole record.
    pub fn replace(&mut self, record: ResumeRecord) {
        self.record = record;
    }

    /// Replaces the record with the result of `edit`.
    pub fn apply<F>(&mut self, edit: F)
    where
        F: FnOnce(&ResumeRecord) -> ResumeRecord,
    {
        self.record = edit(&self.record);
    }

    pub fn load_sample(&mut self) {
        self.record = ResumeRecord::sample();
        self.showing_sample = true;
    }

    pub fn clear(&mut self) {
        self.record = ResumeRecord::empty();
        self.showing_sample = false;
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.is_set()
    }

    /// A handle observers can poll for the export flag.
    pub fn export_flag(&self) -> ExportFlag {
        self.exporting.clone()
    }

    /// Exports the current record as PDF.
    pub fn export<R: Rasterizer>(
        &mut self,
        exporter: &mut Exporter<R>,
    ) -> Result<ExportedDocument, ExportError> {
        let stem = export_file_name(self.record.contact());
        let composer = PdfComposer::new(stem.trim_end_matches(".pdf"), exporter.settings().page);
        self.export_with(exporter, composer)
    }

    /// Exports the current record through `composer`.
    ///
    /// Fails with [`ExportError::Busy`] while another export holds the flag.
    pub fn export_with<R: Rasterizer, C: Composer>(
        &mut self,
        exporter: &mut Exporter<R>,
        composer: C,
    ) -> Result<ExportedDocument, ExportError> {
        let _guard = self.exporting.try_begin().ok_or(ExportError::Busy)?;
        exporter
            .export_with(&self.record, &self.theme, composer)
            .map_err(|err| {
                error!("Error generating PDF: {err}");
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportSettings;
    use crate::store::ContactField;

    #[test]
    fn sessions_start_with_the_sample() {
        let session = Session::new();
        assert!(session.is_showing_sample());
        assert_eq!(session.record(), &ResumeRecord::sample());
        assert!(!session.is_exporting());
    }

    #[test]
    fn clear_and_load_sample_toggle_the_sample_flag() {
        let mut session = Session::new();
        session.clear();
        assert!(!session.is_showing_sample());
        assert!(session.record().is_empty());

        session.apply(|record| record.with_contact(ContactField::FullName("Ada".into())));
        assert_eq!(session.record().contact().full_name, "Ada");

        session.load_sample();
        assert!(session.is_showing_sample());
        assert_eq!(session.record(), &ResumeRecord::sample());
    }

    #[test]
    fn guard_clears_the_flag_on_drop() {
        let flag = ExportFlag::default();
        let guard = flag.try_begin().expect("first begin");
        assert!(flag.is_set());
        assert!(flag.try_begin().is_none());
        drop(guard);
        assert!(!flag.is_set());
    }

    #[test]
    fn triggers_while_exporting_are_rejected() {
        let mut session = Session::new();
        let mut exporter = Exporter::new(ExportSettings::default().with_draft(true));
        let held = session.export_flag().try_begin().expect("hold flag");

        let err = session.export(&mut exporter).unwrap_err();
        assert!(matches!(err, ExportError::Busy));
        assert_eq!(err.user_message(), None);
        assert!(session.is_exporting());

        drop(held);
        assert!(!session.is_exporting());
        assert!(!exporter.is_initialized(session.theme().font));
    }
}
