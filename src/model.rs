//! Data structures describing the resume record.
//!
//! The record is a plain aggregate of strings, booleans and ordered
//! collections.  Fields of [`ResumeRecord`] are private so that the only way to
//! obtain a changed record is through the replace-on-write operations in
//! [`crate::store`]; the sub-record types are plain data and can be built
//! directly.  Every type serializes with the camelCase field names used by the
//! JSON record files.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact name of the bundled sample record.
///
/// Also used as the export file stem when the contact name is empty.
pub const SAMPLE_FULL_NAME: &str = "Amit Gupta";

/// Opaque identifier of a sub-record, unique within its owning collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Contact block shown in the preview header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

/// One position held.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    /// Whether the position is ongoing; the end date is ignored when set.
    pub current: bool,
    pub description: String,
}

/// One degree or school.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

/// A project with optional demo and source links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    /// Free-form, usually comma separated.
    pub technologies: String,
    pub link: String,
    pub github: String,
}

/// An award or other achievement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Achievement {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub organization: String,
}

/// A professional certification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: String,
    pub credential_id: String,
    pub link: String,
}

/// The full resume held by a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRecord {
    pub(crate) contact: ContactInfo,
    pub(crate) summary: String,
    pub(crate) experience: Vec<WorkExperience>,
    pub(crate) education: Vec<Education>,
    pub(crate) skills: Vec<String>,
    pub(crate) projects: Vec<Project>,
    pub(crate) achievements: Vec<Achievement>,
    pub(crate) certifications: Vec<Certification>,
}

impl ResumeRecord {
    /// Creates a record with every field empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the bundled example record.
    pub fn sample() -> Self {
        crate::sample::sample_record()
    }

    /// Returns the contact block.
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Returns the professional summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the work experience entries in display order.
    pub fn experience(&self) -> &[WorkExperience] {
        &self.experience
    }

    /// Returns the education entries in display order.
    pub fn education(&self) -> &[Education] {
        &self.education
    }

    /// Returns the skills in display order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Returns the projects in display order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns the achievements in display order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Returns the certifications in display order.
    pub fn certifications(&self) -> &[Certification] {
        &self.certifications
    }

    /// Returns `true` when no field carries any content.
    pub fn is_empty(&self) -> bool {
        self == &Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryId, ResumeRecord, SAMPLE_FULL_NAME};

    #[test]
    fn empty_record_has_no_content() {
        let record = ResumeRecord::empty();
        assert!(record.is_empty());
        assert!(record.contact().full_name.is_empty());
        assert!(record.experience().is_empty());
    }

    #[test]
    fn sample_record_is_populated() {
        let record = ResumeRecord::sample();
        assert!(!record.is_empty());
        assert_eq!(record.contact().full_name, SAMPLE_FULL_NAME);
        assert_eq!(record.experience().len(), 2);
        assert_eq!(record.education().len(), 2);
        assert_eq!(record.projects().len(), 3);
        assert_eq!(record.achievements().len(), 4);
        assert_eq!(record.certifications().len(), 4);
        assert_eq!(record.skills().len(), 19);
    }

    #[test]
    fn generated_ids_differ() {
        let ids: Vec<EntryId> = (0..64).map(|_| EntryId::generate()).collect();
        for (index, id) in ids.iter().enumerate() {
            assert!(!ids[index + 1..].contains(id), "duplicate id {id}");
        }
    }

    #[test]
    fn json_uses_camel_case_and_tolerates_missing_fields() {
        let record: ResumeRecord = serde_json::from_str(
            r#"{"contact": {"fullName": "Ada Lovelace"}, "experience": [{"id": "x", "startDate": "1843-01", "current": true}]}"#,
        )
        .expect("parse record");

        assert_eq!(record.contact().full_name, "Ada Lovelace");
        assert_eq!(record.experience()[0].id.as_str(), "x");
        assert_eq!(record.experience()[0].start_date, "1843-01");
        assert!(record.experience()[0].current);
        assert!(record.skills().is_empty());

        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("\"fullName\":\"Ada Lovelace\""));
    }
}
