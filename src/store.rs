//! Replace-on-write operations on [`ResumeRecord`].
//!
//! Every operation borrows the current record and returns a new one carrying
//! exactly one change.  None of them can fail: unknown identifiers and
//! out-of-range indices leave the record as it was, and field contents are
//! stored without validation.

use crate::model::{
    Achievement, Certification, ContactInfo, Education, EntryId, Project, ResumeRecord,
    WorkExperience,
};

mod sealed {
    use crate::model::ResumeRecord;

    pub trait Collection: Sized {
        fn collection_mut(record: &mut ResumeRecord) -> &mut Vec<Self>;
    }
}

/// A sub-record type living in one of the record's identified collections.
pub trait Entry: sealed::Collection + Clone {
    /// Field selector carrying the new value for a single field.
    type Field;

    /// Returns the entry identifier.
    fn id(&self) -> &EntryId;

    /// Creates an entry with every field empty.
    fn blank(id: EntryId) -> Self;

    /// Overwrites one field.
    fn apply(&mut self, field: Self::Field);

    /// Returns the collection of `record` this entry type lives in.
    fn entries(record: &ResumeRecord) -> &[Self];
}

/// A single contact field together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactField {
    FullName(String),
    Email(String),
    Phone(String),
    Location(String),
    Website(String),
    Linkedin(String),
    Github(String),
}

impl ContactField {
    fn apply(self, contact: &mut ContactInfo) {
        match self {
            Self::FullName(value) => contact.full_name = value,
            Self::Email(value) => contact.email = value,
            Self::Phone(value) => contact.phone = value,
            Self::Location(value) => contact.location = value,
            Self::Website(value) => contact.website = value,
            Self::Linkedin(value) => contact.linkedin = value,
            Self::Github(value) => contact.github = value,
        }
    }
}

/// A single [`WorkExperience`] field together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExperienceField {
    Company(String),
    Position(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

/// A single [`Education`] field together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EducationField {
    Institution(String),
    Degree(String),
    Field(String),
    StartDate(String),
    EndDate(String),
    Gpa(String),
}

/// A single [`Project`] field together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectField {
    Name(String),
    Description(String),
    Technologies(String),
    Link(String),
    Github(String),
}

/// A single [`Achievement`] field together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AchievementField {
    Title(String),
    Description(String),
    Date(String),
    Organization(String),
}

/// A single [`Certification`] field together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificationField {
    Name(String),
    Issuer(String),
    Date(String),
    ExpiryDate(String),
    CredentialId(String),
    Link(String),
}

macro_rules! impl_entry {
    ($entry:ty, $field:ty, $collection:ident, |$target:ident, $value:ident| $apply:expr) => {
        impl sealed::Collection for $entry {
            fn collection_mut(record: &mut ResumeRecord) -> &mut Vec<Self> {
                &mut record.$collection
            }
        }

        impl Entry for $entry {
            type Field = $field;

            fn id(&self) -> &EntryId {
                &self.id
            }

            fn blank(id: EntryId) -> Self {
                Self {
                    id,
                    ..Self::default()
                }
            }

            fn apply(&mut self, field: Self::Field) {
                let $target = self;
                let $value = field;
                $apply
            }

            fn entries(record: &ResumeRecord) -> &[Self] {
                &record.$collection
            }
        }
    };
}

impl_entry!(WorkExperience, ExperienceField, experience, |entry, field| {
    match field {
        ExperienceField::Company(value) => entry.company = value,
        ExperienceField::Position(value) => entry.position = value,
        ExperienceField::StartDate(value) => entry.start_date = value,
        ExperienceField::EndDate(value) => entry.end_date = value,
        ExperienceField::Current(value) => entry.current = value,
        ExperienceField::Description(value) => entry.description = value,
    }
});

impl_entry!(Education, EducationField, education, |entry, field| {
    match field {
        EducationField::Institution(value) => entry.institution = value,
        EducationField::Degree(value) => entry.degree = value,
        EducationField::Field(value) => entry.field = value,
        EducationField::StartDate(value) => entry.start_date = value,
        EducationField::EndDate(value) => entry.end_date = value,
        EducationField::Gpa(value) => entry.gpa = value,
    }
});

impl_entry!(Project, ProjectField, projects, |entry, field| {
    match field {
        ProjectField::Name(value) => entry.name = value,
        ProjectField::Description(value) => entry.description = value,
        ProjectField::Technologies(value) => entry.technologies = value,
        ProjectField::Link(value) => entry.link = value,
        ProjectField::Github(value) => entry.github = value,
    }
});

impl_entry!(Achievement, AchievementField, achievements, |entry, field| {
    match field {
        AchievementField::Title(value) => entry.title = value,
        AchievementField::Description(value) => entry.description = value,
        AchievementField::Date(value) => entry.date = value,
        AchievementField::Organization(value) => entry.organization = value,
    }
});

impl_entry!(Certification, CertificationField, certifications, |entry, field| {
    match field {
        CertificationField::Name(value) => entry.name = value,
        CertificationField::Issuer(value) => entry.issuer = value,
        CertificationField::Date(value) => entry.date = value,
        CertificationField::ExpiryDate(value) => entry.expiry_date = value,
        CertificationField::CredentialId(value) => entry.credential_id = value,
        CertificationField::Link(value) => entry.link = value,
    }
});

impl ResumeRecord {
    /// Returns a copy with one contact field replaced.
    pub fn with_contact(&self, field: ContactField) -> Self {
        let mut next = self.clone();
        field.apply(&mut next.contact);
        next
    }

    /// Returns a copy with the summary replaced.
    pub fn with_summary(&self, summary: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.summary = summary.into();
        next
    }

    /// Looks up an entry by identifier.
    pub fn entry<E: Entry>(&self, id: &EntryId) -> Option<&E> {
        E::entries(self).iter().find(|entry| entry.id() == id)
    }

    /// Returns a copy with a blank entry appended, together with the new entry's identifier.
    ///
    /// The identifier is unique within the target collection.
    pub fn with_entry_added<E: Entry>(&self) -> (Self, EntryId) {
        let mut id = EntryId::generate();
        while self.entry::<E>(&id).is_some() {
            id = EntryId::generate();
        }

        let mut next = self.clone();
        E::collection_mut(&mut next).push(E::blank(id.clone()));
        (next, id)
    }

    /// Returns a copy with one field of the entry identified by `id` replaced.
    pub fn with_entry_updated<E: Entry>(&self, id: &EntryId, field: E::Field) -> Self {
        let mut next = self.clone();
        if let Some(entry) = E::collection_mut(&mut next)
            .iter_mut()
            .find(|entry| entry.id() == id)
        {
            entry.apply(field);
        }
        next
    }

    /// Returns a copy without the entry identified by `id`.
    pub fn with_entry_removed<E: Entry>(&self, id: &EntryId) -> Self {
        let mut next = self.clone();
        E::collection_mut(&mut next).retain(|entry| entry.id() != id);
        next
    }

    /// Returns a copy with `skill` appended after trimming; blank input is ignored.
    pub fn with_skill_added(&self, skill: &str) -> Self {
        let mut next = self.clone();
        let skill = skill.trim();
        if !skill.is_empty() {
            next.skills.push(skill.to_owned());
        }
        next
    }

    /// Returns a copy without the skill at `index`.
    pub fn with_skill_removed(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index < next.skills.len() {
            next.skills.remove(index);
        }
        next
    }
}
