//! Profile form controller
//!
//! Holds the transient field state for profile setup and profile editing.
//! Edits are never validated as they happen; [`ProfileForm::submit`] checks
//! everything at once and, only when the form is valid, writes a fresh
//! [`Profile`] through the session (which is what signs the user in).
//!
//! Skill and resume attachments are the exception: a duplicate custom skill
//! or an unacceptable resume file is refused on the spot, because letting
//! them into the form state would mean silently dropping them later.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::error::PathfinderError;
use crate::profile::{Profile, PROGRAMMING_LANGUAGES, SKILL_OPTIONS, SPOKEN_LANGUAGES};
use crate::session::Session;

pub const ACCEPTED_RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Location,
    Bio,
    ProgrammingLanguage,
    SpokenLanguage,
    Skills,
    ResumeLink,
    ResumeFile,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email Address",
            Field::Location => "Location",
            Field::Bio => "Bio",
            Field::ProgrammingLanguage => "Preferred Programming Language",
            Field::SpokenLanguage => "Preferred Spoken Language",
            Field::Skills => "Your Skills",
            Field::ResumeLink => "Resume Link",
            Field::ResumeFile => "Resume File",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Field::Name | Field::Email | Field::Location | Field::Bio | Field::ResumeLink
        )
    }
}

/// Field-scoped messages from a failed submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Immediate, user-visible refusals while editing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    #[error("\"{0}\" is already in your skills")]
    DuplicateSkill(String),

    #[error("{0} is not a PDF or Word document")]
    UnsupportedResumeType(String),

    #[error("{name} is {size_kib} KiB, the limit is 5 MiB")]
    ResumeTooLarge { name: String, size_kib: u64 },

    #[error("Could not read {0}")]
    ResumeUnreadable(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Profile is incomplete: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Storage(#[from] PathfinderError),
}

/// A resume picked for upload. Only the name ends up in the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub size_bytes: u64,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, FormNotice> {
        let shown = path.display().to_string();
        let metadata =
            std::fs::metadata(path).map_err(|_| FormNotice::ResumeUnreadable(shown.clone()))?;
        if !metadata.is_file() {
            return Err(FormNotice::ResumeUnreadable(shown));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(shown);
        Ok(Self::new(name, metadata.len()))
    }

    pub fn check(&self) -> Result<(), FormNotice> {
        let extension = Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        let accepted = extension
            .as_deref()
            .is_some_and(|e| ACCEPTED_RESUME_EXTENSIONS.contains(&e));
        if !accepted {
            return Err(FormNotice::UnsupportedResumeType(self.name.clone()));
        }
        if self.size_bytes > MAX_RESUME_BYTES {
            return Err(FormNotice::ResumeTooLarge {
                name: self.name.clone(),
                size_kib: self.size_bytes / 1024,
            });
        }
        Ok(())
    }
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://.+").expect("static URL pattern is valid"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    name: String,
    email: String,
    location: String,
    bio: String,
    resume_link: String,
    programming_language: Option<String>,
    spoken_language: Option<String>,
    skills: BTreeSet<String>,
    resume_file: Option<ResumeFile>,
    errors: ValidationErrors,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form with an existing profile for editing
    pub fn from_profile(profile: &Profile) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            resume_link: profile.resume_link.clone().unwrap_or_default(),
            programming_language: non_empty(&profile.preferred_programming_language),
            spoken_language: non_empty(&profile.preferred_spoken_language),
            skills: profile.skills.clone(),
            resume_file: profile
                .resume_file_name
                .as_ref()
                .map(|name| ResumeFile::new(name.clone(), 0)),
            errors: ValidationErrors::default(),
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Location => &self.location,
            Field::Bio => &self.bio,
            Field::ResumeLink => &self.resume_link,
            Field::ProgrammingLanguage => self.programming_language.as_deref().unwrap_or(""),
            Field::SpokenLanguage => self.spoken_language.as_deref().unwrap_or(""),
            Field::ResumeFile => self.resume_file.as_ref().map(|f| f.name.as_str()).unwrap_or(""),
            Field::Skills => "",
        }
    }

    /// Replace a free text field. Non-text fields are ignored.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Location => &mut self.location,
            Field::Bio => &mut self.bio,
            Field::ResumeLink => &mut self.resume_link,
            _ => return,
        };
        *slot = value.into();
        self.errors.remove(field);
    }

    pub fn programming_language(&self) -> Option<&str> {
        self.programming_language.as_deref()
    }

    pub fn spoken_language(&self) -> Option<&str> {
        self.spoken_language.as_deref()
    }

    /// Pick from the fixed list; unknown values are refused
    pub fn select_programming_language(&mut self, language: &str) -> bool {
        match PROGRAMMING_LANGUAGES.iter().find(|l| **l == language) {
            Some(l) => {
                self.programming_language = Some(l.to_string());
                self.errors.remove(Field::ProgrammingLanguage);
                true
            }
            None => false,
        }
    }

    pub fn select_spoken_language(&mut self, language: &str) -> bool {
        match SPOKEN_LANGUAGES.iter().find(|l| **l == language) {
            Some(l) => {
                self.spoken_language = Some(l.to_string());
                true
            }
            None => false,
        }
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Toggle a catalog skill on or off
    pub fn toggle_skill(&mut self, skill: &str) {
        if !self.skills.remove(skill) {
            self.skills.insert(skill.to_string());
        }
        self.errors.remove(Field::Skills);
    }

    /// Add a free text skill. Returns `Ok(false)` for blank input. A name that
    /// matches a catalog skill is stored with the catalog spelling.
    pub fn add_custom_skill(&mut self, raw: &str) -> Result<bool, FormNotice> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        let folded = trimmed.to_lowercase();
        if let Some(existing) = self.skills.iter().find(|s| s.to_lowercase() == folded) {
            return Err(FormNotice::DuplicateSkill(existing.clone()));
        }

        let skill = SKILL_OPTIONS
            .iter()
            .find(|s| s.to_lowercase() == folded)
            .map(|s| s.to_string())
            .unwrap_or_else(|| trimmed.to_string());
        self.skills.insert(skill);
        self.errors.remove(Field::Skills);
        Ok(true)
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill)
    }

    pub fn resume_file(&self) -> Option<&ResumeFile> {
        self.resume_file.as_ref()
    }

    /// Attach a resume after checking type and size. A refused file leaves
    /// any previously attached one in place.
    pub fn attach_resume(&mut self, file: ResumeFile) -> Result<(), FormNotice> {
        match file.check() {
            Ok(()) => {
                self.resume_file = Some(file);
                self.errors.remove(Field::ResumeFile);
                Ok(())
            }
            Err(notice) => {
                self.errors.insert(Field::ResumeFile, notice.to_string());
                Err(notice)
            }
        }
    }

    pub fn attach_resume_path(&mut self, path: &Path) -> Result<(), FormNotice> {
        let file = match ResumeFile::from_path(path) {
            Ok(file) => file,
            Err(notice) => {
                self.errors.insert(Field::ResumeFile, notice.to_string());
                return Err(notice);
            }
        };
        self.attach_resume(file)
    }

    pub fn detach_resume(&mut self) {
        self.resume_file = None;
        self.errors.remove(Field::ResumeFile);
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    /// Check the whole form without touching its state
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if self.programming_language.is_none() {
            errors.insert(
                Field::ProgrammingLanguage,
                "Please select a preferred programming language",
            );
        }
        if self.skills.is_empty() {
            errors.insert(Field::Skills, "Please select at least one skill");
        }
        let link = self.resume_link.trim();
        if !link.is_empty() && !url_pattern().is_match(link) {
            errors.insert(Field::ResumeLink, "Please enter a valid URL");
        }

        errors
    }

    /// The profile this form would save
    pub fn to_profile(&self) -> Profile {
        let link = self.resume_link.trim();
        Profile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            location: self.location.trim().to_string(),
            bio: self.bio.trim().to_string(),
            preferred_programming_language: self.programming_language.clone().unwrap_or_default(),
            preferred_spoken_language: self.spoken_language.clone().unwrap_or_default(),
            skills: self.skills.clone(),
            resume_link: (!link.is_empty()).then(|| link.to_string()),
            resume_file_name: self.resume_file.as_ref().map(|f| f.name.clone()),
        }
    }

    /// Validate, then persist through the session and announce the login.
    /// On failure nothing is written and only the error messages change.
    pub fn submit(&mut self, session: &Session) -> Result<Profile, SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        let profile = self.to_profile();
        session.sign_in(&profile)?;
        self.errors = ValidationErrors::default();
        Ok(profile)
    }
}
