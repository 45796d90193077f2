//! The profile record and the fixed catalogs the profile form picks from

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const PROGRAMMING_LANGUAGES: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "C#",
    "Go",
    "Ruby",
    "PHP",
    "TypeScript",
    "Swift",
    "Kotlin",
    "Rust",
];

pub const SPOKEN_LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Portuguese",
    "Hindi",
    "Mandarin",
    "Japanese",
];

pub const SKILL_OPTIONS: &[&str] = &[
    "HTML",
    "CSS",
    "JavaScript",
    "TypeScript",
    "React",
    "Angular",
    "Vue.js",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Ruby on Rails",
    "Spring Boot",
    "ASP.NET",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "Firebase",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "GitHub",
    "CI/CD",
];

/// The persisted profile. Its presence in storage is the login flag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    pub preferred_programming_language: String,
    #[serde(default)]
    pub preferred_spoken_language: String,
    pub skills: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
}

impl Profile {
    /// Name to greet the user with, falling back when none was given
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Learner"
        } else {
            self.name.trim()
        }
    }

    /// Skills not in the fixed catalog
    pub fn custom_skills(&self) -> impl Iterator<Item = &String> {
        self.skills
            .iter()
            .filter(|s| !SKILL_OPTIONS.contains(&s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        Profile {
            name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            preferred_programming_language: "Rust".to_string(),
            skills: ["Git", "Docker", "Embedded"].iter().map(|s| s.to_string()).collect(),
            resume_file_name: Some("cv.pdf".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["preferredProgrammingLanguage"], "Rust");
        assert_eq!(json["resumeFileName"], "cv.pdf");
        assert!(json.get("resumeLink").is_none());
        // Set semantics: sorted on the wire
        assert_eq!(json["skills"], serde_json::json!(["Docker", "Embedded", "Git"]));
    }

    #[test]
    fn test_profile_tolerates_missing_optional_fields() {
        let profile: Profile = serde_json::from_str(
            r#"{"preferredProgrammingLanguage":"Go","skills":["SQL"]}"#,
        )
        .unwrap();
        assert_eq!(profile.preferred_programming_language, "Go");
        assert!(profile.name.is_empty());
        assert_eq!(profile.resume_file_name, None);
    }

    #[test]
    fn test_display_name_fallback() {
        let mut profile = sample();
        assert_eq!(profile.display_name(), "Alex Johnson");
        profile.name = "   ".to_string();
        assert_eq!(profile.display_name(), "Learner");
    }

    #[test]
    fn test_custom_skills_excludes_catalog() {
        let profile = sample();
        let custom: Vec<&String> = profile.custom_skills().collect();
        assert_eq!(custom, vec!["Embedded"]);
    }
}
