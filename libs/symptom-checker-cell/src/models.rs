use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDuration {
    Recent,
    Week,
    Longer,
}

/// Body areas offered by the symptom form. Anything outside the vocabulary is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyPart {
    Head,
    Chest,
    Abdomen,
    Back,
    Arms,
    Legs,
    Joints,
    Skin,
    Throat,
    Eyes,
    Ears,
    Other(String),
}

impl BodyPart {
    pub const VOCABULARY: [BodyPart; 11] = [
        BodyPart::Head,
        BodyPart::Chest,
        BodyPart::Abdomen,
        BodyPart::Back,
        BodyPart::Arms,
        BodyPart::Legs,
        BodyPart::Joints,
        BodyPart::Skin,
        BodyPart::Throat,
        BodyPart::Eyes,
        BodyPart::Ears,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BodyPart::Head => "Head",
            BodyPart::Chest => "Chest",
            BodyPart::Abdomen => "Abdomen",
            BodyPart::Back => "Back",
            BodyPart::Arms => "Arms",
            BodyPart::Legs => "Legs",
            BodyPart::Joints => "Joints",
            BodyPart::Skin => "Skin",
            BodyPart::Throat => "Throat",
            BodyPart::Eyes => "Eyes",
            BodyPart::Ears => "Ears",
            BodyPart::Other(name) => name,
        }
    }
}

impl From<String> for BodyPart {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        Self::VOCABULARY
            .iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| BodyPart::Other(trimmed.to_string()))
    }
}

impl From<&str> for BodyPart {
    fn from(raw: &str) -> Self {
        BodyPart::from(raw.to_string())
    }
}

impl From<BodyPart> for String {
    fn from(part: BodyPart) -> Self {
        part.as_str().to_string()
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomQuery {
    pub description: String,
    pub body_parts: BTreeSet<BodyPart>,
    pub duration: SymptomDuration,
}

impl SymptomQuery {
    pub fn new<I, P>(description: impl Into<String>, body_parts: I, duration: SymptomDuration) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<BodyPart>,
    {
        Self {
            description: description.into(),
            body_parts: body_parts.into_iter().map(Into::into).collect(),
            duration,
        }
    }

    pub fn has_body_part(&self, part: &BodyPart) -> bool {
        self.body_parts.contains(part)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomVerdict {
    pub severity: Severity,
    pub message: String,
    pub recommendations: Vec<String>,
    pub seek_medical_attention: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCheckRequest {
    pub description: String,
    #[serde(default)]
    pub body_parts: Vec<String>,
    pub duration: SymptomDuration,
}

impl SymptomCheckRequest {
    /// Builds the evaluator input, rejecting blank descriptions.
    pub fn into_query(self) -> Result<SymptomQuery, SymptomCheckError> {
        if self.description.trim().is_empty() {
            return Err(SymptomCheckError::EmptyDescription);
        }

        Ok(SymptomQuery::new(
            self.description,
            self.body_parts.into_iter().filter(|part| !part.trim().is_empty()),
            self.duration,
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyPartsResponse {
    pub body_parts: Vec<BodyPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymptomCheckError {
    #[error("Please describe your symptoms")]
    EmptyDescription,
}

impl From<SymptomCheckError> for shared_models::error::AppError {
    fn from(err: SymptomCheckError) -> Self {
        shared_models::error::AppError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_body_part_vocabulary_is_case_insensitive() {
        assert_eq!(BodyPart::from("head"), BodyPart::Head);
        assert_eq!(BodyPart::from(" JOINTS "), BodyPart::Joints);
        assert_eq!(BodyPart::from("Left knee"), BodyPart::Other("Left knee".to_string()));
    }

    #[test]
    fn test_body_part_serializes_as_display_name() {
        let json = serde_json::to_value(vec![BodyPart::Chest, BodyPart::Other("Wrist".into())]).unwrap();
        assert_eq!(json, serde_json::json!(["Chest", "Wrist"]));

        let parsed: Vec<BodyPart> = serde_json::from_value(serde_json::json!(["chest", "Wrist"])).unwrap();
        assert_eq!(parsed, vec![BodyPart::Chest, BodyPart::Other("Wrist".into())]);
    }

    #[test]
    fn test_request_rejects_blank_description() {
        let request = SymptomCheckRequest {
            description: "   ".to_string(),
            body_parts: vec![],
            duration: SymptomDuration::Recent,
        };
        assert_matches!(request.into_query(), Err(SymptomCheckError::EmptyDescription));
    }

    #[test]
    fn test_request_deduplicates_body_parts() {
        let request = SymptomCheckRequest {
            description: "sore".to_string(),
            body_parts: vec!["Head".into(), "head".into(), "".into()],
            duration: SymptomDuration::Week,
        };
        let query = request.into_query().unwrap();
        assert_eq!(query.body_parts.len(), 1);
        assert!(query.has_body_part(&BodyPart::Head));
    }
}
