use tracing::debug;

use crate::models::{BodyPart, Severity, SymptomDuration, SymptomQuery, SymptomVerdict};

/// Phrases that always classify a report as an emergency.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "unconscious",
    "suicide",
    "suicidal",
    "seizure",
    "stroke",
    "heart attack",
    "overdose",
    "bleeding heavily",
    "severe bleeding",
    "coughing blood",
    "vomiting blood",
];

pub const MODERATE_KEYWORDS: &[&str] = &[
    "fever",
    "persistent",
    "dizziness",
    "dizzy",
    "headache",
    "infection",
    "vomiting",
    "rash",
    "swelling",
    "migraine",
    "shortness of breath",
];

const HIGH_MESSAGE: &str = "Your symptoms may indicate a medical emergency. Please seek immediate medical care.";
const MEDIUM_MESSAGE: &str = "Your symptoms should be evaluated by a healthcare provider. We recommend scheduling a consultation within the next 24-48 hours.";
const LOW_MESSAGE: &str = "Your symptoms appear to be mild. Continue to monitor them and rest.";

const HIGH_RECOMMENDATIONS: [&str; 3] = [
    "Call emergency services or go to the nearest emergency department now",
    "Do not drive yourself if you feel faint, confused or short of breath",
    "Stay with someone until help arrives",
];

const MEDIUM_RECOMMENDATIONS: [&str; 3] = [
    "Book a consultation with a doctor within the next 24-48 hours",
    "Keep a record of when your symptoms occur and how they change",
    "Seek urgent care if your symptoms get noticeably worse",
];

const LOW_RECOMMENDATIONS: [&str; 3] = [
    "Rest and stay hydrated",
    "Monitor your symptoms over the next few days",
    "Book a consultation if symptoms persist or worsen",
];

const HEADACHE_TIP: &str = "For headaches, rest in a quiet, dark room and limit screen time";
const FEVER_TIP: &str = "For fever, drink plenty of fluids and check your temperature regularly";
const JOINT_TIP: &str = "For joint or muscle pain, rest the affected area and apply a cold or warm compress";

/// Classifies a symptom report into a severity tier with recommendations.
///
/// Emergency phrases take precedence over every other rule. Medium is reached
/// through a moderate phrase, a long-running complaint or a chest/head report;
/// anything else is low. The caller must reject blank descriptions beforehand.
pub fn check_symptoms(query: &SymptomQuery) -> SymptomVerdict {
    let description = query.description.to_lowercase();

    let severity = if contains_any(&description, EMERGENCY_KEYWORDS) {
        Severity::High
    } else if contains_any(&description, MODERATE_KEYWORDS)
        || query.duration == SymptomDuration::Longer
        || query.has_body_part(&BodyPart::Chest)
        || query.has_body_part(&BodyPart::Head)
    {
        Severity::Medium
    } else {
        Severity::Low
    };

    let (message, base) = match severity {
        Severity::High => (HIGH_MESSAGE, HIGH_RECOMMENDATIONS),
        Severity::Medium => (MEDIUM_MESSAGE, MEDIUM_RECOMMENDATIONS),
        Severity::Low => (LOW_MESSAGE, LOW_RECOMMENDATIONS),
    };

    let mut recommendations: Vec<String> = base.iter().map(|r| r.to_string()).collect();

    if description.contains("headache") || query.has_body_part(&BodyPart::Head) {
        recommendations.push(HEADACHE_TIP.to_string());
    }
    if description.contains("fever") {
        recommendations.push(FEVER_TIP.to_string());
    }
    if query.has_body_part(&BodyPart::Joints) || description.contains("pain") {
        recommendations.push(JOINT_TIP.to_string());
    }

    debug!(
        ?severity,
        duration = ?query.duration,
        body_parts = query.body_parts.len(),
        extra_tips = recommendations.len() - base.len(),
        "Symptom report classified"
    );

    SymptomVerdict {
        severity,
        message: message.to_string(),
        recommendations,
        seek_medical_attention: severity != Severity::Low,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
