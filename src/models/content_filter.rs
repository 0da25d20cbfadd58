use std::fmt;

use serde::{Deserialize, Serialize};

/// Moderation severity reported for a content filter category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Safe,
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "safe" => Severity::Safe,
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Safe => f.write_str("safe"),
            Severity::Low => f.write_str("low"),
            Severity::Medium => f.write_str("medium"),
            Severity::High => f.write_str("high"),
            Severity::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilterResult {
    pub severity: Severity,
    pub filtered: bool,
}

impl fmt::Display for ContentFilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sev: {}, filtered: {}", self.severity, self.filtered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilterError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for ContentFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Per-choice moderation results. The service may omit any category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilterResults {
    pub hate: Option<ContentFilterResult>,
    pub self_harm: Option<ContentFilterResult>,
    pub sexual: Option<ContentFilterResult>,
    pub violence: Option<ContentFilterResult>,
    pub error: Option<ContentFilterError>,
}

impl ContentFilterResults {
    /// Categories in report order, labelled for display.
    pub fn categories(&self) -> [(&'static str, Option<&ContentFilterResult>); 4] {
        [
            ("Hate", self.hate.as_ref()),
            ("SelfHarm", self.self_harm.as_ref()),
            ("Sexual", self.sexual.as_ref()),
            ("Violence", self.violence.as_ref()),
        ]
    }
}
