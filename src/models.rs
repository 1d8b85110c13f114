use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(default, deserialize_with = "lenient_number")]
    pub skills: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub education: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub experience: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub semantic_fit: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(default, deserialize_with = "or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub level: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub field: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub breakdown: Option<Breakdown>,
    #[serde(default)]
    pub rec_skills: Vec<String>,
    /// `[title, url]` pairs.
    #[serde(default)]
    pub rec_courses: Vec<(String, String)>,
}

/// Error payload shape shared by every backend endpoint.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One stored candidate as the listing endpoint returns it: a positional
/// array `[id, name, email, score, timestamp, pages, field, level, ...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRow(pub Vec<Value>);

impl CandidateRow {
    pub fn id(&self) -> String {
        self.text(0)
    }

    pub fn name(&self) -> String {
        self.text(1)
    }

    pub fn email(&self) -> String {
        self.text(2)
    }

    pub fn score(&self) -> f64 {
        self.0.get(3).map(number_from_value).unwrap_or_default()
    }

    pub fn score_text(&self) -> String {
        self.text(3)
    }

    pub fn timestamp(&self) -> String {
        self.text(4)
    }

    pub fn field(&self) -> String {
        self.text(6)
    }

    pub fn level(&self) -> String {
        self.text(7)
    }

    fn text(&self, index: usize) -> String {
        match self.0.get(index) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighPotential {
    #[serde(default, deserialize_with = "or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub field: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShortlistCandidate {
    #[serde(default, deserialize_with = "or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: f64,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Set instead of `filename` and `skills` when the backend could not
    /// process the file.
    #[serde(default)]
    pub status: Option<String>,
}

/// The free-text fields of the resume generator, sent verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratorForm {
    #[serde(default, deserialize_with = "or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub mobile: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub experience: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub education: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub projects: String,
    #[serde(default, deserialize_with = "or_empty")]
    pub skills: String,
    /// PDF template, `classic` or `modern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ParsedResume {
    #[serde(flatten)]
    pub form: GeneratorForm,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: f64,
    #[serde(default, deserialize_with = "or_empty")]
    pub field: String,
    #[serde(default)]
    pub rec_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeResponse {
    #[serde(default, deserialize_with = "or_empty")]
    pub optimized: String,
}

/// One file picked by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn pdf(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: "application/pdf".to_string(),
            bytes,
        }
    }
}

/// Accepts a string or null; null and absent both read as empty.
fn or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts numbers and numeric strings; scores stored as text come back as
/// strings from the listing endpoints.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}
