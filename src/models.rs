use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDataset {
    pub metadata: Metadata,
    #[serde(rename = "responden")]
    pub respondents: Vec<Respondent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "institusi")]
    pub institution: String,
    #[serde(rename = "tanggalSurvei")]
    pub survey_date: String,
}

// Wire keys follow the survey export format; the struct fields carry the
// English names used throughout the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Respondent {
    pub timestamp: String,
    pub email: String,
    #[serde(rename = "jenis_kelamin")]
    pub gender: String,
    pub semester: u8,
    #[serde(rename = "pengalaman_programming")]
    pub programming_experience: String,
    #[serde(rename = "frekuensi_penggunaan")]
    pub usage_frequency: String,
    #[serde(rename = "durasi_penggunaan")]
    pub usage_duration: String,
    #[serde(rename = "tools_ai")]
    pub ai_tools: Vec<String>,
    #[serde(rename = "mata_kuliah")]
    pub courses: Vec<String>,
    #[serde(rename = "pemahaman_konsep")]
    pub concept_understanding: u8,
    #[serde(rename = "efisiensi_tugas")]
    pub task_efficiency: u8,
    #[serde(rename = "debugging_code")]
    pub code_debugging: u8,
    #[serde(rename = "kreativitas")]
    pub creativity: u8,
    #[serde(rename = "etika_penggunaan")]
    pub usage_ethics: u8,
    #[serde(rename = "kekhawatiran")]
    pub concerns: Vec<String>,
    #[serde(rename = "skill_penting")]
    pub key_skills: Vec<String>,
    #[serde(rename = "penting_karir")]
    pub career_importance: u8,
}

/// The six ordinal 1-5 survey questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericField {
    ConceptUnderstanding,
    TaskEfficiency,
    CodeDebugging,
    Creativity,
    UsageEthics,
    CareerImportance,
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        NumericField::ConceptUnderstanding,
        NumericField::TaskEfficiency,
        NumericField::CodeDebugging,
        NumericField::Creativity,
        NumericField::UsageEthics,
        NumericField::CareerImportance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::ConceptUnderstanding => "Concept Understanding",
            NumericField::TaskEfficiency => "Task Efficiency",
            NumericField::CodeDebugging => "Code Debugging",
            NumericField::Creativity => "Problem-solving Creativity",
            NumericField::UsageEthics => "Usage Ethics",
            NumericField::CareerImportance => "Career Importance",
        }
    }

    pub fn value(self, respondent: &Respondent) -> u8 {
        match self {
            NumericField::ConceptUnderstanding => respondent.concept_understanding,
            NumericField::TaskEfficiency => respondent.task_efficiency,
            NumericField::CodeDebugging => respondent.code_debugging,
            NumericField::Creativity => respondent.creativity,
            NumericField::UsageEthics => respondent.usage_ethics,
            NumericField::CareerImportance => respondent.career_importance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: u8,
    pub max: u8,
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub median: f64,
    pub mode: u8,
    pub std_dev: f64,
    pub range: ValueRange,
}

/// Complete derived aggregate over one response set. Built once by
/// `aggregate::build_summary` and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_respondents: usize,
    pub gender: Vec<LabelCount>,
    pub semester: Vec<LabelCount>,
    pub experience: Vec<LabelCount>,
    pub frequency: Vec<LabelCount>,
    pub duration: Vec<LabelCount>,
    pub top_tools: Vec<LabelCount>,
    pub top_courses: Vec<LabelCount>,
    pub top_concerns: Vec<LabelCount>,
    pub top_skills: Vec<LabelCount>,
    pub numeric_stats: Vec<(NumericField, NumericSummary)>,
    pub experience_tools: Vec<(String, f64)>,
}
