use std::path::Path;

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Metadata, NumericField, Respondent, SurveyDataset};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("dataset contains no respondents")]
    NoRespondents,
    #[error("respondent {index} ({email}): {field} is {value}, expected a 1-5 rating")]
    RatingOutOfRange {
        index: usize,
        email: String,
        field: &'static str,
        value: u8,
    },
}

pub fn load(path: &Path) -> anyhow::Result<SurveyDataset> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read survey data from {}", path.display()))?;
    let dataset: SurveyDataset = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid survey dataset", path.display()))?;
    validate(&dataset)?;
    info!(
        respondents = dataset.respondents.len(),
        institution = %dataset.metadata.institution,
        "survey dataset loaded"
    );
    Ok(dataset)
}

/// Explicit validation pass: the aggregation layer assumes well-typed,
/// in-range records, so violations must fail loudly here.
pub fn validate(dataset: &SurveyDataset) -> Result<(), ValidationError> {
    if dataset.respondents.is_empty() {
        return Err(ValidationError::NoRespondents);
    }

    for (index, respondent) in dataset.respondents.iter().enumerate() {
        for field in NumericField::ALL {
            let value = field.value(respondent);
            if !(1..=5).contains(&value) {
                return Err(ValidationError::RatingOutOfRange {
                    index,
                    email: respondent.email.clone(),
                    field: field.label(),
                    value,
                });
            }
        }
    }

    debug!(respondents = dataset.respondents.len(), "dataset validated");
    Ok(())
}

/// Small realistic dataset for demos and tests.
pub fn sample() -> SurveyDataset {
    #[allow(clippy::too_many_arguments)]
    fn respondent(
        timestamp: &str,
        email: &str,
        gender: &str,
        semester: u8,
        experience: &str,
        frequency: &str,
        duration: &str,
        tools: &[&str],
        courses: &[&str],
        ratings: [u8; 6],
        concerns: &[&str],
        skills: &[&str],
    ) -> Respondent {
        Respondent {
            timestamp: timestamp.to_string(),
            email: email.to_string(),
            gender: gender.to_string(),
            semester,
            programming_experience: experience.to_string(),
            usage_frequency: frequency.to_string(),
            usage_duration: duration.to_string(),
            ai_tools: tools.iter().map(|t| t.to_string()).collect(),
            courses: courses.iter().map(|c| c.to_string()).collect(),
            concept_understanding: ratings[0],
            task_efficiency: ratings[1],
            code_debugging: ratings[2],
            creativity: ratings[3],
            usage_ethics: ratings[4],
            concerns: concerns.iter().map(|c| c.to_string()).collect(),
            key_skills: skills.iter().map(|s| s.to_string()).collect(),
            career_importance: ratings[5],
        }
    }

    SurveyDataset {
        metadata: Metadata {
            title: "Analisis Penggunaan AI dalam Pembelajaran Pemrograman".to_string(),
            institution: "Universitas Teknologi Nusantara".to_string(),
            survey_date: "Maret 2025".to_string(),
        },
        respondents: vec![
            respondent(
                "2025/03/10 9:12:41",
                "andi.pratama@student.example.ac.id",
                "Laki-laki",
                4,
                "Pemula",
                "Setiap hari",
                "1-2 jam",
                &["ChatGPT", "GitHub Copilot"],
                &["Algoritma dan Pemrograman", "Struktur Data"],
                [4, 5, 4, 3, 3, 5],
                &["Ketergantungan berlebihan", "Informasi tidak akurat"],
                &["Berpikir kritis", "Logika pemrograman"],
            ),
            respondent(
                "2025/03/10 10:03:17",
                "siti.rahma@student.example.ac.id",
                "Perempuan",
                4,
                "Pemula",
                "Beberapa kali seminggu",
                "< 1 jam",
                &["ChatGPT"],
                &["Algoritma dan Pemrograman", "Basis Data"],
                [3, 4, 3, 4, 4, 4],
                &["Plagiarisme", "Ketergantungan berlebihan"],
                &["Berpikir kritis", "Problem solving"],
            ),
            respondent(
                "2025/03/10 11:47:02",
                "budi.santoso@student.example.ac.id",
                "Laki-laki",
                6,
                "Menengah",
                "Setiap hari",
                "2-4 jam",
                &["ChatGPT", "Gemini", "Claude"],
                &["Pemrograman Web", "Struktur Data"],
                [5, 5, 4, 4, 3, 5],
                &["Berkurangnya kemampuan problem-solving"],
                &["Logika pemrograman", "Debugging mandiri"],
            ),
            respondent(
                "2025/03/11 8:25:33",
                "dewi.lestari@student.example.ac.id",
                "Perempuan",
                6,
                "Menengah",
                "Beberapa kali seminggu",
                "1-2 jam",
                &["ChatGPT", "GitHub Copilot", "Blackbox AI"],
                &["Basis Data", "Pemrograman Web"],
                [4, 4, 5, 3, 4, 4],
                &["Ketergantungan berlebihan", "Plagiarisme"],
                &["Problem solving", "Berpikir kritis"],
            ),
            respondent(
                "2025/03/11 14:58:09",
                "rizky.hidayat@student.example.ac.id",
                "Laki-laki",
                2,
                "Pemula",
                "Jarang",
                "< 1 jam",
                &["ChatGPT"],
                &["Algoritma dan Pemrograman"],
                [2, 3, 2, 2, 5, 3],
                &["Informasi tidak akurat"],
                &["Logika pemrograman"],
            ),
            respondent(
                "2025/03/12 9:41:56",
                "nadia.putri@student.example.ac.id",
                "Perempuan",
                8,
                "Mahir",
                "Setiap hari",
                "> 4 jam",
                &["ChatGPT", "GitHub Copilot", "Claude", "Gemini"],
                &["Pemrograman Web", "Struktur Data", "Basis Data"],
                [5, 5, 5, 4, 2, 5],
                &["Ketergantungan berlebihan"],
                &["Debugging mandiri", "Berpikir kritis"],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_dataset_is_valid() {
        assert_eq!(validate(&sample()), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_dataset() {
        let mut dataset = sample();
        dataset.respondents.clear();
        assert_eq!(validate(&dataset), Err(ValidationError::NoRespondents));
    }

    #[test]
    fn validate_rejects_out_of_range_rating() {
        let mut dataset = sample();
        dataset.respondents[1].creativity = 0;
        match validate(&dataset) {
            Err(ValidationError::RatingOutOfRange { index, field, value, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "Problem-solving Creativity");
                assert_eq!(value, 0);
            }
            other => panic!("expected RatingOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn load_parses_the_wire_format() {
        let raw = r#"{
            "metadata": {
                "judul": "Analisis Penggunaan AI",
                "institusi": "Universitas Contoh",
                "tanggalSurvei": "Maret 2025"
            },
            "responden": [{
                "timestamp": "2025/03/10 9:12:41",
                "email": "a@example.ac.id",
                "jenis_kelamin": "Laki-laki",
                "semester": 4,
                "pengalaman_programming": "Pemula",
                "frekuensi_penggunaan": "Setiap hari",
                "durasi_penggunaan": "1-2 jam",
                "tools_ai": ["ChatGPT"],
                "mata_kuliah": ["Struktur Data"],
                "pemahaman_konsep": 4,
                "efisiensi_tugas": 5,
                "debugging_code": 4,
                "kreativitas": 3,
                "etika_penggunaan": 3,
                "kekhawatiran": ["Plagiarisme"],
                "skill_penting": ["Berpikir kritis"],
                "penting_karir": 5
            }]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, raw).unwrap();

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.metadata.institution, "Universitas Contoh");
        assert_eq!(dataset.respondents.len(), 1);
        let first = &dataset.respondents[0];
        assert_eq!(first.gender, "Laki-laki");
        assert_eq!(first.ai_tools, vec!["ChatGPT".to_string()]);
        assert_eq!(first.career_importance, 5);
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load(&path).is_err());
    }
}
