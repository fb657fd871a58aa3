use std::collections::HashMap;

use thiserror::Error;

use crate::models::{LabelCount, NumericField, NumericSummary, Respondent, Summary, ValueRange};

/// How many labels a multi-choice ranking keeps.
pub const TOP_SELECTION_SIZE: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("cannot compute descriptive statistics over an empty value sequence")]
    EmptyValues,
}

/// Counts one label per respondent, keyed in first-seen order.
pub fn tally<F>(respondents: &[Respondent], select: F) -> Vec<LabelCount>
where
    F: Fn(&Respondent) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();

    for respondent in respondents {
        let label = select(respondent);
        match index.get(&label) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push(LabelCount { label, count: 1 });
            }
        }
    }

    counts
}

/// Counts one label per selected entry, so a respondent can contribute to
/// several labels. Keyed in first-seen order.
pub fn tally_multi<F>(respondents: &[Respondent], select: F) -> Vec<LabelCount>
where
    F: for<'a> Fn(&'a Respondent) -> &'a [String],
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();

    for respondent in respondents {
        for label in select(respondent) {
            match index.get(label) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(label.clone(), counts.len());
                    counts.push(LabelCount {
                        label: label.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts
}

/// Highest `n` counts in descending order. The sort is stable, so labels with
/// equal counts keep their first-seen order.
pub fn top_n(counts: &[LabelCount], n: usize) -> Vec<LabelCount> {
    let mut ranked = counts.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Descriptive statistics over one ordinal field. The standard deviation is
/// the population form (divide by N). On a mode tie, the value that reaches
/// the winning frequency first in a left-to-right scan wins.
pub fn describe_numeric(values: &[u8]) -> Result<NumericSummary, AggregateError> {
    if values.is_empty() {
        return Err(AggregateError::EmptyValues);
    }

    let count = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / count;

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        f64::from(sorted[mid])
    } else {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    };

    let mut frequencies: HashMap<u8, usize> = HashMap::new();
    let mut mode = values[0];
    let mut mode_frequency = 0usize;
    for &value in values {
        let frequency = frequencies.entry(value).or_insert(0);
        *frequency += 1;
        if *frequency > mode_frequency {
            mode_frequency = *frequency;
            mode = value;
        }
    }

    let variance = values
        .iter()
        .map(|&v| {
            let deviation = f64::from(v) - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / count;

    Ok(NumericSummary {
        mean,
        median,
        mode,
        std_dev: variance.sqrt(),
        range: ValueRange {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        },
    })
}

/// Mean number of AI tools selected, grouped by programming experience.
/// Groups are keyed in first-seen order.
pub fn relate_experience_to_tool_count(respondents: &[Respondent]) -> Vec<(String, f64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, usize, usize)> = Vec::new();

    for respondent in respondents {
        let experience = respondent.programming_experience.clone();
        match index.get(&experience) {
            Some(&slot) => {
                groups[slot].1 += 1;
                groups[slot].2 += respondent.ai_tools.len();
            }
            None => {
                index.insert(experience.clone(), groups.len());
                groups.push((experience, 1, respondent.ai_tools.len()));
            }
        }
    }

    groups
        .into_iter()
        .map(|(experience, members, tools)| (experience, tools as f64 / members as f64))
        .collect()
}

/// Single entry point: derives the complete summary for one response set.
/// Pure and deterministic; fails only when the set is empty.
pub fn build_summary(respondents: &[Respondent]) -> Result<Summary, AggregateError> {
    if respondents.is_empty() {
        return Err(AggregateError::EmptyValues);
    }

    let mut numeric_stats = Vec::with_capacity(NumericField::ALL.len());
    for field in NumericField::ALL {
        let values: Vec<u8> = respondents.iter().map(|r| field.value(r)).collect();
        numeric_stats.push((field, describe_numeric(&values)?));
    }

    Ok(Summary {
        total_respondents: respondents.len(),
        gender: tally(respondents, |r| r.gender.clone()),
        semester: tally(respondents, |r| r.semester.to_string()),
        experience: tally(respondents, |r| r.programming_experience.clone()),
        frequency: tally(respondents, |r| r.usage_frequency.clone()),
        duration: tally(respondents, |r| r.usage_duration.clone()),
        top_tools: top_n(&tally_multi(respondents, |r| &r.ai_tools), TOP_SELECTION_SIZE),
        top_courses: top_n(&tally_multi(respondents, |r| &r.courses), TOP_SELECTION_SIZE),
        top_concerns: top_n(&tally_multi(respondents, |r| &r.concerns), TOP_SELECTION_SIZE),
        top_skills: top_n(
            &tally_multi(respondents, |r| &r.key_skills),
            TOP_SELECTION_SIZE,
        ),
        numeric_stats,
        experience_tools: relate_experience_to_tool_count(respondents),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    fn sample_respondent(experience: &str, tools: &[&str]) -> Respondent {
        Respondent {
            timestamp: "2025/03/10 9:12:41".to_string(),
            email: "student@example.ac.id".to_string(),
            gender: "Laki-laki".to_string(),
            semester: 4,
            programming_experience: experience.to_string(),
            usage_frequency: "Setiap hari".to_string(),
            usage_duration: "1-2 jam".to_string(),
            ai_tools: tools.iter().map(|t| t.to_string()).collect(),
            courses: vec!["Algoritma dan Pemrograman".to_string()],
            concept_understanding: 4,
            task_efficiency: 5,
            code_debugging: 4,
            creativity: 3,
            usage_ethics: 3,
            concerns: vec!["Ketergantungan berlebihan".to_string()],
            key_skills: vec!["Berpikir kritis".to_string()],
            career_importance: 5,
        }
    }

    #[test]
    fn tally_counts_sum_to_total() {
        let respondents = vec![
            sample_respondent("Pemula", &["ChatGPT"]),
            sample_respondent("Menengah", &["ChatGPT"]),
            sample_respondent("Pemula", &["Copilot"]),
        ];
        let counts = tally(&respondents, |r| r.programming_experience.clone());
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, respondents.len());
    }

    #[test]
    fn tally_preserves_first_seen_order() {
        let respondents = vec![
            sample_respondent("Menengah", &[]),
            sample_respondent("Pemula", &[]),
            sample_respondent("Menengah", &[]),
        ];
        let counts = tally(&respondents, |r| r.programming_experience.clone());
        assert_eq!(counts[0].label, "Menengah");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].label, "Pemula");
        assert_eq!(counts[1].count, 1);
    }

    #[test]
    fn tally_multi_counts_every_selection() {
        let respondents = vec![
            sample_respondent("Pemula", &["ChatGPT", "Copilot"]),
            sample_respondent("Pemula", &["ChatGPT"]),
            sample_respondent("Pemula", &[]),
        ];
        let counts = tally_multi(&respondents, |r| &r.ai_tools);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].label, "ChatGPT");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].label, "Copilot");
        assert_eq!(counts[1].count, 1);
    }

    #[test]
    fn top_n_truncates_and_keeps_tie_order() {
        let counts = vec![
            LabelCount {
                label: "D".to_string(),
                count: 3,
            },
            LabelCount {
                label: "A".to_string(),
                count: 10,
            },
            LabelCount {
                label: "B".to_string(),
                count: 8,
            },
            LabelCount {
                label: "C".to_string(),
                count: 8,
            },
        ];
        let ranked = top_n(&counts, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].label, "A");
        assert_eq!(ranked[0].count, 10);
        assert_eq!(ranked[1].label, "B");
        assert_eq!(ranked[2].label, "C");
        assert_eq!(ranked[1].count, 8);
        assert_eq!(ranked[2].count, 8);
    }

    #[test]
    fn top_n_handles_short_input() {
        let counts = vec![LabelCount {
            label: "A".to_string(),
            count: 1,
        }];
        assert_eq!(top_n(&counts, 5).len(), 1);
    }

    #[test]
    fn describe_numeric_matches_known_fixture() {
        let stats = describe_numeric(&[1, 2, 2, 3, 5]).unwrap();
        assert!((stats.mean - 2.6).abs() < 1e-9);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.mode, 2);
        assert!((stats.std_dev - 1.3565).abs() < 1e-4);
        assert_eq!(stats.range.to_string(), "1-5");
    }

    #[test]
    fn median_averages_central_pair_on_even_length() {
        let stats = describe_numeric(&[1, 2, 4, 5]).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn mode_tie_goes_to_first_value_reaching_the_frequency() {
        let stats = describe_numeric(&[2, 1, 1, 2]).unwrap();
        assert_eq!(stats.mode, 1);
    }

    #[test]
    fn std_dev_is_population_form() {
        // Variance of [1, 5] around 3 is 4 with N, 8 with N-1.
        let stats = describe_numeric(&[1, 5]).unwrap();
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn describe_numeric_rejects_empty_input() {
        assert_eq!(describe_numeric(&[]), Err(AggregateError::EmptyValues));
    }

    #[test]
    fn experience_tool_relation_matches_hand_computed_fixture() {
        let respondents = vec![
            sample_respondent("Pemula", &["a", "b"]),
            sample_respondent("Pemula", &["a", "b", "c"]),
            sample_respondent("Mahir", &["a"]),
            sample_respondent("Pemula", &["a", "b", "c", "d"]),
        ];
        let relation = relate_experience_to_tool_count(&respondents);
        assert_eq!(relation.len(), 2);
        assert_eq!(relation[0], ("Pemula".to_string(), 3.0));
        assert_eq!(relation[1], ("Mahir".to_string(), 1.0));
    }

    #[test]
    fn build_summary_is_deterministic() {
        let dataset = dataset::sample();
        let first = build_summary(&dataset.respondents).unwrap();
        let second = build_summary(&dataset.respondents).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn build_summary_single_choice_counts_cover_everyone() {
        let dataset = dataset::sample();
        let summary = build_summary(&dataset.respondents).unwrap();
        for counts in [
            &summary.gender,
            &summary.semester,
            &summary.experience,
            &summary.frequency,
            &summary.duration,
        ] {
            let total: usize = counts.iter().map(|c| c.count).sum();
            assert_eq!(total, summary.total_respondents);
        }
    }

    #[test]
    fn numeric_summaries_stay_within_their_range() {
        let dataset = dataset::sample();
        let summary = build_summary(&dataset.respondents).unwrap();
        assert_eq!(summary.numeric_stats.len(), 6);
        for (field, stats) in &summary.numeric_stats {
            let min = f64::from(stats.range.min);
            let max = f64::from(stats.range.max);
            assert!(
                stats.mean >= min && stats.mean <= max,
                "{} mean out of range",
                field.label()
            );
            assert!(stats.median >= min && stats.median <= max);
            assert!(stats.std_dev >= 0.0);
            assert!((stats.range.min..=stats.range.max).contains(&stats.mode));
        }
    }

    #[test]
    fn build_summary_rejects_empty_response_set() {
        assert_eq!(build_summary(&[]), Err(AggregateError::EmptyValues));
    }
}
