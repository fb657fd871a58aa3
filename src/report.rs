use std::fmt::Write;

use chrono::Utc;

use crate::models::{LabelCount, Metadata, NumericField, NumericSummary, Summary};

pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub(crate) fn percent_label(count: usize, total: usize) -> String {
    format!("{:.1}%", percentage(count, total))
}

// Tallies are kept in first-seen order, so a strict comparison picks the
// first label on ties, matching the top-N tie-break.
fn top_entry(counts: &[LabelCount]) -> Option<&LabelCount> {
    let mut best: Option<&LabelCount> = None;
    for entry in counts {
        if best.map_or(true, |current| entry.count > current.count) {
            best = Some(entry);
        }
    }
    best
}

fn extreme_means(summary: &Summary) -> Option<(&'static str, f64, &'static str, f64)> {
    let mut highest: Option<(NumericField, &NumericSummary)> = None;
    let mut lowest: Option<(NumericField, &NumericSummary)> = None;
    for (field, stats) in &summary.numeric_stats {
        if highest.map_or(true, |(_, h)| stats.mean > h.mean) {
            highest = Some((*field, stats));
        }
        if lowest.map_or(true, |(_, l)| stats.mean < l.mean) {
            lowest = Some((*field, stats));
        }
    }
    match (highest, lowest) {
        (Some((hf, hs)), Some((lf, ls))) => Some((hf.label(), hs.mean, lf.label(), ls.mean)),
        _ => None,
    }
}

fn career_mean(summary: &Summary) -> Option<f64> {
    summary
        .numeric_stats
        .iter()
        .find(|(field, _)| *field == NumericField::CareerImportance)
        .map(|(_, stats)| stats.mean)
}

/// Narrative conclusion lines derived from the summary, shared between the
/// dashboard report and the export's closing block.
pub fn conclusions(summary: &Summary) -> Vec<String> {
    let total = summary.total_respondents;
    let mut lines = Vec::new();

    if let Some(tool) = summary.top_tools.first() {
        lines.push(format!(
            "{} is the most widely adopted AI tool ({} of respondents).",
            tool.label,
            percent_label(tool.count, total)
        ));
    }
    if let Some((highest, mean, _, _)) = extreme_means(summary) {
        lines.push(format!(
            "AI is rated most effective for {} (mean {:.2}).",
            highest.to_lowercase(),
            mean
        ));
    }
    if let Some(concern) = summary.top_concerns.first() {
        lines.push(format!(
            "{} is the leading concern ({}).",
            concern.label,
            percent_label(concern.count, total)
        ));
    }
    if let Some(skill) = summary.top_skills.first() {
        lines.push(format!(
            "{} is seen as the key skill to master without AI assistance ({}).",
            skill.label,
            percent_label(skill.count, total)
        ));
    }
    if let Some(mean) = career_mean(summary) {
        lines.push(format!(
            "Respondents rate AI as important for their future careers ({:.2} of 5).",
            mean
        ));
    }

    lines
}

fn write_count_section(output: &mut String, heading: &str, counts: &[LabelCount], total: usize) {
    let _ = writeln!(output, "### {heading}");
    for entry in counts {
        let _ = writeln!(
            output,
            "- {}: {} ({})",
            entry.label,
            entry.count,
            percent_label(entry.count, total)
        );
    }
    let _ = writeln!(output);
}

pub fn build_dashboard(metadata: &Metadata, summary: &Summary) -> String {
    let total = summary.total_respondents;
    let mut output = String::new();

    let _ = writeln!(output, "# {}", metadata.title);
    let _ = writeln!(output, "{}", metadata.institution);
    let _ = writeln!(
        output,
        "Survey of {} respondents - {} (report generated {})",
        total,
        metadata.survey_date,
        Utc::now().date_naive()
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Headline Figures");
    if let Some(experience) = top_entry(&summary.experience) {
        let _ = writeln!(
            output,
            "- Top experience level: {} ({})",
            experience.label,
            percent_label(experience.count, total)
        );
    }
    if let Some(tool) = summary.top_tools.first() {
        let _ = writeln!(
            output,
            "- Most used AI tool: {} ({})",
            tool.label,
            percent_label(tool.count, total)
        );
    }
    if let Some(mean) = career_mean(summary) {
        let _ = writeln!(output, "- Mean career-importance rating: {:.2}", mean);
    }
    if let Some(concern) = summary.top_concerns.first() {
        let _ = writeln!(
            output,
            "- Leading concern: {} ({})",
            concern.label,
            percent_label(concern.count, total)
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Respondent Profile");
    write_count_section(&mut output, "Gender", &summary.gender, total);
    write_count_section(&mut output, "Semester", &summary.semester, total);
    write_count_section(
        &mut output,
        "Programming Experience",
        &summary.experience,
        total,
    );

    let _ = writeln!(output, "## Usage Patterns");
    write_count_section(&mut output, "Usage Frequency", &summary.frequency, total);
    write_count_section(&mut output, "Session Duration", &summary.duration, total);
    write_count_section(&mut output, "Top 5 AI Tools", &summary.top_tools, total);
    write_count_section(&mut output, "Top 5 Courses", &summary.top_courses, total);

    let _ = writeln!(output, "## Impact Ratings (1-5 scale)");
    let _ = writeln!(output, "| Aspect | Mean | Median | Mode | Std Dev | Range |");
    let _ = writeln!(output, "|---|---|---|---|---|---|");
    for (field, stats) in &summary.numeric_stats {
        let _ = writeln!(
            output,
            "| {} | {:.2} | {:.1} | {} | {:.2} | {} |",
            field.label(),
            stats.mean,
            stats.median,
            stats.mode,
            stats.std_dev,
            stats.range
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Ethics and Concerns");
    write_count_section(&mut output, "Top 5 Concerns", &summary.top_concerns, total);
    write_count_section(&mut output, "Top 5 Key Skills", &summary.top_skills, total);

    let _ = writeln!(output, "## Experience vs AI Tool Adoption");
    for (experience, average) in &summary.experience_tools {
        let _ = writeln!(output, "- {}: {:.1} tools on average", experience, average);
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Insights");
    if let (Some(semester), Some(gender), Some(experience)) = (
        top_entry(&summary.semester),
        top_entry(&summary.gender),
        top_entry(&summary.experience),
    ) {
        let _ = writeln!(
            output,
            "- Most respondents are semester {} students ({}), predominantly {} \
             programmers ({}); the gender split is led by {} ({}).",
            semester.label,
            percent_label(semester.count, total),
            experience.label.to_lowercase(),
            percent_label(experience.count, total),
            gender.label.to_lowercase(),
            percent_label(gender.count, total)
        );
    }
    if let (Some(tool), Some(course)) = (summary.top_tools.first(), summary.top_courses.first()) {
        let _ = writeln!(
            output,
            "- {} dominates as the most popular tool ({}); AI is used most for {} ({}).",
            tool.label,
            percent_label(tool.count, total),
            course.label,
            percent_label(course.count, total)
        );
    }
    if let Some((highest, high_mean, lowest, low_mean)) = extreme_means(summary) {
        let _ = writeln!(
            output,
            "- AI is most effective at improving {} ({:.2}); {} receives the lowest \
             impact rating ({:.2}).",
            highest.to_lowercase(),
            high_mean,
            lowest,
            low_mean
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Conclusions");
    for (position, line) in conclusions(summary).iter().enumerate() {
        let _ = writeln!(output, "{}. {}", position + 1, line);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::dataset;

    #[test]
    fn dashboard_covers_every_section() {
        let dataset = dataset::sample();
        let summary = aggregate::build_summary(&dataset.respondents).unwrap();
        let dashboard = build_dashboard(&dataset.metadata, &summary);

        for heading in [
            "## Headline Figures",
            "### Gender",
            "### Semester",
            "### Programming Experience",
            "### Usage Frequency",
            "### Session Duration",
            "### Top 5 AI Tools",
            "### Top 5 Courses",
            "## Impact Ratings (1-5 scale)",
            "### Top 5 Concerns",
            "### Top 5 Key Skills",
            "## Experience vs AI Tool Adoption",
            "## Insights",
            "## Conclusions",
        ] {
            assert!(dashboard.contains(heading), "missing section {heading}");
        }
        assert!(dashboard.contains(&dataset.metadata.title));
        assert!(dashboard.contains("Survey of 6 respondents"));
    }

    #[test]
    fn percentages_are_presenter_formatted() {
        assert_eq!(percent_label(3, 6), "50.0%");
        assert_eq!(percent_label(1, 3), "33.3%");
        assert_eq!(percent_label(0, 0), "0.0%");
    }

    #[test]
    fn top_entry_prefers_first_seen_on_ties() {
        let counts = vec![
            LabelCount {
                label: "B".to_string(),
                count: 2,
            },
            LabelCount {
                label: "A".to_string(),
                count: 2,
            },
        ];
        assert_eq!(top_entry(&counts).unwrap().label, "B");
    }

    #[test]
    fn conclusions_cover_the_five_themes() {
        let dataset = dataset::sample();
        let summary = aggregate::build_summary(&dataset.respondents).unwrap();
        let lines = conclusions(&summary);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("ChatGPT"));
        assert!(lines[4].contains("of 5"));
    }
}
