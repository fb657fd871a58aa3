use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::models::{LabelCount, Metadata, Respondent, Summary};
use crate::report;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Empty,
}

impl Cell {
    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Int(value) => value.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// One named sheet of the workbook. Rows may differ in width; section
/// banners occupy a single cell.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
}

const RAW_HEADER: [&str; 17] = [
    "Timestamp",
    "Email",
    "Gender",
    "Semester",
    "Programming Experience",
    "AI Usage Frequency",
    "AI Session Duration",
    "AI Tools",
    "Courses",
    "Concept Understanding",
    "Task Efficiency",
    "Code Debugging",
    "Creativity",
    "Usage Ethics",
    "Concerns",
    "Key Skills",
    "Career Importance",
];

/// Sheet 1: the response set flattened to rows, multi-choice selections
/// joined into one delimited cell.
pub fn build_raw_sheet(respondents: &[Respondent]) -> Sheet {
    let mut rows = Vec::with_capacity(respondents.len() + 2);
    rows.push(vec![Cell::text("RAW SURVEY RESPONSES")]);
    rows.push(RAW_HEADER.iter().map(|h| Cell::text(h)).collect());

    for respondent in respondents {
        rows.push(vec![
            Cell::text(&respondent.timestamp),
            Cell::text(&respondent.email),
            Cell::text(&respondent.gender),
            Cell::Int(i64::from(respondent.semester)),
            Cell::text(&respondent.programming_experience),
            Cell::text(&respondent.usage_frequency),
            Cell::text(&respondent.usage_duration),
            Cell::Text(respondent.ai_tools.join(", ")),
            Cell::Text(respondent.courses.join(", ")),
            Cell::Int(i64::from(respondent.concept_understanding)),
            Cell::Int(i64::from(respondent.task_efficiency)),
            Cell::Int(i64::from(respondent.code_debugging)),
            Cell::Int(i64::from(respondent.creativity)),
            Cell::Int(i64::from(respondent.usage_ethics)),
            Cell::Text(respondent.concerns.join(", ")),
            Cell::Text(respondent.key_skills.join(", ")),
            Cell::Int(i64::from(respondent.career_importance)),
        ]);
    }

    Sheet {
        name: "Raw Data",
        rows,
    }
}

fn push_count_block(
    rows: &mut Vec<Vec<Cell>>,
    header: [&str; 3],
    counts: &[LabelCount],
    total: usize,
    label_prefix: &str,
) {
    rows.push(header.iter().map(|h| Cell::text(h)).collect());
    for entry in counts {
        rows.push(vec![
            Cell::Text(format!("{}{}", label_prefix, entry.label)),
            Cell::Int(entry.count as i64),
            Cell::Text(report::percent_label(entry.count, total)),
        ]);
    }
    rows.push(vec![Cell::Empty]);
}

/// Sheet 2: every summary grouping as a labeled section with count and
/// percentage columns, the statistics block, the experience relationship,
/// and the narrative conclusions.
pub fn build_summary_sheet(metadata: &Metadata, summary: &Summary) -> Sheet {
    let total = summary.total_respondents;
    let mut rows: Vec<Vec<Cell>> = vec![
        vec![Cell::text("DESCRIPTIVE STATISTICS REPORT")],
        vec![Cell::text(&metadata.title)],
        vec![Cell::Text(format!("Total respondents: {total}"))],
        vec![Cell::Text(format!("Survey date: {}", metadata.survey_date))],
        vec![Cell::Empty],
        vec![Cell::text("RESPONDENT PROFILE")],
    ];

    push_count_block(
        &mut rows,
        ["Gender", "Count", "Share"],
        &summary.gender,
        total,
        "",
    );
    push_count_block(
        &mut rows,
        ["Semester", "Count", "Share"],
        &summary.semester,
        total,
        "Semester ",
    );
    push_count_block(
        &mut rows,
        ["Programming Experience", "Count", "Share"],
        &summary.experience,
        total,
        "",
    );

    rows.push(vec![Cell::text("AI USAGE PATTERNS")]);
    push_count_block(
        &mut rows,
        ["Usage Frequency", "Count", "Share"],
        &summary.frequency,
        total,
        "",
    );
    push_count_block(
        &mut rows,
        ["Session Duration", "Count", "Share"],
        &summary.duration,
        total,
        "",
    );
    push_count_block(
        &mut rows,
        ["Top 5 AI Tools", "Users", "Share"],
        &summary.top_tools,
        total,
        "",
    );
    push_count_block(
        &mut rows,
        ["Top 5 Courses", "Users", "Share"],
        &summary.top_courses,
        total,
        "",
    );

    rows.push(vec![Cell::text("AI IMPACT AND EFFECTIVENESS (1-5 scale)")]);
    rows.push(
        ["Aspect", "Mean", "Median", "Mode", "Std Dev", "Range"]
            .iter()
            .map(|h| Cell::text(h))
            .collect(),
    );
    for (field, stats) in &summary.numeric_stats {
        rows.push(vec![
            Cell::text(field.label()),
            Cell::Text(format!("{:.2}", stats.mean)),
            Cell::Text(format!("{:.1}", stats.median)),
            Cell::Int(i64::from(stats.mode)),
            Cell::Text(format!("{:.2}", stats.std_dev)),
            Cell::Text(stats.range.to_string()),
        ]);
    }
    rows.push(vec![Cell::Empty]);

    rows.push(vec![Cell::text("ETHICS AND CONCERNS")]);
    push_count_block(
        &mut rows,
        ["Top 5 Concerns", "Count", "Share"],
        &summary.top_concerns,
        total,
        "",
    );
    push_count_block(
        &mut rows,
        ["Top 5 Key Skills", "Count", "Share"],
        &summary.top_skills,
        total,
        "",
    );

    rows.push(vec![Cell::text("RELATIONSHIP ANALYSIS")]);
    rows.push(vec![
        Cell::text("Programming Experience"),
        Cell::text("Average AI Tools Used"),
    ]);
    for (experience, average) in &summary.experience_tools {
        rows.push(vec![
            Cell::text(experience),
            Cell::Text(format!("{average:.1}")),
        ]);
    }
    rows.push(vec![Cell::Empty]);

    rows.push(vec![Cell::text("KEY CONCLUSIONS")]);
    for (position, line) in report::conclusions(summary).iter().enumerate() {
        rows.push(vec![Cell::Text(format!("{}. {}", position + 1, line))]);
    }

    Sheet {
        name: "Summary Report",
        rows,
    }
}

/// File-name stem: the institution with whitespace collapsed to underscores.
pub fn workbook_stem(metadata: &Metadata) -> String {
    let institution: Vec<&str> = metadata.institution.split_whitespace().collect();
    format!("AI_Survey_{}", institution.join("_"))
}

fn sheet_file_name(stem: &str, sheet: &Sheet) -> String {
    let name: Vec<&str> = sheet.name.split_whitespace().collect();
    format!("{}_{}.csv", stem, name.join("_").to_lowercase())
}

/// Writes each sheet as one CSV file under `out_dir` and returns the paths.
pub fn write_workbook(
    out_dir: &Path,
    metadata: &Metadata,
    sheets: &[Sheet],
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let stem = workbook_stem(metadata);
    let mut written = Vec::with_capacity(sheets.len());

    for sheet in sheets {
        let path = out_dir.join(sheet_file_name(&stem, sheet));
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for row in &sheet.rows {
            let record: Vec<String> = row.iter().map(Cell::render).collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;
        info!(sheet = sheet.name, path = %path.display(), "sheet written");
        written.push(path);
    }

    Ok(written)
}
