use serde::Serialize;

use crate::models::{LabelCount, Summary};

// Dashboard palette.
const PRIMARY: &str = "#6D28D9";
const SECONDARY: &str = "#14B8A6";
const ACCENT: &str = "#EAB308";
const LIGHT_BLUE: &str = "#A855F7";
const PURPLE: &str = "#7C3AED";
const PINK: &str = "#DB2777";
const GRAY: &str = "#9CA3AF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Pie,
    Bar,
    HorizontalBar,
    Radar,
    GroupedBar,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub colors: Vec<&'static str>,
}

/// One widget for the charting collaborator: kind, labels, series, palette
/// and axis bound, bound to a named display region. Re-rendering destroys
/// and recreates the widget on the collaborator side.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub region: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_axis_max: Option<f64>,
}

fn split_counts(counts: &[LabelCount]) -> (Vec<String>, Vec<f64>) {
    let labels = counts.iter().map(|c| c.label.clone()).collect();
    let data = counts.iter().map(|c| c.count as f64).collect();
    (labels, data)
}

fn distribution(
    region: &'static str,
    kind: ChartKind,
    counts: &[LabelCount],
    colors: Vec<&'static str>,
    value_axis_max: Option<f64>,
) -> ChartSpec {
    let (labels, data) = split_counts(counts);
    ChartSpec {
        region,
        kind,
        labels,
        series: vec![ChartSeries {
            label: None,
            data,
            colors,
        }],
        value_axis_max,
    }
}

/// Builds every dashboard chart from the summary, one spec per display
/// region, in render order.
pub fn build_chart_specs(summary: &Summary) -> Vec<ChartSpec> {
    let total = summary.total_respondents as f64;
    let mut specs = Vec::new();

    specs.push(distribution(
        "gender",
        ChartKind::Doughnut,
        &summary.gender,
        vec![PRIMARY, PINK],
        None,
    ));
    specs.push(distribution(
        "semester",
        ChartKind::Bar,
        &summary.semester,
        vec![PRIMARY],
        None,
    ));
    specs.push(distribution(
        "experience",
        ChartKind::Pie,
        &summary.experience,
        vec![PRIMARY, SECONDARY, GRAY],
        None,
    ));
    specs.push(distribution(
        "frequency",
        ChartKind::Doughnut,
        &summary.frequency,
        vec![PRIMARY, LIGHT_BLUE, SECONDARY, ACCENT, PURPLE],
        None,
    ));
    specs.push(distribution(
        "duration",
        ChartKind::Pie,
        &summary.duration,
        vec![PRIMARY, LIGHT_BLUE, SECONDARY, ACCENT],
        None,
    ));
    specs.push(distribution(
        "tools",
        ChartKind::HorizontalBar,
        &summary.top_tools,
        vec![PRIMARY],
        Some(total),
    ));
    specs.push(distribution(
        "courses",
        ChartKind::HorizontalBar,
        &summary.top_courses,
        vec![SECONDARY],
        Some(total),
    ));

    let impact_labels: Vec<String> = summary
        .numeric_stats
        .iter()
        .map(|(field, _)| field.label().to_string())
        .collect();
    let means: Vec<f64> = summary
        .numeric_stats
        .iter()
        .map(|(_, stats)| stats.mean)
        .collect();
    let modes: Vec<f64> = summary
        .numeric_stats
        .iter()
        .map(|(_, stats)| f64::from(stats.mode))
        .collect();

    specs.push(ChartSpec {
        region: "impact-profile",
        kind: ChartKind::Radar,
        labels: impact_labels.clone(),
        series: vec![ChartSeries {
            label: Some("Mean score (1-5)".to_string()),
            data: means.clone(),
            colors: vec![LIGHT_BLUE],
        }],
        value_axis_max: Some(5.0),
    });
    specs.push(ChartSpec {
        region: "mean-vs-mode",
        kind: ChartKind::GroupedBar,
        labels: impact_labels,
        series: vec![
            ChartSeries {
                label: Some("Mean".to_string()),
                data: means,
                colors: vec![PRIMARY],
            },
            ChartSeries {
                label: Some("Mode".to_string()),
                data: modes,
                colors: vec![ACCENT],
            },
        ],
        value_axis_max: Some(5.0),
    });

    specs.push(distribution(
        "concerns",
        ChartKind::HorizontalBar,
        &summary.top_concerns,
        vec![PRIMARY],
        Some(total),
    ));
    specs.push(distribution(
        "skills",
        ChartKind::HorizontalBar,
        &summary.top_skills,
        vec![SECONDARY],
        Some(total),
    ));

    let peak_average = summary
        .experience_tools
        .iter()
        .map(|(_, average)| *average)
        .fold(0.0_f64, f64::max);
    let (labels, data): (Vec<String>, Vec<f64>) =
        summary.experience_tools.iter().cloned().unzip();
    specs.push(ChartSpec {
        region: "experience-tools",
        kind: ChartKind::Bar,
        labels,
        series: vec![ChartSeries {
            label: Some("Average AI tools used".to_string()),
            data,
            colors: vec![PRIMARY, SECONDARY],
        }],
        value_axis_max: Some(peak_average + 1.0),
    });

    specs
}
