//! Report aggregation: merges page signals and scores into the final report.

use crate::narrative::Narrative;
use crate::results::PageSignals;
use crate::scoring::{ScoreReport, ScoringWeights};
use crate::utils::reading_time_minutes;
use chrono::{DateTime, Utc};
use serde::Serialize;

const TITLE_PENALTY: i32 = 25;
const META_PENALTY: i32 = 20;
const THIN_CONTENT_PENALTY: i32 = 20;
const MISSING_ALT_PENALTY: i32 = 15;

const CONTENT_BASE: u32 = 70;
const CONTENT_BONUS: u32 = 10;
const RICH_CONTENT_WORDS: usize = 500;
const MANY_HEADINGS: usize = 3;
const MANY_LINKS: usize = 5;
const MIN_INTERNAL_LINKS: usize = 3;

/// Everything known about one analyzed page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub signals: PageSignals,
    pub scores: ScoreReport,
    pub metrics: PerformanceMetrics,
    pub recommendations: Vec<Recommendation>,
    pub action_plan: ActionPlan,
    /// Absent when no narrator ran or narration failed
    pub narrative: Option<Narrative>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub overall: u32,
    /// The scoring engine's overall score
    pub seo: u32,
    pub performance: u32,
    pub content: u32,
    pub technical_issues: usize,
    pub seo_issues: usize,
    pub total_issues: usize,
    pub reading_time_minutes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: &'static str,
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    /// Rough potential gain in points, capped at 100
    pub estimated_improvement: u32,
}

/// Build the report for one page, without narrative
pub fn aggregate(
    signals: PageSignals,
    scores: ScoreReport,
    weights: &ScoringWeights,
) -> AnalysisReport {
    let metrics = performance_metrics(&signals, &scores, weights);
    let recommendations = recommendations(&signals, weights);
    let action_plan = action_plan(&signals, weights);

    AnalysisReport {
        url: signals.source_url.clone(),
        timestamp: Utc::now(),
        signals,
        scores,
        metrics,
        recommendations,
        action_plan,
        narrative: None,
    }
}

pub fn performance_metrics(
    signals: &PageSignals,
    scores: &ScoreReport,
    weights: &ScoringWeights,
) -> PerformanceMetrics {
    let missing_title = signals.title.is_empty();
    let missing_meta = signals.meta_description.is_empty();
    let thin_content = signals.word_count < weights.min_word_count;
    let missing_alt = signals.images_without_alt() > 0;

    let mut performance: i32 = 100;
    if thin_content {
        performance -= THIN_CONTENT_PENALTY;
    }
    if missing_alt {
        performance -= MISSING_ALT_PENALTY;
    }
    if missing_title {
        performance -= TITLE_PENALTY;
    }
    if missing_meta {
        performance -= META_PENALTY;
    }
    let performance = performance.max(0) as u32;

    let mut content = CONTENT_BASE;
    if signals.word_count > RICH_CONTENT_WORDS {
        content += CONTENT_BONUS;
    }
    if signals.headings.len() > MANY_HEADINGS {
        content += CONTENT_BONUS;
    }
    if signals.links.len() > MANY_LINKS {
        content += CONTENT_BONUS;
    }
    let content = content.min(100);

    let seo = scores.overall;
    let overall = (f64::from(seo + performance + content) / 3.0).round() as u32;

    let technical_issues = [missing_title, missing_meta, missing_alt, thin_content]
        .iter()
        .filter(|flag| **flag)
        .count();
    let seo_issues = scores.issues().count();

    PerformanceMetrics {
        overall,
        seo,
        performance,
        content,
        technical_issues,
        seo_issues,
        total_issues: technical_issues + seo_issues,
        reading_time_minutes: reading_time_minutes(signals.word_count),
    }
}

/// Prioritized recommendations, highest priority first
pub fn recommendations(signals: &PageSignals, weights: &ScoringWeights) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let title_len = signals.title.chars().count();
    if title_len < weights.title_min_optimal {
        out.push(Recommendation {
            priority: Priority::High,
            category: "Title",
            issue: if title_len == 0 {
                "Missing page title".to_string()
            } else {
                format!("Title is only {} characters", title_len)
            },
            recommendation: format!(
                "Write a {}-{} character title that leads with the primary keyword",
                weights.title_min_optimal, weights.title_max_len
            ),
        });
    }

    let meta_len = signals.meta_description.chars().count();
    if meta_len < weights.meta_description_min_optimal {
        out.push(Recommendation {
            priority: Priority::High,
            category: "Meta description",
            issue: if meta_len == 0 {
                "Missing meta description".to_string()
            } else {
                format!("Meta description is only {} characters", meta_len)
            },
            recommendation: format!(
                "Write a {}-{} character summary of the page for search snippets",
                weights.meta_description_min_optimal, weights.meta_description_max_len
            ),
        });
    }

    let h1_count = signals.h1_count();
    if h1_count != 1 {
        out.push(Recommendation {
            priority: Priority::Medium,
            category: "Headings",
            issue: if h1_count == 0 {
                "Missing H1 heading".to_string()
            } else {
                format!("{} H1 headings found", h1_count)
            },
            recommendation: "Use exactly one H1 heading carrying the primary keyword".to_string(),
        });
    }

    let without_alt = signals.images_without_alt();
    if without_alt > 0 {
        out.push(Recommendation {
            priority: Priority::Medium,
            category: "Images",
            issue: format!("{} images missing alt text", without_alt),
            recommendation: "Describe every meaningful image with alt text".to_string(),
        });
    }

    if signals.word_count < weights.min_word_count {
        out.push(Recommendation {
            priority: Priority::Medium,
            category: "Content",
            issue: format!("Only {} words of content", signals.word_count),
            recommendation: format!(
                "Expand the page to at least {} words",
                weights.min_word_count
            ),
        });
    }

    let internal = signals.internal_links();
    if internal < MIN_INTERNAL_LINKS {
        out.push(Recommendation {
            priority: Priority::Low,
            category: "Links",
            issue: format!("{} internal links", internal),
            recommendation: "Link to related pages on the same site".to_string(),
        });
    }

    out
}

pub fn action_plan(signals: &PageSignals, weights: &ScoringWeights) -> ActionPlan {
    let mut plan = ActionPlan::default();

    if signals.title.is_empty() {
        plan.immediate.push("Add a page title with the primary keyword".to_string());
    }
    if signals.meta_description.is_empty() {
        plan.immediate.push("Write a meta description".to_string());
    }

    let without_alt = signals.images_without_alt();
    if without_alt > 0 {
        plan.short_term
            .push(format!("Add alt text to {} images", without_alt));
    }
    if signals.word_count < RICH_CONTENT_WORDS.max(weights.min_word_count) {
        plan.short_term
            .push("Expand the content for depth and coverage".to_string());
    }
    if signals.h1_count() != 1 {
        plan.short_term
            .push("Restructure headings around a single H1".to_string());
    }

    if signals.internal_links() < MIN_INTERNAL_LINKS {
        plan.long_term
            .push("Add internal links to related pages".to_string());
    }

    let gain = plan.immediate.len() * 25 + plan.short_term.len() * 15 + plan.long_term.len() * 5;
    plan.estimated_improvement = gain.min(100) as u32;
    plan
}
