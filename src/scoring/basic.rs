use crate::error::ScoreError;
use crate::results::PageSignals;
use crate::scoring::weights::{ScoringWeights, flat_penalty_score};
use crate::scoring::{Issue, SubAnalyzer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Presence and sizing of a title or meta description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementStatus {
    pub present: bool,
    /// Length in characters
    pub length: usize,
    /// Length lies within the recommended range
    pub optimal: bool,
}

impl ElementStatus {
    fn measure(text: &str, min_optimal: usize, max: usize) -> Self {
        let length = text.chars().count();
        Self {
            present: length > 0,
            length,
            optimal: (min_optimal..=max).contains(&length),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStatus {
    pub h1_count: usize,
    pub total_headings: usize,
    /// Heading count per level, keyed `h1`..`h6`
    pub hierarchy: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatus {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    /// Percentage of images carrying alt text, 100 for a page without images
    pub alt_coverage: u32,
}

/// Structural sub-score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicScore {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub title_status: ElementStatus,
    pub meta_status: ElementStatus,
    pub heading_status: HeadingStatus,
    pub image_status: ImageStatus,
}

/// Rewards presence and correct sizing of title, meta description, a single
/// H1 and image alt text
pub struct BasicAnalyzer<'w> {
    weights: &'w ScoringWeights,
}

impl<'w> BasicAnalyzer<'w> {
    pub fn new(weights: &'w ScoringWeights) -> Self {
        Self { weights }
    }
}

impl SubAnalyzer for BasicAnalyzer<'_> {
    type Output = BasicScore;
    const NAME: &'static str = "basic";

    fn analyze(&self, signals: &PageSignals) -> Result<BasicScore, ScoreError> {
        let w = self.weights;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        let title_status = ElementStatus::measure(&signals.title, w.title_min_optimal, w.title_max_len);
        if !title_status.present {
            issues.push(Issue::MissingTitle);
            recommendations.push(format!(
                "Add a descriptive page title ({}-{} characters)",
                w.title_min_optimal, w.title_max_len
            ));
        } else if title_status.length > w.title_max_len {
            issues.push(Issue::TitleTooLong { max: w.title_max_len });
        }

        let meta_status = ElementStatus::measure(
            &signals.meta_description,
            w.meta_description_min_optimal,
            w.meta_description_max_len,
        );
        if !meta_status.present {
            issues.push(Issue::MissingMetaDescription);
            recommendations.push(format!(
                "Add a meta description ({}-{} characters)",
                w.meta_description_min_optimal, w.meta_description_max_len
            ));
        } else if meta_status.length > w.meta_description_max_len {
            issues.push(Issue::MetaDescriptionTooLong {
                max: w.meta_description_max_len,
            });
        }

        let heading_status = heading_status(signals);
        match heading_status.h1_count {
            0 => issues.push(Issue::MissingH1),
            1 => {}
            count => issues.push(Issue::MultipleH1 { count }),
        }

        let image_status = image_status(signals);
        if image_status.without_alt > 0 {
            issues.push(Issue::ImagesMissingAlt {
                count: image_status.without_alt,
            });
        }

        Ok(BasicScore {
            score: flat_penalty_score(issues.len(), w.basic_issue_penalty),
            issues,
            recommendations,
            title_status,
            meta_status,
            heading_status,
            image_status,
        })
    }

    fn degraded(&self, _signals: &PageSignals) -> BasicScore {
        BasicScore::default()
    }
}

fn heading_status(signals: &PageSignals) -> HeadingStatus {
    let mut hierarchy = BTreeMap::new();
    for heading in &signals.headings {
        *hierarchy.entry(format!("h{}", heading.level)).or_insert(0) += 1;
    }
    HeadingStatus {
        h1_count: signals.h1_count(),
        total_headings: signals.headings.len(),
        hierarchy,
    }
}

fn image_status(signals: &PageSignals) -> ImageStatus {
    let total = signals.images.len();
    let without_alt = signals.images_without_alt();
    let with_alt = total - without_alt;
    let alt_coverage = if total == 0 {
        100
    } else {
        (with_alt as f64 / total as f64 * 100.0).round() as u32
    };
    ImageStatus {
        total,
        with_alt,
        without_alt,
        alt_coverage,
    }
}
