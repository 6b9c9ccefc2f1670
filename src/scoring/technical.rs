use crate::error::ScoreError;
use crate::results::PageSignals;
use crate::scoring::weights::{ScoringWeights, flat_penalty_score};
use crate::scoring::{Issue, SubAnalyzer};
use serde::Serialize;

/// Link and content-length sub-score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalScore {
    pub score: u32,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub total_links: usize,
    pub issues: Vec<Issue>,
}

pub struct TechnicalAnalyzer<'w> {
    weights: &'w ScoringWeights,
}

impl<'w> TechnicalAnalyzer<'w> {
    pub fn new(weights: &'w ScoringWeights) -> Self {
        Self { weights }
    }
}

impl SubAnalyzer for TechnicalAnalyzer<'_> {
    type Output = TechnicalScore;
    const NAME: &'static str = "technical";

    fn analyze(&self, signals: &PageSignals) -> Result<TechnicalScore, ScoreError> {
        let mut issues = Vec::new();

        if signals.word_count < self.weights.min_word_count {
            issues.push(Issue::ContentTooShort {
                min: self.weights.min_word_count,
            });
        }

        let internal_link_count = signals.internal_links();
        if internal_link_count == 0 {
            issues.push(Issue::NoInternalLinks);
        }

        Ok(TechnicalScore {
            score: flat_penalty_score(issues.len(), self.weights.technical_issue_penalty),
            internal_link_count,
            external_link_count: signals.external_links(),
            total_links: signals.links.len(),
            issues,
        })
    }

    fn degraded(&self, signals: &PageSignals) -> TechnicalScore {
        TechnicalScore {
            total_links: signals.links.len(),
            ..TechnicalScore::default()
        }
    }
}
