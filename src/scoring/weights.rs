use serde::{Deserialize, Serialize};

/// Penalty per basic issue
pub const BASIC_ISSUE_PENALTY: u32 = 15;
/// Penalty per technical issue
pub const TECHNICAL_ISSUE_PENALTY: u32 = 20;
/// Share of the structural sub-score in the overall blend
pub const BASIC_WEIGHT: f64 = 40.0;
/// Share of content quality in the overall blend
pub const QUALITY_WEIGHT: f64 = 20.0;
/// Share of readability in the overall blend
pub const READABILITY_WEIGHT: f64 = 20.0;

pub const TITLE_MAX_LEN: usize = 60;
pub const TITLE_MIN_OPTIMAL: usize = 30;
pub const META_DESCRIPTION_MAX_LEN: usize = 160;
pub const META_DESCRIPTION_MIN_OPTIMAL: usize = 120;
pub const MIN_WORD_COUNT: usize = 300;
pub const KEYWORD_POOL_SIZE: usize = 20;
pub const KEYWORD_REPORT_SIZE: usize = 10;

/// Thresholds, penalties and blend weights used by the scoring engine
///
/// Defaults reproduce the empirically chosen constants above; every field
/// can be overridden from the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub basic_weight: f64,
    pub quality_weight: f64,
    pub readability_weight: f64,
    pub basic_issue_penalty: u32,
    pub technical_issue_penalty: u32,
    pub title_max_len: usize,
    pub title_min_optimal: usize,
    pub meta_description_max_len: usize,
    pub meta_description_min_optimal: usize,
    pub min_word_count: usize,
    pub keyword_pool_size: usize,
    pub keyword_report_size: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            basic_weight: BASIC_WEIGHT,
            quality_weight: QUALITY_WEIGHT,
            readability_weight: READABILITY_WEIGHT,
            basic_issue_penalty: BASIC_ISSUE_PENALTY,
            technical_issue_penalty: TECHNICAL_ISSUE_PENALTY,
            title_max_len: TITLE_MAX_LEN,
            title_min_optimal: TITLE_MIN_OPTIMAL,
            meta_description_max_len: META_DESCRIPTION_MAX_LEN,
            meta_description_min_optimal: META_DESCRIPTION_MIN_OPTIMAL,
            min_word_count: MIN_WORD_COUNT,
            keyword_pool_size: KEYWORD_POOL_SIZE,
            keyword_report_size: KEYWORD_REPORT_SIZE,
        }
    }
}

impl ScoringWeights {
    /// Sum of the blend weights, the denominator of the overall score
    pub fn max_weight(&self) -> f64 {
        self.basic_weight + self.quality_weight + self.readability_weight
    }
}

/// `max(0, 100 - penalty × issues)`
pub fn flat_penalty_score(issue_count: usize, penalty: u32) -> u32 {
    let deduction = (issue_count as u64).saturating_mul(penalty as u64);
    100u64.saturating_sub(deduction) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_penalty_score() {
        assert_eq!(flat_penalty_score(0, 15), 100);
        assert_eq!(flat_penalty_score(4, 15), 40);
        assert_eq!(flat_penalty_score(7, 15), 0);
        assert_eq!(flat_penalty_score(usize::MAX, 20), 0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let weights: ScoringWeights = serde_json::from_str(r#"{"basic_issue_penalty": 10}"#).unwrap();
        assert_eq!(weights.basic_issue_penalty, 10);
        assert_eq!(weights.technical_issue_penalty, TECHNICAL_ISSUE_PENALTY);
        assert_eq!(weights.max_weight(), 80.0);
    }
}
