//! Heuristic scoring engine.
//!
//! Three independent sub-analyzers read a [`PageSignals`] record and a
//! combiner blends their results into one overall score. A sub-analyzer that
//! fails is replaced by its worst-case default and tagged as degraded; the
//! report is always produced.

pub mod basic;
pub mod content;
pub mod technical;
pub mod weights;

#[cfg(test)]
mod tests;

pub use basic::{BasicAnalyzer, BasicScore, ElementStatus, HeadingStatus, ImageStatus};
pub use content::{ContentAnalyzer, ContentScore, Keyword};
pub use technical::{TechnicalAnalyzer, TechnicalScore};
pub use weights::ScoringWeights;

use crate::error::ScoreError;
use crate::results::PageSignals;
use serde::{Serialize, Serializer};
use std::fmt;

/// A named deviation from a structural or content best practice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingTitle,
    TitleTooLong { max: usize },
    MissingMetaDescription,
    MetaDescriptionTooLong { max: usize },
    MissingH1,
    MultipleH1 { count: usize },
    ImagesMissingAlt { count: usize },
    ContentTooShort { min: usize },
    NoInternalLinks,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingTitle => write!(f, "missing title"),
            Issue::TitleTooLong { max } => write!(f, "title too long (> {} characters)", max),
            Issue::MissingMetaDescription => write!(f, "missing meta description"),
            Issue::MetaDescriptionTooLong { max } => {
                write!(f, "meta description too long (> {} characters)", max)
            }
            Issue::MissingH1 => write!(f, "missing H1"),
            Issue::MultipleH1 { count } => write!(f, "multiple H1 tags ({})", count),
            Issue::ImagesMissingAlt { count } => write!(f, "{} images missing alt text", count),
            Issue::ContentTooShort { min } => write!(f, "content too short (< {} words)", min),
            Issue::NoInternalLinks => write!(f, "no internal links"),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One sub-analyzer of the engine
pub trait SubAnalyzer {
    type Output;

    /// Short name used in logs and degradation reasons
    const NAME: &'static str;

    fn analyze(&self, signals: &PageSignals) -> Result<Self::Output, ScoreError>;

    /// Worst-case value substituted when `analyze` fails
    fn degraded(&self, signals: &PageSignals) -> Self::Output;
}

/// Outcome of one sub-analyzer
#[derive(Debug, Clone, PartialEq)]
pub enum SubScore<T> {
    Ok(T),
    Degraded { value: T, reason: String },
}

impl<T> SubScore<T> {
    /// Run `analyzer`, substituting its default on failure
    pub fn evaluate<A>(analyzer: &A, signals: &PageSignals) -> Self
    where
        A: SubAnalyzer<Output = T>,
    {
        match analyzer.analyze(signals) {
            Ok(value) => SubScore::Ok(value),
            Err(e) => {
                ::log::warn!(
                    "{} sub-score degraded for {}: {}",
                    A::NAME,
                    signals.source_url,
                    e
                );
                SubScore::Degraded {
                    value: analyzer.degraded(signals),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The computed value, or the substituted default
    pub fn value(&self) -> &T {
        match self {
            SubScore::Ok(value) | SubScore::Degraded { value, .. } => value,
        }
    }

    /// The computed value; `None` when degraded
    pub fn ok(&self) -> Option<&T> {
        match self {
            SubScore::Ok(value) => Some(value),
            SubScore::Degraded { .. } => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SubScore::Degraded { .. })
    }
}

#[derive(Serialize)]
struct TaggedSubScore<'a, T> {
    #[serde(flatten)]
    value: &'a T,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<T: Serialize> Serialize for SubScore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged = match self {
            SubScore::Ok(value) => TaggedSubScore {
                value,
                status: "ok",
                reason: None,
            },
            SubScore::Degraded { value, reason } => TaggedSubScore {
                value,
                status: "degraded",
                reason: Some(reason.as_str()),
            },
        };
        tagged.serialize(serializer)
    }
}

/// Scores derived from one [`PageSignals`] record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub basic: SubScore<BasicScore>,
    pub technical: SubScore<TechnicalScore>,
    pub content: SubScore<ContentScore>,
    /// Weighted blend in `[0, 100]`
    pub overall: u32,
}

impl ScoreReport {
    /// Basic and technical issues together
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.basic
            .value()
            .issues
            .iter()
            .chain(self.technical.value().issues.iter())
    }
}

/// Score `signals` with the default weights
pub fn score(signals: &PageSignals) -> ScoreReport {
    score_with(signals, &ScoringWeights::default())
}

/// Score `signals` with explicit weights
pub fn score_with(signals: &PageSignals, weights: &ScoringWeights) -> ScoreReport {
    let basic = SubScore::evaluate(&BasicAnalyzer::new(weights), signals);
    let technical = SubScore::evaluate(&TechnicalAnalyzer::new(weights), signals);
    let content = SubScore::evaluate(&ContentAnalyzer::new(weights), signals);
    let overall = combine(&basic, &content, weights);

    ::log::debug!(
        "Scored {}: basic={} technical={} content={} overall={}",
        signals.source_url,
        basic.value().score,
        technical.value().score,
        content.value().score,
        overall
    );

    ScoreReport {
        basic,
        technical,
        content,
        overall,
    }
}

/// Weighted blend of the structural score, content quality and readability
///
/// A degraded sub-score contributes zero but its weight stays in the
/// denominator, so scores remain comparable across runs.
pub fn combine(
    basic: &SubScore<BasicScore>,
    content: &SubScore<ContentScore>,
    weights: &ScoringWeights,
) -> u32 {
    let max = weights.max_weight();
    if max.is_nan() || max <= 0.0 {
        return 0;
    }

    let mut total = 0.0;
    if let Some(basic) = basic.ok() {
        total += f64::from(basic.score) / 100.0 * weights.basic_weight;
    }
    if let Some(content) = content.ok() {
        total += f64::from(content.quality) / 10.0 * weights.quality_weight;
        total += f64::from(content.readability) / 10.0 * weights.readability_weight;
    }

    (total / max * 100.0).round().clamp(0.0, 100.0) as u32
}
