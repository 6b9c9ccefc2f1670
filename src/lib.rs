// Re-export modules
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod links;
pub mod narrative;
pub mod parsers;
pub mod report;
pub mod results;
pub mod scoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{AnalyzeError, FetchError};
pub use extractor::extract;
pub use report::AnalysisReport;
pub use results::PageSignals;
pub use scoring::{ScoreReport, score};

use config::AnalyzerConfig;
use fetch::Fetcher;
use narrative::Narrator;
use std::path::Path;

/// Main entry point: fetches a page, extracts signals, scores them and
/// assembles the report
pub struct Analyzer {
    config: AnalyzerConfig,
    narrator: Option<Box<dyn Narrator>>,
}

impl Analyzer {
    /// Create an analyzer with the given configuration and no narrator
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            narrator: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, AnalyzeError> {
        let config = AnalyzerConfig::from_file(path)?;
        Ok(Self::new(config))
    }

    /// Set the fetch timeout in seconds
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch.timeout_secs = timeout_seconds;
        self
    }

    /// Attach a narrator; its failure never fails an analysis
    pub fn with_narrator(mut self, narrator: Box<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Attach the narrator selected by the configuration
    pub fn with_configured_narrator(mut self) -> Result<Self, AnalyzeError> {
        self.narrator = narrative::from_config(&self.config.narrator)?;
        Ok(self)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fetch and analyze `url`
    ///
    /// Only a failed fetch fails the analysis; once markup is in hand a
    /// report is always produced.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalyzeError> {
        let fetcher = Fetcher::new(&self.config.fetch).map_err(AnalyzeError::Client)?;
        let page = fetcher.fetch(url).await?;
        Ok(self.analyze_markup_narrated(&page.markup, &page.final_url).await)
    }

    /// Analyze markup already retrieved from `final_url`, without narrative
    pub fn analyze_markup(&self, markup: &str, final_url: &str) -> AnalysisReport {
        let signals = extractor::extract(markup, final_url);
        let scores = scoring::score_with(&signals, &self.config.scoring);
        report::aggregate(signals, scores, &self.config.scoring)
    }

    /// Analyze markup already retrieved from `final_url`, then narrate
    pub async fn analyze_markup_narrated(&self, markup: &str, final_url: &str) -> AnalysisReport {
        let mut report = self.analyze_markup(markup, final_url);

        if let Some(narrator) = &self.narrator {
            match narrator.narrate(&report).await {
                Ok(narrative) => report.narrative = Some(narrative),
                Err(e) => {
                    ::log::warn!(
                        "{} narrator failed for {}, returning report without narrative: {}",
                        narrator.name(),
                        report.url,
                        e
                    );
                }
            }
        }

        ::log::info!(
            "Analysis of {} complete: overall {}/100",
            report.url,
            report.scores.overall
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeError;
    use crate::narrative::{Narrative, TemplateNarrator};
    use async_trait::async_trait;

    struct FailingNarrator;

    #[async_trait]
    impl Narrator for FailingNarrator {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn narrate(&self, _report: &AnalysisReport) -> Result<Narrative, NarrativeError> {
            Err(NarrativeError::EmptyResponse)
        }
    }

    const PAGE: &str = r#"<html><head><title>Garden tips</title></head>
        <body><h1>Garden</h1><p>Water plants early. Mulch keeps soil moist.</p>
        <a href="/more">More</a></body></html>"#;

    #[test]
    fn test_analyze_markup_without_narrator() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let report = analyzer.analyze_markup(PAGE, "https://example.com/garden");
        assert_eq!(report.url, "https://example.com/garden");
        assert_eq!(report.signals.title, "Garden tips");
        assert_eq!(report.metrics.seo, report.scores.overall);
        assert!(report.narrative.is_none());
    }

    #[tokio::test]
    async fn test_narrator_failure_keeps_report() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).with_narrator(Box::new(FailingNarrator));
        let report = analyzer
            .analyze_markup_narrated(PAGE, "https://example.com/garden")
            .await;
        assert!(report.narrative.is_none());
        assert_eq!(report.signals.h1_count(), 1);
    }

    #[tokio::test]
    async fn test_template_narrator_attaches_text() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).with_narrator(Box::new(TemplateNarrator));
        let report = analyzer
            .analyze_markup_narrated(PAGE, "https://example.com/garden")
            .await;
        let narrative = report.narrative.expect("template narrative");
        assert!(narrative.detailed_findings.contains("URL: https://example.com/garden"));
    }

    #[tokio::test]
    async fn test_invalid_address_is_a_fetch_failure() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).with_timeout(1);
        assert_eq!(analyzer.config().fetch.timeout_secs, 1);
        let err = analyzer.analyze("mailto:someone@example.com").await.unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::Fetch(FetchError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_weights_from_config_are_used() {
        let config = AnalyzerConfig::from_json(r#"{"scoring": {"basic_issue_penalty": 50}}"#).unwrap();
        let report = Analyzer::new(config).analyze_markup("", "https://example.com/");
        // missing title, meta description and H1
        assert_eq!(report.scores.basic.value().score, 0);
    }
}
