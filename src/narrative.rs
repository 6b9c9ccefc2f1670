//! Narrative text for a finished report.
//!
//! Narration reads the report and never feeds back into it: a report is
//! complete with or without narrative.

use crate::config::{NarratorConfig, NarratorKind};
use crate::error::NarrativeError;
use crate::report::AnalysisReport;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub executive_summary: String,
    pub detailed_findings: String,
}

/// Produces narrative text from a report
#[async_trait]
pub trait Narrator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn narrate(&self, report: &AnalysisReport) -> Result<Narrative, NarrativeError>;
}

/// Build the narrator selected by the configuration, `None` when disabled
pub fn from_config(
    config: &NarratorConfig,
) -> Result<Option<Box<dyn Narrator>>, NarrativeError> {
    match config.kind {
        NarratorKind::None => Ok(None),
        NarratorKind::Template => Ok(Some(Box::new(TemplateNarrator))),
        NarratorKind::Chat => Ok(Some(Box::new(ChatNarrator::new(config)?))),
    }
}

fn assessment(score: u32) -> &'static str {
    if score >= 80 {
        "excellent"
    } else if score >= 60 {
        "good"
    } else if score >= 40 {
        "fair"
    } else {
        "poor"
    }
}

/// Renders narrative offline from the report's numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn render(report: &AnalysisReport) -> Narrative {
        Narrative {
            executive_summary: Self::executive_summary(report),
            detailed_findings: Self::detailed_findings(report),
        }
    }

    fn executive_summary(report: &AnalysisReport) -> String {
        let m = &report.metrics;
        let s = &report.signals;

        let mut strengths = Vec::new();
        if !s.title.is_empty() {
            strengths.push("the page has a title");
        }
        if !s.meta_description.is_empty() {
            strengths.push("a meta description is present");
        }
        if s.h1_count() == 1 {
            strengths.push("there is a single H1 heading");
        }
        if !s.images.is_empty() && s.images_without_alt() == 0 {
            strengths.push("every image has alt text");
        }

        let mut text = format!(
            "{} scores {}/100 overall, which is {}. The SEO score is {}/100, performance {}/100 and content {}/100.",
            report.url,
            m.overall,
            assessment(m.overall),
            m.seo,
            m.performance,
            m.content
        );
        if !strengths.is_empty() {
            let _ = write!(text, " Strengths: {}.", strengths.join("; "));
        }
        if m.total_issues > 0 {
            let _ = write!(
                text,
                " {} issues were found; the action plan estimates up to {} points of improvement.",
                m.total_issues, report.action_plan.estimated_improvement
            );
        } else {
            let _ = write!(text, " No issues were found.");
        }
        text
    }

    fn detailed_findings(report: &AnalysisReport) -> String {
        let s = &report.signals;
        let basic = report.scores.basic.value();
        let technical = report.scores.technical.value();
        let content = report.scores.content.value();

        let mut text = String::new();
        let _ = writeln!(text, "URL: {}", report.url);
        let _ = writeln!(text, "Analyzed: {}", s.scraped_at.format("%Y-%m-%d"));
        let _ = writeln!(text);
        let _ = writeln!(text, "Content:");
        let _ = writeln!(text, "- Word count: {}", s.word_count);
        let _ = writeln!(
            text,
            "- Reading time: ~{} minutes",
            report.metrics.reading_time_minutes
        );
        let _ = writeln!(text, "- Headings: {}", s.headings.len());
        let _ = writeln!(
            text,
            "- Readability: {}/10, quality: {}/10",
            content.readability, content.quality
        );
        if !content.keywords.is_empty() {
            let terms: Vec<&str> = content.keywords.iter().map(|k| k.term.as_str()).collect();
            let _ = writeln!(text, "- Top keywords: {}", terms.join(", "));
        }
        let _ = writeln!(text);
        let _ = writeln!(text, "SEO:");
        let _ = writeln!(
            text,
            "- Title: {}",
            if basic.title_status.present { "present" } else { "missing" }
        );
        let _ = writeln!(
            text,
            "- Meta description: {}",
            if basic.meta_status.present { "present" } else { "missing" }
        );
        let _ = writeln!(text, "- Structural score: {}/100", basic.score);
        let _ = writeln!(text);
        let _ = writeln!(text, "Technical:");
        let _ = writeln!(
            text,
            "- Images with alt text: {}/{}",
            basic.image_status.with_alt, basic.image_status.total
        );
        let _ = writeln!(
            text,
            "- Links: {} internal, {} external",
            technical.internal_link_count, technical.external_link_count
        );
        let _ = writeln!(text, "- Technical score: {}/100", technical.score);

        if !report.recommendations.is_empty() {
            let _ = writeln!(text);
            let _ = writeln!(text, "Recommendations:");
            for rec in &report.recommendations {
                let _ = writeln!(text, "- {}: {}", rec.category, rec.recommendation);
            }
        }
        text.trim_end().to_string()
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn narrate(&self, report: &AnalysisReport) -> Result<Narrative, NarrativeError> {
        Ok(Self::render(report))
    }
}

/// Asks an OpenAI-compatible chat-completions endpoint for the narrative
pub struct ChatNarrator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatNarrator {
    pub fn new(config: &NarratorConfig) -> Result<Self, NarrativeError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(NarrativeError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String, NarrativeError> {
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_completion_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.trim())
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(NarrativeError::Status { status, body });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(NarrativeError::EmptyResponse)
    }
}

fn summary_prompt(report: &AnalysisReport) -> String {
    let s = &report.signals;
    let m = &report.metrics;
    format!(
        "Write an executive summary of a website audit for {url}.\n\n\
         Page facts:\n\
         - Title: {title}\n\
         - Word count: {words}\n\
         - Images: {images}\n\
         - Links: {links}\n\n\
         Scores:\n\
         - SEO: {seo}/100\n\
         - Performance: {perf}/100\n\
         - Content: {content}/100\n\n\
         In two or three short paragraphs cover the overall health of the page, its \
         three main strengths, its three most important improvements and the business \
         impact of making them. Keep it professional and actionable.",
        url = report.url,
        title = if s.title.is_empty() { "(missing)" } else { s.title.as_str() },
        words = s.word_count,
        images = s.images.len(),
        links = s.links.len(),
        seo = m.seo,
        perf = m.performance,
        content = m.content,
    )
}

fn findings_prompt(report: &AnalysisReport) -> String {
    let s = &report.signals;
    let issues: Vec<String> = report.scores.issues().map(|i| i.to_string()).collect();
    format!(
        "Write detailed technical findings for a website audit of {url}.\n\n\
         - Title: {title}\n\
         - Meta description: {meta}\n\
         - Word count: {words}\n\
         - Headings: {headings}\n\
         - Images: {images} ({missing_alt} without alt text)\n\
         - Links: {links}\n\
         - Detected issues: {issues}\n\
         - SEO score: {seo}/100\n\n\
         Give specific, actionable findings on content optimization, technical SEO, \
         user experience and conversion, with examples where possible.",
        url = report.url,
        title = if s.title.is_empty() { "(missing)" } else { s.title.as_str() },
        meta = if s.meta_description.is_empty() {
            "(missing)"
        } else {
            s.meta_description.as_str()
        },
        words = s.word_count,
        headings = s.headings.len(),
        images = s.images.len(),
        missing_alt = s.images_without_alt(),
        links = s.links.len(),
        issues = if issues.is_empty() {
            "none".to_string()
        } else {
            issues.join("; ")
        },
        seo = report.metrics.seo,
    )
}

#[async_trait]
impl Narrator for ChatNarrator {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn narrate(&self, report: &AnalysisReport) -> Result<Narrative, NarrativeError> {
        let executive_summary = self.complete(&summary_prompt(report)).await?;
        let detailed_findings = self.complete(&findings_prompt(report)).await?;
        Ok(Narrative {
            executive_summary,
            detailed_findings,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_completion_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract;
    use crate::report::aggregate;
    use crate::scoring::{ScoringWeights, score};

    fn report() -> AnalysisReport {
        let html = r#"<html><head><title>Example page</title></head>
            <body><h1>Hello</h1><p>Some text about gardening. Gardening is calm.</p>
            <a href="/more">More</a></body></html>"#;
        let signals = extract(html, "https://example.com/");
        let scores = score(&signals);
        aggregate(signals, scores, &ScoringWeights::default())
    }

    #[tokio::test]
    async fn test_template_narrator_mentions_scores() {
        let report = report();
        let narrative = TemplateNarrator.narrate(&report).await.unwrap();
        assert!(narrative.executive_summary.contains("https://example.com/"));
        assert!(
            narrative
                .executive_summary
                .contains(&format!("{}/100 overall", report.metrics.overall))
        );
        assert!(narrative.detailed_findings.contains("Top keywords: gardening"));
        assert!(narrative.detailed_findings.contains("Meta description: missing"));
    }

    #[test]
    fn test_template_is_deterministic() {
        let report = report();
        assert_eq!(TemplateNarrator::render(&report), TemplateNarrator::render(&report));
    }

    #[test]
    fn test_assessment_bands() {
        assert_eq!(assessment(100), "excellent");
        assert_eq!(assessment(80), "excellent");
        assert_eq!(assessment(65), "good");
        assert_eq!(assessment(40), "fair");
        assert_eq!(assessment(0), "poor");
    }

    #[test]
    fn test_chat_narrator_requires_api_key() {
        let config = NarratorConfig {
            kind: NarratorKind::Chat,
            api_key: None,
            ..NarratorConfig::default()
        };
        assert!(matches!(
            ChatNarrator::new(&config),
            Err(NarrativeError::MissingApiKey)
        ));
    }

    #[test]
    fn test_from_config_kinds() {
        let mut config = NarratorConfig::default();
        config.kind = NarratorKind::None;
        assert!(from_config(&config).unwrap().is_none());
        config.kind = NarratorKind::Template;
        assert_eq!(from_config(&config).unwrap().unwrap().name(), "template");
    }

    #[test]
    fn test_prompts_carry_page_facts() {
        let report = report();
        let prompt = findings_prompt(&report);
        assert!(prompt.contains("Title: Example page"));
        assert!(prompt.contains("Meta description: (missing)"));
        assert!(prompt.contains("missing meta description"));
        assert!(summary_prompt(&report).contains("Word count:"));
    }
}
