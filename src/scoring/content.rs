use crate::error::ScoreError;
use crate::parsers::text;
use crate::results::PageSignals;
use crate::scoring::SubAnalyzer;
use crate::scoring::weights::ScoringWeights;
use crate::utils::round_to;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Tokens shorter than this many characters are not keywords
const MIN_KEYWORD_CHARS: usize = 4;

/// Words that never count as keywords
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "about",
    "after", "also", "been", "before", "being", "both", "could", "does", "each", "from", "have",
    "here", "into", "just", "more", "most", "much", "only", "other", "over", "same", "should",
    "some", "such", "than", "that", "their", "them", "then", "there", "these", "they", "this",
    "those", "very", "were", "what", "when", "where", "which", "while", "will", "with", "would",
    "your",
];

/// Anything that is neither a word character nor whitespace
static PUNCTUATION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"[^\w\s]"));

/// Mean sentence lengths (words) past which readability drops
const LONG_SENTENCE: f64 = 25.0;
const VERY_LONG_SENTENCE: f64 = 30.0;
/// Mean sentence length (words) below which text reads as choppy
const SHORT_SENTENCE: f64 = 10.0;

const SUBSTANTIAL_WORDS: usize = 500;
const EXTENSIVE_WORDS: usize = 1000;
const WELL_STRUCTURED_HEADINGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub term: String,
    pub count: usize,
    /// Share of all words on the page, in percent with two decimals
    pub density: f64,
}

/// Depth and readability sub-score
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentScore {
    /// Mean of readability and quality rounded to a whole point, then
    /// scaled to 0-100 (a mean of 7.5 reports 80)
    pub score: u32,
    pub keywords: Vec<Keyword>,
    /// 1-10, 0 when degraded
    pub readability: u8,
    /// 1-10, 0 when degraded
    pub quality: u8,
    pub word_count: usize,
}

pub struct ContentAnalyzer<'w> {
    weights: &'w ScoringWeights,
}

impl<'w> ContentAnalyzer<'w> {
    pub fn new(weights: &'w ScoringWeights) -> Self {
        Self { weights }
    }
}

impl SubAnalyzer for ContentAnalyzer<'_> {
    type Output = ContentScore;
    const NAME: &'static str = "content";

    fn analyze(&self, signals: &PageSignals) -> Result<ContentScore, ScoreError> {
        let ranked = rank_keywords(&signals.body_text, self.weights.keyword_pool_size)?;
        let readability = readability(&signals.body_text)?;
        let quality = quality(signals, self.weights.min_word_count);

        let total_words = signals.word_count.max(1) as f64;
        let keywords = ranked
            .into_iter()
            .take(self.weights.keyword_report_size)
            .map(|(term, count)| Keyword {
                density: round_to(count as f64 / total_words * 100.0, 2),
                term,
                count,
            })
            .collect();

        let mean = (f64::from(readability) + f64::from(quality)) / 2.0;
        Ok(ContentScore {
            score: mean.round() as u32 * 10,
            keywords,
            readability,
            quality,
            word_count: signals.word_count,
        })
    }

    fn degraded(&self, signals: &PageSignals) -> ContentScore {
        ContentScore {
            word_count: signals.word_count,
            ..ContentScore::default()
        }
    }
}

/// Most frequent keyword candidates, at most `limit`
///
/// The text is lower-cased, punctuation becomes whitespace, and tokens
/// shorter than four characters or in the stop-word set are dropped. Ties
/// keep first-occurrence order.
pub fn rank_keywords(body_text: &str, limit: usize) -> Result<Vec<(String, usize)>, ScoreError> {
    let punctuation = PUNCTUATION.as_ref().map_err(|e| ScoreError::Pattern(e.clone()))?;
    let lowered = body_text.to_lowercase();
    let cleaned = punctuation.replace_all(&lowered, " ");

    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token, order.len());
                order.push((token.to_string(), 1));
            }
        }
    }

    // Stable: equal counts stay in first-occurrence order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    Ok(order)
}

/// Readability on a 1-10 scale from the mean sentence length
pub fn readability(body_text: &str) -> Result<u8, ScoreError> {
    let mean = text::mean_sentence_length(body_text);
    if !mean.is_finite() {
        return Err(ScoreError::NonFinite {
            metric: "mean sentence length",
        });
    }

    let mut score: i32 = 10;
    if mean > LONG_SENTENCE {
        score -= 3;
    }
    if mean > VERY_LONG_SENTENCE {
        score -= 2;
    }
    if mean < SHORT_SENTENCE {
        score -= 2;
    }
    Ok(score.clamp(1, 10) as u8)
}

/// Content depth on a 1-10 scale from length, headings and images
pub fn quality(signals: &PageSignals, min_word_count: usize) -> u8 {
    let mut score: i32 = 5;

    if signals.word_count > SUBSTANTIAL_WORDS {
        score += 2;
    }
    if signals.word_count > EXTENSIVE_WORDS {
        score += 1;
    }
    if signals.word_count < min_word_count {
        score -= 2;
    }

    if !signals.headings.is_empty() {
        score += 1;
    }
    if signals.headings.len() > WELL_STRUCTURED_HEADINGS {
        score += 1;
    }

    if !signals.images.is_empty() {
        score += 1;
    }

    score.clamp(1, 10) as u8
}
