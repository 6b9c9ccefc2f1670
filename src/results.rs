use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized structural facts extracted from one page's markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    /// Absolute address of the analyzed page
    pub source_url: String,

    /// Trimmed text of the title element, empty when absent
    pub title: String,

    /// Trimmed `content` of `<meta name="description">`, empty when absent
    pub meta_description: String,

    /// Trimmed `content` of `<meta name="keywords">`, empty when absent
    pub meta_keywords: String,

    /// Whitespace-collapsed text of the primary content region
    pub body_text: String,

    /// Number of whitespace-delimited tokens in `body_text`
    pub word_count: usize,

    /// Headings in document order
    pub headings: Vec<Heading>,

    /// Images carrying a source address
    pub images: Vec<Image>,

    /// Anchors carrying an href
    pub links: Vec<Link>,

    /// When extraction ran
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 through 6
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Resolved against the page address, or verbatim when resolution failed
    pub absolute_src: String,
    /// Alt text exactly as authored
    pub alt_text: String,
    pub has_alt: bool,
}

impl Image {
    pub fn new(absolute_src: String, alt_text: String) -> Self {
        let has_alt = !alt_text.is_empty();
        Self {
            absolute_src,
            alt_text,
            has_alt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Resolved against the page address, or verbatim when resolution failed
    pub absolute_href: String,
    pub anchor_text: String,
    pub is_external: bool,
}

impl PageSignals {
    /// Builds a record whose `word_count` is derived from `body_text`
    pub fn new(source_url: String, body_text: String, scraped_at: DateTime<Utc>) -> Self {
        let word_count = crate::parsers::text::word_count(&body_text);
        Self {
            source_url,
            title: String::new(),
            meta_description: String::new(),
            meta_keywords: String::new(),
            body_text,
            word_count,
            headings: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
            scraped_at,
        }
    }

    /// Number of level-1 headings
    pub fn h1_count(&self) -> usize {
        self.headings.iter().filter(|h| h.level == 1).count()
    }

    /// Images without alt text
    pub fn images_without_alt(&self) -> usize {
        self.images.iter().filter(|img| !img.has_alt).count()
    }

    /// Links pointing at the page's own host
    pub fn internal_links(&self) -> usize {
        self.links.iter().filter(|l| !l.is_external).count()
    }

    pub fn external_links(&self) -> usize {
        self.links.iter().filter(|l| l.is_external).count()
    }
}
