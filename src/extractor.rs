//! Content extraction: raw markup in, [`PageSignals`] out.
//!
//! Extraction never fails. Empty or non-HTML input yields a record with
//! empty fields; addresses that cannot be resolved are kept verbatim.

use crate::links::LinkResolver;
use crate::parsers::{Document, HtmlDocument};
use crate::results::{Heading, Image, Link, PageSignals};
use chrono::{DateTime, Utc};

/// Elements removed before anything but title and meta tags is read
pub const NON_CONTENT_SELECTORS: &str = "script, style, noscript, template, nav, header, footer, aside";

/// Candidate primary content regions, in priority order; the first match wins
pub const CONTENT_REGION_SELECTORS: [&str; 6] =
    ["main", "article", ".content", "#content", ".post", ".entry"];

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Extract page signals from markup fetched from `source_url`
///
/// `source_url` must be the post-redirect address; every relative address
/// in the markup is resolved against it.
pub fn extract(markup: &str, source_url: &str) -> PageSignals {
    extract_at(markup, source_url, Utc::now())
}

/// Same as [`extract`] with an explicit extraction timestamp
pub fn extract_at(markup: &str, source_url: &str, scraped_at: DateTime<Utc>) -> PageSignals {
    let mut doc = HtmlDocument::parse(markup);
    extract_from(&mut doc, source_url, scraped_at)
}

/// Extract from any [`Document`]
///
/// Boilerplate elements are detached from `doc` before headings, images,
/// links and body text are read, so navigation and page chrome never count.
pub fn extract_from<D: Document>(
    doc: &mut D,
    source_url: &str,
    scraped_at: DateTime<Utc>,
) -> PageSignals {
    let resolver = LinkResolver::new(source_url);

    let title = doc.first_text("title");
    let meta_description = doc.first_attr(r#"meta[name="description"]"#, "content");
    let meta_keywords = doc.first_attr(r#"meta[name="keywords"]"#, "content");

    doc.remove(NON_CONTENT_SELECTORS);
    let headings = extract_headings(doc);
    let images = extract_images(doc, &resolver);
    let links = extract_links(doc, &resolver);
    let body_text = extract_body_text(doc);

    let mut signals = PageSignals::new(source_url.to_string(), body_text, scraped_at);
    signals.title = title;
    signals.meta_description = meta_description;
    signals.meta_keywords = meta_keywords;
    signals.headings = headings;
    signals.images = images;
    signals.links = links;

    ::log::debug!(
        "Extracted {}: {} words, {} headings, {} images, {} links",
        source_url,
        signals.word_count,
        signals.headings.len(),
        signals.images.len(),
        signals.links.len()
    );

    signals
}

/// Text of the first matching content region, falling back to the body
fn extract_body_text<D: Document>(doc: &D) -> String {
    let region = CONTENT_REGION_SELECTORS
        .iter()
        .find_map(|selector| doc.region_text(selector).map(|text| (*selector, text)));

    match region {
        Some((selector, text)) if !text.is_empty() => {
            ::log::trace!("Primary content region: {}", selector);
            text
        }
        _ => doc.region_text("body").unwrap_or_default(),
    }
}

fn extract_headings<D: Document>(doc: &D) -> Vec<Heading> {
    doc.select_all(HEADING_SELECTOR)
        .into_iter()
        .filter_map(|el| {
            let level = el.name.strip_prefix('h')?.parse::<u8>().ok()?;
            Some(Heading {
                level,
                text: el.text.trim().to_string(),
            })
        })
        .collect()
}

fn extract_images<D: Document>(doc: &D, resolver: &LinkResolver) -> Vec<Image> {
    doc.select_all("img[src]")
        .into_iter()
        .filter_map(|el| {
            let src = el.attr("src").filter(|s| !s.is_empty())?;
            let absolute_src = resolver.resolve(src).into_string();
            let alt_text = el.attr("alt").unwrap_or_default().to_string();
            Some(Image::new(absolute_src, alt_text))
        })
        .collect()
}

fn extract_links<D: Document>(doc: &D, resolver: &LinkResolver) -> Vec<Link> {
    doc.select_all("a[href]")
        .into_iter()
        .filter_map(|el| {
            let href = el.attr("href").filter(|s| !s.is_empty())?;
            let (absolute_href, is_external) = resolver.classify(href);
            Some(Link {
                absolute_href,
                anchor_text: el.text.trim().to_string(),
                is_external,
            })
        })
        .collect()
}
