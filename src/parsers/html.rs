use crate::parsers::{Document, Element, text};
use scraper::{ElementRef, Html, Node, Selector};

/// `scraper`-backed document
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses markup; html5ever recovers from any input, including an empty
    /// string or plain text
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    fn selector(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(selector) => Some(selector),
            Err(e) => {
                ::log::warn!("Ignoring unparseable selector {:?}: {:?}", selector, e);
                None
            }
        }
    }
}

impl Document for HtmlDocument {
    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Some(selector) = Self::selector(selector) else {
            return Vec::new();
        };

        self.html
            .select(&selector)
            .map(|el| Element {
                name: el.value().name().to_ascii_lowercase(),
                attributes: el
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                text: el.text().collect::<String>(),
            })
            .collect()
    }

    fn region_text(&self, selector: &str) -> Option<String> {
        let selector = Self::selector(selector)?;
        self.html
            .select(&selector)
            .next()
            .map(block_text)
    }

    fn remove(&mut self, selector: &str) {
        let Some(selector) = Self::selector(selector) else {
            return;
        };

        let ids: Vec<_> = self.html.select(&selector).map(|el| el.id()).collect();
        ::log::trace!("Removing {} elements matching {:?}", ids.len(), selector);
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

/// Text of `el` with whitespace collapsed; a space separates block-level
/// elements, inline markup joins its neighbours as written
fn block_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        let after_block = node.prev_sibling().is_some_and(|prev| is_block(prev.value()));
        if after_block || is_block(node.value()) {
            out.push(' ');
        }
        if let Node::Text(fragment) = node.value() {
            out.push_str(fragment);
        }
    }
    text::collapse_whitespace(&out)
}

fn is_block(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| text::is_block_element(el.name()))
}
