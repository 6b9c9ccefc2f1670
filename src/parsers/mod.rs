pub mod html;
pub mod text;


pub use html::HtmlDocument;

/// Owned snapshot of one selected element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lower-case local tag name (`a`, `img`, `h2`, ...)
    pub name: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Descendant text nodes concatenated without separators
    pub text: String,
}

impl Element {
    /// Looks up an attribute by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A parsed, traversable document
///
/// Any markup parser can sit behind this trait. Selectors are CSS selector
/// strings; a selector the implementation cannot parse selects nothing
/// rather than failing.
pub trait Document {
    /// Every element matching `selector`, in document order
    fn select_all(&self, selector: &str) -> Vec<Element>;

    /// Text nodes of the first element matching `selector`, joined with
    /// spaces and whitespace-collapsed
    fn region_text(&self, selector: &str) -> Option<String>;

    /// Detaches every element matching `selector` from the tree
    fn remove(&mut self, selector: &str);

    /// The first element matching `selector`
    fn select_first(&self, selector: &str) -> Option<Element> {
        self.select_all(selector).into_iter().next()
    }

    /// Trimmed text of the first element matching `selector`, empty when
    /// nothing matches
    fn first_text(&self, selector: &str) -> String {
        self.select_first(selector)
            .map(|el| el.text.trim().to_string())
            .unwrap_or_default()
    }

    /// Trimmed attribute of the first element matching `selector`, empty
    /// when the element or the attribute is missing
    fn first_attr(&self, selector: &str, attr: &str) -> String {
        self.select_first(selector)
            .and_then(|el| el.attr(attr).map(|v| v.trim().to_string()))
            .unwrap_or_default()
    }
}
