use url::Url;

/// Resolves element addresses against the page address and classifies links
/// as internal or external by hostname
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Option<Url>,
}

/// Outcome of resolving one raw address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Absolute address after joining with the page address
    Resolved(Url),
    /// The raw string could not be resolved and is kept verbatim
    Verbatim(String),
}

impl Resolution {
    pub fn into_string(self) -> String {
        match self {
            Resolution::Resolved(url) => url.to_string(),
            Resolution::Verbatim(raw) => raw,
        }
    }
}

impl LinkResolver {
    /// Create a resolver for the given page address
    ///
    /// An unparseable page address leaves every element address unresolved.
    pub fn new(source_url: &str) -> Self {
        let base = match Url::parse(source_url) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::debug!("Source address {:?} is not absolute: {}", source_url, e);
                None
            }
        };
        Self { base }
    }

    /// Hostname of the page address, if it has one
    pub fn base_host(&self) -> Option<&str> {
        self.base.as_ref().and_then(|u| u.host_str())
    }

    /// Resolve a raw href/src against the page address
    pub fn resolve(&self, raw: &str) -> Resolution {
        let joined = match &self.base {
            Some(base) => base.join(raw),
            None => Url::parse(raw),
        };

        match joined {
            Ok(url) => Resolution::Resolved(url),
            Err(e) => {
                ::log::debug!("Keeping unresolvable address {:?} verbatim: {}", raw, e);
                Resolution::Verbatim(raw.to_string())
            }
        }
    }

    /// A link is external iff its resolved hostname differs from the page
    /// hostname; scheme and port take no part. Unresolved links are internal.
    pub fn is_external(&self, resolution: &Resolution) -> bool {
        let (Resolution::Resolved(url), Some(base_host)) = (resolution, self.base_host()) else {
            return false;
        };
        url.host_str().unwrap_or("") != base_host
    }

    /// Resolve and classify in one step
    pub fn classify(&self, raw: &str) -> (String, bool) {
        let resolution = self.resolve(raw);
        let external = self.is_external(&resolution);
        (resolution.into_string(), external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_href_is_internal() {
        let resolver = LinkResolver::new("https://example.com/page");
        let (href, external) = resolver.classify("/about");
        assert_eq!(href, "https://example.com/about");
        assert!(!external);
    }

    #[test]
    fn test_other_host_is_external() {
        let resolver = LinkResolver::new("https://example.com/page");
        let (href, external) = resolver.classify("https://other.com/x");
        assert_eq!(href, "https://other.com/x");
        assert!(external);
    }

    #[test]
    fn test_scheme_and_port_are_ignored() {
        let resolver = LinkResolver::new("https://example.com/page");
        assert!(!resolver.classify("http://example.com:8080/x").1);
    }

    #[test]
    fn test_subdomain_is_external() {
        let resolver = LinkResolver::new("https://example.com/");
        assert!(resolver.classify("https://blog.example.com/").1);
    }

    #[test]
    fn test_unresolvable_href_is_kept_verbatim() {
        let resolver = LinkResolver::new("https://example.com/page");
        let (href, external) = resolver.classify("http://[broken");
        assert_eq!(href, "http://[broken");
        assert!(!external);
    }

    #[test]
    fn test_relative_href_without_base_is_kept_verbatim() {
        let resolver = LinkResolver::new("not a url");
        assert_eq!(resolver.base_host(), None);
        let (href, external) = resolver.classify("/about");
        assert_eq!(href, "/about");
        assert!(!external);
    }

    #[test]
    fn test_protocol_relative_href() {
        let resolver = LinkResolver::new("https://example.com/a/b");
        let (href, external) = resolver.classify("//cdn.example.net/x.js");
        assert_eq!(href, "https://cdn.example.net/x.js");
        assert!(external);
    }
}
