//! Simple selector matching
//!
//! Widgets address the host page through a deliberately small selector
//! language: a comma-separated list of compound selectors, each made of an
//! optional tag, an optional `#id`, any number of `.class` parts and any
//! number of attribute conditions (`[name]`, `[name=value]`,
//! `[name^=value]`). Combinators are not supported.

use crate::error::{PlatformError, Result};
use smallvec::SmallVec;

/// Attribute condition inside a compound selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeMatch {
    /// `[name]`
    Present(String),
    /// `[name=value]`
    Equals(String, String),
    /// `[name^=value]`
    Prefix(String, String),
}

/// One compound selector, e.g. `a.nav-link[href^="#"]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub attributes: SmallVec<[AttributeMatch; 1]>,
}

/// View of an element used for matching
///
/// Implemented by document backends so the matcher stays storage agnostic.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl CompoundSelector {
    pub fn matches(&self, element: &impl Matchable) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|cond| match cond {
            AttributeMatch::Present(name) => element.attribute(name).is_some(),
            AttributeMatch::Equals(name, value) => element.attribute(name) == Some(value.as_str()),
            AttributeMatch::Prefix(name, prefix) => element
                .attribute(name)
                .map_or(false, |v| v.starts_with(prefix.as_str())),
        })
    }
}

/// A parsed selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = Vec::new();
        for raw in input.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(invalid(input, "empty selector in list"));
            }
            parts.push(parse_compound(input, raw)?);
        }
        Ok(Self { parts })
    }

    /// True if any selector in the list matches
    pub fn matches(&self, element: &impl Matchable) -> bool {
        self.parts.iter().any(|p| p.matches(element))
    }

    pub fn parts(&self) -> &[CompoundSelector] {
        &self.parts
    }
}

impl std::str::FromStr for Selector {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

fn invalid(selector: &str, reason: impl Into<String>) -> PlatformError {
    PlatformError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.into(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn parse_compound(full: &str, raw: &str) -> Result<CompoundSelector> {
    let mut selector = CompoundSelector::default();
    let mut chars = raw.chars().peekable();

    if chars.peek().map_or(false, |&c| is_ident_char(c)) {
        selector.tag = Some(take_ident(&mut chars));
    } else if chars.peek() == Some(&'*') {
        chars.next();
    }

    while let Some(c) = chars.next() {
        match c {
            '#' => {
                let id = take_ident(&mut chars);
                if id.is_empty() {
                    return Err(invalid(full, "expected identifier after `#`"));
                }
                selector.id = Some(id);
            }
            '.' => {
                let class = take_ident(&mut chars);
                if class.is_empty() {
                    return Err(invalid(full, "expected identifier after `.`"));
                }
                selector.classes.push(class);
            }
            '[' => {
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(invalid(full, "unterminated attribute selector"));
                }
                selector.attributes.push(parse_attribute(full, &body)?);
            }
            c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err(invalid(full, "combinators are not supported"));
            }
            other => {
                return Err(invalid(full, format!("unexpected character `{other}`")));
            }
        }
    }

    Ok(selector)
}

fn parse_attribute(full: &str, body: &str) -> Result<AttributeMatch> {
    let unquote = |v: &str| {
        let v = v.trim();
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(v)
            .to_string()
    };

    if let Some((name, value)) = body.split_once("^=") {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid(full, "attribute name missing"));
        }
        return Ok(AttributeMatch::Prefix(name.to_string(), unquote(value)));
    }
    if let Some((name, value)) = body.split_once('=') {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid(full, "attribute name missing"));
        }
        return Ok(AttributeMatch::Equals(name.to_string(), unquote(value)));
    }

    let name = body.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(invalid(full, "invalid attribute name"));
    }
    Ok(AttributeMatch::Present(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        tag: &'static str,
        classes: Vec<&'static str>,
        attributes: Vec<(&'static str, &'static str)>,
    }

    impl Matchable for Probe {
        fn tag(&self) -> &str {
            self.tag
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.iter().any(|c| *c == class)
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
        }
    }

    fn anchor() -> Probe {
        Probe {
            tag: "a",
            classes: vec!["nav-link"],
            attributes: vec![("href", "#services"), ("id", "services-link")],
        }
    }

    #[test]
    fn test_class_and_id() {
        assert!(Selector::parse(".nav-link").unwrap().matches(&anchor()));
        assert!(Selector::parse("#services-link").unwrap().matches(&anchor()));
        assert!(!Selector::parse(".flip-card").unwrap().matches(&anchor()));
    }

    #[test]
    fn test_attribute_prefix() {
        let selector = Selector::parse("a[href^=\"#\"]").unwrap();
        assert!(selector.matches(&anchor()));

        let external = Probe {
            tag: "a",
            classes: vec![],
            attributes: vec![("href", "https://example.com")],
        };
        assert!(!selector.matches(&external));
    }

    #[test]
    fn test_attribute_equals_and_presence() {
        let button = Probe {
            tag: "button",
            classes: vec![],
            attributes: vec![("type", "submit"), ("disabled", "")],
        };
        assert!(Selector::parse("button[type=\"submit\"]")
            .unwrap()
            .matches(&button));
        assert!(Selector::parse("[disabled]").unwrap().matches(&button));
        assert!(!Selector::parse("button[type=reset]").unwrap().matches(&button));
    }

    #[test]
    fn test_selector_list() {
        let selector = Selector::parse(".service-card, .stat-box, .nav-link").unwrap();
        assert_eq!(selector.parts().len(), 3);
        assert!(selector.matches(&anchor()));
    }

    #[test]
    fn test_rejects_combinators() {
        assert!(Selector::parse(".hamburger .bar").is_err());
        assert!(Selector::parse("div > span").is_err());
        assert!(Selector::parse(".a,,.b").is_err());
        assert!(Selector::parse("[unterminated").is_err());
    }
}
