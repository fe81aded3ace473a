//! Minimal CSS selector engine for snapshot queries.
//!
//! Supports type, universal, `.class`, `#id` and attribute selectors
//! (`[a]`, `[a=v]`, `[a*=v]`, `[a^=v]`, `[a$=v]`, `[a~=v]`), the descendant
//! and child combinators, and comma-separated lists. Pseudo-classes are
//! rejected.

use stackscope_protocols::InspectError;

use super::SnapshotElement;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<ComplexSelector>);

#[derive(Debug, Clone, PartialEq)]
struct ComplexSelector {
    /// Compounds left to right; each combinator links a compound to the
    /// one before it. The first combinator is unused.
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

#[derive(Debug, Clone, PartialEq)]
struct AttributeSelector {
    name: String,
    matcher: Option<(AttributeOp, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeOp {
    Equals,
    Contains,
    Prefix,
    Suffix,
    Includes,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, InspectError> {
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
            source: input,
        };
        let mut selectors = vec![parser.complex()?];
        while parser.eat(',') {
            selectors.push(parser.complex()?);
        }
        parser.skip_whitespace();
        if parser.peek().is_some() {
            return Err(parser.invalid());
        }
        Ok(Self(selectors))
    }

    /// Whether the element at `index` matches any selector of the list.
    pub fn matches(&self, elements: &[SnapshotElement], index: usize) -> bool {
        self.0.iter().any(|s| s.matches(elements, index))
    }
}

impl ComplexSelector {
    fn matches(&self, elements: &[SnapshotElement], index: usize) -> bool {
        self.match_part(elements, self.parts.len() - 1, index)
    }

    fn match_part(&self, elements: &[SnapshotElement], part: usize, index: usize) -> bool {
        let Some(element) = elements.get(index) else {
            return false;
        };
        let (combinator, compound) = &self.parts[part];
        if !compound.matches(element) {
            return false;
        }
        if part == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => parent_of(elements, index)
                .is_some_and(|parent| self.match_part(elements, part - 1, parent)),
            Combinator::Descendant => {
                let mut current = parent_of(elements, index);
                while let Some(ancestor) = current {
                    if self.match_part(elements, part - 1, ancestor) {
                        return true;
                    }
                    current = parent_of(elements, ancestor);
                }
                false
            }
        }
    }
}

/// Parent index, ignoring links that do not point backwards in document
/// order (they would allow cycles).
pub(crate) fn parent_of(elements: &[SnapshotElement], index: usize) -> Option<usize> {
    elements
        .get(index)
        .and_then(|e| e.parent)
        .filter(|parent| *parent < index)
}

impl Compound {
    fn matches(&self, element: &SnapshotElement) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class = element.attributes.get("class").map(String::as_str).unwrap_or("");
            if !self
                .classes
                .iter()
                .all(|wanted| class.split_whitespace().any(|c| c == wanted))
            {
                return false;
            }
        }
        self.attributes.iter().all(|a| a.matches(element))
    }
}

impl AttributeSelector {
    fn matches(&self, element: &SnapshotElement) -> bool {
        let Some(actual) = element.attributes.get(&self.name) else {
            return false;
        };
        let Some((op, expected)) = &self.matcher else {
            return true;
        };
        match op {
            AttributeOp::Equals => actual == expected,
            AttributeOp::Contains => !expected.is_empty() && actual.contains(expected.as_str()),
            AttributeOp::Prefix => !expected.is_empty() && actual.starts_with(expected.as_str()),
            AttributeOp::Suffix => !expected.is_empty() && actual.ends_with(expected.as_str()),
            AttributeOp::Includes => actual.split_whitespace().any(|w| w == expected),
        }
    }
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn invalid(&self) -> InspectError {
        InspectError::InvalidSelector(self.source.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn complex(&mut self) -> Result<ComplexSelector, InspectError> {
        let mut parts = Vec::new();
        self.skip_whitespace();
        loop {
            let spaced = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    if parts.is_empty() {
                        return Err(self.invalid());
                    }
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if !parts.is_empty() && !spaced => return Err(self.invalid()),
                Some(_) => Combinator::Descendant,
            };
            parts.push((combinator, self.compound()?));
        }
        if parts.is_empty() {
            return Err(self.invalid());
        }
        Ok(ComplexSelector { parts })
    }

    fn compound(&mut self) -> Result<Compound, InspectError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    let class = self.ident()?;
                    compound.classes.push(class);
                }
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    let attribute = self.attribute()?;
                    compound.attributes.push(attribute);
                }
                Some(':') => return Err(self.invalid()),
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.invalid());
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttributeSelector, InspectError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector { name, matcher: None });
            }
            Some('=') => {
                self.pos += 1;
                AttributeOp::Equals
            }
            Some(c) => {
                let op = match c {
                    '*' => AttributeOp::Contains,
                    '^' => AttributeOp::Prefix,
                    '$' => AttributeOp::Suffix,
                    '~' => AttributeOp::Includes,
                    _ => return Err(self.invalid()),
                };
                self.pos += 1;
                if self.peek() != Some('=') {
                    return Err(self.invalid());
                }
                self.pos += 1;
                op
            }
            None => return Err(self.invalid()),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.invalid());
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                value
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c != ']' && !c.is_whitespace())
                {
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.invalid());
                }
                self.chars[start..self.pos].iter().collect()
            }
        };

        self.skip_whitespace();
        if self.peek() != Some(']') {
            return Err(self.invalid());
        }
        self.pos += 1;

        Ok(AttributeSelector {
            name,
            matcher: Some((op, value)),
        })
    }

    fn ident(&mut self) -> Result<String, InspectError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.invalid());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, parent: Option<usize>, attrs: &[(&str, &str)]) -> SnapshotElement {
        let mut element = SnapshotElement::new(tag);
        element.parent = parent;
        for (k, v) in attrs {
            element.attributes.insert(k.to_string(), v.to_string());
        }
        element
    }

    fn doc() -> Vec<SnapshotElement> {
        vec![
            el("html", None, &[]),
            el("body", Some(0), &[]),
            el("nav", Some(1), &[("class", "main-nav sticky")]),
            el("a", Some(2), &[("class", "btn btn-primary"), ("href", "/start")]),
            el("footer", Some(1), &[("id", "site-footer")]),
            el("input", Some(4), &[("type", "submit")]),
        ]
    }

    fn matching(selector: &str) -> Vec<usize> {
        let elements = doc();
        let list = SelectorList::parse(selector).unwrap();
        (0..elements.len()).filter(|i| list.matches(&elements, *i)).collect()
    }

    #[test]
    fn test_type_and_universal() {
        assert_eq!(matching("a"), vec![3]);
        assert_eq!(matching("A"), vec![3]);
        assert_eq!(matching("*").len(), 6);
    }

    #[test]
    fn test_class_and_id() {
        assert_eq!(matching(".btn"), vec![3]);
        assert_eq!(matching("a.btn.btn-primary"), vec![3]);
        assert!(matching(".bt").is_empty());
        assert_eq!(matching("#site-footer"), vec![4]);
    }

    #[test]
    fn test_attribute_operators() {
        assert_eq!(matching("[href]"), vec![3]);
        assert_eq!(matching("input[type=submit]"), vec![5]);
        assert_eq!(matching("input[type='submit']"), vec![5]);
        assert_eq!(matching("a[class*=btn]"), vec![3]);
        assert_eq!(matching("[class^=main]"), vec![2]);
        assert_eq!(matching("[class$=sticky]"), vec![2]);
        assert_eq!(matching("[class~=sticky]"), vec![2]);
        assert!(matching("[class~=stick]").is_empty());
    }

    #[test]
    fn test_combinators() {
        assert_eq!(matching("body *"), vec![2, 3, 4, 5]);
        assert_eq!(matching("nav a"), vec![3]);
        assert_eq!(matching("body > nav"), vec![2]);
        assert!(matching("body > a").is_empty());
        assert_eq!(matching("footer input"), vec![5]);
    }

    #[test]
    fn test_selector_list() {
        assert_eq!(matching("footer, nav"), vec![2, 4]);
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", "a[", "a:hover", "> a", "a,", "[class*]", "a..b", "[x=\"open]"] {
            assert!(
                matches!(SelectorList::parse(bad), Err(InspectError::InvalidSelector(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_forward_parent_link_ignored() {
        let elements = vec![el("div", Some(1), &[]), el("section", Some(0), &[])];
        assert_eq!(parent_of(&elements, 0), None);
        assert_eq!(parent_of(&elements, 1), Some(0));
        let list = SelectorList::parse("section div").unwrap();
        assert!(!list.matches(&elements, 0));
    }
}
