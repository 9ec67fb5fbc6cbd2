use std::rc::Rc;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// An element in a parsed page.
pub trait Element: Sized {
    /// Descendants whose tag is one of `names`, in document order, that
    /// belong to this element rather than to a closer container.
    fn find_all(&self, names: &[&str]) -> Vec<Self>;

    /// Raw text owned by this element.
    fn text(&self) -> String;
}

/// A parsed page that can be searched by CSS selector.
pub trait Document {
    type Element<'a>: Element
    where
        Self: 'a;

    fn find_all(&self, selector: &str) -> Vec<Self::Element<'_>>;
}

/// [`Document`] backed by the `scraper` HTML5 parser.
///
/// Parsing never fails: broken markup is recovered into whatever tree
/// html5ever can build, and the recovery notes are kept in `parse_errors`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    pub fn parse_errors(&self) -> usize {
        self.html.errors.len()
    }
}

impl Document for HtmlDocument {
    type Element<'a> = HtmlElement<'a>;

    fn find_all(&self, selector: &str) -> Vec<HtmlElement<'_>> {
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(e) => {
                warn!("Ignoring invalid selector {:?}: {}", selector, e);
                return Vec::new();
            }
        };
        let matched: Rc<[ElementRef<'_>]> = self.html.select(&sel).collect();
        matched
            .iter()
            .map(|el| HtmlElement {
                el: *el,
                matched: Rc::clone(&matched),
            })
            .collect()
    }
}

/// An element plus every element the document-level selector matched.
///
/// Ownership of a descendant goes to its closest container:
/// - a matched element owns everything down to the next matched element,
///   so rows of an unmatched nested table still belong to it;
/// - any other element also stops at the next element of its own kind
///   (`td` and `th` count as one kind), so a row never claims the cells of
///   a row nested below it.
#[derive(Clone)]
pub struct HtmlElement<'a> {
    el: ElementRef<'a>,
    matched: Rc<[ElementRef<'a>]>,
}

impl<'a> HtmlElement<'a> {
    fn is_matched(&self, el: &ElementRef<'a>) -> bool {
        self.matched.iter().any(|m| m.id() == el.id())
    }

    fn is_boundary(&self, el: &ElementRef<'a>) -> bool {
        if self.is_matched(el) {
            return true;
        }
        !self.is_matched(&self.el) && kind(el.value().name()) == kind(self.el.value().name())
    }

    /// Walk up from a node; true when `self` is reached before any boundary.
    fn owns<I>(&self, ancestors: I) -> bool
    where
        I: IntoIterator<Item = ElementRef<'a>>,
    {
        for el in ancestors {
            if el.id() == self.el.id() {
                return true;
            }
            if self.is_boundary(&el) {
                return false;
            }
        }
        false
    }
}

fn kind(name: &str) -> &str {
    match name {
        "th" => "td",
        other => other,
    }
}

impl<'a> Element for HtmlElement<'a> {
    fn find_all(&self, names: &[&str]) -> Vec<Self> {
        self.el
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| names.iter().any(|n| *n == el.value().name()))
            .filter(|el| self.owns(el.ancestors().filter_map(ElementRef::wrap)))
            .map(|el| HtmlElement {
                el,
                matched: Rc::clone(&self.matched),
            })
            .collect()
    }

    fn text(&self) -> String {
        let mut out = String::new();
        for node in self.el.descendants().skip(1) {
            if !self.owns(node.ancestors().filter_map(ElementRef::wrap)) {
                continue;
            }
            if let Some(text) = node.value().as_text() {
                out.push_str(text);
            } else if node.value().as_element().is_some_and(|e| e.name() == "br") {
                out.push(' ');
            }
        }
        out
    }
}
