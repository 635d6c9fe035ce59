//! Popover options handed to the rendering collaborator.
//!
//! The tour never draws the popover itself. It describes what it wants
//! (manual trigger, custom class, HTML body, placement, container, sanitizer
//! allow-list) and the host's popover library does the drawing.

use std::collections::BTreeMap;

/// Class added to the popover root; also how the host finds it in the DOM.
pub const POPOVER_CLASS: &str = "guided-tour--popover";
/// Class of the highlight overlay element.
pub const OVERLAY_CLASS: &str = "guided-tour--overlay";
/// Class toggled on the overlay while the tour is shown.
pub const ACTIVE_CLASS: &str = "active";
/// Wrapper class of the start trigger.
pub const STARTER_WRAPPER_CLASS: &str = "guided-tour--starter-btn-wrapper";

pub const PREV_CLASS: &str = "guided-tour--prev";
pub const NEXT_CLASS: &str = "guided-tour--next";
pub const FINISH_CLASS: &str = "guided-tour--finish";
pub const CLOSE_CLASS: &str = "guided-tour--close";

/// Selector matching the rendered popover.
#[must_use]
pub fn popover_selector() -> String {
    format!(".{POPOVER_CLASS}")
}

/// Handle id of one created popover instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopoverId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Let the popover library pick the side with the most room.
    #[default]
    Auto,
    Top,
    Bottom,
    Left,
    Right,
}

impl Placement {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Tag → permitted attributes, as consumed by the popover sanitizer.
///
/// The `*` entry applies to every tag. An attribute pattern ending in `*`
/// matches by prefix (`aria-*`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowList {
    entries: BTreeMap<String, Vec<String>>,
}

impl AllowList {
    pub const ANY_TAG: &'static str = "*";

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The popover library's stock allow-list.
    #[must_use]
    pub fn library_default() -> Self {
        let bare = [
            "area", "b", "br", "col", "code", "dd", "div", "dl", "dt", "em", "hr", "h1", "h2",
            "h3", "h4", "h5", "h6", "i", "li", "ol", "p", "pre", "s", "small", "span", "sub",
            "sup", "strong", "u", "ul",
        ];
        let mut list = Self::empty()
            .allow(Self::ANY_TAG, &["class", "dir", "id", "lang", "role", "aria-*"])
            .allow("a", &["target", "href", "title", "rel"])
            .allow(
                "img",
                &["src", "srcset", "alt", "title", "width", "height"],
            );
        for tag in bare {
            list = list.allow(tag, &[]);
        }
        list
    }

    /// Stock list extended so the tour body survives sanitizing: `div` and
    /// `button` keep their classes, `h1`/`p` are plain, and every tag may
    /// carry `class`.
    #[must_use]
    pub fn tour_default() -> Self {
        Self::library_default()
            .allow("div", &["class"])
            .allow("h1", &[])
            .allow("p", &[])
            .allow("button", &["class"])
            .allow(Self::ANY_TAG, &["class"])
    }

    /// Permit `tag` with the given attributes, merging with existing ones.
    #[must_use]
    pub fn allow(mut self, tag: &str, attrs: &[&str]) -> Self {
        let entry = self.entries.entry(tag.to_ascii_lowercase()).or_default();
        for attr in attrs {
            let attr = attr.to_ascii_lowercase();
            if !entry.contains(&attr) {
                entry.push(attr);
            }
        }
        self
    }

    #[must_use]
    pub fn permits_tag(&self, tag: &str) -> bool {
        self.entries.contains_key(&tag.to_ascii_lowercase())
    }

    #[must_use]
    pub fn permits_attr(&self, tag: &str, attr: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        let attr = attr.to_ascii_lowercase();
        if !self.entries.contains_key(&tag) {
            return false;
        }
        [tag.as_str(), Self::ANY_TAG]
            .iter()
            .filter_map(|t| self.entries.get(*t))
            .flatten()
            .any(|pattern| attr_matches(pattern, &attr))
    }

    /// Iterate `(tag, attributes)` in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

fn attr_matches(pattern: &str, attr: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => attr.starts_with(prefix),
        None => pattern == attr,
    }
}

/// Everything the popover library needs to create one popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverOptions {
    pub custom_class: String,
    /// Interpret the content as HTML.
    pub html: bool,
    pub placement: Placement,
    /// Selector of the element the popover is appended to.
    pub container: String,
    pub allow_list: AllowList,
}

impl Default for PopoverOptions {
    fn default() -> Self {
        Self {
            custom_class: POPOVER_CLASS.to_owned(),
            html: true,
            placement: Placement::Auto,
            container: "body".to_owned(),
            allow_list: AllowList::tour_default(),
        }
    }
}

impl PopoverOptions {
    /// The tour opens and closes popovers itself, so the library trigger is
    /// always `manual`.
    pub const TRIGGER: &'static str = "manual";

    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn container(mut self, selector: impl Into<String>) -> Self {
        self.container = selector.into();
        self
    }

    #[must_use]
    pub fn allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tour_contract() {
        let opts = PopoverOptions::default();
        assert_eq!(PopoverOptions::TRIGGER, "manual");
        assert_eq!(opts.custom_class, "guided-tour--popover");
        assert!(opts.html);
        assert_eq!(opts.placement.as_str(), "auto");
        assert_eq!(opts.container, "body");
    }

    #[test]
    fn library_default_rejects_buttons() {
        let list = AllowList::library_default();
        assert!(!list.permits_tag("button"));
        assert!(!list.permits_attr("div", "style"));
        assert!(list.permits_attr("a", "href"));
        assert!(list.permits_attr("span", "aria-label"));
        for tag in ["dd", "dl", "dt"] {
            assert!(list.permits_tag(tag), "{tag} missing from stock list");
        }
    }

    #[test]
    fn tour_default_extends_for_buttons_and_classes() {
        let list = AllowList::tour_default();
        assert!(list.permits_tag("button"));
        assert!(list.permits_attr("button", "class"));
        assert!(list.permits_attr("div", "class"));
        assert!(list.permits_attr("h3", "class"));
        assert!(list.permits_attr("P", "CLASS"));
        assert!(!list.permits_attr("button", "onclick"));
        assert!(!list.permits_tag("script"));
    }

    #[test]
    fn allow_merges_without_duplicates() {
        let list = AllowList::empty().allow("div", &["class"]).allow("div", &["class", "id"]);
        let (_, attrs) = list.iter().next().unwrap();
        assert_eq!(attrs, ["class".to_owned(), "id".to_owned()]);
    }

    #[test]
    fn selector_targets_popover_class() {
        assert_eq!(popover_selector(), ".guided-tour--popover");
    }
}
