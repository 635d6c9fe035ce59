//! Tour steps as declared by the host page.

use std::borrow::Cow;

/// Element id of the optional "start tour" button.
pub const DEFAULT_TRIGGER_ID: &str = "guidedTourStarterBtn";

/// Explanation shown in the popover for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "snake_case"))]
pub enum StepContent {
    /// Author markup, inserted as-is. The popover renderer's allow-list
    /// is the only sanitizer applied.
    Html(String),
    /// Plain text, HTML-escaped when rendered.
    Text(String),
}

impl StepContent {
    /// Markup ready to be placed in the popover body.
    #[must_use]
    pub fn to_html(&self) -> Cow<'_, str> {
        match self {
            Self::Html(html) => Cow::Borrowed(html),
            Self::Text(text) => Cow::Owned(v_htmlescape::escape(text).to_string()),
        }
    }
}

/// One highlighted element plus its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Id of the element to highlight.
    pub target_id: String,
    pub content: StepContent,
}

impl Step {
    #[must_use]
    pub fn html(target_id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            content: StepContent::Html(html.into()),
        }
    }

    #[must_use]
    pub fn text(target_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            content: StepContent::Text(text.into()),
        }
    }
}

/// What the host page declares: the ordered steps and whether a start
/// trigger element is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostMarkup {
    pub steps: Vec<Step>,
    /// Id of the start trigger, if the page has one.
    pub trigger_id: Option<String>,
}

impl HostMarkup {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            trigger_id: None,
        }
    }

    /// Declare the default start trigger (`#guidedTourStarterBtn`).
    #[must_use]
    pub fn with_trigger(mut self) -> Self {
        self.trigger_id = Some(DEFAULT_TRIGGER_ID.to_owned());
        self
    }

    #[must_use]
    pub fn has_trigger(&self) -> bool {
        self.trigger_id.is_some()
    }
}
