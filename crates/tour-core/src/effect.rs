//! DOM-side instructions emitted by the tour.
//!
//! The tour never mutates the page directly. Every visible change is an
//! [`Effect`] handed to the host, which applies it against the real DOM (or
//! records it in tests).

use crate::geometry::BoundingBox;
use crate::popover::{PopoverId, PopoverOptions};

/// Identifier of a one-shot subscription (observer or timer).
pub type SubId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a `<style>` element with this text to `<head>`.
    InjectStylesheet(String),
    /// Hide the start trigger (`d-none`).
    HideTrigger,
    /// Start listening for clicks on the start trigger.
    AttachTriggerListener,
    /// Start listening for `keydown` on the document.
    AttachKeyListener,
    /// Remove the document `keydown` listener.
    DetachKeyListener,
    /// Add the `active` class and move the overlay to these bounds.
    ShowOverlay(BoundingBox),
    /// Remove the `active` class and reset the overlay bounds to zero.
    HideOverlay,
    /// Store the popover body on the overlay (`data-bs-content`).
    SetPopoverContent(String),
    /// Watch the document subtree until an element matching `selector` exists.
    ObserveMutation { sub: SubId, selector: String },
    /// Watch the overlay's intersection with the viewport.
    ObserveVisibility { sub: SubId },
    /// Disconnect the observer behind `sub`.
    Unobserve { sub: SubId },
    /// Create a popover anchored on the overlay.
    CreatePopover {
        popover: PopoverId,
        options: PopoverOptions,
    },
    ShowPopover(PopoverId),
    DisposePopover(PopoverId),
    /// Delegate clicks inside the popover matching `selector` to the tour.
    BindPopoverClicks { selector: String },
    /// `overlay.scrollIntoView({ behavior: "smooth" })`.
    ScrollIntoView { smooth: bool },
}

impl Effect {
    /// Short, stable name for logs and traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InjectStylesheet(_) => "inject_stylesheet",
            Self::HideTrigger => "hide_trigger",
            Self::AttachTriggerListener => "attach_trigger_listener",
            Self::AttachKeyListener => "attach_key_listener",
            Self::DetachKeyListener => "detach_key_listener",
            Self::ShowOverlay(_) => "show_overlay",
            Self::HideOverlay => "hide_overlay",
            Self::SetPopoverContent(_) => "set_popover_content",
            Self::ObserveMutation { .. } => "observe_mutation",
            Self::ObserveVisibility { .. } => "observe_visibility",
            Self::Unobserve { .. } => "unobserve",
            Self::CreatePopover { .. } => "create_popover",
            Self::ShowPopover(_) => "show_popover",
            Self::DisposePopover(_) => "dispose_popover",
            Self::BindPopoverClicks { .. } => "bind_popover_clicks",
            Self::ScrollIntoView { .. } => "scroll_into_view",
        }
    }
}
