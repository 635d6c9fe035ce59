#![forbid(unsafe_code)]

//! Core: data model, step sequencing, and presentation for guided page tours.
//!
//! # Role in the workspace
//! `tour-core` is the pure layer. Nothing here touches a DOM, a clock, or a
//! listener; every type is plain data and every function is deterministic.
//! The host-driven runtime (`tour-web`) owns time, subscriptions, and the
//! effect-applying boundary.
//!
//! # Primary responsibilities
//! - **Coordinates**: capture padded, scroll-relative bounding boxes for each
//!   step's target element ([`coordinates`]).
//! - **Sequencer**: `Closed` / `Active(index)` state machine ([`sequencer`]).
//! - **Templates**: step line, buttons, popover body ([`template`]) and the
//!   injected stylesheet ([`style`]).
//! - **Input decoding**: key and popover-click routing ([`event`]) and the
//!   trailing-edge [`debounce::Debouncer`].
//! - **Effects**: the DOM-side instruction vocabulary ([`effect`]) and the
//!   pure step renderer ([`render`]).

pub mod config;
pub mod coordinates;
pub mod debounce;
pub mod effect;
pub mod error;
pub mod event;
pub mod geometry;
pub mod popover;
pub mod render;
pub mod sequencer;
pub mod step;
pub mod style;
pub mod template;

pub use config::TourConfig;
pub use coordinates::{Coordinate, CoordinateStore, GeometrySource, capture_all};
pub use debounce::Debouncer;
pub use effect::{Effect, SubId};
pub use error::{Result, TourError};
pub use event::{KeyCode, KeyRoute, NavAction, PopoverAction};
pub use geometry::{BoundingBox, ScrollOffset};
pub use popover::{AllowList, Placement, PopoverId, PopoverOptions};
pub use render::{Rendered, StepFrame, render};
pub use sequencer::{Sequencer, TourState, Transition};
pub use step::{HostMarkup, Step, StepContent};
pub use style::StyleConfig;
