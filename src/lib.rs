//! Keeps an application's text and selection in sync with a native text-editing widget.
//!
//! The application owns the text and the selection as [`Binding`](binding::Binding)s, with the
//! selection in character indices. The widget owns its own copy of the text and a selection in
//! UTF-16 code units. A [`SyncBridge`](bridge::SyncBridge) moves state between the two in both
//! directions without letting the widget's echoes of its own writes loop back into the model.

#![deny(unsafe_code)]

#[cfg(test)]
mod tests;

pub mod binding;
pub mod bridge;
pub mod config;
pub mod platform;
pub mod range;
pub mod widget;

pub use kurbo;
pub use log;

/// The public API
pub mod prelude {
    #[doc(inline)]
    pub use crate::binding::{Binding, ObserverKey, WeakBinding};

    #[doc(inline)]
    pub use crate::bridge::{InboundHandler, SyncBridge, SyncPhase};

    #[doc(inline)]
    pub use crate::config::*;

    #[doc(inline)]
    pub use crate::platform::{
        NsRange,
        desktop::{DesktopNotification, DesktopTextView, DesktopWidget},
        touch::{TouchNotification, TouchTextView, TouchWidget},
    };

    #[doc(inline)]
    pub use crate::range::{CharRange, RangeError, Utf16Range};

    #[doc(inline)]
    pub use crate::widget::*;

    pub use kurbo::Insets;
}
