// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for dispatch: event names, phases, listener handles and options.
//!
//! ## Overview
//!
//! These types describe the dispatch protocol and its inputs.
//! They are referenced by the [`document`](crate::document) and carried on every [`Event`](crate::event::Event).

use alloc::borrow::Cow;
use alloc::string::String;

/// Name of an event type, such as `"click"` or `"keydown"`.
///
/// Listeners are keyed by this name. Well-known names are available as associated
/// constants; any other string works too.
///
/// ```
/// use bubbling_dispatch::types::EventType;
///
/// assert_eq!(EventType::CLICK, EventType::from("click"));
/// assert_eq!(EventType::from(String::from("my-event")).as_str(), "my-event");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    /// Primary button press and release on the same node.
    pub const CLICK: Self = Self::from_static("click");
    /// Two clicks in quick succession.
    pub const DBLCLICK: Self = Self::from_static("dblclick");
    /// A key was pressed.
    pub const KEYDOWN: Self = Self::from_static("keydown");
    /// A key was released.
    pub const KEYUP: Self = Self::from_static("keyup");
    /// A pointer button was pressed.
    pub const POINTERDOWN: Self = Self::from_static("pointerdown");
    /// A pointer button was released.
    pub const POINTERUP: Self = Self::from_static("pointerup");
    /// The pointer moved.
    pub const POINTERMOVE: Self = Self::from_static("pointermove");
    /// The pointer entered a node's subtree. Does not bubble.
    pub const POINTERENTER: Self = Self::from_static("pointerenter");
    /// The pointer left a node's subtree. Does not bubble.
    pub const POINTERLEAVE: Self = Self::from_static("pointerleave");
    /// A node gained focus.
    pub const FOCUS: Self = Self::from_static("focus");
    /// A node lost focus.
    pub const BLUR: Self = Self::from_static("blur");

    /// Event type from a static name, usable in `const` contexts.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The event name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventType {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl PartialEq<str> for EventType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EventType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(&self.0)
    }
}

/// Phases of event propagation.
///
/// Reported by [`Event::phase`](crate::event::Event::phase) while a handler runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal, excluding the target.
    Capture,
    /// Target node.
    Target,
    /// Target-to-root traversal, excluding the target.
    Bubble,
}

/// Opaque handle for a registered listener.
///
/// Returned by [`Document::register`](crate::document::Document::register) and accepted by
/// [`Document::unregister`](crate::document::Document::unregister). Handles are unique per document
/// and never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerId(pub(crate) u64);

bitflags::bitflags! {
    /// Per-registration listener options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ListenerFlags: u8 {
        /// Run in the capture phase (root → target) instead of the bubble phase.
        const CAPTURE = 0b0000_0001;
        /// Remove the listener just before its first invocation.
        const ONCE    = 0b0000_0010;
        /// Ignore [`Event::prevent_default`](crate::event::Event::prevent_default) calls from this listener.
        const PASSIVE = 0b0000_0100;
    }
}

impl Default for ListenerFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-dispatch event options.
///
/// Passed to [`Document::dispatch_with`](crate::document::Document::dispatch_with).
/// [`Document::dispatch`](crate::document::Document::dispatch) uses [`EventInit::default`],
/// which bubbles and is cancelable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EventInit {
    /// Whether the event continues from the target up to the root.
    pub bubbles: bool,
    /// Whether [`Event::prevent_default`](crate::event::Event::prevent_default) has any effect.
    pub cancelable: bool,
}

impl EventInit {
    /// Bubbling, cancelable event (the default).
    pub const BUBBLING: Self = Self {
        bubbles: true,
        cancelable: true,
    };

    /// Event delivered to capture listeners and the target only, not cancelable.
    pub const TARGET_ONLY: Self = Self {
        bubbles: false,
        cancelable: false,
    };
}

impl Default for EventInit {
    fn default() -> Self {
        Self::BUBBLING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;

    #[test]
    fn static_and_owned_names_compare_equal() {
        let owned = EventType::from(String::from("click"));
        assert_eq!(owned, EventType::CLICK);
        assert_eq!(owned, "click");
        assert_eq!(EventType::KEYDOWN.to_string(), "keydown");
    }

    #[test]
    fn static_and_owned_names_share_map_slots() {
        let mut map = BTreeMap::new();
        map.insert(EventType::CLICK, 1);
        map.insert(EventType::from(String::from("click")), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&EventType::from("click")), Some(&2));
    }

    #[test]
    fn defaults() {
        assert_eq!(ListenerFlags::default(), ListenerFlags::empty());
        assert_eq!(EventInit::default(), EventInit::BUBBLING);
        assert!(!EventInit::TARGET_ONLY.bubbles);
    }
}
