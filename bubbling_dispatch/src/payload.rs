// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default payload schema for pointer and keyboard events.
//!
//! [`Document`](crate::document::Document) is generic over its payload type; embedders with their
//! own input model can use any `P`. [`Payload`] covers the common cases from web-style input:
//! pointer position and button for clicks, key and physical code for key presses.

use alloc::string::String;
use kurbo::Point;

bitflags::bitflags! {
    /// Modifier keys held while the event was produced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows.
        const META    = 0b0000_1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pointer button that changed state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PointerButton {
    /// No button changed (e.g. a move).
    #[default]
    None,
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Auxiliary (usually middle) button.
    Auxiliary,
}

/// Pointer data carried by click and pointer events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerPayload {
    /// Position in the embedder's world coordinates.
    pub position: Point,
    /// Button that changed state.
    pub button: PointerButton,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

/// Keyboard data carried by key events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPayload {
    /// Logical key value, e.g. `"a"`, `"A"` or `"Enter"`.
    pub key: String,
    /// Physical key code, e.g. `"KeyA"`.
    pub code: String,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
    /// True when produced by auto-repeat.
    pub repeat: bool,
}

/// Default event payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    /// No type-specific data.
    #[default]
    None,
    /// Pointer data for click and pointer events.
    Pointer(PointerPayload),
    /// Keyboard data for key events.
    Key(KeyPayload),
}

impl Payload {
    /// Primary-button pointer payload at `position`.
    pub fn click_at(position: impl Into<Point>) -> Self {
        Self::Pointer(PointerPayload {
            position: position.into(),
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
        })
    }

    /// Key payload with no modifiers.
    pub fn key(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Key(KeyPayload {
            key: key.into(),
            code: code.into(),
            ..KeyPayload::default()
        })
    }

    /// Pointer data, if this is a pointer payload.
    pub fn as_pointer(&self) -> Option<&PointerPayload> {
        match self {
            Self::Pointer(p) => Some(p),
            _ => None,
        }
    }

    /// Key data, if this is a key payload.
    pub fn as_key(&self) -> Option<&KeyPayload> {
        match self {
            Self::Key(k) => Some(k),
            _ => None,
        }
    }

    /// Modifiers held, or empty for [`Payload::None`].
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::None => Modifiers::empty(),
            Self::Pointer(p) => p.modifiers,
            Self::Key(k) => k.modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_at_uses_primary_button() {
        let p = Payload::click_at((12.0, 30.5));
        let pointer = p.as_pointer().unwrap();
        assert_eq!(pointer.position, Point::new(12.0, 30.5));
        assert_eq!(pointer.button, PointerButton::Primary);
        assert!(p.as_key().is_none());
    }

    #[test]
    fn modifiers_are_read_from_either_variant() {
        let key = Payload::Key(KeyPayload {
            key: "S".into(),
            code: "KeyS".into(),
            modifiers: Modifiers::CONTROL | Modifiers::SHIFT,
            repeat: false,
        });
        assert!(key.modifiers().contains(Modifiers::CONTROL));
        assert_eq!(Payload::None.modifiers(), Modifiers::empty());
        assert_eq!(Payload::key("a", "KeyA").as_key().unwrap().code, "KeyA");
    }
}
