// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use isoscape_index::IsoObject;
use peniko::Color;

use crate::FontId;

/// A text label drawn centered on an object's projected position.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text to draw.
    pub text: String,
    /// Font, or `None` for the renderer's default.
    pub font: Option<FontId>,
    /// Color, or `None` for the renderer's default.
    pub color: Option<Color>,
}

impl TextLabel {
    /// A label in the default font and color.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            color: None,
        }
    }
}

/// What a scene object draws as.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    /// An image chosen by [`Renderer::object_sprite`](crate::Renderer::object_sprite).
    Sprite,
    /// A text label.
    Text(TextLabel),
}

/// Payload of a scene object: its kind plus caller data.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawable<U> {
    /// How the object is drawn.
    pub kind: ObjectKind,
    /// Caller data, e.g. a game entity handle.
    pub data: U,
}

impl<U> Drawable<U> {
    /// Creates a drawable payload.
    pub const fn new(kind: ObjectKind, data: U) -> Self {
        Self { kind, data }
    }

    /// The text label, for text objects.
    #[must_use]
    pub fn label(&self) -> Option<&TextLabel> {
        match &self.kind {
            ObjectKind::Text(label) => Some(label),
            ObjectKind::Sprite => None,
        }
    }
}

/// An object in a scene's spatial index.
pub type SceneObject<U> = IsoObject<Drawable<U>>;
