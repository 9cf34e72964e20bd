use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::{AnimationBinding, AnimationPreset};
use crate::error::DocumentError;

/// A unique identifier for a placed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Creates a fresh identifier. Ids are never reused within a session.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of blocks a visitor can place on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Paragraph,
    Image,
    Button,
    Hero,
    Feature,
    Testimonial,
    Gallery,
    Parallax,
    Counter,
    Video,
    Form,
    Divider,
    Spacer,
}

impl ElementKind {
    pub const ALL: [ElementKind; 14] = [
        ElementKind::Heading,
        ElementKind::Paragraph,
        ElementKind::Image,
        ElementKind::Button,
        ElementKind::Hero,
        ElementKind::Feature,
        ElementKind::Testimonial,
        ElementKind::Gallery,
        ElementKind::Parallax,
        ElementKind::Counter,
        ElementKind::Video,
        ElementKind::Form,
        ElementKind::Divider,
        ElementKind::Spacer,
    ];

    /// Stable string id, as used in exported markup
    pub fn id(self) -> &'static str {
        match self {
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Hero => "hero",
            ElementKind::Feature => "feature",
            ElementKind::Testimonial => "testimonial",
            ElementKind::Gallery => "gallery",
            ElementKind::Parallax => "parallax",
            ElementKind::Counter => "counter",
            ElementKind::Video => "video",
            ElementKind::Form => "form",
            ElementKind::Divider => "divider",
            ElementKind::Spacer => "spacer",
        }
    }

    /// Human readable name for palettes and layer lists
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Heading => "Heading",
            ElementKind::Paragraph => "Paragraph",
            ElementKind::Image => "Image",
            ElementKind::Button => "Button",
            ElementKind::Hero => "Hero Section",
            ElementKind::Feature => "Feature Card",
            ElementKind::Testimonial => "Testimonial",
            ElementKind::Gallery => "Gallery",
            ElementKind::Parallax => "Parallax",
            ElementKind::Counter => "Counter",
            ElementKind::Video => "Video",
            ElementKind::Form => "Contact Form",
            ElementKind::Divider => "Divider",
            ElementKind::Spacer => "Spacer",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ElementKind::Heading => "H",
            ElementKind::Paragraph => "¶",
            ElementKind::Image => "🖼",
            ElementKind::Button => "⏺",
            ElementKind::Hero => "★",
            ElementKind::Feature => "◆",
            ElementKind::Testimonial => "💬",
            ElementKind::Gallery => "▦",
            ElementKind::Parallax => "≋",
            ElementKind::Counter => "#",
            ElementKind::Video => "▶",
            ElementKind::Form => "✉",
            ElementKind::Divider => "—",
            ElementKind::Spacer => "↕",
        }
    }

    /// Content a freshly added element starts with. Depends only on the kind.
    pub fn default_content(self) -> Option<&'static str> {
        match self {
            ElementKind::Heading => Some("Your Heading Here"),
            ElementKind::Paragraph => Some("Add your text content here. Click to edit."),
            ElementKind::Image => Some("https://placehold.co/600x400"),
            ElementKind::Button => Some("Click Me"),
            ElementKind::Hero => Some("Welcome to Your Website"),
            ElementKind::Feature => Some("Amazing Feature"),
            ElementKind::Testimonial => Some("\"Outstanding work, delivered on time!\" - Happy Client"),
            ElementKind::Gallery => Some("Image Gallery"),
            ElementKind::Parallax => Some("Parallax Section"),
            ElementKind::Counter => Some("100+"),
            ElementKind::Video => Some("Video Embed"),
            ElementKind::Form => Some("Contact Form"),
            ElementKind::Divider | ElementKind::Spacer => None,
        }
    }

    /// Size of the block on the canvas, in canvas pixels
    pub fn default_size(self) -> Vec2 {
        match self {
            ElementKind::Heading => Vec2::new(360.0, 48.0),
            ElementKind::Paragraph => Vec2::new(360.0, 72.0),
            ElementKind::Image => Vec2::new(240.0, 160.0),
            ElementKind::Button => Vec2::new(140.0, 40.0),
            ElementKind::Hero => Vec2::new(560.0, 200.0),
            ElementKind::Feature => Vec2::new(200.0, 140.0),
            ElementKind::Testimonial => Vec2::new(320.0, 100.0),
            ElementKind::Gallery => Vec2::new(420.0, 180.0),
            ElementKind::Parallax => Vec2::new(560.0, 220.0),
            ElementKind::Counter => Vec2::new(120.0, 80.0),
            ElementKind::Video => Vec2::new(320.0, 180.0),
            ElementKind::Form => Vec2::new(300.0, 220.0),
            ElementKind::Divider => Vec2::new(400.0, 4.0),
            ElementKind::Spacer => Vec2::new(400.0, 40.0),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ElementKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| DocumentError::UnknownElementKind(s.to_string()))
    }
}

/// One placed visual block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub content: Option<String>,
    /// Top-left corner on the canvas; `None` until first placed
    pub position: Option<Pos2>,
    pub animation: Option<AnimationPreset>,
    /// Seconds, never negative. Only meaningful with an animation set.
    pub animation_delay: f32,
    pub styles: BTreeMap<String, String>,
    pub visible: bool,
    pub locked: bool,
}

impl Element {
    /// Creates an element of `kind` with its default content
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            content: kind.default_content().map(str::to_string),
            position: None,
            animation: None,
            animation_delay: 0.0,
            styles: BTreeMap::new(),
            visible: true,
            locked: false,
        }
    }

    pub fn with_position(mut self, position: Pos2) -> Self {
        self.position = Some(position);
        self
    }

    /// Text shown for this element in the layers list
    pub fn display_name(&self) -> String {
        match self.content.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                let mut name: String = text.chars().take(24).collect();
                if text.chars().count() > 24 {
                    name.push('…');
                }
                name
            }
            _ => self.kind.label().to_string(),
        }
    }

    pub fn animation_binding(&self) -> AnimationBinding {
        AnimationBinding {
            element_id: self.id,
            preset: self.animation,
            delay: self.animation_delay,
        }
    }

    /// Merges every field present in `patch` into this element
    pub(crate) fn merge(&mut self, patch: &ElementPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(position) = patch.position {
            self.position = Some(position);
        }
        if let Some(animation) = patch.animation {
            self.animation = animation;
        }
        if let Some(delay) = patch.animation_delay {
            self.animation_delay = clamp_delay(delay);
        }
        if let Some(styles) = &patch.styles {
            self.styles = styles.clone();
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
    }
}

/// Clamps a delay to `>= 0` with hundredth-of-a-second granularity
pub fn clamp_delay(seconds: f32) -> f32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }
    (seconds * 100.0).round() / 100.0
}

/// A partial update for an [`Element`]. `None` leaves a field untouched.
///
/// `content` and `animation` are doubly optional so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub content: Option<Option<String>>,
    pub position: Option<Pos2>,
    pub animation: Option<Option<AnimationPreset>>,
    pub animation_delay: Option<f32>,
    pub styles: Option<BTreeMap<String, String>>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

impl ElementPatch {
    pub fn position(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(Some(content.into())),
            ..Default::default()
        }
    }

    pub fn animation(preset: Option<AnimationPreset>) -> Self {
        Self {
            animation: Some(preset),
            ..Default::default()
        }
    }

    pub fn animation_delay(seconds: f32) -> Self {
        Self {
            animation_delay: Some(seconds),
            ..Default::default()
        }
    }

    pub fn styles(styles: BTreeMap<String, String>) -> Self {
        Self {
            styles: Some(styles),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Pos2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drags produce position-only patches; those stay out of the undo log.
    pub fn is_position_only(&self) -> bool {
        self.position.is_some()
            && Self {
                position: None,
                ..self.clone()
            }
            .is_empty()
    }
}
