use std::fmt;
use std::str::FromStr;

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::error::DocumentError;

/// Length of every preset, in seconds
pub const ANIMATION_DURATION: f64 = 0.8;

/// Distance slide presets travel, in canvas pixels
const SLIDE_DISTANCE: f32 = 60.0;

/// The closed set of entrance animations an element can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationPreset {
    #[serde(rename = "fadeIn")]
    FadeIn,
    #[serde(rename = "slideUp")]
    SlideUp,
    #[serde(rename = "slideDown")]
    SlideDown,
    #[serde(rename = "slideLeft")]
    SlideLeft,
    #[serde(rename = "slideRight")]
    SlideRight,
    #[serde(rename = "zoomIn")]
    ZoomIn,
    #[serde(rename = "zoomOut")]
    ZoomOut,
    #[serde(rename = "bounce")]
    Bounce,
    #[serde(rename = "pulse")]
    Pulse,
}

impl AnimationPreset {
    pub const ALL: [AnimationPreset; 9] = [
        AnimationPreset::FadeIn,
        AnimationPreset::SlideUp,
        AnimationPreset::SlideDown,
        AnimationPreset::SlideLeft,
        AnimationPreset::SlideRight,
        AnimationPreset::ZoomIn,
        AnimationPreset::ZoomOut,
        AnimationPreset::Bounce,
        AnimationPreset::Pulse,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AnimationPreset::FadeIn => "fadeIn",
            AnimationPreset::SlideUp => "slideUp",
            AnimationPreset::SlideDown => "slideDown",
            AnimationPreset::SlideLeft => "slideLeft",
            AnimationPreset::SlideRight => "slideRight",
            AnimationPreset::ZoomIn => "zoomIn",
            AnimationPreset::ZoomOut => "zoomOut",
            AnimationPreset::Bounce => "bounce",
            AnimationPreset::Pulse => "pulse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationPreset::FadeIn => "Fade In",
            AnimationPreset::SlideUp => "Slide Up",
            AnimationPreset::SlideDown => "Slide Down",
            AnimationPreset::SlideLeft => "Slide Left",
            AnimationPreset::SlideRight => "Slide Right",
            AnimationPreset::ZoomIn => "Zoom In",
            AnimationPreset::ZoomOut => "Zoom Out",
            AnimationPreset::Bounce => "Bounce",
            AnimationPreset::Pulse => "Pulse",
        }
    }

    /// Visual state at normalized progress `t` in `[0, 1]`
    fn frame_at(self, t: f32) -> AnimationFrame {
        let eased = ease_out_cubic(t);
        match self {
            AnimationPreset::FadeIn => AnimationFrame {
                opacity: eased,
                ..AnimationFrame::IDENTITY
            },
            AnimationPreset::SlideUp => slide(eased, Vec2::new(0.0, SLIDE_DISTANCE)),
            AnimationPreset::SlideDown => slide(eased, Vec2::new(0.0, -SLIDE_DISTANCE)),
            AnimationPreset::SlideLeft => slide(eased, Vec2::new(SLIDE_DISTANCE, 0.0)),
            AnimationPreset::SlideRight => slide(eased, Vec2::new(-SLIDE_DISTANCE, 0.0)),
            AnimationPreset::ZoomIn => AnimationFrame {
                opacity: eased,
                scale: 0.5 + 0.5 * eased,
                ..AnimationFrame::IDENTITY
            },
            AnimationPreset::ZoomOut => AnimationFrame {
                opacity: eased,
                scale: 1.5 - 0.5 * eased,
                ..AnimationFrame::IDENTITY
            },
            AnimationPreset::Bounce => {
                let height = (t * std::f32::consts::PI * 3.0).sin().abs() * 30.0 * (1.0 - t);
                AnimationFrame {
                    offset: Vec2::new(0.0, -height),
                    ..AnimationFrame::IDENTITY
                }
            }
            AnimationPreset::Pulse => AnimationFrame {
                scale: 1.0 + 0.1 * (t * std::f32::consts::PI * 2.0).sin(),
                ..AnimationFrame::IDENTITY
            },
        }
    }
}

impl fmt::Display for AnimationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AnimationPreset {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationPreset::ALL
            .into_iter()
            .find(|preset| preset.id() == s)
            .ok_or_else(|| DocumentError::UnknownPreset(s.to_string()))
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn slide(eased: f32, from: Vec2) -> AnimationFrame {
    AnimationFrame {
        opacity: eased,
        offset: from * (1.0 - eased),
        scale: 1.0,
    }
}

/// The `(preset, delay)` pair attached to an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationBinding {
    pub element_id: ElementId,
    pub preset: Option<AnimationPreset>,
    pub delay: f32,
}

/// How an element should be drawn at one instant of a preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub opacity: f32,
    pub offset: Vec2,
    pub scale: f32,
}

impl AnimationFrame {
    pub const IDENTITY: AnimationFrame = AnimationFrame {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
    };
}

/// Plays stored animation bindings back on the canvas.
///
/// The player only holds transient playback state. Resetting it never
/// touches the bindings stored on elements.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    started_at: Option<f64>,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) a preview at time `now`, in seconds
    pub fn play(&mut self, now: f64) {
        log::debug!("Animation preview started at {now:.3}");
        self.started_at = Some(now);
    }

    /// Drops all playback state so elements render at rest
    pub fn reset(&mut self) {
        if self.started_at.take().is_some() {
            log::debug!("Animation preview reset");
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// True while at least one animated element has not finished
    pub fn is_playing<'a>(&self, now: f64, elements: impl IntoIterator<Item = &'a Element>) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let elapsed = now - started_at;
        elements.into_iter().any(|element| {
            element.animation.is_some()
                && elapsed < f64::from(element.animation_delay) + ANIMATION_DURATION
        })
    }

    /// Samples the frame for one binding at time `now`
    pub fn sample(&self, binding: &AnimationBinding, now: f64) -> AnimationFrame {
        let (Some(started_at), Some(preset)) = (self.started_at, binding.preset) else {
            return AnimationFrame::IDENTITY;
        };
        let local = now - started_at - f64::from(binding.delay);
        let t = (local / ANIMATION_DURATION).clamp(0.0, 1.0) as f32;
        preset.frame_at(t)
    }
}
