use std::fmt;
use std::str::FromStr;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationPreset;
use crate::element::{Element, ElementKind, clamp_delay};
use crate::error::DocumentError;

/// A named starter layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Blank,
    #[default]
    Minimal,
    Landing,
    Portfolio,
    Agency,
}

/// Static definition of one element inside a template
#[derive(Debug, Clone, Copy)]
pub struct TemplateElement {
    pub kind: ElementKind,
    /// `None` falls back to the kind's default content
    pub content: Option<&'static str>,
    pub position: (f32, f32),
    pub animation: Option<AnimationPreset>,
    pub animation_delay: f32,
}

const fn block(kind: ElementKind, x: f32, y: f32) -> TemplateElement {
    TemplateElement {
        kind,
        content: None,
        position: (x, y),
        animation: None,
        animation_delay: 0.0,
    }
}

const fn text(kind: ElementKind, content: &'static str, x: f32, y: f32) -> TemplateElement {
    TemplateElement {
        content: Some(content),
        ..block(kind, x, y)
    }
}

const fn animated(element: TemplateElement, preset: AnimationPreset, delay: f32) -> TemplateElement {
    TemplateElement {
        animation: Some(preset),
        animation_delay: delay,
        ..element
    }
}

const MINIMAL: &[TemplateElement] = &[
    animated(text(ElementKind::Heading, "Clean & Simple", 40.0, 40.0), AnimationPreset::FadeIn, 0.0),
    animated(block(ElementKind::Paragraph, 40.0, 110.0), AnimationPreset::FadeIn, 0.2),
    animated(text(ElementKind::Button, "Get Started", 40.0, 210.0), AnimationPreset::SlideUp, 0.4),
];

const LANDING: &[TemplateElement] = &[
    animated(text(ElementKind::Hero, "Build Something Remarkable", 20.0, 20.0), AnimationPreset::FadeIn, 0.0),
    animated(text(ElementKind::Feature, "Fast", 20.0, 250.0), AnimationPreset::SlideUp, 0.2),
    animated(text(ElementKind::Feature, "Responsive", 240.0, 250.0), AnimationPreset::SlideUp, 0.35),
    animated(text(ElementKind::Feature, "Accessible", 460.0, 250.0), AnimationPreset::SlideUp, 0.5),
    animated(block(ElementKind::Testimonial, 20.0, 420.0), AnimationPreset::FadeIn, 0.6),
    animated(text(ElementKind::Button, "Start Your Project", 360.0, 450.0), AnimationPreset::Pulse, 0.8),
];

const PORTFOLIO: &[TemplateElement] = &[
    animated(text(ElementKind::Heading, "Selected Work", 40.0, 30.0), AnimationPreset::SlideRight, 0.0),
    animated(block(ElementKind::Gallery, 40.0, 100.0), AnimationPreset::ZoomIn, 0.2),
    animated(text(ElementKind::Counter, "50+", 480.0, 100.0), AnimationPreset::Bounce, 0.4),
    block(ElementKind::Testimonial, 40.0, 310.0),
    animated(block(ElementKind::Form, 400.0, 230.0), AnimationPreset::SlideLeft, 0.3),
];

const AGENCY: &[TemplateElement] = &[
    block(ElementKind::Parallax, 20.0, 20.0),
    animated(text(ElementKind::Heading, "We Craft Digital Experiences", 60.0, 90.0), AnimationPreset::SlideDown, 0.1),
    animated(block(ElementKind::Video, 40.0, 270.0), AnimationPreset::ZoomOut, 0.3),
    block(ElementKind::Divider, 40.0, 470.0),
    block(ElementKind::Spacer, 40.0, 480.0),
    animated(text(ElementKind::Button, "Book a Call", 400.0, 340.0), AnimationPreset::FadeIn, 0.5),
];

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Blank,
        TemplateId::Minimal,
        TemplateId::Landing,
        TemplateId::Portfolio,
        TemplateId::Agency,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TemplateId::Blank => "blank",
            TemplateId::Minimal => "minimal",
            TemplateId::Landing => "landing",
            TemplateId::Portfolio => "portfolio",
            TemplateId::Agency => "agency",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateId::Blank => "Blank Canvas",
            TemplateId::Minimal => "Minimal",
            TemplateId::Landing => "Landing Page",
            TemplateId::Portfolio => "Portfolio",
            TemplateId::Agency => "Agency",
        }
    }

    pub fn definition(self) -> &'static [TemplateElement] {
        match self {
            TemplateId::Blank => &[],
            TemplateId::Minimal => MINIMAL,
            TemplateId::Landing => LANDING,
            TemplateId::Portfolio => PORTFOLIO,
            TemplateId::Agency => AGENCY,
        }
    }

    /// Instantiates the template with fresh ids, back to front
    pub fn instantiate(self) -> Vec<Element> {
        self.definition()
            .iter()
            .map(|def| {
                let mut element = Element::new(def.kind)
                    .with_position(Pos2::new(def.position.0, def.position.1));
                if let Some(content) = def.content {
                    element.content = Some(content.to_string());
                }
                element.animation = def.animation;
                element.animation_delay = clamp_delay(def.animation_delay);
                element
            })
            .collect()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TemplateId {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|template| template.id() == s)
            .ok_or_else(|| DocumentError::UnknownTemplate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_has_three_elements() {
        assert_eq!(TemplateId::Minimal.instantiate().len(), 3);
        assert!(TemplateId::Blank.instantiate().is_empty());
    }

    #[test]
    fn test_instantiate_fills_default_content() {
        let elements = TemplateId::Minimal.instantiate();
        assert_eq!(elements[0].content.as_deref(), Some("Clean & Simple"));
        assert_eq!(elements[1].content.as_deref(), ElementKind::Paragraph.default_content());
    }

    #[test]
    fn test_instantiate_gives_fresh_ids() {
        let first = TemplateId::Landing.instantiate();
        let second = TemplateId::Landing.instantiate();
        assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
    }

    #[test]
    fn test_parse_template() {
        assert_eq!("portfolio".parse::<TemplateId>(), Ok(TemplateId::Portfolio));
        assert!("brochure".parse::<TemplateId>().is_err());
    }
}
