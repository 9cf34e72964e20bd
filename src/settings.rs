use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::template::TemplateId;

/// Builder preferences persisted between sessions.
///
/// Only preferences live here. The document itself is never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct BuilderSettings {
    /// Template loaded when the builder opens
    pub start_template: TemplateId,
    pub theme: Theme,
    pub device: DevicePreview,
    pub show_grid: bool,
    /// Grid spacing in canvas pixels
    pub grid_size: f32,
    /// Step used by the delay editor in the animation panel, in seconds
    pub delay_step: f32,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            start_template: TemplateId::Minimal,
            theme: Theme::Light,
            device: DevicePreview::Desktop,
            show_grid: true,
            grid_size: 20.0,
            delay_step: 0.05,
        }
    }
}

/// Color scheme applied to the preview canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Ocean,
    Sunset,
}

/// Colors a theme resolves to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub accent: Color32,
    pub grid: Color32,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Ocean, Theme::Sunset];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Ocean => "Ocean",
            Theme::Sunset => "Sunset",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color32::from_rgb(248, 250, 252),
                surface: Color32::WHITE,
                text: Color32::from_rgb(15, 23, 42),
                accent: Color32::from_rgb(99, 102, 241),
                grid: Color32::from_rgb(226, 232, 240),
            },
            Theme::Dark => Palette {
                background: Color32::from_rgb(15, 23, 42),
                surface: Color32::from_rgb(30, 41, 59),
                text: Color32::from_rgb(226, 232, 240),
                accent: Color32::from_rgb(168, 85, 247),
                grid: Color32::from_rgb(51, 65, 85),
            },
            Theme::Ocean => Palette {
                background: Color32::from_rgb(236, 254, 255),
                surface: Color32::from_rgb(207, 250, 254),
                text: Color32::from_rgb(22, 78, 99),
                accent: Color32::from_rgb(6, 182, 212),
                grid: Color32::from_rgb(165, 243, 252),
            },
            Theme::Sunset => Palette {
                background: Color32::from_rgb(255, 247, 237),
                surface: Color32::from_rgb(255, 237, 213),
                text: Color32::from_rgb(124, 45, 18),
                accent: Color32::from_rgb(249, 115, 22),
                grid: Color32::from_rgb(254, 215, 170),
            },
        }
    }
}

/// Viewport the canvas is previewed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DevicePreview {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DevicePreview {
    pub const ALL: [DevicePreview; 3] = [DevicePreview::Desktop, DevicePreview::Tablet, DevicePreview::Mobile];

    pub fn label(self) -> &'static str {
        match self {
            DevicePreview::Desktop => "🖥 Desktop",
            DevicePreview::Tablet => "▭ Tablet",
            DevicePreview::Mobile => "📱 Mobile",
        }
    }

    /// Width of the previewed viewport in canvas pixels; `None` fills the panel
    pub fn viewport_width(self) -> Option<f32> {
        match self {
            DevicePreview::Desktop => None,
            DevicePreview::Tablet => Some(768.0),
            DevicePreview::Mobile => Some(375.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_old_settings_fill_missing_fields() {
        let settings: BuilderSettings = serde_json::from_str(r#"{ "theme": "Dark" }"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.start_template, TemplateId::Minimal);
        assert_eq!(settings.grid_size, 20.0);
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let settings = BuilderSettings {
            device: DevicePreview::Mobile,
            start_template: TemplateId::Agency,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<BuilderSettings>(&json).unwrap(), settings);
    }
}
