#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod app;
pub mod clock;
pub mod codegen;
pub mod command;
pub mod document;
pub mod element;
pub mod error;
pub mod layer;
pub mod panels;
pub mod renderer;
pub mod settings;
pub mod template;

pub use animation::{AnimationBinding, AnimationFrame, AnimationPlayer, AnimationPreset};
pub use app::BuilderApp;
pub use clock::PreviewClock;
pub use command::{Command, History};
pub use document::{Document, Snapshot};
pub use element::{Element, ElementId, ElementKind, ElementPatch};
pub use error::{DocumentError, DocumentResult};
pub use layer::LayerIndex;
pub use renderer::Renderer;
pub use settings::BuilderSettings;
pub use template::TemplateId;
