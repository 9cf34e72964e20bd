mod animation_panel;
mod central_panel;
mod layers_panel;
mod palette_panel;
mod tools_panel;

pub use animation_panel::AnimationPanel;
pub use central_panel::CanvasPanel;
pub use layers_panel::{LayerDrag, LayersPanel};
pub use palette_panel::{PaletteDrag, palette_panel};
pub use tools_panel::tools_panel;
