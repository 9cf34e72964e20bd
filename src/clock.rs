/// Monotonic seconds since the builder started, used to drive animation previews.
///
/// Only differences between two readings are meaningful.
#[derive(Debug, Clone, Copy)]
pub struct PreviewClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    origin: f64,
}

impl Default for PreviewClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewClock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self { origin: performance_now() }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn now(&self) -> f64 {
        (performance_now() - self.origin).max(0.0)
    }
}

// seconds since page load, or zero without a window
#[cfg(target_arch = "wasm32")]
fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or(0.0)
}
