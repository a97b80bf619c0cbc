use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

/// Smallest surface we let the user shrink the window to. The quad layout
/// halves both dimensions, so anything below this leaves empty viewports.
const MIN_WINDOW_SIZE: (u32, u32) = (320, 240);

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Fire Truck".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_min_inner_size(winit::dpi::LogicalSize::new(
            MIN_WINDOW_SIZE.0,
            MIN_WINDOW_SIZE.1,
        ));

    let window = event_loop
        .create_window(attrs)
        .expect("Failed to create window");
    log::debug!("Window scale factor: {}", window.scale_factor());
    Arc::new(window)
}
