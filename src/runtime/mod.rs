//! Runtime module - winit/platform integration
//!
//! This module contains platform-specific code for running the viewer:
//! - `app` - ApplicationHandler and window management
//! - `input` - Keyboard event to message mapping
//! - `renderer` - softbuffer surface and presentation

pub mod app;
pub mod input;
pub mod renderer;

pub use app::App;
