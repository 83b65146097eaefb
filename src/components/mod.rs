//! The components module contains all shared components for our app.

mod app;
mod audio_manager;
mod icons;
mod voice;

pub use app::*;
pub use audio_manager::*;
pub use icons::*;
pub use voice::*;
