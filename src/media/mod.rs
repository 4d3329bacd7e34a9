// src/media/mod.rs

pub mod definitions;
pub mod events;
pub mod input;
pub mod playback;
pub mod plugin;
pub mod movie_header;
pub mod resolver;
pub mod session;
pub mod systems;

pub use definitions::MediaKind;
pub use plugin::MediaPlugin;
pub use session::MediaSession;
