pub mod analysis;
pub mod audio;
pub mod plugin;
pub mod render;
