pub mod buffer;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod source;
