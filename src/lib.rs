pub mod config;
pub mod context;
pub mod lesson;
pub mod scene;
