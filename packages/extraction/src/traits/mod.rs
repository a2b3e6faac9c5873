//! Core trait abstractions (Strategy, Renderer, Describer).

pub mod describe;
pub mod render;
pub mod strategy;

pub use describe::Describer;
pub use render::Renderer;
pub use strategy::Strategy;
