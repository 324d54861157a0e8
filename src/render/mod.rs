// src/render/mod.rs
pub mod outline;

pub use outline::OutlineRenderer;
