pub mod app;
pub mod geometry;
pub mod screen;
pub mod theme;
