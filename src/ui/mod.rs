pub mod app;
pub mod boot;
pub mod document;
pub mod draw;
pub mod effects;
pub mod help;
pub mod pages;
pub mod theme;
pub mod theme_loader;
