pub mod app;
pub mod braille;
pub mod catalog;
pub mod chart;
pub mod data;
pub mod map;
pub mod palette;
pub mod select;
pub mod server;
pub mod style;
pub mod symbol;
pub mod ui;
