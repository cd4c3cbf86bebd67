//! Charts module - Chart rendering

mod canvas;
mod plotter;

pub use canvas::{draw_heatmap, draw_pie, viridis};
pub use plotter::ChartPlotter;
