pub mod controls;
pub mod data_panel;
pub mod graph_canvas;
pub mod session;
