pub mod force_graph;
pub mod heatmap;
pub mod insights_panel;
pub mod timeline;
