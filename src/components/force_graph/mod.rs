mod component;
mod render;
mod state;
mod types;

pub use component::ContributorGraph;
pub use types::{GraphData, GraphLink, GraphNode};
