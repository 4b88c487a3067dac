pub mod constants;
pub mod error;
pub mod mercator;
pub mod hexagon;
pub mod viewport;
pub mod store;
pub mod dataset;
pub mod visibility;
pub mod resolution;
pub mod aggregate;
pub mod render;
pub mod pipeline;
pub mod export;
