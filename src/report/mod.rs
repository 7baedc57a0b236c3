pub mod aggregator;
pub mod format;
pub mod index;
pub mod renderer;
