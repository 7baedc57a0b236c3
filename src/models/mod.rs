pub mod news;
pub mod quote;
pub mod snapshot;
