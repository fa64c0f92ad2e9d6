pub mod setup;

pub use setup::{run, serve};
