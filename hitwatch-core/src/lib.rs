pub mod cli;
pub mod conf;
pub mod logging;
pub mod pipeline;
pub mod server;
pub mod shutdown;
pub mod source;
