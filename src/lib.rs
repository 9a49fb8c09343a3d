pub mod config;
pub mod export;
pub mod info;
pub mod output;
pub mod scoring;
pub mod session;
pub mod stderr_buffer;
pub mod tui;
