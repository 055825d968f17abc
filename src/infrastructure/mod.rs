pub mod config;
pub mod gemini;
pub mod logging;
pub mod security;
