pub mod app;
pub mod config;
pub mod diet;
pub mod errors;
pub mod llm;
pub mod nutrition;
pub mod state;
