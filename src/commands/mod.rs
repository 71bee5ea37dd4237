mod board;
mod config;
mod links;
mod projects;

pub use board::*;
pub use config::*;
pub use links::*;
pub use projects::*;
