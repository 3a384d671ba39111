mod cli;
mod parsers;
mod types;


pub use cli::{Cli, Command, ServeArgs};
pub use types::PositiveU64;
