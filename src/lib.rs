mod composition;
mod config;
mod env;
mod error;
mod interval;
mod motif;
mod repetition;
mod reward;
mod subsequence_finder;
mod vocabulary;

pub use composition::*;
pub use config::*;
pub use env::*;
pub use error::*;
pub use interval::*;
pub use motif::*;
pub use repetition::*;
pub use reward::*;
pub use subsequence_finder::*;
pub use vocabulary::*;
