mod error;
mod gateway;
mod reaction;

pub use error::*;
pub use gateway::*;
pub use reaction::*;
