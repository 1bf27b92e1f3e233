pub mod algo;
pub mod run;
pub mod sim;
pub mod topo;

mod error;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
