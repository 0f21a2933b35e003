pub mod checkpoint;
pub mod config;
pub mod error;
pub mod io;
pub mod lifecycle;
pub mod paths;
pub mod roadmap;
pub mod runner;
pub mod session;
pub mod templates;
pub mod todo;
pub mod types;

pub use error::{PhasekitError, Result};
