pub mod cli;
pub mod ctx;
pub mod error;
pub mod input;
pub mod io;
pub mod layout;
pub mod math;
pub mod pipeline;
pub mod schema;
pub mod series;

pub use error::{EvError, EvResult};
