pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod insight;
pub mod io;
pub mod model;
