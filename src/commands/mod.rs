pub mod clean;

pub use clean::clean;
