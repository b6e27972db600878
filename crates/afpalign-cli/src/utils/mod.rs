pub mod progress;
pub mod viewer;
