pub mod health_checks;
pub mod hello;

pub use health_checks::*;
pub use hello::*;
