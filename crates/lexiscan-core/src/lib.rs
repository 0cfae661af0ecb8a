pub mod interpret;
pub mod outcome;
pub mod wire;

pub use interpret::{InterpretError, interpret};
pub use outcome::settle;
