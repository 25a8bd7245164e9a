pub mod memory;
pub mod rest;
pub mod traits;

pub use memory::*;
pub use rest::*;
pub use traits::*;
