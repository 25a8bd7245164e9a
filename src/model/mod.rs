pub mod common;
pub mod horse;
pub mod owner;
pub mod pedigree;
pub mod relationship;

pub use common::*;
pub use horse::*;
pub use owner::*;
pub use pedigree::*;
pub use relationship::*;
