pub mod capabilities;
pub mod horse_form;
pub mod pedigree;
pub mod relationship_field;
pub mod route;

pub use capabilities::*;
pub use horse_form::*;
pub use pedigree::*;
pub use relationship_field::*;
pub use route::*;
