pub mod assign;
pub mod error_format;
pub mod fetch;
pub mod latest;
pub mod suggest;
pub mod validate;

pub use assign::*;
pub use error_format::*;
pub use fetch::*;
pub use latest::*;
pub use suggest::*;
pub use validate::*;
