mod error;
pub mod event;
mod tag;
pub mod tree;
mod util;

pub use error::*;
pub use event::*;
pub use tag::*;
pub use tree::*;
