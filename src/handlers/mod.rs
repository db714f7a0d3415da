pub mod errors;
pub mod page;

pub use errors::*;
pub use page::*;
