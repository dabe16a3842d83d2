pub mod listing;
pub mod search;
pub mod text;

pub use listing::*;
pub use search::*;
