mod input;
mod interface;
mod output;

pub use input::*;
pub use interface::*;
pub use output::*;
