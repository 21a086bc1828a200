//! Helper functions for building markup

mod date;
mod html;

pub use date::*;
pub use html::*;
