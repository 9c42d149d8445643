mod fixed;
mod func;
mod paragraphs;

pub use fixed::{FixedLength, FixedTag, MoreText};
pub use func::{FnAction, FnFilter};
pub use paragraphs::Paragraphs;
