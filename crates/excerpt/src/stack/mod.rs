//! Stack frame model and raw stack parsing.

mod frame;
mod raw;
mod skip;

pub use frame::{LineColumn, StackFrame};
pub use raw::{RawStack, parse_raw_stack};
pub use skip::{CallSkipList, FileSkipList};
