pub mod prompt;
pub mod prompt_util;

pub use prompt::*;
pub use prompt_util::OperationResult;
