pub mod approval;
pub mod error;
pub mod github;
pub mod keywords;
pub mod types;

pub use approval::{compute_approval, evaluate, ApprovalReport};
pub use error::{ClassifyError, InputError};
pub use github::comments_from_json;
pub use keywords::{classify, is_approved, is_denied};
pub use types::*;
