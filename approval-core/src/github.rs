//! Decoding of comment histories fetched from GitHub.
//!
//! The issue-comments API returns `body` and `user` as nullable. A missing body
//! is treated as empty text. A comment whose `user` is null (a deleted account)
//! cannot belong to an approver and is dropped. Any record that is neither a
//! GitHub comment nor a plain `{author, body}` record rejects the whole input.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::InputError;
use crate::types::Comment;

/// The fields of a GitHub issue comment this crate reads
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: Option<u64>,
    pub body: Option<String>,
    pub user: Option<CommentUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentUser {
    pub login: String,
}

impl IssueComment {
    /// Convert to a [`Comment`], or `None` if the author is unknown.
    pub fn into_comment(self) -> Option<Comment> {
        let Some(user) = self.user else {
            debug!("Dropping comment {:?} without a user", self.id);
            return None;
        };
        Some(Comment {
            author: user.login,
            body: self.body.unwrap_or_default(),
        })
    }
}

/// The minimal record shape; unknown keys are rejected so typos surface.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlainComment {
    author: String,
    body: String,
}

/// Decode one array element, choosing the shape by its distinguishing key.
fn decode_record(index: usize, record: Value) -> Result<Option<Comment>, InputError> {
    let invalid = |source: serde_json::Error| InputError::InvalidComment { index, source };

    let (is_github, is_plain) = match &record {
        Value::Object(fields) => (fields.contains_key("user"), fields.contains_key("author")),
        _ => (false, false),
    };

    if is_github {
        let comment: IssueComment = serde_json::from_value(record).map_err(invalid)?;
        Ok(comment.into_comment())
    } else if is_plain {
        let PlainComment { author, body } = serde_json::from_value(record).map_err(invalid)?;
        Ok(Some(Comment { author, body }))
    } else {
        Err(InputError::UnrecognizedComment { index })
    }
}

/// Parse a JSON array of comments, oldest first.
///
/// Each element must be a plain `{"author", "body"}` record or a GitHub issue
/// comment (`{"body", "user": {"login"}}`, `user` key required). Order is
/// preserved.
pub fn comments_from_json(json: &str) -> Result<Vec<Comment>, InputError> {
    let records: Vec<Value> = serde_json::from_str(json)?;

    let mut comments = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if let Some(comment) = decode_record(index, record)? {
            comments.push(comment);
        }
    }

    Ok(comments)
}
