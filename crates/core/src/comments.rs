//! Comment content rules and reply-tree helpers.
//!
//! Comments attach to a target (product, tutorial, post, or another
//! comment) and may have one level of replies by default. Content is plain
//! text with newlines preserved.

use std::collections::HashMap;

use crate::types::DbId;

/// Maximum comment length in characters (not bytes -- content is
/// predominantly Korean, so byte length would over-count it 3x).
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Default maximum comment depth: top-level comments plus one reply level.
pub const DEFAULT_MAX_REPLY_DEPTH: u32 = 2;

/// Trim and validate comment content.
///
/// Leading/trailing whitespace is stripped; interior newlines are kept.
/// Returns the normalized content, or an error message for empty or
/// over-long input.
pub fn normalize_content(raw: &str) -> Result<String, String> {
    let content = raw.trim();
    if content.is_empty() {
        return Err("Comment content cannot be empty.".to_string());
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH} characters."
        ));
    }
    Ok(content.to_string())
}

/// Check that a reply at `parent_depth + 1` stays within `max_depth`.
///
/// `parent_depth` is the depth of the comment being replied to, where a
/// top-level comment has depth 1.
pub fn check_reply_depth(parent_depth: u32, max_depth: u32) -> Result<(), String> {
    if parent_depth + 1 > max_depth {
        Err(format!("Replies are limited to {max_depth} levels."))
    } else {
        Ok(())
    }
}

/// Group reply rows under their parent id, preserving input order.
///
/// The displayed tree is assembled in application code from flat rows
/// rather than recursive joins; items without a parent are ignored.
pub fn group_by_parent<T>(
    items: Vec<T>,
    parent_of: impl Fn(&T) -> Option<DbId>,
) -> HashMap<DbId, Vec<T>> {
    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        if let Some(parent_id) = parent_of(&item) {
            grouped.entry(parent_id).or_default().push(item);
        }
    }
    grouped
}
