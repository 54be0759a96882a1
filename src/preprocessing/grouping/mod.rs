//! Splitting tables into grouping keys and values for group-wise estimators.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`GroupValueSplitter`] | Validates a table and partitions it |
//! | [`GroupColumns`] | Group columns by label or by position |
//! | [`SplitInput`] | Accepted input representations |
//! | [`GroupValueSplit`] | Grouping frame plus value matrix |

pub mod splitter;

pub use splitter::{GroupColumns, GroupValueSplit, GroupValueSplitter, SplitInput};
