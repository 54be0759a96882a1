//! Column selection transformers.
//!
//! | Transformer | Keeps |
//! |-------------|-------|
//! | [`ColumnSelector`] | the named columns, in the given order |
//! | [`ColumnDropper`] | every column except the named ones |
//! | [`TypeSelector`] | [`DataFrame`](crate::table::DataFrame) columns passing a dtype filter |

pub mod columns;
pub mod dtypes;

pub use columns::{
    ColumnDropper, ColumnDropperParams, ColumnSelector, ColumnSelectorParams, Columns,
    FittedColumnDropper, FittedColumnSelector,
};
pub use dtypes::{FittedTypeSelector, TypeSelector, TypeSelectorParams};
