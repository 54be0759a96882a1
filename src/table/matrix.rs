//! Numeric table backed by an `ndarray` matrix.

use super::frame::DataFrame;
use super::series::Series;
use super::{Table, TableError};
use ndarray::{Array2, Axis};
use std::collections::HashSet;

/// A dense `f64` matrix with one label per column.
///
/// This is the numeric-only table representation: every column is
/// `Float64`, missing values are NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledMatrix {
    labels: Vec<String>,
    data: Array2<f64>,
}

impl LabeledMatrix {
    /// Wrap a matrix, labelling its columns in order.
    pub fn new<S: Into<String>>(labels: Vec<S>, data: Array2<f64>) -> Result<Self, TableError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != data.ncols() {
            return Err(TableError::Shape(format!(
                "{} labels for a matrix with {} columns",
                labels.len(),
                data.ncols()
            )));
        }
        let mut seen = HashSet::with_capacity(labels.len());
        if let Some(dup) = labels.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(TableError::DuplicateColumn(dup.clone()));
        }
        Ok(Self { labels, data })
    }

    /// Column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Underlying matrix.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Consume into the underlying matrix.
    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// Copy into a [`DataFrame`] of `Float64` columns.
    pub fn to_data_frame(&self) -> DataFrame {
        let columns = self
            .labels
            .iter()
            .zip(self.data.columns())
            .map(|(label, col)| Series::from_f64(label.clone(), col.to_vec()))
            .collect();
        DataFrame::from_trusted(self.data.nrows(), columns)
    }

    fn position(&self, name: &str) -> Result<usize, TableError> {
        self.labels
            .iter()
            .position(|l| l == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    fn take(&self, positions: &[usize]) -> Self {
        Self {
            labels: positions.iter().map(|&p| self.labels[p].clone()).collect(),
            data: self.data.select(Axis(1), positions),
        }
    }
}

impl Table for LabeledMatrix {
    fn column_names(&self) -> Vec<&str> {
        self.labels.iter().map(String::as_str).collect()
    }

    fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    fn select(&self, names: &[String]) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(names.len());
        let mut positions = Vec::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
            positions.push(self.position(name)?);
        }
        Ok(self.take(&positions))
    }

    fn drop(&self, names: &[String]) -> Result<Self, TableError> {
        let dropped = names
            .iter()
            .map(|n| self.position(n))
            .collect::<Result<HashSet<_>, _>>()?;
        let keep: Vec<usize> = (0..self.labels.len())
            .filter(|p| !dropped.contains(p))
            .collect();
        Ok(self.take(&keep))
    }
}
