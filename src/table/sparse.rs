//! Compressed sparse row matrices.
//!
//! None of the transformers in this crate accept sparse input; the type
//! exists so callers can hand one over and get a clear rejection.

use super::TableError;

/// A CSR matrix of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    /// Build from `(row, col, value)` triplets. Later duplicates are summed.
    pub fn from_triplets(
        shape: (usize, usize),
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self, TableError> {
        let (rows, cols) = shape;
        if let Some(&(r, c, _)) = triplets.iter().find(|(r, c, _)| *r >= rows || *c >= cols) {
            return Err(TableError::Shape(format!(
                "entry ({r}, {c}) outside a {rows}x{cols} matrix"
            )));
        }

        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut indptr = vec![0; rows + 1];
        let mut indices = Vec::with_capacity(sorted.len());
        let mut data: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut last: Option<(usize, usize)> = None;
        for (r, c, v) in sorted {
            if last == Some((r, c)) {
                if let Some(tail) = data.last_mut() {
                    *tail += v;
                }
                continue;
            }
            indices.push(c);
            data.push(v);
            indptr[r + 1] += 1;
            last = Some((r, c));
        }
        for r in 0..rows {
            indptr[r + 1] += indptr[r];
        }

        Ok(Self {
            shape,
            indptr,
            indices,
            data,
        })
    }

    /// `(n_rows, n_cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
}
