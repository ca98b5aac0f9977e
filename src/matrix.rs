//! A dense matrix over (time point, hidden state) pairs.
use serde::{Deserialize, Serialize};

/// A row-major T x N matrix of `f64`, where T is the number of time points
/// and N the number of hidden states. It is used both for the output
/// probabilities returned by `p_obs` and for the weight matrices consumed by
/// `fit`. It is a serialized 2-d array; `get(t, i)` addresses time point t
/// and hidden state i.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMatrix {
    mem: Vec<f64>,
    rows: usize,
    columns: usize,
}

impl StateMatrix {
    /// A rows x columns matrix filled with zeros.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            mem: vec![0f64; rows * columns],
            rows,
            columns,
        }
    }
    /// Build from one slice per time point. Every row must have the same length.
    pub fn from_rows<T: std::borrow::Borrow<[f64]>>(rows: &[T]) -> Self {
        let columns = rows.first().map(|row| row.borrow().len()).unwrap_or(0);
        let mut mem = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            let row = row.borrow();
            assert_eq!(row.len(), columns);
            mem.extend_from_slice(row);
        }
        Self {
            mem,
            rows: rows.len(),
            columns,
        }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn get(&self, t: usize, i: usize) -> f64 {
        self.mem[t * self.columns + i]
    }
    pub fn get_mut(&mut self, t: usize, i: usize) -> &mut f64 {
        &mut self.mem[t * self.columns + i]
    }
    pub fn row(&self, t: usize) -> &[f64] {
        &self.mem[t * self.columns..(t + 1) * self.columns]
    }
    pub fn row_mut(&mut self, t: usize) -> &mut [f64] {
        &mut self.mem[t * self.columns..(t + 1) * self.columns]
    }
    pub fn fill(&mut self, value: f64) {
        self.mem.iter_mut().for_each(|x| *x = value);
    }
    /// Resize to rows x columns reusing the current allocation, then zero
    /// every cell.
    pub fn reset(&mut self, rows: usize, columns: usize) {
        let total_cells = rows * columns;
        self.mem.truncate(total_cells);
        if self.mem.len() < total_cells {
            let len = total_cells - self.mem.len();
            self.mem.extend(std::iter::repeat(0f64).take(len));
        }
        self.mem.iter_mut().for_each(|x| *x = 0f64);
        self.rows = rows;
        self.columns = columns;
    }
}
