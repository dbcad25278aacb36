// `None` is a missing value
pub type Cell = Option<f64>;

#[derive(Debug, Clone, Default)]
pub struct Frame {
    n_rows: usize,
    names: Vec<String>,
    columns: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.position(name).map(|i| self.columns[i].as_slice())
    }

    // replaces an existing column of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        assert_eq!(
            values.len(),
            self.n_rows,
            "column length must match frame rows"
        );
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.columns[i] = values,
            None => {
                self.names.push(name);
                self.columns.push(values);
            }
        }
    }

    pub fn take_rows(&self, indices: &[usize]) -> Frame {
        Frame {
            n_rows: indices.len(),
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| indices.iter().map(|&i| col[i]).collect())
                .collect(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    n_rows: usize,
    cells: Vec<Cell>,
}

impl FeatureMatrix {
    pub fn from_columns(names: Vec<String>, columns: Vec<Vec<Cell>>, n_rows: usize) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        let n_cols = names.len();
        let mut cells = vec![None; n_rows * n_cols];
        for (c, col) in columns.iter().enumerate() {
            debug_assert_eq!(col.len(), n_rows);
            for (r, v) in col.iter().enumerate() {
                cells[r * n_cols + c] = *v;
            }
        }
        Self {
            columns: names,
            n_rows,
            cells,
        }
    }

    pub fn zeros(names: Vec<String>, n_rows: usize) -> Self {
        let n = names.len() * n_rows;
        Self {
            columns: names,
            n_rows,
            cells: vec![Some(0.0); n],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, r: usize) -> &[Cell] {
        let n = self.n_cols();
        &self.cells[r * n..(r + 1) * n]
    }

    pub fn get(&self, r: usize, name: &str) -> Option<Cell> {
        let c = self.columns.iter().position(|n| n == name)?;
        (r < self.n_rows).then(|| self.cells[r * self.n_cols() + c])
    }

    pub fn column(&self, name: &str) -> Option<Vec<Cell>> {
        let c = self.columns.iter().position(|n| n == name)?;
        Some((0..self.n_rows).map(|r| self.cells[r * self.n_cols() + c]).collect())
    }

    pub fn has_nulls(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    pub fn take_rows(&self, indices: &[usize]) -> FeatureMatrix {
        let mut cells = Vec::with_capacity(indices.len() * self.n_cols());
        for &i in indices {
            cells.extend_from_slice(self.row(i));
        }
        FeatureMatrix {
            columns: self.columns.clone(),
            n_rows: indices.len(),
            cells,
        }
    }

    /// Row-major `f32` buffer; null cells become NaN.
    pub fn to_dense_f32(&self) -> Vec<f32> {
        self.cells
            .iter()
            .map(|c| c.map_or(f32::NAN, |v| v as f32))
            .collect()
    }
}
