use crate::features::stats;
use crate::frame::{Cell, FeatureMatrix, Frame};

// default for a feature the request did not produce
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingColumn {
    Null,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Imputation {
    /// forward-fill, back-fill, column mean, then zero
    Cascade,
    /// column mean only; an all-null column stays null
    MeanOnly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowSelection {
    All,
    // final row only, taken before injection and imputation
    Latest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyPolicy {
    pub missing: MissingColumn,
    pub imputation: Imputation,
}

impl AssemblyPolicy {
    pub const BRISBANE: AssemblyPolicy = AssemblyPolicy {
        missing: MissingColumn::Null,
        imputation: Imputation::Cascade,
    };

    pub const NYC: AssemblyPolicy = AssemblyPolicy {
        missing: MissingColumn::Zero,
        imputation: Imputation::MeanOnly,
    };
}

pub fn assemble(
    frame: &Frame,
    feature_names: &[String],
    policy: AssemblyPolicy,
    rows: RowSelection,
) -> FeatureMatrix {
    let selected;
    let frame = match rows {
        RowSelection::Latest if frame.n_rows() > 0 => {
            selected = frame.take_rows(&[frame.n_rows() - 1]);
            &selected
        }
        _ => frame,
    };
    let n = frame.n_rows();

    let mut injected = 0usize;
    let columns: Vec<Vec<Cell>> = feature_names
        .iter()
        .map(|name| {
            let col = match frame.column(name) {
                Some(col) => col.to_vec(),
                None => {
                    injected += 1;
                    match policy.missing {
                        MissingColumn::Null => vec![None; n],
                        MissingColumn::Zero => vec![Some(0.0); n],
                    }
                }
            };
            impute(col, policy.imputation)
        })
        .collect();

    if injected > 0 {
        tracing::debug!(injected, expected = feature_names.len(), "injected absent feature columns");
    }

    FeatureMatrix::from_columns(feature_names.to_vec(), columns, n)
}

pub fn impute(col: Vec<Cell>, imputation: Imputation) -> Vec<Cell> {
    match imputation {
        Imputation::Cascade => {
            let col = back_fill(forward_fill(col));
            let col = fill_value(col, stats::mean);
            col.into_iter().map(|v| v.or(Some(0.0))).collect()
        }
        Imputation::MeanOnly => fill_value(col, stats::mean),
    }
}

pub fn forward_fill(mut col: Vec<Cell>) -> Vec<Cell> {
    let mut last = None;
    for v in col.iter_mut() {
        if v.is_some() {
            last = *v;
        } else {
            *v = last;
        }
    }
    col
}

pub fn back_fill(mut col: Vec<Cell>) -> Vec<Cell> {
    let mut next = None;
    for v in col.iter_mut().rev() {
        if v.is_some() {
            next = *v;
        } else {
            *v = next;
        }
    }
    col
}

fn fill_value(col: Vec<Cell>, stat: fn(&[Cell]) -> Cell) -> Vec<Cell> {
    let fill = stat(&col);
    col.into_iter().map(|v| v.or(fill)).collect()
}
