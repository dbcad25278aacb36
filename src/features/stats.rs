use crate::frame::Cell;

pub fn mean(values: &[Cell]) -> Cell {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn median(values: &[Cell]) -> Cell {
    let mut observed: Vec<f64> = values.iter().flatten().copied().collect();
    if observed.is_empty() {
        return None;
    }
    observed.sort_by(|a, b| a.total_cmp(b));
    let mid = observed.len() / 2;
    if observed.len() % 2 == 0 {
        Some((observed[mid - 1] + observed[mid]) / 2.0)
    } else {
        Some(observed[mid])
    }
}

// N-1 denominator; undefined below two observations
pub fn sample_std(values: &[Cell]) -> Cell {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    let n = observed.len();
    if n < 2 {
        return None;
    }
    // identical observations give exactly zero, not rounding residue
    if observed.iter().all(|v| *v == observed[0]) {
        return Some(0.0);
    }
    let m = observed.iter().sum::<f64>() / n as f64;
    let ss = observed.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    Some((ss / (n - 1) as f64).sqrt())
}
