//! Learned-index search demo
//!
//! Fits a linear model over a sorted integer array (position as the
//! input, stored value as the output), predicts a key's position from
//! the inverted model, and refines locally: either a bounded linear walk
//! or a bounded binary search. Comparison counts come back with every
//! result so the approaches can be measured against a plain binary
//! search. Self-contained; the query engine does not use it.

/// Maximum steps the linear refinement walks in each direction
const LINEAR_SEARCH_STEPS: usize = 10;

/// Ordinary-least-squares fit of `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
}

impl LinearRegression {
    /// Fit the model over paired observations
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len() as f64;
        let sum_x: f64 = xs.iter().sum();
        let sum_y: f64 = ys.iter().sum();
        let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
        let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;
        LinearRegression { slope, intercept }
    }

    /// Predicted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Fitted slope
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Result of one search: the found index and the comparisons it took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Index of the key, None if absent
    pub index: Option<usize>,
    /// Number of key comparisons performed
    pub operations: u64,
}

/// Sorted integer array indexed by a fitted linear model
#[derive(Debug, Clone)]
pub struct LearnedIndex {
    data: Vec<i64>,
    model: LinearRegression,
}

impl LearnedIndex {
    /// Fit a model over sorted ascending data
    pub fn new(data: Vec<i64>) -> Self {
        let xs: Vec<f64> = (0..data.len()).map(|i| i as f64).collect();
        let ys: Vec<f64> = data.iter().map(|&v| v as f64).collect();
        let model = LinearRegression::fit(&xs, &ys);
        LearnedIndex { data, model }
    }

    /// The fitted model
    pub fn model(&self) -> &LinearRegression {
        &self.model
    }

    /// Predicted position for a key, clipped into the array bounds
    ///
    /// The model maps positions to values, so the key goes through the
    /// inverse. Ties round to even.
    pub fn predict_position(&self, key: i64) -> usize {
        if self.data.is_empty() {
            return 0;
        }
        let estimate = (key as f64 - self.model.intercept) / self.model.slope;
        if !estimate.is_finite() {
            return 0;
        }
        let last = (self.data.len() - 1) as f64;
        estimate.round_ties_even().clamp(0.0, last) as usize
    }

    /// Search by linear refinement around the predicted position
    ///
    /// Walks at most ten steps left while the probed value exceeds the
    /// key, then at most ten steps right while it falls short.
    pub fn search_linear(&self, key: i64) -> SearchOutcome {
        if self.data.is_empty() {
            return SearchOutcome {
                index: None,
                operations: 0,
            };
        }

        let mut pos = self.predict_position(key);
        let mut operations = 0;

        let mut steps = 0;
        while steps < LINEAR_SEARCH_STEPS && pos > 0 {
            operations += 1;
            if self.data[pos] > key {
                pos -= 1;
                steps += 1;
            } else {
                break;
            }
        }

        let mut steps = 0;
        while steps < LINEAR_SEARCH_STEPS && pos + 1 < self.data.len() {
            operations += 1;
            if self.data[pos] < key {
                pos += 1;
                steps += 1;
            } else {
                break;
            }
        }

        operations += 1;
        let index = (self.data[pos] == key).then_some(pos);
        SearchOutcome { index, operations }
    }

    /// Search by binary refinement within ±√n of the predicted position
    pub fn search_binary(&self, key: i64) -> SearchOutcome {
        if self.data.is_empty() {
            return SearchOutcome {
                index: None,
                operations: 0,
            };
        }

        let pos = self.predict_position(key);
        let range = ((self.data.len() as f64).sqrt() as usize).max(1);
        let left = pos.saturating_sub(range);
        let right = (pos + range).min(self.data.len() - 1);

        bounded_binary_search(&self.data, key, left, right)
    }
}

/// Plain binary search over the whole array, counting comparisons
pub fn binary_search(data: &[i64], key: i64) -> SearchOutcome {
    if data.is_empty() {
        return SearchOutcome {
            index: None,
            operations: 0,
        };
    }
    bounded_binary_search(data, key, 0, data.len() - 1)
}

fn bounded_binary_search(data: &[i64], key: i64, mut left: usize, mut right: usize) -> SearchOutcome {
    let mut operations = 0;
    loop {
        operations += 1;
        let mid = left + (right - left) / 2;
        if data[mid] == key {
            return SearchOutcome {
                index: Some(mid),
                operations,
            };
        }
        if data[mid] < key {
            left = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            right = mid - 1;
        }
        if left > right {
            break;
        }
    }
    SearchOutcome {
        index: None,
        operations,
    }
}
