//! Equi-width histograms
//!
//! Integer columns get a fixed-bucket equi-width histogram over
//! `[min_val, max_val]`. String columns reuse the integer histogram by
//! hashing each string to its first four bytes packed big-endian.

use crate::catalog::CompareOp;

use super::{StatsError, StatsResult};

/// Equi-width integer histogram
#[derive(Debug, Clone)]
pub struct IntHistogram {
    /// Per-bucket value counts
    buckets: Vec<u64>,
    /// Smallest value covered
    min_val: i64,
    /// Largest value covered
    max_val: i64,
    /// Width of each bucket
    bucket_size: i64,
    /// Number of values added
    total_values: u64,
    /// When set, `>` estimates exclude the probe value's own bucket
    gt_excludes_bucket: bool,
}

impl IntHistogram {
    /// Bucket count for freshly created integer columns
    pub const DEFAULT_BUCKETS: usize = 2000;
    /// Default covered range for freshly created integer columns
    pub const DEFAULT_RANGE: (i64, i64) = (0, 1_000_000);

    /// Create a histogram with `num_buckets` buckets over `[min_val, max_val]`
    pub fn new(num_buckets: usize, min_val: i64, max_val: i64) -> Self {
        let span = max_val - min_val + 1;
        let bucket_size = ((span + num_buckets as i64 - 1) / num_buckets as i64).max(1);
        IntHistogram {
            buckets: vec![0; num_buckets],
            min_val,
            max_val,
            bucket_size,
            total_values: 0,
            gt_excludes_bucket: false,
        }
    }

    /// Create a histogram with the defaults used for new integer columns
    pub fn with_defaults() -> Self {
        let (min_val, max_val) = Self::DEFAULT_RANGE;
        Self::new(Self::DEFAULT_BUCKETS, min_val, max_val)
    }

    /// Switch `>` estimates to exclude the probe value's own bucket
    ///
    /// The default keeps the bucket in the sum, so `> v` and `< v`
    /// overlap at the bucket containing `v`.
    pub fn set_gt_excludes_bucket(&mut self, excludes: bool) {
        self.gt_excludes_bucket = excludes;
    }

    /// Record a value; values outside `[min_val, max_val]` are ignored
    pub fn add(&mut self, value: i64) {
        if value < self.min_val || value > self.max_val {
            return;
        }
        let index = self.bucket_index(value);
        self.buckets[index] += 1;
        self.total_values += 1;
    }

    /// Bucket index for a value, clipped into range
    fn bucket_index(&self, value: i64) -> usize {
        let clipped = value.clamp(self.min_val, self.max_val);
        let index = ((clipped - self.min_val) / self.bucket_size) as usize;
        index.min(self.buckets.len() - 1)
    }

    /// Estimated fraction of values satisfying `op value`, in [0, 1]
    ///
    /// Only `=`, `<` and `>` have histogram estimates; other operators
    /// must be approximated by the caller.
    pub fn selectivity(&self, op: CompareOp, value: i64) -> StatsResult<f64> {
        if !matches!(op, CompareOp::Eq | CompareOp::Lt | CompareOp::Gt) {
            return Err(StatsError::UnsupportedOperator(op));
        }
        if self.total_values == 0 {
            return Ok(self.average_selectivity());
        }

        let bucket = self.bucket_index(value);
        let total = self.total_values as f64;
        let count = match op {
            CompareOp::Eq => self.buckets[bucket],
            CompareOp::Lt => self.buckets[..=bucket].iter().sum(),
            CompareOp::Gt => {
                let from = if self.gt_excludes_bucket {
                    bucket + 1
                } else {
                    bucket
                };
                self.buckets[from.min(self.buckets.len())..].iter().sum()
            }
            _ => unreachable!(),
        };
        Ok(count as f64 / total)
    }

    /// Selectivity of an average bucket
    pub fn average_selectivity(&self) -> f64 {
        1.0 / self.buckets.len() as f64
    }

    /// Number of values recorded
    pub fn total_values(&self) -> u64 {
        self.total_values
    }

    /// Sum of all bucket counts
    pub fn bucket_sum(&self) -> u64 {
        self.buckets.iter().sum()
    }

    /// Smallest covered value
    pub fn min_val(&self) -> i64 {
        self.min_val
    }

    /// Largest covered value
    pub fn max_val(&self) -> i64 {
        self.max_val
    }

    /// Count in a single bucket
    pub fn bucket_count(&self, index: usize) -> Option<u64> {
        self.buckets.get(index).copied()
    }
}

/// Pack the first four bytes of a string big-endian, zero padded on the right
pub fn string_to_int(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let mut packed: i64 = 0;
    for i in 0..4 {
        let byte = bytes.get(i).copied().unwrap_or(0);
        packed = (packed << 8) | i64::from(byte);
    }
    packed
}

/// Histogram over string values, keyed by their 4-byte prefix hash
///
/// Covers `[string_to_int(""), string_to_int("zzzz")]`; strings hashing
/// outside that range are ignored like any out-of-range integer.
#[derive(Debug, Clone)]
pub struct StringHistogram {
    inner: IntHistogram,
}

impl StringHistogram {
    /// Bucket count for string histograms
    pub const BUCKETS: usize = 200;

    /// Create an empty string histogram
    pub fn new() -> Self {
        StringHistogram {
            inner: IntHistogram::new(Self::BUCKETS, string_to_int(""), string_to_int("zzzz")),
        }
    }

    /// Record a string value
    pub fn add(&mut self, value: &str) {
        self.inner.add(string_to_int(value));
    }

    /// Estimated fraction of values satisfying `op value`, in [0, 1]
    pub fn selectivity(&self, op: CompareOp, value: &str) -> StatsResult<f64> {
        self.inner.selectivity(op, string_to_int(value))
    }

    /// Number of values recorded
    pub fn total_values(&self) -> u64 {
        self.inner.total_values()
    }
}

impl Default for StringHistogram {
    fn default() -> Self {
        Self::new()
    }
}
