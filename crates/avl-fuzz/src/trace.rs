//! Insert/remove workloads.

use crate::fuzzer::Fuzzer;

/// One step of a map workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert(i64, i64),
    Remove(i64),
}

/// Shape of a generated workload.
#[derive(Clone, Copy, Debug)]
pub struct TraceConfig {
    /// Number of operations.
    pub len: usize,
    /// Keys are drawn from `0..=max_key`; a small range forces overwrites
    /// and removals of present keys.
    pub max_key: i64,
    /// Probability that a step is an insert.
    pub insert_ratio: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            len: 1000,
            max_key: 256,
            insert_ratio: 0.6,
        }
    }
}

impl Fuzzer {
    /// Random mix of inserts and removes.
    pub fn trace(&mut self, config: TraceConfig) -> Vec<Op> {
        (0..config.len)
            .map(|_| {
                let key = self.random_int(0, config.max_key);
                if self.random() < config.insert_ratio {
                    Op::Insert(key, self.random_int(i64::MIN, i64::MAX))
                } else {
                    Op::Remove(key)
                }
            })
            .collect()
    }

    /// `count` distinct keys in random order.
    pub fn distinct_keys(&mut self, count: usize) -> Vec<i64> {
        let mut keys: Vec<i64> = (0..count as i64).collect();
        self.shuffle(&mut keys);
        keys
    }
}
