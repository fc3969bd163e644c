//! Aggregation parameters
//!
//! This module replaces a loose keyword-argument calling convention with an
//! explicit configuration structure. Recognized options are enumerated as
//! typed fields; anything else travels in the `extra` bag, which generic
//! orchestration code may populate with a superset of options when driving
//! heterogeneous aggregators. Every aggregator ignores `extra` entries it
//! does not recognize rather than rejecting them.

/// A loosely typed parameter value carried in [`AggParams::extra`]
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Text(String),
    Flag(bool),
}

/// Statistic-specific aggregation parameters
///
/// Caller-supplied parameters are merged over an aggregator's defaults at
/// call time, with caller values taking precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct AggParams {
    /// Delta degrees of freedom for variance-style statistics
    pub ddof: Option<u32>,
    /// Requested percentile ranks (0..=100) for percentile aggregation
    pub percentiles: Option<Vec<f64>>,
    /// Unrecognized options, tolerated and ignored by every aggregator
    pub extra: Vec<(String, ParamValue)>,
}

impl AggParams {
    /// Parameters with nothing set
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ddof: None,
            percentiles: None,
            extra: Vec::new(),
        }
    }

    /// Parameters with only `ddof` set
    #[must_use]
    pub const fn with_ddof(ddof: u32) -> Self {
        Self {
            ddof: Some(ddof),
            percentiles: None,
            extra: Vec::new(),
        }
    }

    /// Builder-style setter for `ddof`
    #[must_use]
    pub fn ddof(mut self, ddof: u32) -> Self {
        self.ddof = Some(ddof);
        self
    }

    /// Builder-style setter for `percentiles`
    #[must_use]
    pub fn percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = Some(percentiles);
        self
    }

    /// Builder-style setter appending one `extra` entry
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.extra.push((key.into(), value));
        self
    }

    /// Merge these parameters over `defaults`, caller values winning
    ///
    /// Typed fields fall back to the default when unset; `extra` entries
    /// are unioned with caller entries shadowing defaults of the same key.
    #[must_use]
    pub fn merged_over(&self, defaults: &AggParams) -> AggParams {
        let mut extra = self.extra.clone();
        for (key, value) in &defaults.extra {
            if !extra.iter().any(|(k, _)| k == key) {
                extra.push((key.clone(), value.clone()));
            }
        }
        AggParams {
            ddof: self.ddof.or(defaults.ddof),
            percentiles: self
                .percentiles
                .clone()
                .or_else(|| defaults.percentiles.clone()),
            extra,
        }
    }
}

impl Default for AggParams {
    fn default() -> Self {
        Self::empty()
    }
}
