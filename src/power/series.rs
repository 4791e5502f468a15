//! Raw daily series as returned by the provider, one per parameter code.

use crate::types::parameter::Parameter;
use std::collections::{BTreeMap, HashMap};

/// Date key (`YYYYMMDD`) to observed value. `None` marks a missing day.
pub type DailySeries = BTreeMap<String, Option<f64>>;

/// All series from one provider response, keyed by parameter code.
///
/// Codes are kept as the provider sent them; lookups go through [`Parameter::code`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: HashMap<String, DailySeries>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, series: DailySeries) {
        self.series.insert(code.into(), series);
    }

    pub fn get(&self, parameter: Parameter) -> Option<&DailySeries> {
        self.series.get(parameter.code())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<(String, DailySeries)> for SeriesSet {
    fn from_iter<T: IntoIterator<Item = (String, DailySeries)>>(iter: T) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}
