//! Records every call dispatched to a fake client.

use std::collections::BTreeMap;

use chrono::Utc;

use super::format::{Cassette, Interaction};
use crate::fixture::Params;

/// Ordered log of dispatched calls.
///
/// Calls are kept in global dispatch order; per-method views are derived
/// from it, so `count(m)` always equals the number of params `recorded()`
/// lists under `m`.
///
/// Sequence numbers are never reused, not even after [`clear`](Self::clear),
/// so a call that settles late can only ever update its own interaction.
#[derive(Debug, Default)]
pub struct CallRecorder {
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CallRecorder {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call. The `seq` field is assigned automatically and returned.
    pub fn record(&mut self, method: impl Into<String>, params: Params) -> u64 {
        let seq = self.next_seq;
        self.interactions.push(Interaction {
            seq,
            method: method.into(),
            params,
            outcome: None,
        });
        self.next_seq += 1;
        seq
    }

    /// Attach the outcome of call `seq` using the Ok/Err JSON convention:
    /// `Ok(v)` is stored as `{"Ok": v}` and `Err(e)` as `{"Err": e.to_string()}`.
    ///
    /// Unknown sequence numbers (e.g. cleared in the meantime) are ignored.
    pub fn settle<E: std::fmt::Display>(
        &mut self,
        seq: u64,
        result: Result<serde_json::Value, &E>,
    ) {
        let outcome = match result {
            Ok(value) => serde_json::json!({ "Ok": value }),
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };
        if let Some(interaction) = self.interactions.iter_mut().find(|i| i.seq == seq) {
            interaction.outcome = Some(outcome);
        }
    }

    /// Number of calls recorded for `method`.
    #[must_use]
    pub fn count(&self, method: &str) -> usize {
        self.for_method(method).count()
    }

    /// Params of the `index`-th call to `method`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, method: &str, index: usize) -> Option<&Params> {
        self.for_method(method).nth(index).map(|i| &i.params)
    }

    /// Params of every call to `method`, in call order.
    #[must_use]
    pub fn calls(&self, method: &str) -> Vec<&Params> {
        self.for_method(method).map(|i| &i.params).collect()
    }

    /// Method key to ordered params, for every method called at least once.
    #[must_use]
    pub fn recorded(&self) -> BTreeMap<String, Vec<Params>> {
        let mut log: BTreeMap<String, Vec<Params>> = BTreeMap::new();
        for interaction in &self.interactions {
            log.entry(interaction.method.clone())
                .or_default()
                .push(interaction.params.clone());
        }
        log
    }

    /// Every recorded call in dispatch order.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Forget every recorded call. Sequence numbers keep counting up.
    pub fn clear(&mut self) {
        self.interactions.clear();
    }

    /// Snapshot the log as a cassette.
    #[must_use]
    pub fn cassette(&self, name: impl Into<String>) -> Cassette {
        Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            interactions: self.interactions.clone(),
        }
    }

    fn for_method<'a: 'm, 'm>(&'a self, method: &'m str) -> impl Iterator<Item = &'a Interaction> + 'm {
        self.interactions.iter().filter(move |i| i.method == method)
    }
}
