//! Two-phase relevance scores.

use crate::error::{Error, Result};

/// The relevance of a search result.
///
/// A relevance starts raw: an accumulating score whose absolute value has no
/// defined meaning. [`Relevance::finalize`] converts it, exactly once, into a
/// percentage of the total raw relevance of its result set. After
/// finalization the value can only be rescaled via [`Relevance::normalize`].
///
/// The two states are encoded in the type so illegal transitions are a
/// `match` away from being visible; the runtime errors match the documented
/// contract (finalize twice, mutate after finalize, normalize before
/// finalize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relevance {
    /// Pre-finalization accumulator.
    Raw(f32),
    /// Percentage of the result set's total raw relevance.
    Finalized(f32),
}

impl Relevance {
    /// A raw relevance with the given starting value.
    pub fn new(value: f32) -> Result<Self> {
        if value < 0.0 {
            return Err(Error::NegativeRelevance);
        }
        Ok(Relevance::Raw(value))
    }

    /// The current value, regardless of state.
    pub fn value(&self) -> f32 {
        match self {
            Relevance::Raw(value) | Relevance::Finalized(value) => *value,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, Relevance::Finalized(_))
    }

    /// Replace the raw value. Fails once finalized.
    pub fn set_value(&mut self, value: f32) -> Result<()> {
        if value < 0.0 {
            return Err(Error::NegativeRelevance);
        }
        match self {
            Relevance::Raw(current) => {
                *current = value;
                Ok(())
            }
            Relevance::Finalized(_) => Err(Error::AlreadyFinalized),
        }
    }

    /// Convert the raw value into `value / total * 100`, permanently.
    pub fn finalize(&mut self, total: f32) -> Result<()> {
        if total < 0.0 {
            return Err(Error::NegativeRelevance);
        }
        match self {
            Relevance::Raw(value) => {
                *self = Relevance::Finalized(*value / total * 100.0);
                Ok(())
            }
            Relevance::Finalized(_) => Err(Error::AlreadyFinalized),
        }
    }

    /// Rescale a finalized percentage by `factor`. Fails before finalization.
    pub fn normalize(&mut self, factor: f32) -> Result<()> {
        if factor < 0.0 {
            return Err(Error::NegativeRelevance);
        }
        match self {
            Relevance::Finalized(value) => {
                *value *= factor;
                Ok(())
            }
            Relevance::Raw(_) => Err(Error::NotFinalized),
        }
    }
}

impl Default for Relevance {
    fn default() -> Self {
        Relevance::Raw(0.0)
    }
}
