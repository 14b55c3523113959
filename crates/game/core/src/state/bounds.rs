//! Attribute bound evaluators.

use std::fmt;
use std::sync::Arc;

use super::{Attribute, Status};

/// Evaluator signature for [`Bound::Function`].
pub type BoundFn = Arc<dyn Fn(&Status) -> i32 + Send + Sync>;

/// One side of an attribute's clamp range, evaluated on every read.
#[derive(Clone)]
pub enum Bound {
    /// Fixed value.
    Constant(i32),
    /// Current (clamped) value of another attribute.
    Attribute(Attribute),
    /// Arbitrary evaluator over the owning status.
    Function(BoundFn),
}

impl Bound {
    /// No limit below.
    pub const MIN: Self = Self::Constant(i32::MIN);
    /// No limit above.
    pub const MAX: Self = Self::Constant(i32::MAX);

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Status) -> i32 + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    pub(crate) fn evaluate(&self, status: &Status) -> i32 {
        match self {
            Self::Constant(value) => *value,
            Self::Attribute(attribute) => status.get_attribute(*attribute),
            Self::Function(f) => f(status),
        }
    }
}

impl From<i32> for Bound {
    fn from(value: i32) -> Self {
        Self::Constant(value)
    }
}

impl From<Attribute> for Bound {
    fn from(attribute: Attribute) -> Self {
        Self::Attribute(attribute)
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Attribute(attribute) => f.debug_tuple("Attribute").field(attribute).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
