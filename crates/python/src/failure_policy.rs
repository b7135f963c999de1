//! Python wrapper for the FailurePolicy enum

use pyo3::prelude::*;
use wordpiece_core::FailurePolicy;

/// Python wrapper for FailurePolicy
#[pyclass(name = "FailurePolicy")]
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct PyFailurePolicy {
    pub(crate) inner: FailurePolicy,
}

#[pymethods]
impl PyFailurePolicy {
    /// Keep pieces matched before a failure, then emit -1
    #[staticmethod]
    fn keep_partial() -> Self {
        Self {
            inner: FailurePolicy::KeepPartial,
        }
    }

    /// Replace a failing word by a single -1
    #[staticmethod]
    fn discard() -> Self {
        Self {
            inner: FailurePolicy::Discard,
        }
    }

    fn __repr__(&self) -> String {
        format!("FailurePolicy.{:?}", self.inner)
    }

    fn __str__(&self) -> String {
        match self.inner {
            FailurePolicy::KeepPartial => "keep_partial".to_string(),
            FailurePolicy::Discard => "discard".to_string(),
        }
    }

    /// Hash support for using in sets/dicts
    fn __hash__(&self) -> u64 {
        match self.inner {
            FailurePolicy::KeepPartial => 0,
            FailurePolicy::Discard => 1,
        }
    }

    /// Equality comparison
    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl From<PyFailurePolicy> for FailurePolicy {
    fn from(py_policy: PyFailurePolicy) -> Self {
        py_policy.inner
    }
}

impl From<FailurePolicy> for PyFailurePolicy {
    fn from(inner: FailurePolicy) -> Self {
        Self { inner }
    }
}
