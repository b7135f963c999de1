//! Python bindings for the wordpiece tokenizer
//!
//! This module provides a Pythonic interface to the Rust-based batched
//! WordPiece tokenizer.

use pyo3::prelude::*;

mod error;
mod failure_policy;
mod tokenizer;

use failure_policy::PyFailurePolicy;
use tokenizer::{PyTokenizer, PyTokenizerBuilder};

/// wordpiece: batched WordPiece tokenizer in Rust with Python bindings
#[pymodule]
fn wordpiece(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add_class::<PyTokenizerBuilder>()?;
    m.add_class::<PyFailurePolicy>()?;
    m.add("TokenizerError", m.py().get_type_bound::<error::TokenizerError>())?;

    m.add("UNRECOGNIZED_ID", wordpiece_core::UNRECOGNIZED_ID)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
