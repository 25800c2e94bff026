//! Tagged results of the classify-and-convert step

use crate::error::PyResult;
use crate::object::PyObject;

/// Scalar kind of an interpreter object, decided against the resolved
/// type-object addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    Unknown,
}

/// An extracted interpreter value.
///
/// Scalars are fully copied out and independent of the interpreter; the
/// [`PyValue::Object`] fallback keeps the owned handle (released when
/// dropped) for anything outside the scalar set.
#[derive(Debug)]
pub enum PyValue<'py> {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Object(PyObject<'py>),
}

impl PyValue<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            PyValue::Bool(_) => ValueKind::Bool,
            PyValue::Int(_) => ValueKind::Int,
            PyValue::Float(_) => ValueKind::Float,
            PyValue::Str(_) => ValueKind::Str,
            PyValue::Object(_) => ValueKind::Unknown,
        }
    }
}

impl<'py> PyObject<'py> {
    /// Classify once and convert accordingly, so downstream code never
    /// re-inspects runtime type pointers.
    pub fn into_value(self) -> PyResult<PyValue<'py>> {
        match self.classify() {
            ValueKind::Bool => Ok(PyValue::Bool(self.as_bool()?)),
            ValueKind::Int => Ok(PyValue::Int(self.as_i64()?)),
            ValueKind::Float => Ok(PyValue::Float(self.as_f64()?)),
            ValueKind::Str => Ok(PyValue::Str(self.as_str()?)),
            ValueKind::Unknown => Ok(PyValue::Object(self)),
        }
    }
}
