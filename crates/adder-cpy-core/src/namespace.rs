//! Execution namespaces

use std::ffi::CString;

use adder_cpy_sys as sys;

use crate::error::{PyError, PyResult};
use crate::object::{PyObject, PyRef};

/// A name → object mapping used as globals and locals for a code
/// submission. Owns the underlying interpreter dictionary.
pub struct Namespace<'py> {
    dict: PyObject<'py>,
}

impl<'py> Namespace<'py> {
    pub(crate) fn new(dict: PyObject<'py>) -> Self {
        Self { dict }
    }

    pub(crate) fn raw(&self) -> sys::PyObjectRef {
        self.dict.raw()
    }

    /// Borrowed lookup of a name bound by an earlier execution.
    ///
    /// The returned reference stays owned by this namespace; it carries no
    /// reference count of its own and cannot outlive the namespace.
    /// `Ok(None)` means the name is absent.
    pub fn get(&self, name: &str) -> PyResult<Option<PyRef<'_>>> {
        let key = CString::new(name)
            .map_err(|e| PyError::internal(format!("name contains NUL byte: {e}")))?;
        // SAFETY: the dictionary is live and the caller's guard holds the
        // lock; PyDict_GetItemString returns a borrowed reference or null
        // and suppresses lookup errors.
        let raw = unsafe { (self.dict.api().dict_get_item)(self.raw(), key.as_ptr()) };
        if raw.is_null() {
            return Ok(None);
        }
        Ok(Some(PyRef::borrowed(self.dict.api(), raw)))
    }
}

impl std::fmt::Debug for Namespace<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Namespace({:p})", self.raw())
    }
}
