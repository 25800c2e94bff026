//! Scoped interpreter-lock acquisition and code execution

use std::ffi::CString;
use std::marker::PhantomData;
use std::os::raw::c_int;

use adder_cpy_sys as sys;

use crate::error::{PyError, PyResult};
use crate::namespace::Namespace;
use crate::object::PyObject;
use crate::table::PyApi;
use crate::value::PyValue;

/// Compile mode handed through unchanged to `PyRun_String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// A single interactive statement
    Single,
    /// A sequence of statements (module body)
    File,
    /// A single expression, whose value becomes the result
    Eval,
}

impl StartMode {
    pub fn as_raw(self) -> c_int {
        match self {
            StartMode::Single => sys::PY_SINGLE_INPUT,
            StartMode::File => sys::PY_FILE_INPUT,
            StartMode::Eval => sys::PY_EVAL_INPUT,
        }
    }
}

/// Reports and clears the interpreter's pending-error indicator.
///
/// Must run immediately after every call that can raise, before any other
/// interpreter call: the foreign runtime's behavior is undefined for calls
/// made while an error is pending. `PyErr_Print` writes the traceback to
/// stderr, which is the only reporting channel the bound surface offers.
pub(crate) fn take_exception(api: &PyApi, operation: &str) -> Option<PyError> {
    // SAFETY: the table is bound and callers hold the interpreter lock.
    unsafe {
        if (api.err_occurred)().is_null() {
            return None;
        }
        (api.err_print)();
        (api.err_clear)();
    }
    tracing::debug!(operation, "reported and cleared pending interpreter exception");
    Some(PyError::exception(operation))
}

/// Scoped ownership of the interpreter lock (the GIL).
///
/// Acquired via `PyGILState_Ensure`; the matching `PyGILState_Release` runs
/// on drop, on every exit path. Every operation that talks to the
/// interpreter hangs off a live guard, and every handle it produces borrows
/// the guard, so nothing can touch the interpreter after release.
///
/// # Thread Safety
///
/// `!Send + !Sync`: the release must happen on the acquiring thread, and
/// foreign objects are only safe to touch while this thread holds the lock.
pub struct GilGuard<'a> {
    api: &'a PyApi,
    state: sys::PyGilStateRef,
    /// Marker to make this type !Send + !Sync
    _not_send: PhantomData<*mut ()>,
}

impl<'a> GilGuard<'a> {
    /// Take the interpreter lock for the current thread.
    pub fn acquire(api: &'a PyApi) -> Self {
        // SAFETY: the table is bound; PyGILState_Ensure may be called from
        // any thread and returns the token the matching release expects.
        let state = unsafe { (api.gil_ensure)() };
        Self {
            api,
            state,
            _not_send: PhantomData,
        }
    }

    /// Create an empty namespace dictionary for a unit of execution.
    pub fn new_namespace(&self) -> PyResult<Namespace<'_>> {
        // SAFETY: the table is bound and the lock is held for the life of
        // self.
        let raw = unsafe { (self.api.dict_new)() };
        if raw.is_null() {
            self.take_exception("namespace allocation");
            return Err(PyError::AllocationFailed {
                what: "namespace dictionary",
            });
        }
        // SAFETY: PyDict_New returns a new reference.
        Ok(Namespace::new(unsafe { PyObject::from_owned(self.api, raw) }))
    }

    /// Execute source text with the same namespace as globals and locals.
    pub fn run(
        &self,
        source: &str,
        mode: StartMode,
        namespace: &Namespace<'_>,
    ) -> PyResult<PyObject<'_>> {
        self.run_in(source, mode, namespace, namespace)
    }

    /// Execute source text against distinct globals and locals.
    ///
    /// The returned object is the execution result (the expression value in
    /// [`StartMode::Eval`], the interpreter's `None` otherwise) and is
    /// released when dropped.
    pub fn run_in(
        &self,
        source: &str,
        mode: StartMode,
        globals: &Namespace<'_>,
        locals: &Namespace<'_>,
    ) -> PyResult<PyObject<'_>> {
        let source = CString::new(source)
            .map_err(|e| PyError::internal(format!("source contains NUL byte: {e}")))?;
        // SAFETY: source is a valid C string, both dictionaries are live,
        // and the lock is held for the life of self.
        let result = unsafe {
            (self.api.run_string)(source.as_ptr(), mode.as_raw(), globals.raw(), locals.raw())
        };
        if let Some(err) = self.take_exception("script execution") {
            return Err(err);
        }
        if result.is_null() {
            return Err(PyError::internal(
                "PyRun_String returned null without a pending exception",
            ));
        }
        // SAFETY: PyRun_String returns a new reference on success.
        Ok(unsafe { PyObject::from_owned(self.api, result) })
    }

    /// Report and clear a pending interpreter exception, if any.
    ///
    /// The safe operations on this guard already do this after every call
    /// that can raise; it is public for hosts driving the raw surface.
    pub fn take_exception(&self, operation: &str) -> Option<PyError> {
        take_exception(self.api, operation)
    }

    /// Execute `source` in a fresh namespace, then call the named
    /// entry-point function (no arguments) if the source defined one.
    ///
    /// Returns `Ok(None)` when no such name exists in the namespace after
    /// execution. A result outside the scalar set fails with
    /// [`PyError::UnsupportedType`] naming the offending type.
    pub fn call_entry_point(&self, source: &str, entry: &str) -> PyResult<Option<PyValue<'_>>> {
        let namespace = self.new_namespace()?;
        self.run(source, StartMode::File, &namespace)?;
        let Some(func) = namespace.get(entry)? else {
            return Ok(None);
        };
        match func.call(None)?.into_value()? {
            PyValue::Bool(b) => Ok(Some(PyValue::Bool(b))),
            PyValue::Int(v) => Ok(Some(PyValue::Int(v))),
            PyValue::Float(v) => Ok(Some(PyValue::Float(v))),
            PyValue::Str(s) => Ok(Some(PyValue::Str(s))),
            PyValue::Object(obj) => Err(PyError::UnsupportedType {
                type_name: obj.type_name(),
            }),
        }
    }
}

impl Drop for GilGuard<'_> {
    fn drop(&mut self) {
        // SAFETY: state came from PyGILState_Ensure on this thread.
        unsafe { (self.api.gil_release)(self.state) };
    }
}

impl std::fmt::Debug for GilGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GilGuard({:p})", self.state)
    }
}
