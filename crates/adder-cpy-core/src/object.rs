//! Owned and borrowed wrappers for interpreter object handles

use std::ffi::CStr;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr;

use adder_cpy_sys as sys;

use crate::error::{PyError, PyResult};
use crate::gil::take_exception;
use crate::table::PyApi;
use crate::value::ValueKind;

/// A borrowed reference to an interpreter object.
///
/// Carries no reference count of its own: the object stays alive through
/// whatever owns it (a [`crate::Namespace`], or an owning [`PyObject`] this
/// derefs from), and the lifetime parameter keeps the borrow inside that
/// owner's scope. There is deliberately no way to release one.
///
/// # Thread Safety
///
/// `!Send + !Sync`: interpreter objects are only safe to touch on the
/// thread holding the interpreter lock.
#[derive(Clone, Copy)]
pub struct PyRef<'py> {
    raw: sys::PyObjectRef,
    api: &'py PyApi,
    /// Marker to make this type !Send + !Sync
    _not_send: PhantomData<*mut ()>,
}

impl<'py> PyRef<'py> {
    pub(crate) fn borrowed(api: &'py PyApi, raw: sys::PyObjectRef) -> Self {
        Self {
            raw,
            api,
            _not_send: PhantomData,
        }
    }

    pub(crate) fn api(&self) -> &'py PyApi {
        self.api
    }

    /// Get the raw object handle
    pub fn raw(&self) -> sys::PyObjectRef {
        self.raw
    }

    /// Determine the object's scalar kind by comparing its runtime type
    /// against the four resolved type-object addresses.
    ///
    /// Anything outside that set (containers, `None`, user classes) is
    /// [`ValueKind::Unknown`]. A failed type lookup clears the pending
    /// exception and also reports `Unknown`.
    pub fn classify(&self) -> ValueKind {
        // SAFETY: the table is bound, the caller's guard holds the lock,
        // and raw is a live object.
        let ty = unsafe { (self.api.object_type)(self.raw) };
        if ty.is_null() {
            take_exception(self.api, "type lookup");
            return ValueKind::Unknown;
        }
        // SAFETY: PyObject_Type returns a new reference.
        let ty = unsafe { PyObject::from_owned(self.api, ty) };
        let raw_ty = ty.raw();
        // bool first: in the interpreter bool subtypes int
        if raw_ty == self.api.bool_type {
            ValueKind::Bool
        } else if raw_ty == self.api.long_type {
            ValueKind::Int
        } else if raw_ty == self.api.float_type {
            ValueKind::Float
        } else if raw_ty == self.api.unicode_type {
            ValueKind::Str
        } else {
            ValueKind::Unknown
        }
    }

    /// Human-readable name of the object's runtime type, or the literal
    /// `"unknown"` if the type cannot be obtained or stringified.
    pub fn type_name(&self) -> String {
        const FALLBACK: &str = "unknown";
        // SAFETY: the table is bound, the caller's guard holds the lock,
        // and raw is a live object.
        let ty = unsafe { (self.api.object_type)(self.raw) };
        if ty.is_null() {
            take_exception(self.api, "type lookup");
            return FALLBACK.to_string();
        }
        // SAFETY: PyObject_Type returns a new reference.
        let ty = unsafe { PyObject::from_owned(self.api, ty) };
        // SAFETY: ty is live.
        let repr = unsafe { (self.api.object_str)(ty.raw()) };
        if repr.is_null() {
            take_exception(self.api, "type stringification");
            return FALLBACK.to_string();
        }
        // SAFETY: PyObject_Str returns a new reference.
        let repr = unsafe { PyObject::from_owned(self.api, repr) };
        // SAFETY: repr is a live unicode object; a null size is allowed.
        let text = unsafe { (self.api.unicode_as_utf8)(repr.raw(), ptr::null_mut()) };
        if text.is_null() {
            take_exception(self.api, "type name extraction");
            return FALLBACK.to_string();
        }
        // The pointer borrows from `repr`; copy before the wrapper releases it.
        // SAFETY: the interpreter hands back a NUL-terminated UTF-8 buffer.
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    }

    /// Convert to an integer. The object should classify as
    /// [`ValueKind::Int`] (or [`ValueKind::Bool`]); anything else makes the
    /// interpreter raise, which comes back as [`PyError::Conversion`].
    pub fn as_i64(&self) -> PyResult<i64> {
        // SAFETY: the table is bound, the caller's guard holds the lock,
        // and raw is a live object.
        let value = unsafe { (self.api.long_as_long)(self.raw) };
        if take_exception(self.api, "integer conversion").is_some() {
            return Err(PyError::conversion("int", self.type_name()));
        }
        Ok(value as i64)
    }

    /// Convert to a float
    pub fn as_f64(&self) -> PyResult<f64> {
        // SAFETY: as above.
        let value = unsafe { (self.api.float_as_double)(self.raw) };
        if take_exception(self.api, "float conversion").is_some() {
            return Err(PyError::conversion("float", self.type_name()));
        }
        Ok(value)
    }

    /// Convert to a boolean by the interpreter's truthiness rules
    pub fn as_bool(&self) -> PyResult<bool> {
        // SAFETY: as above.
        let value = unsafe { (self.api.object_is_true)(self.raw) };
        if take_exception(self.api, "truthiness check").is_some() || value < 0 {
            return Err(PyError::conversion("bool", self.type_name()));
        }
        Ok(value != 0)
    }

    /// Extract UTF-8 text, copied into caller-owned storage.
    ///
    /// The interpreter's buffer belongs to the unicode object; the copy
    /// happens before anything is released, so the returned `String` is
    /// valid indefinitely.
    pub fn as_str(&self) -> PyResult<String> {
        // SAFETY: as above; a null size out-parameter is allowed.
        let text = unsafe { (self.api.unicode_as_utf8)(self.raw, ptr::null_mut()) };
        if take_exception(self.api, "utf-8 extraction").is_some() || text.is_null() {
            return Err(PyError::conversion("str", self.type_name()));
        }
        // SAFETY: the interpreter hands back a NUL-terminated UTF-8 buffer
        // that stays valid while self's owner keeps the object alive.
        Ok(unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned())
    }

    /// Invoke the object as a callable, returning the newly owned result.
    pub fn call(&self, args: Option<&PyRef<'_>>) -> PyResult<PyObject<'py>> {
        let raw_args = args.map_or(ptr::null_mut(), |a| a.raw);
        // SAFETY: callable and argument objects are live; the caller's
        // guard holds the lock.
        let result = unsafe { (self.api.call_object)(self.raw, raw_args) };
        if let Some(err) = take_exception(self.api, "callable invocation") {
            return Err(err);
        }
        if result.is_null() {
            return Err(PyError::internal(
                "PyObject_CallObject returned null without a pending exception",
            ));
        }
        // SAFETY: PyObject_CallObject returns a new reference.
        Ok(unsafe { PyObject::from_owned(self.api, result) })
    }
}

impl std::fmt::Debug for PyRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PyRef({:p})", self.raw)
    }
}

/// An owned reference to an interpreter object.
///
/// The wrapper holds exactly one reference-count contribution and gives it
/// back (`Py_DecRef`) exactly once, when dropped — on every exit path,
/// including failed conversions. Derefs to [`PyRef`] for all queries.
///
/// # Thread Safety
///
/// `!Send + !Sync`, like [`PyRef`].
pub struct PyObject<'py> {
    inner: PyRef<'py>,
}

impl<'py> PyObject<'py> {
    /// Wrap a handle the caller owns one reference to.
    ///
    /// # Safety
    /// `raw` must be a live object with a reference count this wrapper may
    /// consume; nothing else may release that same reference.
    pub(crate) unsafe fn from_owned(api: &'py PyApi, raw: sys::PyObjectRef) -> Self {
        Self {
            inner: PyRef::borrowed(api, raw),
        }
    }
}

impl<'py> Deref for PyObject<'py> {
    type Target = PyRef<'py>;

    fn deref(&self) -> &PyRef<'py> {
        &self.inner
    }
}

impl Drop for PyObject<'_> {
    fn drop(&mut self) {
        if !self.inner.raw.is_null() {
            // SAFETY: the wrapper owns exactly one reference to a live
            // object; after this the handle is never read again.
            unsafe { (self.inner.api.dec_ref)(self.inner.raw) };
        }
    }
}

impl std::fmt::Debug for PyObject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PyObject({:p})", self.inner.raw)
    }
}
