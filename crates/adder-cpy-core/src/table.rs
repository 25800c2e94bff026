//! The resolved interpreter symbol table

use std::ffi::c_void;
use std::mem::transmute;
use std::ptr;

use adder_cpy_sys as sys;

use crate::error::{PyError, PyResult};

/// Every interpreter entry point the bridge needs, resolved to a typed
/// address, plus the four scalar type-object addresses used for runtime
/// type identification.
///
/// Constructed once by [`PyApi::bind`] and immutable afterwards; adapter
/// types ([`crate::GilGuard`] and everything below it) borrow it, so no
/// interpreter call is possible without a successfully bound table.
#[derive(Debug)]
pub struct PyApi {
    pub(crate) gil_ensure: sys::PyGilEnsureFn,
    pub(crate) gil_release: sys::PyGilReleaseFn,
    pub(crate) dict_new: sys::PyDictNewFn,
    pub(crate) run_string: sys::PyRunStringFn,
    pub(crate) err_occurred: sys::PyErrOccurredFn,
    pub(crate) err_clear: sys::PyErrClearFn,
    pub(crate) dec_ref: sys::PyDecRefFn,
    pub(crate) err_print: sys::PyErrPrintFn,
    pub(crate) dict_get_item: sys::PyDictGetItemStringFn,
    pub(crate) call_object: sys::PyCallObjectFn,
    pub(crate) long_as_long: sys::PyLongAsLongFn,
    pub(crate) float_as_double: sys::PyFloatAsDoubleFn,
    pub(crate) object_is_true: sys::PyObjectIsTrueFn,
    pub(crate) unicode_as_utf8: sys::PyUnicodeAsUtf8Fn,
    pub(crate) object_str: sys::PyObjectStrFn,
    pub(crate) object_type: sys::PyObjectTypeFn,
    pub(crate) float_type: sys::PyObjectRef,
    pub(crate) unicode_type: sys::PyObjectRef,
    pub(crate) bool_type: sys::PyObjectRef,
    pub(crate) long_type: sys::PyObjectRef,
}

// SAFETY: the table is written once during `bind` and only read afterwards.
// The type-object addresses are never dereferenced by the bridge, only
// compared; all calls through the function pointers happen under the
// interpreter lock via the !Send `GilGuard`.
unsafe impl Send for PyApi {}
unsafe impl Sync for PyApi {}

impl PyApi {
    /// Resolve the whole required-symbol table through the host's lookup
    /// callback.
    ///
    /// Walks [`sys::SYMBOL_NAMES`] in order, querying the resolver exactly
    /// once per name. The first name the resolver answers with null fails
    /// the entire binding with [`PyError::MissingSymbol`]; later names are
    /// not probed.
    #[allow(clippy::missing_transmute_annotations)]
    pub fn bind<R>(mut resolver: R) -> PyResult<Self>
    where
        R: FnMut(&str) -> *mut c_void,
    {
        let mut slots = [ptr::null_mut::<c_void>(); sys::SYMBOL_NAMES.len()];
        for (slot, name) in slots.iter_mut().zip(sys::SYMBOL_NAMES) {
            let addr = resolver(name);
            if addr.is_null() {
                tracing::error!(symbol = name, "failed to resolve interpreter symbol");
                return Err(PyError::MissingSymbol { name });
            }
            *slot = addr;
        }
        tracing::debug!(
            symbols = sys::SYMBOL_NAMES.len(),
            "interpreter symbol table bound"
        );

        let [
            gil_ensure,
            gil_release,
            dict_new,
            run_string,
            err_occurred,
            err_clear,
            dec_ref,
            err_print,
            dict_get_item,
            call_object,
            long_as_long,
            float_as_double,
            object_is_true,
            unicode_as_utf8,
            object_str,
            object_type,
            float_type,
            unicode_type,
            bool_type,
            long_type,
        ] = slots;

        // SAFETY: each address was resolved under the matching name in
        // SYMBOL_NAMES, so it carries the C signature its slot declares.
        // The four type-object addresses stay untyped; they are only ever
        // compared, never dereferenced.
        unsafe {
            Ok(Self {
                gil_ensure: transmute(gil_ensure),
                gil_release: transmute(gil_release),
                dict_new: transmute(dict_new),
                run_string: transmute(run_string),
                err_occurred: transmute(err_occurred),
                err_clear: transmute(err_clear),
                dec_ref: transmute(dec_ref),
                err_print: transmute(err_print),
                dict_get_item: transmute(dict_get_item),
                call_object: transmute(call_object),
                long_as_long: transmute(long_as_long),
                float_as_double: transmute(float_as_double),
                object_is_true: transmute(object_is_true),
                unicode_as_utf8: transmute(unicode_as_utf8),
                object_str: transmute(object_str),
                object_type: transmute(object_type),
                float_type,
                unicode_type,
                bool_type,
                long_type,
            })
        }
    }
}
