//! Raw dynamic-binding surface for an embedded CPython interpreter
//!
//! This crate declares the opaque pointer types, function-pointer shapes,
//! and required symbol names for driving an already-loaded CPython runtime
//! through addresses resolved at run time. Nothing here links against
//! `libpython`; use the safe wrappers in `adder-cpy-core` for higher-level
//! access.

#![allow(non_camel_case_types)]

use std::ffi::c_void;
use std::os::raw::{c_char, c_double, c_int, c_long};

/// Opaque reference to an object inside the interpreter's heap.
pub type PyObjectRef = *mut c_void;

/// Opaque token returned by `PyGILState_Ensure`, consumed by
/// `PyGILState_Release`.
pub type PyGilStateRef = *mut c_void;

pub type Py_ssize_t = isize;

// Start modes for PyRun_String, from CPython's Include/compile.h.
pub const PY_SINGLE_INPUT: c_int = 256;
pub const PY_FILE_INPUT: c_int = 257;
pub const PY_EVAL_INPUT: c_int = 258;

// Interpreter lock
pub type PyGilEnsureFn = unsafe extern "C" fn() -> PyGilStateRef;
pub type PyGilReleaseFn = unsafe extern "C" fn(state: PyGilStateRef);

// Namespace and execution
pub type PyDictNewFn = unsafe extern "C" fn() -> PyObjectRef;
pub type PyRunStringFn = unsafe extern "C" fn(
    source: *const c_char,
    start: c_int,
    globals: PyObjectRef,
    locals: PyObjectRef,
) -> PyObjectRef;
pub type PyDictGetItemStringFn =
    unsafe extern "C" fn(dict: PyObjectRef, key: *const c_char) -> PyObjectRef;
pub type PyCallObjectFn =
    unsafe extern "C" fn(callable: PyObjectRef, args: PyObjectRef) -> PyObjectRef;

// Error indicator
pub type PyErrOccurredFn = unsafe extern "C" fn() -> PyObjectRef;
pub type PyErrClearFn = unsafe extern "C" fn();
pub type PyErrPrintFn = unsafe extern "C" fn();

// Reference counting
pub type PyDecRefFn = unsafe extern "C" fn(object: PyObjectRef);

// Scalar conversion
pub type PyLongAsLongFn = unsafe extern "C" fn(object: PyObjectRef) -> c_long;
pub type PyFloatAsDoubleFn = unsafe extern "C" fn(object: PyObjectRef) -> c_double;
pub type PyObjectIsTrueFn = unsafe extern "C" fn(object: PyObjectRef) -> c_int;
/// The size out-parameter may be null; the text pointer borrows from the
/// unicode object and is only valid while that object stays alive.
pub type PyUnicodeAsUtf8Fn =
    unsafe extern "C" fn(object: PyObjectRef, size: *mut Py_ssize_t) -> *const c_char;

// Object introspection
pub type PyObjectTypeFn = unsafe extern "C" fn(object: PyObjectRef) -> PyObjectRef;
pub type PyObjectStrFn = unsafe extern "C" fn(object: PyObjectRef) -> PyObjectRef;

/// Every symbol the bridge requires, in resolution order.
///
/// The first sixteen entries are functions; the last four are the addresses
/// of the scalar type objects used for runtime type identification. Binding
/// fails on the first name the host's resolver cannot supply, so this order
/// also fixes which missing symbol gets reported.
pub const SYMBOL_NAMES: [&str; 20] = [
    "PyGILState_Ensure",
    "PyGILState_Release",
    "PyDict_New",
    "PyRun_String",
    "PyErr_Occurred",
    "PyErr_Clear",
    "Py_DecRef",
    "PyErr_Print",
    "PyDict_GetItemString",
    "PyObject_CallObject",
    "PyLong_AsLong",
    "PyFloat_AsDouble",
    "PyObject_IsTrue",
    "PyUnicode_AsUTF8",
    "PyObject_Str",
    "PyObject_Type",
    // type objects
    "PyFloat_Type",
    "PyUnicode_Type",
    "PyBool_Type",
    "PyLong_Type",
];
