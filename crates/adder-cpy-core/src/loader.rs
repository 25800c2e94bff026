//! Host-side symbol resolution backed by the system loader
//!
//! [`crate::PyApi::bind`] only sees an opaque lookup callback; this module
//! is a convenience adapter from [`libloading`] to that callback shape, for
//! hosts that do not bring their own resolution mechanism.

use std::ffi::c_void;
use std::path::Path;
use std::ptr;

use libloading::Library;

use crate::error::PyResult;

/// Resolves interpreter symbols out of a dynamic library.
pub struct LibraryResolver {
    library: Library,
}

impl LibraryResolver {
    /// Open a `libpython` shared object by path.
    ///
    /// # Safety
    /// Loading a library runs its initialization routines; the path must
    /// name a library that is safe to load into this process.
    pub unsafe fn open(path: impl AsRef<Path>) -> PyResult<Self> {
        // SAFETY: forwarded to the caller.
        let library = unsafe { Library::new(path.as_ref()) }?;
        Ok(Self { library })
    }

    /// Resolve against the host process image itself, for the common case
    /// where the interpreter is already loaded (statically or by an earlier
    /// `dlopen`).
    pub fn this_process() -> PyResult<Self> {
        #[cfg(unix)]
        let library = Library::from(libloading::os::unix::Library::this());
        #[cfg(windows)]
        let library = Library::from(libloading::os::windows::Library::this()?);
        Ok(Self { library })
    }

    /// The lookup callback [`crate::PyApi::bind`] consumes: symbol name in,
    /// address out, null when the symbol is absent.
    pub fn resolver(&self) -> impl FnMut(&str) -> *mut c_void + '_ {
        |name: &str| {
            // SAFETY: the address is only stored; it is typed by the symbol
            // table and called under the bridge's own contracts.
            match unsafe { self.library.get::<*mut c_void>(name.as_bytes()) } {
                Ok(symbol) => *symbol,
                Err(_) => ptr::null_mut(),
            }
        }
    }
}

impl std::fmt::Debug for LibraryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryResolver").finish_non_exhaustive()
    }
}
