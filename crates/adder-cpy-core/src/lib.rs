//! Safe wrappers for driving an embedded CPython interpreter through
//! runtime-resolved entry points.
//!
//! Nothing here links against `libpython`. The host supplies a symbol
//! resolver — its own lookup callback, or a [`LibraryResolver`] — and
//! [`PyApi::bind`] walks the fixed table of required entry points, failing
//! fast on the first symbol the host cannot supply. Everything else borrows
//! the resulting table: the interpreter lock ([`GilGuard`]), execution
//! namespaces ([`Namespace`]), and the owned/borrowed handle pair
//! ([`PyObject`] / [`PyRef`]) that makes reference-count discipline a
//! compile-time property instead of a call-site convention.
//!
//! # Example
//!
//! ```no_run
//! use adder_cpy_core::{GilGuard, LibraryResolver, PyApi, StartMode};
//!
//! # fn main() -> adder_cpy_core::PyResult<()> {
//! let loader = LibraryResolver::this_process()?;
//! let api = PyApi::bind(loader.resolver())?;
//!
//! let gil = GilGuard::acquire(&api);
//! let ns = gil.new_namespace()?;
//! gil.run("x = 6 * 7", StartMode::File, &ns)?;
//! let x = ns.get("x")?.expect("x was just bound");
//! assert_eq!(x.as_i64()?, 42);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! [`PyApi`] is `Send + Sync`: written once by [`PyApi::bind`], read-only
//! afterwards. Everything that actually talks to the interpreter —
//! [`GilGuard`], [`Namespace`], [`PyRef`], [`PyObject`], [`PyValue`] — is
//! `!Send + !Sync` and borrows the guard, so no handle can cross a thread
//! or outlive the interpreter lock.

mod error;
mod gil;
mod loader;
mod namespace;
mod object;
mod table;
mod value;

pub use error::{PyError, PyResult};
pub use gil::{GilGuard, StartMode};
pub use loader::LibraryResolver;
pub use namespace::Namespace;
pub use object::{PyObject, PyRef};
pub use table::PyApi;
pub use value::{PyValue, ValueKind};

// Re-export the raw surface for direct access when needed
pub use adder_cpy_sys as sys;
