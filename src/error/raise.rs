//! Raise-mode propagation.
//!
//! These helpers unwind the stack carrying an [`Error`] as the panic payload.
//! They are meant for code running underneath the server's recovery layer
//! (see [`crate::server::recovery_layer`]); outside of it a raise is an
//! ordinary panic.
//!
//! A raise goes through the process panic hook before it is caught. The
//! default hook prints a `thread '...' panicked` line to stderr for every raise,
//! outside the tracing stream; the `hookkit` binary installs a hook that stays
//! silent for raised [`Error`]s. Library users that raise routinely should do
//! the same (check `payload().is::<Error>()` in their hook).

use super::{BoxError, Error};

/// Logs `err` and unwinds with it as the panic payload.
pub fn raise(err: Error) -> ! {
    tracing::error!("{}", err.detailed());
    std::panic::panic_any(err)
}

/// Raises an [`Error`] that has no underlying cause.
pub fn raise_code(message: impl Into<String>, code: u16) -> ! {
    raise(Error::new(message, code))
}

/// Returns the success value, or raises an [`Error`] wrapping the failure.
///
/// # Example
///
/// ```should_panic
/// use hookkit::error::panic_if_error;
///
/// let parsed: u16 = panic_if_error("port must be numeric", 400, "80a".parse::<u16>());
/// # let _ = parsed;
/// ```
pub fn panic_if_error<T, E>(message: impl Into<String>, code: u16, result: Result<T, E>) -> T
where
    E: Into<BoxError>,
{
    match result {
        Ok(value) => value,
        Err(cause) => raise(Error::with_cause(message, code, cause)),
    }
}
