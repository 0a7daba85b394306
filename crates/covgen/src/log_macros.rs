/// Domain-aware logging macros.
///
/// Each macro injects a `domain` field so callers never spell the string out.
/// Domains used in this crate: `sys`, `conf`, `pipe`, `sink`.
///
/// # Usage
///
/// ```ignore
/// cov_info!(sys, seed, days = 365, "generation started");
/// cov_debug!(pipe, day = plan.day_index, records = plan.total, "day planned");
/// cov_warn!(sink, error = %e, "bulk request failed");
/// ```
///
/// The domain is a bare identifier, converted to a `&str` by the macro.

// ---------------------------------------------------------------------------
// Core macro — dispatches to the matching tracing level macro.
// ---------------------------------------------------------------------------

/// Internal helper.  Do not call directly; use `cov_error!` … `cov_trace!`.
#[doc(hidden)]
macro_rules! cov_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

// ---------------------------------------------------------------------------
// Per-level macros
// ---------------------------------------------------------------------------

/// Log at ERROR level with an automatic `domain` field.
macro_rules! cov_error {
    ($domain:ident, $($rest:tt)*) => {
        cov_log!(error, $domain, $($rest)*)
    };
}

/// Log at WARN level with an automatic `domain` field.
///
/// ```ignore
/// cov_warn!(conf, column = "id", "no id column, deriving ids from the seed");
/// ```
macro_rules! cov_warn {
    ($domain:ident, $($rest:tt)*) => {
        cov_log!(warn, $domain, $($rest)*)
    };
}

/// Log at INFO level with an automatic `domain` field.
macro_rules! cov_info {
    ($domain:ident, $($rest:tt)*) => {
        cov_log!(info, $domain, $($rest)*)
    };
}

/// Log at DEBUG level with an automatic `domain` field.
macro_rules! cov_debug {
    ($domain:ident, $($rest:tt)*) => {
        cov_log!(debug, $domain, $($rest)*)
    };
}

/// Log at TRACE level with an automatic `domain` field.
///
/// ```ignore
/// cov_trace!(sink, bytes = payload.len(), "payload written");
/// ```
macro_rules! cov_trace {
    ($domain:ident, $($rest:tt)*) => {
        cov_log!(trace, $domain, $($rest)*)
    };
}
