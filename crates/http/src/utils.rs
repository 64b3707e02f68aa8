//! Utility macros shared by the decoders.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but for input validation: a failed check becomes an `Err`
/// instead of a panic.
///
/// ```text
/// ensure!(head_end <= MAX_HEADER_BYTES, ParseError::too_large_header(head_end, MAX_HEADER_BYTES));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
