//! Engine-wide error taxonomy.
//!
//! [CSS 2.1 § 4.2 Rules for handling parsing errors](https://www.w3.org/TR/CSS21/syndata.html#parsing-errors)
//!
//! "In some cases, user agents must ignore part of an illegal style sheet."
//!
//! Malformed input is therefore *recoverable*: parsers report
//! [`Error::Invalid`] and the language layer discards the offending
//! declaration or rule and continues. The remaining variants are
//! caller-contract and protocol conditions.

use thiserror::Error;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the Bilby CSS engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed selector, unknown property, or bad value.
    ///
    /// [§ 4.2](https://www.w3.org/TR/CSS21/syndata.html#parsing-errors)
    /// "Ignore a declaration with an illegal value... ignore the ruleset."
    ///
    /// Recovery is local: the construct is discarded and the parser state
    /// is restored to the position it held on entry.
    #[error("invalid or malformed input")]
    Invalid,

    /// Contract violation by the caller (misordered call, empty name, ...).
    /// Returned synchronously with no state change.
    #[error("bad parameter")]
    BadParameter,

    /// The character encoding is unknown or the input cannot be decoded.
    ///
    /// [§ 4.4 CSS style sheet representation](https://www.w3.org/TR/CSS21/syndata.html#charset)
    #[error("unknown or undecodable character set")]
    BadCharset,

    /// The operation needs more input; call `append_data` / `data_done`
    /// before retrying.
    #[error("more data required")]
    NeedData,

    /// The input ended inside a construct that cannot be recovered.
    #[error("unexpected end of input")]
    Eof,

    /// Not a failure: the stylesheet contains `@import` rules whose
    /// children have not been registered yet. The client must drive
    /// import resolution before the sheet is usable for selection.
    #[error("imports pending; register imported stylesheets first")]
    ImportsPending,
}
