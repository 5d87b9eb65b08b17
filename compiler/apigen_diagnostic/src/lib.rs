//! Diagnostic system for model-building failures and warnings.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (which declaration it went wrong on)
//! - Notes (why it's wrong)
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was emitted. Orchestration code returns it instead of a bare flag:
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn run() -> Result<Models, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
