//! Model construction errors.
//!
//! A `ModelError` is fatal for one interface: the builder stops at the first
//! one and the registry caches it. Orchestration turns it into a
//! [`Diagnostic`] with [`ModelError::to_diagnostic`].

use std::fmt;

use apigen_diagnostic::{Diagnostic, ErrorCode};
use apigen_ir::Span;

/// Category of a model construction failure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ModelErrorKind {
    /// The declaration cannot be a generation target at all.
    Admissibility,
    /// Concrete/abstract supertype rules violated.
    SupertypeShape,
    /// A parameter or return type is not legal.
    IllegalTypeShape,
    /// Overloads disagree on their return type.
    OverloadConflict,
    /// Nothing to generate.
    EmptyModel,
    /// Marker or modifier misuse on a single method.
    MethodShape,
    /// The registry could not serve the request.
    Registry,
}

/// A fatal model construction error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelError {
    pub kind: ModelErrorKind,
    pub code: ErrorCode,
    pub message: String,
    /// Span of the offending declaration.
    pub span: Span,
    /// Qualified description of the offending declaration, e.g.
    /// `com.acme.Greeter#greet`.
    pub subject: String,
}

impl ModelError {
    pub fn new(
        kind: ModelErrorKind,
        code: ErrorCode,
        subject: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        ModelError {
            kind,
            code,
            message: message.into(),
            span,
            subject: subject.into(),
        }
    }

    pub fn admissibility(
        code: ErrorCode,
        subject: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ModelErrorKind::Admissibility, code, subject, span, message)
    }

    pub fn supertype_shape(
        code: ErrorCode,
        subject: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ModelErrorKind::SupertypeShape, code, subject, span, message)
    }

    pub fn illegal_type(
        code: ErrorCode,
        subject: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ModelErrorKind::IllegalTypeShape, code, subject, span, message)
    }

    pub fn overload_conflict(
        subject: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ModelErrorKind::OverloadConflict,
            ErrorCode::E0301,
            subject,
            span,
            message,
        )
    }

    pub fn empty_model(subject: impl Into<String>, span: Span) -> Self {
        Self::new(
            ModelErrorKind::EmptyModel,
            ErrorCode::E0401,
            subject,
            span,
            "interface does not contain any methods for generation",
        )
    }

    pub fn method_shape(
        code: ErrorCode,
        subject: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ModelErrorKind::MethodShape, code, subject, span, message)
    }

    pub fn registry(code: ErrorCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ModelErrorKind::Registry, code, subject, Span::DUMMY, message)
    }

    /// Render as an error diagnostic labeled at the offending declaration.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, format!("in `{}`", self.subject));
        match self.kind {
            ModelErrorKind::IllegalTypeShape => diag.with_note(
                "legal types are basic types, JSON types, enums, API interfaces, \
                 data objects (parameters only) and callbacks over them",
            ),
            ModelErrorKind::EmptyModel => {
                diag.with_note("declare at least one method or extend a generated interface")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.subject, self.message)
    }
}

impl std::error::Error for ModelError {}
