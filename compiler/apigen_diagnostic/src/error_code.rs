use std::fmt;

/// Error codes for all model-building diagnostics.
///
/// Format: E#### where the second digit indicates the phase:
/// - E00xx: Interface admissibility
/// - E01xx: Supertype shape
/// - E02xx: Parameter/return legality
/// - E03xx: Overload merging
/// - E04xx: Whole-interface closure checks
/// - E05xx: Method shape
/// - E06xx: Model registry
/// - E9xxx: Internal errors
/// - W00xx: Warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Admissibility (E00xx)
    /// Generation marker on something other than an interface
    E0001,
    /// Interface declares nested types
    E0002,
    /// Type-variable bound other than the universal top type
    E0003,

    // Supertypes (E01xx)
    /// Concrete interface extends more than one concrete interface
    E0101,
    /// Abstract interface extends a concrete interface
    E0102,

    // Legality (E02xx)
    /// Illegal parameter type
    E0201,
    /// Illegal return type
    E0202,

    // Overloads (E03xx)
    /// Overloads with divergent return types
    E0301,

    // Closure (E04xx)
    /// Interface has neither methods nor supertypes
    E0401,

    // Method shape (E05xx)
    /// Index getter/setter without an `int` parameter
    E0501,
    /// Cacheable method returns `void`
    E0502,
    /// Fluent method return type does not extend the interface
    E0503,
    /// Extension method is not public
    E0504,
    /// Extension method is not static
    E0505,
    /// Extension method has no receiver parameter
    E0506,

    // Registry (E06xx)
    /// Requested interface is unknown or not a generation target
    E0601,
    /// Registry capacity exhausted
    E0602,

    // Internal Errors (E9xxx)
    /// Too many errors
    E9002,

    // Warnings (W00xx)
    /// Inherited fluent method not redeclared
    W0001,
    /// Native method has no body for the requested language
    W0002,
    /// Generation target lives in an implementation package
    W0003,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E0201").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0102 => "E0102",
            ErrorCode::E0201 => "E0201",
            ErrorCode::E0202 => "E0202",
            ErrorCode::E0301 => "E0301",
            ErrorCode::E0401 => "E0401",
            ErrorCode::E0501 => "E0501",
            ErrorCode::E0502 => "E0502",
            ErrorCode::E0503 => "E0503",
            ErrorCode::E0504 => "E0504",
            ErrorCode::E0505 => "E0505",
            ErrorCode::E0506 => "E0506",
            ErrorCode::E0601 => "E0601",
            ErrorCode::E0602 => "E0602",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W0001 => "W0001",
            ErrorCode::W0002 => "W0002",
            ErrorCode::W0003 => "W0003",
        }
    }

    /// Check if this is a warning code (Wxxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E0201.to_string(), "E0201");
        assert_eq!(ErrorCode::E0401.as_str(), "E0401");
    }

    #[test]
    fn test_warning_range() {
        assert!(ErrorCode::W0002.is_warning());
        assert!(!ErrorCode::E0002.is_warning());
    }
}
