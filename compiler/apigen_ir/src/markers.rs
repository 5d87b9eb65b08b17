//! Marker and modifier bit sets attached to declarations.
//!
//! Markers are the front-end's translation of the host language's
//! annotations; modifiers are its access/dispatch keywords.

use bitflags::bitflags;

bitflags! {
    /// Markers on a type declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeMarkers: u8 {
        /// Generator-facing interface: a binding-generation target.
        const GEN = 1 << 0;
        /// The interface denotes a single implementation identity.
        /// Only meaningful together with `GEN`.
        const CONCRETE = 1 << 1;
        /// Plain value type convertible to and from JSON containers.
        const DATA_OBJECT = 1 << 2;
    }
}

bitflags! {
    /// Markers on a method declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MethodMarkers: u8 {
        /// Excluded from generation.
        const IGNORE = 1 << 0;
        /// Returns the receiver to allow chained calls.
        const FLUENT = 1 << 1;
        /// Result may be memoized by the binding.
        const CACHE_RETURN = 1 << 2;
        /// Body supplied verbatim per target language in the doc text.
        const NATIVE = 1 << 3;
        /// Indexed read access.
        const INDEX_GETTER = 1 << 4;
        /// Indexed write access.
        const INDEX_SETTER = 1 << 5;
        /// Static function grafted onto the type of its first parameter.
        const EXTENSION = 1 << 6;
    }
}

bitflags! {
    /// Method modifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const STATIC = 1 << 1;
        /// Interface method with a default body.
        const DEFAULT = 1 << 2;
    }
}
