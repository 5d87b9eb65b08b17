//! Interface model construction for the apigen binding generator.
//!
//! Given a declaration graph and the name of an interface marked as a
//! generation target, this crate validates the interface and produces an
//! [`InterfaceModel`]: a language-neutral description of its methods,
//! supertypes, referenced types and type parameters that renderers for
//! other languages consume.
//!
//! # Pipeline
//!
//! - [`TypeClassifier`] maps declared types to [`TypeKind`]s
//! - [`legality`] decides which kinds may cross a method boundary
//! - [`method_kind`] infers getters, handlers, futures and friends
//! - [`build_interface`] runs the per-interface checks and assembly
//! - [`ModelRegistry`] caches built models per target language
//!
//! Errors are fatal per interface ([`ModelError`]); warnings travel with the
//! built model in [`BuildOutput`].

mod builder;
mod classify;
mod error;
mod extensions;
mod kind;
pub mod legality;
pub mod method_kind;
mod model;
pub mod native;
mod platform;
mod registry;
mod variance;
mod vars;
mod well_known;

pub use builder::{build_interface, BuildOutput};
pub use classify::TypeClassifier;
pub use error::{ModelError, ModelErrorKind};
pub use extensions::{ExtensionCollector, Extensions};
pub use kind::{ClassRef, TypeKind};
pub use method_kind::MethodKind;
pub use model::{
    InterfaceModel, MethodGroup, MethodModel, ParamModel, TypeParamModel, Variance,
};
pub use platform::Platform;
pub use registry::{ModelRegistry, DEFAULT_REGISTRY_CAPACITY};
pub use variance::resolve_variance;
pub use vars::Var;
pub use well_known::{BuildOptions, WellKnownTypes};
