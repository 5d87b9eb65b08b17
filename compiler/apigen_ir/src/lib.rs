//! Declaration graph for the apigen model builder.
//!
//! A front-end (annotation processor, IDL loader, ...) elaborates source
//! declarations and hands them over as an immutable graph:
//! - Spans for source locations
//! - `DeclId` / `MethodId` handles into flat arenas
//! - `DeclaredType` trees (the host type system's generic types)
//! - `TypeDecl` / `MethodDecl` records with their markers and modifiers
//!
//! The model builder depends only on the [`DeclGraph`] capability trait.
//! [`DeclArena`] is the in-memory implementation front-ends populate.
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: declarations refer to each other by index, never by pointer
//! - **Read-only after hand-off**: the builder never mutates the graph

mod decl;
mod declared_type;
mod graph;
mod markers;
mod span;

pub use decl::{DeclId, DeclKind, MethodDecl, MethodId, ParamDecl, TypeDecl, TypeParam};
pub use declared_type::{Bindings, DeclaredType, DisplayType, Primitive};
pub use graph::{DeclArena, DeclGraph};
pub use markers::{MethodMarkers, Modifiers, TypeMarkers};
pub use span::Span;
