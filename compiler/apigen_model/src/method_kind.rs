//! Method kind inference.
//!
//! Precedence: index markers, bean-style getters, callback-terminated
//! methods, bean-style setters, everything else.

use std::fmt;

use apigen_ir::{MethodMarkers, Primitive};

use crate::TypeKind;

/// What role a method plays for renderers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MethodKind {
    Getter,
    Setter,
    IndexGetter,
    IndexSetter,
    /// Ends with a plain callback parameter.
    Handler,
    /// Ends with a callback over an async result.
    Future,
    Other,
}

impl MethodKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            MethodKind::Getter => "getter",
            MethodKind::Setter => "setter",
            MethodKind::IndexGetter => "index-getter",
            MethodKind::IndexSetter => "index-setter",
            MethodKind::Handler => "handler",
            MethodKind::Future => "future",
            MethodKind::Other => "other",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An index marker on a method with no `int` parameter.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MissingIndexParam {
    pub marker: &'static str,
}

/// Infer the kind of a method from its shape.
pub fn classify_method(
    name: &str,
    params: &[TypeKind],
    return_type: &TypeKind,
    fluent: bool,
    markers: MethodMarkers,
) -> Result<MethodKind, MissingIndexParam> {
    let has_int_param = || {
        params.iter().any(|p| {
            matches!(
                p,
                TypeKind::Basic {
                    primitive: Primitive::Int,
                    boxed: false
                }
            )
        })
    };

    if markers.contains(MethodMarkers::INDEX_GETTER) {
        return if has_int_param() {
            Ok(MethodKind::IndexGetter)
        } else {
            Err(MissingIndexParam {
                marker: "index getter",
            })
        };
    }
    if markers.contains(MethodMarkers::INDEX_SETTER) {
        return if has_int_param() {
            Ok(MethodKind::IndexSetter)
        } else {
            Err(MissingIndexParam {
                marker: "index setter",
            })
        };
    }

    if (has_bean_prefix(name, "is") || has_bean_prefix(name, "get"))
        && params.is_empty()
        && !return_type.is_void()
    {
        return Ok(MethodKind::Getter);
    }

    let void_or_fluent = return_type.is_void() || fluent;
    if void_or_fluent {
        if let Some(TypeKind::Callback(element)) = params.last() {
            return Ok(match **element {
                TypeKind::AsyncResult(_) => MethodKind::Future,
                _ => MethodKind::Handler,
            });
        }
        if has_bean_prefix(name, "set") && params.len() == 1 {
            return Ok(MethodKind::Setter);
        }
    }

    Ok(MethodKind::Other)
}

/// `prefix` followed by an uppercase character.
fn has_bean_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}
