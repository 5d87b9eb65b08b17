//! Parameter and return-type legality.
//!
//! Only kinds every target language can render are legal at a method
//! boundary. Methods with a native override are exempt: their body is
//! written by hand for the target language.

use crate::TypeKind;

/// Where a type appears in a method signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Position {
    Param,
    Return,
}

impl Position {
    pub const fn describe(self) -> &'static str {
        match self {
            Position::Param => "a parameter",
            Position::Return => "a return type",
        }
    }
}

/// Whether `kind` may be used as a parameter type.
pub fn legal_param(kind: &TypeKind) -> bool {
    match kind {
        TypeKind::Basic { .. }
        | TypeKind::String
        | TypeKind::JsonObject
        | TypeKind::JsonArray
        | TypeKind::Enum(_)
        | TypeKind::Object
        | TypeKind::ApiInterface { .. }
        | TypeKind::DataObject(_) => true,
        TypeKind::Callback(element) => legal_callback_element(element),
        TypeKind::AsyncResult(value) => legal_async_value(value),
        TypeKind::TypeVariable { bounds_ok, .. } => *bounds_ok,
        TypeKind::Void
        | TypeKind::List(_)
        | TypeKind::Set(_)
        | TypeKind::Map(..)
        | TypeKind::Throwable
        | TypeKind::Other(_) => false,
    }
}

/// Whether `kind` may be used as a return type.
pub fn legal_return(kind: &TypeKind) -> bool {
    match kind {
        TypeKind::Basic { .. }
        | TypeKind::String
        | TypeKind::JsonObject
        | TypeKind::JsonArray
        | TypeKind::Void
        | TypeKind::Enum(_)
        | TypeKind::ApiInterface { .. } => true,
        TypeKind::List(element) | TypeKind::Set(element) => element.is_container_element(),
        TypeKind::Map(key, value) => **key == TypeKind::String && value.is_container_element(),
        TypeKind::TypeVariable { bounds_ok, .. } => *bounds_ok,
        TypeKind::DataObject(_)
        | TypeKind::Callback(_)
        | TypeKind::AsyncResult(_)
        | TypeKind::Throwable
        | TypeKind::Object
        | TypeKind::Other(_) => false,
    }
}

/// Element of a callback: anything legal as a return, a throwable, or a
/// legal async result.
pub fn legal_callback_element(element: &TypeKind) -> bool {
    match element {
        TypeKind::AsyncResult(value) => legal_async_value(value),
        TypeKind::Throwable => true,
        other => legal_return(other),
    }
}

/// Value of an async result: anything legal as a return.
pub fn legal_async_value(value: &TypeKind) -> bool {
    legal_return(value)
}

/// Check `kind` at `position`. Native methods skip the check.
pub fn is_legal(kind: &TypeKind, position: Position, native: bool) -> bool {
    native
        || match position {
            Position::Param => legal_param(kind),
            Position::Return => legal_return(kind),
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassRef;
    use apigen_ir::{Primitive, TypeDecl};

    fn data_object() -> TypeKind {
        TypeKind::DataObject(ClassRef::of(&TypeDecl::class("com.acme.Options")))
    }

    fn boxed(kind: TypeKind) -> Box<TypeKind> {
        Box::new(kind)
    }

    #[test]
    fn basics_are_legal_everywhere() {
        let int = TypeKind::Basic {
            primitive: Primitive::Int,
            boxed: false,
        };
        assert!(legal_param(&int));
        assert!(legal_return(&int));
        assert!(legal_param(&TypeKind::String));
        assert!(legal_return(&TypeKind::JsonArray));
    }

    #[test]
    fn void_only_returns() {
        assert!(legal_return(&TypeKind::Void));
        assert!(!legal_param(&TypeKind::Void));
    }

    #[test]
    fn object_only_params() {
        assert!(legal_param(&TypeKind::Object));
        assert!(!legal_return(&TypeKind::Object));
    }

    #[test]
    fn data_objects_are_params_not_returns() {
        assert!(legal_param(&data_object()));
        assert!(!legal_return(&data_object()));
    }

    #[test]
    fn containers_are_returns_not_params() {
        let list = TypeKind::List(boxed(TypeKind::String));
        assert!(legal_return(&list));
        assert!(!legal_param(&list));
    }

    #[test]
    fn callback_elements() {
        assert!(legal_param(&TypeKind::Callback(boxed(TypeKind::Void))));
        assert!(legal_param(&TypeKind::Callback(boxed(TypeKind::Throwable))));
        assert!(!legal_param(&TypeKind::Callback(boxed(data_object()))));
        assert!(legal_param(&TypeKind::Callback(boxed(TypeKind::List(
            boxed(TypeKind::JsonObject)
        )))));
        assert!(!legal_param(&TypeKind::Callback(boxed(TypeKind::Object))));
        assert!(!legal_param(&TypeKind::Callback(boxed(TypeKind::Other(
            "java.util.Locale".to_owned()
        )))));
    }

    #[test]
    fn async_values() {
        let completion =
            |value: TypeKind| TypeKind::Callback(boxed(TypeKind::AsyncResult(boxed(value))));
        assert!(legal_param(&completion(TypeKind::String)));
        assert!(legal_param(&completion(TypeKind::Void)));
        assert!(!legal_param(&completion(data_object())));
        assert!(!legal_param(&completion(TypeKind::Throwable)));
        assert!(!legal_param(&completion(TypeKind::Object)));
    }

    #[test]
    fn bounded_type_variables_are_illegal() {
        let bounded = TypeKind::TypeVariable {
            name: "T".to_owned(),
            bounds_ok: false,
        };
        assert!(!legal_param(&bounded));
        assert!(!legal_return(&bounded));
    }

    #[test]
    fn native_methods_skip_the_check() {
        let other = TypeKind::Other("java.util.Locale".to_owned());
        assert!(!is_legal(&other, Position::Return, false));
        assert!(is_legal(&other, Position::Return, true));
        assert!(is_legal(&other, Position::Param, true));
    }
}
