//! Site variance of interface type parameters.
//!
//! A parameter used only in covariant positions (returns, async values)
//! may be rendered covariantly; one used only in contravariant positions
//! (parameters, callback elements) contravariantly. Container and API
//! interface arguments pin their variables as invariant.

use rustc_hash::FxHashMap;

use crate::{MethodModel, TypeKind, TypeParamModel, Variance};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Polarity {
    Positive,
    Negative,
    Invariant,
}

impl Polarity {
    fn flip(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
            Polarity::Invariant => Polarity::Invariant,
        }
    }
}

#[derive(Copy, Clone, Default, Debug)]
struct Usage {
    positive: bool,
    negative: bool,
}

/// Compute the compatible variances of each interface type parameter.
///
/// `methods` should be the members the interface declares itself; inherited
/// and grafted methods do not constrain its parameters.
#[tracing::instrument(level = "debug", skip_all, fields(params = type_params.len()))]
pub fn resolve_variance<'m>(
    type_params: &[String],
    methods: impl IntoIterator<Item = &'m MethodModel>,
) -> Vec<TypeParamModel> {
    let mut usage: FxHashMap<&str, Usage> = type_params
        .iter()
        .map(|name| (name.as_str(), Usage::default()))
        .collect();

    for method in methods.into_iter().filter(|m| !m.is_static) {
        let mut record = |kind: &TypeKind, polarity: Polarity| {
            scan(kind, polarity, &method.type_params, &mut usage);
        };
        record(&method.return_type, Polarity::Positive);
        for param in &method.params {
            record(&param.ty, Polarity::Negative);
        }
    }

    type_params
        .iter()
        .map(|name| {
            let used = usage.get(name.as_str()).copied().unwrap_or_default();
            let mut variance = Variance::INVARIANT;
            if !used.negative {
                variance |= Variance::COVARIANT;
            }
            if !used.positive {
                variance |= Variance::CONTRAVARIANT;
            }
            tracing::debug!(param = %name, ?variance, "resolved site variance");
            TypeParamModel {
                name: name.clone(),
                variance,
            }
        })
        .collect()
}

fn scan(
    kind: &TypeKind,
    polarity: Polarity,
    shadowed: &[String],
    usage: &mut FxHashMap<&str, Usage>,
) {
    match kind {
        TypeKind::TypeVariable { name, .. } => {
            if shadowed.iter().any(|s| s == name) {
                return;
            }
            if let Some(entry) = usage.get_mut(name.as_str()) {
                match polarity {
                    Polarity::Positive => entry.positive = true,
                    Polarity::Negative => entry.negative = true,
                    Polarity::Invariant => {
                        entry.positive = true;
                        entry.negative = true;
                    }
                }
            }
        }
        TypeKind::Callback(element) => scan(element, polarity.flip(), shadowed, usage),
        TypeKind::AsyncResult(value) => scan(value, polarity, shadowed, usage),
        TypeKind::List(element) | TypeKind::Set(element) => {
            scan(element, Polarity::Invariant, shadowed, usage);
        }
        TypeKind::Map(key, value) => {
            scan(key, Polarity::Invariant, shadowed, usage);
            scan(value, Polarity::Invariant, shadowed, usage);
        }
        TypeKind::ApiInterface { args, .. } => {
            for arg in args {
                scan(arg, Polarity::Invariant, shadowed, usage);
            }
        }
        TypeKind::Void
        | TypeKind::Basic { .. }
        | TypeKind::String
        | TypeKind::JsonObject
        | TypeKind::JsonArray
        | TypeKind::Enum(_)
        | TypeKind::DataObject(_)
        | TypeKind::Throwable
        | TypeKind::Object
        | TypeKind::Other(_) => {}
    }
}
