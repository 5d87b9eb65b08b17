//! Designated host types the classifier recognizes by qualified name.
//!
//! The defaults follow the Java host conventions; a front-end for another
//! host overrides the names it spells differently.

use apigen_ir::Primitive;

/// Qualified names of the host types with fixed classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub string: String,
    /// Universal top type. Bounds on it count as "no bound".
    pub object: String,
    pub throwable: String,
    pub json_object: String,
    pub json_array: String,
    /// Single-argument callback (`Handler<T>`).
    pub callback: String,
    /// Success-or-failure wrapper (`AsyncResult<T>`).
    pub async_result: String,
    pub list: String,
    pub set: String,
    pub map: String,
    /// Root platform interface. Classified as an API interface but never
    /// recorded as referenced.
    pub root_platform: String,
    /// Boxed spellings of the primitives.
    pub boxed: Vec<(Primitive, String)>,
}

impl Default for WellKnownTypes {
    fn default() -> Self {
        WellKnownTypes {
            string: "java.lang.String".to_owned(),
            object: "java.lang.Object".to_owned(),
            throwable: "java.lang.Throwable".to_owned(),
            json_object: "io.vertx.core.json.JsonObject".to_owned(),
            json_array: "io.vertx.core.json.JsonArray".to_owned(),
            callback: "io.vertx.core.Handler".to_owned(),
            async_result: "io.vertx.core.AsyncResult".to_owned(),
            list: "java.util.List".to_owned(),
            set: "java.util.Set".to_owned(),
            map: "java.util.Map".to_owned(),
            root_platform: "io.vertx.core.Vertx".to_owned(),
            boxed: Primitive::ALL
                .iter()
                .map(|&p| (p, format!("java.lang.{}", boxed_simple_name(p))))
                .collect(),
        }
    }
}

impl WellKnownTypes {
    /// The primitive whose boxed form is `qualified_name`, if any.
    pub fn unboxed(&self, qualified_name: &str) -> Option<Primitive> {
        self.boxed
            .iter()
            .find(|(_, name)| name == qualified_name)
            .map(|(p, _)| *p)
    }

    /// Qualified name of the boxed form of `primitive`.
    pub fn boxed_name(&self, primitive: Primitive) -> Option<&str> {
        self.boxed
            .iter()
            .find(|(p, _)| *p == primitive)
            .map(|(_, name)| name.as_str())
    }
}

/// Simple name of the host wrapper class for `primitive`.
pub const fn boxed_simple_name(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Boolean => "Boolean",
        Primitive::Byte => "Byte",
        Primitive::Short => "Short",
        Primitive::Int => "Integer",
        Primitive::Long => "Long",
        Primitive::Float => "Float",
        Primitive::Double => "Double",
        Primitive::Char => "Character",
    }
}

/// Per-build options: the target language and the host's designated types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Target-language tag, e.g. `java` or `js`. Selects native bodies.
    pub lang: String,
    pub well_known: WellKnownTypes,
}

impl BuildOptions {
    /// Options for `lang` with the default host names.
    pub fn new(lang: impl Into<String>) -> Self {
        BuildOptions {
            lang: lang.into(),
            well_known: WellKnownTypes::default(),
        }
    }

    #[must_use]
    pub fn with_well_known(mut self, well_known: WellKnownTypes) -> Self {
        self.well_known = well_known;
        self
    }
}
