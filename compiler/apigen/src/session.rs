//! Two-phase generation sessions.
//!
//! Phase one scans the whole graph for extension methods and freezes them;
//! only then does phase two build models, so no interface ever sees a
//! partial set of extensions. Phase two runs once per target language on a
//! fresh [`ModelRegistry`].

use std::collections::BTreeMap;
use std::sync::Arc;

use apigen_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use apigen_ir::DeclGraph;
use apigen_model::{BuildOutput, ExtensionCollector, Extensions, ModelError, ModelRegistry};
use rayon::prelude::*;

use crate::GenConfig;

/// Everything a session produced.
#[derive(Debug, Default)]
pub struct GenOutput {
    /// Built models per language, in declaration order.
    pub models: BTreeMap<String, Vec<Arc<BuildOutput>>>,
    /// Errors and warnings, in report order.
    pub diagnostics: Vec<Diagnostic>,
    /// Present when at least one error was reported.
    pub errors: Option<ErrorGuaranteed>,
}

impl GenOutput {
    /// Models built for `lang`.
    pub fn models_for(&self, lang: &str) -> &[Arc<BuildOutput>] {
        self.models.get(lang).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The `lang` model of `qualified_name`, if it built.
    pub fn model(&self, lang: &str, qualified_name: &str) -> Option<&Arc<BuildOutput>> {
        self.models_for(lang)
            .iter()
            .find(|output| output.model.qualified_name == qualified_name)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }
}

/// Build every generator-facing interface of `graph`.
pub fn generate<G>(graph: &G, config: GenConfig) -> GenOutput
where
    G: DeclGraph + Sync + ?Sized,
{
    Session::new(graph, config).run()
}

/// A generation run over one declaration graph.
pub struct Session<'g, G: ?Sized> {
    graph: &'g G,
    config: GenConfig,
    extensions: Arc<Extensions>,
    targets: Vec<String>,
    queue: DiagnosticQueue,
}

impl<'g, G> Session<'g, G>
where
    G: DeclGraph + Sync + ?Sized,
{
    /// Collect extensions and pick the interfaces to build.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(graph: &'g G, config: GenConfig) -> Self {
        let mut queue = DiagnosticQueue::with_config(config.diagnostics.clone());

        let mut collector = ExtensionCollector::new();
        for err in collector.collect_marked(graph) {
            queue.emit_error(err.to_diagnostic());
        }
        let extensions = Arc::new(collector.freeze());
        tracing::debug!(extensions = extensions.len(), "extensions collected");

        let mut targets = Vec::new();
        for id in graph.type_decl_ids() {
            let decl = graph.type_decl(id);
            if !decl.is_gen() {
                continue;
            }
            if config.skip_impl_packages && is_impl_package(&decl.package) {
                tracing::debug!(interface = %decl.qualified_name, "skipped, implementation package");
                queue.add(
                    Diagnostic::warning(ErrorCode::W0003)
                        .with_message(format!(
                            "`{}` is generator-facing but lives in implementation package `{}`; skipped",
                            decl.qualified_name, decl.package
                        ))
                        .with_label(decl.span, format!("in `{}`", decl.qualified_name)),
                );
                continue;
            }
            targets.push(decl.qualified_name.clone());
        }

        Session {
            graph,
            config,
            extensions,
            targets,
            queue,
        }
    }

    /// Qualified names of the interfaces this session builds.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.queue
    }

    /// Build every target for every configured language.
    ///
    /// A failing interface reports its error and is left out of the output;
    /// the remaining interfaces still build.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(targets = self.targets.len(), parallel = self.config.parallel)
    )]
    pub fn run(mut self) -> GenOutput {
        let mut models = BTreeMap::new();
        let languages = self.config.languages.clone();
        for lang in &languages {
            let built = self.run_language(lang);
            tracing::debug!(lang = %lang, built = built.len(), "language finished");
            models.insert(lang.clone(), built);
        }

        let errors = self.queue.has_errors();
        GenOutput {
            models,
            diagnostics: self.queue.flush(),
            errors,
        }
    }

    fn run_language(&mut self, lang: &str) -> Vec<Arc<BuildOutput>> {
        let registry = ModelRegistry::new(
            self.graph,
            Arc::clone(&self.extensions),
            self.config.build_options(lang),
        )
        .with_capacity(self.config.registry_capacity);

        // Builds may run on the pool; reporting stays in declaration order.
        let results: Vec<Result<Arc<BuildOutput>, ModelError>> = if self.config.parallel {
            self.targets
                .par_iter()
                .map(|name| registry.get(name))
                .collect()
        } else {
            self.targets.iter().map(|name| registry.get(name)).collect()
        };

        let mut built = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(output) => {
                    for warning in &output.warnings {
                        self.queue.add(warning.clone());
                    }
                    built.push(output);
                }
                Err(err) => {
                    tracing::debug!(
                        lang,
                        interface = %err.subject,
                        code = err.code.as_str(),
                        "build failed"
                    );
                    self.queue.emit_error(err.to_diagnostic());
                }
            }
        }
        built
    }
}

/// Whether `package` is, or lives under, an `impl` package.
fn is_impl_package(package: &str) -> bool {
    package.split('.').any(|segment| segment == "impl")
}
