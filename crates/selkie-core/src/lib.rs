#![forbid(unsafe_code)]

//! Diagram skeleton compiler (headless).
//!
//! Turns a compact, loosely-specified description of boxes, labels, and connectors — often
//! AI-generated and partially malformed — into a fully schema-complete scene consumable by an
//! interactive hand-drawn-style vector canvas.
//!
//! Design goals:
//! - fail-soft: degraded input degrades visually, it never aborts the scene
//! - deterministic, testable outputs (timestamp/jitter pinning for fixtures)
//! - pure, synchronous transformation; the async APIs are executor-free twins

pub mod binder;
pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod model;
pub mod normalize;
pub mod router;
mod runtime;
pub mod scene;
pub mod skeleton;

pub use config::SceneConfig;
pub use error::{Error, Result};

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub strict: bool,
}

impl CompileOptions {
    /// Strict compilation: duplicate ids and self-referential connectors are returned as errors.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Lenient compilation (the default): duplicate ids resolve last-write-wins and broken
    /// connectors degrade to unbound-but-renderable arrows.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

#[derive(Debug, Clone)]
pub struct Compiler {
    scene_config: SceneConfig,
    fixed_timestamp_millis: Option<i64>,
    fixed_jitter_seed: Option<u64>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            scene_config: config::default_scene_config(),
            fixed_timestamp_millis: None,
            fixed_jitter_seed: None,
        }
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges overrides onto the scene-config defaults (source tag, view background, element
    /// style defaults, binding gap).
    pub fn with_scene_config(mut self, overrides: SceneConfig) -> Self {
        self.scene_config.deep_merge(overrides.as_value());
        self
    }

    /// Pins the `updated` timestamp written to every element.
    ///
    /// This exists primarily to make fixture snapshots deterministic. By default, the current
    /// wall-clock time in epoch milliseconds is used.
    pub fn with_fixed_timestamp_millis(mut self, millis: Option<i64>) -> Self {
        self.fixed_timestamp_millis = millis;
        self
    }

    /// Pins the entropy source behind the hand-drawn-style jitter fields (`seed`,
    /// `versionNonce`). When `None`, fresh local entropy is drawn per element.
    pub fn with_fixed_jitter_seed(mut self, seed: Option<u64>) -> Self {
        self.fixed_jitter_seed = seed;
        self
    }

    pub fn scene_config(&self) -> &SceneConfig {
        &self.scene_config
    }

    /// Compiles a skeleton (or an already-resolved scene) into a schema-complete scene value.
    ///
    /// Accepts either a bare skeleton array or a scene envelope object; for the latter the
    /// element list is recompiled and the `files` attachment map passes through opaquely.
    pub fn compile_sync(&self, raw: &Value, options: CompileOptions) -> Result<Value> {
        runtime::with_fixed_now_millis(self.fixed_timestamp_millis, || {
            runtime::with_fixed_jitter_seed(self.fixed_jitter_seed, || {
                self.compile_inner(raw, options)
            })
        })
    }

    pub async fn compile(&self, raw: &Value, options: CompileOptions) -> Result<Value> {
        self.compile_sync(raw, options)
    }

    /// Compiles skeleton JSON text. In lenient mode unparseable text compiles to an empty scene;
    /// strict mode surfaces [`Error::InvalidSkeletonJson`].
    pub fn compile_str_sync(&self, text: &str, options: CompileOptions) -> Result<Value> {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => self.compile_sync(&raw, options),
            Err(err) if !options.strict => {
                tracing::warn!(error = %err, "unparseable skeleton JSON; compiling an empty scene");
                self.compile_sync(&Value::Null, options)
            }
            Err(err) => Err(Error::InvalidSkeletonJson {
                message: err.to_string(),
            }),
        }
    }

    pub async fn compile_str(&self, text: &str, options: CompileOptions) -> Result<Value> {
        self.compile_str_sync(text, options)
    }

    fn compile_inner(&self, raw: &Value, options: CompileOptions) -> Result<Value> {
        let (raw_elements, files) = split_input(raw);
        let mut elements = skeleton::parse_skeleton(raw_elements);
        skeleton::ensure_ids(&mut elements);

        if let Err(err) = self.bind_and_route(&mut elements, options) {
            if options.strict {
                return Err(err);
            }
            // Total-failure fallback: normalize the raw, unbound descriptors so shapes and text
            // still render even without connectors.
            tracing::warn!(error = %err, "binding stages failed; emitting unbound elements");
            elements = skeleton::parse_skeleton(raw_elements);
            skeleton::ensure_ids(&mut elements);
        }

        normalize::normalize_elements(&mut elements, &self.scene_config);
        Ok(scene::assemble(elements, &self.scene_config, files))
    }

    fn bind_and_route(
        &self,
        elements: &mut Vec<Map<String, Value>>,
        options: CompileOptions,
    ) -> Result<()> {
        skeleton::dedup_ids(elements, options)?;

        if !scene::needs_binding(elements) {
            tracing::debug!("input carries no skeleton markers; skipping binding stages");
            return Ok(());
        }

        binder::bind_labels(elements, &self.scene_config);
        router::route_connectors(elements, options, &self.scene_config)?;
        Ok(())
    }
}

/// A scene envelope object re-entering the pipeline contributes its element list and its opaque
/// `files` map; anything else is treated as the skeleton array itself.
fn split_input(raw: &Value) -> (&Value, Option<Value>) {
    if let Value::Object(obj) = raw {
        if let Some(elements) = obj.get("elements") {
            return (elements, obj.get("files").cloned());
        }
    }
    (raw, None)
}

#[cfg(test)]
mod tests;
