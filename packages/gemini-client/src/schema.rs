//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to generate a JSON schema from a Rust type, then
//! rewrites it into the OpenAPI subset accepted by `responseSchema`.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Listing {
//!     title: String,
//!     rooms: Option<String>,
//! }
//!
//! let schema = Listing::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    ///
    /// Gemini requires:
    /// 1. Fully inlined schemas (no `$ref`, no `definitions`)
    /// 2. A single `type` per node, upper-case (`OBJECT`, `STRING`, ...)
    /// 3. `nullable: true` instead of `null` in a type union
    /// 4. No `additionalProperties`, `$schema`, `title` or `default` keywords
    ///
    /// Optional fields stay out of `required`, so the provider may omit them.
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
        }

        to_gemini_dialect(&mut value);
        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "$schema",
    "title",
    "default",
    "additionalProperties",
    "examples",
];

/// Rewrite a draft-07 schema node (and its children) into the Gemini dialect.
fn to_gemini_dialect(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in UNSUPPORTED_KEYWORDS {
                map.remove(*key);
            }

            flatten_single_branch(map, "allOf");
            flatten_single_branch(map, "anyOf");

            if let Some(ty) = map.remove("type") {
                match ty {
                    Value::String(s) => {
                        map.insert("type".into(), Value::String(s.to_uppercase()));
                    }
                    Value::Array(types) => {
                        let concrete: Vec<&str> = types
                            .iter()
                            .filter_map(Value::as_str)
                            .filter(|t| *t != "null")
                            .collect();
                        if let Some(first) = concrete.first() {
                            map.insert("type".into(), Value::String(first.to_uppercase()));
                        }
                        if concrete.len() < types.len() {
                            map.insert("nullable".into(), Value::Bool(true));
                        }
                    }
                    other => {
                        map.insert("type".into(), other);
                    }
                }
            }

            // Keys under `properties` are field names, not keywords
            if let Some(Value::Object(props)) = map.get_mut("properties") {
                for (_, field) in props.iter_mut() {
                    to_gemini_dialect(field);
                }
            }
            if let Some(items) = map.get_mut("items") {
                to_gemini_dialect(items);
            }
            for keyword in ["anyOf", "allOf", "oneOf"] {
                if let Some(Value::Array(branches)) = map.get_mut(keyword) {
                    for branch in branches.iter_mut() {
                        to_gemini_dialect(branch);
                    }
                }
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                to_gemini_dialect(item);
            }
        }
        _ => {}
    }
}

/// Merge a combinator with one non-null branch into its parent node.
///
/// schemars emits `allOf: [{...}]` for defaulted struct fields and
/// `anyOf: [{...}, {type: null}]` for optional ones.
fn flatten_single_branch(map: &mut Map<String, Value>, keyword: &str) {
    let Some(Value::Array(branches)) = map.get(keyword) else {
        return;
    };

    let is_null = |b: &Value| b.get("type").and_then(Value::as_str) == Some("null");
    let non_null: Vec<&Value> = branches.iter().filter(|b| !is_null(b)).collect();
    if non_null.len() != 1 {
        return;
    }

    let had_null = non_null.len() < branches.len();
    let branch = non_null[0].clone();
    map.remove(keyword);

    if let Value::Object(inner) = branch {
        for (k, v) in inner {
            map.entry(k).or_insert(v);
        }
    }
    if had_null {
        map.insert("nullable".into(), Value::Bool(true));
    }
}

/// Inline all $ref references by replacing them with the actual schema from definitions.
fn inline_refs(value: &mut Value) {
    let definitions = if let Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

/// Recursively inline $ref references.
fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                // Parse ref like "#/definitions/Features"
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        let mut inlined = def.clone();
                        // Sibling keywords (e.g. description) win over the definition's
                        map.remove("$ref");
                        if let Value::Object(def_map) = &mut inlined {
                            for (k, v) in std::mem::take(map) {
                                def_map.insert(k, v);
                            }
                        }
                        *value = inlined;
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}
