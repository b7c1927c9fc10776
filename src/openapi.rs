//! Deterministic cleanup pass over an OpenAPI document, run before generation.
//!
//! Two rewrites:
//! - fold duplicate schemas whose names differ only by dots (`v1.Cluster` vs
//!   `v1Cluster`) into the dot-free name, rewriting every `$ref`
//! - collapse `type: [..]` arrays into a single type
//!
//! Both are idempotent. This is tooling, not part of the request path.

use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

/// Where a document keeps its named schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSection {
    /// Swagger 2: `definitions`, refs `#/definitions/<name>`.
    Definitions,
    /// OpenAPI 3: `components.schemas`, refs `#/components/schemas/<name>`.
    ComponentSchemas,
}

impl SchemaSection {
    pub fn ref_prefix(self) -> &'static str {
        match self {
            SchemaSection::Definitions => "#/definitions/",
            SchemaSection::ComponentSchemas => "#/components/schemas/",
        }
    }

    fn detect(doc: &Value) -> Option<Self> {
        if doc.get("definitions").map_or(false, Value::is_object) {
            Some(SchemaSection::Definitions)
        } else if doc
            .get("components")
            .and_then(|c| c.get("schemas"))
            .map_or(false, Value::is_object)
        {
            Some(SchemaSection::ComponentSchemas)
        } else {
            None
        }
    }

    fn schemas(self, doc: &Value) -> Option<&Map<String, Value>> {
        match self {
            SchemaSection::Definitions => doc.get("definitions")?.as_object(),
            SchemaSection::ComponentSchemas => doc.get("components")?.get("schemas")?.as_object(),
        }
    }

    fn schemas_mut(self, doc: &mut Value) -> Option<&mut Map<String, Value>> {
        match self {
            SchemaSection::Definitions => doc.get_mut("definitions")?.as_object_mut(),
            SchemaSection::ComponentSchemas => doc
                .get_mut("components")?
                .get_mut("schemas")?
                .as_object_mut(),
        }
    }
}

/// One folded pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedSchema {
    pub dotted: String,
    pub canonical: String,
    pub dotted_refs: usize,
    pub canonical_refs: usize,
    pub refs_rewritten: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    pub schemas_before: usize,
    pub schemas_after: usize,
    pub folded: Vec<FoldedSchema>,
    pub type_arrays_collapsed: usize,
    /// Pairs still present after the pass; empty on success.
    pub remaining_duplicates: Vec<(String, String)>,
}

impl FixReport {
    pub fn is_clean(&self) -> bool {
        self.remaining_duplicates.is_empty()
    }
}

/// `(dotted, dot-free)` pairs where both names exist, sorted by dotted name.
pub fn find_duplicate_schemas(schemas: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = schemas
        .keys()
        .filter(|name| name.contains('.'))
        .filter_map(|name| {
            let plain = name.replace('.', "");
            schemas
                .contains_key(&plain)
                .then(|| (name.clone(), plain))
        })
        .collect();
    pairs.sort();
    pairs
}

/// Number of `$ref` values pointing exactly at `target`.
pub fn count_references(doc: &Value, target: &str) -> usize {
    match doc {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                if k == "$ref" && v.as_str() == Some(target) {
                    1
                } else {
                    count_references(v, target)
                }
            })
            .sum(),
        Value::Array(items) => items.iter().map(|v| count_references(v, target)).sum(),
        _ => 0,
    }
}

/// Point every `$ref` equal to `from` at `to`; returns how many were changed.
pub fn rewrite_references(doc: &mut Value, from: &str, to: &str) -> usize {
    match doc {
        Value::Object(map) => map
            .iter_mut()
            .map(|(k, v)| {
                if k == "$ref" && v.as_str() == Some(from) {
                    *v = Value::String(to.to_string());
                    1
                } else {
                    rewrite_references(v, from, to)
                }
            })
            .sum(),
        Value::Array(items) => items
            .iter_mut()
            .map(|v| rewrite_references(v, from, to))
            .sum(),
        _ => 0,
    }
}

/// Replace every `type` array with one type: `string`, else `number`, else
/// `integer`, else the first entry. Empty arrays are left alone.
pub fn collapse_type_arrays(doc: &mut Value) -> usize {
    match doc {
        Value::Object(map) => {
            let mut collapsed = 0;
            for (key, value) in map.iter_mut() {
                if key == "type" {
                    if let Some(chosen) = value.as_array().and_then(|types| pick_type(types)) {
                        *value = chosen;
                        collapsed += 1;
                        continue;
                    }
                }
                collapsed += collapse_type_arrays(value);
            }
            collapsed
        }
        Value::Array(items) => items.iter_mut().map(collapse_type_arrays).sum(),
        _ => 0,
    }
}

fn pick_type(types: &[Value]) -> Option<Value> {
    for preferred in ["string", "number", "integer"] {
        if types.iter().any(|t| t.as_str() == Some(preferred)) {
            return Some(Value::String(preferred.to_string()));
        }
    }
    types.first().cloned()
}

/// Run both rewrites over `doc` in place.
pub fn fix_document(doc: &mut Value) -> FixReport {
    let mut report = FixReport::default();

    if let Some(section) = SchemaSection::detect(doc) {
        let prefix = section.ref_prefix();
        let pairs = section.schemas(doc).map(find_duplicate_schemas).unwrap_or_default();
        report.schemas_before = section.schemas(doc).map_or(0, Map::len);
        info!(schemas = report.schemas_before, duplicates = pairs.len(), "scanned schemas");

        for (dotted, canonical) in pairs {
            let from = format!("{prefix}{dotted}");
            let to = format!("{prefix}{canonical}");
            let dotted_refs = count_references(doc, &from);
            let canonical_refs = count_references(doc, &to);
            let refs_rewritten = rewrite_references(doc, &from, &to);

            let removed = section
                .schemas_mut(doc)
                .and_then(|schemas| schemas.shift_remove(&dotted))
                .is_some();
            if removed {
                info!(%dotted, %canonical, dotted_refs, canonical_refs, "folded duplicate schema");
            } else {
                warn!(%dotted, "duplicate schema vanished before removal");
            }

            report.folded.push(FoldedSchema {
                dotted,
                canonical,
                dotted_refs,
                canonical_refs,
                refs_rewritten,
            });
        }

        report.schemas_after = section.schemas(doc).map_or(0, Map::len);
        report.remaining_duplicates = section
            .schemas(doc)
            .map(find_duplicate_schemas)
            .unwrap_or_default();
        if !report.remaining_duplicates.is_empty() {
            warn!(remaining = report.remaining_duplicates.len(), "duplicates remain after folding");
        }
    }

    report.type_arrays_collapsed = collapse_type_arrays(doc);
    info!(collapsed = report.type_arrays_collapsed, "collapsed type arrays");
    report
}

/// Read a document; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let doc: Value = if is_yaml {
        serde_yaml::from_str(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };
    if !doc.is_object() {
        return Err(Error::validation_with_context(
            "OpenAPI document must be an object",
            ErrorContext::new()
                .with_details(path.display().to_string())
                .with_source("openapi"),
        ));
    }
    Ok(doc)
}

/// Write a document as pretty JSON with a trailing newline.
pub fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    std::fs::write(path, out)?;
    Ok(())
}
