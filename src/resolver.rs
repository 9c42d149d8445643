use fnv::FnvHashSet;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::HighlightConfig;
use crate::registry::Registry;

/// A backend query fragment naming the fields a term must match against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchClause {
    pub fields: Vec<String>,
}

impl MatchClause {
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Collects the `multi_match` clauses of `query.bool.should` in a query
    /// document. Anything missing or malformed yields no clause.
    pub fn from_query(doc: &Value) -> Vec<MatchClause> {
        let should = match doc.pointer("/query/bool/should").and_then(Value::as_array) {
            Some(should) => should,
            None => return Vec::new(),
        };
        should
            .iter()
            .filter_map(|clause| clause.pointer("/multi_match/fields")?.as_array())
            .map(|fields| MatchClause::new(fields.iter().filter_map(Value::as_str)))
            .collect()
    }
}

/// Per-request inputs of the resolver.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    pub search_term: String,
    /// Fields requested by the caller, used verbatim when present.
    pub explicit_fields: Vec<String>,
    pub fallback_clauses: Vec<MatchClause>,
    /// Requests from the admin screen are never highlighted.
    pub admin: bool,
}

impl QueryContext {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Default::default()
        }
    }

    pub fn has_search_term(&self) -> bool {
        !self.search_term.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlighterType {
    Plain,
}

/// Highlight settings of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldHighlight {
    pub pre_tags: Vec<String>,
    pub post_tags: Vec<String>,
    #[serde(rename = "type")]
    pub highlighter: HighlighterType,
}

/// Field name to highlight settings, in field selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSpec {
    fields: Vec<(String, FieldHighlight)>,
}

impl HighlightSpec {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&FieldHighlight> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, highlight)| highlight)
    }

    /// The `highlight.fields` object of a query document.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, highlight)| (name.clone(), field_value(highlight)))
                .collect(),
        )
    }

    /// Adds every field to `highlight.fields` of the query document, leaving
    /// the rest of the document alone.
    pub fn apply(&self, doc: &mut Value) {
        if self.is_empty() {
            return;
        }
        let root = match doc.as_object_mut() {
            Some(root) => root,
            None => {
                warn!("query document is not an object, skip highlighting");
                return;
            }
        };
        let fields = child(child(root, "highlight"), "fields");
        for (name, highlight) in self.fields.iter() {
            fields.insert(name.clone(), field_value(highlight));
        }
    }
}

fn field_value(highlight: &FieldHighlight) -> Value {
    serde_json::to_value(highlight).unwrap_or(Value::Null)
}

fn child<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let value = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Builds the highlight part of a search query document.
pub struct HighlightFieldResolver<'a> {
    registry: &'a Registry,
}

impl<'a> HighlightFieldResolver<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[instrument(skip_all, fields(term = %ctx.search_term))]
    pub fn resolve(&self, ctx: &QueryContext, config: &HighlightConfig) -> HighlightSpec {
        // lets excerpt hooks register before results render
        self.registry.prepare_excerpt();

        if !ctx.has_search_term() || ctx.admin {
            debug!("not a front-end search request, no highlighting");
            return HighlightSpec::default();
        }

        let fields = select_fields(ctx);
        let tag = self.registry.highlight_tag(config);
        let highlight = FieldHighlight {
            pre_tags: vec![tag.open()],
            post_tags: vec![tag.close()],
            highlighter: HighlighterType::Plain,
        };
        debug!("highlight {} fields with <{}>", fields.len(), tag);

        HighlightSpec {
            fields: fields
                .into_iter()
                .map(|field| (field, highlight.clone()))
                .collect(),
        }
    }
}

fn select_fields(ctx: &QueryContext) -> Vec<String> {
    if !ctx.explicit_fields.is_empty() {
        return ctx.explicit_fields.clone();
    }
    let mut seen = FnvHashSet::default();
    ctx.fallback_clauses
        .iter()
        .flat_map(|clause| clause.fields.iter())
        .filter(|field| seen.insert(field.as_str()))
        .cloned()
        .collect()
}
