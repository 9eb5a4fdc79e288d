// src/api/mapper.rs
//! JSON collection mapper.
//!
//! Endpoint responses come in three shapes: a single object, a page of
//! bare items, and a page of envelopes (`{"item": ..., "created": ...,
//! "type": ...}`). The mapper normalizes all three, hoisting the
//! envelope's `created` timestamp into the inner object as `dateAdded`,
//! and dispatches heterogeneous pages per-item through a type resolver.

use crate::error::{Result, TidalError};
use crate::model::CatalogItem;
use serde_json::Value;

/// Result of mapping a response: either one object or a page of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped<T> {
    Single(T),
    Collection(Vec<T>),
}

impl<T> Mapped<T> {
    /// Flattens to a vector; a single object becomes a one-element page.
    pub fn into_collection(self) -> Vec<T> {
        match self {
            Self::Single(item) => vec![item],
            Self::Collection(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Collection(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One element of a page, after envelope normalization: the declared
/// type tag (if any) and the payload with `dateAdded` hoisted in.
struct Element {
    tag: Option<String>,
    payload: Value,
}

/// Unwraps a page element. An envelope's inner object absorbs the
/// envelope's `created` timestamp as `dateAdded`; a bare item passes
/// through untouched. The `type` tag may live on the envelope or on the
/// item itself.
fn normalize_element(element: &Value) -> Element {
    let envelope_tag = element
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string);

    let (inner, created) = match element.get("item") {
        Some(inner) => (inner, element.get("created")),
        None => (element, None),
    };

    let mut payload = inner.clone();
    if let (Some(created), Some(map)) = (created, payload.as_object_mut()) {
        if !created.is_null() {
            map.entry("dateAdded").or_insert_with(|| created.clone());
        }
    }

    let tag = envelope_tag.or_else(|| {
        inner
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    Element { tag, payload }
}

/// Splits a response into its elements, or `None` for a single object.
fn page_elements(json: &Value) -> Result<Option<Vec<Element>>> {
    let Some(items) = json.get("items") else {
        return Ok(None);
    };
    let items = items.as_array().ok_or_else(|| {
        TidalError::MalformedResponse("\"items\" is not an array".to_string())
    })?;
    Ok(Some(items.iter().map(normalize_element).collect()))
}

/// Maps a response through a uniform parse function.
///
/// A response without an `items` key is a single object; one with it is
/// a page, and every element (enveloped or bare) goes through `parse`
/// after normalization. Any element failing to parse fails the whole
/// mapping.
pub fn map_json<T>(json: &Value, parse: impl Fn(&Value) -> Result<T>) -> Result<Mapped<T>> {
    match page_elements(json)? {
        None => parse(json).map(Mapped::Single),
        Some(elements) => elements
            .iter()
            .map(|e| parse(&e.payload))
            .collect::<Result<Vec<T>>>()
            .map(Mapped::Collection),
    }
}

/// Resolves a declared type tag to a constructor for `T`.
///
/// The seam for heterogeneous mapping: `map_json_typed` consults the
/// resolver exactly once per element, so a page mixing tracks and videos
/// parses each element with the right constructor.
pub trait TypeResolver {
    type Item;

    fn resolve(&self, tag: &str, payload: &Value) -> Result<Self::Item>;
}

/// Resolver over the full closed catalog union.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogResolver;

impl TypeResolver for CatalogResolver {
    type Item = CatalogItem;

    fn resolve(&self, tag: &str, payload: &Value) -> Result<CatalogItem> {
        CatalogItem::parse_tagged(tag, payload)
    }
}

/// Maps a heterogeneous page, dispatching each element by its declared
/// type tag.
///
/// Single objects and untagged elements are rejected: without a tag
/// there is nothing to dispatch on, and guessing would hide schema
/// drift.
pub fn map_json_typed<R: TypeResolver>(json: &Value, resolver: &R) -> Result<Vec<R::Item>> {
    let Some(elements) = page_elements(json)? else {
        return Err(TidalError::MissingParser(
            "response is a single object with no type tag".to_string(),
        ));
    };
    elements
        .iter()
        .map(|element| {
            let tag = element.tag.as_deref().ok_or_else(|| {
                TidalError::MissingParser("item carries no type tag".to_string())
            })?;
            resolver.resolve(tag, &element.payload)
        })
        .collect()
}
