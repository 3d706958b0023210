use serde_json::Value;

use crate::model::{Character, CharacterRef, Episode, EpisodeRef, Page, PageInfo, Place};

use super::{CatalogError, EntityKind};

/// `filtered` marks a query sent with a name filter; only then does a
/// "There is nothing here" error mean zero matches.
pub(crate) fn parse_character_page(
    raw: &str,
    filtered: bool,
) -> Result<Page<Character>, CatalogError> {
    let document = parse_document(raw)?;
    parse_list(&document, "characters", filtered, parse_character)
}

pub(crate) fn parse_episode_page(raw: &str, filtered: bool) -> Result<Page<Episode>, CatalogError> {
    let document = parse_document(raw)?;
    parse_list(&document, "episodes", filtered, parse_episode)
}

pub(crate) fn parse_character_document(raw: &str, id: &str) -> Result<Character, CatalogError> {
    let document = parse_document(raw)?;
    let node = entity_node(&document, "character", EntityKind::Character, id)?;
    parse_character(node).ok_or_else(|| {
        CatalogError::MalformedResponse("character is missing its id or name".to_string())
    })
}

pub(crate) fn parse_episode_document(raw: &str, id: &str) -> Result<Episode, CatalogError> {
    let document = parse_document(raw)?;
    let node = entity_node(&document, "episode", EntityKind::Episode, id)?;
    parse_episode(node).ok_or_else(|| {
        CatalogError::MalformedResponse("episode is missing its id or name".to_string())
    })
}

fn parse_document(raw: &str) -> Result<Value, CatalogError> {
    let document: Value = serde_json::from_str(raw)
        .map_err(|err| CatalogError::MalformedResponse(format!("invalid JSON: {err}")))?;
    if !document.is_object() {
        return Err(CatalogError::MalformedResponse(
            "top-level value is not an object".to_string(),
        ));
    }
    Ok(document)
}

fn graphql_errors(document: &Value) -> Vec<String> {
    document
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .trim()
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The API answers an empty filtered list or an unknown id with a
/// "There is nothing here" error, sometimes tagged with a 404 code.
fn is_nothing_here(error: &Value) -> bool {
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .trim_end_matches('.');
    if message.eq_ignore_ascii_case("there is nothing here") {
        return true;
    }
    match error.pointer("/extensions/code") {
        Some(Value::Number(code)) => code.as_u64() == Some(404),
        Some(Value::String(code)) => code.trim() == "404",
        _ => false,
    }
}

fn only_nothing_here(document: &Value) -> bool {
    document
        .get("errors")
        .and_then(Value::as_array)
        .is_some_and(|errors| !errors.is_empty() && errors.iter().all(is_nothing_here))
}

/// `data` counts as present only when it is an object.
fn data_node(document: &Value) -> Option<&Value> {
    document.get("data").filter(|data| data.is_object())
}

fn non_null<'a>(document: &'a Value, field: &str) -> Option<&'a Value> {
    data_node(document)
        .and_then(|data| data.get(field))
        .filter(|node| !node.is_null())
}

fn missing_data() -> CatalogError {
    CatalogError::MalformedResponse("response has neither data nor errors".to_string())
}

fn parse_list<T>(
    document: &Value,
    field: &str,
    filtered: bool,
    parse_item: fn(&Value) -> Option<T>,
) -> Result<Page<T>, CatalogError> {
    let errors = graphql_errors(document);
    let Some(node) = non_null(document, field) else {
        if !errors.is_empty() && !(filtered && only_nothing_here(document)) {
            return Err(CatalogError::GraphQl(errors));
        }
        if errors.is_empty() && data_node(document).is_none() {
            return Err(missing_data());
        }
        return Ok(Page::empty());
    };

    let info = parse_page_info(node.get("info"));
    let results = node
        .get("results")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_item).collect())
        .unwrap_or_default();
    Ok(Page { info, results })
}

fn entity_node<'a>(
    document: &'a Value,
    field: &str,
    kind: EntityKind,
    id: &str,
) -> Result<&'a Value, CatalogError> {
    if let Some(node) = non_null(document, field) {
        return Ok(node);
    }

    let errors = graphql_errors(document);
    if !errors.is_empty() && !only_nothing_here(document) {
        return Err(CatalogError::GraphQl(errors));
    }
    if errors.is_empty() && data_node(document).is_none() {
        return Err(missing_data());
    }
    Err(CatalogError::NotFound {
        kind,
        id: id.to_string(),
    })
}

fn parse_page_info(node: Option<&Value>) -> PageInfo {
    let Some(node) = node else {
        return PageInfo::default();
    };
    PageInfo {
        count: u32_field(node, "count").unwrap_or(0),
        pages: u32_field(node, "pages").unwrap_or(0),
        next: u32_field(node, "next"),
        prev: u32_field(node, "prev"),
    }
}

fn u32_field(node: &Value, key: &str) -> Option<u32> {
    node.get(key)?
        .as_u64()
        .and_then(|value| u32::try_from(value).ok())
}

/// Ids come back as strings, but accept bare numbers too.
fn id_field(node: &Value) -> Option<String> {
    let id = match node.get("id")? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn text_field(node: &Value, key: &str) -> Option<String> {
    let text = node.get(key)?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn parse_place(node: Option<&Value>) -> Place {
    let Some(node) = node.filter(|node| node.is_object()) else {
        return Place::default();
    };
    Place {
        name: text_field(node, "name").unwrap_or_else(|| "unknown".to_string()),
        kind: text_field(node, "type"),
        dimension: text_field(node, "dimension"),
    }
}

fn parse_episode_ref(node: &Value) -> Option<EpisodeRef> {
    Some(EpisodeRef {
        id: id_field(node)?,
        name: text_field(node, "name")?,
        air_date: text_field(node, "air_date").unwrap_or_default(),
        code: text_field(node, "episode").unwrap_or_default(),
    })
}

fn parse_character_ref(node: &Value) -> Option<CharacterRef> {
    Some(CharacterRef {
        id: id_field(node)?,
        name: text_field(node, "name")?,
        status: text_field(node, "status"),
        species: text_field(node, "species"),
        origin: node.get("origin").and_then(|origin| text_field(origin, "name")),
        image: text_field(node, "image"),
    })
}

fn parse_character(node: &Value) -> Option<Character> {
    let episodes = node
        .get("episode")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_episode_ref).collect())
        .unwrap_or_default();
    Some(Character {
        id: id_field(node)?,
        name: text_field(node, "name")?,
        status: text_field(node, "status"),
        species: text_field(node, "species").unwrap_or_default(),
        kind: text_field(node, "type").unwrap_or_default(),
        gender: text_field(node, "gender").unwrap_or_default(),
        image: text_field(node, "image"),
        created: text_field(node, "created"),
        origin: parse_place(node.get("origin")),
        location: parse_place(node.get("location")),
        episodes,
    })
}

fn parse_episode(node: &Value) -> Option<Episode> {
    let characters = node
        .get("characters")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_character_ref).collect())
        .unwrap_or_default();
    Some(Episode {
        id: id_field(node)?,
        name: text_field(node, "name")?,
        air_date: text_field(node, "air_date").unwrap_or_default(),
        code: text_field(node, "episode").unwrap_or_default(),
        created: text_field(node, "created"),
        characters,
    })
}
