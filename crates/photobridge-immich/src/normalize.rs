//! Response normalization.
//!
//! Deployments wrap the same logical payload in different JSON envelopes.
//! Each decoder here parses the body once into a generic [`Value`] and then
//! walks a small ordered chain of envelope shapes, each of which either
//! yields a canonical value or reports that it does not apply.
//!
//! | Payload | Shapes, in priority order |
//! |---------|---------------------------|
//! | asset list | `[...]`, `{"assets": [...]}`, `{"assets": {"items": [...]}}`, `{"items": [...]}` |
//! | album | bare object with identity, `{"album": {...}}` |
//! | album list | `[...]`, `{"albums": [...]}` (a non-empty wrapper beats an empty array) |
//! | asset | bare object, `{"asset": {...}}` |

use serde_json::{Map, Value};
use tracing::trace;

use photobridge_core::{find_uuid, Album, Asset, Error, Result, SearchResult};

/// Identifier fields tried in order for each asset record.
const ASSET_ID_FIELDS: &[&str] = &["id", "assetId", "deviceAssetId", "uuid"];

type ListShape = fn(&Value) -> Option<&Vec<Value>>;

fn bare_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

fn assets_array(value: &Value) -> Option<&Vec<Value>> {
    value.get("assets")?.as_array()
}

fn assets_items_array(value: &Value) -> Option<&Vec<Value>> {
    value.get("assets")?.get("items")?.as_array()
}

fn items_array(value: &Value) -> Option<&Vec<Value>> {
    value.get("items")?.as_array()
}

const ASSET_LIST_SHAPES: &[(&str, ListShape)] = &[
    ("array", bare_array),
    ("assets", assets_array),
    ("assets.items", assets_items_array),
    ("items", items_array),
];

fn parse(data: &[u8]) -> Result<Value> {
    serde_json::from_slice(data).map_err(|e| Error::Decode(format!("Invalid JSON: {}", e)))
}

// =============================================================================
// ASSETS
// =============================================================================

/// Decode a list of assets from any supported envelope.
pub fn decode_assets(data: &[u8]) -> Result<Vec<Asset>> {
    assets_from_value(&parse(data)?)
}

fn assets_from_value(value: &Value) -> Result<Vec<Asset>> {
    for (shape, extract) in ASSET_LIST_SHAPES {
        let Some(records) = extract(value) else {
            continue;
        };
        match records.iter().map(asset_from_record).collect::<Result<Vec<_>>>() {
            Ok(assets) => {
                trace!(shape, result_count = assets.len(), "Matched asset envelope");
                return Ok(assets);
            }
            Err(e) => {
                trace!(shape, error = %e, "Asset envelope elements did not match");
            }
        }
    }
    Err(Error::Decode(
        "Response matched no known asset list envelope".to_string(),
    ))
}

/// Decode a page of assets plus its pagination cursor.
pub fn decode_search_result(data: &[u8]) -> Result<SearchResult> {
    let value = parse(data)?;
    let assets = assets_from_value(&value)?;

    // Cursor fields may sit on the payload or inside an `assets` object.
    let scopes = [Some(&value), value.get("assets").filter(|v| v.is_object())];
    let next_page = scopes
        .iter()
        .flatten()
        .find_map(|scope| page_number(scope.get("nextPage")?))
        .unwrap_or(0);
    let next_page_token = scopes
        .iter()
        .flatten()
        .find_map(|scope| {
            scope
                .get("nextPageToken")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_default()
        .to_string();

    Ok(SearchResult {
        assets,
        next_page,
        next_page_token,
    })
}

fn page_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode a single asset, bare or wrapped in `{"asset": {...}}`.
pub fn decode_asset(data: &[u8]) -> Result<Asset> {
    let value = parse(data)?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::Decode("Asset response is not an object".to_string()))?;

    let has_id_field = ASSET_ID_FIELDS
        .iter()
        .any(|field| non_empty_str(object, field).is_some());
    match object.get("asset") {
        Some(inner) if inner.is_object() && !has_id_field => asset_from_record(inner),
        _ => asset_from_record(&value),
    }
}

/// Build a canonical asset from one record.
///
/// The identifier is the first non-empty of `id`, `assetId`, `deviceAssetId`,
/// `uuid` with leading `/` stripped. When none is present the first
/// UUID-shaped substring of the record's JSON text is used; failing that the
/// identifier stays empty and callers must reject it where it matters.
pub fn asset_from_record(record: &Value) -> Result<Asset> {
    let object = record
        .as_object()
        .ok_or_else(|| Error::Decode(format!("Asset record is not an object: {}", record)))?;

    let mut id = ASSET_ID_FIELDS
        .iter()
        .find_map(|field| non_empty_str(object, field))
        .unwrap_or_default()
        .trim_start_matches('/')
        .to_string();
    if id.is_empty() {
        if let Some(found) = find_uuid(&record.to_string()) {
            id = found.to_string();
        }
    }

    Ok(Asset {
        id,
        original_file_name: string_field(object, "originalFileName"),
        original_mime_type: string_field(object, "originalMimeType"),
        file_size_in_bytes: ["fileSizeInByte", "fileSizeInBytes"]
            .iter()
            .find_map(|field| object.get(*field).and_then(page_number))
            .unwrap_or(0),
        asset_type: string_field(object, "type"),
    })
}

// =============================================================================
// ALBUMS
// =============================================================================

/// Decode a single album, bare or wrapped in `{"album": {...}}`.
///
/// Only a record with a non-empty identity (`id`, `albumName` or `name`)
/// counts as a match.
pub fn decode_album(data: &[u8]) -> Result<Album> {
    let value = parse(data)?;
    let candidates = [Some(&value), value.get("album")];
    let found = candidates
        .into_iter()
        .flatten()
        .filter_map(|record| album_from_record(record).ok())
        .find(has_identity);
    found.ok_or_else(|| Error::Decode("Failed to decode album".to_string()))
}

/// Decode a list of albums, bare or wrapped in `{"albums": [...]}`.
///
/// An empty bare array is inconclusive: a non-empty `albums` field wins.
pub fn decode_albums(data: &[u8]) -> Result<Vec<Album>> {
    let value = parse(data)?;
    let bare = value.as_array().map(|records| albums_from_records(records));
    let wrapped = value
        .get("albums")
        .and_then(Value::as_array)
        .map(|records| albums_from_records(records));

    match (bare, wrapped) {
        (Some(Ok(albums)), _) if !albums.is_empty() => Ok(albums),
        (_, Some(Ok(albums))) if !albums.is_empty() => Ok(albums),
        (Some(result), _) | (None, Some(result)) => result,
        (None, None) => Err(Error::Decode(
            "Response matched no known album list envelope".to_string(),
        )),
    }
}

fn albums_from_records(records: &[Value]) -> Result<Vec<Album>> {
    records.iter().map(album_from_record).collect()
}

fn album_from_record(record: &Value) -> Result<Album> {
    let object = record
        .as_object()
        .ok_or_else(|| Error::Decode(format!("Album record is not an object: {}", record)))?;

    let display_name = non_empty_str(object, "albumName")
        .or_else(|| non_empty_str(object, "name"))
        .unwrap_or_default()
        .to_string();

    Ok(Album {
        id: string_field(object, "id"),
        display_name,
        asset_count: object
            .get("assetCount")
            .and_then(page_number)
            .unwrap_or(0),
        thumbnail_asset_id: string_field(object, "albumThumbnailAssetId"),
    })
}

fn has_identity(album: &Album) -> bool {
    !album.id.is_empty() || !album.display_name.is_empty()
}

// =============================================================================
// FIELD HELPERS
// =============================================================================

fn non_empty_str<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn string_field(object: &Map<String, Value>, field: &str) -> String {
    object
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
