//! Candidate request lists for each logical operation.
//!
//! Order matters: the prober returns the error of the last candidate when
//! all are unsupported, so later entries should be the shapes closest to
//! current deployments.

use serde_json::json;

use photobridge_core::SearchAssetsRequest;

use crate::transport::Candidate;

const ASSET_LIST_PATHS: &[&str] = &["/assets", "/asset", "/assets/owned", "/assets/all"];
const SEARCH_PATHS: &[&str] = &["/search/metadata", "/search/assets", "/search"];
const ALBUM_LIST_PATHS: &[&str] = &["/albums", "/album"];

pub fn asset_info(asset_id: &str) -> Vec<Candidate> {
    vec![
        Candidate::get(format!("/assets/{}", asset_id)),
        Candidate::get(format!("/asset/{}", asset_id)),
        Candidate::get(format!("/assets/{}/info", asset_id)),
    ]
}

pub fn list_albums() -> Vec<Candidate> {
    ALBUM_LIST_PATHS.iter().map(|p| Candidate::get(*p)).collect()
}

pub fn create_album(name: &str) -> Vec<Candidate> {
    vec![Candidate::post("/albums").with_body(json!({ "albumName": name }))]
}

/// Membership-add is exposed as an update (PUT) on some deployments and as a
/// creation-style call (POST) on others.
pub fn add_assets_to_album(album_id: &str, asset_ids: &[String]) -> Vec<Candidate> {
    let path = format!("/albums/{}/assets", album_id);
    let body = json!({ "ids": asset_ids });
    vec![
        Candidate::put(path.clone()).with_body(body.clone()),
        Candidate::post(path).with_body(body),
    ]
}

/// Path-major cross product of listing paths and pagination query styles.
///
/// `page` and `size` are clamped to at least 1.
pub fn list_assets(page: usize, size: usize, order: &str) -> Vec<Candidate> {
    let page = page.max(1);
    let size = size.max(1);
    let skip = (page - 1).saturating_mul(size);

    let variants = [
        pagination_query(order, &[("page", page), ("size", size)]),
        pagination_query(order, &[("skip", skip), ("take", size)]),
        pagination_query("", &[("page", page), ("size", size)]),
        pagination_query("", &[("skip", skip), ("take", size)]),
    ];

    ASSET_LIST_PATHS
        .iter()
        .flat_map(|path| {
            variants
                .iter()
                .map(move |query| Candidate::get(*path).with_query(query.clone()))
        })
        .collect()
}

pub fn search_assets(request: &SearchAssetsRequest) -> Vec<Candidate> {
    let body = json!(request);
    SEARCH_PATHS
        .iter()
        .map(|p| Candidate::post(*p).with_body(body.clone()))
        .collect()
}

/// `order` is emitted only when non-empty, integers only when positive.
fn pagination_query(order: &str, ints: &[(&str, usize)]) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if !order.is_empty() {
        query.push(("order".to_string(), order.to_string()));
    }
    for (key, value) in ints {
        if *value > 0 {
            query.push((key.to_string(), value.to_string()));
        }
    }
    query
}
