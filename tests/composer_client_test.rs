//! Tests for the Composer REST client against an in-process server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use mapcompose::api::{ComposerClient, Layer, LayerRef, MapApi, StyleSaveError, YSLD_CONTENT_TYPE};

#[derive(Clone, Default)]
struct ServerState {
    saved_styles: Arc<Mutex<Vec<(String, Option<String>)>>>,
    put_orders: Arc<Mutex<Vec<Vec<String>>>>,
}

async fn get_map(Path((ws, map)): Path<(String, String)>) -> Response {
    if map != "map1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("No such map: {ws}:{map}"), "trace": "MapNotFound" })),
        )
            .into_response();
    }
    Json(json!({
        "name": "map1",
        "workspace": ws,
        "title": "Roads",
        "proj": { "srs": "EPSG:4326", "wkt": "GEOGCS[...]" },
        "layer_count": 2
    }))
    .into_response()
}

async fn get_map_layers(Path((ws, _map)): Path<(String, String)>) -> Response {
    Json(json!([
        { "name": "roads", "workspace": ws, "type": "vector", "geometry": "LineString" },
        { "name": "dem", "workspace": ws, "type": "raster" }
    ]))
    .into_response()
}

async fn put_map_layers(
    State(state): State<ServerState>,
    Json(layers): Json<Vec<serde_json::Value>>,
) -> Response {
    let names = layers
        .iter()
        .filter_map(|l| l["name"].as_str().map(str::to_string))
        .collect();
    state.put_orders.lock().unwrap().push(names);
    Json(layers).into_response()
}

async fn post_map_layers(Json(refs): Json<Vec<LayerRef>>) -> Response {
    let layers: Vec<_> = refs
        .iter()
        .map(|r| json!({ "name": r.name, "workspace": r.workspace }))
        .collect();
    Json(layers).into_response()
}

async fn delete_map_layer(Path((_ws, _map, layer)): Path<(String, String, String)>) -> Response {
    if layer == "locked" {
        return (StatusCode::CONFLICT, "layer is locked").into_response();
    }
    StatusCode::OK.into_response()
}

async fn list_layers(Path(ws): Path<String>) -> Response {
    Json(json!({
        "layers": [{ "name": "roads", "workspace": ws }, { "name": "rivers", "workspace": ws }],
        "total": 2
    }))
    .into_response()
}

async fn get_style(headers: HeaderMap, Path((_ws, layer)): Path<(String, String)>) -> Response {
    if !headers.contains_key(header::AUTHORIZATION) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    format!("title: {layer}\nfeature-styles: []").into_response()
}

async fn put_style(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Path((_ws, layer)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type != YSLD_CONTENT_TYPE {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    if body.contains("bad") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "Invalid style",
                "errors": [{ "problem": "unknown key 'bad'", "line": 2, "column": 4 }]
            })),
        )
            .into_response();
    }
    if body.contains("boom") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Style write failed", "trace": "IOException at line 1" })),
        )
            .into_response();
    }
    state
        .saved_styles
        .lock()
        .unwrap()
        .push((layer, query.get("map").cloned()));
    StatusCode::OK.into_response()
}

async fn spawn_composer_server() -> Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/maps/:ws/:map", get(get_map))
        .route(
            "/api/maps/:ws/:map/layers",
            get(get_map_layers).put(put_map_layers).post(post_map_layers),
        )
        .route("/api/maps/:ws/:map/layers/:layer", delete(delete_map_layer))
        .route("/api/layers/:ws", get(list_layers))
        .route("/api/layers/:ws/:layer/style", get(get_style).put(put_style))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    // Trailing slash is trimmed by the client
    Ok((format!("http://{addr}/"), state))
}

#[tokio::test]
async fn test_get_map_keeps_unknown_fields() {
    let (url, _state) = spawn_composer_server().await.expect("spawn server");
    let client = ComposerClient::new(url);

    let map = client.get_map("ws1", "map1").await.expect("map");
    assert_eq!(map.name, "map1");
    assert_eq!(map.title.as_deref(), Some("Roads"));
    assert_eq!(map.proj.as_ref().map(|p| p.srs.as_str()), Some("EPSG:4326"));
    assert_eq!(map.extra.get("layer_count"), Some(&json!(2)));
    assert!(map.layers.is_empty());
}

#[tokio::test]
async fn test_missing_map_reports_server_message() {
    let (url, _state) = spawn_composer_server().await.expect("spawn server");
    let client = ComposerClient::new(url);

    let err = client.get_map("ws1", "nope").await.expect_err("should fail");
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "No such map: ws1:nope");
    assert_eq!(err.trace.as_deref(), Some("MapNotFound"));
}

#[tokio::test]
async fn test_map_layers_round_trip_through_put() {
    let (url, state) = spawn_composer_server().await.expect("spawn server");
    let client = ComposerClient::new(url);

    let mut layers: Vec<Layer> = client.get_map_layers("ws1", "map1").await.expect("layers");
    assert_eq!(layers[0].layer_type.as_deref(), Some("vector"));
    layers.reverse();

    let saved = client
        .put_map_layers("ws1", "map1", &layers)
        .await
        .expect("put layers");
    assert_eq!(saved[0].name, "dem");
    assert_eq!(
        state.put_orders.lock().unwrap().clone(),
        vec![vec!["dem".to_string(), "roads".to_string()]]
    );
}

#[tokio::test]
async fn test_add_and_delete_map_layer() {
    let (url, _state) = spawn_composer_server().await.expect("spawn server");
    let client = ComposerClient::new(url);

    let refs = [LayerRef {
        workspace: "ws1".to_string(),
        name: "rivers".to_string(),
    }];
    let added = client.add_map_layers("ws1", "map1", &refs).await.expect("add");
    assert_eq!(added[0].name, "rivers");

    client
        .delete_map_layer("ws1", "map1", "rivers")
        .await
        .expect("delete");

    let err = client
        .delete_map_layer("ws1", "map1", "locked")
        .await
        .expect_err("locked layer");
    assert_eq!(err.status, Some(409));
    assert_eq!(err.message, "layer is locked");
}

#[tokio::test]
async fn test_list_workspace_layers() {
    let (url, _state) = spawn_composer_server().await.expect("spawn server");
    let client = ComposerClient::new(url);

    let layers = client.list_layers("ws1").await.expect("list");
    let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["roads", "rivers"]);
}

#[tokio::test]
async fn test_get_style_sends_basic_auth() {
    let (url, _state) = spawn_composer_server().await.expect("spawn server");

    let anonymous = ComposerClient::new(url.clone());
    let err = anonymous.get_style("ws1", "roads").await.expect_err("unauthorized");
    assert_eq!(err.status, Some(401));

    let client = ComposerClient::new(url).with_credentials("admin".to_string(), Some("geoserver".to_string()));
    let style = client.get_style("ws1", "roads").await.expect("style");
    assert!(style.starts_with("title: roads"));
}

#[tokio::test]
async fn test_put_style_outcomes() {
    let (url, state) = spawn_composer_server().await.expect("spawn server");
    let client = ComposerClient::new(url);

    client
        .put_style("ws1", "roads", "title: roads", Some("map1"))
        .await
        .expect("saved");
    assert_eq!(
        state.saved_styles.lock().unwrap().clone(),
        vec![("roads".to_string(), Some("map1".to_string()))]
    );

    match client.put_style("ws1", "roads", "title: roads\n  bad: 1", None).await {
        Err(StyleSaveError::Validation(markers)) => {
            assert_eq!(markers.len(), 1);
            assert_eq!(markers[0].problem, "unknown key 'bad'");
            assert_eq!(markers[0].line, Some(2));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    match client.put_style("ws1", "roads", "boom", None).await {
        Err(StyleSaveError::Failed(err)) => {
            assert_eq!(err.status, Some(500));
            assert_eq!(err.message, "Style write failed");
            assert_eq!(err.trace.as_deref(), Some("IOException at line 1"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}
