use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, Layer, LayerRef, Map, MapApi, StyleSaveError};

/// API request types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// Fetch the map record
    LoadMap { workspace: String, name: String },

    /// Fetch the detailed, ordered layer list of a map
    LoadMapLayers { workspace: String, map: String },

    /// Persist a new layer order
    SaveLayerOrder {
        workspace: String,
        map: String,
        layers: Vec<Layer>,
    },

    /// Append a workspace layer to the map
    AddMapLayer {
        workspace: String,
        map: String,
        layer: LayerRef,
    },

    /// Delete a layer from the map; `index` is where it sat when confirmed
    RemoveMapLayer {
        workspace: String,
        map: String,
        layer: LayerRef,
        index: usize,
    },

    /// List layers available in a workspace
    ListWorkspaceLayers { workspace: String },

    /// Fetch a layer's style document
    LoadStyle { layer: LayerRef },

    /// Save a layer's style document in the context of a map
    SaveStyle {
        layer: LayerRef,
        style: String,
        map: Option<String>,
    },
}

/// API response types, tagged with what they were for
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    MapLoaded {
        workspace: String,
        name: String,
        map: Result<Map, ApiError>,
    },

    MapLayersLoaded {
        workspace: String,
        map: String,
        layers: Result<Vec<Layer>, ApiError>,
    },

    LayerOrderSaved {
        workspace: String,
        map: String,
        result: Result<Vec<Layer>, ApiError>,
    },

    MapLayerAdded {
        workspace: String,
        map: String,
        layer: LayerRef,
        result: Result<Vec<Layer>, ApiError>,
    },

    MapLayerRemoved {
        workspace: String,
        map: String,
        layer: LayerRef,
        index: usize,
        result: Result<(), ApiError>,
    },

    WorkspaceLayersListed {
        workspace: String,
        layers: Result<Vec<Layer>, ApiError>,
    },

    StyleLoaded {
        layer: LayerRef,
        style: Result<String, ApiError>,
    },

    StyleSaved {
        layer: LayerRef,
        result: Result<(), StyleSaveError>,
    },
}

/// Execute an API request and return the response
pub async fn execute_request(client: &dyn MapApi, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::LoadMap { workspace, name } => {
            let map = client.get_map(&workspace, &name).await;
            ApiResponse::MapLoaded {
                workspace,
                name,
                map,
            }
        }

        ApiRequest::LoadMapLayers { workspace, map } => {
            let layers = client.get_map_layers(&workspace, &map).await;
            ApiResponse::MapLayersLoaded {
                workspace,
                map,
                layers,
            }
        }

        ApiRequest::SaveLayerOrder {
            workspace,
            map,
            layers,
        } => {
            let result = client.put_map_layers(&workspace, &map, &layers).await;
            ApiResponse::LayerOrderSaved {
                workspace,
                map,
                result,
            }
        }

        ApiRequest::AddMapLayer {
            workspace,
            map,
            layer,
        } => {
            let result = client
                .add_map_layers(&workspace, &map, std::slice::from_ref(&layer))
                .await;
            ApiResponse::MapLayerAdded {
                workspace,
                map,
                layer,
                result,
            }
        }

        ApiRequest::RemoveMapLayer {
            workspace,
            map,
            layer,
            index,
        } => {
            let result = client.delete_map_layer(&workspace, &map, &layer.name).await;
            ApiResponse::MapLayerRemoved {
                workspace,
                map,
                layer,
                index,
                result,
            }
        }

        ApiRequest::ListWorkspaceLayers { workspace } => {
            let layers = client.list_layers(&workspace).await;
            ApiResponse::WorkspaceLayersListed { workspace, layers }
        }

        ApiRequest::LoadStyle { layer } => {
            let style = client.get_style(&layer.workspace, &layer.name).await;
            ApiResponse::StyleLoaded { layer, style }
        }

        ApiRequest::SaveStyle { layer, style, map } => {
            let result = client
                .put_style(&layer.workspace, &layer.name, &style, map.as_deref())
                .await;
            ApiResponse::StyleSaved { layer, result }
        }
    }
}

/// Spawn the API service worker
///
/// Every request runs on its own task and its response is delivered in
/// completion order. Nothing is cancelled or serialised: a slow response
/// can arrive after a newer one for the same resource, so handlers check
/// the tags before applying a result.
pub fn spawn_api_service(
    client: Arc<dyn MapApi>,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            debug!(?request, "dispatching api request");
            let client = Arc::clone(&client);
            let response_tx = response_tx.clone();

            tokio::spawn(async move {
                let response = execute_request(client.as_ref(), request).await;
                let _ = response_tx.send(response);
            });
        }
        debug!("api request channel closed, worker exiting");
    });

    (request_tx, response_rx)
}
