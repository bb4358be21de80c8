//! API Response Handler
//!
//! Routes responses from the background API worker into the compose view.
//! Responses are tagged with the workspace and map they were issued for;
//! anything addressed to a different map is skipped.

use tracing::debug;

use crate::app::ComposeApp;
use crate::services::api::ApiResponse;

fn is_for_this_map(app: &ComposeApp, workspace: &str, map: &str) -> bool {
    let relevant = app.model.compose.workspace == workspace && app.model.compose.map_name == map;
    if !relevant {
        debug!(workspace, map, "skipping response for another map");
    }
    relevant
}

/// Handle an API response from the background service
pub fn handle_api_response(app: &mut ComposeApp, response: ApiResponse) {
    match response {
        ApiResponse::MapLoaded {
            workspace,
            name,
            map,
        } => {
            if is_for_this_map(app, &workspace, &name) {
                app.on_map_loaded(map);
            }
        }

        ApiResponse::MapLayersLoaded {
            workspace,
            map,
            layers,
        } => {
            if is_for_this_map(app, &workspace, &map) {
                app.on_map_layers_loaded(layers);
            }
        }

        ApiResponse::LayerOrderSaved {
            workspace,
            map,
            result,
        } => {
            if is_for_this_map(app, &workspace, &map) {
                app.on_layer_order_saved(result);
            }
        }

        ApiResponse::MapLayerAdded {
            workspace,
            map,
            layer,
            result,
        } => {
            if is_for_this_map(app, &workspace, &map) {
                app.on_map_layer_added(layer, result);
            }
        }

        ApiResponse::MapLayerRemoved {
            workspace,
            map,
            layer,
            index,
            result,
        } => {
            if is_for_this_map(app, &workspace, &map) {
                app.on_map_layer_removed(layer, index, result);
            }
        }

        ApiResponse::WorkspaceLayersListed { workspace, layers } => {
            if app.model.compose.workspace == workspace {
                app.on_workspace_layers_listed(layers);
            }
        }

        ApiResponse::StyleLoaded { layer, style } => app.on_style_loaded(layer, style),

        // Saves land even if the user has moved to another layer since
        ApiResponse::StyleSaved { layer, result } => app.on_style_saved(layer, result),
    }
}
