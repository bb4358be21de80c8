use tracing::{debug, info, warn};

use crate::messages::{DialogRequest, Route};
use crate::services::handoff::{self, ImportHandoff};

use super::ComposeApp;

impl ComposeApp {
    /// Leave the compose view for `route`, unless there are unsaved edits.
    ///
    /// A dirty editor cancels the navigation and opens the save/discard
    /// dialog instead; the user has to navigate again afterwards.
    /// Returns true when the route was committed.
    pub fn request_navigation(&mut self, route: Route) -> bool {
        if !self.model.is_editor_clean() {
            info!(to = %route.describe(), "navigation blocked by unsaved style edits");
            self.open_dialog(DialogRequest::EditorSave);
            return false;
        }

        debug!(to = %route.describe(), "navigating away");
        self.route = Some(route);
        true
    }

    pub fn view_workspace(&mut self) -> bool {
        let workspace = self.model.compose.workspace.clone();
        self.request_navigation(Route::Workspace { workspace })
    }

    pub fn quit(&mut self) -> bool {
        self.request_navigation(Route::Exit)
    }

    /// Hand the map over to the data import view and go there.
    ///
    /// Hidden layer names are stashed on the handed-over map so the import
    /// view can bring them back when it returns here. The loaded map is
    /// only touched once the navigation is committed.
    pub fn import_data(&mut self) -> bool {
        let Some(loaded) = self.model.compose.map.as_ref() else {
            debug!("import requested before map loaded");
            return false;
        };
        let hidden = self.hidden_layer_names();
        let mut map = loaded.clone();
        map.hidden_layers = Some(hidden.clone());

        let workspace = self.model.compose.workspace.clone();
        let (tx, rx) = handoff::channel();
        let payload = ImportHandoff {
            map,
            workspace: workspace.clone(),
        };
        if tx.send(payload).is_err() {
            warn!("import handoff receiver dropped before send");
        }

        let committed = self.request_navigation(Route::DataImport {
            workspace,
            handoff: rx,
        });
        if committed {
            if let Some(map) = self.model.compose.map.as_mut() {
                map.hidden_layers = Some(hidden);
            }
        }
        committed
    }
}
