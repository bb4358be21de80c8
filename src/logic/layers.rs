//! Layer list logic
//!
//! Pure functions over the ordered layer sequence of a map: hidden-layer
//! round-tripping, visibility, reordering and removal. Order in the slice
//! is render order.

use crate::api::{Layer, LayerRef};

/// Split a comma-separated hidden-layer list into names
///
/// # Examples
/// ```
/// use mapcompose::logic::layers::parse_hidden_layers;
///
/// assert_eq!(parse_hidden_layers(Some("a, b,,c")), vec!["a", "b", "c"]);
/// assert!(parse_hidden_layers(None).is_empty());
/// ```
pub fn parse_hidden_layers(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Mark every layer visible unless its name is in `hidden`
pub fn apply_visibility(layers: &mut [Layer], hidden: &[String]) {
    for layer in layers.iter_mut() {
        layer.visible = !hidden.iter().any(|h| h == &layer.name);
    }
}

/// Carry visibility flags over from a previous listing of the same map.
/// Layers not seen before come in visible.
pub fn merge_visibility(previous: &[Layer], incoming: &mut [Layer]) {
    for layer in incoming.iter_mut() {
        layer.visible = previous
            .iter()
            .find(|p| p.name == layer.name && p.workspace == layer.workspace)
            .map(|p| p.visible)
            .unwrap_or(true);
    }
}

/// Comma-joined names of the invisible layers, in order. Leaves the slice untouched.
pub fn hidden_layer_names(layers: &[Layer]) -> String {
    layers
        .iter()
        .filter(|l| !l.visible)
        .map(|l| l.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Move the layer at `from` so it ends up at `to`. Returns false when
/// nothing moved (same index or out of range).
pub fn move_layer(layers: &mut Vec<Layer>, from: usize, to: usize) -> bool {
    if from == to || from >= layers.len() || to >= layers.len() {
        return false;
    }
    let layer = layers.remove(from);
    layers.insert(to, layer);
    true
}

/// Remove the layer the server just deleted.
///
/// Removes at `index` when that layer is still `target`; if the list was
/// reordered in the meantime, falls back to the first layer with the same
/// workspace and name.
pub fn remove_layer_at(layers: &mut Vec<Layer>, index: usize, target: &LayerRef) -> Option<Layer> {
    let is_target = |l: &Layer| l.workspace == target.workspace && l.name == target.name;
    if layers.get(index).is_some_and(is_target) {
        return Some(layers.remove(index));
    }
    let pos = layers.iter().position(is_target)?;
    Some(layers.remove(pos))
}

#[cfg(test)]
pub(crate) fn test_layer(name: &str) -> Layer {
    Layer {
        name: name.to_string(),
        workspace: "ws1".to_string(),
        title: None,
        description: None,
        layer_type: None,
        geometry: None,
        proj: None,
        bbox: None,
        visible: true,
        extra: Default::default(),
    }
}

#[cfg(test)]
fn test_ref(name: &str) -> LayerRef {
    LayerRef {
        workspace: "ws1".to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(layers: &[Layer]) -> Vec<&str> {
        layers.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_parse_hidden_layers() {
        assert_eq!(parse_hidden_layers(Some("layerX,layerY")), vec!["layerX", "layerY"]);
        assert!(parse_hidden_layers(Some("")).is_empty());
        assert!(parse_hidden_layers(Some(" , ")).is_empty());
    }

    #[test]
    fn test_apply_visibility_in_order() {
        let mut layers = vec![test_layer("A"), test_layer("B"), test_layer("C")];
        apply_visibility(&mut layers, &parse_hidden_layers(Some("B")));
        let flags: Vec<bool> = layers.iter().map(|l| l.visible).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_apply_visibility_resets_previous_flags() {
        let mut layers = vec![test_layer("A")];
        layers[0].visible = false;
        apply_visibility(&mut layers, &[]);
        assert!(layers[0].visible);
    }

    #[test]
    fn test_merge_visibility_keeps_known_flags() {
        let mut previous = vec![test_layer("A"), test_layer("B")];
        previous[1].visible = false;
        let mut incoming = vec![test_layer("B"), test_layer("A"), test_layer("New")];
        incoming.iter_mut().for_each(|l| l.visible = false);

        merge_visibility(&previous, &mut incoming);
        let flags: Vec<bool> = incoming.iter().map(|l| l.visible).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_hidden_layer_names_does_not_mutate() {
        let mut layers = vec![test_layer("A"), test_layer("B"), test_layer("C")];
        layers[0].visible = false;
        layers[2].visible = false;
        assert_eq!(hidden_layer_names(&layers), "A,C");
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_hidden_layer_names_empty() {
        let layers = vec![test_layer("A")];
        assert_eq!(hidden_layer_names(&layers), "");
    }

    #[test]
    fn test_move_layer_to_front() {
        let mut layers = vec![test_layer("A"), test_layer("B"), test_layer("C")];
        assert!(move_layer(&mut layers, 2, 0));
        assert_eq!(names(&layers), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_move_layer_out_of_range() {
        let mut layers = vec![test_layer("A"), test_layer("B")];
        assert!(!move_layer(&mut layers, 0, 2));
        assert!(!move_layer(&mut layers, 1, 1));
        assert_eq!(names(&layers), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_layer_at_index() {
        let mut layers = vec![test_layer("A"), test_layer("B"), test_layer("C")];
        let removed = remove_layer_at(&mut layers, 1, &test_ref("B")).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(names(&layers), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_layer_after_reorder() {
        let mut layers = vec![test_layer("C"), test_layer("A"), test_layer("B")];
        remove_layer_at(&mut layers, 1, &test_ref("B")).unwrap();
        assert_eq!(names(&layers), vec!["C", "A"]);
    }

    #[test]
    fn test_remove_missing_layer() {
        let mut layers = vec![test_layer("A")];
        assert!(remove_layer_at(&mut layers, 0, &test_ref("Z")).is_none());
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_remove_matches_workspace_as_well_as_name() {
        let mut other = test_layer("B");
        other.workspace = "ws2".to_string();
        let mut layers = vec![other, test_layer("A"), test_layer("B")];

        // Index 0 now holds ws2:B after a reorder; ws1:B is the one deleted
        let removed = remove_layer_at(&mut layers, 0, &test_ref("B")).unwrap();
        assert_eq!(removed.workspace, "ws1");
        assert_eq!(layers[0].workspace, "ws2");
        assert_eq!(names(&layers), vec!["B", "A"]);
    }
}
