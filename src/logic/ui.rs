//! UI state transition logic
//!
//! Pure functions for focus cycling, list selection and alert expiry.

use crate::model::Focus;

/// Whether a fading alert has been on screen long enough to drop
pub fn should_fade_alert(elapsed_ms: u128, fade_ms: u64) -> bool {
    elapsed_ms >= fade_ms as u128
}

/// Cycle focus between the layer list and the style editor.
/// With the layer panel hidden, focus stays on the editor.
pub fn cycle_focus(current: Focus, layers_visible: bool) -> Focus {
    match (current, layers_visible) {
        (_, false) => Focus::Editor,
        (Focus::Layers, true) => Focus::Editor,
        (Focus::Editor, true) => Focus::Layers,
    }
}

/// First row or column to draw so that `cursor` stays inside a view
/// `view` cells long
///
/// # Examples
/// ```
/// use mapcompose::logic::ui::scroll_offset;
///
/// assert_eq!(scroll_offset(5, 10), 0);
/// assert_eq!(scroll_offset(10, 10), 1);
/// assert_eq!(scroll_offset(3, 0), 3);
/// ```
pub fn scroll_offset(cursor: usize, view: usize) -> usize {
    cursor.saturating_sub(view.saturating_sub(1))
}

/// Next index in a list, wrapping to the start
///
/// # Examples
/// ```
/// use mapcompose::logic::ui::next_selection;
///
/// assert_eq!(next_selection(None, 0), None);
/// assert_eq!(next_selection(None, 3), Some(0));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i >= list_len - 1 => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

/// Previous index in a list, wrapping to the end
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1,
        Some(i) => (i - 1).min(list_len - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_fade_alert() {
        assert!(!should_fade_alert(2999, 3000));
        assert!(should_fade_alert(3000, 3000));
        assert!(should_fade_alert(10_000, 3000));
    }

    #[test]
    fn test_cycle_focus() {
        assert_eq!(cycle_focus(Focus::Layers, true), Focus::Editor);
        assert_eq!(cycle_focus(Focus::Editor, true), Focus::Layers);
        assert_eq!(cycle_focus(Focus::Editor, false), Focus::Editor);
    }

    #[test]
    fn test_prev_selection_wraps() {
        assert_eq!(prev_selection(Some(0), 3), Some(2));
        assert_eq!(prev_selection(None, 3), Some(2));
        assert_eq!(prev_selection(Some(2), 3), Some(1));
        assert_eq!(prev_selection(None, 0), None);
    }

    #[test]
    fn test_prev_selection_clamps_stale_index() {
        assert_eq!(prev_selection(Some(9), 3), Some(2));
    }

    #[test]
    fn test_scroll_offset_keeps_cursor_on_last_cell() {
        assert_eq!(scroll_offset(0, 20), 0);
        assert_eq!(scroll_offset(19, 20), 0);
        assert_eq!(scroll_offset(20, 20), 1);
        assert_eq!(scroll_offset(300, 20), 281);
    }
}
