//! Classification of scrollable widgets.
//!
//! The plugin only knows how to find the vertical adjustment of a handful of
//! widget types. They are tried in a fixed priority order; the first match
//! wins. [`WidgetKind::Generic`] is the fallback for any other widget whose
//! class exposes a `vadjustment` property.

use serde::{Deserialize, Serialize};

/// The scrollable widget types the plugin recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// A text display (`GtkTextView`, including the conversation IM/HTML view).
    TextView,
    /// A generic scrollable container (`GtkScrolledWindow`).
    ScrolledWindow,
    /// A list or tree (`GtkTreeView`, e.g. the buddy list).
    TreeView,
    /// Any other object whose class has a `vadjustment` property.
    Generic,
}

impl WidgetKind {
    /// Classification order. Typed kinds first, property lookup last.
    pub const PRIORITY: [WidgetKind; 4] = [
        WidgetKind::TextView,
        WidgetKind::ScrolledWindow,
        WidgetKind::TreeView,
        WidgetKind::Generic,
    ];

    /// Returns `true` for every kind except [`WidgetKind::Generic`].
    pub fn is_typed(self) -> bool {
        !matches!(self, WidgetKind::Generic)
    }
}

/// Returns the first kind in [`WidgetKind::PRIORITY`] that is in `enabled`
/// and for which `probe` answers `true`.
///
/// `probe` is never called for kinds that are not enabled, and never called
/// again once a kind has matched.
pub fn classify<F>(enabled: &[WidgetKind], mut probe: F) -> Option<WidgetKind>
where
    F: FnMut(WidgetKind) -> bool,
{
    WidgetKind::PRIORITY
        .into_iter()
        .filter(|kind| enabled.contains(kind))
        .find(|kind| probe(*kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_view_wins_over_every_other_kind() {
        let kind = classify(&WidgetKind::PRIORITY, |_| true);
        assert_eq!(kind, Some(WidgetKind::TextView));
    }

    #[test]
    fn test_generic_only_after_typed_kinds_miss() {
        // Arrange
        let mut probed = Vec::new();

        // Act
        let kind = classify(&WidgetKind::PRIORITY, |k| {
            probed.push(k);
            k == WidgetKind::Generic
        });

        // Assert
        assert_eq!(kind, Some(WidgetKind::Generic));
        assert_eq!(probed, WidgetKind::PRIORITY.to_vec());
    }

    #[test]
    fn test_probing_stops_at_first_match() {
        let mut probed = Vec::new();
        let kind = classify(&WidgetKind::PRIORITY, |k| {
            probed.push(k);
            k == WidgetKind::ScrolledWindow
        });
        assert_eq!(kind, Some(WidgetKind::ScrolledWindow));
        assert_eq!(probed, vec![WidgetKind::TextView, WidgetKind::ScrolledWindow]);
    }

    #[test]
    fn test_disabled_kinds_are_never_probed() {
        let enabled = [WidgetKind::TreeView];
        let mut probed = Vec::new();
        let kind = classify(&enabled, |k| {
            probed.push(k);
            true
        });
        assert_eq!(kind, Some(WidgetKind::TreeView));
        assert_eq!(probed, vec![WidgetKind::TreeView]);
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(classify(&WidgetKind::PRIORITY, |_| false), None);
        assert_eq!(classify(&[], |_| true), None);
    }

    #[test]
    fn test_kind_serializes_as_snake_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            kinds: Vec<WidgetKind>,
        }
        let text = toml::to_string(&Wrapper {
            kinds: vec![WidgetKind::ScrolledWindow, WidgetKind::Generic],
        })
        .expect("serialize");
        assert!(text.contains("\"scrolled_window\""));
        assert!(text.contains("\"generic\""));

        let back: Wrapper = toml::from_str(&text).expect("deserialize");
        assert_eq!(back.kinds, vec![WidgetKind::ScrolledWindow, WidgetKind::Generic]);
    }
}
