//! Grid layout engine.
//!
//! Converts drop and drag/resize gestures into committed grid geometry.
//!
//! # Gesture protocol
//!
//! 1. `begin_gesture` when the pointer grabs an item (drag or resize handle)
//! 2. any number of `layout_changed` events, which are provisional and ignored
//! 3. `end_gesture` when the pointer is released
//! 4. the next `layout_changed` commits the settled geometry
//!
//! Items never auto-compact. Overlap is prevented only while a gesture is in
//! progress; settled layouts may overlap and are not corrected afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::{DROPPING_ITEM_ID, ITEM_ID_PREFIX};
use crate::editor::factory::{default_footprint, generate_id};
use crate::models::{ComponentItem, ComponentKind, GridPosition, GridRect};

/// Responsive breakpoint of the grid widget.
///
/// Breakpoints only drive the widget's own responsive behavior; the editor
/// always works in the single logical column grid of [`GridConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    /// Breakpoint name
    pub name: &'static str,
    /// Minimum viewport width in pixels
    pub min_width: u32,
    /// Column count at this breakpoint
    pub cols: u32,
}

/// Breakpoints from widest to narrowest.
pub const BREAKPOINTS: [Breakpoint; 5] = [
    Breakpoint { name: "lg", min_width: 1200, cols: 12 },
    Breakpoint { name: "md", min_width: 996, cols: 10 },
    Breakpoint { name: "sm", min_width: 768, cols: 6 },
    Breakpoint { name: "xs", min_width: 480, cols: 4 },
    Breakpoint { name: "xxs", min_width: 0, cols: 2 },
];

/// Fixed grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Logical column count
    pub cols: u32,
    /// Row height in pixels
    pub row_height: u32,
    /// Gap between items [horizontal, vertical] in pixels
    pub margin: [u32; 2],
    /// Canvas padding [horizontal, vertical] in pixels
    pub container_padding: [u32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            row_height: 30,
            margin: [10, 10],
            container_padding: [10, 10],
        }
    }
}

impl GridConfig {
    /// Pulls a rectangle left so it ends inside the grid's columns.
    #[must_use]
    pub fn clamp_to_bounds(&self, rect: GridRect) -> GridRect {
        let w = rect.w.min(self.cols);
        let x = rect.x.min(self.cols - w);
        GridRect { x, w, ..rect }
    }
}

/// Geometry entry as reported by the grid widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    /// Item id (or the drop placeholder id)
    pub i: String,
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
    /// Minimum width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    /// Minimum height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    /// Maximum width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
}

impl LayoutEntry {
    /// Entry with geometry only.
    pub fn new(i: impl Into<String>, rect: GridRect) -> Self {
        Self {
            i: i.into(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            min_w: None,
            min_h: None,
            max_w: None,
        }
    }

    /// Returns true for the widget's drop placeholder.
    #[must_use]
    pub fn is_drop_placeholder(&self) -> bool {
        self.i == DROPPING_ITEM_ID
    }

    /// Geometry as a rectangle.
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }
}

impl From<&ComponentItem> for LayoutEntry {
    fn from(item: &ComponentItem) -> Self {
        Self {
            min_w: Some(item.min_w()),
            min_h: Some(item.min_h()),
            max_w: Some(item.max_w()),
            ..Self::new(item.id.clone(), item.rect())
        }
    }
}

/// Kind of pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Moving an item
    Drag,
    /// Resizing an item
    Resize,
}

/// Result of a layout change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCommit {
    /// Provisional event during a gesture; nothing changed
    Ignored,
    /// Settled geometry merged into the collection
    Committed {
        /// Number of items whose geometry changed
        updated: usize,
    },
}

/// Returns true if the two items' grid rectangles intersect.
#[must_use]
pub fn overlaps(a: &ComponentItem, b: &ComponentItem) -> bool {
    a.rect().intersects(&b.rect())
}

/// All pairs of distinct items that overlap, by id.
#[must_use]
pub fn overlapping_pairs(items: &[ComponentItem]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (index, a) in items.iter().enumerate() {
        for b in &items[index + 1..] {
            if overlaps(a, b) {
                pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    pairs
}

/// First free position below all existing content, in column 0.
///
/// Placement ignores the footprint; it only needs the bottom edge of the page.
#[must_use]
pub fn calculate_optimal_position(items: &[ComponentItem], _footprint: (u32, u32)) -> GridPosition {
    let max_y = items.iter().map(|item| item.rect().bottom()).max().unwrap_or(0);
    GridPosition::new(0, max_y)
}

/// Interactive grid state: gesture flag and drop id counter.
#[derive(Debug, Clone)]
pub struct GridEngine {
    config: GridConfig,
    gesture: Option<GestureKind>,
    drop_counter: u64,
}

impl GridEngine {
    /// Creates an engine for a canvas that already holds `existing_items` items.
    #[must_use]
    pub fn new(config: GridConfig, existing_items: usize) -> Self {
        Self {
            config,
            gesture: None,
            drop_counter: existing_items as u64 + 1,
        }
    }

    /// Grid configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// True strictly between gesture start and stop.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Gesture currently in progress, if any.
    #[must_use]
    pub const fn gesture(&self) -> Option<GestureKind> {
        self.gesture
    }

    /// Whether the widget must refuse overlapping positions right now.
    #[must_use]
    pub const fn prevent_collision(&self) -> bool {
        self.is_dragging()
    }

    /// Starts a drag or resize gesture.
    pub fn begin_gesture(&mut self, kind: GestureKind) {
        if let Some(current) = self.gesture {
            tracing::debug!(?current, ?kind, "Gesture started while another was active");
        }
        self.gesture = Some(kind);
    }

    /// Ends the current gesture; the next layout change commits.
    pub fn end_gesture(&mut self) {
        self.gesture = None;
    }

    /// Handles a layout change event from the widget.
    ///
    /// While a gesture is active the event is provisional and ignored.
    /// Otherwise geometry is merged into `items` by id, skipping the drop
    /// placeholder and unknown ids. Committed sizes are clamped into each
    /// item's constraints and the grid's columns.
    pub fn layout_changed(
        &self,
        items: &mut [ComponentItem],
        layout: &[LayoutEntry],
    ) -> LayoutCommit {
        if self.is_dragging() {
            return LayoutCommit::Ignored;
        }

        let mut updated = 0;
        for entry in layout.iter().filter(|entry| !entry.is_drop_placeholder()) {
            let Some(item) = items.iter_mut().find(|item| item.id == entry.i) else {
                continue;
            };

            let (w, h) = item.clamp_size(entry.w, entry.h);
            let rect = self.config.clamp_to_bounds(GridRect::new(entry.x, entry.y, w, h));
            if rect != item.rect() {
                item.x = rect.x;
                item.y = rect.y;
                item.w = rect.w;
                item.h = rect.h;
                updated += 1;
            }
        }

        tracing::debug!(updated, "Committed layout change");
        LayoutCommit::Committed { updated }
    }

    /// Ends the gesture and commits the settled layout in one step.
    pub fn settle(&mut self, items: &mut [ComponentItem], layout: &[LayoutEntry]) -> LayoutCommit {
        self.end_gesture();
        self.layout_changed(items, layout)
    }

    /// Checks a provisional rectangle for item `id` against the collision policy.
    ///
    /// The rectangle is clamped to the item's constraints and the grid bounds.
    /// During a gesture, a rectangle that overlaps any other item is refused
    /// (`None`); when idle, any rectangle is accepted.
    #[must_use]
    pub fn propose_move(
        &self,
        items: &[ComponentItem],
        id: &str,
        rect: GridRect,
    ) -> Option<GridRect> {
        let item = items.iter().find(|item| item.id == id)?;
        let (w, h) = item.clamp_size(rect.w, rect.h);
        let candidate = self.config.clamp_to_bounds(GridRect { w, h, ..rect });

        if self.prevent_collision()
            && items
                .iter()
                .any(|other| other.id != id && other.rect().intersects(&candidate))
        {
            return None;
        }

        Some(candidate)
    }

    /// Placeholder shown while a palette item hovers the canvas.
    #[must_use]
    pub fn drop_preview(&self, kind: ComponentKind, cell: GridPosition) -> LayoutEntry {
        let (w, h) = default_footprint(kind);
        let rect = self.config.clamp_to_bounds(GridRect::new(cell.x, cell.y, w, h));
        LayoutEntry::new(DROPPING_ITEM_ID, rect)
    }

    /// Mints the id for a dropped component and advances the drop counter.
    pub fn next_drop_id(&mut self) -> String {
        let id = generate_id(ITEM_ID_PREFIX, self.drop_counter);
        self.drop_counter += 1;
        id
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new(GridConfig::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::factory::create_component;
    use crate::models::GoogleFont;

    fn item_at(id: &str, rect: GridRect) -> ComponentItem {
        let position = GridPosition::new(rect.x, rect.y);
        let mut item = create_component(ComponentKind::Text, id, position, GoogleFont::Inter);
        item.w = rect.w;
        item.h = rect.h;
        item
    }

    #[test]
    fn test_overlap_is_symmetric_and_reflexive() {
        let rects = [
            GridRect::new(0, 0, 2, 2),
            GridRect::new(1, 1, 2, 2),
            GridRect::new(2, 0, 1, 1),
            GridRect::new(5, 5, 3, 1),
            GridRect::new(0, 2, 4, 4),
        ];
        let items: Vec<_> = rects
            .iter()
            .enumerate()
            .map(|(n, rect)| item_at(&format!("item-{n}"), *rect))
            .collect();

        for a in &items {
            assert!(overlaps(a, a));
            for b in &items {
                assert_eq!(overlaps(a, b), overlaps(b, a));
            }
        }
        assert!(overlaps(&items[0], &items[1]));
        assert!(!overlaps(&items[0], &items[2]));
    }

    #[test]
    fn test_overlapping_pairs() {
        let items = vec![
            item_at("a", GridRect::new(0, 0, 4, 2)),
            item_at("b", GridRect::new(2, 1, 4, 2)),
            item_at("c", GridRect::new(8, 8, 1, 1)),
        ];
        assert_eq!(overlapping_pairs(&items), vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_provisional_changes_are_ignored() {
        let mut engine = GridEngine::default();
        let mut items = vec![item_at("a", GridRect::new(0, 0, 2, 2))];

        engine.begin_gesture(GestureKind::Drag);
        assert!(engine.is_dragging());
        assert!(engine.prevent_collision());

        let moved = [LayoutEntry::new("a", GridRect::new(3, 3, 2, 2))];
        assert_eq!(engine.layout_changed(&mut items, &moved), LayoutCommit::Ignored);
        assert_eq!((items[0].x, items[0].y), (0, 0));

        engine.end_gesture();
        assert!(!engine.prevent_collision());
        assert_eq!(
            engine.layout_changed(&mut items, &moved),
            LayoutCommit::Committed { updated: 1 }
        );
        assert_eq!((items[0].x, items[0].y), (3, 3));
    }

    #[test]
    fn test_commit_skips_placeholder_and_unknown_ids() {
        let engine = GridEngine::default();
        let mut items = vec![item_at("a", GridRect::new(0, 0, 2, 2))];

        let layout = [
            LayoutEntry::new(DROPPING_ITEM_ID, GridRect::new(0, 0, 6, 4)),
            LayoutEntry::new("ghost", GridRect::new(1, 1, 1, 1)),
            LayoutEntry::new("a", GridRect::new(0, 0, 2, 2)),
        ];

        assert_eq!(
            engine.layout_changed(&mut items, &layout),
            LayoutCommit::Committed { updated: 0 }
        );
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_commit_clamps_size_and_bounds() {
        let engine = GridEngine::default();
        let mut items = vec![item_at("a", GridRect::new(0, 0, 2, 2))];

        let layout = [LayoutEntry::new("a", GridRect::new(10, 4, 30, 0))];
        engine.layout_changed(&mut items, &layout);

        assert_eq!(items[0].rect(), GridRect::new(0, 4, 12, 1));
    }

    #[test]
    fn test_settled_overlap_is_permitted() {
        let mut engine = GridEngine::default();
        let mut items = vec![
            item_at("a", GridRect::new(0, 0, 2, 2)),
            item_at("b", GridRect::new(4, 0, 2, 2)),
        ];

        engine.begin_gesture(GestureKind::Resize);
        let layout = [
            LayoutEntry::new("a", GridRect::new(0, 0, 2, 2)),
            LayoutEntry::new("b", GridRect::new(1, 1, 2, 2)),
        ];
        engine.settle(&mut items, &layout);

        assert!(!engine.is_dragging());
        assert!(overlaps(&items[0], &items[1]));
    }

    #[test]
    fn test_propose_move_blocks_collisions_only_while_dragging() {
        let mut engine = GridEngine::default();
        let items = vec![
            item_at("a", GridRect::new(0, 0, 2, 2)),
            item_at("b", GridRect::new(4, 0, 2, 2)),
        ];
        let onto_b = GridRect::new(3, 0, 2, 2);

        assert_eq!(engine.propose_move(&items, "a", onto_b), Some(onto_b));

        engine.begin_gesture(GestureKind::Drag);
        assert_eq!(engine.propose_move(&items, "a", onto_b), None);
        assert_eq!(
            engine.propose_move(&items, "a", GridRect::new(0, 3, 2, 2)),
            Some(GridRect::new(0, 3, 2, 2))
        );
        assert_eq!(engine.propose_move(&items, "missing", onto_b), None);
    }

    #[test]
    fn test_drop_preview_uses_kind_footprint() {
        let engine = GridEngine::default();
        let preview = engine.drop_preview(ComponentKind::Button, GridPosition::new(2, 5));

        assert!(preview.is_drop_placeholder());
        assert_eq!(preview.rect(), GridRect::new(2, 5, 5, 2));
    }

    #[test]
    fn test_drop_ids_advance() {
        let mut engine = GridEngine::new(GridConfig::default(), 2);
        let first = engine.next_drop_id();
        let second = engine.next_drop_id();

        assert!(first.starts_with("item-3-"));
        assert!(second.starts_with("item-4-"));
    }

    #[test]
    fn test_calculate_optimal_position() {
        assert_eq!(calculate_optimal_position(&[], (4, 4)), GridPosition::new(0, 0));

        let items = vec![
            item_at("a", GridRect::new(0, 0, 2, 2)),
            item_at("b", GridRect::new(3, 1, 2, 5)),
        ];
        assert_eq!(calculate_optimal_position(&items, (4, 4)), GridPosition::new(0, 6));
    }

    #[test]
    fn test_layout_entry_fills_constraint_defaults() {
        let entry = LayoutEntry::from(&item_at("a", GridRect::new(0, 0, 2, 2)));

        assert_eq!(entry.min_w, Some(1));
        assert_eq!(entry.max_w, Some(12));
    }

    #[test]
    fn test_geometry_at_grid_limit() {
        let far = item_at("far", GridRect::new(u32::MAX, u32::MAX, 1, 1));
        let origin = item_at("origin", GridRect::new(0, 0, 2, 2));

        assert!(!overlaps(&far, &origin));
        assert!(!overlaps(&origin, &far));
        assert!(overlaps(&far, &far));
        assert_eq!(
            calculate_optimal_position(&[far, origin], (4, 4)),
            GridPosition::new(0, u32::MAX)
        );
    }
}
