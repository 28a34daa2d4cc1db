//! Page editor state and edit operations.
//!
//! `EditorState` owns everything an editing session mutates: the component
//! collection, selection, clipboard, page settings, and the grid engine.
//! All mutations happen synchronously through its methods or through
//! [`EditorAction`] dispatch.

pub mod clipboard;
pub mod factory;
pub mod fonts;
pub mod grid;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::constants::ITEM_ID_PREFIX;
use crate::models::{
    ComponentData, ComponentItem, ComponentKind, GoogleFont, GridPosition, Page, PageSettings,
};

pub use clipboard::ComponentClipboard;
pub use factory::{clone_component, create_component, generate_id, validate_component};
pub use grid::{GestureKind, GridConfig, GridEngine, LayoutCommit, LayoutEntry};

/// Open context menu anchored at a pointer position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenu {
    /// Pointer x in pixels
    pub x: i32,
    /// Pointer y in pixels
    pub y: i32,
    /// Item the menu was opened on
    pub id: String,
}

/// User intents the editor reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Palette click (no position) or explicit placement
    AddComponent {
        /// Kind to create
        kind: ComponentKind,
        /// Target cell; `None` uses the spawn policy
        position: Option<GridPosition>,
    },
    /// Palette item dropped on a grid cell
    DropComponent {
        /// Kind to create
        kind: ComponentKind,
        /// Cell resolved by the grid widget
        cell: GridPosition,
    },
    /// Property editor replaced an item's data
    UpdateComponent {
        /// Item id
        id: String,
        /// New data
        data: ComponentData,
    },
    /// Font picked in an item's property editor
    SetItemFont {
        /// Item id
        id: String,
        /// Chosen font
        font: GoogleFont,
    },
    /// Page settings dialog changed
    SetPageSettings(PageSettings),
    /// Pointer grabbed an item
    BeginGesture(GestureKind),
    /// Pointer released
    EndGesture,
    /// Grid widget reported geometry
    LayoutChanged(Vec<LayoutEntry>),
    /// Item clicked
    Select(String),
    /// Empty canvas clicked
    ClearSelection,
    /// Right-click on an item
    OpenContextMenu {
        /// Pointer x
        x: i32,
        /// Pointer y
        y: i32,
        /// Item id
        id: String,
    },
    /// Menu dismissed
    CloseContextMenu,
    /// Copy item to clipboard
    Copy(String),
    /// Copy then delete item
    Cut(String),
    /// Paste clipboard content
    Paste,
    /// Delete item
    Delete(String),
}

/// In-memory state of one editing session.
#[derive(Debug, Clone)]
pub struct EditorState {
    items: Vec<ComponentItem>,
    settings: PageSettings,
    next_id: u64,
    selected_id: Option<String>,
    clipboard: ComponentClipboard,
    context_menu: Option<ContextMenu>,
    grid: GridEngine,
    auto_place: bool,
    status: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(PageSettings::default())
    }
}

impl EditorState {
    /// Creates an empty editor with the given page settings.
    #[must_use]
    pub fn new(settings: PageSettings) -> Self {
        Self {
            items: Vec::new(),
            settings,
            next_id: 1,
            selected_id: None,
            clipboard: ComponentClipboard::new(),
            context_menu: None,
            grid: GridEngine::default(),
            auto_place: false,
            status: None,
        }
    }

    /// Creates an editor over a loaded page.
    #[must_use]
    pub fn from_page(page: Page) -> Self {
        let grid = GridEngine::new(GridConfig::default(), page.items.len());
        Self {
            items: page.items,
            settings: page.settings,
            next_id: page.next_id,
            grid,
            ..Self::default()
        }
    }

    /// Creates an empty editor with the grid and placement from `config`.
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::default()
            .with_grid(config.grid)
            .with_auto_place(config.auto_place)
    }

    /// Uses a specific grid configuration.
    #[must_use]
    pub fn with_grid(mut self, config: GridConfig) -> Self {
        self.grid = GridEngine::new(config, self.items.len());
        self
    }

    /// Spawn palette clicks below existing content instead of at the origin.
    #[must_use]
    pub fn with_auto_place(mut self, enabled: bool) -> Self {
        self.auto_place = enabled;
        self
    }

    /// Snapshot of the document under `title`.
    #[must_use]
    pub fn to_page(&self, title: &str) -> Page {
        Page {
            title: title.to_string(),
            items: self.items.clone(),
            settings: self.settings.clone(),
            next_id: self.next_id,
        }
    }

    /// Swaps in a loaded page, keeping grid config, auto placement and clipboard.
    pub fn replace_page(&mut self, page: Page) {
        self.grid = GridEngine::new(*self.grid.config(), page.items.len());
        self.items = page.items;
        self.settings = page.settings;
        self.next_id = page.next_id;
        self.selected_id = None;
        self.context_menu = None;
    }

    /// Placed components.
    #[must_use]
    pub fn items(&self) -> &[ComponentItem] {
        &self.items
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ComponentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Page settings.
    #[must_use]
    pub const fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// Counter used to mint default ids.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Selected item id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Selected item.
    #[must_use]
    pub fn selected_item(&self) -> Option<&ComponentItem> {
        self.selected_id.as_deref().and_then(|id| self.item(id))
    }

    /// Clipboard.
    #[must_use]
    pub const fn clipboard(&self) -> &ComponentClipboard {
        &self.clipboard
    }

    /// Open context menu.
    #[must_use]
    pub const fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Grid engine.
    #[must_use]
    pub const fn grid(&self) -> &GridEngine {
        &self.grid
    }

    /// Last status message.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(status = %message);
        self.status = Some(message);
    }

    /// Adds a component and selects it. Returns the new id.
    ///
    /// Without `custom_id` the id is `item-{next_id}` and the counter advances
    /// by one; with `custom_id` the counter is untouched. Without `position`
    /// the item spawns at the origin, or below existing content when auto
    /// placement is enabled.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        position: Option<GridPosition>,
        custom_id: Option<String>,
    ) -> String {
        let position = position.unwrap_or_else(|| {
            if self.auto_place {
                grid::calculate_optimal_position(&self.items, factory::default_footprint(kind))
            } else {
                GridPosition::default()
            }
        });

        let id = match custom_id {
            Some(id) => id,
            None => {
                let id = format!("{}-{}", ITEM_ID_PREFIX, self.next_id);
                self.next_id += 1;
                id
            }
        };

        let item = create_component(kind, id.clone(), position, self.settings.font_family);
        self.items.push(item);
        self.selected_id = Some(id.clone());
        self.set_status(format!("Added {}", kind.display_name()));
        id
    }

    /// Adds a component dropped from the palette onto `cell`.
    ///
    /// The id comes from the grid's drop counter, so the page counter is untouched.
    pub fn drop_component(&mut self, kind: ComponentKind, cell: GridPosition) -> String {
        let id = self.grid.next_drop_id();
        self.add_component(kind, Some(cell), Some(id))
    }

    /// Replaces an item's data. The kind cannot change.
    ///
    /// Returns false if the item is missing or `data` belongs to another kind.
    pub fn update_component(&mut self, id: &str, data: ComponentData) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if item.kind() != data.kind() {
            tracing::warn!(
                id,
                expected = %item.kind(),
                got = %data.kind(),
                "Ignoring data of another kind"
            );
            return false;
        }
        item.data = data;
        true
    }

    /// Sets an item's font explicitly, detaching it from the page font.
    pub fn set_item_font(&mut self, id: &str, font: GoogleFont) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        self.items[index] = fonts::set_item_font(&self.items[index], font);
        true
    }

    /// Replaces page settings, cascading a font change to inheriting items.
    pub fn set_page_settings(&mut self, settings: PageSettings) {
        let font_changed = settings.font_family != self.settings.font_family;
        self.settings = settings;
        if font_changed {
            self.items = fonts::apply_page_font(&self.items, self.settings.font_family);
            self.set_status(format!("Page font: {}", self.settings.font_family));
        }
    }

    /// Starts a drag or resize gesture.
    pub fn begin_gesture(&mut self, kind: GestureKind) {
        self.grid.begin_gesture(kind);
    }

    /// Ends the current gesture.
    pub fn end_gesture(&mut self) {
        self.grid.end_gesture();
    }

    /// Forwards a widget layout report to the grid engine.
    pub fn layout_changed(&mut self, layout: &[LayoutEntry]) -> LayoutCommit {
        self.grid.layout_changed(&mut self.items, layout)
    }

    /// Selects an item.
    pub fn select(&mut self, id: &str) {
        if self.item(id).is_some() {
            self.selected_id = Some(id.to_string());
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Opens the context menu for an item.
    pub fn open_context_menu(&mut self, x: i32, y: i32, id: &str) {
        self.context_menu = Some(ContextMenu {
            x,
            y,
            id: id.to_string(),
        });
    }

    /// Dismisses the context menu.
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Copies an item into the clipboard. No-op if the id is unknown.
    pub fn copy(&mut self, id: &str) {
        if let Some(index) = self.items.iter().position(|item| item.id == id) {
            let message = self.clipboard.store(&self.items[index]);
            self.set_status(message);
        }
        self.close_context_menu();
    }

    /// Copies then deletes an item.
    pub fn cut(&mut self, id: &str) {
        self.copy(id);
        self.delete(id);
    }

    /// Pastes the clipboard as a new item offset by one cell and selects it.
    ///
    /// Returns the new id, or `None` if the clipboard is empty.
    pub fn paste(&mut self) -> Option<String> {
        let new_id = format!("{}-{}", ITEM_ID_PREFIX, self.next_id);
        let pasted = self.clipboard.paste_as(&new_id);
        self.close_context_menu();

        let item = pasted?;
        self.items.push(item);
        self.next_id += 1;
        self.selected_id = Some(new_id.clone());
        self.set_status(format!("Pasted {new_id}"));
        Some(new_id)
    }

    /// Removes an item, clearing the selection if it was selected.
    ///
    /// Returns true if an item was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        self.close_context_menu();
        self.items.len() != before
    }

    /// Applies one action.
    pub fn dispatch(&mut self, action: EditorAction) {
        match action {
            EditorAction::AddComponent { kind, position } => {
                self.add_component(kind, position, None);
            }
            EditorAction::DropComponent { kind, cell } => {
                self.drop_component(kind, cell);
            }
            EditorAction::UpdateComponent { id, data } => {
                self.update_component(&id, data);
            }
            EditorAction::SetItemFont { id, font } => {
                self.set_item_font(&id, font);
            }
            EditorAction::SetPageSettings(settings) => self.set_page_settings(settings),
            EditorAction::BeginGesture(kind) => self.begin_gesture(kind),
            EditorAction::EndGesture => self.end_gesture(),
            EditorAction::LayoutChanged(layout) => {
                self.layout_changed(&layout);
            }
            EditorAction::Select(id) => self.select(&id),
            EditorAction::ClearSelection => self.clear_selection(),
            EditorAction::OpenContextMenu { x, y, id } => self.open_context_menu(x, y, &id),
            EditorAction::CloseContextMenu => self.close_context_menu(),
            EditorAction::Copy(id) => self.copy(&id),
            EditorAction::Cut(id) => self.cut(&id),
            EditorAction::Paste => {
                self.paste();
            }
            EditorAction::Delete(id) => {
                self.delete(&id);
            }
        }
    }

    /// Returns the state after applying `action`.
    #[must_use]
    pub fn reduce(mut self, action: EditorAction) -> Self {
        self.dispatch(action);
        self
    }
}
