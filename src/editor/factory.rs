//! Component factory: default data, default footprints, cloning, and ids.

use chrono::Utc;
use serde_json::Map;

use crate::models::{
    ButtonData, ComponentData, ComponentItem, ComponentKind, ContainerData, FontSize, GoogleFont,
    GridPosition, HeaderData, ImageData, NavbarData, NavbarLink, TextAlign, TextStyle,
    VerticalAlign,
};

/// Default footprint (w, h) of a freshly placed component, in grid units.
#[must_use]
pub const fn default_footprint(kind: ComponentKind) -> (u32, u32) {
    match kind {
        ComponentKind::Header => (42, 4),
        ComponentKind::Navbar => (42, 4),
        ComponentKind::Container => (20, 12),
        ComponentKind::Heading => (18, 4),
        ComponentKind::Text => (10, 4),
        ComponentKind::Image => (9, 6),
        ComponentKind::Button => (5, 2),
    }
}

fn text_style(
    text: &str,
    font_size: FontSize,
    color: &str,
    font: GoogleFont,
    text_align: TextAlign,
    vertical_align: VerticalAlign,
) -> TextStyle {
    TextStyle {
        text: Some(text.to_string()),
        font_size: Some(font_size),
        color: Some(color.to_string()),
        font_family: Some(font),
        custom_font_set: None,
        text_align: Some(text_align),
        vertical_align: Some(vertical_align),
        extra: Map::new(),
    }
}

/// Default data for a kind, following `page_font` for font-bearing kinds.
#[must_use]
pub fn default_data(kind: ComponentKind, page_font: GoogleFont) -> ComponentData {
    match kind {
        ComponentKind::Heading => ComponentData::Heading(text_style(
            "Click to edit...",
            FontSize::Xl,
            "#000000",
            page_font,
            TextAlign::Left,
            VerticalAlign::Top,
        )),
        ComponentKind::Text => ComponentData::Text(text_style(
            "Click to edit...",
            FontSize::Base,
            "#000000",
            page_font,
            TextAlign::Center,
            VerticalAlign::Middle,
        )),
        ComponentKind::Image => ComponentData::Image(ImageData {
            src: Some(String::new()),
            alt: Some("Image".to_string()),
            ..ImageData::default()
        }),
        ComponentKind::Button => ComponentData::Button(ButtonData {
            style: text_style(
                "Button",
                FontSize::Base,
                "#ffffff",
                page_font,
                TextAlign::Center,
                VerticalAlign::Middle,
            ),
            bg_color: Some("#2563eb".to_string()),
            href: None,
        }),
        ComponentKind::Container => ComponentData::Container(ContainerData {
            bg_color: Some("#f9fafb".to_string()),
            ..ContainerData::default()
        }),
        ComponentKind::Navbar => ComponentData::Navbar(NavbarData {
            style: TextStyle {
                font_family: Some(page_font),
                ..TextStyle::default()
            },
            bg_color: Some("#1f2937".to_string()),
            logo: Some(String::new()),
            links: Some(vec![NavbarLink {
                text: "Home".to_string(),
                href: "#home".to_string(),
            }]),
        }),
        ComponentKind::Header => ComponentData::Header(HeaderData {
            style: text_style(
                "Your Website",
                FontSize::Xl,
                "#ffffff",
                page_font,
                TextAlign::Center,
                VerticalAlign::Middle,
            ),
            bg_color: Some("#21345e".to_string()),
            title: None,
            subtitle: None,
        }),
    }
}

/// Creates a new component of `kind` at `position` with default data.
///
/// The default footprint is clamped into the item's width constraints, so wide
/// kinds (header, navbar, container) start at the maximum width.
#[must_use]
pub fn create_component(
    kind: ComponentKind,
    id: impl Into<String>,
    position: GridPosition,
    page_font: GoogleFont,
) -> ComponentItem {
    let (w, h) = default_footprint(kind);
    let mut item = ComponentItem {
        id: id.into(),
        data: default_data(kind, page_font),
        x: position.x,
        y: position.y,
        w,
        h,
        min_w: Some(kind.default_min_w()),
        min_h: Some(1),
        max_w: Some(ComponentItem::DEFAULT_MAX_W),
    };
    (item.w, item.h) = item.clamp_size(w, h);
    item
}

/// Copies `item` under `new_id`, shifted by `offset` grid units.
///
/// Everything else, including font inheritance state, is preserved. The shift
/// saturates at `u32::MAX`.
#[must_use]
pub fn clone_component(
    item: &ComponentItem,
    new_id: impl Into<String>,
    offset: (u32, u32),
) -> ComponentItem {
    ComponentItem {
        id: new_id.into(),
        x: item.x.saturating_add(offset.0),
        y: item.y.saturating_add(offset.1),
        ..item.clone()
    }
}

/// Offset applied by paste.
pub const DEFAULT_CLONE_OFFSET: (u32, u32) = (1, 1);

/// Returns true if the item may be imported.
///
/// Only the id is checked here: the kind is guaranteed by the type, and data
/// shape problems degrade to rendering defaults instead of rejecting the item.
#[must_use]
pub fn validate_component(item: &ComponentItem) -> bool {
    if item.id.trim().is_empty() {
        tracing::warn!(kind = %item.kind(), "Invalid component: missing id");
        return false;
    }
    true
}

/// Mints an id from a prefix, a caller-advanced counter, and the current time.
///
/// The caller must advance `counter` after each call.
#[must_use]
pub fn generate_id(prefix: &str, counter: u64) -> String {
    format!("{}-{}-{}", prefix, counter, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_heading_defaults() {
        let item = create_component(
            ComponentKind::Heading,
            "item-1",
            GridPosition::new(0, 0),
            GoogleFont::Inter,
        );

        assert_eq!(item.id, "item-1");
        assert_eq!(item.kind(), ComponentKind::Heading);
        assert_eq!((item.x, item.y), (0, 0));
        assert_eq!((item.w, item.h), (12, 4));

        let style = item.data.text_style().unwrap();
        assert_eq!(style.text.as_deref(), Some("Click to edit..."));
        assert_eq!(style.font_size, Some(FontSize::Xl));
        assert_eq!(style.color.as_deref(), Some("#000000"));
        assert_eq!(style.font_family, Some(GoogleFont::Inter));
        assert_eq!(style.custom_font_set, None);
    }

    #[test]
    fn test_create_button_constraints() {
        let item = create_component(
            ComponentKind::Button,
            "b",
            GridPosition::new(3, 7),
            GoogleFont::Lora,
        );

        assert_eq!((item.w, item.h), (5, 2));
        assert_eq!(item.min_w, Some(2));
        assert_eq!(item.min_h, Some(1));
        assert_eq!(item.max_w, Some(12));
        assert_eq!(item.data.text_style().unwrap().font_family, Some(GoogleFont::Lora));
    }

    #[test]
    fn test_every_kind_satisfies_constraints() {
        for kind in ComponentKind::ALL {
            let item = create_component(kind, "x", GridPosition::default(), GoogleFont::Inter);
            assert!(item.satisfies_constraints(), "{kind} violates constraints");
            assert_eq!(item.kind(), kind);
        }
    }

    #[test]
    fn test_image_and_container_start_without_font() {
        let image = create_component(
            ComponentKind::Image,
            "i",
            GridPosition::default(),
            GoogleFont::Roboto,
        );
        let container = create_component(
            ComponentKind::Container,
            "c",
            GridPosition::default(),
            GoogleFont::Roboto,
        );

        assert!(image.data.text_style().is_none());
        assert_eq!(image.data.font_family(), None);
        assert_eq!(container.data.font_family(), None);
        match container.data {
            ComponentData::Container(data) => assert!(data.children.is_empty()),
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_clone_shifts_and_keeps_fields() {
        let mut original = create_component(
            ComponentKind::Text,
            "item-1",
            GridPosition::new(2, 3),
            GoogleFont::Inter,
        );
        original.data.set_font_family(GoogleFont::Inter, true);

        let copy = clone_component(&original, "item-2", DEFAULT_CLONE_OFFSET);

        assert_eq!(copy.id, "item-2");
        assert_eq!((copy.x, copy.y), (3, 4));
        assert_eq!((copy.w, copy.h), (original.w, original.h));
        assert_eq!(copy.data, original.data);
        assert_eq!(copy.min_w, original.min_w);
    }

    #[test]
    fn test_clone_at_grid_limit_saturates() {
        let original = create_component(
            ComponentKind::Button,
            "item-1",
            GridPosition::new(u32::MAX, u32::MAX - 1),
            GoogleFont::Inter,
        );

        let copy = clone_component(&original, "item-2", DEFAULT_CLONE_OFFSET);
        assert_eq!((copy.x, copy.y), (u32::MAX, u32::MAX));
    }

    #[test]
    fn test_validate_component_requires_id() {
        let mut item = create_component(
            ComponentKind::Image,
            "ok",
            GridPosition::default(),
            GoogleFont::Inter,
        );
        assert!(validate_component(&item));

        item.id = String::new();
        assert!(!validate_component(&item));
    }

    #[test]
    fn test_generate_id_format() {
        let id = generate_id("item", 7);
        let parts: Vec<&str> = id.splitn(3, '-').collect();

        assert_eq!(parts[0], "item");
        assert_eq!(parts[1], "7");
        assert!(parts[2].parse::<i64>().is_ok());
        assert_ne!(generate_id("item", 8), id);
    }
}
