//! Component kinds, per-kind data records, and placed component items.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Closed set of component kinds offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Large title text
    Heading,
    /// Body text block
    Text,
    /// Image with alt text
    Image,
    /// Call-to-action button
    Button,
    /// Colored background block
    Container,
    /// Navigation bar with links
    Navbar,
    /// Page header banner
    Header,
}

impl ComponentKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 7] = [
        Self::Heading,
        Self::Text,
        Self::Image,
        Self::Button,
        Self::Container,
        Self::Navbar,
        Self::Header,
    ];

    /// Returns the wire name of this kind (e.g., "heading").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Container => "container",
            Self::Navbar => "navbar",
            Self::Header => "header",
        }
    }

    /// Parses a wire name back into a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Human-readable palette label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Button => "Button",
            Self::Container => "Container",
            Self::Navbar => "Navbar",
            Self::Header => "Header",
        }
    }

    /// Default minimum width in grid units.
    #[must_use]
    pub const fn default_min_w(self) -> u32 {
        match self {
            Self::Button => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font size scale shared by all text-bearing kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSize {
    /// Small
    #[serde(rename = "sm")]
    Sm,
    /// Medium
    #[serde(rename = "base")]
    Base,
    /// Large
    #[serde(rename = "lg")]
    Lg,
    /// Extra large
    #[serde(rename = "xl")]
    Xl,
    /// 2X large
    #[serde(rename = "2xl")]
    Xxl,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

/// Vertical alignment inside the grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Top of the cell
    Top,
    /// Vertically centered
    Middle,
    /// Bottom of the cell
    Bottom,
}

/// Fonts available from the page settings and property editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GoogleFont {
    /// Inter (page default)
    #[default]
    Inter,
    /// Roboto
    Roboto,
    /// Open Sans
    #[serde(rename = "Open Sans")]
    OpenSans,
    /// Montserrat
    Montserrat,
    /// Nunito
    Nunito,
    /// Playfair Display
    #[serde(rename = "Playfair Display")]
    PlayfairDisplay,
    /// Lora
    Lora,
}

impl GoogleFont {
    /// Font family name as used in CSS and on the wire.
    #[must_use]
    pub const fn family_name(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Roboto => "Roboto",
            Self::OpenSans => "Open Sans",
            Self::Montserrat => "Montserrat",
            Self::Nunito => "Nunito",
            Self::PlayfairDisplay => "Playfair Display",
            Self::Lora => "Lora",
        }
    }
}

impl std::fmt::Display for GoogleFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.family_name())
    }
}

/// Link entry in a navbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarLink {
    /// Link label
    pub text: String,
    /// Link target
    pub href: String,
}

/// Accepts any JSON value and keeps it only if it parses as `T`.
///
/// Unknown enumerated style values fall back to "unset" so a single bad field
/// never rejects the whole item.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Style cluster shared by heading, text, button, navbar, and header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Displayed text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    /// Text color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font family; follows the page font unless `custom_font_set` is true
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<GoogleFont>,
    /// Set once the user picked a font for this item explicitly
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub custom_font_set: Option<bool>,
    /// Horizontal alignment
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Vertical alignment
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    /// Keys this record does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Button data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonData {
    /// Label styling
    #[serde(flatten)]
    pub style: TextStyle,
    /// Background color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Image data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Font family written by the page font cascade
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<GoogleFont>,
    /// Set once the user picked a font for this item explicitly
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub custom_font_set: Option<bool>,
    /// Keys this record does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Container data.
///
/// `children` is reserved: nothing populates or renders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerData {
    /// Background color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Reserved nested items
    #[serde(default)]
    pub children: Vec<ComponentItem>,
    /// Font family written by the page font cascade
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<GoogleFont>,
    /// Set once the user picked a font for this item explicitly
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub custom_font_set: Option<bool>,
    /// Keys this record does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Navbar data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarData {
    /// Brand text styling
    #[serde(flatten)]
    pub style: TextStyle,
    /// Background color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Logo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Navigation links
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<NavbarLink>>,
}

/// Header banner data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderData {
    /// Banner text styling
    #[serde(flatten)]
    pub style: TextStyle,
    /// Background color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Optional title line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional subtitle line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Kind-specific data of a placed component.
///
/// The variant determines the item's kind, so the kind can never drift from
/// the data shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentData {
    /// Heading text
    Heading(TextStyle),
    /// Body text
    Text(TextStyle),
    /// Image
    Image(ImageData),
    /// Button
    Button(ButtonData),
    /// Container block
    Container(ContainerData),
    /// Navigation bar
    Navbar(NavbarData),
    /// Header banner
    Header(HeaderData),
}

impl ComponentData {
    /// Returns the kind this data belongs to.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Heading(_) => ComponentKind::Heading,
            Self::Text(_) => ComponentKind::Text,
            Self::Image(_) => ComponentKind::Image,
            Self::Button(_) => ComponentKind::Button,
            Self::Container(_) => ComponentKind::Container,
            Self::Navbar(_) => ComponentKind::Navbar,
            Self::Header(_) => ComponentKind::Header,
        }
    }

    /// Text style of font-bearing kinds; `None` for image and container.
    #[must_use]
    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            Self::Heading(style) | Self::Text(style) => Some(style),
            Self::Button(data) => Some(&data.style),
            Self::Navbar(data) => Some(&data.style),
            Self::Header(data) => Some(&data.style),
            Self::Image(_) | Self::Container(_) => None,
        }
    }

    /// Font family stored on the item, if any.
    #[must_use]
    pub fn font_family(&self) -> Option<GoogleFont> {
        match self {
            Self::Image(data) => data.font_family,
            Self::Container(data) => data.font_family,
            _ => self.text_style().and_then(|style| style.font_family),
        }
    }

    /// Returns true if the font was chosen for this item alone.
    #[must_use]
    pub fn custom_font_set(&self) -> bool {
        let flag = match self {
            Self::Image(data) => data.custom_font_set,
            Self::Container(data) => data.custom_font_set,
            _ => self.text_style().and_then(|style| style.custom_font_set),
        };
        flag.unwrap_or(false)
    }

    /// Writes the font family, marking it custom when `custom` is true.
    ///
    /// A `false` `custom` leaves the stored flag as it is.
    pub fn set_font_family(&mut self, font: GoogleFont, custom: bool) {
        let (family, flag) = match self {
            Self::Heading(style) | Self::Text(style) => {
                (&mut style.font_family, &mut style.custom_font_set)
            }
            Self::Button(data) => (&mut data.style.font_family, &mut data.style.custom_font_set),
            Self::Navbar(data) => (&mut data.style.font_family, &mut data.style.custom_font_set),
            Self::Header(data) => (&mut data.style.font_family, &mut data.style.custom_font_set),
            Self::Image(data) => (&mut data.font_family, &mut data.custom_font_set),
            Self::Container(data) => (&mut data.font_family, &mut data.custom_font_set),
        };
        *family = Some(font);
        if custom {
            *flag = Some(true);
        }
    }

    /// Decodes the `data` object of an item of the given kind.
    ///
    /// A missing or `null` object yields the kind's empty record.
    pub fn from_json(kind: ComponentKind, value: Value) -> serde_json::Result<Self> {
        let value = if value.is_null() {
            Value::Object(Map::new())
        } else {
            value
        };

        Ok(match kind {
            ComponentKind::Heading => Self::Heading(serde_json::from_value(value)?),
            ComponentKind::Text => Self::Text(serde_json::from_value(value)?),
            ComponentKind::Image => Self::Image(serde_json::from_value(value)?),
            ComponentKind::Button => Self::Button(serde_json::from_value(value)?),
            ComponentKind::Container => Self::Container(serde_json::from_value(value)?),
            ComponentKind::Navbar => Self::Navbar(serde_json::from_value(value)?),
            ComponentKind::Header => Self::Header(serde_json::from_value(value)?),
        })
    }

    /// Encodes the record as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Self::Heading(style) | Self::Text(style) => serde_json::to_value(style),
            Self::Image(data) => serde_json::to_value(data),
            Self::Button(data) => serde_json::to_value(data),
            Self::Container(data) => serde_json::to_value(data),
            Self::Navbar(data) => serde_json::to_value(data),
            Self::Header(data) => serde_json::to_value(data),
        }
    }
}

/// Axis-aligned rectangle in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in columns
    pub w: u32,
    /// Height in rows
    pub h: u32,
}

impl GridRect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns true if the two rectangles share any cell.
    ///
    /// Edges that merely touch do not count as overlap. Edges are computed in
    /// `u64`, so rectangles at the far end of the grid compare exactly.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let span = |start: u32, len: u32| (u64::from(start), u64::from(start) + u64::from(len));
        let (a_left, a_right) = span(self.x, self.w);
        let (b_left, b_right) = span(other.x, other.w);
        let (a_top, a_bottom) = span(self.y, self.h);
        let (b_top, b_bottom) = span(other.y, other.h);
        !(a_right <= b_left || b_right <= a_left || a_bottom <= b_top || b_bottom <= a_top)
    }

    /// Column just right of this rectangle, saturating at `u32::MAX`.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Row just below this rectangle, saturating at `u32::MAX`.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }
}

/// Grid cell a component is placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
}

impl GridPosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One placed component on the page.
///
/// # Validation
///
/// - `id` must be non-empty and unique within the page
/// - `min_w <= w <= max_w` and `h >= min_h`
///
/// Serialized with the short wire names used by persisted pages
/// (`i`, `type`, `data`, `minW`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireItem", into = "WireItem")]
pub struct ComponentItem {
    /// Unique item id
    pub id: String,
    /// Kind-specific data
    pub data: ComponentData,
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in columns
    pub w: u32,
    /// Height in rows
    pub h: u32,
    /// Explicit minimum width, if any
    pub min_w: Option<u32>,
    /// Explicit minimum height, if any
    pub min_h: Option<u32>,
    /// Explicit maximum width, if any
    pub max_w: Option<u32>,
}

impl ComponentItem {
    /// Default maximum width when none is stored.
    pub const DEFAULT_MAX_W: u32 = 12;

    /// Returns the item's kind.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Current geometry as a rectangle.
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Effective minimum width.
    #[must_use]
    pub fn min_w(&self) -> u32 {
        self.min_w.unwrap_or_else(|| self.kind().default_min_w())
    }

    /// Effective minimum height.
    #[must_use]
    pub fn min_h(&self) -> u32 {
        self.min_h.unwrap_or(1)
    }

    /// Effective maximum width.
    #[must_use]
    pub fn max_w(&self) -> u32 {
        self.max_w.unwrap_or(Self::DEFAULT_MAX_W)
    }

    /// Clamps a width/height pair into this item's constraints.
    #[must_use]
    pub fn clamp_size(&self, w: u32, h: u32) -> (u32, u32) {
        let min_w = self.min_w();
        let max_w = self.max_w().max(min_w);
        (w.clamp(min_w, max_w), h.max(self.min_h()))
    }

    /// Returns true if the geometry satisfies the size constraints.
    #[must_use]
    pub fn satisfies_constraints(&self) -> bool {
        self.w >= self.min_w() && self.w <= self.max_w() && self.h >= self.min_h()
    }
}

/// Serialized shape of a `ComponentItem`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireItem {
    i: String,
    #[serde(rename = "type")]
    kind: ComponentKind,
    #[serde(default)]
    data: Value,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_w: Option<u32>,
}

impl TryFrom<WireItem> for ComponentItem {
    type Error = serde_json::Error;

    fn try_from(wire: WireItem) -> Result<Self, Self::Error> {
        Ok(Self {
            data: ComponentData::from_json(wire.kind, wire.data)?,
            id: wire.i,
            x: wire.x,
            y: wire.y,
            w: wire.w,
            h: wire.h,
            min_w: wire.min_w,
            min_h: wire.min_h,
            max_w: wire.max_w,
        })
    }
}

impl From<ComponentItem> for WireItem {
    fn from(item: ComponentItem) -> Self {
        // Data records contain only strings, enums, and lists, which always encode.
        let data = item.data.to_json().unwrap_or(Value::Null);
        Self {
            i: item.id,
            kind: item.data.kind(),
            data,
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
            min_w: item.min_w,
            min_h: item.min_h,
            max_w: item.max_w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ComponentKind::from_name("carousel"), None);
    }

    #[test]
    fn test_font_family_names() {
        assert_eq!(
            serde_json::from_value::<GoogleFont>(json!("Open Sans")).unwrap(),
            GoogleFont::OpenSans
        );
        assert_eq!(
            serde_json::to_value(GoogleFont::PlayfairDisplay).unwrap(),
            json!("Playfair Display")
        );
    }

    #[test]
    fn test_item_wire_format() {
        let value = json!({
            "i": "item-1",
            "type": "heading",
            "data": {"text": "Hi", "fontSize": "2xl", "customFontSet": true},
            "x": 0, "y": 2, "w": 4, "h": 3,
            "minW": 1
        });

        let item: ComponentItem = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(item.kind(), ComponentKind::Heading);
        let style = item.data.text_style().unwrap();
        assert_eq!(style.font_size, Some(FontSize::Xxl));
        assert_eq!(style.custom_font_set, Some(true));

        assert_eq!(serde_json::to_value(&item).unwrap(), value);
    }

    #[test]
    fn test_bad_style_value_degrades_to_unset() {
        let value = json!({
            "i": "item-1",
            "type": "text",
            "data": {"text": "Body", "fontSize": "huge", "textAlign": 7},
            "x": 0, "y": 0, "w": 1, "h": 1
        });

        let item: ComponentItem = serde_json::from_value(value).unwrap();
        let style = item.data.text_style().unwrap();
        assert_eq!(style.text.as_deref(), Some("Body"));
        assert_eq!(style.font_size, None);
        assert_eq!(style.text_align, None);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let value = json!({"i": "a", "type": "carousel", "x": 0, "y": 0, "w": 1, "h": 1});
        assert!(serde_json::from_value::<ComponentItem>(value).is_err());
    }

    #[test]
    fn test_constraint_defaults() {
        let item: ComponentItem = serde_json::from_value(json!({
            "i": "b", "type": "button", "x": 0, "y": 0, "w": 1, "h": 1
        }))
        .unwrap();

        assert_eq!(item.min_w(), 2);
        assert_eq!(item.min_h(), 1);
        assert_eq!(item.max_w(), 12);
        assert!(!item.satisfies_constraints());
        assert_eq!(item.clamp_size(40, 0), (12, 1));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = GridRect::new(0, 0, 2, 2);
        assert!(!a.intersects(&GridRect::new(2, 0, 2, 2)));
        assert!(!a.intersects(&GridRect::new(0, 2, 2, 2)));
        assert!(a.intersects(&GridRect::new(1, 1, 2, 2)));
    }

    #[test]
    fn test_rect_at_grid_limit() {
        let far = GridRect::new(u32::MAX, u32::MAX, 1, 1);
        let wide = GridRect::new(u32::MAX - 1, 1, u32::MAX, u32::MAX);

        assert!(far.intersects(&far));
        assert!(far.intersects(&wide));
        assert!(!far.intersects(&GridRect::new(0, 0, 2, 2)));
        assert_eq!(far.right(), u32::MAX);
        assert_eq!(wide.bottom(), u32::MAX);
    }
}
