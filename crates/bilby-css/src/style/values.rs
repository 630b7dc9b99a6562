//! Typed CSS 2.1 property values.
//!
//! [CSS 2.1 § 4.3 Values](https://www.w3.org/TR/CSS21/syndata.html#values)
//!
//! Every property value the engine can compute is a tagged variant here.
//! Lengths carry a 24.8 [`Fixed`] magnitude plus a [`Unit`]; percentages
//! are lengths with [`Unit::Percent`]. Identifier-valued payloads (URIs,
//! font family names, counter names, quote strings) are interned [`Atom`]s.

use bilby_common::{Atom, Fixed};
use serde::Serialize;

/// Units attached to dimension values.
///
/// [§ 4.3.2 Lengths](https://www.w3.org/TR/CSS21/syndata.html#length-units),
/// [§ 4.3.3 Percentages](https://www.w3.org/TR/CSS21/syndata.html#percentage-units),
/// plus the angle, time, and frequency units reserved by
/// [Appendix A](https://www.w3.org/TR/CSS21/aural.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// "px: pixel units - 1px is equal to 0.75pt"
    Px,
    /// "em: the 'font-size' of the relevant font"
    Em,
    /// "ex: the 'x-height' of the relevant font"
    Ex,
    /// "in: inches - 1in is equal to 2.54cm"
    In,
    /// "cm: centimeters"
    Cm,
    /// "mm: millimeters"
    Mm,
    /// "pt: points - the points used by CSS 2.1 are equal to 1/72nd of 1in"
    Pt,
    /// "pc: picas - 1pc is equal to 12pt"
    Pc,
    /// A percentage of some reference value determined per property.
    Percent,
    /// Angle: degrees.
    Deg,
    /// Angle: gradians.
    Grad,
    /// Angle: radians.
    Rad,
    /// Time: seconds.
    S,
    /// Time: milliseconds.
    Ms,
    /// Frequency: hertz.
    Hz,
    /// Frequency: kilohertz.
    KHz,
}

impl Unit {
    /// Look up a unit by its CSS identifier (ASCII case-insensitive).
    /// Percentages are tokenized separately and never arrive here.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Some(match lower.as_str() {
            "px" => Self::Px,
            "em" => Self::Em,
            "ex" => Self::Ex,
            "in" => Self::In,
            "cm" => Self::Cm,
            "mm" => Self::Mm,
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            "deg" => Self::Deg,
            "grad" => Self::Grad,
            "rad" => Self::Rad,
            "s" => Self::S,
            "ms" => Self::Ms,
            "hz" => Self::Hz,
            "khz" => Self::KHz,
            _ => return None,
        })
    }

    /// `true` for the length units (including percent), the only units
    /// valid on the visual properties this engine computes.
    #[must_use]
    pub const fn is_length(self) -> bool {
        matches!(
            self,
            Self::Px
                | Self::Em
                | Self::Ex
                | Self::In
                | Self::Cm
                | Self::Mm
                | Self::Pt
                | Self::Pc
                | Self::Percent
        )
    }
}

/// A dimension: fixed-point magnitude plus unit.
///
/// [§ 4.3.2](https://www.w3.org/TR/CSS21/syndata.html#length-units)
/// "The format of a length value is a <number> immediately followed by
/// a unit identifier."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Length {
    /// The magnitude in 24.8 fixed point.
    pub value: Fixed,
    /// The unit the magnitude is expressed in.
    pub unit: Unit,
}

impl Length {
    /// Build a length from parts.
    #[must_use]
    pub const fn new(value: Fixed, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A zero-pixel length.
    pub const ZERO: Self = Self::new(Fixed::ZERO, Unit::Px);

    /// Build an integral pixel length.
    #[must_use]
    pub const fn px(value: i32) -> Self {
        Self::new(Fixed::from_int(value), Unit::Px)
    }
}

/// An sRGB color with alpha.
///
/// [§ 4.3.6 Colors](https://www.w3.org/TR/CSS21/syndata.html#color-units)
/// "A <color> is either a keyword or a numerical RGB specification."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
    /// Alpha channel (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Opaque black, the usual UA default for 'color'.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// Build an opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack as `(r<<24)|(g<<16)|(b<<8)|a`.
    #[must_use]
    pub const fn to_rgba(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// [§ 4.3.6](https://www.w3.org/TR/CSS21/syndata.html#color-units)
    /// "The RGB color model is used in numerical color specifications":
    /// `#rgb` expands "by replicating digits, not by adding zeros",
    /// `#rrggbb` is read pairwise. Other digit counts are invalid in
    /// CSS 2.1.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// [§ 4.3.6](https://www.w3.org/TR/CSS21/syndata.html#color-units)
    /// "The list of keyword color names is: aqua, black, blue, fuchsia,
    /// gray, green, lime, maroon, navy, olive, orange, purple, red,
    /// silver, teal, white, and yellow."
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Some(match lower.as_str() {
            "aqua" => Self::rgb(0, 255, 255),
            "black" => Self::BLACK,
            "blue" => Self::rgb(0, 0, 255),
            "fuchsia" => Self::rgb(255, 0, 255),
            "gray" => Self::rgb(128, 128, 128),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "navy" => Self::rgb(0, 0, 128),
            "olive" => Self::rgb(128, 128, 0),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "red" => Self::rgb(255, 0, 0),
            "silver" => Self::rgb(192, 192, 192),
            "teal" => Self::rgb(0, 128, 128),
            "white" => Self::rgb(255, 255, 255),
            "yellow" => Self::rgb(255, 255, 0),
            _ => return None,
        })
    }
}

/// [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS21/visuren.html#display-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Display {
    /// "This value causes an element to generate one or more inline boxes."
    Inline,
    /// "This value causes an element to generate a block box."
    Block,
    /// "This value causes an element to generate a principal block box
    /// and a marker box."
    ListItem,
    /// "Either block or inline boxes, depending on context."
    RunIn,
    /// "This value causes an element to generate an inline-level block
    /// container."
    InlineBlock,
    /// [§ 17.2] table element.
    Table,
    /// [§ 17.2] inline-level table.
    InlineTable,
    /// [§ 17.2] row group.
    TableRowGroup,
    /// [§ 17.2] header group.
    TableHeaderGroup,
    /// [§ 17.2] footer group.
    TableFooterGroup,
    /// [§ 17.2] table row.
    TableRow,
    /// [§ 17.2] column group.
    TableColumnGroup,
    /// [§ 17.2] table column.
    TableColumn,
    /// [§ 17.2] table cell.
    TableCell,
    /// [§ 17.2] table caption.
    TableCaption,
    /// "This value causes an element to not appear in the formatting
    /// structure."
    None,
}

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS21/visuren.html#choose-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    Static,
    /// "The box's position is calculated according to the normal flow,
    /// then offset relative to its normal position."
    Relative,
    /// "The box's position is specified with the offset properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute'
    /// model, but fixed with respect to some reference."
    Fixed,
}

/// [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS21/visuren.html#float-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Float {
    /// "The box is not floated."
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "Similar to 'left', except the box is floated to the right."
    Right,
}

/// [§ 9.5.2 Controlling flow next to floats](https://www.w3.org/TR/CSS21/visuren.html#flow-control)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Clear {
    /// "No constraint on the box's position with respect to floats."
    None,
    /// "Requires that the top border edge of the box be below the bottom
    /// outer edge of any left-floating boxes."
    Left,
    /// The mirror image of 'left'.
    Right,
    /// Clears both float directions.
    Both,
}

/// [§ 11.2 Visibility](https://www.w3.org/TR/CSS21/visufx.html#visibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    /// "The generated box is visible."
    Visible,
    /// "The generated box is invisible, but still affects layout."
    Hidden,
    /// [§ 17.5.5] for rows/columns; "has the same meaning as 'hidden'"
    /// elsewhere.
    Collapse,
}

/// [§ 11.1.1 Overflow](https://www.w3.org/TR/CSS21/visufx.html#overflow)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overflow {
    /// "Content is not clipped."
    Visible,
    /// "Content is clipped and no scrolling mechanism is provided."
    Hidden,
    /// "Content is clipped and a scrolling mechanism is provided."
    Scroll,
    /// "Behavior is user-agent dependent."
    Auto,
}

/// [§ 9.10 Text direction](https://www.w3.org/TR/CSS21/visuren.html#direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// "Left-to-right direction."
    Ltr,
    /// "Right-to-left direction."
    Rtl,
}

/// [§ 9.10 'unicode-bidi'](https://www.w3.org/TR/CSS21/visuren.html#direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnicodeBidi {
    /// "The element does not open an additional level of embedding."
    Normal,
    /// "The element opens an additional level of embedding."
    Embed,
    /// "Creates an override for inline-level elements."
    BidiOverride,
}

/// A length or the `auto` keyword (offsets, margins, width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthAuto {
    /// The value is resolved during layout.
    Auto,
    /// An explicit length or percentage.
    Length(Length),
}

/// A length or the `none` keyword (max-width, max-height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthNone {
    /// "No limit on the box's dimension."
    None,
    /// An explicit length or percentage.
    Length(Length),
}

/// A length or the `normal` keyword (letter-spacing, word-spacing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Spacing {
    /// [§ 16.4] "normal spacing for the current font."
    Normal,
    /// "This value indicates inter-character space in addition to the
    /// default."
    Length(Length),
}

/// [§ 8.5.2 Border color](https://www.w3.org/TR/CSS21/box.html#border-color-properties)
///
/// "The initial value... is the value of the element's 'color'
/// property." The initial state therefore needs its own variant; it is
/// substituted with the computed `color` when the style is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderColor {
    /// Take the computed value of the 'color' property.
    Current,
    /// An explicit color ('transparent' is a color with zero alpha).
    Color(Color),
}

/// [§ 8.5.3 Border style](https://www.w3.org/TR/CSS21/box.html#border-style-properties)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderStyle {
    /// "No border; the computed border width is zero."
    None,
    /// "Same as 'none', except in terms of border conflict resolution
    /// for table elements."
    Hidden,
    /// "The border is a series of dots."
    Dotted,
    /// "The border is a series of short line segments."
    Dashed,
    /// "The border is a single line segment."
    Solid,
    /// "The border is two solid lines."
    Double,
    /// "The border looks as though it were carved into the canvas."
    Groove,
    /// "The opposite of 'groove'."
    Ridge,
    /// "The border makes the box look as though it were embedded."
    Inset,
    /// "The opposite of 'inset'."
    Outset,
}

/// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS21/box.html#border-width-properties)
///
/// The keyword widths are resolved to absolute pixel lengths when the
/// style is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderWidth {
    /// A thin border (1px in this engine).
    Thin,
    /// A medium border (2px in this engine).
    Medium,
    /// A thick border (4px in this engine).
    Thick,
    /// An explicit non-negative length.
    Length(Length),
}

/// [§ 14.2.1 'background-attachment'](https://www.w3.org/TR/CSS21/colors.html#propdef-background-attachment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackgroundAttachment {
    /// "The background image scrolls along with the document."
    Scroll,
    /// "The background image is fixed with regard to the viewport."
    Fixed,
}

/// [§ 14.2.1 'background-color'](https://www.w3.org/TR/CSS21/colors.html#propdef-background-color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackgroundColor {
    /// "The 'transparent' keyword."
    Transparent,
    /// An explicit color.
    Color(Color),
}

/// [§ 14.2.1 'background-image'](https://www.w3.org/TR/CSS21/colors.html#propdef-background-image)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BackgroundImage {
    /// "No image."
    None,
    /// A resolved, absolute image URL.
    Uri(Atom),
}

/// [§ 14.2.1 'background-repeat'](https://www.w3.org/TR/CSS21/colors.html#propdef-background-repeat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackgroundRepeat {
    /// "The image is repeated both horizontally and vertically."
    Repeat,
    /// "The image is repeated horizontally only."
    RepeatX,
    /// "The image is repeated vertically only."
    RepeatY,
    /// "The image is not repeated."
    NoRepeat,
}

/// [§ 14.2.1 'background-position'](https://www.w3.org/TR/CSS21/colors.html#propdef-background-position)
///
/// Keyword positions are stored as their equivalent percentages
/// ("'center' is equivalent to '50%'").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundPosition {
    /// Horizontal offset.
    pub horizontal: Length,
    /// Vertical offset.
    pub vertical: Length,
}

/// [§ 17.6 Borders](https://www.w3.org/TR/CSS21/tables.html#propdef-border-collapse)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderCollapse {
    /// "Selects the collapsing borders model."
    Collapse,
    /// "Selects the separated borders model."
    Separate,
}

/// [§ 17.6.1 'border-spacing'](https://www.w3.org/TR/CSS21/tables.html#propdef-border-spacing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BorderSpacing {
    /// Horizontal spacing between cell borders.
    pub horizontal: Length,
    /// Vertical spacing between cell borders.
    pub vertical: Length,
}

/// [§ 17.4.1 'caption-side'](https://www.w3.org/TR/CSS21/tables.html#propdef-caption-side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaptionSide {
    /// "Positions the caption box above the table box."
    Top,
    /// "Positions the caption box below the table box."
    Bottom,
}

/// [§ 17.6.1.1 'empty-cells'](https://www.w3.org/TR/CSS21/tables.html#propdef-empty-cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyCells {
    /// "Borders and backgrounds are drawn around/behind empty cells."
    Show,
    /// "No borders or backgrounds are drawn around/behind empty cells."
    Hide,
}

/// [§ 17.5.2 'table-layout'](https://www.w3.org/TR/CSS21/tables.html#propdef-table-layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableLayout {
    /// "Use any automatic table layout algorithm."
    Auto,
    /// "Use the fixed table layout algorithm."
    Fixed,
}

/// [§ 15.3 Font family](https://www.w3.org/TR/CSS21/fonts.html#font-family-prop)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FontFamily {
    /// Generic family "serif".
    Serif,
    /// Generic family "sans-serif".
    SansSerif,
    /// Generic family "cursive".
    Cursive,
    /// Generic family "fantasy".
    Fantasy,
    /// Generic family "monospace".
    Monospace,
    /// "The name of a font family of choice" - case preserved.
    Named(Atom),
}

/// [§ 15.7 Font size](https://www.w3.org/TR/CSS21/fonts.html#font-size-props)
///
/// The specified value; the host's font-size callback resolves it to an
/// absolute length during composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontSizeValue {
    /// Absolute-size keyword.
    XxSmall,
    /// Absolute-size keyword.
    XSmall,
    /// Absolute-size keyword.
    Small,
    /// Absolute-size keyword; "the user's preferred font size".
    Medium,
    /// Absolute-size keyword.
    Large,
    /// Absolute-size keyword.
    XLarge,
    /// Absolute-size keyword.
    XxLarge,
    /// Relative-size keyword: "larger than the inherited size".
    Larger,
    /// Relative-size keyword: "smaller than the inherited size".
    Smaller,
    /// An explicit length or percentage (relative to the parent size).
    Length(Length),
}

/// [§ 15.4 'font-style'](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontStyle {
    /// "Selects a font that is classified as 'normal'."
    Normal,
    /// "Selects a font that is labeled 'italic'."
    Italic,
    /// "Selects a font that is labeled 'oblique'."
    Oblique,
}

/// [§ 15.5 'font-variant'](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontVariant {
    /// "Specifies a font that is not labeled as a small-caps font."
    Normal,
    /// "Specifies a font that is labeled as a small-caps font."
    SmallCaps,
}

/// [§ 15.6 'font-weight'](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-weight)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    /// "Same as '400'."
    Normal,
    /// "Same as '700'."
    Bold,
    /// "Specifies the next weight that is assigned to a font that is
    /// darker than the inherited one."
    Bolder,
    /// "Specifies the next weight that is assigned to a font that is
    /// lighter than the inherited one."
    Lighter,
    /// Numeric weight 100.
    W100,
    /// Numeric weight 200.
    W200,
    /// Numeric weight 300.
    W300,
    /// Numeric weight 400.
    W400,
    /// Numeric weight 500.
    W500,
    /// Numeric weight 600.
    W600,
    /// Numeric weight 700.
    W700,
    /// Numeric weight 800.
    W800,
    /// Numeric weight 900.
    W900,
}

/// [§ 10.8.1 'line-height'](https://www.w3.org/TR/CSS21/visudet.html#propdef-line-height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value."
    Normal,
    /// "The used value of the property is this number multiplied by the
    /// element's font size."
    Number(Fixed),
    /// An explicit length or percentage.
    Length(Length),
}

/// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS21/text.html#propdef-text-align)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    /// The initial value: "a nameless value that acts as 'left' if
    /// 'direction' is 'ltr', 'right' if 'direction' is 'rtl'".
    Default,
    /// "Left-aligns the inline content."
    Left,
    /// "Right-aligns the inline content."
    Right,
    /// "Centers the inline content."
    Center,
    /// "Justifies the inline content."
    Justify,
}

/// [§ 16.3.1 'text-decoration'](https://www.w3.org/TR/CSS21/text.html#propdef-text-decoration)
///
/// The value is `none` or any combination of the line keywords, so the
/// computed form is a set of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextDecoration {
    /// "Each line of text is underlined."
    pub underline: bool,
    /// "Each line of text has a line above it."
    pub overline: bool,
    /// "Each line of text has a line through the middle."
    pub line_through: bool,
    /// "Text blinks." Conforming user agents may simply not blink.
    pub blink: bool,
}

impl TextDecoration {
    /// The `none` value.
    pub const NONE: Self = Self {
        underline: false,
        overline: false,
        line_through: false,
        blink: false,
    };

    /// `true` when no decoration line is set.
    #[must_use]
    pub const fn is_none(self) -> bool {
        !(self.underline || self.overline || self.line_through || self.blink)
    }
}

/// [§ 16.5 'text-transform'](https://www.w3.org/TR/CSS21/text.html#propdef-text-transform)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextTransform {
    /// "No capitalization effects."
    None,
    /// "Puts the first character of each word in uppercase."
    Capitalize,
    /// "Puts all characters of each word in uppercase."
    Uppercase,
    /// "Puts all characters of each word in lowercase."
    Lowercase,
}

/// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS21/visudet.html#propdef-vertical-align)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerticalAlign {
    /// "Align the baseline of the box with the baseline of the parent."
    Baseline,
    /// "Lower the baseline of the box to the proper position for
    /// subscripts."
    Sub,
    /// "Raise the baseline of the box to the proper position for
    /// superscripts."
    Super,
    /// "Align the top of the aligned subtree with the top of the line
    /// box."
    Top,
    /// "Align the top of the box with the top of the parent's content
    /// area."
    TextTop,
    /// "Align the vertical midpoint of the box with the baseline of the
    /// parent box plus half the x-height."
    Middle,
    /// "Align the bottom of the aligned subtree with the bottom of the
    /// line box."
    Bottom,
    /// "Align the bottom of the box with the bottom of the parent's
    /// content area."
    TextBottom,
    /// "Raise (positive value) or lower (negative value) the box by this
    /// distance"; percentages refer to the line-height.
    Length(Length),
}

/// [§ 16.6 'white-space'](https://www.w3.org/TR/CSS21/text.html#propdef-white-space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WhiteSpace {
    /// "Collapses sequences of white space and breaks lines as necessary."
    Normal,
    /// "Prevents user agents from collapsing sequences of white space."
    Pre,
    /// "Collapses white space as for 'normal', but suppresses line breaks."
    Nowrap,
    /// "Prevents collapsing, but allows wrapping."
    PreWrap,
    /// "Collapses sequences of white space, preserves line breaks."
    PreLine,
}

/// [§ 12.5.1 'list-style-type'](https://www.w3.org/TR/CSS21/generate.html#propdef-list-style-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListStyleType {
    /// A filled circle marker.
    Disc,
    /// An open circle marker.
    Circle,
    /// A filled square marker.
    Square,
    /// "Decimal numbers, beginning with 1."
    Decimal,
    /// "Decimal numbers padded by initial zeros."
    DecimalLeadingZero,
    /// "Lowercase roman numerals."
    LowerRoman,
    /// "Uppercase roman numerals."
    UpperRoman,
    /// "Lowercase classical Greek."
    LowerGreek,
    /// "Lowercase ASCII letters."
    LowerLatin,
    /// "Uppercase ASCII letters."
    UpperLatin,
    /// "Traditional Armenian numbering."
    Armenian,
    /// "Traditional Georgian numbering."
    Georgian,
    /// Alias for lower-latin.
    LowerAlpha,
    /// Alias for upper-latin.
    UpperAlpha,
    /// "No marker."
    None,
}

/// [§ 12.5.1 'list-style-position'](https://www.w3.org/TR/CSS21/generate.html#propdef-list-style-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListStylePosition {
    /// "The marker box is the first inline box in the principal block
    /// box."
    Inside,
    /// "The marker box is outside the principal block box."
    Outside,
}

/// [§ 12.5.1 'list-style-image'](https://www.w3.org/TR/CSS21/generate.html#propdef-list-style-image)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListStyleImage {
    /// "No image is displayed."
    None,
    /// A resolved, absolute image URL.
    Uri(Atom),
}

/// One edge of a clipping rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClipEdge {
    /// "The clipping region has the same extent as the border edge."
    Auto,
    /// An offset from the border edge.
    Length(Length),
}

/// [§ 11.1.2 Clipping: the 'clip' property](https://www.w3.org/TR/CSS21/visufx.html#clipping)
/// "rect(top, right, bottom, left)" offsets from the border edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClipRect {
    /// Top edge offset.
    pub top: ClipEdge,
    /// Right edge offset.
    pub right: ClipEdge,
    /// Bottom edge offset.
    pub bottom: ClipEdge,
    /// Left edge offset.
    pub left: ClipEdge,
}

/// The 'clip' property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Clip {
    /// "The element does not clip."
    Auto,
    /// A `rect(...)` clipping region.
    Rect(ClipRect),
}

/// One item of a 'content' list.
///
/// [§ 12.2 The 'content' property](https://www.w3.org/TR/CSS21/generate.html#content)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentItem {
    /// "Text content."
    String(Atom),
    /// "The value is a URI that designates an external resource."
    Uri(Atom),
    /// `counter(name)` or `counter(name, style)`.
    Counter {
        /// The counter name.
        name: Atom,
        /// The list style used to render the counter; `None` means
        /// `decimal`. Unrecognized style idents are accepted and kept
        /// verbatim rather than invalidating the declaration.
        style: Option<Atom>,
    },
    /// `counters(name, separator)` or `counters(name, separator, style)`.
    Counters {
        /// The counter name.
        name: Atom,
        /// The separator string between nesting levels.
        separator: Atom,
        /// The list style used to render each level; see
        /// [`ContentItem::Counter`].
        style: Option<Atom>,
    },
    /// `attr(X)`: "the value of attribute X as a string".
    Attr(Atom),
    /// "Inserts the appropriate string from the 'quotes' property."
    OpenQuote,
    /// Closing counterpart of `open-quote`.
    CloseQuote,
    /// "Introduces no content, but increments the level of nesting."
    NoOpenQuote,
    /// "Introduces no content, but decrements the level of nesting."
    NoCloseQuote,
}

/// [§ 12.2 'content'](https://www.w3.org/TR/CSS21/generate.html#content)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Content {
    /// "Computes to 'none' for the :before and :after pseudo-elements."
    Normal,
    /// "The pseudo-element is not generated."
    None,
    /// A sequence of content items.
    Items(Vec<ContentItem>),
}

/// One counter adjustment from 'counter-increment' or 'counter-reset'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterDelta {
    /// The counter name. Unknown names are accepted and stored verbatim.
    pub name: Atom,
    /// The increment or reset value.
    pub value: i32,
}

/// [§ 12.4 Automatic counters and numbering](https://www.w3.org/TR/CSS21/generate.html#counters)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CounterUpdate {
    /// "No counters are affected."
    None,
    /// The `[<identifier> <integer>?]+` list.
    List(Vec<CounterDelta>),
}

/// One open/close pair from the 'quotes' property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotePair {
    /// The open-quote string.
    pub open: Atom,
    /// The close-quote string.
    pub close: Atom,
}

/// [§ 12.3.2 Specifying quotes with the 'quotes' property](https://www.w3.org/TR/CSS21/generate.html#quotes-specify)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Quotes {
    /// "The 'open-quote' and 'close-quote' values of the 'content'
    /// property produce no quotation marks."
    None,
    /// "Values for the 'open-quote' and 'close-quote' values... at each
    /// level of embedded quotation."
    Pairs(Vec<QuotePair>),
}

/// [§ 18.1 Cursors](https://www.w3.org/TR/CSS21/ui.html#cursor-props)
/// keyword alternatives after the optional URI list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorKind {
    /// "The UA determines the cursor to display."
    Auto,
    /// "A simple crosshair."
    Crosshair,
    /// "The platform-dependent default cursor."
    Default,
    /// "The cursor is a pointer that indicates a link."
    Pointer,
    /// "Indicates something is to be moved."
    Move,
    /// Edge-resize cursor: east.
    EResize,
    /// Edge-resize cursor: north-east.
    NeResize,
    /// Edge-resize cursor: north-west.
    NwResize,
    /// Edge-resize cursor: north.
    NResize,
    /// Edge-resize cursor: south-east.
    SeResize,
    /// Edge-resize cursor: south-west.
    SwResize,
    /// Edge-resize cursor: south.
    SResize,
    /// Edge-resize cursor: west.
    WResize,
    /// "Indicates text that can be selected."
    Text,
    /// "Indicates that the program is busy."
    Wait,
    /// "Help is available for the object under the cursor."
    Help,
    /// "Indicates that the program is performing some processing."
    Progress,
}

/// The full 'cursor' value: "[[<uri> ,]* keyword]".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cursor {
    /// Candidate cursor images, in preference order.
    pub uris: Vec<Atom>,
    /// The fallback keyword cursor.
    pub kind: CursorKind,
}

impl Cursor {
    /// The initial value, `auto` with no images.
    #[must_use]
    pub const fn auto() -> Self {
        Self {
            uris: Vec::new(),
            kind: CursorKind::Auto,
        }
    }
}

/// [§ 18.4 Dynamic outlines](https://www.w3.org/TR/CSS21/ui.html#dynamic-outlines)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutlineColor {
    /// "Performs a color inversion on the pixels on the screen."
    Invert,
    /// An explicit color.
    Color(Color),
}

/// [§ 9.9.1 'z-index'](https://www.w3.org/TR/CSS21/visuren.html#z-index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZIndex {
    /// "The stack level of the generated box is the same as its parent's."
    Auto,
    /// "This integer is the stack level of the generated box."
    Integer(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_3() {
        assert_eq!(Color::from_hex("#f00"), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_color_from_hex_6() {
        assert_eq!(Color::from_hex("#2563eb"), Some(Color::rgb(0x25, 0x63, 0xeb)));
    }

    #[test]
    fn test_color_from_hex_rejects_other_lengths() {
        // CSS 2.1 has no 4- or 8-digit hex notation.
        assert_eq!(Color::from_hex("#ff00"), None);
        assert_eq!(Color::from_hex("#ff0000ff"), None);
    }

    #[test]
    fn test_color_named_set_is_css21() {
        assert_eq!(Color::from_named("orange"), Some(Color::rgb(255, 165, 0)));
        assert_eq!(Color::from_named("RED"), Some(Color::rgb(255, 0, 0)));
        // CSS3 extended keywords are not part of the 2.1 set.
        assert_eq!(Color::from_named("rebeccapurple"), None);
    }

    #[test]
    fn test_color_packs_rgba() {
        assert_eq!(Color::rgb(255, 0, 0).to_rgba(), 0xff00_00ff);
        assert_eq!(Color::TRANSPARENT.to_rgba(), 0);
    }

    #[test]
    fn test_unit_from_name() {
        assert_eq!(Unit::from_name("PX"), Some(Unit::Px));
        assert_eq!(Unit::from_name("khz"), Some(Unit::KHz));
        assert_eq!(Unit::from_name("fr"), None);
    }

    #[test]
    fn test_text_decoration_none() {
        assert!(TextDecoration::NONE.is_none());
        let underline = TextDecoration {
            underline: true,
            ..TextDecoration::NONE
        };
        assert!(!underline.is_none());
    }
}
