//! Typed property declarations.
//!
//! [CSS 2.1 § 4.1.8 Declarations and properties](https://www.w3.org/TR/CSS21/syndata.html#declaration)
//!
//! A parsed declaration is a tagged record: one [`PropertyDeclaration`]
//! variant per CSS 2.1 longhand, each carrying either the `inherit`
//! keyword or a typed value. Shorthands never survive parsing - the
//! language parser expands them into their longhands - so applying a
//! style block to an element is a linear scan where later records
//! overwrite earlier ones.

use serde::Serialize;

use crate::style::values::{
    BackgroundAttachment, BackgroundColor, BackgroundImage, BackgroundPosition, BackgroundRepeat,
    BorderCollapse, BorderColor, BorderSpacing, BorderStyle, BorderWidth, CaptionSide, Clear,
    Clip, Color,
    Content, CounterUpdate, Cursor, Direction, Display, EmptyCells, Float, FontFamily,
    FontSizeValue, FontStyle, FontVariant, FontWeight, Length, LengthAuto, LengthNone, LineHeight,
    ListStyleImage, ListStylePosition, ListStyleType, OutlineColor, Overflow, Position, Quotes,
    Spacing, TableLayout, TextAlign, TextDecoration, TextTransform, UnicodeBidi, VerticalAlign,
    Visibility, WhiteSpace, ZIndex,
};

/// A value that may be the `inherit` keyword instead of a concrete value.
///
/// [§ 6.2.1 The 'inherit' value](https://www.w3.org/TR/CSS21/cascade.html#value-def-inherit)
/// "Each property may also have a cascaded value of 'inherit', which
/// means that, for a given element, the property takes the same specified
/// value as the property for the element's parent."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Inheritable<T> {
    /// The `inherit` keyword.
    Inherit,
    /// A concrete value.
    Value(T),
}

/// Identifies a CSS 2.1 longhand property.
///
/// Shorthands have no identifier: they are expanded at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[expect(missing_docs, reason = "variant names are the CSS property names")]
pub enum PropertyId {
    BackgroundAttachment,
    BackgroundColor,
    BackgroundImage,
    BackgroundPosition,
    BackgroundRepeat,
    BorderCollapse,
    BorderSpacing,
    BorderTopColor,
    BorderRightColor,
    BorderBottomColor,
    BorderLeftColor,
    BorderTopStyle,
    BorderRightStyle,
    BorderBottomStyle,
    BorderLeftStyle,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    Bottom,
    CaptionSide,
    Clear,
    Clip,
    Color,
    Content,
    CounterIncrement,
    CounterReset,
    Cursor,
    Direction,
    Display,
    EmptyCells,
    Float,
    FontFamily,
    FontSize,
    FontStyle,
    FontVariant,
    FontWeight,
    Height,
    Left,
    LetterSpacing,
    LineHeight,
    ListStyleImage,
    ListStylePosition,
    ListStyleType,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    MaxHeight,
    MaxWidth,
    MinHeight,
    MinWidth,
    OutlineColor,
    OutlineStyle,
    OutlineWidth,
    Overflow,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Position,
    Quotes,
    Right,
    TableLayout,
    TextAlign,
    TextDecoration,
    TextIndent,
    TextTransform,
    Top,
    UnicodeBidi,
    VerticalAlign,
    Visibility,
    WhiteSpace,
    Width,
    WordSpacing,
    ZIndex,
}

/// Every longhand, in CSS property-name order.
pub const ALL_PROPERTIES: [PropertyId; 76] = [
    PropertyId::BackgroundAttachment,
    PropertyId::BackgroundColor,
    PropertyId::BackgroundImage,
    PropertyId::BackgroundPosition,
    PropertyId::BackgroundRepeat,
    PropertyId::BorderCollapse,
    PropertyId::BorderSpacing,
    PropertyId::BorderTopColor,
    PropertyId::BorderRightColor,
    PropertyId::BorderBottomColor,
    PropertyId::BorderLeftColor,
    PropertyId::BorderTopStyle,
    PropertyId::BorderRightStyle,
    PropertyId::BorderBottomStyle,
    PropertyId::BorderLeftStyle,
    PropertyId::BorderTopWidth,
    PropertyId::BorderRightWidth,
    PropertyId::BorderBottomWidth,
    PropertyId::BorderLeftWidth,
    PropertyId::Bottom,
    PropertyId::CaptionSide,
    PropertyId::Clear,
    PropertyId::Clip,
    PropertyId::Color,
    PropertyId::Content,
    PropertyId::CounterIncrement,
    PropertyId::CounterReset,
    PropertyId::Cursor,
    PropertyId::Direction,
    PropertyId::Display,
    PropertyId::EmptyCells,
    PropertyId::Float,
    PropertyId::FontFamily,
    PropertyId::FontSize,
    PropertyId::FontStyle,
    PropertyId::FontVariant,
    PropertyId::FontWeight,
    PropertyId::Height,
    PropertyId::Left,
    PropertyId::LetterSpacing,
    PropertyId::LineHeight,
    PropertyId::ListStyleImage,
    PropertyId::ListStylePosition,
    PropertyId::ListStyleType,
    PropertyId::MarginTop,
    PropertyId::MarginRight,
    PropertyId::MarginBottom,
    PropertyId::MarginLeft,
    PropertyId::MaxHeight,
    PropertyId::MaxWidth,
    PropertyId::MinHeight,
    PropertyId::MinWidth,
    PropertyId::OutlineColor,
    PropertyId::OutlineStyle,
    PropertyId::OutlineWidth,
    PropertyId::Overflow,
    PropertyId::PaddingTop,
    PropertyId::PaddingRight,
    PropertyId::PaddingBottom,
    PropertyId::PaddingLeft,
    PropertyId::Position,
    PropertyId::Quotes,
    PropertyId::Right,
    PropertyId::TableLayout,
    PropertyId::TextAlign,
    PropertyId::TextDecoration,
    PropertyId::TextIndent,
    PropertyId::TextTransform,
    PropertyId::Top,
    PropertyId::UnicodeBidi,
    PropertyId::VerticalAlign,
    PropertyId::Visibility,
    PropertyId::WhiteSpace,
    PropertyId::Width,
    PropertyId::WordSpacing,
    PropertyId::ZIndex,
];

impl PropertyId {
    /// The CSS property name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundAttachment => "background-attachment",
            Self::BackgroundColor => "background-color",
            Self::BackgroundImage => "background-image",
            Self::BackgroundPosition => "background-position",
            Self::BackgroundRepeat => "background-repeat",
            Self::BorderCollapse => "border-collapse",
            Self::BorderSpacing => "border-spacing",
            Self::BorderTopColor => "border-top-color",
            Self::BorderRightColor => "border-right-color",
            Self::BorderBottomColor => "border-bottom-color",
            Self::BorderLeftColor => "border-left-color",
            Self::BorderTopStyle => "border-top-style",
            Self::BorderRightStyle => "border-right-style",
            Self::BorderBottomStyle => "border-bottom-style",
            Self::BorderLeftStyle => "border-left-style",
            Self::BorderTopWidth => "border-top-width",
            Self::BorderRightWidth => "border-right-width",
            Self::BorderBottomWidth => "border-bottom-width",
            Self::BorderLeftWidth => "border-left-width",
            Self::Bottom => "bottom",
            Self::CaptionSide => "caption-side",
            Self::Clear => "clear",
            Self::Clip => "clip",
            Self::Color => "color",
            Self::Content => "content",
            Self::CounterIncrement => "counter-increment",
            Self::CounterReset => "counter-reset",
            Self::Cursor => "cursor",
            Self::Direction => "direction",
            Self::Display => "display",
            Self::EmptyCells => "empty-cells",
            Self::Float => "float",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontStyle => "font-style",
            Self::FontVariant => "font-variant",
            Self::FontWeight => "font-weight",
            Self::Height => "height",
            Self::Left => "left",
            Self::LetterSpacing => "letter-spacing",
            Self::LineHeight => "line-height",
            Self::ListStyleImage => "list-style-image",
            Self::ListStylePosition => "list-style-position",
            Self::ListStyleType => "list-style-type",
            Self::MarginTop => "margin-top",
            Self::MarginRight => "margin-right",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",
            Self::MaxHeight => "max-height",
            Self::MaxWidth => "max-width",
            Self::MinHeight => "min-height",
            Self::MinWidth => "min-width",
            Self::OutlineColor => "outline-color",
            Self::OutlineStyle => "outline-style",
            Self::OutlineWidth => "outline-width",
            Self::Overflow => "overflow",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::Position => "position",
            Self::Quotes => "quotes",
            Self::Right => "right",
            Self::TableLayout => "table-layout",
            Self::TextAlign => "text-align",
            Self::TextDecoration => "text-decoration",
            Self::TextIndent => "text-indent",
            Self::TextTransform => "text-transform",
            Self::Top => "top",
            Self::UnicodeBidi => "unicode-bidi",
            Self::VerticalAlign => "vertical-align",
            Self::Visibility => "visibility",
            Self::WhiteSpace => "white-space",
            Self::Width => "width",
            Self::WordSpacing => "word-spacing",
            Self::ZIndex => "z-index",
        }
    }

    /// Look up a longhand by its CSS name (ASCII case-insensitive).
    ///
    /// Shorthand names return `None`; the language parser dispatches them
    /// separately.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        ALL_PROPERTIES.iter().copied().find(|id| id.name() == lower)
    }

    /// Whether the property is inherited by default.
    ///
    /// [§ 6.2 Inheritance](https://www.w3.org/TR/CSS21/cascade.html#inheritance)
    /// "Some values are inherited by the children of an element in the
    /// document tree"; the per-property "Inherited:" lines in the CSS 2.1
    /// property tables are the source of truth here.
    #[must_use]
    pub const fn is_inherited(self) -> bool {
        matches!(
            self,
            Self::BorderCollapse
                | Self::BorderSpacing
                | Self::CaptionSide
                | Self::Color
                | Self::Cursor
                | Self::Direction
                | Self::EmptyCells
                | Self::FontFamily
                | Self::FontSize
                | Self::FontStyle
                | Self::FontVariant
                | Self::FontWeight
                | Self::LetterSpacing
                | Self::LineHeight
                | Self::ListStyleImage
                | Self::ListStylePosition
                | Self::ListStyleType
                | Self::Quotes
                | Self::TextAlign
                | Self::TextIndent
                | Self::TextTransform
                | Self::Visibility
                | Self::WhiteSpace
                | Self::WordSpacing
        )
    }
}

/// A parsed longhand value, one variant per CSS 2.1 property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[expect(missing_docs, reason = "variant names are the CSS property names")]
pub enum PropertyDeclaration {
    BackgroundAttachment(Inheritable<BackgroundAttachment>),
    BackgroundColor(Inheritable<BackgroundColor>),
    BackgroundImage(Inheritable<BackgroundImage>),
    BackgroundPosition(Inheritable<BackgroundPosition>),
    BackgroundRepeat(Inheritable<BackgroundRepeat>),
    BorderCollapse(Inheritable<BorderCollapse>),
    BorderSpacing(Inheritable<BorderSpacing>),
    BorderTopColor(Inheritable<BorderColor>),
    BorderRightColor(Inheritable<BorderColor>),
    BorderBottomColor(Inheritable<BorderColor>),
    BorderLeftColor(Inheritable<BorderColor>),
    BorderTopStyle(Inheritable<BorderStyle>),
    BorderRightStyle(Inheritable<BorderStyle>),
    BorderBottomStyle(Inheritable<BorderStyle>),
    BorderLeftStyle(Inheritable<BorderStyle>),
    BorderTopWidth(Inheritable<BorderWidth>),
    BorderRightWidth(Inheritable<BorderWidth>),
    BorderBottomWidth(Inheritable<BorderWidth>),
    BorderLeftWidth(Inheritable<BorderWidth>),
    Bottom(Inheritable<LengthAuto>),
    CaptionSide(Inheritable<CaptionSide>),
    Clear(Inheritable<Clear>),
    Clip(Inheritable<Clip>),
    Color(Inheritable<Color>),
    Content(Inheritable<Content>),
    CounterIncrement(Inheritable<CounterUpdate>),
    CounterReset(Inheritable<CounterUpdate>),
    Cursor(Inheritable<Cursor>),
    Direction(Inheritable<Direction>),
    Display(Inheritable<Display>),
    EmptyCells(Inheritable<EmptyCells>),
    Float(Inheritable<Float>),
    FontFamily(Inheritable<Vec<FontFamily>>),
    FontSize(Inheritable<FontSizeValue>),
    FontStyle(Inheritable<FontStyle>),
    FontVariant(Inheritable<FontVariant>),
    FontWeight(Inheritable<FontWeight>),
    Height(Inheritable<LengthAuto>),
    Left(Inheritable<LengthAuto>),
    LetterSpacing(Inheritable<Spacing>),
    LineHeight(Inheritable<LineHeight>),
    ListStyleImage(Inheritable<ListStyleImage>),
    ListStylePosition(Inheritable<ListStylePosition>),
    ListStyleType(Inheritable<ListStyleType>),
    MarginTop(Inheritable<LengthAuto>),
    MarginRight(Inheritable<LengthAuto>),
    MarginBottom(Inheritable<LengthAuto>),
    MarginLeft(Inheritable<LengthAuto>),
    MaxHeight(Inheritable<LengthNone>),
    MaxWidth(Inheritable<LengthNone>),
    MinHeight(Inheritable<Length>),
    MinWidth(Inheritable<Length>),
    OutlineColor(Inheritable<OutlineColor>),
    OutlineStyle(Inheritable<BorderStyle>),
    OutlineWidth(Inheritable<BorderWidth>),
    Overflow(Inheritable<Overflow>),
    PaddingTop(Inheritable<Length>),
    PaddingRight(Inheritable<Length>),
    PaddingBottom(Inheritable<Length>),
    PaddingLeft(Inheritable<Length>),
    Position(Inheritable<Position>),
    Quotes(Inheritable<Quotes>),
    Right(Inheritable<LengthAuto>),
    TableLayout(Inheritable<TableLayout>),
    TextAlign(Inheritable<TextAlign>),
    TextDecoration(Inheritable<TextDecoration>),
    TextIndent(Inheritable<Length>),
    TextTransform(Inheritable<TextTransform>),
    Top(Inheritable<LengthAuto>),
    UnicodeBidi(Inheritable<UnicodeBidi>),
    VerticalAlign(Inheritable<VerticalAlign>),
    Visibility(Inheritable<Visibility>),
    WhiteSpace(Inheritable<WhiteSpace>),
    Width(Inheritable<LengthAuto>),
    WordSpacing(Inheritable<Spacing>),
    ZIndex(Inheritable<ZIndex>),
}

impl PropertyDeclaration {
    /// The longhand this declaration sets.
    #[must_use]
    pub const fn id(&self) -> PropertyId {
        match self {
            Self::BackgroundAttachment(_) => PropertyId::BackgroundAttachment,
            Self::BackgroundColor(_) => PropertyId::BackgroundColor,
            Self::BackgroundImage(_) => PropertyId::BackgroundImage,
            Self::BackgroundPosition(_) => PropertyId::BackgroundPosition,
            Self::BackgroundRepeat(_) => PropertyId::BackgroundRepeat,
            Self::BorderCollapse(_) => PropertyId::BorderCollapse,
            Self::BorderSpacing(_) => PropertyId::BorderSpacing,
            Self::BorderTopColor(_) => PropertyId::BorderTopColor,
            Self::BorderRightColor(_) => PropertyId::BorderRightColor,
            Self::BorderBottomColor(_) => PropertyId::BorderBottomColor,
            Self::BorderLeftColor(_) => PropertyId::BorderLeftColor,
            Self::BorderTopStyle(_) => PropertyId::BorderTopStyle,
            Self::BorderRightStyle(_) => PropertyId::BorderRightStyle,
            Self::BorderBottomStyle(_) => PropertyId::BorderBottomStyle,
            Self::BorderLeftStyle(_) => PropertyId::BorderLeftStyle,
            Self::BorderTopWidth(_) => PropertyId::BorderTopWidth,
            Self::BorderRightWidth(_) => PropertyId::BorderRightWidth,
            Self::BorderBottomWidth(_) => PropertyId::BorderBottomWidth,
            Self::BorderLeftWidth(_) => PropertyId::BorderLeftWidth,
            Self::Bottom(_) => PropertyId::Bottom,
            Self::CaptionSide(_) => PropertyId::CaptionSide,
            Self::Clear(_) => PropertyId::Clear,
            Self::Clip(_) => PropertyId::Clip,
            Self::Color(_) => PropertyId::Color,
            Self::Content(_) => PropertyId::Content,
            Self::CounterIncrement(_) => PropertyId::CounterIncrement,
            Self::CounterReset(_) => PropertyId::CounterReset,
            Self::Cursor(_) => PropertyId::Cursor,
            Self::Direction(_) => PropertyId::Direction,
            Self::Display(_) => PropertyId::Display,
            Self::EmptyCells(_) => PropertyId::EmptyCells,
            Self::Float(_) => PropertyId::Float,
            Self::FontFamily(_) => PropertyId::FontFamily,
            Self::FontSize(_) => PropertyId::FontSize,
            Self::FontStyle(_) => PropertyId::FontStyle,
            Self::FontVariant(_) => PropertyId::FontVariant,
            Self::FontWeight(_) => PropertyId::FontWeight,
            Self::Height(_) => PropertyId::Height,
            Self::Left(_) => PropertyId::Left,
            Self::LetterSpacing(_) => PropertyId::LetterSpacing,
            Self::LineHeight(_) => PropertyId::LineHeight,
            Self::ListStyleImage(_) => PropertyId::ListStyleImage,
            Self::ListStylePosition(_) => PropertyId::ListStylePosition,
            Self::ListStyleType(_) => PropertyId::ListStyleType,
            Self::MarginTop(_) => PropertyId::MarginTop,
            Self::MarginRight(_) => PropertyId::MarginRight,
            Self::MarginBottom(_) => PropertyId::MarginBottom,
            Self::MarginLeft(_) => PropertyId::MarginLeft,
            Self::MaxHeight(_) => PropertyId::MaxHeight,
            Self::MaxWidth(_) => PropertyId::MaxWidth,
            Self::MinHeight(_) => PropertyId::MinHeight,
            Self::MinWidth(_) => PropertyId::MinWidth,
            Self::OutlineColor(_) => PropertyId::OutlineColor,
            Self::OutlineStyle(_) => PropertyId::OutlineStyle,
            Self::OutlineWidth(_) => PropertyId::OutlineWidth,
            Self::Overflow(_) => PropertyId::Overflow,
            Self::PaddingTop(_) => PropertyId::PaddingTop,
            Self::PaddingRight(_) => PropertyId::PaddingRight,
            Self::PaddingBottom(_) => PropertyId::PaddingBottom,
            Self::PaddingLeft(_) => PropertyId::PaddingLeft,
            Self::Position(_) => PropertyId::Position,
            Self::Quotes(_) => PropertyId::Quotes,
            Self::Right(_) => PropertyId::Right,
            Self::TableLayout(_) => PropertyId::TableLayout,
            Self::TextAlign(_) => PropertyId::TextAlign,
            Self::TextDecoration(_) => PropertyId::TextDecoration,
            Self::TextIndent(_) => PropertyId::TextIndent,
            Self::TextTransform(_) => PropertyId::TextTransform,
            Self::Top(_) => PropertyId::Top,
            Self::UnicodeBidi(_) => PropertyId::UnicodeBidi,
            Self::VerticalAlign(_) => PropertyId::VerticalAlign,
            Self::Visibility(_) => PropertyId::Visibility,
            Self::WhiteSpace(_) => PropertyId::WhiteSpace,
            Self::Width(_) => PropertyId::Width,
            Self::WordSpacing(_) => PropertyId::WordSpacing,
            Self::ZIndex(_) => PropertyId::ZIndex,
        }
    }

    /// `true` when the declaration carries the `inherit` keyword.
    #[must_use]
    pub const fn is_inherit(&self) -> bool {
        macro_rules! check {
            ($($variant:ident),+ $(,)?) => {
                match self {
                    $(Self::$variant(Inheritable::Inherit) => true,)+
                    _ => false,
                }
            };
        }
        check!(
            BackgroundAttachment,
            BackgroundColor,
            BackgroundImage,
            BackgroundPosition,
            BackgroundRepeat,
            BorderCollapse,
            BorderSpacing,
            BorderTopColor,
            BorderRightColor,
            BorderBottomColor,
            BorderLeftColor,
            BorderTopStyle,
            BorderRightStyle,
            BorderBottomStyle,
            BorderLeftStyle,
            BorderTopWidth,
            BorderRightWidth,
            BorderBottomWidth,
            BorderLeftWidth,
            Bottom,
            CaptionSide,
            Clear,
            Clip,
            Color,
            Content,
            CounterIncrement,
            CounterReset,
            Cursor,
            Direction,
            Display,
            EmptyCells,
            Float,
            FontFamily,
            FontSize,
            FontStyle,
            FontVariant,
            FontWeight,
            Height,
            Left,
            LetterSpacing,
            LineHeight,
            ListStyleImage,
            ListStylePosition,
            ListStyleType,
            MarginTop,
            MarginRight,
            MarginBottom,
            MarginLeft,
            MaxHeight,
            MaxWidth,
            MinHeight,
            MinWidth,
            OutlineColor,
            OutlineStyle,
            OutlineWidth,
            Overflow,
            PaddingTop,
            PaddingRight,
            PaddingBottom,
            PaddingLeft,
            Position,
            Quotes,
            Right,
            TableLayout,
            TextAlign,
            TextDecoration,
            TextIndent,
            TextTransform,
            Top,
            UnicodeBidi,
            VerticalAlign,
            Visibility,
            WhiteSpace,
            Width,
            WordSpacing,
            ZIndex,
        )
    }
}

/// One declaration of a style block: a longhand value plus its
/// `!important` flag.
///
/// [§ 6.4.2 !important rules](https://www.w3.org/TR/CSS21/cascade.html#important-rules)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// The longhand value.
    pub value: PropertyDeclaration,
    /// "Declaring a shorthand property to be '!important' is equivalent
    /// to declaring all of its sub-properties to be '!important'."
    pub important: bool,
}

impl Declaration {
    /// Build a normal-importance declaration.
    #[must_use]
    pub const fn new(value: PropertyDeclaration) -> Self {
        Self {
            value,
            important: false,
        }
    }

    /// The longhand this declaration sets.
    #[must_use]
    pub const fn id(&self) -> PropertyId {
        self.value.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for id in ALL_PROPERTIES {
            assert_eq!(PropertyId::from_name(id.name()), Some(id));
        }
    }

    #[test]
    fn test_inheritance_table() {
        assert!(PropertyId::Color.is_inherited());
        assert!(PropertyId::FontFamily.is_inherited());
        assert!(PropertyId::Quotes.is_inherited());
        assert!(!PropertyId::Display.is_inherited());
        assert!(!PropertyId::BackgroundColor.is_inherited());
        assert!(!PropertyId::MarginTop.is_inherited());
        assert!(!PropertyId::TextDecoration.is_inherited());
    }

    #[test]
    fn test_is_inherit() {
        let decl = PropertyDeclaration::Color(Inheritable::Inherit);
        assert!(decl.is_inherit());
        let decl = PropertyDeclaration::Color(Inheritable::Value(Color::BLACK));
        assert!(!decl.is_inherit());
    }
}
