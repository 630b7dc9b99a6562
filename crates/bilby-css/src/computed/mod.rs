//! Computed styles.
//!
//! [CSS 2.1 § 6.1.2 Computed values](https://www.w3.org/TR/CSS21/cascade.html#computed-value)
//!
//! "Specified values are resolved to computed values during the
//! cascade; for example URIs are made absolute and 'em' and 'ex' units
//! are computed to pixel or absolute lengths."
//!
//! [`ComputedStyle`] stores one resolved, typed value per CSS 2.1
//! visual property. The long-tail properties (clip, generated content,
//! counters, cursor, spacing, outline, quotes) sit in a lazily boxed
//! [`UncommonStyle`] block so the common case stays compact.
//! [`PartialStyle`] is the cascade's output - the declarations that won
//! for one element - and [`compose`](compose::compose) merges it with
//! the parent's computed style into a new [`ComputedStyle`].

pub mod compose;

pub use compose::{compose, default_compute_font_size};

use std::collections::HashMap;

use bilby_common::Fixed;
use serde::Serialize;

use crate::style::values::{
    BackgroundAttachment, BackgroundColor, BackgroundImage, BackgroundPosition, BackgroundRepeat,
    BorderCollapse, BorderSpacing, BorderStyle, CaptionSide, Clear, Clip, Color, Content,
    CounterUpdate, Cursor, Direction, Display, EmptyCells, Float, FontFamily, FontStyle,
    FontVariant, FontWeight, Length, LengthAuto, LengthNone, LineHeight, ListStyleImage,
    ListStylePosition, ListStyleType, OutlineColor, Overflow, Position, Quotes, Spacing,
    TableLayout, TextAlign, TextDecoration, TextTransform, Unit, UnicodeBidi, VerticalAlign,
    Visibility, WhiteSpace, ZIndex,
};
use crate::style::{Declaration, PropertyDeclaration, PropertyId};

/// The default `medium` font size in pixels, used when the host's
/// font-size callback is the built-in one.
pub const MEDIUM_FONT_SIZE_PX: i32 = 16;

/// The long-tail property block.
///
/// Every field here has an initial value that rarely changes, so the
/// block is only allocated when one of them does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UncommonStyle {
    /// Computed 'clip'.
    pub clip: Clip,
    /// Computed 'content'.
    pub content: Content,
    /// Computed 'counter-increment'.
    pub counter_increment: CounterUpdate,
    /// Computed 'counter-reset'.
    pub counter_reset: CounterUpdate,
    /// Computed 'cursor'.
    pub cursor: Cursor,
    /// Computed 'letter-spacing'.
    pub letter_spacing: Spacing,
    /// Computed 'outline-color'.
    pub outline_color: OutlineColor,
    /// Computed 'outline-style'.
    pub outline_style: BorderStyle,
    /// Computed 'outline-width'.
    pub outline_width: Length,
    /// Computed 'quotes'.
    pub quotes: Quotes,
    /// Computed 'word-spacing'.
    pub word_spacing: Spacing,
}

impl UncommonStyle {
    /// The all-initial block.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            clip: Clip::Auto,
            content: Content::Normal,
            counter_increment: CounterUpdate::None,
            counter_reset: CounterUpdate::None,
            cursor: Cursor::auto(),
            letter_spacing: Spacing::Normal,
            outline_color: OutlineColor::Invert,
            // An outline with style 'none' computes to width zero.
            outline_style: BorderStyle::None,
            outline_width: Length::ZERO,
            quotes: Quotes::None,
            word_spacing: Spacing::Normal,
        }
    }
}

impl Default for UncommonStyle {
    fn default() -> Self {
        Self::initial()
    }
}

/// The fully resolved style of one element.
///
/// After composition every value is concrete: no `inherit` remains, no
/// length carries the `ex` unit, and the font size is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedStyle {
    /// Computed 'background-attachment'.
    pub background_attachment: BackgroundAttachment,
    /// Computed 'background-color'.
    pub background_color: BackgroundColor,
    /// Computed 'background-image' (absolute URL).
    pub background_image: BackgroundImage,
    /// Computed 'background-position'.
    pub background_position: BackgroundPosition,
    /// Computed 'background-repeat'.
    pub background_repeat: BackgroundRepeat,
    /// Computed 'border-collapse'.
    pub border_collapse: BorderCollapse,
    /// Computed 'border-spacing'.
    pub border_spacing: BorderSpacing,
    /// Computed 'border-top-color' (the currentColor substitution has
    /// already happened).
    pub border_top_color: Color,
    /// Computed 'border-right-color'.
    pub border_right_color: Color,
    /// Computed 'border-bottom-color'.
    pub border_bottom_color: Color,
    /// Computed 'border-left-color'.
    pub border_left_color: Color,
    /// Computed 'border-top-style'.
    pub border_top_style: BorderStyle,
    /// Computed 'border-right-style'.
    pub border_right_style: BorderStyle,
    /// Computed 'border-bottom-style'.
    pub border_bottom_style: BorderStyle,
    /// Computed 'border-left-style'.
    pub border_left_style: BorderStyle,
    /// Computed 'border-top-width' (keywords resolved; zero when the
    /// style is none/hidden).
    pub border_top_width: Length,
    /// Computed 'border-right-width'.
    pub border_right_width: Length,
    /// Computed 'border-bottom-width'.
    pub border_bottom_width: Length,
    /// Computed 'border-left-width'.
    pub border_left_width: Length,
    /// Computed 'top'.
    pub top: LengthAuto,
    /// Computed 'right'.
    pub right: LengthAuto,
    /// Computed 'bottom'.
    pub bottom: LengthAuto,
    /// Computed 'left'.
    pub left: LengthAuto,
    /// Computed 'caption-side'.
    pub caption_side: CaptionSide,
    /// Computed 'clear'.
    pub clear: Clear,
    /// Computed 'color'.
    pub color: Color,
    /// Computed 'direction'.
    pub direction: Direction,
    /// Computed 'display' (after the § 9.7 fix-up).
    pub display: Display,
    /// Computed 'empty-cells'.
    pub empty_cells: EmptyCells,
    /// Computed 'float' (after the § 9.7 fix-up).
    pub float: Float,
    /// Computed 'font-family'; empty means the UA default.
    pub font_family: Vec<FontFamily>,
    /// Computed 'font-size', always an absolute length.
    pub font_size: Length,
    /// Computed 'font-style'.
    pub font_style: FontStyle,
    /// Computed 'font-variant'.
    pub font_variant: FontVariant,
    /// Computed 'font-weight'.
    pub font_weight: FontWeight,
    /// Computed 'height'.
    pub height: LengthAuto,
    /// Computed 'line-height'.
    pub line_height: LineHeight,
    /// Computed 'list-style-image' (absolute URL).
    pub list_style_image: ListStyleImage,
    /// Computed 'list-style-position'.
    pub list_style_position: ListStylePosition,
    /// Computed 'list-style-type'.
    pub list_style_type: ListStyleType,
    /// Computed 'margin-top'.
    pub margin_top: LengthAuto,
    /// Computed 'margin-right'.
    pub margin_right: LengthAuto,
    /// Computed 'margin-bottom'.
    pub margin_bottom: LengthAuto,
    /// Computed 'margin-left'.
    pub margin_left: LengthAuto,
    /// Computed 'max-height'.
    pub max_height: LengthNone,
    /// Computed 'max-width'.
    pub max_width: LengthNone,
    /// Computed 'min-height'.
    pub min_height: Length,
    /// Computed 'min-width'.
    pub min_width: Length,
    /// Computed 'overflow'.
    pub overflow: Overflow,
    /// Computed 'padding-top'.
    pub padding_top: Length,
    /// Computed 'padding-right'.
    pub padding_right: Length,
    /// Computed 'padding-bottom'.
    pub padding_bottom: Length,
    /// Computed 'padding-left'.
    pub padding_left: Length,
    /// Computed 'position'.
    pub position: Position,
    /// Computed 'table-layout'.
    pub table_layout: TableLayout,
    /// Computed 'text-align'.
    pub text_align: TextAlign,
    /// Computed 'text-decoration'.
    pub text_decoration: TextDecoration,
    /// Computed 'text-indent'.
    pub text_indent: Length,
    /// Computed 'text-transform'.
    pub text_transform: TextTransform,
    /// Computed 'unicode-bidi'.
    pub unicode_bidi: UnicodeBidi,
    /// Computed 'vertical-align'.
    pub vertical_align: VerticalAlign,
    /// Computed 'visibility'.
    pub visibility: Visibility,
    /// Computed 'white-space'.
    pub white_space: WhiteSpace,
    /// Computed 'width'.
    pub width: LengthAuto,
    /// Computed 'z-index'.
    pub z_index: ZIndex,
    /// The long-tail block; `None` means every uncommon property holds
    /// its initial value.
    pub uncommon: Option<Box<UncommonStyle>>,
}

impl ComputedStyle {
    /// A freshly initialised style: every property at its CSS 2.1
    /// initial value.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            background_attachment: BackgroundAttachment::Scroll,
            background_color: BackgroundColor::Transparent,
            background_image: BackgroundImage::None,
            background_position: BackgroundPosition {
                horizontal: Length::new(Fixed::ZERO, Unit::Percent),
                vertical: Length::new(Fixed::ZERO, Unit::Percent),
            },
            background_repeat: BackgroundRepeat::Repeat,
            border_collapse: BorderCollapse::Separate,
            border_spacing: BorderSpacing {
                horizontal: Length::ZERO,
                vertical: Length::ZERO,
            },
            // Initial border colors are "the value of 'color'".
            border_top_color: Color::BLACK,
            border_right_color: Color::BLACK,
            border_bottom_color: Color::BLACK,
            border_left_color: Color::BLACK,
            border_top_style: BorderStyle::None,
            border_right_style: BorderStyle::None,
            border_bottom_style: BorderStyle::None,
            border_left_style: BorderStyle::None,
            // 'medium' widths compute to zero while the style is none.
            border_top_width: Length::ZERO,
            border_right_width: Length::ZERO,
            border_bottom_width: Length::ZERO,
            border_left_width: Length::ZERO,
            top: LengthAuto::Auto,
            right: LengthAuto::Auto,
            bottom: LengthAuto::Auto,
            left: LengthAuto::Auto,
            caption_side: CaptionSide::Top,
            clear: Clear::None,
            color: Color::BLACK,
            direction: Direction::Ltr,
            display: Display::Inline,
            empty_cells: EmptyCells::Show,
            float: Float::None,
            font_family: Vec::new(),
            font_size: Length::px(MEDIUM_FONT_SIZE_PX),
            font_style: FontStyle::Normal,
            font_variant: FontVariant::Normal,
            font_weight: FontWeight::Normal,
            height: LengthAuto::Auto,
            line_height: LineHeight::Normal,
            list_style_image: ListStyleImage::None,
            list_style_position: ListStylePosition::Outside,
            list_style_type: ListStyleType::Disc,
            margin_top: LengthAuto::Length(Length::ZERO),
            margin_right: LengthAuto::Length(Length::ZERO),
            margin_bottom: LengthAuto::Length(Length::ZERO),
            margin_left: LengthAuto::Length(Length::ZERO),
            max_height: LengthNone::None,
            max_width: LengthNone::None,
            min_height: Length::ZERO,
            min_width: Length::ZERO,
            overflow: Overflow::Visible,
            padding_top: Length::ZERO,
            padding_right: Length::ZERO,
            padding_bottom: Length::ZERO,
            padding_left: Length::ZERO,
            position: Position::Static,
            table_layout: TableLayout::Auto,
            text_align: TextAlign::Default,
            text_decoration: TextDecoration::NONE,
            text_indent: Length::ZERO,
            text_transform: TextTransform::None,
            unicode_bidi: UnicodeBidi::Normal,
            vertical_align: VerticalAlign::Baseline,
            visibility: Visibility::Visible,
            white_space: WhiteSpace::Normal,
            width: LengthAuto::Auto,
            z_index: ZIndex::Auto,
            uncommon: None,
        }
    }

    /// A style inheriting from `parent`: inherited properties copy the
    /// parent's computed values, the rest take their initial values.
    ///
    /// [§ 6.2](https://www.w3.org/TR/CSS21/cascade.html#inheritance)
    #[must_use]
    pub fn inherit_from(parent: &Self) -> Self {
        let mut style = Self::initial();
        style.border_collapse = parent.border_collapse;
        style.border_spacing = parent.border_spacing;
        style.caption_side = parent.caption_side;
        style.color = parent.color;
        style.direction = parent.direction;
        style.empty_cells = parent.empty_cells;
        style.font_family = parent.font_family.clone();
        style.font_size = parent.font_size;
        style.font_style = parent.font_style;
        style.font_variant = parent.font_variant;
        style.font_weight = parent.font_weight;
        style.line_height = parent.line_height;
        style.list_style_image = parent.list_style_image.clone();
        style.list_style_position = parent.list_style_position;
        style.list_style_type = parent.list_style_type;
        style.text_align = parent.text_align;
        style.text_indent = parent.text_indent;
        style.text_transform = parent.text_transform;
        style.visibility = parent.visibility;
        style.white_space = parent.white_space;

        if let Some(parent_uncommon) = &parent.uncommon {
            let mut uncommon = UncommonStyle::initial();
            uncommon.cursor = parent_uncommon.cursor.clone();
            uncommon.letter_spacing = parent_uncommon.letter_spacing;
            uncommon.quotes = parent_uncommon.quotes.clone();
            uncommon.word_spacing = parent_uncommon.word_spacing;
            if uncommon != UncommonStyle::initial() {
                style.uncommon = Some(Box::new(uncommon));
            }
        }
        style
    }

    /// The uncommon block, or the shared initial values.
    #[must_use]
    pub fn uncommon(&self) -> &UncommonStyle {
        const INITIAL: &UncommonStyle = &UncommonStyle::initial();
        self.uncommon.as_deref().unwrap_or(INITIAL)
    }

    /// Mutable access to the uncommon block, allocating it on first
    /// use.
    pub fn uncommon_mut(&mut self) -> &mut UncommonStyle {
        self.uncommon
            .get_or_insert_with(|| Box::new(UncommonStyle::initial()))
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::initial()
    }
}

/// The cascade's output for one element: the winning declaration per
/// longhand, before inheritance and absolute-value resolution.
#[derive(Debug, Clone, Default)]
pub struct PartialStyle {
    declarations: HashMap<PropertyId, PropertyDeclaration>,
}

impl PartialStyle {
    /// An empty partial style (no property cascaded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no property cascaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Record a winning declaration. Call in ascending cascade order:
    /// the last writer for a longhand wins.
    pub fn apply(&mut self, declaration: &Declaration) {
        let _ = self
            .declarations
            .insert(declaration.id(), declaration.value.clone());
    }

    /// The winning value for a longhand, if any property cascaded.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyDeclaration> {
        self.declarations.get(&id)
    }

    /// Iterate the winning declarations (no particular order).
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.declarations.values()
    }
}
