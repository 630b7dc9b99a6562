//! Style composition: cascade output + parent style -> computed style.
//!
//! [CSS 2.1 § 6.1 Specified, computed, and actual values](https://www.w3.org/TR/CSS21/cascade.html#value-stages)
//!
//! `compose` is total for valid inputs and referentially transparent:
//! the same parent and child always produce the same result. Font size
//! resolution is delegated to the host (only it knows the user's
//! preferences and the font metrics), and must run first - every `ex`
//! length in the style is then normalised to `em` through the host's
//! answer, so no `ex` unit ever survives composition.

use bilby_common::{Fixed, Result};

use crate::style::values::{
    BorderColor, BorderStyle, BorderWidth, Clip, ClipEdge, Color, Display, Float, FontSizeValue,
    Length, LengthAuto, LengthNone, LineHeight, Position, Spacing, Unit, VerticalAlign,
};
use crate::style::{Inheritable, PropertyDeclaration, PropertyId};

use super::{ComputedStyle, PartialStyle, MEDIUM_FONT_SIZE_PX};

/// Border width keyword substitutions (design constants).
const THIN_PX: i32 = 1;
const MEDIUM_PX: i32 = 2;
const THICK_PX: i32 = 4;

/// Compose the cascade output for an element with its parent's computed
/// style. `parent == None` means the element is the document root.
///
/// # Errors
///
/// Errors from the host's `compute_font_size` callback propagate
/// unchanged.
pub fn compose<F>(
    parent: Option<&ComputedStyle>,
    child: &PartialStyle,
    compute_font_size: &mut F,
) -> Result<ComputedStyle>
where
    F: FnMut(Option<&Length>, &FontSizeValue) -> Result<Length>,
{
    let mut result = parent.map_or_else(ComputedStyle::initial, ComputedStyle::inherit_from);
    let fallback = parent.map_or_else(ComputedStyle::initial, Clone::clone);

    // Font size must be resolved before anything else: 'em' and 'ex'
    // lengths elsewhere in the style are relative to it.
    let parent_size = parent.map(|p| p.font_size);
    let specified_size = match child.get(PropertyId::FontSize) {
        Some(PropertyDeclaration::FontSize(Inheritable::Value(size))) => Some(*size),
        _ => None,
    };
    match (specified_size, parent) {
        (Some(size), _) => {
            result.font_size = compute_font_size(parent_size.as_ref(), &size)?;
        }
        (None, None) => {
            result.font_size = compute_font_size(None, &FontSizeValue::Medium)?;
        }
        // Inherited size is already absolute.
        (None, Some(_)) => {}
    }

    // 'color' next: border colors may need it.
    if let Some(PropertyDeclaration::Color(value)) = child.get(PropertyId::Color) {
        result.color = resolve(value, &fallback.color);
    }

    // Which border colors the cascade touched; untouched ones take the
    // computed 'color' below (§ 8.5.2).
    let mut border_color_set = [false; 4];

    for declaration in child.iter() {
        apply(declaration, &mut result, &fallback, &mut border_color_set);
    }

    // The ex-to-em factor: ask the host what 1ex resolves to for this
    // element's font, then normalise.
    let one_ex = compute_font_size(
        Some(&result.font_size),
        &FontSizeValue::Length(Length::new(Fixed::ONE, Unit::Ex)),
    )?;
    let ex_factor = if result.font_size.value == Fixed::ZERO {
        Fixed::ZERO
    } else {
        one_ex.value / result.font_size.value
    };
    convert_ex_units(&mut result, ex_factor);

    // § 8.5.2: untouched border colors take the computed 'color'.
    let sides = [
        (&mut result.border_top_color, border_color_set[0]),
        (&mut result.border_right_color, border_color_set[1]),
        (&mut result.border_bottom_color, border_color_set[2]),
        (&mut result.border_left_color, border_color_set[3]),
    ];
    for (color, was_set) in sides {
        if !was_set {
            *color = result.color;
        }
    }

    // A border with style none/hidden computes to width zero.
    zero_hidden_borders(&mut result);

    // Offset fix-ups (§ 9.4.3) and the § 9.7 display/float rules.
    fix_offsets(&mut result);
    fix_display_and_float(&mut result, parent.is_none());

    Ok(result)
}

/// The built-in font-size resolver, used by tests, the CLI, and hosts
/// without font metrics of their own.
///
/// Absolute units convert at their CSS ratios (96px/in); `em` and `%`
/// resolve against the parent size, `ex` as half the parent size;
/// keyword sizes use a fixed pixel table with `medium` at 16px.
pub fn default_compute_font_size(
    parent: Option<&Length>,
    specified: &FontSizeValue,
) -> Result<Length> {
    let parent_px = parent.map_or(Fixed::from_int(MEDIUM_FONT_SIZE_PX), |l| l.value);
    let px = |v: i32| Length::px(v);
    let result = match specified {
        FontSizeValue::XxSmall => px(9),
        FontSizeValue::XSmall => px(10),
        FontSizeValue::Small => px(13),
        FontSizeValue::Medium => px(MEDIUM_FONT_SIZE_PX),
        FontSizeValue::Large => px(18),
        FontSizeValue::XLarge => px(24),
        FontSizeValue::XxLarge => px(32),
        // "larger/smaller: larger or smaller than the inherited size,
        // by a scaling factor of about 1.2."
        FontSizeValue::Larger => Length::new(
            parent_px.mul_int(12).div_int(10),
            Unit::Px,
        ),
        FontSizeValue::Smaller => Length::new(
            parent_px.mul_int(10).div_int(12),
            Unit::Px,
        ),
        FontSizeValue::Length(length) => {
            let value = length.value;
            let resolved = match length.unit {
                Unit::Px => value,
                Unit::Em => value * parent_px,
                // Without font metrics, 1ex is half the font size.
                Unit::Ex => (value * parent_px).div_int(2),
                Unit::Percent => (value * parent_px).div_int(100),
                Unit::In => value.mul_int(96),
                Unit::Cm => value.mul_int(9600).div_int(254),
                Unit::Mm => value.mul_int(960).div_int(254),
                Unit::Pt => value.mul_int(4).div_int(3),
                Unit::Pc => value.mul_int(16),
                // Non-length units cannot reach a font size.
                _ => value,
            };
            Length::new(resolved, Unit::Px)
        }
    };
    Ok(result)
}

/// Resolve an inheritable value against the inherited fallback.
fn resolve<T: Clone>(value: &Inheritable<T>, inherited: &T) -> T {
    match value {
        Inheritable::Inherit => inherited.clone(),
        Inheritable::Value(v) => v.clone(),
    }
}

/// Resolve a border-width declaration to a computed length.
fn resolve_border_width(value: &Inheritable<BorderWidth>, inherited: Length) -> Length {
    match value {
        Inheritable::Inherit => inherited,
        Inheritable::Value(BorderWidth::Thin) => Length::px(THIN_PX),
        Inheritable::Value(BorderWidth::Medium) => Length::px(MEDIUM_PX),
        Inheritable::Value(BorderWidth::Thick) => Length::px(THICK_PX),
        Inheritable::Value(BorderWidth::Length(length)) => *length,
    }
}

/// Resolve a border-color declaration; `Current` waits for the § 8.5.2
/// substitution after the loop, expressed here as the computed color of
/// the moment.
fn resolve_border_color(
    value: &Inheritable<BorderColor>,
    inherited: Color,
    current: Color,
) -> Color {
    match value {
        Inheritable::Inherit => inherited,
        Inheritable::Value(BorderColor::Current) => current,
        Inheritable::Value(BorderColor::Color(color)) => *color,
    }
}

/// Apply one winning declaration to the result.
fn apply(
    declaration: &PropertyDeclaration,
    result: &mut ComputedStyle,
    fallback: &ComputedStyle,
    border_color_set: &mut [bool; 4],
) {
    use PropertyDeclaration as Pd;
    match declaration {
        // Handled ahead of the loop.
        Pd::FontSize(_) | Pd::Color(_) => {}

        Pd::BackgroundAttachment(v) => {
            result.background_attachment = resolve(v, &fallback.background_attachment);
        }
        Pd::BackgroundColor(v) => {
            result.background_color = resolve(v, &fallback.background_color);
        }
        Pd::BackgroundImage(v) => {
            result.background_image = resolve(v, &fallback.background_image);
        }
        Pd::BackgroundPosition(v) => {
            result.background_position = resolve(v, &fallback.background_position);
        }
        Pd::BackgroundRepeat(v) => {
            result.background_repeat = resolve(v, &fallback.background_repeat);
        }
        Pd::BorderCollapse(v) => result.border_collapse = resolve(v, &fallback.border_collapse),
        Pd::BorderSpacing(v) => result.border_spacing = resolve(v, &fallback.border_spacing),

        Pd::BorderTopColor(v) => {
            result.border_top_color =
                resolve_border_color(v, fallback.border_top_color, result.color);
            border_color_set[0] = true;
        }
        Pd::BorderRightColor(v) => {
            result.border_right_color =
                resolve_border_color(v, fallback.border_right_color, result.color);
            border_color_set[1] = true;
        }
        Pd::BorderBottomColor(v) => {
            result.border_bottom_color =
                resolve_border_color(v, fallback.border_bottom_color, result.color);
            border_color_set[2] = true;
        }
        Pd::BorderLeftColor(v) => {
            result.border_left_color =
                resolve_border_color(v, fallback.border_left_color, result.color);
            border_color_set[3] = true;
        }

        Pd::BorderTopStyle(v) => result.border_top_style = resolve(v, &fallback.border_top_style),
        Pd::BorderRightStyle(v) => {
            result.border_right_style = resolve(v, &fallback.border_right_style);
        }
        Pd::BorderBottomStyle(v) => {
            result.border_bottom_style = resolve(v, &fallback.border_bottom_style);
        }
        Pd::BorderLeftStyle(v) => {
            result.border_left_style = resolve(v, &fallback.border_left_style);
        }

        Pd::BorderTopWidth(v) => {
            result.border_top_width = resolve_border_width(v, fallback.border_top_width);
        }
        Pd::BorderRightWidth(v) => {
            result.border_right_width = resolve_border_width(v, fallback.border_right_width);
        }
        Pd::BorderBottomWidth(v) => {
            result.border_bottom_width = resolve_border_width(v, fallback.border_bottom_width);
        }
        Pd::BorderLeftWidth(v) => {
            result.border_left_width = resolve_border_width(v, fallback.border_left_width);
        }

        Pd::Top(v) => result.top = resolve(v, &fallback.top),
        Pd::Right(v) => result.right = resolve(v, &fallback.right),
        Pd::Bottom(v) => result.bottom = resolve(v, &fallback.bottom),
        Pd::Left(v) => result.left = resolve(v, &fallback.left),

        Pd::CaptionSide(v) => result.caption_side = resolve(v, &fallback.caption_side),
        Pd::Clear(v) => result.clear = resolve(v, &fallback.clear),
        Pd::Direction(v) => result.direction = resolve(v, &fallback.direction),
        Pd::Display(v) => result.display = resolve(v, &fallback.display),
        Pd::EmptyCells(v) => result.empty_cells = resolve(v, &fallback.empty_cells),
        Pd::Float(v) => result.float = resolve(v, &fallback.float),

        Pd::FontFamily(v) => result.font_family = resolve(v, &fallback.font_family),
        Pd::FontStyle(v) => result.font_style = resolve(v, &fallback.font_style),
        Pd::FontVariant(v) => result.font_variant = resolve(v, &fallback.font_variant),
        Pd::FontWeight(v) => result.font_weight = resolve(v, &fallback.font_weight),

        Pd::Height(v) => result.height = resolve(v, &fallback.height),
        Pd::Width(v) => result.width = resolve(v, &fallback.width),
        Pd::LineHeight(v) => result.line_height = resolve(v, &fallback.line_height),

        Pd::ListStyleImage(v) => {
            result.list_style_image = resolve(v, &fallback.list_style_image);
        }
        Pd::ListStylePosition(v) => {
            result.list_style_position = resolve(v, &fallback.list_style_position);
        }
        Pd::ListStyleType(v) => result.list_style_type = resolve(v, &fallback.list_style_type),

        Pd::MarginTop(v) => result.margin_top = resolve(v, &fallback.margin_top),
        Pd::MarginRight(v) => result.margin_right = resolve(v, &fallback.margin_right),
        Pd::MarginBottom(v) => result.margin_bottom = resolve(v, &fallback.margin_bottom),
        Pd::MarginLeft(v) => result.margin_left = resolve(v, &fallback.margin_left),

        Pd::MaxHeight(v) => result.max_height = resolve(v, &fallback.max_height),
        Pd::MaxWidth(v) => result.max_width = resolve(v, &fallback.max_width),
        Pd::MinHeight(v) => result.min_height = resolve(v, &fallback.min_height),
        Pd::MinWidth(v) => result.min_width = resolve(v, &fallback.min_width),

        Pd::Overflow(v) => result.overflow = resolve(v, &fallback.overflow),

        Pd::PaddingTop(v) => result.padding_top = resolve(v, &fallback.padding_top),
        Pd::PaddingRight(v) => result.padding_right = resolve(v, &fallback.padding_right),
        Pd::PaddingBottom(v) => result.padding_bottom = resolve(v, &fallback.padding_bottom),
        Pd::PaddingLeft(v) => result.padding_left = resolve(v, &fallback.padding_left),

        Pd::Position(v) => result.position = resolve(v, &fallback.position),
        Pd::TableLayout(v) => result.table_layout = resolve(v, &fallback.table_layout),
        Pd::TextAlign(v) => result.text_align = resolve(v, &fallback.text_align),
        Pd::TextDecoration(v) => result.text_decoration = resolve(v, &fallback.text_decoration),
        Pd::TextIndent(v) => result.text_indent = resolve(v, &fallback.text_indent),
        Pd::TextTransform(v) => result.text_transform = resolve(v, &fallback.text_transform),
        Pd::UnicodeBidi(v) => result.unicode_bidi = resolve(v, &fallback.unicode_bidi),
        Pd::VerticalAlign(v) => result.vertical_align = resolve(v, &fallback.vertical_align),
        Pd::Visibility(v) => result.visibility = resolve(v, &fallback.visibility),
        Pd::WhiteSpace(v) => result.white_space = resolve(v, &fallback.white_space),
        Pd::ZIndex(v) => result.z_index = resolve(v, &fallback.z_index),

        // The long-tail block.
        Pd::Clip(v) => result.uncommon_mut().clip = resolve(v, &fallback.uncommon().clip),
        Pd::Content(v) => {
            result.uncommon_mut().content = resolve(v, &fallback.uncommon().content);
        }
        Pd::CounterIncrement(v) => {
            result.uncommon_mut().counter_increment =
                resolve(v, &fallback.uncommon().counter_increment);
        }
        Pd::CounterReset(v) => {
            result.uncommon_mut().counter_reset = resolve(v, &fallback.uncommon().counter_reset);
        }
        Pd::Cursor(v) => result.uncommon_mut().cursor = resolve(v, &fallback.uncommon().cursor),
        Pd::LetterSpacing(v) => {
            result.uncommon_mut().letter_spacing = resolve(v, &fallback.uncommon().letter_spacing);
        }
        Pd::WordSpacing(v) => {
            result.uncommon_mut().word_spacing = resolve(v, &fallback.uncommon().word_spacing);
        }
        Pd::OutlineColor(v) => {
            result.uncommon_mut().outline_color = resolve(v, &fallback.uncommon().outline_color);
        }
        Pd::OutlineStyle(v) => {
            result.uncommon_mut().outline_style = resolve(v, &fallback.uncommon().outline_style);
        }
        Pd::OutlineWidth(v) => {
            result.uncommon_mut().outline_width =
                resolve_border_width(v, fallback.uncommon().outline_width);
        }
        Pd::Quotes(v) => result.uncommon_mut().quotes = resolve(v, &fallback.uncommon().quotes),
    }
}

/// Multiply every `ex` length through the factor and retag it `em`.
///
/// The helpers come in the flavours the value model needs: plain
/// length, length-or-auto, length-or-none, and length-or-normal.
fn convert_ex_units(result: &mut ComputedStyle, factor: Fixed) {
    fn length(length: &mut Length, factor: Fixed) {
        if length.unit == Unit::Ex {
            length.value = length.value * factor;
            length.unit = Unit::Em;
        }
    }
    fn length_auto(value: &mut LengthAuto, factor: Fixed) {
        if let LengthAuto::Length(l) = value {
            length(l, factor);
        }
    }
    fn length_none(value: &mut LengthNone, factor: Fixed) {
        if let LengthNone::Length(l) = value {
            length(l, factor);
        }
    }
    fn length_normal(value: &mut Spacing, factor: Fixed) {
        if let Spacing::Length(l) = value {
            length(l, factor);
        }
    }

    length(&mut result.border_top_width, factor);
    length(&mut result.border_right_width, factor);
    length(&mut result.border_bottom_width, factor);
    length(&mut result.border_left_width, factor);
    length_auto(&mut result.top, factor);
    length_auto(&mut result.right, factor);
    length_auto(&mut result.bottom, factor);
    length_auto(&mut result.left, factor);
    length_auto(&mut result.margin_top, factor);
    length_auto(&mut result.margin_right, factor);
    length_auto(&mut result.margin_bottom, factor);
    length_auto(&mut result.margin_left, factor);
    length(&mut result.padding_top, factor);
    length(&mut result.padding_right, factor);
    length(&mut result.padding_bottom, factor);
    length(&mut result.padding_left, factor);
    length_auto(&mut result.width, factor);
    length_auto(&mut result.height, factor);
    length(&mut result.min_width, factor);
    length(&mut result.min_height, factor);
    length_none(&mut result.max_width, factor);
    length_none(&mut result.max_height, factor);
    length(&mut result.background_position.horizontal, factor);
    length(&mut result.background_position.vertical, factor);
    length(&mut result.border_spacing.horizontal, factor);
    length(&mut result.border_spacing.vertical, factor);
    length(&mut result.text_indent, factor);
    if let VerticalAlign::Length(l) = &mut result.vertical_align {
        length(l, factor);
    }
    if let LineHeight::Length(l) = &mut result.line_height {
        length(l, factor);
    }

    if let Some(uncommon) = &mut result.uncommon {
        length_normal(&mut uncommon.letter_spacing, factor);
        length_normal(&mut uncommon.word_spacing, factor);
        length(&mut uncommon.outline_width, factor);
        if let Clip::Rect(rect) = &mut uncommon.clip {
            for edge in [
                &mut rect.top,
                &mut rect.right,
                &mut rect.bottom,
                &mut rect.left,
            ] {
                if let ClipEdge::Length(l) = edge {
                    length(l, factor);
                }
            }
        }
    }
}

/// Zero the widths of borders whose style is none/hidden, and the
/// outline width when the outline style is none.
fn zero_hidden_borders(result: &mut ComputedStyle) {
    let pairs = [
        (result.border_top_style, &mut result.border_top_width),
        (result.border_right_style, &mut result.border_right_width),
        (result.border_bottom_style, &mut result.border_bottom_width),
        (result.border_left_style, &mut result.border_left_width),
    ];
    for (style, width) in pairs {
        if matches!(style, BorderStyle::None | BorderStyle::Hidden) {
            *width = Length::ZERO;
        }
    }
    if let Some(uncommon) = &mut result.uncommon {
        if matches!(uncommon.outline_style, BorderStyle::None | BorderStyle::Hidden) {
            uncommon.outline_width = Length::ZERO;
        }
    }
}

/// Offset fix-ups.
///
/// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS21/visuren.html#relative-positioning):
/// "If both 'top' and 'bottom' are 'auto', their used values are both
/// '0'... if 'bottom' is 'auto', its used value is minus the value of
/// 'top'." The mirror always prefers the primary edge: `bottom` follows
/// `-top` whenever `top` is set, even when `bottom` was explicit, and
/// `right` follows `-left` the same way. For static boxes the offsets
/// do not apply at all and compute to `auto`.
fn fix_offsets(result: &mut ComputedStyle) {
    match result.position {
        Position::Static => {
            result.top = LengthAuto::Auto;
            result.right = LengthAuto::Auto;
            result.bottom = LengthAuto::Auto;
            result.left = LengthAuto::Auto;
        }
        Position::Relative => {
            match (result.top, result.bottom) {
                (LengthAuto::Auto, LengthAuto::Auto) => {
                    result.top = LengthAuto::Length(Length::ZERO);
                    result.bottom = LengthAuto::Length(Length::ZERO);
                }
                (LengthAuto::Auto, LengthAuto::Length(bottom)) => {
                    result.top = LengthAuto::Length(negate(bottom));
                }
                (LengthAuto::Length(top), _) => {
                    result.bottom = LengthAuto::Length(negate(top));
                }
            }
            match (result.left, result.right) {
                (LengthAuto::Auto, LengthAuto::Auto) => {
                    result.left = LengthAuto::Length(Length::ZERO);
                    result.right = LengthAuto::Length(Length::ZERO);
                }
                (LengthAuto::Auto, LengthAuto::Length(right)) => {
                    result.left = LengthAuto::Length(negate(right));
                }
                (LengthAuto::Length(left), _) => {
                    result.right = LengthAuto::Length(negate(left));
                }
            }
        }
        Position::Absolute | Position::Fixed => {}
    }
}

/// Negate a length, preserving its unit.
fn negate(length: Length) -> Length {
    Length::new(-length.value, length.unit)
}

/// [§ 9.7 Relationships between 'display', 'position', and 'float'](https://www.w3.org/TR/CSS21/visuren.html#dis-pos-flo)
///
/// "1. If 'display' has the value 'none', 'position' and 'float' do not
/// apply. 2. Otherwise, if 'position' has the value 'absolute' or
/// 'fixed'... the computed value of 'float' is 'none', and display is
/// set according to the table. 3. Otherwise, if 'float' has a value
/// other than 'none', 'display' is set according to the table.
/// 4. Otherwise, if the element is the root element, 'display' is set
/// according to the table."
fn fix_display_and_float(result: &mut ComputedStyle, root: bool) {
    if result.display == Display::None {
        return;
    }
    let positioned = matches!(result.position, Position::Absolute | Position::Fixed);
    if positioned || root {
        result.float = Float::None;
    }
    if positioned || result.float != Float::None || root {
        result.display = blockify(result.display);
    }
}

/// The § 9.7 display mapping: "inline-table -> table; inline, run-in,
/// table-row-group, table-column, table-column-group,
/// table-header-group, table-footer-group, table-row, table-cell,
/// table-caption, inline-block -> block; others -> same as specified."
const fn blockify(display: Display) -> Display {
    match display {
        Display::InlineTable => Display::Table,
        Display::Inline
        | Display::RunIn
        | Display::TableRowGroup
        | Display::TableColumn
        | Display::TableColumnGroup
        | Display::TableHeaderGroup
        | Display::TableFooterGroup
        | Display::TableRow
        | Display::TableCell
        | Display::TableCaption
        | Display::InlineBlock => Display::Block,
        other => other,
    }
}
