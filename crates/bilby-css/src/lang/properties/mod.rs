//! Per-property value parsers.
//!
//! [CSS 2.1 Appendix F: Full property table](https://www.w3.org/TR/CSS21/propidx.html)
//!
//! One handler per CSS 2.1 visual property. Handlers share the same
//! shape: `inherit` produces an [`Inheritable::Inherit`] declaration;
//! otherwise the value grammar is decoded into typed longhand
//! declarations. Shorthands accept their components in any order and
//! expand into one declaration per longhand, defaulting omitted
//! components to their initial values.
//!
//! Aural and paged-media properties are not handled; their declarations
//! fall through to the unknown-property path and are discarded.

mod background;
mod border;
mod box_model;
mod font;
mod generated;
mod list;
mod table;
mod text;

use bilby_common::{Atom, Error, Result};

use crate::style::{Declaration, Inheritable, PropertyDeclaration};
use crate::tokenizer::Token;

use super::value::{Cursor, Env};

/// Parse one declaration's value into longhand declarations.
///
/// # Errors
///
/// [`Error::Invalid`] for an unknown property or a value that does not
/// match the property grammar; the caller discards the declaration.
pub(crate) fn parse_declaration(
    env: &mut Env<'_>,
    property: &Atom,
    tokens: &[Token],
) -> Result<Vec<Declaration>> {
    let name = property.as_str().to_ascii_lowercase();
    let mut cursor = Cursor::new(tokens);
    cursor.skip_ws();
    let values = dispatch(&mut cursor, env, &name)?;
    cursor.skip_ws();
    // Trailing junk invalidates the whole declaration.
    if !cursor.finished() {
        return Err(Error::Invalid);
    }
    Ok(values.into_iter().map(Declaration::new).collect())
}

/// Route a property name to its handler.
fn dispatch(
    cursor: &mut Cursor<'_>,
    env: &mut Env<'_>,
    name: &str,
) -> Result<Vec<PropertyDeclaration>> {
    match name {
        // Backgrounds [§ 14.2]
        "background-attachment" => one(background::attachment(cursor)),
        "background-color" => one(background::color(cursor, env)),
        "background-image" => one(background::image(cursor, env)),
        "background-position" => one(background::position(cursor, env)),
        "background-repeat" => one(background::repeat(cursor)),
        "background" => background::shorthand(cursor, env),

        // Borders and outlines [§ 8.5, § 18.4]
        "border-top-color" => one(border::side_color(cursor, env, border::Side::Top)),
        "border-right-color" => one(border::side_color(cursor, env, border::Side::Right)),
        "border-bottom-color" => one(border::side_color(cursor, env, border::Side::Bottom)),
        "border-left-color" => one(border::side_color(cursor, env, border::Side::Left)),
        "border-top-style" => one(border::side_style(cursor, border::Side::Top)),
        "border-right-style" => one(border::side_style(cursor, border::Side::Right)),
        "border-bottom-style" => one(border::side_style(cursor, border::Side::Bottom)),
        "border-left-style" => one(border::side_style(cursor, border::Side::Left)),
        "border-top-width" => one(border::side_width(cursor, env, border::Side::Top)),
        "border-right-width" => one(border::side_width(cursor, env, border::Side::Right)),
        "border-bottom-width" => one(border::side_width(cursor, env, border::Side::Bottom)),
        "border-left-width" => one(border::side_width(cursor, env, border::Side::Left)),
        "border-color" => border::color_shorthand(cursor, env),
        "border-style" => border::style_shorthand(cursor),
        "border-width" => border::width_shorthand(cursor, env),
        "border-top" => border::side_shorthand(cursor, env, border::Side::Top),
        "border-right" => border::side_shorthand(cursor, env, border::Side::Right),
        "border-bottom" => border::side_shorthand(cursor, env, border::Side::Bottom),
        "border-left" => border::side_shorthand(cursor, env, border::Side::Left),
        "border" => border::shorthand(cursor, env),
        "outline-color" => one(border::outline_color(cursor, env)),
        "outline-style" => one(border::outline_style(cursor)),
        "outline-width" => one(border::outline_width(cursor, env)),
        "outline" => border::outline_shorthand(cursor, env),

        // Box model [§ 8, § 9, § 10, § 11]
        "margin-top" => one(box_model::margin(cursor, env, box_model::Edge::Top)),
        "margin-right" => one(box_model::margin(cursor, env, box_model::Edge::Right)),
        "margin-bottom" => one(box_model::margin(cursor, env, box_model::Edge::Bottom)),
        "margin-left" => one(box_model::margin(cursor, env, box_model::Edge::Left)),
        "margin" => box_model::margin_shorthand(cursor, env),
        "padding-top" => one(box_model::padding(cursor, env, box_model::Edge::Top)),
        "padding-right" => one(box_model::padding(cursor, env, box_model::Edge::Right)),
        "padding-bottom" => one(box_model::padding(cursor, env, box_model::Edge::Bottom)),
        "padding-left" => one(box_model::padding(cursor, env, box_model::Edge::Left)),
        "padding" => box_model::padding_shorthand(cursor, env),
        "top" => one(box_model::offset(cursor, env, box_model::Edge::Top)),
        "right" => one(box_model::offset(cursor, env, box_model::Edge::Right)),
        "bottom" => one(box_model::offset(cursor, env, box_model::Edge::Bottom)),
        "left" => one(box_model::offset(cursor, env, box_model::Edge::Left)),
        "width" => one(box_model::width(cursor, env)),
        "height" => one(box_model::height(cursor, env)),
        "min-width" => one(box_model::min_width(cursor, env)),
        "min-height" => one(box_model::min_height(cursor, env)),
        "max-width" => one(box_model::max_width(cursor, env)),
        "max-height" => one(box_model::max_height(cursor, env)),
        "display" => one(box_model::display(cursor)),
        "position" => one(box_model::position(cursor)),
        "float" => one(box_model::float(cursor)),
        "clear" => one(box_model::clear(cursor)),
        "z-index" => one(box_model::z_index(cursor)),
        "direction" => one(box_model::direction(cursor)),
        "unicode-bidi" => one(box_model::unicode_bidi(cursor)),
        "overflow" => one(box_model::overflow(cursor)),
        "visibility" => one(box_model::visibility(cursor)),
        "clip" => one(box_model::clip(cursor, env)),
        "vertical-align" => one(box_model::vertical_align(cursor, env)),

        // Fonts [§ 15]
        "font-family" => one(font::family(cursor, env)),
        "font-size" => one(font::size(cursor, env)),
        "font-style" => one(font::style(cursor)),
        "font-variant" => one(font::variant(cursor)),
        "font-weight" => one(font::weight(cursor)),
        "font" => font::shorthand(cursor, env),

        // Text [§ 16] and color [§ 14.1]
        "color" => one(text::color(cursor, env)),
        "letter-spacing" => one(text::letter_spacing(cursor, env)),
        "word-spacing" => one(text::word_spacing(cursor, env)),
        "line-height" => one(text::line_height(cursor, env)),
        "text-align" => one(text::text_align(cursor)),
        "text-decoration" => one(text::text_decoration(cursor)),
        "text-indent" => one(text::text_indent(cursor, env)),
        "text-transform" => one(text::text_transform(cursor)),
        "white-space" => one(text::white_space(cursor)),

        // Lists [§ 12.5]
        "list-style-type" => one(list::style_type(cursor)),
        "list-style-position" => one(list::style_position(cursor)),
        "list-style-image" => one(list::style_image(cursor, env)),
        "list-style" => list::shorthand(cursor, env),

        // Tables [§ 17]
        "border-collapse" => one(table::border_collapse(cursor)),
        "border-spacing" => one(table::border_spacing(cursor, env)),
        "caption-side" => one(table::caption_side(cursor)),
        "empty-cells" => one(table::empty_cells(cursor)),
        "table-layout" => one(table::table_layout(cursor)),

        // Generated content and UI [§ 12, § 18]
        "content" => one(generated::content(cursor, env)),
        "counter-increment" => one(generated::counter_increment(cursor)),
        "counter-reset" => one(generated::counter_reset(cursor)),
        "quotes" => one(generated::quotes(cursor)),
        "cursor" => one(generated::cursor_prop(cursor, env)),

        _ => Err(Error::Invalid),
    }
}

/// Wrap a single-longhand result.
fn one(decl: Result<PropertyDeclaration>) -> Result<Vec<PropertyDeclaration>> {
    decl.map(|d| vec![d])
}

/// Handle the `inherit` keyword shared by every longhand grammar.
pub(super) fn parse_inheritable<T>(
    cursor: &mut Cursor<'_>,
    parse: impl FnOnce(&mut Cursor<'_>) -> Result<T>,
) -> Result<Inheritable<T>> {
    if cursor.try_keyword("inherit") {
        Ok(Inheritable::Inherit)
    } else {
        parse(cursor).map(Inheritable::Value)
    }
}

/// Expand 1-4 box values into `[top, right, bottom, left]`.
///
/// [§ 8.3](https://www.w3.org/TR/CSS21/box.html#margin-properties)
/// "If there is only one component value, it applies to all sides. If
/// there are two values, the top and bottom... are set to the first
/// value and the right and left... are set to the second. If there are
/// three... If there are four values, they apply to the top, right,
/// bottom, and left, respectively."
pub(super) fn box_sides<T: Clone>(values: &[T]) -> Result<[T; 4]> {
    match values {
        [all] => Ok([all.clone(), all.clone(), all.clone(), all.clone()]),
        [vertical, horizontal] => Ok([
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ]),
        [top, horizontal, bottom] => Ok([
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ]),
        [top, right, bottom, left] => {
            Ok([top.clone(), right.clone(), bottom.clone(), left.clone()])
        }
        _ => Err(Error::Invalid),
    }
}
