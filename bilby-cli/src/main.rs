//! Bilby CSS inspector
//!
//! Parses stylesheets, builds a synthetic document element, and prints
//! the computed style the engine resolves for it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bilby_common::Interner;
use bilby_css::{
    compose, ComputedStyle, DocumentHandler, Media, Origin, Params, RuleBody, SelectCtx,
    Stylesheet,
};
use bilby_dom::{DomTree, ElementData, NodeId};
use clap::Parser;
use owo_colors::OwoColorize;

/// Bilby CSS inspector - parse stylesheets and compute element styles
#[derive(Parser, Debug)]
#[command(name = "bilby-cli")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compute the style of a bare <div> under site.css
    bilby-cli site.css

    # A specific element with identity and ancestry
    bilby-cli site.css --element p --id intro --class note --ancestors html,body

    # Include an inline style attribute and print JSON
    bilby-cli site.css --inline 'color: red' --json

    # Select for print media with a user-agent sheet underneath
    bilby-cli site.css --ua defaults.css --media print
"#)]
struct Cli {
    /// Author stylesheet files, applied in order
    #[arg(value_name = "CSS", required = true)]
    sheets: Vec<PathBuf>,

    /// User-agent stylesheet file
    #[arg(long, value_name = "CSS")]
    ua: Option<PathBuf>,

    /// User stylesheet file
    #[arg(long, value_name = "CSS")]
    user: Option<PathBuf>,

    /// Media type to select for
    #[arg(long, default_value = "screen")]
    media: String,

    /// Allow parsing quirks (bare hex colors, unitless lengths)
    #[arg(long)]
    quirks: bool,

    /// Element name of the synthetic target element
    #[arg(long, default_value = "div")]
    element: String,

    /// The target element's id attribute
    #[arg(long)]
    id: Option<String>,

    /// Class names on the target element (repeatable)
    #[arg(long = "class")]
    classes: Vec<String>,

    /// Extra attributes on the target element, as name=value (repeatable)
    #[arg(long = "attr", value_name = "NAME=VALUE")]
    attrs: Vec<String>,

    /// Comma-separated ancestor chain, outermost first
    #[arg(long, value_name = "NAMES")]
    ancestors: Option<String>,

    /// An inline style attribute for the target element
    #[arg(long, value_name = "DECLARATIONS")]
    inline: Option<String>,

    /// Print the full computed style as JSON
    #[arg(long)]
    json: bool,

    /// Also print a summary of the parsed rules
    #[arg(long)]
    rules: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let media = Media::from_name(&cli.media)
        .with_context(|| format!("unknown media type '{}'", cli.media))?;
    let interner = Interner::new();

    let mut ctx = SelectCtx::new();
    if let Some(path) = &cli.ua {
        let sheet = load_sheet(path, &interner, cli.quirks)?;
        ctx.append_sheet(sheet, Origin::UserAgent, Media::ALL);
    }
    if let Some(path) = &cli.user {
        let sheet = load_sheet(path, &interner, cli.quirks)?;
        ctx.append_sheet(sheet, Origin::User, Media::ALL);
    }
    for path in &cli.sheets {
        let sheet = load_sheet(path, &interner, cli.quirks)?;
        if cli.rules {
            print_rules(path, &sheet);
        }
        ctx.append_sheet(sheet, Origin::Author, Media::ALL);
    }

    let inline = cli
        .inline
        .as_deref()
        .map(|text| load_inline(text, &interner))
        .transpose()?;

    // Build the synthetic document: ancestor chain, then the target.
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    if let Some(chain) = &cli.ancestors {
        for name in chain.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            parent = tree.append_element(parent, ElementData::new(name));
        }
    }
    let mut element = ElementData::new(&cli.element);
    if let Some(id) = &cli.id {
        element = element.with_id(id);
    }
    for class in &cli.classes {
        element = element.with_class(class);
    }
    for attr in &cli.attrs {
        let (name, value) = attr
            .split_once('=')
            .with_context(|| format!("--attr '{attr}' is not name=value"))?;
        element = element.with_attr(name, value);
    }
    let target = tree.append_element(parent, element);

    let computed = compute_with_ancestry(&ctx, &tree, target, media, inline.as_ref())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&computed)?);
    } else {
        print_summary(&cli.element, &computed);
    }
    Ok(())
}

/// Load and parse a stylesheet file, resolving `@import`s against the
/// filesystem.
fn load_sheet(path: &PathBuf, interner: &Interner, quirks: bool) -> Result<Stylesheet> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        url: path.display().to_string(),
        quirks_allowed: quirks,
        ..Params::default()
    });
    sheet.append_data(&bytes)?;
    match sheet.data_done() {
        Ok(()) => {}
        Err(bilby_common::Error::ImportsPending) => {
            while let Some((url, _)) = sheet.next_pending_import() {
                let child = load_sheet(&PathBuf::from(url.as_str()), interner, quirks)
                    .with_context(|| format!("resolving @import {url}"))?;
                sheet.register_import(child)?;
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(sheet)
}

/// Parse an inline style attribute value.
fn load_inline(text: &str, interner: &Interner) -> Result<Stylesheet> {
    let mut sheet = Stylesheet::new(Params {
        interner: interner.clone(),
        inline_style: true,
        ..Params::default()
    });
    sheet.append_data(text.as_bytes())?;
    sheet.data_done()?;
    Ok(sheet)
}

/// Select and compose down the ancestor chain so inheritance is real.
fn compute_with_ancestry(
    ctx: &SelectCtx,
    tree: &DomTree,
    target: NodeId,
    media: Media,
    inline: Option<&Stylesheet>,
) -> Result<ComputedStyle> {
    // Collect the element chain root-first.
    let mut chain = vec![target];
    let mut cursor = target;
    while let Some(parent) = tree.parent_node(cursor) {
        chain.push(parent);
        cursor = parent;
    }
    chain.reverse();

    let mut parent_style: Option<ComputedStyle> = None;
    for &node in &chain {
        let node_inline = if node == target { inline } else { None };
        let partial = ctx.select_style(node, None, media, node_inline, tree)?;
        let computed = compose(parent_style.as_ref(), &partial, &mut |parent, size| {
            tree.compute_font_size(parent, size)
        })?;
        parent_style = Some(computed);
    }
    parent_style.context("no element to compute")
}

/// Print a one-sheet rule summary.
fn print_rules(path: &std::path::Path, sheet: &Stylesheet) {
    println!(
        "{} {} ({} bytes)",
        "sheet".bold(),
        path.display(),
        sheet.size()
    );
    for id in sheet.rule_ids() {
        let Some(rule) = sheet.rule(id) else { continue };
        match &rule.body {
            RuleBody::Selectors { selectors, style } => println!(
                "  rule #{}: {} selector(s), {} declaration(s)",
                rule.index,
                selectors.len(),
                style.len()
            ),
            other => println!("  rule #{}: @{}", rule.index, other.kind()),
        }
    }
}

/// Print the interesting subset of a computed style.
fn print_summary(element: &str, computed: &ComputedStyle) {
    println!("{} <{}>", "computed style for".bold(), element.green());
    println!("  display:     {:?}", computed.display);
    println!("  position:    {:?}", computed.position);
    println!("  float:       {:?}", computed.float);
    println!(
        "  color:       #{:08x}",
        computed.color.to_rgba()
    );
    println!("  background:  {:?}", computed.background_color);
    println!(
        "  font-size:   {}{:?}",
        computed.font_size.value, computed.font_size.unit
    );
    println!("  font-family: {:?}", computed.font_family);
    println!(
        "  margin:      {:?} {:?} {:?} {:?}",
        computed.margin_top, computed.margin_right, computed.margin_bottom, computed.margin_left
    );
    println!(
        "  padding:     {:?} {:?} {:?} {:?}",
        computed.padding_top,
        computed.padding_right,
        computed.padding_bottom,
        computed.padding_left
    );
    println!(
        "  border:      {:?}/{:?}/{:?}/{:?}",
        computed.border_top_style,
        computed.border_right_style,
        computed.border_bottom_style,
        computed.border_left_style
    );
}
