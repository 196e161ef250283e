//! Allow-list pass over model output before it is rendered live, plus root lookup.
//!
//! The generated markup comes from a third-party model, so anything that can execute
//! code in a host page is removed before preview. The markup is parsed as XML and
//! re-serialized from the filtered tree; input that does not parse yields nothing.
//! Exported files keep the sanitized text as generated.

use roxmltree::{Document, Node, NodeType, ParsingOptions};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

const BLOCKED_ELEMENTS: &[&str] = &["script", "foreignObject", "iframe", "object", "embed"];

const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

/// Removes scripts, foreign HTML islands, inline event handlers, animations that
/// retarget links or handlers, and script URLs in any attribute value.
pub fn harden(markup: &str) -> String {
    let document = match parse(markup) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Generated markup is not well-formed XML, nothing to preview: {e}");
            return String::new();
        }
    };

    let mut out = String::with_capacity(markup.len());
    write_node(document.root_element(), &mut out);
    out
}

/// The outermost `<svg>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRoot {
    pub view_box: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Locates the first `<svg>` element. `None` means the markup has nothing to animate.
pub fn find_svg_root(markup: &str) -> Option<SvgRoot> {
    let document = parse(markup).ok()?;
    let svg = document
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "svg")?;

    Some(SvgRoot {
        view_box: svg.attribute("viewBox").map(str::to_string),
        width: svg.attribute("width").map(str::to_string),
        height: svg.attribute("height").map(str::to_string),
    })
}

fn parse(markup: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(markup, options)
}

fn is_blocked(node: Node) -> bool {
    let name = node.tag_name().name();
    if BLOCKED_ELEMENTS
        .iter()
        .any(|blocked| blocked.eq_ignore_ascii_case(name))
    {
        return true;
    }

    // <animate>/<set> can rewrite a link or a handler after load
    node.attribute("attributeName").is_some_and(|target| {
        let target = target.trim().to_ascii_lowercase();
        target == "href" || target.ends_with(":href") || target.starts_with("on")
    })
}

fn is_script_url(value: &str) -> bool {
    value.split(';').any(|part| {
        let normalized: String = part
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
            .collect::<String>()
            .to_ascii_lowercase();
        SCRIPT_SCHEMES
            .iter()
            .any(|scheme| normalized.starts_with(scheme))
    })
}

fn write_node(node: Node, out: &mut String) {
    match node.node_type() {
        NodeType::Element => write_element(node, out),
        NodeType::Text => escape_into(node.text().unwrap_or_default(), false, out),
        _ => {}
    }
}

fn write_element(node: Node, out: &mut String) {
    if is_blocked(node) {
        return;
    }

    let tag = qualified_name(node, node.tag_name().namespace(), node.tag_name().name(), true);
    out.push('<');
    out.push_str(&tag);

    let parent = node.parent_element();
    for namespace in node.namespaces() {
        if namespace.uri() == XML_NAMESPACE {
            continue;
        }
        let inherited = parent.is_some_and(|parent| {
            parent
                .namespaces()
                .any(|p| p.name() == namespace.name() && p.uri() == namespace.uri())
        });
        if inherited {
            continue;
        }
        match namespace.name() {
            Some(prefix) => out.push_str(&format!(" xmlns:{prefix}=\"")),
            None => out.push_str(" xmlns=\""),
        }
        escape_into(namespace.uri(), true, out);
        out.push('"');
    }

    for attribute in node.attributes() {
        let name = attribute.name();
        if name.len() > 2 && name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on")) {
            continue;
        }

        out.push(' ');
        out.push_str(&qualified_name(node, attribute.namespace(), name, false));
        out.push_str("=\"");
        if is_script_url(attribute.value()) {
            out.push('#');
        } else {
            escape_into(attribute.value(), true, out);
        }
        out.push('"');
    }

    if !node.has_children() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in node.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn qualified_name(node: Node, namespace: Option<&str>, local: &str, element: bool) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };
    if uri == XML_NAMESPACE {
        return format!("xml:{local}");
    }

    let mut prefixed = None;
    for declared in node.namespaces().filter(|declared| declared.uri() == uri) {
        match declared.name() {
            None if element => return local.to_string(),
            Some(prefix) if prefixed.is_none() => prefixed = Some(prefix.to_string()),
            _ => {}
        }
    }

    match prefixed {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_smil_alone() {
        let svg = r#"<svg viewBox="0 0 200 200"><circle r="10"><animate attributeName="r" values="10;20;10" dur="2s" repeatCount="indefinite"/></circle></svg>"#;
        assert_eq!(harden(svg), svg);
    }

    #[test]
    fn keeps_namespace_declarations() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 200 200"><use xlink:href="#dot"/></svg>"##;
        assert_eq!(harden(svg), svg);
    }

    #[test]
    fn removes_scripts() {
        let svg = "<svg><script>alert(1)</script><SCRIPT src='x.js'/><rect/></svg>";
        assert_eq!(harden(svg), "<svg><rect/></svg>");
    }

    #[test]
    fn removes_foreign_objects() {
        let svg = "<svg><foreignObject width='10'><div>hi</div></foreignObject><rect/></svg>";
        assert_eq!(harden(svg), "<svg><rect/></svg>");
    }

    #[test]
    fn removes_every_event_handler() {
        let svg = r#"<svg onload="x()"><rect onclick='y()' ONMOUSEOVER="z()" width="5"/></svg>"#;
        assert_eq!(harden(svg), r#"<svg><rect width="5"/></svg>"#);
    }

    #[test]
    fn removes_handler_after_quoted_angle_bracket() {
        let svg = r#"<svg><rect title=">" onclick="alert(1)"/></svg>"#;
        assert_eq!(harden(svg), r#"<svg><rect title="&gt;"/></svg>"#);
    }

    #[test]
    fn removes_animations_that_retarget_links() {
        let svg = r#"<svg><a><animate attributeName="href" to="javascript:alert(1)"/><rect/></a></svg>"#;
        assert_eq!(harden(svg), "<svg><a><rect/></a></svg>");

        let svg = r#"<svg><rect><set attributeName=" onclick" to="alert(1)"/></rect></svg>"#;
        assert_eq!(harden(svg), "<svg><rect></rect></svg>");
    }

    #[test]
    fn keeps_text_that_looks_like_a_handler() {
        let svg = "<svg><text>bonus onboard = yes &amp; more</text></svg>";
        assert_eq!(harden(svg), svg);
    }

    #[test]
    fn neutralises_script_urls_in_any_attribute() {
        let svg = r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><a href="javascript:alert(1)"><rect/></a><a xlink:href=" JavaScript:void(0)"/><animate attributeName="fill" values="red;java script:alert(1)"/></svg>"#;
        assert_eq!(
            harden(svg),
            r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><a href="#"><rect/></a><a xlink:href="#"/><animate attributeName="fill" values="#"/></svg>"##
        );
    }

    #[test]
    fn entity_expansion_is_filtered_too() {
        let svg = r#"<!DOCTYPE svg [<!ENTITY x "<script>alert(1)</script>">]><svg>&x;<rect/></svg>"#;
        assert!(!harden(svg).contains("script"));
    }

    #[test]
    fn malformed_markup_yields_nothing() {
        assert_eq!(harden("I could not draw that, sorry."), "");
        assert_eq!(harden("<svg><rect></svg>"), "");
    }

    #[test]
    fn finds_root_and_view_box() {
        let root = find_svg_root("<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox='0 0 200 200' width='200'></svg>")
            .unwrap();
        assert_eq!(root.view_box.as_deref(), Some("0 0 200 200"));
        assert_eq!(root.width.as_deref(), Some("200"));
        assert_eq!(root.height, None);
    }

    #[test]
    fn finds_self_closing_root() {
        let root = find_svg_root("<svg/>").unwrap();
        assert_eq!(root.view_box, None);
    }

    #[test]
    fn missing_root_is_none() {
        assert!(find_svg_root("I could not draw that, sorry.").is_none());
        assert!(find_svg_root("<svgx></svgx>").is_none());
    }
}
