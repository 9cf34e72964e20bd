//! Static markup export of a document snapshot.

use std::fmt::Write as _;

use crate::document::Snapshot;
use crate::element::{Element, ElementKind};

/// Emits standalone HTML for a snapshot.
///
/// Hidden elements are skipped. Elements are written back to front so that
/// document order agrees with the stacking order, and every element also
/// carries its z value explicitly.
pub fn generate_markup(snapshot: &Snapshot) -> String {
    let mut html = String::from("<section class=\"builder-export\" style=\"position: relative;\">\n");

    for element in snapshot.display_order().into_iter().rev() {
        if !element.visible {
            continue;
        }
        let z = snapshot.layers.get(element.id).unwrap_or_default();
        write_element(&mut html, element, z);
    }

    html.push_str("</section>\n");
    html
}

/// Serializes a snapshot as pretty-printed JSON
pub fn export_json(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

fn write_element(html: &mut String, element: &Element, z: i32) {
    let content = element.content.as_deref().map(escape).unwrap_or_default();

    let mut attrs = format!(
        " class=\"builder-{}\" data-element-id=\"{}\" style=\"{}\"",
        element.kind.id(),
        element.id,
        escape(&style_attribute(element, z)),
    );
    if let Some(preset) = element.animation {
        let _ = write!(
            attrs,
            " data-animation=\"{}\" data-animation-delay=\"{}s\"",
            preset.id(),
            element.animation_delay
        );
    }

    let _ = match element.kind {
        ElementKind::Heading => writeln!(html, "  <h2{attrs}>{content}</h2>"),
        ElementKind::Paragraph => writeln!(html, "  <p{attrs}>{content}</p>"),
        ElementKind::Image => writeln!(html, "  <img{attrs} src=\"{content}\" alt=\"\">"),
        ElementKind::Button => writeln!(html, "  <button{attrs}>{content}</button>"),
        ElementKind::Hero => writeln!(html, "  <header{attrs}><h1>{content}</h1></header>"),
        ElementKind::Feature => writeln!(html, "  <article{attrs}><h3>{content}</h3></article>"),
        ElementKind::Testimonial => writeln!(html, "  <blockquote{attrs}>{content}</blockquote>"),
        ElementKind::Gallery => writeln!(html, "  <div{attrs} role=\"list\">{content}</div>"),
        ElementKind::Parallax => writeln!(html, "  <div{attrs} data-parallax>{content}</div>"),
        ElementKind::Counter => writeln!(html, "  <span{attrs}>{content}</span>"),
        ElementKind::Video => writeln!(html, "  <video{attrs} controls title=\"{content}\"></video>"),
        ElementKind::Form => writeln!(
            html,
            "  <form{attrs}><h3>{content}</h3><input type=\"email\" name=\"email\"><button type=\"submit\">Send</button></form>"
        ),
        ElementKind::Divider => writeln!(html, "  <hr{attrs}>"),
        ElementKind::Spacer => writeln!(html, "  <div{attrs} aria-hidden=\"true\"></div>"),
    };
}

fn style_attribute(element: &Element, z: i32) -> String {
    let mut style = String::new();
    if let Some(pos) = element.position {
        let _ = write!(style, "position: absolute; left: {}px; top: {}px; ", pos.x, pos.y);
    }
    let _ = write!(style, "z-index: {z};");
    for (property, value) in &element.styles {
        let _ = write!(style, " {property}: {value};");
    }
    style
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPreset;
    use crate::document::Document;
    use crate::template::TemplateId;

    #[test]
    fn test_markup_follows_stacking_order() {
        let mut doc = Document::new(TemplateId::Blank);
        let button = doc.add_element(ElementKind::Button, None);
        let heading = doc.add_element(ElementKind::Heading, None);
        doc.move_to_bottom(heading).unwrap();

        let html = generate_markup(&doc.snapshot());
        let heading_at = html.find("<h2").unwrap();
        let button_at = html.find("<button").unwrap();
        assert!(heading_at < button_at);
        assert!(html.contains(&format!("data-element-id=\"{button}\"")));
    }

    #[test]
    fn test_markup_escapes_content_and_skips_hidden() {
        let mut doc = Document::new(TemplateId::Blank);
        let p = doc.add_element(ElementKind::Paragraph, None);
        doc.rename_element(p, "<script>alert('x')</script>").unwrap();
        let spacer = doc.add_element(ElementKind::Spacer, None);
        doc.toggle_visibility(spacer).unwrap();

        let html = generate_markup(&doc.snapshot());
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("builder-spacer"));
    }

    #[test]
    fn test_markup_carries_animation_binding() {
        let mut doc = Document::new(TemplateId::Blank);
        let id = doc.add_element(ElementKind::Counter, None);
        doc.apply_animation(id, Some(AnimationPreset::Bounce)).unwrap();
        doc.update_animation_delay(id, 0.25).unwrap();

        let html = generate_markup(&doc.snapshot());
        assert!(html.contains("data-animation=\"bounce\" data-animation-delay=\"0.25s\""));
    }

    #[test]
    fn test_export_json_lists_elements() {
        let doc = Document::new(TemplateId::Minimal);
        let json = export_json(&doc.snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["elements"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["elements"][0]["kind"], "heading");
        assert_eq!(value["elements"][0]["animation"], "fadeIn");
    }
}
