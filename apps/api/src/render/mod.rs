//! Plain-text formatting of resources and the printable HTML document.

use std::fmt::Write;

use crate::models::Resource;

/// Formats one resource as an indented bullet block followed by a blank line.
pub fn format_resource(resource: &Resource) -> String {
    let mut out = format!("• {}\n", resource.name);
    let _ = writeln!(out, "  📍 {}", resource.address);
    if let Some(phone) = &resource.phone {
        let _ = writeln!(out, "  📞 {phone}");
    }
    if let Some(hours) = &resource.hours {
        let _ = writeln!(out, "  🕒 {hours}");
    }
    if let Some(rating) = resource.rating {
        let _ = writeln!(out, "  ⭐ {rating:.1}");
    }
    if let Some(next_steps) = &resource.next_steps {
        let _ = writeln!(out, "  ➤ NEXT STEPS: {next_steps}");
    }
    out.push('\n');
    out
}

/// `{heading}:` then a blank line, then every resource block.
pub fn format_section(heading: &str, resources: &[Resource]) -> String {
    let mut out = format!("{heading}:\n\n");
    for resource in resources {
        out.push_str(&format_resource(resource));
    }
    out
}

/// A bulleted list under a heading, no trailing blank line.
pub fn format_bullets(heading: &str, items: &[&str]) -> String {
    let mut out = format!("{heading}:\n");
    let lines: Vec<String> = items.iter().map(|item| format!("• {item}")).collect();
    out.push_str(&lines.join("\n"));
    out
}

/// Printable page for the displayed recommendations.
/// The text is escaped so the page shows exactly the characters on screen.
pub fn print_document(text: &str) -> String {
    format!(
        r#"<html>
  <head><title>Resource Recommendations</title></head>
  <body style="font-family: Arial, sans-serif; padding: 20px;">
    <h1>Social Services Resource Recommendations</h1>
    <pre style="white-space: pre-wrap; font-family: Arial;">{}</pre>
  </body>
</html>
"#,
        escape_html(text)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resource_full() {
        let r = Resource::listed("Pantry", "1 Main St", "(555) 000-0000", "Daily", "Walk in.");
        assert_eq!(
            format_resource(&r),
            "• Pantry\n  📍 1 Main St\n  📞 (555) 000-0000\n  🕒 Daily\n  ➤ NEXT STEPS: Walk in.\n\n"
        );
    }

    #[test]
    fn test_format_resource_omits_missing_lines() {
        let r = Resource {
            name: "Clinic".into(),
            address: "2 Elm St".into(),
            phone: None,
            hours: None,
            next_steps: None,
            rating: Some(4.26),
        };
        assert_eq!(format_resource(&r), "• Clinic\n  📍 2 Elm St\n  ⭐ 4.3\n\n");
    }

    #[test]
    fn test_format_bullets() {
        assert_eq!(format_bullets("LIST", &["a", "b"]), "LIST:\n• a\n• b");
    }

    #[test]
    fn test_print_document_preserves_text() {
        let doc = print_document("Bring ID & lease <required>\nLine two");
        assert!(doc.contains("<title>Resource Recommendations</title>"));
        assert!(doc.contains("<h1>Social Services Resource Recommendations</h1>"));
        assert!(doc.contains("Bring ID &amp; lease &lt;required&gt;\nLine two"));
    }
}
