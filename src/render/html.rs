use crate::classifiers::decision_tree::{Model, TreeNode};
use crate::core::Result;
use std::fs;
use std::path::Path;

const STYLE: &str = r#"  * { margin: 0; padding: 0; }
  .tree ul { padding-top: 20px; position: relative; }
  .tree li { white-space: nowrap; float: left; text-align: center; list-style-type: none; position: relative; padding: 20px 5px 0 5px; }
  .tree li::before, .tree li::after { content: ''; position: absolute; top: 0; right: 50%; border-top: 1px solid #ccc; width: 50%; height: 20px; }
  .tree li::after { right: auto; left: 50%; border-left: 1px solid #ccc; }
  .tree li:only-child::after, .tree li:only-child::before { display: none; }
  .tree li:only-child { padding-top: 0; }
  .tree li:first-child::before, .tree li:last-child::after { border: 0 none; }
  .tree li:last-child::before { border-right: 1px solid #ccc; border-radius: 0 5px 0 0; }
  .tree li:first-child::after { border-radius: 5px 0 0 0; }
  .tree ul ul::before { content: ''; position: absolute; top: 0; left: 50%; border-left: 1px solid #ccc; width: 0; height: 20px; }
  .tree li a { border: 1px solid #ccc; padding: 5px 10px; text-decoration: none; color: #666; font-family: arial, verdana, tahoma; font-size: 11px; display: inline-block; border-radius: 5px; }
"#;

/// Standalone HTML page drawing the tree as nested lists.
pub fn to_html(model: &Model) -> String {
    let mut body = String::new();
    if let Some(root) = model.root.as_ref() {
        push_node(&mut body, root);
    }
    format!(
        "<html>\n<head>\n<style type=\"text/css\">\n{STYLE}</style>\n</head>\n<body>\n<div class=\"tree\">{body}</div>\n</body>\n</html>\n"
    )
}

pub fn write_html(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_html(model))?;
    Ok(())
}

fn push_node(out: &mut String, node: &TreeNode) {
    let label = escape(&node.label());
    if node.is_leaf() {
        out.push_str(&format!("<ul><li><a href=\"#\"><b>{label}</b></a></li></ul>"));
        return;
    }
    out.push_str(&format!("<ul><li><a href=\"#\"><b>{label}</b></a><ul>"));
    for (name, child) in [("yes", node.match_branch.as_deref()), ("no", node.no_match.as_deref())] {
        out.push_str(&format!("<li><a href=\"#\">{name}</a>"));
        if let Some(child) = child {
            push_node(out, child);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul></li></ul>");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::decision_tree::train;
    use crate::core::TreeConfig;
    use crate::testing::weather;
    use tempfile::NamedTempFile;

    #[test]
    fn weather_page_shows_splits_and_leaves() {
        let model = train(&weather(), &TreeConfig::new("Play")).unwrap();
        let html = to_html(&model);
        assert!(html.starts_with("<html>"));
        assert!(html.contains("<div class=\"tree\">"));
        assert!(html.contains("<b>Outlook == sunny</b>"));
        assert!(html.contains("<b>Wind == false</b>"));
        assert!(html.contains("<li><a href=\"#\">yes</a>"));
        assert!(html.contains("<li><a href=\"#\">no</a>"));
        assert!(html.contains("<b>no</b>"));
        assert!(html.contains("<b>yes</b>"));
    }

    #[test]
    fn threshold_pivots_print_without_fraction() {
        let rs = vec![
            crate::record! { "t" => 10.0, "label" => "cold" },
            crate::record! { "t" => 30.0, "label" => "hot" },
        ];
        let html = to_html(&train(&rs, &TreeConfig::new("label")).unwrap());
        assert!(html.contains("<b>t &gt;= 30</b>"));
    }

    #[test]
    fn markup_in_values_is_escaped() {
        let rs = vec![
            crate::record! { "tag" => "<b>", "label" => "x&y" },
            crate::record! { "tag" => "plain", "label" => "z" },
        ];
        let html = to_html(&train(&rs, &TreeConfig::new("label")).unwrap());
        assert!(html.contains("tag == &lt;b&gt;"));
        assert!(html.contains("x&amp;y"));
        assert!(!html.contains("<b><b>"));
    }

    #[test]
    fn rootless_model_renders_empty_tree() {
        let model = Model {
            root: None,
            config: TreeConfig::new("label"),
        };
        assert!(to_html(&model).contains("<div class=\"tree\"></div>"));
    }

    #[test]
    fn write_html_creates_file() {
        let model = train(&weather(), &TreeConfig::new("Play")).unwrap();
        let file = NamedTempFile::new().unwrap();
        write_html(&model, file.path()).unwrap();
        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, to_html(&model));
    }
}
