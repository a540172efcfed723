use crate::classifiers::decision_tree::{Model, TreeNode};

/// Graphviz source for the tree. Node ids follow depth-first order from `n1`.
pub fn to_dot(model: &Model) -> String {
    let mut writer = DotWriter::default();
    writer.line("digraph dtree {");
    writer.line("  node [shape=box];");
    if let Some(root) = model.root.as_ref() {
        writer.walk(root);
    }
    writer.line("}");
    writer.buf
}

#[derive(Default)]
struct DotWriter {
    next_id: usize,
    buf: String,
}

impl DotWriter {
    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn walk(&mut self, node: &TreeNode) -> usize {
        self.next_id += 1;
        let id = self.next_id;
        let label = quote(&node.label());
        if node.is_leaf() {
            self.line(&format!("  n{id} [label=\"{label}\", shape=oval];"));
            return id;
        }
        self.line(&format!("  n{id} [label=\"{label}\"];"));

        let matched = node.match_branch.as_deref().map(|child| self.walk(child));
        let unmatched = node.no_match.as_deref().map(|child| self.walk(child));
        if let Some(child) = matched {
            self.line(&format!("  n{id} -> n{child} [label=\"yes\"];"));
        }
        if let Some(child) = unmatched {
            self.line(&format!("  n{id} -> n{child} [label=\"no\"];"));
        }
        id
    }
}

fn quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
