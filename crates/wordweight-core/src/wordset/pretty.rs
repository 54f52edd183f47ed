//! Outline rendering of the tree for debugging

use super::node::Node;
use super::WeightedWordSet;

impl WeightedWordSet {
    /// Render the tree as an indented outline
    ///
    /// ```text
    /// +-- quick
    ///   +-L brown
    ///   | +-R fox
    ///   +-R the
    /// ```
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        match self.root.as_deref() {
            Some(root) => write_node(root, '-', "  ", &mut out),
            None => out.push_str("+-- ()\n"),
        }
        out
    }
}

fn write_node(node: &Node, label: char, indent: &str, out: &mut String) {
    out.push_str(&format!("+-{label} {}\n", node.entry.word));

    let children: Vec<(char, &Node)> = [('L', node.left.as_deref()), ('R', node.right.as_deref())]
        .into_iter()
        .filter_map(|(label, child)| child.map(|c| (label, c)))
        .collect();
    let last = children.len().saturating_sub(1);

    for (i, (label, child)) in children.into_iter().enumerate() {
        out.push_str(indent);
        let connector = if i < last { "| " } else { "  " };
        write_node(child, label, &format!("{indent}{connector}"), out);
    }
}
