//! Text renderings of a huffman tree for anyone who wants to look at it.
//!
//! Only the read-only traversal of `Node` is used here. Turning the DOT output into a picture
//! is left to Graphviz.

use std::fmt::{Debug, Write};

use crate::huffman_coding::tree::Node;

/// Indented outline of the tree, one node per line. Leaves show `symbol:weight`, internal
/// nodes their weight; each line after the root starts with the branch bit that leads to it.
pub fn render_text<S: Debug>(root: &Node<S>) -> String {
    let mut out = String::new();
    outline(root, 0, None, &mut out);
    out
}

fn outline<S: Debug>(node: &Node<S>, depth: usize, label: Option<char>, out: &mut String) {
    let indent = "  ".repeat(depth);
    let edge = label.map(|c| format!("{}-> ", c)).unwrap_or_default();
    match node {
        Node::Leaf { symbol, weight } => {
            let _ = writeln!(out, "{}{}{:?}:{}", indent, edge, symbol, weight);
        }
        Node::Internal { weight, zero, one } => {
            let _ = writeln!(out, "{}{}{}", indent, edge, weight);
            outline(zero, depth + 1, Some('0'), out);
            outline(one, depth + 1, Some('1'), out);
        }
    }
}

/// Graphviz DOT description of the tree. Node ids are assigned in pre-order, edges carry
/// their branch bit as the label.
pub fn render_dot<S: Debug>(root: &Node<S>) -> String {
    let mut out = String::from("graph huffman {\n");
    let mut next_id = 0;
    dot_node(root, None, &mut next_id, &mut out);
    out.push_str("}\n");
    out
}

fn dot_node<S: Debug>(
    node: &Node<S>,
    parent: Option<(usize, char)>,
    next_id: &mut usize,
    out: &mut String,
) {
    let id = *next_id;
    *next_id += 1;

    let label = match node {
        Node::Leaf { symbol, weight } => format!("{:?}:{}", symbol, weight),
        Node::Internal { weight, .. } => weight.to_string(),
    };
    let _ = writeln!(out, "  n{} [label=\"{}\"];", id, escape(&label));
    if let Some((parent_id, bit)) = parent {
        let _ = writeln!(out, "  n{} -- n{} [label=\"{}\"];", parent_id, id, bit);
    }

    if let Some(children) = node.children() {
        for (branch, child) in children {
            dot_node(child, Some((id, branch.label())), next_id, out);
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
