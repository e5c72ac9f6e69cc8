//! Tree-walking and pretty-printing utilities for client-built ASTs.
//!
//! The core algebra never constructs an AST itself — a grammar's
//! [Reduce](crate::parser::Reduce) steps build whatever structured value the
//! client wants out of [ParseValue](crate::value::ParseValue) results. This
//! module is the generic toolkit those client trees can opt into by
//! implementing [Inspect]: finding nodes, walking them breadth-first,
//! visiting and transforming them, and pretty-printing them, as a
//! capability any client node type can implement, since the result-shape
//! contract this crate exposes is "whatever a reduction built," not one
//! fixed enum.

use std::collections::VecDeque;
use std::fmt::Write as _;

/// One named field of an [Inspect] node, as exposed to [print_tree] and
/// [Inspect::children].
pub enum Field<'a, T> {
    /// A leaf value, already rendered to text (its `Debug`/`Display` form).
    Scalar(String),
    /// A single child node.
    Node(&'a T),
    /// A sequence of child nodes (for variants that hold a list, e.g. the
    /// flattened repetitions [crate::value::rflatten] produces).
    Nodes(&'a [T]),
}

/// Capability trait for a value usable as a tree node by this module's
/// walking, visiting, transforming, and printing utilities.
///
/// Implementors need only describe their own shape: a stable variant name
/// for dispatch and printing, and an enumeration of named fields. Every
/// other operation in this module — [Inspect::children],
/// [walk_breadth_first], [Visitor], [print_tree] — is derived from those
/// two methods.
pub trait Inspect {
    /// Stable name for this node's variant (e.g. `"Add"`, `"Number"`),
    /// used by [print_tree]'s `Name(...)` rendering and by [Visitor]
    /// dispatch.
    fn variant_name(&self) -> &'static str;

    /// This node's named fields in declaration order.
    fn fields(&self) -> Vec<(&'static str, Field<'_, Self>)>
    where
        Self: Sized;

    /// Immediate children, derived from [Inspect::fields] by keeping only
    /// the `Node`/`Nodes` entries and dropping field names and scalars.
    fn children(&self) -> Vec<&Self>
    where
        Self: Sized,
    {
        self.fields()
            .into_iter()
            .flat_map(|(_, field)| match field {
                Field::Scalar(_) => Vec::new(),
                Field::Node(node) => vec![node],
                Field::Nodes(nodes) => nodes.iter().collect(),
            })
            .collect()
    }
}

/// Every node reachable from `root`, in breadth-first order, `root`
/// itself first.
pub fn walk_breadth_first<T: Inspect>(root: &T) -> Vec<&T> {
    let mut order = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        queue.extend(node.children());
    }
    order
}

/// Dispatches on an [Inspect] node's variant name, with a fallback that
/// recurses into children and folds their results together.
///
/// [Visitor::visit_variant] returning `Some(_)` short-circuits the walk for
/// that node; returning `None` falls back to [Visitor::visit] on every
/// child followed by [Visitor::combine], a generic fallback that recurses
/// into children.
pub trait Visitor<T: Inspect> {
    type Output;

    /// Variant-specific handling. Return `None` to fall back to recursing
    /// into children via [Visitor::combine].
    fn visit_variant(&mut self, name: &str, node: &T) -> Option<Self::Output>;

    /// Folds the visited results of `node`'s children into this node's
    /// result, used only when [Visitor::visit_variant] returned `None`.
    fn combine(&mut self, node: &T, child_outputs: Vec<Self::Output>) -> Self::Output;

    fn visit(&mut self, node: &T) -> Self::Output {
        if let Some(output) = self.visit_variant(node.variant_name(), node) {
            return output;
        }
        let child_outputs = node.children().into_iter().map(|child| self.visit(child)).collect();
        self.combine(node, child_outputs)
    }
}

/// The three things a [transform] callback can do with one node: keep a
/// (possibly rebuilt) node, delete it from its parent's child list, or
/// splice a sequence of nodes in its place.
pub enum Transformed<T> {
    Keep(T),
    Delete,
    Splice(Vec<T>),
}

/// Rebuilds an owned tree node, substituting children and reassembling
/// the parent.
///
/// Implemented alongside [Inspect] by owned tree types (see [Tree] for the
/// concrete generic node most grammars can reuse directly) so [transform]
/// can replace a node's children with the transformer's output and hand
/// back a new parent node, without this module needing to know the
/// concrete node layout.
pub trait Rebuild: Inspect + Sized {
    /// Rebuild this node with `children` standing in for whatever
    /// [Inspect::children] originally returned, in the same flattened
    /// order. Scalar fields are carried over unchanged.
    fn with_children(&self, children: Vec<Self>) -> Self;
}

/// Produces a new tree from `node`, applying `transformer` bottom-up:
/// children are transformed first, then `transformer` is asked what to do
/// with `node` itself (rebuilt with the already-transformed children).
///
/// A transformer returning [Transformed::Delete] for a child removes it
/// from its parent's rebuilt child list; [Transformed::Splice] replaces it
/// with zero or more nodes in its place.
pub fn transform<T, F>(node: T, transformer: &mut F) -> Transformed<T>
where
    T: Rebuild + Clone,
    F: FnMut(&T) -> Transformed<T>,
{
    let children: Vec<T> = node.children().into_iter().cloned().collect();
    let mut new_children = Vec::new();
    for child in children {
        match transform(child, transformer) {
            Transformed::Keep(kept) => new_children.push(kept),
            Transformed::Delete => {}
            Transformed::Splice(spliced) => new_children.extend(spliced),
        }
    }
    let rebuilt = node.with_children(new_children);
    transformer(&rebuilt)
}

/// Format hook applied to every node's rendered text: `(node, depth,
/// text) -> text`, letting a caller inject coloring or annotations without
/// [print_tree] knowing anything about terminal styling.
pub type FormatHook<'a, T> = dyn Fn(&T, usize, String) -> String + 'a;

/// Renders `root` as indented, recursion- and depth-guarded text.
///
/// A node already on the current path (by pointer identity) is rendered as
/// `Name(...)` instead of being expanded again, and nodes past `max_depth`
/// are rendered the same way — this is what lets a cyclic or very deep
/// client tree print without overflowing the stack. `format_hook`, if
/// given, post-processes each node's line.
pub fn print_tree<T: Inspect>(root: &T, max_depth: usize, format_hook: Option<&FormatHook<T>>) -> String {
    let mut out = String::new();
    let mut path = Vec::new();
    print_node(root, 0, max_depth, &mut path, format_hook, &mut out);
    out
}

fn print_node<T: Inspect>(
    node: &T,
    depth: usize,
    max_depth: usize,
    path: &mut Vec<*const T>,
    format_hook: Option<&FormatHook<T>>,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    let pointer = node as *const T;
    let is_cycle = path.contains(&pointer);
    let at_depth_limit = depth > max_depth;

    if is_cycle || at_depth_limit {
        let text = format!("{}(...)", node.variant_name());
        let text = apply_hook(format_hook, node, depth, text);
        let _ = writeln!(out, "{}{}", indent, text);
        return;
    }

    let fields = node.fields();
    let scalars: Vec<String> = fields
        .iter()
        .filter_map(|(name, field)| match field {
            Field::Scalar(text) => Some(format!("{}={}", name, text)),
            _ => None,
        })
        .collect();
    let header = if scalars.is_empty() {
        node.variant_name().to_string()
    } else {
        format!("{}({})", node.variant_name(), scalars.join(", "))
    };
    let header = apply_hook(format_hook, node, depth, header);
    let _ = writeln!(out, "{}{}", indent, header);

    path.push(pointer);
    for (_, field) in fields {
        match field {
            Field::Scalar(_) => {}
            Field::Node(child) => print_node(child, depth + 1, max_depth, path, format_hook, out),
            Field::Nodes(children) => {
                for child in children {
                    print_node(child, depth + 1, max_depth, path, format_hook, out);
                }
            }
        }
    }
    path.pop();
}

fn apply_hook<T>(format_hook: Option<&FormatHook<T>>, node: &T, depth: usize, text: String) -> String {
    match format_hook {
        Some(hook) => hook(node, depth, text),
        None => text,
    }
}

/// A minimal, ready-to-use generic tree node: a label, an optional scalar
/// payload, and a flattened sequence of children.
///
/// Most grammars that build a client AST out of
/// [ParseValue](crate::value::ParseValue) reductions don't need a bespoke
/// node enum just to use [print_tree]/[walk_breadth_first]/[Visitor] —
/// `Tree<L, V>` covers that shape directly: `label` names the production
/// that built the node, `value` carries a leaf payload when there is one,
/// and `children` holds whatever sub-trees a [Reduce](crate::parser::Reduce)
/// step assembled from the pieces of a concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<L, V> {
    pub label: L,
    pub value: Option<V>,
    pub children: Vec<Tree<L, V>>,
}

impl<L, V> Tree<L, V> {
    pub fn leaf(label: L, value: V) -> Self {
        Self {
            label,
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn node(label: L, children: Vec<Tree<L, V>>) -> Self {
        Self {
            label,
            value: None,
            children,
        }
    }
}

impl<L, V> Inspect for Tree<L, V>
where
    L: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn variant_name(&self) -> &'static str {
        // `L` is typically a client-defined enum; turning an arbitrary
        // `Debug` impl into a `&'static str` would need to allocate and
        // leak, so the label is surfaced as a scalar field instead (see
        // `fields` below) and every `Tree` node shares this fixed tag.
        "Tree"
    }

    fn fields(&self) -> Vec<(&'static str, Field<'_, Self>)> {
        let mut fields = vec![("label", Field::Scalar(format!("{:?}", self.label)))];
        if let Some(value) = &self.value {
            fields.push(("value", Field::Scalar(format!("{:?}", value))));
        }
        if !self.children.is_empty() {
            fields.push(("children", Field::Nodes(&self.children)));
        }
        fields
    }
}

impl<L, V> Rebuild for Tree<L, V>
where
    L: std::fmt::Debug + Clone,
    V: std::fmt::Debug + Clone,
{
    fn with_children(&self, children: Vec<Self>) -> Self {
        Self {
            label: self.label.clone(),
            value: self.value.clone(),
            children,
        }
    }
}

/// `ptree::print_tree`-compatible rendering for the common acyclic case.
///
/// [print_tree] is this module's own cycle/depth-guarded printer; `ptree`
/// has no such guard, so `Tree` offers both and callers pick the one that
/// fits their grammar.
impl<L, V> ptree::TreeItem for Tree<L, V>
where
    L: std::fmt::Debug + Clone,
    V: std::fmt::Debug + Clone,
{
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _style: &ptree::Style) -> std::io::Result<()> {
        match &self.value {
            Some(value) => write!(f, "{:?}({:?})", self.label, value),
            None => write!(f, "{:?}", self.label),
        }
    }

    fn children(&self) -> std::borrow::Cow<[Self::Child]> {
        std::borrow::Cow::from(&self.children)
    }
}

impl<L, V> Tree<L, V>
where
    L: std::fmt::Debug + Clone,
    V: std::fmt::Debug + Clone,
{
    /// Render to stdout via `ptree`, for the common case of a tree with no
    /// cycles and no need for [print_tree]'s depth guard.
    pub fn print(&self) -> std::io::Result<()> {
        ptree::print_tree(self)
    }
}
