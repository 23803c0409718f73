//! Declarative UI tree produced by the view, plus the diff/patch pair the
//! runtime uses to move a mounted tree from one frame to the next.

use super::Action;

/// Kind of element. Hosts decide how each one is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Children laid out top to bottom.
    Stack,
    /// Children laid out left to right.
    Row,
    Title,
    Button,
    /// A single board cell; its class names the occupant.
    Piece,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub class: Option<&'static str>,
    pub on_click: Option<Action>,
    pub children: Vec<Tree>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Element {
            tag,
            class: None,
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn child(mut self, child: impl Into<Tree>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Tree>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Text(String),
    Element(Element),
}

impl Tree {
    pub fn text(text: impl Into<String>) -> Tree {
        Tree::Text(text.into())
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Text(_) => &[],
            Tree::Element(element) => &element.children,
        }
    }

    /// Node at `path`, where each entry is a child index.
    pub fn node(&self, path: &[usize]) -> Option<&Tree> {
        path.iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    fn node_mut(&mut self, path: &[usize]) -> Option<&mut Tree> {
        let mut node = self;
        for &index in path {
            node = match node {
                Tree::Element(element) => element.children.get_mut(index)?,
                Tree::Text(_) => return None,
            };
        }
        Some(node)
    }

    /// All text below this node, in document order.
    pub fn text_content(&self) -> String {
        match self {
            Tree::Text(text) => text.clone(),
            Tree::Element(element) => element.children.iter().map(Tree::text_content).collect(),
        }
    }
}

impl From<Element> for Tree {
    fn from(element: Element) -> Self {
        Tree::Element(element)
    }
}

impl From<&str> for Tree {
    fn from(text: &str) -> Self {
        Tree::text(text)
    }
}

impl From<String> for Tree {
    fn from(text: String) -> Self {
        Tree::Text(text)
    }
}

/// Replace the subtree at `path` with `tree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOp {
    pub path: Vec<usize>,
    pub tree: Tree,
}

/// Edits that turn one tree into another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Patch {
    ops: Vec<PatchOp>,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }
}

/// Smallest set of subtree replacements turning `old` into `new`.
///
/// Elements with the same tag, class, handler and child count are kept and
/// compared child by child; anything else is replaced whole.
pub fn diff(old: &Tree, new: &Tree) -> Patch {
    let mut ops = Vec::new();
    diff_at(old, new, &mut Vec::new(), &mut ops);
    Patch { ops }
}

fn diff_at(old: &Tree, new: &Tree, path: &mut Vec<usize>, ops: &mut Vec<PatchOp>) {
    if old == new {
        return;
    }
    match (old, new) {
        (Tree::Element(a), Tree::Element(b))
            if a.tag == b.tag
                && a.class == b.class
                && a.on_click == b.on_click
                && a.children.len() == b.children.len() =>
        {
            for (index, (a, b)) in a.children.iter().zip(&b.children).enumerate() {
                path.push(index);
                diff_at(a, b, path, ops);
                path.pop();
            }
        }
        _ => ops.push(PatchOp {
            path: path.clone(),
            tree: new.clone(),
        }),
    }
}

/// Apply `patch` to `tree` in place. Ops whose path no longer exists are skipped.
pub fn apply(tree: &mut Tree, patch: &Patch) {
    for op in &patch.ops {
        if let Some(node) = tree.node_mut(&op.path) {
            *node = op.tree.clone();
        }
    }
}
