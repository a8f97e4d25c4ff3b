//! Contains the [`Ast`] produced by the [`crate::parser::Parser`] and its [`Node`]s.
//!
//! The nodes live in an [`Arena`] owned by the tree and refer to each other through [`ID`]s: a
//! node points to its first child and to its next sibling. A node only ever points to nodes that
//! were created after it.

use std::{fmt::Display, ops::Index};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use lisp_base::source_file::{SourceElement, Span};
use lisp_lexical::token::{Operator, Token, TokenKind};

use crate::arena::{Arena, ID};

/// Is an enumeration of the literal kinds an atom can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum AtomKind {
    Operator(Operator),
    Float,
    Int,
    String,
    Symbol,
}

impl AtomKind {
    /// Gets the atom kind of a token kind, if tokens of that kind are atoms.
    #[must_use]
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Operator(operator) => Some(Self::Operator(operator)),
            TokenKind::Float => Some(Self::Float),
            TokenKind::Int => Some(Self::Int),
            TokenKind::String => Some(Self::String),
            TokenKind::Symbol => Some(Self::Symbol),
            _ => None,
        }
    }
}

/// Is an enumeration of the kinds of [`Node`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum NodeKind {
    Error,
    List,
    Quote,
    Atom(AtomKind),
}

/// Represents a single node of the [`Ast`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters, new)]
pub struct Node {
    /// Gets the kind of the node.
    #[get_copy = "pub"]
    kind: NodeKind,

    /// Gets the token anchoring the node: the literal of an atom, the `(` of a list, the `'` of a
    /// quote and the offending token of an error.
    #[get = "pub"]
    token: Token,

    /// Gets the first element of a list or the quoted expression of a quote.
    #[get_copy = "pub"]
    #[new(default)]
    child: Option<ID<Node>>,

    /// Gets the next element of the list containing this node.
    #[get_copy = "pub"]
    #[new(default)]
    sibling: Option<ID<Node>>,
}

impl Node {
    /// Gets the source text of the anchoring token.
    #[must_use]
    pub fn text(&self) -> &str { self.token.span().str() }
}

impl SourceElement for Node {
    fn span(&self) -> Span { self.token.span().clone() }
}

/// The tree of one top-level expression.
///
/// Dropping the tree releases all of its nodes at once; no node is visited on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ast {
    arena: Arena<Node>,
    root: Option<ID<Node>>,
}

impl Ast {
    /// Gets the root node, `None` when the parse produced no node at all.
    #[must_use]
    pub fn root(&self) -> Option<ID<Node>> { self.root }

    /// Gets the node with the given [`ID`].
    #[must_use]
    pub fn get(&self, id: ID<Node>) -> Option<&Node> { self.arena.get(id) }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize { self.arena.len() }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.arena.is_empty() }

    /// Returns an iterator over the elements of a list or the quoted expression of a quote.
    #[must_use]
    pub fn children(&self, id: ID<Node>) -> Children<'_> {
        Children {
            ast: self,
            next: self[id].child,
        }
    }

    /// Returns an iterator visiting the root, its descendants and the nodes threaded after the
    /// root, parents before children, together with their depth.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            ast: self,
            stack: self.root.map(|root| (0, root)).into_iter().collect(),
        }
    }

    /// Renders the tree as an indented listing, one node per line.
    ///
    /// ```text
    /// LIST:
    ///   ATOM: '+'
    ///   ATOM: '1'
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        let mut output = String::new();

        for (depth, id) in self.preorder() {
            let node = &self[id];
            let indent = "  ".repeat(depth);

            let line = match node.kind {
                NodeKind::List => format!("{indent}LIST:\n"),
                NodeKind::Quote => format!("{indent}QUOTE:\n"),
                NodeKind::Atom(_) => format!("{indent}ATOM: '{}'\n", node.text()),
                NodeKind::Error => format!("{indent}ERROR: '{}'\n", node.token.text()),
            };
            output.push_str(&line);
        }

        output
    }

    pub(crate) fn insert(&mut self, node: Node) -> ID<Node> { self.arena.insert(node) }

    pub(crate) fn set_root(&mut self, root: Option<ID<Node>>) { self.root = root; }

    pub(crate) fn set_child(&mut self, parent: ID<Node>, child: Option<ID<Node>>) {
        self.arena[parent].child = child;
    }

    pub(crate) fn set_sibling(&mut self, node: ID<Node>, sibling: ID<Node>) {
        self.arena[node].sibling = Some(sibling);
    }
}

impl Index<ID<Node>> for Ast {
    type Output = Node;

    fn index(&self, id: ID<Node>) -> &Self::Output { &self.arena[id] }
}

impl IntoIterator for Ast {
    type IntoIter = std::vec::IntoIter<Node>;
    type Item = Node;

    /// Consumes the tree, yielding every node exactly once in creation order.
    fn into_iter(self) -> Self::IntoIter { self.arena.into_iter() }
}

/// Renders the root expression back to source text, with single spaces between list elements.
impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        enum Step {
            Node { id: ID<Node>, separated: bool },
            Close,
        }

        let Some(root) = self.root else {
            return Ok(());
        };
        let mut stack = vec![Step::Node {
            id: root,
            separated: false,
        }];

        while let Some(step) = stack.pop() {
            let (id, separated) = match step {
                Step::Close => {
                    f.write_str(")")?;
                    continue;
                }
                Step::Node { id, separated } => (id, separated),
            };

            if separated {
                f.write_str(" ")?;
            }

            let node = &self[id];

            // the siblings of the root are not part of the expression
            if let Some(sibling) = node.sibling.filter(|_| id != root) {
                stack.push(Step::Node {
                    id: sibling,
                    separated: true,
                });
            }

            match node.kind {
                NodeKind::List => {
                    f.write_str("(")?;
                    stack.push(Step::Close);
                }
                NodeKind::Quote => f.write_str("'")?,
                NodeKind::Atom(_) | NodeKind::Error => f.write_str(node.text())?,
            }

            if let Some(child) = node.child {
                stack.push(Step::Node {
                    id: child,
                    separated: false,
                });
            }
        }

        Ok(())
    }
}

/// Iterator over the elements of a list, see [`Ast::children`].
#[derive(Debug, Clone, Copy)]
pub struct Children<'a> {
    ast: &'a Ast,
    next: Option<ID<Node>>,
}

impl Iterator for Children<'_> {
    type Item = ID<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.ast[id].sibling;
        Some(id)
    }
}

/// Iterator walking the tree with an explicit stack, see [`Ast::preorder`].
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    ast: &'a Ast,
    stack: Vec<(usize, ID<Node>)>,
}

impl Iterator for Preorder<'_> {
    type Item = (usize, ID<Node>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = &self.ast[id];

        if let Some(sibling) = node.sibling {
            self.stack.push((depth, sibling));
        }
        if let Some(child) = node.child {
            self.stack.push((depth + 1, child));
        }

        Some((depth, id))
    }
}
