//! Contains the [`evaluate`] function reducing a tree to an [`Evaluation`].

use derive_more::Display;
use enum_as_inner::EnumAsInner;
use lisp_base::source_file::SourceElement;
use lisp_lexical::token::Operator;
use lisp_syntax::{
    arena::ID,
    syntax_tree::{Ast, AtomKind, Children, Node, NodeKind},
};

use crate::error::{Error, InvalidLiteral, NotANumber, Overflow};

/// Is the result of evaluating a tree.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, EnumAsInner)]
pub enum Evaluation {
    /// A sum of integers only.
    #[display(fmt = "{}", _0)]
    Int(i64),

    /// A sum with at least one float operand.
    #[display(fmt = "{:?}", _0)]
    Float(f64),

    /// The tree is not a sum and is left to the caller.
    #[display(fmt = "tree")]
    Tree,
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl From<Number> for Evaluation {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(value) => Self::Int(value),
            Number::Float(value) => Self::Float(value),
        }
    }
}

impl Number {
    fn from_node(node: &Node) -> Result<Self, Error> {
        match node.kind() {
            NodeKind::Atom(AtomKind::Int) => node
                .text()
                .parse()
                .map(Self::Int)
                .map_err(|_| InvalidLiteral { span: node.span() }.into()),
            NodeKind::Atom(AtomKind::Float) => node
                .text()
                .parse()
                .map(Self::Float)
                .map_err(|_| InvalidLiteral { span: node.span() }.into()),
            _ => Err(NotANumber { span: node.span() }.into()),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn add(self, other: Self, operand: &Node) -> Result<Self, Error> {
        match (self, other) {
            (Self::Int(lhs), Self::Int(rhs)) => lhs
                .checked_add(rhs)
                .map(Self::Int)
                .ok_or_else(|| Overflow { span: operand.span() }.into()),
            (Self::Int(lhs), Self::Float(rhs)) => Ok(Self::Float(lhs as f64 + rhs)),
            (Self::Float(lhs), Self::Int(rhs)) => Ok(Self::Float(lhs + rhs as f64)),
            (Self::Float(lhs), Self::Float(rhs)) => Ok(Self::Float(lhs + rhs)),
        }
    }
}

/// A sum whose operands are being added.
struct Frame<'a> {
    list: ID<Node>,
    operands: Children<'a>,
    total: Number,
}

impl<'a> Frame<'a> {
    fn new(list: ID<Node>, operands: Children<'a>) -> Self {
        Self {
            list,
            operands,
            total: Number::Int(0),
        }
    }
}

/// Returns the operands of the list if the node is a list starting with `+`.
fn sum_operands(ast: &Ast, id: ID<Node>) -> Option<Children<'_>> {
    if ast[id].kind() != NodeKind::List {
        return None;
    }

    let mut elements = ast.children(id);
    let head = &ast[elements.next()?];

    let is_sum = match head.kind() {
        NodeKind::Atom(AtomKind::Operator(Operator::Sum)) => true,
        NodeKind::Atom(AtomKind::Symbol) => head.text() == "+",
        _ => false,
    };

    is_sum.then_some(elements)
}

/// Evaluates the root expression of the tree.
///
/// A list starting with `+` sums the remaining elements, which are numbers or sums themselves.
/// Integers are added as `i64`; a single float operand makes the whole sum a float. Any other
/// tree evaluates to [`Evaluation::Tree`].
///
/// # Errors
///
/// - [`Error::NotANumber`] if an operand of a sum is neither a number nor a sum.
/// - [`Error::Overflow`] if the integer sum does not fit in an `i64`.
/// - [`Error::InvalidLiteral`] if an integer literal does not fit in an `i64`.
pub fn evaluate(ast: &Ast) -> Result<Evaluation, Error> {
    let Some(root) = ast.root() else {
        return Ok(Evaluation::Tree);
    };
    let Some(operands) = sum_operands(ast, root) else {
        return Ok(Evaluation::Tree);
    };

    // nested sums are walked with an explicit stack of the enclosing sums
    let mut current = Frame::new(root, operands);
    let mut parents = Vec::new();

    loop {
        if let Some(id) = current.operands.next() {
            if let Some(nested) = sum_operands(ast, id) {
                parents.push(std::mem::replace(&mut current, Frame::new(id, nested)));
            } else {
                let operand = &ast[id];
                current.total = current.total.add(Number::from_node(operand)?, operand)?;
            }
            continue;
        }

        let Some(mut parent) = parents.pop() else {
            return Ok(current.total.into());
        };
        parent.total = parent.total.add(current.total, &ast[current.list])?;
        current = parent;
    }
}
