//! A small host compiler tree for driving the folder end to end.
//!
//! Node shapes mirror what a statement-oriented host IR hands the folder:
//! receiver-style operator calls, `when` ladders, `while` loops, blocks of
//! `val`/assignment statements and early returns.

use rustc_hash::FxHashMap;

use fold_driver::{HostAdapter, HostFunction, HostNode, HostStmt};
use fold_ir::Literal;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Const(Literal),
    Get(String),
    Call {
        callee: String,
        receiver: Option<Box<Node>>,
        args: Vec<Node>,
    },
    When {
        arms: Vec<(Node, Node)>,
        otherwise: Option<Box<Node>>,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
    Block(Vec<Statement>),
    Return(Box<Node>),
    Lambda(Vec<Node>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Expr(Node),
    Val(String, Option<Node>),
    Set(String, Node),
}

struct Function {
    params: Vec<String>,
    body: Node,
}

#[derive(Default)]
pub struct TestHost {
    functions: FxHashMap<String, Function>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(mut self, name: &str, params: &[&str], body: Node) -> Self {
        self.functions.insert(
            name.to_owned(),
            Function {
                params: params.iter().map(|p| (*p).to_owned()).collect(),
                body,
            },
        );
        self
    }
}

impl HostAdapter for TestHost {
    type Node = Node;

    fn view<'n>(&'n self, node: &'n Node) -> HostNode<'n, Node> {
        match node {
            Node::Const(lit) => HostNode::Literal(lit.clone()),
            Node::Get(name) => HostNode::Var(name.as_str()),
            Node::Call {
                callee,
                receiver,
                args,
            } => HostNode::Call {
                callee: callee.as_str(),
                receiver: receiver.as_deref(),
                args: args.iter().collect(),
            },
            Node::When { arms, otherwise } => HostNode::Conditional {
                branches: arms.iter().map(|(c, r)| (c, r)).collect(),
                else_result: otherwise.as_deref(),
            },
            Node::While { condition, body } => HostNode::Loop {
                condition: &**condition,
                body: &**body,
            },
            Node::Block(stmts) => HostNode::Block(
                stmts
                    .iter()
                    .map(|stmt| match stmt {
                        Statement::Expr(expr) => HostStmt::Expr(expr),
                        Statement::Val(name, init) => HostStmt::VarDecl {
                            name: name.as_str(),
                            init: init.as_ref(),
                        },
                        Statement::Set(name, value) => HostStmt::Assign {
                            name: name.as_str(),
                            value,
                        },
                    })
                    .collect(),
            ),
            Node::Return(value) => HostNode::Return(&**value),
            Node::Lambda(children) => HostNode::Opaque(children.iter().collect()),
        }
    }

    fn function(&self, name: &str) -> Option<HostFunction<'_, Node>> {
        self.functions.get(name).map(|f| HostFunction {
            params: f.params.iter().map(String::as_str).collect(),
            body: &f.body,
        })
    }

    fn make_literal(&self, value: &Literal, _original: &Node) -> Node {
        Node::Const(value.clone())
    }
}

// Builders

pub fn int(v: i64) -> Node {
    Node::Const(Literal::Int(v))
}

pub fn text(s: &str) -> Node {
    Node::Const(Literal::string(s))
}

pub fn boolean(b: bool) -> Node {
    Node::Const(Literal::Bool(b))
}

pub fn get(name: &str) -> Node {
    Node::Get(name.to_owned())
}

pub fn call(callee: &str, args: Vec<Node>) -> Node {
    Node::Call {
        callee: callee.to_owned(),
        receiver: None,
        args,
    }
}

/// `receiver.op(args...)`
pub fn method(receiver: Node, op: &str, args: Vec<Node>) -> Node {
    Node::Call {
        callee: op.to_owned(),
        receiver: Some(Box::new(receiver)),
        args,
    }
}

/// `left.op(right)`
pub fn op(left: Node, op: &str, right: Node) -> Node {
    method(left, op, vec![right])
}

pub fn when(arms: Vec<(Node, Node)>, otherwise: Option<Node>) -> Node {
    Node::When {
        arms,
        otherwise: otherwise.map(Box::new),
    }
}

pub fn while_loop(condition: Node, body: Vec<Statement>) -> Node {
    Node::While {
        condition: Box::new(condition),
        body: Box::new(Node::Block(body)),
    }
}

pub fn block(stmts: Vec<Statement>) -> Node {
    Node::Block(stmts)
}

pub fn ret(value: Node) -> Node {
    Node::Return(Box::new(value))
}

pub fn expr(node: Node) -> Statement {
    Statement::Expr(node)
}

pub fn val(name: &str, init: Node) -> Statement {
    Statement::Val(name.to_owned(), Some(init))
}

pub fn set(name: &str, value: Node) -> Statement {
    Statement::Set(name.to_owned(), value)
}

/// `println(arg)`: a call the folder must leave alone.
pub fn println(arg: Node) -> Node {
    call("println", vec![arg])
}
