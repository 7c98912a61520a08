use crate::parser::{Postfix, Token};
use crate::symbols::Operator;
use crate::truth_table::{ColumnId, TableError, TruthTable};
use log::{debug, warn};
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("operator '{operator}' at postfix position {position} is missing an operand")]
    StackUnderflow { operator: char, position: usize },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("a function vector of {rows} rows does not fit in 128 bits")]
    VectorTooWide { rows: usize },
}

/// Index of a sub-expression in an [`ExprGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl ExprId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Structural identity of a sub-expression; children refer to earlier nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubExpr {
    Var(char),
    Not(ExprId),
    Binary(Operator, ExprId, ExprId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprNode {
    pub expr: SubExpr,
    pub column: ColumnId,
}

/// Every distinct sub-expression met while evaluating a postfix stream,
/// each bound to the truth-table column holding its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExprGraph {
    nodes: Vec<ExprNode>,
    lookup: FxHashMap<SubExpr, ExprId>,
    root: Option<ExprId>,
}

impl ExprGraph {
    pub fn nodes(&self) -> &[ExprNode] {
        &self.nodes
    }

    pub fn node(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.0]
    }

    /// The sub-expression left on top of the stack, `None` for an empty expression.
    pub const fn root(&self) -> Option<ExprId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Column name of a sub-expression: `!x` for negation, `(x op y)` for binary connectives.
    fn render(&self, table: &TruthTable, expr: SubExpr) -> String {
        let name = |id: ExprId| table.name(self.node(id).column);

        match expr {
            SubExpr::Var(c) => c.to_string(),
            SubExpr::Not(x) => format!("!{}", name(x)),
            SubExpr::Binary(op, l, r) => format!("({}{}{})", name(l), op, name(r)),
        }
    }

    fn intern(&mut self, table: &mut TruthTable, expr: SubExpr) -> Result<ExprId, EvalError> {
        if let Some(&id) = self.lookup.get(&expr) {
            return Ok(id);
        }

        let column = match expr {
            SubExpr::Var(c) => table.column_id(&c.to_string())?,
            SubExpr::Not(x) => {
                let values: Vec<bool> = table.column(self.node(x).column).iter().map(|v| !v).collect();
                self.fill(table, expr, &values)?
            }
            SubExpr::Binary(op, l, r) => {
                let values: Vec<bool> = table
                    .column(self.node(l).column)
                    .iter()
                    .zip(table.column(self.node(r).column))
                    .map(|(&a, &b)| op.apply(a, b))
                    .collect();
                self.fill(table, expr, &values)?
            }
        };

        let id = ExprId(self.nodes.len());
        self.nodes.push(ExprNode { expr, column });
        self.lookup.insert(expr, id);
        Ok(id)
    }

    fn fill(&self, table: &mut TruthTable, expr: SubExpr, values: &[bool]) -> Result<ColumnId, EvalError> {
        let name = self.render(table, expr);
        debug!("column {}", name);

        let column = table.add_column(name);
        for (row, &value) in values.iter().enumerate() {
            table.set_cell(column, row, value)?;
        }

        Ok(column)
    }
}

/// Evaluates `postfix` over the variable columns of `table`.
///
/// One column is appended per distinct operator application, so after a
/// successful run the last column of the table holds the whole expression.
pub fn evaluate(postfix: &Postfix, table: &mut TruthTable) -> Result<ExprGraph, EvalError> {
    let mut graph = ExprGraph::default();
    let mut stack: Vec<ExprId> = Vec::new();

    for (position, token) in postfix.tokens().iter().enumerate() {
        let expr = match *token {
            Token::Operand(c) => SubExpr::Var(c),
            Token::Operator(op) => {
                let underflow = EvalError::StackUnderflow {
                    operator: op.symbol(),
                    position,
                };

                if op.arity() == 1 {
                    let x = stack.pop().ok_or(underflow)?;
                    SubExpr::Not(x)
                } else {
                    let r = stack.pop().ok_or_else(|| underflow.clone())?;
                    let l = stack.pop().ok_or(underflow)?;
                    SubExpr::Binary(op, l, r)
                }
            }
        };

        let id = graph.intern(table, expr)?;
        stack.push(id);
    }

    if stack.len() > 1 {
        warn!(
            "{} operands left on the stack after evaluating {}",
            stack.len(),
            postfix
        );
    }

    graph.root = stack.last().copied();
    Ok(graph)
}
