extern crate dot;

use std::io;
use std::io::Write;

use crate::eval::{ExprGraph, SubExpr};
use crate::truth_table::TruthTable;

type GraphNode = usize;
type GraphEdge = (usize, String, usize);

/// GraphViz view of the sub-expression DAG, labelled by column name.
pub struct ExprDot<'g> {
    graph: &'g ExprGraph,
    table: &'g TruthTable,
}

impl<'g> ExprDot<'g> {
    pub const fn new(graph: &'g ExprGraph, table: &'g TruthTable) -> Self {
        Self { graph, table }
    }

    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }
}

impl<'a, 'g> dot::Labeller<'a, GraphNode, GraphEdge> for ExprDot<'g> {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("expression").expect("cannot create Id named 'expression'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{n}")).unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        let node = &self.graph.nodes()[*n];
        dot::LabelText::label(self.table.name(node.column).to_string())
    }

    fn node_shape(&self, n: &GraphNode) -> Option<dot::LabelText<'a>> {
        match self.graph.nodes()[*n].expr {
            SubExpr::Var(_) => Some(dot::LabelText::label("box")),
            _ if self.graph.root().map(|r| r.index()) == Some(*n) => {
                Some(dot::LabelText::label("doublecircle"))
            }
            _ => None,
        }
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1.clone())
    }
}

impl<'a, 'g> dot::GraphWalk<'a, GraphNode, GraphEdge> for ExprDot<'g> {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.graph.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        let mut edges: Vec<GraphEdge> = Vec::new();

        for (i, node) in self.graph.nodes().iter().enumerate() {
            match node.expr {
                SubExpr::Not(x) => edges.push((i, String::new(), x.index())),
                SubExpr::Binary(_, l, r) => {
                    edges.push((i, "L".to_string(), l.index()));
                    edges.push((i, "R".to_string(), r.index()));
                }
                SubExpr::Var(_) => {}
            }
        }

        edges.into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
