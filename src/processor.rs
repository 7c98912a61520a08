use std::io::{self, Write};

use log::debug;

use crate::canonical::{CanonicalForm, Classification, FunctionVector, NormalForm};
use crate::eval::{self, EvalError, ExprGraph};
use crate::expr_io::ExprDot;
use crate::parser::{ParseError, Postfix};
use crate::truth_table::TruthTable;

/// One expression together with its truth table.
///
/// Canonical forms and the function vector describe the last column of the
/// table, so [`Processor::evaluate`] has to run first for them to describe the
/// whole expression; before that they describe the last variable column.
#[derive(Debug, Clone)]
pub struct Processor {
    postfix: Postfix,
    operands: Vec<char>,
    table: TruthTable,
    graph: ExprGraph,
}

impl Processor {
    pub fn parse_and_build(expression: &str) -> Result<Self, ParseError> {
        let postfix = Postfix::parse(expression)?;
        let operands = postfix.operands();
        let table = TruthTable::from_operands(&operands);

        debug!(
            "{} operands, {} rows for {}",
            operands.len(),
            table.row_count(),
            postfix
        );

        Ok(Self {
            postfix,
            operands,
            table,
            graph: ExprGraph::default(),
        })
    }

    /// Appends one column per operator application.
    pub fn evaluate(&mut self) -> Result<(), EvalError> {
        self.graph = eval::evaluate(&self.postfix, &mut self.table)?;
        Ok(())
    }

    pub const fn postfix(&self) -> &Postfix {
        &self.postfix
    }

    pub fn operands(&self) -> &[char] {
        &self.operands
    }

    pub const fn table(&self) -> &TruthTable {
        &self.table
    }

    pub const fn graph(&self) -> &ExprGraph {
        &self.graph
    }

    pub fn result_column(&self) -> Option<&str> {
        self.table.last_column().map(|id| self.table.name(id))
    }

    pub fn truth_table_text(&self) -> String {
        self.table.to_string()
    }

    pub fn canonical_form(&self, kind: NormalForm) -> Result<CanonicalForm, EvalError> {
        Ok(CanonicalForm::new(
            kind,
            &self.operands,
            &self.table,
            &self.function_vector(),
        )?)
    }

    pub fn scnf(&self) -> Result<String, EvalError> {
        Ok(self.canonical_form(NormalForm::Conjunctive)?.to_string())
    }

    pub fn sdnf(&self) -> Result<String, EvalError> {
        Ok(self.canonical_form(NormalForm::Disjunctive)?.to_string())
    }

    pub fn scnf_indices(&self) -> Result<String, EvalError> {
        Ok(self.canonical_form(NormalForm::Conjunctive)?.indices_text())
    }

    pub fn sdnf_indices(&self) -> Result<String, EvalError> {
        Ok(self.canonical_form(NormalForm::Disjunctive)?.indices_text())
    }

    pub fn function_vector(&self) -> FunctionVector {
        FunctionVector::from_table(&self.table, self.table.last_column())
    }

    pub fn function_vector_as_integer(&self) -> Result<u128, EvalError> {
        self.function_vector().to_integer()
    }

    pub fn classify(&self) -> Classification {
        self.function_vector().classify()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        self.table.write_csv(writer)
    }

    /// Renders the evaluated sub-expressions; empty before [`Processor::evaluate`].
    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        ExprDot::new(&self.graph, &self.table).render_dot(writer)
    }
}
