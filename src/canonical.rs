use crate::eval::EvalError;
use crate::symbols::Operator;
use crate::truth_table::{ColumnId, TableError, TruthTable};
use itertools::Itertools;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForm {
    /// Product of maxterms, one clause per falsifying row.
    Conjunctive,
    /// Sum of minterms, one clause per satisfying row.
    Disjunctive,
}

impl NormalForm {
    const fn selects(self, value: bool) -> bool {
        match self {
            Self::Conjunctive => !value,
            Self::Disjunctive => value,
        }
    }

    /// Connective joining the clauses.
    pub const fn outer(self) -> Operator {
        match self {
            Self::Conjunctive => Operator::And,
            Self::Disjunctive => Operator::Or,
        }
    }

    /// Connective joining the literals inside a clause.
    pub const fn inner(self) -> Operator {
        match self {
            Self::Conjunctive => Operator::Or,
            Self::Disjunctive => Operator::And,
        }
    }

    const fn negates(self, value: bool) -> bool {
        match self {
            Self::Conjunctive => value,
            Self::Disjunctive => !value,
        }
    }
}

/// Output column of a boolean function in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionVector(Vec<bool>);

impl FunctionVector {
    /// Reads `column`; without a column the function is constant false.
    pub fn from_table(table: &TruthTable, column: Option<ColumnId>) -> Self {
        match column {
            Some(id) => Self(table.column(id).to_vec()),
            None => Self(vec![false; table.row_count()]),
        }
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn into_bits(self) -> Vec<bool> {
        self.0
    }

    /// The bits read as one binary number, row 0 most significant.
    pub fn to_integer(&self) -> Result<u128, EvalError> {
        if self.0.len() > u128::BITS as usize {
            return Err(EvalError::VectorTooWide { rows: self.0.len() });
        }

        Ok(self
            .0
            .iter()
            .fold(0u128, |acc, &bit| (acc << 1) | u128::from(bit)))
    }

    pub fn classify(&self) -> Classification {
        if self.0.iter().all(|&v| v) {
            Classification::Tautology
        } else if self.0.iter().all(|&v| !v) {
            Classification::Contradiction
        } else {
            Classification::Contingent
        }
    }
}

impl Display for FunctionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|&v| f.write_str(if v { "1" } else { "0" }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Tautology,
    Contradiction,
    Contingent,
}

impl Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Tautology => "tautology",
            Self::Contradiction => "contradiction",
            Self::Contingent => "contingent",
        })
    }
}

/// Perfect normal form of a function: the operand assignment of every row it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm {
    kind: NormalForm,
    operands: Vec<char>,
    assignments: Vec<Vec<bool>>,
}

impl CanonicalForm {
    pub fn new(
        kind: NormalForm,
        operands: &[char],
        table: &TruthTable,
        vector: &FunctionVector,
    ) -> Result<Self, TableError> {
        let columns = operands
            .iter()
            .map(|c| table.column_id(&c.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let assignments = vector
            .bits()
            .iter()
            .enumerate()
            .filter(|&(_, &value)| kind.selects(value))
            .map(|(row, _)| {
                columns
                    .iter()
                    .map(|&id| table.cell(id, row))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            operands: operands.to_vec(),
            assignments,
        })
    }

    pub const fn kind(&self) -> NormalForm {
        self.kind
    }

    pub fn assignments(&self) -> &[Vec<bool>] {
        &self.assignments
    }

    /// Each assignment read as a binary number, first operand most significant.
    pub fn indices(&self) -> Vec<usize> {
        self.assignments
            .iter()
            .map(|a| a.iter().fold(0usize, |acc, &bit| (acc << 1) | usize::from(bit)))
            .collect()
    }

    /// Numeric form, e.g. `(1,3,5)|`.
    pub fn indices_text(&self) -> String {
        format!("({}){}", self.indices().iter().join(","), self.kind.outer())
    }

    fn clause(&self, assignment: &[bool]) -> String {
        let mut literals = self.operands.iter().zip(assignment).map(|(c, &value)| {
            if self.kind.negates(value) {
                format!("{}{}", Operator::Not, c)
            } else {
                c.to_string()
            }
        });

        format!("({})", literals.join(&self.kind.inner().to_string()))
    }
}

impl Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outer = self.kind.outer().to_string();
        write!(
            f,
            "{}",
            self.assignments.iter().map(|a| self.clause(a)).join(&outer)
        )
    }
}
