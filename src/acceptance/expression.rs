use bit_set::BitSet;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Boolean combination of `Fin` and `Inf` atoms over acceptance marks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcceptanceExpression {
    True,
    False,
    Fin(usize),
    Inf(usize),
    And(Vec<AcceptanceExpression>),
    Or(Vec<AcceptanceExpression>),
}

/// A conjunction `Fin(f1) & … & Inf(i1) & …`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clause {
    pub fin: BitSet,
    pub inf: BitSet,
}

impl AcceptanceExpression {
    /// Conjunction that collapses trivial operands.
    pub fn and<I>(operands: I) -> Self
    where
        I: IntoIterator<Item = AcceptanceExpression>,
    {
        let mut flat = Vec::new();
        for operand in operands {
            match operand {
                AcceptanceExpression::True => (),
                AcceptanceExpression::False => return AcceptanceExpression::False,
                AcceptanceExpression::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => AcceptanceExpression::True,
            1 => flat.remove(0),
            _ => AcceptanceExpression::And(flat),
        }
    }

    /// Disjunction that collapses trivial operands.
    pub fn or<I>(operands: I) -> Self
    where
        I: IntoIterator<Item = AcceptanceExpression>,
    {
        let mut flat = Vec::new();
        for operand in operands {
            match operand {
                AcceptanceExpression::False => (),
                AcceptanceExpression::True => return AcceptanceExpression::True,
                AcceptanceExpression::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => AcceptanceExpression::False,
            1 => flat.remove(0),
            _ => AcceptanceExpression::Or(flat),
        }
    }

    /// Evaluates the expression for a run that visits exactly the marks in
    /// `infinitely_often` infinitely often.
    pub fn evaluate(&self, infinitely_often: &BitSet) -> bool {
        match *self {
            AcceptanceExpression::True => true,
            AcceptanceExpression::False => false,
            AcceptanceExpression::Fin(index) => !infinitely_often.contains(index),
            AcceptanceExpression::Inf(index) => infinitely_often.contains(index),
            AcceptanceExpression::And(ref operands) => {
                operands.iter().all(|o| o.evaluate(infinitely_often))
            }
            AcceptanceExpression::Or(ref operands) => {
                operands.iter().any(|o| o.evaluate(infinitely_often))
            }
        }
    }

    /// Disjunctive normal form: the expression holds iff some clause holds.
    pub fn clauses(&self) -> Vec<Clause> {
        match *self {
            AcceptanceExpression::True => vec![Clause::default()],
            AcceptanceExpression::False => Vec::new(),
            AcceptanceExpression::Fin(index) => {
                let mut clause = Clause::default();
                clause.fin.insert(index);
                vec![clause]
            }
            AcceptanceExpression::Inf(index) => {
                let mut clause = Clause::default();
                clause.inf.insert(index);
                vec![clause]
            }
            AcceptanceExpression::Or(ref operands) => {
                operands.iter().flat_map(|o| o.clauses()).collect()
            }
            AcceptanceExpression::And(ref operands) => {
                let mut product = vec![Clause::default()];
                for operand in operands {
                    let clauses = operand.clauses();
                    let mut extended = Vec::with_capacity(product.len() * clauses.len());
                    for left in &product {
                        for right in &clauses {
                            let mut clause = left.clone();
                            clause.fin.union_with(&right.fin);
                            clause.inf.union_with(&right.inf);
                            extended.push(clause);
                        }
                    }
                    product = extended;
                }
                product
            }
        }
    }

    fn fmt_operand(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            AcceptanceExpression::And(_) | AcceptanceExpression::Or(_) => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

impl Display for AcceptanceExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (operands, separator) = match *self {
            AcceptanceExpression::True => return write!(f, "t"),
            AcceptanceExpression::False => return write!(f, "f"),
            AcceptanceExpression::Fin(index) => return write!(f, "Fin({})", index),
            AcceptanceExpression::Inf(index) => return write!(f, "Inf({})", index),
            AcceptanceExpression::And(ref operands) => (operands, " & "),
            AcceptanceExpression::Or(ref operands) => (operands, " | "),
        };

        for (position, operand) in operands.iter().enumerate() {
            if position > 0 {
                write!(f, "{}", separator)?;
            }
            operand.fmt_operand(f)?;
        }
        Ok(())
    }
}
