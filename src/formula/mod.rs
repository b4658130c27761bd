pub mod dimacs;

use std::fmt::{self, Debug, Display, Formatter};

/// A propositional atom, identified by a 1-based id.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Atom(pub usize);

impl Atom {
    /// The 0-based slot of this atom in per-atom arrays.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Atom),
    Negative(Atom),
}

impl Literal {
    pub fn new(atom: Atom, positive: bool) -> Self {
        if positive {
            Literal::Positive(atom)
        } else {
            Literal::Negative(atom)
        }
    }

    /// Reads a literal in signed-integer form, returning `None` for 0.
    pub fn from_signed(x: isize) -> Option<Self> {
        if x > 0 {
            Some(Literal::Positive(Atom(x as usize)))
        } else if x < 0 {
            Some(Literal::Negative(Atom(x.unsigned_abs())))
        } else {
            None
        }
    }

    pub fn to_signed(self) -> isize {
        match self {
            Literal::Positive(Atom(x)) => x as isize,
            Literal::Negative(Atom(x)) => -(x as isize),
        }
    }

    pub fn atom(self) -> Atom {
        match self {
            Literal::Positive(a) => a,
            Literal::Negative(a) => a,
        }
    }

    pub fn is_positive(self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}

/// A disjunction of literals. Literal order is kept as given.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// An empty clause can never be satisfied; during search it marks a conflict.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The sole literal of a unit clause.
    pub fn unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    pub fn mentions(&self, atom: Atom) -> bool {
        self.literals.iter().any(|l| l.atom() == atom)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.literals.len() > 1 {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            match literal {
                Literal::Positive(Atom(x)) => write!(f, "{}", x)?,
                Literal::Negative(Atom(x)) => write!(f, "!{}", x)?,
            }
        }
        if self.literals.is_empty() {
            f.write_str("false")?;
        }
        if self.literals.len() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A conjunction of clauses over the atoms `1..=atom_count`.
///
/// Formulas are built through [`crate::Problem`], which checks every literal against
/// the atom count, so the solver can index per-atom arrays without further checks.
#[derive(Clone)]
pub struct Formula {
    atom_count: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub(crate) fn new(atom_count: usize) -> Self {
        Self {
            atom_count,
            clauses: vec![],
        }
    }

    pub(crate) fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.clauses.is_empty() {
            return f.write_str("true");
        }
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Atom(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Atom(x))
}

/// Builds a formula from clauses without range checks. Test-only.
#[cfg(test)]
pub(crate) fn formula(atom_count: usize, clauses: Vec<Vec<Literal>>) -> Formula {
    let mut f = Formula::new(atom_count);
    for clause in clauses {
        f.push(Clause::new(clause));
    }
    f
}

/// Random formulas with between 1 and `max_atoms` atoms and clauses of 1 to 3 literals.
#[cfg(test)]
pub(crate) fn formula_strategy(
    max_atoms: usize,
    max_clauses: usize,
) -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1..=max_atoms).prop_flat_map(move |atom_count| {
        let literal = (1..=atom_count, any::<bool>()).prop_map(|(x, positive)| Literal::new(Atom(x), positive));
        let clause = proptest::collection::vec(literal, 1..=3);
        proptest::collection::vec(clause, 0..=max_clauses).prop_map(move |clauses| formula(atom_count, clauses))
    })
}
