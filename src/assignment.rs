use crate::formula::{Atom, Formula, Literal};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Value {
    True,
    False,
    Unbound,
}

/// A partial assignment: one tri-state slot per atom.
///
/// Search branches never share an assignment; each branch works on its own clone, so a
/// bound slot is never rebound within a branch.
#[derive(Clone, Debug)]
pub(crate) struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    pub(crate) fn new(atom_count: usize) -> Self {
        Self {
            values: vec![Value::Unbound; atom_count],
        }
    }

    pub(crate) fn value(&self, atom: Atom) -> Value {
        self.values[atom.index()]
    }

    /// The truth value of `literal` under this assignment.
    pub(crate) fn literal_value(&self, literal: &Literal) -> Value {
        match self.value(literal.atom()) {
            Value::True => {
                if literal.is_positive() {
                    Value::True
                } else {
                    Value::False
                }
            }
            Value::False => {
                if literal.is_positive() {
                    Value::False
                } else {
                    Value::True
                }
            }
            Value::Unbound => Value::Unbound,
        }
    }

    /// Binds the atom of `literal` so that the literal is true.
    pub(crate) fn assign(&mut self, literal: Literal) {
        debug_assert_eq!(self.value(literal.atom()), Value::Unbound);
        self.values[literal.atom().index()] = if literal.is_positive() {
            Value::True
        } else {
            Value::False
        };
    }

    /// The lowest-id atom that is still unbound.
    pub(crate) fn first_unbound(&self) -> Option<Atom> {
        self.values
            .iter()
            .position(|v| *v == Value::Unbound)
            .map(|i| Atom(i + 1))
    }

    /// Completes the assignment, binding every unbound atom to true.
    pub(crate) fn complete(self) -> Model {
        Model {
            values: self.values.into_iter().map(|v| v != Value::False).collect(),
        }
    }
}

/// A complete assignment: every atom resolved to true or false.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub fn value(&self, atom: Atom) -> bool {
        self.values[atom.index()]
    }

    /// Truth values indexed by `atom.index()`.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// One literal per atom, in atom order, that is true under this model.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| Literal::new(Atom(i + 1), *value))
    }

    pub fn literal_value(&self, literal: &Literal) -> bool {
        self.value(literal.atom()) == literal.is_positive()
    }

    /// Whether every clause of `formula` has at least one true literal.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .all(|clause| clause.literals().any(|l| self.literal_value(l)))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for literal in self.literals() {
            if first {
                first = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{formula, n, p};

    #[test]
    fn literal_values() {
        let mut a = Assignment::new(3);
        a.assign(n(2));
        assert_eq!(a.value(Atom(2)), Value::False);
        assert_eq!(a.literal_value(&n(2)), Value::True);
        assert_eq!(a.literal_value(&p(2)), Value::False);
        assert_eq!(a.literal_value(&p(1)), Value::Unbound);
        assert_eq!(a.first_unbound(), Some(Atom(1)));
    }

    #[test]
    fn complete_defaults_to_true() {
        let mut a = Assignment::new(3);
        a.assign(n(2));
        let model = a.complete();
        assert_eq!(model.values(), &[true, false, true]);
        assert_eq!(model.to_string(), "1 -2 3");
    }

    #[test]
    fn first_unbound_when_full() {
        let mut a = Assignment::new(2);
        a.assign(p(1));
        a.assign(p(2));
        assert_eq!(a.first_unbound(), None);
    }

    #[test]
    fn model_satisfies() {
        let f = formula(2, vec![vec![p(1), p(2)], vec![n(1)]]);
        let mut a = Assignment::new(2);
        a.assign(n(1));
        assert!(a.clone().complete().satisfies(&f));

        let mut b = Assignment::new(2);
        b.assign(p(1));
        assert!(!b.complete().satisfies(&f));
    }
}
