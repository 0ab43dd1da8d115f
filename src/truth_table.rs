//! Incompletely specified truth tables.
//!
//! A truth table over `n` variables is a sequence of `2^n` entries. Entry `i`
//! is the required output for the assignment whose bit `l` is the value of
//! variable `l`. Entries are written as `'0'`, `'1'`, or any other character
//! for a don't-care.
//!
//! ```
//! use esop_rs::truth_table::{TruthTable, Value};
//!
//! let tt = TruthTable::from_binary_str("01-0");
//! assert_eq!(tt.num_vars(), 2);
//! assert_eq!(tt.value(1), Value::One);
//! assert_eq!(tt.value(2), Value::DontCare);
//! assert_eq!(tt.care_rows().collect::<Vec<_>>(), vec![(0, false), (1, true), (3, false)]);
//! ```

use std::fmt;

use crate::cube::Cube;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Value {
    Zero,
    One,
    DontCare,
}

impl Value {
    pub fn from_char(c: char) -> Self {
        match c {
            '0' => Value::Zero,
            '1' => Value::One,
            _ => Value::DontCare,
        }
    }

    /// Returns the required output, or `None` for a don't-care.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Value::Zero => Some(false),
            Value::One => Some(true),
            Value::DontCare => None,
        }
    }

    pub fn is_care(self) -> bool {
        self != Value::DontCare
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::One
        } else {
            Value::Zero
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TruthTable {
    num_vars: u32,
    values: Vec<Value>,
}

impl TruthTable {
    /// Creates a truth table from its entries.
    ///
    /// # Panics
    ///
    /// Panics if the number of entries is not a power of two, or if it
    /// corresponds to more than [`Cube::MAX_VARS`] variables.
    pub fn new(values: Vec<Value>) -> Self {
        assert!(
            values.len().is_power_of_two(),
            "bit-width {} is not a power of 2",
            values.len()
        );
        let num_vars = values.len().trailing_zeros();
        assert!(
            num_vars <= Cube::MAX_VARS,
            "cube data structure cannot store more than {} variables",
            Cube::MAX_VARS
        );
        Self { num_vars, values }
    }

    /// Parses a truth table from a binary string, one character per row.
    ///
    /// # Panics
    ///
    /// Same preconditions as [`TruthTable::new`].
    pub fn from_binary_str(s: &str) -> Self {
        Self::new(s.chars().map(Value::from_char).collect())
    }

    /// Creates a fully specified truth table by evaluating `f` on every minterm.
    pub fn from_fn(num_vars: u32, mut f: impl FnMut(u32) -> bool) -> Self {
        assert!(
            num_vars <= Cube::MAX_VARS,
            "cube data structure cannot store more than {} variables",
            Cube::MAX_VARS
        );
        let len = 1usize << num_vars;
        Self::new((0..len).map(|m| Value::from(f(m as u32))).collect())
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Number of rows, `2^num_vars`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, minterm: u32) -> Value {
        self.values[minterm as usize]
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates over the rows with a definite output as `(minterm, output)`.
    pub fn care_rows(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(m, v)| v.to_bool().map(|b| (m as u32, b)))
    }

    pub fn num_care_rows(&self) -> usize {
        self.values.iter().filter(|v| v.is_care()).count()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.values {
            let c = match v {
                Value::Zero => '0',
                Value::One => '1',
                Value::DontCare => '-',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
