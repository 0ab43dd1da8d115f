//! Exclusive-sum-of-products forms.
//!
//! An [`Esop`] is the XOR of a sequence of [`Cube`]s: it evaluates to true on
//! an assignment iff an odd number of its cubes cover that assignment.

use std::fmt;

use crate::cube::Cube;
use crate::truth_table::TruthTable;

#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Esop {
    cubes: Vec<Cube>,
}

impl Esop {
    pub fn new(cubes: Vec<Cube>) -> Self {
        Self { cubes }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn push(&mut self, cube: Cube) {
        self.cubes.push(cube);
    }

    pub fn num_cubes(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Total number of literals over all cubes.
    pub fn num_literals(&self) -> u32 {
        self.cubes.iter().map(|c| c.num_literals()).sum()
    }

    /// Evaluates the ESOP on the assignment `minterm`.
    pub fn evaluate(&self, minterm: u32) -> bool {
        self.cubes.iter().filter(|c| c.covers(minterm)).count() % 2 == 1
    }

    /// Returns true if the ESOP agrees with every care row of `tt`.
    pub fn implements(&self, tt: &TruthTable) -> bool {
        tt.care_rows().all(|(m, value)| self.evaluate(m) == value)
    }

    /// Returns a value that formats every cube over `num_vars` variables, one per line.
    pub fn display_cubes(&self, num_vars: u32) -> EsopCubesDisplay<'_> {
        EsopCubesDisplay { esop: self, num_vars }
    }
}

impl FromIterator<Cube> for Esop {
    fn from_iter<T: IntoIterator<Item = Cube>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Esop {
    type Item = Cube;
    type IntoIter = std::vec::IntoIter<Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubes.into_iter()
    }
}

/// Formats the ESOP as an expression, e.g. `x0 & !x1 ^ x2`.
///
/// The empty cube is printed as `1`, the empty ESOP as `0`.
impl fmt::Display for Esop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cubes.is_empty() {
            return write!(f, "0");
        }
        for (i, cube) in self.cubes.iter().enumerate() {
            if i > 0 {
                write!(f, " ^ ")?;
            }
            if cube.is_tautology() {
                write!(f, "1")?;
                continue;
            }
            for (j, (index, polarity)) in cube.literals().enumerate() {
                if j > 0 {
                    write!(f, " & ")?;
                }
                if !polarity {
                    write!(f, "!")?;
                }
                write!(f, "x{}", index)?;
            }
        }
        Ok(())
    }
}

pub struct EsopCubesDisplay<'a> {
    esop: &'a Esop,
    num_vars: u32,
}

impl fmt::Display for EsopCubesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cube in self.esop.cubes() {
            writeln!(f, "{} 1", cube.display(self.num_vars))?;
        }
        Ok(())
    }
}
