//! Fixed-width product terms.
//!
//! A [`Cube`] is a conjunction of literals over at most [`Cube::MAX_VARS`]
//! variables, stored as a pair of 32-bit words:
//!
//! - `mask` marks which variables appear in the cube,
//! - `bits` gives the required polarity of each appearing variable.
//!
//! Bits of `bits` outside of `mask` are kept at zero, so two cubes denoting the
//! same product term always compare equal.
//!
//! # Examples
//!
//! ```
//! use esop_rs::cube::Cube;
//!
//! // x0 & !x2
//! let mut c = Cube::default();
//! c.add_literal(0, true);
//! c.add_literal(2, false);
//!
//! assert!(c.covers(0b011));
//! assert!(!c.covers(0b101));
//! assert_eq!(c.display(3).to_string(), "1-0");
//! ```

use std::fmt;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cube {
    bits: u32,
    mask: u32,
}

impl Cube {
    /// Maximum number of variables a cube can mention.
    pub const MAX_VARS: u32 = u32::BITS;

    pub fn new(bits: u32, mask: u32) -> Self {
        Self { bits: bits & mask, mask }
    }

    /// Mask with the lowest `num_vars` bits set.
    ///
    /// # Panics
    ///
    /// Panics if `num_vars` exceeds [`Cube::MAX_VARS`].
    pub fn full_mask(num_vars: u32) -> u32 {
        assert!(
            num_vars <= Self::MAX_VARS,
            "cube cannot store more than {} variables",
            Self::MAX_VARS
        );
        ((1u64 << num_vars) - 1) as u32
    }

    /// The cube with all `num_vars` variables in negative polarity.
    pub fn neg_cube(num_vars: u32) -> Self {
        Self::new(0, Self::full_mask(num_vars))
    }

    /// The cube with all `num_vars` variables in positive polarity.
    pub fn pos_cube(num_vars: u32) -> Self {
        let mask = Self::full_mask(num_vars);
        Self::new(mask, mask)
    }

    /// The minterm cube of the assignment `index` over `num_vars` variables.
    pub fn minterm(num_vars: u32, index: u32) -> Self {
        let mask = Self::full_mask(num_vars);
        assert_eq!(index & !mask, 0, "minterm {} is out of range for {} variables", index, num_vars);
        Self::new(index, mask)
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    fn check_index(index: u32) {
        assert!(
            index < Self::MAX_VARS,
            "variable index {} is out of range (max {})",
            index,
            Self::MAX_VARS
        );
    }

    /// Returns the polarity bit at `index`.
    pub fn bit(&self, index: u32) -> bool {
        Self::check_index(index);
        (self.bits >> index) & 1 == 1
    }

    /// Returns true if the variable at `index` appears in the cube.
    pub fn has_literal(&self, index: u32) -> bool {
        Self::check_index(index);
        (self.mask >> index) & 1 == 1
    }

    /// Returns the polarity of the variable at `index`, or `None` if the cube does not mention it.
    pub fn polarity(&self, index: u32) -> Option<bool> {
        if self.has_literal(index) {
            Some(self.bit(index))
        } else {
            None
        }
    }

    /// Adds the literal `x_index` (if `polarity`) or `!x_index` (otherwise).
    ///
    /// An existing literal on the same variable is overwritten.
    pub fn add_literal(&mut self, index: u32, polarity: bool) {
        Self::check_index(index);
        self.mask |= 1 << index;
        if polarity {
            self.bits |= 1 << index;
        } else {
            self.bits &= !(1 << index);
        }
    }

    pub fn remove_literal(&mut self, index: u32) {
        Self::check_index(index);
        self.mask &= !(1 << index);
        self.bits &= !(1 << index);
    }

    pub fn num_literals(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Returns true if the cube mentions no variable (constant one).
    pub fn is_tautology(&self) -> bool {
        self.mask == 0
    }

    /// Returns true if the assignment `minterm` satisfies every literal of the cube.
    pub fn covers(&self, minterm: u32) -> bool {
        (minterm ^ self.bits) & self.mask == 0
    }

    /// Iterates over the literals of the cube as `(index, polarity)`, lowest index first.
    pub fn literals(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        (0..Self::MAX_VARS).filter_map(move |i| self.polarity(i).map(|p| (i, p)))
    }

    /// Returns a value that formats the cube over `num_vars` variables.
    ///
    /// Each variable is printed as `1` (positive), `0` (negative) or `-` (absent),
    /// variable 0 first.
    pub fn display(&self, num_vars: u32) -> CubeDisplay {
        assert!(num_vars <= Self::MAX_VARS);
        CubeDisplay {
            cube: *self,
            num_vars,
        }
    }
}

pub struct CubeDisplay {
    cube: Cube,
    num_vars: u32,
}

impl fmt::Display for CubeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_vars {
            let c = match self.cube.polarity(i) {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
