//! Demonstration models which can be generated (and solved) from the command line.
mod bibd;
mod bin_packing;
mod integer_factorisation;
mod magic_square;
mod queens;
mod sudoku;

use clap::ValueEnum;
use mzn_solver::Model;
use mzn_solver::ModelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Demo {
    /// Place n queens on an n by n board such that none attack each other.
    Queens,
    /// Factor the product of two primes.
    IntegerFactorisation,
    /// Fill a sudoku with boxes of size n by n.
    Sudoku,
    /// Fill an n by n square with 1..n^2 such that all lines have the same sum.
    MagicSquare,
    /// Find the (7, 7, 3, 3, 1) balanced incomplete block design.
    Bibd,
    /// Pack n items into as few bins as possible.
    BinPacking,
}

impl Demo {
    fn default_size(self) -> u32 {
        match self {
            Demo::Queens => 8,
            Demo::Sudoku | Demo::MagicSquare => 3,
            Demo::BinPacking => 6,
            Demo::IntegerFactorisation | Demo::Bibd => 0,
        }
    }

    /// Builds the model; `size` is ignored by the demonstrations with fixed data.
    pub(crate) fn build(self, size: Option<u32>) -> Result<Model, ModelError> {
        let size = size.unwrap_or_else(|| self.default_size());

        match self {
            Demo::Queens => queens::build(size),
            Demo::IntegerFactorisation => integer_factorisation::build(),
            Demo::Sudoku => sudoku::build(size),
            Demo::MagicSquare => magic_square::build(size),
            Demo::Bibd => bibd::build(),
            Demo::BinPacking => bin_packing::build(size),
        }
    }
}
