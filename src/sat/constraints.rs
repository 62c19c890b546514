//! Constraint generation for the Sudoku SAT encoding

use super::combinations::combinations;
use super::{VariableError, VariableNamer};
use crate::sudoku::Grid;
use itertools::Itertools;
use std::io::{self, Write};

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Whether any literal is satisfied by `value_of`
    pub fn is_satisfied_by(&self, value_of: impl Fn(i32) -> bool) -> bool {
        self.literals
            .iter()
            .any(|&lit| if lit > 0 { value_of(lit) } else { !value_of(-lit) })
    }
}

/// Which part of the encoding a clause group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintFamily {
    Cell,
    Row,
    Column,
    Block,
    Clue,
}

impl ConstraintFamily {
    /// Families in the order [`ClauseGroups::aggregate`] merges them
    pub const ALL: [ConstraintFamily; 5] = [
        ConstraintFamily::Cell,
        ConstraintFamily::Row,
        ConstraintFamily::Column,
        ConstraintFamily::Block,
        ConstraintFamily::Clue,
    ];
}

/// Independently built clause buffers, one per constraint family
#[derive(Debug, Clone, Default)]
pub struct ClauseGroups {
    pub cells: Vec<Clause>,
    pub rows: Vec<Clause>,
    pub columns: Vec<Clause>,
    pub blocks: Vec<Clause>,
    pub clues: Vec<Clause>,
}

impl ClauseGroups {
    pub fn family(&self, family: ConstraintFamily) -> &[Clause] {
        match family {
            ConstraintFamily::Cell => &self.cells,
            ConstraintFamily::Row => &self.rows,
            ConstraintFamily::Column => &self.columns,
            ConstraintFamily::Block => &self.blocks,
            ConstraintFamily::Clue => &self.clues,
        }
    }

    pub fn uniqueness_count(&self) -> usize {
        self.rows.len() + self.columns.len() + self.blocks.len()
    }

    /// Merge every group into one CNF instance
    pub fn aggregate(self, variable_count: usize) -> Cnf {
        let total = self.cells.len() + self.uniqueness_count() + self.clues.len();
        let mut clauses = Vec::with_capacity(total);
        clauses.extend(self.cells);
        clauses.extend(self.rows);
        clauses.extend(self.columns);
        clauses.extend(self.blocks);
        clauses.extend(self.clues);
        Cnf { clauses, variable_count }
    }
}

/// A CNF instance: conjunction of clauses over atoms `1..=variable_count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    pub variable_count: usize,
}

impl Cnf {
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Numbered clause listing with literals shown as signed `(row,col,digit)`
    pub fn listing(&self, namer: &VariableNamer) -> String {
        let mut output = String::new();
        for (i, clause) in self.clauses.iter().enumerate() {
            let literals = clause
                .literals
                .iter()
                .map(|&lit| {
                    let sign = if lit < 0 { "-" } else { "" };
                    match namer.decode(lit) {
                        Some((row, col, digit)) => format!("{}({},{},{})", sign, row, col, digit),
                        None => lit.to_string(),
                    }
                })
                .join(" ");
            output.push_str(&format!("{:>6}: {{ {} }}\n", i + 1, literals));
        }
        output
    }

    /// Write the instance in DIMACS CNF format
    pub fn write_dimacs<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "c Sudoku CNF written by sudoku_sat")?;
        writeln!(writer, "p cnf {} {}", self.variable_count, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(writer, "{} 0", clause.literals.iter().join(" "))?;
        }
        Ok(())
    }

    /// Whether a complete assignment satisfies every clause
    pub fn is_satisfied_by(&self, value_of: impl Fn(i32) -> bool) -> bool {
        self.clauses.iter().all(|clause| clause.is_satisfied_by(&value_of))
    }
}

/// Generates SAT constraints for an N×N Sudoku
#[derive(Debug, Clone)]
pub struct ConstraintGenerator {
    namer: VariableNamer,
    size: usize,
    block_size: usize,
}

impl ConstraintGenerator {
    /// Create a new constraint generator over `namer`'s grid
    pub fn new(namer: VariableNamer, block_size: usize) -> Self {
        Self {
            namer,
            size: namer.size(),
            block_size,
        }
    }

    pub fn namer(&self) -> &VariableNamer {
        &self.namer
    }

    /// One clause per cell: the cell holds at least one digit
    pub fn cell_constraints(&self) -> Result<Vec<Clause>, VariableError> {
        let mut clauses = Vec::with_capacity(self.size * self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                clauses.push(Clause::new(self.namer.cell_atoms(row, col)?));
            }
        }
        Ok(clauses)
    }

    /// No digit twice in any row
    pub fn row_constraints(&self) -> Result<Vec<Clause>, VariableError> {
        let mut clauses = Vec::new();
        for row in 0..self.size {
            let cells: Vec<(usize, usize)> = (0..self.size).map(|col| (row, col)).collect();
            clauses.extend(self.house_exclusions(&cells)?);
        }
        Ok(clauses)
    }

    /// No digit twice in any column
    pub fn column_constraints(&self) -> Result<Vec<Clause>, VariableError> {
        let mut clauses = Vec::new();
        for col in 0..self.size {
            let cells: Vec<(usize, usize)> = (0..self.size).map(|row| (row, col)).collect();
            clauses.extend(self.house_exclusions(&cells)?);
        }
        Ok(clauses)
    }

    /// No digit twice in any block
    pub fn block_constraints(&self) -> Result<Vec<Clause>, VariableError> {
        let mut clauses = Vec::new();
        for top in (0..self.size).step_by(self.block_size) {
            for left in (0..self.size).step_by(self.block_size) {
                let cells: Vec<(usize, usize)> = (top..top + self.block_size)
                    .flat_map(|row| (left..left + self.block_size).map(move |col| (row, col)))
                    .collect();
                clauses.extend(self.house_exclusions(&cells)?);
            }
        }
        Ok(clauses)
    }

    /// For every digit, forbid each pair of cells in the house from both
    /// holding it
    fn house_exclusions(&self, cells: &[(usize, usize)]) -> Result<Vec<Clause>, VariableError> {
        let cell_pairs = combinations(cells, 2);
        let mut clauses = Vec::with_capacity(self.size * cell_pairs.len());
        for digit in 1..=self.size {
            for pair in &cell_pairs {
                let (r1, c1) = pair[0];
                let (r2, c2) = pair[1];
                clauses.push(Clause::binary(
                    -self.namer.encode(r1, c1, digit)?,
                    -self.namer.encode(r2, c2, digit)?,
                ));
            }
        }
        Ok(clauses)
    }

    /// Unit clauses fixing every pre-filled cell
    pub fn clue_constraints(&self, puzzle: &Grid) -> Result<Vec<Clause>, VariableError> {
        puzzle
            .clues()
            .into_iter()
            .map(|(row, col, digit)| Ok(Clause::unit(self.namer.encode(row, col, digit)?)))
            .collect()
    }

    /// Build every clause group in turn
    pub fn generate_groups(
        &self,
        puzzle: &Grid,
        cell_constraints: bool,
    ) -> Result<ClauseGroups, VariableError> {
        Ok(ClauseGroups {
            cells: if cell_constraints { self.cell_constraints()? } else { Vec::new() },
            rows: self.row_constraints()?,
            columns: self.column_constraints()?,
            blocks: self.block_constraints()?,
            clues: self.clue_constraints(puzzle)?,
        })
    }

    /// Build every clause group, fork-joining the independent families
    pub fn generate_groups_parallel(
        &self,
        puzzle: &Grid,
        cell_constraints: bool,
    ) -> Result<ClauseGroups, VariableError> {
        let ((cells, clues), ((rows, columns), blocks)) = rayon::join(
            || {
                rayon::join(
                    || if cell_constraints { self.cell_constraints() } else { Ok(Vec::new()) },
                    || self.clue_constraints(puzzle),
                )
            },
            || {
                rayon::join(
                    || rayon::join(|| self.row_constraints(), || self.column_constraints()),
                    || self.block_constraints(),
                )
            },
        );

        Ok(ClauseGroups {
            cells: cells?,
            rows: rows?,
            columns: columns?,
            blocks: blocks?,
            clues: clues?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::parse_puzzle_from_string;
    use std::collections::HashSet;

    fn generator(size: usize) -> ConstraintGenerator {
        let grid = Grid::new(size).unwrap();
        ConstraintGenerator::new(VariableNamer::new(size).unwrap(), grid.block_size)
    }

    fn choose2(n: usize) -> usize {
        n * (n - 1) / 2
    }

    #[test]
    fn test_clause_helpers() {
        assert!(Clause::unit(3).is_unit());
        assert!(Clause::new(vec![]).is_empty());
        assert_eq!(Clause::binary(-1, -2).literals, vec![-1, -2]);

        let clause = Clause::new(vec![1, -2]);
        assert!(clause.is_satisfied_by(|v| v == 1));
        assert!(clause.is_satisfied_by(|_| false));
        assert!(!clause.is_satisfied_by(|v| v == 2));
    }

    #[test]
    fn test_family_counts_blank_4x4() {
        let generator = generator(4);
        let groups = generator.generate_groups(&Grid::new(4).unwrap(), true).unwrap();

        assert_eq!(groups.rows.len(), 4 * 4 * choose2(4));
        assert_eq!(groups.columns.len(), 96);
        assert_eq!(groups.blocks.len(), 96);
        assert_eq!(groups.uniqueness_count(), 288);
        assert_eq!(groups.cells.len(), 16);
        assert!(groups.clues.is_empty());
    }

    #[test]
    fn test_family_counts_blank_9x9() {
        let generator = generator(9);
        let groups = generator.generate_groups(&Grid::new(9).unwrap(), false).unwrap();
        let per_family = 9 * 9 * choose2(9);
        assert_eq!(groups.rows.len(), per_family);
        assert_eq!(groups.columns.len(), per_family);
        assert_eq!(groups.blocks.len(), per_family);
        assert!(groups.cells.is_empty());
    }

    #[test]
    fn test_uniqueness_clause_shape() {
        let generator = generator(4);
        let namer = *generator.namer();
        let groups = generator.generate_groups(&Grid::new(4).unwrap(), false).unwrap();

        for family in [ConstraintFamily::Row, ConstraintFamily::Column, ConstraintFamily::Block] {
            for clause in groups.family(family) {
                assert_eq!(clause.literals.len(), 2);
                assert!(clause.literals.iter().all(|&lit| lit < 0));
                let (r1, c1, d1) = namer.decode(clause.literals[0]).unwrap();
                let (r2, c2, d2) = namer.decode(clause.literals[1]).unwrap();
                assert_eq!(d1, d2);
                assert_ne!((r1, c1), (r2, c2));
                let same_house = match family {
                    ConstraintFamily::Row => r1 == r2,
                    ConstraintFamily::Column => c1 == c2,
                    _ => r1 / 2 == r2 / 2 && c1 / 2 == c2 / 2,
                };
                assert!(same_house, "{:?} clause {:?}", family, clause);
            }
        }
    }

    #[test]
    fn test_blocks_are_offset() {
        // every block must be covered, not just the top-left one
        let generator = generator(9);
        let namer = *generator.namer();
        let blocks = generator.block_constraints().unwrap();
        let covered: HashSet<(usize, usize)> = blocks
            .iter()
            .flat_map(|clause| clause.literals.iter())
            .map(|&lit| {
                let (row, col, _) = namer.decode(lit).unwrap();
                (row / 3, col / 3)
            })
            .collect();
        assert_eq!(covered.len(), 9);

        let forbidden = Clause::binary(
            -namer.encode(7, 7, 5).unwrap(),
            -namer.encode(8, 6, 5).unwrap(),
        );
        assert!(blocks.contains(&forbidden));
    }

    #[test]
    fn test_cell_constraints() {
        let generator = generator(4);
        let namer = *generator.namer();
        let cells = generator.cell_constraints().unwrap();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[5].literals, namer.cell_atoms(1, 1).unwrap());
        assert!(cells.iter().all(|c| c.literals.iter().all(|&lit| lit > 0)));
    }

    #[test]
    fn test_clue_constraints() {
        let generator = generator(4);
        let namer = *generator.namer();
        let puzzle = parse_puzzle_from_string("..1.\n.3.4\n3.4.\n.2..\n").unwrap();
        let clues = generator.clue_constraints(&puzzle).unwrap();

        assert_eq!(clues.len(), 6);
        assert!(clues.iter().all(Clause::is_unit));
        assert!(clues.contains(&Clause::unit(namer.encode(0, 2, 1).unwrap())));
        assert!(clues.contains(&Clause::unit(namer.encode(3, 1, 2).unwrap())));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let generator = generator(9);
        let puzzle = parse_puzzle_from_string(
            concat!(
                "53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n",
                "7...2...6\n.6....28.\n...419..5\n....8..79\n",
            ),
        )
        .unwrap();
        let sequential = generator.generate_groups(&puzzle, true).unwrap().aggregate(729);
        let parallel = generator.generate_groups_parallel(&puzzle, true).unwrap().aggregate(729);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_cnf_diagnostics() {
        let generator = generator(1);
        let mut puzzle = Grid::new(1).unwrap();
        puzzle.set(0, 0, Some(1)).unwrap();
        let cnf = generator.generate_groups(&puzzle, true).unwrap().aggregate(1);

        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.listing(generator.namer()), "     1: { (0,0,1) }\n     2: { (0,0,1) }\n");

        let mut buffer = Vec::new();
        cnf.write_dimacs(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("p cnf 1 2\n"));
        assert!(text.ends_with("1 0\n1 0\n"));

        assert!(cnf.is_satisfied_by(|_| true));
        assert!(!cnf.is_satisfied_by(|_| false));
    }

    #[test]
    fn test_listing_shows_negations() {
        let generator = generator(4);
        let cnf = ClauseGroups {
            rows: generator.row_constraints().unwrap()[..1].to_vec(),
            ..Default::default()
        }
        .aggregate(64);
        assert_eq!(cnf.listing(generator.namer()), "     1: { -(0,0,1) -(0,1,1) }\n");
    }
}
