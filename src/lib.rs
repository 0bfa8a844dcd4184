#![warn(missing_docs)]

//! # Word search engine
//!
//! A crate that builds word search puzzles one word at a time. Words are placed
//! along straight rays in a square grid, sharing cells where their letters match,
//! and leftover cells can be filled with random letters afterwards.
//!
//! All mutation goes through a [`Generator`], which owns the [`Grid`] it builds
//! into together with a seedable random source, so puzzles are reproducible for
//! a fixed seed.

use std::{
    fmt::Display,
    ops::{Index, RangeInclusive},
};

use array2d::Array2D;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// An error returned when a word could not be added to the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input was empty or contained only whitespace.
    EmptyWord,

    /// The word contained a character that is not a letter, such as a digit,
    /// punctuation, or interior whitespace.
    InvalidCharacters(String),

    /// The word has more letters than the grid has rows, so it cannot lie along
    /// any straight ray.
    TooLong {
        /// The normalized word that was rejected.
        word: String,
        /// The size of the grid it was offered to.
        size: usize,
    },

    /// The same word (ignoring case) has already been placed in the grid.
    DuplicateWord(String),

    /// No combination of direction and starting position could hold the word
    /// given the letters already in the grid.
    NoFit(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyWord => write!(f, "Word cannot be empty"),
            Error::InvalidCharacters(word) => {
                write!(f, "Word {:?} must contain only letters", word)
            }
            Error::TooLong { word, size } => {
                write!(f, "Word {:?} is too long for a grid of size {}", word, size)
            }
            Error::DuplicateWord(word) => {
                write!(f, "Word {:?} has already been added", word)
            }
            Error::NoFit(word) => {
                write!(f, "Could not fit word {:?} in the grid", word)
            }
        }
    }
}

impl std::error::Error for Error {}

/// The direction a word runs in, from its starting cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Left to right.
    Right,

    /// Right to left.
    Left,

    /// Top to bottom.
    Down,

    /// Bottom to top.
    Up,

    /// Diagonally down and to the right.
    DiagonalDownRight,

    /// Diagonally down and to the left.
    DiagonalDownLeft,

    /// Diagonally up and to the right.
    DiagonalUpRight,

    /// Diagonally up and to the left.
    DiagonalUpLeft,
}

impl Direction {
    /// Every direction a word can run in.
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
        Direction::DiagonalUpRight,
        Direction::DiagonalUpLeft,
    ];

    /// The `(row, column)` step taken between consecutive letters of a word
    /// running in this direction.
    pub fn deltas(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
            Direction::DiagonalUpRight => (-1, 1),
            Direction::DiagonalUpLeft => (-1, -1),
        }
    }
}

/// A word that has been placed in the grid, along with where it lies.
///
/// Placements are only created by a successful placement search; their position
/// never changes once added, except through [`Generator::rebuild`], which
/// replaces every placement wholesale.
#[derive(Clone, Debug)]
pub struct Placement {
    word: String,
    start: (usize, usize),
    end: (usize, usize),
    direction: Direction,
}

impl Placement {
    /// The normalized (trimmed, uppercased) word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The `(row, column)` of the word's first letter.
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// The `(row, column)` of the word's last letter.
    pub fn end(&self) -> (usize, usize) {
        self.end
    }

    /// The direction the word runs in.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Two placements are the same entity when they hold the same word, ignoring
/// case. Position and direction are deliberately not part of the comparison;
/// this is the identity used to reject duplicate words.
impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        self.word.eq_ignore_ascii_case(&other.word)
    }
}

impl Eq for Placement {}

/// A square character grid and the registry of words placed into it.
///
/// A grid is passive storage: it is constructed empty and then handed to a
/// [`Generator`], which performs all mutation. The public surface here is
/// read-only.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Array2D<char>,
    placements: Vec<Placement>,
}

impl Grid {
    /// The cell value marking a position no word or filler letter occupies yet.
    pub const EMPTY: char = ' ';

    /// The letters used to fill cells left empty after placement.
    pub const FILLER_ALPHABET: RangeInclusive<char> = 'A'..='Z';

    /// Creates an empty `size` x `size` grid with every cell set to
    /// [`Grid::EMPTY`] and no words registered.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. Callers wanting to bound the size further
    /// (e.g. a web frontend clamping user input) should do so before
    /// constructing the grid.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be at least 1");

        Self {
            size,
            cells: Array2D::filled_with(Self::EMPTY, size, size),
            placements: Vec::new(),
        }
    }

    /// The number of rows (and columns) in the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the character at the given cell, returning [`Option::None`] if the
    /// coordinates are out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        self.cells.get(row, column).copied()
    }

    /// Provides a reference to the underlying character matrix.
    pub fn cells(&self) -> &Array2D<char> {
        &self.cells
    }

    /// The words placed so far, in the order they were added.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns whether a word equal to `word` (ignoring case, after trimming)
    /// has already been placed.
    pub fn contains_word(&self, word: &str) -> bool {
        let needle = word.trim().to_uppercase();
        self.placements.iter().any(|placement| placement.word == needle)
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = char;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut words_iter = self.placements.iter().map(Placement::word);

        for row in self.cells.rows_iter() {
            for &ch in row {
                f.write_fmt(format_args!("{} ", ch))?;
            }

            f.write_fmt(format_args!("| {}\n", words_iter.next().unwrap_or("")))?;
        }

        Ok(())
    }
}

/// Builds a word search puzzle into a single [`Grid`].
///
/// The generator owns the grid for its whole lifetime, so nothing else can
/// write letters without registering a placement. It also owns the random
/// source used to shuffle the placement search and to draw filler letters;
/// construct it with [`Generator::with_seed`] to reproduce a puzzle exactly.
#[derive(Debug)]
pub struct Generator {
    grid: Grid,
    rng: StdRng,
}

impl Generator {
    /// Creates a generator for `grid` seeded from system entropy.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator for `grid` with a fixed seed. Two generators built
    /// with the same seed place the same word sequence identically.
    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The grid built so far.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the generator and returns the finished grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Validates `word` and places it somewhere in the grid, trying all eight
    /// directions in a shuffled order.
    ///
    /// The word is trimmed and uppercased before anything else; validation then
    /// rejects empty input, non-letter characters, words longer than the grid,
    /// and duplicates of already-placed words (ignoring case). A word may cross
    /// existing words wherever the letters at the shared cells are identical.
    /// On any error the grid is left exactly as it was.
    pub fn add_word(&mut self, word: &str) -> Result<(), Error> {
        self.add_word_inner(word, None)
    }

    /// Like [`Generator::add_word`], but only considers positions running in
    /// the given direction.
    pub fn add_word_directed(&mut self, word: &str, direction: Direction) -> Result<(), Error> {
        self.add_word_inner(word, Some(direction))
    }

    fn add_word_inner(&mut self, word: &str, forced: Option<Direction>) -> Result<(), Error> {
        let word = self.validate(word)?;

        let Some(placement) = self.place(&word, forced) else {
            log::debug!("no fit found for {:?}", word);
            return Err(Error::NoFit(word));
        };

        log::debug!(
            "placed {:?} from {:?} to {:?} running {:?}",
            placement.word,
            placement.start,
            placement.end,
            placement.direction
        );

        self.grid.placements.push(placement);

        Ok(())
    }

    /// Normalizes the word and applies every validation rule, in order,
    /// returning the first failure.
    fn validate(&self, word: &str) -> Result<String, Error> {
        let trimmed = word.trim();

        if trimmed.is_empty() {
            return Err(Error::EmptyWord);
        }

        let word = trimmed.to_uppercase();

        if !word.chars().all(char::is_alphabetic) {
            return Err(Error::InvalidCharacters(word));
        }

        if word.chars().count() > self.grid.size {
            return Err(Error::TooLong {
                word,
                size: self.grid.size,
            });
        }

        if self.grid.contains_word(&word) {
            return Err(Error::DuplicateWord(word));
        }

        Ok(word)
    }

    /// Searches for a position for `word` and writes it into the grid,
    /// returning the resulting placement, or [`Option::None`] if no direction
    /// and starting cell can hold it.
    ///
    /// Both the direction order and the candidate starts within each direction
    /// are shuffled, then the first compatible start wins. First-fit keeps the
    /// search linear in the number of candidates; there is no backtracking
    /// across words.
    fn place(&mut self, word: &str, forced: Option<Direction>) -> Option<Placement> {
        let letters: Vec<char> = word.chars().collect();

        let directions = match forced {
            Some(direction) => vec![direction],
            None => {
                let mut directions = Direction::ALL.to_vec();
                directions.shuffle(&mut self.rng);
                directions
            }
        };

        for direction in directions {
            let mut starts = candidate_starts(self.grid.size, letters.len(), direction);
            starts.shuffle(&mut self.rng);

            for start in starts {
                if !fits(&self.grid.cells, &letters, start, direction) {
                    continue;
                }

                write_word(&mut self.grid.cells, &letters, start, direction);

                return Some(Placement {
                    word: word.to_string(),
                    start,
                    end: ray_end(start, letters.len(), direction),
                    direction,
                });
            }
        }

        None
    }

    /// Overwrites every still-empty cell with a random letter from
    /// [`Grid::FILLER_ALPHABET`].
    ///
    /// Cells already holding a letter, placed or filler, are never touched, so
    /// calling this again after the grid is full does nothing.
    pub fn fill_empty_spaces(&mut self) {
        let letters: Vec<char> = Grid::FILLER_ALPHABET.collect();

        for row in 0..self.grid.size {
            for column in 0..self.grid.size {
                if self.grid.cells[(row, column)] == Grid::EMPTY {
                    self.grid.cells[(row, column)] =
                        letters[self.rng.gen_range(0..letters.len())];
                }
            }
        }
    }

    /// Clears the grid and places every registered word again in fresh random
    /// positions, in the order they were originally added.
    ///
    /// Returns `true` if every word found a new position, in which case the
    /// remaining empty cells are filled as by
    /// [`Generator::fill_empty_spaces`]. Returns `false` if any word could not
    /// be re-placed; the grid then holds only the words that did fit, with no
    /// filler, and there is no rollback to the previous layout. Callers that
    /// need the old puzzle back must keep their own copy of the word list and
    /// start over from a fresh grid.
    pub fn rebuild(&mut self) -> bool {
        let words: Vec<String> = self
            .grid
            .placements
            .iter()
            .map(|placement| placement.word.clone())
            .collect();

        self.grid.placements.clear();
        self.grid.cells = Array2D::filled_with(Grid::EMPTY, self.grid.size, self.grid.size);

        let mut replaced_all = true;

        for word in &words {
            if let Err(error) = self.add_word(word) {
                log::warn!("rebuild could not re-place {:?}: {}", word, error);
                replaced_all = false;
            }
        }

        if replaced_all {
            self.fill_empty_spaces();
        }

        replaced_all
    }
}

/// The inclusive range of starting coordinates along one axis from which every
/// step of a `len`-letter word stays inside `0..size` when moving by `delta`.
fn axis_bounds(size: usize, len: usize, delta: isize) -> RangeInclusive<usize> {
    match delta {
        1 => 0..=size - len,
        -1 => len - 1..=size - 1,
        _ => 0..=size - 1,
    }
}

/// Every starting cell from which a `len`-letter word running in `direction`
/// stays fully inside a `size` x `size` grid.
fn candidate_starts(size: usize, len: usize, direction: Direction) -> Vec<(usize, usize)> {
    let (row_delta, column_delta) = direction.deltas();

    let rows = axis_bounds(size, len, row_delta);
    let columns = axis_bounds(size, len, column_delta);

    let mut starts = Vec::new();

    for row in rows {
        for column in columns.clone() {
            starts.push((row, column));
        }
    }

    starts
}

/// Returns whether `letters` can lie at `start` running in `direction`: every
/// covered cell must either be empty or already hold the identical letter.
///
/// The start is assumed to come from [`candidate_starts`], so every step stays
/// in bounds.
fn fits(
    cells: &Array2D<char>,
    letters: &[char],
    start: (usize, usize),
    direction: Direction,
) -> bool {
    let (row_delta, column_delta) = direction.deltas();

    letters.iter().enumerate().all(|(i, &letter)| {
        let row = (start.0 as isize + i as isize * row_delta) as usize;
        let column = (start.1 as isize + i as isize * column_delta) as usize;

        let existing = cells[(row, column)];
        existing == Grid::EMPTY || existing == letter
    })
}

/// Writes `letters` into the grid at `start` running in `direction`.
fn write_word(
    cells: &mut Array2D<char>,
    letters: &[char],
    start: (usize, usize),
    direction: Direction,
) {
    let (row_delta, column_delta) = direction.deltas();

    for (i, &letter) in letters.iter().enumerate() {
        let row = (start.0 as isize + i as isize * row_delta) as usize;
        let column = (start.1 as isize + i as isize * column_delta) as usize;

        cells[(row, column)] = letter;
    }
}

/// The cell holding the last letter of a `len`-letter word starting at `start`
/// and running in `direction`.
fn ray_end(start: (usize, usize), len: usize, direction: Direction) -> (usize, usize) {
    let (row_delta, column_delta) = direction.deltas();
    let steps = len as isize - 1;

    (
        (start.0 as isize + steps * row_delta) as usize,
        (start.1 as isize + steps * column_delta) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(size: usize) -> Generator {
        Generator::with_seed(Grid::new(size), 7)
    }

    fn filled_cell_count(grid: &Grid) -> usize {
        grid.cells()
            .elements_row_major_iter()
            .filter(|&&ch| ch != Grid::EMPTY)
            .count()
    }

    #[test]
    fn empty_or_whitespace_words_are_rejected() {
        let mut generator = generator(10);

        assert_eq!(generator.add_word(""), Err(Error::EmptyWord));
        assert_eq!(generator.add_word("   \t"), Err(Error::EmptyWord));
        assert!(generator.grid().placements().is_empty());
    }

    #[test]
    fn non_letter_characters_are_rejected() {
        let mut generator = generator(10);

        assert!(matches!(
            generator.add_word("hello123"),
            Err(Error::InvalidCharacters(_))
        ));
        assert!(matches!(
            generator.add_word("hello world"),
            Err(Error::InvalidCharacters(_))
        ));
    }

    #[test]
    fn words_longer_than_the_grid_are_rejected() {
        let mut generator = generator(5);

        assert!(matches!(
            generator.add_word("dictionary"),
            Err(Error::TooLong { size: 5, .. })
        ));
    }

    #[test]
    fn duplicate_words_are_rejected_ignoring_case() {
        let mut generator = generator(10);

        assert_eq!(generator.add_word("Hello"), Ok(()));
        assert_eq!(
            generator.add_word("HELLO"),
            Err(Error::DuplicateWord(String::from("HELLO")))
        );
        assert_eq!(
            generator.add_word("hello"),
            Err(Error::DuplicateWord(String::from("HELLO")))
        );
        assert_eq!(generator.grid().placements().len(), 1);
    }

    #[test]
    fn words_are_normalized_before_placement() {
        let mut generator = generator(10);

        assert_eq!(generator.add_word("  cat  "), Ok(()));

        assert_eq!(generator.grid().placements()[0].word(), "CAT");
        assert_eq!(filled_cell_count(generator.grid()), 3);
    }

    #[test]
    fn candidate_starts_stay_in_bounds() {
        let all_within =
            |starts: &[(usize, usize)],
             rows: RangeInclusive<usize>,
             columns: RangeInclusive<usize>| {
                starts
                    .iter()
                    .all(|&(row, column)| rows.contains(&row) && columns.contains(&column))
            };

        let right = candidate_starts(5, 3, Direction::Right);
        assert_eq!(right.len(), 15);
        assert!(all_within(&right, 0..=4, 0..=2));

        let left = candidate_starts(5, 3, Direction::Left);
        assert_eq!(left.len(), 15);
        assert!(all_within(&left, 0..=4, 2..=4));

        let up = candidate_starts(5, 3, Direction::Up);
        assert_eq!(up.len(), 15);
        assert!(all_within(&up, 2..=4, 0..=4));

        let diagonal = candidate_starts(5, 3, Direction::DiagonalUpRight);
        assert_eq!(diagonal.len(), 9);
        assert!(all_within(&diagonal, 2..=4, 0..=2));

        // a word as long as the grid has exactly one diagonal start
        assert_eq!(
            candidate_starts(3, 3, Direction::DiagonalDownRight),
            vec![(0, 0)]
        );
    }

    #[test]
    fn compatibility_accepts_empty_and_matching_cells_only() {
        let mut grid = Grid::new(3);
        grid.cells[(0, 0)] = 'A';

        assert!(fits(&grid.cells, &['A', 'B'], (0, 0), Direction::Right));
        assert!(fits(&grid.cells, &['B', 'A'], (0, 1), Direction::Left));
        assert!(fits(&grid.cells, &['B', 'C'], (1, 0), Direction::Right));
        assert!(!fits(&grid.cells, &['X', 'B'], (0, 0), Direction::Right));
        assert!(!fits(&grid.cells, &['X', 'B', 'C'], (0, 0), Direction::Down));
    }

    #[test]
    fn endpoints_follow_the_direction() {
        for direction in Direction::ALL {
            let mut generator = generator(10);

            generator
                .add_word_directed("hello", direction)
                .unwrap_or_else(|error| panic!("{:?}: {}", direction, error));

            let placement = &generator.grid().placements()[0];
            let (row_delta, column_delta) = direction.deltas();

            assert_eq!(placement.direction(), direction);
            assert_eq!(
                placement.end(),
                (
                    (placement.start().0 as isize + 4 * row_delta) as usize,
                    (placement.start().1 as isize + 4 * column_delta) as usize,
                ),
                "end position mismatch for {:?}",
                direction
            );

            for (i, letter) in "HELLO".chars().enumerate() {
                let row = (placement.start().0 as isize + i as isize * row_delta) as usize;
                let column =
                    (placement.start().1 as isize + i as isize * column_delta) as usize;
                assert_eq!(generator.grid()[(row, column)], letter);
            }
        }
    }

    #[test]
    fn placement_identity_is_the_word_alone() {
        let first = Placement {
            word: String::from("CAT"),
            start: (0, 0),
            end: (0, 2),
            direction: Direction::Right,
        };
        let second = Placement {
            word: String::from("CAT"),
            start: (4, 4),
            end: (2, 2),
            direction: Direction::DiagonalUpLeft,
        };

        assert_eq!(first, second);
    }

    #[test]
    fn failed_placement_leaves_the_grid_untouched() {
        let mut generator = generator(3);

        // the only down-right diagonal start for a 3-letter word is (0, 0)
        generator
            .add_word_directed("dog", Direction::DiagonalDownRight)
            .unwrap();

        assert_eq!(
            generator.add_word_directed("cat", Direction::DiagonalDownRight),
            Err(Error::NoFit(String::from("CAT")))
        );

        assert_eq!(generator.grid().placements().len(), 1);
        assert_eq!(generator.grid()[(0, 0)], 'D');
        assert_eq!(generator.grid()[(1, 1)], 'O');
        assert_eq!(generator.grid()[(2, 2)], 'G');
        assert_eq!(filled_cell_count(generator.grid()), 3);
    }

    #[test]
    fn single_cell_grid_holds_exactly_one_letter() {
        let mut generator = generator(1);

        assert_eq!(generator.add_word("A"), Ok(()));
        assert_eq!(generator.grid()[(0, 0)], 'A');

        assert_eq!(
            generator.add_word("B"),
            Err(Error::NoFit(String::from("B")))
        );
        assert_eq!(
            generator.add_word("a"),
            Err(Error::DuplicateWord(String::from("A")))
        );
    }

    #[test]
    fn grid_display_lists_the_placed_words() {
        let mut generator = generator(3);
        generator.add_word("dog").unwrap();

        let rendered = generator.grid().to_string();

        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("| DOG"));
    }
}
