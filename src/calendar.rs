//! Calendar dates and the board each date produces.
//!
//! The board is an 8x8 grid with a fixed outline of wall cells. A date covers
//! three more cells: one for the month, one for the day of month and one for
//! the weekday. The cell positions come from fixed lookup tables.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, BOARD_COLS, BOARD_ROWS};
use crate::error::PuzzleError;

/// Board outline: 1 marks a playable cell, 0 a wall.
const OUTLINE: [[u8; BOARD_COLS]; BOARD_ROWS] = [
    [0, 0, 0, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 0, 0, 0],
];

/// Number of wall cells in the outline.
pub const WALL_COUNT: usize = 14;

/// Cell index covered by each month, January first.
const MONTH_CELLS: [usize; 12] = [20, 29, 12, 21, 30, 13, 22, 5, 14, 23, 6, 15];

/// Cell index covered by each day of month, day 1 first.
const DAY_CELLS: [usize; 31] = [
    24, 17, 10, 3, 32, 25, 18, 11, 4, 33, 26, 19, 34, 27, 42, 35, 28, 43, 36, 51, 44, 37, 59,
    52, 45, 38, 31, 60, 53, 46, 39,
];

/// Cell index covered by each weekday, Sunday first.
const WEEKDAY_CELLS: [usize; 7] = [50, 48, 57, 40, 49, 58, 41];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Zero-based position in the year.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Longest possible length of the month; February counts 29 days.
    pub const fn max_days(self) -> u8 {
        match self {
            Self::Feb => 29,
            Self::Apr | Self::Jun | Self::Sep | Self::Nov => 30,
            _ => 31,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }

    fn cell(self) -> usize {
        MONTH_CELLS[self.index()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Month {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|month| month.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| PuzzleError::UnknownMonth(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Sun,
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
    ];

    /// Zero-based position in the week, Sunday first.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
        }
    }

    fn cell(self) -> usize {
        WEEKDAY_CELLS[self.index()]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|weekday| weekday.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| PuzzleError::UnknownWeekday(s.to_string()))
    }
}

/// A puzzle date. The weekday is chosen independently of the real calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    month: Month,
    day: u8,
    weekday: Weekday,
}

impl CalendarDate {
    /// Creates a date, rejecting days the board has no cell for.
    ///
    /// Any day in 1..=31 is accepted for any month, matching the physical
    /// board, which does not know month lengths.
    pub fn new(day: u8, month: Month, weekday: Weekday) -> Result<Self, PuzzleError> {
        if !(1..=31).contains(&day) {
            return Err(PuzzleError::InvalidDay(day));
        }
        Ok(Self {
            month,
            day,
            weekday,
        })
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Every date of a leap year combined with every weekday, in month, day,
    /// weekday order.
    pub fn all() -> impl Iterator<Item = Self> {
        Month::ALL.into_iter().flat_map(|month| {
            (1..=month.max_days()).flat_map(move |day| {
                Weekday::ALL.into_iter().map(move |weekday| Self {
                    month,
                    day,
                    weekday,
                })
            })
        })
    }

    /// Cell indices covered by this date: month, day, weekday.
    pub fn blocked_cells(&self) -> [usize; 3] {
        [
            self.month.cell(),
            DAY_CELLS[usize::from(self.day) - 1],
            self.weekday.cell(),
        ]
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.weekday, self.month, self.day)
    }
}

/// The empty board: outline walls only.
pub fn outline_board() -> Board {
    Board::with_walls(BOARD_ROWS, BOARD_COLS, |row, col| OUTLINE[row][col] == 0)
}

/// Builds the puzzle board for a date.
pub fn create_board(date: &CalendarDate) -> Result<Board, PuzzleError> {
    let mut board = outline_board();
    for index in date.blocked_cells() {
        board.block(index)?;
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_outline_board() {
        let board = outline_board();
        assert_eq!(board.count(Cell::Wall), WALL_COUNT);
        assert_eq!(board.count(Cell::Free), 64 - WALL_COUNT);
    }

    #[test]
    fn test_every_date_blocks_three_cells() {
        let mut dates = 0;
        for date in CalendarDate::all() {
            let board = create_board(&date).unwrap();
            assert_eq!(board.count(Cell::Wall), WALL_COUNT, "{date}");
            assert_eq!(board.count(Cell::Blocker), 3, "{date}");
            assert_eq!(board.count(Cell::Free), 64 - WALL_COUNT - 3, "{date}");
            dates += 1;
        }
        assert_eq!(dates, 366 * 7);
    }

    #[test]
    fn test_lookup_tables_hit_distinct_playable_cells() {
        let board = outline_board();
        let mut seen = Vec::new();
        for cell in MONTH_CELLS.iter().chain(&DAY_CELLS).chain(&WEEKDAY_CELLS) {
            assert_eq!(board.cell(*cell), Some(Cell::Free), "cell {cell}");
            assert!(!seen.contains(cell), "cell {cell} used twice");
            seen.push(*cell);
        }
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn test_create_board_snapshot() {
        let date = CalendarDate::new(1, Month::Jan, Weekday::Mon).unwrap();
        let board = create_board(&date).unwrap();
        insta::assert_snapshot!(board.to_string(), @r"
        ###....#
        ##......
        #...*...
        *.......
        ........
        .......#
        *.....##
        #....###
        ");
    }

    #[test]
    fn test_invalid_day_rejected() {
        assert!(matches!(
            CalendarDate::new(0, Month::Mar, Weekday::Tue),
            Err(PuzzleError::InvalidDay(0))
        ));
        assert!(matches!(
            CalendarDate::new(32, Month::Mar, Weekday::Tue),
            Err(PuzzleError::InvalidDay(32))
        ));
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("oct".parse::<Month>().unwrap(), Month::Oct);
        assert_eq!("FRI".parse::<Weekday>().unwrap(), Weekday::Fri);
        assert!(matches!(
            "Foo".parse::<Month>(),
            Err(PuzzleError::UnknownMonth(_))
        ));
        assert!(matches!(
            "Someday".parse::<Weekday>(),
            Err(PuzzleError::UnknownWeekday(_))
        ));
    }

    #[test]
    fn test_index_roundtrip() {
        for month in Month::ALL {
            assert_eq!(Month::from_index(month.index()), Some(month));
        }
        for weekday in Weekday::ALL {
            assert_eq!(Weekday::from_index(weekday.index()), Some(weekday));
        }
        assert_eq!(Month::from_index(12), None);
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_display() {
        let date = CalendarDate::new(16, Month::Oct, Weekday::Fri).unwrap();
        assert_eq!(date.to_string(), "Fri Oct 16");
    }
}
