use std::fmt;

/// Direction of a push. Tiles slide toward the named edge.
///
/// # Example
/// ```
/// use t48_core::direction::Direction;
/// assert_eq!(Direction::ALL.len(), 4);
/// assert_eq!(Direction::Left.index(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// Every direction, in table order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Position of this direction in [`Direction::ALL`].
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Traversal table for a `width × height` row-major grid.
    ///
    /// Lines run along the major axis, tiles slide along the minor axis
    /// toward `origin`'s edge.
    ///
    /// # Example
    /// ```
    /// use t48_core::direction::Direction;
    /// let s = Direction::Down.sweep(4, 3);
    /// assert_eq!(s.origin, 8);
    /// assert_eq!(s.minor_step, -4);
    /// assert_eq!((s.minor_len, s.major_len), (3, 4));
    /// ```
    #[must_use]
    pub fn sweep(self, width: usize, height: usize) -> Sweep {
        let w = width as isize;
        match self {
            Direction::Up => Sweep {
                origin: 0,
                minor_step: w,
                major_step: 1,
                minor_len: height,
                major_len: width,
            },
            Direction::Down => Sweep {
                origin: width * (height - 1),
                minor_step: -w,
                major_step: 1,
                minor_len: height,
                major_len: width,
            },
            Direction::Left => Sweep {
                origin: 0,
                minor_step: 1,
                major_step: w,
                minor_len: width,
                major_len: height,
            },
            Direction::Right => Sweep {
                origin: width - 1,
                minor_step: -1,
                major_step: w,
                minor_len: width,
                major_len: height,
            },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Per-direction traversal of the grid, computed once per board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sweep {
    /// Linear index of the first cell of line 0 (on the pushed edge).
    pub origin: usize,
    /// Index offset between consecutive cells of one line.
    pub minor_step: isize,
    /// Index offset between the first cells of consecutive lines.
    pub major_step: isize,
    /// Cells per line.
    pub minor_len: usize,
    /// Number of lines.
    pub major_len: usize,
}

impl Sweep {
    /// Linear index of cell `pos` in line `line`. `pos == 0` is on the pushed edge.
    #[inline(always)]
    #[must_use]
    pub fn index(&self, line: usize, pos: usize) -> usize {
        (self.origin as isize + line as isize * self.major_step + pos as isize * self.minor_step)
            as usize
    }
}
