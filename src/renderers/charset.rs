//! Box-drawing character sets and junction merging for the text canvas.

// ─── CharSet ─────────────────────────────────────────────────────────────────

/// Which character set to use for box-drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Unicode,
    Ascii,
}

// ─── BoxChars ────────────────────────────────────────────────────────────────

/// Glyphs for one outline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub tee_right: char, // ├ left-T opening right
    pub tee_left: char,  // ┤ right-T opening left
    pub tee_down: char,  // ┬ top-T opening down
    pub tee_up: char,    // ┴ bottom-T opening up
    pub cross: char,     // ┼
    pub diagonal_up: char,
    pub diagonal_down: char,
    pub arrow_right: char,
    pub arrow_left: char,
    pub arrow_down: char,
    pub arrow_up: char,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            tee_right: '├',
            tee_left: '┤',
            tee_down: '┬',
            tee_up: '┴',
            cross: '┼',
            diagonal_up: '╱',
            diagonal_down: '╲',
            arrow_right: '►',
            arrow_left: '◄',
            arrow_down: '▼',
            arrow_up: '▲',
        }
    }

    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
            tee_right: '+',
            tee_left: '+',
            tee_down: '+',
            tee_up: '+',
            cross: '+',
            diagonal_up: '/',
            diagonal_down: '\\',
            arrow_right: '>',
            arrow_left: '<',
            arrow_down: 'v',
            arrow_up: '^',
        }
    }

    /// Rounded corners, used for process boxes and ellipses.
    pub fn rounded(cs: CharSet) -> Self {
        match cs {
            CharSet::Unicode => Self {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                ..Self::unicode()
            },
            CharSet::Ascii => Self {
                top_left: '(',
                top_right: ')',
                bottom_left: '(',
                bottom_right: ')',
                ..Self::ascii()
            },
        }
    }

    /// Heavy outline, used for strokes of width 3 and above.
    pub fn heavy(cs: CharSet) -> Self {
        match cs {
            CharSet::Unicode => Self {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                horizontal: '━',
                vertical: '┃',
                ..Self::unicode()
            },
            CharSet::Ascii => Self {
                top_left: '#',
                top_right: '#',
                bottom_left: '#',
                bottom_right: '#',
                horizontal: '=',
                vertical: '#',
                ..Self::ascii()
            },
        }
    }

    pub fn for_charset(cs: CharSet) -> Self {
        match cs {
            CharSet::Unicode => Self::unicode(),
            CharSet::Ascii => Self::ascii(),
        }
    }
}

// ─── Arms ────────────────────────────────────────────────────────────────────

/// Directions a junction cell connects to, as a bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Arms(u8);

impl Arms {
    pub const UP: Arms = Arms(0b0001);
    pub const DOWN: Arms = Arms(0b0010);
    pub const LEFT: Arms = Arms(0b0100);
    pub const RIGHT: Arms = Arms(0b1000);
    const ALL: Arms = Arms(0b1111);

    pub fn contains(self, other: Arms) -> bool {
        self.0 & other.0 == other.0
    }

    /// Decode a light box-drawing character. Returns None for anything else,
    /// including heavy and rounded glyphs.
    pub fn from_char(c: char) -> Option<Self> {
        let (up, down, left, right) = (Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT);
        Some(match c {
            '─' | '-' => left | right,
            '│' | '|' => up | down,
            '┌' => down | right,
            '┐' => down | left,
            '└' => up | right,
            '┘' => up | left,
            '├' => up | down | right,
            '┤' => up | down | left,
            '┬' => down | left | right,
            '┴' => up | left | right,
            '┼' | '+' => Self::ALL,
            _ => return None,
        })
    }

    pub fn merge(self, other: Self) -> Self {
        self | other
    }

    /// Junction glyph for these arms. A lone arm draws as a straight line.
    pub fn to_char(self, cs: CharSet) -> char {
        let bc = BoxChars::for_charset(cs);
        match self.0 {
            0b0000 => ' ',
            0b0001 | 0b0010 | 0b0011 => bc.vertical,
            0b0100 | 0b1000 | 0b1100 => bc.horizontal,
            0b1010 => bc.top_left,
            0b0110 => bc.top_right,
            0b1001 => bc.bottom_left,
            0b0101 => bc.bottom_right,
            0b1011 => bc.tee_right,
            0b0111 => bc.tee_left,
            0b1110 => bc.tee_down,
            0b1101 => bc.tee_up,
            _ => bc.cross,
        }
    }
}

impl std::ops::BitOr for Arms {
    type Output = Arms;

    fn bitor(self, rhs: Arms) -> Arms {
        Arms(self.0 | rhs.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
