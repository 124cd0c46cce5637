use crate::error::{NeomapError, Result};
use std::fmt;

/// NeoGeo button names, in positional argument order
pub const NEOGEO_BUTTONS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Xbox controller face buttons
///
/// The discriminant is the canonical jump-table slot (A=0, B=1, X=2, Y=3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonLetter {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
}

impl ButtonLetter {
    pub const ALL: [ButtonLetter; 4] = [
        ButtonLetter::A,
        ButtonLetter::B,
        ButtonLetter::X,
        ButtonLetter::Y,
    ];

    /// Parses a letter case-insensitively
    pub fn parse(letter: &str) -> Option<Self> {
        match letter.to_ascii_uppercase().as_str() {
            "A" => Some(ButtonLetter::A),
            "B" => Some(ButtonLetter::B),
            "X" => Some(ButtonLetter::X),
            "Y" => Some(ButtonLetter::Y),
            _ => None,
        }
    }

    /// Canonical slot index of this button
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            ButtonLetter::A => 'A',
            ButtonLetter::B => 'B',
            ButtonLetter::X => 'X',
            ButtonLetter::Y => 'Y',
        }
    }
}

impl fmt::Display for ButtonLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Validates the four Xbox letters given for NeoGeo buttons A, B, C, D
///
/// The first invalid letter is returned as the error, later ones are logged.
pub fn validate_buttons<S: AsRef<str>>(letters: &[S; 4]) -> Result<[ButtonLetter; 4]> {
    let mut parsed = [ButtonLetter::A; 4];
    let mut first_error = None;

    for (position, letter) in letters.iter().enumerate() {
        let letter = letter.as_ref();
        match ButtonLetter::parse(letter) {
            Some(button) => parsed[position] = button,
            None => {
                let err = NeomapError::InvalidButton {
                    letter: letter.to_string(),
                    position: NEOGEO_BUTTONS[position],
                };
                if first_error.is_some() {
                    tracing::error!("{}", err);
                } else {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(parsed),
    }
}

/// Which NeoGeo handler each Xbox jump-table slot should point at
///
/// Index = Xbox slot (A, B, X, Y), value = NeoGeo button index (0..3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonMapping([usize; 4]);

impl ButtonMapping {
    pub const IDENTITY: ButtonMapping = ButtonMapping([0, 1, 2, 3]);

    pub fn new(values: [usize; 4]) -> Self {
        Self(values)
    }

    /// Builds the mapping by inverse lookup over the NeoGeo positions
    ///
    /// A slot whose letter is never named keeps the value 0. That case is
    /// logged but left as is.
    pub fn from_letters(letters: &[ButtonLetter; 4]) -> Self {
        let mut mapping = [0usize; 4];
        for (neogeo, letter) in letters.iter().enumerate() {
            mapping[letter.slot()] = neogeo;
        }

        let mapping = Self(mapping);
        if !mapping.is_bijection() {
            for button in ButtonLetter::ALL {
                if !letters.contains(&button) {
                    tracing::warn!(
                        "Xbox button {} is not assigned; it will use NeoGeo button {}",
                        button,
                        NEOGEO_BUTTONS[mapping.0[button.slot()]]
                    );
                }
            }
        }
        mapping
    }

    /// NeoGeo button index assigned to the given Xbox slot
    pub fn source_for(&self, slot: usize) -> usize {
        self.0[slot]
    }

    pub fn values(&self) -> [usize; 4] {
        self.0
    }

    /// True when every value 0..3 appears exactly once
    pub fn is_bijection(&self) -> bool {
        let mut seen = [false; 4];
        for &value in &self.0 {
            if value >= 4 || seen[value] {
                return false;
            }
            seen[value] = true;
        }
        true
    }
}
