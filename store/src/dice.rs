use crate::score_card::RowColor;
use rand::distributions::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct DiceRoller {
    rng: StdRng,
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DiceRoller {
    pub fn new(opt_seed: Option<u64>) -> Self {
        Self {
            rng: match opt_seed {
                None => StdRng::from_rng(rand::thread_rng()).unwrap(),
                Some(seed) => SeedableRng::seed_from_u64(seed),
            },
        }
    }

    /// Roll the six dice: one per row color plus the two white dice, each an
    /// independent uniform value between 1 and 6.
    pub fn roll(&mut self) -> DiceSet {
        let between = Uniform::new_inclusive(1, 6);

        let mut colored = [0u8; 4];
        for value in colored.iter_mut() {
            *value = between.sample(&mut self.rng);
        }
        let whites = (between.sample(&mut self.rng), between.sample(&mut self.rng));

        DiceSet { colored, whites }
    }
}

/// One round's dice faces
///
/// Qwixx is played with four colored dice (one per scoring row) and two
/// white dice; all six are rerolled at the start of every round.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Deserialize, Default)]
pub struct DiceSet {
    /// Colored dice faces, indexed by [`RowColor`]
    pub colored: [u8; 4],
    /// The two white dice faces
    pub whites: (u8, u8),
}

impl DiceSet {
    /// Sum of the two white dice, usable by every seat.
    pub fn white_sum(&self) -> u8 {
        self.whites.0 + self.whites.1
    }

    pub fn color_value(&self, color: RowColor) -> u8 {
        self.colored[color.index()]
    }

    /// The two sums the active seat can build on `color`'s row: each white
    /// die paired with that color's die.
    pub fn color_sums(&self, color: RowColor) -> [u8; 2] {
        let value = self.color_value(color);
        [self.whites.0 + value, self.whites.1 + value]
    }

    pub fn to_display_string(self) -> String {
        format!(
            "R{} Y{} G{} B{} | W{} W{}",
            self.colored[0], self.colored[1], self.colored[2], self.colored[3], self.whites.0, self.whites.1
        )
    }
}
