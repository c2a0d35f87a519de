use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Takes the first `pair_count` icons of the palette, doubles them and shuffles the lot into the grid.
///
/// Pairing holds by construction, whatever order the shuffle produces.
pub fn shuffled_board<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Board {
    let pair_count = usize::from(config.pair_count());
    let mut icons = icon_product(config.shapes(), config.colors());
    icons.truncate(pair_count);
    icons.extend_from_within(..);
    icons.shuffle(rng);

    log::trace!("Shuffled icons: {:?}", icons);
    Board::from_icons(config.size(), icons).expect("validated config always yields a paired board")
}

/// Purely random placement reproducible from a seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &GameConfig) -> Board {
        log::debug!(
            "Generating {:?} board with seed {}",
            config.size(),
            self.seed
        );
        let mut rng = SmallRng::seed_from_u64(self.seed);
        shuffled_board(config, &mut rng)
    }
}
