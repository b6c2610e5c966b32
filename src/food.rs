//! Food placement and what eating it does to the snake, score and pace.

use crate::{
    config::{
        ConfigError,
        FoodConfig,
    },
    io::RandomSource,
    progress::{
        Score,
        TickInterval,
    },
    snake::{
        Segment,
        SnakeBody,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct FoodItem {
    pub position: Segment,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FoodSpawner {
    config: FoodConfig,
    item: FoodItem,
}

impl FoodSpawner {
    /// A spawner with no food placed yet; call [`spawn`](Self::spawn) before play.
    ///
    /// Fails when the region has no cell to place food on.
    pub fn new(config: FoodConfig) -> Result<Self, ConfigError> {
        if config.region.is_empty() {
            return Err(ConfigError::EmptyFoodRegion);
        }
        Ok(Self {
            config,
            item: FoodItem::default(),
        })
    }

    pub fn item(&self) -> FoodItem {
        self.item
    }

    /// Place food on a uniformly drawn cell of the configured region.
    ///
    /// The cell may lie under the snake; it only counts once the head reaches it.
    pub fn spawn(&mut self, rng: &mut impl RandomSource) -> Segment {
        let region = self.config.region;
        let position = Segment::new(
            rng.uniform(region.x_min, region.x_max),
            rng.uniform(region.y_min, region.y_max),
        );
        self.item = FoodItem {
            position,
            active: true,
        };
        debug!("food at {:?}", position);
        position
    }

    pub fn check_eaten(&self, head: Segment) -> bool {
        self.item.active && self.item.position == head
    }

    /// Eat the food if `head` is on it: grow the snake, add to the score,
    /// speed up and respawn. Returns whether anything was eaten.
    pub fn feed<const C: usize>(
        &mut self,
        head: Segment,
        snake: &mut SnakeBody<C>,
        score: &mut Score,
        pace: &mut TickInterval,
        rng: &mut impl RandomSource,
    ) -> bool {
        if !self.check_eaten(head) {
            return false;
        }
        snake.grow(self.config.growth);
        score.add(self.config.score_increment);
        pace.speed_up();
        info!(
            "food eaten: length {}, score {}, tick {} ms",
            snake.len(),
            score.value(),
            pace.current().as_millis()
        );
        self.spawn(rng);
        true
    }
}
