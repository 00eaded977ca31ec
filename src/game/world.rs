use anyhow::{Result, ensure};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::{DirectionController, INITIAL_HEADING},
    state::{EndReason, GameStatus, Snake},
    vector::{Heading, Vec3i},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over; nothing moved
    Idle,
    /// The snake moved one cell
    Moved { ate_food: bool },
    /// This tick ended the game
    Ended(EndReason),
}

/// One game session on a cubic lattice.
///
/// Owns the snake, the food cell, the score and the turn queue. All input
/// goes through [`GridWorld::request_direction`] and time advances only
/// through [`GridWorld::tick`].
pub struct GridWorld {
    config: GameConfig,
    snake: Snake,
    food: Option<Vec3i>,
    score: u32,
    steps: u32,
    status: GameStatus,
    controller: DirectionController,
    rng: StdRng,
}

impl GridWorld {
    /// Start a new game with an entropy-seeded food generator
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a new game with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let snake = initial_snake(&config);
        let mut world = Self {
            config,
            snake,
            food: None,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            controller: DirectionController::new(),
            rng,
        };
        world.reset();
        Ok(world)
    }

    /// Start from an explicit position, mostly for scripted scenarios
    pub fn from_parts(
        config: GameConfig,
        snake: Snake,
        heading: Heading,
        food: Vec3i,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;

        let world = Self {
            config,
            snake,
            food: Some(food),
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            controller: DirectionController::with_heading(heading),
            rng: StdRng::seed_from_u64(seed),
        };

        ensure!(
            world.snake.cells().all(|cell| world.is_in_bounds(cell)),
            "snake leaves the {0}x{0}x{0} grid",
            world.config.grid_size
        );
        ensure!(world.is_in_bounds(food), "food {food} is off the grid");
        ensure!(!world.snake.occupies(food), "food {food} is under the snake");
        Ok(world)
    }

    /// Back to the opening position: centred snake heading +x, score 0, new food
    pub fn reset(&mut self) {
        self.snake = initial_snake(&self.config);
        self.controller.reset();
        self.score = 0;
        self.steps = 0;
        self.status = GameStatus::Running;
        self.food = spawn_food(&self.config, &self.snake, &mut self.rng);

        if self.food.is_none() {
            self.finish(EndReason::BoardFilled);
        }

        tracing::info!(
            grid_size = self.config.grid_size,
            head = %self.snake.head(),
            "game reset"
        );
    }

    /// Queue a turn from any input source. Ignored once the game is over.
    pub fn request_direction(&mut self, v: Vec3i) -> bool {
        self.status.is_running() && self.controller.request_direction(v)
    }

    /// Typed variant of [`GridWorld::request_direction`]
    pub fn request(&mut self, heading: Heading) -> bool {
        self.status.is_running() && self.controller.request(heading)
    }

    /// Advance the game by exactly one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.status.is_over() {
            return TickOutcome::Idle;
        }

        let heading = self.controller.consume_tick();
        let new_head = self.snake.head() + heading.delta();
        self.steps += 1;

        if let Some(reason) = self.check_collision(new_head) {
            self.finish(reason);
            return TickOutcome::Ended(reason);
        }

        let ate_food = self.food == Some(new_head);
        self.snake.advance(new_head, ate_food);

        if ate_food {
            self.score = self.score.saturating_add(self.config.food_reward);
            self.food = spawn_food(&self.config, &self.snake, &mut self.rng);

            if self.food.is_none() {
                self.finish(EndReason::BoardFilled);
                return TickOutcome::Ended(EndReason::BoardFilled);
            }
        }

        TickOutcome::Moved { ate_food }
    }

    /// Wall first, then any currently occupied cell, tail included
    fn check_collision(&self, cell: Vec3i) -> Option<EndReason> {
        if !self.is_in_bounds(cell) {
            return Some(EndReason::Wall);
        }

        if self.snake.occupies(cell) {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    fn finish(&mut self, reason: EndReason) {
        self.status = GameStatus::GameOver(reason);
        tracing::info!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            steps = self.steps,
            "game over"
        );
    }

    pub fn is_in_bounds(&self, cell: Vec3i) -> bool {
        let range = 0..self.config.grid_size;
        range.contains(&cell.x) && range.contains(&cell.y) && range.contains(&cell.z)
    }

    pub fn is_occupied(&self, cell: Vec3i) -> bool {
        self.snake.occupies(cell)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` only once the snake has filled the grid
    pub fn food(&self) -> Option<Vec3i> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Heading applied on the last tick
    pub fn heading(&self) -> Heading {
        self.controller.committed()
    }

    pub fn controller(&self) -> &DirectionController {
        &self.controller
    }
}

fn initial_snake(config: &GameConfig) -> Snake {
    Snake::new(
        Vec3i::splat(config.center()),
        INITIAL_HEADING,
        config.initial_snake_length,
    )
}

/// Every cell of the lattice
fn lattice(size: i32) -> impl Iterator<Item = Vec3i> {
    (0..size).flat_map(move |x| {
        (0..size).flat_map(move |y| (0..size).map(move |z| Vec3i::new(x, y, z)))
    })
}

/// Pick a free cell uniformly at random, or `None` when the snake fills the grid.
///
/// Rejection sampling first; a crowded grid falls back to choosing among the
/// enumerated free cells so the search is always bounded.
fn spawn_food(config: &GameConfig, snake: &Snake, rng: &mut StdRng) -> Option<Vec3i> {
    let total = config.cell_count();
    if snake.len() >= total {
        return None;
    }

    let size = config.grid_size;
    for _ in 0..total {
        let cell = Vec3i::new(
            rng.gen_range(0..size),
            rng.gen_range(0..size),
            rng.gen_range(0..size),
        );
        if !snake.occupies(cell) {
            tracing::debug!(food = %cell, "food placed");
            return Some(cell);
        }
    }

    let free: Vec<Vec3i> = lattice(size).filter(|cell| !snake.occupies(*cell)).collect();
    let cell = free.choose(rng).copied();
    tracing::debug!(food = ?cell, free = free.len(), "food placed on crowded grid");
    cell
}
