use bevy::prelude::*;
use rand::{Rng, seq::IndexedRandom};

use crate::constants::{GRADIENT_STEPS, PLAYER_ONE_START, PLAYER_TWO_START};
use crate::controls::ControlScheme;
use crate::snake::{Arena, Direction, Position, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    /// Higher score wins; equal scores tie regardless of who crashed.
    pub fn from_scores(one: u32, two: u32) -> Self {
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
            std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver(Outcome),
}

/// Where a respawned food item may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodPlacement {
    /// Any playable cell, including ones covered by a snake.
    Anywhere,
    /// Only cells no snake covers; falls back to `Anywhere` on a full board.
    AvoidSnakes,
}

/// Direction requests gathered between two ticks, one slot per player.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingTurns([Option<Direction>; 2]);

impl PendingTurns {
    /// Keeps the request if it is valid against the snake's current heading,
    /// replacing any earlier one for the same player.
    pub fn request(&mut self, game: &Match, player: Player, direction: Direction) -> bool {
        if game.is_over() || !game.snake(player).accepts(direction) {
            return false;
        }
        self.0[player.index()] = Some(direction);
        true
    }

    #[cfg(test)]
    pub fn get(&self, player: Player) -> Option<Direction> {
        self.0[player.index()]
    }

    pub fn take(&mut self) -> [Option<Direction>; 2] {
        std::mem::take(&mut self.0)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub eaten: Vec<Player>,
    pub finished: Option<Outcome>,
}

/// Full state of one two-player match.
#[derive(Resource, Debug, Clone)]
pub struct Match {
    arena: Arena,
    snakes: [Snake; 2],
    food: Position,
    phase: Phase,
    placement: FoodPlacement,
}

fn gradient(color_at: impl Fn(f32) -> Color) -> Vec<Color> {
    (0..GRADIENT_STEPS)
        .map(|i| color_at(f32::from(i) * 5.0 / 255.0))
        .collect()
}

impl Match {
    pub fn new(arena: Arena, placement: FoodPlacement, rng: &mut impl Rng) -> Self {
        let snakes = [
            Snake::new(
                PLAYER_ONE_START,
                ControlScheme::Arrows,
                gradient(|fade| Color::srgb(0.0, 1.0 - fade, 1.0)),
            ),
            Snake::new(
                PLAYER_TWO_START,
                ControlScheme::Wasd,
                gradient(|fade| Color::srgb(1.0, 215.0 / 255.0 - fade, 0.0)),
            ),
        ];
        let food = spawn_food(placement, &arena, &snakes, rng);
        Self::with_snakes(arena, snakes, food, placement)
    }

    pub fn with_snakes(
        arena: Arena,
        snakes: [Snake; 2],
        food: Position,
        placement: FoodPlacement,
    ) -> Self {
        Self {
            arena,
            snakes,
            food,
            phase: Phase::NotStarted,
            placement,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn snake(&self, player: Player) -> &Snake {
        &self.snakes[player.index()]
    }

    pub fn snakes(&self) -> &[Snake; 2] {
        &self.snakes
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// Turns a snake. The first accepted turn by either player starts the match.
    pub fn steer(&mut self, player: Player, direction: Direction) -> bool {
        if self.is_over() || !self.snakes[player.index()].steer(direction) {
            return false;
        }
        if self.phase == Phase::NotStarted {
            info!("{} moved first, match started", player.label());
            self.phase = Phase::Running;
        }
        true
    }

    /// Advances the match by one fixed step.
    ///
    /// Both snakes move before either collision is evaluated, so a crash into
    /// each other ends the match for both at once.
    pub fn tick(&mut self, turns: [Option<Direction>; 2], rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            return report;
        }

        for (player, turn) in Player::ALL.into_iter().zip(turns) {
            if let Some(direction) = turn {
                self.steer(player, direction);
            }
        }
        if self.phase != Phase::Running {
            return report;
        }

        let cell = self.arena.cell;
        for snake in &mut self.snakes {
            snake.advance(cell);
        }

        let [one, two] = &self.snakes;
        let crashed = [
            one.check_collision(two, &self.arena),
            two.check_collision(one, &self.arena),
        ];
        if crashed.iter().any(|c| *c) {
            let outcome = Outcome::from_scores(one.score, two.score);
            info!(
                "crash (player 1: {}, player 2: {}), final score {}-{}: {:?}",
                crashed[0], crashed[1], one.score, two.score, outcome
            );
            self.phase = Phase::GameOver(outcome);
            report.finished = Some(outcome);
            return report;
        }

        for player in Player::ALL {
            if self.snakes[player.index()].head() == self.food {
                let snake = &mut self.snakes[player.index()];
                snake.grow();
                debug!(
                    "{} ate at {:?}, score {}, length {}",
                    player.label(),
                    self.food,
                    snake.score,
                    snake.len()
                );
                self.food = spawn_food(self.placement, &self.arena, &self.snakes, rng);
                report.eaten.push(player);
            }
        }

        report
    }
}

pub fn spawn_food(
    placement: FoodPlacement,
    arena: &Arena,
    snakes: &[Snake],
    rng: &mut impl Rng,
) -> Position {
    if placement == FoodPlacement::AvoidSnakes {
        let free: Vec<Position> = arena
            .cells()
            .filter(|cell| !snakes.iter().any(|snake| snake.occupies(*cell)))
            .collect();
        if let Some(pos) = free.choose(rng) {
            return *pos;
        }
        warn!("no free cell left for food, placing it on a snake");
    }

    let columns = (arena.width - 3 * arena.margin) / arena.cell;
    let rows = (arena.height - 3 * arena.margin) / arena.cell;
    Position::new(
        arena.margin + rng.random_range(0..columns) * arena.cell,
        arena.margin + rng.random_range(0..rows) * arena.cell,
    )
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::constants::FOOD_PLACEMENT;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn snake(x: i32, y: i32, controls: ControlScheme) -> Snake {
        Snake::new(Position::new(x, y), controls, vec![Color::WHITE])
    }

    fn duel(one: Position, two: Position, food: Position) -> Match {
        Match::with_snakes(
            Arena::default(),
            [
                snake(one.x, one.y, ControlScheme::Arrows),
                snake(two.x, two.y, ControlScheme::Wasd),
            ],
            food,
            FoodPlacement::AvoidSnakes,
        )
    }

    fn assert_lengths(game: &Match) {
        for snake in game.snakes() {
            assert_eq!(snake.len(), snake.score as usize + 1);
        }
    }

    #[test]
    fn new_match_waits_for_input() {
        let mut rng = rng();
        let mut game = Match::new(Arena::default(), FoodPlacement::AvoidSnakes, &mut rng);
        assert_eq!(game.phase(), Phase::NotStarted);
        assert!(game.arena().contains(game.food()));

        let report = game.tick([None, None], &mut rng);
        assert_eq!(report, TickReport::default());
        assert_eq!(game.snake(Player::One).head(), PLAYER_ONE_START);
        assert_eq!(game.snake(Player::Two).head(), PLAYER_TWO_START);
        assert_eq!(game.phase(), Phase::NotStarted);
    }

    #[test]
    fn one_player_starts_the_match_for_both() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(200, 300),
            Position::new(600, 300),
            Position::new(20, 20),
        );

        game.tick([None, Some(Direction::Up)], &mut rng);

        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake(Player::One).head(), Position::new(200, 300));
        assert_eq!(game.snake(Player::Two).head(), Position::new(600, 280));
    }

    #[test]
    fn eating_grows_and_respawns_food() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(100, 100),
            Position::new(600, 300),
            Position::new(120, 100),
        );

        let report = game.tick([Some(Direction::Right), None], &mut rng);

        assert_eq!(report.eaten, vec![Player::One]);
        let one = game.snake(Player::One);
        assert_eq!(one.score, 1);
        assert_eq!(one.len(), 2);
        assert_ne!(game.food(), Position::new(120, 100));
        assert!(game.arena().contains(game.food()));
        assert!(!game.snakes().iter().any(|s| s.occupies(game.food())));
        assert_lengths(&game);
    }

    #[test]
    fn head_on_crash_ends_both_and_scores_decide() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(200, 300),
            Position::new(280, 300),
            Position::new(20, 20),
        );
        game.snakes[1].grow();

        game.tick([Some(Direction::Right), Some(Direction::Left)], &mut rng);
        assert_eq!(game.phase(), Phase::Running);

        let report = game.tick([None, None], &mut rng);
        assert_eq!(report.finished, Some(Outcome::Winner(Player::Two)));
        assert_eq!(game.phase(), Phase::GameOver(Outcome::Winner(Player::Two)));
    }

    #[test]
    fn equal_scores_tie() {
        assert_eq!(Outcome::from_scores(3, 3), Outcome::Tie);
        assert_eq!(Outcome::from_scores(4, 3), Outcome::Winner(Player::One));
        assert_eq!(Outcome::from_scores(0, 1), Outcome::Winner(Player::Two));
    }

    #[test]
    fn wall_crash_ends_the_match() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(20, 300),
            Position::new(600, 300),
            Position::new(400, 20),
        );

        let report = game.tick([Some(Direction::Left), None], &mut rng);

        assert_eq!(report.finished, Some(Outcome::Tie));
        assert!(game.is_over());
    }

    #[test]
    fn finished_match_ignores_input_and_ticks() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(20, 300),
            Position::new(600, 300),
            Position::new(400, 20),
        );
        game.tick([Some(Direction::Left), None], &mut rng);

        assert!(!game.steer(Player::Two, Direction::Up));
        let report = game.tick([None, Some(Direction::Up)], &mut rng);
        assert_eq!(report, TickReport::default());
        assert_eq!(game.snake(Player::Two).head(), Position::new(600, 300));
    }

    #[test]
    fn no_food_is_eaten_on_a_crash_tick() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(200, 300),
            Position::new(220, 280),
            Position::new(220, 300),
        );

        game.tick([Some(Direction::Right), Some(Direction::Down)], &mut rng);

        assert!(game.is_over());
        assert_eq!(game.snake(Player::One).score, 0);
        assert_eq!(game.food(), Position::new(220, 300));
    }

    #[test]
    fn pending_turn_keeps_last_valid_request() {
        let mut rng = rng();
        let mut game = duel(
            Position::new(200, 300),
            Position::new(600, 300),
            Position::new(20, 20),
        );
        game.tick([Some(Direction::Right), None], &mut rng);

        let mut pending = PendingTurns::default();
        assert!(pending.request(&game, Player::One, Direction::Up));
        assert!(!pending.request(&game, Player::One, Direction::Left));
        assert_eq!(pending.get(Player::One), Some(Direction::Up));
        assert!(pending.request(&game, Player::One, Direction::Down));
        assert_eq!(pending.get(Player::One), Some(Direction::Down));

        let turns = pending.take();
        assert_eq!(turns, [Some(Direction::Down), None]);
        assert_eq!(pending, PendingTurns::default());

        game.tick(turns, &mut rng);
        assert_eq!(game.snake(Player::One).head(), Position::new(220, 320));
    }

    #[test]
    fn lengths_track_scores_over_a_long_run() {
        let mut rng = rng();
        let mut game = Match::new(Arena::default(), FoodPlacement::Anywhere, &mut rng);
        let route = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

        for step in 0..200 {
            let turn = route[(step / 3) % route.len()];
            game.tick([Some(turn), Some(turn)], &mut rng);
            assert_lengths(&game);
            if game.is_over() {
                break;
            }
        }
    }

    #[test]
    fn anywhere_placement_stays_on_the_grid() {
        let mut rng = rng();
        let arena = Arena::default();
        for _ in 0..500 {
            let pos = spawn_food(FoodPlacement::Anywhere, &arena, &[], &mut rng);
            assert!(arena.contains(pos));
            assert_eq!(pos.x % arena.cell, 0);
            assert_eq!(pos.y % arena.cell, 0);
        }
    }

    #[test]
    fn avoiding_placement_finds_the_only_free_cell() {
        let mut rng = rng();
        let arena = Arena {
            width: 120,
            height: 100,
            cell: 20,
            margin: 20,
        };
        // Playable cells: (20,20), (40,20), (60,20), (20,40), (40,40), (60,40).
        let cells: Vec<_> = arena.cells().collect();
        assert_eq!(cells.len(), 6);

        let mut blocker = snake(20, 20, ControlScheme::Arrows);
        blocker.steer(Direction::Right);
        for _ in 0..4 {
            blocker.grow();
        }
        for step in [Direction::Right, Direction::Right, Direction::Down, Direction::Left] {
            blocker.steer(step);
            blocker.advance(arena.cell);
        }
        // Body now covers everything but (20,40).
        for _ in 0..20 {
            let pos = spawn_food(FoodPlacement::AvoidSnakes, &arena, &[blocker.clone()], &mut rng);
            assert_eq!(pos, Position::new(20, 40));
        }
    }

    #[test]
    fn shipped_placement_can_drop_food_on_a_snake() {
        let mut rng = rng();
        let arena = Arena {
            width: 100,
            height: 80,
            cell: 20,
            margin: 20,
        };
        // Two playable cells, one of them covered.
        let sitter = snake(20, 20, ControlScheme::Arrows);

        let landed_on_snake = (0..200)
            .map(|_| spawn_food(FOOD_PLACEMENT, &arena, &[sitter.clone()], &mut rng))
            .any(|pos| pos == Position::new(20, 20));
        assert!(landed_on_snake);
    }

    #[test]
    fn shipped_match_keeps_lengths_in_step() {
        let mut rng = rng();
        let mut game = Match::new(Arena::default(), FOOD_PLACEMENT, &mut rng);
        assert!(game.arena().contains(game.food()));

        for _ in 0..5 {
            game.tick([Some(Direction::Up), None], &mut rng);
            assert_lengths(&game);
        }
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn idle_snake_eating_food_on_its_head_crashes_next_tick() {
        let mut rng = rng();
        let mut game = Match::with_snakes(
            Arena::default(),
            [
                snake(200, 300, ControlScheme::Arrows),
                snake(600, 300, ControlScheme::Wasd),
            ],
            Position::new(600, 300),
            FOOD_PLACEMENT,
        );

        let report = game.tick([Some(Direction::Up), None], &mut rng);
        assert_eq!(report.eaten, vec![Player::Two]);
        assert_eq!(game.snake(Player::Two).len(), 2);

        let report = game.tick([None, None], &mut rng);
        assert_eq!(report.finished, Some(Outcome::Winner(Player::Two)));
    }
}
