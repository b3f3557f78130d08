//! Authoritative game rules: the per-tick state transition and the operations
//! input handlers are allowed to call.
//!
//! Everything here is plain data and pure computation. Randomness and the
//! shape phase are passed in by the caller so a tick can be replayed exactly.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use super::{
    Direction, FRUIT_SCORE, FRUIT_VARIANTS, GRID_SIZE, INITIAL_DIRECTION, INITIAL_INTERVAL_MS,
    INITIAL_SNAKE_POSITION, INTERVAL_STEP_MS, MIN_INTERVAL_MS, Position, Shape, WAVY_AMPLITUDE,
    WAVY_PERIOD, ZIGZAG_AMPLITUDE, ZIGZAG_HALF_PERIOD,
};

/// What the candidate head ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    Body,
}

/// Result of a single call to [`GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed.
    Idle,
    /// The snake advanced one step without eating.
    Moved,
    /// The snake advanced onto the fruit at `fruit` and grew by one segment.
    Ate { fruit: Position },
    /// The snake grew into the last free cell; no fruit can be placed.
    Filled,
    /// The candidate head was rejected and the game ended.
    Collided(CollisionKind),
}

/// Coarse phase of the game, derived from the state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// The single authoritative game state.
#[derive(Resource, Clone, Debug)]
pub struct GameState {
    body: VecDeque<Position>,
    direction: Direction,
    fruit: Position,
    fruit_variant: usize,
    shape: Shape,
    score: u32,
    interval_ms: u32,
    running: bool,
    game_over: bool,
    started: bool,
    grid_size: i32,
}

impl GameState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_grid_size(GRID_SIZE, rng)
    }

    /// Fresh state on an `grid_size` by `grid_size` arena.
    pub fn with_grid_size<R: Rng>(grid_size: i32, rng: &mut R) -> Self {
        assert!(grid_size >= 2, "arena must have room for a snake and a fruit");

        let start = if INITIAL_SNAKE_POSITION.in_grid(grid_size) {
            INITIAL_SNAKE_POSITION
        } else {
            Position::new(grid_size / 2, grid_size / 2)
        };
        let body = VecDeque::from([start]);
        let fruit = generate_fruit(&body, grid_size, rng);

        GameState {
            body,
            direction: INITIAL_DIRECTION,
            fruit,
            fruit_variant: 0,
            shape: Shape::Straight,
            score: 0,
            interval_ms: INITIAL_INTERVAL_MS,
            running: false,
            game_over: false,
            started: false,
            grid_size,
        }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    /// Cosmetic fruit kind, advanced on every fruit placement.
    pub fn fruit_variant(&self) -> usize {
        self.fruit_variant
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.running {
            GamePhase::Playing
        } else if self.started {
            GamePhase::Paused
        } else {
            GamePhase::Ready
        }
    }

    /// Speed figure shown on the HUD; grows as the interval shrinks.
    pub fn speed_level(&self) -> u32 {
        (200u32.saturating_sub(self.interval_ms) as f32 / 2.0).round() as u32
    }

    /// Advances the game by one step. `phase` drives the shape perturbation.
    pub fn tick<R: Rng>(&mut self, phase: Duration, rng: &mut R) -> TickOutcome {
        if !self.running || self.game_over {
            return TickOutcome::Idle;
        }

        let candidate = next_head(self.head(), self.direction, self.shape, phase);

        if let Some(kind) = self.collision_at(candidate) {
            self.game_over = true;
            self.running = false;
            return TickOutcome::Collided(kind);
        }

        self.body.push_front(candidate);

        if candidate != self.fruit {
            self.body.pop_back();
            return TickOutcome::Moved;
        }

        self.score += FRUIT_SCORE;
        self.interval_ms = self
            .interval_ms
            .saturating_sub(INTERVAL_STEP_MS)
            .max(MIN_INTERVAL_MS);

        if self.body.len() >= (self.grid_size * self.grid_size) as usize {
            self.game_over = true;
            self.running = false;
            return TickOutcome::Filled;
        }

        self.place_fruit(rng);
        TickOutcome::Ate { fruit: candidate }
    }

    /// Applies `requested` unless the game is not running or it would reverse
    /// the snake. Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !self.running || requested.is_opposite(self.direction) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Moves to the next shape in the cycle. Allowed in every phase.
    pub fn cycle_shape(&mut self) -> Shape {
        self.shape = self.shape.next();
        self.shape
    }

    /// Starts or resumes play. Has no effect once the game is over.
    pub fn start(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.running = true;
        self.started = true;
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Replaces the state with a fresh one. The fruit variant keeps cycling.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let variant = (self.fruit_variant + 1) % FRUIT_VARIANTS;
        *self = Self::with_grid_size(self.grid_size, rng);
        self.fruit_variant = variant;
    }

    fn collision_at(&self, candidate: Position) -> Option<CollisionKind> {
        if !candidate.in_grid(self.grid_size) {
            Some(CollisionKind::Wall)
        } else if self.body.contains(&candidate) {
            Some(CollisionKind::Body)
        } else {
            None
        }
    }

    fn place_fruit<R: Rng>(&mut self, rng: &mut R) {
        self.fruit = generate_fruit(&self.body, self.grid_size, rng);
        self.fruit_variant = (self.fruit_variant + 1) % FRUIT_VARIANTS;
    }
}

/// Off-axis offset for a shape at the given phase, before rounding.
pub fn shape_offset(shape: Shape, phase: Duration) -> f32 {
    match shape {
        Shape::Wavy => {
            let t = phase.as_secs_f64() / WAVY_PERIOD.as_secs_f64();
            t.sin() as f32 * WAVY_AMPLITUDE
        }
        Shape::Zigzag => {
            if (phase.as_millis() / ZIGZAG_HALF_PERIOD.as_millis()) % 2 == 0 {
                ZIGZAG_AMPLITUDE
            } else {
                -ZIGZAG_AMPLITUDE
            }
        }
        Shape::Straight | Shape::Spiral => 0.0,
    }
}

/// Candidate cell for the head: one step along `direction`, nudged on the
/// other axis by the shape offset and rounded to the nearest cell.
pub fn next_head(head: Position, direction: Direction, shape: Shape, phase: Duration) -> Position {
    let (dx, dy) = direction.delta();
    let offset = shape_offset(shape, phase);
    let (mx, my) = if direction.is_horizontal() {
        (dx as f32, dy as f32 + offset)
    } else {
        (dx as f32 + offset, dy as f32)
    };
    Position::new(head.x + mx.round() as i32, head.y + my.round() as i32)
}

/// Picks a uniformly random free cell by rejection sampling.
///
/// Panics if `body` already covers the whole grid, since no cell could ever
/// be found.
pub fn generate_fruit<R: Rng>(
    body: &VecDeque<Position>,
    grid_size: i32,
    rng: &mut R,
) -> Position {
    assert!(
        body.len() < (grid_size * grid_size) as usize,
        "snake covers the whole arena"
    );

    loop {
        let candidate = Position::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !body.contains(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
impl GameState {
    /// Running state with a hand-placed body and fruit.
    pub(crate) fn scenario(body: &[Position], direction: Direction, fruit: Position) -> Self {
        GameState {
            body: body.iter().copied().collect(),
            direction,
            fruit,
            fruit_variant: 0,
            shape: Shape::Straight,
            score: 0,
            interval_ms: INITIAL_INTERVAL_MS,
            running: true,
            game_over: false,
            started: true,
            grid_size: GRID_SIZE,
        }
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub(crate) fn set_grid_size(&mut self, grid_size: i32) {
        self.grid_size = grid_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const P0: Duration = Duration::ZERO;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn new_state_matches_initial_layout() {
        let state = GameState::new(&mut rng());
        assert_eq!(state.body().len(), 1);
        assert_eq!(state.head(), INITIAL_SNAKE_POSITION);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.shape(), Shape::Straight);
        assert_eq!(state.score(), 0);
        assert_eq!(state.interval(), Duration::from_millis(150));
        assert_eq!(state.phase(), GamePhase::Ready);
        assert!(!state.body().contains(&state.fruit()));
        assert!(state.fruit().in_grid(GRID_SIZE));
    }

    #[test]
    fn tick_is_idle_until_started() {
        let mut rng = rng();
        let mut state = GameState::new(&mut rng);
        let before = state.body().clone();
        assert_eq!(state.tick(P0, &mut rng), TickOutcome::Idle);
        assert_eq!(state.body(), &before);

        state.start();
        assert_ne!(state.tick(P0, &mut rng), TickOutcome::Idle);
        assert_eq!(state.head(), p(11, 10));
    }

    #[test]
    fn eating_from_length_one_grows_to_two() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(10, 10)], Direction::Right, p(11, 10));

        let outcome = state.tick(P0, &mut rng);

        assert_eq!(outcome, TickOutcome::Ate { fruit: p(11, 10) });
        assert_eq!(state.body(), &VecDeque::from([p(11, 10), p(10, 10)]));
        assert_eq!(state.score(), 10);
        assert_eq!(state.interval(), Duration::from_millis(148));
        assert!(!state.body().contains(&state.fruit()));
        assert_eq!(state.fruit_variant(), 1);
    }

    #[test]
    fn moving_left_off_the_edge_ends_the_game() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(0, 10)], Direction::Left, p(5, 5));

        let outcome = state.tick(P0, &mut rng);

        assert_eq!(outcome, TickOutcome::Collided(CollisionKind::Wall));
        assert!(state.is_game_over());
        assert!(!state.is_running());
        assert_eq!(state.body(), &VecDeque::from([p(0, 10)]));
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn walls_on_every_side() {
        let cases = [
            (p(19, 3), Direction::Right),
            (p(4, 0), Direction::Up),
            (p(4, 19), Direction::Down),
        ];
        for (head, direction) in cases {
            let mut state = GameState::scenario(&[head], direction, p(10, 10));
            assert_eq!(
                state.tick(P0, &mut rng()),
                TickOutcome::Collided(CollisionKind::Wall),
                "{direction:?} from {head:?}"
            );
        }
    }

    #[test]
    fn running_into_own_body_ends_the_game() {
        let mut rng = rng();
        // Head at (5,5) moving down into (5,6), which is part of the body.
        let body = [p(5, 5), p(6, 5), p(6, 6), p(5, 6), p(4, 6)];
        let mut state = GameState::scenario(&body, Direction::Down, p(0, 0));

        assert_eq!(
            state.tick(P0, &mut rng),
            TickOutcome::Collided(CollisionKind::Body)
        );
        assert_eq!(state.body().len(), 5);
        assert_eq!(state.head(), p(5, 5));
    }

    #[test]
    fn moving_into_the_current_tail_cell_collides() {
        let mut rng = rng();
        let body = [p(5, 5), p(6, 5), p(6, 6), p(5, 6)];
        let mut state = GameState::scenario(&body, Direction::Down, p(0, 0));
        assert_eq!(
            state.tick(P0, &mut rng),
            TickOutcome::Collided(CollisionKind::Body)
        );
    }

    #[test]
    fn plain_move_drops_the_tail() {
        let mut rng = rng();
        let body = [p(5, 5), p(4, 5), p(3, 5)];
        let mut state = GameState::scenario(&body, Direction::Right, p(0, 0));

        assert_eq!(state.tick(P0, &mut rng), TickOutcome::Moved);
        assert_eq!(state.body(), &VecDeque::from([p(6, 5), p(5, 5), p(4, 5)]));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn opposite_direction_is_rejected() {
        let mut state = GameState::scenario(&[p(5, 5)], Direction::Right, p(0, 0));
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);

        assert!(state.set_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Up);
        assert!(!state.set_direction(Direction::Down));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn direction_changes_need_a_running_game() {
        let mut state = GameState::new(&mut rng());
        assert!(!state.set_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Right);

        state.start();
        state.pause();
        assert_eq!(state.phase(), GamePhase::Paused);
        assert!(!state.set_direction(Direction::Up));
    }

    #[test]
    fn shape_cycles_in_any_phase() {
        let mut state = GameState::new(&mut rng());
        assert_eq!(state.cycle_shape(), Shape::Wavy);
        assert_eq!(state.cycle_shape(), Shape::Zigzag);
        assert_eq!(state.cycle_shape(), Shape::Spiral);
        assert_eq!(state.cycle_shape(), Shape::Straight);
    }

    #[test]
    fn start_is_refused_after_game_over() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(0, 0)], Direction::Up, p(5, 5));
        state.tick(P0, &mut rng);
        assert!(!state.start());
        assert!(!state.is_running());
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(10, 10)], Direction::Right, p(11, 10));
        state.cycle_shape();
        state.tick(P0, &mut rng);
        assert_eq!(state.score(), 10);

        state.reset(&mut rng);

        assert_eq!(state.body(), &VecDeque::from([INITIAL_SNAKE_POSITION]));
        assert_eq!(state.direction(), INITIAL_DIRECTION);
        assert_eq!(state.shape(), Shape::Straight);
        assert_eq!(state.score(), 0);
        assert_eq!(state.interval(), Duration::from_millis(150));
        assert_eq!(state.phase(), GamePhase::Ready);
        assert!(!state.body().contains(&state.fruit()));
        assert_eq!(state.fruit_variant(), 2);
    }

    #[test]
    fn interval_is_floored() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(0, 0)], Direction::Right, p(1, 0));
        state.interval_ms = MIN_INTERVAL_MS + 1;
        state.tick(P0, &mut rng);
        assert_eq!(state.interval(), Duration::from_millis(MIN_INTERVAL_MS as u64));

        state.fruit = state.head();
        state.fruit.x += 1;
        state.tick(P0, &mut rng);
        assert_eq!(state.interval(), Duration::from_millis(MIN_INTERVAL_MS as u64));
        assert_eq!(state.score(), 20);
    }

    #[test]
    fn speed_level_tracks_interval() {
        let mut state = GameState::new(&mut rng());
        assert_eq!(state.speed_level(), 25);
        state.interval_ms = 149;
        assert_eq!(state.speed_level(), 26);
        state.interval_ms = MIN_INTERVAL_MS;
        assert_eq!(state.speed_level(), 60);
    }

    #[test]
    fn straight_and_spiral_have_no_offset() {
        for phase in [0, 157, 314, 942, 1234] {
            let phase = Duration::from_millis(phase);
            assert_eq!(shape_offset(Shape::Straight, phase), 0.0);
            assert_eq!(shape_offset(Shape::Spiral, phase), 0.0);
        }
    }

    #[test]
    fn wavy_deflects_only_near_crest_and_trough() {
        let head = p(10, 10);
        let at = |ms| next_head(head, Direction::Right, Shape::Wavy, Duration::from_millis(ms));

        assert_eq!(at(0), p(11, 10));
        assert_eq!(at(100), p(11, 10));
        assert_eq!(at(314), p(11, 11));
        assert_eq!(at(942), p(11, 9));

        let vertical = next_head(head, Direction::Up, Shape::Wavy, Duration::from_millis(314));
        assert_eq!(vertical, p(11, 9));
    }

    #[test]
    fn zigzag_alternates_every_half_period() {
        let head = p(10, 10);
        let at = |ms| next_head(head, Direction::Left, Shape::Zigzag, Duration::from_millis(ms));

        assert_eq!(at(0), p(9, 11));
        assert_eq!(at(299), p(9, 11));
        assert_eq!(at(300), p(9, 9));
        assert_eq!(at(600), p(9, 11));
    }

    #[test]
    fn deflection_into_a_wall_collides() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(10, 19)], Direction::Right, p(0, 0));
        state.set_shape(Shape::Zigzag);
        assert_eq!(
            state.tick(Duration::ZERO, &mut rng),
            TickOutcome::Collided(CollisionKind::Wall)
        );
    }

    #[test]
    fn fruit_never_lands_on_the_body() {
        let mut rng = rng();
        // Fill every cell of a 4x4 grid except (3,3).
        let body: VecDeque<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| p(x, y)))
            .filter(|c| *c != p(3, 3))
            .collect();
        for _ in 0..20 {
            assert_eq!(generate_fruit(&body, 4, &mut rng), p(3, 3));
        }
    }

    #[test]
    #[should_panic(expected = "snake covers the whole arena")]
    fn fruit_generation_refuses_a_full_grid() {
        let body: VecDeque<Position> = (0..2)
            .flat_map(|y| (0..2).map(move |x| p(x, y)))
            .collect();
        generate_fruit(&body, 2, &mut rng());
    }

    #[test]
    fn filling_the_arena_ends_the_game() {
        let mut rng = rng();
        let mut state = GameState::scenario(&[p(0, 0), p(0, 1), p(1, 1)], Direction::Right, p(1, 0));
        state.set_grid_size(2);

        assert_eq!(state.tick(P0, &mut rng), TickOutcome::Filled);
        assert_eq!(state.body().len(), 4);
        assert!(state.is_game_over());
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        for game in 0..50 {
            let mut state = GameState::new(&mut rng);
            state.start();
            let mut phase = Duration::ZERO;

            while state.is_running() {
                if rng.random_ratio(1, 4) {
                    state.set_direction(directions[rng.random_range(0..4)]);
                }
                if rng.random_ratio(1, 20) {
                    state.cycle_shape();
                }
                phase += state.interval();

                let len_before = state.body().len();
                let score_before = state.score();
                let fruit_before = state.fruit();

                let outcome = state.tick(phase, &mut rng);

                let unique: HashSet<_> = state.body().iter().collect();
                assert_eq!(unique.len(), state.body().len(), "game {game}: duplicate cell");
                assert!(state.body().iter().all(|c| c.in_grid(GRID_SIZE)));

                match outcome {
                    TickOutcome::Ate { fruit } => {
                        assert_eq!(fruit, fruit_before);
                        assert_eq!(state.head(), fruit_before);
                        assert_eq!(state.body().len(), len_before + 1);
                        assert_eq!(state.score(), score_before + FRUIT_SCORE);
                        assert!(!state.body().contains(&state.fruit()));
                    }
                    TickOutcome::Moved => {
                        assert_ne!(state.head(), fruit_before);
                        assert_eq!(state.body().len(), len_before);
                        assert_eq!(state.score(), score_before);
                    }
                    TickOutcome::Collided(_) | TickOutcome::Filled => {
                        assert!(state.is_game_over());
                    }
                    TickOutcome::Idle => unreachable!("tick while running"),
                }

                if phase > Duration::from_secs(600) {
                    break;
                }
            }
        }
    }
}
