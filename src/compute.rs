//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG, so callers
//! control determinism (useful for tests with a seeded RNG).

use rand::Rng;

use crate::entities::{
    Cloud, Command, GameState, Obstacle, Phase, Player, Rect, CLOUD_SPRITES, DINO_FRAMES,
    OBSTACLE_SPRITES,
};

// ── Simulation cadence ───────────────────────────────────────────────────────

/// Fixed tick rate of the simulation.
pub const FPS: u32 = 24;

/// Ticks per score point: the score advances twice per second of play.
pub const SCORE_TICKS: u32 = FPS / 2;

// ── Player tuning ────────────────────────────────────────────────────────────

/// Fixed horizontal position of the player sprite's left edge.
pub const DINO_X: i32 = 5;

/// Peak jump height in rows.
pub const JUMP_HEIGHT: f64 = 5.0;

/// Tick budget for a full jump (takeoff to landing).
pub const JUMP_DURATION_TICKS: u32 = (FPS as f64 * 0.7) as u32;

/// Ticks between run-cycle frames, so the animation advances roughly six
/// times per second.
pub const ANIM_INTERVAL_TICKS: u32 = FPS / 6;

// ── Difficulty tuning ────────────────────────────────────────────────────────

pub const INITIAL_OBSTACLE_SPEED: f64 = 1.2;
pub const INITIAL_SPAWN_INTERVAL_SECS: f64 = 2.3;
pub const INITIAL_SPAWN_INTERVAL_TICKS: u32 = (INITIAL_SPAWN_INTERVAL_SECS * FPS as f64) as u32;

/// Added to the spawn speed at every stage boundary; there is no ceiling.
pub const SPEED_STEP: f64 = 0.25;

/// Subtracted from the spawn interval at every stage boundary, floored at
/// `MIN_SPAWN_INTERVAL_SECS`.
pub const SPAWN_STEP_SECS: f64 = 0.2;
pub const MIN_SPAWN_INTERVAL_SECS: f64 = 0.7;

pub const STAGE_TICKS: u32 = 30 * FPS;
pub const DAY_NIGHT_TICKS: u32 = 60 * FPS;

/// A spawn is suppressed while the last-spawned obstacle's right edge is
/// still within this many of its own widths of the right boundary. Only the
/// last obstacle is inspected, not the full active set.
pub const SPAWN_CLEARANCE_FACTOR: f64 = 2.5;

/// Ground line sits this many rows above the bottom edge of the screen.
const GROUND_OFFSET: i32 = 1;

// ── Sky tuning ───────────────────────────────────────────────────────────────

pub const MAX_CLOUDS: usize = 4;
const CLOUD_MIN_Y: i32 = 2;
const CLOUD_MAX_Y: i32 = 5;
const CLOUD_MIN_SPEED: f64 = 0.15;
const CLOUD_MAX_SPEED: f64 = 0.35;
/// No new cloud while another is within this many columns of the right edge.
const CLOUD_EDGE_GAP: i32 = 12;

// ── Constructors ─────────────────────────────────────────────────────────────

fn new_player(ground_y: i32) -> Player {
    let base_y_top = ground_y - DINO_FRAMES[0].height() + 1;
    Player {
        x: DINO_X,
        y_top: base_y_top,
        base_y_top,
        jumping: false,
        jump_ticks: 0,
        frame_idx: 0,
        anim_ticks: 0,
    }
}

/// Build the initial game state for the given terminal dimensions. The game
/// begins on the start screen; `start_round` moves it into play.
pub fn init_state(width: u16, height: u16, high_score: u32) -> GameState {
    let ground_y = height as i32 - 1 - GROUND_OFFSET;
    GameState {
        phase: Phase::Start,
        player: new_player(ground_y),
        obstacles: Vec::new(),
        clouds: Vec::new(),
        score: 0,
        high_score,
        is_day: true,
        tick_count: 0,
        stage_ticks: 0,
        day_night_ticks: 0,
        speed: INITIAL_OBSTACLE_SPEED,
        spawn_interval_ticks: INITIAL_SPAWN_INTERVAL_TICKS,
        last_spawn_tick: 0,
        width,
        height,
        ground_y,
    }
}

/// Full round reset: fresh player, empty field, difficulty and day/night
/// state back to their initial values. The high score and terminal
/// dimensions carry over.
pub fn start_round(state: &GameState) -> GameState {
    GameState {
        phase: Phase::Playing,
        player: new_player(state.ground_y),
        obstacles: Vec::new(),
        clouds: Vec::new(),
        score: 0,
        is_day: true,
        tick_count: 0,
        stage_ticks: 0,
        day_night_ticks: 0,
        speed: INITIAL_OBSTACLE_SPEED,
        spawn_interval_ticks: INITIAL_SPAWN_INTERVAL_TICKS,
        last_spawn_tick: 0,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Advance the state machine for one input command.
///
/// `Quit` is a loop concern: the caller breaks out of the tick loop before
/// the command reaches the simulation, so it is a no-op here in every phase.
pub fn apply_command(state: &GameState, cmd: Command) -> GameState {
    match (state.phase, cmd) {
        (_, Command::Quit) => state.clone(),
        // Any key starts a round from the title screen.
        (Phase::Start, _) => start_round(state),
        (Phase::Playing, Command::Jump) => GameState {
            player: jump(&state.player),
            ..state.clone()
        },
        (Phase::Playing, Command::TogglePause) => GameState {
            phase: Phase::Paused,
            ..state.clone()
        },
        (Phase::Paused, Command::TogglePause) => GameState {
            phase: Phase::Playing,
            ..state.clone()
        },
        (Phase::GameOver, Command::Restart) => start_round(state),
        _ => state.clone(),
    }
}

/// Begin a jump. A jump cannot be re-triggered or chained mid-air, so this
/// is a no-op (not an error) while already airborne.
pub fn jump(player: &Player) -> Player {
    if player.jumping {
        return player.clone();
    }
    Player {
        jumping: true,
        jump_ticks: 0,
        ..player.clone()
    }
}

// ── Jump physics ─────────────────────────────────────────────────────────────

/// Upward displacement in rows at `progress` ∈ [0, 1] through a jump: a
/// symmetric parabola that is 0 at both ends and `JUMP_HEIGHT` at the apex.
pub fn jump_displacement(progress: f64) -> f64 {
    JUMP_HEIGHT - 4.0 * JUMP_HEIGHT * (progress - 0.5) * (progress - 0.5)
}

fn step_player(player: &Player) -> Player {
    let mut p = player.clone();

    // Run-cycle animation advances unconditionally, including mid-jump.
    p.anim_ticks += 1;
    if p.anim_ticks >= ANIM_INTERVAL_TICKS {
        p.frame_idx = (p.frame_idx + 1) % DINO_FRAMES.len();
        p.anim_ticks = 0;
    }

    if p.jumping {
        p.jump_ticks += 1;
        let progress = p.jump_ticks as f64 / JUMP_DURATION_TICKS as f64;
        p.y_top = p.base_y_top - jump_displacement(progress).round() as i32;
        if p.jump_ticks >= JUMP_DURATION_TICKS {
            // Snap exactly back onto the ground; no residual rounding drift.
            p.jumping = false;
            p.y_top = p.base_y_top;
        }
    }

    p
}

// ── Obstacles ────────────────────────────────────────────────────────────────

fn step_obstacle(obstacle: &Obstacle) -> Obstacle {
    Obstacle {
        x: obstacle.x - obstacle.speed,
        ..obstacle.clone()
    }
}

/// Clearance gate: suppress spawning while the most recently spawned
/// obstacle is still too close to the right boundary. Inspects only the
/// last obstacle; widening this to the whole set would change game feel.
fn spawn_clear(obstacles: &[Obstacle], width: u16) -> bool {
    match obstacles.last() {
        Some(last) => {
            let w = last.sprite.width() as f64;
            last.x + w <= width as f64 - SPAWN_CLEARANCE_FACTOR * w
        }
        None => true,
    }
}

/// Create an obstacle fully off-screen to the right: a uniformly random
/// catalog variant at a uniformly random x in a window offset from the
/// right edge by 2×..5× the current speed (plus the sprite's own width,
/// so wide sprites still start entirely off-screen).
fn spawn_obstacle(width: u16, ground_y: i32, speed: f64, rng: &mut impl Rng) -> Obstacle {
    let sprite = &OBSTACLE_SPRITES[rng.gen_range(0..OBSTACLE_SPRITES.len())];
    let min_x = width as i32 + (speed * 2.0) as i32;
    let max_x = width as i32 + (speed * 5.0) as i32 + sprite.width();
    Obstacle {
        x: rng.gen_range(min_x..=max_x) as f64,
        y_top: ground_y - sprite.height() + 1,
        sprite,
        speed,
    }
}

// ── Clouds ───────────────────────────────────────────────────────────────────

fn step_clouds(state: &GameState, rng: &mut impl Rng) -> Vec<Cloud> {
    let mut clouds: Vec<Cloud> = state
        .clouds
        .iter()
        .map(|c| Cloud {
            x: c.x - c.speed,
            ..c.clone()
        })
        .filter(|c| !c.is_offscreen())
        .collect();

    let right_edge_busy = clouds
        .iter()
        .any(|c| c.x as i32 > state.width as i32 - CLOUD_EDGE_GAP);
    if clouds.len() < MAX_CLOUDS && !right_edge_busy {
        clouds.push(Cloud {
            x: state.width as f64,
            y: rng.gen_range(CLOUD_MIN_Y..=CLOUD_MAX_Y),
            sprite: &CLOUD_SPRITES[rng.gen_range(0..CLOUD_SPRITES.len())],
            speed: rng.gen_range(CLOUD_MIN_SPEED..CLOUD_MAX_SPEED),
        });
    }

    clouds
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Half-open axis-aligned box intersection.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

// ── Per-tick simulation (nearly pure — RNG is injected) ──────────────────────

/// Advance the simulation by one tick. Returns the state unchanged unless
/// currently Playing: score, counters, and entity positions are all frozen
/// on the start screen, while paused, and after game over.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }

    let tick_count = state.tick_count + 1;

    // ── 1. Score ─────────────────────────────────────────────────────────────
    let score = (tick_count / SCORE_TICKS as u64) as u32;
    let high_score = state.high_score.max(score);

    // ── 2. Day/night cycle ───────────────────────────────────────────────────
    let mut day_night_ticks = state.day_night_ticks + 1;
    let mut is_day = state.is_day;
    if day_night_ticks >= DAY_NIGHT_TICKS {
        is_day = !is_day;
        day_night_ticks = 0;
    }

    // ── 3. Stage ratchet ─────────────────────────────────────────────────────
    let mut stage_ticks = state.stage_ticks + 1;
    let mut speed = state.speed;
    let mut spawn_interval_ticks = state.spawn_interval_ticks;
    if stage_ticks >= STAGE_TICKS {
        stage_ticks = 0;
        speed += SPEED_STEP;
        let secs = (spawn_interval_ticks as f64 / FPS as f64 - SPAWN_STEP_SECS)
            .max(MIN_SPAWN_INTERVAL_SECS);
        spawn_interval_ticks = (secs * FPS as f64) as u32;
    }

    // ── 4. Sky ───────────────────────────────────────────────────────────────
    let clouds = step_clouds(state, rng);

    // ── 5. Player ────────────────────────────────────────────────────────────
    let player = step_player(&state.player);

    // ── 6. Spawn policy ──────────────────────────────────────────────────────
    // The clearance gate sees obstacle positions as of the previous tick; a
    // newly spawned obstacle takes its first movement step below.
    let mut obstacles = state.obstacles.clone();
    let mut last_spawn_tick = state.last_spawn_tick;
    if tick_count.saturating_sub(last_spawn_tick) >= spawn_interval_ticks as u64
        && spawn_clear(&obstacles, state.width)
    {
        obstacles.push(spawn_obstacle(state.width, state.ground_y, speed, rng));
        last_spawn_tick = tick_count;
    }

    // ── 7. Advance & prune obstacles ─────────────────────────────────────────
    let obstacles: Vec<Obstacle> = obstacles
        .iter()
        .map(step_obstacle)
        .filter(|o| !o.is_offscreen())
        .collect();

    // ── 8. Collision ─────────────────────────────────────────────────────────
    let player_box = player.bounding_box();
    let collided = obstacles
        .iter()
        .any(|o| rects_overlap(&player_box, &o.bounding_box()));
    let phase = if collided {
        Phase::GameOver
    } else {
        Phase::Playing
    };

    GameState {
        phase,
        player,
        obstacles,
        clouds,
        score,
        high_score,
        is_day,
        tick_count,
        stage_ticks,
        day_night_ticks,
        speed,
        spawn_interval_ticks,
        last_spawn_tick,
        ..state.clone()
    }
}
