//! All game entity types — pure data, no game logic.
//!
//! Heavier state transitions live in `compute`; the only methods here are
//! derived-value accessors (sprite dimensions, bounding boxes).

// ── Sprite catalog ────────────────────────────────────────────────────────────

/// A multi-line glyph pattern. Rows may differ in length; `width` is the
/// longest row. Spaces are transparent when drawn.
#[derive(Debug, PartialEq, Eq)]
pub struct Sprite {
    pub rows: &'static [&'static str],
}

impl Sprite {
    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    pub fn width(&self) -> i32 {
        self.rows.iter().map(|row| row.len() as i32).max().unwrap_or(0)
    }
}

/// Run-cycle animation frames for the dino. All frames share the same
/// dimensions; only the feet rows differ.
pub static DINO_FRAMES: [Sprite; 4] = [
    Sprite {
        rows: &["  @@ ", " @#@ ", "@##@ ", " ### ", " @ @ "],
    },
    Sprite {
        rows: &["  @@ ", " @#@ ", "@##@ ", " ### ", "@ @  "],
    },
    Sprite {
        rows: &["  @@ ", " @#@ ", "@##@ ", " ### ", " @ @ "],
    },
    Sprite {
        rows: &["  @@ ", " @#@ ", "@##@ ", " ### ", "  @ @"],
    },
];

pub static OBSTACLE_SPRITES: [Sprite; 4] = [
    // Small cactus
    Sprite {
        rows: &[" # ", "###", " # "],
    },
    // Medium cactus
    Sprite {
        rows: &["  #  ", " ### ", "  #  ", "  #  ", "  #  "],
    },
    // Double cactus
    Sprite {
        rows: &[" #  # ", "### ###", " #  # "],
    },
    // Tall cactus
    Sprite {
        rows: &["  #  ", "  #  ", " ### ", "  #  "],
    },
];

pub static CLOUD_SPRITES: [Sprite; 3] = [
    Sprite {
        rows: &[" .--. ", "(    )", " `--' "],
    },
    Sprite {
        rows: &[" .------. ", "(        )", " `------' "],
    },
    Sprite {
        rows: &[" .-. ", "(   )", " `-' "],
    },
];

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box used for both collision and draw placement.
/// `y` is the top row; the box covers the half-open ranges
/// `[x, x + w)` × `[y, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Fixed horizontal position (left edge of the sprite).
    pub x: i32,
    /// Top row of the sprite; equals `base_y_top` whenever not jumping.
    pub y_top: i32,
    /// Resting top row, derived from the ground line and sprite height.
    pub base_y_top: i32,
    pub jumping: bool,
    /// Ticks since the current jump started.
    pub jump_ticks: u32,
    pub frame_idx: usize,
    pub anim_ticks: u32,
}

impl Player {
    pub fn sprite(&self) -> &'static Sprite {
        &DINO_FRAMES[self.frame_idx]
    }

    pub fn bounding_box(&self) -> Rect {
        let sprite = self.sprite();
        Rect {
            x: self.x,
            y: self.y_top,
            w: sprite.width(),
            h: sprite.height(),
        }
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Obstacle {
    /// Left edge. Fractional so sub-cell motion stays smooth; rounded only
    /// at render/collision time.
    pub x: f64,
    /// Fixed top row, set once so the sprite bottom sits on the ground line.
    pub y_top: i32,
    pub sprite: &'static Sprite,
    /// Columns per tick, frozen at spawn time.
    pub speed: f64,
}

impl Obstacle {
    /// True once the entire sprite has scrolled past the left edge.
    /// This is the sole removal criterion.
    pub fn is_offscreen(&self) -> bool {
        self.x + (self.sprite.width() as f64) < 0.0
    }

    pub fn bounding_box(&self) -> Rect {
        Rect {
            x: self.x.round() as i32,
            y: self.y_top,
            w: self.sprite.width(),
            h: self.sprite.height(),
        }
    }
}

// ── Cloud (decorative, never collides) ────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Cloud {
    pub x: f64,
    pub y: i32,
    pub sprite: &'static Sprite,
    pub speed: f64,
}

impl Cloud {
    pub fn is_offscreen(&self) -> bool {
        self.x + (self.sprite.width() as f64) < 0.0
    }
}

// ── Input commands ────────────────────────────────────────────────────────────

/// Game-semantic input, decoupled from raw key codes. The input adapter in
/// `main` produces these; `compute::apply_command` consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Jump,
    TogglePause,
    Restart,
    Quit,
    /// Any other key press. Only meaningful on the start screen, where any
    /// key begins a round.
    Other,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// The entire game state. Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: Phase,
    pub player: Player,
    /// Active obstacles, oldest first; the last element is always the most
    /// recently spawned.
    pub obstacles: Vec<Obstacle>,
    /// Background clouds, visual only.
    pub clouds: Vec<Cloud>,
    /// Derived from elapsed ticks; two points per second of play.
    pub score: u32,
    /// Highest score seen so far (updated live during play, persisted by
    /// the orchestrator).
    pub high_score: u32,
    pub is_day: bool,
    /// Ticks elapsed in the current round.
    pub tick_count: u64,
    pub stage_ticks: u32,
    pub day_night_ticks: u32,
    /// Speed given to newly spawned obstacles.
    pub speed: f64,
    pub spawn_interval_ticks: u32,
    pub last_spawn_tick: u64,
    pub width: u16,
    pub height: u16,
    /// Row where sprite bottoms rest; the visual ground line is one below.
    pub ground_y: i32,
}
