// Tuning constants for the sparkle engine.
//
// Distances are surface pixels, velocities px/frame, angles radians and
// times milliseconds unless the name says otherwise.

// Palette
pub const GOLD_HUE: f64 = 45.0; // base hue in degrees

// Trail emission
pub const TRAIL_INTERVAL_MS: f64 = 8.0; // min gap between trail emits
pub const TRAIL_PARTICLES_PER_EMIT: usize = 3;
pub const TRAIL_POSITION_JITTER: f64 = 3.0; // ± px per axis
pub const TRAIL_SPEED_MAX: f64 = 0.6; // ± px/frame per axis
pub const TRAIL_SIZE_MIN: f64 = 1.5;
pub const TRAIL_SIZE_MAX: f64 = 4.5;
pub const TRAIL_HUE_JITTER: f64 = 6.0; // ± degrees

// Burst (tap/click explosion)
pub const BURST_COUNT_MIN: usize = 40;
pub const BURST_COUNT_MAX: usize = 60;
pub const BURST_ANGLE_JITTER: f64 = 0.25; // ± rad around the even spacing
pub const BURST_SPEED_MIN: f64 = 4.0;
pub const BURST_SPEED_MAX: f64 = 10.0;
pub const BURST_POP_MAX: f64 = 2.0; // extra upward kick
pub const BURST_SIZE_MIN: f64 = 3.0;
pub const BURST_SIZE_MAX: f64 = 7.0;
pub const BURST_HUE_JITTER: f64 = 10.0;

// Input classification
pub const HOLD_THRESHOLD_MS: f64 = 100.0; // tap vs. hold
pub const TAP_THRESHOLD_PX: f64 = 10.0; // tap vs. swipe
pub const GHOST_CLICK_WINDOW_MS: f64 = 600.0; // synthesized mouse events after touch
pub const CLICK_AFTER_RELEASE_MS: f64 = 250.0; // mouseup -> click pairing

// Orbital accumulation
pub const ORBIT_SPAWN_INTERVAL_MS: f64 = 50.0;
pub const ORBIT_SPAWN_MIN: usize = 2;
pub const ORBIT_SPAWN_MAX: usize = 3;
pub const ORBIT_MAX_PARTICLES: usize = 90;
pub const ORBIT_RADIUS_MIN: f64 = 80.0; // initial radius range
pub const ORBIT_RADIUS_MAX: f64 = 120.0;
pub const ORBIT_STABLE_RADIUS: f64 = 12.0; // asymptote of the radius decay
pub const ORBIT_RADIUS_DECAY: f64 = 0.015; // fraction of (r - stable) lost per frame
pub const ORBIT_SPIN_GAIN: f64 = 0.6; // angular velocity = gain / sqrt(r0)
pub const ORBIT_SPIN_JITTER: f64 = 0.0005; // ± rad/frame random walk
pub const ORBIT_SIZE_MIN: f64 = 2.0;
pub const ORBIT_SIZE_MAX: f64 = 5.0;
pub const ORBIT_HUE_JITTER: f64 = 8.0;

// Dispersal
pub const DISPERSAL_SPEED_MIN: f64 = 2.0; // outward radial kick
pub const DISPERSAL_SPEED_MAX: f64 = 5.0;

// Free particle physics
pub const GRAVITY: f64 = 0.15; // px/frame² added to vy
pub const DRAG: f64 = 0.98; // velocity multiplier per frame
pub const LIFE_DECAY: f64 = 0.02; // ~50 frame lifespan

// Rendering
pub const GLOW_SCALE: f64 = 3.0; // outer glow radius / core radius
pub const HIGHLIGHT_SCALE: f64 = 15.0; // highlight radius / particle size
pub const CURSOR_GLOW_RADIUS: f64 = 180.0;
pub const CURSOR_CORE_RADIUS: f64 = 60.0;

// Diagnostics
pub const STATS_LOG_INTERVAL_FRAMES: u64 = 300;
