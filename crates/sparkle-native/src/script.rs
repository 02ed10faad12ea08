//! Scripted input session replayed by the headless renderer.

use sparkle_core::{Reaction, SparkleEngine};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    Move(f64, f64),
    Down(f64, f64),
    Up(f64, f64),
    Click(f64, f64),
    TouchStart(f64, f64),
    TouchEnd(f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub at_ms: f64,
    pub input: Input,
}

impl Input {
    pub fn apply(self, engine: &mut SparkleEngine, now_ms: f64) -> Reaction {
        match self {
            Input::Move(x, y) => engine.pointer_move(x, y, now_ms),
            Input::Down(x, y) => engine.pointer_down(x, y, now_ms),
            Input::Up(x, y) => engine.pointer_up(x, y, now_ms),
            Input::Click(x, y) => engine.click(x, y, now_ms),
            Input::TouchStart(x, y) => engine.touch_start(Some((x, y)), now_ms),
            Input::TouchEnd(x, y) => engine.touch_end(Some((x, y)), now_ms),
        }
    }
}

const SWEEP_END_MS: f64 = 1000.0;
const SWEEP_STEP_MS: f64 = 16.0;

/// Trail sweep, a mouse tap, a 600 ms hold with release, then a touch tap
/// followed by the browser's ghost click.
pub fn session(width: f64, height: f64) -> Vec<Step> {
    let mut steps = Vec::new();
    let step = |at_ms: f64, input: Input| Step { at_ms, input };

    let mut t = 0.0;
    while t <= SWEEP_END_MS {
        let k = t / SWEEP_END_MS;
        let x = width * (0.1 + 0.8 * k);
        let y = height * (0.5 + 0.25 * (k * std::f64::consts::TAU).sin());
        steps.push(step(t, Input::Move(x, y)));
        t += SWEEP_STEP_MS;
    }

    let tap = (width * 0.3, height * 0.35);
    steps.push(step(1200.0, Input::Down(tap.0, tap.1)));
    steps.push(step(1250.0, Input::Up(tap.0, tap.1)));
    steps.push(step(1250.0, Input::Click(tap.0, tap.1)));

    let hold = (width * 0.5, height * 0.5);
    steps.push(step(1600.0, Input::Move(hold.0, hold.1)));
    steps.push(step(1700.0, Input::Down(hold.0, hold.1)));
    steps.push(step(2300.0, Input::Up(hold.0, hold.1)));
    steps.push(step(2300.0, Input::Click(hold.0, hold.1)));

    let touch = (width * 0.7, height * 0.65);
    steps.push(step(2800.0, Input::TouchStart(touch.0, touch.1)));
    steps.push(step(2850.0, Input::TouchEnd(touch.0, touch.1)));
    steps.push(step(2900.0, Input::Click(touch.0, touch.1)));

    steps
}
