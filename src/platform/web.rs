//! Browser binding
//!
//! The page owns the timer and the canvas. It forwards device events here,
//! calls `tick` every `TICK_MS`, and draws `scene_vertices`. All calls land on
//! one `WebGame`, which is the single writer of the ball.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::best_times::BestTimes;
use crate::consts::TICK_MS;
use crate::renderer;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{ControlInput, Outcome};

pub(crate) fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub(crate) fn storage_get(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

pub(crate) fn storage_set(key: &str, value: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(key, value);
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Gravitrip (web) starting...");
}

fn js_err(e: crate::GameError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn random_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (now << 32) ^ noise
}

/// Outcome codes returned to JavaScript
fn outcome_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Continue => 0,
        Outcome::Win => 1,
        Outcome::Loss => 2,
    }
}

fn outcome_from_code(code: u8) -> Outcome {
    match code {
        1 => Outcome::Win,
        2 => Outcome::Loss,
        _ => Outcome::Continue,
    }
}

/// Game instance held by the page
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    settings: Settings,
    best_times: BestTimes,
    /// Latest orientation reading, applied on the next tick only
    pending: ControlInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session; `difficulty` is `easy`, `normal`, `hard` or `expert`
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str, width: f32, height: f32) -> Result<WebGame, JsValue> {
        let mut settings = Settings::load();
        let session = Session::start_named(difficulty, width, height, random_seed(), &settings)
            .map_err(js_err)?;
        settings.last_difficulty = session.difficulty();
        settings.save();

        Ok(WebGame {
            session,
            settings,
            best_times: BestTimes::load(),
            pending: ControlInput::None,
        })
    }

    /// Milliseconds between ticks
    pub fn tick_interval_ms() -> u32 {
        TICK_MS
    }

    /// `deviceorientation`: gamma and beta in degrees
    pub fn set_tilt(&mut self, gamma: f32, beta: f32) {
        self.pending = ControlInput::tilt(gamma, beta);
    }

    /// `devicemotion`: accelerationIncludingGravity. True if the ball was reset.
    pub fn on_motion(&mut self, x: f32, y: f32, z: f32) -> bool {
        self.session.on_motion(Vec3::new(x, y, z))
    }

    /// Advance one tick: 0 = continue, 1 = win, 2 = loss.
    /// The page stops its timer on anything but 0.
    pub fn tick(&mut self) -> u8 {
        let was_running = self.session.is_running();
        let control = std::mem::take(&mut self.pending);
        let outcome = self.session.tick(control);

        if was_running && outcome == Outcome::Win {
            self.record_win();
        }
        outcome_code(outcome)
    }

    /// End the run with an outcome code (1 = win, 2 = loss, anything else
    /// = abandoned). Returns the code of the outcome the session keeps.
    pub fn stop(&mut self, code: u8) -> u8 {
        let was_running = self.session.is_running();
        let report = self.session.stop(outcome_from_code(code));
        if was_running && report.outcome == Outcome::Win {
            self.record_win();
        }
        outcome_code(report.outcome)
    }

    /// Fresh maze on the same difficulty
    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.pending = ControlInput::None;
        self.session.restart().map_err(js_err)
    }

    pub fn ball_x(&self) -> f32 {
        self.session.state().ball.pos.x
    }

    pub fn ball_y(&self) -> f32 {
        self.session.state().ball.pos.y
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.session.state().elapsed_secs()
    }

    /// Best time label for the current difficulty, e.g. `12.34s` or `--`
    pub fn best_time(&self) -> String {
        self.best_times.display(self.session.difficulty())
    }

    pub fn difficulty(&self) -> String {
        self.session.difficulty().to_string()
    }

    /// Tilt sensitivity currently in use
    pub fn tilt_sensitivity(&self) -> f32 {
        self.settings.tilt_sensitivity
    }

    /// Frame as flat `[x, y, r, g, b, a, ...]` triangles
    pub fn scene_vertices(&self) -> Vec<f32> {
        renderer::as_floats(&renderer::scene(self.session.state())).to_vec()
    }
}

impl WebGame {
    fn record_win(&mut self) {
        if let Ok(true) = self.best_times.record_report(&self.session.report()) {
            self.best_times.save();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_codes_round_trip() {
        for outcome in [Outcome::Continue, Outcome::Win, Outcome::Loss] {
            assert_eq!(outcome_from_code(outcome_code(outcome)), outcome);
        }
        assert_eq!(outcome_from_code(7), Outcome::Continue);
    }
}
