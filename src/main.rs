//! Star Volley entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Shipped balance; edit `tuning.json` to rebalance without touching code
const BALANCE_JSON: &str = include_str!("../tuning.json");

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use star_volley::audio::{AudioManager, SoundEffect};
    use star_volley::persistence::BrowserStorage;
    use star_volley::platform::{InputState, TouchControl};
    use star_volley::renderer::CanvasRenderer;
    use star_volley::sim::GamePhase;
    use star_volley::{Screen, Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        // Track screen changes for DOM overlays
        last_screen: Option<Screen>,
    }

    impl Game {
        fn new() -> Self {
            let tuning = Tuning::from_json_or_default(super::BALANCE_JSON);
            let session = Session::with_tuning(Box::new(BrowserStorage::new()), tuning);
            Self {
                audio: AudioManager::new(session.settings()),
                session,
                input: InputState::new(),
                renderer: None,
                last_screen: None,
            }
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.audio.resume();
            self.input.release_all();
            self.session.start(seed);
            log::info!("Game started with seed: {}", seed);
        }

        /// Run one frame of the session and play its sounds
        fn update(&mut self, time: f64) {
            let input = self.input.intents();
            let was_muted = self.session.muted();

            if let Some(frame) = self.session.frame(&input, time) {
                for effect in SoundEffect::for_frame(&frame.events) {
                    self.audio.play(effect);
                }
            }

            if self.session.muted() != was_muted {
                self.audio.apply_settings(self.session.settings());
            }
        }

        fn render(&self, time: f64) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.session.snapshot(), time);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = self.session.snapshot();

            set_text(&document, "hud-score", &snap.score.to_string());
            set_text(&document, "hud-lives", &snap.lives.to_string());
            set_text(&document, "hud-wave", &snap.wave.to_string());
            set_text(&document, "hud-best", &self.session.high_score().to_string());
            set_visible(&document, "hud-double-fire", snap.double_fire);
            set_visible(&document, "hud-shield", snap.shield);
            set_visible(&document, "hud-speed-boost", snap.speed_boost);
            set_text(
                &document,
                "mute-btn",
                if self.session.muted() { "Unmute" } else { "Mute" },
            );

            let screen = self.session.screen();
            let playing = screen == Screen::Playing;
            set_visible(&document, "pause-menu", playing && snap.phase == GamePhase::Paused);

            if self.last_screen == Some(screen) {
                return;
            }
            self.last_screen = Some(screen);

            set_visible(&document, "menu", screen == Screen::Menu);
            set_visible(
                &document,
                "controls-hint",
                screen == Screen::Menu && self.session.settings().show_controls_hint,
            );
            set_visible(&document, "hud", playing);
            set_visible(&document, "touch-controls", playing);

            match screen {
                Screen::GameOver {
                    score,
                    new_high_score,
                } => {
                    set_visible(&document, "game-over", true);
                    set_text(&document, "final-score", &score.to_string());
                    set_text(&document, "final-wave", &snap.wave.to_string());
                    set_visible(&document, "new-high-score", new_high_score);
                }
                _ => set_visible(&document, "game-over", false),
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Star Volley starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new()));
        match CanvasRenderer::new(&canvas) {
            Some(renderer) => game.borrow_mut().renderer = Some(renderer),
            None => log::warn!("Canvas 2D context unavailable - rendering disabled"),
        }

        setup_keyboard(game.clone());
        setup_touch_controls(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Star Volley running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if InputState::handles_key(&key) {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                if key == "Enter" && g.session.screen() != Screen::Playing {
                    g.start();
                    return;
                }
                g.input.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(document: &Document, game: Rc<RefCell<Game>>) {
        let controls = [
            ("touch-left", TouchControl::Left),
            ("touch-right", TouchControl::Right),
            ("touch-fire", TouchControl::Fire),
            ("touch-pause", TouchControl::Pause),
        ];

        for (id, control) in controls {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.touch_start(control);
                });
                let _ = el
                    .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for name in ["touchend", "touchcancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.touch_end(control);
                });
                let _ = el.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let on_click = |id: &str, action: fn(&mut Game)| {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    action(&mut game.borrow_mut());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        };

        on_click("start-btn", |g| g.start());
        on_click("restart-btn", |g| g.start());
        on_click("menu-btn", |g| g.session.back_to_menu());
        // Toggle back to playing
        on_click("resume-btn", |g| g.input.request_pause());
        on_click("mute-btn", |g| g.input.request_mute());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        fn auto_pause(g: &mut Game, reason: &str) {
            // Key-up events are lost while unfocused
            g.input.release_all();
            if g.session.settings().auto_pause_on_blur
                && g.session.screen() == Screen::Playing
                && g.session.state().phase == GamePhase::Playing
            {
                g.input.request_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&mut game.borrow_mut(), "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&mut game.borrow_mut(), "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
use star_volley::Tuning;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Volley (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);
    // Optional path to a tuning file overriding the shipped balance
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::from_json_or_default(BALANCE_JSON)
            }
        },
        None => Tuning::from_json_or_default(BALANCE_JSON),
    };
    let score = autoplay::run(seed, tuning);
    println!("Seed {} finished with score {}", seed, score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless seeded demo driven by a naive pilot
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use star_volley::consts::*;
    use star_volley::persistence::MemoryStorage;
    use star_volley::sim::{GameState, TickInput};
    use star_volley::{Screen, Session, Tuning};

    /// Ten minutes of 60 Hz frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Chase the lowest enemy and keep firing
    fn pilot(state: &GameState) -> TickInput {
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + ENEMY_WIDTH / 2.0);
        let player_x = state.player.center_x();

        TickInput {
            move_left: target.is_some_and(|x| x < player_x - 4.0),
            move_right: target.is_some_and(|x| x > player_x + 4.0),
            fire: true,
            ..Default::default()
        }
    }

    pub fn run(seed: u64, tuning: Tuning) -> u64 {
        let mut session = Session::with_tuning(Box::new(MemoryStorage::new()), tuning);
        session.start(seed);

        for frame in 0..MAX_FRAMES {
            let input = pilot(session.state());
            session.frame(&input, frame as f64 * FRAME_MS);

            if let Screen::GameOver { score, .. } = session.screen() {
                log::info!(
                    "Demo over after {:.1}s at wave {}",
                    session.state().time_ms / 1000.0,
                    session.state().wave
                );
                return score;
            }
        }

        log::info!("Demo reached the frame limit");
        session.state().score
    }
}
