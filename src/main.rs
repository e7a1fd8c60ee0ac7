//! Stone Tap entry point
//!
//! Wires the platform-free game core to the browser: canvas sizing, input
//! listeners, the requestAnimationFrame loop, and the HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, PointerEvent, TouchEvent};

    use stone_tap::consts::*;
    use stone_tap::notify;
    use stone_tap::profile::{AdReward, LocalStore};
    use stone_tap::renderer::CanvasRenderer;
    use stone_tap::sim::{Phase, SessionOutcome};
    use stone_tap::Game;

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStore>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        /// Timestamp of the previous animation frame (ms); 0 = loop restart
        last_time: f64,
    }

    impl App {
        fn playfield(&self) -> (f32, f32) {
            (self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Size the canvas to its container: width x 1.5 aspect, scaled by
        /// device pixel density. Destructive: live stones keep their
        /// absolute coordinates until they fall or are tapped.
        fn fit_canvas(&mut self) {
            let window = web_sys::window().expect("no window");
            let ratio = window.device_pixel_ratio();
            let rect = self.canvas.get_bounding_client_rect();
            let width = (rect.width() * ratio).floor() as u32;
            let height = (rect.width() * 1.5 * ratio).floor() as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.game
                .session
                .set_playfield(width as f32, height as f32);
        }

        /// Convert client coordinates to canvas backing coordinates using
        /// the displayed-size-to-backing-size scale factors
        fn client_to_canvas(&self, client_x: f64, client_y: f64) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let scale_x = self.canvas.width() as f64 / rect.width();
            let scale_y = self.canvas.height() as f64 / rect.height();
            (
                ((client_x - rect.left()) * scale_x) as f32,
                ((client_y - rect.top()) * scale_y) as f32,
            )
        }

        fn tap(&mut self, client_x: f64, client_y: f64) {
            let (x, y) = self.client_to_canvas(client_x, client_y);
            if let Some(hit) = self.game.pointer(x, y) {
                self.renderer.draw_burst(&hit);
                self.update_hud();
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            set_text(&document, "coins", &self.game.profile.coins.to_string());
            set_text(&document, "level", &self.game.profile.level.to_string());
            set_text(&document, "score", &self.game.session.score.to_string());
            let time = self.game.session.time_left().ceil() as u32;
            set_text(&document, "time", &time.to_string());
        }

        fn set_status(&self, message: &str) {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(&document, "status", message);
            }
        }
    }

    fn set_text(document: &Document, id: &str, value: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(value));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Stone Tap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let game = Game::new(LocalStore);
        let renderer = CanvasRenderer::new(&canvas).expect("2d context");

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            canvas,
            last_time: 0.0,
        }));

        {
            let mut a = app.borrow_mut();
            a.fit_canvas();
            a.update_hud();
        }

        setup_input(app.clone());
        setup_buttons(&document, app.clone());
        setup_resize(app.clone());

        // Greet a hosting chat client, if any
        notify::host_ready();

        log::info!("Stone Tap ready");
    }

    fn setup_input(app: Rc<RefCell<App>>) {
        let canvas = app.borrow().canvas.clone();

        // Pointer press covers mouse and most touch input
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut()
                    .tap(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch fallback for webviews without pointer events
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .tap(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        // Start a session
        if let Some(btn) = document.get_element_by_id("btn-start") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let started = {
                    let mut a = app.borrow_mut();
                    let (w, h) = a.playfield();
                    let seed = js_sys::Date::now() as u64;
                    match a.game.start(w, h, seed) {
                        Ok(()) => {
                            a.last_time = 0.0;
                            a.set_status("");
                            a.update_hud();
                            true
                        }
                        Err(e) => {
                            a.set_status(&e.to_string());
                            false
                        }
                    }
                };
                if started {
                    request_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Open the reward link and credit the one-time coins
        if let Some(btn) = document.get_element_by_id("btn-coins") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let window = web_sys::window().expect("no window");
                // Crediting is independent of whether the link loads
                let opened =
                    window.open_with_url_and_target_and_features(REWARD_URL, "_blank", "noopener");
                if !matches!(opened, Ok(Some(_))) {
                    let _ = window.location().set_href(REWARD_URL);
                }

                let mut a = app.borrow_mut();
                match a.game.claim_ad_reward() {
                    AdReward::Granted => {
                        a.set_status(&format!("You received {AD_REWARD_COINS} coins!"));
                    }
                    AdReward::AlreadyClaimed => {
                        a.set_status("The reward was already claimed in this browser.");
                    }
                }
                a.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Wipe progression
        if let Some(btn) = document.get_element_by_id("btn-reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let window = web_sys::window().expect("no window");
                let confirmed = window
                    .confirm_with_message(
                        "Reset progression (level + coins)? This cannot be undone for this browser.",
                    )
                    .unwrap_or(false);
                if confirmed {
                    let mut a = app.borrow_mut();
                    a.game.reset_progress();
                    a.set_status("");
                    a.update_hud();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_canvas();
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| frame(app, time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One animation frame: clamp dt, advance the session, repaint, and
    /// keep the loop alive only while the session runs
    fn frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                (((time - a.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                0.0
            };
            a.last_time = time;

            let outcome = a.game.frame(dt);
            a.renderer.render(&a.game.session);
            a.update_hud();

            match outcome {
                Some(SessionOutcome::Cleared) => {
                    a.set_status(&format!(
                        "Level cleared! You are now at level {}.",
                        a.game.profile.level
                    ));
                    false
                }
                Some(SessionOutcome::Failed) => {
                    a.set_status("A stone hit the ground - session over. Try again!");
                    false
                }
                None => a.game.session.phase == Phase::Running,
            }
        };

        if keep_going {
            request_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stone Tap (native) starting...");
    log::info!("The game targets the browser - build with trunk or wasm-pack for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this only satisfies the bin target
}
