//! Merge Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use merge_drop::DisplayClass;
    use merge_drop::consts::MAX_FRAME_MS;
    use merge_drop::platform::canvas;
    use merge_drop::renderer::{AnimationClock, draw_frame};
    use merge_drop::sim::{Game, GameEvent, TouchControl};

    /// Everything the frame callback needs
    struct App {
        game: Game,
        clock: AnimationClock,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.game.advance(dt);
            self.clock.advance(dt);
            draw_frame(&mut self.ctx, &self.game, &self.clock);

            for event in self.game.take_events() {
                match event {
                    GameEvent::Merged { value, points, .. } => {
                        log::debug!("Merged into {} (+{})", value, points);
                    }
                    GameEvent::GameOver { score } => announce_game_over(score),
                    _ => {}
                }
            }
        }
    }

    fn announce_game_over(score: u64) {
        log::info!("Game over with score {}", score);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Game Over! Score: {}", score));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Merge Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx = canvas::context_2d(&canvas).expect("no 2d context");
        let (width, height) = canvas::fit_to_window(&window, &canvas);

        let config = canvas::page_config(&window, &document);
        if config.display == DisplayClass::Compact {
            canvas::show_touch_controls(&document);
        }

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let viewport = Vec2::new(width as f32, height as f32);
        log::info!(
            "Viewport {}x{}, display {}, seed {}",
            width,
            height,
            config.display.as_str(),
            seed
        );

        let app = Rc::new(RefCell::new(App {
            game: Game::new(viewport, config, seed),
            clock: AnimationClock::new(seed),
            ctx,
            last_time: 0.0,
        }));

        setup_keyboard(app.clone());
        setup_touch_controls(app.clone());
        request_animation_frame(app);

        log::info!("Merge Drop running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(false);

        for control in TouchControl::ALL {
            let Some(button) = document.get_element_by_id(control.element_id()) else {
                continue;
            };

            for (kind, pressed) in [("touchstart", true), ("touchend", false)] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                    event.prevent_default();
                    let mut app = app.borrow_mut();
                    if pressed {
                        app.game.touch_start(control);
                    } else {
                        app.game.touch_end(control);
                    }
                });
                let _ = button.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &options,
                );
                closure.forget();
            }

            // Long presses would otherwise open a context menu
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            let _ = button
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Merge Drop (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - use `trunk serve` for the web version");

    let score = autoplay(7, 20 * 60 * 60);
    println!("Autoplay finished with score {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drop balls at alternating positions until the game ends or frames run out
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64, max_frames: u32) -> u64 {
    use glam::Vec2;
    use merge_drop::GameConfig;
    use merge_drop::consts::SIM_DT_MS;
    use merge_drop::sim::{Game, GameEvent};

    let mut game = Game::new(Vec2::new(1000.0, 800.0), GameConfig::default(), seed);
    let mut merges = 0u32;

    for frame in 0..max_frames {
        if game.state().current().is_some() {
            // Sweep left, then right, then release
            match (frame / 90) % 3 {
                0 => {
                    game.key_up("ArrowRight");
                    game.key_down("ArrowLeft");
                }
                1 => {
                    game.key_up("ArrowLeft");
                    game.key_down("ArrowRight");
                }
                _ => {
                    game.key_up("ArrowLeft");
                    game.key_up("ArrowRight");
                    game.key_down("ArrowDown");
                }
            }
        }

        game.advance(SIM_DT_MS);

        for event in game.take_events() {
            match event {
                GameEvent::Merged { value, .. } => {
                    merges += 1;
                    log::debug!("Merged into {}", value);
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over after {} frames, {} merges", frame, merges);
                    return score;
                }
                _ => {}
            }
        }
    }

    log::info!("Autoplay stopped after {} frames, {} merges", max_frames, merges);
    game.state().score()
}
