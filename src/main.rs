//! Canvas Arcade entry point
//!
//! In the browser, wires whichever game the page hosts to the DOM and runs it
//! from `requestAnimationFrame`. Natively, runs both simulations headless with
//! a scripted player as a smoke test.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
        MouseEvent,
    };

    use canvas_arcade::Tuning;
    use canvas_arcade::audio::{AudioManager, SoundEffect};
    use canvas_arcade::consts::WORD_CANVAS_MARGIN;
    use canvas_arcade::render::{self, canvas};
    use canvas_arcade::sim::{ShooterState, WordPhase, WordPopEvent, WordPopState};

    const GAME_OVER_MESSAGE: &str = "Game Over! Maximum number of spheres reached.";

    /// Anything driven by the shared frame loop
    trait FrameDriven {
        fn frame(&mut self, time: f64);
    }

    fn window() -> web_sys::Window {
        web_sys::window().expect("no window")
    }

    fn viewport() -> (f64, f64) {
        let window = window();
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w, h)
    }

    /// Milliseconds since the previous frame (zero on the first one)
    fn frame_delta(last_time: &mut f64, time: f64) -> f64 {
        let dt = if *last_time > 0.0 { time - *last_time } else { 0.0 };
        *last_time = time;
        dt
    }

    // ========================================================================
    // WORD POP
    // ========================================================================

    struct WordPopGame {
        state: WordPopState,
        ctx: CanvasRenderingContext2d,
        canvas_size: (f64, f64),
        last_time: f64,
        audio: AudioManager,
        input: HtmlInputElement,
        score_el: Option<Element>,
        remaining_el: Option<Element>,
        button: Option<Element>,
        /// Text input handler; attached only while running
        input_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
    }

    impl WordPopGame {
        fn attach_input(&self) {
            if let Some(listener) = &self.input_listener {
                let _ = self
                    .input
                    .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref());
            }
            let _ = self.input.focus();
        }

        fn detach_input(&self) {
            if let Some(listener) = &self.input_listener {
                let _ = self.input.remove_event_listener_with_callback(
                    "input",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }

        /// Start/Stop button
        fn toggle(&mut self) {
            match self.state.toggle() {
                WordPhase::Running => {
                    self.attach_input();
                    self.set_button_label("Stop");
                }
                WordPhase::Stopped => {
                    self.detach_input();
                    self.set_button_label("Start");
                }
            }
            self.update_hud();
        }

        fn set_button_label(&self, label: &str) {
            if let Some(btn) = &self.button {
                btn.set_text_content(Some(label));
            }
        }

        fn on_input(&mut self) {
            let typed = self.input.value();
            if self.state.handle_input(&typed) {
                self.input.set_value("");
            }
        }

        fn update_hud(&self) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = &self.remaining_el {
                el.set_text_content(Some(&format!(
                    "Remaining Words: {}",
                    self.state.remaining()
                )));
            }
        }
    }

    impl FrameDriven for WordPopGame {
        fn frame(&mut self, time: f64) {
            let dt = frame_delta(&mut self.last_time, time);
            self.state.advance(dt);

            let scene = render::wordpop_scene(&self.state);
            canvas::paint(&self.ctx, self.canvas_size.0, self.canvas_size.1, &scene);
            self.update_hud();

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_wordpop(&event) {
                    self.audio.play(effect);
                }
                if let WordPopEvent::GameOver { .. } = event {
                    self.detach_input();
                    self.set_button_label("Start");
                    let _ = window().alert_with_message(GAME_OVER_MESSAGE);
                }
            }
        }
    }

    fn run_wordpop(canvas_el: HtmlCanvasElement, input: HtmlInputElement, tuning: Tuning) {
        let document = window().document().expect("no document");

        let (vw, vh) = viewport();
        let width = (vw - WORD_CANVAS_MARGIN).max(1.0);
        let height = (vh - WORD_CANVAS_MARGIN).max(1.0);
        canvas_el.set_width(width as u32);
        canvas_el.set_height(height as u32);
        let style = canvas_el.style();
        let _ = style.set_property("border", "1px solid #fff");
        let _ = style.set_property("border-radius", "5px");
        let _ = style.set_property("margin", "auto");
        let _ = style.set_property("background", "rgba(0,0,0,0.1)");

        let Some(ctx) = canvas::context_2d(&canvas_el) else {
            log::error!("Word Pop canvas has no 2D context");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let state = WordPopState::new(width as f32, height as f32, seed, tuning.wordpop);
        let game = Rc::new(RefCell::new(WordPopGame {
            state,
            ctx,
            canvas_size: (width, height),
            last_time: 0.0,
            audio: AudioManager::new(),
            input,
            score_el: document.get_element_by_id("score"),
            remaining_el: document.get_element_by_id("remainingWords"),
            button: document.get_element_by_id("button1"),
            input_listener: None,
        }));

        // Text input
        {
            let handler = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                handler.borrow_mut().on_input();
            });
            game.borrow_mut().input_listener = Some(closure);
        }

        // Start/Stop button
        match document.get_element_by_id("button1") {
            Some(btn) => {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().toggle();
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            None => log::warn!("No #button1 start control; Word Pop cannot be started"),
        }

        game.borrow().update_hud();
        log::info!("Word Pop ready ({}x{}, seed {})", width, height, seed);
        request_animation_frame(game);
    }

    // ========================================================================
    // COLOR CANNON
    // ========================================================================

    struct ShooterGame {
        state: ShooterState,
        ctx: CanvasRenderingContext2d,
        canvas_size: (f64, f64),
        last_time: f64,
        audio: AudioManager,
    }

    impl FrameDriven for ShooterGame {
        fn frame(&mut self, time: f64) {
            let dt = frame_delta(&mut self.last_time, time);
            self.state.advance(dt);

            let scene = render::shooter_scene(&self.state);
            canvas::paint(&self.ctx, self.canvas_size.0, self.canvas_size.1, &scene);

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_shooter(&event) {
                    self.audio.play(effect);
                }
            }
        }
    }

    fn run_shooter(canvas_el: HtmlCanvasElement, tuning: Tuning) {
        let (width, height) = viewport();
        canvas_el.set_width(width as u32);
        canvas_el.set_height(height as u32);

        let Some(ctx) = canvas::context_2d(&canvas_el) else {
            log::error!("Color Cannon canvas has no 2D context");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let state = ShooterState::new(width as f32, height as f32, seed, tuning.shooter);
        let game = Rc::new(RefCell::new(ShooterGame {
            state,
            ctx,
            canvas_size: (width, height),
            last_time: 0.0,
            audio: AudioManager::new(),
        }));

        // Aim at the pointer
        {
            let game = game.clone();
            let canvas_clone = canvas_el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().state.aim_at(x, y);
            });
            let _ = canvas_el
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.fire();
            });
            let _ = canvas_el
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space switches cannon color
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    let color = game.borrow_mut().state.toggle_color();
                    log::debug!("Cannon color: {}", color.as_css());
                }
            });
            let _ = window()
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Color Cannon running ({}x{}, seed {})", width, height, seed);
        request_animation_frame(game);
    }

    // ========================================================================
    // FRAME LOOP
    // ========================================================================

    fn request_animation_frame<G: FrameDriven + 'static>(game: Rc<RefCell<G>>) {
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window().request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let document = window().document().expect("no document");
        let tuning = Tuning::default();

        if let Some(el) = document.get_element_by_id("gameCanvas") {
            match el.dyn_into::<HtmlCanvasElement>() {
                Ok(canvas_el) => run_shooter(canvas_el, tuning),
                Err(_) => log::error!("#gameCanvas is not a canvas"),
            }
            return;
        }

        let canvas_el = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let input = document
            .get_element_by_id("wordInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        match (canvas_el, input) {
            (Some(canvas_el), Some(input)) => run_wordpop(canvas_el, input, tuning),
            _ => log::error!("Page hosts no known game (need #gameCanvas, or #canvas + #wordInput)"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use canvas_arcade::Tuning;

    env_logger::init();
    log::info!("Canvas Arcade (native) - headless run; use `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    headless::run_wordpop(&tuning);
    headless::run_shooter(&tuning);
    std::process::ExitCode::SUCCESS
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use canvas_arcade::Tuning;
    use canvas_arcade::sim::{ShooterEvent, ShooterState, WordPopEvent, WordPopState};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUN_FRAMES: u32 = 60 * 120;
    const SEED: u64 = 0x5eed;

    /// Two minutes of Word Pop with a player who types one word per second
    pub fn run_wordpop(tuning: &Tuning) {
        let mut state = WordPopState::new(1080.0, 700.0, SEED, tuning.wordpop.clone());
        state.start();
        let mut game_over = false;

        for frame in 0..RUN_FRAMES {
            state.advance(FRAME_MS);
            if frame % 60 == 0 {
                let target = state
                    .bubbles
                    .iter()
                    .find(|b| !b.popping)
                    .map(|b| b.word.to_uppercase());
                if let Some(word) = target {
                    state.handle_input(&format!(" {} ", word));
                }
            }
            if state
                .drain_events()
                .iter()
                .any(|e| matches!(e, WordPopEvent::GameOver { .. }))
            {
                game_over = true;
                break;
            }
        }

        log::info!(
            "Word Pop: score {}, {} on screen, spawn every {} ms, game over: {}",
            state.score,
            state.remaining(),
            state.spawn_interval_ms,
            game_over
        );
    }

    /// Two minutes of Color Cannon with a player who snipes the nearest ball
    pub fn run_shooter(tuning: &Tuning) {
        let mut state = ShooterState::new(1280.0, 800.0, SEED, tuning.shooter.clone());
        let (mut fired, mut hits, mut spawned) = (0u32, 0u32, 0u32);

        for frame in 0..RUN_FRAMES {
            state.advance(FRAME_MS);
            if frame % 20 == 0 {
                let center = state.center;
                let nearest = state
                    .approaching
                    .iter()
                    .min_by(|a, b| {
                        a.pos
                            .distance(center)
                            .partial_cmp(&b.pos.distance(center))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|b| (b.pos, b.color));
                if let Some((pos, color)) = nearest {
                    state.aim_at(pos.x, pos.y);
                    if state.cannon.color != color {
                        state.toggle_color();
                    }
                    state.fire();
                }
            }
            for event in state.drain_events() {
                match event {
                    ShooterEvent::Fired { .. } => fired += 1,
                    ShooterEvent::Hit { .. } => hits += 1,
                    ShooterEvent::Spawned { .. } => spawned += 1,
                    ShooterEvent::ColorChanged { .. } => {}
                }
            }
        }

        log::info!(
            "Color Cannon: {} spawned, {} fired, {} hits, {} balls left",
            spawned,
            fired,
            hits,
            state.approaching.len()
        );
    }
}
