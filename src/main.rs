//! Sniffer entry point
//!
//! On the web this wires the page (canvas, guess row, buttons) to the game
//! and runs the animation-frame loop. Natively it plays seeded rounds with
//! the demo bot and prints a summary.
//!
//! The host page must provide (ids live in `renderer::hud::dom`):
//! - `<canvas id="canvas">`: the playfield, sized by CSS
//! - `<form id="guess-form">` holding one `<input class="guess-slot">` per
//!   balloon, in order; the form gets the `hidden` class outside guessing
//! - `<button id="restart-btn">`, hidden while aiming
//! - `#hud-counters`, `#hud-letters` and `#result` text elements
//! - optionally `<script type="application/json" id="sniffer-settings">`
//!   with `Settings` JSON
//!
//! Missing HUD elements are skipped; a missing canvas stops startup.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, PointerEvent};

    use sniffer::Settings;
    use sniffer::audio::{AudioManager, SoundEffect};
    use sniffer::autoplay::{self, Autoplayer};
    use sniffer::consts::*;
    use sniffer::renderer::CanvasRenderer;
    use sniffer::renderer::hud::{self, dom};
    use sniffer::sim::{GameState, Stage, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: HtmlCanvasElement,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        /// Demo bot, toggled with the `d` key
        demo: Option<Autoplayer>,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if let Some(bot) = self.demo.as_mut() {
                    bot.act(&mut self.state);
                }
                tick(&mut self.state, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let events = self.state.drain_events();
            let snapshot = self.state.snapshot();
            for event in &events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.on_event(event, &snapshot);
                }
            }
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.update(dt);
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state.snapshot());
            }
        }

        /// Pointer position in playfield coordinates
        fn pointer_pos(&self, event: &PointerEvent) -> glam::Vec2 {
            let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
            match &self.renderer {
                Some(renderer) => renderer.to_playfield(&self.canvas, x, y),
                None => glam::Vec2::new(x, y),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let state = &self.state;

            if let Some(el) = document.get_element_by_id(dom::HUD_COUNTERS) {
                el.set_text_content(Some(&hud::counters(state)));
            }
            if let Some(el) = document.get_element_by_id(dom::HUD_LETTERS) {
                el.set_text_content(Some(&hud::collected_line(state)));
            }
            if let Some(el) = document.get_element_by_id(dom::RESULT) {
                el.set_text_content(hud::status_message(state));
            }

            // Guess row replaces the slingshot once every balloon is popped
            if let Some(el) = document.get_element_by_id(dom::GUESS_FORM) {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", state.stage != Stage::Guessing);
            }
            if let Some(el) = document.get_element_by_id(dom::RESTART_BUTTON) {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", state.stage == Stage::Aiming);
            }
            for input in guess_inputs(document) {
                input.set_disabled(!state.accepts_guess());
            }
        }
    }

    /// The single-letter guess fields, in order
    fn guess_inputs(document: &Document) -> Vec<HtmlInputElement> {
        let Ok(list) = document.query_selector_all(dom::GUESS_SLOT_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    /// Copy slot letters into the fields and focus the cursor slot
    fn sync_slots(state: &GameState) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let inputs = guess_inputs(&document);
        for (input, letter) in inputs.iter().zip(state.guess.letters()) {
            input.set_value(&letter.map(String::from).unwrap_or_default());
        }
        if state.accepts_guess() {
            if let Some(input) = inputs.get(state.guess.cursor()) {
                let _ = input.focus();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Sniffer starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id(dom::CANVAS)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let state = match GameState::with_tuning(seed, settings.tuning.clone()) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("{e}; falling back to default tuning");
                GameState::new(seed)
            }
        };
        let renderer =
            CanvasRenderer::new(&canvas, &state.tuning, settings.effective_pop_rings());
        if renderer.is_none() {
            log::error!("2D canvas context unavailable");
        }

        let game = Rc::new(RefCell::new(Game {
            state,
            canvas: canvas.clone(),
            renderer,
            audio: AudioManager::new(&settings),
            demo: None,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_pointer_handlers(&canvas, game.clone());
        setup_guess_row(&document, game.clone());
        setup_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Sniffer running!");
    }

    fn add_listener<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        kind: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            add_listener(canvas, "pointerdown", move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let pos = g.pointer_pos(&event);
                if g.state.drag_start(pos) {
                    let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                }
            });
        }
        {
            let game = game.clone();
            add_listener(canvas, "pointermove", move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                g.state.drag_move(pos);
            });
        }
        // Release, cancel and leave all let go of the pouch
        for kind in ["pointerup", "pointercancel", "pointerleave"] {
            let game = game.clone();
            add_listener(canvas, kind, move |_event: PointerEvent| {
                game.borrow_mut().state.drag_end();
            });
        }
    }

    fn setup_guess_row(document: &Document, game: Rc<RefCell<Game>>) {
        for (index, input) in guess_inputs(document).into_iter().enumerate() {
            {
                let game = game.clone();
                let field = input.clone();
                add_listener(&input, "input", move |_event: web_sys::Event| {
                    let mut g = game.borrow_mut();
                    g.state.set_slot(index, &field.value());
                    sync_slots(&g.state);
                });
            }
            {
                let game = game.clone();
                let field = input.clone();
                add_listener(&input, "keydown", move |event: KeyboardEvent| {
                    // Delete on an empty field steps back to the previous one
                    if event.key() == "Backspace" && field.value().is_empty() {
                        event.prevent_default();
                        let mut g = game.borrow_mut();
                        g.state.focus_slot(index);
                        g.state.backspace();
                        sync_slots(&g.state);
                    }
                });
            }
            {
                let game = game.clone();
                // Also fires from sync_slots while the game is borrowed
                add_listener(&input, "focus", move |_event: web_sys::Event| {
                    if let Ok(mut g) = game.try_borrow_mut() {
                        g.state.focus_slot(index);
                    }
                });
            }
        }

        if let Some(form) = document.get_element_by_id(dom::GUESS_FORM) {
            add_listener(&form, "submit", move |event: web_sys::Event| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let outcome = g.state.submit_slots();
                log::info!("Guess: {:?}", outcome);
                sync_slots(&g.state);
            });
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id(dom::RESTART_BUTTON) {
            let game = game.clone();
            add_listener(&btn, "click", move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.restart() {
                    sync_slots(&g.state);
                }
            });
        }

        if let Some(window) = web_sys::window() {
            add_listener(&window, "keydown", move |event: KeyboardEvent| {
                // Letters typed into the guess row bubble up here too
                let in_text_field = event
                    .target()
                    .is_some_and(|t| t.dyn_ref::<HtmlInputElement>().is_some());
                if autoplay::is_demo_toggle(&event.key(), event.repeat(), in_text_field) {
                    let mut g = game.borrow_mut();
                    g.demo = match g.demo.take() {
                        Some(_) => None,
                        None => Some(Autoplayer::new()),
                    };
                    log::info!("Demo mode: {}", g.demo.is_some());
                }
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let stage_before = g.state.stage;
            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
            if g.state.stage != stage_before || g.demo.is_some() {
                sync_slots(&g.state);
            }
        }

        request_animation_frame(game);
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
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use sniffer::Tuning;
    use sniffer::autoplay::{self, Autoplayer};
    use sniffer::renderer::hud;
    use sniffer::sim::GameState;

    /// Give up on a round after this many ticks (about five minutes)
    const MAX_ROUND_TICKS: u64 = 60 * 60 * 5;

    #[derive(Parser, Debug)]
    #[command(about = "Play Sniffer rounds headlessly with the demo bot", version)]
    struct Args {
        /// Seed for word choice and letter shuffles
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of rounds to play
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        /// JSON file overriding gameplay tuning
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Log every launch and pop
        #[arg(short, long)]
        verbose: bool,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let level = if args.verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Tuning::from_json(&json).with_context(|| format!("loading {}", path.display()))?
            }
            None => Tuning::default(),
        };

        let mut state = GameState::with_tuning(args.seed, tuning)?;
        let mut bot = Autoplayer::new();
        let mut solved = 0;

        log::info!("Sniffer (native) playing {} round(s), seed {}", args.rounds, args.seed);

        for round in 1..=args.rounds {
            if round > 1 && !state.restart() {
                bail!("round {} did not finish", round - 1);
            }
            let summary = bot.play_round(&mut state, MAX_ROUND_TICKS);
            state.drain_events();
            if summary.solved {
                solved += 1;
            }
            println!(
                "round {round}: {} | shots {} | carried {} | guesses {} | {}",
                summary.word,
                summary.shots_used,
                summary.carried,
                summary.guesses_used,
                hud::status_message(&state).unwrap_or("unfinished"),
            );
        }

        println!("solved {solved}/{}", args.rounds);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}
