//! Run or Die entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use run_or_die::audio::{self, AudioManager};
    use run_or_die::consts::*;
    use run_or_die::input::{InputEvent, map_key};
    use run_or_die::render::{self, FrameView, Palette, RenderSink};
    use run_or_die::sim::{GamePhase, GameState, TickInput, autopilot, tick};
    use run_or_die::{HighScoreStore, LocalHighScore, Settings};

    /// Flat-color canvas renderer
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl CanvasRenderer {
        fn rect(&self, color: &str, x: f32, y: f32, w: f32, h: f32) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }

        fn overlay(&self, title: &str, lines: &[String]) {
            self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
            self.ctx.set_fill_style_str("white");
            self.ctx.set_text_align("center");
            self.ctx.set_font("36px Arial");
            let _ = self
                .ctx
                .fill_text(title, self.width / 2.0, self.height / 2.0 - 50.0);
            self.ctx.set_font("20px Arial");
            for (i, line) in lines.iter().enumerate() {
                let y = self.height / 2.0 + 10.0 + i as f64 * 30.0;
                let _ = self.ctx.fill_text(line, self.width / 2.0, y);
            }
            self.ctx.set_text_align("left");
        }
    }

    impl RenderSink for CanvasRenderer {
        fn present(&mut self, frame: &FrameView<'_>) {
            let palette = Palette::for_skin(frame.skin);
            self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
            self.ctx.set_fill_style_str(palette.background);
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

            for cloud in frame.clouds {
                self.rect(
                    "rgba(255, 255, 255, 0.85)",
                    cloud.pos.x,
                    cloud.pos.y,
                    cloud.size.x,
                    cloud.size.y,
                );
            }

            let (pos, size) = frame.player_sprite_rect();
            self.rect(palette.player(frame.player.state), pos.x, pos.y, size.x, size.y);
            if frame.active_power_ups().shield {
                let center = pos + size / 2.0;
                self.ctx.begin_path();
                let _ = self.ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    (size.x.max(size.y) / 2.0 + 5.0) as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                self.ctx.set_stroke_style_str("rgba(0, 150, 255, 0.7)");
                self.ctx.set_line_width(3.0);
                self.ctx.stroke();
            }

            for obstacle in frame.obstacles {
                let color = render::obstacle_color(obstacle.kind);
                self.rect(color, obstacle.pos.x, obstacle.pos.y, obstacle.size.x, obstacle.size.y);
            }
            for power_up in frame.power_ups {
                let color = render::power_up_color(power_up.kind);
                self.rect(color, power_up.pos.x, power_up.pos.y, power_up.size.x, power_up.size.y);
            }

            let enemy = frame.enemy_pos();
            self.rect("#4b0082", enemy.x, enemy.y, 80.0, 70.0);

            // HUD
            self.ctx.set_fill_style_str("black");
            self.ctx.set_font("20px Arial");
            let _ = self
                .ctx
                .fill_text(&format!("Score: {}", frame.display_score()), 20.0, 30.0);
            let _ = self.ctx.fill_text(
                &format!("High Score: {}", frame.high_score),
                self.width - 170.0,
                30.0,
            );
            let active = frame.active_power_ups();
            for (i, (on, kind)) in [
                (active.shield, run_or_die::sim::PowerUpKind::Shield),
                (active.double_points, run_or_die::sim::PowerUpKind::DoublePoints),
                (active.speed_boost, run_or_die::sim::PowerUpKind::SpeedBoost),
            ]
            .into_iter()
            .enumerate()
            {
                if on {
                    let x = 20.0 + i as f32 * 30.0;
                    self.rect(render::power_up_color(kind), x, 50.0, 20.0, 20.0);
                }
            }

            match frame.phase {
                GamePhase::NotStarted => self.overlay(
                    "RUN OR DIE",
                    &[
                        "Press SPACE to start".to_string(),
                        "Arrow Up to Jump | Arrow Down to Slide".to_string(),
                    ],
                ),
                GamePhase::GameOver => self.overlay(
                    "GAME OVER",
                    &[
                        format!("Score: {}", frame.display_score()),
                        "Press SPACE to play again".to_string(),
                    ],
                ),
                GamePhase::Running => {}
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        scores: LocalHighScore,
        settings: Settings,
        input: TickInput,
        accumulator: f64,
        last_time: f64,
        /// Whether a frame callback is currently scheduled
        looping: bool,
    }

    impl Game {
        /// Run simulation ticks for the elapsed frame time
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms.min(100.0);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                if self.settings.autopilot {
                    autopilot::steer(&self.state, &mut self.input);
                }
                tick(&mut self.state, &self.input, SIM_DT_MS, &mut self.scores);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear();

                for cue in audio::cues(&self.state.events) {
                    self.audio.play(cue);
                }

                if self.state.phase == GamePhase::GameOver {
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        fn render(&mut self) {
            let frame = FrameView::capture(&self.state, self.scores.get());
            self.renderer.present(&frame);
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_volume(self.settings.effective_volume());
            self.settings.save();
            log::info!("Sound {}", if self.settings.muted { "off" } else { "on" });
        }

        /// Apply an input event; lifecycle events are applied immediately
        fn handle(&mut self, event: InputEvent) {
            match event {
                InputEvent::Start | InputEvent::Restart => {
                    self.input.push(event);
                    tick(&mut self.state, &self.input, SIM_DT_MS, &mut self.scores);
                    self.input.clear();
                    self.last_time = 0.0;
                    self.accumulator = 0.0;
                }
                _ => self.input.push(event),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Run or Die starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas #gameCanvas not found");
            return;
        };
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.set_skin(settings.skin);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer {
                ctx,
                width: CANVAS_WIDTH as f64,
                height: CANVAS_HEIGHT as f64,
            },
            audio: AudioManager::new(settings.effective_volume()),
            scores: LocalHighScore::load(),
            settings,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
            looping: false,
        }));

        setup_input_handlers(game.clone());
        setup_skin_buttons(game.clone());
        ensure_loop(game);

        log::info!("Run or Die running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            {
                let mut g = game.borrow_mut();
                if event.code() == "KeyM" {
                    g.toggle_mute();
                    return;
                }
                let Some(input) = map_key(&event.code(), g.state.phase, g.settings.cheats_enabled)
                else {
                    return;
                };
                event.prevent_default();
                g.handle(input);
            }
            // Restart re-arms the frame loop
            ensure_loop(game.clone());
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_skin_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(buttons) = document.query_selector_all("[data-skin]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let name = el.get_attribute("data-skin").unwrap_or_default();
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                match g.settings.set_skin_by_name(&name) {
                    Ok(()) => {
                        let skin = g.settings.skin;
                        g.state.set_skin(skin);
                        g.settings.save();
                        g.render();
                    }
                    Err(e) => log::warn!("{}", e),
                }
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Schedule the next frame unless one is already pending
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.looping || !g.state.phase.wants_frames() {
                g.render();
                return;
            }
            g.looping = true;
        }
        request_animation_frame(game);
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
        let keep_going = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                SIM_DT_MS
            };
            g.last_time = time;

            if g.state.phase == GamePhase::Running {
                g.update(dt);
            }
            g.render();

            let keep_going = g.state.phase.wants_frames();
            g.looping = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use run_or_die::consts::SIM_DT_MS;
    use run_or_die::render::{FrameView, RenderSink};
    use run_or_die::sim::{GamePhase, GameState, TickInput, autopilot, tick};
    use run_or_die::{HighScoreStore, MemoryHighScore, Settings, Tuning};

    /// Logs a one-line summary every few seconds of play
    struct LogSink {
        frames: u64,
    }

    impl RenderSink for LogSink {
        fn present(&mut self, frame: &FrameView<'_>) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::info!(
                    "score {:>5} | obstacles {} | power-ups {:?} | player {:?}",
                    frame.display_score(),
                    frame.obstacles.len(),
                    frame.active_power_ups(),
                    frame.player.state,
                );
            }
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Run or Die (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let runs: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let tuning = match args.next().map(std::fs::read_to_string) {
        Some(Ok(json)) => match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Bad tuning file, using defaults: {}", e);
                Tuning::default()
            }
        },
        Some(Err(e)) => {
            log::warn!("Cannot read tuning file, using defaults: {}", e);
            Tuning::default()
        }
        None => Tuning::default(),
    };

    let settings = Settings {
        autopilot: true,
        ..Settings::load()
    };
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = GameState::with_tuning(seed, tuning);
    state.set_skin(settings.skin);
    let mut scores = MemoryHighScore::default();
    let mut sink = LogSink { frames: 0 };
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    // Cap each run at ten minutes of simulated play
    const MAX_TICKS_PER_RUN: u64 = 60 * 60 * 10;

    for run in 1..=runs {
        loop {
            if settings.autopilot {
                autopilot::steer(&state, &mut input);
            }
            tick(&mut state, &input, SIM_DT_MS, &mut scores);
            input = TickInput::default();
            sink.present(&FrameView::capture(&state, scores.get()));

            if state.phase == GamePhase::GameOver || state.time_ticks >= MAX_TICKS_PER_RUN {
                break;
            }
        }
        println!(
            "run {}: score {} after {} ticks (best {})",
            run,
            state.score.points(),
            state.time_ticks,
            scores.get()
        );
        if state.phase != GamePhase::GameOver {
            break;
        }
        input.restart = true;
    }
}
