//! Space Invaders entry point
//!
//! The browser build drives a `Session` from `requestAnimationFrame` and
//! mirrors each resulting state into the page's SVG canvas. The native build
//! replays a scripted session headlessly and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, MouseEvent};

    use space_invaders::consts::CANVAS_SIZE;
    use space_invaders::platform::Key;
    use space_invaders::sim::{Entity, GameState};
    use space_invaders::{Phase, Session, Tuning};

    const SVG_NS: &str = "http://www.w3.org/2000/svg";

    /// Overlay text element ids
    const LEVEL_TEXT_ID: &str = "next-level-text";
    const COUNTDOWN_ID: &str = "next-level-number";
    const GAME_OVER_ID: &str = "game-over-text";
    const RETRY_ID: &str = "retry-text";

    /// Game instance holding the session and frame timing
    struct Game {
        session: Session,
        last_time: f64,
        last_phase: Phase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(Tuning::default(), seed),
                last_time: 0.0,
                last_phase: Phase::Playing,
            }
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Remove an element if it is still there; double removals are expected
    fn remove_by_id(document: &Document, id: &str) {
        match document.get_element_by_id(id) {
            Some(el) => el.remove(),
            None => log::debug!("Already removed: {}", id),
        }
    }

    fn create_text(
        document: &Document,
        svg: &Element,
        id: &str,
        text: &str,
        class: &str,
        x: f32,
        y: f32,
    ) {
        if let Ok(el) = document.create_element_ns(Some(SVG_NS), "text") {
            let _ = el.set_attribute("id", id);
            let _ = el.set_attribute("x", &x.to_string());
            let _ = el.set_attribute("y", &y.to_string());
            let _ = el.set_attribute("class", class);
            el.set_text_content(Some(text));
            let _ = svg.append_child(&el);
        }
    }

    /// Create or update the ellipse for a bullet or enemy
    fn upsert_body(document: &Document, svg: &Element, body: &Entity, class: &str) {
        let el = match document.get_element_by_id(&body.id) {
            Some(el) => el,
            None => {
                let Ok(el) = document.create_element_ns(Some(SVG_NS), "ellipse") else {
                    log::warn!("Could not create element for {}", body.id);
                    return;
                };
                let _ = el.set_attribute("id", &body.id);
                let _ = el.class_list().add_1(class);
                let _ = svg.append_child(&el);
                el
            }
        };
        let _ = el.set_attribute("cx", &body.pos.x.to_string());
        let _ = el.set_attribute("cy", &body.pos.y.to_string());
        let _ = el.set_attribute("rx", &body.radius.to_string());
        let _ = el.set_attribute("ry", &body.radius.to_string());
    }

    /// Remove every bullet and enemy the state still holds
    fn clear_bodies(document: &Document, state: &GameState) {
        for body in state
            .bullets
            .iter()
            .chain(&state.enemy_bullets)
            .chain(&state.enemies)
        {
            remove_by_id(document, &body.id);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Mirror the session into the DOM
    fn render(game: &mut Game) {
        let document = document();
        let Some(svg) = document.get_element_by_id("canvas") else {
            return;
        };

        let exits = game.session.drain_exits();
        let state = game.session.state();

        if let Some(ship) = document.get_element_by_id("ship") {
            let _ = ship.set_attribute(
                "transform",
                &format!("translate({}, {})", state.ship.pos.x, state.ship.pos.y),
            );
        }
        set_text(&document, "score-no", &state.score.to_string());

        for body in state.bullets.iter().chain(&state.enemy_bullets) {
            upsert_body(&document, &svg, body, "bullet");
        }
        for body in &state.enemies {
            upsert_body(&document, &svg, body, "enemy");
        }
        for body in &exits {
            remove_by_id(&document, &body.id);
        }

        let phase = game.session.phase();
        match (game.last_phase, phase) {
            (Phase::Playing, Phase::LevelComplete { .. }) => {
                clear_bodies(&document, state);
                create_text(
                    &document,
                    &svg,
                    LEVEL_TEXT_ID,
                    "Level Completed!, Next Level In...",
                    "nextLevelText",
                    CANVAS_SIZE / 10.0,
                    CANVAS_SIZE / 3.0,
                );
                create_text(
                    &document,
                    &svg,
                    COUNTDOWN_ID,
                    "3",
                    "nextLevelNumber",
                    CANVAS_SIZE / 2.0 - 40.0,
                    CANVAS_SIZE / 2.0 + 30.0,
                );
            }
            (Phase::LevelComplete { .. }, Phase::Playing) => {
                remove_by_id(&document, LEVEL_TEXT_ID);
                remove_by_id(&document, COUNTDOWN_ID);
                set_text(&document, "level-no", &(state.level + 1).to_string());
            }
            (Phase::Playing, Phase::GameOver) => {
                clear_bodies(&document, state);
                create_text(
                    &document,
                    &svg,
                    GAME_OVER_ID,
                    "Game Over",
                    "gameOver",
                    CANVAS_SIZE / 8.0,
                    CANVAS_SIZE / 2.0,
                );
                create_text(
                    &document,
                    &svg,
                    RETRY_ID,
                    "Click to Try Again",
                    "nextLevelText",
                    CANVAS_SIZE / 3.8,
                    CANVAS_SIZE / 1.5,
                );
            }
            (Phase::GameOver, Phase::Playing) => {
                remove_by_id(&document, GAME_OVER_ID);
                remove_by_id(&document, RETRY_ID);
                set_text(&document, "level-no", "1");
            }
            _ => {}
        }
        if let Some(n) = game.session.countdown() {
            set_text(&document, COUNTDOWN_ID, &n.to_string());
        }
        game.last_phase = phase;
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Space Invaders starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Space Invaders running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let document = document();

        // Keyboard: browser auto-repeat is ignored, the session repeats itself
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().session.key_down(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().session.key_up(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .mouse_move(event.x() as f32, event.y() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.mouse_down(event.x() as f32, event.y() as f32);
                render(&mut g);
            });
            let _ = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            let dt = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                0.0
            };
            g.last_time = time;

            g.session.update(dt);
            render(&mut g);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use space_invaders::platform::Key;
    use space_invaders::{Phase, Session, Tuning};

    env_logger::init();
    log::info!("Space Invaders (native) starting...");
    log::info!("Native mode runs a scripted headless session - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).with_context(|| format!("loading tuning from {path}"))?,
        None => Tuning::default(),
    };

    let mut session = Session::new(tuning, 2024);
    let frame_ms = 1000.0 / 60.0;
    let mut erased = 0usize;

    // Sweep left and right under the grid, holding fire the whole time
    session.key_down(Key::Up);
    for frame in 0..60 * 120 {
        let sweep_right = (frame / 90) % 2 == 0;
        let (hold, release) = if sweep_right {
            (Key::Right, Key::Left)
        } else {
            (Key::Left, Key::Right)
        };
        session.key_up(release);
        session.key_down(hold);
        session.key_down(Key::Up);

        session.update(frame_ms);
        erased += session.drain_exits().len();
        if session.phase() == Phase::GameOver {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Finished on level {} with score {} (game over: {}, {} entities erased)",
        state.level,
        state.score,
        state.game_over,
        erased
    );
    println!("level {} score {}", state.level + 1, state.score);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
