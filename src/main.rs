//! Pixel Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pixel_arcade::consts::{WORLD_HEIGHT, WORLD_WIDTH};
    use pixel_arcade::platform::{Demo, DemoKind, PlatformerDemo, RangeDemo};
    use pixel_arcade::renderer::RenderState;
    use pixel_arcade::sim::catalog;
    use pixel_arcade::{RangeTuning, Settings, Tuning};

    // JS binding for pointer lock
    #[wasm_bindgen(inline_js = "
        export function request_pointer_lock() {
            const canvas = document.getElementById('canvas');
            if (canvas) {
                const result = canvas.requestPointerLock();
                if (result && result.catch) {
                    result.catch(e => console.warn('Pointer lock failed:', e));
                }
            }
        }
    ")]
    extern "C" {
        fn request_pointer_lock();
    }

    /// Game instance: the active demo plus its GPU surface
    struct Game {
        demo: Box<dyn Demo>,
        render_state: Option<RenderState>,
        show_fps: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(demo: Box<dyn Demo>, show_fps: bool) -> Self {
            Self {
                demo,
                render_state: None,
                show_fps,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the demo and present the frame it produced
        fn update(&mut self, time: f64) {
            let frame = self.demo.frame(time);
            if let (Some(frame), Some(render_state)) = (frame, self.render_state.as_mut()) {
                match render_state.render(&frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &web_sys::Document) {
            for (id, text) in &self.demo.hud().fields {
                if let Some(el) = document.get_element_by_id(id) {
                    if el.text_content().as_deref() != Some(text.as_str()) {
                        el.set_text_content(Some(text));
                    }
                }
            }
            if self.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("FPS: {}", self.fps)));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pixel Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed world resolution; CSS scales the canvas
        let (width, height) = (WORLD_WIDTH as u32, WORLD_HEIGHT as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load(&canvas);
        let kind = DemoKind::from_attr(canvas.get_attribute("data-game").as_deref());
        let seed = js_sys::Date::now() as u64;

        let demo: Box<dyn Demo> = match kind {
            DemoKind::Platformer => {
                let levels = catalog().expect("invalid level catalog");
                let tuning = Tuning::load(&canvas).expect("invalid data-tuning");
                Box::new(PlatformerDemo::new(
                    levels.into(),
                    tuning,
                    settings.clone(),
                    seed,
                ))
            }
            DemoKind::Range => {
                let tuning = RangeTuning::load(&canvas).expect("invalid data-tuning");
                Box::new(RangeDemo::new(tuning, settings.clone()))
            }
        };
        let game = Rc::new(RefCell::new(Game::new(demo, settings.show_fps)));

        log::info!("{:?} demo initialized with seed: {}", kind, seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create renderer");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pixel Arcade running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Pointer lock change handler
        {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let locked = doc.pointer_lock_element().is_some();
                log::info!("Pointer lock {}", if locked { "acquired" } else { "released" });
                game.borrow_mut().demo.pointer_lock_changed(locked);
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Mouse move - relative motion for mouse-look
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .demo
                    .mouse_move(event.movement_x() as f32, event.movement_y() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse button - fire, or grab the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let wants_lock = game.borrow_mut().demo.mouse_down();
                if wants_lock {
                    request_pointer_lock();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().demo.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().demo.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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
            g.update(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().demo.focus_lost();
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
                game.borrow_mut().demo.focus_lost();
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: scripted input through both demo drivers, events logged.
/// Usage: `pixel-arcade [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use pixel_arcade::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pixel Arcade (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let tuning = Tuning::from_json(&std::fs::read_to_string(&path)?)?;
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        None => Tuning::default(),
    };

    headless::platformer(tuning)?;
    headless::range();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pixel_arcade::consts::REFERENCE_FRAME_MS;
    use pixel_arcade::platform::input::{KEY_JUMP, KEY_RELOAD, KEY_START};
    use pixel_arcade::platform::{Demo, PlatformerDemo, RangeDemo};
    use pixel_arcade::sim::{GamePhase, LevelError, catalog};
    use pixel_arcade::{RangeTuning, Settings, Tuning};

    /// Run right with periodic jumps until the session ends or time runs out
    pub fn platformer(tuning: Tuning) -> Result<(), LevelError> {
        let mut demo = PlatformerDemo::new(catalog()?.into(), tuning, Settings::default(), 42);
        demo.key_down(KEY_JUMP);
        demo.key_up(KEY_JUMP);
        demo.key_down("ArrowRight");

        let mut frames = 0u64;
        for frame in 0..3600u64 {
            if frame % 45 == 0 {
                demo.key_down(KEY_JUMP);
                demo.key_up(KEY_JUMP);
            }
            demo.frame(frame as f64 * REFERENCE_FRAME_MS);
            frames = frame;
            if matches!(demo.state.phase, GamePhase::GameOver | GamePhase::Victory) {
                break;
            }
        }

        log::info!(
            "Platformer finished after {} frames: {:?}, {}",
            frames,
            demo.state.phase,
            demo.hud().fields.iter().map(|(_, t)| t.as_str()).collect::<Vec<_>>().join(" | ")
        );
        Ok(())
    }

    /// Sweep the lanes, firing, then reload
    pub fn range() {
        let mut demo = RangeDemo::new(RangeTuning::default(), Settings::default());
        let mut t = 0.0;
        let mut next = |demo: &mut RangeDemo| {
            demo.frame(t);
            t += REFERENCE_FRAME_MS;
        };

        demo.key_down(KEY_START);
        demo.pointer_lock_changed(true);
        next(&mut demo);

        for _ in 0..14 {
            demo.mouse_down();
            for _ in 0..12 {
                next(&mut demo);
            }
        }
        demo.key_down(KEY_RELOAD);
        for _ in 0..90 {
            next(&mut demo);
        }

        log::info!(
            "Range finished: score {}, {}",
            demo.state.score,
            demo.hud().fields.iter().map(|(_, t)| t.as_str()).collect::<Vec<_>>().join(" | ")
        );
    }
}
