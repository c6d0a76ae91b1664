//! Websteroids entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent};

    use websteroids::consts::{WORLD_HEIGHT, WORLD_WIDTH};
    use websteroids::platform::web::request_frame;
    use websteroids::renderer::{RenderState, shapes};
    use websteroids::{Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        settings: Settings,
        fps_display: Option<Element>,
    }

    impl Game {
        /// One host frame: maybe tick, and redraw only when something moved
        fn frame(&mut self, now: f64) {
            if self.session.run_once(now) {
                self.render();
                self.update_hud(now);
            }
        }

        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            let vertices = shapes::scene(&self.session.snapshot(), &self.settings);
            match render_state.render(&vertices) {
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

        fn update_hud(&self, now: f64) {
            if !self.settings.show_fps {
                return;
            }
            if let Some(ref el) = self.fps_display {
                let text = self.session.frame_stats(now).hud_text();
                el.set_text_content(Some(&text));
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Websteroids starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);
        let style = canvas.style();
        style.set_property("display", "block")?;
        style.set_property("margin-left", "auto")?;
        style.set_property("margin-right", "auto")?;
        body.append_child(&canvas)?;

        let settings = Settings::load();
        let fps_display = if settings.show_fps {
            let el = document.create_element("div")?;
            el.set_attribute("style", "color: white")?;
            body.append_child(&el)?;
            Some(el)
        } else {
            None
        };

        let tuning = Tuning::load();
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(tuning),
            render_state: None,
            settings,
            fps_display,
        }));

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, WORLD_WIDTH as u32, WORLD_HEIGHT as u32)
                .await
                .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Websteroids running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down / key up
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Keep arrow keys from scrolling the page
                if game.borrow_mut().session.handle_key(&event.code(), pressed) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-ups go elsewhere, so let go of everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.release_controls();
                log::info!("Controls released (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        request_frame(closure);
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Websteroids (native) starting headless run...");
    log::info!("The playable build is the web one - run with `trunk serve`");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a session with synthetic 60 Hz timestamps and a scripted pilot
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use websteroids::{Session, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUN_MS: f64 = 5000.0;

    // (time ms, key code, pressed)
    let script: &[(f64, &str, bool)] = &[
        (0.0, "ArrowUp", true),
        (1000.0, "KeyX", true),
        (2000.0, "ArrowRight", true),
        (2500.0, "ArrowRight", false),
        (3000.0, "ArrowUp", false),
        (4000.0, "KeyX", false),
    ];

    let mut session = Session::new(Tuning::load());
    let mut next_event = 0;
    let mut frame = 0u32;

    loop {
        let now = frame as f64 * FRAME_MS;
        if now > RUN_MS {
            break;
        }

        while let Some(&(at, code, pressed)) = script.get(next_event) {
            if at > now {
                break;
            }
            session.handle_key(code, pressed);
            log::debug!("t={:.0}ms {} {}", now, code, if pressed { "down" } else { "up" });
            next_event += 1;
        }

        if session.run_once(now) && session.clock().ticks() % 30 == 0 {
            let snap = session.snapshot();
            log::info!(
                "tick {:>4}: ship ({:.1}, {:.1}) rot {:.2}, {} bullets",
                session.clock().ticks(),
                snap.player.x,
                snap.player.y,
                snap.player.rot,
                snap.bullets.len()
            );
        }
        frame += 1;
    }

    let end = frame.saturating_sub(1) as f64 * FRAME_MS;
    println!("{}", session.frame_stats(end).hud_text());
    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
