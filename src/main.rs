//! Donut Playground entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        DeviceMotionEvent, Document, HtmlCanvasElement, HtmlSelectElement, KeyboardEvent,
        PointerEvent, TouchEvent,
    };

    use donut_playground::audio::AudioManager;
    use donut_playground::input::{InputEvent, TouchTracker, client_to_canvas, shake_from_motion};
    use donut_playground::renderer::CanvasRenderer;
    use donut_playground::sim::Playground;
    use donut_playground::{Ambience, Settings};

    /// App instance holding all state
    struct App {
        playground: Playground,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        touches: TouchTracker,
        canvas: HtmlCanvasElement,
        /// Time of the current animation frame (ms)
        now_ms: f64,
    }

    impl App {
        /// Client coordinates to canvas pixels
        fn to_canvas(&self, client_x: f32, client_y: f32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            client_to_canvas(
                Vec2::new(client_x, client_y),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32),
            )
        }

        fn touch_points(&self, list: &web_sys::TouchList) -> Vec<Vec2> {
            (0..list.length())
                .filter_map(|i| list.get(i))
                .map(|t| self.to_canvas(t.client_x() as f32, t.client_y() as f32))
                .collect()
        }

        fn handle(&mut self, event: Option<InputEvent>) {
            if let Some(event) = event {
                self.playground.handle_input(&event, self.now_ms);
                self.flush_events();
            }
        }

        /// Route queued playground events to audio
        fn flush_events(&mut self) {
            let events = self.playground.drain_events();
            if self.playground.settings().sound_enabled {
                self.audio.play_events(&events);
            }
        }

        fn frame(&mut self, time: f64) {
            self.now_ms = time;
            self.playground.tick(time);
            if let Some(renderer) = &self.renderer {
                if let Err(e) = renderer.render(&self.playground) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(width, height);
            }
            self.playground.resize(width as f32, height as f32);
        }

        fn save_settings(&self) {
            self.playground.settings().save();
        }
    }

    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (800, 600);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w.max(1.0) as u32, h.max(1.0) as u32)
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn set_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("active", active);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Donut Playground starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("playground")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #playground canvas found");
            return;
        };

        let (width, height) = window_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let playground = Playground::new(seed, width as f32, height as f32, settings.clone());
        log::info!("Playground initialized with seed: {}", seed);

        let renderer = CanvasRenderer::new(&canvas);
        if renderer.is_none() {
            log::error!("Canvas 2D context unavailable - nothing will be drawn");
        }

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(!settings.sound_enabled);

        let app = Rc::new(RefCell::new(App {
            playground,
            renderer,
            audio,
            touches: TouchTracker::new(),
            canvas: canvas.clone(),
            now_ms: 0.0,
        }));

        sync_controls(&document, &settings);
        set_hidden(&document, "loading-screen", true);
        set_hidden(&document, "intro-overlay", false);

        setup_intro(&document, app.clone());
        setup_pointer_handlers(&canvas, app.clone());
        setup_touch_handlers(&canvas, app.clone());
        setup_motion_and_resize(app.clone());
        setup_keyboard(app.clone());
        setup_controls(&document, app.clone());

        request_animation_frame(app);
        log::info!("Donut Playground running!");
    }

    /// Reflect loaded settings in the control panel
    fn sync_controls(document: &Document, settings: &Settings) {
        set_active(document, "gravity-toggle", settings.gravity_enabled);
        set_active(document, "sound-toggle", settings.sound_enabled);
        set_active(document, "zen-toggle", settings.zen_mode);
        set_hidden(document, "controls", settings.zen_mode);
        if let Some(select) = document
            .get_element_by_id("ambience-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.ambience.as_str());
        }
    }

    fn setup_intro(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("begin-btn") else {
            return;
        };
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            set_hidden(&document, "intro-overlay", true);
            let mut a = app.borrow_mut();
            // Audio can only start after a user gesture
            let ambience = a.playground.settings().ambience;
            a.audio.set_ambience(ambience);
            a.audio.resume();
            log::info!("Intro dismissed");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse/pen only; touches go through the touch handlers
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            if event.pointer_type() == "touch" {
                return;
            }
            let mut a = app.borrow_mut();
            let pos = a.to_canvas(event.client_x() as f32, event.client_y() as f32);
            a.handle(Some(InputEvent::Tap { pos }));
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                let points = a.touch_points(&event.touches());
                let input = a.touches.touch_start(&points);
                a.handle(input);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (drag / pinch)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                let points = a.touch_points(&event.touches());
                let input = a.touches.touch_move(&points);
                a.handle(input);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut a = app.borrow_mut();
                let points = a.touch_points(&event.touches());
                a.touches.touch_end(&points);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_motion_and_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceMotionEvent| {
                let Some(accel) = event.acceleration() else {
                    return;
                };
                let (Some(x), Some(y)) = (accel.x(), accel.y()) else {
                    return;
                };
                // Device y points up; screen y points down
                let input = shake_from_motion(Vec2::new(x as f32, -y as f32));
                app.borrow_mut().handle(input);
            });
            let _ = window
                .add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = window_size();
                app.borrow_mut().resize(w, h);
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                " " => {
                    let center = Vec2::new(
                        a.canvas.width() as f32 * 0.5,
                        a.canvas.height() as f32 * 0.5,
                    );
                    a.handle(Some(InputEvent::Scatter { center }));
                }
                "r" | "R" => {
                    a.playground.reset();
                    a.flush_events();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) {
        // Gravity
        if let Some(btn) = document.get_element_by_id("gravity-toggle") {
            let app = app.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let enabled = !a.playground.settings().gravity_enabled;
                a.playground.set_gravity(enabled);
                set_active(&document, "gravity-toggle", enabled);
                a.save_settings();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound
        if let Some(btn) = document.get_element_by_id("sound-toggle") {
            let app = app.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let enabled = !a.playground.settings().sound_enabled;
                a.playground.set_sound(enabled);
                a.audio.set_muted(!enabled);
                set_active(&document, "sound-toggle", enabled);
                a.save_settings();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Zen mode
        if let Some(btn) = document.get_element_by_id("zen-toggle") {
            let app = app.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let enabled = !a.playground.settings().zen_mode;
                a.playground.set_zen_mode(enabled);
                set_active(&document, "zen-toggle", enabled);
                set_hidden(&document, "controls", enabled);
                a.save_settings();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Ambience
        if let Some(select) = document
            .get_element_by_id("ambience-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let app = app.clone();
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(ambience) = Ambience::from_str(&select_clone.value()) else {
                    log::warn!("Unknown ambience '{}'", select_clone.value());
                    return;
                };
                let mut a = app.borrow_mut();
                a.playground.set_ambience(ambience);
                a.audio.set_ambience(ambience);
                a.save_settings();
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.playground.reset();
                a.flush_events();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
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
    log::info!("Donut Playground (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate a few seconds of play and report where the donuts ended up
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use donut_playground::Settings;
    use donut_playground::input::InputEvent;
    use donut_playground::sim::Playground;
    use glam::Vec2;

    let settings = Settings {
        gravity_enabled: true,
        ..Settings::default()
    };
    let (width, height) = (1280.0, 720.0);
    let mut playground = Playground::new(2024, width, height, settings);

    const FRAME_MS: f64 = 1000.0 / 60.0;
    for frame in 0..600u32 {
        let now = frame as f64 * FRAME_MS;
        match frame {
            60 => playground.tap(Vec2::new(640.0, 360.0), now),
            240 => playground.handle_input(&InputEvent::Pinch { center: Vec2::new(640.0, 600.0) }, now),
            _ => {}
        }
        playground.tick(now);
    }

    let resting = playground.pool.iter().filter(|d| d.is_at_rest()).count();
    let lowest = playground
        .pool
        .iter()
        .map(|d| d.pos.y + d.radius)
        .fold(0.0_f32, f32::max);
    let toppings: usize = playground
        .pool
        .iter()
        .map(|d| d.decoration.topping_count())
        .sum();
    log::info!(
        "After {} ticks: {} donuts ({} toppings), {} at rest, lowest edge at {:.1}/{}",
        playground.time_ticks,
        playground.pool.len(),
        toppings,
        resting,
        lowest,
        height
    );
    for event in playground.drain_events() {
        log::debug!("event: {:?}", event);
    }
    println!("✓ Headless run finished with {} donuts", playground.pool.len());
}
