//! Scratch Card entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, TouchEvent};

    use scratch_card::Settings;
    use scratch_card::card::{CardEvent, CardVariant};
    use scratch_card::haptics::HapticEngine;
    use scratch_card::input::{
        KeyCommand, PointerRelease, PointerTracker, key_command, to_card_local,
    };
    use scratch_card::renderer::{CardLayout, CardRenderState};
    use scratch_card::screens::{
        GameCard, HOME_FOOTER, HOME_TITLE, HOW_TO_PLAY, Navigation, Screen, game_cards,
    };

    /// Fallback frame time before the first timestamp arrives
    const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

    /// App instance holding all state
    struct App {
        nav: Navigation,
        settings: Settings,
        haptics: HapticEngine,
        pointer: PointerTracker,
        render_state: Option<CardRenderState>,
        last_time: f64,
        dpr: f64,
    }

    impl App {
        fn new(settings: Settings, dpr: f64) -> Self {
            let mut haptics = HapticEngine::new();
            haptics.set_enabled(settings.haptics);
            Self {
                nav: Navigation::new(),
                settings,
                haptics,
                pointer: PointerTracker::new(),
                render_state: None,
                last_time: 0.0,
                dpr,
            }
        }

        fn open(&mut self, variant: CardVariant) {
            let seed = js_sys::Date::now() as u64;
            let viewport_width = viewport_width();
            let max_confetti = self.settings.max_confetti();

            let surface = self.nav.open(variant, seed);
            surface.set_confetti_limit(max_confetti);
            surface.set_viewport_width(viewport_width);

            if let Some(rs) = &mut self.render_state {
                rs.snap_flip(false);
            }
            self.pointer.cancel();

            let Some(document) = document() else { return };
            let config = variant.config();
            let card = GameCard::for_variant(variant);
            set_text(&document, "card-title", card.title);
            set_text(&document, "reset-btn", variant.reset_label());
            if let Some(slot) = document.get_element_by_id("card-slot") {
                let _ = slot.set_attribute("class", &format!("card-slot {}", variant.as_str()));
                let _ = slot.set_attribute(
                    "style",
                    &format!("width: {}px; height: {}px", config.width, config.height),
                );
            }
            log::info!("Card mounted with seed: {}", seed);
        }

        fn back(&mut self) {
            self.nav.back();
            self.pointer.cancel();
        }

        fn reset(&mut self) {
            if let Some(surface) = self.nav.surface_mut() {
                surface.reset();
            }
            self.flush();
        }

        fn pointer_down(&mut self, client: Vec2) {
            if self.nav.surface().is_some() {
                self.pointer.down(client);
            }
        }

        fn pointer_move(&mut self, client: Vec2) {
            let Some(client) = self.pointer.moved(client) else {
                return;
            };
            let Some(card_size) = self
                .nav
                .surface()
                .map(|s| Vec2::new(s.config().width, s.config().height))
            else {
                return;
            };
            let Some(local) = card_local(client, card_size) else {
                return;
            };
            if let Some(surface) = self.nav.surface_mut() {
                surface.on_drag_sample(local);
            }
            self.flush();
        }

        fn pointer_up(&mut self) {
            if self.pointer.up() == PointerRelease::Tap {
                if let Some(surface) = self.nav.surface_mut() {
                    surface.on_flip();
                }
                self.flush();
            }
        }

        /// Forward pending haptics to the device and log card events
        fn flush(&mut self) {
            let now = js_sys::Date::now();
            let Some(surface) = self.nav.surface_mut() else {
                return;
            };
            for style in surface.drain_haptics() {
                self.haptics.impact(style, now);
            }
            for event in surface.drain_events() {
                match event {
                    CardEvent::Revealed { reward } => log::info!("You won {}", reward),
                    other => log::debug!("Card event: {:?}", other),
                }
            }
        }

        fn toggle_haptics(&mut self) {
            self.settings.haptics = !self.settings.haptics;
            self.haptics.set_enabled(self.settings.haptics);
            self.settings.save();
            log::info!("Haptics {}", if self.settings.haptics { "on" } else { "off" });
        }

        fn toggle_reduced_motion(&mut self) {
            self.settings.reduced_motion = !self.settings.reduced_motion;
            let max_confetti = self.settings.max_confetti();
            if let Some(surface) = self.nav.surface_mut() {
                surface.set_confetti_limit(max_confetti);
            }
            self.settings.save();
            log::info!(
                "Reduced motion {}",
                if self.settings.reduced_motion { "on" } else { "off" }
            );
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else {
                return;
            };
            self.dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * self.dpr) as u32;
            let height = (canvas.client_height() as f64 * self.dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(rs) = &mut self.render_state {
                rs.resize(width, height);
            }
            let viewport_width = viewport_width();
            if let Some(surface) = self.nav.surface_mut() {
                surface.set_viewport_width(viewport_width);
            }
        }

        fn update(&mut self, dt: f32, time: f64) {
            if let Some(surface) = self.nav.surface_mut() {
                surface.step(dt);
            }

            let layout = card_layout(self.dpr);
            let Some(rs) = &mut self.render_state else {
                return;
            };
            match rs.render(self.nav.surface_mut(), layout, &self.settings, dt, time) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = rs.size;
                    rs.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let screen = self.nav.screen();
            set_visible(&document, Screen::Home.panel_id(), screen == Screen::Home);
            set_visible(&document, "card-screen", screen != Screen::Home);

            let Some(surface) = self.nav.surface() else {
                return;
            };
            let variant = surface.config().variant;
            let flip = self.render_state.as_ref().map_or(
                if surface.flipped() { 1.0 } else { 0.0 },
                CardRenderState::flip_amount,
            );

            set_text(&document, "instruction", variant.instruction(surface.flipped()));
            set_text(&document, "reward-value", surface.reward().unwrap_or(""));
            set_visible(&document, "hint", surface.show_hint());
            set_visible(&document, "reset-btn", surface.show_reset());

            // The reward sits under the scratch side only
            if let Some(layer) = document.get_element_by_id("reward-layer") {
                let squash = (flip * std::f32::consts::PI).cos().abs();
                let style = if flip >= 0.5 {
                    format!("transform: scaleX({:.3})", squash)
                } else {
                    "visibility: hidden".to_string()
                };
                let _ = layer.set_attribute("style", &style);
            }

            let show_win = surface.show_win();
            let reward = surface.reward().unwrap_or("");
            set_text(&document, "win-message", &variant.win_message(reward));
            set_visible(&document, "win-message", show_win);
            set_text(&document, "win-heading", variant.win_heading().unwrap_or(""));
            set_visible(&document, "win-heading", show_win && variant.win_heading().is_some());
            set_text(&document, "claim-btn", variant.claim_label().unwrap_or(""));
            set_visible(&document, "claim-btn", show_win && variant.claim_label().is_some());
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn viewport_width() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
        }
    }

    fn card_slot() -> Option<Element> {
        document().and_then(|d| d.get_element_by_id("card-slot"))
    }

    /// Card rectangle on the canvas in physical pixels
    fn card_layout(dpr: f64) -> CardLayout {
        let Some(slot) = card_slot() else {
            return CardLayout::default();
        };
        let rect = slot.get_bounding_client_rect();
        let dpr_f = dpr as f32;
        CardLayout {
            origin: [rect.left() as f32 * dpr_f, rect.top() as f32 * dpr_f],
            size: [rect.width() as f32 * dpr_f, rect.height() as f32 * dpr_f],
            pixel_ratio: dpr_f,
        }
    }

    /// Client coordinates to card-local units
    fn card_local(client: Vec2, card_size: Vec2) -> Option<Vec2> {
        let slot = card_slot()?;
        let rect = slot.get_bounding_client_rect();
        let offset = client - Vec2::new(rect.left() as f32, rect.top() as f32);
        let element_size = Vec2::new(rect.width() as f32, rect.height() as f32);
        Some(to_card_local(offset, element_size, card_size))
    }

    fn touch_position(event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
    }

    fn populate_home(document: &Document) {
        set_text(document, "home-title", HOME_TITLE);
        set_text(document, "home-footer", HOME_FOOTER);
        if let Some(list) = document.get_element_by_id("game-cards") {
            let html: String = game_cards()
                .iter()
                .map(|card| {
                    let [r, g, b, _] = card.color.to_array();
                    format!(
                        "<button id=\"{}\" class=\"game-card\" style=\"--accent: rgb({}, {}, {})\">\
                         <span class=\"icon\">{}</span><span class=\"title\">{}</span>\
                         <span class=\"description\">{}</span></button>",
                        card.button_id(),
                        (r * 255.0) as u8,
                        (g * 255.0) as u8,
                        (b * 255.0) as u8,
                        card.icon,
                        card.title,
                        card.description
                    )
                })
                .collect();
            list.set_inner_html(&html);
        }
        if let Some(info) = document.get_element_by_id("how-to-play") {
            let html: String = HOW_TO_PLAY
                .iter()
                .map(|row| format!("<li><span class=\"icon\">{}</span>{}</li>", row.icon, row.text))
                .collect();
            info.set_inner_html(&html);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Scratch Card starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
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

        let settings = Settings::load();
        log::info!("Settings: {:?}", settings);
        let app = Rc::new(RefCell::new(App::new(settings, dpr)));

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
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = CardRenderState::new(surface, &adapter, width, height).await;
        render_state.set_start_time(js_sys::Date::now());
        app.borrow_mut().render_state = Some(render_state);

        populate_home(&document);

        setup_navigation(app.clone());
        setup_pointer_handlers(app.clone());
        setup_keyboard(app.clone());
        setup_resize(&canvas, app.clone());

        app.borrow().update_hud();
        request_animation_frame(app);

        log::info!("Scratch Card running!");
    }

    fn setup_navigation(app: Rc<RefCell<App>>) {
        let Some(document) = document() else { return };

        for card in game_cards() {
            if let Some(btn) = document.get_element_by_id(&card.button_id()) {
                let app = app.clone();
                let variant = card.variant;
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow_mut().open(variant);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("back-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().back();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Claiming has no backend; the button only acknowledges the tap
        if let Some(btn) = document.get_element_by_id("claim-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                log::info!("Claim pressed");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer_handlers(app: Rc<RefCell<App>>) {
        let Some(slot) = card_slot() else {
            log::warn!("No #card-slot element, card input disabled");
            return;
        };
        let Some(document) = document() else { return };

        // Mouse down on card
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                app.borrow_mut().pointer_down(pos);
            });
            let _ = slot.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move and up are tracked on the document so drags can leave the card
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                app.borrow_mut().pointer_move(pos);
            });
            let _ = document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().pointer_up();
            });
            let _ = document.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start on card
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_position(&event) {
                    app.borrow_mut().pointer_down(pos);
                }
            });
            let _ = slot.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_position(&event) {
                    app.borrow_mut().pointer_move(pos);
                }
            });
            let _ = slot.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().pointer_up();
            });
            let _ = slot.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch cancel
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().pointer.cancel();
            });
            let _ = slot.add_event_listener_with_callback("touchcancel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(document) = document() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let focus_on_control = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| matches!(el.tag_name().as_str(), "BUTTON" | "INPUT" | "A"));
            let Some(command) = key_command(&event.key(), focus_on_control) else {
                return;
            };

            let mut app = app.borrow_mut();
            match command {
                KeyCommand::Back => app.back(),
                KeyCommand::Reset => app.reset(),
                KeyCommand::ToggleHaptics => app.toggle_haptics(),
                KeyCommand::ToggleReducedMotion => app.toggle_reduced_motion(),
                KeyCommand::Flip => {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                    if let Some(surface) = app.nav.surface_mut() {
                        surface.on_flip();
                    }
                    app.flush();
                }
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                FIRST_FRAME_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Scratch Card (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nPlaying both cards headless...");
    for variant in scratch_card::card::CardVariant::ALL {
        play_headless(variant);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Flip a card and scratch left to right until the reward shows
#[cfg(not(target_arch = "wasm32"))]
fn play_headless(variant: scratch_card::card::CardVariant) {
    use glam::Vec2;
    use scratch_card::card::{ScratchSurface, samples_to_reveal};

    let config = variant.config();
    let expected = samples_to_reveal(&config);
    let mut surface = ScratchSurface::new(config, 42);
    surface.on_flip();

    let (width, height) = (surface.config().width, surface.config().height);
    let mut samples = 0;
    while !surface.revealed() && samples < 64 {
        let x = (samples as f32 * 40.0 + 20.0) % width;
        let y = height * 0.5;
        surface.on_drag_sample(Vec2::new(x, y));
        samples += 1;
        println!(
            "  {} sample {:>2}: progress {:.3}",
            variant.as_str(),
            samples,
            surface.progress()
        );
    }

    let reward = surface.reward().unwrap_or("-");
    println!(
        "✓ {} revealed {} after {} samples (expected {:?}), mask {:.0}% cleared",
        variant.as_str(),
        reward,
        samples,
        expected,
        surface.mask().cleared_fraction() * 100.0
    );
    surface.reset();
    assert!(surface.state().is_default(), "reset should restore defaults");
}
