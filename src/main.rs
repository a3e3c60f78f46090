//! Neon Portfolio entry point
//!
//! On wasm this wires the effect cores to the host page: timers for the
//! loader and typewriter, an animation-frame loop for the particle field,
//! scroll/click/mousemove listeners and intersection observers for the rest.
//! Every collaborator element is existence-checked; a missing element means
//! that effect silently stays off.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
        ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
    };

    use neon_portfolio::consts::*;
    use neon_portfolio::fx::scroll::{
        RevealFlag, SkillFill, active_section, glow_offset, hero_parallax, nav_scrolled,
    };
    use neon_portfolio::selectors::*;
    use neon_portfolio::{LoaderSim, ParticleField, Typewriter};

    /// Top-level composition: construct and start every effect explicitly.
    /// Only the scroll-reveal engine is deferred - the loader activates it
    /// when the overlay comes down.
    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon portfolio effects starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let seed = js_sys::Date::now() as u64;

        start_loader(&window, &document, seed);
        start_typewriter(&document, seed);
        start_particles(&window, &document, seed);
        init_nav_highlight(&window, &document);
        init_smooth_scroll(&document);
        init_mobile_menu(&document);
        init_parallax(&window, &document);
        init_card_glow(&document);

        log::info!("Neon portfolio effects running");
    }

    /// Collect the elements matching a selector group
    fn query_all(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    // ---- Loading screen -------------------------------------------------

    fn start_loader(window: &Window, document: &Document, seed: u64) {
        let loader = document.get_element_by_id(LOADING_SCREEN_ID);
        let fill = document
            .get_element_by_id(LOADER_FILL_ID)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let nav = document.get_element_by_id(MAIN_NAV_ID);
        if loader.is_none() {
            log::debug!("no loading overlay, scroll reveals activate immediately");
            init_scroll_reveal(document);
            return;
        }

        // Page is pinned until the loader finishes
        if let Some(body) = document.body() {
            let _ = body.style().set_property("overflow", "hidden");
        }

        let sim = Rc::new(RefCell::new(LoaderSim::new(seed)));
        let interval_id = Rc::new(Cell::new(0));

        let tick = Closure::<dyn FnMut()>::new({
            let sim = sim.clone();
            let interval_id = interval_id.clone();
            let window = window.clone();
            let document = document.clone();
            move || {
                let finished = sim.borrow_mut().tick();
                if let Some(fill) = &fill {
                    let _ = fill
                        .style()
                        .set_property("width", &format!("{}%", sim.borrow().progress()));
                }
                if !finished {
                    return;
                }
                window.clear_interval_with_handle(interval_id.get());

                let settle = Closure::once({
                    let sim = sim.clone();
                    let document = document.clone();
                    let loader = loader.clone();
                    let nav = nav.clone();
                    move || {
                        if !sim.borrow_mut().settle() {
                            return;
                        }
                        if let Some(loader) = &loader {
                            let _ = loader.class_list().add_1("hidden");
                        }
                        if let Some(body) = document.body() {
                            let _ = body.style().set_property("overflow", "");
                        }
                        if let Some(nav) = &nav {
                            let _ = nav.class_list().add_1("visible");
                        }
                        init_scroll_reveal(&document);
                        log::info!("Loading screen done, scroll reveals armed");
                    }
                });
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    settle.as_ref().unchecked_ref(),
                    LOADER_SETTLE_MS,
                );
                settle.forget();
            }
        });
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                LOADER_TICK_MS,
            )
            .unwrap_or(0);
        interval_id.set(id);
        tick.forget();
    }

    // ---- Typewriter -----------------------------------------------------

    fn start_typewriter(document: &Document, seed: u64) {
        let Some(el) = document.get_element_by_id(TYPED_TEXT_ID) else {
            log::debug!("no typewriter target");
            return;
        };
        // Phrase content belongs to the page: a |-separated data attribute,
        // with a crate default behind it
        let phrases: Vec<String> = el
            .get_attribute("data-phrases")
            .map(|raw| raw.split('|').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();
        let tw = Rc::new(RefCell::new(Typewriter::new(phrases, seed)));
        schedule_type_step(tw, el, TYPE_START_DELAY_MS);
    }

    /// Self-rescheduling timeout chain: each step decides its own delay
    fn schedule_type_step(tw: Rc<RefCell<Typewriter>>, el: Element, delay: i32) {
        let closure = Closure::once(move || {
            let next = tw.borrow_mut().step();
            el.set_text_content(Some(&tw.borrow().text()));
            schedule_type_step(tw, el, next);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay,
            );
        }
        closure.forget();
    }

    // ---- Particle canvas ------------------------------------------------

    /// Particle field plus its drawing surface, driven once per frame
    struct FieldRunner {
        field: ParticleField,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl FieldRunner {
        fn frame(&mut self) {
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            self.ctx.clear_rect(0.0, 0.0, w, h);
            self.field.update();

            for p in self.field.particles() {
                let alpha = p.alpha() as f64;
                self.draw_disc(p.pos.x as f64, p.pos.y as f64, p.radius as f64, p.color_str(), alpha);
                // Soft glow halo behind each disc
                self.draw_disc(
                    p.pos.x as f64,
                    p.pos.y as f64,
                    p.radius as f64 * 3.0,
                    p.color_str(),
                    alpha * 0.15,
                );
            }

            let links = self.field.links();
            let particles = self.field.particles();
            for (i, j, alpha) in links {
                let (a, b) = (particles[i].pos, particles[j].pos);
                self.ctx.begin_path();
                self.ctx.move_to(a.x as f64, a.y as f64);
                self.ctx.line_to(b.x as f64, b.y as f64);
                self.ctx.set_stroke_style_str(particles[i].color_str());
                self.ctx.set_global_alpha(alpha as f64);
                self.ctx.set_line_width(LINK_WIDTH);
                self.ctx.stroke();
            }
            self.ctx.set_global_alpha(1.0);
        }

        fn draw_disc(&self, x: f64, y: f64, radius: f64, color: &str, alpha: f64) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU);
            self.ctx.set_fill_style_str(color);
            self.ctx.set_global_alpha(alpha);
            self.ctx.fill();
        }
    }

    /// Fit the canvas pixel size to its parent element
    fn size_canvas_to_parent(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let (w, h) = canvas
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
            .map(|p| (p.offset_width() as u32, p.offset_height() as u32))
            .unwrap_or((canvas.width(), canvas.height()));
        canvas.set_width(w);
        canvas.set_height(h);
        (w, h)
    }

    fn start_particles(window: &Window, document: &Document, seed: u64) {
        let Some(canvas) = document
            .get_element_by_id(PARTICLE_CANVAS_ID)
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::debug!("no particle canvas");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|o| o.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::debug!("2d context unavailable");
            return;
        };

        let (w, h) = size_canvas_to_parent(&canvas);
        let runner = Rc::new(RefCell::new(FieldRunner {
            field: ParticleField::new(seed, w as f32, h as f32),
            canvas: canvas.clone(),
            ctx,
        }));

        // Keep the surface and the simulation bounds tracking the viewport
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                let mut r = runner.borrow_mut();
                let (w, h) = size_canvas_to_parent(&r.canvas);
                r.field.resize(w as f32, h as f32);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        request_particle_frame(runner);
    }

    fn request_particle_frame(runner: Rc<RefCell<FieldRunner>>) {
        let closure = Closure::once(move |_time: f64| {
            runner.borrow_mut().frame();
            request_particle_frame(runner);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // ---- Scroll reveal engine -------------------------------------------

    /// Armed once, by the loader teardown
    fn init_scroll_reveal(document: &Document) {
        init_reveal_watcher(document);
        init_skill_watcher(document);
    }

    fn init_reveal_watcher(document: &Document) {
        let targets = query_all(document, REVEAL_TARGETS);
        if targets.is_empty() {
            return;
        }
        for el in &targets {
            let _ = el.class_list().add_1("anim-hidden");
        }

        let flags: Rc<RefCell<Vec<(Element, RevealFlag)>>> = Rc::new(RefCell::new(
            targets
                .iter()
                .map(|el| (el.clone(), RevealFlag::default()))
                .collect(),
        ));

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    for (el, flag) in flags.borrow_mut().iter_mut() {
                        if *el == target && flag.on_intersection(entry.is_intersecting()) {
                            let _ = el.class_list().add_1("anim-visible");
                        }
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);
        if let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        {
            // Elements stay observed forever; re-entries are no-ops
            for el in &targets {
                observer.observe(el);
            }
        }
        callback.forget();
    }

    fn init_skill_watcher(document: &Document) {
        let bars = query_all(document, SKILL_BARS);
        if bars.is_empty() {
            return;
        }

        let latches: Rc<RefCell<Vec<(Element, SkillFill)>>> = Rc::new(RefCell::new(
            bars.iter()
                .map(|el| (el.clone(), SkillFill::default()))
                .collect(),
        ));

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    for (el, latch) in latches.borrow_mut().iter_mut() {
                        if *el == target && latch.on_intersection(entry.is_intersecting()) {
                            apply_skill_fill(el);
                            observer.unobserve(el);
                        }
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(SKILL_THRESHOLD));
        if let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        {
            for el in &bars {
                observer.observe(el);
            }
        }
        callback.forget();
    }

    /// Write the declared percentage and color through to the fill element
    fn apply_skill_fill(bar: &Element) {
        let pct = bar.get_attribute("data-percent").unwrap_or_default();
        let color = bar.get_attribute("data-color").unwrap_or_default();
        let Some(fill) = bar
            .query_selector(BAR_FILL)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let style = fill.style();
        let _ = style.set_property("width", &format!("{pct}%"));
        let _ = style.set_property("background", &format!("linear-gradient(90deg, {color}, {color})"));
        let _ = style.set_property("color", &color);
        let _ = style.set_property(
            "box-shadow",
            &format!("0 0 12px {color}, 0 0 24px {color}40"),
        );
    }

    // ---- Nav highlighter ------------------------------------------------

    fn init_nav_highlight(window: &Window, document: &Document) {
        let nav = document.get_element_by_id(MAIN_NAV_ID);
        let sections = query_all(document, SECTIONS);
        let links = query_all(document, NAV_LINKS);

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new({
            let window = window.clone();
            move |_event: web_sys::Event| {
                let y = window.scroll_y().unwrap_or(0.0);

                if let Some(nav) = &nav {
                    let _ = nav.class_list().toggle_with_force("scrolled", nav_scrolled(y));
                }

                // Section geometry is re-read every event: layout may have changed
                let tops: Vec<f64> = sections
                    .iter()
                    .map(|s| {
                        s.dyn_ref::<HtmlElement>()
                            .map(|h| h.offset_top() as f64)
                            .unwrap_or(0.0)
                    })
                    .collect();
                let current = active_section(&tops, y).map(|i| sections[i].id());

                for link in &links {
                    let is_active = match (&current, link.get_attribute("data-section")) {
                        (Some(id), Some(section)) => *id == section,
                        _ => false,
                    };
                    let _ = link.class_list().toggle_with_force("active", is_active);
                }
            }
        });
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // ---- Micro-interactions ---------------------------------------------

    fn init_smooth_scroll(document: &Document) {
        for anchor in query_all(document, ANCHOR_LINKS) {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new({
                let document = document.clone();
                let anchor = anchor.clone();
                move |event: web_sys::Event| {
                    event.prevent_default();
                    let Some(href) = anchor.get_attribute("href") else {
                        return;
                    };
                    let Some(target) = document.query_selector(&href).ok().flatten() else {
                        return;
                    };
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);

                    // Navigating also collapses the mobile menu
                    if let Some(list) = document.query_selector(NAV_LINK_LIST).ok().flatten() {
                        let _ = list.class_list().remove_1("mobile-open");
                    }
                    if let Some(hamburger) = document.get_element_by_id(HAMBURGER_ID) {
                        let _ = hamburger.class_list().remove_1("open");
                    }
                }
            });
            let _ =
                anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn init_mobile_menu(document: &Document) {
        let (Some(hamburger), Some(list)) = (
            document.get_element_by_id(HAMBURGER_ID),
            document.query_selector(NAV_LINK_LIST).ok().flatten(),
        ) else {
            log::debug!("no mobile menu");
            return;
        };

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new({
            let hamburger = hamburger.clone();
            move |_event: web_sys::Event| {
                let _ = hamburger.class_list().toggle("open");
                let _ = list.class_list().toggle("mobile-open");
            }
        });
        let _ =
            hamburger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn init_parallax(window: &Window, document: &Document) {
        let Some(hero) = document
            .query_selector(HERO_CONTENT)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            log::debug!("no hero content");
            return;
        };

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new({
            let window = window.clone();
            move |_event: web_sys::Event| {
                let y = window.scroll_y().unwrap_or(0.0);
                let vh = window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                if let Some(shift) = hero_parallax(y, vh) {
                    let style = hero.style();
                    let _ = style
                        .set_property("transform", &format!("translateY({}px)", shift.translate_y));
                    let _ = style.set_property("opacity", &shift.opacity.to_string());
                }
            }
        });
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn init_card_glow(document: &Document) {
        for card in query_all(document, GLOW_CARDS) {
            let Ok(card) = card.dyn_into::<HtmlElement>() else {
                continue;
            };
            let closure = Closure::<dyn FnMut(MouseEvent)>::new({
                let card = card.clone();
                move |event: MouseEvent| {
                    let rect = card.get_bounding_client_rect();
                    let (x, y) = glow_offset(
                        event.client_x() as f64,
                        event.client_y() as f64,
                        rect.left(),
                        rect.top(),
                    );
                    let style = card.style();
                    let _ = style.set_property("--glow-x", &format!("{x}px"));
                    let _ = style.set_property("--glow-y", &format!("{y}px"));

                    if let Some(glow) = card
                        .query_selector(GLOW_CHILD)
                        .ok()
                        .flatten()
                        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                    {
                        let style = glow.style();
                        let _ = style.set_property("left", &format!("{x}px"));
                        let _ = style.set_property("top", &format!("{y}px"));
                        let _ = style.set_property("transform", "translate(-50%, -50%)");
                    }
                }
            });
            let _ =
                card.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
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
    log::info!("Neon portfolio (native) starting...");
    log::info!("Effects are web-only - build with trunk/wasm-pack for the browser version");

    // Headless smoke run of the deterministic cores
    println!("\nRunning loader smoke test...");
    smoke_loader();
    println!("Running typewriter smoke test...");
    smoke_typewriter();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_loader() {
    use neon_portfolio::LoaderSim;

    let mut sim = LoaderSim::new(0xC0FFEE);
    let mut ticks = 1;
    while !sim.tick() {
        ticks += 1;
    }
    assert_eq!(sim.progress(), 100.0);
    assert!(sim.settle());
    println!("✓ Loader filled in {ticks} ticks");
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_typewriter() {
    use neon_portfolio::Typewriter;

    let mut tw = Typewriter::new(Vec::new(), 0xC0FFEE);
    let start = tw.phrase_index();
    let mut steps = 0;
    while tw.phrase_index() == start {
        tw.step();
        steps += 1;
        assert!(steps < 1000, "typewriter never advanced");
    }
    println!("✓ Typewriter cycled a phrase in {steps} steps");
}
