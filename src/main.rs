//! Tally Board entry point
//!
//! Binds the page's buttons and name fields to the scoreboard and pushes the
//! resulting view back into the DOM.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

    use tally_board::board::Team;
    use tally_board::{ConfettiLevel, Scoreboard, Settings};
    use tally_board::effects::{BurstOrigin, CelebrationPlan, EffectCue, EffectsPlayer};
    use tally_board::persistence::LocalStorage;
    use tally_board::present::{ScoreboardView, score_button_selector};

    // GSAP and canvas-confetti are loaded by index.html as globals
    #[wasm_bindgen(inline_js = "
        export function pulse(selector, scale, duration) {
            const el = document.querySelector(selector);
            if (!el || !window.gsap) return;
            gsap.fromTo(el, { scale: 1 }, {
                scale: scale, duration: duration, yoyo: true, repeat: 1, ease: 'power1.inOut'
            });
        }

        export function pop(selector) {
            const el = document.querySelector(selector);
            if (!el || !window.gsap) return;
            gsap.fromTo(el, { scale: 1 }, { scale: 1.3, duration: 0.2, ease: 'power2.out' });
            gsap.to(el, { scale: 1, duration: 0.2, delay: 0.2, ease: 'power2.inOut' });
        }

        export function fade_meter(visible) {
            const meter = document.querySelector('.probability-meter');
            if (!meter) return;
            if (!window.gsap) {
                meter.style.display = visible ? 'block' : 'none';
                return;
            }
            // A newer request replaces any fade still running
            gsap.killTweensOf(meter);
            meter.style.display = 'block';
            if (visible) {
                gsap.to(meter, { opacity: 1, duration: 0.4 });
            } else {
                gsap.to(meter, {
                    opacity: 0, duration: 0.4, ease: 'power1.in',
                    onComplete: () => { meter.style.display = 'none'; }
                });
            }
        }

        export function meter_fading() {
            const meter = document.querySelector('.probability-meter');
            return !!(meter && window.gsap && gsap.isTweening(meter));
        }

        export function prefers_reduced_motion() {
            return !!(window.matchMedia &&
                window.matchMedia('(prefers-reduced-motion: reduce)').matches);
        }

        export function emphasize(winner, loser, duration) {
            const w = document.querySelector(winner);
            const l = document.querySelector(loser);
            if (!w || !l || !window.gsap) return;
            gsap.to(w, { scale: 1.05, zIndex: 2, duration: duration, ease: 'back.out(1.7)' });
            gsap.to(l, { opacity: 0.4, filter: 'grayscale(100%)', duration: duration });
        }

        export function settle(winner, loser, delay, duration) {
            const targets = [document.querySelector(winner), document.querySelector(loser)]
                .filter(el => el);
            if (!targets.length || !window.gsap) return;
            gsap.to(targets, {
                scale: 1, opacity: 1, zIndex: 1, filter: 'grayscale(0%)',
                duration: duration, delay: delay, ease: 'power2.inOut'
            });
        }

        export function confetti_at(delay_ms, count, angle, spread, velocity, gravity, x, y, colors) {
            if (!window.confetti) return;
            setTimeout(() => confetti({
                particleCount: count, angle: angle, spread: spread, startVelocity: velocity,
                gravity: gravity, drift: 0, origin: { x: x, y: y }, colors: colors
            }), delay_ms);
        }
    ")]
    extern "C" {
        fn pulse(selector: &str, scale: f32, duration: f32);
        fn pop(selector: &str);
        fn fade_meter(visible: bool);
        fn meter_fading() -> bool;
        fn prefers_reduced_motion() -> bool;
        fn emphasize(winner: &str, loser: &str, duration: f32);
        fn settle(winner: &str, loser: &str, delay: f32, duration: f32);
        fn confetti_at(
            delay_ms: f64,
            count: u32,
            angle: f32,
            spread: f32,
            velocity: f32,
            gravity: f32,
            x: f32,
            y: f32,
            colors: js_sys::Array,
        );
    }

    /// Effects player backed by GSAP and canvas-confetti
    struct JsEffects;

    impl JsEffects {
        /// Center of the winner's card as viewport fractions
        fn card_center(team: Team) -> (f32, f32) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return (0.5, 0.5),
            };
            let card = window
                .document()
                .and_then(|d| d.query_selector(&format!(".team-{}", team.as_str())).ok().flatten());
            let (w, h) = (
                window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0),
                window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0),
            );
            match card {
                Some(card) => {
                    let r = card.get_bounding_client_rect();
                    (
                        ((r.left() + r.right()) / 2.0 / w) as f32,
                        ((r.top() + r.bottom()) / 2.0 / h) as f32,
                    )
                }
                None => (0.5, 0.5),
            }
        }

        fn celebrate(plan: &CelebrationPlan) {
            let winner = format!(".team-{}", plan.winner.as_str());
            let loser = format!(".team-{}", plan.winner.other().as_str());
            emphasize(&winner, &loser, plan.emphasis);

            let (cx, cy) = Self::card_center(plan.winner);
            for burst in &plan.bursts {
                let (x, y) = match burst.origin {
                    BurstOrigin::WinnerCard { dy } => (cx, cy + dy),
                    BurstOrigin::Screen { x, y } => (x, y),
                };
                let colors: js_sys::Array = burst.colors.iter().map(|c| JsValue::from_str(c)).collect();
                confetti_at(
                    f64::from(burst.at) * 1000.0,
                    burst.particle_count,
                    burst.angle,
                    burst.spread,
                    burst.start_velocity,
                    burst.gravity,
                    x,
                    y,
                    colors,
                );
            }

            settle(&winner, &loser, plan.settle_at, plan.settle);
            log::info!("Celebration queued ({} bursts)", plan.bursts.len());
        }
    }

    impl EffectsPlayer for JsEffects {
        fn play(&mut self, cue: EffectCue) {
            match cue {
                EffectCue::ButtonPressed { team, plus } => {
                    pulse(&score_button_selector(team, plus), 0.9, 0.1)
                }
                EffectCue::ScoreChanged { team } => pop(&format!("#score-{}", team.as_str())),
                EffectCue::NameEditStarted { team } => {
                    pulse(&format!("#name-{}", team.as_str()), 1.05, 0.15)
                }
                EffectCue::TieBanner => pulse("#difference", 1.1, 0.2),
                EffectCue::MeterVisibility { visible } => fade_meter(visible),
                EffectCue::Celebrate(plan) => Self::celebrate(&plan),
                EffectCue::ResetPressed => pulse("#reset-btn", 0.9, 0.1),
            }
        }
    }

    /// DOM side of the widget
    struct Page {
        document: Document,
    }

    impl Page {
        fn by_id(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn styled(&self, el: &Element) -> Option<web_sys::CssStyleDeclaration> {
            el.dyn_ref::<HtmlElement>().map(|h| h.style())
        }

        fn set_display(&self, el: &Element, visible: bool) {
            if let Some(style) = self.styled(el) {
                let _ = style.set_property("display", if visible { "block" } else { "none" });
            }
        }

        /// Write the whole view into the page
        fn render(&self, view: &ScoreboardView) {
            for team in Team::BOTH {
                let id = team.as_str();
                let tv = view.team(team);

                if let Some(el) = self.by_id(&format!("score-{}", id)) {
                    el.set_text_content(Some(&tv.score));
                }
                if let Some(input) = self
                    .by_id(&format!("name-{}", id))
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    if input.value() != tv.name {
                        input.set_value(&tv.name);
                    }
                }
                if let Some(el) = self.by_id(&format!("trophy-{}", id)) {
                    self.set_display(&el, tv.trophy_visible);
                }
            }

            let labels = [
                (".team-a-label", &view.team_one.bar_label),
                (".team-b-label", &view.team_two.bar_label),
            ];
            for (selector, label) in labels {
                if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(label));
                }
            }

            if let Some(el) = self.by_id("difference") {
                el.set_text_content(Some(&view.difference));
            }

            if let Some(style) = view.meter_style(meter_fading()) {
                if let Some(meter) = self.document.query_selector(".probability-meter").ok().flatten() {
                    if let Some(css) = self.styled(&meter) {
                        let _ = css.set_property("display", style.display);
                        let _ = css.set_property("opacity", style.opacity);
                    }
                }
            }

            if let Some(fill) = self.by_id("probability-fill") {
                if let Some(style) = self.styled(&fill) {
                    let _ = style.set_property("width", &view.bar.width_css());
                    let _ = style.set_property("background", view.bar.tint.gradient());
                }
                if let Some(bar) = fill.parent_element() {
                    if let Some(style) = self.styled(&bar) {
                        let _ = style.set_property("direction", view.bar.direction.as_css());
                    }
                }
            }
        }

        /// Reduced-motion checkbox and confetti picker
        fn render_settings(&self, settings: &Settings) {
            if let Some(toggle) = self
                .by_id("reduced-motion")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                toggle.set_checked(settings.reduced_motion);
            }
            if let Some(picker) = self
                .by_id("confetti-level")
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            {
                picker.set_value(settings.confetti.as_str());
            }
        }
    }

    struct App {
        board: Scoreboard<LocalStorage, JsEffects>,
        page: Page,
    }

    impl App {
        fn render(&self) {
            self.page.render(&self.board.view());
            self.page.render_settings(self.board.settings());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tally Board starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let storage = LocalStorage::open();
        let first_visit = Settings::load_stored(&storage).is_none();
        let mut board = Scoreboard::boot(storage, JsEffects);
        if first_visit && prefers_reduced_motion() {
            log::info!("System prefers reduced motion");
            board.set_reduced_motion(true);
        }
        let page = Page { document };

        let app = Rc::new(RefCell::new(App { board, page }));
        app.borrow().render();

        setup_score_buttons(app.clone());
        setup_name_fields(app.clone());
        setup_reset_button(app.clone());
        setup_winner_button(app.clone());
        setup_settings_controls(app);

        log::info!("Tally Board ready");
    }

    /// Listen for `event` on every element matching `selector`
    fn on_each(
        document: &Document,
        selector: &str,
        event: &str,
        handler: impl Fn(Element) -> Box<dyn FnMut(web_sys::Event)>,
    ) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let closure = Closure::wrap(handler(el.clone()));
            let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn team_of(el: &Element) -> Option<Team> {
        el.get_attribute("data-team").as_deref().and_then(Team::from_str)
    }

    fn setup_score_buttons(app: Rc<RefCell<App>>) {
        let document = app.borrow().page.document.clone();
        on_each(&document, ".btn", "click", move |btn| {
            let app = app.clone();
            Box::new(move |_event: web_sys::Event| {
                let Some(team) = team_of(&btn) else {
                    log::warn!("Score button without data-team");
                    return;
                };
                let delta = if btn.class_list().contains("plus") { 1 } else { -1 };
                let mut a = app.borrow_mut();
                a.board.adjust_score(team, delta);
                a.render();
            })
        });
    }

    /// Name input for an edit button or input element (`name-one`/`name-two`)
    fn name_input(el: &Element) -> Option<HtmlInputElement> {
        if let Ok(input) = el.clone().dyn_into::<HtmlInputElement>() {
            return Some(input);
        }
        el.previous_element_sibling()?.dyn_into::<HtmlInputElement>().ok()
    }

    fn input_team(input: &HtmlInputElement) -> Option<Team> {
        input.id().strip_prefix("name-").and_then(Team::from_str)
    }

    fn setup_name_fields(app: Rc<RefCell<App>>) {
        let document = app.borrow().page.document.clone();

        // Edit button unlocks the field
        {
            let app = app.clone();
            on_each(&document, ".edit-name", "click", move |button| {
                let app = app.clone();
                Box::new(move |_event: web_sys::Event| {
                    let Some(input) = name_input(&button) else {
                        return;
                    };
                    let _ = input.remove_attribute("readonly");
                    let _ = input.focus();
                    input.select();
                    if let Some(team) = input_team(&input) {
                        app.borrow_mut().board.begin_name_edit(team);
                    }
                })
            });
        }

        // Blur commits and locks
        {
            let app = app.clone();
            on_each(&document, ".team-name", "blur", move |el| {
                let app = app.clone();
                Box::new(move |_event: web_sys::Event| {
                    let Some(input) = name_input(&el) else {
                        return;
                    };
                    let _ = input.set_attribute("readonly", "true");
                    if let Some(team) = input_team(&input) {
                        let mut a = app.borrow_mut();
                        a.board.set_name(team, input.value());
                        a.render();
                    }
                })
            });
        }

        // Enter commits via blur
        on_each(&document, ".team-name", "keydown", move |el| {
            Box::new(move |event: web_sys::Event| {
                let is_enter = event
                    .dyn_ref::<web_sys::KeyboardEvent>()
                    .map(|k| k.key() == "Enter")
                    .unwrap_or(false);
                if is_enter {
                    if let Some(input) = name_input(&el) {
                        let _ = input.blur();
                    }
                }
            })
        });
    }

    fn setup_reset_button(app: Rc<RefCell<App>>) {
        let document = app.borrow().page.document.clone();
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.board.reset();
                a.render();
                log::info!("Scoreboard reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_winner_button(app: Rc<RefCell<App>>) {
        let document = app.borrow().page.document.clone();
        if let Some(btn) = document.get_element_by_id("check-winner") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.board.declare_winner();
                a.render();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_settings_controls(app: Rc<RefCell<App>>) {
        let document = app.borrow().page.document.clone();

        if let Some(toggle) = document
            .get_element_by_id("reduced-motion")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let input = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.board.set_reduced_motion(input.checked());
                a.render();
            });
            let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(picker) = document
            .get_element_by_id("confetti-level")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let select = picker.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(level) = ConfettiLevel::from_str(&select.value()) else {
                    log::warn!("Unknown confetti level: {}", select.value());
                    return;
                };
                let mut a = app.borrow_mut();
                a.board.set_confetti(level);
                a.render();
            });
            let _ = picker.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
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
    use tally_board::effects::NullEffects;
    use tally_board::{MemoryStorage, Scoreboard};

    env_logger::init();
    log::info!("Tally Board (native) starting...");
    log::info!("The widget runs in the browser - use `trunk serve` for the web version");

    let board = Scoreboard::boot(MemoryStorage::new(), NullEffects);
    let view = board.view();
    println!(
        "{} {} - {} {}",
        view.team_one.bar_label, view.team_one.score, view.team_two.score, view.team_two.bar_label
    );
    println!("{}", view.difference);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
