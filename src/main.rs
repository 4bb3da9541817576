//! Skate Tracker entry point
//!
//! On the web this binds the roster and shuffle engine to the page; natively
//! it prints the roster saved in `./skate-data`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

    use skate_tracker::platform::{KeyValueStore, LocalStorage, MemoryStore, now_ms};
    use skate_tracker::ui::{Labels, roster_rows, shuffle_button, winner_banner};
    use skate_tracker::{Letter, Player, PlayerId, RosterStore, Settings, ShuffleEngine};

    type Backend = Box<dyn KeyValueStore>;

    /// Tracker instance holding all state
    struct App {
        store: RosterStore<Backend>,
        engine: ShuffleEngine,
        labels: &'static Labels,
    }

    fn get_document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn open_storage() -> Backend {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("LocalStorage unavailable ({}), roster will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skate Tracker starting...");

        let mut storage = open_storage();
        let settings = Settings::load_or_init(&mut storage);
        let labels = Labels::for_locale(settings.locale);
        let mut store = RosterStore::open(storage, settings.roster_key.clone());

        let document = get_document();
        apply_labels(&document, labels);
        if let Err(e) = render_roster(&document, labels, store.players()) {
            log::error!("Render failed: {:?}", e);
        }

        // Redraw the list after every persisted change
        {
            let document = document.clone();
            store.subscribe(move |_event, players| {
                if let Err(e) = render_roster(&document, labels, players) {
                    log::error!("Render failed: {:?}", e);
                }
            });
        }

        let seed = now_ms();
        let app = Rc::new(RefCell::new(App {
            store,
            engine: ShuffleEngine::seeded(seed, settings.shuffle_timing()),
            labels,
        }));

        setup_add_form(&document, app.clone());
        setup_shuffle_button(&document, app.clone());
        setup_roster_clicks(&document, app.clone());
        render_controls(&app.borrow());

        log::info!("Skate Tracker running!");
    }

    fn apply_labels(document: &Document, labels: &Labels) {
        if let Some(el) = document.get_element_by_id("title") {
            el.set_text_content(Some(labels.title));
        }
        if let Some(input) = name_input(document) {
            input.set_placeholder(labels.name_placeholder);
        }
        if let Some(el) = document.get_element_by_id("add-btn") {
            el.set_text_content(Some(labels.add));
        }
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }

    /// Rebuild the player cards from scratch
    fn render_roster(document: &Document, labels: &Labels, players: &[Player]) -> Result<(), JsValue> {
        let Some(list) = document.get_element_by_id("roster") else {
            return Ok(());
        };
        list.set_inner_html("");

        for row in roster_rows(players) {
            let card = create(
                document,
                "div",
                if row.eliminated { "player out" } else { "player" },
            )?;

            let header = create(document, "div", "player-header")?;
            let position = create(document, "span", "position")?;
            position.set_text_content(Some(&row.position_label()));
            header.append_child(&position)?;

            let name = create(document, "span", "name")?;
            name.set_text_content(Some(&row.name));
            header.append_child(&name)?;

            if row.eliminated {
                let badge = create(document, "span", "eliminated")?;
                badge.set_text_content(Some(labels.eliminated));
                header.append_child(&badge)?;
            }
            card.append_child(&header)?;

            let letters = create(document, "div", "letters")?;
            for (index, cell) in row.letters.iter().enumerate() {
                let button = create(
                    document,
                    "button",
                    if cell.failed { "letter failed" } else { "letter" },
                )?;
                button.set_attribute("data-action", "toggle")?;
                button.set_attribute("data-player", &row.id.to_string())?;
                button.set_attribute("data-letter", &index.to_string())?;
                button.set_text_content(Some(&cell.text().to_string()));
                letters.append_child(&button)?;
            }

            let delete = create(document, "button", "delete")?;
            delete.set_attribute("data-action", "delete")?;
            delete.set_attribute("data-player", &row.id.to_string())?;
            delete.set_attribute("title", labels.delete)?;
            delete.set_text_content(Some("\u{1f5d1}"));
            letters.append_child(&delete)?;

            card.append_child(&letters)?;
            list.append_child(&card)?;
        }
        Ok(())
    }

    /// Update the shuffle button, list dimming and winner banner
    fn render_controls(app: &App) {
        let document = get_document();
        let state = shuffle_button(app.labels, app.engine.phase(), app.store.len());

        if let Some(btn) = document
            .get_element_by_id("shuffle-btn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(!state.enabled);
            let class = if state.spinning {
                "shuffle spinning"
            } else if state.enabled {
                "shuffle"
            } else {
                "shuffle disabled"
            };
            btn.set_class_name(class);
            btn.set_text_content(Some(state.label));
        }

        if let Some(list) = document.get_element_by_id("roster") {
            let _ = list
                .class_list()
                .toggle_with_force("shuffling", state.spinning);
        }

        if let Some(el) = document.get_element_by_id("status") {
            let banner = winner_banner(app.labels, app.store.standing());
            el.set_text_content(banner.as_deref());
        }
    }

    fn setup_add_form(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(form) = document.get_element_by_id("add-form") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let document = get_document();
                let Some(input) = name_input(&document) else {
                    return;
                };

                let mut a = app.borrow_mut();
                if a.store.add_player(&input.value()).is_some() {
                    input.set_value("");
                }
                render_controls(&a);
            });
            let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_shuffle_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("shuffle-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let started = {
                    let mut a = app.borrow_mut();
                    let a = &mut *a;
                    let started = a.engine.trigger(&a.store, now_ms());
                    render_controls(a);
                    started
                };
                if started {
                    schedule_shuffle_step(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Arm a timer for the engine's next deadline
    fn schedule_shuffle_step(app: Rc<RefCell<App>>) {
        let Some(deadline) = app.borrow().engine.next_deadline() else {
            return;
        };
        let delay = deadline.saturating_sub(now_ms()).min(i32::MAX as u64) as i32;

        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let shuffling = {
                let mut a = app.borrow_mut();
                let a = &mut *a;
                a.engine.poll(&mut a.store, now_ms());
                render_controls(a);
                a.engine.is_shuffling()
            };
            if shuffling {
                schedule_shuffle_step(app);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        );
        closure.forget();
    }

    /// Letter and delete buttons are re-created on every render, so clicks
    /// are handled once on the list container
    fn setup_roster_clicks(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(list) = document.get_element_by_id("roster") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest("[data-action]").ok().flatten())
                else {
                    return;
                };
                let Some(id) = target
                    .get_attribute("data-player")
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(PlayerId)
                else {
                    return;
                };

                let mut a = app.borrow_mut();
                match target.get_attribute("data-action").as_deref() {
                    Some("toggle") => {
                        let index = target
                            .get_attribute("data-letter")
                            .and_then(|v| v.parse::<usize>().ok())
                            .unwrap_or(usize::MAX);
                        match Letter::try_from(index) {
                            Ok(letter) => {
                                a.store.toggle_letter(id, letter);
                            }
                            Err(e) => log::warn!("Ignoring click: {}", e),
                        }
                    }
                    Some("delete") => {
                        a.store.delete_player(id);
                    }
                    _ => {}
                }
                render_controls(&a);
            });
            let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skate_tracker::platform::FileStore;
    use skate_tracker::ui::{Labels, render_text, winner_banner};
    use skate_tracker::{RosterStore, Settings};

    env_logger::init();
    log::info!("Skate Tracker (native) starting...");
    log::info!("Run with `trunk serve` for the web version");

    let mut storage = FileStore::new("skate-data");
    let settings = Settings::load_or_init(&mut storage);
    let labels = Labels::for_locale(settings.locale);
    let store = RosterStore::open(storage, settings.roster_key.clone());

    println!("{}", labels.title);
    if store.is_empty() {
        log::info!("No players in {}", store.storage().dir().display());
        return;
    }
    print!("{}", render_text(store.players(), labels));
    if let Some(banner) = winner_banner(labels, store.standing()) {
        println!("{}", banner);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
