//! Browser host
//!
//! Mounts each game found on the page and runs its frame loop. The start
//! function lives in the library so the `pixel_pioneers.js` bundle the pages
//! import starts the games on `init()`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Headers, HtmlCanvasElement, KeyboardEvent, Request, RequestInit, Response,
};

use crate::consts::*;
use crate::platform::mount::{TUNING_ATTR, VARIANT_ATTR};
use crate::platform::{DomIds, HudUpdate, MountConfig, hud};
use crate::renderer::canvas::CanvasSurface;
use crate::sim::{GameKind, Session};

/// One mounted game
struct Game {
    session: Session,
    surface: CanvasSurface,
    document: Document,
    ids: DomIds,
    last_time: f64,
}

impl Game {
    fn frame(&mut self, dt: f32) {
        self.session.advance(dt);
        self.session.render(&mut self.surface);
        self.update_hud();
    }

    fn update_hud(&mut self) {
        let events = self.session.drain_events();
        if !events.is_empty() {
            write_hud(&self.document, &hud::updates_for(&self.ids, &events));
        }
    }
}

fn write_hud(document: &Document, updates: &[HudUpdate]) {
    for update in updates {
        if let Some(el) = document.get_element_by_id(&update.element_id) {
            el.set_text_content(Some(&update.text));
        }
    }
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

#[wasm_bindgen(start)]
pub fn start() {
    run();
}

pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }

    log::info!("Pixel Pioneers starting...");

    let document = match window()
        .and_then(|w| w.document().ok_or_else(|| JsValue::from_str("no document")))
    {
        Ok(document) => document,
        Err(e) => {
            log::error!("No document to mount into: {:?}", e);
            return;
        }
    };

    let mut mounted = 0;
    for kind in GameKind::ALL {
        match mount_game(&document, kind) {
            Ok(true) => mounted += 1,
            Ok(false) => {}
            Err(e) => log::error!("Failed to mount {:?}: {:?}", kind, e),
        }
    }

    if let Err(e) = setup_dropdown(&document) {
        log::error!("Failed to wire dropdown: {:?}", e);
    }

    log::info!("Pixel Pioneers running {} game(s)", mounted);
}

/// The game's canvas, creating one inside its container if needed
fn find_canvas(document: &Document, ids: &DomIds) -> Result<Option<HtmlCanvasElement>, JsValue> {
    if let Some(el) = document.get_element_by_id(&ids.canvas) {
        let canvas: HtmlCanvasElement = el.dyn_into()?;
        if !canvas.has_attribute("width") {
            canvas.set_width(CANVAS_WIDTH as u32);
            canvas.set_height(CANVAS_HEIGHT as u32);
        }
        return Ok(Some(canvas));
    }

    let Some(container) = document.get_element_by_id(&ids.container) else {
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(&ids.canvas);
    canvas.set_width(CANVAS_WIDTH as u32);
    canvas.set_height(CANVAS_HEIGHT as u32);
    for attr in [VARIANT_ATTR, TUNING_ATTR] {
        if let Some(value) = container.get_attribute(attr) {
            canvas.set_attribute(attr, &value)?;
        }
    }
    container.append_child(&canvas)?;
    Ok(Some(canvas))
}

fn mount_game(document: &Document, kind: GameKind) -> Result<bool, JsValue> {
    let ids = DomIds::for_kind(kind);
    let Some(canvas) = find_canvas(document, &ids)? else {
        return Ok(false);
    };

    let config = MountConfig::from_attributes(
        kind,
        canvas.get_attribute(VARIANT_ATTR).as_deref(),
        canvas.get_attribute(TUNING_ATTR).as_deref(),
    );
    let seed = js_sys::Date::now() as u64;
    let session = config.session(seed);
    write_hud(document, &hud::initial(&ids, session.game().score(), session.game().lives()));

    let game = Rc::new(RefCell::new(Game {
        session,
        surface: CanvasSurface::new(&canvas)?,
        document: document.clone(),
        ids,
        last_time: 0.0,
    }));

    setup_key_handlers(game.clone())?;
    request_animation_frame(game);

    log::info!("Mounted {:?} ({:?}) with seed {}", kind, config.variant, seed);
    Ok(true)
}

fn setup_key_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = window()?;

    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // Bound keys would otherwise scroll the page
            if game.borrow_mut().session.key_down(&event.key()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            game.borrow_mut().session.key_up(&event.key());
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyups are lost while unfocused
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().session.release_all();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
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

        let dt = if g.last_time > 0.0 {
            ((time - g.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        g.last_time = time;

        g.frame(dt);
    }

    request_animation_frame(game);
}

#[derive(Deserialize)]
struct DropdownReply {
    message: String,
}

fn setup_dropdown(document: &Document) -> Result<(), JsValue> {
    let links = document.query_selector_all(".dropdown-content a[data-option]")?;
    for i in 0..links.length() {
        let Some(node) = links.item(i) else {
            continue;
        };
        let link: Element = node.dyn_into()?;
        let target = link.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Some(option) = target.get_attribute("data-option") else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                match post_dropdown(&option).await {
                    Ok(message) => show_response(&message),
                    Err(e) => log::warn!("Dropdown request failed: {:?}", e),
                }
            });
        });
        link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

async fn post_dropdown(option: &str) -> Result<String, JsValue> {
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/x-www-form-urlencoded")?;

    let body = format!("option={}", String::from(js_sys::encode_uri_component(option)));
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init("/dropdown", &init)?;
    let response: Response = JsFuture::from(window()?.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("status {}", response.status())));
    }

    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("reply is not text"))?;
    let reply: DropdownReply =
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(reply.message)
}

fn show_response(message: &str) {
    let el = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("response-message"));
    if let Some(el) = el {
        el.set_text_content(Some(message));
    }
}
