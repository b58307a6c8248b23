#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use diagram_lens_core::lens::DiagramLens;
use gloo::events::EventListener;
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::dom::{LensDispatcher, SharedLens, WebHost, install_stylesheet};
use crate::events::parse_options;

/// Zoom and expand controls for every diagram in the current document.
///
/// ```js
/// const lens = new DiagramLens();            // stock behaviour
/// const tuned = new DiagramLens('{"zoom":{"log_step":0.05}}');
/// lens.destroy();
/// ```
#[wasm_bindgen(js_name = DiagramLens)]
pub struct DiagramLensWeb {
    lens: SharedLens,
    dispatcher: LensDispatcher,
    content_updated: Option<EventListener>,
    ready: Option<EventListener>,
}

#[wasm_bindgen(js_class = DiagramLens)]
impl DiagramLensWeb {
    /// Install the stylesheet and listeners, then scan once the document is
    /// ready. `options_json` is an optional JSON configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<DiagramLensWeb, JsValue> {
        let config =
            parse_options(options_json.as_deref()).map_err(|err| JsError::new(&err.to_string()))?;
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("window has no document"))?;

        install_stylesheet(&document, &config.classes)?;

        let dispatcher = LensDispatcher::default();
        let event_name = config.content_updated_event.clone();
        let host = WebHost::new(document.clone(), config.classes.clone(), dispatcher.clone());
        let lens = Rc::new(RefCell::new(DiagramLens::new(host, config)));
        dispatcher.bind(&lens);

        let on_update = dispatcher.clone();
        let content_updated = EventListener::new(&window, event_name, move |_| {
            on_update.dispatch(|lens| lens.content_updated());
        });

        let ready = if document.ready_state() == "loading" {
            let on_ready = dispatcher.clone();
            Some(EventListener::once(&document, "DOMContentLoaded", move |_| {
                on_ready.dispatch(|lens| lens.start());
            }))
        } else {
            dispatcher.dispatch(|lens| lens.start());
            None
        };

        Ok(Self {
            lens,
            dispatcher,
            content_updated: Some(content_updated),
            ready,
        })
    }

    /// Scan for new containers now, as after a content update.
    pub fn rescan(&self) {
        self.dispatcher.dispatch(|lens| lens.content_updated());
    }

    #[wasm_bindgen(js_name = isOverlayOpen)]
    pub fn is_overlay_open(&self) -> bool {
        self.lens.try_borrow().is_ok_and(|lens| lens.is_overlay_open())
    }

    #[wasm_bindgen(js_name = trackedCount)]
    pub fn tracked_count(&self) -> usize {
        self.lens.try_borrow().map_or(0, |lens| lens.tracked_count())
    }

    /// Close the overlay and drop every listener and observer. The installed
    /// buttons and stylesheet stay in the document.
    pub fn destroy(&mut self) {
        self.content_updated = None;
        self.ready = None;
        self.dispatcher.dispatch(|lens| lens.shutdown());
        debug!("DiagramLens destroyed");
    }
}
