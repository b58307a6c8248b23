#![forbid(unsafe_code)]

//! `web-sys` host for the lens engine.
//!
//! Listener callbacks reach the lens through a [`Dispatcher`]. Frames and
//! subtree notifications are deferred rather than dropped when the lens is
//! busy, so a pending frame can never be lost.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use diagram_lens_core::config::ClassNames;
use diagram_lens_core::geometry::{Rect, ZoomState};
use diagram_lens_core::host::{self, ControlKind, OverlayClickTarget, OverlayHost, Surface};
use diagram_lens_core::lens::DiagramLens;
use diagram_lens_core::store::ContainerId;
use diagram_lens_core::zoom::WheelOutcome;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Element, HtmlElement, KeyboardEvent, MutationObserver,
    MutationObserverInit, Node, SvgElement, WheelEvent,
};

use crate::controls::{ControlSpec, class_selector};
use crate::dispatch::Dispatcher;
use crate::events;
use crate::style::{STYLE_ELEMENT_ID, stylesheet};

pub(crate) type SharedLens = Rc<RefCell<DiagramLens<WebHost>>>;
pub(crate) type LensDispatcher = Dispatcher<DiagramLens<WebHost>>;

/// Subtree subscription backed by a `MutationObserver`.
pub(crate) struct SubtreeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for SubtreeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Open overlay: the backdrop element plus its two dismissal listeners.
pub(crate) struct WebOverlay {
    root: Element,
    _keydown: EventListener,
    _click: EventListener,
}

/// DOM-backed implementation of the host traits.
pub(crate) struct WebHost {
    document: web_sys::Document,
    classes: ClassNames,
    dispatcher: LensDispatcher,
    wheel_listeners: HashMap<ContainerId, EventListener>,
    control_listeners: HashMap<(ContainerId, ControlKind), EventListener>,
    frames: HashMap<ContainerId, AnimationFrame>,
}

impl WebHost {
    pub(crate) fn new(document: web_sys::Document, classes: ClassNames, dispatcher: LensDispatcher) -> Self {
        Self {
            document,
            classes,
            dispatcher,
            wheel_listeners: HashMap::new(),
            control_listeners: HashMap::new(),
            frames: HashMap::new(),
        }
    }

    fn visual(&self, container: &Element) -> Option<Element> {
        container
            .query_selector(&self.classes.visual_selector)
            .ok()
            .flatten()
    }

    fn contains_class(container: &Element, class: &str) -> bool {
        container.class_list().contains(class)
            || matches!(container.query_selector(&class_selector(class)), Ok(Some(_)))
    }

    fn build_control(&self, kind: ControlKind, id: ContainerId) -> Result<(Element, EventListener), JsValue> {
        let spec = ControlSpec::for_kind(kind, &self.classes);
        let button = self.document.create_element("button")?;
        button.set_class_name(spec.class);
        button.set_attribute("type", "button")?;
        button.set_attribute("aria-label", spec.label)?;
        button.set_attribute("title", spec.label)?;
        button.set_text_content(Some(spec.glyph));

        let dispatcher = self.dispatcher.clone();
        let listener = EventListener::new(&button, "click", move |event| {
            event.stop_propagation();
            match kind {
                ControlKind::Expand => {
                    dispatcher.dispatch(|lens| lens.expand_clicked(id));
                }
                ControlKind::Reset => {
                    dispatcher.dispatch(|lens| lens.reset_clicked(id));
                }
            }
        });
        Ok((button, listener))
    }

    fn build_overlay(&self, container: &Element) -> Result<Option<WebOverlay>, JsValue> {
        let Some(visual) = self.visual(container) else {
            return Ok(None);
        };
        let Some(body) = self.document.body() else {
            return Ok(None);
        };

        let clone: Element = visual.clone_node_with_deep(true)?.dyn_into()?;
        clone.remove_attribute("width")?;
        clone.remove_attribute("height")?;
        if let Some(style) = inline_style(&clone) {
            for property in ["transform", "transform-origin", "max-width", "max-height"] {
                style.remove_property(property)?;
            }
        }

        let root = self.document.create_element("div")?;
        root.set_class_name(&self.classes.overlay);
        root.set_attribute("role", "dialog")?;
        root.set_attribute("aria-modal", "true")?;
        let content = self.document.create_element("div")?;
        content.set_class_name(&self.classes.overlay_content);
        content.append_child(&clone)?;
        root.append_child(&content)?;
        body.append_child(&root)?;

        let dispatcher = self.dispatcher.clone();
        let keydown = EventListener::new(&self.document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            dispatcher.dispatch(|lens| lens.key_down(&key.key()));
        });

        let dispatcher = self.dispatcher.clone();
        let click = EventListener::new(&root, "click", move |event| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| clone.contains(Some(&node)));
            let target = if inside {
                OverlayClickTarget::Diagram
            } else {
                OverlayClickTarget::Backdrop
            };
            dispatcher.dispatch(|lens| lens.overlay_clicked(target));
        });

        Ok(Some(WebOverlay {
            root,
            _keydown: keydown,
            _click: click,
        }))
    }
}

fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

fn set_style(style: &CssStyleDeclaration, property: &str, value: &str) {
    if let Err(err) = style.set_property(property, value) {
        warn!(property, ?err, "style update rejected");
    }
}

fn remove_style(style: &CssStyleDeclaration, property: &str) {
    if let Err(err) = style.remove_property(property) {
        warn!(property, ?err, "style removal rejected");
    }
}

impl Surface for WebHost {
    type Container = Element;

    fn container_rect(&self, container: &Element) -> Option<Rect> {
        let rect = container.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn paint_visual(&mut self, container: &Element, state: &ZoomState) -> bool {
        let Some(style) = self.visual(container).as_ref().and_then(inline_style) else {
            return false;
        };
        set_style(&style, "transform-origin", "0 0");
        set_style(&style, "transform", &state.css_transform());
        set_style(&style, "max-width", "none");
        set_style(&style, "max-height", "none");
        true
    }

    fn set_clipped(&mut self, container: &Element, clipped: bool) {
        let Some(style) = inline_style(container) else {
            return;
        };
        if clipped {
            set_style(&style, "overflow", "hidden");
        } else {
            remove_style(&style, "overflow");
        }
    }

    fn set_zoomed_marker(&mut self, container: &Element, zoomed: bool) {
        if let Err(err) = container
            .class_list()
            .toggle_with_force(&self.classes.zoomed, zoomed)
        {
            warn!(?err, "zoomed marker rejected");
        }
    }
}

impl host::Document for WebHost {
    type Subscription = Option<SubtreeObserver>;

    fn find_containers(&self) -> Vec<Element> {
        let found = self.document.get_elements_by_class_name(&self.classes.container);
        (0..found.length()).filter_map(|i| found.item(i)).collect()
    }

    fn is_connected(&self, container: &Element) -> bool {
        container.is_connected()
    }

    fn has_visual(&self, container: &Element) -> bool {
        self.visual(container).is_some()
    }

    fn has_foreign_control(&self, container: &Element) -> bool {
        Self::contains_class(container, &self.classes.foreign_zoom_button)
    }

    fn has_control(&self, container: &Element, kind: ControlKind) -> bool {
        let spec = ControlSpec::for_kind(kind, &self.classes);
        matches!(container.query_selector(&spec.selector()), Ok(Some(_)))
    }

    fn install_control(&mut self, container: &Element, kind: ControlKind, id: ContainerId) {
        let installed = self
            .build_control(kind, id)
            .and_then(|(button, listener)| container.append_child(&button).map(|_| listener));
        match installed {
            Ok(listener) => {
                self.control_listeners.insert((id, kind), listener);
            }
            Err(err) => warn!(container = %id, ?kind, ?err, "control install failed"),
        }
    }

    fn install_wheel_listener(&mut self, container: &Element, id: ContainerId) {
        let dispatcher = self.dispatcher.clone();
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };
        let listener = EventListener::new_with_options(container, "wheel", options, move |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let modifiers = events::modifiers(
                wheel.shift_key(),
                wheel.alt_key(),
                wheel.ctrl_key(),
                wheel.meta_key(),
            );
            let input = events::wheel_input(
                wheel.delta_y(),
                wheel.delta_mode(),
                f64::from(wheel.client_x()),
                f64::from(wheel.client_y()),
                modifiers,
            );
            if !input.is_zoom_gesture() {
                return;
            }
            let outcome = dispatcher.dispatch(|lens| lens.wheel(id, &input));
            if outcome.is_some_and(WheelOutcome::prevents_default) {
                event.prevent_default();
            }
        });
        self.wheel_listeners.insert(id, listener);
    }

    fn observe_subtree(&mut self, container: &Element, id: ContainerId) -> Option<SubtreeObserver> {
        let dispatcher = self.dispatcher.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            dispatcher.dispatch_or_defer(move |lens| lens.subtree_changed(id));
        });
        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                warn!(container = %id, ?err, "MutationObserver unavailable");
                return None;
            }
        };
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(err) = observer.observe_with_options(container, &init) {
            warn!(container = %id, ?err, "observe failed");
            return None;
        }
        Some(SubtreeObserver {
            observer,
            _callback: callback,
        })
    }

    fn request_frame(&mut self, id: ContainerId) {
        let dispatcher = self.dispatcher.clone();
        let handle = request_animation_frame(move |_timestamp| {
            dispatcher.dispatch_or_defer(move |lens| {
                lens.frame(id);
            });
        });
        self.frames.insert(id, handle);
    }

    fn release_container(&mut self, id: ContainerId) {
        self.wheel_listeners.remove(&id);
        self.frames.remove(&id);
        self.control_listeners.retain(|(owner, _), _| *owner != id);
    }
}

impl OverlayHost for WebHost {
    type Overlay = WebOverlay;

    fn open_overlay(&mut self, container: &Element) -> Option<WebOverlay> {
        match self.build_overlay(container) {
            Ok(overlay) => overlay,
            Err(err) => {
                warn!(?err, "overlay construction failed");
                None
            }
        }
    }

    fn close_overlay(&mut self, overlay: WebOverlay) {
        overlay.root.remove();
    }
}

/// Append the generated stylesheet to `<head>` unless it is already there.
pub(crate) fn install_stylesheet(
    document: &web_sys::Document,
    classes: &ClassNames,
) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(&stylesheet(classes)));
    let parent: Node = match (document.head(), document.document_element()) {
        (Some(head), _) => head.into(),
        (None, Some(root)) => root.into(),
        (None, None) => return Err(JsValue::from_str("document has no root element")),
    };
    parent.append_child(&style)?;
    debug!("stylesheet installed");
    Ok(())
}
