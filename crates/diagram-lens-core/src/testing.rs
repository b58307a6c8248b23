#![forbid(unsafe_code)]

//! In-memory document used by the unit tests.
//!
//! Containers are addressed by index. The fake models just enough of a live
//! document to exercise the engine: visuals come and go, controls can be
//! stripped by a simulated re-render, subtree subscriptions queue change
//! notifications, and overlays hold a copy of the visual they were opened
//! from.

use std::cell::Cell;
use std::rc::Rc;

use crate::geometry::{Rect, ZoomState};
use crate::host::{ControlKind, Document, OverlayHost, Surface};
use crate::store::ContainerId;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakeVisual {
    /// Content identity; a replacement gets a new serial.
    pub serial: u32,
    pub painted: Option<ZoomState>,
    pub size_clamped: bool,
    pub has_size_attrs: bool,
}

#[derive(Debug)]
struct FakeContainer {
    rect: Rect,
    connected: bool,
    foreign: bool,
    visual: Option<FakeVisual>,
    controls: Vec<(ControlKind, ContainerId)>,
    wheel_listeners: Vec<ContainerId>,
    observers: Vec<ContainerId>,
    active_subscriptions: Rc<Cell<usize>>,
    clipped: bool,
    zoomed: bool,
    paint_count: usize,
}

pub(crate) struct FakeSubscription {
    active: Rc<Cell<usize>>,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct FakeOverlay {
    serial: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OverlayRecord {
    pub serial: u32,
    pub source: usize,
    pub clone: FakeVisual,
}

#[derive(Debug, Default)]
pub(crate) struct FakeDocument {
    containers: Vec<FakeContainer>,
    frames: Vec<ContainerId>,
    notifications: Vec<ContainerId>,
    overlays: Vec<OverlayRecord>,
    released: Vec<ContainerId>,
    key_listeners: usize,
    click_listeners: usize,
    next_serial: u32,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&mut self, rect: Rect) -> usize {
        self.containers.push(FakeContainer {
            rect,
            connected: true,
            foreign: false,
            visual: None,
            controls: Vec::new(),
            wheel_listeners: Vec::new(),
            observers: Vec::new(),
            active_subscriptions: Rc::new(Cell::new(0)),
            clipped: false,
            zoomed: false,
            paint_count: 0,
        });
        self.containers.len() - 1
    }

    fn serial(&mut self) -> u32 {
        self.next_serial += 1;
        self.next_serial
    }

    fn notify(&mut self, node: usize) {
        let observers = self.containers[node].observers.clone();
        self.notifications.extend(observers);
    }

    /// Insert a freshly rendered visual, replacing any existing one.
    pub fn insert_visual(&mut self, node: usize) -> u32 {
        let serial = self.serial();
        self.containers[node].visual = Some(FakeVisual {
            serial,
            painted: None,
            size_clamped: true,
            has_size_attrs: true,
        });
        self.notify(node);
        serial
    }

    pub fn remove_visual(&mut self, node: usize) {
        self.containers[node].visual = None;
        self.notify(node);
    }

    /// Simulate a re-render that drops everything it did not author.
    pub fn strip_controls(&mut self, node: usize) {
        self.containers[node].controls.clear();
        self.containers[node].zoomed = false;
        self.notify(node);
    }

    pub fn mark_foreign(&mut self, node: usize) {
        self.containers[node].foreign = true;
    }

    pub fn detach(&mut self, node: usize) {
        self.containers[node].connected = false;
    }

    pub fn drain_notifications(&mut self) -> Vec<ContainerId> {
        std::mem::take(&mut self.notifications)
    }

    pub fn released(&self) -> &[ContainerId] {
        &self.released
    }

    pub fn frame_requests(&self) -> &[ContainerId] {
        &self.frames
    }

    pub fn visual(&self, node: usize) -> Option<&FakeVisual> {
        self.containers[node].visual.as_ref()
    }

    pub fn painted(&self, node: usize) -> Option<ZoomState> {
        self.visual(node).and_then(|v| v.painted)
    }

    pub fn paint_count(&self, node: usize) -> usize {
        self.containers[node].paint_count
    }

    pub fn is_zoomed(&self, node: usize) -> bool {
        self.containers[node].zoomed
    }

    pub fn is_clipped(&self, node: usize) -> bool {
        self.containers[node].clipped
    }

    pub fn control_count(&self, node: usize, kind: ControlKind) -> usize {
        self.containers[node]
            .controls
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn wheel_listener_count(&self, node: usize) -> usize {
        self.containers[node].wheel_listeners.len()
    }

    pub fn active_subscriptions(&self, node: usize) -> usize {
        self.containers[node].active_subscriptions.get()
    }

    pub fn overlays(&self) -> &[OverlayRecord] {
        &self.overlays
    }

    pub fn key_listener_count(&self) -> usize {
        self.key_listeners
    }

    pub fn click_listener_count(&self) -> usize {
        self.click_listeners
    }
}

impl Surface for FakeDocument {
    type Container = usize;

    fn container_rect(&self, container: &usize) -> Option<Rect> {
        self.containers.get(*container).map(|c| c.rect)
    }

    fn paint_visual(&mut self, container: &usize, state: &ZoomState) -> bool {
        let c = &mut self.containers[*container];
        let Some(visual) = c.visual.as_mut() else {
            return false;
        };
        visual.painted = Some(*state);
        visual.size_clamped = false;
        c.paint_count += 1;
        true
    }

    fn set_clipped(&mut self, container: &usize, clipped: bool) {
        self.containers[*container].clipped = clipped;
    }

    fn set_zoomed_marker(&mut self, container: &usize, zoomed: bool) {
        self.containers[*container].zoomed = zoomed;
    }
}

impl Document for FakeDocument {
    type Subscription = FakeSubscription;

    fn find_containers(&self) -> Vec<usize> {
        (0..self.containers.len())
            .filter(|&i| self.containers[i].connected)
            .collect()
    }

    fn is_connected(&self, container: &usize) -> bool {
        self.containers[*container].connected
    }

    fn has_visual(&self, container: &usize) -> bool {
        self.containers[*container].visual.is_some()
    }

    fn has_foreign_control(&self, container: &usize) -> bool {
        self.containers[*container].foreign
    }

    fn has_control(&self, container: &usize, kind: ControlKind) -> bool {
        self.control_count(*container, kind) > 0
    }

    fn install_control(&mut self, container: &usize, kind: ControlKind, id: ContainerId) {
        self.containers[*container].controls.push((kind, id));
        self.notify(*container);
    }

    fn install_wheel_listener(&mut self, container: &usize, id: ContainerId) {
        self.containers[*container].wheel_listeners.push(id);
    }

    fn observe_subtree(&mut self, container: &usize, id: ContainerId) -> FakeSubscription {
        let c = &mut self.containers[*container];
        c.observers.push(id);
        c.active_subscriptions.set(c.active_subscriptions.get() + 1);
        FakeSubscription {
            active: Rc::clone(&c.active_subscriptions),
        }
    }

    fn request_frame(&mut self, id: ContainerId) {
        self.frames.push(id);
    }

    fn release_container(&mut self, id: ContainerId) {
        self.released.push(id);
        for c in &mut self.containers {
            c.wheel_listeners.retain(|bound| *bound != id);
            c.observers.retain(|observer| *observer != id);
        }
    }
}

impl OverlayHost for FakeDocument {
    type Overlay = FakeOverlay;

    fn open_overlay(&mut self, container: &usize) -> Option<FakeOverlay> {
        let source = self.containers[*container].visual.clone()?;
        let serial = self.serial();
        self.overlays.push(OverlayRecord {
            serial,
            source: *container,
            clone: FakeVisual {
                painted: None,
                has_size_attrs: false,
                ..source
            },
        });
        self.key_listeners += 1;
        self.click_listeners += 1;
        Some(FakeOverlay { serial })
    }

    fn close_overlay(&mut self, overlay: FakeOverlay) {
        self.overlays.retain(|o| o.serial != overlay.serial);
        self.key_listeners -= 1;
        self.click_listeners -= 1;
    }
}
