//! Thin browser adapter. Everything here resolves elements, arms timers or
//! touches styles; the decisions come from the target-independent modules.

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::{Array, Function, Object, Reflect};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, ErrorEvent, Event, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, PromiseRejectionEvent, ScrollBehavior,
    ScrollToOptions, Storage,
};

use crate::{
    config::Config,
    effects::{FOCUSABLE_SELECTOR, FOCUS_OUTLINE, FOCUS_OUTLINE_OFFSET, WILL_CHANGE_RELEASE_MS},
    logging::{log_event, LogLevel},
    notify::{
        toast_style, Severity, OFFSCREEN_TRANSFORM, ONSCREEN_TRANSFORM, REMOVE_AFTER_SLIDE_OUT_MS,
        SLIDE_IN_AT_MS, SLIDE_OUT_AT_MS,
    },
    once::{OneShot, ViewportTrigger},
    rate_limit::{Debounce, Throttle},
    scroll::{
        anchor_scroll_target, in_viewport, intersects_viewport, visible_ratio, SectionSpan, SmoothScroll,
        ViewRect, REVEAL_MARGIN_PX,
    },
    theme::{Theme, DARK_MODE_CLASS, DARK_MODE_KEY},
};

const GLOBAL_SURFACE_NAME: &str = "PortfolioApp";
const SCROLL_LIBRARY_NAME: &str = "AOS";
const SCROLL_LIBRARY_EASING: &str = "ease-out-cubic";
const OBSERVER_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn random_unit() -> f64 {
    js_sys::Math::random()
}

pub fn scroll_y() -> f64 {
    window().and_then(|win| win.scroll_y().ok()).unwrap_or(0.0)
}

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn view_rect(element: &Element) -> ViewRect {
    let rect = element.get_bounding_client_rect();
    ViewRect {
        top: rect.top(),
        left: rect.left(),
        bottom: rect.bottom(),
        right: rect.right(),
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

pub fn window_listener<F>(event: &'static str, mut handler: F) -> Option<EventListener>
where
    F: FnMut() + 'static,
{
    let win = window()?;
    Some(EventListener::new(&win, event, move |_| handler()))
}

/// Window listener that lets at most one event per `window_ms` through.
pub fn throttled_window_listener<F>(event: &'static str, window_ms: u32, mut handler: F) -> Option<EventListener>
where
    F: FnMut() + 'static,
{
    let mut throttle = Throttle::new(window_ms);
    window_listener(event, move || {
        if throttle.admit(now_ms()) {
            handler();
        }
    })
}

/// Wraps `handler` so it runs after `wait_ms` of quiet, or on the leading
/// edge when `immediate` is set.
pub fn debounced<F>(wait_ms: u32, immediate: bool, handler: F) -> impl FnMut()
where
    F: FnMut() + 'static,
{
    let handler = Rc::new(RefCell::new(handler));
    let state = Rc::new(RefCell::new(Debounce::new(wait_ms, immediate)));
    let timer: Rc<RefCell<Option<Timeout>>> = Rc::default();

    move || {
        let call = state.borrow_mut().call();
        if call.invoke_now {
            (handler.borrow_mut())();
        }

        let pending_state = Rc::clone(&state);
        let pending_handler = Rc::clone(&handler);
        let timeout = Timeout::new(call.wait_ms, move || {
            if pending_state.borrow_mut().elapse(call.generation) {
                (pending_handler.borrow_mut())();
            }
        });
        timer.borrow_mut().replace(timeout);
    }
}

/// Self-rescheduling timer. `step` returns the delay before its next run,
/// or `None` to stop. Dropping the chain cancels the pending run.
pub struct TimerChain {
    slot: Rc<RefCell<Option<Timeout>>>,
}

impl TimerChain {
    pub fn start<F>(initial_delay_ms: u32, step: F) -> Self
    where
        F: FnMut() -> Option<u32> + 'static,
    {
        let slot: Rc<RefCell<Option<Timeout>>> = Rc::default();
        schedule_link(Rc::clone(&slot), initial_delay_ms, step);
        Self { slot }
    }
}

impl Drop for TimerChain {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}

fn schedule_link<F>(slot: Rc<RefCell<Option<Timeout>>>, delay_ms: u32, mut step: F)
where
    F: FnMut() -> Option<u32> + 'static,
{
    let next_slot = Rc::clone(&slot);
    let timeout = Timeout::new(delay_ms, move || {
        next_slot.borrow_mut().take();
        if let Some(delay_ms) = step() {
            schedule_link(next_slot, delay_ms, step);
        }
    });
    *slot.borrow_mut() = Some(timeout);
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Eased scroll to `target_y`, one sample per animation frame.
pub fn smooth_scroll_to(target_y: f64, duration_ms: u32) {
    let Some(win) = window() else {
        return;
    };

    if prefers_reduced_motion() {
        win.scroll_to_with_x_and_y(0.0, target_y);
        return;
    }

    let from = win.scroll_y().unwrap_or(0.0);
    let animation = Rc::new(RefCell::new(SmoothScroll::new(from, target_y, duration_ms)));
    schedule_scroll_frame(animation, Rc::default());
}

fn schedule_scroll_frame(animation: Rc<RefCell<SmoothScroll>>, slot: Rc<RefCell<Option<AnimationFrame>>>) {
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        next_slot.borrow_mut().take();
        let frame = animation.borrow_mut().frame(timestamp);
        if let Some(win) = window() {
            win.scroll_to_with_x_and_y(0.0, frame.y);
        }
        if !frame.finished {
            schedule_scroll_frame(animation, next_slot);
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Smooth-scrolls to the section with `id`, leaving room for the fixed
/// header. Returns `false` when no such element exists.
pub fn scroll_to_section(id: &str, config: &Config) -> bool {
    let Some(element) = document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };

    let target = anchor_scroll_target(f64::from(element.offset_top()), config.nav_offset);
    smooth_scroll_to(target, config.smooth_scroll_duration);
    true
}

pub fn scroll_to_top() {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

pub fn section_spans() -> Vec<SectionSpan> {
    let Some(nodes) = document().and_then(|doc| doc.query_selector_all("section[id]").ok()) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|element| SectionSpan {
            id: element.id(),
            top: f64::from(element.offset_top()),
            height: f64::from(element.offset_height()),
        })
        .collect()
}

struct PendingReveal<F> {
    trigger: ViewportTrigger,
    callback: Option<F>,
}

impl<F> PendingReveal<F> {
    fn sample(&mut self, intersecting: bool, ratio: f64) -> Option<F> {
        if self.trigger.observe(intersecting, ratio) {
            self.callback.take()
        } else {
            None
        }
    }
}

/// Live visibility subscription; dropping it stops observation.
pub struct VisibilityWatch {
    observer: Option<IntersectionObserver>,
    _callback: Option<Closure<dyn FnMut(Array)>>,
    _poll: Option<EventListener>,
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.as_ref() {
            observer.disconnect();
        }
    }
}

fn has_intersection_observer() -> bool {
    window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).ok())
        .unwrap_or(false)
}

/// Runs `on_first_crossing` once, the first time `target` reaches
/// `threshold` visibility. Falls back to polling geometry on scroll where
/// `IntersectionObserver` is unavailable.
pub fn watch_visibility<F>(target: &Element, threshold: f64, on_first_crossing: F) -> Option<VisibilityWatch>
where
    F: FnOnce() + 'static,
{
    let pending = Rc::new(RefCell::new(PendingReveal {
        trigger: ViewportTrigger::new(threshold),
        callback: Some(on_first_crossing),
    }));

    let sample = {
        let target = target.clone();
        move || {
            let (_, viewport_height) = viewport_size();
            let rect = view_rect(&target);
            let ready = pending
                .borrow_mut()
                .sample(intersects_viewport(rect, viewport_height), visible_ratio(rect, viewport_height));
            if let Some(callback) = ready {
                callback();
            }
        }
    };

    if !has_intersection_observer() {
        let mut sample = sample;
        sample();
        let poll = throttled_window_listener("scroll", Config::default().scroll_throttle, sample);
        return Some(VisibilityWatch {
            observer: None,
            _callback: None,
            _poll: poll,
        });
    }

    let mut sample = sample;
    let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        let any_intersecting = entries.iter().any(|entry| {
            entry
                .dyn_into::<IntersectionObserverEntry>()
                .map(|entry| entry.is_intersecting())
                .unwrap_or(false)
        });
        if any_intersecting {
            sample();
        }
    });

    let thresholds: Array = OBSERVER_THRESHOLDS
        .iter()
        .chain(std::iter::once(&threshold))
        .map(|value| JsValue::from_f64(*value))
        .collect();
    let options = IntersectionObserverInit::new();
    options.set_threshold(&thresholds);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    observer.observe(target);

    Some(VisibilityWatch {
        observer: Some(observer),
        _callback: Some(callback),
        _poll: None,
    })
}

/// Fallback reveal: runs `on_visible` once `target` sits inside the
/// viewport (with vertical slack), checking now and on throttled scroll.
pub fn reveal_when_in_view<F>(target: Element, throttle_ms: u32, on_visible: F) -> Option<EventListener>
where
    F: FnOnce() + 'static,
{
    let mut guard = OneShot::new();
    let mut on_visible = Some(on_visible);
    let mut check = move || {
        let (width, height) = viewport_size();
        if in_viewport(view_rect(&target), width, height, REVEAL_MARGIN_PX) && guard.fire() {
            if let Some(callback) = on_visible.take() {
                callback();
            }
        }
    };

    check();
    throttled_window_listener("scroll", throttle_ms, check)
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

pub fn read_stored_theme() -> Theme {
    let stored = local_storage().and_then(|storage| storage.get_item(DARK_MODE_KEY).ok().flatten());
    Theme::from_stored(stored.as_deref())
}

pub fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(DARK_MODE_KEY, theme.stored_value());
    }
}

pub fn apply_theme(theme: Theme) {
    if let Some(body) = document().and_then(|doc| doc.body()) {
        let _ = body.class_list().toggle_with_force(DARK_MODE_CLASS, theme.is_dark());
    }
}

pub fn restore_body_scroll() {
    if let Some(body) = document().and_then(|doc| doc.body()) {
        set_style(&body, "overflow", "visible");
    }
}

pub fn navigate(href: &str) {
    if let Some(win) = window() {
        let _ = win.location().set_href(href);
    }
}

/// Transient toast: slides in, holds, slides out, then leaves the DOM.
/// Calls never queue; concurrent toasts overlap.
pub fn show_notification(message: &str, severity: Severity) {
    let Some(document) = document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Some(toast) = document
        .create_element("div")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    toast.set_class_name(&severity.class_name());
    toast.set_text_content(Some(message));
    let _ = toast.set_attribute("role", "status");
    let _ = toast.set_attribute("style", &toast_style(severity));

    if body.append_child(&toast).is_err() {
        return;
    }

    let entering = toast.clone();
    Timeout::new(SLIDE_IN_AT_MS, move || set_style(&entering, "transform", ONSCREEN_TRANSFORM)).forget();
    Timeout::new(SLIDE_OUT_AT_MS, move || {
        set_style(&toast, "transform", OFFSCREEN_TRANSFORM);
        Timeout::new(REMOVE_AFTER_SLIDE_OUT_MS, move || toast.remove()).forget();
    })
    .forget();
}

/// Publishes `window.PortfolioApp` for other scripts on the page.
pub fn install_global_surface(config: &Config) {
    let Some(win) = window() else {
        return;
    };

    let surface = Object::new();

    let section_config = config.clone();
    let scroll_to = Closure::<dyn Fn(String)>::new(move |id: String| {
        scroll_to_section(&id, &section_config);
    });
    let notify = Closure::<dyn Fn(String, Option<String>)>::new(|message: String, kind: Option<String>| {
        let severity = kind.as_deref().map(Severity::parse).unwrap_or_default();
        show_notification(&message, severity);
    });
    let exposed_config = js_sys::JSON::parse(&config.to_json()).unwrap_or_else(|_| Object::new().into());

    let _ = Reflect::set(&surface, &JsValue::from_str("scrollToSection"), &scroll_to.into_js_value());
    let _ = Reflect::set(&surface, &JsValue::from_str("showNotification"), &notify.into_js_value());
    let _ = Reflect::set(&surface, &JsValue::from_str("CONFIG"), &exposed_config);
    let _ = Reflect::set(&win, &JsValue::from_str(GLOBAL_SURFACE_NAME), &surface);
}

/// Initializes a page-global scroll-animation library when one is loaded.
pub fn init_scroll_library(config: &Config) -> bool {
    let Some(win) = window() else {
        return false;
    };
    let Ok(library) = Reflect::get(&win, &JsValue::from_str(SCROLL_LIBRARY_NAME)) else {
        return false;
    };
    if library.is_undefined() || library.is_null() {
        return false;
    }
    let Ok(init) = Reflect::get(&library, &JsValue::from_str("init")) else {
        return false;
    };
    let Some(init) = init.dyn_ref::<Function>() else {
        return false;
    };

    let options = Object::new();
    let _ = Reflect::set(&options, &JsValue::from_str("duration"), &JsValue::from(config.animation_duration));
    let _ = Reflect::set(&options, &JsValue::from_str("once"), &JsValue::TRUE);
    let _ = Reflect::set(&options, &JsValue::from_str("offset"), &JsValue::from_f64(REVEAL_MARGIN_PX));
    let _ = Reflect::set(&options, &JsValue::from_str("easing"), &JsValue::from_str(SCROLL_LIBRARY_EASING));

    let initialized = init.call1(&library, &options).is_ok();
    log_event(
        config,
        LogLevel::Info,
        "scroll_library_detected",
        serde_json::json!({
            "library": SCROLL_LIBRARY_NAME,
            "initialized": initialized,
        }),
    );
    initialized
}

fn describe_js_value(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|error| String::from(error.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Uncaught errors and rejected promises are logged and otherwise ignored.
pub fn install_error_capture(config: &Config) {
    let Some(win) = window() else {
        return;
    };

    let error_config = config.clone();
    EventListener::new(&win, "error", move |event: &Event| {
        let Some(event) = event.dyn_ref::<ErrorEvent>() else {
            return;
        };
        log_event(
            &error_config,
            LogLevel::Error,
            "runtime_error",
            serde_json::json!({
                "message": event.message(),
                "source": event.filename(),
                "line": event.lineno(),
            }),
        );
    })
    .forget();

    let rejection_config = config.clone();
    EventListener::new(&win, "unhandledrejection", move |event: &Event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|event| describe_js_value(&event.reason()))
            .unwrap_or_default();
        log_event(
            &rejection_config,
            LogLevel::Error,
            "unhandled_rejection",
            serde_json::json!({ "reason": reason }),
        );
    })
    .forget();
}

fn focusable_target(event: &Event) -> Option<HtmlElement> {
    let element = event.target()?.dyn_into::<HtmlElement>().ok()?;
    element
        .matches(FOCUSABLE_SELECTOR)
        .unwrap_or(false)
        .then_some(element)
}

/// Visible outline on whichever focusable control holds focus.
pub fn install_focus_outline() {
    let Some(doc) = document() else {
        return;
    };

    EventListener::new(&doc, "focusin", |event: &Event| {
        if let Some(element) = focusable_target(event) {
            set_style(&element, "outline", FOCUS_OUTLINE);
            set_style(&element, "outline-offset", FOCUS_OUTLINE_OFFSET);
        }
    })
    .forget();

    EventListener::new(&doc, "focusout", |event: &Event| {
        if let Some(element) = focusable_target(event) {
            clear_style(&element, "outline");
            clear_style(&element, "outline-offset");
        }
    })
    .forget();
}

fn release_will_change() {
    let Some(nodes) = document().and_then(|doc| doc.query_selector_all("[style*=\"will-change\"]").ok()) else {
        return;
    };

    for index in 0..nodes.length() {
        if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<HtmlElement>().ok()) {
            set_style(&element, "will-change", "auto");
        }
    }
}

/// Resets `will-change` hints a few seconds after the page has loaded.
pub fn release_will_change_after_load() {
    let Some(win) = window() else {
        return;
    };

    let loaded = document()
        .map(|doc| doc.ready_state() == "complete")
        .unwrap_or(false);

    if loaded {
        Timeout::new(WILL_CHANGE_RELEASE_MS, release_will_change).forget();
        return;
    }

    EventListener::once(&win, "load", |_| {
        Timeout::new(WILL_CHANGE_RELEASE_MS, release_will_change).forget();
    })
    .forget();
}
