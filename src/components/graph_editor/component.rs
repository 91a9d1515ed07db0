use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::render;
use super::state::{EditorState, fit_below};
use super::types::toolbar_buttons;
use crate::editor::{GraphOptions, InputEvent, Key, Mode, Point};

type SharedState = Rc<RefCell<Option<EditorState>>>;

#[component]
pub fn GraphEditor(
	options: GraphOptions,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let (mode, set_mode) = signal(Mode::default());
	let (ended, set_ended) = signal(false);

	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let key_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));

	// Every input path funnels through here so the toolbar signals stay in sync.
	let dispatch: Rc<dyn Fn(InputEvent)> = {
		let state = state.clone();
		Rc::new(move |event| {
			if let Some(ref mut s) = *state.borrow_mut() {
				s.dispatch(event);
				set_mode.set(s.session.mode());
				set_ended.set(s.session.is_terminated());
			}
		})
	};

	let (state_init, animate_init, resize_cb_init, key_cb_init, dispatch_key) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		key_cb.clone(),
		dispatch.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_below(&window, &canvas)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(1000.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(650.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("Canvas 2d context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(EditorState::new(options, w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_below(&win, &canvas_resize);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let dispatch_key = dispatch_key.clone();
		*key_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if let Some(key) = Key::from_dom(&ev.key()) {
				dispatch_key(InputEvent::Key(key));
			}
		}));
		if let Some(ref cb) = *key_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.frame(js_sys::Date::now()) {
					render::render(s, &ctx);
				}
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let dispatch_click = dispatch.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some(point) = canvas_point(canvas_ref, &ev) {
			dispatch_click(InputEvent::Click {
				point,
				at_ms: js_sys::Date::now(),
			});
		}
	};

	let dispatch_move = dispatch.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(point) = canvas_point(canvas_ref, &ev) {
			dispatch_move(InputEvent::PointerMove(point));
		}
	};

	let dispatch_leave = dispatch.clone();
	let on_mouseleave = move |_: MouseEvent| dispatch_leave(InputEvent::PointerLeave);

	let buttons = toolbar_buttons()
		.into_iter()
		.map(|button| {
			let dispatch = dispatch.clone();
			let button_mode = button.mode();
			view! {
				<button
					class="toolbar-button"
					class:active=move || button_mode == Some(mode.get())
					on:click=move |_| dispatch(InputEvent::Toolbar(button.action))
				>
					{button.label}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="graph-editor">
			<nav class="graph-toolbar">{buttons}</nav>
			<canvas
				node_ref=canvas_ref
				class="graph-editor-canvas"
				on:click=on_click
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block; cursor: crosshair;"
			/>
			<Show when=move || ended.get()>
				<div class="graph-overlay">
					<h1>"Session ended"</h1>
					<p class="subtitle">"Reload the page to start a new graph."</p>
				</div>
			</Show>
		</div>
	}
}

/// Window width and the height left under the canvas top edge, so the toolbar above it
/// does not push the canvas past the bottom of the viewport.
fn viewport_below(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = window_size(window);
	(w, fit_below(h, canvas.get_bounding_client_rect().top()))
}

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 1000.0),
		dim(window.inner_height(), 650.0),
	)
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
