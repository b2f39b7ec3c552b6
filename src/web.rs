//! Browser binding (feature `web`).
//!
//! The page supplies a [`RendererHost`] JavaScript object that owns the
//! actual 3D scene (one sphere mesh per panorama) and decodes images. This
//! module fetches the manifest, builds the scene list in the DOM, wires the
//! two alternate buttons and exposes a [`WebViewer`] the page forwards
//! pointer, key, resize and image-load events to.
//!
//! Expected DOM: `#imageMenu` (list the scene entries are appended to),
//! an element with class `selected` (current scene name),
//! `#removeFurnitureButton` and `#redesignButton`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Response, Window};
use web_time::Instant;

use crate::command::PanoCommand;
use crate::error::PanoError;
use crate::input::InputEvent;
use crate::manifest::{AlternateAvailability, AlternateKind, Manifest};
use crate::options::Options;
use crate::render::{LoadTicket, Renderer, SceneUi};
use crate::viewer::{Viewer, ViewerBuilder};

#[wasm_bindgen]
extern "C" {
    /// Page-side rendering host. Must provide `loadImage(ticket, url)`,
    /// `createMesh(scene, texture)`, `mount(scene)`, `unmount(scene)` and
    /// `replaceMaterial(scene, texture)`; image results go back through
    /// [`WebViewer::image_loaded`] / [`WebViewer::image_failed`].
    ///
    /// `loadImage` must return before its result is reported: a completion
    /// reported from inside the call finds the viewer busy and is lost.
    pub type RendererHost;

    #[wasm_bindgen(method, js_name = loadImage)]
    fn load_image(this: &RendererHost, ticket: u32, url: &str);

    #[wasm_bindgen(method, js_name = createMesh)]
    fn create_mesh(this: &RendererHost, scene: usize, texture: &JsValue);

    #[wasm_bindgen(method)]
    fn mount(this: &RendererHost, scene: usize);

    #[wasm_bindgen(method)]
    fn unmount(this: &RendererHost, scene: usize);

    #[wasm_bindgen(method, js_name = replaceMaterial)]
    fn replace_material(this: &RendererHost, scene: usize, texture: &JsValue);
}

/// [`Renderer`] forwarding to the page's [`RendererHost`].
struct JsRenderer {
    host: RendererHost,
}

impl Renderer for JsRenderer {
    type Texture = JsValue;

    fn load_image(&mut self, ticket: LoadTicket, url: &str) {
        self.host.load_image(ticket.id(), url);
    }

    fn create_mesh(&mut self, scene: usize, texture: &JsValue) {
        self.host.create_mesh(scene, texture);
    }

    fn mount(&mut self, scene: usize) {
        self.host.mount(scene);
    }

    fn unmount(&mut self, scene: usize) {
        self.host.unmount(scene);
    }

    fn replace_material(&mut self, scene: usize, texture: &JsValue) {
        self.host.replace_material(scene, texture);
    }
}

type WebInner = Viewer<JsRenderer, DomSceneUi>;

/// [`SceneUi`] writing into the page's DOM.
struct DomSceneUi {
    document: Document,
    on_select: Rc<dyn Fn(usize)>,
}

impl SceneUi for DomSceneUi {
    fn populate_scene_list(&mut self, names: &[&str]) {
        let Some(menu) = self.document.get_element_by_id("imageMenu") else {
            log::warn!("No #imageMenu element; scene list not shown");
            return;
        };
        for (index, name) in names.iter().enumerate() {
            let Ok(item) = self.document.create_element("li") else {
                continue;
            };
            item.set_text_content(Some(name));
            if let Some(item) = item.dyn_ref::<HtmlElement>() {
                let on_select = Rc::clone(&self.on_select);
                let click =
                    Closure::<dyn FnMut()>::new(move || on_select(index));
                item.set_onclick(Some(click.as_ref().unchecked_ref()));
                click.forget();
            }
            let _ = menu.append_child(&item);
        }
    }

    fn show_scene_name(&mut self, name: &str) {
        if let Ok(Some(label)) = self.document.query_selector(".selected") {
            label.set_text_content(Some(name));
        }
    }

    fn show_alternates(&mut self, availability: AlternateAvailability) {
        for kind in AlternateKind::ALL {
            let id = button_id(kind);
            if let Some(button) = self.document.get_element_by_id(id) {
                let _ = button
                    .toggle_attribute_with_force("disabled", !availability.has(kind));
            }
        }
    }
}

/// DOM id of the button toggling `kind`.
const fn button_id(kind: AlternateKind) -> &'static str {
    match kind {
        AlternateKind::RemoveFurniture => "removeFurnitureButton",
        AlternateKind::Redesign => "redesignButton",
    }
}

/// Run `cmd` on the viewer behind `weak`, if it is still alive and idle.
fn dispatch(weak: &Weak<RefCell<WebInner>>, cmd: PanoCommand) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Ok(mut viewer) = inner.try_borrow_mut() else {
        log::warn!("Viewer busy; dropped {cmd:?}");
        return;
    };
    let _ = viewer.execute(cmd);
}

fn wire_button(
    document: &Document,
    id: &str,
    weak: Weak<RefCell<WebInner>>,
    cmd: PanoCommand,
) {
    let Some(button) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::warn!("No #{id} element; button not wired");
        return;
    };
    let click =
        Closure::<dyn FnMut()>::new(move || dispatch(&weak, cmd.clone()));
    button.set_onclick(Some(click.as_ref().unchecked_ref()));
    click.forget();
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second viewer on the same page finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(e: &PanoError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn viewport(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

async fn fetch_manifest(
    window: &Window,
    url: &str,
) -> Result<Manifest, PanoError> {
    let fetch_err =
        |e: JsValue| PanoError::ManifestFetchFailed(format!("{url}: {e:?}"));

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(fetch_err)?;
    if !response.ok() {
        return Err(PanoError::ManifestFetchFailed(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }
    let text = JsFuture::from(response.text().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?
        .as_string()
        .ok_or_else(|| {
            PanoError::ManifestFetchFailed(format!("{url}: body is not text"))
        })?;
    Manifest::from_json(&text)
}

/// Fetch the manifest, build the scene list and start loading every base
/// image through `host`.
///
/// `options_toml` overrides the default [`Options`]; `manifest_url`
/// overrides the options' manifest location.
#[wasm_bindgen(js_name = startViewer)]
#[allow(clippy::future_not_send)]
pub async fn start_viewer(
    host: RendererHost,
    manifest_url: Option<String>,
    options_toml: Option<String>,
) -> Result<WebViewer, JsValue> {
    init_logging();
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let options = match options_toml {
        Some(toml) => Options::from_toml(&toml).map_err(|e| to_js(&e))?,
        None => Options::default(),
    };
    let url = manifest_url.unwrap_or_else(|| options.manifest.url.clone());
    let manifest = fetch_manifest(&window, &url).await.map_err(|e| {
        log::error!("Error loading JSON: {e}");
        to_js(&e)
    })?;

    let (width, height) = viewport(&window);
    let inner = Rc::new_cyclic(|weak: &Weak<RefCell<WebInner>>| {
        let weak = weak.clone();
        let ui = DomSceneUi {
            document: document.clone(),
            on_select: Rc::new(move |index| {
                dispatch(&weak, PanoCommand::SwitchScene { index });
            }),
        };
        RefCell::new(
            ViewerBuilder::new()
                .with_options(options)
                .with_viewport(width, height)
                .start(manifest, JsRenderer { host }, ui),
        )
    });

    for kind in AlternateKind::ALL {
        wire_button(
            &document,
            button_id(kind),
            Rc::downgrade(&inner),
            PanoCommand::ToggleAlternate { kind },
        );
    }

    Ok(WebViewer {
        inner,
        last_frame: Cell::new(None),
    })
}

/// Handle the page keeps to drive the viewer.
#[wasm_bindgen]
pub struct WebViewer {
    inner: Rc<RefCell<WebInner>>,
    last_frame: Cell<Option<Instant>>,
}

impl WebViewer {
    fn with_viewer<T>(&self, f: impl FnOnce(&mut WebInner) -> T) -> Option<T> {
        match self.inner.try_borrow_mut() {
            Ok(mut viewer) => Some(f(&mut viewer)),
            Err(_) => {
                log::warn!("Viewer busy; event dropped");
                None
            }
        }
    }

    fn run(&self, cmd: PanoCommand) -> bool {
        self.with_viewer(|v| v.execute(cmd).is_ok())
            .unwrap_or(false)
    }

    fn input(&self, event: &InputEvent) {
        let _ = self.with_viewer(|v| v.handle_input(event));
    }

    fn report(&self, ticket: u32, result: Result<JsValue, String>) {
        let Ok(mut viewer) = self.inner.try_borrow_mut() else {
            log::error!(
                "Image completion {ticket} reported while the viewer was busy; \
                 report loads after loadImage returns"
            );
            return;
        };
        let _ = viewer.image_loaded(LoadTicket::from_raw(ticket), result);
    }
}

#[wasm_bindgen]
impl WebViewer {
    /// Report a finished image load for `ticket`.
    #[wasm_bindgen(js_name = imageLoaded)]
    pub fn image_loaded(&self, ticket: u32, texture: JsValue) {
        self.report(ticket, Ok(texture));
    }

    /// Report a failed image load for `ticket`.
    #[wasm_bindgen(js_name = imageFailed)]
    pub fn image_failed(&self, ticket: u32, message: String) {
        self.report(ticket, Err(message));
    }

    /// Show scene `index`. Returns `false` if the switch was rejected.
    #[wasm_bindgen(js_name = switchScene)]
    pub fn switch_scene(&self, index: usize) -> bool {
        self.run(PanoCommand::SwitchScene { index })
    }

    /// Show the scene whose base image is `url`.
    #[wasm_bindgen(js_name = switchSceneByLink)]
    pub fn switch_scene_by_link(&self, url: String) -> bool {
        self.run(PanoCommand::SwitchSceneByImage { url })
    }

    /// Toggle the furniture-removed image on the current scene.
    #[wasm_bindgen(js_name = toggleRemoveFurniture)]
    pub fn toggle_remove_furniture(&self) -> bool {
        self.run(PanoCommand::ToggleAlternate {
            kind: AlternateKind::RemoveFurniture,
        })
    }

    /// Toggle the redesigned image on the current scene.
    #[wasm_bindgen(js_name = toggleRedesign)]
    pub fn toggle_redesign(&self) -> bool {
        self.run(PanoCommand::ToggleAlternate {
            kind: AlternateKind::Redesign,
        })
    }

    /// Index of the scene on screen, once loading has finished.
    #[wasm_bindgen(js_name = currentScene)]
    pub fn current_scene(&self) -> Option<usize> {
        self.with_viewer(|v| v.session().map(|s| s.current_index()))
            .flatten()
    }

    /// Primary pointer pressed at `(x, y)`.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f32, y: f32) {
        self.input(&InputEvent::PointerDown { x, y });
    }

    /// Pointer moved to `(x, y)`.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f32, y: f32) {
        self.input(&InputEvent::PointerMove { x, y });
    }

    /// Primary pointer released.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) {
        self.input(&InputEvent::PointerUp);
    }

    /// Key pressed; `code` is `KeyboardEvent.code`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, code: String) {
        self.input(&InputEvent::Key { code });
    }

    /// Viewport resized.
    pub fn resize(&self, width: u32, height: u32) {
        self.input(&InputEvent::Resize { width, height });
    }

    /// Advance one animation frame. Returns the camera look target as
    /// `[x, y, z]`.
    pub fn frame(&self) -> Vec<f32> {
        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(Some(now))
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.with_viewer(|v| v.frame(dt).to_array().to_vec())
            .unwrap_or_default()
    }

    /// Camera vertical field of view in degrees.
    pub fn fovy(&self) -> f32 {
        self.with_viewer(|v| v.camera().fovy).unwrap_or(75.0)
    }

    /// Sphere vertex positions, flat `[x, y, z, ...]`.
    #[wasm_bindgen(js_name = spherePositions)]
    pub fn sphere_positions(&self) -> Vec<f32> {
        self.with_viewer(|v| v.sphere_mesh().positions_flat().to_vec())
            .unwrap_or_default()
    }

    /// Sphere texture coordinates, flat `[u, v, ...]`.
    #[wasm_bindgen(js_name = sphereUvs)]
    pub fn sphere_uvs(&self) -> Vec<f32> {
        self.with_viewer(|v| v.sphere_mesh().uvs_flat().to_vec())
            .unwrap_or_default()
    }

    /// Sphere triangle indices.
    #[wasm_bindgen(js_name = sphereIndices)]
    pub fn sphere_indices(&self) -> Vec<u32> {
        self.with_viewer(|v| v.sphere_mesh().indices)
            .unwrap_or_default()
    }
}
