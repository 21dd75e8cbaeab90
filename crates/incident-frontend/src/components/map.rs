//! # Map Component
//!
//! Mexico City map with the draggable position picker and the incident
//! markers, using Leaflet.js.

use std::cell::RefCell;
use std::rc::Rc;

use incident_domain::{LatLon, Report};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::state::{use_app_state, AlertSeverity, AppState, PickerUpdate};

const MAP_ID: &str = "map";
const DEFAULT_ZOOM: f64 = 12.0;
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const PICKER_ICON_URL: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-red.png";
const PICKER_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/images/marker-shadow.png";

/// Leaflet map wrapper
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L)]
    #[derive(Clone)]
    type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn create_map(id: &str) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, lat_lng: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &Map);

    #[wasm_bindgen(method, js_name = on)]
    fn map_on(this: &Map, event: &str, handler: &JsValue);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen]
    type TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &Map);

    #[wasm_bindgen(js_namespace = L)]
    type Icon;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn create_icon(options: &JsValue) -> Icon;

    #[wasm_bindgen(js_namespace = L)]
    #[derive(Clone)]
    type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn create_marker(lat_lng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn marker_add_to(this: &Marker, map: &Map);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker);

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Marker, lat_lng: &JsValue);

    #[wasm_bindgen(method, js_name = getLatLng)]
    fn get_lat_lng(this: &Marker) -> LatLng;

    #[wasm_bindgen(method, js_name = on)]
    fn marker_on(this: &Marker, event: &str, handler: &JsValue);

    #[wasm_bindgen(js_namespace = L)]
    type CircleMarker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = circleMarker)]
    fn create_circle_marker(lat_lng: &JsValue, options: &JsValue) -> Result<CircleMarker, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn circle_bind_popup(this: &CircleMarker, content: &str) -> CircleMarker;

    #[wasm_bindgen(js_namespace = L)]
    type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn create_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn group_add_to(this: &LayerGroup, map: &Map);

    #[wasm_bindgen(catch, method, js_name = addLayer)]
    fn add_layer(this: &LayerGroup, layer: &CircleMarker) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup);

    type LatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;

    type LeafletMouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LeafletMouseEvent) -> LatLng;
}

fn lat_lng(position: LatLon) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(position.lat));
    array.push(&JsValue::from_f64(position.lon));
    array.into()
}

fn options(entries: &[(&str, JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        // setting a property on a plain object cannot fail
        let _ = js_sys::Reflect::set(&object, &JsValue::from_str(key), value);
    }
    object.into()
}

fn pair(a: f64, b: f64) -> JsValue {
    lat_lng(LatLon::new(a, b))
}

impl From<LatLng> for LatLon {
    fn from(value: LatLng) -> Self {
        Self::new(value.lat(), value.lng())
    }
}

/// Owner of the Leaflet map, the picker and the incident layer
struct MapView {
    map: Map,
    picker: Marker,
    incidents: LayerGroup,
}

impl MapView {
    /// Create the map, the picker and the event wiring.
    ///
    /// Drag end and map clicks only emit a coordinate-changed notification
    /// through the app state; moving the marker and opening the popup
    /// happens in [`MapView::apply_picker`].
    fn initialize(center: LatLon, state: AppState) -> Self {
        let map = create_map(MAP_ID);
        map.set_view(&lat_lng(center), DEFAULT_ZOOM);

        let tiles = tile_layer(
            TILE_URL,
            &options(&[
                ("attribution", "OpenStreetMap contributors".into()),
                ("maxZoom", 19.into()),
            ]),
        );
        tiles.add_to(&map);

        // the container may not have its final size on first layout
        let sizing = map.clone();
        gloo_timers::callback::Timeout::new(100, move || sizing.invalidate_size()).forget();

        let icon = create_icon(&options(&[
            ("iconUrl", PICKER_ICON_URL.into()),
            ("shadowUrl", PICKER_SHADOW_URL.into()),
            ("iconSize", pair(25.0, 41.0)),
            ("iconAnchor", pair(12.0, 41.0)),
            ("popupAnchor", pair(1.0, -34.0)),
            ("shadowSize", pair(41.0, 41.0)),
        ]));
        let picker = create_marker(
            &lat_lng(center),
            &options(&[("draggable", true.into()), ("icon", icon.into())]),
        );
        picker.marker_add_to(&map);

        let dragged = picker.clone();
        let on_dragend = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
            let position = LatLon::from(dragged.get_lat_lng());
            state.move_picker(PickerUpdate::picked(position));
        });
        picker.marker_on("dragend", on_dragend.as_ref());
        on_dragend.forget();

        let on_click = Closure::<dyn FnMut(LeafletMouseEvent)>::new(move |e: LeafletMouseEvent| {
            state.move_picker(PickerUpdate::picked(LatLon::from(e.latlng())));
        });
        map.map_on("click", on_click.as_ref());
        on_click.forget();

        let incidents = create_layer_group();
        incidents.group_add_to(&map);

        Self {
            map,
            picker,
            incidents,
        }
    }

    /// Sync the picker marker with the latest coordinate
    fn apply_picker(&self, update: &PickerUpdate) {
        let position = lat_lng(update.position);
        self.picker.set_lat_lng(&position);
        if let Some(zoom) = update.zoom {
            self.map.set_view(&position, zoom);
        }
        if let Some(popup) = &update.popup {
            self.picker.bind_popup(&popup.html(update.position));
            self.picker.open_popup();
        }
    }

    /// Replace every incident marker; a bad report is skipped, not fatal
    fn render_incidents(&self, reports: &[Report]) -> usize {
        self.incidents.clear_layers();

        let style = options(&[
            ("radius", 8.into()),
            ("fillColor", "#ff6b6b".into()),
            ("color", "#333".into()),
            ("weight", 2.into()),
            ("opacity", 1.into()),
            ("fillOpacity", 0.7.into()),
        ]);

        let mut rendered = 0;
        for report in reports {
            if !report.position().is_finite() {
                log::warn!("Skipping report {} with invalid coordinates", report.id);
                continue;
            }
            let added = create_circle_marker(&lat_lng(report.position()), &style).and_then(|marker| {
                marker.circle_bind_popup(&report.popup_html());
                self.incidents.add_layer(&marker)
            });
            match added {
                Ok(()) => rendered += 1,
                Err(e) => log::warn!("Marker for report {} failed: {:?}", report.id, e),
            }
        }
        rendered
    }
}

/// Map panel
#[component]
pub fn MapPanel() -> impl IntoView {
    let state = use_app_state();
    let view: Rc<RefCell<Option<MapView>>> = Rc::default();
    let ready = RwSignal::new(false);

    // Initialize map on mount
    {
        let view = Rc::clone(&view);
        Effect::new(move |_| {
            if view.borrow().is_some() {
                return;
            }
            let window = web_sys::window().expect("no window");
            if window.get("L").is_none() {
                log::error!("Leaflet not loaded, map will not render");
                state.notify(AlertSeverity::Critical, "No se pudo cargar el mapa");
                return;
            }

            let center = state.picker.get_untracked().position;
            *view.borrow_mut() = Some(MapView::initialize(center, state));
            ready.set(true);
            log::info!("Map initialized at {center}");
        });
    }

    // Picker follows every coordinate change
    {
        let view = Rc::clone(&view);
        Effect::new(move |_| {
            let update = state.picker.get();
            if !ready.get() {
                return;
            }
            if let Some(map) = view.borrow().as_ref() {
                map.apply_picker(&update);
            }
        });
    }

    // Incident markers are rebuilt on every report reload
    {
        let view = Rc::clone(&view);
        Effect::new(move |_| {
            let reports = state.reports.get();
            if !ready.get() {
                return;
            }
            if let Some(map) = view.borrow().as_ref() {
                let rendered = map.render_incidents(&reports);
                log::debug!("Rendered {rendered}/{} incident markers", reports.len());
            }
        });
    }

    let picker = move || state.picker.get().position;

    view! {
        <div class="map-container">
            <div id=MAP_ID style="width: 100%; height: 100%; min-height: 400px;"></div>

            <div class="map-overlay">
                <div class="map-control">
                    <span class="status-dot nominal"></span>
                    "CDMX"
                </div>
                <div class="map-control">
                    <span class="text-accent">"PIN: "</span>
                    {move || format!("{:.4}°N {:.4}°W", picker().lat, picker().lon.abs())}
                </div>
            </div>
        </div>
    }
}
