//! # Geolocation
//!
//! One-shot wrapper over `navigator.geolocation.getCurrentPosition`.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use incident_domain::LatLon;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Position as GeolocationPosition, PositionError as GeolocationPositionError};

pub const MSG_UNSUPPORTED: &str = "Tu navegador no soporta geolocalización";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// Host has no `navigator.geolocation`
    Unsupported,
    /// Permission denied, timeout or position unavailable
    Failed(String),
}

impl GeolocationError {
    pub fn message(&self) -> String {
        match self {
            Self::Unsupported => MSG_UNSUPPORTED.to_string(),
            Self::Failed(detail) => format!("Error: {detail}"),
        }
    }
}

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<LatLon, GeolocationError>>>>>;

fn reply(slot: &Reply, value: Result<LatLon, GeolocationError>) {
    if let Some(tx) = slot.borrow_mut().take() {
        let _ = tx.send(value);
    }
}

/// Ask the browser for the current position once
pub async fn current_position() -> Result<LatLon, GeolocationError> {
    let navigator = web_sys::window()
        .ok_or(GeolocationError::Unsupported)?
        .navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
    if !supported {
        return Err(GeolocationError::Unsupported);
    }
    let geolocation = navigator
        .geolocation()
        .map_err(|_| GeolocationError::Unsupported)?;

    let (tx, rx) = oneshot::channel();
    let slot: Reply = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let slot = Rc::clone(&slot);
        Closure::once_into_js(move |position: GeolocationPosition| {
            let coords = position.coords();
            reply(&slot, Ok(LatLon::new(coords.latitude(), coords.longitude())));
        })
    };
    let on_error = {
        let slot = Rc::clone(&slot);
        Closure::once_into_js(move |error: GeolocationPositionError| {
            reply(&slot, Err(GeolocationError::Failed(error.message())));
        })
    };

    geolocation
        .get_current_position_with_error_callback(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        )
        .map_err(|e| GeolocationError::Failed(format!("{e:?}")))?;

    rx.await
        .unwrap_or_else(|_| Err(GeolocationError::Failed("sin respuesta".to_string())))
}
