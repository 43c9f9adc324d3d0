use js_sys::wasm_bindgen::JsValue;
use serde::Serialize;

/// Error type for serialization operations
#[derive(Debug)]
pub enum Error {
    SerdeWasmBindgen(serde_wasm_bindgen::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SerdeWasmBindgen(e) => write!(f, "Serde WASM Bindgen Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Error::SerdeWasmBindgen(e)
    }
}

/// Serialize a Rust data structure into a plain JS object.
///
/// Maps become objects (Chart.js does not read `Map`), large numbers stay JS numbers.
pub fn to_value<T: Serialize>(value: &T) -> Result<JsValue, Error> {
    let serializer = serde_wasm_bindgen::Serializer::new()
        .serialize_maps_as_objects(true)
        .serialize_large_number_types_as_bigints(false);
    value.serialize(&serializer).map_err(Error::from)
}
