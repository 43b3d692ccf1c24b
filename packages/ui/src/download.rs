//! Hand a generated [`Artifact`] to the operator.
//!
//! - **Web**: a Blob object URL clicked through a temporary anchor, so the
//!   browser's own download flow picks a location
//! - **Desktop**: written to the platform download directory
//!
//! Returns where the file went, for the confirmation line under the buttons.

use console::Artifact;

#[cfg(target_arch = "wasm32")]
pub fn save_artifact(artifact: &Artifact) -> Result<String, String> {
    use wasm_bindgen::{JsCast, JsValue};

    fn js_err(err: JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }

    let window = web_sys::window().ok_or("no window available")?;
    let document = window.document().ok_or("no document available")?;
    let body = document.body().ok_or("document has no body")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&artifact.contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(artifact.mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| "could not create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.filename);

    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err)?;
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;

    tracing::info!(filename = %artifact.filename, "artifact downloaded");
    Ok(artifact.filename.clone())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_artifact(artifact: &Artifact) -> Result<String, String> {
    let dir = dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let path = dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.contents)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))?;

    tracing::info!(path = %path.display(), "artifact saved");
    Ok(path.display().to_string())
}
