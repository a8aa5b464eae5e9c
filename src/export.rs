use std::io::Cursor;

use image::ImageFormat;

use crate::error::ExportError;
use crate::raster::rasterize;
use crate::renderer::VectorDocument;

/// Download name for a preview of `size` pixels.
pub fn file_name(size: u32) -> String {
    format!("icon-{size}.png")
}

/// Rasterizes a preview document and encodes it as PNG.
pub fn export_png(doc: &VectorDocument) -> Result<Vec<u8>, ExportError> {
    if doc.width == 0 || doc.height == 0 {
        return Err(ExportError::EmptyImage(doc.width, doc.height));
    }

    let image = rasterize(doc);
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Writes the PNG next to the working directory and returns its path.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(doc: &VectorDocument, dir: &std::path::Path) -> Result<std::path::PathBuf, ExportError> {
    let bytes = export_png(doc)?;
    let path = dir.join(file_name(doc.width));
    std::fs::write(&path, bytes)?;
    log::info!("Exported {}", path.display());
    Ok(path)
}

/// Hands the PNG to the browser as a file download and returns its name.
#[cfg(target_arch = "wasm32")]
pub fn download_png(doc: &VectorDocument) -> Result<String, ExportError> {
    use wasm_bindgen::JsCast as _;

    fn browser_error(err: wasm_bindgen::JsValue) -> ExportError {
        ExportError::Browser(format!("{err:?}"))
    }

    let bytes = export_png(doc)?;
    let name = file_name(doc.width);

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(browser_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(browser_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("not an anchor element".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(&name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(browser_error)?;
    log::info!("Exported {}", name);
    Ok(name)
}
