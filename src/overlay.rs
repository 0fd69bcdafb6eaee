use crate::constants::{CONTAINER_ID, ERROR_ID};
use web_sys as web;

/// Shows `message` in the error panel, falling back to the container.
pub fn show_error(document: &web::Document, message: &str) {
    let target = document
        .get_element_by_id(ERROR_ID)
        .or_else(|| document.get_element_by_id(CONTAINER_ID));
    match target {
        Some(el) => {
            el.set_text_content(Some(message));
            _ = el.class_list().remove_1("hidden");
            _ = el.set_attribute("style", "");
        }
        None => log::error!("[ui] no #{ERROR_ID} element for: {message}"),
    }
}

/// Replaces the canvas container's contents with a message when the
/// graphics backend is missing.
pub fn show_fallback(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(CONTAINER_ID) {
        el.set_text_content(Some(message));
    }
    show_error(document, message);
}

pub fn hide_error(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ERROR_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}
