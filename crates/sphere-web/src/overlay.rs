use sphere_core::AudioStatus;
use wasm_bindgen::JsCast;
use web_sys as web;

const POPUP_ID: &str = "listenerPopup";
const STATUS_ID: &str = "micStatusText";
pub const ENABLE_BUTTON_ID: &str = "micEnableButton";
pub const DECLINE_BUTTON_ID: &str = "micDeclineButton";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(POPUP_ID) {
        let _ = el.class_list().remove_1("is-hidden");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(POPUP_ID) {
        let _ = el.class_list().add_1("is-hidden");
    }
}

fn status_text(status: AudioStatus) -> &'static str {
    match status {
        AudioStatus::Idle | AudioStatus::Active => "",
        AudioStatus::Connecting => "Connecting",
        AudioStatus::Declined => "Microphone off",
        AudioStatus::Denied => "Denied",
        AudioStatus::Unsupported => "Unsupported",
    }
}

pub fn set_status(document: &web::Document, status: AudioStatus) {
    let Some(el) = document.get_element_by_id(STATUS_ID) else {
        return;
    };
    el.set_text_content(Some(status_text(status)));
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let flag = if status.is_error() { "true" } else { "false" };
        let _ = html.dataset().set("error", flag);
    }
}

pub fn set_buttons_disabled(document: &web::Document, disabled: bool) {
    for id in [ENABLE_BUTTON_ID, DECLINE_BUTTON_ID] {
        if let Some(btn) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok())
        {
            btn.set_disabled(disabled);
        }
    }
}
