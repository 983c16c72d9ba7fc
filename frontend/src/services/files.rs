//! File inputs.
//!
//! Images are read into base64 data URIs so they travel with the form
//! payload and survive the form being reset. Audio and video stay as object
//! URLs, revoked when the form that held them is reset or closed.

use std::cell::RefCell;
use std::rc::Rc;

use artistdash::{Attachment, AttachmentData, AttachmentKind};
use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FileReader, HtmlInputElement, ProgressEvent, Url};

const READ_FAILED: &str = "Не удалось прочитать файл";

/// First file of an `<input type="file">` change event; `None` when the
/// picker was cancelled. The input is cleared so picking the same file
/// again fires `change`.
pub fn picked_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = leptos::event_target(ev);
    let file = input.files()?.get(0);
    input.set_value("");
    file
}

/// Checks `file` against `kind` and loads it. `Err` is the inline message.
pub async fn load_attachment(file: File, kind: AttachmentKind) -> Result<Attachment, String> {
    let mime_type = file.type_();
    let size_bytes = file.size() as u64;
    kind.check(&mime_type, size_bytes)?;

    let data = match kind {
        AttachmentKind::BannerImage | AttachmentKind::Image => AttachmentData::DataUri(read_data_uri(&file).await?),
        AttachmentKind::Audio | AttachmentKind::Video => AttachmentData::ObjectUrl(object_url(&file)?),
    };

    Attachment::picked(kind, file.name(), mime_type, size_bytes, data)
}

fn object_url(file: &File) -> Result<String, String> {
    Url::create_object_url_with_blob(file).map_err(|e| {
        log::error!("createObjectURL failed: {:?}", e);
        READ_FAILED.to_string()
    })
}

/// `FileReader.readAsDataURL` as a future.
async fn read_data_uri(file: &File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| {
        log::error!("FileReader unavailable: {:?}", e);
        READ_FAILED.to_string()
    })?;

    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let onload: Closure<dyn FnMut(ProgressEvent)> = {
        let reader = reader.clone();
        let tx = Rc::clone(&tx);
        Closure::once(move |_: ProgressEvent| {
            let result = reader
                .result()
                .ok()
                .and_then(|value| value.as_string())
                .ok_or_else(|| READ_FAILED.to_string());
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(result);
            }
        })
    };
    let onerror: Closure<dyn FnMut(ProgressEvent)> = {
        let tx = Rc::clone(&tx);
        Closure::once(move |_: ProgressEvent| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(READ_FAILED.to_string()));
            }
        })
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    reader.read_as_data_url(file).map_err(|e| {
        log::error!("readAsDataURL failed: {:?}", e);
        READ_FAILED.to_string()
    })?;

    let result = rx.await.unwrap_or_else(|_| Err(READ_FAILED.to_string()));

    // Callbacks must outlive the read
    reader.set_onload(None);
    reader.set_onerror(None);
    drop(onload);
    drop(onerror);

    result
}

/// Frees object URLs handed back by a form session.
pub fn revoke_object_urls(urls: Vec<String>) {
    for url in urls {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("revokeObjectURL failed for {}: {:?}", url, e);
        }
    }
}

/// Frees the URL of an attachment being replaced or removed.
pub fn release(attachment: Option<Attachment>) {
    if let Some(url) = attachment.as_ref().and_then(Attachment::object_url) {
        revoke_object_urls(vec![url.to_string()]);
    }
}
