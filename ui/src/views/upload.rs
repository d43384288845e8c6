use api::ImageData;
use dioxus::prelude::*;
use tracing::warn;

use crate::components::BackButton;
use crate::core::platform::Platform;
use crate::core::thumbnail::sniff_mime_type;
use crate::views::{use_app_events, use_controller, AppEvent};

const UNREADABLE_IMAGE: &str = "That file could not be read. Please choose another image.";
const UNSUPPORTED_IMAGE: &str = "Unsupported file type. Please choose a JPEG, PNG or WebP image.";

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Bytes plus their MIME type, preferring the content over the file name.
fn image_from_file(name: &str, bytes: Vec<u8>) -> Option<ImageData> {
    let mime = sniff_mime_type(&bytes).or_else(|| mime_from_extension(name))?;
    Some(ImageData::new(bytes, mime))
}

#[component]
pub fn UploadScreen() -> Element {
    let mut controller = use_controller();
    let events = use_app_events();
    let mut local_error = use_signal(|| None::<&'static str>);

    let on_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        let Some(bytes) = engine.read_file(&name).await else {
            warn!("Could not read {name}");
            local_error.set(Some(UNREADABLE_IMAGE));
            return;
        };
        match image_from_file(&name, bytes) {
            Some(image) => {
                local_error.set(None);
                events.send(AppEvent::Upload(image));
            }
            None => {
                warn!("Rejected {name}: unrecognised image type");
                local_error.set(Some(UNSUPPORTED_IMAGE));
            }
        }
    };

    let capture_hint = Platform::current().supports_capture_hint();

    rsx! {
        section { class: "page page-upload",
            BackButton {}
            div { class: "page-upload__panel",
                h1 { class: "page-upload__title", "Classify an Item" }
                p { class: "page-upload__subtitle",
                    "Take a photo or upload an image of the waste you want to sort."
                }

                if let Some(message) = local_error() {
                    p { class: "page-upload__error", role: "alert", "{message}" }
                }

                div { class: "page-upload__actions",
                    if capture_hint {
                        label { class: "button button--primary", r#for: "camera-input",
                            "Capture using Camera"
                        }
                        input {
                            id: "camera-input",
                            class: "visually-hidden",
                            r#type: "file",
                            accept: "image/*",
                            "capture": "environment",
                            onchange: on_file,
                        }
                    }
                    label { class: "button button--secondary", r#for: "file-input",
                        "Upload from Device"
                    }
                    input {
                        id: "file-input",
                        class: "visually-hidden",
                        r#type: "file",
                        accept: "image/*",
                        onchange: on_file,
                    }
                }

                button {
                    r#type: "button",
                    class: "link-button page-upload__history",
                    onclick: move |_| controller.write().show_history(),
                    "View Scan History"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_fallback_is_case_insensitive() {
        assert_eq!(mime_from_extension("IMG_0001.JPG"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("photo.heic"), Some("image/heic"));
        assert_eq!(mime_from_extension("notes.txt"), None);
        assert_eq!(mime_from_extension("noext"), None);
    }

    #[test]
    fn content_sniffing_wins_over_the_name() {
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let image = image_from_file("mislabelled.jpg", png).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn unknown_content_and_name_is_rejected() {
        assert!(image_from_file("blob.bin", vec![1, 2, 3]).is_none());
    }
}
