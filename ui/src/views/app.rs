use api::{CompositionItem, ImageData, Services};
use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::info;

use crate::components::{AppHeader, ErrorBanner, LoadingSpinner};
use crate::core::config::AppConfig;
use crate::core::identity::RegistryVerifier;
use crate::core::storage::{platform_store, AppStorage};
use crate::core::thumbnail::ThumbnailBounds;
use crate::core::{history, platform, AppController, DisplayedScreen, Lookup};

use super::{
    HistoryScreen, LoginScreen, MaterialInfoScreen, ReeScreen, ResultScreen, SignUpScreen,
    TitleScreen, UploadScreen,
};

/// User actions that start an async lookup.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Upload(ImageData),
    LookupRees,
    LearnMore {
        material: String,
        composition: Vec<CompositionItem>,
    },
}

pub fn use_controller() -> Signal<AppController> {
    use_context::<Signal<AppController>>()
}

pub fn use_app_events() -> Coroutine<AppEvent> {
    use_coroutine_handle::<AppEvent>()
}

#[component]
pub fn EcoSortApp() -> Element {
    let config = use_hook(AppConfig::load);
    let services = use_hook(|| Services::from_config(&config.services));

    let mut controller = use_signal(|| {
        let storage = AppStorage::new(platform_store(), config.history_limit);
        let verifier = std::rc::Rc::new(RegistryVerifier::new(storage.clone()));
        info!("Starting EcoSort ({})", platform::Platform::current().label());
        AppController::restore(storage, verifier)
    });
    use_context_provider(|| controller);

    let thumbnail = config.thumbnail;
    use_coroutine(move |mut rx: UnboundedReceiver<AppEvent>| {
        let services = services.clone();
        async move {
            while let Some(event) = rx.next().await {
                let lookup = match event {
                    AppEvent::Upload(image) => Some(controller.write().upload_image(image)),
                    AppEvent::LookupRees => controller.write().lookup_rees(),
                    AppEvent::LearnMore {
                        material,
                        composition,
                    } => Some(controller.write().learn_more(&material, composition)),
                };
                if let Some(lookup) = lookup {
                    dispatch(lookup, controller, services.clone(), thumbnail);
                }
            }
        }
    });

    // Reconciliation pass after every state change.
    use_effect(move || {
        let needs_reset = controller.read().needs_reset();
        if needs_reset {
            controller.write().reconcile();
        }
    });

    let (screen, error) = {
        let state = controller.read();
        (state.display(), state.error().map(str::to_string))
    };

    let body = match screen {
        DisplayedScreen::Title => rsx! { TitleScreen {} },
        DisplayedScreen::Login => rsx! { LoginScreen {} },
        DisplayedScreen::SignUp => rsx! { SignUpScreen {} },
        DisplayedScreen::Upload => rsx! { UploadScreen {} },
        DisplayedScreen::Loading { label } => rsx! { LoadingSpinner { label } },
        DisplayedScreen::Preparing { label } => rsx! { LoadingSpinner { label: label.to_string() } },
        DisplayedScreen::Result(view) => rsx! { ResultScreen { view } },
        DisplayedScreen::Ree { image_url, result } => rsx! { ReeScreen { image_url, result } },
        DisplayedScreen::MaterialInfo {
            image_url,
            info,
            composition,
        } => rsx! { MaterialInfoScreen { image_url, info, composition } },
        DisplayedScreen::History { entries } => rsx! { HistoryScreen { entries } },
    };

    rsx! {
        main { class: "app",
            AppHeader {}
            if let Some(message) = error {
                ErrorBanner { message }
            }
            div { class: "app__screen", {body} }
        }
    }
}

/// Run `lookup` in the background and feed its outcome back.
fn dispatch(
    lookup: Lookup,
    mut controller: Signal<AppController>,
    services: Services,
    thumbnail: ThumbnailBounds,
) {
    platform::spawn_future(async move {
        let (settled, archive_job) = lookup.run(&services).await;

        let draft = controller.write().apply(settled);
        if let Some(draft) = draft {
            let storage = controller.read().storage().clone();
            history::record_best_effort(&storage, draft, thumbnail);
        }

        if let Some(job) = archive_job {
            job.run(services.archive.as_ref()).await;
        }
    });
}
