//! The navigation controller: one owned state struct that mediates every
//! screen transition, dispatches lookups and repairs inconsistent states.

use std::rc::Rc;
use std::sync::Arc;

use api::{
    ClassificationResult, CompositionItem, ImageData, MaterialInfoResult, ReeResult,
    ScanHistoryItem, ServiceError,
};
use tracing::{debug, info, warn};

use super::display::{self, DisplayedScreen};
use super::history::HistoryDraft;
use super::identity::{IdentityVerifier, RegistryVerifier};
use super::lookup::{Lookup, LookupKind, Settled, Ticket};
use super::navigation::{NavigationState, Screen};
use super::storage::AppStorage;
use super::timing;

pub const CLASSIFYING_LABEL: &str = "Classifying waste item(s)...";
pub const SCANNING_REES_LABEL: &str = "Scanning for Rare Earth Elements...";

/// Signed-in identity. Authenticated exactly when a user is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_user: Option<String>,
}

impl Session {
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            current_user: Some(user.into()),
        }
    }

    pub fn authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub data: Arc<ImageData>,
    pub display_url: String,
}

impl LoadedImage {
    pub fn new(data: ImageData) -> Self {
        let display_url = data.data_url();
        Self {
            data: Arc::new(data),
            display_url,
        }
    }
}

/// Everything known about the item currently being sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedItem {
    pub image: Option<LoadedImage>,
    pub classification: Option<Vec<ClassificationResult>>,
    pub rees: Option<ReeResult>,
    pub material_info: Option<MaterialInfoResult>,
    pub selected_composition: Option<Vec<CompositionItem>>,
}

impl LoadedItem {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub label: String,
}

impl LoadingState {
    fn active(label: impl Into<String>) -> Self {
        Self {
            is_loading: true,
            label: label.into(),
        }
    }
}

pub struct AppController {
    nav: NavigationState,
    session: Session,
    item: LoadedItem,
    loading: LoadingState,
    error: Option<String>,
    auth_error: Option<String>,
    scan_history: Vec<ScanHistoryItem>,
    pending: Option<(Ticket, LookupKind)>,
    next_ticket: u64,
    storage: AppStorage,
    verifier: Rc<dyn IdentityVerifier>,
}

impl AppController {
    /// Fresh controller on the title screen.
    pub fn new(storage: AppStorage, verifier: Rc<dyn IdentityVerifier>) -> Self {
        Self {
            nav: NavigationState::new(Screen::Title),
            session: Session::default(),
            item: LoadedItem::default(),
            loading: LoadingState::default(),
            error: None,
            auth_error: None,
            scan_history: Vec::new(),
            pending: None,
            next_ticket: 0,
            storage,
            verifier,
        }
    }

    /// Controller verifying identities against the stored registry.
    pub fn with_registry(storage: AppStorage) -> Self {
        let verifier = Rc::new(RegistryVerifier::new(storage.clone()));
        Self::new(storage, verifier)
    }

    /// Start-up: a remembered user lands straight on Upload.
    pub fn restore(storage: AppStorage, verifier: Rc<dyn IdentityVerifier>) -> Self {
        let mut controller = Self::new(storage, verifier);
        if let Some(user) = controller.storage.remembered_user() {
            info!("Restoring remembered session for {user}");
            controller.session = Session::signed_in(user);
            controller.nav.replace(Screen::Upload);
        }
        controller
    }

    pub fn active_screen(&self) -> Screen {
        self.nav.active()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn item(&self) -> &LoadedItem {
        &self.item
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    pub fn scan_history(&self) -> &[ScanHistoryItem] {
        &self.scan_history
    }

    pub fn storage(&self) -> &AppStorage {
        &self.storage
    }

    /// Kind of the lookup currently awaited, if any.
    pub fn pending_lookup(&self) -> Option<LookupKind> {
        self.pending.map(|(_, kind)| kind)
    }

    pub fn display(&self) -> DisplayedScreen {
        display::resolve(self)
    }

    pub fn navigate(&mut self, target: Screen) {
        self.abandon_pending();
        self.transition(target);
    }

    pub fn go_back(&mut self) {
        self.abandon_pending();
        self.step_back();
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.abandon_pending();
        self.transition(Screen::Upload);
        self.item = LoadedItem::default();
        self.loading = LoadingState::default();
    }

    pub fn login(&mut self, identity: &str, remember: bool) -> bool {
        if let Err(err) = self.verifier.verify(identity) {
            self.auth_error = Some(err.to_string());
            return false;
        }
        self.session = Session::signed_in(identity);
        if remember {
            if let Err(err) = self.storage.remember_user(identity) {
                warn!("Could not remember {identity}: {err}");
            }
        }
        info!("Signed in as {identity}");
        self.navigate(Screen::Upload);
        true
    }

    pub fn sign_up(&mut self, identity: &str) -> bool {
        if let Err(err) = self.verifier.enroll(identity) {
            self.auth_error = Some(err.to_string());
            return false;
        }
        self.session = Session::signed_in(identity);
        info!("Registered {identity}");
        self.navigate(Screen::Upload);
        true
    }

    pub fn logout(&mut self) {
        self.abandon_pending();
        if let Err(err) = self.storage.forget_user() {
            warn!("Could not clear remembered user: {err}");
        }
        self.session = Session::default();
        self.item = LoadedItem::default();
        self.loading = LoadingState::default();
        self.scan_history.clear();
        self.error = None;
        self.auth_error = None;
        self.nav = NavigationState::new(Screen::Login);
    }

    /// Load a new image and request its classification.
    pub fn upload_image(&mut self, image: ImageData) -> Lookup {
        let image = LoadedImage::new(image);
        let data = image.data.clone();
        self.item = LoadedItem {
            image: Some(image),
            ..LoadedItem::default()
        };
        self.navigate(Screen::Result);
        let ticket = self.begin(LookupKind::Classification, CLASSIFYING_LABEL);
        Lookup::Classify {
            ticket,
            image: data,
        }
    }

    /// Request REE detection for the loaded image; `None` without one.
    pub fn lookup_rees(&mut self) -> Option<Lookup> {
        let image = self.item.image.as_ref()?.data.clone();
        self.navigate(Screen::Ree);
        let ticket = self.begin(LookupKind::Rees, SCANNING_REES_LABEL);
        Some(Lookup::Rees { ticket, image })
    }

    pub fn learn_more(&mut self, material: &str, composition: Vec<CompositionItem>) -> Lookup {
        self.item.selected_composition = Some(composition);
        self.navigate(Screen::MaterialInfo);
        let ticket = self.begin(
            LookupKind::MaterialInfo,
            format!("Fetching details for {material}..."),
        );
        Lookup::MaterialInfo {
            ticket,
            material: material.to_string(),
        }
    }

    pub fn show_history(&mut self) {
        let Some(user) = self.session.current_user().map(str::to_string) else {
            return;
        };
        self.scan_history = self.storage.load_history(&user);
        self.navigate(Screen::History);
    }

    /// Apply a settled lookup. Outcomes for anything but the outstanding
    /// ticket are dropped. A successful, non-empty classification yields the
    /// history entry still to be recorded.
    pub fn apply(&mut self, settled: Settled) -> Option<HistoryDraft> {
        match self.pending {
            Some((ticket, _)) if ticket == settled.ticket() => {}
            _ => {
                debug!("Discarding stale {:?} outcome", settled.kind());
                return None;
            }
        }
        self.pending = None;
        self.loading = LoadingState::default();

        match settled {
            Settled::Classified {
                outcome: Ok(results),
                ..
            } => {
                let results: Vec<ClassificationResult> = results
                    .into_iter()
                    .map(ClassificationResult::sanitized)
                    .collect();
                self.item.classification = Some(results.clone());
                self.history_draft(results)
            }
            Settled::Rees {
                outcome: Ok(result),
                ..
            } => {
                self.item.rees = Some(result.deduplicated());
                None
            }
            Settled::MaterialInfo {
                outcome: Ok(info), ..
            } => {
                self.item.material_info = Some(info);
                None
            }
            Settled::MaterialInfo {
                outcome: Err(err), ..
            } => {
                self.item.selected_composition = None;
                self.fail(err);
                None
            }
            Settled::Classified {
                outcome: Err(err), ..
            }
            | Settled::Rees {
                outcome: Err(err), ..
            } => {
                self.fail(err);
                None
            }
        }
    }

    /// Whether the active detail screen lacks the data it needs outside a
    /// loading window.
    pub fn needs_reset(&self) -> bool {
        if self.loading.is_loading || !self.session.authenticated() {
            return false;
        }
        let item = &self.item;
        match self.nav.active() {
            Screen::Result => item.classification.is_none() || item.image.is_none(),
            Screen::Ree => item.rees.is_none() || item.image.is_none(),
            Screen::MaterialInfo => {
                item.material_info.is_none()
                    || item.image.is_none()
                    || item.selected_composition.is_none()
            }
            _ => false,
        }
    }

    /// Reset when [`needs_reset`](Self::needs_reset). Returns whether it did.
    pub fn reconcile(&mut self) -> bool {
        if !self.needs_reset() {
            return false;
        }
        debug!("Missing data for {:?}; resetting", self.nav.active());
        self.reset();
        true
    }

    /// Put `screen` on display without a transition. Used by start-up
    /// restoration and by tests that simulate abnormal states.
    pub fn force_screen(&mut self, screen: Screen) {
        self.nav.replace(screen);
    }

    fn transition(&mut self, target: Screen) {
        self.nav.navigate(target);
        self.error = None;
        self.auth_error = None;
    }

    fn step_back(&mut self) {
        if self.nav.go_back() {
            self.error = None;
            self.auth_error = None;
        }
    }

    fn begin(&mut self, kind: LookupKind, label: impl Into<String>) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some((ticket, kind));
        self.loading = LoadingState::active(label);
        ticket
    }

    fn abandon_pending(&mut self) {
        if let Some((_, kind)) = self.pending.take() {
            debug!("Abandoning pending {kind:?} lookup");
            self.loading = LoadingState::default();
        }
    }

    fn fail(&mut self, err: ServiceError) {
        warn!("Lookup failed: {err}");
        self.step_back();
        self.error = Some(err.to_string());
    }

    fn history_draft(&self, results: Vec<ClassificationResult>) -> Option<HistoryDraft> {
        if results.is_empty() {
            return None;
        }
        let user = self.session.current_user()?.to_string();
        let image = self.item.image.as_ref()?.data.clone();
        Some(HistoryDraft {
            user,
            image,
            results,
            timestamp: timing::now_millis(),
        })
    }
}
