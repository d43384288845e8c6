//! Pure mapping from controller state to what should be on screen.

use api::{
    aggregate_composition, ClassificationResult, CompositionItem, MaterialInfoResult, ReeResult,
    ScanHistoryItem,
};

use super::controller::AppController;
use super::navigation::Screen;

pub const PREPARING_RESULTS: &str = "Preparing results...";
pub const PREPARING_DETAILS: &str = "Preparing details...";

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayedScreen {
    Title,
    Login,
    SignUp,
    Upload,
    Loading { label: String },
    /// Data is momentarily absent; the next reconciliation settles it.
    Preparing { label: &'static str },
    Result(ResultView),
    Ree {
        image_url: String,
        result: ReeResult,
    },
    MaterialInfo {
        image_url: String,
        info: MaterialInfoResult,
        composition: Vec<CompositionItem>,
    },
    History { entries: Vec<ScanHistoryItem> },
}

/// Classification results plus the per-item actions the result screen offers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub image_url: String,
    pub results: Vec<ClassificationResult>,
}

impl ResultView {
    /// Item at `index`, clamped to the last one.
    pub fn selected(&self, index: usize) -> Option<&ClassificationResult> {
        self.results.get(index.min(self.results.len().saturating_sub(1)))
    }

    pub fn offers_ree_lookup(&self, index: usize) -> bool {
        self.selected(index).is_some_and(ClassificationResult::is_e_waste)
    }

    /// Dominant material of the selected item with that item's composition.
    pub fn learn_more_target(&self, index: usize) -> Option<(String, Vec<CompositionItem>)> {
        let selected = self.selected(index)?;
        let dominant = selected.dominant_material()?;
        Some((dominant.name.clone(), selected.composition.clone()))
    }

    pub fn overall_composition(&self) -> Vec<CompositionItem> {
        aggregate_composition(&self.results)
    }
}

pub fn resolve(controller: &AppController) -> DisplayedScreen {
    let active = controller.active_screen();

    if !controller.session().authenticated() && active != Screen::Title {
        return match active {
            Screen::SignUp => DisplayedScreen::SignUp,
            _ => DisplayedScreen::Login,
        };
    }

    let item = controller.item();
    let loading = controller.loading();
    let image_url = item.image.as_ref().map(|img| img.display_url.clone());

    if active.is_detail() && loading.is_loading {
        return DisplayedScreen::Loading {
            label: loading.label.clone(),
        };
    }

    match active {
        Screen::Title => DisplayedScreen::Title,
        Screen::Login => DisplayedScreen::Login,
        Screen::SignUp => DisplayedScreen::SignUp,
        Screen::Upload => DisplayedScreen::Upload,
        Screen::Result => match (&item.classification, image_url) {
            (Some(results), Some(image_url)) => DisplayedScreen::Result(ResultView {
                image_url,
                results: results.clone(),
            }),
            _ => DisplayedScreen::Preparing {
                label: PREPARING_RESULTS,
            },
        },
        Screen::Ree => match (&item.rees, image_url) {
            (Some(result), Some(image_url)) => DisplayedScreen::Ree {
                image_url,
                result: result.clone(),
            },
            _ => DisplayedScreen::Preparing {
                label: PREPARING_RESULTS,
            },
        },
        Screen::MaterialInfo => match (&item.material_info, image_url, &item.selected_composition) {
            (Some(info), Some(image_url), Some(composition)) => DisplayedScreen::MaterialInfo {
                image_url,
                info: info.clone(),
                composition: composition.clone(),
            },
            _ => DisplayedScreen::Preparing {
                label: PREPARING_DETAILS,
            },
        },
        Screen::History => DisplayedScreen::History {
            entries: controller.scan_history().to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::WasteType;

    fn view() -> ResultView {
        ResultView {
            image_url: "data:image/png;base64,".into(),
            results: vec![
                ClassificationResult {
                    item_name: "Bottle".into(),
                    waste_type: WasteType::EWaste,
                    recycling_info: "Drop at an e-waste point.".into(),
                    composition: vec![
                        CompositionItem::new("Plastic", 70.0),
                        CompositionItem::new("Copper", 30.0),
                    ],
                },
                ClassificationResult {
                    item_name: "Can".into(),
                    waste_type: WasteType::NonBiodegradable,
                    recycling_info: "Rinse and recycle.".into(),
                    composition: vec![],
                },
            ],
        }
    }

    #[test]
    fn selection_clamps_to_last_item() {
        let v = view();
        assert_eq!(v.selected(1).unwrap().item_name, "Can");
        assert_eq!(v.selected(9).unwrap().item_name, "Can");
    }

    #[test]
    fn ree_lookup_only_for_e_waste() {
        let v = view();
        assert!(v.offers_ree_lookup(0));
        assert!(!v.offers_ree_lookup(1));
    }

    #[test]
    fn learn_more_needs_a_composition() {
        let v = view();
        let (material, composition) = v.learn_more_target(0).unwrap();
        assert_eq!(material, "Plastic");
        assert_eq!(composition.len(), 2);
        assert!(v.learn_more_target(1).is_none());
    }

    #[test]
    fn empty_results_select_nothing() {
        let v = ResultView {
            image_url: String::new(),
            results: Vec::new(),
        };
        assert!(v.selected(0).is_none());
        assert!(!v.offers_ree_lookup(0));
    }
}
