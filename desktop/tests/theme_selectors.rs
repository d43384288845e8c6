#![cfg(test)]
//! Selectors the shared components rely on must stay in the theme.
//! Update `REQUIRED_SELECTORS` when renaming a class in the markup.

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Shell
    ":root",
    ".app {",
    ".app-header {",
    ".page {",
    ".visually-hidden",
    // Feedback
    ".error-banner {",
    ".spinner__ring",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--indigo",
    ".button--amber",
    ".back-button",
    ".chip--active",
    // Screens
    ".auth-card {",
    ".result-card {",
    ".result-card--empty",
    ".ree-card {",
    ".info-card {",
    ".history-entry {",
    // Charts
    ".composition-chart__pie",
    ".composition-chart__legend",
    ".waste-icon--ewaste",
];

#[test]
fn theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|selector| !THEME_CSS.contains(selector))
        .collect();
    assert!(
        missing.is_empty(),
        "Theme is missing selectors: {missing:?}"
    );
}

#[test]
fn every_waste_type_has_a_modifier() {
    for modifier in ["bio", "nonbio", "ewaste", "unknown"] {
        let selector = format!(".waste-icon--{modifier}");
        assert!(THEME_CSS.contains(&selector), "missing {selector}");
    }
}
