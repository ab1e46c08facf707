//! Accessibility panel in the header chrome.
//!
//! Display preferences are applied as body classes and an inline font size.
//! They live only as long as the document does.

use std::cell::Cell;
use std::rc::Rc;

use web_sys::Element;

use crate::config::font_scale;
use crate::utils::dom;

use super::chrome::{on_click, set_active_overlay};

// =============================================================================
// Preferences
// =============================================================================

/// Font size buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStep {
    Decrease,
    Reset,
    Increase,
}

impl FontStep {
    /// Next scale (percent), clamped to the supported range.
    pub fn apply(self, current: u32) -> u32 {
        match self {
            Self::Decrease if current > font_scale::MIN => current - font_scale::STEP,
            Self::Increase if current < font_scale::MAX => current + font_scale::STEP,
            Self::Reset => font_scale::DEFAULT,
            _ => current,
        }
    }
}

/// Color themes offered by `.theme-btn[data-theme]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Default,
    Dark,
    Yellow,
    Light,
}

impl Theme {
    const CLASSES: [&'static str; 3] = ["theme-dark", "theme-yellow", "theme-light"];

    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::Dark,
            "yellow" => Self::Yellow,
            "light" => Self::Light,
            _ => Self::Default,
        }
    }

    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Dark => Some("theme-dark"),
            Self::Yellow => Some("theme-yellow"),
            Self::Light => Some("theme-light"),
        }
    }
}

/// Line spacing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spacing {
    Tight,
    Normal,
    Loose,
}

impl Spacing {
    const CLASSES: [&'static str; 2] = ["spacing-tight", "spacing-loose"];

    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Tight => Some("spacing-tight"),
            Self::Normal => None,
            Self::Loose => Some("spacing-loose"),
        }
    }

    pub fn button_id(self) -> &'static str {
        match self {
            Self::Tight => "tightHeight",
            Self::Normal => "normalHeight",
            Self::Loose => "looseHeight",
        }
    }
}

/// Text alignment options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    const CLASSES: [&'static str; 3] = ["text-align-left", "text-align-center", "text-align-end"];

    pub fn body_class(self) -> &'static str {
        match self {
            Self::Left => "text-align-left",
            Self::Center => "text-align-center",
            Self::Right => "text-align-end",
        }
    }

    pub fn button_id(self) -> &'static str {
        match self {
            Self::Left => "alignLeft",
            Self::Center => "alignCenter",
            Self::Right => "alignRight",
        }
    }
}

/// Toggle buttons and the body class each one flips.
const VISUAL_TOGGLES: [(&str, &str); 2] = [
    ("hideImagesBtn", "hide-images"),
    ("highlightLinksBtn", "highlight-links"),
];

// =============================================================================
// Wiring
// =============================================================================

/// Wire the panel. Called every time the header is (re)injected.
pub fn wire() {
    wire_panel_toggle();

    let font = Rc::new(Cell::new(current_font_scale()));
    for (id, step) in [
        ("decreaseFont", FontStep::Decrease),
        ("resetFont", FontStep::Reset),
        ("increaseFont", FontStep::Increase),
    ] {
        if let Some(button) = dom::element_by_id(id) {
            let font = font.clone();
            on_click(&button, move |_| set_font_scale(&font, step.apply(font.get())));
        }
    }

    for button in dom::query_all(".theme-btn") {
        let theme = Theme::from_name(&button.get_attribute("data-theme").unwrap_or_default());
        let target = button.clone();
        on_click(&button, move |_| {
            set_theme(theme);
            mark_only(".theme-btn", "active-theme", Some(&target));
        });
    }

    for spacing in [Spacing::Tight, Spacing::Normal, Spacing::Loose] {
        if let Some(button) = dom::element_by_id(spacing.button_id()) {
            on_click(&button, move |_| set_spacing(spacing));
        }
    }

    for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
        if let Some(button) = dom::element_by_id(alignment.button_id()) {
            on_click(&button, move |_| set_alignment(alignment));
        }
    }

    for (id, class) in VISUAL_TOGGLES {
        if let Some(button) = dom::element_by_id(id) {
            let target = button.clone();
            on_click(&button, move |_| {
                let Some(body) = dom::body() else {
                    return;
                };
                let active = body.class_list().toggle(class).unwrap_or(false);
                dom::toggle_class(&target, "active-visual", active);
            });
        }
    }

    if let Some(button) = dom::element_by_id("resetAccessibility") {
        on_click(&button, move |_| {
            set_font_scale(&font, font_scale::DEFAULT);
            reset();
        });
    }
}

fn wire_panel_toggle() {
    let Some(panel) = dom::element_by_id("accessibility-sidebar") else {
        return;
    };
    if let Some(open) = dom::element_by_id("accessibilityIconBtn") {
        let panel = panel.clone();
        on_click(&open, move |_| {
            dom::toggle_class(&panel, "active", true);
            set_active_overlay(true);
        });
    }
    if let Some(close) = dom::element_by_id("closeAccessBtn") {
        let target = panel.clone();
        on_click(&close, move |_| {
            dom::toggle_class(&target, "active", false);
            set_active_overlay(false);
        });
    }
    if let Some(overlay) = dom::element_by_id("overlay") {
        on_click(&overlay, move |_| dom::toggle_class(&panel, "active", false));
    }
}

/// Restore spacing, alignment, visual toggles and theme defaults.
fn reset() {
    set_spacing(Spacing::Normal);
    set_alignment(Alignment::Left);

    if let Some(body) = dom::body() {
        for (id, class) in VISUAL_TOGGLES {
            dom::toggle_class(&body, class, false);
            if let Some(button) = dom::element_by_id(id) {
                dom::toggle_class(&button, "active-visual", false);
            }
        }
    }

    set_theme(Theme::Default);
    let default_button = dom::query(".theme-btn.default-theme");
    mark_only(".theme-btn", "active-theme", default_button.as_ref());
}

fn current_font_scale() -> u32 {
    dom::body()
        .and_then(|b| b.style().get_property_value("font-size").ok())
        .and_then(|v| v.trim_end_matches('%').parse().ok())
        .unwrap_or(font_scale::DEFAULT)
}

fn set_font_scale(state: &Cell<u32>, scale: u32) {
    state.set(scale);
    if let Some(body) = dom::body() {
        dom::set_style(&body, "font-size", &format!("{}%", scale));
    }
}

fn set_theme(theme: Theme) {
    swap_body_class(&Theme::CLASSES, theme.body_class());
}

fn set_spacing(spacing: Spacing) {
    swap_body_class(&Spacing::CLASSES, spacing.body_class());
    let button = dom::element_by_id(spacing.button_id());
    mark_only(".spacing-btn", "active-spacing", button.as_ref());
}

fn set_alignment(alignment: Alignment) {
    swap_body_class(&Alignment::CLASSES, Some(alignment.body_class()));
    let button = dom::element_by_id(alignment.button_id());
    mark_only(".align-btn", "active-align", button.as_ref());
}

fn swap_body_class(family: &[&str], class: Option<&str>) {
    let Some(body) = dom::body() else {
        return;
    };
    for existing in family {
        dom::toggle_class(&body, existing, false);
    }
    if let Some(class) = class {
        dom::toggle_class(&body, class, true);
    }
}

/// Clear `class` from every `selector` match, then set it on `chosen`.
fn mark_only(selector: &str, class: &str, chosen: Option<&Element>) {
    for element in dom::query_all(selector) {
        dom::toggle_class(&element, class, false);
    }
    if let Some(chosen) = chosen {
        dom::toggle_class(chosen, class, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_step_bounds() {
        assert_eq!(FontStep::Increase.apply(100), 110);
        assert_eq!(FontStep::Increase.apply(130), 130);
        assert_eq!(FontStep::Decrease.apply(90), 80);
        assert_eq!(FontStep::Decrease.apply(80), 80);
        assert_eq!(FontStep::Reset.apply(120), 100);
    }

    #[test]
    fn test_font_steps_walk_full_range() {
        let mut scale = font_scale::DEFAULT;
        for _ in 0..10 {
            scale = FontStep::Increase.apply(scale);
        }
        assert_eq!(scale, font_scale::MAX);
        for _ in 0..10 {
            scale = FontStep::Decrease.apply(scale);
        }
        assert_eq!(scale, font_scale::MIN);
    }

    #[test]
    fn test_theme_classes() {
        assert_eq!(Theme::from_name("dark").body_class(), Some("theme-dark"));
        assert_eq!(Theme::from_name("default").body_class(), None);
        assert_eq!(Theme::from_name("neon"), Theme::Default);
        for theme in [Theme::Dark, Theme::Yellow, Theme::Light] {
            assert!(Theme::CLASSES.contains(&theme.body_class().unwrap()));
        }
    }

    #[test]
    fn test_spacing_and_alignment_classes() {
        assert_eq!(Spacing::Normal.body_class(), None);
        assert_eq!(Spacing::Loose.body_class(), Some("spacing-loose"));
        assert_eq!(Spacing::Tight.button_id(), "tightHeight");
        assert_eq!(Alignment::Right.body_class(), "text-align-end");
        assert_eq!(Alignment::Center.button_id(), "alignCenter");
        for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
            assert!(Alignment::CLASSES.contains(&alignment.body_class()));
        }
    }
}
