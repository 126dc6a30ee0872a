//! DOM overlay management: score readout, start/game-over screens, level toast.
//!
//! Every element lookup is tolerant of a missing node so the game keeps
//! running even if the host page omits part of the HUD markup.

use web_sys::{Document, Element};

/// Handle to the HUD elements of the host page.
///
/// Elements are looked up by id on every call rather than cached; HUD
/// updates are sparse (a handful per second at most) so the lookups are
/// not worth the borrow gymnastics of holding `Element`s long-term.
pub struct Hud {
    document: Document,
}

impl Hud {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Update the persistent score readout.
    pub fn set_score(&self, score: u32) {
        if let Some(el) = self.element("score-display") {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    /// Reveal the start overlay and clear everything else (initial load and
    /// after a restart).
    pub fn show_start_screen(&self) {
        if let Some(el) = self.element("start-screen") {
            let _ = el.set_attribute("class", "screen");
        }
        if let Some(el) = self.element("game-over-screen") {
            let _ = el.set_attribute("class", "screen hidden");
        }
        self.hide_level_toast();
        self.set_score(0);
    }

    /// Hide both overlays when a run begins.
    pub fn hide_screens(&self) {
        if let Some(el) = self.element("start-screen") {
            let _ = el.set_attribute("class", "screen hidden");
        }
        if let Some(el) = self.element("game-over-screen") {
            let _ = el.set_attribute("class", "screen hidden");
        }
    }

    /// Reveal the game-over overlay with the final score filled in.
    pub fn show_game_over(&self, score: u32) {
        if let Some(el) = self.element("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = self.element("game-over-screen") {
            let _ = el.set_attribute("class", "screen");
        }
    }

    /// Flash the level-up toast. The frame loop hides it again once the
    /// display window elapses; there is no timer here.
    pub fn show_level_toast(&self, label: &str) {
        if let Some(el) = self.element("level-display") {
            el.set_text_content(Some(label));
            let _ = el.set_attribute("class", "toast");
        }
    }

    pub fn hide_level_toast(&self) {
        if let Some(el) = self.element("level-display") {
            let _ = el.set_attribute("class", "toast hidden");
        }
    }
}
