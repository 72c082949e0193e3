//! Wizard navigation state machine.
//!
//! The "create study" wizard has eight tabs, one per protocol section, and a
//! deliberately permissive navigation model: "Continue" and "Back" move
//! between adjacent tabs, but any tab may be jumped to directly at any time.
//! There is no linear gate between tabs; the completeness gate is advisory
//! while editing and authoritative only at submission.
//!
//! # Example
//!
//! ```
//! use studybuilder::engine::{FormEngine, Wizard, WizardTab};
//! use studybuilder::schema::protocol_schema;
//!
//! let mut wizard = Wizard::new(FormEngine::new(protocol_schema()));
//! assert_eq!(wizard.tab(), WizardTab::Overview);
//!
//! wizard.continue_forward();
//! assert_eq!(wizard.tab(), WizardTab::Eligibility);
//!
//! // Jumping straight to a later tab is allowed regardless of completeness
//! wizard.go_to(WizardTab::Safety);
//! wizard.go_to(WizardTab::Overview);
//! ```

use std::fmt;

use super::error::IncompleteSubmission;
use super::state::FormEngine;

/// One tab of the create-study wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTab {
    Overview,
    Eligibility,
    Arms,
    Endpoints,
    Schedule,
    Procedures,
    Safety,
    Data,
}

impl WizardTab {
    /// All tabs, in display order.
    pub const ALL: [WizardTab; 8] = [
        WizardTab::Overview,
        WizardTab::Eligibility,
        WizardTab::Arms,
        WizardTab::Endpoints,
        WizardTab::Schedule,
        WizardTab::Procedures,
        WizardTab::Safety,
        WizardTab::Data,
    ];

    /// The tab the "Continue" button leads to, or `None` on the last tab.
    pub fn next(&self) -> Option<WizardTab> {
        let pos = Self::ALL.iter().position(|t| t == self)?;
        Self::ALL.get(pos + 1).copied()
    }

    /// The tab the "Back" button leads to, or `None` on the first tab.
    pub fn previous(&self) -> Option<WizardTab> {
        let pos = Self::ALL.iter().position(|t| t == self)?;
        pos.checked_sub(1).map(|p| Self::ALL[p])
    }
}

impl fmt::Display for WizardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardTab::Overview => write!(f, "Overview"),
            WizardTab::Eligibility => write!(f, "Eligibility"),
            WizardTab::Arms => write!(f, "Arms"),
            WizardTab::Endpoints => write!(f, "Endpoints"),
            WizardTab::Schedule => write!(f, "Schedule"),
            WizardTab::Procedures => write!(f, "Procedures"),
            WizardTab::Safety => write!(f, "Safety"),
            WizardTab::Data => write!(f, "Data"),
        }
    }
}

impl Default for WizardTab {
    /// The wizard always opens on the overview tab.
    fn default() -> Self {
        WizardTab::Overview
    }
}

/// One create-study session: an engine plus the active tab.
pub struct Wizard {
    engine: FormEngine,
    tab: WizardTab,
}

impl Wizard {
    /// Starts a session on the overview tab.
    pub fn new(engine: FormEngine) -> Self {
        Self {
            engine,
            tab: WizardTab::default(),
        }
    }

    /// Returns the active tab.
    pub fn tab(&self) -> WizardTab {
        self.tab
    }

    /// Returns the engine, for field reads and the advisory gate.
    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    /// Returns the engine mutably, for routing form-control events.
    pub fn engine_mut(&mut self) -> &mut FormEngine {
        &mut self.engine
    }

    /// Jumps directly to any tab. Never gated.
    pub fn go_to(&mut self, tab: WizardTab) {
        self.tab = tab;
    }

    /// Moves to the next tab, if there is one. Returns the new tab.
    pub fn continue_forward(&mut self) -> WizardTab {
        if let Some(next) = self.tab.next() {
            self.tab = next;
        }
        self.tab
    }

    /// Moves to the previous tab, if there is one. Returns the new tab.
    pub fn go_back(&mut self) -> WizardTab {
        if let Some(previous) = self.tab.previous() {
            self.tab = previous;
        }
        self.tab
    }

    /// Submits the document. Reachable from any tab.
    ///
    /// When the completeness gate passes, the serialized document is handed
    /// back for the external create-study collaborator and the session
    /// resets to a fresh document on the overview tab. When it fails, the
    /// session is left exactly as it was and the error carries the full
    /// missing-fields list.
    pub fn submit(&mut self) -> Result<serde_json::Value, IncompleteSubmission> {
        let missing = self.engine.missing_fields();
        if !missing.is_empty() {
            return Err(IncompleteSubmission { missing });
        }

        let submitted = self.engine.document().to_json();
        self.engine.reset();
        self.tab = WizardTab::default();
        Ok(submitted)
    }
}
