use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// One user-togglable view flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFlag {
    PropBank,
    VerbNet,
    Modifiers,
    Semantics,
    OptionsPanel,
    FunctionalView,
}

impl ViewFlag {
    pub const ALL: [ViewFlag; 6] = [
        ViewFlag::PropBank,
        ViewFlag::VerbNet,
        ViewFlag::Modifiers,
        ViewFlag::Semantics,
        ViewFlag::OptionsPanel,
        ViewFlag::FunctionalView,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PropBank => "PropBank",
            Self::VerbNet => "VerbNet",
            Self::Modifiers => "Modifiers",
            Self::Semantics => "Semantics",
            Self::OptionsPanel => "View options",
            Self::FunctionalView => "Functional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewToggles {
    pub show_prop_bank: bool,
    pub show_verb_net: bool,
    pub show_modifiers: bool,
    pub show_semantics: bool,
    pub show_options_panel: bool,
    pub functional_view: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            show_prop_bank: true,
            show_verb_net: true,
            show_modifiers: true,
            show_semantics: true,
            show_options_panel: false,
            functional_view: true,
        }
    }
}

impl ViewToggles {
    pub fn get(&self, flag: ViewFlag) -> bool {
        match flag {
            ViewFlag::PropBank => self.show_prop_bank,
            ViewFlag::VerbNet => self.show_verb_net,
            ViewFlag::Modifiers => self.show_modifiers,
            ViewFlag::Semantics => self.show_semantics,
            ViewFlag::OptionsPanel => self.show_options_panel,
            ViewFlag::FunctionalView => self.functional_view,
        }
    }

    fn slot(&mut self, flag: ViewFlag) -> &mut bool {
        match flag {
            ViewFlag::PropBank => &mut self.show_prop_bank,
            ViewFlag::VerbNet => &mut self.show_verb_net,
            ViewFlag::Modifiers => &mut self.show_modifiers,
            ViewFlag::Semantics => &mut self.show_semantics,
            ViewFlag::OptionsPanel => &mut self.show_options_panel,
            ViewFlag::FunctionalView => &mut self.functional_view,
        }
    }

    pub fn toggle(&mut self, flag: ViewFlag) {
        let slot = self.slot(flag);
        *slot = !*slot;
    }

    pub fn set(&mut self, flag: ViewFlag, value: bool) {
        *self.slot(flag) = value;
    }
}
