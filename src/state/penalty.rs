//! Static penalty reference list offered by the penalty form.

use serde::Serialize;

/// Reference definition for a single penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PenaltyDefinition {
    /// Display name, also sent as the penalty description.
    pub name: &'static str,
    /// Standard yardage assessed.
    pub yards: i32,
    /// Whether the foul is called against the offense.
    pub on_offense: bool,
    /// Whether acceptance grants an automatic first down.
    pub auto_first: bool,
    /// Whether the foul is enforced from the spot.
    pub spot_foul: bool,
    /// Whether the foul carries a loss of down.
    pub loss_of_down: bool,
}

impl PenaltyDefinition {
    const fn new(name: &'static str, yards: i32, on_offense: bool) -> Self {
        Self {
            name,
            yards,
            on_offense,
            auto_first: false,
            spot_foul: false,
            loss_of_down: false,
        }
    }

    const fn auto_first(mut self) -> Self {
        self.auto_first = true;
        self
    }

    const fn spot_foul(mut self) -> Self {
        self.spot_foul = true;
        self
    }

    const fn loss_of_down(mut self) -> Self {
        self.loss_of_down = true;
        self
    }
}

/// Values copied into the penalty form when a catalog entry is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltySelection {
    pub name: String,
    pub yards: i32,
    pub on_offense: bool,
    pub auto_first: bool,
}

impl From<&PenaltyDefinition> for PenaltySelection {
    fn from(definition: &PenaltyDefinition) -> Self {
        Self {
            name: definition.name.to_string(),
            yards: definition.yards,
            on_offense: definition.on_offense,
            auto_first: definition.auto_first,
        }
    }
}

const OFFENSE: bool = true;
const DEFENSE: bool = false;

static PENALTIES: [PenaltyDefinition; 27] = [
    PenaltyDefinition::new("False Start", 5, OFFENSE),
    PenaltyDefinition::new("Holding (Offense)", 10, OFFENSE),
    PenaltyDefinition::new("Holding (Defense)", 5, DEFENSE).auto_first(),
    PenaltyDefinition::new("Pass Interference (Off)", 10, OFFENSE),
    PenaltyDefinition::new("Pass Interference (Def)", 0, DEFENSE)
        .auto_first()
        .spot_foul(),
    PenaltyDefinition::new("Delay of Game", 5, OFFENSE),
    PenaltyDefinition::new("Encroachment", 5, DEFENSE),
    PenaltyDefinition::new("Offsides", 5, DEFENSE),
    PenaltyDefinition::new("Illegal Formation", 5, OFFENSE),
    PenaltyDefinition::new("Illegal Motion", 5, OFFENSE),
    PenaltyDefinition::new("Illegal Shift", 5, OFFENSE),
    PenaltyDefinition::new("Illegal Block in Back", 10, OFFENSE),
    PenaltyDefinition::new("Clipping", 15, OFFENSE),
    PenaltyDefinition::new("Chop Block", 15, OFFENSE),
    PenaltyDefinition::new("Facemask", 15, DEFENSE).auto_first(),
    PenaltyDefinition::new("Roughing the Passer", 15, DEFENSE).auto_first(),
    PenaltyDefinition::new("Roughing the Kicker", 15, DEFENSE).auto_first(),
    PenaltyDefinition::new("Unnecessary Roughness", 15, DEFENSE).auto_first(),
    PenaltyDefinition::new("Unsportsmanlike Conduct", 15, DEFENSE),
    PenaltyDefinition::new("Personal Foul", 15, DEFENSE).auto_first(),
    PenaltyDefinition::new("Horse Collar Tackle", 15, DEFENSE).auto_first(),
    PenaltyDefinition::new("Intentional Grounding", 0, OFFENSE).loss_of_down(),
    PenaltyDefinition::new("Ineligible Receiver", 5, OFFENSE),
    PenaltyDefinition::new("Illegal Contact", 5, DEFENSE).auto_first(),
    PenaltyDefinition::new("Neutral Zone Infraction", 5, DEFENSE),
    PenaltyDefinition::new("Too Many Men on Field", 5, OFFENSE),
    PenaltyDefinition::new("Targeting", 15, DEFENSE).auto_first(),
];

/// Read-only, ordered access to the penalty reference list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PenaltyCatalog;

impl PenaltyCatalog {
    /// Every definition in display order.
    pub fn all(&self) -> &'static [PenaltyDefinition] {
        &PENALTIES
    }

    /// Look up a definition by its position in the list.
    pub fn get(&self, index: usize) -> Option<&'static PenaltyDefinition> {
        PENALTIES.get(index)
    }

    pub fn len(&self) -> usize {
        PENALTIES.len()
    }

    pub fn is_empty(&self) -> bool {
        PENALTIES.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_reference_order() {
        let catalog = PenaltyCatalog;
        assert_eq!(catalog.len(), 27);
        assert_eq!(catalog.get(0).unwrap().name, "False Start");
        assert_eq!(catalog.get(26).unwrap().name, "Targeting");
        assert!(catalog.get(27).is_none());
    }

    #[test]
    fn flags_are_carried_per_entry() {
        let catalog = PenaltyCatalog;
        let dpi = catalog.get(4).unwrap();
        assert!(dpi.auto_first && dpi.spot_foul && !dpi.on_offense);

        let grounding = catalog
            .all()
            .iter()
            .find(|p| p.name == "Intentional Grounding")
            .unwrap();
        assert!(grounding.loss_of_down && grounding.on_offense && !grounding.auto_first);
    }

    #[test]
    fn selection_projects_definition() {
        let selection = PenaltySelection::from(PenaltyCatalog.get(14).unwrap());
        assert_eq!(
            selection,
            PenaltySelection {
                name: "Facemask".into(),
                yards: 15,
                on_offense: false,
                auto_first: true,
            }
        );
    }
}
