use serde::{Deserialize, Serialize};

/// Player entry as embedded by the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Player {
    pub id: u64,
    pub number: u32,
    pub first_name: String,
    pub last_name: String,
    /// Position abbreviation (e.g. `QB`, `WR`, `K`).
    pub position: String,
}

impl Player {
    /// Label used in player pickers: `#12 Tom Brady (QB)`.
    pub fn option_label(&self) -> String {
        format!(
            "#{} {} {} ({})",
            self.number, self.first_name, self.last_name, self.position
        )
    }
}

/// Immutable list of active players, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Players whose position is one of `positions`; an empty filter keeps everyone.
    pub fn filter_by_positions<'a>(
        &'a self,
        positions: &'a [&'a str],
    ) -> impl Iterator<Item = &'a Player> + 'a {
        self.players
            .iter()
            .filter(move |player| positions.is_empty() || positions.contains(&player.position.as_str()))
    }

    /// Player with roster id `id`.
    pub fn find(&self, id: u64) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }
}
