use super::Room;

/// Glyphs offered when editing a room's icon.
pub const ICON_PALETTE: [&str; 18] = [
    "🛏️", "🧸", "🎀", "🦄", "🛁", "🐥", "🍳", "🛋️", "🧺", "🚗", "🍾", "🚽", "🚻", "🪴", "🖼️", "📚",
    "💻", "✨",
];

const CATALOG: [(&str, &str, &str); 13] = [
    ("ch_parents", "Chambre parents", "🛏️"),
    ("ch_lilian", "Chambre Lilian", "🧸"),
    ("ch_maelys", "Chambre Maëlys", "🎀"),
    ("ch_albane", "Chambre Albane", "🦄"),
    ("sdb_parents", "Salle de bain parents", "🛁"),
    ("sdb_enfants", "Salle de bain enfants", "🐥"),
    ("cuisine", "Cuisine", "🍳"),
    ("salon", "Salon", "🛋️"),
    ("cellier", "Cellier", "🧺"),
    ("garage", "Garage", "🚗"),
    ("cave", "Cave", "🍾"),
    ("wc1", "WC 1", "🚽"),
    ("wc2", "WC 2", "🚻"),
];

/// The house as first installed: every room active and never cleaned.
pub fn initial_rooms() -> Vec<Room> {
    CATALOG
        .iter()
        .map(|(id, name, icon)| Room::new(*id, *name, *icon))
        .collect()
}
