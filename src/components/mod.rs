pub mod pokemon_detail;
pub mod pokemon_list;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use pokemon_detail::{PokemonDetailView, PokemonDetailViewProps};
pub use pokemon_list::{PokemonList, PokemonListProps};

use ratatui::style::Color;

pub(crate) const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const ACCENT_RED: Color = Color::Rgb(224, 96, 96);

pub const EMPTY_STATE: &str = "No Pokémon found";
pub const NOT_FOUND: &str = "Pokémon not found";
