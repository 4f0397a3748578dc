//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPokemonList { limit: u32 },
    LoadPokemon { id: String },
    /// Abort the in-flight detail request
    CancelPokemon,
}
