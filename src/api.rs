//! PokéAPI client

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ExplorerConfig;
use crate::error::ApiError;
use crate::state::{
    CryRefs, PokemonAbility, PokemonDetail, PokemonStat, PokemonSummary, SpriteRefs,
};

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    base_experience: Option<u32>,
    height: u16,
    abilities: Vec<PokemonAbilitySlot>,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    moves: Vec<PokemonMoveSlot>,
    sprites: serde_json::Value,
    cries: Option<PokemonCries>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    effort: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonCries {
    latest: Option<String>,
    legacy: Option<String>,
}

/// Thin async client over the list and detail endpoints
#[derive(Clone, Debug)]
pub struct PokeClient {
    http: reqwest::Client,
    base: String,
}

impl PokeClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        let base: String = api_base.into();
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn fetch_pokemon_list(&self, limit: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.base);
        let response: ListResponse = self.fetch_json(&url).await?;
        let entries: Vec<PokemonSummary> = response
            .results
            .into_iter()
            .map(|entry| PokemonSummary::new(entry.name, entry.url))
            .collect();
        tracing::info!(count = entries.len(), "pokemon list loaded");
        Ok(entries)
    }

    pub async fn try_fetch_pokemon(&self, id: &str) -> Result<PokemonDetail, ApiError> {
        let url = format!("{}/pokemon/{id}", self.base);
        let response: PokemonResponse = self.fetch_json(&url).await?;
        Ok(detail_from_response(response))
    }

    /// Fetch one record; any failure yields `None`
    pub async fn fetch_pokemon(&self, id: &str) -> Option<PokemonDetail> {
        match self.try_fetch_pokemon(id).await {
            Ok(detail) => Some(detail),
            Err(err) if err.is_not_found() => {
                tracing::info!(id, "pokemon not found");
                None
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "pokemon fetch failed");
                None
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn detail_from_response(response: PokemonResponse) -> PokemonDetail {
    let abilities = response
        .abilities
        .into_iter()
        .map(|slot| PokemonAbility {
            name: slot.ability.name,
            is_hidden: slot.is_hidden,
        })
        .collect();
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            base_value: slot.base_stat,
            effort: slot.effort,
        })
        .collect();
    let moves = response
        .moves
        .into_iter()
        .map(|slot| slot.move_info.name)
        .collect();

    PokemonDetail {
        id: response.id,
        name: response.name,
        base_experience: response.base_experience,
        height: response.height,
        abilities,
        types,
        stats,
        moves,
        sprites: SpriteRefs {
            front_default: pointer_string(&response.sprites, "/front_default"),
            front_shiny: pointer_string(&response.sprites, "/front_shiny"),
        },
        cries: CryRefs {
            latest: response.cries.as_ref().and_then(|cries| cries.latest.clone()),
            legacy: response.cries.as_ref().and_then(|cries| cries.legacy.clone()),
        },
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
