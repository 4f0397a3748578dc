//! Display rules for detail fields

use crate::state::{PokemonAbility, PokemonStat};

pub const MOVES_SHOWN: usize = 10;
pub const HIDDEN_ABILITY_NOTE: &str = "(Hidden Ability)";

/// Height in metres; the API reports decimetres
pub fn format_height(height: u16) -> String {
    format!("{} m", f64::from(height) / 10.0)
}

/// First [`MOVES_SHOWN`] move names joined by ", "
pub fn moves_preview(moves: &[String]) -> String {
    moves
        .iter()
        .take(MOVES_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn ability_label(ability: &PokemonAbility) -> String {
    if ability.is_hidden {
        format!("{} {HIDDEN_ABILITY_NOTE}", ability.name)
    } else {
        ability.name.clone()
    }
}

pub fn stat_line(stat: &PokemonStat) -> String {
    let effort = if stat.effort > 0 {
        format!("  EV +{}", stat.effort)
    } else {
        String::new()
    };
    format!("{}: {}{effort}", stat.name, stat.base_value)
}

pub fn base_experience(value: Option<u32>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "--".to_string())
}

pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_height_is_divided_by_ten() {
        assert_eq!(format_height(7), "0.7 m");
        assert_eq!(format_height(10), "1 m");
        assert_eq!(format_height(69), "6.9 m");
        assert_eq!(format_height(0), "0 m");
    }

    #[test]
    fn test_moves_preview_truncates() {
        let moves: Vec<String> = (1..=14).map(|idx| format!("move-{idx}")).collect();
        assert_eq!(
            moves_preview(&moves),
            "move-1, move-2, move-3, move-4, move-5, move-6, move-7, move-8, move-9, move-10"
        );
    }

    #[test]
    fn test_moves_preview_short_and_empty() {
        let moves = vec!["tackle".to_string(), "growl".to_string()];
        assert_eq!(moves_preview(&moves), "tackle, growl");
        assert_eq!(moves_preview(&[]), "");
    }

    #[test]
    fn test_hidden_annotation_only_on_hidden() {
        let hidden = PokemonAbility {
            name: "chlorophyll".into(),
            is_hidden: true,
        };
        let visible = PokemonAbility {
            name: "overgrow".into(),
            is_hidden: false,
        };
        assert_eq!(ability_label(&hidden), "chlorophyll (Hidden Ability)");
        assert_eq!(ability_label(&visible), "overgrow");
    }

    #[test]
    fn test_stat_line_shows_effort_when_present() {
        let hp = PokemonStat {
            name: "hp".into(),
            base_value: 45,
            effort: 0,
        };
        let special = PokemonStat {
            name: "special-attack".into(),
            base_value: 65,
            effort: 1,
        };
        assert_eq!(stat_line(&hp), "hp: 45");
        assert_eq!(stat_line(&special), "special-attack: 65  EV +1");
    }

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("mr-mime"), "Mr Mime");
        assert_eq!(format_name("bulbasaur"), "Bulbasaur");
        assert_eq!(base_experience(None), "--");
        assert_eq!(base_experience(Some(64)), "64");
    }
}
