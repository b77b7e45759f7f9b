use serde::Deserialize;
use strum::{Display, EnumIter, EnumString, VariantArray};

/// A move in the grid, written in transition tables as `U`, `D`, `L` or `R`
#[derive(
    Deserialize,
    EnumIter,
    VariantArray,
    EnumString,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
)]
pub enum Action {
    #[serde(rename = "U")]
    #[strum(serialize = "U")]
    Up,
    #[serde(rename = "D")]
    #[strum(serialize = "D")]
    Down,
    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Left,
    #[serde(rename = "R")]
    #[strum(serialize = "R")]
    Right,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn action_tokens() {
        let tokens = Action::iter().map(|a| a.to_string()).collect::<Vec<_>>();
        assert_eq!(
            tokens,
            ["U", "D", "L", "R"],
            "Actions ordered and displayed as tokens"
        );

        assert_eq!("L".parse::<Action>().unwrap(), Action::Left);
        assert!("Up".parse::<Action>().is_err(), "Only single letter tokens parse");
    }
}
