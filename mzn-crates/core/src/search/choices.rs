use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use convert_case::Case;
use convert_case::Casing;

use crate::error::ModelError;

/// Selects which variable to branch on next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableChoice {
    /// In the order of the annotation.
    InputOrder,
    /// The variable with the smallest domain.
    FirstFail,
    /// The variable with the largest domain.
    AntiFirstFail,
    /// The variable with the smallest value in its domain.
    Smallest,
    /// The variable with the largest value in its domain.
    Largest,
    /// The variable occurring in the most constraints.
    Occurrence,
    /// The variable with the smallest domain, breaking ties by the number of constraints.
    MostConstrained,
    /// The variable with the largest difference between its two smallest values.
    MaxRegret,
    /// The variable with the smallest domain divided by its weighted degree.
    DomWDeg,
}

impl VariableChoice {
    const ALL: [VariableChoice; 9] = [
        VariableChoice::InputOrder,
        VariableChoice::FirstFail,
        VariableChoice::AntiFirstFail,
        VariableChoice::Smallest,
        VariableChoice::Largest,
        VariableChoice::Occurrence,
        VariableChoice::MostConstrained,
        VariableChoice::MaxRegret,
        VariableChoice::DomWDeg,
    ];
}

/// Selects how to constrain the chosen variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueChoice {
    IndomainMin,
    IndomainMax,
    IndomainMiddle,
    IndomainMedian,
    Indomain,
    IndomainRandom,
    IndomainSplit,
    IndomainReverseSplit,
    IndomainInterval,
}

impl ValueChoice {
    const ALL: [ValueChoice; 9] = [
        ValueChoice::IndomainMin,
        ValueChoice::IndomainMax,
        ValueChoice::IndomainMiddle,
        ValueChoice::IndomainMedian,
        ValueChoice::Indomain,
        ValueChoice::IndomainRandom,
        ValueChoice::IndomainSplit,
        ValueChoice::IndomainReverseSplit,
        ValueChoice::IndomainInterval,
    ];
}

macro_rules! impl_choice_names {
    ($type:ident, $error:ident) => {
        impl Display for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&format!("{self:?}").to_case(Case::Snake))
            }
        }

        impl FromStr for $type {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $type::ALL
                    .into_iter()
                    .find(|choice| choice.to_string() == s)
                    .ok_or_else(|| ModelError::$error(s.to_owned()))
            }
        }
    };
}

impl_choice_names!(VariableChoice, InvalidVariableChoice);
impl_choice_names!(ValueChoice, InvalidValueChoice);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_use_minizinc_names() {
        assert_eq!("first_fail", VariableChoice::FirstFail.to_string());
        assert_eq!("dom_w_deg", VariableChoice::DomWDeg.to_string());
        assert_eq!("indomain", ValueChoice::Indomain.to_string());
        assert_eq!(
            "indomain_reverse_split",
            ValueChoice::IndomainReverseSplit.to_string()
        );
    }

    #[test]
    fn choices_parse_from_their_names() {
        for choice in VariableChoice::ALL {
            assert_eq!(Ok(choice), choice.to_string().parse().map_err(|_| ()));
        }
        for choice in ValueChoice::ALL {
            assert_eq!(Ok(choice), choice.to_string().parse().map_err(|_| ()));
        }
    }

    #[test]
    fn unknown_choices_are_rejected() {
        assert!(matches!(
            "fastest".parse::<VariableChoice>(),
            Err(ModelError::InvalidVariableChoice(name)) if name == "fastest"
        ));
        assert!(matches!(
            "indomain_best".parse::<ValueChoice>(),
            Err(ModelError::InvalidValueChoice(_))
        ));
    }
}
