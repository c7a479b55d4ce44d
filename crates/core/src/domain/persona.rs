use serde::{Deserialize, Serialize};

/// Specialist persona that can own a conversational turn. `Ceo` is the
/// generalist fallback when no specialist topic is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Ceo,
    Execution,
    Customer,
    Decision,
    Finance,
    Marketing,
    Branding,
    Product,
}

impl Persona {
    pub const ALL: [Persona; 8] = [
        Persona::Ceo,
        Persona::Execution,
        Persona::Customer,
        Persona::Decision,
        Persona::Finance,
        Persona::Marketing,
        Persona::Branding,
        Persona::Product,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ceo => "ceo",
            Self::Execution => "execution",
            Self::Customer => "customer",
            Self::Decision => "decision",
            Self::Finance => "finance",
            Self::Marketing => "marketing",
            Self::Branding => "branding",
            Self::Product => "product",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::Persona;

    #[test]
    fn labels_are_distinct_across_all_personas() {
        let labels: BTreeSet<&str> = Persona::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels.len(), Persona::ALL.len());
    }
}
