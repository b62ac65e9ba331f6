//! CEFR levels handled by the service and the instruction text sent for each.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persona sent as the system message of every chat call.
pub const SYSTEM_PROMPT: &str =
    "Tu es un expert en français spécialisé dans la simplification de textes pour les apprenants.";

const A1_TEMPLATE: &str = "Tu es un expert en français qui simplifie les textes pour les apprenants.
Simplifie le texte suivant au niveau A1 (Débutant):
- Utilise uniquement le présent
- Utilise un vocabulaire très simple et courant
- Garde les phrases très courtes et basiques
- Utilise des connecteurs simples (et, mais, parce que)
IMPORTANT: Garde le texte en français, ne traduis pas.
Texte à simplifier: ";

const A2_TEMPLATE: &str = "Tu es un expert en français qui simplifie les textes pour les apprenants.
Simplifie le texte suivant au niveau A2 (Élémentaire):
- Utilise le présent et le passé composé
- Utilise un vocabulaire courant avec quelques expressions basiques
- Garde les phrases simples avec des propositions subordonnées basiques
- Utilise des connecteurs courants (puis, alors, donc)
IMPORTANT: Garde le texte en français, ne traduis pas.
Texte à simplifier: ";

const B1_TEMPLATE: &str = "Tu es un expert en français qui simplifie les textes pour les apprenants.
Simplifie le texte suivant au niveau B1 (Intermédiaire):
- Utilise les temps courants (présent, passé composé, imparfait)
- Utilise un vocabulaire de niveau intermédiaire
- Permets une complexité modérée des phrases
- Utilise des connecteurs variés
IMPORTANT: Garde le texte en français, ne traduis pas.
Texte à simplifier: ";

const B2_TEMPLATE: &str = "Tu es un expert en français qui simplifie les textes pour les apprenants.
Adapte le texte suivant au niveau B2 (Intermédiaire supérieur):
- Garde la plupart des temps mais simplifie les constructions complexes
- Maintiens le vocabulaire sophistiqué quand le contexte est clair
- Préserve le sens en rendant la structure plus claire
- Garde les bons éléments stylistiques
IMPORTANT: Garde le texte en français, ne traduis pas.
Texte à simplifier: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    A1,
    A2,
    B1,
    B2,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown proficiency level: {0}")]
pub struct UnknownLevel(pub String);

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 4] = [Self::A1, Self::A2, Self::B1, Self::B2];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Self::A1 => A1_TEMPLATE,
            Self::A2 => A2_TEMPLATE,
            Self::B1 => B1_TEMPLATE,
            Self::B2 => B2_TEMPLATE,
        }
    }

    /// Template followed by the raw text, nothing inserted between them.
    pub fn build_prompt(self, text: &str) -> String {
        let template = self.template();
        let mut prompt = String::with_capacity(template.len() + text.len());
        prompt.push_str(template);
        prompt.push_str(text);
        prompt
    }
}

impl FromStr for ProficiencyLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "B1" => Ok(Self::B1),
            "B2" => Ok(Self::B2),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_only() {
        for level in ProficiencyLevel::ALL {
            assert_eq!(level.as_str().parse::<ProficiencyLevel>(), Ok(level));
        }
        for bad in ["C1", "a1", "", " A1", "B3"] {
            assert!(bad.parse::<ProficiencyLevel>().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn every_template_keeps_output_in_french() {
        for level in ProficiencyLevel::ALL {
            let template = level.template();
            assert!(template.contains(level.as_str()));
            assert!(template.contains("ne traduis pas"));
            assert!(template.ends_with("Texte à simplifier: "));
        }
    }

    #[test]
    fn prompt_is_template_then_text() {
        let prompt = ProficiencyLevel::B1.build_prompt("Le chat mange.");
        assert_eq!(prompt, format!("{B1_TEMPLATE}Le chat mange."));
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&ProficiencyLevel::A2).unwrap();
        assert_eq!(json, "\"A2\"");
    }
}
