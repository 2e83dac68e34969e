// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// - Syntaxe     : texte malformé (égalités multiples, parenthèses, vide)
// - Identifiant : nom hors de la table fermée (faute de frappe de fonction)
// - Domaine     : opération mathématiquement indéfinie (log(-1), 1/0, ...)
//
// "Aucune solution" n'est PAS une erreur : c'est une ValeurAffichee normale.
// Toutes les erreurs sont récupérées à la frontière du pipeline (eval.rs)
// et converties en ValeurAffichee::Erreur — le noyau ne panique jamais.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Erreur {
    // --- syntaxe ---
    EntreeVide,
    CaractereInattendu(char),
    ParentheseNonFermee,
    ParentheseInattendue,
    ExpressionInvalide,
    EgalitesMultiples,
    FonctionSansArgument(String),
    NombreInvalide(String),
    ExposantNonEntier,
    ExposantTropGrand,

    // --- identifiants ---
    IdentifiantInconnu(String),

    // --- domaine ---
    DivisionParZero,
    RacineDeNegatif,
    LogNonPositif,
    Indefini,
    HorsDomaine(String),
    NonPolynomial,
    DegreNonSupporte(usize),
    SystemeNonLineaire,
    NonDerivable(String),
    ValeurTropGrande,
}

/// Catégorie au sens du contrat d'erreurs du pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Categorie {
    Syntaxe,
    Identifiant,
    Domaine,
}

impl Erreur {
    pub fn categorie(&self) -> Categorie {
        use Erreur::*;
        match self {
            EntreeVide
            | CaractereInattendu(_)
            | ParentheseNonFermee
            | ParentheseInattendue
            | ExpressionInvalide
            | EgalitesMultiples
            | FonctionSansArgument(_)
            | NombreInvalide(_)
            | ExposantNonEntier
            | ExposantTropGrand => Categorie::Syntaxe,

            IdentifiantInconnu(_) => Categorie::Identifiant,

            DivisionParZero
            | RacineDeNegatif
            | LogNonPositif
            | Indefini
            | HorsDomaine(_)
            | NonPolynomial
            | DegreNonSupporte(_)
            | SystemeNonLineaire
            | NonDerivable(_)
            | ValeurTropGrande => Categorie::Domaine,
        }
    }
}

impl fmt::Display for Erreur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Erreur::*;
        match self {
            EntreeVide => write!(f, "entrée vide"),
            CaractereInattendu(c) => write!(f, "caractère inattendu: '{c}'"),
            ParentheseNonFermee => write!(f, "parenthèses non fermées"),
            ParentheseInattendue => write!(f, "parenthèse fermante sans ouvrante"),
            ExpressionInvalide => write!(f, "expression invalide"),
            EgalitesMultiples => write!(f, "plusieurs signes '=' dans l'équation"),
            FonctionSansArgument(nom) => write!(f, "fonction '{nom}' sans argument"),
            NombreInvalide(s) => write!(f, "nombre invalide: '{s}'"),
            ExposantNonEntier => write!(f, "exposant doit être entier"),
            ExposantTropGrand => write!(f, "exposant trop grand"),

            IdentifiantInconnu(nom) => write!(f, "identifiant inconnu: '{nom}'"),

            DivisionParZero => write!(f, "division par zéro"),
            RacineDeNegatif => write!(f, "racine carrée d'un nombre négatif"),
            LogNonPositif => write!(f, "logarithme d'un nombre non positif"),
            Indefini => write!(f, "résultat indéfini"),
            HorsDomaine(s) => write!(f, "hors domaine: {s}"),
            NonPolynomial => write!(f, "expression non polynomiale en la variable"),
            DegreNonSupporte(d) => write!(f, "degré {d} non supporté (degré ≤ 2)"),
            SystemeNonLineaire => write!(f, "système non linéaire en x et y"),
            NonDerivable(nom) => write!(f, "fonction '{nom}' non dérivable ici"),
            ValeurTropGrande => write!(f, "valeur trop grande pour une lecture décimale"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Categorie, Erreur};

    #[test]
    fn categories_coherentes() {
        assert_eq!(Erreur::EgalitesMultiples.categorie(), Categorie::Syntaxe);
        assert_eq!(
            Erreur::IdentifiantInconnu("sim".into()).categorie(),
            Categorie::Identifiant
        );
        assert_eq!(Erreur::DivisionParZero.categorie(), Categorie::Domaine);
    }

    #[test]
    fn messages_porteurs_du_jeton_fautif() {
        let e = Erreur::IdentifiantInconnu("sine".into());
        assert!(e.to_string().contains("sine"));
        let e = Erreur::CaractereInattendu('@');
        assert!(e.to_string().contains('@'));
    }
}
