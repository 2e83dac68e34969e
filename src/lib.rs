//! Calculatrice scolaire — noyau exact
//!
//! Bibliothèque sans UI : l'interface (formulaires, boutons, thème) est un
//! collaborateur externe qui envoie une chaîne brute et relit une
//! `ValeurAffichee`. Tout le travail algorithmique vit dans `noyau` :
//!
//! - réécriture de la multiplication implicite (`5(2+3)`, `2x`, `xy`)
//! - analyse expression / équation (un seul `=` autorisé)
//! - conversion degrés → radians sur les arguments trigonométriques
//! - moteur exact (rationnels, √, angles spéciaux coeff·π)
//! - résolution (degré ≤ 2, systèmes 2×2), dérivée, primitive
//! - normalisation du résultat (entier exact, décimal arrondi, symbolique)

pub mod noyau;

pub use noyau::affichage::{formate_resultat, ValeurAffichee, DECIMALES, TOLERANCE_ENTIER};
pub use noyau::analyse::{analyse, Analyse};
pub use noyau::angles::{en_radians_si_degres, ModeAngle};
pub use noyau::erreurs::{Categorie, Erreur};
pub use noyau::eval::{
    derive, evaluer, evaluer_avec, evaluer_exact, factorise, integre, resoudre, resoudre_systeme,
    simplifie,
};
pub use noyau::expr::{Expr, Fonction};
pub use noyau::reecriture::normalise;
