//! Noyau de calcul scolaire
//!
//! Organisation interne :
//! - erreurs.rs    : taxonomie d'erreurs (syntaxe / identifiant / domaine)
//! - reecriture.rs : multiplication implicite + nettoyage de saisie
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard + construction Expr (table fermée)
//! - expr.rs       : AST exact + simplify + coeff·π
//! - canon.rs      : canonicalisation (ordre, signes, carrés parfaits)
//! - trig.rs       : angles spéciaux + indéfini
//! - analyse.rs    : expression / équation (partition sur '=')
//! - angles.rs     : mode degrés / radians
//! - approx.rs     : évaluation f64 + erreurs de domaine
//! - affichage.rs  : normalisation du résultat (entier / décimal / symbolique)
//! - nombres.rs    : PGCD, PPCM, décimal <-> fraction
//! - resolution.rs : équations (degré ≤ 2), systèmes 2x2, factorisation
//! - derivee.rs    : dérivée + primitive polynomiale
//! - eval.rs       : pipeline complet

pub mod affichage;
pub mod analyse;
pub mod angles;
pub mod approx;
pub mod canon;
pub mod derivee;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod nombres;
pub mod reecriture;
pub mod resolution;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_pipeline;

#[cfg(test)]
mod tests_robustesse;

// API publique minimale
pub use eval::evaluer;
