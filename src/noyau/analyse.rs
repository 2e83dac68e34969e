// src/noyau/analyse.rs
//
// Point d'entrée de l'analyse : texte brut -> Analyse
// ---------------------------------------------------
// Pipeline : réécriture -> jetons -> RPN -> Expr
//
// Le signe '=' partitionne :
//   - 0 fois  => Expression
//   - 1 fois  => Equation(gauche, droite), chaque côté analysé séparément
//   - 2+ fois => EgalitesMultiples (refusé AVANT toute analyse de membre)

use super::erreurs::Erreur;
use super::expr::Expr;
use super::jetons::tokenize;
use super::reecriture::normalise;
use super::rpn::{from_rpn, to_rpn};

#[derive(Clone, Debug, PartialEq)]
pub enum Analyse {
    Expression(Expr),
    Equation(Expr, Expr),
}

/// Analyse un texte brut (tel que saisi) en expression ou équation.
pub fn analyse(texte: &str) -> Result<Analyse, Erreur> {
    if texte.trim().is_empty() {
        return Err(Erreur::EntreeVide);
    }

    let morceaux: Vec<&str> = texte.split('=').collect();
    match morceaux.len() {
        1 => Ok(Analyse::Expression(analyse_membre(morceaux[0])?)),
        2 => {
            let gauche = analyse_membre(morceaux[0])?;
            let droite = analyse_membre(morceaux[1])?;
            Ok(Analyse::Equation(gauche, droite))
        }
        _ => Err(Erreur::EgalitesMultiples),
    }
}

/// Analyse un membre (un côté d'équation, ou l'expression entière).
fn analyse_membre(texte: &str) -> Result<Expr, Erreur> {
    if texte.trim().is_empty() {
        return Err(Erreur::EntreeVide);
    }
    let propre = normalise(texte);
    let toks = tokenize(&propre)?;
    if toks.is_empty() {
        return Err(Erreur::EntreeVide);
    }
    from_rpn(&to_rpn(&toks)?)
}

#[cfg(test)]
mod tests {
    use super::{analyse, Analyse};
    use crate::noyau::erreurs::Erreur;
    use crate::noyau::expr::Expr;

    #[test]
    fn expression_sans_egal() {
        match analyse("2+3").unwrap() {
            Analyse::Expression(e) => assert_eq!(e.simplify(), Expr::rat_i64(5, 1)),
            _ => panic!("attendu une expression"),
        }
    }

    #[test]
    fn equation_un_egal() {
        match analyse("2x+3=11").unwrap() {
            Analyse::Equation(g, d) => {
                assert_eq!(g.to_string(), "((2*x)+3)");
                assert_eq!(d.simplify(), Expr::rat_i64(11, 1));
            }
            _ => panic!("attendu une équation"),
        }
    }

    #[test]
    fn deux_egal_refuses() {
        assert_eq!(analyse("2*x+3=5=7"), Err(Erreur::EgalitesMultiples));
        // refusé même si les membres sont invalides
        assert_eq!(analyse("=="), Err(Erreur::EgalitesMultiples));
    }

    #[test]
    fn membre_vide_refuse() {
        assert_eq!(analyse(""), Err(Erreur::EntreeVide));
        assert_eq!(analyse("   "), Err(Erreur::EntreeVide));
        assert_eq!(analyse("2+3="), Err(Erreur::EntreeVide));
        assert_eq!(analyse("=5"), Err(Erreur::EntreeVide));
    }

    #[test]
    fn reecriture_appliquee_avant_analyse() {
        // 5(2+3) => 5*(2+3)
        match analyse("5(2+3)").unwrap() {
            Analyse::Expression(e) => {
                assert_eq!(e.simplify().canon(), Expr::rat_i64(25, 1))
            }
            _ => panic!("attendu une expression"),
        }
    }
}
