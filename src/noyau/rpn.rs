// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name ∈ table Fonction (sin, cos, ..., ceiling) => fonction unaire
//    - si name ∈ {x, y, z} => variable ; "e" => constante d'Euler
//    - sinon => IdentifiantInconnu (table FERMÉE : aucune évaluation
//      dynamique, c'est l'invariant de sécurité de l'analyseur)
// - Moins unaire:
//    - si '-' arrive quand on n'attend PAS une valeur, on injecte 0 : "-x" => "0 x -"
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sont sorties après la parenthèse fermante.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreurs::Erreur;
use super::expr::{est_variable_autorisee, Expr, Fonction};
use super::jetons::Tok;

/// Garde-fou sur l'exposant (évite les 2^10^9 qui gèlent la machine).
const MAX_EXPOSANT: i64 = 10_000;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn est_fonction(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, Erreur> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if est_fonction(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    // variable / constante : sortie directe
                    // (la validation du nom se fait à la reconstruction)
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                let mut ouvrante_trouvee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_trouvee = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_trouvee {
                    return Err(Erreur::ParentheseInattendue);
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Ident(name)) = ops.last() {
                    if est_fonction(name.as_str()) {
                        out.push(ops.pop().unwrap());
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Tok::Ident(name) = top {
                        if est_fonction(name.as_str()) {
                            break;
                        }
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Minus => {
                // moins unaire : si pas de valeur avant, injecte 0
                if !prev_was_value {
                    out.push(Tok::Num(BigRational::zero()));
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Tok::Ident(name) = top {
                        if est_fonction(name.as_str()) {
                            break;
                        }
                    }
                    if precedence(top) >= precedence(&Tok::Minus) {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(Tok::Minus);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(Erreur::ParentheseNonFermee);
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN.
///
/// - Ident(name):
///     - si name ∈ table Fonction => application unaire
///     - si name ∈ {x,y,z} => Expr::Var ; "e" => Expr::E
///     - sinon => IdentifiantInconnu (porte le jeton fautif)
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, Erreur> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push(Expr::Rat(r)),
            Tok::Pi => st.push(Expr::Pi),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(Erreur::ExpressionInvalide)?;
                let a = st.pop().ok_or(Erreur::ExpressionInvalide)?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => {
                        // exposant entier seulement (2^3^2 : l'exposant se replie d'abord)
                        let n = match b.simplify() {
                            Expr::Rat(r) => {
                                if !r.denom().is_one() {
                                    return Err(Erreur::ExposantNonEntier);
                                }
                                let n = big_to_i64(r.numer()).ok_or(Erreur::ExposantTropGrand)?;
                                // SAFE: borne l'exposant (2^10000 suffit largement à l'école)
                                if n.abs() > MAX_EXPOSANT {
                                    return Err(Erreur::ExposantTropGrand);
                                }
                                n
                            }
                            _ => return Err(Erreur::ExposantNonEntier),
                        };
                        Expr::PowInt(Box::new(a), n)
                    }
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(name.as_str()) {
                    let x = st.pop().ok_or(Erreur::FonctionSansArgument(name))?;
                    st.push(Expr::Fct(f, Box::new(x)));
                } else if name == "e" {
                    st.push(Expr::E);
                } else if est_variable_autorisee(&name) {
                    st.push(Expr::Var(name));
                } else {
                    return Err(Erreur::IdentifiantInconnu(name));
                }
            }

            Tok::LPar | Tok::RPar => return Err(Erreur::ExpressionInvalide),
        }
    }

    if st.len() != 1 {
        return Err(Erreur::ExpressionInvalide);
    }
    Ok(st.pop().unwrap())
}

/// Conversion SAFE vers i64 (exposant doit rentrer dans i64, sinon on refuse).
fn big_to_i64(x: &BigInt) -> Option<i64> {
    x.to_string().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{from_rpn, to_rpn};
    use crate::noyau::erreurs::Erreur;
    use crate::noyau::expr::{Expr, Fonction};
    use crate::noyau::jetons::tokenize;

    fn construit(s: &str) -> Result<Expr, Erreur> {
        let toks = tokenize(s)?;
        from_rpn(&to_rpn(&toks)?)
    }

    #[test]
    fn expression_simple() {
        let e = construit("2*x+3").unwrap();
        assert_eq!(e.simplify().to_string(), "((2*x)+3)");
    }

    #[test]
    fn fonction_et_precedence() {
        // sin(pi/2) : la fonction reste collée à son argument
        let e = construit("sin(pi/2)").unwrap();
        assert!(matches!(e, Expr::Fct(Fonction::Sin, _)));

        // 2+3*4 = 14
        assert_eq!(construit("2+3*4").unwrap().simplify(), Expr::rat_i64(14, 1));

        // exposant associatif à droite : 2^3^2 = 2^9 = 512
        assert_eq!(
            construit("2^3^2").unwrap().simplify(),
            Expr::rat_i64(512, 1)
        );
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(construit("-3+5").unwrap().simplify(), Expr::rat_i64(2, 1));
        assert_eq!(
            construit("-(1+2)").unwrap().simplify().canon(),
            Expr::rat_i64(-3, 1)
        );
    }

    #[test]
    fn identifiant_inconnu_refuse() {
        // table fermée : pas de nom arbitraire
        assert_eq!(
            construit("foo(2)"),
            Err(Erreur::IdentifiantInconnu("foo".into()))
        );
        assert_eq!(construit("w+1"), Err(Erreur::IdentifiantInconnu("w".into())));
    }

    #[test]
    fn parentheses_desequilibrees() {
        assert_eq!(construit("(1+2"), Err(Erreur::ParentheseNonFermee));
        assert_eq!(construit("1+2)"), Err(Erreur::ParentheseInattendue));
    }

    #[test]
    fn exposant_doit_etre_entier() {
        assert_eq!(construit("2^x"), Err(Erreur::ExposantNonEntier));
        assert_eq!(construit("2^0.5"), Err(Erreur::ExposantNonEntier));
    }

    #[test]
    fn operande_manquant() {
        assert_eq!(construit("2+"), Err(Erreur::ExpressionInvalide));
        assert_eq!(construit("*2"), Err(Erreur::ExpressionInvalide));
    }
}
