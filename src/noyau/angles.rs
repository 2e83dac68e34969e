// src/noyau/angles.rs
//
// Mode d'angle (degrés / radians)
// -------------------------------
// En mode degrés, on réécrit l'arbre AVANT simplification :
// - sin/cos/tan : si l'argument se réduit à un rationnel pur (sans π, sans
//   variable), il est lu comme des degrés => arg devient (arg/180)·π.
//   Ainsi sin(30) => sin((1/6)·π), que la table d'angles spéciaux reconnaît.
// - asin/acos/atan : le résultat (en radians) est converti en degrés
//   => f(x) devient f(x)·(180/π).
//
// Un argument qui contient π ou une variable est laissé tel quel :
// sin(pi/6) garde son sens radians même en mode degrés.

use num_bigint::BigInt;
use num_rational::BigRational;

use super::expr::Expr;

fn cent_quatre_vingts() -> BigRational {
    BigRational::from_integer(BigInt::from(180))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeAngle {
    Degres,
    Radians,
}

/// Réécrit l'arbre pour le mode degrés. En mode radians, identité.
pub fn en_radians_si_degres(e: &Expr, mode: ModeAngle) -> Expr {
    if mode == ModeAngle::Radians {
        return e.clone();
    }
    convertit(e)
}

fn convertit(e: &Expr) -> Expr {
    match e {
        Expr::Fct(f, x) => {
            let x2 = convertit(x);

            if f.est_trig_directe() {
                // degrés -> radians, seulement si l'argument est un rationnel pur
                if let Expr::Rat(r) = x2.clone().simplify() {
                    let radians = Expr::Mul(
                        Box::new(Expr::Rat(r / cent_quatre_vingts())),
                        Box::new(Expr::Pi),
                    );
                    return Expr::Fct(*f, Box::new(radians));
                }
                return Expr::Fct(*f, Box::new(x2));
            }

            if f.est_trig_inverse() {
                // résultat radians -> degrés : f(x)·(180/π)
                let en_degres = Expr::Mul(
                    Box::new(Expr::Fct(*f, Box::new(x2))),
                    Box::new(Expr::Div(
                        Box::new(Expr::Rat(cent_quatre_vingts())),
                        Box::new(Expr::Pi),
                    )),
                );
                return en_degres;
            }

            Expr::Fct(*f, Box::new(x2))
        }

        Expr::PowInt(x, n) => Expr::PowInt(Box::new(convertit(x)), *n),
        Expr::Add(a, b) => Expr::Add(Box::new(convertit(a)), Box::new(convertit(b))),
        Expr::Sub(a, b) => Expr::Sub(Box::new(convertit(a)), Box::new(convertit(b))),
        Expr::Mul(a, b) => Expr::Mul(Box::new(convertit(a)), Box::new(convertit(b))),
        Expr::Div(a, b) => Expr::Div(Box::new(convertit(a)), Box::new(convertit(b))),

        _ => e.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{en_radians_si_degres, ModeAngle};
    use crate::noyau::analyse::{analyse, Analyse};
    use crate::noyau::expr::Expr;

    fn expr(s: &str) -> Expr {
        match analyse(s).unwrap() {
            Analyse::Expression(e) => e,
            _ => panic!("attendu une expression"),
        }
    }

    #[test]
    fn sin_30_degres_devient_pi_sur_6() {
        let e = en_radians_si_degres(&expr("sin(30)"), ModeAngle::Degres);
        // sin((1/6)·π)
        match e {
            Expr::Fct(_, arg) => {
                assert_eq!(
                    *arg,
                    Expr::Mul(Box::new(Expr::rat_i64(1, 6)), Box::new(Expr::Pi))
                );
            }
            _ => panic!("attendu sin(...)"),
        }
    }

    #[test]
    fn argument_avec_pi_intouche() {
        // sin(pi/6) reste en radians même en mode degrés
        let e = expr("sin(pi/6)");
        assert_eq!(en_radians_si_degres(&e, ModeAngle::Degres), e);
    }

    #[test]
    fn argument_avec_variable_intouche() {
        let e = expr("sin(x)");
        assert_eq!(en_radians_si_degres(&e, ModeAngle::Degres), e);
    }

    #[test]
    fn mode_radians_identite() {
        let e = expr("sin(30)+cos(x)");
        assert_eq!(en_radians_si_degres(&e, ModeAngle::Radians), e);
    }

    #[test]
    fn trig_inverse_convertie_en_sortie() {
        // asin(0.5) en degrés : asin(1/2)·(180/π)
        let e = en_radians_si_degres(&expr("asin(0.5)"), ModeAngle::Degres);
        match e {
            Expr::Mul(gauche, droite) => {
                assert!(matches!(*gauche, Expr::Fct(_, _)));
                assert!(matches!(*droite, Expr::Div(_, _)));
            }
            _ => panic!("attendu un produit"),
        }
    }

    #[test]
    fn conversion_en_profondeur() {
        // imbrication : cos(60) dans une somme
        let e = en_radians_si_degres(&expr("cos(60)+sin(30)"), ModeAngle::Degres);
        let v = crate::noyau::eval::applique_trig_speciale(e.simplify())
            .simplify()
            .canon();
        assert_eq!(v, Expr::rat_i64(1, 1));
    }
}
