// src/noyau/approx.rs
//
// Évaluation approchée (f64)
// --------------------------
// Dernier maillon du pipeline : tout ce que le moteur exact n'a pas su
// réduire (sin(1), log(7), √5...) est évalué en flottant.
//
// Les erreurs de domaine sont typées ici (division par zéro, log non
// positif, racine de négatif...). Une variable libre n'est PAS une erreur
// de calcul : elle signale que le résultat reste symbolique.

use num_traits::ToPrimitive;

use super::erreurs::Erreur;
use super::expr::{Expr, Fonction};

/// Évalue en f64. Err(IdentifiantInconnu) porte le nom de la variable
/// libre rencontrée : l'appelant bascule alors vers l'affichage symbolique.
pub fn approx_f64(e: &Expr) -> Result<f64, Erreur> {
    let v = eval(e)?;
    if !v.is_finite() {
        return Err(Erreur::ValeurTropGrande);
    }
    Ok(v)
}

fn eval(e: &Expr) -> Result<f64, Erreur> {
    match e {
        Expr::Rat(r) => r.to_f64().ok_or(Erreur::ValeurTropGrande),
        Expr::Pi => Ok(std::f64::consts::PI),
        Expr::E => Ok(std::f64::consts::E),
        Expr::Indefini => Err(Erreur::Indefini),
        Expr::Var(nom) => Err(Erreur::IdentifiantInconnu(nom.clone())),

        Expr::Add(a, b) => Ok(eval(a)? + eval(b)?),
        Expr::Sub(a, b) => Ok(eval(a)? - eval(b)?),
        Expr::Mul(a, b) => Ok(eval(a)? * eval(b)?),

        Expr::Div(a, b) => {
            let d = eval(b)?;
            if d == 0.0 {
                return Err(Erreur::DivisionParZero);
            }
            Ok(eval(a)? / d)
        }

        Expr::PowInt(x, n) => {
            let b = eval(x)?;
            if b == 0.0 && *n < 0 {
                return Err(Erreur::DivisionParZero);
            }
            Ok(b.powi(saturate_i32(*n)))
        }

        Expr::Fct(f, x) => {
            let v = eval(x)?;
            match f {
                Fonction::Sin => Ok(v.sin()),
                Fonction::Cos => Ok(v.cos()),
                Fonction::Tan => {
                    let t = v.tan();
                    if !t.is_finite() {
                        return Err(Erreur::Indefini);
                    }
                    Ok(t)
                }

                Fonction::Asin => {
                    if !(-1.0..=1.0).contains(&v) {
                        return Err(Erreur::HorsDomaine("asin".to_string()));
                    }
                    Ok(v.asin())
                }
                Fonction::Acos => {
                    if !(-1.0..=1.0).contains(&v) {
                        return Err(Erreur::HorsDomaine("acos".to_string()));
                    }
                    Ok(v.acos())
                }
                Fonction::Atan => Ok(v.atan()),

                Fonction::Sinh => Ok(v.sinh()),
                Fonction::Cosh => Ok(v.cosh()),
                Fonction::Tanh => Ok(v.tanh()),

                Fonction::Sqrt => {
                    if v < 0.0 {
                        return Err(Erreur::RacineDeNegatif);
                    }
                    Ok(v.sqrt())
                }
                Fonction::Log => {
                    if v <= 0.0 {
                        return Err(Erreur::LogNonPositif);
                    }
                    Ok(v.ln())
                }
                Fonction::Exp => Ok(v.exp()),

                Fonction::Abs => Ok(v.abs()),
                Fonction::Floor => Ok(v.floor()),
                Fonction::Ceil => Ok(v.ceil()),
            }
        }
    }
}

fn saturate_i32(n: i64) -> i32 {
    if n > i32::MAX as i64 {
        i32::MAX
    } else if n < i32::MIN as i64 {
        i32::MIN
    } else {
        n as i32
    }
}

#[cfg(test)]
mod tests {
    use super::approx_f64;
    use crate::noyau::erreurs::Erreur;
    use crate::noyau::expr::{Expr, Fonction};

    fn fct(f: Fonction, x: Expr) -> Expr {
        Expr::Fct(f, Box::new(x))
    }

    #[test]
    fn arithmetique_de_base() {
        let e = Expr::Add(Box::new(Expr::rat_i64(1, 3)), Box::new(Expr::rat_i64(1, 6)));
        assert!((approx_f64(&e).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn erreurs_de_domaine() {
        assert_eq!(
            approx_f64(&fct(Fonction::Sqrt, Expr::rat_i64(-1, 1))),
            Err(Erreur::RacineDeNegatif)
        );
        assert_eq!(
            approx_f64(&fct(Fonction::Log, Expr::zero())),
            Err(Erreur::LogNonPositif)
        );
        assert_eq!(
            approx_f64(&Expr::Div(
                Box::new(Expr::rat_i64(1, 1)),
                Box::new(Expr::zero())
            )),
            Err(Erreur::DivisionParZero)
        );
        assert_eq!(
            approx_f64(&fct(Fonction::Asin, Expr::rat_i64(2, 1))),
            Err(Erreur::HorsDomaine("asin".to_string()))
        );
    }

    #[test]
    fn variable_libre_signalee() {
        let e = Expr::Add(
            Box::new(Expr::Var("x".to_string())),
            Box::new(Expr::rat_i64(1, 1)),
        );
        assert_eq!(
            approx_f64(&e),
            Err(Erreur::IdentifiantInconnu("x".to_string()))
        );
    }

    #[test]
    fn constantes() {
        assert!((approx_f64(&Expr::Pi).unwrap() - std::f64::consts::PI).abs() < 1e-15);
        assert!((approx_f64(&Expr::E).unwrap() - std::f64::consts::E).abs() < 1e-15);
    }
}
