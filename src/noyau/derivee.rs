// src/noyau/derivee.rs
//
// Dérivation symbolique (règle de chaîne sur la table de fonctions) et
// primitive polynomiale.
//
// abs/floor/ceiling ne sont pas dérivables partout : refusées franchement
// plutôt que de rendre une dérivée fausse presque partout.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreurs::Erreur;
use super::expr::{Expr, Fonction};
use super::resolution::extrait_poly;

fn rat(n: i64, d: i64) -> Expr {
    Expr::Rat(BigRational::new(BigInt::from(n), BigInt::from(d)))
}

fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(Box::new(a), Box::new(b))
}
fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(Box::new(a), Box::new(b))
}
fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(Box::new(a), Box::new(b))
}
fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(Box::new(a), Box::new(b))
}
fn fct(f: Fonction, x: Expr) -> Expr {
    Expr::Fct(f, Box::new(x))
}
fn pow(x: Expr, n: i64) -> Expr {
    Expr::PowInt(Box::new(x), n)
}

/// Dérive `e` par rapport à `var`.
pub fn derive(e: &Expr, var: &str) -> Result<Expr, Erreur> {
    let d = derive_brut(e, var)?;
    Ok(d.simplify().canon())
}

fn derive_brut(e: &Expr, var: &str) -> Result<Expr, Erreur> {
    match e {
        Expr::Rat(_) | Expr::Pi | Expr::E => Ok(Expr::zero()),
        Expr::Indefini => Ok(Expr::Indefini),

        Expr::Var(nom) => {
            if nom == var {
                Ok(rat(1, 1))
            } else {
                Ok(Expr::zero())
            }
        }

        Expr::Add(a, b) => Ok(add(derive_brut(a, var)?, derive_brut(b, var)?)),
        Expr::Sub(a, b) => Ok(sub(derive_brut(a, var)?, derive_brut(b, var)?)),

        // (uv)' = u'v + uv'
        Expr::Mul(a, b) => {
            let da = derive_brut(a, var)?;
            let db = derive_brut(b, var)?;
            Ok(add(mul(da, (**b).clone()), mul((**a).clone(), db)))
        }

        // (u/v)' = (u'v - uv') / v²
        Expr::Div(a, b) => {
            let da = derive_brut(a, var)?;
            let db = derive_brut(b, var)?;
            let num = sub(mul(da, (**b).clone()), mul((**a).clone(), db));
            Ok(div(num, pow((**b).clone(), 2)))
        }

        // (u^n)' = n·u^(n-1)·u'
        Expr::PowInt(x, n) => {
            if *n == 0 {
                return Ok(Expr::zero());
            }
            let dx = derive_brut(x, var)?;
            Ok(mul(mul(rat(*n, 1), pow((**x).clone(), n - 1)), dx))
        }

        // règle de chaîne : (f(u))' = f'(u)·u'
        Expr::Fct(f, x) => {
            let u = (**x).clone();
            let du = derive_brut(x, var)?;

            let fprime = match f {
                Fonction::Sin => fct(Fonction::Cos, u),
                Fonction::Cos => sub(Expr::zero(), fct(Fonction::Sin, u)),
                Fonction::Tan => add(rat(1, 1), pow(fct(Fonction::Tan, u), 2)),

                Fonction::Asin => div(
                    rat(1, 1),
                    fct(Fonction::Sqrt, sub(rat(1, 1), pow(u, 2))),
                ),
                Fonction::Acos => sub(
                    Expr::zero(),
                    div(
                        rat(1, 1),
                        fct(Fonction::Sqrt, sub(rat(1, 1), pow(u, 2))),
                    ),
                ),
                Fonction::Atan => div(rat(1, 1), add(rat(1, 1), pow(u, 2))),

                Fonction::Sinh => fct(Fonction::Cosh, u),
                Fonction::Cosh => fct(Fonction::Sinh, u),
                Fonction::Tanh => sub(rat(1, 1), pow(fct(Fonction::Tanh, u), 2)),

                Fonction::Sqrt => div(rat(1, 2), fct(Fonction::Sqrt, u)),
                Fonction::Log => div(rat(1, 1), u),
                Fonction::Exp => fct(Fonction::Exp, u),

                Fonction::Abs | Fonction::Floor | Fonction::Ceil => {
                    return Err(Erreur::NonDerivable(f.nom().to_string()));
                }
            };

            Ok(mul(fprime, du))
        }
    }
}

/// Primitive d'un polynôme en `var` (constante d'intégration omise).
pub fn primitive(e: &Expr, var: &str) -> Result<Expr, Erreur> {
    let p = extrait_poly(&e.clone().simplify(), var)?;

    if p.is_empty() {
        return Ok(Expr::zero());
    }

    let mut termes: Vec<Expr> = Vec::new();
    for (i, c) in p.iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        let nouveau = c / BigRational::from_integer(BigInt::from((i + 1) as i64));
        let puissance = (i + 1) as i64;

        let monome = if puissance == 1 {
            if nouveau.is_one() {
                Expr::Var(var.to_string())
            } else {
                mul(Expr::Rat(nouveau), Expr::Var(var.to_string()))
            }
        } else if nouveau.is_one() {
            pow(Expr::Var(var.to_string()), puissance)
        } else {
            mul(Expr::Rat(nouveau), pow(Expr::Var(var.to_string()), puissance))
        };
        termes.push(monome);
    }

    // degré décroissant, comme à l'école
    let mut it = termes.into_iter().rev();
    let premier = it.next().unwrap_or_else(Expr::zero);
    Ok(it.fold(premier, add))
}
