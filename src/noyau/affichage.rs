// src/noyau/affichage.rs
//
// Normalisation du résultat pour l'affichage
// ------------------------------------------
// Politique (FIXE, documentée ici, appliquée partout) :
// - TOLERANCE_ENTIER = 1e-9 : une approximation à moins de 1e-9 d'un entier
//   est affichée comme cet entier.
// - DECIMALES = 4 : sinon, décimal à 4 décimales fixes.
// - Un rationnel de dénominateur 1 est un entier exact (pas de passage f64).
// - Une expression à variable libre reste symbolique (affichage "joli").
// - Les ensembles de solutions sont normalisés élément par élément, ordre et
//   multiplicité préservés (racine double affichée deux fois).
// - Cette fonction ne panique jamais : tout échec interne dégrade vers
//   Erreur(message) ou vers la forme symbolique.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::approx::approx_f64;
use super::erreurs::Erreur;
use super::expr::{Expr, Fonction};

/// Écart absolu maximal à l'entier le plus proche pour "accrocher" un entier.
pub const TOLERANCE_ENTIER: f64 = 1e-9;

/// Nombre de décimales fixes pour l'affichage décimal.
pub const DECIMALES: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum ValeurAffichee {
    Entier(BigInt),
    Decimal(String),
    Symbolique(String),
    Solutions(Vec<ValeurAffichee>),
    AucuneSolution,
    SolutionsInfinies,
    Erreur(String),
}

impl fmt::Display for ValeurAffichee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValeurAffichee::Entier(n) => write!(f, "{n}"),
            ValeurAffichee::Decimal(s) => write!(f, "{s}"),
            ValeurAffichee::Symbolique(s) => write!(f, "{s}"),
            ValeurAffichee::Solutions(vs) => {
                let morceaux: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", morceaux.join(", "))
            }
            ValeurAffichee::AucuneSolution => write!(f, "aucune solution"),
            ValeurAffichee::SolutionsInfinies => write!(f, "infinité de solutions"),
            ValeurAffichee::Erreur(m) => write!(f, "erreur : {m}"),
        }
    }
}

/// Normalise un résultat (déjà simplifié/canonisé) pour l'affichage.
pub fn formate_resultat(e: &Expr) -> ValeurAffichee {
    if matches!(e, Expr::Indefini) {
        return ValeurAffichee::Erreur(Erreur::Indefini.to_string());
    }

    // Entier exact : pas de détour par f64
    if let Expr::Rat(r) = e {
        if r.denom().is_one() {
            return ValeurAffichee::Entier(r.numer().clone());
        }
    }

    match approx_f64(e) {
        Ok(v) => formate_f64(v),
        // variable libre => on reste symbolique
        Err(Erreur::IdentifiantInconnu(_)) => {
            ValeurAffichee::Symbolique(format_expr_pretty(e))
        }
        Err(err) => ValeurAffichee::Erreur(err.to_string()),
    }
}

/// Applique la politique d'accrochage entier + arrondi fixe à un f64.
pub fn formate_f64(v: f64) -> ValeurAffichee {
    let proche = v.round();
    if (v - proche).abs() <= TOLERANCE_ENTIER && proche.abs() < 9.0e15 {
        return ValeurAffichee::Entier(BigInt::from(proche as i64));
    }
    ValeurAffichee::Decimal(format!("{v:.prec$}", prec = DECIMALES))
}

/* ------------------------ Affichage exact "joli" ------------------------ */

fn format_rat_pretty(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

fn format_sqrt_of_int(n: &BigInt) -> String {
    format!("√{n}")
}

/// (p/q)*√n -> p√n/q ; √n/q si p=1 ; -√n/q si p=-1
fn format_mul_rat_sqrt(r: &BigRational, n: &BigInt) -> String {
    let p = r.numer();
    let q = r.denom();

    if p.is_zero() {
        return "0".to_string();
    }

    if p == &BigInt::one() {
        if q.is_one() {
            return format_sqrt_of_int(n);
        }
        return format!("{}/{}", format_sqrt_of_int(n), q);
    }

    if p == &BigInt::from(-1) {
        if q.is_one() {
            return format!("-{}", format_sqrt_of_int(n));
        }
        return format!("-{}/{}", format_sqrt_of_int(n), q);
    }

    if q.is_one() {
        return format!("{p}{}", format_sqrt_of_int(n));
    }
    format!("{p}{}/{}", format_sqrt_of_int(n), q)
}

/// Reconnaît √(entier) et renvoie cet entier si oui.
fn as_sqrt_of_int(e: &Expr) -> Option<&BigInt> {
    if let Expr::Fct(Fonction::Sqrt, inner) = e {
        if let Expr::Rat(r) = inner.as_ref() {
            if r.denom().is_one() {
                return Some(r.numer());
            }
        }
    }
    None
}

/// Reconnaît (Rat r)·√(entier) ou √(entier)·(Rat r). Renvoie (r, n) si oui.
fn as_mul_rat_sqrt(e: &Expr) -> Option<(BigRational, BigInt)> {
    if let Expr::Mul(a, b) = e {
        if let (Expr::Rat(r), Some(n)) = (a.as_ref(), as_sqrt_of_int(b.as_ref())) {
            return Some((r.clone(), n.clone()));
        }
        if let (Some(n), Expr::Rat(r)) = (as_sqrt_of_int(a.as_ref()), b.as_ref()) {
            return Some((r.clone(), n.clone()));
        }
    }
    None
}

fn is_zero_expr(e: &Expr) -> bool {
    matches!(e, Expr::Rat(r) if r.is_zero())
}

fn needs_parens_for_unary_minus(e: &Expr) -> bool {
    matches!(e, Expr::Add(_, _) | Expr::Sub(_, _))
}

/// coeff·π : affichage joli (π/2, 3π/2, -2π, etc.)
pub fn format_coeff_pi(coeff: &BigRational) -> String {
    let n = coeff.numer();
    let d = coeff.denom();

    if coeff.is_zero() {
        return "0".to_string();
    }

    if d.is_one() && (n == &BigInt::one() || n == &BigInt::from(-1)) {
        return if n == &BigInt::one() {
            "π".to_string()
        } else {
            "-π".to_string()
        };
    }

    if d.is_one() {
        return format!("{n}π");
    }

    if n == &BigInt::one() {
        return format!("π/{d}");
    }
    if n == &BigInt::from(-1) {
        return format!("-π/{d}");
    }

    format!("{n}π/{d}")
}

/// Formate l'expression exacte, en privilégiant une sortie lisible :
/// - √2/2, √3/3, -√2/2, etc.
/// - évite les parenthèses lourdes quand possible
pub fn format_expr_pretty(e: &Expr) -> String {
    use Expr::*;

    match e {
        Indefini => "indéfini".to_string(),

        Rat(r) => format_rat_pretty(r),
        Pi => "π".to_string(),
        E => "e".to_string(),
        Var(s) => s.clone(),

        // √2, √3, etc. si argument entier
        Fct(Fonction::Sqrt, x) => match &**x {
            Rat(r) if r.denom().is_one() => format_sqrt_of_int(r.numer()),
            _ => format!("√({})", format_expr_pretty(x)),
        },

        Fct(g, x) => format!("{}({})", g.nom(), format_expr_pretty(x)),

        PowInt(x, n) => format!("({})^{n}", format_expr_pretty(x)),

        // cas joli : (p/q)·√n => p√n/q (donc √2/2, √3/3, etc.)
        Mul(a, b) => {
            if let (Rat(r), Fct(Fonction::Sqrt, inner)) = (&**a, &**b) {
                if let Rat(nr) = &**inner {
                    if nr.denom().is_one() {
                        return format_mul_rat_sqrt(r, nr.numer());
                    }
                }
            }
            if let (Fct(Fonction::Sqrt, inner), Rat(r)) = (&**a, &**b) {
                if let Rat(nr) = &**inner {
                    if nr.denom().is_one() {
                        return format_mul_rat_sqrt(r, nr.numer());
                    }
                }
            }

            format!("({}*{})", format_expr_pretty(a), format_expr_pretty(b))
        }

        // a/b : on renforce les cas "√.../k" et "(p/q)·√.../k"
        Div(a, b) => {
            if let Rat(rden) = &**b {
                if rden.denom().is_one() {
                    let k = rden.numer();

                    // √n / k -> √n/k
                    if let Some(n) = as_sqrt_of_int(a.as_ref()) {
                        return format!("{}/{}", format_sqrt_of_int(n), k);
                    }

                    // ((p/q)·√n) / k -> p√n/(qk)
                    if let Some((r, n)) = as_mul_rat_sqrt(a.as_ref()) {
                        let rk = r / BigRational::from_integer(k.clone());
                        return format_mul_rat_sqrt(&rk, &n);
                    }

                    let sa = format_expr_pretty(a);
                    return format!("{sa}/{}", k);
                }
            }

            let sa = format_expr_pretty(a);
            format!("{sa}/{}", format_expr_pretty(b))
        }

        Add(a, b) => format!("({}+{})", format_expr_pretty(a), format_expr_pretty(b)),

        // 0 - x => -x (rendu propre)
        Sub(a, b) => {
            if is_zero_expr(a) {
                let sb = format_expr_pretty(b);
                if needs_parens_for_unary_minus(b) {
                    format!("-({sb})")
                } else {
                    format!("-{sb}")
                }
            } else {
                format!("({}-{})", format_expr_pretty(a), format_expr_pretty(b))
            }
        }
    }
}

/// Forme exacte finale : si l'expression est de la forme coeff·π, affichage π
/// joli. Sinon, format_expr_pretty.
pub fn format_exact_final(expr_simplifie: &Expr) -> String {
    if matches!(expr_simplifie, Expr::Indefini) {
        return "indéfini".to_string();
    }
    if let Some(c) = expr_simplifie.as_coeff_pi() {
        return format_coeff_pi(&c);
    }
    format_expr_pretty(expr_simplifie)
}
