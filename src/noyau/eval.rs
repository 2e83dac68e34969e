//! Noyau — évaluation (pipeline réel)
//!
//! texte -> réécriture -> jetons -> RPN -> Expr -> mode d'angle
//!       -> simplify -> trig spéciale (récursive) -> re-simplify -> canon
//!       -> normalisation du résultat (entier / décimal / symbolique)
//!
//! Toutes les fonctions publiques de ce module récupèrent les erreurs en
//! ValeurAffichee::Erreur : le noyau ne panique jamais sur une saisie.

use num_rational::BigRational;

use super::affichage::{
    format_exact_final, formate_resultat, ValeurAffichee,
};
use super::analyse::{analyse, Analyse};
use super::angles::{en_radians_si_degres, ModeAngle};
use super::derivee::{derive as derive_expr, primitive};
use super::erreurs::Erreur;
use super::expr::Expr;
use super::resolution::{factorise_poly, resout_equation, resout_systeme, Resolution};
use super::trig::{trig_special, TrigOutcome};

/* ------------------------ Pipeline interne ------------------------ */

/// Réduction complète d'un arbre : simplify -> trig spéciale -> re-simplify -> canon.
fn reduit(e: Expr) -> Expr {
    let s = e.simplify();
    applique_trig_speciale(s).simplify().canon()
}

/// Trig spéciale récursive : applique trig_special PARTOUT dans l'arbre.
pub fn applique_trig_speciale(expr: Expr) -> Expr {
    use Expr::*;

    let out = match expr {
        Fct(f, x) if f.est_trig_directe() => match trig_special(&x, f) {
            Some(TrigOutcome::Valeur(v)) => v,
            Some(TrigOutcome::Indefini) => Indefini,
            None => {
                let xx = applique_trig_speciale(*x);
                Fct(f, Box::new(xx))
            }
        },

        Fct(f, x) => {
            let xx = applique_trig_speciale(*x);
            Fct(f, Box::new(xx))
        }

        Add(a, b) => Add(
            Box::new(applique_trig_speciale(*a)),
            Box::new(applique_trig_speciale(*b)),
        ),
        Sub(a, b) => Sub(
            Box::new(applique_trig_speciale(*a)),
            Box::new(applique_trig_speciale(*b)),
        ),
        Mul(a, b) => Mul(
            Box::new(applique_trig_speciale(*a)),
            Box::new(applique_trig_speciale(*b)),
        ),
        Div(a, b) => Div(
            Box::new(applique_trig_speciale(*a)),
            Box::new(applique_trig_speciale(*b)),
        ),
        PowInt(x, n) => PowInt(Box::new(applique_trig_speciale(*x)), n),

        Rat(_) | Pi | E | Indefini | Var(_) => expr,
    };

    // Un seul simplify à la fin.
    out.simplify()
}

/// Choisit la variable d'une équation : exactement une variable libre.
fn variable_unique(e: &Expr) -> Result<String, Erreur> {
    let vars = e.variables();
    match vars.len() {
        0 => Ok("x".to_string()),
        1 => Ok(vars.into_iter().next().unwrap_or_default()),
        _ => Err(Erreur::NonPolynomial),
    }
}

fn resolution_en_affichage(r: Resolution) -> ValeurAffichee {
    match r {
        Resolution::Racines(racines) => {
            ValeurAffichee::Solutions(racines.iter().map(formate_resultat).collect())
        }
        Resolution::Aucune => ValeurAffichee::AucuneSolution,
        Resolution::Infinite => ValeurAffichee::SolutionsInfinies,
    }
}

fn attend_expression(texte: &str) -> Result<Expr, Erreur> {
    match analyse(texte)? {
        Analyse::Expression(e) => Ok(e),
        Analyse::Equation(_, _) => Err(Erreur::ExpressionInvalide),
    }
}

/* ------------------------ API publique ------------------------ */

/// Évalue une saisie : expression => valeur, équation => résolution.
pub fn evaluer(brut: &str, mode: ModeAngle) -> ValeurAffichee {
    match evaluer_interne(brut, mode) {
        Ok(v) => v,
        Err(e) => ValeurAffichee::Erreur(e.to_string()),
    }
}

fn evaluer_interne(brut: &str, mode: ModeAngle) -> Result<ValeurAffichee, Erreur> {
    match analyse(brut)? {
        Analyse::Expression(e) => {
            let e = en_radians_si_degres(&e, mode);
            Ok(formate_resultat(&reduit(e)))
        }
        Analyse::Equation(g, d) => {
            let var = variable_unique(&Expr::Sub(Box::new(g.clone()), Box::new(d.clone())))?;
            let r = resout_equation(&g, &d, &var)?;
            Ok(resolution_en_affichage(r))
        }
    }
}

/// Évalue une expression après substitution var := valeur.
pub fn evaluer_avec(
    brut: &str,
    var: &str,
    valeur: &BigRational,
    mode: ModeAngle,
) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let e = attend_expression(brut)?;
        let e = e.substitue(var, valeur);
        let e = en_radians_si_degres(&e, mode);
        Ok(formate_resultat(&reduit(e)))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/// Forme exacte finale (√2/2, π/2, 5/6...) sans passage en décimal.
pub fn evaluer_exact(brut: &str, mode: ModeAngle) -> Result<String, Erreur> {
    let e = attend_expression(brut)?;
    let e = en_radians_si_degres(&e, mode);
    Ok(format_exact_final(&reduit(e)))
}

/// Simplification symbolique : la forme exacte est préservée (5/6 reste 5/6).
pub fn simplifie(brut: &str) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let c = reduit(attend_expression(brut)?);
        if let Expr::Rat(r) = &c {
            if r.denom() == &num_bigint::BigInt::from(1) {
                return Ok(ValeurAffichee::Entier(r.numer().clone()));
            }
        }
        Ok(ValeurAffichee::Symbolique(format_exact_final(&c)))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/// Factorisation scolaire (degré ≤ 2).
pub fn factorise(brut: &str) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let e = attend_expression(brut)?;
        let var = variable_unique(&e)?;
        Ok(ValeurAffichee::Symbolique(factorise_poly(&e, &var)?))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/// Résout une équation (une expression seule est lue comme "... = 0").
pub fn resoudre(brut: &str) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let (g, d) = match analyse(brut)? {
            Analyse::Equation(g, d) => (g, d),
            Analyse::Expression(e) => (e, Expr::zero()),
        };
        let var = variable_unique(&Expr::Sub(Box::new(g.clone()), Box::new(d.clone())))?;
        let r = resout_equation(&g, &d, &var)?;
        Ok(resolution_en_affichage(r))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/// Résout un système 2x2 en (x, y). Solutions([x, y]) dans cet ordre.
pub fn resoudre_systeme(brut1: &str, brut2: &str) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let (g1, d1) = match analyse(brut1)? {
            Analyse::Equation(g, d) => (g, d),
            Analyse::Expression(e) => (e, Expr::zero()),
        };
        let (g2, d2) = match analyse(brut2)? {
            Analyse::Equation(g, d) => (g, d),
            Analyse::Expression(e) => (e, Expr::zero()),
        };
        let r = resout_systeme(&g1, &d1, &g2, &d2)?;
        Ok(resolution_en_affichage(r))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/// Dérivée par rapport à `var`.
pub fn derive(brut: &str, var: &str) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let e = attend_expression(brut)?;
        let d = derive_expr(&e, var)?;
        Ok(ValeurAffichee::Symbolique(format_exact_final(&d)))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/// Primitive polynomiale par rapport à `var` (constante omise).
pub fn integre(brut: &str, var: &str) -> ValeurAffichee {
    let interne = || -> Result<ValeurAffichee, Erreur> {
        let e = attend_expression(brut)?;
        let prim = primitive(&e, var)?;
        Ok(ValeurAffichee::Symbolique(format_exact_final(&prim)))
    };
    interne().unwrap_or_else(|e| ValeurAffichee::Erreur(e.to_string()))
}

/* ------------------------ Tests ------------------------ */
