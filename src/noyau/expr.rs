// src/noyau/expr.rs
//
// AST exact (sans flottants).
// - Rat : rationnel exact
// - Pi, E : constantes symboliques
// - Indefini : résultat exact indéfini (ex: tan(π/2))
// - Var : variable symbolique (x, y, z)
// - Fct : application d'une fonction de la table fermée (sin, sqrt, log, ...)
//
// IMPORTANT (SAFE):
// - simplify() ne doit jamais "inventer" une valeur pour Var.
// - La table Fonction est fermée : aucun autre nom ne construit un noeud.

use crate::noyau::canon::canon_expr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::fmt;

/// Table fermée des fonctions reconnues. C'est la SEULE porte d'entrée :
/// l'analyseur ne construit jamais d'appel hors de cette liste.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Log, // logarithme népérien (alias "ln")
    Exp,
    Abs,
    Floor,
    Ceil, // alias "ceiling"
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        Some(match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "sqrt" => Sqrt,
            "log" | "ln" => Log,
            "exp" => Exp,
            "abs" => Abs,
            "floor" => Floor,
            "ceiling" | "ceil" => Ceil,
            _ => return None,
        })
    }

    pub fn nom(&self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Sqrt => "sqrt",
            Log => "log",
            Exp => "exp",
            Abs => "abs",
            Floor => "floor",
            Ceil => "ceiling",
        }
    }

    /// sin/cos/tan : conversion degrés -> radians sur l'ARGUMENT.
    pub fn est_trig_directe(&self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }

    /// asin/acos/atan : conversion radians -> degrés sur le RÉSULTAT.
    pub fn est_trig_inverse(&self) -> bool {
        matches!(self, Fonction::Asin | Fonction::Acos | Fonction::Atan)
    }
}

/// Variables autorisées (table fermée, comme les fonctions).
pub fn est_variable_autorisee(nom: &str) -> bool {
    matches!(nom, "x" | "y" | "z")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,
    Indefini, // ex: tan(pi/2)

    Var(String),

    Fct(Fonction, Box<Expr>),
    PowInt(Box<Expr>, i64), // x^n (n entier)

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn rat_i64(n: i64, d: i64) -> Expr {
        Expr::Rat(BigRational::new(BigInt::from(n), BigInt::from(d)))
    }

    pub fn zero() -> Expr {
        Expr::Rat(BigRational::zero())
    }

    /// Canonicalisation forte (déterminisme structurel).
    /// On garde la canonisation hors de l'AST pour éviter les règles cachées.
    pub fn canon(self) -> Expr {
        canon_expr(self)
    }

    /// Simplification locale (SAFE), sans heuristiques.
    /// Objectif: réduire ce qui est strictement démontrable sans exploser l'arbre.
    /// La trig spéciale (angles coeff·π) est appliquée ailleurs (voir eval.rs).
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            // Feuilles: aucune simplification à faire
            Rat(_) | Pi | E | Indefini | Var(_) => self,

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Indefini, _) | (_, Indefini) => Indefini,
                    (Rat(x), Rat(y)) => Rat(x + y),
                    (Rat(x), _) if x.is_zero() => b,
                    (_, Rat(y)) if y.is_zero() => a,
                    _ => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // x - x => 0 (renforce la normalisation ; jamais sur indéfini)
                if a == b && !matches!(a, Indefini) {
                    return Rat(BigRational::zero());
                }

                match (&a, &b) {
                    (Indefini, _) | (_, Indefini) => Indefini,
                    (Rat(x), Rat(y)) => Rat(x - y),
                    (_, Rat(y)) if y.is_zero() => a,
                    (Rat(x), _) if x.is_zero() => {
                        // 0 - b => on garde Sub(0,b) (utile pour signes / rendu / coeff·π)
                        Sub(Box::new(Rat(BigRational::zero())), Box::new(b))
                    }
                    _ => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if matches!(a, Indefini) || matches!(b, Indefini) {
                    return Indefini;
                }

                // √x * √x => x ; √u * √v => √(u*v) si u,v rationnels >= 0
                if let (Fct(Fonction::Sqrt, x), Fct(Fonction::Sqrt, y)) = (&a, &b) {
                    if x.as_ref() == y.as_ref() {
                        return (*x.clone()).simplify();
                    }
                    if let (Rat(ru), Rat(rv)) = (x.as_ref(), y.as_ref()) {
                        if !ru.is_negative() && !rv.is_negative() {
                            return Fct(Fonction::Sqrt, Box::new(Rat(ru.clone() * rv.clone())))
                                .simplify();
                        }
                    }
                }

                // (√x / k) * √x => x / k (et symétrique)
                if let (Div(p, q), Fct(Fonction::Sqrt, y)) = (&a, &b) {
                    if let (Fct(Fonction::Sqrt, x), Rat(k)) = (p.as_ref(), q.as_ref()) {
                        if x.as_ref() == y.as_ref() {
                            return Div(
                                Box::new((*x.clone()).simplify()),
                                Box::new(Rat(k.clone())),
                            )
                            .simplify();
                        }
                    }
                }
                if let (Fct(Fonction::Sqrt, y), Div(p, q)) = (&a, &b) {
                    if let (Fct(Fonction::Sqrt, x), Rat(k)) = (p.as_ref(), q.as_ref()) {
                        if x.as_ref() == y.as_ref() {
                            return Div(
                                Box::new((*x.clone()).simplify()),
                                Box::new(Rat(k.clone())),
                            )
                            .simplify();
                        }
                    }
                }

                // (√x / k) * (√x / m) => x / (k*m)
                if let (Div(p1, q1), Div(p2, q2)) = (&a, &b) {
                    if let (Fct(Fonction::Sqrt, x1), Rat(k)) = (p1.as_ref(), q1.as_ref()) {
                        if let (Fct(Fonction::Sqrt, x2), Rat(m)) = (p2.as_ref(), q2.as_ref()) {
                            if x1.as_ref() == x2.as_ref() {
                                let km = k.clone() * m.clone();
                                return Div(Box::new((*x1.clone()).simplify()), Box::new(Rat(km)))
                                    .simplify();
                            }
                        }
                    }
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x * y),
                    (Rat(x), _) if x.is_zero() => Rat(BigRational::zero()),
                    (_, Rat(y)) if y.is_zero() => Rat(BigRational::zero()),
                    (Rat(x), _) if x.is_one() => b,
                    (_, Rat(y)) if y.is_one() => a,
                    _ => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if matches!(a, Indefini) || matches!(b, Indefini) {
                    return Indefini;
                }

                // division par zéro : on reste symbolique ici (approx signalera l'erreur)
                if let Rat(y) = &b {
                    if y.is_zero() {
                        return Div(Box::new(a), Box::new(b));
                    }
                }

                // √x / √x => 1 (si x rationnel non nul)
                if let (Fct(Fonction::Sqrt, x), Fct(Fonction::Sqrt, y)) = (&a, &b) {
                    if x.as_ref() == y.as_ref() {
                        if let Rat(r) = x.as_ref() {
                            if !r.is_zero() {
                                return Rat(BigRational::one());
                            }
                        }
                    }
                    // √u / √v => √(u/v) si u,v rationnels > 0
                    if let (Rat(ru), Rat(rv)) = (x.as_ref(), y.as_ref()) {
                        if ru.is_positive() && rv.is_positive() {
                            return Fct(Fonction::Sqrt, Box::new(Rat(ru.clone() / rv.clone())))
                                .simplify();
                        }
                    }
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x / y),
                    (_, Rat(y)) if y.is_one() => a,

                    // (p/q) / √n  => (p/qn) * √n, si n entier > 0 (rationalisation)
                    (Rat(x), Fct(Fonction::Sqrt, inner)) => {
                        if let Rat(rn) = &**inner {
                            if rn.is_positive() && rn.denom().is_one() {
                                let n = rn.clone(); // entier
                                let x_over_n = x.clone() / n.clone();
                                return Mul(
                                    Box::new(Rat(x_over_n)),
                                    Box::new(Fct(Fonction::Sqrt, Box::new(Rat(n)))),
                                )
                                .simplify();
                            }
                        }
                        Div(Box::new(a), Box::new(b))
                    }

                    _ => Div(Box::new(a), Box::new(b)),
                }
            }

            PowInt(base, n) => {
                let base = base.simplify();
                if matches!(base, Indefini) {
                    return Indefini;
                }
                if n == 0 {
                    return Rat(BigRational::one());
                }
                if let Rat(r) = &base {
                    return Rat(rational_pow_int(r.clone(), n));
                }
                PowInt(Box::new(base), n)
            }

            Fct(f, x) => {
                let x = x.simplify();
                if matches!(x, Indefini) {
                    return Indefini;
                }
                simplifie_fonction(f, x)
            }
        }
    }

    /// Détecte un coeff·π (Add/Sub/Mul/Div rationnels autour de π).
    /// Itératif avec garde-fous ; SAFE: si ça sort du domaine, retourne None.
    pub fn as_coeff_pi(&self) -> Option<BigRational> {
        use Expr::*;

        const MAX_PILE: usize = 8192;
        const MAX_NOEUDS: usize = 200_000;

        #[derive(Copy, Clone)]
        enum Marque<'a> {
            Entrer(&'a Expr),
            Sortir(&'a Expr),
        }

        let mut pile: Vec<Marque<'_>> = Vec::with_capacity(64);
        let mut res: Vec<Option<BigRational>> = Vec::with_capacity(64);

        pile.push(Marque::Entrer(self));

        let mut visites: usize = 0;

        while let Some(m) = pile.pop() {
            visites += 1;
            if visites > MAX_NOEUDS {
                return None;
            }
            if pile.len() > MAX_PILE {
                return None;
            }

            match m {
                Marque::Entrer(e) => {
                    pile.push(Marque::Sortir(e));
                    match e {
                        Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                            pile.push(Marque::Entrer(b.as_ref()));
                            pile.push(Marque::Entrer(a.as_ref()));
                        }
                        _ => {}
                    }
                }

                Marque::Sortir(e) => match e {
                    Pi => res.push(Some(BigRational::one())),
                    Rat(_) | E | Indefini | Var(_) => res.push(None),

                    // On refuse de "pousser" coeff·π à travers fonctions/puissances.
                    Fct(_, _) | PowInt(_, _) => res.push(None),

                    Add(_, _) => {
                        let rb = res.pop().unwrap_or(None);
                        let ra = res.pop().unwrap_or(None);
                        match (ra, rb) {
                            (Some(a), Some(b)) => res.push(Some(a + b)),
                            _ => res.push(None),
                        }
                    }

                    Sub(a, _b) => {
                        let rb = res.pop().unwrap_or(None);
                        let ra = res.pop().unwrap_or(None);

                        // Sub(0, x) => -coeff(x)
                        if let Rat(r0) = a.as_ref() {
                            if r0.is_zero() {
                                if let Some(cb) = rb {
                                    res.push(Some(-cb));
                                    continue;
                                }
                            }
                        }

                        match (ra, rb) {
                            (Some(a), Some(b)) => res.push(Some(a - b)),
                            _ => res.push(None),
                        }
                    }

                    Mul(_, _) => {
                        let rb = res.pop().unwrap_or(None);
                        let ra = res.pop().unwrap_or(None);

                        match (ra, rb) {
                            (Some(c), None) => {
                                if let Mul(a, b) = e {
                                    if let Rat(r) = b.as_ref() {
                                        res.push(Some(c * r.clone()));
                                    } else if let Rat(r) = a.as_ref() {
                                        res.push(Some(c * r.clone()));
                                    } else {
                                        res.push(None);
                                    }
                                } else {
                                    res.push(None);
                                }
                            }
                            (None, Some(c)) => {
                                if let Mul(a, b) = e {
                                    if let Rat(r) = a.as_ref() {
                                        res.push(Some(c * r.clone()));
                                    } else if let Rat(r) = b.as_ref() {
                                        res.push(Some(c * r.clone()));
                                    } else {
                                        res.push(None);
                                    }
                                } else {
                                    res.push(None);
                                }
                            }
                            // coeff·π * coeff·π => π² (hors domaine)
                            _ => res.push(None),
                        }
                    }

                    Div(_, _) => {
                        let rb = res.pop().unwrap_or(None);
                        let ra = res.pop().unwrap_or(None);

                        match (ra, rb) {
                            (Some(c), None) => {
                                if let Div(_a, b) = e {
                                    if let Rat(r) = b.as_ref() {
                                        if r.is_zero() {
                                            res.push(None);
                                        } else {
                                            res.push(Some(c / r.clone()));
                                        }
                                    } else {
                                        res.push(None);
                                    }
                                } else {
                                    res.push(None);
                                }
                            }
                            _ => res.push(None),
                        }
                    }
                },
            }
        }

        if res.len() == 1 {
            res.pop().unwrap_or(None)
        } else {
            None
        }
    }

    /// Détecte si l'expression contient au moins une variable libre.
    /// Itératif + garde-fous : si l'arbre est trop gros, on retourne true
    /// (SAFE => bloque la lecture décimale).
    pub fn contient_variable(&self) -> bool {
        use Expr::*;

        const MAX_PILE: usize = 8192;
        const MAX_NOEUDS: usize = 200_000;

        let mut pile: Vec<&Expr> = Vec::with_capacity(64);
        pile.push(self);

        let mut visites: usize = 0;

        while let Some(e) = pile.pop() {
            visites += 1;
            if visites > MAX_NOEUDS || pile.len() > MAX_PILE {
                return true;
            }

            match e {
                Var(_) => return true,

                Rat(_) | Pi | E | Indefini => {}

                Fct(_, x) => pile.push(x.as_ref()),
                PowInt(x, _) => pile.push(x.as_ref()),

                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        false
    }

    /// Liste (triée, sans doublon) des variables libres de l'expression.
    pub fn variables(&self) -> Vec<String> {
        use Expr::*;
        fn visite(e: &Expr, out: &mut Vec<String>) {
            match e {
                Var(nom) => {
                    if !out.contains(nom) {
                        out.push(nom.clone());
                    }
                }
                Rat(_) | Pi | E | Indefini => {}
                Fct(_, x) | PowInt(x, _) => visite(x, out),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                    visite(a, out);
                    visite(b, out);
                }
            }
        }
        let mut out = Vec::new();
        visite(self, &mut out);
        out.sort();
        out
    }

    /// Substitue une valeur rationnelle exacte à une variable (copie).
    pub fn substitue(&self, var: &str, valeur: &BigRational) -> Expr {
        use Expr::*;
        match self {
            Var(nom) if nom == var => Rat(valeur.clone()),
            Rat(_) | Pi | E | Indefini | Var(_) => self.clone(),
            Fct(f, x) => Fct(*f, Box::new(x.substitue(var, valeur))),
            PowInt(x, n) => PowInt(Box::new(x.substitue(var, valeur)), *n),
            Add(a, b) => Add(
                Box::new(a.substitue(var, valeur)),
                Box::new(b.substitue(var, valeur)),
            ),
            Sub(a, b) => Sub(
                Box::new(a.substitue(var, valeur)),
                Box::new(b.substitue(var, valeur)),
            ),
            Mul(a, b) => Mul(
                Box::new(a.substitue(var, valeur)),
                Box::new(b.substitue(var, valeur)),
            ),
            Div(a, b) => Div(
                Box::new(a.substitue(var, valeur)),
                Box::new(b.substitue(var, valeur)),
            ),
        }
    }
}

/// Plis exacts des fonctions sur argument rationnel (SAFE seulement).
/// Les angles spéciaux trig passent par trig_special (eval.rs), pas ici.
fn simplifie_fonction(f: Fonction, x: Expr) -> Expr {
    use Expr::*;
    use Fonction::*;

    match (f, &x) {
        (Sqrt, Rat(r)) => {
            if let Some(s) = rational_sqrt_exact(r) {
                return Rat(s);
            }
            Fct(Sqrt, Box::new(x))
        }
        (Abs, Rat(r)) => Rat(r.abs()),
        (Floor, Rat(r)) => Rat(r.floor()),
        (Ceil, Rat(r)) => Rat(r.ceil()),

        // log(1) = 0, log(e) = 1, exp(0) = 1 : plis exacts sûrs
        (Log, Rat(r)) if r.is_one() => Rat(BigRational::zero()),
        (Log, E) => Rat(BigRational::one()),
        (Exp, Rat(r)) if r.is_zero() => Rat(BigRational::one()),

        _ => Fct(f, Box::new(x)),
    }
}

/* ------------------------ Modulo rationnel exact (sans flottants) ------------------------ */

/// Réduction modulo `periode` sur un coefficient rationnel (ex: periode=2 pour sin/cos, 1 pour tan).
/// Retourne un rationnel dans [0, periode).
///
/// Si coeff = n/d, alors coeff mod periode = (n mod (periode*d))/d.
///
/// SAFE: si periode invalide (devrait pas arriver), retourne coeff inchangé.
pub(crate) fn mod_rationnel(coeff: &BigRational, periode: i64) -> BigRational {
    if periode <= 0 {
        return coeff.clone();
    }
    if coeff.is_zero() {
        return BigRational::zero();
    }

    let d = coeff.denom().clone(); // denom > 0 (num_rational)
    if d.is_zero() {
        return coeff.clone();
    }

    let n = coeff.numer().clone();

    let p = BigInt::from(periode);
    let m = &p * &d; // periode*d  (m > 0)

    let r = mod_euclid_bigint(&n, &m);
    BigRational::new(r, d)
}

fn mod_euclid_bigint(a: &BigInt, m: &BigInt) -> BigInt {
    if m.is_zero() {
        return a.clone();
    }
    let mut r = a % m;
    if r.is_negative() {
        r += m;
    }
    r
}

/* ------------------------ Affichage debug (pas "joli" final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Pi => write!(f, "π"),
            E => write!(f, "e"),
            Indefini => write!(f, "indéfini"),
            Var(s) => write!(f, "{s}"),
            Fct(g, x) => write!(f, "{}({x})", g.nom()),
            PowInt(x, n) => write!(f, "({x})^{n}"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
        }
    }
}

/* ------------------------ Outils rationnels (utilisés par simplify) ------------------------ */

pub(crate) fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base.clone(), -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

pub(crate) fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let n = r.numer();
    let d = r.denom();
    let sn = int_sqrt_exact(n)?;
    let sd = int_sqrt_exact(d)?;
    Some(BigRational::new(sn, sd))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = int_sqrt_floor(x);
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

fn int_sqrt_floor(x: &BigInt) -> BigInt {
    if x.is_zero() {
        return BigInt::zero();
    }
    if x.is_negative() {
        return BigInt::zero();
    }

    let mut y = approx_sqrt_start(x);
    loop {
        let y_next = (&y + (x / &y)) >> 1;
        if y_next >= y {
            let mut z = y_next;
            while (&z + 1u32) * (&z + 1u32) <= *x {
                z += 1u32;
            }
            while &z * &z > *x {
                z -= 1u32;
            }
            return z;
        }
        y = y_next;
    }
}

fn approx_sqrt_start(x: &BigInt) -> BigInt {
    let bits = x.bits();
    let half = bits.div_ceil(2);
    BigInt::one() << half
}

#[cfg(test)]
mod tests {
    use super::{Expr, Fonction};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn rat(n: i64, d: i64) -> Expr {
        Expr::rat_i64(n, d)
    }

    #[test]
    fn simplify_plis_rationnels() {
        let e = Expr::Add(Box::new(rat(1, 2)), Box::new(rat(1, 3)));
        assert_eq!(e.simplify(), rat(5, 6));

        let e = Expr::Mul(Box::new(rat(2, 3)), Box::new(rat(3, 4)));
        assert_eq!(e.simplify(), rat(1, 2));
    }

    #[test]
    fn simplify_sqrt_exacte() {
        let e = Expr::Fct(Fonction::Sqrt, Box::new(rat(25, 1)));
        assert_eq!(e.simplify(), rat(5, 1));

        // √2*√2 = 2
        let s2 = Expr::Fct(Fonction::Sqrt, Box::new(rat(2, 1)));
        let e = Expr::Mul(Box::new(s2.clone()), Box::new(s2));
        assert_eq!(e.simplify(), rat(2, 1));
    }

    #[test]
    fn simplify_plancher_plafond_abs() {
        let e = Expr::Fct(Fonction::Floor, Box::new(rat(7, 2)));
        assert_eq!(e.simplify(), rat(3, 1));
        let e = Expr::Fct(Fonction::Ceil, Box::new(rat(7, 2)));
        assert_eq!(e.simplify(), rat(4, 1));
        let e = Expr::Fct(Fonction::Abs, Box::new(rat(-5, 2)));
        assert_eq!(e.simplify(), rat(5, 2));
    }

    #[test]
    fn coeff_pi_extraction() {
        // (1/6)*π
        let e = Expr::Mul(Box::new(rat(1, 6)), Box::new(Expr::Pi));
        assert_eq!(
            e.as_coeff_pi(),
            Some(BigRational::new(BigInt::from(1), BigInt::from(6)))
        );

        // π/2
        let e = Expr::Div(Box::new(Expr::Pi), Box::new(rat(2, 1)));
        assert_eq!(
            e.as_coeff_pi(),
            Some(BigRational::new(BigInt::from(1), BigInt::from(2)))
        );

        // sin(π) n'est pas un coeff·π
        let e = Expr::Fct(Fonction::Sin, Box::new(Expr::Pi));
        assert_eq!(e.as_coeff_pi(), None);
    }

    #[test]
    fn variables_et_substitution() {
        let e = Expr::Add(
            Box::new(Expr::Mul(
                Box::new(rat(2, 1)),
                Box::new(Expr::Var("x".into())),
            )),
            Box::new(rat(3, 1)),
        );
        assert!(e.contient_variable());
        assert_eq!(e.variables(), vec!["x".to_string()]);

        let v = BigRational::from_integer(BigInt::from(3));
        assert_eq!(e.substitue("x", &v).simplify(), rat(9, 1));
    }

    #[test]
    fn table_fonctions_fermee() {
        assert_eq!(Fonction::depuis_nom("ln"), Some(Fonction::Log));
        assert_eq!(Fonction::depuis_nom("ceiling"), Some(Fonction::Ceil));
        assert_eq!(Fonction::depuis_nom("eval"), None);
        assert_eq!(Fonction::depuis_nom("system"), None);
    }
}
