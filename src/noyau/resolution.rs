// src/noyau/resolution.rs
//
// Résolution exacte
// -----------------
// - Extraction polynomiale dense (coeffs rationnels, index = degré)
// - Équations de degré ≤ 2 (racines exactes, discriminant sous radical)
// - Systèmes linéaires 2x2 (Cramer), avec distinction :
//     det = 0 et lignes proportionnelles  => infinité de solutions
//     det = 0 sinon                       => aucune solution
// - Factorisation scolaire de degré ≤ 2 sur les racines rationnelles
//
// SAFE: le degré est plafonné (MAX_DEGRE) pour que la convolution des
// produits ne parte pas en explosion sur (x+1)^grand.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreurs::Erreur;
use super::expr::{rational_sqrt_exact, Expr, Fonction};
use super::nombres::fraction_en_texte;

/// Garde-fou sur le degré des polynômes manipulés.
pub const MAX_DEGRE: usize = 64;

/// Issue d'une résolution (équation ou système).
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Racines exactes, ordre croissant, multiplicité préservée
    /// (racine double listée deux fois).
    Racines(Vec<Expr>),
    Aucune,
    Infinite,
}

/* ------------------------ Extraction polynomiale ------------------------ */

/// Extrait les coefficients de `e` vu comme polynôme en `var`.
/// coeffs[i] = coefficient de var^i ; le vecteur est débarrassé de ses
/// zéros de tête (coeffs vide = polynôme nul).
pub fn extrait_poly(e: &Expr, var: &str) -> Result<Vec<BigRational>, Erreur> {
    let p = extrait(e, var)?;
    Ok(tronque(p))
}

fn constante(r: BigRational) -> Vec<BigRational> {
    vec![r]
}

fn extrait(e: &Expr, var: &str) -> Result<Vec<BigRational>, Erreur> {
    match e {
        Expr::Rat(r) => Ok(constante(r.clone())),

        Expr::Var(nom) if nom == var => Ok(vec![BigRational::zero(), BigRational::one()]),

        // autre variable, π, e, fonction : pas un polynôme rationnel en `var`
        Expr::Var(_) | Expr::Pi | Expr::E | Expr::Fct(_, _) | Expr::Indefini => {
            Err(Erreur::NonPolynomial)
        }

        Expr::Add(a, b) => Ok(ajoute(&extrait(a, var)?, &extrait(b, var)?)),
        Expr::Sub(a, b) => {
            let nb: Vec<BigRational> = extrait(b, var)?.into_iter().map(|c| -c).collect();
            Ok(ajoute(&extrait(a, var)?, &nb))
        }

        Expr::Mul(a, b) => multiplie(&extrait(a, var)?, &extrait(b, var)?),

        Expr::Div(a, b) => {
            // division par une constante rationnelle non nulle seulement
            let pb = extrait(b, var)?;
            let pb = tronque(pb);
            match pb.len() {
                0 => Err(Erreur::DivisionParZero),
                1 => {
                    let d = &pb[0];
                    if d.is_zero() {
                        return Err(Erreur::DivisionParZero);
                    }
                    Ok(extrait(a, var)?.into_iter().map(|c| c / d).collect())
                }
                _ => Err(Erreur::NonPolynomial),
            }
        }

        Expr::PowInt(x, n) => {
            if *n < 0 {
                // constante^(-n) reste une constante ; sinon refus
                let px = tronque(extrait(x, var)?);
                if px.len() <= 1 {
                    let base = px.into_iter().next().unwrap_or_else(BigRational::zero);
                    if base.is_zero() {
                        return Err(Erreur::DivisionParZero);
                    }
                    let mut acc = BigRational::one();
                    for _ in 0..(-n) {
                        acc = acc / base.clone();
                    }
                    return Ok(constante(acc));
                }
                return Err(Erreur::NonPolynomial);
            }

            let px = extrait(x, var)?;
            let mut acc = constante(BigRational::one());
            for _ in 0..*n {
                acc = multiplie(&acc, &px)?;
            }
            Ok(acc)
        }
    }
}

fn ajoute(a: &[BigRational], b: &[BigRational]) -> Vec<BigRational> {
    let n = a.len().max(b.len());
    let mut out = vec![BigRational::zero(); n];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] += c;
    }
    out
}

fn multiplie(a: &[BigRational], b: &[BigRational]) -> Result<Vec<BigRational>, Erreur> {
    let a = tronque(a.to_vec());
    let b = tronque(b.to_vec());
    if a.is_empty() || b.is_empty() {
        return Ok(Vec::new());
    }

    let deg = (a.len() - 1) + (b.len() - 1);
    if deg > MAX_DEGRE {
        return Err(Erreur::DegreNonSupporte(deg));
    }

    let mut out = vec![BigRational::zero(); deg + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            out[i + j] += ca * cb;
        }
    }
    Ok(out)
}

fn tronque(mut p: Vec<BigRational>) -> Vec<BigRational> {
    while p.last().is_some_and(|c| c.is_zero()) {
        p.pop();
    }
    p
}

/* ------------------------ Équation de degré ≤ 2 ------------------------ */

/// Résout gauche = droite pour `var` (polynôme de degré ≤ 2).
pub fn resout_equation(gauche: &Expr, droite: &Expr, var: &str) -> Result<Resolution, Erreur> {
    let diff = Expr::Sub(Box::new(gauche.clone()), Box::new(droite.clone()));
    let p = extrait_poly(&diff.simplify(), var)?;

    match p.len() {
        // 0 = 0
        0 => Ok(Resolution::Infinite),
        // c = 0 avec c ≠ 0
        1 => Ok(Resolution::Aucune),

        // bx + c = 0
        2 => {
            let racine = -&p[0] / &p[1];
            Ok(Resolution::Racines(vec![Expr::Rat(racine)]))
        }

        // ax² + bx + c = 0
        3 => {
            let a = &p[2];
            let b = &p[1];
            let c = &p[0];

            let disc = b * b - BigRational::from_integer(BigInt::from(4)) * a * c;

            if disc.is_negative() {
                return Ok(Resolution::Aucune);
            }

            let deux_a = BigRational::from_integer(BigInt::from(2)) * a;

            if disc.is_zero() {
                // racine double, listée deux fois
                let r = Expr::Rat(-b / &deux_a);
                return Ok(Resolution::Racines(vec![r.clone(), r]));
            }

            // discriminant carré parfait => racines rationnelles triées
            if let Some(rac) = rational_sqrt_exact(&disc) {
                let r1 = (-b - &rac) / &deux_a;
                let r2 = (-b + &rac) / &deux_a;
                let (petite, grande) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
                return Ok(Resolution::Racines(vec![
                    Expr::Rat(petite),
                    Expr::Rat(grande),
                ]));
            }

            // sinon racines exactes sous radical : (-b ± √disc)/(2a)
            let sqrt_disc = Expr::Fct(Fonction::Sqrt, Box::new(Expr::Rat(disc)));
            let moins = Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Rat(-b.clone())),
                    Box::new(sqrt_disc.clone()),
                )),
                Box::new(Expr::Rat(deux_a.clone())),
            );
            let plus = Expr::Div(
                Box::new(Expr::Add(
                    Box::new(Expr::Rat(-b.clone())),
                    Box::new(sqrt_disc),
                )),
                Box::new(Expr::Rat(deux_a)),
            );
            Ok(Resolution::Racines(vec![
                moins.simplify().canon(),
                plus.simplify().canon(),
            ]))
        }

        n => Err(Erreur::DegreNonSupporte(n - 1)),
    }
}

/* ------------------------ Système linéaire 2x2 ------------------------ */

/// Forme linéaire a·x + b·y + k.
struct Lin {
    x: BigRational,
    y: BigRational,
    k: BigRational,
}

fn lin_constante(r: BigRational) -> Lin {
    Lin {
        x: BigRational::zero(),
        y: BigRational::zero(),
        k: r,
    }
}

fn est_constante(l: &Lin) -> bool {
    l.x.is_zero() && l.y.is_zero()
}

fn extrait_lin(e: &Expr) -> Result<Lin, Erreur> {
    match e {
        Expr::Rat(r) => Ok(lin_constante(r.clone())),

        Expr::Var(nom) if nom == "x" => Ok(Lin {
            x: BigRational::one(),
            y: BigRational::zero(),
            k: BigRational::zero(),
        }),
        Expr::Var(nom) if nom == "y" => Ok(Lin {
            x: BigRational::zero(),
            y: BigRational::one(),
            k: BigRational::zero(),
        }),

        Expr::Add(a, b) => {
            let (la, lb) = (extrait_lin(a)?, extrait_lin(b)?);
            Ok(Lin {
                x: la.x + lb.x,
                y: la.y + lb.y,
                k: la.k + lb.k,
            })
        }
        Expr::Sub(a, b) => {
            let (la, lb) = (extrait_lin(a)?, extrait_lin(b)?);
            Ok(Lin {
                x: la.x - lb.x,
                y: la.y - lb.y,
                k: la.k - lb.k,
            })
        }

        Expr::Mul(a, b) => {
            let (la, lb) = (extrait_lin(a)?, extrait_lin(b)?);
            // produit autorisé seulement si un facteur est constant
            if est_constante(&la) {
                Ok(Lin {
                    x: &la.k * &lb.x,
                    y: &la.k * &lb.y,
                    k: &la.k * &lb.k,
                })
            } else if est_constante(&lb) {
                Ok(Lin {
                    x: &lb.k * &la.x,
                    y: &lb.k * &la.y,
                    k: &lb.k * &la.k,
                })
            } else {
                Err(Erreur::SystemeNonLineaire)
            }
        }

        Expr::Div(a, b) => {
            let (la, lb) = (extrait_lin(a)?, extrait_lin(b)?);
            if !est_constante(&lb) {
                return Err(Erreur::SystemeNonLineaire);
            }
            if lb.k.is_zero() {
                return Err(Erreur::DivisionParZero);
            }
            Ok(Lin {
                x: la.x / &lb.k,
                y: la.y / &lb.k,
                k: la.k / &lb.k,
            })
        }

        Expr::PowInt(x, n) => {
            let lx = extrait_lin(x)?;
            if est_constante(&lx) {
                if *n < 0 && lx.k.is_zero() {
                    return Err(Erreur::DivisionParZero);
                }
                let mut acc = BigRational::one();
                if *n >= 0 {
                    for _ in 0..*n {
                        acc = acc * lx.k.clone();
                    }
                } else {
                    for _ in 0..(-n) {
                        acc = acc / lx.k.clone();
                    }
                }
                return Ok(lin_constante(acc));
            }
            if *n == 1 {
                return Ok(lx);
            }
            Err(Erreur::SystemeNonLineaire)
        }

        _ => Err(Erreur::SystemeNonLineaire),
    }
}

/// Résout { g1 = d1 ; g2 = d2 } en (x, y) par Cramer.
///
/// Retour Racines([x, y]) : la valeur de x PUIS celle de y.
pub fn resout_systeme(
    g1: &Expr,
    d1: &Expr,
    g2: &Expr,
    d2: &Expr,
) -> Result<Resolution, Erreur> {
    // met chaque équation sous la forme a·x + b·y = c
    let l1 = extrait_lin(&Expr::Sub(Box::new(g1.clone()), Box::new(d1.clone())).simplify())?;
    let l2 = extrait_lin(&Expr::Sub(Box::new(g2.clone()), Box::new(d2.clone())).simplify())?;

    let (a1, b1, c1) = (l1.x, l1.y, -l1.k);
    let (a2, b2, c2) = (l2.x, l2.y, -l2.k);

    let det = &a1 * &b2 - &a2 * &b1;

    if det.is_zero() {
        // lignes proportionnelles (constantes comprises) => infinité
        let coherent_x = &a1 * &c2 - &a2 * &c1;
        let coherent_y = &b1 * &c2 - &b2 * &c1;
        if coherent_x.is_zero() && coherent_y.is_zero() {
            return Ok(Resolution::Infinite);
        }
        return Ok(Resolution::Aucune);
    }

    let x = (&c1 * &b2 - &c2 * &b1) / &det;
    let y = (&a1 * &c2 - &a2 * &c1) / &det;

    Ok(Resolution::Racines(vec![Expr::Rat(x), Expr::Rat(y)]))
}

/* ------------------------ Factorisation scolaire ------------------------ */

/// Factorise un polynôme de degré ≤ 2 sur ses racines rationnelles.
/// Rend une forme "a(x - r1)(x - r2)" ; si la factorisation n'apporte rien
/// (degré 0, irréductible sur Q), rend la forme développée.
pub fn factorise_poly(e: &Expr, var: &str) -> Result<String, Erreur> {
    let p = extrait_poly(&e.clone().simplify(), var)?;

    match p.len() {
        0 => Ok("0".to_string()),
        1 => Ok(fraction_en_texte(&p[0])),

        // bx + c = b(x + c/b)
        2 => {
            let b = &p[1];
            let c = &p[0];
            let r = -(c / b);
            Ok(format!(
                "{}{}",
                coeff_prefixe(b),
                facteur_lineaire(var, &r)
            ))
        }

        3 => {
            let a = &p[2];
            let b = &p[1];
            let c = &p[0];

            let disc = b * b - BigRational::from_integer(BigInt::from(4)) * a * c;
            if disc.is_negative() {
                // irréductible sur R : forme développée
                return Ok(poly_en_texte(&p, var));
            }

            match rational_sqrt_exact(&disc) {
                Some(rac) => {
                    let deux_a = BigRational::from_integer(BigInt::from(2)) * a;
                    let r1 = (-b - &rac) / &deux_a;
                    let r2 = (-b + &rac) / &deux_a;
                    let (petite, grande) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

                    if petite == grande {
                        return Ok(format!(
                            "{}{}^2",
                            coeff_prefixe(a),
                            facteur_lineaire(var, &petite)
                        ));
                    }
                    Ok(format!(
                        "{}{}{}",
                        coeff_prefixe(a),
                        facteur_lineaire(var, &petite),
                        facteur_lineaire(var, &grande)
                    ))
                }
                // racines irrationnelles : pas de factorisation scolaire
                None => Ok(poly_en_texte(&p, var)),
            }
        }

        n => Err(Erreur::DegreNonSupporte(n - 1)),
    }
}

fn coeff_prefixe(a: &BigRational) -> String {
    if a == &BigRational::one() {
        String::new()
    } else if a == &(-BigRational::one()) {
        "-".to_string()
    } else {
        fraction_en_texte(a)
    }
}

/// (x - r), (x + r) ou x si r = 0.
fn facteur_lineaire(var: &str, racine: &BigRational) -> String {
    if racine.is_zero() {
        return var.to_string();
    }
    if racine.is_negative() {
        let abs = -racine.clone();
        format!("({var}+{})", fraction_en_texte(&abs))
    } else {
        format!("({var}-{})", fraction_en_texte(racine))
    }
}

/// Forme développée "ax^2+bx+c" (coeffs nuls omis).
fn poly_en_texte(p: &[BigRational], var: &str) -> String {
    let mut morceaux: Vec<String> = Vec::new();

    for (i, c) in p.iter().enumerate().rev() {
        if c.is_zero() {
            continue;
        }

        let abs = c.abs();
        let coeff = if abs.is_one() && i > 0 {
            String::new()
        } else {
            fraction_en_texte(&abs)
        };
        let puissance = match i {
            0 => String::new(),
            1 => var.to_string(),
            _ => format!("{var}^{i}"),
        };

        let terme = format!("{coeff}{puissance}");
        if morceaux.is_empty() {
            if c.is_negative() {
                morceaux.push(format!("-{terme}"));
            } else {
                morceaux.push(terme);
            }
        } else if c.is_negative() {
            morceaux.push(format!("-{terme}"));
        } else {
            morceaux.push(format!("+{terme}"));
        }
    }

    if morceaux.is_empty() {
        return "0".to_string();
    }
    morceaux.concat()
}
