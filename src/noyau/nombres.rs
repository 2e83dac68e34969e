// src/noyau/nombres.rs
//
// Outils arithmétiques scolaires : PGCD, PPCM, décimal <-> fraction.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::erreurs::Erreur;
use super::jetons::rationnel_depuis_texte;

/// PGCD (Euclide), toujours positif. pgcd(0, 0) = 0.
pub fn pgcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let t = &a % &b;
        a = b;
        b = t;
    }
    a
}

/// PPCM, toujours positif. ppcm(0, n) = 0.
pub fn ppcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b).abs() / pgcd(a, b)
}

/// "0.75" -> 3/4 (fraction réduite exacte).
pub fn decimal_en_fraction(texte: &str) -> Result<BigRational, Erreur> {
    rationnel_depuis_texte(texte.trim())
}

/// 3/4 -> "3/4" ; 5/1 -> "5".
pub fn fraction_en_texte(r: &BigRational) -> String {
    if r.denom() == &BigInt::from(1) {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

#[cfg(test)]
mod tests {
    use super::{decimal_en_fraction, fraction_en_texte, pgcd, ppcm};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn b(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn pgcd_euclide() {
        assert_eq!(pgcd(&b(48), &b(18)), b(6));
        assert_eq!(pgcd(&b(-48), &b(18)), b(6));
        assert_eq!(pgcd(&b(0), &b(7)), b(7));
        assert_eq!(pgcd(&b(0), &b(0)), b(0));
    }

    #[test]
    fn ppcm_via_pgcd() {
        assert_eq!(ppcm(&b(4), &b(6)), b(12));
        assert_eq!(ppcm(&b(0), &b(6)), b(0));
        assert_eq!(ppcm(&b(-4), &b(6)), b(12));
    }

    #[test]
    fn aller_retour_decimal_fraction() {
        let r = decimal_en_fraction("0.75").unwrap();
        assert_eq!(r, BigRational::new(b(3), b(4)));
        assert_eq!(fraction_en_texte(&r), "3/4");
        assert_eq!(
            fraction_en_texte(&BigRational::from_integer(b(5))),
            "5"
        );
    }
}
