//! Tests robustesse : le noyau ne panique jamais sur une saisie.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : toute saisie rend une ValeurAffichee (les erreurs sont
//!   des messages, jamais des paniques) et le résultat est déterministe.

use std::time::{Duration, Instant};

use super::affichage::ValeurAffichee;
use super::angles::ModeAngle;
use super::eval::evaluer;
use super::reecriture::normalise;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_rat(rng: &mut Rng) -> String {
    let a = rng.pick(8);
    let b = rng.pick(7) + 1;
    if rng.coin() {
        format!("{a}/{b}")
    } else {
        format!("{a}")
    }
}

fn gen_angle(rng: &mut Rng) -> String {
    let k = rng.pick(13) as i64 - 6;
    let d = match rng.pick(6) {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        4 => 6,
        _ => 12,
    };
    if d == 1 {
        format!("{k}*pi")
    } else {
        format!("{k}*pi/{d}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => gen_rat(rng),
        1 => "pi".to_string(),
        2 => "x".to_string(),
        3 => format!("({})", gen_angle(rng)),
        4 => "sqrt(2)".to_string(),
        _ => "sqrt(3)".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("sin({})", gen_angle(rng)),
        6 => format!("cos({})", gen_angle(rng)),
        7 => format!("tan({})", gen_angle(rng)),
        8 => format!("abs({})", gen_expr(rng, depth - 1)),
        _ => {
            // saisie "scolaire" : multiplication implicite volontaire
            format!("{}({})", rng.pick(5), gen_expr(rng, depth - 1))
        }
    }
}

/// Bruit brut : caractères arbitraires pour tester le lexeur et la réécriture.
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789+-*/^()=xyz.sincotaqrlge pi";
    let mut out = String::with_capacity(longueur);
    for _ in 0..longueur {
        let i = rng.pick(ALPHABET.len() as u32) as usize;
        out.push(ALPHABET[i] as char);
    }
    out
}

/* ------------------------ Tests ------------------------ */

#[test]
fn robu_jamais_de_panique_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut succes = 0usize;
    let mut erreurs = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let v1 = evaluer(&expr, ModeAngle::Radians);
        let v2 = evaluer(&expr, ModeAngle::Radians);
        assert_eq!(v1, v2, "non déterministe sur {expr:?}");

        match v1 {
            ValeurAffichee::Erreur(_) => erreurs += 1,
            _ => succes += 1,
        }
    }

    // On veut voir assez de succès, sinon le fuzz ne balaye rien.
    assert!(succes > 20, "trop peu de succès: {succes} ({erreurs} erreurs)");
}

#[test]
fn robu_bruit_brut_sur_le_lexeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let longueur = (rng.pick(24) + 1) as usize;
        let brut = gen_bruit(&mut rng, longueur);

        // la réécriture ne doit jamais paniquer et reste idempotente
        let une = normalise(&brut);
        assert_eq!(une, normalise(&une), "non idempotent sur {brut:?}");

        // l'évaluation rend toujours quelque chose (souvent une erreur)
        let _ = evaluer(&brut, ModeAngle::Radians);
    }
}

#[test]
fn robu_modes_coherents() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..80 {
        budget(t0, max);

        // argument avec π : les deux modes doivent coïncider
        let expr = format!("sin({})", gen_angle(&mut rng));
        let deg = evaluer(&expr, ModeAngle::Degres);
        let rad = evaluer(&expr, ModeAngle::Radians);
        assert_eq!(deg, rad, "π présent => modes identiques, expr={expr:?}");
    }
}

#[test]
fn robu_profondeur_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // imbrication linéaire raisonnable : (((1+1)+1)+...)
    let mut expr = "1".to_string();
    for _ in 0..200 {
        expr = format!("({expr}+1)");
    }

    budget(t0, max);
    let v = evaluer(&expr, ModeAngle::Radians);
    assert_eq!(
        v,
        ValeurAffichee::Entier(num_bigint::BigInt::from(201)),
        "somme imbriquée"
    );
}
