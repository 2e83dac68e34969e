// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreurs::Erreur;

#[derive(Clone, Debug)]
pub enum Tok {
    Num(BigRational),
    Pi,

    // Fonctions + variables (tout ce qui n'est pas pi / opérateur / nombre)
    // NOTE: l'analyse (RPN->Expr) décidera si c'est une fonction de la table
    // fermée, une variable autorisée (x, y, z) ou un identifiant inconnu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    LPar,
    RPar,
}

/// Tokenize une chaîne (déjà passée par la réécriture) en jetons.
/// Supporte:
/// - entiers (ex: 12) et décimaux exacts (ex: 0.75 -> 3/4)
/// - opérateurs + - * / et l'exposant ** (ou ^)
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, Erreur> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // ** = exposant ; * seul = multiplication
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // π : "π" (la forme "pi" passe par les identifiants)
        if c == 'π' {
            out.push(Tok::Pi);
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre : entier ou décimal (le décimal devient un rationnel exact)
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            out.push(Tok::Num(rationnel_depuis_texte(&texte)?));
            continue;
        }

        return Err(Erreur::CaractereInattendu(c));
    }

    Ok(out)
}

/// "12" -> 12 ; "0.75" -> 3/4 (exact, auto-réduit par BigRational).
pub fn rationnel_depuis_texte(texte: &str) -> Result<BigRational, Erreur> {
    let invalide = || Erreur::NombreInvalide(texte.to_string());

    let mut parties = texte.splitn(2, '.');
    let entier = parties.next().ok_or_else(invalide)?;
    let frac = parties.next();

    if let Some(frac) = frac {
        // un seul point autorisé
        if frac.contains('.') || frac.is_empty() {
            return Err(invalide());
        }
        let chiffres = format!("{entier}{frac}");
        let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
        let d = BigInt::from(10u32).pow(frac.len() as u32);
        Ok(BigRational::new(n, d))
    } else {
        let n = BigInt::parse_bytes(entier.as_bytes(), 10).ok_or_else(invalide)?;
        Ok(BigRational::from_integer(n))
    }
}
