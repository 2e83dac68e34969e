// src/noyau/reecriture.rs
//
// Réécriture de la multiplication implicite.
// ------------------------------------------
// Transforme la notation "humaine" en texte non ambigu pour l'analyseur :
//   5(2+3) -> 5*(2+3)     2x -> 2*x     (x+1)2 -> (x+1)*2
//   xy -> x*y             x( -> x*(     2^3 -> 2**3
//
// Les noms de fonctions sont atomiques : "sin(30)" ne devient JAMAIS
// "s*i*n(30)". On lexe d'abord en atomes (nombres, mots réservés au plus
// long, lettres isolées, opérateurs), puis on rejoint en insérant '*' entre
// les paires concernées. Pas de regex : un seul balayage gauche-droite.
//
// Garanties :
// - idempotente : normalise(normalise(s)) == normalise(s)
// - totale : ne retourne jamais d'erreur ; les caractères inconnus passent
//   tels quels (l'erreur sera signalée par le tokenizer, pas ici)
// - entrée vide / blanche : rendue inchangée

/// Mots réservés (fonctions + constantes) — table fermée, ordre indifférent
/// (la recherche prend le plus long préfixe).
const MOTS_RESERVES: &[&str] = &[
    "asin", "acos", "atan", "sinh", "cosh", "tanh", "sin", "cos", "tan", "sqrt", "log", "ln",
    "exp", "abs", "floor", "ceiling", "ceil", "pi",
];

/// Variables reconnues (un caractère).
const VARIABLES: &[char] = &['x', 'y', 'z'];

#[derive(Clone, Debug, PartialEq)]
enum Atome {
    Nombre(String),
    Mot(String),  // fonction ou constante réservée
    Lettre(char), // lettre isolée (variable potentielle)
    Op(String),   // + - * / ** =
    Ouvre,
    Ferme,
    Autre(char), // passe tel quel
}

/// Cherche le plus long mot réservé en préfixe de `s` (insensible à la casse).
fn mot_reserve(s: &[char]) -> Option<&'static str> {
    let mut meilleur: Option<&'static str> = None;
    for mot in MOTS_RESERVES {
        let n = mot.len();
        if s.len() < n {
            continue;
        }
        let prefixe: String = s[..n].iter().collect::<String>().to_lowercase();
        if prefixe == *mot && meilleur.map_or(true, |m| m.len() < n) {
            meilleur = Some(mot);
        }
    }
    meilleur
}

fn lexe_atomes(s: &str) -> Vec<Atome> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // nombre : chiffres, avec point décimal éventuel
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let debut = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            out.push(Atome::Nombre(chars[debut..i].iter().collect()));
            continue;
        }

        // π : constante réservée, conservée telle quelle
        if c == 'π' {
            out.push(Atome::Mot("π".to_string()));
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            if let Some(mot) = mot_reserve(&chars[i..]) {
                out.push(Atome::Mot(mot.to_string()));
                i += mot.len();
                continue;
            }
            out.push(Atome::Lettre(c.to_ascii_lowercase()));
            i += 1;
            continue;
        }

        match c {
            '^' => {
                // règle 1 : caret -> ** (convention exposant)
                out.push(Atome::Op("**".to_string()));
                i += 1;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Atome::Op("**".to_string()));
                    i += 2;
                } else {
                    out.push(Atome::Op("*".to_string()));
                    i += 1;
                }
            }
            '+' | '-' | '/' | '=' => {
                out.push(Atome::Op(c.to_string()));
                i += 1;
            }
            '(' => {
                out.push(Atome::Ouvre);
                i += 1;
            }
            ')' => {
                out.push(Atome::Ferme);
                i += 1;
            }
            autre => {
                out.push(Atome::Autre(autre));
                i += 1;
            }
        }
    }

    out
}

fn est_variable(c: char) -> bool {
    VARIABLES.contains(&c)
}

/// Faut-il insérer '*' entre `avant` et `apres` ?
/// Règles 2 à 6 de la réécriture (la règle 1, ^ -> **, est faite au lexage).
fn insere_etoile(avant: &Atome, apres: &Atome) -> bool {
    use Atome::*;
    match (avant, apres) {
        // 2) chiffre puis '('         : 5( -> 5*(
        (Nombre(_), Ouvre) => true,
        // 3) chiffre puis lettre/mot  : 2x -> 2*x, 2pi -> 2*pi, 3sin( -> 3*sin(
        (Nombre(_), Lettre(_)) | (Nombre(_), Mot(_)) => true,
        // 4) ')' puis chiffre         : )2 -> )*2
        (Ferme, Nombre(_)) => true,
        // 5) deux variables adjacentes: xy -> x*y (jamais dans sin/cos/...)
        (Lettre(a), Lettre(b)) => est_variable(*a) && est_variable(*b),
        // 6) variable puis '(' ou mot : x( -> x*(, xsin( -> x*sin( ; sin( reste sin(
        (Lettre(a), Ouvre) | (Lettre(a), Mot(_)) => est_variable(*a),
        _ => false,
    }
}

/// Rend la multiplication explicite. Transformation pure et totale :
/// ne retourne jamais d'erreur, idempotente.
pub fn normalise(brut: &str) -> String {
    let atomes = lexe_atomes(brut);
    if atomes.is_empty() {
        // vide ou espaces seuls : on rend tel quel (l'erreur viendra de l'analyse)
        return brut.to_string();
    }

    let mut out = String::with_capacity(brut.len() + 8);
    let mut precedent: Option<&Atome> = None;

    for atome in &atomes {
        if let Some(avant) = precedent {
            if insere_etoile(avant, atome) {
                out.push('*');
            }
        }
        match atome {
            Atome::Nombre(s) | Atome::Mot(s) | Atome::Op(s) => out.push_str(s),
            Atome::Lettre(c) | Atome::Autre(c) => out.push(*c),
            Atome::Ouvre => out.push('('),
            Atome::Ferme => out.push(')'),
        }
        precedent = Some(atome);
    }

    out
}
