//! # Tokenizador para Inglês
//!
//! Divide o texto bruto em tokens preservando os offsets de byte originais,
//! que são a base para reconstruir o texto de qualquer span com o espaçamento
//! intacto.
//!
//! ## Estratégia
//!
//! 1. **Segmentação base**: fronteiras de palavra Unicode (UAX-29), via
//!    `unicode-segmentation`. Isso já mantém juntos números como "10.5" e
//!    contrações como "won't".
//! 2. **Merges**: abreviações conhecidas recuperam o ponto final
//!    ("Dr" + "." → "Dr.", "U.K" + "." → "U.K.").
//! 3. **Splits**: clíticos de contração viram tokens próprios
//!    ("won't" → "wo" + "n't", "I'm" → "I" + "'m").
//!
//! ## Exemplo
//!
//! ```rust
//! use matcher_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("I'm buying apps.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["I", "'m", "buying", "apps", "."]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::token::Token;

/// Abreviações que não devem perder o ponto final
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Mr", "Mrs", "Ms", "Prof", "Gen", "Sen", "Gov", "St", "Jr", "Sr",
    "Inc", "Corp", "Ltd", "Co", "vs", "etc", "approx", "dept", "est",
];

/// Sufixos de contração que viram tokens próprios, nas duas grafias de
/// apóstrofo (o "n't" é tratado à parte)
const CLITICS: &[&str] = &[
    "'s", "'m", "'re", "'ve", "'ll", "'d",
    "\u{2019}s", "\u{2019}m", "\u{2019}re", "\u{2019}ve", "\u{2019}ll", "\u{2019}d",
];

/// Tokeniza um texto em inglês.
///
/// Os tokens saem com atributos lexicais computados e atributos anotados
/// neutros; índices e flags de espaçamento são normalizados por
/// [`crate::doc::Doc::new`].
pub fn tokenize(text: &str) -> Vec<Token> {
    // Passada 1: segmentos UAX-29, descartando espaço em branco
    let raw: Vec<(usize, &str)> = text
        .split_word_bound_indices()
        .filter(|(_, s)| !s.trim().is_empty())
        .collect();

    // Passada 2: merge de abreviação + ponto
    let mut merged: Vec<(usize, String)> = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        let (off, seg) = raw[i];
        let next_is_adjacent_dot = raw
            .get(i + 1)
            .map(|&(noff, nseg)| nseg == "." && noff == off + seg.len())
            .unwrap_or(false);
        let keeps_dot = ABBREVIATIONS.contains(&seg)
            || (seg.contains('.') && seg.chars().all(|c| c.is_alphabetic() || c == '.'));
        if next_is_adjacent_dot && keeps_dot {
            merged.push((off, format!("{}.", seg)));
            i += 2;
        } else {
            merged.push((off, seg.to_string()));
            i += 1;
        }
    }

    // Passada 3: split de clíticos e montagem dos tokens
    let mut tokens = Vec::new();
    for (off, seg) in merged {
        for (part_off, part) in split_clitics(off, &seg) {
            let end = part_off + part.len();
            tokens.push(Token::new(&part, part_off, end, 0));
        }
    }
    tokens
}

/// Separa clíticos de contração de um segmento, devolvendo (offset, texto) de
/// cada parte. Segmentos sem apóstrofo saem intactos.
fn split_clitics(off: usize, seg: &str) -> Vec<(usize, String)> {
    let lower = seg.to_ascii_lowercase();

    // "won't" → "wo" + "n't"; "can't" → "ca" + "n't"
    if lower.len() > 3 && (lower.ends_with("n't") || lower.ends_with("n\u{2019}t")) {
        let suffix_len = if lower.ends_with("n't") { 3 } else { 5 };
        let cut = seg.len() - suffix_len;
        return vec![
            (off, seg[..cut].to_string()),
            (off + cut, seg[cut..].to_string()),
        ];
    }

    // "I'm" → "I" + "'m"; "Apple's" → "Apple" + "'s"
    for clitic in CLITICS {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let cut = seg.len() - clitic.len();
            return vec![
                (off, seg[..cut].to_string()),
                (off + cut, seg[cut..].to_string()),
            ];
        }
    }

    vec![(off, seg.to_string())]
}
