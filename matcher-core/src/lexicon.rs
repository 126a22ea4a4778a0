//! # Léxico Embutido para Inglês
//!
//! Listas de palavras de classe fechada, exceções de lematização e heurísticas
//! de sufixo usadas pelo anotador. Em um sistema real estes recursos viriam de
//! um modelo estatístico treinado; aqui eles são tabelas explícitas, o que torna
//! cada decisão do anotador inspecionável e determinística.

use std::sync::OnceLock;

use regex::Regex;

/// Determinantes/artigos (classe fechada → DET)
pub const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "no",
    "every", "each", "all", "both", "either", "neither", "my", "your", "his",
    "her", "its", "our", "their",
];

/// Pronomes pessoais e afins (→ PRON)
pub const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "them", "us",
    "mine", "yours", "hers", "ours", "theirs", "myself", "himself", "herself",
    "itself", "themselves", "who", "what", "which", "something", "nothing",
    "anything", "everything", "someone", "anyone", "everyone",
];

/// Preposições (→ ADP)
pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "from",
    "up", "down", "of", "off", "over", "under", "as", "like", "than",
];

/// Auxiliares e modais (→ AUX). Inclui formas contraídas já separadas
/// pelo tokenizador ("'m", "'re", "'ve", "'ll", "'d", "'s").
pub const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does",
    "did", "have", "has", "had", "will", "would", "shall", "should", "can",
    "could", "may", "might", "must", "wo", "ca", "'m", "'re", "'ve", "'ll",
    "'d", "'s",
];

/// Conjunções coordenativas (→ CCONJ)
pub const COORD_CONJ: &[&str] = &["and", "or", "but", "nor", "yet", "so"];

/// Conjunções subordinativas (→ SCONJ)
pub const SUBORD_CONJ: &[&str] = &[
    "if", "because", "while", "although", "though", "unless", "until", "when",
    "whereas", "since", "that",
];

/// Advérbios frequentes que a heurística de sufixo "-ly" não cobre (→ ADV)
pub const ADVERBS: &[&str] = &[
    "now", "then", "here", "there", "not", "also", "just", "still", "already",
    "again", "more", "most", "very", "too", "once", "never", "always", "ever",
    "soon", "later", "deeper", "recently", "today", "yesterday", "tomorrow",
];

/// Interjeições (→ INTJ)
pub const INTERJECTIONS: &[&str] = &["oh", "wow", "hey", "hello", "hi", "help", "please", "yes"];

/// Adjetivos frequentes nos textos de demonstração que nenhuma heurística
/// de sufixo captura
pub const ADJECTIVES: &[&str] = &[
    "new", "old", "big", "small", "smart", "good", "bad", "same", "little",
    "full", "other", "next", "last", "radical", "default", "free", "deep",
    "aesthetic",
];

/// Numerais por extenso reconhecidos por `like_num`
pub const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight",
    "nine", "ten", "eleven", "twelve", "twenty", "thirty", "forty", "fifty",
    "hundred", "thousand", "million", "billion", "trillion",
];

/// Verbos irregulares: forma flexionada → lema.
///
/// Cobre as formas dos textos de demonstração mais os irregulares de alta
/// frequência do inglês. Formas regulares ("downloaded", "leaked") são tratadas
/// pelas regras de sufixo em [`verb_lemma`].
pub const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("ate", "eat"), ("eaten", "eat"),
    ("bought", "buy"), ("buying", "buy"),
    ("was", "be"), ("were", "be"), ("is", "be"), ("are", "be"), ("am", "be"),
    ("been", "be"), ("being", "be"), ("'m", "be"), ("'re", "be"),
    ("got", "get"), ("gotten", "get"), ("went", "go"), ("gone", "go"),
    ("made", "make"), ("took", "take"), ("taken", "take"),
    ("saw", "see"), ("seen", "see"), ("won", "win"), ("wore", "wear"),
    ("said", "say"), ("told", "tell"), ("found", "find"), ("gave", "give"),
    ("came", "come"), ("knew", "know"), ("thought", "think"),
    ("did", "do"), ("done", "do"), ("does", "do"),
    ("had", "have"), ("has", "have"), ("'ve", "have"),
    ("will", "will"), ("'ll", "will"), ("wo", "will"), ("ca", "can"),
    ("loved", "love"), ("loving", "love"), ("costs", "cost"),
    ("reveals", "reveal"), ("remains", "remain"), ("includes", "include"),
];

/// Substantivos irregulares: plural → singular
pub const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"), ("feet", "foot"), ("teeth", "tooth"),
    ("mice", "mouse"), ("people", "person"), ("men", "man"), ("women", "woman"),
];

/// Nomes próprios conhecidos (gazetteer mínimo, em minúsculas).
///
/// Resolve a ambiguidade "maiúscula por ser nome vs. maiúscula por iniciar a
/// frase" para as entidades dos textos de demonstração.
pub const PROPER_NOUNS: &[&str] = &[
    "apple", "google", "microsoft", "boeing", "nintendo", "amazon", "fifa",
    "iphone", "ios", "ipad", "android", "windows", "winzip", "fortnite",
    "minecraft", "france", "brazil", "germany", "england", "russia", "china",
    "u.k.", "u.s.", "uk", "usa", "london", "paris", "york",
];

fn num_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Dígitos com separadores opcionais: "7", "10.5", "1,000", "1.000,50"
    RE.get_or_init(|| Regex::new(r"^\d+(?:[.,]\d+)*$").unwrap())
}

/// O token "parece um número"? Aceita dígitos com separadores e numerais por
/// extenso. Mais permissivo que `is_digit` (que exige só dígitos).
pub fn like_num(lower: &str) -> bool {
    if num_re().is_match(lower) {
        return true;
    }
    NUMBER_WORDS.contains(&lower)
}

/// Lematiza um verbo: exceções primeiro, regras de sufixo depois.
///
/// Regras de sufixo (na ordem):
/// - "-ies" → "-y" ("flies" → "fly")
/// - "-ing" com restauração de "e" ("making" → "make") e desduplicação de
///   consoante ("running" → "run")
/// - "-ed" idem ("downloaded" → "download", "leaked" → "leak")
/// - "-s" de terceira pessoa ("costs" → "cost")
pub fn verb_lemma(lower: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_VERBS.iter().find(|(form, _)| *form == lower) {
        return (*lemma).to_string();
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            return undouble_or_restore(stem);
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.len() >= 2 && !stem.ends_with('s') {
            return stem.to_string();
        }
    }
    lower.to_string()
}

/// Lematiza um substantivo (singulariza plurais regulares e irregulares)
pub fn noun_lemma(lower: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_NOUNS.iter().find(|(form, _)| *form == lower) {
        return (*lemma).to_string();
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        // "boxes" → "box", "watches" → "watch"; mas "games" → "game" via regra do -s
        if stem.ends_with('x') || stem.ends_with("ch") || stem.ends_with("sh") || stem.ends_with('s')
        {
            return stem.to_string();
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.len() >= 2 && !stem.ends_with('s') {
            return stem.to_string();
        }
    }
    lower.to_string()
}

/// Pós-processamento de radical após remover "-ing"/"-ed":
/// desduplica consoante final ("runn" → "run") ou restaura o "e" mudo
/// ("mak" → "make", "download" fica como está).
fn undouble_or_restore(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 3 && chars[n - 1] == chars[n - 2] && is_consonant(chars[n - 1]) && chars[n - 1] != 'l' {
        return chars[..n - 1].iter().collect();
    }
    // Radicais curtos terminados em vogal+consoante costumam vir de verbos
    // com "e" mudo: "mak(e)", "lik(e)", "tak(e)"
    if n >= 2
        && n <= 3
        && is_consonant(chars[n - 1])
        && chars[n - 1] != 'w'
        && chars[n - 1] != 'x'
        && chars[n - 1] != 'y'
        && !is_consonant(chars[n - 2])
    {
        return format!("{}e", stem);
    }
    stem.to_string()
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
