//! # Glossário de Rótulos
//!
//! Definições curtas para os rótulos mais comuns de classe gramatical, tag
//! fina, dependência e entidade — o equivalente do helper `explain` das
//! lições originais. Útil na UI e no endpoint `/explain` do servidor web.

/// Devolve a definição de um rótulo, se conhecido.
///
/// # Exemplo
///
/// ```rust
/// use matcher_core::explain::explain;
///
/// assert_eq!(explain("GPE"), Some("Countries, cities, states"));
/// assert!(explain("XYZZY").is_none());
/// ```
pub fn explain(term: &str) -> Option<&'static str> {
    let definition = match term {
        // Classes gramaticais (UD, grossas)
        "ADJ" => "Adjective",
        "ADP" => "Adposition (preposition)",
        "ADV" => "Adverb",
        "AUX" => "Auxiliary or modal verb",
        "CCONJ" => "Coordinating conjunction",
        "DET" => "Determiner (article)",
        "INTJ" => "Interjection",
        "NOUN" => "Noun",
        "NUM" => "Numeral",
        "PART" => "Particle",
        "PRON" => "Pronoun",
        "PROPN" => "Proper noun",
        "PUNCT" => "Punctuation",
        "SCONJ" => "Subordinating conjunction",
        "SYM" => "Symbol",
        "VERB" => "Verb",

        // Tags finas (Penn Treebank)
        "CD" => "Cardinal number",
        "DT" => "Determiner",
        "IN" => "Conjunction, subordinating or preposition",
        "JJ" => "Adjective",
        "MD" => "Verb, modal auxiliary",
        "NN" => "Noun, singular or mass",
        "NNS" => "Noun, plural",
        "NNP" => "Noun, proper singular",
        "POS" => "Possessive ending",
        "PRP" => "Pronoun, personal",
        "RB" => "Adverb",
        "TO" => "Infinitival \"to\"",
        "UH" => "Interjection",
        "VB" => "Verb, base form",
        "VBD" => "Verb, past tense",
        "VBG" => "Verb, gerund or present participle",
        "VBN" => "Verb, past participle",
        "VBP" => "Verb, non-3rd person singular present",
        "VBZ" => "Verb, 3rd person singular present",

        // Dependências
        "ROOT" => "Root of the sentence",
        "nsubj" => "Nominal subject",
        "dobj" => "Direct object",
        "det" => "Determiner modifier",
        "amod" => "Adjectival modifier",
        "nummod" => "Numeric modifier",
        "compound" => "Compound modifier",
        "aux" => "Auxiliary",
        "advmod" => "Adverbial modifier",
        "prep" => "Prepositional modifier",
        "neg" => "Negation modifier",
        "cc" => "Coordinating conjunction",
        "mark" => "Marker",
        "punct" => "Punctuation",

        // Entidades
        "PERSON" => "People, including fictional",
        "ORG" => "Companies, agencies, institutions",
        "GPE" => "Countries, cities, states",
        "PRODUCT" => "Objects, vehicles, foods, etc. (not services)",
        "MONEY" => "Monetary values, including unit",
        "DATE" => "Absolute or relative dates or periods",

        _ => return None,
    };
    Some(definition)
}
