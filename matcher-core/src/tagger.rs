//! # Anotador Léxico-Gramatical
//!
//! Preenche os atributos anotados de cada token: classe gramatical ([`Pos`]),
//! tag fina (estilo Penn Treebank), lema e um rótulo raso de dependência.
//!
//! ## Abordagem
//!
//! Nenhum modelo estatístico: tudo aqui é **lookup em léxico + heurística de
//! sufixo/forma**, na mesma linha dos pesos derivados à mão do restante do
//! projeto. A ordem das regras importa — classes fechadas primeiro (são as
//! menos ambíguas), morfologia verbal depois, nome próprio por capitalização,
//! e substantivo como classe default.
//!
//! A decodificação de dependências é igualmente rasa: um único "root" verbal
//! por texto, substantivos antes dele viram `nsubj`, depois dele `dobj`,
//! determinantes e adjetivos se anexam ao próximo substantivo. O suficiente
//! para padrões que consultam `POS` e para a visualização didática — análise
//! sintática de verdade está explicitamente fora do escopo.
//!
//! ## Exemplo
//!
//! ```rust
//! use matcher_core::tagger::annotate;
//! use matcher_core::token::Pos;
//!
//! let doc = annotate("She ate the pizza");
//! assert_eq!(doc[1].pos, Pos::Verb);
//! assert_eq!(doc[1].lemma, "eat");
//! assert_eq!(doc[3].dep, "dobj");
//! ```

use crate::doc::Doc;
use crate::lexicon;
use crate::token::{Pos, Token};
use crate::tokenizer::tokenize;

/// Tokeniza e anota um texto, devolvendo o [`Doc`] imutável.
///
/// Este é o colaborador "upstream" do casador de padrões: tudo que o matcher
/// enxerga de um token foi decidido aqui, uma única vez.
pub fn annotate(text: &str) -> Doc {
    let mut tokens = tokenize(text);

    for i in 0..tokens.len() {
        let (pos, tag, lemma) = classify(&tokens, i);
        tokens[i].pos = pos;
        tokens[i].tag = tag;
        tokens[i].lemma = lemma;
    }

    assign_deps(&mut tokens);
    Doc::new(text, tokens)
}

/// Decide (pos, tag fina, lema) para o token `i`, com acesso ao contexto.
fn classify(tokens: &[Token], i: usize) -> (Pos, String, String) {
    let t = &tokens[i];
    let lower = t.lower.as_str();

    // 1. Pontuação
    if t.is_punct {
        let tag = match lower {
            "." | "!" | "?" => ".",
            "," => ",",
            ":" | ";" => ":",
            "-" | "--" => "HYPH",
            "\"" | "'" | "\u{2018}" | "\u{2019}" | "\u{201c}" | "\u{201d}" => "''",
            "(" => "-LRB-",
            ")" => "-RRB-",
            _ => "NFP",
        };
        return (Pos::Punct, tag.to_string(), t.text.clone());
    }

    // 2. Símbolos de moeda e afins
    if matches!(lower, "$" | "€" | "£" | "%" | "+" | "=") {
        let tag = if matches!(lower, "$" | "€" | "£") { "$" } else { "SYM" };
        return (Pos::Sym, tag.to_string(), t.text.clone());
    }

    // 3. Números (dígitos, "10.5", "1,000", numerais por extenso)
    if t.like_num {
        return (Pos::Num, "CD".to_string(), lower.to_string());
    }

    // 4. Partículas
    if lower == "n't" || lower == "n\u{2019}t" {
        return (Pos::Part, "RB".to_string(), "not".to_string());
    }
    if lower == "to" {
        return (Pos::Part, "TO".to_string(), "to".to_string());
    }

    // 5. "'s": possessivo depois de nome/número, auxiliar caso contrário
    if lower == "'s" || lower == "\u{2019}s" {
        let possessive = i > 0
            && (tokens[i - 1].like_num
                || tokens[i - 1]
                    .text
                    .chars()
                    .next()
                    .map(|c| c.is_uppercase())
                    .unwrap_or(false));
        return if possessive {
            (Pos::Part, "POS".to_string(), "'s".to_string())
        } else {
            (Pos::Aux, "VBZ".to_string(), "be".to_string())
        };
    }

    // 6. Classes fechadas
    if lexicon::DETERMINERS.contains(&lower) {
        return (Pos::Det, "DT".to_string(), lower.to_string());
    }
    if lexicon::PRONOUNS.contains(&lower) {
        return (Pos::Pron, "PRP".to_string(), lower.to_string());
    }
    if lexicon::AUXILIARIES.contains(&lower) {
        return (Pos::Aux, aux_tag(lower).to_string(), lexicon::verb_lemma(lower));
    }
    if lexicon::PREPOSITIONS.contains(&lower) {
        return (Pos::Adp, "IN".to_string(), lower.to_string());
    }
    if lexicon::COORD_CONJ.contains(&lower) {
        return (Pos::Cconj, "CC".to_string(), lower.to_string());
    }
    if lexicon::SUBORD_CONJ.contains(&lower) {
        return (Pos::Sconj, "IN".to_string(), lower.to_string());
    }
    if lexicon::INTERJECTIONS.contains(&lower) {
        return (Pos::Intj, "UH".to_string(), lower.to_string());
    }

    // 7. Advérbios (lista + sufixo "-ly")
    if lexicon::ADVERBS.contains(&lower) || (t.is_alpha && lower.len() > 4 && lower.ends_with("ly"))
    {
        return (Pos::Adv, "RB".to_string(), lower.to_string());
    }

    // 8. Nome próprio: gazetteer, capitalização interna ("iPhone", "iOS")
    //    ou inicial maiúscula fora de início de sentença
    let first_upper = t.text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
    let inner_caps = !first_upper && t.text.chars().skip(1).any(|c| c.is_uppercase());
    let sentence_initial = i == 0
        || tokens
            .get(i - 1)
            .map(|p| matches!(p.text.as_str(), "." | "!" | "?"))
            .unwrap_or(true);
    if lexicon::PROPER_NOUNS.contains(&lower)
        || inner_caps
        || (first_upper && !sentence_initial && !lexicon::ADJECTIVES.contains(&lower))
    {
        return (Pos::Propn, "NNP".to_string(), t.text.clone());
    }

    // 9. Morfologia verbal
    if lexicon::IRREGULAR_VERBS.iter().any(|(form, _)| *form == lower) {
        let tag = if lower.ends_with("ing") {
            "VBG"
        } else if lower.ends_with('s') {
            "VBZ"
        } else {
            "VBD"
        };
        return (Pos::Verb, tag.to_string(), lexicon::verb_lemma(lower));
    }
    if t.is_alpha && lower.len() > 4 && lower.ends_with("ing") {
        return (Pos::Verb, "VBG".to_string(), lexicon::verb_lemma(lower));
    }
    if t.is_alpha && lower.len() > 3 && lower.ends_with("ed") {
        return (Pos::Verb, "VBD".to_string(), lexicon::verb_lemma(lower));
    }
    // Terceira pessoa: "It costs", "Apple reveals"
    if t.is_alpha && lower.len() > 3 && lower.ends_with('s') && i > 0 {
        let prev = &tokens[i - 1];
        let prev_is_subject = lexicon::PRONOUNS.contains(&prev.lower.as_str())
            || prev.text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
        if prev_is_subject {
            return (Pos::Verb, "VBZ".to_string(), lexicon::verb_lemma(lower));
        }
    }
    // Infinitivo depois de "to": "need to download Winzip"
    if t.is_alpha && i > 0 && tokens[i - 1].lower == "to" {
        return (Pos::Verb, "VB".to_string(), lexicon::verb_lemma(lower));
    }

    // 10. Adjetivos (lista + sufixos derivacionais)
    if lexicon::ADJECTIVES.contains(&lower)
        || (t.is_alpha
            && lower.len() > 4
            && ["ful", "ous", "ive", "ble", "ic", "al"]
                .iter()
                .any(|s| lower.ends_with(s)))
    {
        return (Pos::Adj, "JJ".to_string(), lower.to_string());
    }

    // 11. Default: substantivo (plural se termina em "s")
    if lower.len() > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
        return (Pos::Noun, "NNS".to_string(), lexicon::noun_lemma(lower));
    }
    (Pos::Noun, "NN".to_string(), lexicon::noun_lemma(lower))
}

fn aux_tag(lower: &str) -> &'static str {
    match lower {
        "is" | "has" | "does" | "'s" => "VBZ",
        "am" | "are" | "do" | "have" | "'m" | "'re" | "'ve" => "VBP",
        "was" | "were" | "did" | "had" | "'d" => "VBD",
        "been" => "VBN",
        "being" => "VBG",
        "be" => "VB",
        _ => "MD",
    }
}

/// Passo de dependências rasas: um root verbal, anexos locais para o resto.
fn assign_deps(tokens: &mut [Token]) {
    if tokens.is_empty() {
        return;
    }

    let root = tokens
        .iter()
        .position(|t| t.pos == Pos::Verb)
        .or_else(|| tokens.iter().position(|t| t.pos == Pos::Aux))
        .unwrap_or(0);

    for i in 0..tokens.len() {
        if i == root {
            tokens[i].dep = "ROOT".to_string();
            tokens[i].head = i;
            continue;
        }
        let (dep, head) = match tokens[i].pos {
            Pos::Det | Pos::Adj | Pos::Num => {
                // Anexa ao próximo substantivo/nome próprio em janela curta
                let attach = (i + 1..(i + 4).min(tokens.len()))
                    .find(|&j| matches!(tokens[j].pos, Pos::Noun | Pos::Propn));
                let label = match tokens[i].pos {
                    Pos::Det => "det",
                    Pos::Adj => "amod",
                    _ => "nummod",
                };
                match attach {
                    Some(j) => (label, j),
                    None => ("dep", root),
                }
            }
            Pos::Noun | Pos::Propn | Pos::Pron => {
                // Composto nominal: "iPhone X", "release date"
                if i + 1 < tokens.len()
                    && matches!(tokens[i + 1].pos, Pos::Noun | Pos::Propn)
                    && tokens[i].pos != Pos::Pron
                {
                    ("compound", i + 1)
                } else if i < root {
                    ("nsubj", root)
                } else {
                    ("dobj", root)
                }
            }
            Pos::Aux => ("aux", root),
            Pos::Adv => ("advmod", root),
            Pos::Adp => ("prep", root),
            Pos::Punct => ("punct", root),
            Pos::Cconj => ("cc", root),
            Pos::Sconj => ("mark", root),
            Pos::Part => {
                if tokens[i].lemma == "not" {
                    ("neg", root)
                } else {
                    ("aux", root)
                }
            }
            _ => ("dep", root),
        };
        tokens[i].dep = dep.to_string();
        tokens[i].head = head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_she_ate_the_pizza() {
        let doc = annotate("She ate the pizza");
        let pos: Vec<Pos> = doc.iter().map(|t| t.pos).collect();
        assert_eq!(pos, vec![Pos::Pron, Pos::Verb, Pos::Det, Pos::Noun]);
        assert_eq!(doc[0].dep, "nsubj");
        assert_eq!(doc[1].dep, "ROOT");
        assert_eq!(doc[2].dep, "det");
        assert_eq!(doc[2].head, 3);
        assert_eq!(doc[3].dep, "dobj");
        assert_eq!(doc[3].head, 1);
    }

    #[test]
    fn test_it_costs_five_dollars() {
        let doc = annotate("It costs $5.");
        assert_eq!(doc[0].pos, Pos::Pron);
        assert_eq!(doc[1].pos, Pos::Verb);
        assert_eq!(doc[1].lemma, "cost");
        assert_eq!(doc[2].pos, Pos::Sym);
        assert_eq!(doc[3].pos, Pos::Num);
        assert!(doc[3].like_num);
        assert_eq!(doc[4].pos, Pos::Punct);
    }

    #[test]
    fn test_bought_a_smartphone() {
        let doc = annotate("I bought a smartphone");
        assert_eq!(doc[1].lemma, "buy");
        assert_eq!(doc[1].pos, Pos::Verb);
        assert_eq!(doc[2].pos, Pos::Det);
        assert_eq!(doc[3].pos, Pos::Noun);
    }

    #[test]
    fn test_downloaded_fortnite() {
        let doc = annotate("i downloaded Fortnite on my laptop");
        assert_eq!(doc[1].lemma, "download");
        assert_eq!(doc[2].pos, Pos::Propn);
    }

    #[test]
    fn test_inner_caps_are_proper_nouns() {
        let doc = annotate("iOS is here. iPhone X too.");
        assert_eq!(doc[0].pos, Pos::Propn);
        let iphone = doc.iter().find(|t| t.text == "iPhone").unwrap();
        assert_eq!(iphone.pos, Pos::Propn);
        // "X" capitalizado fora de início de sentença
        let x = doc.iter().find(|t| t.text == "X").unwrap();
        assert_eq!(x.pos, Pos::Propn);
    }

    #[test]
    fn test_sentence_initial_capital_is_not_propn() {
        let doc = annotate("New features arrived");
        // "New" inicia a sentença e está no léxico de adjetivos
        assert_eq!(doc[0].pos, Pos::Adj);
    }

    #[test]
    fn test_adjective_noun_noun() {
        let doc = annotate("the app has a beautiful design and smart search");
        let beautiful = doc.iter().find(|t| t.text == "beautiful").unwrap();
        assert_eq!(beautiful.pos, Pos::Adj);
        let smart = doc.iter().find(|t| t.text == "smart").unwrap();
        assert_eq!(smart.pos, Pos::Adj);
        let design = doc.iter().find(|t| t.text == "design").unwrap();
        assert_eq!(design.pos, Pos::Noun);
    }

    #[test]
    fn test_annotate_empty() {
        let doc = annotate("");
        assert!(doc.is_empty());
    }
}
