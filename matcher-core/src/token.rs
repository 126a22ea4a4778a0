//! # Token — A Unidade Atômica de Texto Anotado
//!
//! Define o [`Token`], a menor unidade sobre a qual o casador de padrões opera,
//! e o enum [`Pos`] com as classes gramaticais grossas (esquema Universal Dependencies).
//!
//! ## Atributos Lexicais vs. Atributos Anotados
//!
//! - **Lexicais**: derivados apenas da forma superficial (`lower`, `is_alpha`,
//!   `is_digit`, `is_punct`, `like_num`). São computados na tokenização.
//! - **Anotados**: dependem de contexto e de léxico (`lemma`, `pos`, `tag`, `dep`,
//!   `head`). São preenchidos pelo anotador ([`crate::tagger`]).
//!
//! Depois de anotado, um token é **imutável**: o casador só lê.

use serde::{Deserialize, Serialize};

/// Classe gramatical grossa (coarse-grained) no esquema Universal Dependencies.
///
/// Um conjunto **fechado**: padrões que referenciam uma classe inexistente são
/// rejeitados no registro, nunca dentro do loop de matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    /// Adjetivo: "beautiful", "smart"
    Adj,
    /// Adposição (preposição): "in", "of", "by"
    Adp,
    /// Advérbio: "now", "deeper"
    Adv,
    /// Verbo auxiliar/modal: "is", "will", "can"
    Aux,
    /// Conjunção coordenativa: "and", "but"
    Cconj,
    /// Determinante (artigo): "the", "a"
    Det,
    /// Interjeição: "oh", "help"
    Intj,
    /// Substantivo comum: "pizza", "phone"
    Noun,
    /// Numeral: "7", "2018", "five"
    Num,
    /// Partícula: "to" (infinitivo), "n't"
    Part,
    /// Pronome: "she", "it", "I"
    Pron,
    /// Nome próprio: "Apple", "Fortnite"
    Propn,
    /// Pontuação: ".", ",", ":"
    Punct,
    /// Conjunção subordinativa: "if", "because"
    Sconj,
    /// Símbolo: "$", "%"
    Sym,
    /// Verbo pleno: "ate", "bought"
    Verb,
    /// Desconhecido / outro
    X,
}

impl Pos {
    /// Nome da classe como string (para serialização, UI e padrões JSON)
    pub fn name(&self) -> &'static str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
        }
    }

    /// Tenta parsear a partir de string (ex: "NOUN" → Some(Noun))
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ADJ" => Some(Pos::Adj),
            "ADP" => Some(Pos::Adp),
            "ADV" => Some(Pos::Adv),
            "AUX" => Some(Pos::Aux),
            "CCONJ" => Some(Pos::Cconj),
            "DET" => Some(Pos::Det),
            "INTJ" => Some(Pos::Intj),
            "NOUN" => Some(Pos::Noun),
            "NUM" => Some(Pos::Num),
            "PART" => Some(Pos::Part),
            "PRON" => Some(Pos::Pron),
            "PROPN" => Some(Pos::Propn),
            "PUNCT" => Some(Pos::Punct),
            "SCONJ" => Some(Pos::Sconj),
            "SYM" => Some(Pos::Sym),
            "VERB" => Some(Pos::Verb),
            "X" => Some(Pos::X),
            _ => None,
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Um token anotado, produzido pelo pipeline de anotação.
///
/// Mantém a referência exata de sua posição no texto original (`start` e `end`),
/// o que permite:
/// 1. Reconstruir o texto de qualquer [`crate::doc::Span`] com o espaçamento original.
/// 2. Destacar (highlight) os casamentos na interface web sem alterar a formatação.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// Forma superficial exata (ex: "iPhone", "n't", ".")
    pub text: String,
    /// Forma em minúsculas (ex: "iphone")
    pub lower: String,
    /// Forma de dicionário (ex: "bought" → "buy")
    pub lemma: String,
    /// Classe gramatical grossa (UD)
    pub pos: Pos,
    /// Tag fina estilo Penn Treebank (ex: "NNP", "VBD", "CD")
    pub tag: String,
    /// Rótulo de dependência sintática (ex: "nsubj", "dobj", "det")
    pub dep: String,
    /// Índice do token-cabeça na árvore de dependência (o ROOT aponta para si mesmo)
    pub head: usize,
    /// Todos os caracteres são alfabéticos?
    pub is_alpha: bool,
    /// Todos os caracteres são dígitos?
    pub is_digit: bool,
    /// Token composto só de pontuação?
    pub is_punct: bool,
    /// Parece um número? Inclui "10.5", "1,000" e numerais por extenso ("ten")
    pub like_num: bool,
    /// Índice sequencial do token na sequência (0, 1, 2...)
    pub index: usize,
    /// Índice de byte inicial no texto original (inclusive)
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo)
    pub end: usize,
    /// Há espaço em branco logo após este token?
    pub ws: bool,
}

impl Token {
    /// Cria um token "cru": atributos lexicais computados, atributos anotados
    /// com valores neutros (serão preenchidos pelo anotador).
    pub fn new(text: &str, start: usize, end: usize, index: usize) -> Self {
        let lower = text.to_lowercase();
        let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
        let is_digit = !text.is_empty() && text.chars().all(|c| c.is_ascii_digit());
        let is_punct = !text.is_empty()
            && text
                .chars()
                .all(|c| !c.is_alphanumeric() && !c.is_whitespace());
        let like_num = crate::lexicon::like_num(&lower);
        Token {
            text: text.to_string(),
            lemma: lower.clone(),
            lower,
            pos: Pos::X,
            tag: String::new(),
            dep: String::new(),
            head: index,
            is_alpha,
            is_digit,
            is_punct,
            like_num,
            index,
            start,
            end,
            ws: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_flags() {
        let t = Token::new("iPhone", 4, 10, 1);
        assert!(t.is_alpha);
        assert!(!t.is_digit);
        assert!(!t.is_punct);
        assert_eq!(t.lower, "iphone");

        let d = Token::new("2018", 0, 4, 0);
        assert!(d.is_digit);
        assert!(d.like_num);

        let p = Token::new(":", 0, 1, 0);
        assert!(p.is_punct);
        assert!(!p.is_alpha);
    }

    #[test]
    fn test_pos_roundtrip() {
        assert_eq!(Pos::from_str("PROPN"), Some(Pos::Propn));
        assert_eq!(Pos::Propn.name(), "PROPN");
        assert_eq!(Pos::from_str("XYZ"), None);
    }

    #[test]
    fn test_like_num_spelled_out() {
        let t = Token::new("ten", 0, 3, 0);
        assert!(t.like_num);
        assert!(t.is_alpha);
    }
}
