//! # Linguagem de Padrões sobre Tokens
//!
//! Um padrão é uma sequência ordenada de restrições, uma por posição. Cada
//! restrição é uma **conjunção** de predicados sobre os atributos de um token
//! (texto exato, minúsculas, lema, classe gramatical, flags booleanas), mais um
//! quantificador opcional que controla quantos tokens consecutivos a posição
//! pode consumir.
//!
//! ## Forma JSON
//!
//! Os padrões são escritos na notação de dicionários por posição:
//!
//! ```json
//! [{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]
//! ```
//!
//! Chaves string aceitam também um conjunto de candidatos:
//! `{"LOWER": {"IN": ["iphone", "ipad"]}}`.
//!
//! ## Resolução no registro
//!
//! O despacho dinâmico por chave string existe **apenas** na fronteira JSON.
//! No registro, cada chave é resolvida contra um [`AttrSchema`] explícito e
//! vira uma variante fechada de [`Predicate`]; chaves desconhecidas são
//! rejeitadas na hora, e o loop de matching nunca falha por atributo.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MatchError;
use crate::token::{Pos, Token};

/// Quantificador de uma posição do padrão (a chave "OP" do JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    /// Sem OP: consome exatamente um token
    One,
    /// `?`: zero ou um (guloso: prefere um)
    ZeroOrOne,
    /// `+`: um ou mais (guloso)
    OneOrMore,
    /// `*`: zero ou mais (guloso)
    ZeroOrMore,
    /// `!`: asserção negativa de largura zero — o token imediato NÃO pode
    /// satisfazer os predicados, e nada é consumido
    Negate,
}

impl Quantifier {
    /// Parseia o valor da chave "OP"
    pub fn from_op(op: &str) -> Option<Self> {
        match op {
            "?" => Some(Quantifier::ZeroOrOne),
            "+" => Some(Quantifier::OneOrMore),
            "*" => Some(Quantifier::ZeroOrMore),
            "!" => Some(Quantifier::Negate),
            _ => None,
        }
    }

    pub fn as_op(&self) -> &'static str {
        match self {
            Quantifier::One => "",
            Quantifier::ZeroOrOne => "?",
            Quantifier::OneOrMore => "+",
            Quantifier::ZeroOrMore => "*",
            Quantifier::Negate => "!",
        }
    }
}

/// Um predicado resolvido sobre um único token.
///
/// Enumeração fechada: o que não está aqui não é um atributo casável.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `TEXT`/`ORTH`: igualdade exata com a forma superficial
    TextEquals(String),
    /// `TEXT` com `{"IN": [...]}`
    TextIn(Vec<String>),
    /// `LOWER`: igualdade caso-insensível (compara com `token.lower`)
    LowerEquals(String),
    LowerIn(Vec<String>),
    /// `LEMMA`: igualdade com a forma de dicionário
    LemmaEquals(String),
    LemmaIn(Vec<String>),
    /// `POS`: classe gramatical grossa
    PosEquals(Pos),
    PosIn(Vec<Pos>),
    /// `TAG`: tag fina (Penn Treebank)
    TagEquals(String),
    TagIn(Vec<String>),
    /// Flags booleanas: `IS_ALPHA`, `IS_DIGIT`, `IS_PUNCT`, `LIKE_NUM`
    IsAlpha(bool),
    IsDigit(bool),
    IsPunct(bool),
    LikeNum(bool),
}

impl Predicate {
    /// O token satisfaz este predicado?
    pub fn test(&self, t: &Token) -> bool {
        match self {
            Predicate::TextEquals(s) => t.text == *s,
            Predicate::TextIn(set) => set.iter().any(|s| t.text == *s),
            Predicate::LowerEquals(s) => t.lower == *s,
            Predicate::LowerIn(set) => set.iter().any(|s| t.lower == *s),
            Predicate::LemmaEquals(s) => t.lemma == *s,
            Predicate::LemmaIn(set) => set.iter().any(|s| t.lemma == *s),
            Predicate::PosEquals(p) => t.pos == *p,
            Predicate::PosIn(set) => set.contains(&t.pos),
            Predicate::TagEquals(s) => t.tag == *s,
            Predicate::TagIn(set) => set.iter().any(|s| t.tag == *s),
            Predicate::IsAlpha(b) => t.is_alpha == *b,
            Predicate::IsDigit(b) => t.is_digit == *b,
            Predicate::IsPunct(b) => t.is_punct == *b,
            Predicate::LikeNum(b) => t.like_num == *b,
        }
    }
}

/// Restrição de uma posição: conjunção de predicados + quantificador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenConstraint {
    pub predicates: Vec<Predicate>,
    pub op: Quantifier,
}

impl TokenConstraint {
    /// AND lógico entre todos os predicados da posição
    pub fn satisfied_by(&self, t: &Token) -> bool {
        self.predicates.iter().all(|p| p.test(t))
    }
}

/// O esquema de atributos casáveis, injetado explicitamente no matcher.
///
/// Substitui o vocabulário global compartilhado do desenho original: dois
/// matchers construídos com o mesmo esquema concordam, por construção, sobre
/// a extração de atributos de um mesmo token. O esquema é imutável após a
/// construção.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSchema {
    keys: Vec<&'static str>,
}

impl Default for AttrSchema {
    fn default() -> Self {
        AttrSchema {
            keys: vec![
                "TEXT", "ORTH", "LOWER", "LEMMA", "POS", "TAG", "IS_ALPHA",
                "IS_DIGIT", "IS_PUNCT", "LIKE_NUM",
            ],
        }
    }
}

impl AttrSchema {
    /// As chaves de atributo que este esquema reconhece
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Resolve uma entrada `chave: valor` do JSON para um [`Predicate`].
    ///
    /// Falha com [`MatchError::UnknownAttribute`] para chaves fora do esquema
    /// e com [`MatchError::InvalidPattern`] para valores de tipo errado.
    pub fn resolve(&self, key: &str, value: &Value) -> Result<Predicate, MatchError> {
        if !self.keys.contains(&key) {
            return Err(MatchError::UnknownAttribute {
                name: key.to_string(),
            });
        }
        match key {
            "TEXT" | "ORTH" => string_pred(key, value, Predicate::TextEquals, Predicate::TextIn),
            "LOWER" => string_pred(key, value, Predicate::LowerEquals, Predicate::LowerIn),
            "LEMMA" => string_pred(key, value, Predicate::LemmaEquals, Predicate::LemmaIn),
            "TAG" => string_pred(key, value, Predicate::TagEquals, Predicate::TagIn),
            "POS" => match value {
                Value::String(s) => {
                    let pos = Pos::from_str(s)
                        .ok_or_else(|| invalid(format!("classe gramatical desconhecida: {:?}", s)))?;
                    Ok(Predicate::PosEquals(pos))
                }
                Value::Object(map) => {
                    let candidates = in_set(map)?;
                    let mut set = Vec::with_capacity(candidates.len());
                    for s in candidates {
                        set.push(Pos::from_str(&s).ok_or_else(|| {
                            invalid(format!("classe gramatical desconhecida: {:?}", s))
                        })?);
                    }
                    Ok(Predicate::PosIn(set))
                }
                _ => Err(invalid("POS exige string ou {\"IN\": [...]}".to_string())),
            },
            "IS_ALPHA" => bool_pred(key, value, Predicate::IsAlpha),
            "IS_DIGIT" => bool_pred(key, value, Predicate::IsDigit),
            "IS_PUNCT" => bool_pred(key, value, Predicate::IsPunct),
            "LIKE_NUM" => bool_pred(key, value, Predicate::LikeNum),
            _ => unreachable!("chave validada contra o esquema"),
        }
    }
}

fn invalid(reason: String) -> MatchError {
    MatchError::InvalidPattern { reason }
}

fn string_pred(
    key: &str,
    value: &Value,
    eq: fn(String) -> Predicate,
    set: fn(Vec<String>) -> Predicate,
) -> Result<Predicate, MatchError> {
    match value {
        Value::String(s) => Ok(eq(s.clone())),
        Value::Object(map) => Ok(set(in_set(map)?)),
        _ => Err(invalid(format!(
            "{} exige string ou {{\"IN\": [...]}}",
            key
        ))),
    }
}

fn bool_pred(
    key: &str,
    value: &Value,
    make: fn(bool) -> Predicate,
) -> Result<Predicate, MatchError> {
    match value {
        Value::Bool(b) => Ok(make(*b)),
        _ => Err(invalid(format!("{} exige valor booleano", key))),
    }
}

/// Extrai a lista de candidatos de um objeto `{"IN": [...]}`
fn in_set(map: &serde_json::Map<String, Value>) -> Result<Vec<String>, MatchError> {
    let list = map
        .get("IN")
        .ok_or_else(|| invalid("objeto de valor só aceita a chave \"IN\"".to_string()))?;
    let arr = list
        .as_array()
        .ok_or_else(|| invalid("\"IN\" exige uma lista".to_string()))?;
    arr.iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid("\"IN\" exige uma lista de strings".to_string()))
        })
        .collect()
}

/// Um padrão compilado: sequência ordenada de restrições por posição.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub constraints: Vec<TokenConstraint>,
}

impl Pattern {
    /// Compila um padrão a partir da string JSON
    pub fn from_json(schema: &AttrSchema, json: &str) -> Result<Pattern, MatchError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| invalid(format!("JSON malformado: {}", e)))?;
        Self::from_value(schema, &value)
    }

    /// Compila um padrão a partir de um `serde_json::Value` já parseado
    pub fn from_value(schema: &AttrSchema, value: &Value) -> Result<Pattern, MatchError> {
        let positions = value
            .as_array()
            .ok_or_else(|| invalid("padrão deve ser uma lista de posições".to_string()))?;
        if positions.is_empty() {
            return Err(invalid("padrão vazio".to_string()));
        }

        let mut constraints = Vec::with_capacity(positions.len());
        for position in positions {
            let map = position
                .as_object()
                .ok_or_else(|| invalid("cada posição deve ser um objeto".to_string()))?;

            let mut op = Quantifier::One;
            let mut predicates = Vec::new();
            for (key, val) in map {
                if key == "OP" {
                    let op_str = val
                        .as_str()
                        .ok_or_else(|| invalid("OP exige valor string".to_string()))?;
                    op = Quantifier::from_op(op_str)
                        .ok_or_else(|| invalid(format!("quantificador desconhecido: {:?}", op_str)))?;
                } else {
                    predicates.push(schema.resolve(key, val)?);
                }
            }
            if predicates.is_empty() {
                return Err(invalid(
                    "posição sem predicados (apenas OP não é um padrão)".to_string(),
                ));
            }
            constraints.push(TokenConstraint { predicates, op });
        }

        Ok(Pattern { constraints })
    }

    /// Número de posições do padrão
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> AttrSchema {
        AttrSchema::default()
    }

    #[test]
    fn test_parse_basic_pattern() {
        let p = Pattern::from_json(&schema(), r#"[{"TEXT": "iOS"}, {"IS_DIGIT": true}]"#).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.constraints[0].op, Quantifier::One);
        assert_eq!(
            p.constraints[0].predicates,
            vec![Predicate::TextEquals("iOS".to_string())]
        );
        assert_eq!(p.constraints[1].predicates, vec![Predicate::IsDigit(true)]);
    }

    #[test]
    fn test_parse_quantifiers() {
        let p = Pattern::from_json(
            &schema(),
            r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#,
        )
        .unwrap();
        assert_eq!(p.constraints[1].op, Quantifier::ZeroOrOne);
        assert_eq!(
            p.constraints[1].predicates,
            vec![Predicate::PosEquals(Pos::Det)]
        );
    }

    #[test]
    fn test_conjunction_within_position() {
        // {'LEMMA': 'love', 'POS': 'VERB'} → dois predicados em AND
        let p = Pattern::from_json(&schema(), r#"[{"LEMMA": "love", "POS": "VERB"}]"#).unwrap();
        assert_eq!(p.constraints[0].predicates.len(), 2);
    }

    #[test]
    fn test_in_set_values() {
        let p = Pattern::from_json(&schema(), r#"[{"LOWER": {"IN": ["iphone", "ipad"]}}]"#).unwrap();
        assert_eq!(
            p.constraints[0].predicates,
            vec![Predicate::LowerIn(vec![
                "iphone".to_string(),
                "ipad".to_string()
            ])]
        );
    }

    #[test]
    fn test_tag_accepts_in_set() {
        let p = Pattern::from_json(&schema(), r#"[{"TAG": {"IN": ["NNP", "NNS"]}}]"#).unwrap();
        assert_eq!(
            p.constraints[0].predicates,
            vec![Predicate::TagIn(vec![
                "NNP".to_string(),
                "NNS".to_string()
            ])]
        );
    }

    #[test]
    fn test_unknown_attribute_rejected_at_parse_time() {
        let err = Pattern::from_json(&schema(), r#"[{"SHAPE": "Xxx"}]"#).unwrap_err();
        assert_eq!(
            err,
            MatchError::UnknownAttribute {
                name: "SHAPE".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_pos_rejected() {
        assert!(matches!(
            Pattern::from_json(&schema(), r#"[{"POS": "NOM"}]"#),
            Err(MatchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_bad_op_rejected() {
        assert!(matches!(
            Pattern::from_json(&schema(), r#"[{"POS": "NOUN", "OP": "%"}]"#),
            Err(MatchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            Pattern::from_json(&schema(), "[]"),
            Err(MatchError::InvalidPattern { .. })
        ));
        assert!(matches!(
            Pattern::from_json(&schema(), r#"[{"OP": "?"}]"#),
            Err(MatchError::InvalidPattern { .. })
        ));
    }
}
