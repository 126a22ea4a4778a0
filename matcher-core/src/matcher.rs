//! # O Motor de Casamento de Padrões
//!
//! Varre a sequência de tokens offset a offset, da esquerda para a direita, e
//! tenta alinhar cada padrão registrado contra tokens consecutivos usando
//! **backtracking guloso**.
//!
//! ## Visão de máquina de estados
//!
//! Para cada tentativa `(offset inicial, padrão)`, o estado é o par
//! `(posição no padrão, cursor de token)`. Estado inicial: `(0, offset)`.
//! Estado de aceitação: `(N, cursor)` para qualquer cursor, onde N é o número
//! de posições do padrão. Rejeição: qualquer posição sem alternativa de
//! backtracking restante.
//!
//! ## Semântica dos quantificadores
//!
//! - sem OP: consome exatamente um token que satisfaça a posição;
//! - `?`: consome um se possível, recua para zero se o resto não fechar;
//! - `+`: consome o máximo possível, recua até um;
//! - `*`: consome o máximo possível, recua até zero;
//! - `!`: asserção de largura zero — o token imediato NÃO pode satisfazer a
//!   posição; nada é consumido (não é um "pulo").
//!
//! Cada tentativa devolve **no máximo um** casamento: o primeiro alinhamento
//! completo na ordem de preferência gulosa. Casamentos de padrões diferentes,
//! ou do mesmo padrão em offsets diferentes, podem se sobrepor — nenhuma
//! deduplicação é feita (ver [`filter_longest`] para quem quiser suprimir).
//!
//! ## Terminação garantida
//!
//! Quantificadores ilimitados adjacentes (ex: `[{"OP": "*"}, {"OP": "*"}]`)
//! podem explodir combinatorialmente. Cada tentativa carrega um orçamento de
//! passos; estourar vira [`MatchError::BudgetExceeded`] em vez de travar.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::doc::Doc;
use crate::error::MatchError;
use crate::pattern::{AttrSchema, Pattern, Quantifier, TokenConstraint};
use crate::token::Token;

/// Orçamento default de passos de backtracking por tentativa (offset, padrão)
pub const DEFAULT_BUDGET: usize = 10_000;

/// Um casamento: qual padrão, e o intervalo semiaberto de tokens `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Nome do padrão que casou
    pub pattern: String,
    /// Índice do primeiro token (inclusivo)
    pub start: usize,
    /// Índice após o último token (exclusivo)
    pub end: usize,
}

/// O casador de padrões.
///
/// Mantém a tabela de padrões nomeados e o esquema de atributos. Registrar um
/// padrão muta a tabela; casar é uma leitura pura — `&self` — então um
/// `Matcher` pronto pode ser compartilhado entre threads à vontade.
///
/// # Exemplo
///
/// ```rust
/// use matcher_core::matcher::Matcher;
/// use matcher_core::tagger::annotate;
///
/// let mut matcher = Matcher::new();
/// matcher
///     .add_json("IPHONE_PATTERN", r#"[{"TEXT": "iPhone"}, {"TEXT": "X"}]"#)
///     .unwrap();
///
/// let doc = annotate("New iPhone X release date leaked");
/// let matches = matcher.find_matches(&doc).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!(doc.span(matches[0].start, matches[0].end).unwrap().text(), "iPhone X");
/// ```
pub struct Matcher {
    schema: AttrSchema,
    /// Padrões na ordem de registro (a ordem de varredura dentro de um offset)
    patterns: Vec<(String, Pattern)>,
    budget: usize,
}

impl Matcher {
    /// Cria um matcher com o esquema de atributos default
    pub fn new() -> Self {
        Self::with_schema(AttrSchema::default())
    }

    /// Cria um matcher com um esquema explícito.
    ///
    /// Matchers construídos com o mesmo esquema concordam sobre a extração de
    /// atributos — é a injeção de dependência que substitui o vocabulário
    /// global compartilhado.
    pub fn with_schema(schema: AttrSchema) -> Self {
        Matcher {
            schema,
            patterns: Vec::new(),
            budget: DEFAULT_BUDGET,
        }
    }

    /// Ajusta o orçamento de backtracking por tentativa
    pub fn set_budget(&mut self, steps: usize) {
        self.budget = steps;
    }

    /// O esquema de atributos deste matcher
    pub fn schema(&self) -> &AttrSchema {
        &self.schema
    }

    /// Registra um padrão já compilado sob um nome único.
    ///
    /// Nome duplicado falha com [`MatchError::DuplicatePattern`] e deixa o
    /// registro original intacto.
    pub fn add(&mut self, name: &str, pattern: Pattern) -> Result<(), MatchError> {
        if pattern.is_empty() {
            return Err(MatchError::InvalidPattern {
                reason: "padrão vazio".to_string(),
            });
        }
        if self.patterns.iter().any(|(n, _)| n == name) {
            return Err(MatchError::DuplicatePattern {
                name: name.to_string(),
            });
        }
        self.patterns.push((name.to_string(), pattern));
        Ok(())
    }

    /// Compila um padrão da forma JSON e registra
    pub fn add_json(&mut self, name: &str, json: &str) -> Result<(), MatchError> {
        let pattern = Pattern::from_json(&self.schema, json)?;
        self.add(name, pattern)
    }

    /// Número de padrões registrados
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Encontra todos os casamentos de todos os padrões no documento.
    ///
    /// Varredura: offsets em ordem crescente; dentro de um offset, padrões na
    /// ordem de registro. Zero casamentos é um resultado vazio válido, não um
    /// erro. Determinístico: duas chamadas sobre o mesmo `Doc` imutável
    /// devolvem exatamente a mesma lista.
    pub fn find_matches(&self, doc: &Doc) -> Result<Vec<Match>, MatchError> {
        let mut out = Vec::new();
        for start in 0..doc.len() {
            self.matches_at(doc.tokens(), start, &mut out)?;
        }
        Ok(out)
    }

    /// Variante paralela: o casamento é uma leitura pura sem dependência entre
    /// offsets, então a varredura é dividida entre threads via rayon. O
    /// resultado é idêntico, na mesma ordem, ao de [`Matcher::find_matches`].
    pub fn find_matches_par(&self, doc: &Doc) -> Result<Vec<Match>, MatchError> {
        let per_offset: Result<Vec<Vec<Match>>, MatchError> = (0..doc.len())
            .into_par_iter()
            .map(|start| {
                let mut local = Vec::new();
                self.matches_at(doc.tokens(), start, &mut local)?;
                Ok(local)
            })
            .collect();
        Ok(per_offset?.into_iter().flatten().collect())
    }

    /// Tenta todos os padrões a partir de um offset, acumulando em `out`
    fn matches_at(
        &self,
        tokens: &[Token],
        start: usize,
        out: &mut Vec<Match>,
    ) -> Result<(), MatchError> {
        for (name, pattern) in &self.patterns {
            let mut steps = 0usize;
            match self.align(&pattern.constraints, tokens, start, &mut steps) {
                Ok(Some(end)) => out.push(Match {
                    pattern: name.clone(),
                    start,
                    end,
                }),
                Ok(None) => {}
                Err(()) => {
                    return Err(MatchError::BudgetExceeded {
                        pattern: name.clone(),
                        start,
                        steps: self.budget,
                    })
                }
            }
        }
        Ok(())
    }

    /// Alinhamento recursivo com backtracking guloso.
    ///
    /// Devolve `Ok(Some(cursor_final))` no primeiro alinhamento completo,
    /// `Ok(None)` quando nenhuma alternativa resta, `Err(())` se o orçamento
    /// de passos estourou.
    fn align(
        &self,
        constraints: &[TokenConstraint],
        tokens: &[Token],
        cursor: usize,
        steps: &mut usize,
    ) -> Result<Option<usize>, ()> {
        *steps += 1;
        if *steps > self.budget {
            return Err(());
        }

        let (head, rest) = match constraints.split_first() {
            Some(split) => split,
            // Todas as posições satisfeitas: aceita no cursor atual
            None => return Ok(Some(cursor)),
        };

        let head_matches =
            |at: usize| -> bool { at < tokens.len() && head.satisfied_by(&tokens[at]) };

        match head.op {
            Quantifier::One => {
                if head_matches(cursor) {
                    self.align(rest, tokens, cursor + 1, steps)
                } else {
                    Ok(None)
                }
            }
            Quantifier::ZeroOrOne => {
                // Guloso: tenta consumir um; recua para zero se o resto falhar
                if head_matches(cursor) {
                    if let Some(end) = self.align(rest, tokens, cursor + 1, steps)? {
                        return Ok(Some(end));
                    }
                }
                self.align(rest, tokens, cursor, steps)
            }
            Quantifier::OneOrMore | Quantifier::ZeroOrMore => {
                let floor = if head.op == Quantifier::OneOrMore { 1 } else { 0 };
                // Consumo máximo possível a partir do cursor
                let mut ceil = 0;
                while head_matches(cursor + ceil) {
                    ceil += 1;
                }
                if ceil < floor {
                    return Ok(None);
                }
                // Recua do consumo máximo até o piso
                for take in (floor..=ceil).rev() {
                    if let Some(end) = self.align(rest, tokens, cursor + take, steps)? {
                        return Ok(Some(end));
                    }
                }
                Ok(None)
            }
            Quantifier::Negate => {
                // Largura zero: o token imediato não pode satisfazer a posição.
                // No fim da sequência não há token, logo a negação vale.
                if head_matches(cursor) {
                    Ok(None)
                } else {
                    self.align(rest, tokens, cursor, steps)
                }
            }
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Filtra uma lista de casamentos para os mais longos sem sobreposição.
///
/// Política explícita para quem não quer sobreposições: ordena por tamanho
/// decrescente (desempate pelo início), aceita gulosamente os que não colidem
/// com nenhum já aceito e devolve em ordem de início. Casamentos vazios nunca
/// colidem e são preservados.
pub fn filter_longest(matches: &[Match]) -> Vec<Match> {
    let mut by_len: Vec<&Match> = matches.iter().collect();
    by_len.sort_by(|a, b| (b.end - b.start).cmp(&(a.end - a.start)).then(a.start.cmp(&b.start)));

    let mut kept: Vec<Match> = Vec::new();
    for cand in by_len {
        let overlaps = kept
            .iter()
            .any(|k| cand.start < k.end && k.start < cand.end);
        if !overlaps {
            kept.push(cand.clone());
        }
    }
    kept.sort_by_key(|m| (m.start, m.end));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::annotate;

    fn matcher_with(name: &str, json: &str) -> Matcher {
        let mut m = Matcher::new();
        m.add_json(name, json).unwrap();
        m
    }

    #[test]
    fn test_exact_text_match() {
        let m = matcher_with("IPHONE", r#"[{"TEXT": "iPhone"}, {"TEXT": "X"}]"#);
        let doc = annotate("New iPhone X release date leaked");
        let found = m.find_matches(&doc).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].pattern, "IPHONE");
        assert_eq!(doc.span(found[0].start, found[0].end).unwrap().text(), "iPhone X");
    }

    #[test]
    fn test_ios_version_spans() {
        let m = matcher_with("IOS", r#"[{"TEXT": "iOS"}, {"IS_DIGIT": true}]"#);
        let doc = annotate(
            "After the iOS update nothing like iOS 7. Most of iOS 11 remains as in iOS 10.",
        );
        let found = m.find_matches(&doc).unwrap();
        let texts: Vec<&str> = found
            .iter()
            .map(|f| doc.span(f.start, f.end).unwrap().text())
            .collect();
        assert_eq!(texts, vec!["iOS 7", "iOS 11", "iOS 10"]);
    }

    #[test]
    fn test_optional_determiner() {
        // [{LEMMA: buy}, {POS: DET, OP: ?}, {POS: NOUN}] casa com e sem artigo
        let m = matcher_with(
            "BUY",
            r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#,
        );

        let with_det = annotate("I bought a smartphone");
        let found = m.find_matches(&with_det).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (1, 4));

        let without_det = annotate("I'm buying apps");
        let found = m.find_matches(&without_det).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            without_det.span(found[0].start, found[0].end).unwrap().text(),
            "buying apps"
        );
    }

    #[test]
    fn test_lemma_plus_propn() {
        let m = matcher_with("DL", r#"[{"LEMMA": "download"}, {"POS": "PROPN"}]"#);
        let doc = annotate("i downloaded Fortnite and was downloading Minecraft to download apps");
        let found = m.find_matches(&doc).unwrap();
        let texts: Vec<&str> = found
            .iter()
            .map(|f| doc.span(f.start, f.end).unwrap().text())
            .collect();
        // Só onde o nome próprio segue imediatamente a forma de "download"
        assert_eq!(texts, vec!["downloaded Fortnite", "downloading Minecraft"]);
    }

    #[test]
    fn test_plus_backtracks_to_one() {
        // ADJ+ seguido de NOUN: o "+" guloso recua quando engole demais
        let m = matcher_with("AN", r#"[{"POS": "ADJ", "OP": "+"}, {"POS": "NOUN"}]"#);
        let doc = annotate("a beautiful design");
        let found = m.find_matches(&doc).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.span(found[0].start, found[0].end).unwrap().text(), "beautiful design");
    }

    #[test]
    fn test_star_superset_of_plus() {
        let star = matcher_with("S", r#"[{"POS": "ADJ", "OP": "*"}, {"POS": "NOUN"}]"#);
        let plus = matcher_with("P", r#"[{"POS": "ADJ", "OP": "+"}, {"POS": "NOUN"}]"#);
        let doc = annotate("a beautiful design and smart search");

        let star_offsets: Vec<usize> =
            star.find_matches(&doc).unwrap().iter().map(|m| m.start).collect();
        let plus_offsets: Vec<usize> =
            plus.find_matches(&doc).unwrap().iter().map(|m| m.start).collect();

        // Todo offset casado por "+" também é casado por "*"
        for off in &plus_offsets {
            assert!(star_offsets.contains(off));
        }
        // E "*" casa adicionalmente o caso de zero adjetivos
        assert!(star_offsets.len() > plus_offsets.len());
    }

    #[test]
    fn test_negation_is_zero_width() {
        // [{LOWER: ios}, {IS_DIGIT: true, OP: !}, {LOWER: update}]:
        // a posição negada não consome token algum
        let m = matcher_with(
            "NEG",
            r#"[{"LOWER": "ios"}, {"IS_DIGIT": true, "OP": "!"}, {"LOWER": "update"}]"#,
        );
        let doc = annotate("the iOS update arrived");
        let found = m.find_matches(&doc).unwrap();
        assert_eq!(found.len(), 1);
        // span de 2 tokens: "iOS update" — nada foi consumido pela negação
        assert_eq!(found[0].end - found[0].start, 2);

        let blocked = annotate("the iOS 7 update arrived");
        assert!(m.find_matches(&blocked).unwrap().is_empty());
    }

    #[test]
    fn test_tag_in_set() {
        // Forma de conjunto de candidatos também vale para TAG
        let m = matcher_with("PAST_OR_GERUND", r#"[{"TAG": {"IN": ["VBD", "VBG"]}}]"#);
        let doc = annotate("I bought a smartphone. Now I'm buying apps.");
        let texts: Vec<&str> = m
            .find_matches(&doc)
            .unwrap()
            .iter()
            .map(|f| doc.span(f.start, f.end).unwrap().text())
            .collect();
        assert_eq!(texts, vec!["bought", "buying"]);
    }

    #[test]
    fn test_duplicate_name_keeps_original() {
        let mut m = Matcher::new();
        m.add_json("PAT", r#"[{"LOWER": "iphone"}]"#).unwrap();
        let err = m.add_json("PAT", r#"[{"LOWER": "ipad"}]"#).unwrap_err();
        assert_eq!(
            err,
            MatchError::DuplicatePattern {
                name: "PAT".to_string()
            }
        );
        // O registro original continua valendo
        let doc = annotate("my iPhone broke");
        assert_eq!(m.find_matches(&doc).unwrap().len(), 1);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let m = matcher_with("NADA", r#"[{"LOWER": "zeppelin"}]"#);
        let doc = annotate("nothing to see here");
        assert!(m.find_matches(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let m = matcher_with(
            "BUY",
            r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#,
        );
        let doc = annotate("I bought a smartphone. Now I'm buying apps.");
        let first = m.find_matches(&doc).unwrap();
        let second = m.find_matches(&doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_agrees_with_sequential() {
        let mut m = Matcher::new();
        m.add_json("IOS", r#"[{"TEXT": "iOS"}, {"IS_DIGIT": true}]"#).unwrap();
        m.add_json("AN", r#"[{"POS": "ADJ"}, {"POS": "NOUN"}, {"POS": "NOUN", "OP": "?"}]"#)
            .unwrap();
        let doc = annotate(
            "Features include a beautiful design, smart search, automatic labels \
             and optional voice responses. Nothing like iOS 7 or iOS 10.",
        );
        assert_eq!(m.find_matches(&doc).unwrap(), m.find_matches_par(&doc).unwrap());
    }

    #[test]
    fn test_budget_exceeded_surfaces_as_error() {
        let mut m = Matcher::new();
        // Pilha de quantificadores ilimitados sobre o mesmo predicado:
        // explosão combinatória clássica quando o resto nunca fecha
        m.add_json(
            "EXPLODE",
            r#"[{"IS_ALPHA": true, "OP": "*"}, {"IS_ALPHA": true, "OP": "*"},
                {"IS_ALPHA": true, "OP": "*"}, {"IS_ALPHA": true, "OP": "*"},
                {"IS_ALPHA": true, "OP": "*"}, {"IS_ALPHA": true, "OP": "*"},
                {"TEXT": "zzz"}]"#,
        )
        .unwrap();
        m.set_budget(500);
        let doc = annotate("one two three four five six seven eight nine ten eleven twelve");
        let err = m.find_matches(&doc).unwrap_err();
        assert!(matches!(err, MatchError::BudgetExceeded { .. }));
    }

    #[test]
    fn test_overlapping_matches_are_all_kept() {
        // Dois padrões que casam na mesma região: ambos são reportados
        let mut m = Matcher::new();
        m.add_json("A", r#"[{"POS": "ADJ"}, {"POS": "NOUN"}]"#).unwrap();
        m.add_json("B", r#"[{"POS": "NOUN"}]"#).unwrap();
        let doc = annotate("a beautiful design");
        let found = m.find_matches(&doc).unwrap();
        assert_eq!(found.len(), 2);

        let longest = filter_longest(&found);
        assert_eq!(longest.len(), 1);
        assert_eq!(longest[0].pattern, "A");
    }
}
