//! # Doc e Span — O Texto Processado e Suas Vistas
//!
//! O [`Doc`] é o resultado do pipeline de anotação: ele é **dono** do texto
//! original e da sequência de tokens. O [`Span`] é uma **vista** (view) sobre um
//! intervalo contíguo de tokens — não copia dado algum.
//!
//! ## Invariante de Span
//!
//! Todo span satisfaz `0 <= start <= end <= doc.len()`. O construtor [`Doc::span`]
//! valida os limites e devolve `None` para intervalos fora da sequência, então
//! nenhum `Span` inválido circula pelo sistema.

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Um texto processado: o texto original mais seus tokens anotados.
///
/// Criado pelo anotador ([`crate::tagger::annotate`]); imutável depois disso.
/// O casador de padrões só faz leituras, então um `Doc` pode ser compartilhado
/// livremente entre threads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doc {
    /// O texto original, intacto
    pub text: String,
    tokens: Vec<Token>,
}

impl Doc {
    /// Monta um Doc a partir do texto e dos tokens já anotados.
    ///
    /// Os índices sequenciais e as flags de espaçamento são normalizados aqui,
    /// para que nenhum chamador precise se preocupar com isso.
    pub fn new(text: &str, mut tokens: Vec<Token>) -> Self {
        let len = tokens.len();
        for i in 0..len {
            tokens[i].index = i;
            tokens[i].ws = if i + 1 < len {
                tokens[i].end < tokens[i + 1].start
            } else {
                tokens[i].end < text.len()
            };
        }
        Doc {
            text: text.to_string(),
            tokens,
        }
    }

    /// Número de tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Acesso à sequência completa de tokens
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token individual por índice
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Itera sobre os tokens
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Cria uma vista sobre o intervalo semiaberto `[start, end)` de tokens.
    ///
    /// Devolve `None` se os limites violarem `start <= end <= len`.
    pub fn span(&self, start: usize, end: usize) -> Option<Span<'_>> {
        if start <= end && end <= self.tokens.len() {
            Some(Span {
                doc: self,
                start,
                end,
            })
        } else {
            None
        }
    }
}

impl std::ops::Index<usize> for Doc {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

/// Uma fatia contígua de um [`Doc`]: intervalo semiaberto `[start, end)` de tokens.
///
/// É apenas uma vista — não contém dados próprios. O texto do span é recuperado
/// diretamente dos offsets de byte dos tokens, preservando o espaçamento original
/// (ex: o span sobre `["iOS", "7"]` devolve `"iOS 7"`, com o espaço).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<'a> {
    doc: &'a Doc,
    /// Índice do primeiro token (inclusivo)
    pub start: usize,
    /// Índice após o último token (exclusivo)
    pub end: usize,
}

impl<'a> Span<'a> {
    /// Texto do span com o espaçamento original. Um span vazio devolve `""`.
    pub fn text(&self) -> &'a str {
        if self.start == self.end {
            return "";
        }
        let first = &self.doc[self.start];
        let last = &self.doc[self.end - 1];
        &self.doc.text[first.start..last.end]
    }

    /// Os tokens cobertos pela vista
    pub fn tokens(&self) -> &'a [Token] {
        &self.doc.tokens[self.start..self.end]
    }

    /// Número de tokens no span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::annotate;

    #[test]
    fn test_span_preserves_original_spacing() {
        let doc = annotate("Hello world!");
        let span = doc.span(0, 2).unwrap();
        assert_eq!(span.text(), "Hello world");
    }

    #[test]
    fn test_span_bounds_checked() {
        let doc = annotate("Hello world!");
        assert!(doc.span(0, doc.len()).is_some());
        assert!(doc.span(0, doc.len() + 1).is_none());
        assert!(doc.span(2, 1).is_none());
    }

    #[test]
    fn test_empty_span_has_empty_text() {
        let doc = annotate("Hello");
        let span = doc.span(1, 1).unwrap();
        assert!(span.is_empty());
        assert_eq!(span.text(), "");
    }

    #[test]
    fn test_ws_flags() {
        let doc = annotate("It costs $5.");
        // "$" não tem espaço antes do "5"; "5" não tem espaço antes do "."
        let dollar = doc.iter().find(|t| t.text == "$").unwrap();
        assert!(!dollar.ws);
        let last = &doc[doc.len() - 1];
        assert!(!last.ws);
    }
}
