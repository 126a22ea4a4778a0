//! # matcher-core — Casamento de Padrões sobre Tokens Anotados
//!
//! Este crate implementa um pipeline didático de análise de texto em inglês
//! cujo estágio central é um **casador de padrões baseado em regras**: padrões
//! são listas ordenadas de restrições por token (texto, lema, classe
//! gramatical, flags lexicais) com quantificadores opcionais, casados sobre
//! documentos anotados.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui e é transformado passo a passo:
//!
//! 1.  **Entrada**: Texto bruto (String).
//! 2.  **Tokenização** ([`tokenizer`]): O texto é dividido em tokens
//!     preservando offsets originais, com fusão de abreviações e separação de
//!     clíticos ("don't" -> "do" + "n't").
//! 3.  **Anotação** ([`tagger`]): Cada token recebe lema, classe gramatical
//!     grossa (UD), tag fina (Penn Treebank) e uma relação de dependência
//!     rasa, via léxicos e regras morfológicas ([`lexicon`]).
//! 4.  **Entidades** ([`entities`]): Gazetteers e regras de forma produzem
//!     entidades rotuladas (ORG, GPE, MONEY, ...).
//! 5.  **Casamento** ([`matcher`]): Padrões registrados ([`pattern`]) são
//!     procurados no documento; cada casamento é um intervalo de tokens.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use matcher_core::{annotate, Matcher};
//!
//! // 1. Anota o texto (tokens + lema + POS + tag)
//! let doc = annotate("New iPhone X release date leaked");
//!
//! // 2. Registra um padrão: dois tokens com as minúsculas dadas
//! let mut matcher = Matcher::new();
//! matcher
//!     .add_json("IPHONE_X", r#"[{"LOWER": "iphone"}, {"LOWER": "x"}]"#)
//!     .unwrap();
//!
//! // 3. Procura os casamentos
//! let matches = matcher.find_matches(&doc).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(doc.span(matches[0].start, matches[0].end).unwrap().text(), "iPhone X");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`matcher`]: O motor de casamento com backtracking limitado.
//! - [`pattern`]: Parsing de padrões JSON para restrições tipadas.
//! - [`pipeline`]: Orquestrador com eventos observáveis (para a UI web).
//! - [`doc`]: O documento anotado e seus intervalos ([`Span`]).

pub mod demo;
pub mod doc;
pub mod entities;
pub mod error;
pub mod explain;
pub mod lexicon;
pub mod matcher;
pub mod pattern;
pub mod pipeline;
pub mod tagger;
pub mod token;
pub mod tokenizer;

pub use doc::{Doc, Span};
pub use entities::{Entity, EntityLabel, EntityRuler};
pub use error::MatchError;
pub use explain::explain;
pub use matcher::{filter_longest, Match, Matcher};
pub use pattern::{AttrSchema, Pattern, Predicate, Quantifier};
pub use pipeline::{AnalysisMode, MatchPipeline, MatchedSpan, PipelineEvent};
pub use tagger::annotate;
pub use token::{Pos, Token};
pub use tokenizer::tokenize;
