//! # Pipeline — Orquestrador com Eventos Observáveis
//!
//! Coordena os estágios (tokenização/anotação, entidades, casamento de
//! padrões) e emite eventos em cada passo via um canal Rust (`mpsc`),
//! permitindo que o servidor WebSocket transmita o progresso em tempo real
//! para o cliente.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::doc::Doc;
use crate::entities::{Entity, EntityRuler};
use crate::error::MatchError;
use crate::matcher::{Match, Matcher};
use crate::tagger::annotate;
use crate::token::Token;

/// Quais estágios do pipeline executar.
///
/// Os modos seguem a progressão das lições: primeiro só tokens, depois as
/// anotações gramaticais, depois entidades e por fim o casador de padrões.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Apenas tokenização: mostra os tokens e seus atributos lexicais
    TokensOnly,
    /// Tokenização + anotações (lema, POS, tag, dependência)
    Tagging,
    /// Anotações + reconhecimento de entidades por regras
    Entities,
    /// Anotações + casamento de padrões (sem entidades)
    Matching,
    /// Tudo: anotações, entidades e padrões
    Full,
}

impl Default for AnalysisMode {
    fn default() -> Self {
        AnalysisMode::Full
    }
}

/// Um casamento pronto para serialização: o intervalo mais o texto recuperado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSpan {
    pub pattern: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl MatchedSpan {
    fn from_match(m: &Match, doc: &Doc) -> Self {
        MatchedSpan {
            pattern: m.pattern.clone(),
            start: m.start,
            end: m.end,
            text: doc
                .span(m.start, m.end)
                .map(|s| s.text().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Eventos emitidos pelo pipeline durante o processamento.
///
/// Cada variante carrega os dados necessários para renderizar uma etapa da
/// visualização passo-a-passo no frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: Tokenização e anotação concluídas.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2** (loop): atributos anotados de um token, para exibição
    /// incremental.
    TokenAnnotated {
        index: usize,
        text: String,
        lemma: String,
        pos: String,
        tag: String,
        dep: String,
    },
    /// **Passo 3** (loop): uma entidade identificada pelas regras.
    EntityFound { entity: Entity },
    /// **Passo 4** (loop): um padrão casou.
    PatternMatched { matched: MatchedSpan },
    /// **Conclusão**: resultado final consolidado.
    Done {
        tokens: Vec<Token>,
        entities: Vec<Entity>,
        matches: Vec<MatchedSpan>,
        total_tokens: usize,
        processing_ms: u64,
    },
    /// **Falha**: erro irrecuperável (ex: orçamento de backtracking estourado).
    Error { message: String },
}

/// O pipeline principal: anotação + entidades + casador.
///
/// # Modos de uso
/// - **Sync**: [`MatchPipeline::analyze`] para scripts e chamadas diretas.
/// - **Streaming**: [`MatchPipeline::analyze_streaming`] para UIs reativas
///   (via WebSocket).
pub struct MatchPipeline {
    ruler: EntityRuler,
    matcher: Matcher,
}

impl MatchPipeline {
    /// Cria o pipeline com os padrões canônicos das lições já registrados.
    pub fn new() -> Self {
        let mut matcher = Matcher::new();
        for (name, json) in crate::demo::demo_patterns() {
            // Padrões embutidos: a falha aqui seria um bug de construção
            matcher
                .add_json(name, json)
                .unwrap_or_else(|e| panic!("padrão de demonstração inválido ({}): {}", name, e));
        }
        Self {
            ruler: EntityRuler::new(),
            matcher,
        }
    }

    /// Cria o pipeline com um matcher customizado (padrões do chamador).
    pub fn with_matcher(matcher: Matcher) -> Self {
        Self {
            ruler: EntityRuler::new(),
            matcher,
        }
    }

    /// Acesso ao matcher (ex: para registrar padrões adicionais)
    pub fn matcher_mut(&mut self) -> &mut Matcher {
        &mut self.matcher
    }

    /// Processa o texto de forma síncrona e devolve o resultado final.
    ///
    /// Erros do casador (ex: orçamento de backtracking estourado) sobem via
    /// `Result` — um resultado vazio significa sempre "nenhum casamento",
    /// nunca uma falha engolida.
    pub fn analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<(Doc, Vec<Entity>, Vec<MatchedSpan>), MatchError> {
        let doc = annotate(text);
        let entities = if matches!(mode, AnalysisMode::Entities | AnalysisMode::Full) {
            self.ruler.apply(&doc)
        } else {
            vec![]
        };
        let matches = if matches!(mode, AnalysisMode::Matching | AnalysisMode::Full) {
            self.matcher
                .find_matches(&doc)?
                .iter()
                .map(|m| MatchedSpan::from_match(m, &doc))
                .collect()
        } else {
            vec![]
        };
        Ok((doc, entities, matches))
    }

    /// Executa o pipeline enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de eventos
    /// 1. `TokenizationDone`: tokens anotados.
    /// 2. `TokenAnnotated` (loop): anotações de cada token (modos >= Tagging).
    /// 3. `EntityFound` (loop): entidades das regras (Entities/Full).
    /// 4. `PatternMatched` (loop): casamentos (Matching/Full).
    /// 5. `Done`: resultado consolidado.
    pub fn analyze_streaming(
        &self,
        text: &str,
        mode: AnalysisMode,
        tx: mpsc::Sender<PipelineEvent>,
    ) {
        let start = std::time::Instant::now();

        // === Passo 1: Tokenização + anotação ===
        let doc = annotate(text);
        let total = doc.len();
        let _ = tx.send(PipelineEvent::TokenizationDone {
            tokens: doc.tokens().to_vec(),
            total,
        });

        if doc.is_empty() {
            let _ = tx.send(PipelineEvent::Done {
                tokens: vec![],
                entities: vec![],
                matches: vec![],
                total_tokens: 0,
                processing_ms: start.elapsed().as_millis() as u64,
            });
            return;
        }

        // === Passo 2: Anotações por token ===
        if mode != AnalysisMode::TokensOnly {
            for token in doc.iter() {
                let _ = tx.send(PipelineEvent::TokenAnnotated {
                    index: token.index,
                    text: token.text.clone(),
                    lemma: token.lemma.clone(),
                    pos: token.pos.name().to_string(),
                    tag: token.tag.clone(),
                    dep: token.dep.clone(),
                });
            }
        }

        // === Passo 3: Entidades ===
        let entities = if matches!(mode, AnalysisMode::Entities | AnalysisMode::Full) {
            let found = self.ruler.apply(&doc);
            for entity in &found {
                let _ = tx.send(PipelineEvent::EntityFound {
                    entity: entity.clone(),
                });
            }
            found
        } else {
            vec![]
        };

        // === Passo 4: Casamento de padrões ===
        let matches = if matches!(mode, AnalysisMode::Matching | AnalysisMode::Full) {
            match self.matcher.find_matches(&doc) {
                Ok(found) => {
                    let spans: Vec<MatchedSpan> = found
                        .iter()
                        .map(|m| MatchedSpan::from_match(m, &doc))
                        .collect();
                    for matched in &spans {
                        let _ = tx.send(PipelineEvent::PatternMatched {
                            matched: matched.clone(),
                        });
                    }
                    spans
                }
                Err(e) => {
                    let _ = tx.send(PipelineEvent::Error {
                        message: e.to_string(),
                    });
                    return;
                }
            }
        } else {
            vec![]
        };

        let _ = tx.send(PipelineEvent::Done {
            tokens: doc.tokens().to_vec(),
            entities,
            matches,
            total_tokens: total,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }
}

impl Default for MatchPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_full() {
        let pipeline = MatchPipeline::new();
        let (doc, entities, matches) = pipeline
            .analyze(
                "New iPhone X release date leaked as Apple reveals pre-orders by mistake",
                AnalysisMode::Full,
            )
            .unwrap();
        assert!(!doc.is_empty());
        // "Apple" e "iPhone" vêm das regras de entidade
        assert!(entities.iter().any(|e| e.text == "Apple"));
        // "iPhone X" vem do padrão da lição
        assert!(matches.iter().any(|m| m.text == "iPhone X"));
    }

    #[test]
    fn test_pipeline_empty_text() {
        let pipeline = MatchPipeline::new();
        let (doc, entities, matches) = pipeline.analyze("", AnalysisMode::Full).unwrap();
        assert!(doc.is_empty());
        assert!(entities.is_empty());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_mode_gates_stages() {
        let pipeline = MatchPipeline::new();
        let (_, entities, matches) = pipeline
            .analyze("i downloaded Fortnite", AnalysisMode::TokensOnly)
            .unwrap();
        assert!(entities.is_empty());
        assert!(matches.is_empty());

        let (_, entities, matches) = pipeline
            .analyze("i downloaded Fortnite", AnalysisMode::Matching)
            .unwrap();
        assert!(entities.is_empty());
        assert!(!matches.is_empty());
    }

    #[test]
    fn test_budget_error_surfaces_in_sync_analyze() {
        // O orçamento estourado sobe como Err, nunca como lista vazia
        let mut matcher = crate::matcher::Matcher::new();
        matcher
            .add_json(
                "EXPLODE",
                r#"[{"IS_ALPHA": true, "OP": "*"}, {"IS_ALPHA": true, "OP": "*"},
                    {"IS_ALPHA": true, "OP": "*"}, {"IS_ALPHA": true, "OP": "*"},
                    {"IS_ALPHA": true, "OP": "*"}, {"IS_ALPHA": true, "OP": "*"},
                    {"TEXT": "zzz"}]"#,
            )
            .unwrap();
        matcher.set_budget(500);
        let pipeline = MatchPipeline::with_matcher(matcher);
        let err = pipeline
            .analyze(
                "one two three four five six seven eight nine ten eleven twelve",
                AnalysisMode::Matching,
            )
            .unwrap_err();
        assert!(matches!(err, MatchError::BudgetExceeded { .. }));
    }

    #[test]
    fn test_pipeline_events_streaming() {
        let pipeline = MatchPipeline::new();
        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming("2018 FIFA World Cup: France won!", AnalysisMode::Full, tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(!events.is_empty());

        assert!(
            matches!(&events[0], PipelineEvent::TokenizationDone { .. }),
            "primeiro evento deve ser TokenizationDone"
        );
        let last = events.last().unwrap();
        assert!(
            matches!(last, PipelineEvent::Done { .. }),
            "último evento deve ser Done"
        );

        // O padrão WORLDCUP_PATTERN deve ter casado "2018 FIFA World Cup:"
        let matched = events.iter().any(|e| {
            matches!(e, PipelineEvent::PatternMatched { matched }
                if matched.pattern == "WORLDCUP_PATTERN")
        });
        assert!(matched);
    }
}
