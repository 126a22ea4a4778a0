//! # Erros do Casador de Padrões
//!
//! Todos os erros de configuração são detectados **no registro** do padrão,
//! nunca dentro do loop de matching. O único erro possível em tempo de
//! casamento é o estouro do orçamento de backtracking, que vira
//! [`MatchError::BudgetExceeded`] em vez de travar o processo.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// O padrão referencia um atributo que o esquema de tokens não expõe
    #[error("atributo desconhecido no padrão: {name:?}")]
    UnknownAttribute { name: String },

    /// Já existe um padrão registrado com este nome (o original permanece intacto)
    #[error("já existe um padrão registrado com o nome {name:?}")]
    DuplicatePattern { name: String },

    /// Padrão malformado: JSON inválido, quantificador desconhecido, valor
    /// de tipo errado, classe gramatical inexistente, sequência vazia
    #[error("padrão inválido: {reason}")]
    InvalidPattern { reason: String },

    /// O backtracking excedeu o orçamento de passos para uma tentativa.
    /// Padrões com quantificadores ilimitados adjacentes podem explodir
    /// combinatorialmente; o orçamento garante terminação.
    #[error("orçamento de backtracking excedido ({steps} passos) no padrão {pattern:?}, offset {start}")]
    BudgetExceeded {
        pattern: String,
        start: usize,
        steps: usize,
    },
}
