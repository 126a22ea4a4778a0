//! # Reconhecedor de Entidades por Regras
//!
//! Reproduz a superfície `doc.ents` das lições originais sem nenhum modelo
//! estatístico: gazetteers (listas de entidades conhecidas) mais regras de
//! forma (cifrão + número → MONEY, ano de quatro dígitos → DATE, sequência
//! capitalizada → nome próprio genérico).
//!
//! ## Por que regras?
//!
//! Listas garantem alta precisão para entidades bem conhecidas ("Apple"
//! sempre é ORG neste domínio), e as regras de forma cobrem padrões fechados
//! que nunca dependem de contexto. A cobertura é deliberadamente limitada —
//! é exatamente a limitação que a lição sobre o matcher usa como motivação
//! ("iPhone X" não vem anotado como entidade e precisa de um padrão).

use serde::{Deserialize, Serialize};

use crate::doc::Doc;
use crate::token::Pos;

/// Rótulos de entidade reconhecidos pelo reconhecedor de regras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// Pessoa: "Dr. Smith"
    Person,
    /// Organização: "Apple", "FIFA"
    Org,
    /// Entidade geopolítica (país, cidade, estado): "U.K.", "France"
    Gpe,
    /// Produto: "Fortnite", "Windows"
    Product,
    /// Valor monetário: "$1 billion"
    Money,
    /// Data ou ano: "2018"
    Date,
}

impl EntityLabel {
    /// Nome do rótulo como string (para serialização e UI)
    pub fn name(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Product => "PRODUCT",
            EntityLabel::Money => "MONEY",
            EntityLabel::Date => "DATE",
        }
    }
}

/// Uma entidade identificada: intervalo semiaberto de tokens + rótulo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Texto da entidade com o espaçamento original (ex: "$1 billion")
    pub text: String,
    pub label: EntityLabel,
    /// Índice do primeiro token (inclusivo)
    pub start: usize,
    /// Índice após o último token (exclusivo)
    pub end: usize,
    /// Nome da regra que identificou a entidade
    pub rule_name: String,
}

/// Reconhecedor de entidades baseado em gazetteers e regras de forma.
pub struct EntityRuler {
    /// Organizações conhecidas (minúsculas)
    orgs: Vec<&'static str>,
    /// Entidades geopolíticas (minúsculas, podem ter múltiplas palavras)
    gpes: Vec<Vec<&'static str>>,
    /// Produtos conhecidos (minúsculas)
    products: Vec<&'static str>,
    /// Títulos que precedem nomes de pessoa
    person_titles: Vec<&'static str>,
}

impl EntityRuler {
    pub fn new() -> Self {
        Self {
            orgs: vec![
                "apple", "google", "microsoft", "boeing", "nintendo", "amazon",
                "fifa", "sony", "samsung", "ibm", "intel", "netflix",
            ],
            gpes: vec![
                vec!["u.k."], vec!["u.s."], vec!["uk"], vec!["usa"],
                vec!["france"], vec!["brazil"], vec!["germany"], vec!["england"],
                vec!["russia"], vec!["china"], vec!["london"], vec!["paris"],
                vec!["new", "york"],
            ],
            products: vec![
                "iphone", "ipad", "ios", "android", "windows", "winzip",
                "fortnite", "minecraft", "xbox", "playstation",
            ],
            person_titles: vec!["dr.", "mr.", "mrs.", "ms.", "prof.", "president"],
        }
    }

    /// Aplica todas as regras e devolve as entidades em ordem de início.
    ///
    /// Cada token participa de no máximo uma entidade: a primeira regra que
    /// reivindica um intervalo vence (gazetteers primeiro, formas depois).
    pub fn apply(&self, doc: &Doc) -> Vec<Entity> {
        let tokens = doc.tokens();
        let mut claimed = vec![false; tokens.len()];
        let mut entities = Vec::new();

        let claim = |entities: &mut Vec<Entity>,
                         claimed: &mut Vec<bool>,
                         start: usize,
                         end: usize,
                         label: EntityLabel,
                         rule: &str| {
            if (start..end).any(|i| claimed[i]) {
                return;
            }
            for flag in claimed[start..end].iter_mut() {
                *flag = true;
            }
            entities.push(Entity {
                text: doc.span(start, end).map(|s| s.text().to_string()).unwrap_or_default(),
                label,
                start,
                end,
                rule_name: rule.to_string(),
            });
        };

        // 1. GPEs (n-gramas, para cobrir "New York")
        for i in 0..tokens.len() {
            for parts in &self.gpes {
                let end = i + parts.len();
                if end <= tokens.len()
                    && parts
                        .iter()
                        .enumerate()
                        .all(|(j, part)| tokens[i + j].lower == *part)
                {
                    claim(&mut entities, &mut claimed, i, end, EntityLabel::Gpe, "gpe_gazetteer");
                }
            }
        }

        // 2. Organizações (token único)
        for (i, token) in tokens.iter().enumerate() {
            if self.orgs.contains(&token.lower.as_str()) {
                claim(&mut entities, &mut claimed, i, i + 1, EntityLabel::Org, "org_gazetteer");
            }
        }

        // 3. Produtos (token único)
        for (i, token) in tokens.iter().enumerate() {
            if self.products.contains(&token.lower.as_str()) {
                claim(
                    &mut entities,
                    &mut claimed,
                    i,
                    i + 1,
                    EntityLabel::Product,
                    "product_gazetteer",
                );
            }
        }

        // 4. Dinheiro: "$" seguido de número, com multiplicador opcional
        //    ("$5", "$1 billion")
        for i in 0..tokens.len().saturating_sub(1) {
            if tokens[i].text == "$" && tokens[i + 1].like_num {
                let mut end = i + 2;
                if end < tokens.len()
                    && matches!(
                        tokens[end].lower.as_str(),
                        "hundred" | "thousand" | "million" | "billion" | "trillion"
                    )
                {
                    end += 1;
                }
                claim(&mut entities, &mut claimed, i, end, EntityLabel::Money, "money_shape");
            }
        }

        // 5. Datas: ano de quatro dígitos
        for (i, token) in tokens.iter().enumerate() {
            if token.is_digit && token.text.len() == 4 {
                if let Ok(year) = token.text.parse::<u32>() {
                    if (1000..=2999).contains(&year) {
                        claim(&mut entities, &mut claimed, i, i + 1, EntityLabel::Date, "year_shape");
                    }
                }
            }
        }

        // 6. Título + nome capitalizado → PERSON ("Dr. Smith")
        for i in 0..tokens.len().saturating_sub(1) {
            if self.person_titles.contains(&tokens[i].lower.as_str())
                && tokens[i + 1].pos == Pos::Propn
            {
                claim(&mut entities, &mut claimed, i, i + 2, EntityLabel::Person, "title_pattern");
            }
        }

        entities.sort_by_key(|e| e.start);
        entities
    }
}

impl Default for EntityRuler {
    fn default() -> Self {
        Self::new()
    }
}
