//! # Textos e Padrões de Demonstração
//!
//! O corpus das lições: cada texto vem acompanhado dos padrões canônicos que a
//! lição correspondente constrói sobre ele. Alimenta a interface web e os
//! testes de integração.

/// Textos de demonstração: (título, texto)
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "iPhone X",
            "New iPhone X release date leaked as Apple reveals pre-orders by mistake",
        ),
        (
            "Versões do iOS",
            "After making the iOS update you won't notice a radical system-wide \
             redesign: nothing like the aesthetic upheaval we got with iOS 7. Most of \
             iOS 11's furniture remains the same as in iOS 10. But you will discover \
             some tweaks once you delve a little deeper.",
        ),
        (
            "Downloads",
            "i downloaded Fortnite on my laptop and can't open the game at all. Help? \
             so when I was downloading Minecraft, I got the Windows version where it \
             is the '.zip' folder and I used the default program to unpack it... do \
             I also need to download Winzip?",
        ),
        (
            "Recursos do app",
            "Features of the app include a beautiful design, smart search, automatic \
             labels and optional voice responses.",
        ),
        (
            "Copa do Mundo",
            "2018 FIFA World Cup: France won!",
        ),
        (
            "Compras",
            "I bought a smartphone. Now I'm buying apps.",
        ),
        (
            "Sintaxe simples",
            "She ate the pizza",
        ),
        (
            "Atributos lexicais",
            "It costs $5.",
        ),
    ]
}

/// Padrões canônicos das lições: (nome, padrão em JSON)
pub fn demo_patterns() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "IPHONE_X_PATTERN",
            r#"[{"LOWER": "iphone"}, {"LOWER": "x"}]"#,
        ),
        (
            "IOS_VERSION_PATTERN",
            r#"[{"TEXT": "iOS"}, {"IS_DIGIT": true}]"#,
        ),
        (
            "DOWNLOAD_THINGS_PATTERN",
            r#"[{"LEMMA": "download"}, {"POS": "PROPN"}]"#,
        ),
        (
            "ADJ_NOUN_PATTERN",
            r#"[{"POS": "ADJ"}, {"POS": "NOUN"}, {"POS": "NOUN", "OP": "?"}]"#,
        ),
        (
            "BUY_PATTERN",
            r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#,
        ),
        (
            "WORLDCUP_PATTERN",
            r#"[{"IS_DIGIT": true}, {"LOWER": "fifa"}, {"LOWER": "world"},
                {"LOWER": "cup"}, {"IS_PUNCT": true}]"#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;

    #[test]
    fn test_demo_patterns_all_compile() {
        let mut matcher = Matcher::new();
        for (name, json) in demo_patterns() {
            matcher.add_json(name, json).unwrap();
        }
        assert_eq!(matcher.len(), demo_patterns().len());
    }

    #[test]
    fn test_demo_texts_nonempty() {
        for (title, text) in demo_texts() {
            assert!(!title.is_empty());
            assert!(!text.trim().is_empty());
        }
    }
}
