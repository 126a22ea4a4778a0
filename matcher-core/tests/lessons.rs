//! Testes de integração fim-a-fim: cada caso reproduz uma lição completa
//! usando apenas a API pública do crate (anotar, registrar padrão, casar).

use matcher_core::{annotate, demo, EntityLabel, EntityRuler, Matcher};

fn match_texts(matcher: &Matcher, text: &str) -> Vec<String> {
    let doc = annotate(text);
    matcher
        .find_matches(&doc)
        .unwrap()
        .iter()
        .map(|m| doc.span(m.start, m.end).unwrap().text().to_string())
        .collect()
}

#[test]
fn licao_iphone_x() {
    let mut matcher = Matcher::new();
    matcher
        .add_json("IPHONE_X", r#"[{"LOWER": "iphone"}, {"LOWER": "x"}]"#)
        .unwrap();
    let found = match_texts(
        &matcher,
        "New iPhone X release date leaked as Apple reveals pre-orders by mistake",
    );
    assert_eq!(found, vec!["iPhone X"]);
}

#[test]
fn licao_versoes_ios() {
    let mut matcher = Matcher::new();
    matcher
        .add_json("IOS_VERSION", r#"[{"TEXT": "iOS"}, {"IS_DIGIT": true}]"#)
        .unwrap();
    let found = match_texts(
        &matcher,
        "After making the iOS update you won't notice a radical system-wide \
         redesign: nothing like the aesthetic upheaval we got with iOS 7. Most of \
         iOS 11 remains the same as in iOS 10. But you will discover some tweaks \
         once you delve a little deeper.",
    );
    assert_eq!(found, vec!["iOS 7", "iOS 11", "iOS 10"]);
}

#[test]
fn licao_downloads() {
    let mut matcher = Matcher::new();
    matcher
        .add_json("DOWNLOAD", r#"[{"LEMMA": "download"}, {"POS": "PROPN"}]"#)
        .unwrap();
    let found = match_texts(
        &matcher,
        "i downloaded Fortnite on my laptop and can't open the game at all. Help? \
         so when I was downloading Minecraft, I got the Windows version where it \
         is the '.zip' folder and I used the default program to unpack it... do \
         I also need to download Winzip?",
    );
    assert_eq!(
        found,
        vec!["downloaded Fortnite", "downloading Minecraft", "download Winzip"]
    );
}

#[test]
fn licao_adjetivo_substantivo() {
    let mut matcher = Matcher::new();
    matcher
        .add_json(
            "ADJ_NOUN",
            r#"[{"POS": "ADJ"}, {"POS": "NOUN"}, {"POS": "NOUN", "OP": "?"}]"#,
        )
        .unwrap();
    let found = match_texts(
        &matcher,
        "Features of the app include a beautiful design, smart search, automatic \
         labels and optional voice responses.",
    );
    assert_eq!(
        found,
        vec![
            "beautiful design",
            "smart search",
            "automatic labels",
            "optional voice responses"
        ]
    );
}

#[test]
fn licao_compras() {
    let mut matcher = Matcher::new();
    matcher
        .add_json(
            "BUY",
            r#"[{"LEMMA": "buy"}, {"POS": "DET", "OP": "?"}, {"POS": "NOUN"}]"#,
        )
        .unwrap();
    let found = match_texts(&matcher, "I bought a smartphone. Now I'm buying apps.");
    assert_eq!(found, vec!["bought a smartphone", "buying apps"]);
}

#[test]
fn licao_atributos_lexicais() {
    // Cifrão seguido de algo que pareça número (inclui "10.5" e "1,000")
    let mut matcher = Matcher::new();
    matcher
        .add_json("PRICE", r#"[{"TEXT": "$"}, {"LIKE_NUM": true}]"#)
        .unwrap();
    let found = match_texts(&matcher, "It costs $5.");
    assert_eq!(found, vec!["$5"]);
}

#[test]
fn licao_copa_do_mundo() {
    let mut matcher = Matcher::new();
    matcher
        .add_json(
            "WORLDCUP",
            r#"[{"IS_DIGIT": true}, {"LOWER": "fifa"}, {"LOWER": "world"},
                {"LOWER": "cup"}, {"IS_PUNCT": true}]"#,
        )
        .unwrap();
    let text = "2018 FIFA World Cup: France won!";
    let found = match_texts(&matcher, text);
    assert_eq!(found, vec!["2018 FIFA World Cup:"]);

    // A mesma lição inspeciona doc.ents: "France" sai como GPE
    let doc = annotate(text);
    let ents = EntityRuler::new().apply(&doc);
    assert!(ents
        .iter()
        .any(|e| e.text == "France" && e.label == EntityLabel::Gpe));
}

#[test]
fn padroes_de_demonstracao_casam_seus_textos() {
    // Cada texto do corpus de demonstração deve ser anotável sem pânico e os
    // padrões canônicos devem todos registrar
    let mut matcher = Matcher::new();
    for (name, json) in demo::demo_patterns() {
        matcher.add_json(name, json).unwrap();
    }
    let mut total = 0;
    for (_, text) in demo::demo_texts() {
        let doc = annotate(text);
        total += matcher.find_matches(&doc).unwrap().len();
    }
    assert!(total >= 6, "esperava casamentos pelos textos do corpus, obtive {}", total);
}
