//! Servidor web Axum com WebSocket para visualização do casador de padrões em tempo real

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use matcher_core::{
    demo::{demo_patterns, demo_texts},
    explain::explain,
    matcher::Matcher,
    pattern::Pattern,
    pipeline::{AnalysisMode, MatchPipeline, PipelineEvent},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: MatchPipeline,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
    #[serde(default)]
    mode: Option<AnalysisMode>,
    /// Padrões customizados: nome -> padrão (array JSON de restrições).
    /// Quando presente, substituem os padrões das lições.
    #[serde(default)]
    patterns: Option<Vec<NamedPattern>>,
}

#[derive(Deserialize)]
struct NamedPattern {
    name: String,
    pattern: serde_json::Value,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
    #[serde(default)]
    mode: Option<AnalysisMode>,
    #[serde(default)]
    patterns: Option<Vec<NamedPattern>>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    tokens: Vec<matcher_core::Token>,
    entities: Vec<matcher_core::Entity>,
    matches: Vec<matcher_core::MatchedSpan>,
    total_tokens: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let pipeline = MatchPipeline::new();
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/demo-patterns", get(demo_patterns_handler))
        .route("/explain/:term", get(explain_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("🚀 Servidor do matcher iniciado em http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Monta um matcher com os padrões enviados pelo cliente.
fn build_matcher(patterns: &[NamedPattern]) -> Result<Matcher, String> {
    let mut matcher = Matcher::new();
    for named in patterns {
        let pattern = Pattern::from_value(matcher.schema(), &named.pattern)
            .map_err(|e| format!("{}: {}", named.name, e))?;
        matcher
            .add(&named.name, pattern)
            .map_err(|e| e.to_string())?;
    }
    Ok(matcher)
}

/// Análise via HTTP POST (sem streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    let mode = req.mode.unwrap_or_default();

    // Com padrões customizados, um pipeline descartável; senão, o compartilhado
    let custom = match &req.patterns {
        Some(patterns) => match build_matcher(patterns) {
            Ok(matcher) => Some(MatchPipeline::with_matcher(matcher)),
            Err(message) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"error": message})),
                )
                    .into_response();
            }
        },
        None => None,
    };
    let pipeline = custom.as_ref().unwrap_or(&state.pipeline);

    // Erro de casamento (orçamento de backtracking estourado) vira 400, não
    // uma lista vazia de casamentos
    match pipeline.analyze(&req.text, mode) {
        Ok((doc, entities, matches)) => {
            let total_tokens = doc.len();
            Json(AnalyzeResponse {
                tokens: doc.tokens().to_vec(),
                entities,
                matches,
                total_tokens,
            })
            .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(title, text)| {
            serde_json::json!({
                "title": title,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// Retorna os padrões canônicos das lições
async fn demo_patterns_handler() -> impl IntoResponse {
    let patterns: Vec<serde_json::Value> = demo_patterns()
        .iter()
        .map(|(name, json)| {
            let parsed: serde_json::Value =
                serde_json::from_str(json).unwrap_or(serde_json::Value::Null);
            serde_json::json!({
                "name": name,
                "pattern": parsed
            })
        })
        .collect();
    Json(patterns)
}

/// Glossário: definição de um rótulo (POS, tag, dependência ou entidade)
async fn explain_handler(Path(term): Path<String>) -> impl IntoResponse {
    match explain(&term) {
        Some(definition) => Json(serde_json::json!({
            "term": term,
            "definition": definition
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("Rótulo desconhecido: {}", term)})),
        )
            .into_response(),
    }
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe texto, executa pipeline e envia eventos em tempo real
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Tenta parsear como JSON {text, mode, patterns}; senão usa como texto puro
                let (text_str, mode, patterns) =
                    if let Ok(req) = serde_json::from_str::<WsRequest>(&text) {
                        (
                            req.text.trim().to_string(),
                            req.mode.unwrap_or_default(),
                            req.patterns,
                        )
                    } else {
                        (text.trim().to_string(), AnalysisMode::Full, None)
                    };

                if text_str.is_empty() {
                    continue;
                }

                info!(
                    "Analisando via WebSocket [{:?}]: {} chars",
                    mode,
                    text_str.len()
                );

                let custom = match &patterns {
                    Some(named) => match build_matcher(named) {
                        Ok(matcher) => Some(MatchPipeline::with_matcher(matcher)),
                        Err(message) => {
                            let event = PipelineEvent::Error { message };
                            if let Ok(json) = serde_json::to_string(&event) {
                                let _ = socket.send(Message::Text(json)).await;
                            }
                            continue;
                        }
                    },
                    None => None,
                };

                // Executa o pipeline em spawn_blocking para não bloquear o runtime
                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();

                let state_for_thread = Arc::clone(&state);
                let text_for_thread = text_str.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    match &custom {
                        Some(pipeline) => {
                            pipeline.analyze_streaming(&text_for_thread, mode, tx_std)
                        }
                        None => state_for_thread
                            .pipeline
                            .analyze_streaming(&text_for_thread, mode, tx_std),
                    }
                });

                handle.await.ok();

                // Coleta todos os eventos numa Vec (o rx_std não é Send)
                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
