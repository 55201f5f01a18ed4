//! Servidor web Axum para tokenização e re-treino do modelo de fronteiras

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokenizer_core::{
    corpus, BoundaryTrainer, Segmenter, Span, Token, TrainerConfig, TrainingReport,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Estado compartilhado da aplicação.
///
/// O segmentador é imutável; `/train` troca o `Arc` inteiro, então leituras em
/// andamento continuam com o modelo antigo.
struct AppState {
    segmenter: RwLock<Arc<Segmenter>>,
}

#[derive(Deserialize)]
struct TokenizeRequest {
    text: String,
}

#[derive(Serialize)]
struct TokenizeResponse {
    tokens: Vec<Token>,
    spans: Vec<Span>,
    total_tokens: usize,
}

#[derive(Deserialize)]
struct TrainRequest {
    /// Linhas anotadas com `|`; sem linhas usa o corpus de demonstração.
    #[serde(default)]
    lines: Option<Vec<String>>,
    #[serde(default)]
    config: Option<TrainerConfig>,
}

#[derive(Serialize)]
struct TrainResponse {
    report: TrainingReport,
    accuracy: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let segmenter = initial_segmenter()?;
    info!("modelo pronto com {} features", segmenter.weights().len());
    let state = Arc::new(AppState {
        segmenter: RwLock::new(Arc::new(segmenter)),
    });

    let app = router(state);

    let addr = std::env::var("TOKENIZER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Servidor do tokenizador iniciado em http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tokenize", post(tokenize_handler))
        .route("/train", post(train_handler))
        .route("/model", get(model_handler))
        .layer(cors)
        .with_state(state)
}

/// Modelo inicial: `TOKENIZER_MODEL` tem prioridade e falha se não carregar;
/// senão treina em `TOKENIZER_CORPUS` ou no corpus de demonstração.
fn initial_segmenter() -> tokenizer_core::Result<Segmenter> {
    if let Ok(path) = std::env::var("TOKENIZER_MODEL") {
        info!("carregando modelo de {path}");
        return Segmenter::from_model_path(&path);
    }
    let trainer = BoundaryTrainer::new(TrainerConfig::default());
    match std::env::var("TOKENIZER_CORPUS") {
        Ok(path) => {
            info!("treinando com o corpus {path}");
            trainer.train_file(&path)
        }
        Err(_) => Ok(trainer.train(&corpus::demo_corpus())),
    }
}

/// Tokenização via HTTP POST
async fn tokenize_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenizeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    let segmenter = Arc::clone(&*state.segmenter.read().await);
    let tokens = segmenter.tokens(&req.text);
    let spans = tokens.iter().map(|t| Span::new(t.start, t.end)).collect();

    Json(TokenizeResponse {
        total_tokens: tokens.len(),
        tokens,
        spans,
    })
    .into_response()
}

/// Re-treina o modelo e substitui o segmentador compartilhado.
async fn train_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrainRequest>,
) -> impl IntoResponse {
    let lines: Vec<String> = req
        .lines
        .unwrap_or_else(|| corpus::demo_corpus().into_iter().map(str::to_string).collect());
    let config = req.config.unwrap_or_default();
    info!("re-treinando com {} linhas [{:?}]", lines.len(), config);

    // O treino é síncrono e pode demorar; roda fora do runtime
    let result = tokio::task::spawn_blocking(move || {
        let (segmenter, report) = BoundaryTrainer::new(config).train_with_report(&lines);
        let accuracy = segmenter.evaluate(lines.iter().map(String::as_str));
        (segmenter, report, accuracy)
    })
    .await;

    match result {
        Ok((segmenter, report, accuracy)) => {
            *state.segmenter.write().await = Arc::new(segmenter);
            Json(TrainResponse {
                report,
                accuracy: accuracy.ratio(),
            })
            .into_response()
        }
        Err(err) => {
            error!("falha no treino: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Falha no treino"})),
            )
                .into_response()
        }
    }
}

/// Pesos atuais do modelo, no mesmo formato do artefato em disco.
async fn model_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let segmenter = Arc::clone(&*state.segmenter.read().await);
    Json(segmenter.weights().clone())
}
