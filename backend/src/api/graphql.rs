//! GraphQL transport: HTTP GET/POST and WebSocket subscriptions

use axum::extract::{State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::ACCEPT;
use axum::response::{Html, IntoResponse, Response};
use axum::{Router, routing::get};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::rejection::GraphQLRejection;
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};

use super::AppState;

pub const GRAPHQL_PATH: &str = "/graphql";
pub const GRAPHQL_WS_PATH: &str = "/graphql/ws";

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false)
}

/// Query/mutation handler for POST bodies
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GET: GraphiQL for browsers, otherwise a request encoded in the query string
async fn graphql_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: Result<GraphQLRequest, GraphQLRejection>,
) -> Response {
    if accepts_html(&headers) {
        return Html(
            GraphiQLSource::build()
                .endpoint(GRAPHQL_PATH)
                .subscription_endpoint(GRAPHQL_WS_PATH)
                .finish(),
        )
        .into_response();
    }

    match req {
        Ok(req) => GraphQLResponse::from(state.schema.execute(req.into_inner()).await)
            .into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

/// WebSocket handler for subscriptions
async fn graphql_ws_handler(
    State(state): State<AppState>,
    protocol: GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| {
            tracing::debug!("Subscription socket opened");
            GraphQLWebSocket::new(socket, state.schema.clone(), protocol).serve()
        })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_handler))
        .route(GRAPHQL_WS_PATH, get(graphql_ws_handler))
}
