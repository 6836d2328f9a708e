use axum::Json;
use axum::{
    extract::Path,
    http::{HeaderValue, Method, StatusCode},
    response::Html,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use min2phase::scramble;
use min2phase::solver::{self, SolveResult};

#[tokio::main]
async fn main() {
    let cors = CorsLayer::new()
        .allow_origin("http://127.0.0.1:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET]);
    let app = Router::new()
        .route("/", get(index))
        .route("/solve/:puzzle", get(solve))
        .route("/scramble", get(scramble))
        .layer(cors);

    let app = app.fallback(index);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:32125")
        .await
        .unwrap();
    println!("listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn index() -> Html<&'static str> {
    Html("<p>Solve a cube: http://localhost:32125/solve/<Facelet String></p>
    Example: <a href=\"http://localhost:32125/solve/DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL\">http://localhost:32125/solve/DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL</a>
    <p>Get a scramble: <a href=\"http://localhost:32125/scramble\">http://localhost:32125/scramble</a></p>")
}

async fn scramble() -> Result<String, (StatusCode, String)> {
    let ss = scramble::gen_scramble()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(scramble::scramble_to_str(&ss))
}

async fn solve(Path(puzzle): Path<String>) -> Result<Json<SolveResult>, (StatusCode, String)> {
    let solution = solver::solve(&puzzle, 21, 100_000_000, 0, 0)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("error {}: {}", e.code(), e)))?;
    let length = solution.split_whitespace().count();
    Ok(Json(SolveResult { solution, length }))
}
