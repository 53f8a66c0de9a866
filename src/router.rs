use crate::{
    routes::register,
    state::{CorsPolicy, ServerState},
};
use http_body_util::Full;
use hyper::{
    body::{Body, Bytes},
    header::{self, HeaderValue},
    Method, Request, Response, StatusCode,
};

pub async fn router<B>(
    req: Request<B>,
    state: ServerState,
) -> Result<Response<Full<Bytes>>, hyper::Error>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut response = Response::new(Full::new(Bytes::new()));

    if req.method() == Method::OPTIONS {
        *response.status_mut() = StatusCode::NO_CONTENT;
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, state.cors.allow_methods());
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
    } else {
        match (req.method(), req.uri().path()) {
            (&Method::POST, "/register") => {
                response = register::handle_register(req, state.clone()).await;
            }
            _ => {
                *response.status_mut() = StatusCode::NOT_FOUND;
            }
        }
    }

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, state.cors.allow_origin());
    if let CorsPolicy::Origin(_) = state.cors {
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PasswordStorage,
        database::test_pool,
        model::messages::REGISTERED,
        routes::register::read_message,
        state::ServerStateData,
    };

    async fn state_with(cors: CorsPolicy) -> ServerState {
        ServerStateData::new(test_pool().await, cors, PasswordStorage::Plaintext)
    }

    fn request(method: Method, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    #[tokio::test]
    async fn post_register_reaches_the_handler() {
        let state = state_with(CorsPolicy::Any).await;
        let body = r#"{"username":"alice","email":"a@x.com","password":"p"}"#;
        let response = router(request(Method::POST, "/register", body), state).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers().get(header::VARY).is_none());
        assert_eq!(read_message(response).await, REGISTERED);
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let state = state_with(CorsPolicy::Any).await;
        let response = router(request(Method::GET, "/register", ""), state.clone()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = router(request(Method::POST, "/login", "{}"), state).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn preflight_answers_with_allowed_methods() {
        let state = state_with(CorsPolicy::Any).await;
        let response = router(request(Method::OPTIONS, "/register", ""), state).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,HEAD,PUT,PATCH,POST,DELETE");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn restricted_origin_is_reported_on_every_response() {
        let cors = CorsPolicy::from_origin(Some("http://localhost:5173")).unwrap();
        let state = state_with(cors).await;

        let response = router(request(Method::OPTIONS, "/register", ""), state.clone()).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,POST");
        assert_eq!(response.headers()[header::VARY], "Origin");

        let response = router(request(Method::POST, "/register", "{}"), state).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
    }
}
