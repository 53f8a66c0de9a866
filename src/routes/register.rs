use crate::{
    database,
    error::RegistrationError,
    model::{
        account::NewAccount,
        messages::{
            MessageBody, ALREADY_EXISTS, INTERNAL_ERROR, INVALID_PAYLOAD, PAYLOAD_TOO_LARGE,
            REGISTERED,
        },
    },
    state::ServerState,
};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::{
    body::{Body, Bytes},
    header::{self, HeaderValue},
    Request, Response, StatusCode,
};
use log::{debug, error, info};
use serde_json::Value;

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

pub async fn handle_register<B>(req: Request<B>, state: ServerState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body_bytes = match Limited::new(req.into_body(), MAX_BODY_BYTES).collect().await {
        Ok(body) => body.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            debug!("Registration body exceeds {} bytes", MAX_BODY_BYTES);
            return json_response(StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE);
        }
        Err(e) => {
            debug!("Failed to read registration body: {}", e);
            return json_response(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
        }
    };

    let payload = match serde_json::from_slice::<Value>(&body_bytes) {
        Ok(body) => NewAccount::from_json(&body),
        Err(e) => {
            debug!("Registration body is not JSON: {}", e);
            return json_response(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
        }
    };

    match database::create_account(&state.db_pool, payload, state.password_storage).await {
        Ok(account) => {
            info!("Registered account {} ({})", account.id, account.username);
            json_response(StatusCode::CREATED, REGISTERED)
        }
        Err(RegistrationError::Conflict) => {
            debug!("Registration rejected: username or email already taken");
            json_response(StatusCode::BAD_REQUEST, ALREADY_EXISTS)
        }
        Err(e) => {
            error!("Failed to register account: {}", e);
            json_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

pub fn json_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!(MessageBody::new(message)).to_string();
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[cfg(test)]
pub(crate) async fn read_message(response: Response<Full<Bytes>>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice::<MessageBody>(&bytes).unwrap().message
}
