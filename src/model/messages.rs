use serde::{Deserialize, Serialize};

pub const REGISTERED: &str = "Usuário cadastrado com sucesso!";
pub const ALREADY_EXISTS: &str = "Usuário ou e-mail já existente.";
pub const INTERNAL_ERROR: &str = "Erro interno no servidor.";
pub const INVALID_PAYLOAD: &str = "Requisição inválida.";
pub const PAYLOAD_TOO_LARGE: &str = "Requisição muito grande.";

/// Body of every response the API sends.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}
