// src/common/i18n.rs
//
// Catálogo de mensagens de erro. Chaves desconhecidas caem em "internal".

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pt"];
pub const DEFAULT_LANGUAGE: &str = "en";

pub fn message(lang: &str, key: &str) -> &'static str {
    match lang {
        "pt" => pt(key),
        _ => en(key),
    }
}

fn pt(key: &str) -> &'static str {
    match key {
        "validation" => "Um ou mais campos são inválidos.",
        "invalid_credentials" => "Telefone, e-mail ou senha inválidos.",
        "invalid_token" => "Token de autenticação inválido ou ausente.",
        "forbidden" => "Você não tem acesso a este recurso.",
        "vendor_not_found" => "Vendedor não encontrado.",
        "vendor_inactive" => "Este vendedor está inativo.",
        "phone_exists" => "Este telefone já está em uso.",
        "product_not_found" => "Produto não encontrado.",
        "product_inactive" => "Este produto está inativo.",
        "order_not_found" => "Pedido não encontrado.",
        "invalid_transition" => "Mudança de status não permitida para este pedido.",
        "already_generated" => "O pedido deste vendedor para esta data já foi gerado.",
        "date_cancelled" => "O vendedor cancelou a entrega desta data.",
        "cancellation_exists" => "Já existe um cancelamento para esta data.",
        "cancellation_not_found" => "Cancelamento não encontrado.",
        "cancellation_locked" => "O pedido desta data já foi gerado e não pode mais ser cancelado.",
        "not_found" => "Recurso não encontrado.",
        "bad_request" => "Requisição inválida.",
        _ => "Ocorreu um erro inesperado.",
    }
}

fn en(key: &str) -> &'static str {
    match key {
        "validation" => "One or more fields are invalid.",
        "invalid_credentials" => "Invalid phone, e-mail or password.",
        "invalid_token" => "Missing or invalid authentication token.",
        "forbidden" => "You do not have access to this resource.",
        "vendor_not_found" => "Vendor not found.",
        "vendor_inactive" => "This vendor is inactive.",
        "phone_exists" => "This phone number is already registered.",
        "product_not_found" => "Product not found.",
        "product_inactive" => "This product is inactive.",
        "order_not_found" => "Order not found.",
        "invalid_transition" => "This status change is not allowed for the order.",
        "already_generated" => "An order was already generated for this vendor and date.",
        "date_cancelled" => "The vendor cancelled the delivery for this date.",
        "cancellation_exists" => "A cancellation already exists for this date.",
        "cancellation_not_found" => "Cancellation not found.",
        "cancellation_locked" => "The order for this date was already generated and can no longer be cancelled.",
        "not_found" => "Resource not found.",
        "bad_request" => "Bad request.",
        _ => "An unexpected error occurred.",
    }
}
