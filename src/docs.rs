// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register_vendor,
        handlers::auth::login_vendor,
        handlers::auth::login_admin,

        // --- Vendor ---
        handlers::auth::get_me,
        handlers::vendor::get_daily_needs,
        handlers::vendor::set_daily_needs,
        handlers::vendor::create_extra_order,
        handlers::vendor::list_extra_orders,
        handlers::vendor::create_cancellation,
        handlers::vendor::list_cancellations,
        handlers::vendor::delete_cancellation,
        handlers::vendor::list_my_orders,
        handlers::vendor::get_my_order,
        handlers::vendor::create_return,
        handlers::vendor::list_my_returns,
        handlers::vendor::list_my_notifications,
        handlers::vendor::mark_notification_read,

        // --- Admin: geração e separação ---
        handlers::generation::generate_orders,
        handlers::generation::get_packing_list,

        // --- Admin: cadastros ---
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::update_product,
        handlers::catalog::list_vendors,
        handlers::catalog::set_vendor_active,

        // --- Admin: pedidos ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order_status,

        // --- Admin: back office ---
        handlers::back_office::list_returns,
        handlers::back_office::resolve_return,
        handlers::back_office::create_payment,
        handlers::back_office::list_vendor_payments,
        handlers::back_office::send_notification,
        handlers::back_office::broadcast_notification,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::RegisterVendorPayload,
            models::auth::VendorLoginPayload,
            models::auth::AdminLoginPayload,
            models::auth::AuthResponse,

            // --- Cadastros ---
            models::vendor::Vendor,
            models::product::Product,

            // --- Demanda ---
            models::demand::DailyNeed,
            models::demand::DailyNeedView,
            models::demand::ExtraOrder,
            models::demand::ExtraOrderView,
            models::demand::CancelledOrder,
            models::demand::CancellationNotice,

            // --- Pedidos ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderItemView,
            models::order::OrderDetail,

            // --- Geração e separação ---
            models::generation::LineSource,
            models::generation::GeneratedOrderSummary,
            models::generation::SkipReason,
            models::generation::SkippedVendor,
            models::generation::FailedVendor,
            models::generation::GenerationReport,
            models::packing::PackingListEntry,
            models::packing::PackingSummary,
            models::packing::PackingList,

            // --- Back office ---
            models::returns::ReturnStatus,
            models::returns::ReturnRequest,
            models::payment::Payment,
            models::notification::Notification,

            // --- Payloads ---
            handlers::vendor::DailyNeedInput,
            handlers::vendor::SetDailyNeedsPayload,
            handlers::vendor::CreateExtraOrderPayload,
            handlers::vendor::CreateCancellationPayload,
            handlers::vendor::CreateReturnPayload,
            handlers::catalog::CreateProductPayload,
            handlers::catalog::UpdateProductPayload,
            handlers::catalog::SetVendorActivePayload,
            handlers::generation::GenerateOrdersPayload,
            handlers::orders::UpdateOrderStatusPayload,
            handlers::back_office::ResolveReturnPayload,
            handlers::back_office::CreatePaymentPayload,
            handlers::back_office::SendNotificationPayload,
            handlers::back_office::BroadcastPayload,
            handlers::back_office::BroadcastResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro e login de vendedores e equipe"),
        (name = "Vendor", description = "Autoatendimento do vendedor"),
        (name = "Admin", description = "Back office: geração, separação, cadastros e pedidos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
