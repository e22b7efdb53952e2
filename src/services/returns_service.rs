// src/services/returns_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Page, Pagination},
    },
    db::{OrderRepository, ReturnsRepository},
    models::returns::{ReturnRequest, ReturnStatus},
};

#[derive(Clone)]
pub struct ReturnsService {
    pool: PgPool,
    returns_repo: ReturnsRepository,
    order_repo: OrderRepository,
}

impl ReturnsService {
    pub fn new(pool: PgPool, returns_repo: ReturnsRepository, order_repo: OrderRepository) -> Self {
        Self { pool, returns_repo, order_repo }
    }

    /// Abre uma devolução. O pedido tem que ser do vendedor e, se vier um
    /// produto, ele tem que estar entre os itens do pedido.
    pub async fn request_return(
        &self,
        vendor_id: Uuid,
        order_id: Uuid,
        product_id: Option<Uuid>,
        quantity: Option<i32>,
        reason: &str,
    ) -> Result<ReturnRequest, AppError> {
        let order = self
            .order_repo
            .find_by_id(&self.pool, order_id)
            .await?
            .filter(|o| o.vendor_id == vendor_id)
            .ok_or(AppError::OrderNotFound)?;

        if let Some(product_id) = product_id {
            let items = self.order_repo.list_items(&self.pool, order.id).await?;
            let ordered: i32 = items
                .iter()
                .filter(|i| i.product_id == product_id)
                .map(|i| i.quantity)
                .sum();
            if ordered == 0 {
                return Err(AppError::BadRequest("product is not part of this order".into()));
            }
            if quantity.is_some_and(|q| q > ordered) {
                return Err(AppError::BadRequest("quantity exceeds the ordered amount".into()));
            }
        }

        let request = self
            .returns_repo
            .create(&self.pool, vendor_id, order.id, product_id, quantity, reason)
            .await?;
        tracing::info!(return_id = %request.id, order_id = %order.id, "Devolução solicitada");
        Ok(request)
    }

    pub async fn list_for_vendor(&self, vendor_id: Uuid) -> Result<Vec<ReturnRequest>, AppError> {
        self.returns_repo.list_by_vendor(vendor_id).await
    }

    pub async fn list(&self, status: Option<ReturnStatus>, pagination: &Pagination) -> Result<Page<ReturnRequest>, AppError> {
        let (requests, total) = self
            .returns_repo
            .list(status, pagination.limit(), pagination.offset())
            .await?;
        Ok(Page::new(requests, pagination, total))
    }

    pub async fn resolve(
        &self,
        return_id: Uuid,
        status: ReturnStatus,
        admin_notes: Option<&str>,
    ) -> Result<ReturnRequest, AppError> {
        if status == ReturnStatus::Pending {
            return Err(AppError::BadRequest("a return can only be approved or rejected".into()));
        }

        self.returns_repo
            .resolve(&self.pool, return_id, status, admin_notes)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("pending return request {}", return_id)))
    }
}
