// src/services/order_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Page, Pagination},
    },
    db::OrderRepository,
    models::order::{Order, OrderDetail, OrderStatus},
};

// Pedidos já materializados: consulta e ciclo de vida
#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
    order_repo: OrderRepository,
}

impl OrderService {
    pub fn new(pool: PgPool, order_repo: OrderRepository) -> Self {
        Self { pool, order_repo }
    }

    pub async fn list_for_vendor(&self, vendor_id: Uuid, pagination: &Pagination) -> Result<Page<Order>, AppError> {
        let (orders, total) = self
            .order_repo
            .list_by_vendor(vendor_id, pagination.limit(), pagination.offset())
            .await?;
        Ok(Page::new(orders, pagination, total))
    }

    pub async fn list_by_date(
        &self,
        order_date: NaiveDate,
        status: Option<OrderStatus>,
        pagination: &Pagination,
    ) -> Result<Page<Order>, AppError> {
        let (orders, total) = self
            .order_repo
            .list_by_date(order_date, status, pagination.limit(), pagination.offset())
            .await?;
        Ok(Page::new(orders, pagination, total))
    }

    /// Detalhe com itens. Com `owner`, pedidos de outro vendedor viram 404.
    pub async fn detail(&self, order_id: Uuid, owner: Option<Uuid>) -> Result<OrderDetail, AppError> {
        let order = self
            .order_repo
            .find_by_id(&self.pool, order_id)
            .await?
            .filter(|o| owner.is_none_or(|vendor_id| o.vendor_id == vendor_id))
            .ok_or(AppError::OrderNotFound)?;

        let vendor_name = self.order_repo.vendor_name(&self.pool, order.vendor_id).await?;
        let items = self.order_repo.list_items(&self.pool, order.id).await?;

        Ok(OrderDetail { header: order, vendor_name, items })
    }

    pub async fn update_status(&self, order_id: Uuid, requested: OrderStatus) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self.order_repo.lock_status(&mut *tx, order_id).await?;
        if !current.can_transition_to(requested) {
            return Err(AppError::InvalidStatusTransition { current, requested });
        }
        let order = self.order_repo.update_status(&mut *tx, order_id, requested).await?;

        tx.commit().await?;
        tracing::info!(
            order_id = %order_id,
            from = current.as_str(),
            to = requested.as_str(),
            "Status do pedido atualizado"
        );
        Ok(order)
    }
}
