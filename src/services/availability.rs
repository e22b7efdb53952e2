// src/services/availability.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

/// Data padrão da geração e da lista de separação (fuso local do servidor).
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Quem pode receber entrega numa data.
///
/// Predicado único para "o vendedor cancelou esta data?": o agregador de
/// pedidos e a lista de separação consultam a mesma regra.
#[derive(Debug, Clone, Default)]
pub struct DateAvailability {
    cancelled: HashSet<Uuid>,
}

impl DateAvailability {
    pub fn new(cancelled_vendors: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            cancelled: cancelled_vendors.into_iter().collect(),
        }
    }

    pub fn is_vendor_active_for(&self, vendor_id: Uuid) -> bool {
        !self.cancelled.contains(&vendor_id)
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled.len()
    }
}
